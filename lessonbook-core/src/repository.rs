use async_trait::async_trait;
use bson::oid::ObjectId;

use crate::connection::ConnectionState;
use crate::lesson::{Lesson, LessonPatch};
use crate::order::Order;
use crate::CoreResult;

/// Result of a successful lesson update.
#[derive(Debug, Clone, PartialEq)]
pub struct LessonUpdate {
    /// The record as re-read after the write.
    pub lesson: Lesson,
    /// Number of patched fields whose stored value actually changed.
    pub modified_count: u64,
}

/// Repository trait for lesson data access
#[async_trait]
pub trait LessonRepository: Send + Sync {
    /// Every lesson, in whatever order the store scans them.
    async fn list_lessons(&self) -> CoreResult<Vec<Lesson>>;

    /// Apply `patch` to the lesson with `id`. `Ok(None)` when nothing matches.
    async fn update_lesson(
        &self,
        id: ObjectId,
        patch: &LessonPatch,
    ) -> CoreResult<Option<LessonUpdate>>;
}

/// Repository trait for order data access
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert a new order and return its assigned identifier.
    async fn create_order(&self, order: &Order) -> CoreResult<ObjectId>;
}

/// Read-only view of the store connection for health reporting.
pub trait StoreStatus: Send + Sync {
    fn connection_state(&self) -> ConnectionState;
    fn database_name(&self) -> &str;

    fn is_connected(&self) -> bool {
        self.connection_state() == ConnectionState::Connected
    }
}
