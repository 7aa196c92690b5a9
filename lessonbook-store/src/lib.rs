pub mod app_config;
pub mod database;
pub mod lesson_repo;
pub mod order_repo;

pub use database::MongoStore;
pub use lesson_repo::MongoLessonRepository;
pub use order_repo::MongoOrderRepository;

use lessonbook_core::CoreError;

pub(crate) fn store_error(err: mongodb::error::Error) -> CoreError {
    CoreError::Store(err.to_string())
}
