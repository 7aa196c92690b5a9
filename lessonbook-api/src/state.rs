use lessonbook_core::repository::{LessonRepository, OrderRepository, StoreStatus};
use std::sync::Arc;

use crate::images::ImageAssets;

#[derive(Clone)]
pub struct AppState {
    pub lessons: Arc<dyn LessonRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub store: Arc<dyn StoreStatus>,
    pub images: Arc<ImageAssets>,
}
