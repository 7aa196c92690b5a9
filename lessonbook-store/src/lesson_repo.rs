use async_trait::async_trait;
use futures_util::TryStreamExt;
use lessonbook_core::repository::{LessonRepository, LessonUpdate};
use lessonbook_core::{CoreResult, Lesson, LessonPatch};
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::options::ReturnDocument;
use mongodb::Collection;
use tracing::{debug, warn};

use crate::store_error;

pub struct MongoLessonRepository {
    collection: Collection<Lesson>,
}

impl MongoLessonRepository {
    pub fn new(collection: Collection<Lesson>) -> Self {
        Self { collection }
    }
}

#[async_trait]
impl LessonRepository for MongoLessonRepository {
    async fn list_lessons(&self) -> CoreResult<Vec<Lesson>> {
        // No sort: natural order is fine for the catalog
        let cursor = self.collection.find(doc! {}).await.map_err(store_error)?;
        let lessons: Vec<Lesson> = cursor.try_collect().await.map_err(store_error)?;
        debug!("Fetched {} lessons", lessons.len());
        Ok(lessons)
    }

    async fn update_lesson(
        &self,
        id: ObjectId,
        patch: &LessonPatch,
    ) -> CoreResult<Option<LessonUpdate>> {
        let filter = doc! { "_id": id };

        // Every supplied key was outside the allow-list; nothing to write.
        if patch.is_empty() {
            let lesson = self.collection.find_one(filter).await.map_err(store_error)?;
            return Ok(lesson.map(|lesson| LessonUpdate { lesson, modified_count: 0 }));
        }

        let before = self
            .collection
            .find_one_and_update(filter.clone(), doc! { "$set": patch.to_set_document() })
            .return_document(ReturnDocument::Before)
            .await
            .map_err(store_error)?;

        let Some(before) = before else {
            return Ok(None);
        };
        let modified_count = patch.changed_fields(&before);

        let lesson = self.collection.find_one(filter).await.map_err(store_error)?;
        if lesson.is_none() {
            warn!("Lesson {} disappeared between update and re-read", id);
        }
        debug!("Lesson {} updated, fields={:?}, changed={}", id, patch.fields(), modified_count);

        Ok(lesson.map(|lesson| LessonUpdate { lesson, modified_count }))
    }
}
