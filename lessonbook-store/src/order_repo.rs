use async_trait::async_trait;
use lessonbook_core::repository::OrderRepository;
use lessonbook_core::{CoreError, CoreResult, Order, OrderSpaces};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Bson, DateTime, Document};
use mongodb::Collection;
use tracing::info;

use crate::store_error;

pub struct MongoOrderRepository {
    collection: Collection<Document>,
}

impl MongoOrderRepository {
    pub fn new(collection: Collection<Document>) -> Self {
        Self { collection }
    }
}

/// `createdAt` is stored as a native BSON date rather than a string.
fn order_document(order: &Order) -> Document {
    doc! {
        "name": order.name.as_str(),
        "phone": order.phone.as_str(),
        "lessonIDs": order.lesson_ids.clone(),
        "spaces": spaces_bson(&order.spaces),
        "createdAt": DateTime::from_chrono(order.created_at),
    }
}

fn spaces_bson(spaces: &OrderSpaces) -> Bson {
    match spaces {
        OrderSpaces::Total(n) => Bson::Int64(i64::from(*n)),
        OrderSpaces::PerLesson(counts) => {
            Bson::Array(counts.iter().map(|n| Bson::Int64(i64::from(*n))).collect())
        }
    }
}

#[async_trait]
impl OrderRepository for MongoOrderRepository {
    async fn create_order(&self, order: &Order) -> CoreResult<ObjectId> {
        let result = self
            .collection
            .insert_one(order_document(order))
            .await
            .map_err(store_error)?;

        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| CoreError::Store("insert did not return an ObjectId".to_string()))?;
        info!("Order {} created for {} lesson(s)", id, order.lesson_ids.len());
        Ok(id)
    }
}
