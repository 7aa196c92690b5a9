use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Spaces requested by an order: a single total, or one count per lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderSpaces {
    #[serde(deserialize_with = "crate::number::deserialize_count")]
    Total(u32),
    #[serde(deserialize_with = "crate::number::deserialize_counts")]
    PerLesson(Vec<u32>),
}

impl OrderSpaces {
    /// Zero and an empty list both count as "not provided".
    pub fn is_provided(&self) -> bool {
        match self {
            OrderSpaces::Total(n) => *n > 0,
            OrderSpaces::PerLesson(counts) => !counts.is_empty(),
        }
    }
}

/// Body of `POST /orders`. Every field is optional here so that a missing
/// field surfaces as a validation error instead of a deserialization one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateOrderRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    #[serde(rename = "lessonIDs")]
    pub lesson_ids: Option<Vec<String>>,
    pub spaces: Option<OrderSpaces>,
}

/// A booking, as inserted into the `orders` collection.
///
/// Lesson identifiers are stored as given; they are not checked against the
/// lessons collection and no spaces are reserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub name: String,
    pub phone: String,
    #[serde(rename = "lessonIDs")]
    pub lesson_ids: Vec<String>,
    pub spaces: OrderSpaces,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn from_request(
        req: CreateOrderRequest,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let name = req.name.filter(|name| !name.is_empty());
        let phone = req.phone.filter(|phone| !phone.is_empty());
        let lesson_ids = req.lesson_ids.filter(|ids| !ids.is_empty());
        let spaces = req.spaces.filter(OrderSpaces::is_provided);

        match (name, phone, lesson_ids, spaces) {
            (Some(name), Some(phone), Some(lesson_ids), Some(spaces)) => Ok(Order {
                name,
                phone,
                lesson_ids,
                spaces,
                created_at,
            }),
            _ => Err(ValidationError::MissingOrderFields),
        }
    }
}
