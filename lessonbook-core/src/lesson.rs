use bson::oid::ObjectId;
use bson::Document;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::number::whole_number;
use crate::ValidationError;

/// Lesson fields a client may change. Anything else in an update payload is
/// dropped.
pub const UPDATABLE_FIELDS: [&str; 5] = ["subject", "location", "price", "spaces", "image"];

pub fn is_updatable(field: &str) -> bool {
    UPDATABLE_FIELDS.contains(&field)
}

/// One offered class, as stored in the `lessons` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    /// Rendered as a hex string in JSON responses.
    #[serde(
        rename = "_id",
        serialize_with = "bson::serde_helpers::serialize_object_id_as_hex_string"
    )]
    pub id: ObjectId,
    pub subject: String,
    pub location: String,
    pub price: f64,
    #[serde(deserialize_with = "crate::number::deserialize_whole")]
    pub spaces: i64,
    #[serde(default)]
    pub image: String,
}

/// Parse a path segment into a store identifier.
pub fn parse_lesson_id(raw: &str) -> Result<ObjectId, ValidationError> {
    ObjectId::parse_str(raw).map_err(|_| ValidationError::InvalidLessonId(raw.to_string()))
}

/// A validated partial update, already projected onto [`UPDATABLE_FIELDS`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LessonPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spaces: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl LessonPatch {
    /// Validate a raw update body.
    ///
    /// Checks run in a fixed order: non-empty body, then `spaces`, then
    /// `price`, then the text fields. Keys outside the allow-list are
    /// skipped without error.
    pub fn from_payload(payload: &Map<String, Value>) -> Result<Self, ValidationError> {
        if payload.is_empty() {
            return Err(ValidationError::EmptyUpdate);
        }

        let mut patch = LessonPatch {
            spaces: payload.get("spaces").map(parse_spaces).transpose()?,
            price: payload.get("price").map(parse_price).transpose()?,
            ..Default::default()
        };

        for (key, value) in payload {
            if !is_updatable(key) {
                tracing::debug!(field = %key, "ignoring non-updatable lesson field");
                continue;
            }
            match key.as_str() {
                "subject" => patch.subject = Some(parse_text("subject", value)?),
                "location" => patch.location = Some(parse_text("location", value)?),
                "image" => patch.image = Some(parse_text("image", value)?),
                _ => {}
            }
        }

        Ok(patch)
    }

    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }

    /// Names of the fields this patch sets.
    pub fn fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.subject.is_some() {
            fields.push("subject");
        }
        if self.location.is_some() {
            fields.push("location");
        }
        if self.price.is_some() {
            fields.push("price");
        }
        if self.spaces.is_some() {
            fields.push("spaces");
        }
        if self.image.is_some() {
            fields.push("image");
        }
        fields
    }

    /// The `$set` body for this patch.
    pub fn to_set_document(&self) -> Document {
        let mut doc = Document::new();
        if let Some(subject) = &self.subject {
            doc.insert("subject", subject.as_str());
        }
        if let Some(location) = &self.location {
            doc.insert("location", location.as_str());
        }
        if let Some(price) = self.price {
            doc.insert("price", price);
        }
        if let Some(spaces) = self.spaces {
            doc.insert("spaces", spaces);
        }
        if let Some(image) = &self.image {
            doc.insert("image", image.as_str());
        }
        doc
    }

    /// Merge onto an existing lesson. Fields the patch does not name keep
    /// their current values.
    pub fn apply(&self, lesson: &Lesson) -> Lesson {
        Lesson {
            id: lesson.id,
            subject: self.subject.clone().unwrap_or_else(|| lesson.subject.clone()),
            location: self.location.clone().unwrap_or_else(|| lesson.location.clone()),
            price: self.price.unwrap_or(lesson.price),
            spaces: self.spaces.unwrap_or(lesson.spaces),
            image: self.image.clone().unwrap_or_else(|| lesson.image.clone()),
        }
    }

    /// How many of the named fields differ from `lesson`.
    pub fn changed_fields(&self, lesson: &Lesson) -> u64 {
        let changes = [
            self.subject.as_ref().is_some_and(|v| *v != lesson.subject),
            self.location.as_ref().is_some_and(|v| *v != lesson.location),
            self.price.is_some_and(|v| v != lesson.price),
            self.spaces.is_some_and(|v| v != lesson.spaces),
            self.image.as_ref().is_some_and(|v| *v != lesson.image),
        ];
        changes.iter().filter(|changed| **changed).count() as u64
    }
}

fn parse_spaces(value: &Value) -> Result<i64, ValidationError> {
    let spaces = match value.as_i64() {
        Some(n) => n,
        // 3.0 is still a whole number of spaces
        None => value
            .as_f64()
            .and_then(whole_number)
            .ok_or(ValidationError::InvalidSpaces)?,
    };
    if spaces < 0 {
        return Err(ValidationError::InvalidSpaces);
    }
    Ok(spaces)
}

fn parse_price(value: &Value) -> Result<f64, ValidationError> {
    match value.as_f64() {
        Some(price) if price.is_finite() && price >= 0.0 => Ok(price),
        _ => Err(ValidationError::InvalidPrice),
    }
}

fn parse_text(field: &'static str, value: &Value) -> Result<String, ValidationError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or(ValidationError::InvalidText(field))
}
