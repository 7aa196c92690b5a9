pub mod connection;
pub mod lesson;
pub mod number;
pub mod order;
pub mod repository;

pub use bson::oid::ObjectId;
pub use connection::{ConnectionState, ConnectionTracker};
pub use lesson::{Lesson, LessonPatch, UPDATABLE_FIELDS};
pub use order::{CreateOrderRequest, Order, OrderSpaces};

/// Input rejected before any store call is made.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid lesson ID")]
    InvalidLessonId(String),
    #[error("No update fields provided")]
    EmptyUpdate,
    #[error("Invalid spaces value")]
    InvalidSpaces,
    #[error("Invalid price value")]
    InvalidPrice,
    #[error("Invalid {0} value")]
    InvalidText(&'static str),
    #[error("Missing required fields")]
    MissingOrderFields,
}

impl ValidationError {
    /// Human readable explanation sent alongside the short error label.
    pub fn detail(&self) -> String {
        match self {
            ValidationError::InvalidLessonId(raw) => {
                format!("'{}' is not a valid lesson identifier", raw)
            }
            ValidationError::EmptyUpdate => {
                "Request body must contain at least one field to update".to_string()
            }
            ValidationError::InvalidSpaces => "spaces must be a non-negative integer".to_string(),
            ValidationError::InvalidPrice => "price must be a non-negative number".to_string(),
            ValidationError::InvalidText(field) => format!("{} must be a string", field),
            ValidationError::MissingOrderFields => {
                "name, phone, lessonIDs and spaces are all required and must not be empty"
                    .to_string()
            }
        }
    }
}

/// Failure raised by a repository implementation.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Store error: {0}")]
    Store(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
