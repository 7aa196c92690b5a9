#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use lessonbook_api::{app, AppState, ImageAssets};
use lessonbook_core::repository::{LessonRepository, LessonUpdate, OrderRepository, StoreStatus};
use lessonbook_core::{
    ConnectionState, ConnectionTracker, CoreError, CoreResult, Lesson, LessonPatch, ObjectId,
    Order,
};
use serde_json::Value;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// In-process stand-in for the MongoDB store.
#[derive(Default)]
pub struct MemoryStore {
    lessons: Mutex<Vec<Lesson>>,
    orders: Mutex<Vec<(ObjectId, Order)>>,
    failing: AtomicBool,
    tracker: ConnectionTracker,
}

impl MemoryStore {
    pub fn connected() -> Arc<Self> {
        let store = Self::default();
        store.tracker.set(ConnectionState::Connected);
        Arc::new(store)
    }

    pub fn insert_lesson(&self, subject: &str, price: f64, spaces: i64) -> Lesson {
        let lesson = Lesson {
            id: ObjectId::new(),
            subject: subject.to_string(),
            location: "Hendon".to_string(),
            price,
            spaces,
            image: format!("{}.png", subject.to_lowercase()),
        };
        self.lessons.lock().unwrap().push(lesson.clone());
        lesson
    }

    pub fn lesson(&self, id: ObjectId) -> Option<Lesson> {
        self.lessons.lock().unwrap().iter().find(|l| l.id == id).cloned()
    }

    pub fn orders(&self) -> Vec<(ObjectId, Order)> {
        self.orders.lock().unwrap().clone()
    }

    pub fn fail_with_store_errors(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> CoreResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(CoreError::Store("server selection timeout".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl LessonRepository for MemoryStore {
    async fn list_lessons(&self) -> CoreResult<Vec<Lesson>> {
        self.check()?;
        Ok(self.lessons.lock().unwrap().clone())
    }

    async fn update_lesson(
        &self,
        id: ObjectId,
        patch: &LessonPatch,
    ) -> CoreResult<Option<LessonUpdate>> {
        self.check()?;
        let mut lessons = self.lessons.lock().unwrap();
        let Some(lesson) = lessons.iter_mut().find(|l| l.id == id) else {
            return Ok(None);
        };
        let modified_count = patch.changed_fields(lesson);
        *lesson = patch.apply(lesson);
        Ok(Some(LessonUpdate {
            lesson: lesson.clone(),
            modified_count,
        }))
    }
}

#[async_trait]
impl OrderRepository for MemoryStore {
    async fn create_order(&self, order: &Order) -> CoreResult<ObjectId> {
        self.check()?;
        let id = ObjectId::new();
        self.orders.lock().unwrap().push((id, order.clone()));
        Ok(id)
    }
}

impl StoreStatus for MemoryStore {
    fn connection_state(&self) -> ConnectionState {
        self.tracker.state()
    }

    fn database_name(&self) -> &str {
        "afterschool_test"
    }
}

pub fn test_app(store: Arc<MemoryStore>, images_dir: &Path) -> Router {
    app(AppState {
        lessons: store.clone(),
        orders: store.clone(),
        store,
        images: Arc::new(ImageAssets::new(images_dir)),
    })
}

/// Drive one request through the router and decode a JSON response body.
pub async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
