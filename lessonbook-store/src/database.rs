use lessonbook_core::repository::StoreStatus;
use lessonbook_core::{ConnectionState, ConnectionTracker, Lesson};
use mongodb::bson::{doc, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use std::time::Duration;
use tracing::info;

use crate::app_config::DatabaseConfig;
use crate::{MongoLessonRepository, MongoOrderRepository};

pub const LESSONS_COLLECTION: &str = "lessons";
pub const ORDERS_COLLECTION: &str = "orders";

/// The process-wide MongoDB handle. Built once at startup and shared by every
/// request; the driver pools connections internally.
#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    db: Database,
    tracker: ConnectionTracker,
}

impl MongoStore {
    /// Connect and ping. A failure here leaves the tracker `Disconnected`.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, mongodb::error::Error> {
        let tracker = ConnectionTracker::new();
        tracker.set(ConnectionState::Connecting);
        info!("Connecting to MongoDB database '{}'...", config.name);

        match Self::open(config).await {
            Ok((client, db)) => {
                tracker.set(ConnectionState::Connected);
                info!("Connected to MongoDB database '{}'", config.name);
                Ok(Self { client, db, tracker })
            }
            Err(e) => {
                tracker.set(ConnectionState::Disconnected);
                Err(e)
            }
        }
    }

    async fn open(config: &DatabaseConfig) -> Result<(Client, Database), mongodb::error::Error> {
        let mut options = ClientOptions::parse(&config.url).await?;
        options.app_name = Some("lessonbook".to_string());
        options.server_selection_timeout = Some(Duration::from_secs(5));

        let client = Client::with_options(options)?;
        let db = client.database(&config.name);
        // The driver connects lazily; force a round-trip so a bad URL fails here.
        db.run_command(doc! { "ping": 1 }).await?;
        Ok((client, db))
    }

    pub fn lessons(&self) -> MongoLessonRepository {
        MongoLessonRepository::new(self.db.collection::<Lesson>(LESSONS_COLLECTION))
    }

    pub fn orders(&self) -> MongoOrderRepository {
        MongoOrderRepository::new(self.db.collection::<Document>(ORDERS_COLLECTION))
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Release the client. Called once on graceful shutdown.
    pub async fn shutdown(&self) {
        self.tracker.set(ConnectionState::Disconnected);
        self.client.clone().shutdown().await;
        info!("MongoDB client shut down");
    }
}

impl StoreStatus for MongoStore {
    fn connection_state(&self) -> ConnectionState {
        self.tracker.state()
    }

    fn database_name(&self) -> &str {
        self.db.name()
    }
}
