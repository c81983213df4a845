//! The optional database collaborator.
//!
//! The service runs without a database; when one is configured its handle is
//! only used by the connectivity probe behind `GET /test`.

use crate::config::DatabaseConfig;
use async_trait::async_trait;
use mongodb::{Client as MongoClient, Database};
use service_core::error::AppError;
use std::fmt;
use std::sync::Arc;

/// Upper bound on collection names reported by the probe.
pub const MAX_REPORTED_COLLECTIONS: usize = 10;

/// Error messages are cut to this many characters in probe output.
const MAX_ERROR_CHARS: usize = 50;

const DEFAULT_DATABASE_NAME: &str = "app";

/// What the probe needs from a database handle.
#[async_trait]
pub trait DatabaseHandle: Send + Sync {
    fn name(&self) -> &str;

    async fn list_collection_names(&self) -> anyhow::Result<Vec<String>>;
}

#[derive(Clone)]
pub struct MongoDb {
    db: Database,
}

impl MongoDb {
    /// Build a client for `uri`. The driver connects lazily, so this only
    /// fails on an unusable connection string.
    pub async fn connect(uri: &str, database: Option<&str>) -> Result<Self, AppError> {
        tracing::info!("Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            AppError::from(e)
        })?;
        let db = match database {
            Some(name) => client.database(name),
            None => client
                .default_database()
                .unwrap_or_else(|| client.database(DEFAULT_DATABASE_NAME)),
        };
        tracing::info!(database = %db.name(), "MongoDB client ready");
        Ok(Self { db })
    }
}

#[async_trait]
impl DatabaseHandle for MongoDb {
    fn name(&self) -> &str {
        self.db.name()
    }

    async fn list_collection_names(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.db.list_collection_names(None).await?)
    }
}

/// Availability of the database collaborator, decided once at startup.
#[derive(Clone)]
pub enum DatabaseCollaborator {
    /// Database support is not enabled in this deployment.
    NotFound,
    /// Support is enabled but no handle could be created.
    Uninitialized,
    Ready(Arc<dyn DatabaseHandle>),
}

impl fmt::Debug for DatabaseCollaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseCollaborator::NotFound => f.write_str("NotFound"),
            DatabaseCollaborator::Uninitialized => f.write_str("Uninitialized"),
            DatabaseCollaborator::Ready(handle) => {
                f.debug_tuple("Ready").field(&handle.name()).finish()
            }
        }
    }
}

impl DatabaseCollaborator {
    pub async fn from_config(config: &DatabaseConfig) -> Self {
        let Some(uri) = config.url.as_deref() else {
            tracing::info!("DATABASE_URL not set; database support disabled");
            return DatabaseCollaborator::NotFound;
        };

        match MongoDb::connect(uri, config.name.as_deref()).await {
            Ok(db) => DatabaseCollaborator::Ready(Arc::new(db)),
            Err(e) => {
                tracing::warn!(error = %e, "Database configured but handle could not be initialized");
                DatabaseCollaborator::Uninitialized
            }
        }
    }

    /// Report availability and reachable collections. Never fails: every
    /// error becomes part of the returned status.
    pub async fn probe(&self) -> DatabaseProbe {
        let handle = match self {
            DatabaseCollaborator::NotFound => {
                return DatabaseProbe::disconnected(DatabaseStatus::ModuleNotFound)
            }
            DatabaseCollaborator::Uninitialized => {
                return DatabaseProbe::disconnected(DatabaseStatus::NotInitialized)
            }
            DatabaseCollaborator::Ready(handle) => handle,
        };

        match handle.list_collection_names().await {
            Ok(names) => {
                tracing::debug!(database = %handle.name(), count = names.len(), "Listed collections");
                DatabaseProbe {
                    status: DatabaseStatus::Working,
                    connected: true,
                    collections: names.into_iter().take(MAX_REPORTED_COLLECTIONS).collect(),
                }
            }
            Err(e) => {
                tracing::warn!(database = %handle.name(), error = %e, "Listing collections failed");
                DatabaseProbe {
                    status: DatabaseStatus::ListingFailed(truncate_chars(
                        &e.to_string(),
                        MAX_ERROR_CHARS,
                    )),
                    connected: true,
                    collections: Vec::new(),
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseStatus {
    ModuleNotFound,
    NotInitialized,
    Working,
    ListingFailed(String),
}

impl fmt::Display for DatabaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseStatus::ModuleNotFound => {
                f.write_str("❌ Database module not found (run enable-database first)")
            }
            DatabaseStatus::NotInitialized => f.write_str("⚠️  Available but not initialized"),
            DatabaseStatus::Working => f.write_str("✅ Connected & Working"),
            DatabaseStatus::ListingFailed(message) => {
                write!(f, "⚠️  Connected but Error: {}", message)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseProbe {
    pub status: DatabaseStatus,
    /// True whenever an initialized handle exists, even if listing failed.
    pub connected: bool,
    pub collections: Vec<String>,
}

impl DatabaseProbe {
    fn disconnected(status: DatabaseStatus) -> Self {
        Self {
            status,
            connected: false,
            collections: Vec::new(),
        }
    }
}

fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}
