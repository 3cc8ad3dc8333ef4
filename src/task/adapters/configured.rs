//! Startup wiring for the configured durable store.

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use secrecy::ExposeSecret;
use thiserror::Error;
use tracing::{error, info};

use super::{
    json_file::JsonFileTaskRepository, memory::InMemoryTaskRepository,
    postgres::PostgresTaskRepository,
};
use crate::config::StoreConfig;
use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Failure to open the configured store. Callers should halt.
#[derive(Debug, Error)]
pub enum StoreOpenError {
    /// The store exists but could not be read or decoded.
    #[error("task store could not be opened: {0}")]
    Repository(#[from] TaskRepositoryError),

    /// No database connection pool could be established.
    #[error("database pool could not be created: {0}")]
    Pool(#[from] PoolError),
}

/// Repository for whichever backend the configuration selected.
#[derive(Debug, Clone)]
pub enum ConfiguredTaskRepository {
    /// Ephemeral store.
    Memory(InMemoryTaskRepository),
    /// JSON file store.
    Json(JsonFileTaskRepository),
    /// `PostgreSQL` store.
    Postgres(PostgresTaskRepository),
}

/// Opens the store named by `config` and checks it is readable.
///
/// The Postgres backend creates its table when absent. Every backend is
/// listed once so a corrupt store is reported here rather than on first use.
///
/// # Errors
///
/// Returns [`StoreOpenError`] when the store cannot be opened or read.
pub async fn open_repository(
    config: &StoreConfig,
) -> Result<ConfiguredTaskRepository, StoreOpenError> {
    let repository = match config {
        StoreConfig::Memory => ConfiguredTaskRepository::Memory(InMemoryTaskRepository::new()),
        StoreConfig::Json { path } => {
            let store_path = path.clone();
            let opened =
                tokio::task::spawn_blocking(move || JsonFileTaskRepository::open(&store_path))
                .await
                .map_err(TaskRepositoryError::persistence)?;
            ConfiguredTaskRepository::Json(opened.inspect_err(log_open_failure)?)
        }
        StoreConfig::Postgres { database_url } => {
            let manager = ConnectionManager::<PgConnection>::new(database_url.expose_secret());
            let pool = tokio::task::spawn_blocking(move || Pool::builder().build(manager))
                .await
                .map_err(TaskRepositoryError::persistence)?
                .inspect_err(|err| error!(error = %err, "database pool could not be created"))?;
            let postgres = PostgresTaskRepository::new(pool);
            postgres.migrate().await.inspect_err(log_open_failure)?;
            ConfiguredTaskRepository::Postgres(postgres)
        }
    };

    let count = repository
        .list_all()
        .await
        .inspect_err(log_open_failure)?
        .len();
    info!(store = config.kind(), count, "task store opened");
    Ok(repository)
}

fn log_open_failure(err: &TaskRepositoryError) {
    error!(error = %err, "task store could not be opened");
}

#[async_trait]
impl TaskRepository for ConfiguredTaskRepository {
    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        match self {
            Self::Memory(inner) => inner.list_all().await,
            Self::Json(inner) => inner.list_all().await,
            Self::Postgres(inner) => inner.list_all().await,
        }
    }

    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()> {
        match self {
            Self::Memory(inner) => inner.insert(task).await,
            Self::Json(inner) => inner.insert(task).await,
            Self::Postgres(inner) => inner.insert(task).await,
        }
    }

    async fn replace(&self, task: &Task) -> TaskRepositoryResult<()> {
        match self {
            Self::Memory(inner) => inner.replace(task).await,
            Self::Json(inner) => inner.replace(task).await,
            Self::Postgres(inner) => inner.replace(task).await,
        }
    }

    async fn remove(&self, id: TaskId) -> TaskRepositoryResult<()> {
        match self {
            Self::Memory(inner) => inner.remove(id).await,
            Self::Json(inner) => inner.remove(id).await,
            Self::Postgres(inner) => inner.remove(id).await,
        }
    }

    async fn replace_all(&self, tasks: &[Task]) -> TaskRepositoryResult<()> {
        match self {
            Self::Memory(inner) => inner.replace_all(tasks).await,
            Self::Json(inner) => inner.replace_all(tasks).await,
            Self::Postgres(inner) => inner.replace_all(tasks).await,
        }
    }
}
