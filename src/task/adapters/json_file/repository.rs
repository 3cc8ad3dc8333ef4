//! File-backed repository implementation.

use async_trait::async_trait;
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io::{ErrorKind, Write};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info};

use crate::task::{
    domain::{PersistedTaskData, Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Name of the board file inside the store directory.
pub const TASKS_FILE: &str = "tasks.json";
const TEMP_FILE: &str = "tasks.json.tmp";

/// Task repository persisting to a JSON file in a directory.
///
/// Clones share the same directory handle and write lock.
#[derive(Debug, Clone)]
pub struct JsonFileTaskRepository {
    store: Arc<Store>,
}

#[derive(Debug)]
struct Store {
    dir: Dir,
    write_lock: Mutex<()>,
}

impl JsonFileTaskRepository {
    /// Opens the store at `path`, creating the directory when absent.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the directory cannot
    /// be created or opened, and [`TaskRepositoryError::Corrupt`] when an
    /// existing board file does not decode.
    pub fn open(path: &Utf8Path) -> TaskRepositoryResult<Self> {
        Dir::create_ambient_dir_all(path, ambient_authority())
            .map_err(TaskRepositoryError::persistence)?;
        let dir = Dir::open_ambient_dir(path, ambient_authority())
            .map_err(TaskRepositoryError::persistence)?;
        let repository = Self::from_dir(dir)?;
        info!(path = %path, "opened JSON task store");
        Ok(repository)
    }

    /// Wraps an already-open directory capability.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Corrupt`] when an existing board file
    /// does not decode, or [`TaskRepositoryError::Persistence`] when it cannot
    /// be read.
    pub fn from_dir(dir: Dir) -> TaskRepositoryResult<Self> {
        let records = read_records(&dir)?;
        decode(records)?;
        Ok(Self {
            store: Arc::new(Store {
                dir,
                write_lock: Mutex::new(()),
            }),
        })
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&Store) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || f(&store))
            .await
            .map_err(TaskRepositoryError::persistence)?
    }

    async fn modify<F>(&self, change: F) -> TaskRepositoryResult<()>
    where
        F: FnOnce(&mut Vec<PersistedTaskData>) + Send + 'static,
    {
        self.run_blocking(move |store| {
            let _guard = store
                .write_lock
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let mut records = read_records(&store.dir)?;
            change(&mut records);
            write_records(&store.dir, &records)
        })
        .await
    }
}

fn read_records(dir: &Dir) -> TaskRepositoryResult<Vec<PersistedTaskData>> {
    let contents = match dir.read_to_string(TASKS_FILE) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(TaskRepositoryError::persistence(err)),
    };
    serde_json::from_str(&contents).map_err(TaskRepositoryError::corrupt)
}

fn write_records(dir: &Dir, records: &[PersistedTaskData]) -> TaskRepositoryResult<()> {
    let payload = serde_json::to_vec_pretty(records).map_err(TaskRepositoryError::persistence)?;
    let mut file = dir
        .create(TEMP_FILE)
        .map_err(TaskRepositoryError::persistence)?;
    file.write_all(&payload)
        .map_err(TaskRepositoryError::persistence)?;
    file.sync_all().map_err(TaskRepositoryError::persistence)?;
    drop(file);
    dir.rename(TEMP_FILE, dir, TASKS_FILE)
        .map_err(TaskRepositoryError::persistence)?;
    sync_dir(dir)?;
    debug!(records = records.len(), "task file rewritten");
    Ok(())
}

/// Flushes the rename itself to disk.
#[cfg(unix)]
fn sync_dir(dir: &Dir) -> TaskRepositoryResult<()> {
    dir.open(".")
        .and_then(|handle| handle.sync_all())
        .map_err(TaskRepositoryError::persistence)
}

#[cfg(not(unix))]
const fn sync_dir(_dir: &Dir) -> TaskRepositoryResult<()> {
    Ok(())
}

fn decode(records: Vec<PersistedTaskData>) -> TaskRepositoryResult<Vec<Task>> {
    records
        .into_iter()
        .map(|record| Task::from_persisted(record).map_err(TaskRepositoryError::corrupt))
        .collect()
}

fn upsert(records: &mut Vec<PersistedTaskData>, record: PersistedTaskData) {
    match records.iter_mut().find(|existing| existing.id == record.id) {
        Some(existing) => *existing = record,
        None => records.push(record),
    }
}

#[async_trait]
impl TaskRepository for JsonFileTaskRepository {
    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        let records = self.run_blocking(|store| read_records(&store.dir)).await?;
        let mut tasks = decode(records)?;
        tasks.reverse();
        tasks.sort_by(|left, right| right.created_at().cmp(&left.created_at()));
        Ok(tasks)
    }

    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()> {
        let record = task.to_persisted();
        self.modify(move |records| upsert(records, record)).await
    }

    async fn replace(&self, task: &Task) -> TaskRepositoryResult<()> {
        let record = task.to_persisted();
        self.modify(move |records| upsert(records, record)).await
    }

    async fn remove(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.modify(move |records| records.retain(|record| record.id != id))
            .await
    }

    async fn replace_all(&self, tasks: &[Task]) -> TaskRepositoryResult<()> {
        let replacement: Vec<PersistedTaskData> = tasks.iter().map(Task::to_persisted).collect();
        self.modify(move |records| *records = replacement).await
    }
}
