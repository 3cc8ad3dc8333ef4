//! `PostgreSQL` repository implementation for board storage.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::{self, tasks},
};
use crate::task::{
    domain::{Level, PersistedTaskData, Task, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error as DieselError;
use tracing::debug;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Creates the `tasks` table and its index when absent.
///
/// # Errors
///
/// Returns [`TaskRepositoryError::Persistence`] when the DDL fails.
pub fn ensure_schema(connection: &mut PgConnection) -> TaskRepositoryResult<()> {
    diesel::sql_query(schema::CREATE_TASKS_TABLE)
        .execute(connection)
        .map_err(TaskRepositoryError::persistence)?;
    diesel::sql_query(schema::WIDEN_TITLE_COLUMN)
        .execute(connection)
        .map_err(TaskRepositoryError::persistence)?;
    diesel::sql_query(schema::CREATE_CREATED_AT_INDEX)
        .execute(connection)
        .map_err(TaskRepositoryError::persistence)?;
    Ok(())
}

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    /// Applies [`ensure_schema`] on a pooled connection.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when no connection is
    /// available or the DDL fails.
    pub async fn migrate(&self) -> TaskRepositoryResult<()> {
        self.run_blocking(ensure_schema).await
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }

    async fn upsert(&self, task: &Task) -> TaskRepositoryResult<()> {
        let row = to_new_row(task);
        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
                .on_conflict(tasks::id)
                .do_update()
                .set(&row)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(|connection| {
            let rows = tasks::table
                .order(tasks::created_at.desc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()> {
        self.upsert(task).await
    }

    async fn replace(&self, task: &Task) -> TaskRepositoryResult<()> {
        self.upsert(task).await
    }

    async fn remove(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn replace_all(&self, all: &[Task]) -> TaskRepositoryResult<()> {
        let rows: Vec<NewTaskRow> = all.iter().map(to_new_row).collect();
        self.run_blocking(move |connection| {
            connection
                .transaction::<_, DieselError, _>(|tx| {
                    let removed = diesel::delete(tasks::table).execute(tx)?;
                    if !rows.is_empty() {
                        diesel::insert_into(tasks::table).values(&rows).execute(tx)?;
                    }
                    debug!(removed, written = rows.len(), "task table rewritten");
                    Ok(())
                })
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }
}

fn to_new_row(task: &Task) -> NewTaskRow {
    let self_assessment = task.self_assessment();
    let assessment = task.assessment();
    NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().to_owned(),
        user_urgency: self_assessment.urgency.map(|level| level.as_str().to_owned()),
        user_importance: self_assessment
            .importance
            .map(|level| level.as_str().to_owned()),
        ai_urgency: assessment.urgency.as_str().to_owned(),
        ai_importance: assessment.importance.as_str().to_owned(),
        justification: Some(task.justification().to_owned()),
        complete_by: task.complete_by().timestamp(),
        status: task.status().as_str().to_owned(),
        created_at: task.created_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        user_urgency,
        user_importance,
        ai_urgency,
        ai_importance,
        justification,
        complete_by,
        status,
        created_at,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        title,
        description,
        user_urgency: user_urgency.as_deref().map(parse_level).transpose()?,
        user_importance: user_importance.as_deref().map(parse_level).transpose()?,
        ai_urgency: Some(parse_level(&ai_urgency)?),
        ai_importance: Some(parse_level(&ai_importance)?),
        justification,
        complete_by,
        status: TaskStatus::try_from(status.as_str()).map_err(TaskRepositoryError::corrupt)?,
        created_at,
    };
    Task::from_persisted(data).map_err(TaskRepositoryError::corrupt)
}

fn parse_level(value: &str) -> TaskRepositoryResult<Level> {
    Level::try_from(value).map_err(TaskRepositoryError::corrupt)
}
