use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use log::error;

use crate::core::models::{NewTask, TaskChangeset, TaskRecord};
use crate::core::utils::{DbPool, StoreError};
use crate::tasks::types::{Task, TaskDraft, TaskStatus};

/// Persistence capabilities the task handlers depend on. The production
/// implementation is [`PgTaskStore`]; tests substitute an in-memory fake.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Task>, StoreError>;
    async fn find(&self, id: i32) -> Result<Option<Task>, StoreError>;
    async fn filter_by_status(&self, status: TaskStatus) -> Result<Vec<Task>, StoreError>;
    async fn filter_by_due_date(&self, due_date: NaiveDate) -> Result<Vec<Task>, StoreError>;
    async fn insert(&self, draft: TaskDraft) -> Result<Task, StoreError>;
    async fn update(&self, id: i32, draft: TaskDraft) -> Result<Option<Task>, StoreError>;
    async fn delete(&self, id: i32) -> Result<bool, StoreError>;

    /// Liveness probe for the health endpoint.
    async fn ping(&self) -> bool {
        true
    }
}

pub struct PgTaskStore {
    pool: DbPool,
}

impl PgTaskStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(
        &self,
    ) -> Result<diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<PgConnection>>, StoreError>
    {
        self.pool.get().map_err(|e| {
            error!("Failed to get database connection: {e}");
            StoreError::Unavailable
        })
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        use crate::core::schema::tasks::dsl;

        let mut conn = self.conn()?;
        let rows = dsl::tasks
            .order(dsl::id.asc())
            .load::<TaskRecord>(&mut conn)?;
        Ok(rows.into_iter().map(record_to_task).collect())
    }

    async fn find(&self, task_id: i32) -> Result<Option<Task>, StoreError> {
        use crate::core::schema::tasks::dsl;

        let mut conn = self.conn()?;
        let row = dsl::tasks
            .find(task_id)
            .first::<TaskRecord>(&mut conn)
            .optional()?;
        Ok(row.map(record_to_task))
    }

    async fn filter_by_status(&self, task_status: TaskStatus) -> Result<Vec<Task>, StoreError> {
        use crate::core::schema::tasks::dsl;

        let mut conn = self.conn()?;
        let rows = dsl::tasks
            .filter(dsl::status.eq(task_status.as_str()))
            .order(dsl::id.asc())
            .load::<TaskRecord>(&mut conn)?;
        Ok(rows.into_iter().map(record_to_task).collect())
    }

    async fn filter_by_due_date(&self, due: NaiveDate) -> Result<Vec<Task>, StoreError> {
        use crate::core::schema::tasks::dsl;

        let mut conn = self.conn()?;
        let rows = dsl::tasks
            .filter(dsl::due_date.eq(due))
            .order(dsl::id.asc())
            .load::<TaskRecord>(&mut conn)?;
        Ok(rows.into_iter().map(record_to_task).collect())
    }

    async fn insert(&self, draft: TaskDraft) -> Result<Task, StoreError> {
        use crate::core::schema::tasks::dsl;

        let mut conn = self.conn()?;
        let row = diesel::insert_into(dsl::tasks)
            .values(&NewTask {
                title: draft.title,
                description: draft.description,
                status: draft.status.to_string(),
                due_date: draft.due_date,
            })
            .get_result::<TaskRecord>(&mut conn)?;
        Ok(record_to_task(row))
    }

    async fn update(&self, task_id: i32, draft: TaskDraft) -> Result<Option<Task>, StoreError> {
        use crate::core::schema::tasks::dsl;

        let mut conn = self.conn()?;
        let row = diesel::update(dsl::tasks.find(task_id))
            .set((
                &TaskChangeset {
                    title: draft.title,
                    description: draft.description,
                    status: draft.status.to_string(),
                    due_date: draft.due_date,
                },
                dsl::updated_at.eq(diesel::dsl::now),
            ))
            .get_result::<TaskRecord>(&mut conn)
            .optional()?;
        Ok(row.map(record_to_task))
    }

    async fn delete(&self, task_id: i32) -> Result<bool, StoreError> {
        use crate::core::schema::tasks::dsl;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(dsl::tasks.find(task_id)).execute(&mut conn)?;
        Ok(deleted > 0)
    }

    async fn ping(&self) -> bool {
        self.pool.get().is_ok()
    }
}

fn record_to_task(row: TaskRecord) -> Task {
    // Validation runs before every write, so an out-of-enum status in the
    // table means outside interference; fall back rather than fail the read.
    let status = TaskStatus::parse(&row.status).unwrap_or_default();
    Task {
        id: row.id,
        title: row.title,
        description: row.description,
        status,
        due_date: row.due_date,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}
