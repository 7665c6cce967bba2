//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::{TaskId, UserId};
use sqlx::PgPool;

use crate::domain::entity::task::{NewTask, Task};
use crate::domain::repository::TaskRepository;
use crate::domain::value_object::task_title::TaskTitle;
use crate::error::TaskResult;

/// PostgreSQL-backed task repository
#[derive(Clone)]
pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl TaskRepository for PgTaskRepository {
    async fn list_by_user(&self, user_id: UserId) -> TaskResult<Vec<Task>> {
        let rows = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT id, user_id, title, created_at, updated_at
            FROM tasks
            WHERE user_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(user_id.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TaskRow::into_task).collect())
    }

    async fn find_by_id(&self, user_id: UserId, task_id: TaskId) -> TaskResult<Option<Task>> {
        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT id, user_id, title, created_at, updated_at
            FROM tasks
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(task_id.value())
        .bind(user_id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(TaskRow::into_task))
    }

    async fn create(&self, task: &NewTask) -> TaskResult<Task> {
        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            INSERT INTO tasks (user_id, title, created_at, updated_at)
            VALUES ($1, $2, $3, $3)
            RETURNING id, user_id, title, created_at, updated_at
            "#,
        )
        .bind(task.user_id.value())
        .bind(task.title.as_str())
        .bind(task.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_task())
    }

    async fn update_title(
        &self,
        user_id: UserId,
        task_id: TaskId,
        title: &TaskTitle,
        now: DateTime<Utc>,
    ) -> TaskResult<Option<Task>> {
        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            UPDATE tasks SET
                title = $3,
                updated_at = $4
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, title, created_at, updated_at
            "#,
        )
        .bind(task_id.value())
        .bind(user_id.value())
        .bind(title.as_str())
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(TaskRow::into_task))
    }

    async fn delete(&self, user_id: UserId, task_id: TaskId) -> TaskResult<bool> {
        let deleted = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(task_id.value())
            .bind(user_id.value())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

#[derive(sqlx::FromRow)]
struct TaskRow {
    id: i64,
    user_id: i64,
    title: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TaskRow {
    fn into_task(self) -> Task {
        Task {
            task_id: TaskId::new(self.id),
            user_id: UserId::new(self.user_id),
            title: TaskTitle::from_db(self.title),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
