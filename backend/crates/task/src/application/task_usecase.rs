//! Task Use Case
//!
//! CRUD over the caller's own tasks.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::{TaskId, UserId};

use crate::domain::entity::task::{NewTask, Task};
use crate::domain::repository::TaskRepository;
use crate::domain::value_object::task_title::TaskTitle;
use crate::error::{TaskError, TaskResult};

pub struct TaskUseCase<R>
where
    R: TaskRepository,
{
    repo: Arc<R>,
}

impl<R> TaskUseCase<R>
where
    R: TaskRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, user_id: UserId) -> TaskResult<Vec<Task>> {
        self.repo.list_by_user(user_id).await
    }

    pub async fn get(&self, user_id: UserId, task_id: TaskId) -> TaskResult<Task> {
        self.repo
            .find_by_id(user_id, task_id)
            .await?
            .ok_or(TaskError::NotFound)
    }

    pub async fn create(
        &self,
        user_id: UserId,
        title: String,
        now: DateTime<Utc>,
    ) -> TaskResult<Task> {
        let title = TaskTitle::new(title)?;
        let task = self.repo.create(&NewTask::new(user_id, title, now)).await?;

        tracing::info!(user_id = %user_id, task_id = %task.task_id, "Task created");

        Ok(task)
    }

    pub async fn update(
        &self,
        user_id: UserId,
        task_id: TaskId,
        title: String,
        now: DateTime<Utc>,
    ) -> TaskResult<Task> {
        let title = TaskTitle::new(title)?;

        self.repo
            .update_title(user_id, task_id, &title, now)
            .await?
            .ok_or(TaskError::NotFound)
    }

    pub async fn delete(&self, user_id: UserId, task_id: TaskId) -> TaskResult<()> {
        if !self.repo.delete(user_id, task_id).await? {
            return Err(TaskError::NotFound);
        }

        tracing::info!(user_id = %user_id, task_id = %task_id, "Task deleted");

        Ok(())
    }
}
