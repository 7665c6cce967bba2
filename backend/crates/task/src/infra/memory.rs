//! In-memory Repository Implementation

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::{TaskId, UserId};
use tokio::sync::RwLock;

use crate::domain::entity::task::{NewTask, Task};
use crate::domain::repository::TaskRepository;
use crate::domain::value_object::task_title::TaskTitle;
use crate::error::TaskResult;

#[derive(Default)]
struct Inner {
    tasks: Vec<Task>,
    next_id: i64,
}

/// In-memory task store; clones share the same data
#[derive(Clone, Default)]
pub struct InMemoryTaskRepository {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn owned_by(task: &Task, user_id: UserId, task_id: TaskId) -> bool {
    task.user_id == user_id && task.task_id == task_id
}

impl TaskRepository for InMemoryTaskRepository {
    async fn list_by_user(&self, user_id: UserId) -> TaskResult<Vec<Task>> {
        let inner = self.inner.read().await;
        let mut tasks: Vec<Task> = inner
            .tasks
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        tasks.sort_by_key(|t| (t.created_at, t.task_id.value()));
        Ok(tasks)
    }

    async fn find_by_id(&self, user_id: UserId, task_id: TaskId) -> TaskResult<Option<Task>> {
        let inner = self.inner.read().await;
        Ok(inner
            .tasks
            .iter()
            .find(|t| owned_by(t, user_id, task_id))
            .cloned())
    }

    async fn create(&self, task: &NewTask) -> TaskResult<Task> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let task = task.clone().into_task(TaskId::new(inner.next_id));
        inner.tasks.push(task.clone());
        Ok(task)
    }

    async fn update_title(
        &self,
        user_id: UserId,
        task_id: TaskId,
        title: &TaskTitle,
        now: DateTime<Utc>,
    ) -> TaskResult<Option<Task>> {
        let mut inner = self.inner.write().await;
        Ok(inner
            .tasks
            .iter_mut()
            .find(|t| owned_by(t, user_id, task_id))
            .map(|task| {
                task.title = title.clone();
                task.updated_at = now;
                task.clone()
            }))
    }

    async fn delete(&self, user_id: UserId, task_id: TaskId) -> TaskResult<bool> {
        let mut inner = self.inner.write().await;
        let before = inner.tasks.len();
        inner.tasks.retain(|t| !owned_by(t, user_id, task_id));
        Ok(inner.tasks.len() != before)
    }
}
