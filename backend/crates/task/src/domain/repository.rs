//! Repository Traits
//!
//! Every operation takes the owner's id; a task belonging to another user
//! is indistinguishable from a missing one.

use chrono::{DateTime, Utc};
use kernel::id::{TaskId, UserId};

use crate::domain::entity::task::{NewTask, Task};
use crate::domain::value_object::task_title::TaskTitle;
use crate::error::TaskResult;

/// Task repository trait
#[trait_variant::make(TaskRepository: Send)]
pub trait LocalTaskRepository {
    /// All tasks of `user_id`, oldest first (ties broken by id)
    async fn list_by_user(&self, user_id: UserId) -> TaskResult<Vec<Task>>;

    /// Find a task owned by `user_id`
    async fn find_by_id(&self, user_id: UserId, task_id: TaskId) -> TaskResult<Option<Task>>;

    /// Persist a new task and return it with its assigned id
    async fn create(&self, task: &NewTask) -> TaskResult<Task>;

    /// Replace the title; `None` when no such task is owned by `user_id`
    async fn update_title(
        &self,
        user_id: UserId,
        task_id: TaskId,
        title: &TaskTitle,
        now: DateTime<Utc>,
    ) -> TaskResult<Option<Task>>;

    /// Delete; `false` when no such task is owned by `user_id`
    async fn delete(&self, user_id: UserId, task_id: TaskId) -> TaskResult<bool>;
}
