//! Task Entity

use chrono::{DateTime, Utc};
use kernel::id::{TaskId, UserId};

use crate::domain::value_object::task_title::TaskTitle;

/// Task owned by a single user
#[derive(Debug, Clone)]
pub struct Task {
    pub task_id: TaskId,
    /// Owner; every query is scoped by this
    pub user_id: UserId,
    pub title: TaskTitle,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Task awaiting persistence (no id yet)
#[derive(Debug, Clone)]
pub struct NewTask {
    pub user_id: UserId,
    pub title: TaskTitle,
    pub created_at: DateTime<Utc>,
}

impl NewTask {
    pub fn new(user_id: UserId, title: TaskTitle, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            title,
            created_at: now,
        }
    }

    /// Attach the id assigned by the store
    pub fn into_task(self, task_id: TaskId) -> Task {
        Task {
            task_id,
            user_id: self.user_id,
            title: self.title,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}
