//! HTTP Handlers
//!
//! Every handler runs behind the access gate and acts on the caller's
//! own tasks only.

use auth::AuthenticatedUser;
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::Utc;
use kernel::id::TaskId;
use std::sync::Arc;

use crate::application::TaskUseCase;
use crate::domain::repository::TaskRepository;
use crate::error::{TaskError, TaskResult};
use crate::presentation::dto::{TaskRequest, TaskResponse};

/// Shared state for task handlers
#[derive(Clone)]
pub struct TaskAppState<R>
where
    R: TaskRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

impl<R> TaskAppState<R>
where
    R: TaskRepository + Clone + Send + Sync + 'static,
{
    fn use_case(&self) -> TaskUseCase<R> {
        TaskUseCase::new(self.repo.clone())
    }
}

fn task_id(path: Result<Path<i64>, PathRejection>) -> TaskResult<TaskId> {
    let Path(id) = path.map_err(|e| TaskError::MalformedRequest(e.body_text()))?;
    Ok(TaskId::new(id))
}

fn title(payload: Result<Json<TaskRequest>, JsonRejection>) -> TaskResult<String> {
    let Json(req) = payload.map_err(|e| TaskError::MalformedRequest(e.body_text()))?;
    Ok(req.title)
}

/// GET /tasks
pub async fn list_tasks<R>(
    State(state): State<TaskAppState<R>>,
    user: AuthenticatedUser,
) -> TaskResult<Json<Vec<TaskResponse>>>
where
    R: TaskRepository + Clone + Send + Sync + 'static,
{
    let tasks = state.use_case().list(user.user_id).await?;

    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

/// GET /tasks/{task_id}
pub async fn get_task<R>(
    State(state): State<TaskAppState<R>>,
    user: AuthenticatedUser,
    path: Result<Path<i64>, PathRejection>,
) -> TaskResult<Json<TaskResponse>>
where
    R: TaskRepository + Clone + Send + Sync + 'static,
{
    let task = state.use_case().get(user.user_id, task_id(path)?).await?;

    Ok(Json(task.into()))
}

/// POST /tasks
pub async fn create_task<R>(
    State(state): State<TaskAppState<R>>,
    user: AuthenticatedUser,
    payload: Result<Json<TaskRequest>, JsonRejection>,
) -> TaskResult<(StatusCode, Json<TaskResponse>)>
where
    R: TaskRepository + Clone + Send + Sync + 'static,
{
    let task = state
        .use_case()
        .create(user.user_id, title(payload)?, Utc::now())
        .await?;

    Ok((StatusCode::CREATED, Json(task.into())))
}

/// PUT /tasks/{task_id}
pub async fn update_task<R>(
    State(state): State<TaskAppState<R>>,
    user: AuthenticatedUser,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<TaskRequest>, JsonRejection>,
) -> TaskResult<Json<TaskResponse>>
where
    R: TaskRepository + Clone + Send + Sync + 'static,
{
    let task_id = task_id(path)?;
    let task = state
        .use_case()
        .update(user.user_id, task_id, title(payload)?, Utc::now())
        .await?;

    Ok(Json(task.into()))
}

/// DELETE /tasks/{task_id}
pub async fn delete_task<R>(
    State(state): State<TaskAppState<R>>,
    user: AuthenticatedUser,
    path: Result<Path<i64>, PathRejection>,
) -> TaskResult<StatusCode>
where
    R: TaskRepository + Clone + Send + Sync + 'static,
{
    state.use_case().delete(user.user_id, task_id(path)?).await?;

    Ok(StatusCode::NO_CONTENT)
}
