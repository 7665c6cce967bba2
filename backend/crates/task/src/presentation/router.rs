//! Task Router

use auth::{AccessGateState, require_session};
use axum::{Router, middleware::from_fn_with_state, routing::get};
use std::sync::Arc;

use crate::domain::repository::TaskRepository;
use crate::presentation::handlers::{self, TaskAppState};

/// Create the task router; every route sits behind the access gate
pub fn task_router<R>(repo: R, gate: AccessGateState) -> Router
where
    R: TaskRepository + Clone + Send + Sync + 'static,
{
    let state = TaskAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route(
            "/tasks",
            get(handlers::list_tasks::<R>).post(handlers::create_task::<R>),
        )
        .route(
            "/tasks/{task_id}",
            get(handlers::get_task::<R>)
                .put(handlers::update_task::<R>)
                .delete(handlers::delete_task::<R>),
        )
        .route_layer(from_fn_with_state(gate, require_session))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::InMemoryTaskRepository;
    use auth::AuthConfig;
    use auth::application::token::SessionTokenService;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use chrono::Utc;
    use http_body_util::BodyExt;
    use kernel::id::UserId;
    use serde_json::Value;
    use tower::ServiceExt;

    struct Harness {
        app: Router,
        tokens: Arc<SessionTokenService>,
    }

    fn harness() -> Harness {
        let config = AuthConfig::with_secret("test-secret");
        let tokens = Arc::new(SessionTokenService::new(&config).unwrap());
        let gate = AccessGateState {
            config: Arc::new(config),
            tokens: tokens.clone(),
        };

        Harness {
            app: task_router(InMemoryTaskRepository::new(), gate),
            tokens,
        }
    }

    impl Harness {
        fn cookie(&self, user: i64) -> String {
            let token = self.tokens.issue(UserId::new(user), Utc::now()).unwrap();
            format!("token={token}")
        }

        async fn send(
            &self,
            method: &str,
            uri: &str,
            user: Option<i64>,
            body: Option<&str>,
        ) -> (StatusCode, Value) {
            let mut builder = Request::builder().method(method).uri(uri);
            if let Some(user) = user {
                builder = builder.header(header::COOKIE, self.cookie(user));
            }
            let request = match body {
                Some(body) => builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string())),
                None => builder.body(Body::empty()),
            }
            .unwrap();

            let response = self.app.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = response.into_body().collect().await.unwrap().to_bytes();
            let json = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap()
            };
            (status, json)
        }
    }

    #[tokio::test]
    async fn test_requires_session() {
        let h = harness();
        let (status, _) = h.send("GET", "/tasks", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = h
            .send("POST", "/tasks", None, Some(r#"{"title":"x"}"#))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_crud_flow() {
        let h = harness();

        let (status, created) = h
            .send("POST", "/tasks", Some(1), Some(r#"{"title":"buy milk"}"#))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["title"], "buy milk");
        let id = created["id"].as_i64().unwrap();

        let (status, list) = h.send("GET", "/tasks", Some(1), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list.as_array().unwrap().len(), 1);

        let uri = format!("/tasks/{id}");
        let (status, updated) = h
            .send("PUT", &uri, Some(1), Some(r#"{"title":"buy eggs"}"#))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["title"], "buy eggs");

        let (status, fetched) = h.send("GET", &uri, Some(1), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["title"], "buy eggs");

        let (status, _) = h.send("DELETE", &uri, Some(1), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = h.send("GET", &uri, Some(1), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_tasks_are_private() {
        let h = harness();
        let (_, created) = h
            .send("POST", "/tasks", Some(1), Some(r#"{"title":"secret"}"#))
            .await;
        let uri = format!("/tasks/{}", created["id"]);

        let (status, list) = h.send("GET", "/tasks", Some(2), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(list.as_array().unwrap().is_empty());

        let (status, _) = h.send("GET", &uri, Some(2), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = h.send("DELETE", &uri, Some(2), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_bad_requests() {
        let h = harness();

        let (status, _) = h.send("GET", "/tasks/abc", Some(1), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = h.send("POST", "/tasks", Some(1), Some("{}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "title is required");

        let (status, body) = h
            .send("POST", "/tasks", Some(1), Some(r#"{"title":"far too long"}"#))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "title must be 1 to 10 characters");

        let (status, _) = h.send("POST", "/tasks", Some(1), Some("{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
