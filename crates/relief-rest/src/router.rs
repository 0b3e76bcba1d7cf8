//! Main application router.

use crate::{
    controllers::{
        attachment_controller, health_controller, help_request_controller,
        responder_controller, task_controller, user_controller,
    },
    middleware::{logging_middleware, response_cache_middleware, ResponseCache},
    state::AppState,
};
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::get,
    Router,
};
use relief_config::ServerConfig;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

/// Creates the main application router.
///
/// Everything under `/api` sits behind the response cache; health probes do
/// not.
pub fn create_router(state: AppState, cache: ResponseCache, server_config: &ServerConfig) -> Router {
    let cors = create_cors_layer(server_config);
    let cache_enabled = cache.is_enabled();

    let api_router = Router::new()
        .nest("/requests", help_request_controller::router())
        .nest("/tasks", task_controller::router())
        .nest(
            "/users",
            responder_controller::router().merge(user_controller::router()),
        )
        .nest("/attachments", attachment_controller::router())
        .layer(middleware::from_fn_with_state(cache, response_cache_middleware))
        .layer(DefaultBodyLimit::max(server_config.max_body_size))
        .with_state(state);

    let router = Router::new()
        // Health endpoints (never cached)
        .merge(health_controller::router())
        .nest("/api", api_router)
        .route("/", get(root))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TimeoutLayer::new(server_config.request_timeout()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(middleware::from_fn(logging_middleware));

    info!(response_cache = cache_enabled, "Router created with REST endpoints");
    router
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if !server_config.cors_enabled {
        return CorsLayer::new();
    }
    if server_config.cors_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = server_config
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Root endpoint handler.
async fn root() -> &'static str {
    "Relief Hub API"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::{CachePolicy, X_CACHE};
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use http_body_util::BodyExt;
    use relief_service::{
        AttachmentServiceImpl, HelpRequestServiceImpl, InMemoryCacheStore,
        ResponderServiceImpl, TaskServiceImpl, UserServiceImpl,
    };
    use relief_storage::{
        DatabasePool, DocumentCollection, LoggedStore, MemoryKeyValue, RealtimeStore,
        SqlDocumentStore,
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct TestApp {
        router: Router,
        _blobs: tempfile::TempDir,
    }

    async fn test_app() -> TestApp {
        let pool = DatabasePool::in_memory().await.unwrap();
        pool.run_migrations().await.unwrap();
        let collection = |name: &str| -> Arc<dyn DocumentCollection> {
            Arc::new(LoggedStore::new(
                SqlDocumentStore::new(pool.clone(), name).unwrap(),
            ))
        };

        let requests = collection("help-requests");
        let realtime = Arc::new(MemoryKeyValue::new());
        let locations = RealtimeStore::new(realtime.clone(), "rt", "userLocations").unwrap();
        let users = RealtimeStore::new(realtime, "rt", "users").unwrap();
        let blobs = tempfile::tempdir().unwrap();

        let state = AppState::new(
            Arc::new(HelpRequestServiceImpl::new(requests.clone())),
            Arc::new(TaskServiceImpl::new(collection("tasks"))),
            Arc::new(ResponderServiceImpl::new(
                collection("firstResponders"),
                collection("volunteers"),
                Arc::new(LoggedStore::new(locations)),
            )),
            Arc::new(AttachmentServiceImpl::new(
                requests,
                blobs.path(),
                "http://files.test",
            )),
            Arc::new(UserServiceImpl::new(Arc::new(LoggedStore::new(users)))),
        );
        let cache = ResponseCache::new(Arc::new(InMemoryCacheStore::new()), CachePolicy::default());

        TestApp {
            router: create_router(state, cache, &ServerConfig::default()),
            _blobs: blobs,
        }
    }

    async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn new_request() -> Value {
        json!({
            "name": "Ada",
            "contactInfo": "ada@example.org",
            "location": {"lat": 6.9, "lng": 79.8},
            "description": "Stranded family of four",
        })
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = test_app().await;
        for path in ["/health", "/ready", "/live"] {
            let response = send(&app.router, Method::GET, path, None).await;
            assert_eq!(response.status(), StatusCode::OK, "{path}");
            assert!(response.headers().get(X_CACHE).is_none());
            assert!(response.headers().contains_key("x-request-id"));
        }
    }

    #[tokio::test]
    async fn test_help_request_lifecycle() {
        let app = test_app().await;

        let response = send(&app.router, Method::POST, "/api/requests", Some(new_request())).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = json_body(response).await;
        let request_id = created["data"]["requestId"].as_str().unwrap().to_string();
        assert!(request_id.starts_with("req-"));
        assert!(created["data"]["chatRoomId"].as_str().unwrap().starts_with("room-"));

        let response = send(
            &app.router,
            Method::PUT,
            &format!("/api/requests/{request_id}"),
            Some(json!({"additionalInfo": "Elderly person needs insulin"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["data"]["requestId"], request_id.as_str());

        let response = send(&app.router, Method::GET, &format!("/api/requests/{request_id}"), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let fetched = json_body(response).await;
        assert_eq!(
            fetched["data"]["history"][0]["data"]["additionalInfo"],
            "Elderly person needs insulin"
        );
    }

    #[tokio::test]
    async fn test_list_is_cached_between_identical_gets() {
        let app = test_app().await;
        send(&app.router, Method::POST, "/api/requests", Some(new_request())).await;

        let first = send(&app.router, Method::GET, "/api/requests", None).await;
        assert_eq!(first.headers()[X_CACHE], "MISS");
        let first = json_body(first).await;
        assert_eq!(first["data"].as_array().unwrap().len(), 1);

        let second = send(&app.router, Method::GET, "/api/requests", None).await;
        assert_eq!(second.headers()[X_CACHE], "HIT");
        assert_eq!(json_body(second).await, first);
    }

    #[tokio::test]
    async fn test_update_without_fields_is_bad_request() {
        let app = test_app().await;
        let created = json_body(
            send(&app.router, Method::POST, "/api/requests", Some(new_request())).await,
        )
        .await;
        let request_id = created["data"]["requestId"].as_str().unwrap();

        let response = send(
            &app.router,
            Method::PUT,
            &format!("/api/requests/{request_id}"),
            Some(json!({})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_missing_task_is_not_found() {
        let app = test_app().await;
        let response = send(&app.router, Method::GET, "/api/tasks/task-nope", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_task_create_and_update() {
        let app = test_app().await;
        let response = send(
            &app.router,
            Method::POST,
            "/api/tasks",
            Some(json!({
                "requestId": "req-1",
                "assigneeId": "responder-3",
                "resourceAllocations": [{"resourceId": "blankets", "quantity": 12}],
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let task_id = json_body(response).await["data"]["taskId"]
            .as_str()
            .unwrap()
            .to_string();

        let response = send(
            &app.router,
            Method::PUT,
            &format!("/api/tasks/{task_id}"),
            Some(json!({"status": "in_progress", "notes": "Convoy left"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let detail = json_body(
            send(&app.router, Method::GET, &format!("/api/tasks/{task_id}"), None).await,
        )
        .await;
        assert_eq!(detail["data"]["status"], "in_progress");
        assert_eq!(detail["data"]["assignedResponder"], "responder-3");
    }

    #[tokio::test]
    async fn test_responder_registration_and_location() {
        let app = test_app().await;
        let response = send(
            &app.router,
            Method::POST,
            "/api/users/volunteers",
            Some(json!({"userId": "u-42", "name": "Kim", "skills": ["driving"], "contact": "kim@example.org"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(json_body(response).await["data"]["userId"], "u-42");

        let response = send(
            &app.router,
            Method::PUT,
            "/api/users/u-42/location",
            Some(json!({"lat": 6.93, "lng": 79.85, "timestamp": "2026-10-18T08:30:00Z"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["data"]["status"], "ok");

        let location = json_body(send(&app.router, Method::GET, "/api/users/u-42/location", None).await).await;
        assert_eq!(location["data"]["lat"], 6.93);
    }

    #[tokio::test]
    async fn test_user_crud() {
        let app = test_app().await;
        let response = send(
            &app.router,
            Method::POST,
            "/api/users",
            Some(json!({"id": "u-9", "name": "Lee", "role": "medic"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(json_body(response).await["data"]["id"], "u-9");

        let response = send(
            &app.router,
            Method::PUT,
            "/api/users/u-9",
            Some(json!({"role": "driver"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let user = json_body(send(&app.router, Method::GET, "/api/users/u-9", None).await).await;
        assert_eq!(user["data"]["data"]["name"], "Lee");
        assert_eq!(user["data"]["data"]["role"], "driver");

        let response = send(&app.router, Method::DELETE, "/api/users/u-9", None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let response = send(&app.router, Method::DELETE, "/api/users/u-9", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        // a bearer token skips the cached copy of the earlier GET
        let request = Request::get("/api/users/u-9")
            .header(header::AUTHORIZATION, "Bearer t0ken")
            .body(Body::empty())
            .unwrap();
        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_attachment_upload() {
        let app = test_app().await;
        let created = json_body(
            send(&app.router, Method::POST, "/api/requests", Some(new_request())).await,
        )
        .await;
        let request_id = created["data"]["requestId"].as_str().unwrap();

        let request = Request::builder()
            .method(Method::POST)
            .uri(format!("/api/attachments/{request_id}?fileName=flood.png"))
            .header(header::CONTENT_TYPE, "image/png")
            .body(Body::from(vec![0x89, 0x50, 0x4e, 0x47]))
            .unwrap();
        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let descriptor = json_body(response).await;
        let name = descriptor["data"]["name"].as_str().unwrap();
        assert!(name.ends_with("-flood.png"));
        assert!(descriptor["data"]["downloadUrl"]
            .as_str()
            .unwrap()
            .starts_with(&format!("http://files.test/help-requests/{request_id}/")));
    }

    #[tokio::test]
    async fn test_attachment_for_unknown_request() {
        let app = test_app().await;
        let response = send(&app.router, Method::POST, "/api/attachments/req-ghost", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
