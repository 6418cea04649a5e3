//! # Request Validation End-to-End Tests
//!
//! Drives real routers through the validated extractors and the guard
//! middleware, asserting the full request → validation → response flow:
//! success values, the stable 400 error shape, guard pass-through
//! semantics, and the custom exception factory.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower::ServiceExt;

use intake_axum::{Source, ValidatedJson, ValidatedParams, ValidatedQuery, ValidationGuard};
use intake_core::{DateStringSchema, Dto, Schema, SchemaError};

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    serde_json::from_slice(&bytes).expect("response body is JSON")
}

// ---- DTOs ----

#[derive(Debug, Serialize, Deserialize)]
struct CreatePost {
    title: String,
    password: String,
    published_at: Option<DateTime<Utc>>,
}

impl Dto for CreatePost {
    fn schema() -> Schema {
        Schema::object([
            ("title", Schema::string().min_length(1)),
            ("password", Schema::string().min_length(8)),
            (
                "published_at",
                Schema::date_string(DateStringSchema::new().cast()).optional(),
            ),
        ])
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SearchQuery {
    q: String,
    order: Option<String>,
}

impl Dto for SearchQuery {
    fn schema() -> Schema {
        Schema::object([
            ("q", Schema::string().min_length(1)),
            (
                "order",
                Schema::enumeration(["asc", "desc"]).optional(),
            ),
        ])
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct UserPath {
    id: String,
}

impl Dto for UserPath {
    fn schema() -> Schema {
        Schema::object([("id", Schema::string().min_length(3))])
    }
}

// ---- Routers ----

async fn create_post(ValidatedJson(post): ValidatedJson<CreatePost>) -> Json<CreatePost> {
    Json(post)
}

async fn search(ValidatedQuery(query): ValidatedQuery<SearchQuery>) -> Json<SearchQuery> {
    Json(query)
}

async fn get_user(ValidatedParams(path): ValidatedParams<UserPath>) -> Json<UserPath> {
    Json(path)
}

async fn echo_raw(Json(raw): Json<Value>) -> Json<Value> {
    Json(raw)
}

fn pipe_app() -> Router {
    Router::new()
        .route("/posts", post(create_post))
        .route("/search", get(search))
        .route("/users/{id}", get(get_user))
}

fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

// ---- Pipe: body ----

#[tokio::test]
async fn valid_body_reaches_handler_typed_and_cast() {
    init_tracing();
    let response = pipe_app()
        .oneshot(json_request(
            "/posts",
            json!({
                "title": "hello",
                "password": "longenough",
                "published_at": "2022-05-15T17:00:00+05:00"
            }),
        ))
        .await
        .expect("infallible");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["title"], "hello");
    // Cast normalized the offset timestamp to UTC before deserialization.
    assert_eq!(body["published_at"], "2022-05-15T12:00:00Z");
}

#[tokio::test]
async fn short_password_yields_stable_error_shape() {
    init_tracing();
    let response = pipe_app()
        .oneshot(json_request(
            "/posts",
            json!({ "title": "hello", "password": "short" }),
        ))
        .await
        .expect("infallible");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(
        body,
        json!({
            "statusCode": 400,
            "message": "Validation failed",
            "errors": [{
                "code": "too_small",
                "message": "String must contain at least 8 character(s)",
                "path": ["password"],
                "minimum": 8
            }]
        })
    );
}

#[tokio::test]
async fn malformed_json_maps_to_single_root_issue() {
    init_tracing();
    let request = Request::builder()
        .method("POST")
        .uri("/posts")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .expect("request");
    let response = pipe_app().oneshot(request).await.expect("infallible");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["statusCode"], 400);
    assert_eq!(body["errors"][0]["code"], "malformed_payload");
    assert_eq!(body["errors"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn missing_content_type_is_rejected_not_swallowed() {
    init_tracing();
    let request = Request::builder()
        .method("POST")
        .uri("/posts")
        .body(Body::from("{}"))
        .expect("request");
    let response = pipe_app().oneshot(request).await.expect("infallible");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["errors"][0]["code"], "malformed_payload");
}

// ---- Pipe: query ----

#[tokio::test]
async fn query_source_validates_string_pairs() {
    init_tracing();
    let request = Request::builder()
        .uri("/search?q=rust&order=desc")
        .body(Body::empty())
        .expect("request");
    let response = pipe_app().oneshot(request).await.expect("infallible");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["q"], "rust");
    assert_eq!(body["order"], "desc");
}

#[tokio::test]
async fn missing_query_field_reports_its_path() {
    init_tracing();
    let request = Request::builder()
        .uri("/search?order=asc")
        .body(Body::empty())
        .expect("request");
    let response = pipe_app().oneshot(request).await.expect("infallible");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["errors"][0]["message"], "Required");
    assert_eq!(body["errors"][0]["path"], json!(["q"]));
}

#[tokio::test]
async fn bad_enum_in_query_lists_options() {
    init_tracing();
    let request = Request::builder()
        .uri("/search?q=rust&order=sideways")
        .body(Body::empty())
        .expect("request");
    let response = pipe_app().oneshot(request).await.expect("infallible");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["errors"][0]["code"], "invalid_enum_value");
    assert_eq!(body["errors"][0]["options"], json!(["asc", "desc"]));
}

// ---- Pipe: path params ----

#[tokio::test]
async fn path_params_validate_against_schema() {
    init_tracing();
    let ok = Request::builder()
        .uri("/users/abc")
        .body(Body::empty())
        .expect("request");
    let response = pipe_app().oneshot(ok).await.expect("infallible");
    assert_eq!(response.status(), StatusCode::OK);

    let short = Request::builder()
        .uri("/users/ab")
        .body(Body::empty())
        .expect("request");
    let response = pipe_app().oneshot(short).await.expect("infallible");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["errors"][0]["path"], json!(["id"]));
}

// ---- Guard ----

fn guard_schema() -> Schema {
    Schema::object([("name", Schema::string().min_length(2))])
}

fn guarded_app(guard: ValidationGuard) -> Router {
    Router::new()
        .route("/guarded", post(echo_raw))
        .layer(middleware::from_fn(move |req, next| {
            let guard = guard.clone();
            async move { guard.check(req, next).await }
        }))
}

#[tokio::test]
async fn guard_gates_without_transforming() {
    init_tracing();
    let guard = ValidationGuard::new(guard_schema()).expect("well-formed schema");
    // Unknown keys pass through untouched: the guard gates, it never strips.
    let response = guarded_app(guard)
        .oneshot(json_request(
            "/guarded",
            json!({ "name": "ok", "extra": true }),
        ))
        .await
        .expect("infallible");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body, json!({ "name": "ok", "extra": true }));
}

#[tokio::test]
async fn guard_rejects_with_default_shape() {
    init_tracing();
    let guard = ValidationGuard::new(guard_schema()).expect("well-formed schema");
    let response = guarded_app(guard)
        .oneshot(json_request("/guarded", json!({ "name": "x" })))
        .await
        .expect("infallible");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Validation failed");
    assert_eq!(body["errors"][0]["code"], "too_small");
}

#[tokio::test]
async fn guard_exception_factory_substitutes_the_shape() {
    init_tracing();
    let guard = ValidationGuard::new(guard_schema())
        .expect("well-formed schema")
        .with_exception_factory(|issues| {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "failed": issues.len() })),
            )
                .into_response()
        });
    let response = guarded_app(guard)
        .oneshot(json_request("/guarded", json!({})))
        .await
        .expect("infallible");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body, json!({ "failed": 1 }));
}

#[tokio::test]
async fn guard_query_source() {
    init_tracing();
    let guard = ValidationGuard::new(guard_schema())
        .expect("well-formed schema")
        .with_source(Source::Query);
    let app = Router::new()
        .route("/guarded-query", get(|| async { "through" }))
        .layer(middleware::from_fn(move |req, next| {
            let guard = guard.clone();
            async move { guard.check(req, next).await }
        }));

    let ok = Request::builder()
        .uri("/guarded-query?name=ok")
        .body(Body::empty())
        .expect("request");
    let response = app.clone().oneshot(ok).await.expect("infallible");
    assert_eq!(response.status(), StatusCode::OK);

    let missing = Request::builder()
        .uri("/guarded-query")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(missing).await.expect("infallible");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn ill_formed_schema_fails_at_guard_construction() {
    init_tracing();
    let err = ValidationGuard::new(Schema::string().min_length(9).max_length(3)).unwrap_err();
    assert_eq!(err, SchemaError::InvertedLengthBounds { min: 9, max: 3 });
}
