//! Router-level tests driving `api_router` with `oneshot` requests.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
  response::Response,
};
use roster_core::{
  Error, ValidationError,
  person::{NewPerson, Person},
  store::PersonStore,
};
use roster_store_sqlite::SqliteStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;
use uuid::Uuid;

use crate::{ApiError, api_router};

async fn app() -> Router {
  let store = SqliteStore::open_in_memory().await.unwrap();
  api_router(Arc::new(store))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> Response {
  let mut builder = Request::builder().method(method).uri(uri);
  if body.is_some() {
    builder = builder.header(header::CONTENT_TYPE, "application/json");
  }
  let req = builder
    .body(body.map(|b| Body::from(b.to_owned())).unwrap_or_else(Body::empty))
    .unwrap();
  app.clone().oneshot(req).await.unwrap()
}

async fn body_bytes(resp: Response) -> Vec<u8> {
  axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap()
    .to_vec()
}

async fn body_json(resp: Response) -> Value {
  serde_json::from_slice(&body_bytes(resp).await).unwrap()
}

fn ana() -> String {
  json!({
    "name": "Ana Silva",
    "nickname": "ana",
    "birth_date": "1994-10-18",
    "stack": ["kotlin", "java"],
  })
  .to_string()
}

/// POST a person and return the `Location` header.
async fn create(app: &Router, body: &str) -> String {
  let resp = send(app, "POST", "/persons", Some(body)).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  resp
    .headers()
    .get(header::LOCATION)
    .unwrap()
    .to_str()
    .unwrap()
    .to_owned()
}

// ── Create / get ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_returns_location_and_get_returns_same_person() {
  let app = app().await;

  let location = create(&app, &ana()).await;
  let id = location.strip_prefix("/persons/").unwrap();
  assert!(Uuid::parse_str(id).is_ok(), "location: {location}");

  let resp = send(&app, "GET", &location, None).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(
    body_json(resp).await,
    json!({
      "id": id,
      "name": "Ana Silva",
      "nickname": "ana",
      "birth_date": "1994-10-18",
      "stack": ["kotlin", "java"],
    })
  );
}

#[tokio::test]
async fn create_accepts_portuguese_field_names() {
  let app = app().await;
  let body = r#"{"nome":"Ana","apelido":"ana","nascimento":"1994-10-18","stack":null}"#;

  let location = create(&app, body).await;
  let person = body_json(send(&app, "GET", &location, None).await).await;
  assert_eq!(person["nickname"], "ana");
  assert_eq!(person["stack"], Value::Null);
}

#[tokio::test]
async fn get_unknown_id_is_404() {
  let app = app().await;
  let uri = format!("/persons/{}", Uuid::new_v4());
  let resp = send(&app, "GET", &uri, None).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_malformed_id_is_400() {
  let app = app().await;
  let resp = send(&app, "GET", "/persons/not-a-uuid", None).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ── Create failures ──────────────────────────────────────────────────────────

#[tokio::test]
async fn invalid_fields_are_422_and_not_stored() {
  let app = app().await;

  for body in [
    json!({"name": "Ana", "nickname": "ana", "birth_date": "94-10-18"}),
    json!({"name": "Ana", "nickname": "a".repeat(33), "birth_date": "1994-10-18"}),
    json!({"name": "", "nickname": "ana", "birth_date": "1994-10-18"}),
    json!({"name": null, "nickname": "ana", "birth_date": "1994-10-18"}),
    json!({"name": "Ana", "birth_date": "1994-10-18"}),
    json!({"name": "Ana", "nickname": "ana", "birth_date": "1994-10-18", "stack": [""]}),
  ] {
    let resp = send(&app, "POST", "/persons", Some(&body.to_string())).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY, "{body}");
  }

  let resp = send(&app, "GET", "/persons/count", None).await;
  assert_eq!(body_bytes(resp).await, b"0");
}

#[tokio::test]
async fn duplicate_nickname_is_422() {
  let app = app().await;
  create(&app, &ana()).await;

  let resp = send(&app, "POST", "/persons", Some(&ana())).await;
  assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
  let err = body_json(resp).await;
  assert!(err["error"].as_str().unwrap().contains("nickname"));
}

#[tokio::test]
async fn malformed_bodies_are_400() {
  let app = app().await;

  for body in [
    "{not json",
    r#"{"name":"Ana","nickname":"ana","birth_date":"1994-10-18","stack":[1,"rust"]}"#,
    r#"{"name":1,"nickname":"ana","birth_date":"1994-10-18"}"#,
  ] {
    let resp = send(&app, "POST", "/persons", Some(body)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{body}");
  }
}

// ── Search ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn search_by_term() {
  let app = app().await;
  create(&app, &ana()).await;

  let hits = body_json(send(&app, "GET", "/persons?search=silva", None).await).await;
  assert_eq!(hits, json!([]));

  for uri in ["/persons?search=Silva", "/persons?search=kotlin", "/persons?t=kotlin"] {
    let resp = send(&app, "GET", uri, None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let hits = body_json(resp).await;
    assert_eq!(hits.as_array().unwrap().len(), 1, "{uri}");
    assert_eq!(hits[0]["nickname"], "ana");
  }
}

#[tokio::test]
async fn search_without_term_is_400() {
  let app = app().await;
  for uri in ["/persons", "/persons?search="] {
    let resp = send(&app, "GET", uri, None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
  }
}

// ── Count ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn count_is_plain_integer() {
  let app = app().await;
  create(&app, &ana()).await;
  create(
    &app,
    r#"{"name":"Bruno","nickname":"bru","birth_date":"1990-01-01"}"#,
  )
  .await;

  let resp = send(&app, "GET", "/persons/count", None).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert!(
    resp.headers()[header::CONTENT_TYPE]
      .to_str()
      .unwrap()
      .starts_with("text/plain")
  );
  assert_eq!(body_bytes(resp).await, b"2");
}

// ── Error mapping ────────────────────────────────────────────────────────────

/// A store whose backend is always down.
struct UnavailableStore;

fn unavailable() -> Error {
  Error::storage(std::io::Error::other("database is unavailable"))
}

impl PersonStore for UnavailableStore {
  async fn create_person(&self, _person: NewPerson) -> roster_core::Result<Uuid> {
    Err(unavailable())
  }

  async fn get_person(&self, _id: Uuid) -> roster_core::Result<Person> {
    Err(unavailable())
  }

  async fn search_persons(&self, _term: &str) -> roster_core::Result<Vec<Person>> {
    Err(unavailable())
  }

  async fn count_persons(&self) -> roster_core::Result<u64> {
    Err(unavailable())
  }
}

#[tokio::test]
async fn storage_failure_is_500_with_error_body() {
  let app = api_router(Arc::new(UnavailableStore));

  let resp = send(&app, "POST", "/persons", Some(&ana())).await;
  assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
  let err = body_json(resp).await;
  assert!(
    err["error"].as_str().unwrap().contains("database is unavailable"),
    "{err}"
  );

  for uri in ["/persons/count", "/persons?search=ana"] {
    let resp = send(&app, "GET", uri, None).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
  }
}

#[tokio::test]
async fn core_validation_error_maps_to_422() {
  let err = ApiError::from(Error::from(ValidationError::Missing("name")));
  assert!(matches!(err, ApiError::Invalid(ValidationError::Missing("name"))));
  assert_eq!(
    axum::response::IntoResponse::into_response(err).status(),
    StatusCode::UNPROCESSABLE_ENTITY
  );
}
