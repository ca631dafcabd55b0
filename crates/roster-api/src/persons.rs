//! Handlers for `/persons` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/persons` | Body: [`PersonCreateRequest`]; 201 + `Location` + stored person |
//! | `GET`  | `/persons/{id}` | 404 if not found |
//! | `GET`  | `/persons` | `?search=<term>` (or `?t=`) required and non-empty |
//! | `GET`  | `/persons/count` | Plain-text integer |

use std::sync::Arc;

use axum::{
  Json,
  extract::{
    Path, Query, State,
    rejection::{JsonRejection, PathRejection, QueryRejection},
  },
  http::{StatusCode, header},
  response::IntoResponse,
};
use roster_core::{
  person::Person,
  store::PersonStore,
  validate::{PersonCreateRequest, validate},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /persons`
///
/// A body that is not JSON, or whose fields have the wrong JSON types (e.g. a
/// number inside `stack`), is a 400. A well-formed body that breaks a field
/// rule, or reuses a nickname, is a 422.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  payload: Result<Json<PersonCreateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PersonStore,
{
  let Json(body) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  let person = validate(body).map_err(roster_core::Error::from)?;

  let id = store.create_person(person.clone()).await?;
  Ok((
    StatusCode::CREATED,
    [(header::LOCATION, format!("/persons/{id}"))],
    Json(person.into_person(id)),
  ))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /persons/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Person>, ApiError>
where
  S: PersonStore,
{
  let Path(id) = id.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  Ok(Json(store.get_person(id).await?))
}

// ─── Search ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SearchParams {
  #[serde(alias = "t")]
  pub search: Option<String>,
}

/// `GET /persons?search=<term>`
pub async fn search<S>(
  State(store): State<Arc<S>>,
  params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<Person>>, ApiError>
where
  S: PersonStore,
{
  let Query(params) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  let term = params
    .search
    .filter(|t| !t.is_empty())
    .ok_or_else(|| ApiError::BadRequest("search term is required".into()))?;

  Ok(Json(store.search_persons(&term).await?))
}

// ─── Count ────────────────────────────────────────────────────────────────────

/// `GET /persons/count`
pub async fn count<S>(State(store): State<Arc<S>>) -> Result<String, ApiError>
where
  S: PersonStore,
{
  Ok(store.count_persons().await?.to_string())
}
