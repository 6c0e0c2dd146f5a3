//! Subject CRUD and statistics handlers.

use axum::{
  Json,
  extract::{Path, Query, State},
};
use dossier_core::{
  store::CaseStore,
  subject::{NewSubject, SubjectFilter, SubjectPatch, SubjectStatistics, Subject},
};
use serde::Deserialize;
use serde_json::{Value, json};

use super::parse_id;
use crate::{AppState, error::Error};

#[derive(Deserialize)]
pub struct ListQuery {
  status:     Option<String>,
  risk_level: Option<String>,
}

pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Subject>>, Error>
where
  S: CaseStore + Clone + 'static,
{
  let filter = SubjectFilter {
    status:     query.status,
    risk_level: query.risk_level,
  };
  Ok(Json(state.store.list_subjects(filter).await?))
}

pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(raw_id): Path<String>,
) -> Result<Json<Value>, Error>
where
  S: CaseStore + Clone + 'static,
{
  let id = parse_id(&raw_id)?;
  let body = match state.store.get_subject(id).await? {
    Some(subject) => {
      serde_json::to_value(subject).map_err(dossier_core::Error::from)?
    }
    None => json!({ "error": "Not found" }),
  };
  Ok(Json(body))
}

/// Request body for `POST /api/subjects`. The wire keys `location` and
/// `event` are shorter than the stored column names.
#[derive(Deserialize)]
pub struct CreateSubject {
  name_en:  Option<String>,
  name_fa:  Option<String>,
  location: Option<String>,
  event:    Option<String>,
  notes:    Option<String>,
}

pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<CreateSubject>,
) -> Result<Json<Value>, Error>
where
  S: CaseStore + Clone + 'static,
{
  let input = NewSubject::new(
    body.name_en.unwrap_or_default(),
    body.name_fa,
    body.location,
    body.event,
    body.notes,
  )?;
  let subject = state.store.add_subject(input).await?;
  Ok(Json(json!({
    "status": "success",
    "id":     subject.id,
    "name":   subject.name_en,
  })))
}

pub async fn update<S>(
  State(state): State<AppState<S>>,
  Path(raw_id): Path<String>,
  Json(patch): Json<SubjectPatch>,
) -> Result<Json<Value>, Error>
where
  S: CaseStore + Clone + 'static,
{
  let id = parse_id(&raw_id)?;
  state.store.update_subject(id, patch).await?;
  Ok(Json(json!({ "status": "success", "id": id })))
}

pub async fn delete<S>(
  State(state): State<AppState<S>>,
  Path(raw_id): Path<String>,
) -> Result<Json<Value>, Error>
where
  S: CaseStore + Clone + 'static,
{
  let id = parse_id(&raw_id)?;
  state.store.delete_subject(id).await?;
  Ok(Json(json!({ "status": "success", "id": id })))
}

pub async fn statistics<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<SubjectStatistics>, Error>
where
  S: CaseStore + Clone + 'static,
{
  Ok(Json(state.store.subject_statistics().await?))
}
