//! Finding handlers.

use axum::{
  Json,
  extract::{Path, Query, State},
};
use dossier_core::{
  finding::{FindingFilter, FindingWithSubject, NewFinding},
  store::CaseStore,
};
use serde::Deserialize;
use serde_json::{Value, json};

use super::parse_id;
use crate::{AppState, error::Error};

#[derive(Deserialize)]
pub struct ListQuery {
  finding_type: Option<String>,
  importance:   Option<String>,
}

pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(query): Query<ListQuery>,
) -> Result<Json<Vec<FindingWithSubject>>, Error>
where
  S: CaseStore + Clone + 'static,
{
  let filter = FindingFilter {
    finding_type: query.finding_type,
    importance:   query.importance,
  };
  Ok(Json(state.store.list_findings(filter).await?))
}

pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(raw_id): Path<String>,
) -> Result<Json<Value>, Error>
where
  S: CaseStore + Clone + 'static,
{
  let id = parse_id(&raw_id)?;
  let body = match state.store.get_finding(id).await? {
    Some(finding) => {
      serde_json::to_value(finding).map_err(dossier_core::Error::from)?
    }
    None => json!({ "error": "Not found" }),
  };
  Ok(Json(body))
}

#[derive(Deserialize)]
pub struct CreateFinding {
  title:        Option<String>,
  finding_type: Option<String>,
  description:  Option<String>,
  source_url:   Option<String>,
  source_name:  Option<String>,
  subject_id:   Option<i64>,
  tags:         Option<String>,
  importance:   Option<String>,
}

pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<CreateFinding>,
) -> Result<Json<Value>, Error>
where
  S: CaseStore + Clone + 'static,
{
  let input = NewFinding::new(
    body.title.unwrap_or_default(),
    body.finding_type,
    body.description,
    body.source_url,
    body.source_name,
    body.subject_id,
    body.tags,
    body.importance,
  )?;
  let finding = state.store.add_finding(input).await?;
  Ok(Json(json!({
    "status": "success",
    "id":     finding.finding.id,
    "title":  finding.finding.title,
  })))
}

#[derive(Deserialize)]
pub struct VerifyBody {
  verified: Option<bool>,
}

pub async fn verify<S>(
  State(state): State<AppState<S>>,
  Path(raw_id): Path<String>,
  Json(body): Json<VerifyBody>,
) -> Result<Json<Value>, Error>
where
  S: CaseStore + Clone + 'static,
{
  let id = parse_id(&raw_id)?;
  state
    .store
    .verify_finding(id, body.verified.unwrap_or(true))
    .await?;
  Ok(Json(json!({ "status": "success" })))
}

pub async fn delete<S>(
  State(state): State<AppState<S>>,
  Path(raw_id): Path<String>,
) -> Result<Json<Value>, Error>
where
  S: CaseStore + Clone + 'static,
{
  let id = parse_id(&raw_id)?;
  state.store.delete_finding(id).await?;
  Ok(Json(json!({ "status": "success" })))
}
