//! Monitoring list handlers: tracked Twitter accounts and news sources.

use axum::{
  Json,
  extract::{Path, State},
};
use dossier_core::{
  monitor::{NewNewsSource, NewTwitterAccount, NewsSource, TwitterAccount},
  store::CaseStore,
};
use serde::Deserialize;
use serde_json::{Value, json};

use super::parse_id;
use crate::{AppState, error::Error};

// ─── Twitter ─────────────────────────────────────────────────────────────────

pub async fn list_twitter<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<TwitterAccount>>, Error>
where
  S: CaseStore + Clone + 'static,
{
  Ok(Json(state.store.list_twitter_accounts().await?))
}

#[derive(Deserialize)]
pub struct AddTwitter {
  username:    Option<String>,
  description: Option<String>,
}

pub async fn add_twitter<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<AddTwitter>,
) -> Result<Json<Value>, Error>
where
  S: CaseStore + Clone + 'static,
{
  let input =
    NewTwitterAccount::new(body.username.unwrap_or_default(), body.description)?;
  let account = state.store.add_twitter_account(input).await?;
  Ok(Json(json!({
    "status":   "success",
    "id":       account.id,
    "username": account.username,
  })))
}

pub async fn delete_twitter<S>(
  State(state): State<AppState<S>>,
  Path(raw_id): Path<String>,
) -> Result<Json<Value>, Error>
where
  S: CaseStore + Clone + 'static,
{
  let id = parse_id(&raw_id)?;
  state.store.delete_twitter_account(id).await?;
  Ok(Json(json!({ "status": "success" })))
}

// ─── News ────────────────────────────────────────────────────────────────────

pub async fn list_news<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<NewsSource>>, Error>
where
  S: CaseStore + Clone + 'static,
{
  Ok(Json(state.store.list_news_sources().await?))
}

#[derive(Deserialize)]
pub struct AddNews {
  name:        Option<String>,
  url:         Option<String>,
  description: Option<String>,
}

pub async fn add_news<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<AddNews>,
) -> Result<Json<Value>, Error>
where
  S: CaseStore + Clone + 'static,
{
  let input = NewNewsSource::new(
    body.name.unwrap_or_default(),
    body.url.unwrap_or_default(),
    body.description,
  )?;
  let source = state.store.add_news_source(input).await?;
  Ok(Json(json!({
    "status": "success",
    "id":     source.id,
    "name":   source.name,
  })))
}

pub async fn delete_news<S>(
  State(state): State<AppState<S>>,
  Path(raw_id): Path<String>,
) -> Result<Json<Value>, Error>
where
  S: CaseStore + Clone + 'static,
{
  let id = parse_id(&raw_id)?;
  state.store.delete_news_source(id).await?;
  Ok(Json(json!({ "status": "success" })))
}
