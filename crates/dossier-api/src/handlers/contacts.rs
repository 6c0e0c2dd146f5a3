//! Contact handlers: the built-in organization list plus user-added entries.

use axum::{
  Json,
  extract::{Path, State},
};
use dossier_core::{
  contact::{NewUserContact, PRESET_CONTACTS, PresetContact, UserContact},
  store::CaseStore,
};
use serde::Deserialize;
use serde_json::{Value, json};

use super::parse_id;
use crate::{AppState, error::Error};

pub async fn list_presets() -> Json<&'static [PresetContact]> {
  Json(PRESET_CONTACTS)
}

pub async fn list_user<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<UserContact>>, Error>
where
  S: CaseStore + Clone + 'static,
{
  Ok(Json(state.store.list_user_contacts().await?))
}

#[derive(Deserialize)]
pub struct CreateContact {
  name:         Option<String>,
  contact_type: Option<String>,
  email:        Option<String>,
  url:          Option<String>,
  description:  Option<String>,
}

pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<CreateContact>,
) -> Result<Json<Value>, Error>
where
  S: CaseStore + Clone + 'static,
{
  let input = NewUserContact::new(
    body.name.unwrap_or_default(),
    body.contact_type,
    body.email,
    body.url,
    body.description,
  )?;
  let contact = state.store.add_user_contact(input).await?;
  Ok(Json(json!({
    "status": "success",
    "id":     contact.id,
    "name":   contact.name,
  })))
}

pub async fn delete<S>(
  State(state): State<AppState<S>>,
  Path(raw_id): Path<String>,
) -> Result<Json<Value>, Error>
where
  S: CaseStore + Clone + 'static,
{
  let id = parse_id(&raw_id)?;
  state.store.delete_user_contact(id).await?;
  Ok(Json(json!({ "status": "success" })))
}
