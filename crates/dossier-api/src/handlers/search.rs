//! Search URL generation. Pure, no store access.

use axum::{Json, extract::Query};
use dossier_core::search::{self, SearchUrls};
use serde::Deserialize;

use crate::error::Error;

#[derive(Deserialize)]
pub struct SearchQuery {
  name:    Option<String>,
  name_fa: Option<String>,
}

pub async fn generate(
  Query(query): Query<SearchQuery>,
) -> Result<Json<SearchUrls>, Error> {
  let name = query
    .name
    .filter(|n| !n.trim().is_empty())
    .ok_or(Error::MissingParam("Name required"))?;
  Ok(Json(search::generate(&name, query.name_fa.as_deref())))
}
