//! HTTP layer for Dossier.
//!
//! Exposes an axum [`Router`] with the JSON API under `/api` and the bundled
//! single-page dashboard at `/`, backed by any [`CaseStore`].

pub mod error;
pub mod handlers;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  response::Html,
  routing::{delete, get, post},
};
use dossier_core::store::CaseStore;
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use handlers::{contacts, findings, monitor, search, subjects};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` with
/// `DOSSIER_*` environment overrides. Every field has a default, so the
/// server starts with no config file at all.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:    String,
  #[serde(default = "default_port")]
  pub port:    u16,
  #[serde(default = "default_db_path")]
  pub db_path: PathBuf,
}

fn default_host() -> String {
  "127.0.0.1".to_string()
}

fn default_port() -> u16 {
  8000
}

fn default_db_path() -> PathBuf {
  PathBuf::from("~/dossier/dossier.db")
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: CaseStore> {
  pub store: Arc<S>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The JSON API, rooted at `/` (callers nest it under `/api`).
pub fn api_router<S>(state: AppState<S>) -> Router
where
  S: CaseStore + Clone + 'static,
{
  Router::new()
    .route(
      "/subjects",
      get(subjects::list::<S>).post(subjects::create::<S>),
    )
    .route(
      "/subjects/{id}",
      get(subjects::get_one::<S>)
        .put(subjects::update::<S>)
        .delete(subjects::delete::<S>),
    )
    .route("/stats", get(subjects::statistics::<S>))
    .route("/search", get(search::generate))
    .route(
      "/monitor/twitter",
      get(monitor::list_twitter::<S>).post(monitor::add_twitter::<S>),
    )
    .route("/monitor/twitter/{id}", delete(monitor::delete_twitter::<S>))
    .route(
      "/monitor/news",
      get(monitor::list_news::<S>).post(monitor::add_news::<S>),
    )
    .route("/monitor/news/{id}", delete(monitor::delete_news::<S>))
    .route(
      "/findings",
      get(findings::list::<S>).post(findings::create::<S>),
    )
    .route(
      "/findings/{id}",
      get(findings::get_one::<S>).delete(findings::delete::<S>),
    )
    .route("/findings/{id}/verify", post(findings::verify::<S>))
    .route(
      "/contacts",
      get(contacts::list_presets).post(contacts::create::<S>),
    )
    .route("/contacts/user", get(contacts::list_user::<S>))
    .route("/contacts/{id}", delete(contacts::delete::<S>))
    .with_state(state)
}

/// Full application: dashboard at `/`, API under `/api`, permissive CORS
/// and request tracing on everything.
pub fn app_router<S>(state: AppState<S>) -> Router
where
  S: CaseStore + Clone + 'static,
{
  Router::new()
    .route("/", get(dashboard))
    .nest("/api", api_router(state))
    .layer(CorsLayer::permissive())
    .layer(TraceLayer::new_for_http())
}

const DASHBOARD_HTML: &str = include_str!("../assets/dashboard.html");

async fn dashboard() -> Html<&'static str> {
  Html(DASHBOARD_HTML)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use dossier_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  async fn app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    app_router(AppState { store: Arc::new(store) })
  }

  async fn send(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> (StatusCode, Value) {
    let request = match body {
      Some(v) => Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(v.to_string()))
        .unwrap(),
      None => Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap(),
    };
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
      .await
      .unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
  }

  // ── Dashboard and routing ──────────────────────────────────────────────

  #[tokio::test]
  async fn dashboard_served_at_root() {
    let response = app()
      .await
      .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
      .await
      .unwrap();
    let html = std::str::from_utf8(&bytes).unwrap();
    assert!(html.contains("<!DOCTYPE html>"), "not a document: {html}");
  }

  #[tokio::test]
  async fn unknown_route_returns_404() {
    let (status, _) = send(app().await, "GET", "/api/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn cors_header_on_api_responses() {
    let request = Request::builder()
      .uri("/api/subjects")
      .header(header::ORIGIN, "http://localhost:3000")
      .body(Body::empty())
      .unwrap();
    let response = app().await.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
      response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
    );
  }

  // ── Subjects ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn subject_create_fetch_update_delete() {
    let app = app().await;

    let (status, body) = send(
      app.clone(),
      "POST",
      "/api/subjects",
      Some(json!({ "name_en": "Ali Rezaei", "location": "Geneva" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["name"], "Ali Rezaei");
    let id = body["id"].as_i64().unwrap();

    let (status, body) =
      send(app.clone(), "GET", &format!("/api/subjects/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name_en"], "Ali Rezaei");
    assert_eq!(body["location_spotted"], "Geneva");
    assert_eq!(body["status"], "New");

    let (status, body) = send(
      app.clone(),
      "PUT",
      &format!("/api/subjects/{id}"),
      Some(json!({ "status": "Investigating", "risk_level": "High" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");

    let (_, body) =
      send(app.clone(), "GET", &format!("/api/subjects/{id}"), None).await;
    assert_eq!(body["status"], "Investigating");
    assert_eq!(body["risk_level"], "High");

    let (status, body) =
      send(app.clone(), "DELETE", &format!("/api/subjects/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");

    let (status, body) =
      send(app, "GET", &format!("/api/subjects/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "error": "Not found" }));
  }

  #[tokio::test]
  async fn subject_without_name_yields_error_payload() {
    let (status, body) =
      send(app().await, "POST", "/api/subjects", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "name_en is required");
  }

  #[tokio::test]
  async fn non_integer_id_returns_400() {
    let (status, body) =
      send(app().await, "GET", "/api/subjects/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid ID" }));
  }

  #[tokio::test]
  async fn subject_list_filter_and_stats() {
    let app = app().await;
    for name in ["One", "Two", "Three"] {
      send(
        app.clone(),
        "POST",
        "/api/subjects",
        Some(json!({ "name_en": name })),
      )
      .await;
    }
    let (_, body) = send(app.clone(), "GET", "/api/subjects", None).await;
    let all = body.as_array().unwrap();
    assert_eq!(all.len(), 3);
    // newest first
    assert_eq!(all[0]["name_en"], "Three");

    let first_id = all[2]["id"].as_i64().unwrap();
    send(
      app.clone(),
      "PUT",
      &format!("/api/subjects/{first_id}"),
      Some(json!({ "status": "Verified" })),
    )
    .await;

    let (_, body) =
      send(app.clone(), "GET", "/api/subjects?status=Verified", None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = send(app, "GET", "/api/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(body["by_status"]["Verified"], 1);
    assert_eq!(body["by_status"]["New"], 2);
  }

  // ── Monitor ────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn twitter_cap_surfaces_as_error_payload() {
    let app = app().await;
    for i in 0..10 {
      let (status, body) = send(
        app.clone(),
        "POST",
        "/api/monitor/twitter",
        Some(json!({ "username": format!("user{i}") })),
      )
      .await;
      assert_eq!(status, StatusCode::OK);
      assert_eq!(body["status"], "success");
    }

    let (status, body) = send(
      app,
      "POST",
      "/api/monitor/twitter",
      Some(json!({ "username": "one_too_many" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Maximum 10 accounts reached");
  }

  #[tokio::test]
  async fn duplicate_news_source_surfaces_as_error_payload() {
    let app = app().await;
    let (_, body) = send(
      app.clone(),
      "POST",
      "/api/monitor/news",
      Some(json!({ "name": "BBC Persian", "url": "bbc.com/persian" })),
    )
    .await;
    assert_eq!(body["status"], "success");

    let (status, body) = send(
      app,
      "POST",
      "/api/monitor/news",
      Some(json!({ "name": "BBC", "url": "https://bbc.com/persian" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Source already exists");
  }

  // ── Search ─────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn search_returns_all_fixed_categories() {
    let (status, body) =
      send(app().await, "GET", "/api/search?name=Ali%20Khamenei", None).await;
    assert_eq!(status, StatusCode::OK);
    for category in
      ["linkedin", "sanctions", "corporate", "social_media", "web_search"]
    {
      assert!(body[category].is_object(), "missing {category}: {body}");
    }
    assert!(body.get("persian").is_none());
    let linkedin = body["linkedin"]["people_search"].as_str().unwrap();
    assert!(linkedin.contains("Ali%20Khamenei"), "url: {linkedin}");
  }

  #[tokio::test]
  async fn search_with_localized_name_adds_persian() {
    let (_, body) = send(
      app().await,
      "GET",
      "/api/search?name=Ali&name_fa=%D8%B9%D9%84%DB%8C",
      None,
    )
    .await;
    assert!(body["persian"].is_object(), "body: {body}");
  }

  #[tokio::test]
  async fn search_without_name_returns_400() {
    let (status, body) = send(app().await, "GET", "/api/search", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Name required" }));
  }

  // ── Findings ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn finding_create_verify_and_join() {
    let app = app().await;
    let (_, body) = send(
      app.clone(),
      "POST",
      "/api/subjects",
      Some(json!({ "name_en": "Ali Rezaei" })),
    )
    .await;
    let subject_id = body["id"].as_i64().unwrap();

    let (status, body) = send(
      app.clone(),
      "POST",
      "/api/findings",
      Some(json!({ "title": "LinkedIn profile", "subject_id": subject_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "LinkedIn profile");
    let finding_id = body["id"].as_i64().unwrap();

    let (status, body) = send(
      app.clone(),
      "POST",
      &format!("/api/findings/{finding_id}/verify"),
      Some(json!({ "verified": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");

    let (_, body) =
      send(app, "GET", &format!("/api/findings/{finding_id}"), None).await;
    assert_eq!(body["verified"], true);
    assert_eq!(body["subject_name"], "Ali Rezaei");
  }

  #[tokio::test]
  async fn finding_without_title_yields_error_payload() {
    let (status, body) =
      send(app().await, "POST", "/api/findings", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "title is required");
  }

  // ── Contacts ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn preset_contacts_are_served() {
    let (status, body) = send(app().await, "GET", "/api/contacts", None).await;
    assert_eq!(status, StatusCode::OK);
    let presets = body.as_array().unwrap();
    assert_eq!(presets.len(), 8);
    assert!(presets.iter().all(|p| p["url"].as_str().is_some()));
  }

  #[tokio::test]
  async fn user_contact_lifecycle() {
    let app = app().await;
    let (_, body) = send(app.clone(), "GET", "/api/contacts/user", None).await;
    assert_eq!(body.as_array().unwrap().len(), 0);

    let (_, body) = send(
      app.clone(),
      "POST",
      "/api/contacts",
      Some(json!({ "name": "Jane Journalist", "email": "jane@example.org" })),
    )
    .await;
    assert_eq!(body["status"], "success");
    let id = body["id"].as_i64().unwrap();

    let (_, body) = send(app.clone(), "GET", "/api/contacts/user", None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (_, body) =
      send(app.clone(), "DELETE", &format!("/api/contacts/{id}"), None).await;
    assert_eq!(body["status"], "success");

    let (_, body) = send(app, "GET", "/api/contacts/user", None).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
  }
}
