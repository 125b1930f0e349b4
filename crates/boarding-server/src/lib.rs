//! HTTP server assembly for the boarding school catalog.
//!
//! Mounts the procedure API under `/rpc` and wraps it in request tracing and
//! CORS. The binary in `main.rs` handles configuration loading and startup.

use std::{path::PathBuf, sync::Arc};

use axum::{Router, http::HeaderValue};
use boarding_core::store::CatalogStore;
use serde::Deserialize;
use tower_http::{
  cors::{AllowOrigin, Any, CorsLayer},
  trace::TraceLayer,
};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `BOARDING_*` environment variables. Every field has a default.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:         String,
  pub port:         u16,
  pub store_path:   PathBuf,
  /// Allowed CORS origins. Empty allows any origin.
  pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:         "0.0.0.0".into(),
      port:         2022,
      store_path:   PathBuf::from("boarding.db"),
      cors_origins: Vec::new(),
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// CORS policy for `origins`; unparseable entries are skipped with a warning.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
  let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
  if origins.is_empty() {
    return layer.allow_origin(Any);
  }

  let origins: Vec<HeaderValue> = origins
    .iter()
    .filter_map(|origin| match origin.parse() {
      Ok(value) => Some(value),
      Err(_) => {
        tracing::warn!(%origin, "ignoring invalid CORS origin");
        None
      }
    })
    .collect();
  layer.allow_origin(AllowOrigin::list(origins))
}

/// Build the full application router for `store`.
pub fn app<S>(store: Arc<S>, config: &ServerConfig) -> Router
where
  S: CatalogStore + 'static,
{
  Router::new()
    .nest("/rpc", boarding_api::api_router(store))
    .layer(TraceLayer::new_for_http())
    .layer(cors_layer(&config.cors_origins))
}
