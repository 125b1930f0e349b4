//! User procedures and the health check.

use std::sync::Arc;

use axum::extract::State;
use boarding_core::{
  Validate,
  store::CatalogStore,
  user::{CreateUserInput, User},
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
  error::{ApiError, store_error},
  rpc::{Rpc, RpcInput},
};

/// `createUser`
pub async fn create<S: CatalogStore>(
  State(store): State<Arc<S>>,
  input: RpcInput<CreateUserInput>,
) -> Result<Rpc<User>, ApiError> {
  let input = input.required()?;
  input.validate()?;
  let user = store.create_user(input).await.map_err(store_error)?;
  tracing::info!(id = user.id, role = ?user.role, "created user");
  Ok(Rpc(user))
}

/// `getUserById`; a missing user is `null`.
pub async fn get_by_id<S: CatalogStore>(
  State(store): State<Arc<S>>,
  input: RpcInput<i64>,
) -> Result<Rpc<Option<User>>, ApiError> {
  let id = input.required()?;
  let user = store.get_user(id).await.map_err(store_error)?;
  Ok(Rpc(user))
}

#[derive(Debug, Serialize)]
pub struct Health {
  pub status:    &'static str,
  pub timestamp: DateTime<Utc>,
}

/// `healthcheck`
pub async fn healthcheck() -> Rpc<Health> {
  Rpc(Health { status: "ok", timestamp: Utc::now() })
}
