//! Boarding school procedures.
//!
//! | Procedure | Kind | Input | Output |
//! |-----------|------|-------|--------|
//! | `createBoardingSchool` | mutation | [`CreateBoardingSchoolInput`] | school |
//! | `getBoardingSchools` | query | optional [`FilterSchoolsInput`] | school list |
//! | `getBoardingSchoolById` | query | id | school with relations, or `null` |
//! | `updateBoardingSchool` | mutation | [`UpdateBoardingSchoolInput`] | school |
//! | `deleteBoardingSchool` | mutation | id | `{"success": bool}` |
//! | `getFeaturedSchools` | query | none | school list |

use std::sync::Arc;

use axum::extract::State;
use boarding_core::{
  Validate,
  school::{
    BoardingSchool, BoardingSchoolWithRelations, CreateBoardingSchoolInput,
    FilterSchoolsInput, UpdateBoardingSchoolInput,
  },
  store::CatalogStore,
};

use crate::{
  error::{ApiError, store_error},
  rpc::{Rpc, RpcInput, Success},
};

// ─── Create ───────────────────────────────────────────────────────────────────

pub async fn create<S: CatalogStore>(
  State(store): State<Arc<S>>,
  input: RpcInput<CreateBoardingSchoolInput>,
) -> Result<Rpc<BoardingSchool>, ApiError> {
  let input = input.required()?;
  input.validate()?;
  let school = store.create_school(input).await.map_err(store_error)?;
  tracing::info!(id = school.id, "created boarding school");
  Ok(Rpc(school))
}

// ─── List ─────────────────────────────────────────────────────────────────────

pub async fn list<S: CatalogStore>(
  State(store): State<Arc<S>>,
  RpcInput(filter): RpcInput<FilterSchoolsInput>,
) -> Result<Rpc<Vec<BoardingSchool>>, ApiError> {
  let filter = filter.unwrap_or_default();
  filter.validate()?;
  let schools = store.list_schools(&filter).await.map_err(store_error)?;
  Ok(Rpc(schools))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// A missing school is `null`, not an error.
pub async fn get_by_id<S: CatalogStore>(
  State(store): State<Arc<S>>,
  input: RpcInput<i64>,
) -> Result<Rpc<Option<BoardingSchoolWithRelations>>, ApiError> {
  let id = input.required()?;
  let school = store.get_school(id).await.map_err(store_error)?;
  Ok(Rpc(school))
}

// ─── Update ───────────────────────────────────────────────────────────────────

pub async fn update<S: CatalogStore>(
  State(store): State<Arc<S>>,
  input: RpcInput<UpdateBoardingSchoolInput>,
) -> Result<Rpc<BoardingSchool>, ApiError> {
  let input = input.required()?;
  input.validate()?;
  let school = store.update_school(input).await.map_err(store_error)?;
  tracing::info!(id = school.id, "updated boarding school");
  Ok(Rpc(school))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// Deleting an unknown id reports `success: false` rather than failing.
pub async fn delete<S: CatalogStore>(
  State(store): State<Arc<S>>,
  input: RpcInput<i64>,
) -> Result<Rpc<Success>, ApiError> {
  let id = input.required()?;
  let success = store.delete_school(id).await.map_err(store_error)?;
  if success {
    tracing::info!(id, "deleted boarding school");
  }
  Ok(Rpc(Success { success }))
}

// ─── Featured ─────────────────────────────────────────────────────────────────

pub async fn featured<S: CatalogStore>(
  State(store): State<Arc<S>>,
) -> Result<Rpc<Vec<BoardingSchool>>, ApiError> {
  let schools = store.featured_schools().await.map_err(store_error)?;
  Ok(Rpc(schools))
}
