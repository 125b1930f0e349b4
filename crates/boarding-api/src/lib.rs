//! JSON procedure-call API for the boarding school catalog.
//!
//! Exposes an axum [`Router`] backed by any [`boarding_core::store::CatalogStore`].
//! Each procedure lives at `/<procedureName>`; queries answer `GET` and
//! `POST`, mutations only `POST`. Transport concerns such as CORS and request
//! tracing are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/rpc", boarding_api::api_router(store.clone()))
//! ```

pub mod blog;
pub mod error;
pub mod rpc;
pub mod schools;
pub mod users;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use boarding_core::store::CatalogStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: CatalogStore + 'static,
{
  Router::new()
    .route("/healthcheck", get(users::healthcheck).post(users::healthcheck))
    // Schools
    .route("/createBoardingSchool", post(schools::create::<S>))
    .route(
      "/getBoardingSchools",
      get(schools::list::<S>).post(schools::list::<S>),
    )
    .route(
      "/getBoardingSchoolById",
      get(schools::get_by_id::<S>).post(schools::get_by_id::<S>),
    )
    .route("/updateBoardingSchool", post(schools::update::<S>))
    .route("/deleteBoardingSchool", post(schools::delete::<S>))
    .route(
      "/getFeaturedSchools",
      get(schools::featured::<S>).post(schools::featured::<S>),
    )
    // Blog
    .route("/createBlogPost", post(blog::create::<S>))
    .route("/getBlogPosts", get(blog::list::<S>).post(blog::list::<S>))
    .route(
      "/getBlogPostBySlug",
      get(blog::get_by_slug::<S>).post(blog::get_by_slug::<S>),
    )
    .route("/updateBlogPost", post(blog::update::<S>))
    .route("/deleteBlogPost", post(blog::delete::<S>))
    // Users
    .route("/createUser", post(users::create::<S>))
    .route(
      "/getUserById",
      get(users::get_by_id::<S>).post(users::get_by_id::<S>),
    )
    .with_state(store)
}
