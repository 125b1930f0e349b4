//! Blog post procedures.
//!
//! Author checks (existence, admin role, slug uniqueness) live in the store
//! so they run in the same transaction as the insert.

use std::sync::Arc;

use axum::extract::State;
use boarding_core::{
  Validate,
  blog::{BlogPost, CreateBlogPostInput, GetBlogPostsInput, UpdateBlogPostInput},
  store::CatalogStore,
};

use crate::{
  error::{ApiError, store_error},
  rpc::{Rpc, RpcInput, Success},
};

/// `createBlogPost`
pub async fn create<S: CatalogStore>(
  State(store): State<Arc<S>>,
  input: RpcInput<CreateBlogPostInput>,
) -> Result<Rpc<BlogPost>, ApiError> {
  let input = input.required()?;
  input.validate()?;
  let post = store.create_blog_post(input).await.map_err(store_error)?;
  tracing::info!(id = post.id, slug = %post.slug, "created blog post");
  Ok(Rpc(post))
}

/// `getBlogPosts`; published posts only unless asked otherwise.
pub async fn list<S: CatalogStore>(
  State(store): State<Arc<S>>,
  RpcInput(query): RpcInput<GetBlogPostsInput>,
) -> Result<Rpc<Vec<BlogPost>>, ApiError> {
  let query = query.unwrap_or_default();
  query.validate()?;
  let posts = store.list_blog_posts(&query).await.map_err(store_error)?;
  Ok(Rpc(posts))
}

/// `getBlogPostBySlug`; drafts are returned too.
pub async fn get_by_slug<S: CatalogStore>(
  State(store): State<Arc<S>>,
  input: RpcInput<String>,
) -> Result<Rpc<Option<BlogPost>>, ApiError> {
  let slug = input.required()?;
  let post = store
    .get_blog_post_by_slug(&slug)
    .await
    .map_err(store_error)?;
  Ok(Rpc(post))
}

/// `updateBlogPost`
pub async fn update<S: CatalogStore>(
  State(store): State<Arc<S>>,
  input: RpcInput<UpdateBlogPostInput>,
) -> Result<Rpc<BlogPost>, ApiError> {
  let input = input.required()?;
  input.validate()?;
  let post = store.update_blog_post(input).await.map_err(store_error)?;
  tracing::info!(id = post.id, "updated blog post");
  Ok(Rpc(post))
}

/// `deleteBlogPost`; unlike schools, an unknown id is `NOT_FOUND`.
pub async fn delete<S: CatalogStore>(
  State(store): State<Arc<S>>,
  input: RpcInput<i64>,
) -> Result<Rpc<Success>, ApiError> {
  let id = input.required()?;
  store.delete_blog_post(id).await.map_err(store_error)?;
  tracing::info!(id, "deleted blog post");
  Ok(Rpc(Success { success: true }))
}
