//! The `CatalogStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `boarding-store-sqlite`). The RPC layer depends on this abstraction, not on
//! any concrete backend.

use std::future::Future;

use crate::{
  blog::{BlogPost, CreateBlogPostInput, GetBlogPostsInput, UpdateBlogPostInput},
  school::{
    BoardingSchool, BoardingSchoolWithRelations, CreateBoardingSchoolInput,
    FilterSchoolsInput, UpdateBoardingSchoolInput,
  },
  user::{CreateUserInput, User},
};

/// Abstraction over a catalog store backend.
///
/// Inputs are assumed to have passed [`crate::Validate`]; backends only
/// enforce referential and uniqueness rules. Backend errors convert into
/// [`crate::Error`] so callers can tell "not found" from "conflict" from an
/// internal failure.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait CatalogStore: Send + Sync {
  type Error: std::error::Error + Into<crate::Error> + Send + Sync + 'static;

  // ── Schools ───────────────────────────────────────────────────────────

  /// Insert a school and its sport and scholarship rows atomically. Returns
  /// the school without relations.
  fn create_school(
    &self,
    input: CreateBoardingSchoolInput,
  ) -> impl Future<Output = Result<BoardingSchool, Self::Error>> + Send + '_;

  /// List schools matching `filter`, paginated, in insertion order.
  fn list_schools<'a>(
    &'a self,
    filter: &'a FilterSchoolsInput,
  ) -> impl Future<Output = Result<Vec<BoardingSchool>, Self::Error>> + Send + 'a;

  /// Retrieve a school with its sports and scholarships. Returns `None` if
  /// not found.
  fn get_school(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<BoardingSchoolWithRelations>, Self::Error>>
  + Send
  + '_;

  /// Apply a sparse update, replacing sports and scholarships when given.
  ///
  /// Runs in one transaction. Fails with
  /// [`crate::Error::SchoolNotFound`] without touching any association rows
  /// if the school does not exist.
  fn update_school(
    &self,
    input: UpdateBoardingSchoolInput,
  ) -> impl Future<Output = Result<BoardingSchool, Self::Error>> + Send + '_;

  /// Delete a school and, by cascade, its associations. Returns `false`
  /// rather than an error if there was nothing to delete.
  fn delete_school(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// All featured schools, most recently updated first.
  fn featured_schools(
    &self,
  ) -> impl Future<Output = Result<Vec<BoardingSchool>, Self::Error>> + Send + '_;

  // ── Blog posts ────────────────────────────────────────────────────────

  /// Create a post. The author must exist and be an admin, and the slug
  /// must be unused.
  fn create_blog_post(
    &self,
    input: CreateBlogPostInput,
  ) -> impl Future<Output = Result<BlogPost, Self::Error>> + Send + '_;

  /// Newest posts first, optionally restricted to published ones.
  fn list_blog_posts<'a>(
    &'a self,
    query: &'a GetBlogPostsInput,
  ) -> impl Future<Output = Result<Vec<BlogPost>, Self::Error>> + Send + 'a;

  /// Exact slug lookup, regardless of published state.
  fn get_blog_post_by_slug<'a>(
    &'a self,
    slug: &'a str,
  ) -> impl Future<Output = Result<Option<BlogPost>, Self::Error>> + Send + 'a;

  /// Apply a sparse update. Slug uniqueness and author role are not
  /// re-checked beyond what the schema enforces.
  fn update_blog_post(
    &self,
    input: UpdateBlogPostInput,
  ) -> impl Future<Output = Result<BlogPost, Self::Error>> + Send + '_;

  /// Delete a post. Unlike [`CatalogStore::delete_school`], a missing post is
  /// an error.
  fn delete_blog_post(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Register a user. Fails if the email is already taken.
  fn create_user(
    &self,
    input: CreateUserInput,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  /// Retrieve a user by id. Returns `None` if not found.
  fn get_user(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;
}
