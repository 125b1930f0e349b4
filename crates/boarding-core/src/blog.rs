//! Blog posts.
//!
//! Posts are addressed externally by `slug`, which is unique across all
//! posts. Only admins may author a post; that is checked when the post is
//! created and never again.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
  pub id:                 i64,
  pub title:              String,
  pub slug:               String,
  /// Rich text (HTML). Stored and returned verbatim.
  pub content:            String,
  pub excerpt:            Option<String>,
  pub featured_image_url: Option<String>,
  pub is_published:       bool,
  pub author_id:          i64,
  pub created_at:         DateTime<Utc>,
  pub updated_at:         DateTime<Utc>,
}

/// Input to [`crate::store::CatalogStore::create_blog_post`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBlogPostInput {
  pub title:              String,
  pub slug:               String,
  pub content:            String,
  pub excerpt:            Option<String>,
  pub featured_image_url: Option<String>,
  #[serde(default)]
  pub is_published:       bool,
  pub author_id:          i64,
}

impl CreateBlogPostInput {
  /// Convenience constructor for an unpublished post with no excerpt or image.
  pub fn new(
    title: impl Into<String>,
    slug: impl Into<String>,
    content: impl Into<String>,
    author_id: i64,
  ) -> Self {
    Self {
      title: title.into(),
      slug: slug.into(),
      content: content.into(),
      excerpt: None,
      featured_image_url: None,
      is_published: false,
      author_id,
    }
  }
}

/// Input to [`crate::store::CatalogStore::update_blog_post`]. Absent fields
/// are left unchanged; `Some(None)` clears a nullable column.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBlogPostInput {
  pub id:                 i64,
  #[serde(
    default,
    deserialize_with = "crate::nullable::non_null",
    skip_serializing_if = "Option::is_none"
  )]
  pub title:              Option<String>,
  #[serde(
    default,
    deserialize_with = "crate::nullable::non_null",
    skip_serializing_if = "Option::is_none"
  )]
  pub slug:               Option<String>,
  #[serde(
    default,
    deserialize_with = "crate::nullable::non_null",
    skip_serializing_if = "Option::is_none"
  )]
  pub content:            Option<String>,
  #[serde(
    default,
    deserialize_with = "crate::nullable::deserialize",
    skip_serializing_if = "Option::is_none"
  )]
  pub excerpt:            Option<Option<String>>,
  #[serde(
    default,
    deserialize_with = "crate::nullable::deserialize",
    skip_serializing_if = "Option::is_none"
  )]
  pub featured_image_url: Option<Option<String>>,
  #[serde(
    default,
    deserialize_with = "crate::nullable::non_null",
    skip_serializing_if = "Option::is_none"
  )]
  pub is_published:       Option<bool>,
}

impl UpdateBlogPostInput {
  pub fn new(id: i64) -> Self { Self { id, ..Self::default() } }
}

fn default_true() -> bool { true }

fn default_post_limit() -> u32 { 10 }

/// Input to [`crate::store::CatalogStore::list_blog_posts`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetBlogPostsInput {
  #[serde(default = "default_true")]
  pub published_only: bool,
  #[serde(default = "default_post_limit")]
  pub limit:          u32,
  #[serde(default)]
  pub offset:         u32,
}

impl Default for GetBlogPostsInput {
  fn default() -> Self {
    Self {
      published_only: true,
      limit:          default_post_limit(),
      offset:         0,
    }
  }
}
