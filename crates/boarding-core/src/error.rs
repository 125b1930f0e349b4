//! Error types for `boarding-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("boarding school not found: {0}")]
  SchoolNotFound(i64),

  #[error("blog post not found: {0}")]
  BlogPostNotFound(i64),

  #[error("user not found: {0}")]
  UserNotFound(i64),

  #[error("a blog post with slug {0:?} already exists")]
  SlugTaken(String),

  #[error("a user with email {0:?} is already registered")]
  EmailTaken(String),

  #[error("user {0} is not an admin and cannot author blog posts")]
  NotAdmin(i64),

  #[error("invalid input: {0}")]
  Validation(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Coarse classification of an [`Error`], used by transports to pick a
/// status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  NotFound,
  Conflict,
  PermissionDenied,
  Validation,
  Internal,
}

impl Error {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::SchoolNotFound(_) | Self::BlogPostNotFound(_) | Self::UserNotFound(_) => {
        ErrorKind::NotFound
      }
      Self::SlugTaken(_) | Self::EmailTaken(_) => ErrorKind::Conflict,
      Self::NotAdmin(_) => ErrorKind::PermissionDenied,
      Self::Validation(_) => ErrorKind::Validation,
      Self::Store(_) => ErrorKind::Internal,
    }
  }

  pub(crate) fn invalid(field: &str, reason: &str) -> Self {
    Self::Validation(format!("{field}: {reason}"))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
