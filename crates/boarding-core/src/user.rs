//! User accounts. Users only exist to author blog posts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoStaticStr};

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UserRole {
  Admin,
  #[default]
  User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
  pub id:         i64,
  pub email:      String,
  pub name:       String,
  pub role:       UserRole,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Input to [`crate::store::CatalogStore::create_user`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserInput {
  pub email: String,
  pub name:  String,
  #[serde(default)]
  pub role:  UserRole,
}

impl CreateUserInput {
  pub fn new(email: impl Into<String>, name: impl Into<String>, role: UserRole) -> Self {
    Self { email: email.into(), name: name.into(), role }
  }
}
