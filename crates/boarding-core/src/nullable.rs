//! Serde helpers for optional fields in partial updates.
//!
//! Use together with `#[serde(default)]` so a missing key stays `None`.
//! [`deserialize`] is for nullable columns: an explicit `null` becomes
//! `Some(None)` and a value becomes `Some(Some(v))`. [`non_null`] is for
//! fields that may be omitted but never set to `null`; `null` is a type
//! error.

use serde::{Deserialize, Deserializer};

pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
  T: Deserialize<'de>,
  D: Deserializer<'de>,
{
  Option::<T>::deserialize(deserializer).map(Some)
}

pub fn non_null<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
  T: Deserialize<'de>,
  D: Deserializer<'de>,
{
  T::deserialize(deserializer).map(Some)
}
