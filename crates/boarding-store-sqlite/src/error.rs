//! Error type for `boarding-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A domain failure: missing row, uniqueness conflict, role check.
  #[error(transparent)]
  Core(#[from] boarding_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("unexpected {column} value in database: {value:?}")]
  UnknownValue { column: &'static str, value: String },
}

impl From<Error> for boarding_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::Core(inner) => inner,
      other => boarding_core::Error::Store(Box::new(other)),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
