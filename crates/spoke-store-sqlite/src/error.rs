//! Error type for `spoke-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// A stored column could not be turned back into a domain value.
  #[error("corrupt {column} value {value:?}: {reason}")]
  Decode {
    column: &'static str,
    value:  String,
    reason: String,
  },
}

impl Error {
  pub(crate) fn decode(
    column: &'static str,
    value: impl Into<String>,
    reason: impl ToString,
  ) -> Self {
    Self::Decode { column, value: value.into(), reason: reason.to_string() }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
