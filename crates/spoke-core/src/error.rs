//! Error types for `spoke-core`.

use std::fmt;

use thiserror::Error;

use crate::lifecycle::StockStatus;

/// The kind of record a [`Error::NotFound`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
  StockItem,
  Tag,
}

impl fmt::Display for Entity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::StockItem => "stock item",
      Self::Tag => "tag",
    })
  }
}

#[derive(Debug, Error)]
pub enum Error {
  /// Missing or malformed input; the caller should re-prompt.
  #[error("invalid input: {0}")]
  Validation(String),

  #[error("{0} not found: {1}")]
  NotFound(Entity, i64),

  #[error("stock item {id} is {status}, expected {expected}")]
  InvalidState {
    id:       i64,
    status:   StockStatus,
    expected: StockStatus,
  },

  /// Supporting data the operation relies on is absent.
  #[error("precondition failed: {0}")]
  Precondition(String),

  /// The backing store rejected the operation. Never retried.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
