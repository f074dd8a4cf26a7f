//! Core types, the store trait and the inventory workflow for Spoke.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod dashboard;
pub mod error;
pub mod id;
pub mod label;
pub mod lifecycle;
pub mod memory;
pub mod stock;
pub mod store;
pub mod tag;
pub mod workflow;

pub use error::{Error, Result};
pub use workflow::Inventory;
