//! moneta-core
//!
//! Business logic for the dashboard/reporting engine: scope resolution,
//! aggregation, and report assembly over a read-only [`store::LedgerStore`].
//! Depends on moneta-domain. No CLI, no terminal I/O, no direct storage
//! interactions.

pub mod aggregate;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod scope;
pub mod store;
#[cfg(test)]
pub(crate) mod testutil;
pub mod time;

pub use aggregate::*;
pub use config::*;
pub use dashboard::*;
pub use error::{CoreError, CoreResult};
pub use scope::*;
pub use store::*;
pub use time::*;
