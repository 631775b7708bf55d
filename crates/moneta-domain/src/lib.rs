//! moneta-domain
//!
//! Pure domain models (Workspace, Account, Category, Transaction) and the
//! calendar primitives the reporting core is built on. No I/O, no storage.
//! Only data types and core enums.

pub mod account;
pub mod category;
pub mod common;
pub mod report;
pub mod transaction;
pub mod workspace;

pub use account::*;
pub use category::*;
pub use common::*;
pub use report::*;
pub use transaction::*;
pub use workspace::*;
