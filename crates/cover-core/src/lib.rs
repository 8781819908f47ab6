//! cover-core: warranty model, status math, list composition, backup
//! codec, reminder policy, and the SQLite store behind the `cvr` CLI.
//!
//! # Conventions
//!
//! - **Errors**: typed [`error::Error`] inside the core; `anyhow::Result`
//!   with context at file/database boundaries.
//! - **Logging**: `tracing` macros (`info!`, `warn!`, `debug!`).
//! - **Time**: never read the system clock in logic — take a
//!   [`clock::Clock`] or an explicit `today`.

pub mod backup;
pub mod clock;
pub mod config;
pub mod db;
pub mod error;
pub mod list;
pub mod model;
pub mod observe;
pub mod ops;
pub mod remind;
pub mod status;
pub mod store;

pub use error::{Error, ErrorCode};
pub use model::{WarrantyFilter, WarrantyItem, WarrantyStatus};
pub use observe::WarrantySnapshot;
