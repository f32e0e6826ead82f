//! Durable append-only activity journal for Parkade.
//!
//! This crate provides the storage layer: the `ActivityLog` journal that
//! records one human-readable line per vehicle movement, and the `Action`
//! vocabulary those lines use. The journal file is created lazily and is
//! only ever appended to; nothing in this crate rewrites history.

pub mod activity;

pub use activity::{Action, ActivityLog};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("journal I/O error: {0}")]
    Io(#[from] std::io::Error),
}
