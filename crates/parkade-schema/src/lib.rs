//! Configuration records and identifier newtypes for Parkade.
//!
//! This crate defines the schema layer: the persisted car park configuration
//! record (`CarParkConfig`), TOML parsing and serialization helpers, and the
//! string newtypes (`Plate`, `Location`) shared by the rest of the workspace.

pub mod config;
pub mod types;

pub use config::{
    parse_config_file, parse_config_str, write_config_file, CarParkConfig, ConfigError,
};
pub use types::{Location, Plate};
