//! Core car park entity for Parkade.
//!
//! This crate ties together the schema and store layers into `CarPark` — the
//! central API for admitting and releasing vehicles, registering peripheral
//! components (sensors and displays), deriving available-bay counts, and
//! exporting/importing the persisted configuration record.

pub mod mock;
pub mod park;
pub mod peripheral;

pub use mock::{MockDisplay, MockSensor, NullPeripheral};
pub use park::{CarPark, ParkOptions, DEFAULT_LOG_FILE};
pub use peripheral::{
    Display, DisplaySnapshot, Peripheral, PeripheralError, Sensor, SIMULATED_TEMPERATURE,
};

use parkade_schema::Plate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid component: neither sensor nor display capability")]
    InvalidComponent,
    #[error("plate not found: {0}")]
    PlateNotFound(Plate),
    #[error("config error: {0}")]
    Config(#[from] parkade_schema::ConfigError),
    #[error("journal error: {0}")]
    Store(#[from] parkade_store::StoreError),
}
