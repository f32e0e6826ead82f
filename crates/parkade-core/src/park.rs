use crate::peripheral::{Display, DisplaySnapshot, Peripheral, SIMULATED_TEMPERATURE};
use crate::CoreError;
use parkade_schema::config::{parse_config_file, write_config_file};
use parkade_schema::{CarParkConfig, Location, Plate};
use parkade_store::{Action, ActivityLog};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Journal destination used when construction does not name one.
pub const DEFAULT_LOG_FILE: &str = "log.txt";

/// Construction options beyond location and capacity.
#[derive(Default)]
pub struct ParkOptions {
    /// Journal destination; defaults to [`DEFAULT_LOG_FILE`] in the
    /// working directory.
    pub log_file: Option<PathBuf>,
    /// Vehicles already occupying bays when the park comes up.
    pub occupants: Vec<Plate>,
    /// Peripherals to admit at construction time. Each goes through the
    /// same capability classification as [`CarPark::register`].
    pub peripherals: Vec<Box<dyn Peripheral>>,
}

/// A single parking facility: identity, fixed capacity, current occupants,
/// registered peripherals, and a handle to the durable activity journal.
///
/// All operations are synchronous and run on the calling thread. Occupancy
/// mutation and the derived bay count are not atomic with respect to each
/// other, so concurrent use requires external locking.
pub struct CarPark {
    location: Location,
    capacity: u32,
    occupants: Vec<Plate>,
    sensors: Vec<Box<dyn Peripheral>>,
    displays: Vec<Box<dyn Peripheral>>,
    log: ActivityLog,
}

impl CarPark {
    /// Create a car park journaling to [`DEFAULT_LOG_FILE`], with no
    /// occupants or peripherals.
    pub fn new(location: impl Into<Location>, capacity: u32) -> Result<Self, CoreError> {
        Self::with_options(location, capacity, ParkOptions::default())
    }

    /// Create a car park with explicit options.
    ///
    /// The journal file is created empty if absent (an existing one is
    /// never truncated) before anything else happens; a missing parent
    /// directory therefore surfaces as a journal error here. Capacity is
    /// taken as given and never re-validated against occupancy.
    pub fn with_options(
        location: impl Into<Location>,
        capacity: u32,
        options: ParkOptions,
    ) -> Result<Self, CoreError> {
        let location = location.into();
        let log = ActivityLog::new(
            options
                .log_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
        );
        log.initialize()?;
        info!(
            "car park at {location}: {capacity} bays, journal {}",
            log.path().display()
        );

        let mut park = Self {
            location,
            capacity,
            occupants: options.occupants,
            sensors: Vec::new(),
            displays: Vec::new(),
            log,
        };
        for component in options.peripherals {
            park.register(component)?;
        }
        Ok(park)
    }

    #[inline]
    pub fn location(&self) -> &Location {
        &self.location
    }

    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Plates currently occupying bays, in entry order. Duplicates are
    /// legal: the same plate may hold several bays.
    #[inline]
    pub fn occupants(&self) -> &[Plate] {
        &self.occupants
    }

    pub fn occupant_count(&self) -> usize {
        self.occupants.len()
    }

    pub fn sensor_count(&self) -> usize {
        self.sensors.len()
    }

    pub fn display_count(&self) -> usize {
        self.displays.len()
    }

    #[inline]
    pub fn log(&self) -> &ActivityLog {
        &self.log
    }

    /// Bays still free: capacity minus occupant count, floored at zero.
    /// Recomputed on every call, never cached. Occupancy above capacity is
    /// legal and simply reads as zero here.
    pub fn available_bays(&self) -> u32 {
        self.capacity.saturating_sub(self.occupant_count_u32())
    }

    fn occupant_count_u32(&self) -> u32 {
        u32::try_from(self.occupants.len()).unwrap_or(u32::MAX)
    }

    /// Admit a peripheral, classifying it by capability view: displays join
    /// the display collection, remaining sensors join the sensor
    /// collection, and a component advertising neither is rejected with
    /// nothing changed. Display capability wins if both are advertised.
    pub fn register(&mut self, component: Box<dyn Peripheral>) -> Result<(), CoreError> {
        if let Some(disp) = component.as_display() {
            debug!("registered display '{}'", disp.id());
            self.displays.push(component);
        } else if let Some(sensor) = component.as_sensor() {
            debug!("registered sensor '{}'", sensor.id());
            self.sensors.push(component);
        } else {
            return Err(CoreError::InvalidComponent);
        }
        Ok(())
    }

    /// Admit a vehicle: append the plate to the occupants, refresh every
    /// display, then journal the entry. No capacity check is made — the
    /// park may oversubscribe, and [`available_bays`](Self::available_bays)
    /// floors at zero. The same plate may be admitted repeatedly.
    ///
    /// The journal write runs last, so a journal failure surfaces after
    /// the occupancy change and display updates have already taken effect.
    pub fn add_car(&mut self, plate: impl Into<Plate>) -> Result<(), CoreError> {
        let plate = plate.into();
        self.occupants.push(plate.clone());
        info!("{plate} entered car park at {}", self.location);
        self.update_displays();
        self.log.append(&plate, Action::Entered)?;
        Ok(())
    }

    /// Release one bay: the earliest occurrence of the plate leaves. An
    /// absent plate fails with [`CoreError::PlateNotFound`] before any
    /// mutation, display refresh, or journal write. Journal ordering
    /// mirrors [`add_car`](Self::add_car).
    pub fn remove_car(&mut self, plate: impl Into<Plate>) -> Result<(), CoreError> {
        let plate = plate.into();
        let Some(index) = self.occupants.iter().position(|p| *p == plate) else {
            return Err(CoreError::PlateNotFound(plate));
        };
        self.occupants.remove(index);
        info!("{plate} exited car park at {}", self.location);
        self.update_displays();
        self.log.append(&plate, Action::Exited)?;
        Ok(())
    }

    /// Push the current snapshot to every display in registration order.
    /// A failing display is logged and skipped; later displays and the
    /// caller's journal write still proceed.
    fn update_displays(&self) {
        let snapshot = DisplaySnapshot {
            available_bays: self.available_bays(),
            temperature: SIMULATED_TEMPERATURE,
        };
        for peripheral in &self.displays {
            // Admission guarantees the display view exists.
            let Some(disp) = peripheral.as_display() else {
                continue;
            };
            match disp.update(&snapshot) {
                Ok(()) => debug!(
                    "updated display '{}': {} bays available",
                    disp.id(),
                    snapshot.available_bays
                ),
                Err(e) => warn!("display '{}' update failed: {e}", disp.id()),
            }
        }
    }

    /// Stable human-readable description, for display and debug only.
    pub fn describe(&self) -> String {
        self.to_string()
    }

    /// Snapshot the persistent identity of this car park: location,
    /// capacity, and journal path. Occupants and peripherals are
    /// deliberately excluded from the record.
    pub fn export(&self) -> CarParkConfig {
        CarParkConfig {
            location: self.location.to_string(),
            capacity: self.capacity,
            log_file: self.log.path().display().to_string(),
        }
    }

    /// Rebuild a car park from a configuration record. Occupants and
    /// peripherals start empty regardless of what the exporting park held;
    /// the journal file is materialized like any other construction.
    pub fn import(config: &CarParkConfig) -> Result<Self, CoreError> {
        Self::with_options(
            config.location.as_str(),
            config.capacity,
            ParkOptions {
                log_file: Some(PathBuf::from(&config.log_file)),
                ..ParkOptions::default()
            },
        )
    }

    /// Write this car park's configuration record to a TOML file.
    pub fn save_config(&self, path: impl AsRef<Path>) -> Result<(), CoreError> {
        write_config_file(&self.export(), path)?;
        Ok(())
    }

    /// Load a configuration record from a TOML file and rebuild the car
    /// park it describes.
    pub fn load_config(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let config = parse_config_file(path)?;
        Self::import(&config)
    }
}

impl fmt::Debug for CarPark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarPark")
            .field("location", &self.location)
            .field("capacity", &self.capacity)
            .field("occupants", &self.occupants)
            .field("sensors", &self.sensors.len())
            .field("displays", &self.displays.len())
            .field("log", &self.log.path())
            .finish()
    }
}

impl fmt::Display for CarPark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Welcome to car park at {}, with {} bays.",
            self.location, self.capacity
        )
    }
}
