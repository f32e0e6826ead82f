//! Mock peripherals for tests and for running the core without hardware.

use crate::peripheral::{Display, DisplaySnapshot, Peripheral, PeripheralError, Sensor};
use std::sync::{Arc, Mutex};

/// Sensor-capability peripheral with no behavior beyond identification.
pub struct MockSensor {
    id: String,
}

impl MockSensor {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Sensor for MockSensor {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Peripheral for MockSensor {
    fn as_sensor(&self) -> Option<&dyn Sensor> {
        Some(self)
    }
}

/// Display-capability peripheral that records every snapshot it receives.
///
/// Clones share the recorded history, so a test can keep one handle and
/// register the other with a `CarPark`. `failing` builds a display whose
/// updates always error, for exercising per-display failure isolation.
#[derive(Clone)]
pub struct MockDisplay {
    id: String,
    fail: bool,
    updates: Arc<Mutex<Vec<DisplaySnapshot>>>,
}

impl MockDisplay {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fail: false,
            updates: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(id: impl Into<String>) -> Self {
        Self {
            fail: true,
            ..Self::new(id)
        }
    }

    /// Every snapshot received so far, oldest first.
    pub fn updates(&self) -> Vec<DisplaySnapshot> {
        self.updates.lock().map(|u| u.clone()).unwrap_or_default()
    }
}

impl Display for MockDisplay {
    fn id(&self) -> &str {
        &self.id
    }

    fn update(&self, snapshot: &DisplaySnapshot) -> Result<(), PeripheralError> {
        if self.fail {
            return Err(PeripheralError::UpdateFailed(format!(
                "display '{}' is offline",
                self.id
            )));
        }
        let mut updates = self
            .updates
            .lock()
            .map_err(|e| PeripheralError::UpdateFailed(format!("mutex poisoned: {e}")))?;
        updates.push(*snapshot);
        Ok(())
    }
}

impl Peripheral for MockDisplay {
    fn as_display(&self) -> Option<&dyn Display> {
        Some(self)
    }
}

/// A peripheral advertising neither capability. Registration must reject it.
pub struct NullPeripheral;

impl Peripheral for NullPeripheral {}
