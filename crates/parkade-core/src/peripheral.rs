use thiserror::Error;

/// Reading pushed to displays alongside the bay count. The facility has no
/// real thermometer; this is the simulated value every snapshot carries.
pub const SIMULATED_TEMPERATURE: i32 = 42;

#[derive(Debug, Error)]
pub enum PeripheralError {
    #[error("display update failed: {0}")]
    UpdateFailed(String),
}

/// State pushed to every registered display when occupancy changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplaySnapshot {
    pub available_bays: u32,
    pub temperature: i32,
}

/// Sensor capability: a component that reports vehicle movement.
///
/// The core never invokes a sensor beyond classification at registration
/// time; `id` exists for logging and debugging.
pub trait Sensor: Send {
    fn id(&self) -> &str;
}

/// Display capability: a component that renders the current bay count and
/// temperature to drivers.
pub trait Display: Send {
    fn id(&self) -> &str;

    /// Receive a fresh snapshot. The core isolates failures here: an error
    /// is logged and never aborts the occupancy change that triggered it.
    fn update(&self, snapshot: &DisplaySnapshot) -> Result<(), PeripheralError>;
}

/// Registration surface for car park peripherals.
///
/// A peripheral advertises its capabilities through the view accessors,
/// both of which default to `None`. Registration classifies by asking for
/// each view in turn; display capability wins when both are advertised,
/// and a type advertising neither is rejected.
pub trait Peripheral: Send {
    fn as_sensor(&self) -> Option<&dyn Sensor> {
        None
    }

    fn as_display(&self) -> Option<&dyn Display> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BareSensor;

    impl Sensor for BareSensor {
        fn id(&self) -> &str {
            "bare"
        }
    }

    impl Peripheral for BareSensor {
        fn as_sensor(&self) -> Option<&dyn Sensor> {
            Some(self)
        }
    }

    #[test]
    fn default_views_are_none() {
        struct Nothing;
        impl Peripheral for Nothing {}
        let p = Nothing;
        assert!(p.as_sensor().is_none());
        assert!(p.as_display().is_none());
    }

    #[test]
    fn sensor_view_does_not_imply_display() {
        let p = BareSensor;
        assert!(p.as_sensor().is_some());
        assert!(p.as_display().is_none());
    }

    #[test]
    fn snapshot_is_plain_data() {
        let a = DisplaySnapshot {
            available_bays: 3,
            temperature: SIMULATED_TEMPERATURE,
        };
        let b = a;
        assert_eq!(a, b);
        assert_eq!(b.temperature, 42);
    }

    #[test]
    fn peripheral_error_display() {
        let e = PeripheralError::UpdateFailed("screen cracked".to_owned());
        assert!(e.to_string().contains("screen cracked"));
    }
}
