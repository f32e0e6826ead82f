use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("capacity is not a non-negative integer: '{0}'")]
    InvalidCapacity(String),
}

/// Persisted configuration record for a car park.
///
/// Exactly three fields survive serialization: the location label, the fixed
/// capacity, and the activity journal path. Occupants and registered
/// peripherals are never part of this snapshot. Unknown keys in a stored
/// record are ignored rather than rejected.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CarParkConfig {
    pub location: String,
    pub capacity: u32,
    pub log_file: String,
}

#[derive(Deserialize)]
struct RawConfig {
    location: String,
    capacity: RawCapacity,
    log_file: String,
}

/// Stored records may carry capacity as an integer or a quoted integer.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCapacity {
    Number(u32),
    Text(String),
}

impl RawCapacity {
    fn coerce(self) -> Result<u32, ConfigError> {
        match self {
            RawCapacity::Number(n) => Ok(n),
            RawCapacity::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidCapacity(s)),
        }
    }
}

pub fn parse_config_str(input: &str) -> Result<CarParkConfig, ConfigError> {
    let raw: RawConfig = toml::from_str(input)?;
    Ok(CarParkConfig {
        location: raw.location,
        capacity: raw.capacity.coerce()?,
        log_file: raw.log_file,
    })
}

pub fn parse_config_file(path: impl AsRef<Path>) -> Result<CarParkConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config_str(&content)
}

pub fn write_config_file(
    config: &CarParkConfig,
    path: impl AsRef<Path>,
) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let input = r#"
location = "Moondalup"
capacity = 100
log_file = "moondalup.txt"
"#;
        let config = parse_config_str(input).expect("should parse");
        assert_eq!(config.location, "Moondalup");
        assert_eq!(config.capacity, 100);
        assert_eq!(config.log_file, "moondalup.txt");
    }

    #[test]
    fn capacity_as_string_coerces() {
        let input = r#"
location = "City Square"
capacity = "120"
log_file = "log.txt"
"#;
        let config = parse_config_str(input).expect("should parse");
        assert_eq!(config.capacity, 120);
    }

    #[test]
    fn capacity_garbage_string_fails() {
        let input = r#"
location = "City Square"
capacity = "plenty"
log_file = "log.txt"
"#;
        let err = parse_config_str(input).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidCapacity(_)));
        assert!(err.to_string().contains("plenty"));
    }

    #[test]
    fn negative_capacity_fails() {
        let input = r#"
location = "City Square"
capacity = -3
log_file = "log.txt"
"#;
        assert!(parse_config_str(input).is_err());
    }

    #[test]
    fn rejects_missing_capacity() {
        let input = r#"
location = "City Square"
log_file = "log.txt"
"#;
        let err = parse_config_str(input).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_missing_location() {
        let input = r#"
capacity = 10
log_file = "log.txt"
"#;
        assert!(parse_config_str(input).is_err());
    }

    #[test]
    fn rejects_missing_log_file() {
        let input = r#"
location = "City Square"
capacity = 10
"#;
        assert!(parse_config_str(input).is_err());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let input = r#"
location = "Moondalup"
capacity = 5
log_file = "log.txt"
operator = "ACME Parking Pty Ltd"
"#;
        let config = parse_config_str(input).expect("unknown keys must not be fatal");
        assert_eq!(config.capacity, 5);
    }

    #[test]
    fn file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("park.toml");
        let config = CarParkConfig {
            location: "Moondalup".to_owned(),
            capacity: 42,
            log_file: "moondalup.txt".to_owned(),
        };
        write_config_file(&config, &path).unwrap();
        let back = parse_config_file(&path).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn parse_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse_config_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
