//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `climate.toml` in the working directory, or at the path given in
//! `CLIMATE_CONFIG`. Connection and control settings have defaults; the two
//! comfort ranges and, for the Tapo backend, the plug addresses and account
//! credentials must be provided. Environment variables take precedence over
//! file values.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use climate_adapter_mqtt::{MqttConfig, MqttError};
use climate_adapter_tapo::TapoCredentials;
use climate_app::executor::RetryPolicy;
use climate_domain::error::ConfigurationError;
use climate_domain::range::Range;
use climate_domain::sensor::{ActuatorRole, SensorType};

const DEFAULT_PATH: &str = "climate.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Broker connection, topics and comfort ranges.
    pub mqtt: MqttSection,
    /// Relay backend and addressing.
    pub actuators: ActuatorsConfig,
    /// Retry schedule for actuation.
    pub control: ControlConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// The `[mqtt]` table: client settings plus the comfort ranges.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MqttSection {
    #[serde(flatten)]
    pub client: MqttConfig,
    pub ranges: RangesConfig,
}

/// Comfort band per sensor type, written as `[min, max]`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RangesConfig {
    pub humidity: Option<Range>,
    pub temperature: Option<Range>,
}

/// Which relay implementation drives the actuators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// TP-Link Tapo P100 smart plugs.
    #[default]
    Tapo,
    /// In-memory relays, nothing is switched for real.
    Virtual,
}

/// The `[actuators]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ActuatorsConfig {
    pub backend: Backend,
    /// IP address of the humidifier plug.
    pub humidifier_address: Option<String>,
    /// IP address of the heater plug.
    pub heater_address: Option<String>,
    /// Tapo account shared by both plugs.
    pub credentials: TapoCredentials,
}

/// The `[control]` table.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Attempts per convergence, including the first one.
    pub attempts: u32,
    /// Pause between two attempts, in milliseconds.
    pub backoff_ms: u64,
    /// Upper bound for a single query or command, in seconds.
    pub attempt_timeout_secs: u64,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `CLIMATE_CONFIG` or `climate.toml` (if
    /// present), apply environment-variable overrides, then validate.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if the resulting configuration is incomplete or invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("CLIMATE_CONFIG").unwrap_or_else(|_| DEFAULT_PATH.to_string());
        let mut config = Self::from_file(Path::new(&path))?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("CLIMATE_MQTT_HOST") {
            self.mqtt.client.broker_host = val;
        }
        if let Some(val) = lookup("CLIMATE_MQTT_PORT") {
            if let Ok(port) = val.parse() {
                self.mqtt.client.broker_port = port;
            }
        }
        if let Some(val) = lookup("TAPO_EMAIL") {
            self.actuators.credentials.username = val;
        }
        if let Some(val) = lookup("TAPO_PASSWORD") {
            self.actuators.credentials.password = val;
        }
        if let Some(val) = lookup("TAPO_IP_HUMIDIFIER") {
            self.actuators.humidifier_address = Some(val);
        }
        if let Some(val) = lookup("TAPO_IP_HEATER") {
            self.actuators.heater_address = Some(val);
        }
        if let Some(val) = lookup("CLIMATE_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = lookup("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.mqtt.client.validate()?;
        for sensor_type in SensorType::ALL {
            self.range_for(sensor_type)?;
        }
        self.retry_policy()?;
        if self.actuators.backend == Backend::Tapo {
            self.actuators.tapo_credentials()?;
            self.actuators.address_for(ActuatorRole::Humidifier)?;
            self.actuators.address_for(ActuatorRole::Heater)?;
        }
        Ok(())
    }

    /// Comfort range configured for `sensor_type`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingSetting`] when the range is absent.
    pub fn range_for(&self, sensor_type: SensorType) -> Result<Range, ConfigurationError> {
        let (range, setting) = match sensor_type {
            SensorType::Humidity => (self.mqtt.ranges.humidity, "mqtt.ranges.humidity"),
            SensorType::Temperature => (self.mqtt.ranges.temperature, "mqtt.ranges.temperature"),
        };
        range.ok_or(ConfigurationError::MissingSetting(setting))
    }

    /// Retry schedule built from the `[control]` table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::Invalid`] when `attempts` is zero.
    pub fn retry_policy(&self) -> Result<RetryPolicy, ConfigurationError> {
        RetryPolicy::new(
            self.control.attempts,
            Duration::from_millis(self.control.backoff_ms),
            Duration::from_secs(self.control.attempt_timeout_secs),
        )
        .map_err(|source| ConfigurationError::Invalid {
            setting: "control.attempts",
            source,
        })
    }
}

impl ActuatorsConfig {
    /// Plug address for the actuator playing `role`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingSetting`] when no non-empty
    /// address is configured.
    pub fn address_for(&self, role: ActuatorRole) -> Result<&str, ConfigurationError> {
        let (address, setting) = match role {
            ActuatorRole::Humidifier => (&self.humidifier_address, "actuators.humidifier_address"),
            ActuatorRole::Heater => (&self.heater_address, "actuators.heater_address"),
        };
        address
            .as_deref()
            .filter(|address| !address.is_empty())
            .ok_or(ConfigurationError::MissingSetting(setting))
    }

    /// Account credentials, required by the Tapo backend.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingSetting`] when the username or
    /// password is empty.
    pub fn tapo_credentials(&self) -> Result<&TapoCredentials, ConfigurationError> {
        if self.credentials.is_complete() {
            Ok(&self.credentials)
        } else {
            Err(ConfigurationError::MissingSetting("actuators.credentials"))
        }
    }
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            attempts: RetryPolicy::DEFAULT_ATTEMPTS,
            backoff_ms: 2000,
            attempt_timeout_secs: 10,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "climated=info,climate=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Broker settings rejected.
    #[error("invalid MQTT settings")]
    Mqtt(#[from] MqttError),
    /// Missing or invalid control setting.
    #[error("invalid configuration")]
    Settings(#[from] ConfigurationError),
}
