//! Device directory: the static sensor type → (actuator, range) table.
//!
//! Built once at startup and never mutated. Exactly one entry per
//! [`SensorType`]; [`DeviceDirectoryBuilder::build`] refuses anything else so
//! the service never starts with an incomplete table.

use std::collections::HashMap;

use climate_domain::error::ConfigurationError;
use climate_domain::range::Range;
use climate_domain::sensor::{ActuatorRole, SensorType};

/// The actuator and tolerance band assigned to one sensor type.
#[derive(Debug)]
pub struct DirectoryEntry<A> {
    role: ActuatorRole,
    actuator: A,
    range: Range,
}

impl<A> DirectoryEntry<A> {
    #[must_use]
    pub fn role(&self) -> ActuatorRole {
        self.role
    }

    #[must_use]
    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    #[must_use]
    pub fn range(&self) -> Range {
        self.range
    }
}

/// Read-only lookup table from sensor type to its directory entry.
#[derive(Debug)]
pub struct DeviceDirectory<A> {
    entries: HashMap<SensorType, DirectoryEntry<A>>,
}

impl<A> DeviceDirectory<A> {
    /// Start building a directory.
    #[must_use]
    pub fn builder() -> DeviceDirectoryBuilder<A> {
        DeviceDirectoryBuilder {
            entries: HashMap::new(),
            duplicate: None,
        }
    }

    /// Entry for `sensor_type`, or `None` if the type has no entry.
    #[must_use]
    pub fn lookup(&self, sensor_type: SensorType) -> Option<&DirectoryEntry<A>> {
        self.entries.get(&sensor_type)
    }

    /// Directory with only the given entries, bypassing completeness checks.
    #[cfg(test)]
    pub(crate) fn partial(entries: Vec<(SensorType, A, Range)>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(ty, actuator, range)| {
                (
                    ty,
                    DirectoryEntry {
                        role: ty.actuator_role(),
                        actuator,
                        range,
                    },
                )
            })
            .collect();
        Self { entries }
    }
}

/// Step-by-step builder for [`DeviceDirectory`].
pub struct DeviceDirectoryBuilder<A> {
    entries: HashMap<SensorType, DirectoryEntry<A>>,
    duplicate: Option<SensorType>,
}

impl<A> DeviceDirectoryBuilder<A> {
    /// Assign `actuator` and `range` to `sensor_type`.
    #[must_use]
    pub fn entry(mut self, sensor_type: SensorType, actuator: A, range: Range) -> Self {
        let entry = DirectoryEntry {
            role: sensor_type.actuator_role(),
            actuator,
            range,
        };
        if self.entries.insert(sensor_type, entry).is_some() && self.duplicate.is_none() {
            self.duplicate = Some(sensor_type);
        }
        self
    }

    /// Consume the builder and check that every sensor type has exactly one
    /// entry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::DuplicateEntry`] if a sensor type was
    /// assigned twice, or [`ConfigurationError::MissingEntry`] for the first
    /// sensor type without an entry.
    pub fn build(self) -> Result<DeviceDirectory<A>, ConfigurationError> {
        if let Some(sensor_type) = self.duplicate {
            return Err(ConfigurationError::DuplicateEntry(sensor_type));
        }
        if let Some(missing) = SensorType::ALL
            .into_iter()
            .find(|ty| !self.entries.contains_key(ty))
        {
            return Err(ConfigurationError::MissingEntry(missing));
        }
        Ok(DeviceDirectory {
            entries: self.entries,
        })
    }
}
