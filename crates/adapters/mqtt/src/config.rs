//! MQTT connection and subscription configuration.

use serde::Deserialize;

use crate::error::MqttError;

const MAX_QUEUE_CAPACITY: usize = 1024;

/// Configuration for the MQTT subscriber.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MqttConfig {
    /// MQTT broker hostname or IP address.
    pub broker_host: String,
    /// MQTT broker port.
    pub broker_port: u16,
    /// MQTT client identifier.
    pub client_id: String,
    /// Keep-alive interval in seconds.
    pub keep_alive_secs: u16,
    /// Pause before polling again after a connection error, in seconds.
    pub reconnect_delay_secs: u16,
    /// Messages buffered while a previous one is still being handled (rounded
    /// up to a power of two). Beyond that the oldest buffered message is
    /// evicted.
    pub queue_capacity: usize,
    /// Sensor topics to subscribe to.
    pub topics: TopicsConfig,
}

/// Topic names, one per sensor type.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TopicsConfig {
    pub humidity_topic: String,
    pub temperature_topic: String,
}

impl MqttConfig {
    /// Distinct topics to subscribe to, in a stable order.
    #[must_use]
    pub fn subscriptions(&self) -> Vec<String> {
        let mut topics = vec![
            self.topics.humidity_topic.clone(),
            self.topics.temperature_topic.clone(),
        ];
        topics.dedup();
        topics
    }

    /// Check the settings rumqttc would otherwise reject at runtime.
    ///
    /// # Errors
    ///
    /// Returns [`MqttError::InvalidConfig`] for an empty host or topic, a zero
    /// port, a keep-alive under 5 seconds, or a queue capacity outside `1..=1024`.
    pub fn validate(&self) -> Result<(), MqttError> {
        if self.broker_host.is_empty() {
            return Err(MqttError::InvalidConfig("broker_host must not be empty"));
        }
        if self.broker_port == 0 {
            return Err(MqttError::InvalidConfig("broker_port must be non-zero"));
        }
        if self.keep_alive_secs < 5 {
            return Err(MqttError::InvalidConfig(
                "keep_alive_secs must be at least 5",
            ));
        }
        if self.queue_capacity == 0 || self.queue_capacity > MAX_QUEUE_CAPACITY {
            return Err(MqttError::InvalidConfig(
                "queue_capacity must be between 1 and 1024",
            ));
        }
        if self.topics.humidity_topic.is_empty() || self.topics.temperature_topic.is_empty() {
            return Err(MqttError::InvalidConfig("sensor topics must not be empty"));
        }
        Ok(())
    }
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            broker_host: "localhost".to_string(),
            broker_port: 1883,
            client_id: "climate-control".to_string(),
            keep_alive_secs: 60,
            reconnect_delay_secs: 5,
            queue_capacity: 2,
            topics: TopicsConfig::default(),
        }
    }
}

impl Default for TopicsConfig {
    fn default() -> Self {
        Self {
            humidity_topic: "home/sensors/humidity".to_string(),
            temperature_topic: "home/sensors/temperature".to_string(),
        }
    }
}
