//! MQTT adapter error types.

/// Errors specific to the MQTT adapter.
#[derive(Debug, thiserror::Error)]
pub enum MqttError {
    /// The configuration cannot be used to connect.
    #[error("invalid MQTT configuration: {0}")]
    InvalidConfig(&'static str),

    /// The rumqttc client rejected a request.
    #[error("MQTT client error")]
    Client(#[from] rumqttc::ClientError),
}
