//! Telemetry port: where a pub/sub transport hands over inbound messages.
//!
//! The MQTT adapter owns the broker connection and subscriptions; for every
//! publish on a subscribed topic it calls [`TelemetryHandler::handle_message`].
//! The handler never fails: bad messages are reported and dropped.

use std::future::Future;

/// Consumer of raw inbound sensor messages.
pub trait TelemetryHandler: Send + Sync {
    /// Process one message. Completes once the resulting actuation (if any)
    /// has converged or given up.
    fn handle_message(&self, topic: &str, payload: &[u8]) -> impl Future<Output = ()> + Send;
}
