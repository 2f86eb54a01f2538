//! # climate-adapter-mqtt
//!
//! MQTT adapter: connects to the broker, subscribes to the sensor topics
//! and hands every publish to a [`TelemetryHandler`].
//!
//! ## Responsibilities
//! - Connect to an MQTT broker and keep the connection alive
//! - (Re)subscribe to the humidity and temperature topics on every CONNACK
//! - Queue inbound publishes in a bounded ring that evicts the oldest, and
//!   feed them to the handler sequentially
//! - Disconnect cleanly on shutdown
//!
//! ## Dependency rule
//! Same as other adapters: depends on `climate-app` for the port trait only.

mod config;
mod error;
mod subscriber;

pub use config::{MqttConfig, TopicsConfig};
pub use error::MqttError;

use std::sync::Arc;
use std::time::Duration;

use rumqttc::{AsyncClient, MqttOptions};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use climate_app::ports::TelemetryHandler;

/// How long [`MqttHandle::shutdown`] waits for the DISCONNECT to go out.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// Running MQTT subscription: the client plus its two background tasks.
pub struct MqttHandle {
    client: AsyncClient,
    event_loop: JoinHandle<()>,
    worker: JoinHandle<()>,
}

impl MqttHandle {
    /// Connect to the broker described by `config` and start delivering
    /// messages to `handler`.
    ///
    /// Returns immediately; the connection is established by the spawned
    /// event-loop task. Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`MqttError::InvalidConfig`] when `config` fails validation.
    pub fn start<H>(config: &MqttConfig, handler: Arc<H>) -> Result<Self, MqttError>
    where
        H: TelemetryHandler + 'static,
    {
        config.validate()?;

        let mut options = MqttOptions::new(
            config.client_id.clone(),
            config.broker_host.clone(),
            config.broker_port,
        );
        options.set_keep_alive(Duration::from_secs(u64::from(config.keep_alive_secs)));

        let (client, eventloop) = AsyncClient::new(options, 10);
        let (tx, rx) = broadcast::channel(config.queue_capacity);

        tracing::info!(
            host = %config.broker_host,
            port = config.broker_port,
            client_id = %config.client_id,
            "connecting to MQTT broker"
        );

        let event_loop = tokio::spawn(subscriber::run_event_loop(
            eventloop,
            client.clone(),
            config.subscriptions(),
            Duration::from_secs(u64::from(config.reconnect_delay_secs)),
            tx,
        ));
        let worker = tokio::spawn(subscriber::run_worker(handler, rx));

        Ok(Self {
            client,
            event_loop,
            worker,
        })
    }

    /// Send DISCONNECT, give the event loop a moment to flush it, then stop
    /// both tasks. A message being handled is abandoned.
    pub async fn shutdown(mut self) {
        if let Err(err) = self.client.try_disconnect() {
            tracing::warn!(%err, "failed to request MQTT disconnect");
        }
        if tokio::time::timeout(SHUTDOWN_GRACE, &mut self.event_loop)
            .await
            .is_err()
        {
            tracing::debug!("MQTT event loop did not stop in time, aborting");
            self.event_loop.abort();
        }
        self.worker.abort();
        tracing::info!("MQTT subscriber stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoopHandler;

    impl TelemetryHandler for NoopHandler {
        async fn handle_message(&self, _topic: &str, _payload: &[u8]) {}
    }

    #[tokio::test]
    async fn should_refuse_to_start_with_invalid_config() {
        let config = MqttConfig {
            broker_port: 0,
            ..MqttConfig::default()
        };
        let result = MqttHandle::start(&config, Arc::new(NoopHandler));
        assert!(matches!(result, Err(MqttError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn should_shut_down_without_a_broker() {
        let config = MqttConfig {
            broker_host: "127.0.0.1".to_string(),
            broker_port: 9,
            reconnect_delay_secs: 60,
            ..MqttConfig::default()
        };
        let handle = MqttHandle::start(&config, Arc::new(NoopHandler)).unwrap();
        handle.shutdown().await;
    }
}
