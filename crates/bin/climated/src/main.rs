//! # climated: climate control daemon
//!
//! Composition root that wires the MQTT subscriber, the control core and the
//! relays together.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Install the `tracing` subscriber
//! - Build one relay per actuator role for the configured backend
//! - Build the device directory and control context, once
//! - Subscribe to the sensor topics and hand every message to the intake
//! - Disconnect cleanly on Ctrl-C
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no control logic belongs here.

mod config;
mod relay;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use climate_adapter_mqtt::MqttHandle;
use climate_app::context::ControlContext;
use climate_app::directory::DeviceDirectory;
use climate_app::executor::ActuationExecutor;
use climate_app::intake::TelemetryIntake;
use climate_app::ports::{Actuator, TokioDelay};
use climate_domain::sensor::SensorType;

use crate::config::Config;
use crate::relay::Relay;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Directory
    let mut builder = DeviceDirectory::builder();
    for sensor_type in SensorType::ALL {
        let role = sensor_type.actuator_role();
        let relay = Relay::from_config(&config.actuators, role)?;
        let range = config.range_for(sensor_type)?;
        tracing::info!(%sensor_type, %role, relay = relay.label(), %range, "actuator configured");
        builder = builder.entry(sensor_type, relay, range);
    }
    let directory = builder.build()?;

    // Control
    let executor = ActuationExecutor::new(config.retry_policy()?, TokioDelay);
    let context = Arc::new(ControlContext::new(directory, executor));
    let intake = Arc::new(TelemetryIntake::new(context));

    // MQTT
    let mqtt = MqttHandle::start(&config.mqtt.client, intake)?;
    tracing::info!(backend = ?config.actuators.backend, "climated running, press Ctrl-C to stop");

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    mqtt.shutdown().await;

    Ok(())
}
