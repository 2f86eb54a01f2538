//! Broker event loop and message worker.
//!
//! Two tasks cooperate through a bounded ring: the event-loop task keeps
//! polling rumqttc (so keep-alives flow even while an actuation is retrying)
//! and pushes publishes into the ring; the worker task pops them and calls
//! the [`TelemetryHandler`] one message at a time. When the worker falls
//! behind, the oldest queued messages are overwritten so it always resumes
//! with the newest readings.

use std::sync::Arc;
use std::time::Duration;

use rumqttc::{AsyncClient, Event, EventLoop, Outgoing, Packet, QoS};
use tokio::sync::broadcast::{self, error::RecvError};

use climate_app::ports::TelemetryHandler;

use crate::error::MqttError;

/// One publish received on a subscribed topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InboundMessage {
    pub topic: String,
    pub payload: Vec<u8>,
}

/// Subscribe to every topic at QoS 0 without waiting on the event loop.
pub(crate) fn subscribe(client: &AsyncClient, topics: &[String]) -> Result<(), MqttError> {
    for topic in topics {
        client.try_subscribe(topic.clone(), QoS::AtMostOnce)?;
    }
    Ok(())
}

/// Queue a message for the worker. A full ring evicts its oldest message.
pub(crate) fn forward(queue: &broadcast::Sender<InboundMessage>, message: InboundMessage) {
    if let Err(broadcast::error::SendError(message)) = queue.send(message) {
        tracing::debug!(topic = %message.topic, "worker stopped, dropping MQTT message");
    }
}

/// Poll the broker until a DISCONNECT has been sent.
///
/// Connection errors are logged and retried after `reconnect_delay`; the
/// subscriptions are re-issued on every CONNACK since the session is clean.
pub(crate) async fn run_event_loop(
    mut eventloop: EventLoop,
    client: AsyncClient,
    topics: Vec<String>,
    reconnect_delay: Duration,
    queue: broadcast::Sender<InboundMessage>,
) {
    loop {
        match eventloop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(ack))) => {
                tracing::info!(
                    session_present = ack.session_present,
                    ?topics,
                    "connected to MQTT broker, subscribing"
                );
                if let Err(err) = subscribe(&client, &topics) {
                    tracing::error!(%err, "failed to subscribe to sensor topics");
                }
            }
            Ok(Event::Incoming(Packet::SubAck(ack))) => {
                tracing::debug!(pkid = ack.pkid, "subscription acknowledged");
            }
            Ok(Event::Incoming(Packet::Publish(publish))) => {
                let topic: &[u8] = publish.topic.as_ref();
                let message = InboundMessage {
                    topic: String::from_utf8_lossy(topic).into_owned(),
                    payload: publish.payload.to_vec(),
                };
                forward(&queue, message);
            }
            Ok(Event::Outgoing(Outgoing::Disconnect)) => {
                tracing::info!("disconnected from MQTT broker");
                break;
            }
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(
                    %err,
                    retry_in_secs = reconnect_delay.as_secs(),
                    "MQTT connection error, reconnecting"
                );
                tokio::time::sleep(reconnect_delay).await;
            }
        }
    }
}

/// Hand queued messages to `handler`, strictly one at a time.
pub(crate) async fn run_worker<H: TelemetryHandler>(
    handler: Arc<H>,
    mut queue: broadcast::Receiver<InboundMessage>,
) {
    loop {
        match queue.recv().await {
            Ok(message) => {
                handler
                    .handle_message(&message.topic, &message.payload)
                    .await;
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "handler busy, dropped stale MQTT messages");
            }
            Err(RecvError::Closed) => break,
        }
    }
    tracing::debug!("MQTT worker stopped");
}
