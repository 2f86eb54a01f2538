//! In-memory port implementations shared by the unit tests.

use std::future::Future;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::time::Duration;

use climate_domain::error::ActuatorError;
use climate_domain::range::Range;
use climate_domain::sensor::SensorType;
use climate_domain::switch::{ActuatorState, SwitchState};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

use crate::context::ControlContext;
use crate::directory::DeviceDirectory;
use crate::executor::{ActuationExecutor, RetryPolicy};
use crate::ports::{Actuator, Delay};

// ── Scripted relay ─────────────────────────────────────────────────

/// Relay whose failures are scripted up front.
pub(crate) struct FakeRelay {
    label: String,
    is_on: AtomicBool,
    failing_queries: AtomicU32,
    failing_commands: AtomicU32,
    always_fail: bool,
    hang: bool,
    queries: AtomicU32,
    commands: Mutex<Vec<SwitchState>>,
}

impl FakeRelay {
    pub(crate) fn new(label: &str, is_on: bool) -> Self {
        Self {
            label: label.to_string(),
            is_on: AtomicBool::new(is_on),
            failing_queries: AtomicU32::new(0),
            failing_commands: AtomicU32::new(0),
            always_fail: false,
            hang: false,
            queries: AtomicU32::new(0),
            commands: Mutex::new(Vec::new()),
        }
    }

    /// Every query fails.
    pub(crate) fn broken(label: &str) -> Self {
        Self {
            always_fail: true,
            ..Self::new(label, false)
        }
    }

    /// Every query never completes.
    pub(crate) fn unresponsive(label: &str) -> Self {
        Self {
            hang: true,
            ..Self::new(label, false)
        }
    }

    /// The next `n` queries fail.
    pub(crate) fn with_failing_queries(self, n: u32) -> Self {
        self.failing_queries.store(n, Ordering::SeqCst);
        self
    }

    /// The next `n` commands fail without changing the relay.
    pub(crate) fn with_failing_commands(self, n: u32) -> Self {
        self.failing_commands.store(n, Ordering::SeqCst);
        self
    }

    pub(crate) fn query_count(&self) -> u32 {
        self.queries.load(Ordering::SeqCst)
    }

    pub(crate) fn commands(&self) -> Vec<SwitchState> {
        self.commands.lock().unwrap().clone()
    }

    pub(crate) fn is_on(&self) -> bool {
        self.is_on.load(Ordering::SeqCst)
    }
}

/// Decrement `counter` if positive; `true` when a failure was consumed.
fn take_failure(counter: &AtomicU32) -> bool {
    counter
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok()
}

impl Actuator for FakeRelay {
    fn label(&self) -> &str {
        &self.label
    }

    async fn query_state(&self) -> Result<ActuatorState, ActuatorError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.hang {
            std::future::pending::<()>().await;
        }
        if self.always_fail || take_failure(&self.failing_queries) {
            return Err(ActuatorError::Query("device unreachable".into()));
        }
        Ok(ActuatorState {
            is_on: self.is_on.load(Ordering::SeqCst),
        })
    }

    async fn set_state(&self, state: SwitchState) -> Result<(), ActuatorError> {
        self.commands.lock().unwrap().push(state);
        if take_failure(&self.failing_commands) {
            return Err(ActuatorError::Command {
                state,
                source: "relay rejected command".into(),
            });
        }
        self.is_on.store(state.is_on(), Ordering::SeqCst);
        Ok(())
    }
}

// ── Recording delay ────────────────────────────────────────────────

/// [`Delay`] that returns immediately and remembers what it was asked for.
#[derive(Default)]
pub(crate) struct RecordingDelay {
    sleeps: Mutex<Vec<Duration>>,
}

impl RecordingDelay {
    pub(crate) fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

impl Delay for RecordingDelay {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        self.sleeps.lock().unwrap().push(duration);
        std::future::ready(())
    }
}

// ── Log capture ────────────────────────────────────────────────────

/// Layer counting the `ERROR` events emitted while it is installed.
#[derive(Clone, Default)]
pub(crate) struct ErrorCounter(Arc<AtomicUsize>);

impl ErrorCounter {
    pub(crate) fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl<S: tracing::Subscriber> Layer<S> for ErrorCounter {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == tracing::Level::ERROR {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

// ── Fixtures ───────────────────────────────────────────────────────

/// Humidity band `[40, 60]`, temperature band `[18, 24]`.
pub(crate) fn context_with(
    humidifier: FakeRelay,
    heater: FakeRelay,
) -> ControlContext<FakeRelay, RecordingDelay> {
    let directory = DeviceDirectory::builder()
        .entry(
            SensorType::Humidity,
            humidifier,
            Range::new(40.0, 60.0).unwrap(),
        )
        .entry(
            SensorType::Temperature,
            heater,
            Range::new(18.0, 24.0).unwrap(),
        )
        .build()
        .unwrap();
    ControlContext::new(
        directory,
        ActuationExecutor::new(RetryPolicy::default(), RecordingDelay::default()),
    )
}
