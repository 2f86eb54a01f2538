//! Actuation executor: drives one actuator to a desired on/off state.
//!
//! Every attempt re-queries the live state and only sends a command when the
//! device disagrees with the desired state, so repeated readings on the same
//! side of the band never re-send a command or wear out the relay.
//!
//! Failed attempts (query or command error, or timeout) are retried up to
//! [`RetryPolicy::attempts`] times with a fixed backoff in between. When the
//! budget is exhausted the failure is logged once and returned as an
//! [`ActuationOutcome::GaveUp`] value; nothing is propagated to the caller
//! as an error, and the next reading starts from scratch.

use std::time::Duration;

use climate_domain::error::{ActuatorError, ValidationError};
use climate_domain::switch::SwitchState;

use crate::ports::{Actuator, Delay};

/// Bounded retry schedule for one convergence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    attempts: u32,
    backoff: Duration,
    attempt_timeout: Duration,
}

impl RetryPolicy {
    pub const DEFAULT_ATTEMPTS: u32 = 3;
    pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(2);
    pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Create a policy.
    ///
    /// `attempt_timeout` bounds each individual query and command.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ZeroAttempts`] when `attempts` is zero.
    pub fn new(
        attempts: u32,
        backoff: Duration,
        attempt_timeout: Duration,
    ) -> Result<Self, ValidationError> {
        if attempts == 0 {
            return Err(ValidationError::ZeroAttempts);
        }
        Ok(Self {
            attempts,
            backoff,
            attempt_timeout,
        })
    }

    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    #[must_use]
    pub fn backoff(&self) -> Duration {
        self.backoff
    }

    #[must_use]
    pub fn attempt_timeout(&self) -> Duration {
        self.attempt_timeout
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: Self::DEFAULT_ATTEMPTS,
            backoff: Self::DEFAULT_BACKOFF,
            attempt_timeout: Self::DEFAULT_ATTEMPT_TIMEOUT,
        }
    }
}

/// Result of one convergence.
#[derive(Debug)]
pub enum ActuationOutcome {
    /// The device already was in the desired state; no command was sent.
    Unchanged { attempts: u32 },
    /// One command was sent and acknowledged.
    Switched { attempts: u32 },
    /// Every attempt failed; the device was left as it was.
    GaveUp { attempts: u32, error: ActuatorError },
}

impl ActuationOutcome {
    /// Number of attempts made, including the successful one.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Unchanged { attempts }
            | Self::Switched { attempts }
            | Self::GaveUp { attempts, .. } => *attempts,
        }
    }

    /// `true` unless the executor gave up.
    #[must_use]
    pub fn is_converged(&self) -> bool {
        !matches!(self, Self::GaveUp { .. })
    }
}

/// What a single successful attempt did.
enum Step {
    Skipped,
    Commanded,
}

/// Applies a [`RetryPolicy`] to actuators, waiting through a [`Delay`].
#[derive(Debug)]
pub struct ActuationExecutor<D> {
    policy: RetryPolicy,
    delay: D,
}

impl<D: Delay> ActuationExecutor<D> {
    /// Create an executor with the given policy and delay mechanism.
    pub fn new(policy: RetryPolicy, delay: D) -> Self {
        Self { policy, delay }
    }

    /// Bring `actuator` to `desired`, retrying on failure.
    ///
    /// Never returns an error: exhaustion is reported in the logs and as
    /// [`ActuationOutcome::GaveUp`].
    pub async fn converge<A: Actuator>(
        &self,
        actuator: &A,
        desired: SwitchState,
    ) -> ActuationOutcome {
        let attempts = self.policy.attempts;
        let mut attempt = 1;

        loop {
            match self.attempt(actuator, desired).await {
                Ok(Step::Skipped) => {
                    tracing::info!(
                        actuator = actuator.label(),
                        %desired,
                        attempt,
                        "actuator already in desired state, no command sent"
                    );
                    return ActuationOutcome::Unchanged { attempts: attempt };
                }
                Ok(Step::Commanded) => {
                    tracing::info!(
                        actuator = actuator.label(),
                        %desired,
                        attempt,
                        "actuator switched"
                    );
                    return ActuationOutcome::Switched { attempts: attempt };
                }
                Err(error) if attempt >= attempts => {
                    tracing::error!(
                        actuator = actuator.label(),
                        %desired,
                        attempts,
                        %error,
                        "giving up on actuator, leaving it in its last known state"
                    );
                    return ActuationOutcome::GaveUp {
                        attempts: attempt,
                        error,
                    };
                }
                Err(error) => {
                    let backoff_ms =
                        u64::try_from(self.policy.backoff.as_millis()).unwrap_or(u64::MAX);
                    tracing::warn!(
                        actuator = actuator.label(),
                        %desired,
                        attempt,
                        attempts,
                        %error,
                        backoff_ms,
                        "actuation attempt failed, retrying"
                    );
                    self.delay.sleep(self.policy.backoff).await;
                    attempt += 1;
                }
            }
        }
    }

    /// One query-then-maybe-command round trip.
    async fn attempt<A: Actuator>(
        &self,
        actuator: &A,
        desired: SwitchState,
    ) -> Result<Step, ActuatorError> {
        let timeout = self.policy.attempt_timeout;

        let observed = tokio::time::timeout(timeout, actuator.query_state())
            .await
            .map_err(|_| ActuatorError::Timeout {
                operation: "query",
                after: timeout,
            })??;

        tracing::debug!(
            actuator = actuator.label(),
            observed = %observed.switch_state(),
            %desired,
            "actuator state observed"
        );

        if observed.matches(desired) {
            return Ok(Step::Skipped);
        }

        tokio::time::timeout(timeout, actuator.set_state(desired))
            .await
            .map_err(|_| ActuatorError::Timeout {
                operation: "command",
                after: timeout,
            })??;

        Ok(Step::Commanded)
    }
}
