//! Delay port: the pause between two actuation attempts.
//!
//! Retries go through this trait instead of calling `tokio::time::sleep`
//! directly so the retry policy can be exercised without wall-clock waits.

use std::future::Future;
use std::time::Duration;

/// Something that can wait for a given duration.
pub trait Delay: Send + Sync {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// [`Delay`] backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

impl Delay for TokioDelay {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}
