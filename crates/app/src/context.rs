//! Control context: everything the control path needs, built once.
//!
//! Replaces process-wide singletons: the composition root constructs one
//! [`ControlContext`], wraps it in an `Arc`, and hands it to the intake and
//! dispatcher. Nothing in it is mutated after construction, so it is shared
//! without locks.

use crate::directory::DeviceDirectory;
use crate::executor::ActuationExecutor;

/// Device directory plus the executor configured with the retry policy.
#[derive(Debug)]
pub struct ControlContext<A, D> {
    directory: DeviceDirectory<A>,
    executor: ActuationExecutor<D>,
}

impl<A, D> ControlContext<A, D> {
    pub fn new(directory: DeviceDirectory<A>, executor: ActuationExecutor<D>) -> Self {
        Self {
            directory,
            executor,
        }
    }

    #[must_use]
    pub fn directory(&self) -> &DeviceDirectory<A> {
        &self.directory
    }

    #[must_use]
    pub fn executor(&self) -> &ActuationExecutor<D> {
        &self.executor
    }
}
