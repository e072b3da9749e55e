//! Probe dispatch strategies.
//!
//! A scheduler takes a batch of URLs and carries the probes under the
//! configured concurrency bound. Two strategies are provided:
//! - `CooperativeScheduler`: async tasks on the shared runtime
//! - `WorkerPoolScheduler`: a pool of OS threads driving blocking requests
//!
//! Both produce the same outcomes for the same input; the strategy is an
//! explicit configuration choice, not something detected at runtime.

mod cooperative;
mod worker_pool;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::ExecutionStrategy;
use crate::probe::{ProbeContext, ProbeOutcome};

pub use cooperative::CooperativeScheduler;
pub use worker_pool::WorkerPoolScheduler;

/// Strategy for carrying a batch of probes.
#[async_trait]
pub trait ProbeScheduler: Send + Sync {
    /// The strategy name as shown in logs.
    fn name(&self) -> &'static str;

    /// Probes every URL in the batch and returns one outcome per URL.
    ///
    /// Outcomes may arrive in any order. An `Err` is reserved for
    /// infrastructure faults (a pool that cannot start its threads);
    /// per-URL trouble is always reported as an outcome, never an error.
    async fn dispatch(
        &self,
        urls: Vec<String>,
        ctx: Arc<ProbeContext>,
    ) -> anyhow::Result<Vec<ProbeOutcome>>;
}

/// Builds the scheduler selected by the configuration.
///
/// # Arguments
///
/// * `strategy` - Which execution strategy to use
/// * `max_concurrency` - Maximum number of in-flight probes
pub fn build_scheduler(
    strategy: ExecutionStrategy,
    max_concurrency: usize,
) -> Box<dyn ProbeScheduler> {
    match strategy {
        ExecutionStrategy::Async => Box::new(CooperativeScheduler::new(max_concurrency)),
        ExecutionStrategy::WorkerPool => Box::new(WorkerPoolScheduler::new(max_concurrency)),
    }
}
