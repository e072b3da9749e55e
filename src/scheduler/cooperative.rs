//! Cooperative async scheduler.
//!
//! Runs every probe as a future on the shared runtime, bounded by a
//! semaphore. All futures are gathered with `join_all`, so the result
//! always carries exactly one outcome per input URL.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;

use crate::initialization::init_semaphore;
use crate::probe::{probe_url, ProbeContext, ProbeOutcome};
use crate::scheduler::ProbeScheduler;

/// Scheduler that drives probes as cooperative async tasks.
pub struct CooperativeScheduler {
    max_concurrency: usize,
}

impl CooperativeScheduler {
    /// Creates a scheduler bounded to `max_concurrency` in-flight probes.
    pub fn new(max_concurrency: usize) -> Self {
        CooperativeScheduler {
            max_concurrency: max_concurrency.max(1),
        }
    }
}

#[async_trait]
impl ProbeScheduler for CooperativeScheduler {
    fn name(&self) -> &'static str {
        "async"
    }

    async fn dispatch(
        &self,
        urls: Vec<String>,
        ctx: Arc<ProbeContext>,
    ) -> anyhow::Result<Vec<ProbeOutcome>> {
        let semaphore = init_semaphore(self.max_concurrency);

        let probes = urls.into_iter().map(|url| {
            let semaphore = Arc::clone(&semaphore);
            let ctx = Arc::clone(&ctx);
            async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .expect("probe semaphore is never closed");
                probe_url(&url, &ctx).await
            }
        });

        // Probes are infallible, so join_all cannot lose URLs
        Ok(join_all(probes).await)
    }
}
