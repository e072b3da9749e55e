//! Worker pool scheduler.
//!
//! Drives probes with blocking requests on a pool of OS threads. The pool
//! lives on a `spawn_blocking` task: workers pull URLs from a shared queue
//! and send outcomes back over a channel, so the batch completes when the
//! queue drains and every worker exits.

use std::collections::VecDeque;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use async_trait::async_trait;

use crate::initialization::build_blocking_client;
use crate::probe::{probe_url_blocking, ProbeContext, ProbeOutcome};
use crate::scheduler::ProbeScheduler;

/// Scheduler that drives probes on a pool of OS worker threads.
pub struct WorkerPoolScheduler {
    max_concurrency: usize,
}

impl WorkerPoolScheduler {
    /// Creates a scheduler with at most `max_concurrency` worker threads.
    ///
    /// The pool never spawns more workers than there are URLs.
    pub fn new(max_concurrency: usize) -> Self {
        WorkerPoolScheduler {
            max_concurrency: max_concurrency.max(1),
        }
    }
}

#[async_trait]
impl ProbeScheduler for WorkerPoolScheduler {
    fn name(&self) -> &'static str {
        "worker-pool"
    }

    async fn dispatch(
        &self,
        urls: Vec<String>,
        ctx: Arc<ProbeContext>,
    ) -> anyhow::Result<Vec<ProbeOutcome>> {
        if urls.is_empty() {
            return Ok(Vec::new());
        }

        let workers = self.max_concurrency.min(urls.len());
        let result = tokio::task::spawn_blocking(move || run_pool(urls, ctx, workers)).await;

        match result {
            Ok(outcomes) => outcomes,
            Err(join_error) => {
                // A panic in the pool is a programming defect; re-raise it
                // instead of folding it into the report
                if join_error.is_panic() {
                    std::panic::resume_unwind(join_error.into_panic());
                }
                Err(anyhow::anyhow!("Worker pool task was cancelled"))
            }
        }
    }
}

/// Runs the pool to completion on the current (blocking) thread.
fn run_pool(
    urls: Vec<String>,
    ctx: Arc<ProbeContext>,
    workers: usize,
) -> anyhow::Result<Vec<ProbeOutcome>> {
    // Blocking clients must be built outside the async runtime; this
    // function runs on a blocking task, so this is the place. Clones
    // share the underlying connection pool.
    let client = build_blocking_client(ctx.timeout_seconds, &ctx.user_agent)
        .context("Failed to build blocking HTTP client for worker pool")?;

    let queue: Arc<Mutex<VecDeque<String>>> = Arc::new(Mutex::new(urls.into_iter().collect()));
    let (tx, rx) = mpsc::channel();

    let mut handles = Vec::with_capacity(workers);
    for i in 0..workers {
        let queue = Arc::clone(&queue);
        let ctx = Arc::clone(&ctx);
        let client = client.clone();
        let tx = tx.clone();
        let handle = std::thread::Builder::new()
            .name(format!("probe-worker-{}", i))
            .spawn(move || worker_loop(&queue, &client, &ctx, &tx))
            .context("Failed to spawn probe worker thread")?;
        handles.push(handle);
    }
    // Drop the original sender so the channel closes once every worker exits
    drop(tx);

    let outcomes: Vec<ProbeOutcome> = rx.iter().collect();

    for handle in handles {
        if let Err(panic) = handle.join() {
            std::panic::resume_unwind(panic);
        }
    }

    Ok(outcomes)
}

/// One worker: pull URLs until the queue drains.
fn worker_loop(
    queue: &Mutex<VecDeque<String>>,
    client: &reqwest::blocking::Client,
    ctx: &ProbeContext,
    tx: &mpsc::Sender<ProbeOutcome>,
) {
    loop {
        let url = {
            // Popping is a single operation under the lock, so a queue
            // poisoned by another worker's panic is still structurally valid
            let mut queue = queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            queue.pop_front()
        };
        let Some(url) = url else {
            break;
        };

        let outcome = probe_url_blocking(&url, client, ctx);
        if tx.send(outcome).is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit_breaker::CircuitBreaker;
    use crate::error_handling::ProcessingStats;
    use crate::probe::OutcomeKind;
    use crate::skip_list::SkipList;
    use httptest::{matchers::*, responders::*, Expectation, Server};

    fn test_context() -> Arc<ProbeContext> {
        Arc::new(ProbeContext::new(
            reqwest::Client::new(),
            SkipList::new(vec![]),
            CircuitBreaker::with_threshold(5),
            Arc::new(ProcessingStats::new()),
            5,
            "link_status-tests".to_string(),
        ))
    }

    #[tokio::test]
    async fn test_dispatch_returns_one_outcome_per_url() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("HEAD", "/a"))
                .respond_with(status_code(200)),
        );
        server.expect(
            Expectation::matching(request::method_path("HEAD", "/b"))
                .respond_with(status_code(404)),
        );
        server.expect(
            Expectation::matching(request::method_path("HEAD", "/c"))
                .respond_with(status_code(200)),
        );

        let urls = vec![
            server.url("/a").to_string(),
            server.url("/b").to_string(),
            server.url("/c").to_string(),
        ];

        let scheduler = WorkerPoolScheduler::new(2);
        let outcomes = scheduler
            .dispatch(urls.clone(), test_context())
            .await
            .expect("dispatch should succeed");

        assert_eq!(outcomes.len(), urls.len());
        let valid = outcomes
            .iter()
            .filter(|o| o.kind == OutcomeKind::Valid)
            .count();
        let broken = outcomes
            .iter()
            .filter(|o| o.kind == OutcomeKind::ProtocolError)
            .count();
        assert_eq!(valid, 2);
        assert_eq!(broken, 1);
    }

    #[tokio::test]
    async fn test_dispatch_empty_input() {
        let scheduler = WorkerPoolScheduler::new(4);
        let outcomes = scheduler
            .dispatch(vec![], test_context())
            .await
            .expect("dispatch should succeed");
        assert!(outcomes.is_empty());
    }

    #[tokio::test]
    async fn test_more_workers_than_urls() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("HEAD", "/only"))
                .respond_with(status_code(200)),
        );

        let scheduler = WorkerPoolScheduler::new(16);
        let outcomes = scheduler
            .dispatch(vec![server.url("/only").to_string()], test_context())
            .await
            .expect("dispatch should succeed");

        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].kind, OutcomeKind::Valid);
    }
}
