//! The bounded worker pool
//!
//! Workers share one FIFO queue of raw URLs and two lock-protected
//! collections for outcomes. A worker runs each task to its terminal
//! classification (matched, unmatched, or errored) before popping the
//! next one; an empty queue ends the worker.

use crate::searcher::fetcher::fetch_page;
use crate::searcher::matcher::TermMatcher;
use crate::url::normalize_url;
use crate::SiteError;
use reqwest::Client;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Shared queue of pending raw URLs, seeded once per run
pub(crate) struct WorkQueue {
    inner: Mutex<VecDeque<String>>,
}

impl WorkQueue {
    pub(crate) fn seed(urls: &[String]) -> Self {
        Self {
            inner: Mutex::new(urls.iter().cloned().collect()),
        }
    }

    /// Non-blocking pop; `None` means the queue is drained
    pub(crate) fn pop(&self) -> Option<String> {
        self.inner.lock().unwrap().pop_front()
    }

    pub(crate) fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }
}

/// Cooperative cancellation signal for a running search
///
/// Once raised, workers stop popping new tasks. Fetches already in flight
/// are allowed to finish and their outcomes are still recorded; whatever
/// is left in the queue is dropped.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Everything the pool accumulated during a run
pub(crate) struct PoolOutcome {
    pub matched: Vec<String>,
    pub errors: Vec<SiteError>,
}

/// Effective worker count: never more workers than pending tasks, never
/// above the configured cap
pub(crate) fn worker_count(max_workers: usize, pending: usize) -> usize {
    max_workers.min(pending)
}

/// Drains the URL list through a bounded set of workers and returns the
/// merged outcomes once every worker has joined
pub(crate) async fn run_pool(
    client: Client,
    matcher: TermMatcher,
    urls: &[String],
    redirect_limit: u32,
    max_workers: usize,
    cancel: CancelToken,
) -> PoolOutcome {
    let queue = Arc::new(WorkQueue::seed(urls));
    let matched = Arc::new(Mutex::new(Vec::new()));
    let errors = Arc::new(Mutex::new(Vec::new()));

    let workers = worker_count(max_workers, queue.len());
    tracing::debug!("Spawning {} workers for {} URLs", workers, queue.len());

    let mut handles = Vec::with_capacity(workers);
    for id in 0..workers {
        let worker = Worker {
            id,
            client: client.clone(),
            matcher: matcher.clone(),
            queue: Arc::clone(&queue),
            matched: Arc::clone(&matched),
            errors: Arc::clone(&errors),
            redirect_limit,
            cancel: cancel.clone(),
        };
        handles.push(tokio::spawn(worker.run()));
    }

    for handle in handles {
        if handle.await.is_err() {
            tracing::error!("A worker panicked; its remaining tasks were not processed");
        }
    }

    let matched = std::mem::take(&mut *matched.lock().unwrap());
    let errors = std::mem::take(&mut *errors.lock().unwrap());
    PoolOutcome { matched, errors }
}

struct Worker {
    id: usize,
    client: Client,
    matcher: TermMatcher,
    queue: Arc<WorkQueue>,
    matched: Arc<Mutex<Vec<String>>>,
    errors: Arc<Mutex<Vec<SiteError>>>,
    redirect_limit: u32,
    cancel: CancelToken,
}

impl Worker {
    async fn run(self) {
        loop {
            if self.cancel.is_cancelled() {
                tracing::debug!("Worker {} stopping: run cancelled", self.id);
                break;
            }
            let Some(raw) = self.queue.pop() else {
                break;
            };
            self.process(raw).await;
        }
    }

    /// Runs one task to its terminal classification
    async fn process(&self, raw: String) {
        let url = match normalize_url(&raw) {
            Ok(url) => url,
            Err(failure) => {
                tracing::debug!("Worker {}: {:?} did not normalize: {}", self.id, raw, failure);
                self.errors.lock().unwrap().push(SiteError { url: raw, failure });
                return;
            }
        };

        tracing::debug!("Worker {} fetching {}", self.id, url);
        match fetch_page(&self.client, &url, self.redirect_limit).await {
            Ok(body) => {
                if self.matcher.is_match(&body) {
                    self.matched.lock().unwrap().push(url.to_string());
                }
                // A fetched but unmatched page leaves no record in either
                // collection
            }
            Err(failure) => {
                self.errors
                    .lock()
                    .unwrap()
                    .push(SiteError {
                        url: url.to_string(),
                        failure,
                    });
            }
        }
    }
}
