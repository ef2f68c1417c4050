//! Concurrent page fetching
//!
//! One tokio task per URL fetches the page and runs the caller's
//! synchronous processing step on its tables. Concurrency is bounded by a
//! semaphore. Results are always handed back in launch order so the merge
//! that follows does not depend on network timing.

use std::sync::Arc;

use futures::StreamExt;
use futures::stream::FuturesUnordered;
use tokio::sync::Semaphore;
use tokio::task::{AbortHandle, JoinError, JoinHandle};
use tracing::{debug, info, warn};

use crate::domain::RawTable;
use crate::error::FetchError;
use crate::infrastructure::{FailurePolicy, PageFetcher};

/// Aborts every spawned page task when dropped
///
/// Tasks that already finished are unaffected, so dropping the guard after
/// a complete run is a no-op. Dropping it early (an aborted query, or a
/// caller that stops polling) stops the fetches still in flight.
struct AbortOnDrop(Vec<AbortHandle>);

impl AbortOnDrop {
    fn new<T>(handles: &[JoinHandle<T>]) -> Self {
        Self(handles.iter().map(JoinHandle::abort_handle).collect())
    }
}

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        for handle in &self.0 {
            handle.abort();
        }
    }
}

/// Fan-out/fan-in runner for page fetches
pub struct FetchOrchestrator {
    fetcher: Arc<dyn PageFetcher>,
    semaphore: Arc<Semaphore>,
    policy: FailurePolicy,
}

impl FetchOrchestrator {
    pub fn new(fetcher: Arc<dyn PageFetcher>, max_concurrent: usize, policy: FailurePolicy) -> Self {
        Self {
            fetcher,
            semaphore: Arc::new(Semaphore::new(max_concurrent.max(1))),
            policy,
        }
    }

    pub const fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Fetches and processes every URL, returning one result per URL in
    /// launch order
    ///
    /// `process` receives the launch index, the URL and the page's tables.
    pub async fn fetch_all<T, F>(&self, urls: &[String], process: F) -> Vec<Result<T, FetchError>>
    where
        T: Send + 'static,
        F: Fn(usize, &str, Vec<RawTable>) -> T + Send + Sync + 'static,
    {
        let handles = self.spawn_all(urls, Arc::new(process));
        let _guard = AbortOnDrop::new(&handles);
        let mut results = Vec::with_capacity(handles.len());
        for (url, handle) in urls.iter().zip(handles) {
            results.push(flatten(url, handle.await));
        }
        results
    }

    /// Fetches and processes every URL under the configured failure policy
    ///
    /// With [`FailurePolicy::AllOrNothing`] the first failure to complete
    /// aborts every outstanding task and is returned. Dropping the returned
    /// future aborts outstanding tasks too. With
    /// [`FailurePolicy::BestEffort`] failed pages are logged and skipped.
    /// Successful results are returned in launch order either way.
    pub async fn execute<T, F>(&self, urls: &[String], process: F) -> Result<Vec<T>, FetchError>
    where
        T: Send + 'static,
        F: Fn(usize, &str, Vec<RawTable>) -> T + Send + Sync + 'static,
    {
        info!("Fetching {} pages (policy: {:?})", urls.len(), self.policy);

        let handles = self.spawn_all(urls, Arc::new(process));
        let _guard = AbortOnDrop::new(&handles);
        let mut pending: FuturesUnordered<_> = handles
            .into_iter()
            .enumerate()
            .map(|(index, handle)| async move { (index, handle.await) })
            .collect();

        let mut slots: Vec<Option<T>> = std::iter::repeat_with(|| None).take(urls.len()).collect();
        let mut failed = 0usize;

        while let Some((index, joined)) = pending.next().await {
            match flatten(&urls[index], joined) {
                Ok(value) => slots[index] = Some(value),
                Err(e) => match self.policy {
                    FailurePolicy::AllOrNothing => {
                        warn!("Page {} failed, aborting query: {}", urls[index], e);
                        return Err(e);
                    }
                    FailurePolicy::BestEffort => {
                        warn!("Skipping page {}: {}", urls[index], e);
                        failed += 1;
                    }
                },
            }
        }

        info!("Fetched {} pages, {} skipped", urls.len() - failed, failed);
        Ok(slots.into_iter().flatten().collect())
    }

    fn spawn_all<T, F>(&self, urls: &[String], process: Arc<F>) -> Vec<JoinHandle<Result<T, FetchError>>>
    where
        T: Send + 'static,
        F: Fn(usize, &str, Vec<RawTable>) -> T + Send + Sync + 'static,
    {
        urls.iter()
            .enumerate()
            .map(|(index, url)| {
                let fetcher = Arc::clone(&self.fetcher);
                let semaphore = Arc::clone(&self.semaphore);
                let process = Arc::clone(&process);
                let url = url.clone();

                tokio::spawn(async move {
                    let _permit = semaphore.acquire_owned().await.map_err(|e| FetchError::TaskFailed {
                        url: url.clone(),
                        reason: e.to_string(),
                    })?;

                    let tables = fetcher.fetch_tables(&url).await?;
                    debug!("Fetched {} tables from {}", tables.len(), url);
                    Ok::<T, FetchError>(process(index, &url, tables))
                })
            })
            .collect()
    }
}

fn flatten<T>(url: &str, joined: Result<Result<T, FetchError>, JoinError>) -> Result<T, FetchError> {
    joined.unwrap_or_else(|e| {
        Err(FetchError::TaskFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })
    })
}
