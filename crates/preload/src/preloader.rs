//! Concurrent asset preloader.
//!
//! Every target is fetched on its own task as soon as [`ImagePreloader::preload`]
//! is called. Each settlement, success or failure, advances the shared
//! [`PreloadState`]; the run is loaded once all targets have settled.
//! Failures are recorded but never abort the run.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use radeck_core::{PreloadState, PreloadTarget};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::error::PreloadError;
use crate::fetcher::ResourceFetcher;

/// A target that failed to load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreloadFailure {
    /// The target
    pub target: PreloadTarget,
    /// Error description
    pub error: String,
}

/// Final outcome of a preload run.
#[derive(Debug, Clone, Serialize)]
pub struct PreloadReport {
    /// Final counters
    pub state: PreloadState,
    /// Targets that failed, in settlement order
    pub failures: Vec<PreloadFailure>,
    /// Time from `preload` to the last settlement
    pub elapsed: Duration,
}

/// Preloads a fixed set of resources in parallel.
pub struct ImagePreloader<F: ?Sized> {
    fetcher: Arc<F>,
}

impl<F: ResourceFetcher + 'static> ImagePreloader<F> {
    /// Create a preloader around a fetcher.
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
        }
    }
}

impl<F: ResourceFetcher + ?Sized + 'static> ImagePreloader<F> {
    /// Create a preloader around a shared fetcher.
    pub fn from_arc(fetcher: Arc<F>) -> Self {
        Self { fetcher }
    }

    /// Start loading every target concurrently.
    ///
    /// The returned handle is already in the `Loading` phase (or `Done` for
    /// an empty list). Must be called from within a Tokio runtime.
    pub fn preload<I, T>(&self, targets: I) -> PreloadHandle
    where
        I: IntoIterator<Item = T>,
        T: Into<PreloadTarget>,
    {
        let started = Instant::now();
        let targets: Vec<PreloadTarget> = targets.into_iter().map(Into::into).collect();
        let (tx, rx) = watch::channel(PreloadState::loading(targets.len()));

        if targets.is_empty() {
            debug!("Nothing to preload");
            return PreloadHandle {
                rx,
                driver: None,
                started,
            };
        }

        info!("Preloading {} targets", targets.len());

        let attempts: Vec<_> = targets
            .into_iter()
            .map(|target| {
                let fetcher = Arc::clone(&self.fetcher);
                let requested = target.clone();
                let handle = tokio::spawn(async move { fetcher.fetch(&requested).await });
                (target, handle)
            })
            .collect();

        PreloadHandle {
            rx,
            driver: Some(tokio::spawn(settle_all(attempts, tx))),
            started,
        }
    }
}

/// Observes a running preload.
///
/// Dropping the handle does not cancel in-flight fetches.
pub struct PreloadHandle {
    rx: watch::Receiver<PreloadState>,
    driver: Option<JoinHandle<Vec<PreloadFailure>>>,
    started: Instant,
}

impl PreloadHandle {
    /// Current state.
    pub fn state(&self) -> PreloadState {
        *self.rx.borrow()
    }

    /// Whether every target has settled.
    pub fn is_loaded(&self) -> bool {
        self.state().is_loaded()
    }

    /// Current progress, in percent.
    pub fn progress_percent(&self) -> u32 {
        self.state().progress_percent()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<PreloadState> {
        self.rx.clone()
    }

    /// Wait until every target has settled and return the final state.
    pub async fn loaded(&self) -> PreloadState {
        let mut rx = self.rx.clone();
        if rx.wait_for(PreloadState::is_loaded).await.is_err() {
            warn!("Preload driver dropped before every target settled");
        }
        let state = *rx.borrow();
        state
    }

    /// Wait for the run to finish and collect the report.
    ///
    /// Never fails: individual errors are listed in the report.
    pub async fn wait(mut self) -> PreloadReport {
        let failures = match self.driver.take() {
            Some(driver) => match driver.await {
                Ok(failures) => failures,
                Err(e) => {
                    error!("Preload driver stopped: {}", e);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        PreloadReport {
            state: self.state(),
            failures,
            elapsed: self.started.elapsed(),
        }
    }
}

async fn settle_all(
    attempts: Vec<(PreloadTarget, JoinHandle<Result<u64, PreloadError>>)>,
    tx: watch::Sender<PreloadState>,
) -> Vec<PreloadFailure> {
    let tx = &tx;
    let settlements = attempts.into_iter().map(|(target, handle)| async move {
        let outcome = match handle.await {
            Ok(result) => result,
            Err(e) => Err(PreloadError::Aborted(e.to_string())),
        };

        tx.send_modify(|state| state.record(outcome.is_ok()));

        match outcome {
            Ok(bytes) => {
                debug!(resource = %target, bytes, "Preloaded");
                None
            }
            Err(e) => {
                warn!(resource = %target, "Failed to preload: {}", e);
                Some(PreloadFailure {
                    target,
                    error: e.to_string(),
                })
            }
        }
    });

    let failures: Vec<_> = join_all(settlements).await.into_iter().flatten().collect();

    let state = *tx.borrow();
    info!(
        loaded = state.loaded_count,
        failed = state.failed_count,
        "Preload finished"
    );
    failures
}
