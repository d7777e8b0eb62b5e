//! Async resource fetching with loading/error state and supersession.
//!
//! Every call to [`ResourceFetcher::fetch`] is tagged with a
//! monotonically increasing sequence number. A response is applied only
//! if no newer fetch has been issued in the meantime; stale responses
//! are dropped silently, which is the sole ordering guarantee the
//! library relies on (the repository offers no cancellation).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::{mpsc, Mutex};

use crate::error::BlockError;
use crate::query::{build_params, QuerySpec};
use crate::repository::{ContentRepository, Resource};

/// Published fetch lifecycle state for one consuming view.
#[derive(Debug, Clone, Default)]
pub struct FetchState {
    pub items: Vec<Resource>,
    pub loading: bool,
    pub error: Option<String>,
    pub total_known: Option<usize>,
    end_of_list: bool,
}

impl FetchState {
    /// True once a response came back shorter than the page size.
    #[must_use]
    pub fn end_of_list(&self) -> bool {
        self.end_of_list
    }
}

/// Fetch lifecycle notifications sent toward the host.
#[derive(Debug, Clone)]
pub enum FetchEvent {
    Started { sequence: u64 },
    Completed { sequence: u64, count: usize },
    Failed { sequence: u64, message: String },
    Superseded { sequence: u64 },
}

/// Read-only handle onto a fetcher's published state.
#[derive(Clone)]
pub struct FetchStateHandle {
    state: Arc<Mutex<FetchState>>,
}

impl FetchStateHandle {
    /// Clone the current state.
    pub async fn snapshot(&self) -> FetchState {
        self.state.lock().await.clone()
    }
}

/// Fetch service that runs query specs against the content repository
/// and keeps one [`FetchState`] per consuming view.
pub struct ResourceFetcher {
    repository: Arc<dyn ContentRepository>,
    state: Arc<Mutex<FetchState>>,
    last_spec: Arc<Mutex<Option<QuerySpec>>>,
    latest_seq: Arc<AtomicU64>,
    event_sender: mpsc::UnboundedSender<FetchEvent>,
}

impl ResourceFetcher {
    /// Create a new fetcher over a repository. The returned receiver
    /// carries lifecycle events the host can use to re-render.
    pub fn new(repository: Arc<dyn ContentRepository>) -> (Self, mpsc::UnboundedReceiver<FetchEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();

        (
            Self {
                repository,
                state: Arc::new(Mutex::new(FetchState::default())),
                last_spec: Arc::new(Mutex::new(None)),
                latest_seq: Arc::new(AtomicU64::new(0)),
                event_sender: tx,
            },
            rx,
        )
    }

    /// Get a cloneable read handle onto the published state.
    #[must_use]
    pub fn handle(&self) -> FetchStateHandle {
        FetchStateHandle {
            state: Arc::clone(&self.state),
        }
    }

    /// Clone the current state.
    pub async fn snapshot(&self) -> FetchState {
        self.state.lock().await.clone()
    }

    /// Run a spec against the repository and publish the outcome.
    ///
    /// Returns synchronously-detectable errors (`Validation`,
    /// `Configuration`) before any request is issued; repository
    /// failures land in [`FetchState::error`] instead of the return
    /// value so the host can render them inline.
    pub async fn fetch(&self, spec: QuerySpec) -> Result<(), BlockError> {
        spec.validate()?;

        let sequence = self.latest_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let append = spec.offset > 0;

        {
            let mut state = self.state.lock().await;
            state.loading = true;
            if !append {
                state.items.clear();
                state.total_known = None;
                state.end_of_list = false;
            }
        }
        {
            let mut last = self.last_spec.lock().await;
            *last = Some(spec.clone());
        }

        let _ = self.event_sender.send(FetchEvent::Started { sequence });
        debug!(
            "issuing fetch #{sequence} for {} (offset {})",
            spec.resource_type.as_str(),
            spec.offset
        );

        let params = build_params(&spec);
        let result = self.repository.list(spec.resource_type, &params).await;

        // A newer fetch was issued while this one was in flight; its
        // response must never overwrite fresher data. The check happens
        // under the state lock so the discard is atomic with the write:
        // a fetch issued between check and apply cannot slip through.
        let mut state = self.state.lock().await;
        if self.latest_seq.load(Ordering::SeqCst) != sequence {
            drop(state);
            debug!("dropping superseded response #{sequence}");
            let _ = self.event_sender.send(FetchEvent::Superseded { sequence });
            return Ok(());
        }

        match result {
            Ok(batch) => {
                let count = batch.len();
                let short_batch = count < spec.page_size as usize;

                if append {
                    state.items.extend(batch);
                } else {
                    state.items = batch;
                }
                state.loading = false;
                state.error = None;
                state.end_of_list = short_batch;
                if short_batch {
                    state.total_known = Some(state.items.len());
                }
                drop(state);

                info!(
                    "fetch #{sequence} completed: {count} {} item(s)",
                    spec.resource_type.as_str()
                );
                let _ = self.event_sender.send(FetchEvent::Completed { sequence, count });
            }
            Err(e) => {
                let message = e.to_string();

                // Retain whatever items are already shown; stale data
                // beats a blank view.
                state.loading = false;
                state.error = Some(message.clone());
                drop(state);

                warn!("fetch #{sequence} failed: {message}");
                let _ = self.event_sender.send(FetchEvent::Failed { sequence, message });
            }
        }

        Ok(())
    }

    /// Re-issue the last spec unconditionally.
    pub async fn refetch(&self) -> Result<(), BlockError> {
        let spec = {
            let last = self.last_spec.lock().await;
            last.clone()
        };

        match spec {
            Some(spec) => self.fetch(spec).await,
            None => Ok(()),
        }
    }

    /// Fetch the next page in append mode.
    ///
    /// No-op while a request is in flight, after the end of the list has
    /// been reached, or before any fetch was issued.
    pub async fn load_more(&self) -> Result<(), BlockError> {
        {
            let state = self.state.lock().await;
            if state.loading {
                debug!("load_more ignored: fetch already in flight");
                return Ok(());
            }
            if state.end_of_list {
                debug!("load_more ignored: end of list reached");
                return Ok(());
            }
        }

        let next = {
            let last = self.last_spec.lock().await;
            match last.as_ref() {
                Some(spec) => spec.next_page(),
                None => return Ok(()),
            }
        };

        self.fetch(next).await
    }

    /// Mark any in-flight request stale.
    ///
    /// Used on disposal so a response landing after the owning view went
    /// away is dropped instead of applied.
    pub fn invalidate(&self) {
        self.latest_seq.fetch_add(1, Ordering::SeqCst);
    }
}

impl Drop for ResourceFetcher {
    fn drop(&mut self) {
        self.invalidate();
    }
}
