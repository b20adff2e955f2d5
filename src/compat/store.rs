//! In-memory dataset cache with request deduplication
//!
//! Each dataset has one slot. A slot holds the last successfully loaded
//! document together with its load time, and at most one in-flight load.
//! Concurrent callers share the in-flight load instead of issuing their own;
//! the handle is cleared once it settles so that a failed load is retried on
//! the next demand. A failed refresh of an expired document falls back to the
//! expired copy.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use tracing::{debug, info, warn};

use crate::compat::error::DatasetError;
use crate::compat::hierarchical::HierarchicalDataset;
use crate::compat::loader::DatasetLoader;
use crate::compat::tabular::TabularDataset;

/// Result shared between every caller awaiting the same load
pub type SharedResult<T> = Result<Arc<T>, Arc<DatasetError>>;

type PendingLoad<T> = Shared<BoxFuture<'static, SharedResult<T>>>;

struct SlotState<T> {
    loaded: Option<(Instant, Arc<T>)>,
    pending: Option<PendingLoad<T>>,
}

struct Slot<T> {
    name: &'static str,
    state: Mutex<SlotState<T>>,
}

impl<T: Send + Sync + 'static> Slot<T> {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            state: Mutex::new(SlotState {
                loaded: None,
                pending: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SlotState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn get_or_load<F>(&self, ttl: Duration, load: F) -> SharedResult<T>
    where
        F: FnOnce() -> BoxFuture<'static, Result<T, DatasetError>>,
    {
        let pending = {
            let mut state = self.lock();

            if let Some((loaded_at, value)) = &state.loaded
                && loaded_at.elapsed() < ttl
            {
                return Ok(Arc::clone(value));
            }

            match state.pending.clone() {
                Some(pending) => {
                    debug!("Joining in-flight {} dataset load", self.name);
                    pending
                }
                None => {
                    info!("Loading {} dataset", self.name);
                    let pending = load()
                        .map(|result| result.map(Arc::new).map_err(Arc::new))
                        .boxed()
                        .shared();
                    state.pending = Some(pending.clone());
                    pending
                }
            }
        };

        let result = pending.clone().await;

        let mut state = self.lock();
        if state
            .pending
            .as_ref()
            .is_some_and(|current| current.ptr_eq(&pending))
        {
            state.pending = None;
            match &result {
                Ok(value) => state.loaded = Some((Instant::now(), Arc::clone(value))),
                Err(e) => warn!("Failed to load {} dataset: {}", self.name, e),
            }
        }

        // Fall back to the expired copy; it stays expired so the next demand retries
        match (result, &state.loaded) {
            (Err(e), Some((_, stale))) => {
                debug!("Serving expired {} dataset after failed refresh: {}", self.name, e);
                Ok(Arc::clone(stale))
            }
            (result, _) => result,
        }
    }

    fn is_loaded(&self) -> bool {
        self.lock().loaded.is_some()
    }
}

/// Owner of the raw datasets, shared by the resolvers
pub struct DatasetStore {
    loader: Arc<dyn DatasetLoader>,
    ttl: Duration,
    tabular: Slot<TabularDataset>,
    hierarchical: Slot<HierarchicalDataset>,
}

impl DatasetStore {
    pub fn new(loader: Arc<dyn DatasetLoader>, ttl: Duration) -> Self {
        Self {
            loader,
            ttl,
            tabular: Slot::new("tabular"),
            hierarchical: Slot::new("hierarchical"),
        }
    }

    /// Get the tabular dataset, loading it if absent or expired
    pub async fn tabular(&self) -> SharedResult<TabularDataset> {
        let loader = Arc::clone(&self.loader);
        self.tabular
            .get_or_load(self.ttl, move || {
                async move { loader.fetch_tabular().await }.boxed()
            })
            .await
    }

    /// Get the hierarchical dataset, loading it if absent or expired
    pub async fn hierarchical(&self) -> SharedResult<HierarchicalDataset> {
        let loader = Arc::clone(&self.loader);
        self.hierarchical
            .get_or_load(self.ttl, move || {
                async move { loader.fetch_hierarchical().await }.boxed()
            })
            .await
    }

    pub fn is_tabular_loaded(&self) -> bool {
        self.tabular.is_loaded()
    }

    pub fn is_hierarchical_loaded(&self) -> bool {
        self.hierarchical.is_loaded()
    }
}
