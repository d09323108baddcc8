//! Single-flight backend loader.
//!
//! The loader owns the one [`Backend`] every caller shares. Its state only
//! moves forward:
//!
//! ```text
//!     ensure_ready()             load resolves
//! [Uninitialized] ──────> [Initializing] ──────> [Ready]
//!                              ^    │
//!      concurrent ensure_ready │    │ load fails: every caller
//!      attaches to the same ───┘    │ observes the same error
//!      in-flight operation          v
//!                                [Failed]
//! ```
//!
//! `Failed` is terminal. The failed load is kept and never retried.
//!
//! The in-flight operation is a [`Shared`] future stored in the state, not in
//! the caller. Dropping a waiting caller does not cancel the load: the next
//! waiter picks it up where it stopped. `StrCompressor::start` spawns such a
//! waiter so the load also progresses when nobody is asking for it yet.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use futures::future::{BoxFuture, FutureExt, Shared};

use super::backend::{Backend, BackendFuture, BrotliBackend, DEFAULT_MAX_OUTPUT};
use crate::error::{CompassError, Result};

type InFlight = Shared<BoxFuture<'static, std::result::Result<Arc<dyn Backend>, String>>>;

type Factory = Box<dyn Fn() -> BackendFuture + Send + Sync>;

enum LoadState {
    Uninitialized,
    Initializing(InFlight),
    Ready(Arc<dyn Backend>),
}

/// Observable loader state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderState {
    /// No load started yet
    Uninitialized,
    /// A load is in flight
    Initializing,
    /// Backend available to synchronous callers
    Ready,
    /// The load failed; it is not retried
    Failed,
}

impl fmt::Display for LoaderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::Initializing => "initializing",
            Self::Ready => "ready",
            Self::Failed => "failed",
        };
        write!(f, "{name}")
    }
}

/// Acquires and caches a single backend instance.
pub struct BackendLoader {
    factory: Factory,
    state: Mutex<LoadState>,
}

impl Default for BackendLoader {
    fn default() -> Self {
        Self::brotli(DEFAULT_MAX_OUTPUT)
    }
}

impl fmt::Debug for BackendLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendLoader")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl BackendLoader {
    /// Create a loader that builds its backend with `factory` on first use.
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> BackendFuture + Send + Sync + 'static,
    {
        Self {
            factory: Box::new(factory),
            state: Mutex::new(LoadState::Uninitialized),
        }
    }

    /// Loader for the Brotli backend
    pub fn brotli(max_output: usize) -> Self {
        Self::new(move || BrotliBackend::load(max_output))
    }

    /// Loader that is already `Ready` with the given backend.
    ///
    /// The factory is never called.
    pub fn ready(backend: Arc<dyn Backend>) -> Self {
        Self {
            factory: Box::new(|| -> BackendFuture {
                Box::pin(async { Err("loader was created ready".to_string()) })
            }),
            state: Mutex::new(LoadState::Ready(backend)),
        }
    }

    /// Current state
    pub fn state(&self) -> LoaderState {
        match &*self.lock() {
            LoadState::Uninitialized => LoaderState::Uninitialized,
            LoadState::Initializing(in_flight) => match in_flight.peek() {
                None => LoaderState::Initializing,
                Some(Ok(_)) => LoaderState::Ready,
                Some(Err(_)) => LoaderState::Failed,
            },
            LoadState::Ready(_) => LoaderState::Ready,
        }
    }

    /// Check if the backend is ready for synchronous use
    pub fn is_ready(&self) -> bool {
        self.try_get().is_ok()
    }

    /// Return the backend if it is ready, without waiting.
    pub fn try_get(&self) -> Result<Arc<dyn Backend>> {
        let mut state = self.lock();
        let backend = match &*state {
            LoadState::Ready(backend) => return Ok(Arc::clone(backend)),
            // The load may have finished while nobody was awaiting it.
            LoadState::Initializing(in_flight) => match in_flight.peek() {
                Some(Ok(backend)) => Arc::clone(backend),
                _ => return Err(CompassError::NotInitialized),
            },
            LoadState::Uninitialized => return Err(CompassError::NotInitialized),
        };
        tracing::debug!(backend = backend.name(), "backend loader: initializing -> ready");
        *state = LoadState::Ready(Arc::clone(&backend));
        Ok(backend)
    }

    /// Wait until the backend is ready, starting the load if needed.
    ///
    /// Concurrent callers share one load. A failed load is not retried.
    pub async fn ensure_ready(&self) -> Result<Arc<dyn Backend>> {
        let in_flight = {
            let mut state = self.lock();
            match &*state {
                LoadState::Ready(backend) => return Ok(Arc::clone(backend)),
                LoadState::Initializing(in_flight) => in_flight.clone(),
                LoadState::Uninitialized => {
                    tracing::debug!("backend loader: uninitialized -> initializing");
                    let in_flight = self.begin();
                    *state = LoadState::Initializing(in_flight.clone());
                    in_flight
                },
            }
        };

        match in_flight.await {
            Ok(backend) => {
                self.promote(&backend);
                Ok(backend)
            },
            Err(message) => Err(CompassError::Initialization(message)),
        }
    }

    fn begin(&self) -> InFlight {
        let load = (self.factory)();
        let started = Instant::now();
        let timed = async move {
            let result = load.await;
            match &result {
                Ok(backend) => tracing::info!(
                    backend = backend.name(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "compression backend loaded"
                ),
                Err(e) => tracing::debug!(error = %e, "compression backend failed to load"),
            }
            result
        };

        timed.boxed().shared()
    }

    fn promote(&self, backend: &Arc<dyn Backend>) {
        let mut state = self.lock();
        if matches!(*state, LoadState::Initializing(_)) {
            tracing::debug!(backend = backend.name(), "backend loader: initializing -> ready");
            *state = LoadState::Ready(Arc::clone(backend));
        }
    }

    fn lock(&self) -> MutexGuard<'_, LoadState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
