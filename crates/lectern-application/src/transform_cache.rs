//! Per-page transform cache with a single-flight guarantee.
//!
//! Each `(page, mode)` pair is fetched from the backend at most once while
//! it stays valid: concurrent callers before the first resolution collapse
//! into one outbound request and all observe the same result. Success
//! populates the cache; failure leaves the slot empty so the next attempt
//! retries. Navigating to a different page clears everything, and a
//! response that resolves after a navigation is discarded instead of being
//! applied to the new page's cache.

use lectern_core::{
    ContentMode, LecternError, PageId, Result, SourceContent, TransformBackend, TransformRequest,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

type SharedOutcome = std::result::Result<String, LecternError>;

enum Slot {
    /// Fetch in flight; late callers subscribe and wait. The map's sender
    /// clone is removed together with the slot, so once the fetcher is
    /// gone the channel closes and waiters wake up.
    InFlight(broadcast::Sender<SharedOutcome>),
    Ready(String),
}

struct CacheState {
    page: Option<PageId>,
    /// Bumped on every page change; completions compare it against the
    /// value captured when their request was issued.
    generation: u64,
    slots: HashMap<ContentMode, Slot>,
}

impl CacheState {
    /// Aligns the cache with `page`, clearing all entries when the page
    /// identity changed.
    fn align_page(&mut self, page: &PageId) {
        if self.page.as_ref() != Some(page) {
            debug!(page = %page, "transform cache: page changed, clearing");
            self.page = Some(page.clone());
            self.generation += 1;
            self.slots.clear();
        }
    }
}

/// Removes an in-flight slot if the fetching future is dropped before it
/// resolves (task aborted, caller cancelled). Dropping the map's sender
/// clone closes the channel, so joined waiters observe the abandonment
/// instead of waiting forever, and the next caller retries.
struct InFlightGuard<'a> {
    state: &'a Mutex<CacheState>,
    mode: ContentMode,
    generation: u64,
    armed: bool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Ok(mut state) = self.state.lock() {
            // A navigation already cleared the slot; only touch our own
            // generation so a fresh fetch for the same mode survives.
            if state.generation == self.generation
                && matches!(state.slots.get(&self.mode), Some(Slot::InFlight(_)))
            {
                warn!(mode = %self.mode, "transform cache: fetch abandoned, releasing slot");
                state.slots.remove(&self.mode);
            }
        }
    }
}

/// Caches transformed renditions of the current page, one per mode.
pub struct TransformCache {
    backend: Arc<dyn TransformBackend>,
    /// Never held across an await; all backend I/O happens unlocked.
    state: Mutex<CacheState>,
    /// Personalization context attached to `Personalized` requests.
    context: RwLock<Option<String>>,
}

impl TransformCache {
    pub fn new(backend: Arc<dyn TransformBackend>) -> Self {
        Self {
            backend,
            state: Mutex::new(CacheState {
                page: None,
                generation: 0,
                slots: HashMap::new(),
            }),
            context: RwLock::new(None),
        }
    }

    /// Sets the personalization context sent with `Personalized` requests.
    pub fn set_context(&self, context: Option<String>) {
        *self.context.write().expect("context lock poisoned") = context;
    }

    /// Drops every cached entry and rescopes the cache to `page`.
    pub fn begin_page(&self, page: PageId) {
        let mut state = self.state.lock().expect("cache lock poisoned");
        state.align_page(&page);
    }

    /// Returns the transformed text for `(page, mode)`, fetching it from
    /// the backend only if no valid entry exists and no fetch is in flight.
    ///
    /// # Errors
    ///
    /// * `LecternError::InvalidMode` — `mode` is `Original`
    /// * `LecternError::EmptyContent` — never produced here because
    ///   `SourceContent` is non-empty by construction, but extraction
    ///   failures upstream surface as this
    /// * `LecternError::Transform` / `AuthRequired` — backend failures,
    ///   slot left empty for retry
    /// * `LecternError::Internal` — the fetching caller was cancelled
    ///   before resolving; the slot is released, retry at will
    pub async fn get_or_fetch(
        &self,
        mode: ContentMode,
        source: &SourceContent,
        page: &PageId,
    ) -> Result<String> {
        if mode.is_original() {
            return Err(LecternError::InvalidMode(mode.to_string()));
        }

        // Decide under the lock whether we read, wait, or fetch. The lock
        // is never held across the backend call.
        let (issued_generation, waiter, fetcher_tx) = {
            let mut state = self.state.lock().expect("cache lock poisoned");
            state.align_page(page);
            match state.slots.get(&mode) {
                Some(Slot::Ready(text)) => {
                    debug!(%mode, page = %page, "transform cache: hit");
                    return Ok(text.clone());
                }
                Some(Slot::InFlight(tx)) => {
                    debug!(%mode, page = %page, "transform cache: joining in-flight fetch");
                    (state.generation, Some(tx.subscribe()), None)
                }
                None => {
                    let (tx, _) = broadcast::channel(1);
                    state.slots.insert(mode, Slot::InFlight(tx.clone()));
                    (state.generation, None, Some(tx))
                }
            }
        };

        if let Some(mut rx) = waiter {
            return match rx.recv().await {
                Ok(outcome) => outcome,
                // Fetcher dropped without resolving; its guard released
                // the slot, so a retry starts a fresh fetch.
                Err(_) => Err(LecternError::internal("transform fetch abandoned")),
            };
        }

        let tx = fetcher_tx.expect("fetcher path must hold the sender");
        let mut slot_guard = InFlightGuard {
            state: &self.state,
            mode,
            generation: issued_generation,
            armed: true,
        };

        let mut request = TransformRequest::new(source, page);
        if mode == ContentMode::Personalized {
            let context = self.context.read().expect("context lock poisoned").clone();
            if let Some(context) = context {
                request = request.with_context(context);
            }
        }

        info!(%mode, page = %page, bytes = source.len(), "transform cache: fetching");
        let outcome = self.backend.transform(mode, request).await;

        {
            let mut state = self.state.lock().expect("cache lock poisoned");
            slot_guard.armed = false;
            if state.generation == issued_generation {
                match &outcome {
                    Ok(text) => {
                        state.slots.insert(mode, Slot::Ready(text.clone()));
                    }
                    Err(err) => {
                        warn!(%mode, page = %page, error = %err, "transform fetch failed");
                        state.slots.remove(&mode);
                    }
                }
            } else {
                // The page changed while the request was in flight. The
                // result still goes to whoever awaited it, but the new
                // page's cache must not see it.
                debug!(%mode, page = %page, "transform cache: stale response discarded");
            }
        }

        let _ = tx.send(outcome.clone());
        outcome
    }
}
