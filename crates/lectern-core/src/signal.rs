//! In-process mode signal bus.
//!
//! A control surface (the command prompt, a navbar) announces a desired
//! content mode; any number of independently-mounted listeners (the reading
//! surface) receive it without either side holding a reference to the
//! other. Signals are transient: a publish with no subscribers is silently
//! dropped, and nothing is persisted.
//!
//! Page isolation is structural rather than filtered: `begin_page` swaps
//! the underlying channel, so receivers obtained before a navigation are
//! detached and a stale broadcast can never reach a new page's listeners.

use crate::mode::ContentMode;
use crate::page::PageId;
use std::sync::RwLock;
use tokio::sync::broadcast;
use tracing::debug;

/// A transient mode-change signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeChange {
    pub mode: ContentMode,
}

struct BusInner {
    current_page: Option<PageId>,
    sender: broadcast::Sender<ModeChange>,
}

/// Page-scoped broadcast channel for [`ModeChange`] signals.
///
/// Delivery is synchronous and best-effort: every receiver subscribed at
/// publish time sees every publish, in publish order, at most once each.
pub struct ModeSignalBus {
    inner: RwLock<BusInner>,
    capacity: usize,
}

impl ModeSignalBus {
    /// Creates a bus whose per-subscriber buffer holds `capacity` signals.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            inner: RwLock::new(BusInner {
                current_page: None,
                sender,
            }),
            capacity,
        }
    }

    /// Starts a new page view.
    ///
    /// The underlying channel is replaced, detaching every receiver that
    /// subscribed during the previous page, and the bus's notion of the
    /// current mode resets to `Original` for newly mounted listeners.
    pub fn begin_page(&self, page: PageId) {
        let (sender, _) = broadcast::channel(self.capacity);
        let mut inner = self.inner.write().expect("bus lock poisoned");
        debug!(page = %page, "mode bus: new page view");
        inner.current_page = Some(page);
        inner.sender = sender;
    }

    /// The page the bus is currently scoped to, if any.
    pub fn current_page(&self) -> Option<PageId> {
        self.inner
            .read()
            .expect("bus lock poisoned")
            .current_page
            .clone()
    }

    /// Broadcasts a mode change to all current subscribers.
    ///
    /// Returns the number of receivers the signal was delivered to; zero
    /// when nobody is listening (the signal is dropped, not queued).
    pub fn publish(&self, mode: ContentMode) -> usize {
        let inner = self.inner.read().expect("bus lock poisoned");
        match inner.sender.send(ModeChange { mode }) {
            Ok(count) => {
                debug!(%mode, receivers = count, "mode bus: published");
                count
            }
            Err(_) => {
                debug!(%mode, "mode bus: no subscribers");
                0
            }
        }
    }

    /// Subscribes to mode changes for the current page view.
    ///
    /// The receiver is bound to this page: after the next `begin_page` it
    /// drains whatever it already received and then closes.
    pub fn subscribe(&self) -> broadcast::Receiver<ModeChange> {
        self.inner
            .read()
            .expect("bus lock poisoned")
            .sender
            .subscribe()
    }
}

impl Default for ModeSignalBus {
    fn default() -> Self {
        Self::new(16)
    }
}
