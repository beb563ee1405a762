//! Mode controller: the control surface's entry point.
//!
//! Owns the active mode for the current page view, applies toggle
//! semantics, runs the session gate, and broadcasts accepted changes over
//! the mode signal bus. It never talks to the transform backend itself —
//! renderers react to the broadcast and consult the cache.

use lectern_core::{
    ContentMode, LecternError, ModeSignalBus, PageId, Result, SessionProvider, SessionState,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Coordinates mode changes between a control surface and its listeners.
pub struct ModeController {
    sessions: Arc<dyn SessionProvider>,
    bus: Arc<ModeSignalBus>,
    active: RwLock<ContentMode>,
}

impl ModeController {
    pub fn new(sessions: Arc<dyn SessionProvider>, bus: Arc<ModeSignalBus>) -> Self {
        Self {
            sessions,
            bus,
            active: RwLock::new(ContentMode::Original),
        }
    }

    /// The mode currently active on the reading surface.
    pub async fn active_mode(&self) -> ContentMode {
        *self.active.read().await
    }

    /// Resets to `Original` and rescopes the bus to a new page view.
    ///
    /// Listeners subscribed during the previous page are detached by the
    /// bus swap, so nothing stale can reach the new page.
    pub async fn navigate(&self, page: PageId) {
        let mut active = self.active.write().await;
        *active = ContentMode::Original;
        self.bus.begin_page(page);
    }

    /// Records that the transform for `mode` failed and the surface
    /// reverted to `Original`.
    ///
    /// Keeps the controller's notion of the active mode in line with what
    /// is actually on screen: without this, re-requesting the failed mode
    /// would read as "already active" and toggle back to `Original`
    /// instead of retrying. No signal is published; the reverting surface
    /// already rendered the original itself.
    pub async fn report_failure(&self, mode: ContentMode) {
        let mut active = self.active.write().await;
        if *active == mode {
            debug!(%mode, "transform failed, active mode reverted");
            *active = ContentMode::Original;
        }
    }

    /// Requests a content mode on behalf of the viewer.
    ///
    /// Requesting the mode that is already active toggles back to
    /// `Original`. Non-`Original` modes pass through the session gate
    /// first; a refused change never publishes the requested mode and
    /// never causes a transform request downstream.
    ///
    /// Returns the mode that is active after the request.
    ///
    /// # Errors
    ///
    /// * `LecternError::SessionPending` — session resolution in flight;
    ///   the request is held, active mode unchanged
    /// * `LecternError::AuthRequired` — no session; the surface falls back
    ///   to `Original`
    pub async fn request_mode(&self, mode: ContentMode) -> Result<ContentMode> {
        if mode.is_original() {
            let mut active = self.active.write().await;
            *active = ContentMode::Original;
            self.bus.publish(ContentMode::Original);
            return Ok(ContentMode::Original);
        }

        match self.sessions.current().await? {
            SessionState::Pending => {
                debug!(%mode, "mode request held: session resolution pending");
                Err(LecternError::SessionPending)
            }
            SessionState::Anonymous => {
                let mut active = self.active.write().await;
                if !active.is_original() {
                    *active = ContentMode::Original;
                    self.bus.publish(ContentMode::Original);
                }
                Err(LecternError::AuthRequired)
            }
            SessionState::Authenticated(_) => {
                let mut active = self.active.write().await;
                let next = if *active == mode {
                    ContentMode::Original
                } else {
                    mode
                };
                info!(requested = %mode, next = %next, "mode change accepted");
                *active = next;
                self.bus.publish(next);
                Ok(next)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use lectern_core::Session;
    use std::sync::Mutex;
    use tokio::sync::broadcast::error::TryRecvError;

    struct MockSessionProvider {
        state: Mutex<SessionState>,
    }

    impl MockSessionProvider {
        fn new(state: SessionState) -> Arc<Self> {
            Arc::new(Self {
                state: Mutex::new(state),
            })
        }

        fn authenticated() -> Arc<Self> {
            Self::new(SessionState::Authenticated(Session {
                user_id: "u-1".to_string(),
                email: "ada@example.com".to_string(),
                display_name: None,
                expires_at: None,
            }))
        }

        fn set(&self, state: SessionState) {
            *self.state.lock().unwrap() = state;
        }
    }

    #[async_trait]
    impl SessionProvider for MockSessionProvider {
        async fn current(&self) -> Result<SessionState> {
            Ok(self.state.lock().unwrap().clone())
        }

        async fn sign_out(&self) -> Result<()> {
            self.set(SessionState::Anonymous);
            Ok(())
        }

        fn sign_in_url(&self) -> String {
            "http://localhost:8000/api/auth/sign-in".to_string()
        }
    }

    fn controller(
        sessions: Arc<MockSessionProvider>,
    ) -> (ModeController, Arc<ModeSignalBus>) {
        let bus = Arc::new(ModeSignalBus::default());
        (ModeController::new(sessions, bus.clone()), bus)
    }

    #[tokio::test]
    async fn anonymous_request_is_refused_without_publishing() {
        let (controller, bus) = controller(MockSessionProvider::new(SessionState::Anonymous));
        let mut rx = bus.subscribe();

        let err = controller
            .request_mode(ContentMode::Summary)
            .await
            .unwrap_err();
        assert!(err.is_auth_required());
        assert_eq!(controller.active_mode().await, ContentMode::Original);
        // Already at Original: nothing is broadcast at all.
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn pending_session_holds_the_request() {
        let (controller, bus) = controller(MockSessionProvider::new(SessionState::Pending));
        let mut rx = bus.subscribe();

        let err = controller
            .request_mode(ContentMode::Translation)
            .await
            .unwrap_err();
        assert!(err.is_session_pending());
        assert_eq!(controller.active_mode().await, ContentMode::Original);
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn authenticated_request_publishes_the_mode() {
        let (controller, bus) = controller(MockSessionProvider::authenticated());
        let mut rx = bus.subscribe();

        let active = controller.request_mode(ContentMode::Summary).await.unwrap();
        assert_eq!(active, ContentMode::Summary);
        assert_eq!(rx.recv().await.unwrap().mode, ContentMode::Summary);
    }

    #[tokio::test]
    async fn requesting_the_active_mode_toggles_back_to_original() {
        let (controller, bus) = controller(MockSessionProvider::authenticated());
        let mut rx = bus.subscribe();

        controller.request_mode(ContentMode::Summary).await.unwrap();
        let active = controller.request_mode(ContentMode::Summary).await.unwrap();

        assert_eq!(active, ContentMode::Original);
        assert_eq!(rx.recv().await.unwrap().mode, ContentMode::Summary);
        assert_eq!(rx.recv().await.unwrap().mode, ContentMode::Original);
    }

    #[tokio::test]
    async fn session_loss_while_transformed_falls_back_to_original() {
        let sessions = MockSessionProvider::authenticated();
        let (controller, bus) = controller(sessions.clone());
        controller.request_mode(ContentMode::Summary).await.unwrap();

        sessions.set(SessionState::Anonymous);
        let mut rx = bus.subscribe();
        let err = controller
            .request_mode(ContentMode::Translation)
            .await
            .unwrap_err();

        assert!(err.is_auth_required());
        assert_eq!(controller.active_mode().await, ContentMode::Original);
        assert_eq!(rx.recv().await.unwrap().mode, ContentMode::Original);
    }

    #[tokio::test]
    async fn failed_transform_can_be_retried_with_the_same_command() {
        let (controller, bus) = controller(MockSessionProvider::authenticated());
        let mut rx = bus.subscribe();

        controller
            .request_mode(ContentMode::Translation)
            .await
            .unwrap();
        assert_eq!(rx.recv().await.unwrap().mode, ContentMode::Translation);

        // The fetch failed and the surface fell back to the original.
        controller.report_failure(ContentMode::Translation).await;
        assert_eq!(controller.active_mode().await, ContentMode::Original);

        // Re-requesting the same mode retries instead of toggling off.
        let active = controller
            .request_mode(ContentMode::Translation)
            .await
            .unwrap();
        assert_eq!(active, ContentMode::Translation);
        assert_eq!(rx.recv().await.unwrap().mode, ContentMode::Translation);
    }

    #[tokio::test]
    async fn failure_report_for_an_inactive_mode_is_ignored() {
        let (controller, _bus) = controller(MockSessionProvider::authenticated());
        controller.request_mode(ContentMode::Summary).await.unwrap();

        // A stale failure for some other mode must not knock the surface
        // out of the mode it is actually showing.
        controller.report_failure(ContentMode::Translation).await;
        assert_eq!(controller.active_mode().await, ContentMode::Summary);
    }

    #[tokio::test]
    async fn navigation_resets_active_mode() {
        let (controller, bus) = controller(MockSessionProvider::authenticated());
        controller.request_mode(ContentMode::Summary).await.unwrap();

        controller.navigate(PageId::new("/docs/next")).await;

        assert_eq!(controller.active_mode().await, ContentMode::Original);
        assert_eq!(bus.current_page(), Some(PageId::new("/docs/next")));
    }

    #[tokio::test]
    async fn original_is_always_allowed() {
        let (controller, _bus) = controller(MockSessionProvider::new(SessionState::Anonymous));
        let active = controller
            .request_mode(ContentMode::Original)
            .await
            .unwrap();
        assert_eq!(active, ContentMode::Original);
    }
}
