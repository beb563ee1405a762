//! Render state machine for a single reading surface.
//!
//! `ModeView` is deliberately pure: it holds the source content for the
//! current page and tracks which rendition is on screen. Transform
//! completions carry the page they were fetched for; a completion tagged
//! with a different page is ignored, so a late response from a previous
//! page can never paint the current one.

use lectern_core::{ContentMode, LecternError, PageId, SourceContent};

/// What the reading surface is showing right now.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// Untransformed source content.
    Original,
    /// A transform for `mode` is in flight; the original stays hidden.
    Loading { mode: ContentMode },
    /// Transformed output is on screen.
    Ready { mode: ContentMode, text: String },
    /// The transform failed; the surface shows the error until it is
    /// acknowledged, then reverts to the original.
    Failed { mode: ContentMode, reason: LecternError },
}

/// Per-page view: original content plus the current render state.
#[derive(Debug)]
pub struct ModeView {
    page: PageId,
    original: Option<SourceContent>,
    state: ViewState,
}

impl ModeView {
    pub fn new(page: PageId) -> Self {
        Self {
            page,
            original: None,
            state: ViewState::Original,
        }
    }

    pub fn page(&self) -> &PageId {
        &self.page
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn original(&self) -> Option<&SourceContent> {
        self.original.as_ref()
    }

    /// Replaces the page and drops all state from the previous one.
    pub fn begin_page(&mut self, page: PageId, original: SourceContent) {
        self.page = page;
        self.original = Some(original);
        self.state = ViewState::Original;
    }

    /// Switches back to the untransformed rendition.
    pub fn show_original(&mut self) {
        self.state = ViewState::Original;
    }

    /// Marks a transform as in flight. The surface hides the original
    /// until `complete` or `fail` arrives.
    pub fn start_loading(&mut self, mode: ContentMode) {
        self.state = ViewState::Loading { mode };
    }

    /// Applies a finished transform.
    ///
    /// Returns `false` (and changes nothing) when the completion is tagged
    /// with a page other than the one on screen.
    pub fn complete(&mut self, page: &PageId, mode: ContentMode, text: String) -> bool {
        if *page != self.page {
            return false;
        }
        self.state = ViewState::Ready { mode, text };
        true
    }

    /// Records a transform failure, page-guarded like `complete`.
    pub fn fail(&mut self, page: &PageId, mode: ContentMode, reason: LecternError) -> bool {
        if *page != self.page {
            return false;
        }
        self.state = ViewState::Failed { mode, reason };
        true
    }

    /// Acknowledges a failure: returns the error once and reverts the
    /// surface to the original rendition.
    pub fn take_failure(&mut self) -> Option<LecternError> {
        if let ViewState::Failed { reason, .. } = &self.state {
            let reason = reason.clone();
            self.state = ViewState::Original;
            return Some(reason);
        }
        None
    }

    /// True while the original content must not be shown.
    pub fn original_hidden(&self) -> bool {
        !matches!(self.state, ViewState::Original)
    }

    /// The text the surface should display, when any is displayable.
    pub fn display_text(&self) -> Option<&str> {
        match &self.state {
            ViewState::Original => self.original.as_ref().map(|c| c.as_str()),
            ViewState::Ready { text, .. } => Some(text),
            ViewState::Loading { .. } | ViewState::Failed { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> ModeView {
        let mut view = ModeView::new(PageId::new("/docs/intro"));
        view.begin_page(
            PageId::new("/docs/intro"),
            SourceContent::new("# Intro\n\nHello.").unwrap(),
        );
        view
    }

    #[test]
    fn fresh_page_shows_the_original() {
        let view = view();
        assert_eq!(*view.state(), ViewState::Original);
        assert_eq!(view.display_text(), Some("# Intro\n\nHello."));
        assert!(!view.original_hidden());
    }

    #[test]
    fn loading_hides_the_original_until_completion() {
        let mut view = view();
        view.start_loading(ContentMode::Summary);
        assert!(view.original_hidden());
        assert_eq!(view.display_text(), None);

        let applied = view.complete(
            &PageId::new("/docs/intro"),
            ContentMode::Summary,
            "Short version.".to_string(),
        );
        assert!(applied);
        assert_eq!(view.display_text(), Some("Short version."));
    }

    #[test]
    fn completion_for_another_page_is_ignored() {
        let mut view = view();
        view.start_loading(ContentMode::Translation);

        let applied = view.complete(
            &PageId::new("/docs/other"),
            ContentMode::Translation,
            "stale".to_string(),
        );

        assert!(!applied);
        assert_eq!(
            *view.state(),
            ViewState::Loading {
                mode: ContentMode::Translation
            }
        );
    }

    #[test]
    fn failure_reverts_to_original_once_acknowledged() {
        let mut view = view();
        view.start_loading(ContentMode::Summary);
        view.fail(
            &PageId::new("/docs/intro"),
            ContentMode::Summary,
            LecternError::transform_status(500, "upstream error", true),
        );
        assert!(view.original_hidden());

        let reason = view.take_failure().unwrap();
        assert!(reason.is_transform());
        assert_eq!(*view.state(), ViewState::Original);
        assert!(view.take_failure().is_none());
    }

    #[test]
    fn navigation_resets_state_and_content() {
        let mut view = view();
        view.start_loading(ContentMode::Summary);

        view.begin_page(
            PageId::new("/docs/next"),
            SourceContent::new("Next chapter.").unwrap(),
        );

        assert_eq!(*view.state(), ViewState::Original);
        assert_eq!(view.display_text(), Some("Next chapter."));
        // A completion for the old page no longer applies.
        assert!(!view.complete(
            &PageId::new("/docs/intro"),
            ContentMode::Summary,
            "late".to_string()
        ));
    }

    #[test]
    fn show_original_discards_a_ready_rendition() {
        let mut view = view();
        view.start_loading(ContentMode::Summary);
        view.complete(
            &PageId::new("/docs/intro"),
            ContentMode::Summary,
            "Short.".to_string(),
        );

        view.show_original();
        assert_eq!(view.display_text(), Some("# Intro\n\nHello."));
    }
}
