//! URL ↔ store synchronization for the workspace content panel.
//!
//! URL changes always flow into the store (except `Empty`, which would clobber a
//! valid tab with a transient state). Store changes reach the URL only through
//! [`NavigationController::navigate_to_content`].

use serde::Serialize;

use super::content::{content_from_query, ContentType, Location, CONTENT_PARAM};

/// Receiver of content updates for the active tab
pub trait ContentStore {
    fn update_active_tab_content(&mut self, content: ContentType);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavigateOptions {
    pub scroll: bool,
}

/// Client-side URL updates (history push without reload)
pub trait Navigator {
    fn push(&mut self, url: &str, options: NavigateOptions);
}

/// Push `location` with `content` set, keeping every other query parameter.
/// `Empty` has no URL value, so it removes the parameter instead.
/// Returns the URL that was pushed.
pub fn set_content_in_url<N: Navigator + ?Sized>(
    content: ContentType,
    navigator: &mut N,
    location: &Location,
) -> String {
    let mut next = location.clone();
    if content.is_empty() {
        next.params.remove(CONTENT_PARAM);
    } else {
        next.params.set(CONTENT_PARAM, content.as_str());
    }
    let url = next.href();
    navigator.push(&url, NavigateOptions { scroll: false });
    url
}

#[derive(Debug, Clone, Default)]
pub struct NavigationController {
    /// Content shown by the active tab, as far as the controller knows
    current: ContentType,
    /// Last URL-derived value that was observed or written; suppresses feedback
    last_applied: Option<ContentType>,
}

impl NavigationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> ContentType {
        self.current
    }

    /// Focus moved to a tab showing `content`. Nothing is written or pushed;
    /// the next `navigate_to_content` compares against this tab.
    pub fn focus(&mut self, content: ContentType) {
        self.current = content;
    }

    /// React to an observed URL (deep link, back/forward, commit of our own push).
    /// Returns the content written to the store, if any.
    pub fn sync_from_url<S: ContentStore + ?Sized>(
        &mut self,
        location: &Location,
        store: &mut S,
    ) -> Option<ContentType> {
        let content = content_from_query(&location.params);
        if self.last_applied == Some(content) {
            return None;
        }

        self.last_applied = Some(content);
        self.current = content;

        if content.is_empty() {
            return None;
        }

        tracing::debug!("URL content changed to {}; updating store", content);
        store.update_active_tab_content(content);
        Some(content)
    }

    /// Switch to `content`: store first, then URL. No-op when already there.
    /// The push is skipped when the URL already carries `content`.
    /// Returns the pushed URL when a history entry was created.
    pub fn navigate_to_content<S, N>(
        &mut self,
        content: ContentType,
        store: &mut S,
        navigator: &mut N,
        location: &Location,
    ) -> Option<String>
    where
        S: ContentStore + ?Sized,
        N: Navigator + ?Sized,
    {
        if content == self.current {
            return None;
        }

        store.update_active_tab_content(content);
        self.current = content;
        if content_from_query(&location.params) == content {
            return None;
        }

        let url = set_content_in_url(content, navigator, location);
        self.last_applied = Some(content);
        Some(url)
    }
}
