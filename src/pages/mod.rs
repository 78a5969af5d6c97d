pub mod contact;
pub mod content;
pub mod map;

pub use contact::{ContactClient, ContactField, ContactPage, SubmitStatus};
pub use map::MapView;

use std::time::Duration;

use crate::animation::PageReveal;
use crate::choreography::Router;
use crate::state::{EntryDirection, Page, Route};

/// Tracks the visible page and the black reveal shown on every change.
///
/// Navigation requests are queued and applied by the app between frames, so
/// a page never changes underneath the view that asked for it.
pub struct PageRouter {
    current: Route,
    pending: Option<Route>,
    reveal: PageReveal,
}

impl PageRouter {
    pub fn new(initial: Route, fade: Duration) -> Self {
        Self {
            current: initial,
            pending: None,
            reveal: PageReveal::new(fade),
        }
    }

    pub fn current(&self) -> &Route {
        &self.current
    }

    pub fn reveal(&self) -> &PageReveal {
        &self.reveal
    }

    pub fn tick(&mut self, dt: Duration) {
        self.reveal.tick(dt);
    }

    /// Jump through an edge arrow to the page behind `entry`
    pub fn go_through(&mut self, entry: EntryDirection) {
        let route = Route::new(Page::behind(entry), Some(entry));
        self.navigate(&route.to_string());
    }

    /// Leave a content page for the map, tagged with the page's own door
    pub fn back_to_map(&mut self) {
        let route = Route::new(Page::Map, self.current.page.door());
        self.navigate(&route.to_string());
    }

    /// Apply a queued navigation; returns `(from, to)` when the page changed
    pub fn apply_pending(&mut self) -> Option<(Route, Route)> {
        let next = self.pending.take()?;
        let previous = std::mem::replace(&mut self.current, next);
        self.reveal.restart();
        tracing::info!(from = %previous, to = %next, "page changed");
        Some((previous, next))
    }
}

impl Router for PageRouter {
    fn navigate(&mut self, target: &str) {
        let route = Route::parse(target);
        tracing::debug!(target_route = target, parsed = %route, "navigation requested");
        self.pending = Some(route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_applies_between_frames() {
        let mut router = PageRouter::new(Route::default(), Duration::from_millis(500));
        router.navigate("/about?entry=up");
        assert_eq!(router.current().page, Page::Map);

        let (from, to) = router.apply_pending().unwrap();
        assert_eq!(from.page, Page::Map);
        assert_eq!(to, Route::new(Page::About, Some(EntryDirection::Up)));
        assert!(!router.reveal().content_visible());
        assert!(router.apply_pending().is_none());
    }

    #[test]
    fn test_back_to_map_carries_door() {
        let mut router = PageRouter::new(Route::parse("/contact?entry=right"), Duration::ZERO);
        router.back_to_map();
        let (_, to) = router.apply_pending().unwrap();
        assert_eq!(to, Route::new(Page::Map, Some(EntryDirection::Right)));
    }

    #[test]
    fn test_edge_arrow_targets() {
        let mut router = PageRouter::new(Route::parse("/about"), Duration::ZERO);
        router.go_through(EntryDirection::Left);
        let (_, to) = router.apply_pending().unwrap();
        assert_eq!(to.to_string(), "/projects?entry=left");
    }
}
