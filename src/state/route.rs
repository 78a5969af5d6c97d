use std::fmt;

use url::Url;

use super::waypoints::EntryDirection;

const ROUTE_BASE: &str = "http://village.local/";

/// Pages reachable in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Map,
    Projects,
    About,
    Contact,
}

impl Page {
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/projects" => Page::Projects,
            "/about" => Page::About,
            "/contact" => Page::Contact,
            _ => Page::Map,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Page::Map => "/",
            Page::Projects => "/projects",
            Page::About => "/about",
            Page::Contact => "/contact",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Map => "Village",
            Page::Projects => "Projects",
            Page::About => "About",
            Page::Contact => "Contact",
        }
    }

    /// The door a page sits behind, used as the entry tag when leaving it
    pub fn door(&self) -> Option<EntryDirection> {
        match self {
            Page::Map => None,
            Page::Projects => Some(EntryDirection::Left),
            Page::About => Some(EntryDirection::Up),
            Page::Contact => Some(EntryDirection::Right),
        }
    }

    /// The page behind a door
    pub fn behind(entry: EntryDirection) -> Self {
        match entry {
            EntryDirection::Left => Page::Projects,
            EntryDirection::Up => Page::About,
            EntryDirection::Right => Page::Contact,
        }
    }
}

/// A parsed navigation target such as `/about?entry=up`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Route {
    pub page: Page,
    pub entry: Option<EntryDirection>,
}

impl Route {
    pub fn new(page: Page, entry: Option<EntryDirection>) -> Self {
        Self { page, entry }
    }

    /// Parse a path with an optional query.
    ///
    /// Unknown paths land on the map and unknown entry tags are dropped.
    pub fn parse(target: &str) -> Self {
        let Ok(url) = Url::parse(ROUTE_BASE).and_then(|base| base.join(target)) else {
            return Self::default();
        };

        let entry = url
            .query_pairs()
            .find(|(key, _)| key == "entry")
            .and_then(|(_, value)| value.parse().ok());

        Self {
            page: Page::from_path(url.path()),
            entry,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.entry {
            Some(entry) => write!(f, "{}?entry={}", self.page.path(), entry),
            None => f.write_str(self.page.path()),
        }
    }
}

/// Build the router target for a walk: `<path>?entry=<tag>`
pub fn entry_target(path: &str, entry: EntryDirection) -> String {
    format!("{}?entry={}", path, entry)
}
