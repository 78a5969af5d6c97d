use std::path::PathBuf;

use thiserror::Error;

use crate::state::{EntryDirection, ViewportMode};

/// Errors raised while loading or validating the village configuration.
///
/// Any of these aborts startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no {entry} waypoint configured for {mode} layout")]
    MissingWaypoint {
        mode: ViewportMode,
        entry: EntryDirection,
    },

    #[error("{mode} layout: {what} is not a finite percentage")]
    NonFiniteCoordinate {
        mode: ViewportMode,
        what: &'static str,
    },

    #[error("{mode} layout has no hotspots")]
    NoHotspots { mode: ViewportMode },

    #[error("invalid timing: {0}")]
    InvalidTiming(&'static str),

    #[error("breakpoint and cell width must be positive")]
    InvalidBreakpoint,
}

/// Errors from the walk choreography
#[derive(Debug, Error, PartialEq)]
pub enum ChoreographyError {
    #[error("no {entry} waypoint for {mode} layout")]
    MissingWaypoint {
        mode: ViewportMode,
        entry: EntryDirection,
    },
}

/// Errors surfaced to the user by the contact page
#[derive(Debug, Error)]
pub enum ContactError {
    #[error("{0}")]
    Invalid(&'static str),

    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("could not reach the server: {0}")]
    Transport(#[from] reqwest::Error),
}
