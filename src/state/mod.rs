pub mod mascot;
pub mod route;
pub mod viewport;
pub mod waypoints;

pub use mascot::{Direction, MascotSprite, Pose, PositionState, DEFAULT_SIZE};
pub use route::{entry_target, Page, Route};
pub use viewport::{ViewportMode, ViewportWatcher};
pub use waypoints::{hotspot_at, EntryDirection, Hotspot, WaypointTable, Waypoints};
