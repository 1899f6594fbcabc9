//! Map geometry: the enemy route and where towers stand.

mod layout;
mod path;

pub use layout::{MapLayout, TowerRecord, TowerSlot, TowerZone};
pub use path::{interpolate, PathPoint, Waypoint, DEFAULT_STEP};
