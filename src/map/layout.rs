//! Map layout: the enemy route and the fixed tower slots.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::map::path::{interpolate, PathPoint, Waypoint, DEFAULT_STEP};

/// A tower as stored by the game's data layer.
///
/// Persisted coordinates are ignored; the slot table decides where a
/// tower stands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TowerRecord {
    /// Slot number on the map.
    pub position: u32,
    /// Tower type key, e.g. `mortar`.
    pub name: String,
    /// Damage per shot.
    pub damage: f64,
    /// Seconds between shots.
    #[serde(alias = "fire_rate")]
    pub fire_rate: f64,
    /// Reach in screen units.
    pub range: f64,
}

/// Screen coordinates of a tower slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TowerSlot {
    /// Slot number.
    pub position: u32,
    /// Horizontal screen coordinate.
    pub x: f64,
    /// Vertical screen coordinate.
    pub y: f64,
}

/// A deployed tower projected onto the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TowerZone {
    /// Slot number, unique per map.
    pub position: u32,
    /// Tower type key.
    pub name: String,
    /// Horizontal screen coordinate of the slot.
    pub x: f64,
    /// Vertical screen coordinate of the slot.
    pub y: f64,
    /// Reach in screen units.
    pub range: f64,
    /// Damage per shot.
    pub damage: f64,
    /// Seconds between shots; keeps the game's `fire_rate` key in reports.
    #[serde(rename = "fire_rate")]
    pub fire_rate: f64,
}

/// Static description of a map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapLayout {
    /// Enemy route, start to end.
    pub waypoints: Vec<Waypoint>,
    /// Tower slots.
    pub slots: Vec<TowerSlot>,
}

const DEFAULT_ROUTE: [(f64, f64); 10] = [
    (160.0, 740.0),
    (160.0, 600.0),
    (260.0, 600.0),
    (260.0, 222.0),
    (815.0, 222.0),
    (815.0, 170.0),
    (850.0, 170.0),
    (850.0, 140.0),
    (1020.0, 140.0),
    (1020.0, 0.0),
];

const DEFAULT_SLOTS: [(u32, f64, f64); 7] = [
    (1, 255.0, 670.0),
    (2, 350.0, 445.0),
    (3, 190.0, 415.0),
    (4, 287.0, 157.0),
    (5, 607.0, 157.0),
    (6, 672.0, 285.0),
    (7, 895.0, 95.0),
];

impl Default for MapLayout {
    fn default() -> Self {
        Self {
            waypoints: DEFAULT_ROUTE.iter().map(|&(x, y)| Waypoint::new(x, y)).collect(),
            slots: DEFAULT_SLOTS
                .iter()
                .map(|&(position, x, y)| TowerSlot { position, x, y })
                .collect(),
        }
    }
}

impl MapLayout {
    /// Total length of the route in screen units.
    #[must_use]
    pub fn route_length(&self) -> f64 {
        self.waypoints
            .windows(2)
            .map(|pair| (pair[1].x - pair[0].x).hypot(pair[1].y - pair[0].y))
            .sum()
    }

    /// Interpolate the route at unit spacing.
    #[must_use]
    pub fn full_path(&self) -> Vec<PathPoint> {
        interpolate(&self.waypoints, DEFAULT_STEP)
    }

    /// Join tower records against the slot table.
    ///
    /// Zones come out in slot order. Records without a slot are dropped,
    /// and when several records claim a slot the first one wins.
    #[must_use]
    pub fn project_towers(&self, records: &[TowerRecord]) -> Vec<TowerZone> {
        let mut seen = HashSet::new();
        self.slots
            .iter()
            .filter(|slot| seen.insert(slot.position))
            .filter_map(|slot| {
                let record = records.iter().find(|r| r.position == slot.position)?;
                Some(TowerZone {
                    position: slot.position,
                    name: record.name.clone(),
                    x: slot.x,
                    y: slot.y,
                    range: record.range,
                    damage: record.damage,
                    fire_rate: record.fire_rate,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(position: u32, name: &str) -> TowerRecord {
        TowerRecord {
            position,
            name: name.to_string(),
            damage: 10.0,
            fire_rate: 1.0,
            range: 100.0,
        }
    }

    #[test]
    fn test_default_layout() {
        let layout = MapLayout::default();
        assert_eq!(layout.waypoints.len(), 10);
        assert_eq!(layout.slots.len(), 7);
        assert!(!layout.full_path().is_empty());
    }

    #[test]
    fn test_project_uses_slot_coordinates() {
        let layout = MapLayout::default();
        let zones = layout.project_towers(&[record(6, "mortar"), record(1, "stoneCannon")]);

        assert_eq!(zones.len(), 2);
        assert_eq!(zones[0].position, 1);
        assert_eq!(zones[0].name, "stoneCannon");
        assert!((zones[0].x - 255.0).abs() < f64::EPSILON);
        assert_eq!(zones[1].position, 6);
        assert!((zones[1].y - 285.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_project_drops_unknown_and_duplicates() {
        let layout = MapLayout::default();
        let zones = layout.project_towers(&[record(42, "inferno"), record(3, "a"), record(3, "b")]);

        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].name, "a");
    }

    #[test]
    fn test_route_length() {
        let layout = MapLayout {
            waypoints: vec![Waypoint::new(0.0, 0.0), Waypoint::new(3.0, 4.0), Waypoint::new(3.0, 14.0)],
            slots: Vec::new(),
        };
        assert!((layout.route_length() - 15.0).abs() < 1e-12);
        assert!(MapLayout { waypoints: Vec::new(), slots: Vec::new() }.route_length().abs() < f64::EPSILON);
    }

    #[test]
    fn test_zone_serializes_fire_rate_in_snake_case() {
        let zones = MapLayout::default().project_towers(&[record(2, "mortar")]);
        let json = serde_json::to_value(&zones[0]).expect("serialize");
        assert_eq!(json["fire_rate"], 1.0);
        assert!(json.get("fireRate").is_none());
    }

    #[test]
    fn test_record_accepts_snake_case_fire_rate() {
        let json = r#"{"position":2,"name":"canon","damage":12,"fire_rate":0.8,"range":50}"#;
        let parsed: TowerRecord = serde_json::from_str(json).expect("parse");
        assert!((parsed.fire_rate - 0.8).abs() < f64::EPSILON);
    }
}
