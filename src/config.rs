//! Request configuration.
//!
//! Parameters and scenarios are plain serde structs so the CLI can read
//! them from JSON. JSON keys are camelCase.

// Route lengths and horde sizes are bounded well below 2^52
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::combat::{DamageTable, Discipline, EnemyArchetype, STEP_SECONDS};
use crate::error::{HordeError, HordeResult};
use crate::gp::{EvolutionConfig, SelectionConfig};
use crate::map::{MapLayout, TowerRecord};
use crate::scaling::Progression;

/// Shortest accepted interval between tower shots, in seconds.
///
/// Non-positive intervals are still accepted and mean the tower never
/// fires.
pub const MIN_FIRE_RATE: f64 = STEP_SECONDS;

/// Longest accepted simulation horizon, in seconds: the last spawn of a
/// full-size horde plus the slowest finite route walk.
pub const MAX_HORIZON_SECONDS: f64 = 3600.0;

/// Longest accepted route, in screen units (one path point per unit).
pub const MAX_ROUTE_LENGTH: f64 = 100_000.0;

/// Tunables of one horde request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HordeParams {
    /// Seconds between consecutive spawns.
    pub spacing_time: f64,
    /// Longest horde the search may produce.
    pub max_horde_size: usize,
    /// Candidates per generation.
    pub population_size: usize,
    /// Breeding rounds.
    pub generations: usize,
    /// Per-gene mutation probability.
    pub mutation_rate: f64,
    /// Candidates copied unchanged into the next generation.
    pub elite_count: usize,
    /// Candidates drawn per tournament.
    pub tournament_size: usize,
    /// Target damage/health ratio.
    pub upgrade_ratio: f64,
    /// Selects stepwise combat timing.
    pub hard_mode: bool,
}

impl Default for HordeParams {
    fn default() -> Self {
        Self {
            spacing_time: 1.5,
            max_horde_size: 10,
            population_size: 30,
            generations: 50,
            mutation_rate: 0.1,
            elite_count: 1,
            tournament_size: 3,
            upgrade_ratio: 1.0,
            hard_mode: false,
        }
    }
}

impl HordeParams {
    /// Check every parameter.
    ///
    /// # Errors
    ///
    /// Returns [`HordeError::InvalidParams`] naming the first bad value.
    pub fn validate(&self) -> HordeResult<()> {
        if !(self.spacing_time.is_finite() && self.spacing_time >= 0.0) {
            return Err(HordeError::InvalidParams(format!(
                "spacing time {} must be finite and non-negative",
                self.spacing_time
            )));
        }
        if !(self.upgrade_ratio.is_finite() && self.upgrade_ratio >= 0.0) {
            return Err(HordeError::InvalidParams(format!(
                "upgrade ratio {} must be finite and non-negative",
                self.upgrade_ratio
            )));
        }
        self.evolution_config().validate()
    }

    /// Search settings.
    #[must_use]
    pub fn evolution_config(&self) -> EvolutionConfig {
        EvolutionConfig {
            population_size: self.population_size,
            generations: self.generations,
            max_horde_size: self.max_horde_size,
            mutation_rate: self.mutation_rate,
            selection: SelectionConfig {
                tournament_size: self.tournament_size,
                elite_count: self.elite_count,
            },
        }
    }

    /// Combat timing for this request.
    #[must_use]
    pub fn discipline(&self) -> Discipline {
        Discipline::for_mode(self.hard_mode)
    }
}

/// Everything one horde generation needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HordeRequest {
    /// Towers deployed in the game.
    pub towers: Vec<TowerRecord>,
    /// Enemy archetypes to draw from.
    pub catalog: Vec<EnemyArchetype>,
    /// Map; the shipped map when absent.
    #[serde(default)]
    pub map: MapLayout,
    /// Resistance table; the standard one when absent.
    #[serde(default)]
    pub damage_table: Option<DamageTable>,
    /// Search and scaling parameters.
    #[serde(default)]
    pub params: HordeParams,
}

impl HordeRequest {
    /// Request on the shipped map with default parameters.
    #[must_use]
    pub fn new(towers: Vec<TowerRecord>, catalog: Vec<EnemyArchetype>) -> Self {
        Self {
            towers,
            catalog,
            map: MapLayout::default(),
            damage_table: None,
            params: HordeParams::default(),
        }
    }

    /// Check the request before any path is built or combat is run.
    ///
    /// Bounds route length, tower cadence and the simulation horizon so
    /// one request's cost stays proportional to its search budget.
    ///
    /// # Errors
    ///
    /// Returns [`HordeError::EmptyCatalog`] for an empty catalog and
    /// [`HordeError::InvalidParams`] for bad parameters, an oversized
    /// route, a tower firing faster than [`MIN_FIRE_RATE`], or archetypes
    /// slow enough to push the horizon past [`MAX_HORIZON_SECONDS`].
    pub fn validate(&self) -> HordeResult<()> {
        if self.catalog.is_empty() {
            return Err(HordeError::EmptyCatalog);
        }
        self.params.validate()?;

        let route = self.map.route_length();
        if !(route.is_finite() && route <= MAX_ROUTE_LENGTH) {
            return Err(HordeError::InvalidParams(format!(
                "route length {route} exceeds {MAX_ROUTE_LENGTH}"
            )));
        }

        if let Some(tower) = self
            .towers
            .iter()
            .find(|t| t.fire_rate.is_finite() && t.fire_rate > 0.0 && t.fire_rate < MIN_FIRE_RATE)
        {
            return Err(HordeError::InvalidParams(format!(
                "tower {} at slot {} fires every {}s; minimum is {MIN_FIRE_RATE}s",
                tower.name, tower.position, tower.fire_rate
            )));
        }

        // One point per unit plus one per waypoint join bounds the dense path
        let path_len = route.ceil() as usize + self.map.waypoints.len();
        let slowest = self
            .catalog
            .iter()
            .map(|e| e.travel_time(path_len))
            .filter(|t| t.is_finite())
            .fold(0.0, f64::max);
        let last_spawn = self.params.spacing_time * self.params.max_horde_size.saturating_sub(1) as f64;
        if last_spawn + slowest > MAX_HORIZON_SECONDS {
            return Err(HordeError::InvalidParams(format!(
                "horde would take {:.0}s to clear the route; maximum is {MAX_HORIZON_SECONDS}s",
                last_spawn + slowest
            )));
        }
        Ok(())
    }

    /// The resistance table in effect.
    #[must_use]
    pub fn damage_table(&self) -> &DamageTable {
        self.damage_table.as_ref().unwrap_or(DamageTable::standard())
    }
}

/// A request file, optionally carrying game progression.
///
/// When `progression` is present it overrides `params.upgradeRatio` and
/// `params.hardMode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// The request itself.
    #[serde(flatten)]
    pub request: HordeRequest,
    /// Game progress used to derive the ratio.
    #[serde(default)]
    pub progression: Option<Progression>,
}

impl Scenario {
    /// Read a scenario from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> HordeResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parse a scenario from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a scenario.
    pub fn from_json(text: &str) -> HordeResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Resolve progression into the request parameters.
    #[must_use]
    pub fn into_request(self) -> HordeRequest {
        let mut request = self.request;
        if let Some(progression) = self.progression {
            request.params.upgrade_ratio = progression.upgrade_ratio();
            request.params.hard_mode = progression.hard_mode;
        }
        request
    }

    /// Round number for quality logging, zero without progression.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.progression.map_or(0, |p| p.round)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Waypoint;

    #[test]
    fn test_defaults_are_valid() {
        assert!(HordeParams::default().validate().is_ok());
        assert_eq!(HordeParams::default().discipline(), Discipline::EventScheduled);
    }

    #[test]
    fn test_invalid_params() {
        let bad = [
            HordeParams { spacing_time: -1.0, ..HordeParams::default() },
            HordeParams { upgrade_ratio: f64::NAN, ..HordeParams::default() },
            HordeParams { max_horde_size: 0, ..HordeParams::default() },
            HordeParams { population_size: 0, ..HordeParams::default() },
            HordeParams { mutation_rate: -0.1, ..HordeParams::default() },
        ];
        for params in bad {
            assert!(matches!(params.validate(), Err(HordeError::InvalidParams(_))), "{params:?}");
        }
    }

    #[test]
    fn test_partial_params_from_json() {
        let params: HordeParams =
            serde_json::from_str(r#"{"generations": 5, "hardMode": true}"#).expect("parse");
        assert_eq!(params.generations, 5);
        assert!(params.hard_mode);
        assert_eq!(params.population_size, 30);
        assert_eq!(params.discipline(), Discipline::Stepwise);
    }

    #[test]
    fn test_scenario_progression_overrides_ratio() {
        let json = r#"{
            "towers": [{"position": 1, "name": "stoneCannon", "damage": 10, "fireRate": 1, "range": 100}],
            "catalog": [{"name": "orc", "health": 50, "speed": 1}],
            "params": {"upgradeRatio": 3.0},
            "progression": {"round": 10, "gold": 2000, "hardMode": true}
        }"#;
        let scenario = Scenario::from_json(json).expect("parse");
        assert_eq!(scenario.round(), 10);
        assert_eq!(scenario.request.map, MapLayout::default());

        let request = scenario.into_request();
        assert!((request.params.upgrade_ratio - 0.81).abs() < 1e-12);
        assert!(request.params.hard_mode);
    }

    fn valid_request() -> HordeRequest {
        HordeRequest::new(
            vec![TowerRecord {
                position: 1,
                name: "stoneCannon".into(),
                damage: 10.0,
                fire_rate: 1.0,
                range: 100.0,
            }],
            vec![EnemyArchetype::new("devilOrc", 50.0, 30.0)],
        )
    }

    #[test]
    fn test_request_validation_accepts_shipped_map() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_request_rejects_empty_catalog() {
        let mut request = valid_request();
        request.catalog.clear();
        assert!(matches!(request.validate(), Err(HordeError::EmptyCatalog)));
    }

    #[test]
    fn test_request_rejects_tiny_fire_rate() {
        let mut request = valid_request();
        for rate in [1e-9, 1e-6, 0.05] {
            request.towers[0].fire_rate = rate;
            assert!(matches!(request.validate(), Err(HordeError::InvalidParams(_))), "{rate}");
        }
        // Idle towers are allowed
        for rate in [0.0, -1.0, f64::NAN, MIN_FIRE_RATE] {
            request.towers[0].fire_rate = rate;
            assert!(request.validate().is_ok(), "{rate}");
        }
    }

    #[test]
    fn test_request_rejects_unbounded_horizon() {
        let mut request = valid_request();
        request.catalog.push(EnemyArchetype::new("snail", 10.0, 1e-6));
        assert!(matches!(request.validate(), Err(HordeError::InvalidParams(_))));

        // Standing still never ends, so it does not stretch the horizon
        request.catalog[1].speed = 0.0;
        assert!(request.validate().is_ok());

        request.params.spacing_time = 1000.0;
        assert!(matches!(request.validate(), Err(HordeError::InvalidParams(_))));
    }

    #[test]
    fn test_request_rejects_huge_route() {
        let mut request = valid_request();
        request.map.waypoints = vec![Waypoint::new(0.0, 0.0), Waypoint::new(1e12, 0.0)];
        assert!(matches!(request.validate(), Err(HordeError::InvalidParams(_))));

        request.map.waypoints[1].x = f64::INFINITY;
        assert!(matches!(request.validate(), Err(HordeError::InvalidParams(_))));
    }

    #[test]
    fn test_request_uses_standard_table_by_default() {
        let request = HordeRequest::new(Vec::new(), Vec::new());
        assert_eq!(request.damage_table(), DamageTable::standard());
    }
}
