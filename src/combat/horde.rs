//! Enemy archetypes and the hordes built from them.
//!
//! Archetypes are immutable reference data. A horde refers to them by
//! [`ArchetypeId`]; everything a simulation pass writes lives in
//! [`MemberState`], which is rebuilt on every pass.

#![allow(clippy::cast_precision_loss)]

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Catalog entry for an enemy type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyArchetype {
    /// Unique key, e.g. `devilOrc`.
    pub name: String,
    /// Maximum health.
    pub health: f64,
    /// Path units per second.
    pub speed: f64,
    /// Gold awarded on kill.
    #[serde(default)]
    pub gold: u32,
    /// Lives taken when the enemy reaches the end of the route.
    #[serde(default = "default_lifes")]
    pub lifes: u32,
}

fn default_lifes() -> u32 {
    1
}

impl EnemyArchetype {
    /// Create an archetype with the default bounty and life cost.
    #[must_use]
    pub fn new(name: impl Into<String>, health: f64, speed: f64) -> Self {
        Self {
            name: name.into(),
            health,
            speed,
            gold: 0,
            lifes: default_lifes(),
        }
    }

    /// Seconds to walk a path of `path_len` points after spawning.
    ///
    /// Infinite for non-positive speeds.
    #[must_use]
    pub fn travel_time(&self, path_len: usize) -> f64 {
        if self.speed > 0.0 {
            path_len as f64 / self.speed
        } else {
            f64::INFINITY
        }
    }
}

/// Index of an archetype in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArchetypeId(pub usize);

/// One enemy of a horde, scheduled on the route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HordeMember {
    /// Which catalog entry this enemy is.
    pub archetype: ArchetypeId,
    /// Seconds after the wave starts at which the enemy enters the route.
    pub spawn_time: f64,
}

/// Ordered enemies of a wave.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Horde {
    /// Members in spawn order.
    pub members: Vec<HordeMember>,
}

impl Horde {
    /// Schedule `archetypes` at fixed `spacing_time` intervals.
    #[must_use]
    pub fn scheduled(archetypes: &[ArchetypeId], spacing_time: f64) -> Self {
        let members = archetypes
            .iter()
            .enumerate()
            .map(|(index, &archetype)| HordeMember {
                archetype,
                spawn_time: index as f64 * spacing_time,
            })
            .collect();
        Self { members }
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the horde has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Latest `travel_time + spawn_time` over all members.
    ///
    /// Infinite if any member cannot move; zero for an empty horde.
    #[must_use]
    pub fn max_end_time(&self, catalog: &[EnemyArchetype], path_len: usize) -> f64 {
        self.members
            .iter()
            .map(|m| catalog[m.archetype.0].travel_time(path_len) + m.spawn_time)
            .fold(0.0, f64::max)
    }

    /// Simulation horizon: like [`Horde::max_end_time`] but ignoring members
    /// that never finish the route.
    #[must_use]
    pub fn horizon(&self, catalog: &[EnemyArchetype], path_len: usize) -> f64 {
        self.members
            .iter()
            .map(|m| catalog[m.archetype.0].travel_time(path_len) + m.spawn_time)
            .filter(|t| t.is_finite())
            .fold(0.0, f64::max)
    }
}

/// Per-member scratch written by one simulation pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MemberState {
    /// Shots landed, keyed by tower position.
    pub hits: BTreeMap<u32, u32>,
    /// Health left, never below zero.
    pub health_remaining: f64,
    /// Set once `health_remaining` reaches zero.
    pub is_dead: bool,
    /// Raw damage from all hits, including overkill on the final one.
    pub damage_taken: f64,
}

impl MemberState {
    /// Fresh state for an enemy with `health`.
    #[must_use]
    pub fn fresh(health: f64) -> Self {
        let health = health.max(0.0);
        Self {
            hits: BTreeMap::new(),
            health_remaining: health,
            is_dead: health <= 0.0,
            damage_taken: 0.0,
        }
    }

    /// Record a hit from the tower at `position`.
    pub fn apply_hit(&mut self, position: u32, damage: f64) {
        *self.hits.entry(position).or_insert(0) += 1;
        self.damage_taken += damage;
        self.health_remaining = (self.health_remaining - damage).max(0.0);
        if self.health_remaining <= 0.0 {
            self.health_remaining = 0.0;
            self.is_dead = true;
        }
    }

    /// Damage credited to this member, capped at its maximum health.
    #[must_use]
    pub fn capped_damage(&self, max_health: f64) -> f64 {
        self.damage_taken.min(max_health)
    }

    /// Total shots landed from every tower.
    #[must_use]
    pub fn hit_count(&self) -> u32 {
        self.hits.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheduled_spawn_times() {
        let ids = [ArchetypeId(0), ArchetypeId(1), ArchetypeId(0)];
        let horde = Horde::scheduled(&ids, 1.5);
        let spawns: Vec<f64> = horde.members.iter().map(|m| m.spawn_time).collect();
        assert_eq!(spawns, vec![0.0, 1.5, 3.0]);
    }

    #[test]
    fn test_end_times() {
        let catalog = vec![
            EnemyArchetype::new("orc", 10.0, 10.0),
            EnemyArchetype::new("rock", 10.0, 0.0),
        ];
        let moving = Horde::scheduled(&[ArchetypeId(0), ArchetypeId(0)], 2.0);
        assert!((moving.max_end_time(&catalog, 50) - 7.0).abs() < 1e-12);
        assert!((moving.horizon(&catalog, 50) - 7.0).abs() < 1e-12);

        let stuck = Horde::scheduled(&[ArchetypeId(0), ArchetypeId(1)], 2.0);
        assert!(stuck.max_end_time(&catalog, 50).is_infinite());
        assert!((stuck.horizon(&catalog, 50) - 5.0).abs() < 1e-12);

        assert!(Horde::default().max_end_time(&catalog, 50).abs() < f64::EPSILON);
    }

    #[test]
    fn test_apply_hit_floors_at_zero() {
        let mut state = MemberState::fresh(15.0);
        state.apply_hit(1, 10.0);
        assert!(!state.is_dead);
        state.apply_hit(1, 10.0);
        assert!(state.is_dead);
        assert!(state.health_remaining.abs() < f64::EPSILON);
        assert!((state.damage_taken - 20.0).abs() < f64::EPSILON);
        assert!((state.capped_damage(15.0) - 15.0).abs() < f64::EPSILON);
        assert_eq!(state.hits.get(&1), Some(&2));
    }

    #[test]
    fn test_archetype_defaults_from_json() {
        let parsed: EnemyArchetype =
            serde_json::from_str(r#"{"name":"orc","health":50,"speed":1}"#).expect("parse");
        assert_eq!(parsed.gold, 0);
        assert_eq!(parsed.lifes, 1);
    }
}
