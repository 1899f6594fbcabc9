//! Horde assembly and the response shape.
//!
//! The winning genome is scheduled and simulated once more so the report
//! carries the hit log of exactly the horde that is returned.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::gp::{EvolutionOutcome, FitnessEvaluator};
use crate::map::TowerZone;

/// One enemy of the returned wave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpawnedEnemy {
    /// 1-based position in the wave.
    pub id: usize,
    /// Archetype name.
    pub name: String,
    /// Seconds after wave start.
    pub spawn_time: f64,
    /// Path units per second.
    pub speed: f64,
    /// Maximum health.
    pub health: f64,
}

/// Projected combat outcome for one enemy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyHits {
    /// Matches [`SpawnedEnemy::id`].
    pub id: usize,
    /// Archetype name.
    pub name: String,
    /// Shots landed, keyed by tower position.
    pub hits: BTreeMap<u32, u32>,
    /// Raw damage received, overkill included.
    pub damage_taken: f64,
    /// Whether the towers killed it.
    pub is_dead: bool,
}

/// Result of one horde request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HordeReport {
    /// Number of points on the dense route the enemies walk.
    pub path_pixels: usize,
    /// Towers that took part, in slot order.
    pub towers: Vec<TowerZone>,
    /// The wave, in spawn order.
    pub enemies: Vec<SpawnedEnemy>,
    /// Sum of enemy health.
    pub total_health: f64,
    /// Sum of capped damage the towers are projected to deal.
    pub total_damage: f64,
    /// `total_health - total_damage * ratio`.
    pub diff: f64,
    /// Fitness of the wave; absent when no feasible wave was found.
    pub best_fitness: Option<f64>,
    /// Breeding rounds run.
    pub generations: usize,
    /// Whether the wave meets the target ratio.
    pub feasible: bool,
    /// Per-enemy projection, kept out of the response body.
    #[serde(skip)]
    pub hit_log: Vec<EnemyHits>,
}

impl HordeReport {
    /// Re-simulate the winner of `outcome` and build the report.
    #[must_use]
    pub fn assemble(evaluator: &FitnessEvaluator<'_>, outcome: &EvolutionOutcome) -> Self {
        let simulator = evaluator.simulator();
        let catalog = simulator.catalog();
        let evaluation = evaluator.evaluate(&outcome.best);

        let mut enemies = Vec::with_capacity(evaluation.horde.len());
        let mut hit_log = Vec::with_capacity(evaluation.horde.len());
        for (i, (member, state)) in evaluation.horde.members.iter().zip(&evaluation.states).enumerate() {
            let archetype = &catalog[member.archetype.0];
            enemies.push(SpawnedEnemy {
                id: i + 1,
                name: archetype.name.clone(),
                spawn_time: member.spawn_time,
                speed: archetype.speed,
                health: archetype.health,
            });
            hit_log.push(EnemyHits {
                id: i + 1,
                name: archetype.name.clone(),
                hits: state.hits.clone(),
                damage_taken: state.damage_taken,
                is_dead: state.is_dead,
            });
        }

        let feasible = evaluation.fitness.is_finite();
        Self {
            path_pixels: simulator.path_len(),
            towers: simulator.towers().to_vec(),
            enemies,
            total_health: evaluation.total_health,
            total_damage: evaluation.total_damage,
            diff: evaluation.total_health - evaluation.total_damage * evaluator.upgrade_ratio(),
            best_fitness: feasible.then_some(evaluation.fitness),
            generations: outcome.stats.generations_run,
            feasible,
            hit_log,
        }
    }
}
