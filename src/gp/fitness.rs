//! Fitness evaluation for candidate hordes.
//!
//! A candidate is scheduled, run through the combat simulator and reduced
//! to one score. Hordes the towers cannot clear at the target ratio score
//! negative infinity; among the rest, matching the ratio dominates and
//! damage throughput breaks ties.

use crate::combat::{Horde, MemberState, Simulator};
use crate::gp::genome::Genome;

/// Weight of the deviation from the target ratio.
pub const RATIO_WEIGHT: f64 = 1000.0;

/// Weight of damage per second of wave duration.
pub const THROUGHPUT_WEIGHT: f64 = 1.0;

/// Reduce combat totals to a fitness score.
///
/// Returns negative infinity when `total_damage < total_health * ratio` or
/// when `max_end_time` is not a positive finite number.
#[must_use]
pub fn score(total_health: f64, total_damage: f64, max_end_time: f64, ratio: f64) -> f64 {
    if total_damage < total_health * ratio {
        return f64::NEG_INFINITY;
    }
    if !(max_end_time.is_finite() && max_end_time > 0.0) {
        return f64::NEG_INFINITY;
    }
    -RATIO_WEIGHT * (total_health - total_damage * ratio).abs()
        + THROUGHPUT_WEIGHT * (total_damage / max_end_time)
}

/// Everything learned from scoring one candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// The scheduled horde.
    pub horde: Horde,
    /// Per-member simulation outcome, in horde order.
    pub states: Vec<MemberState>,
    /// Sum of maximum health over all members.
    pub total_health: f64,
    /// Sum of per-member damage, each capped at that member's health.
    pub total_damage: f64,
    /// Latest time any member finishes the route.
    pub max_end_time: f64,
    /// Fitness score.
    pub fitness: f64,
}

/// Scores genomes against one tower layout.
#[derive(Debug, Clone)]
pub struct FitnessEvaluator<'a> {
    simulator: Simulator<'a>,
    spacing_time: f64,
    upgrade_ratio: f64,
}

impl<'a> FitnessEvaluator<'a> {
    /// Create an evaluator.
    #[must_use]
    pub fn new(simulator: Simulator<'a>, spacing_time: f64, upgrade_ratio: f64) -> Self {
        Self {
            simulator,
            spacing_time,
            upgrade_ratio,
        }
    }

    /// Underlying simulator.
    #[must_use]
    pub fn simulator(&self) -> &Simulator<'a> {
        &self.simulator
    }

    /// Target damage/health ratio.
    #[must_use]
    pub fn upgrade_ratio(&self) -> f64 {
        self.upgrade_ratio
    }

    /// Number of archetypes genes may refer to.
    #[must_use]
    pub fn catalog_len(&self) -> usize {
        self.simulator.catalog().len()
    }

    /// Schedule a genome at the configured spacing.
    #[must_use]
    pub fn schedule(&self, genome: &Genome) -> Horde {
        Horde::scheduled(&genome.genes, self.spacing_time)
    }

    /// Simulate and score a genome.
    #[must_use]
    pub fn evaluate(&self, genome: &Genome) -> Evaluation {
        let horde = self.schedule(genome);
        let states = self.simulator.simulate(&horde);
        let catalog = self.simulator.catalog();

        let mut total_health = 0.0;
        let mut total_damage = 0.0;
        for (member, state) in horde.members.iter().zip(&states) {
            let health = catalog[member.archetype.0].health;
            total_health += health;
            total_damage += state.capped_damage(health);
        }

        let max_end_time = horde.max_end_time(catalog, self.simulator.path_len());
        let fitness = score(total_health, total_damage, max_end_time, self.upgrade_ratio);

        Evaluation {
            horde,
            states,
            total_health,
            total_damage,
            max_end_time,
            fitness,
        }
    }

    /// Fitness of a genome.
    #[must_use]
    pub fn fitness(&self, genome: &Genome) -> f64 {
        self.evaluate(genome).fitness
    }
}
