//! Main evolution loop for horde search.
//!
//! This module orchestrates the evolutionary process: initialization,
//! fitness evaluation, elitism, selection, crossover and mutation over a
//! fixed number of generations.

use std::ops::ControlFlow;

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{HordeError, HordeResult};
use crate::gp::crossover::crossover;
use crate::gp::fitness::FitnessEvaluator;
use crate::gp::genome::Genome;
use crate::gp::mutation::mutate;
use crate::gp::selection::{select_elite, tournament_select, SelectionConfig, SelectionStats};

/// Configuration for the evolution process.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Population size.
    pub population_size: usize,
    /// Number of breeding rounds.
    pub generations: usize,
    /// Longest horde a genome may describe.
    pub max_horde_size: usize,
    /// Per-gene mutation probability.
    pub mutation_rate: f64,
    /// Selection configuration.
    pub selection: SelectionConfig,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 30,
            generations: 50,
            max_horde_size: 10,
            mutation_rate: 0.1,
            selection: SelectionConfig::default(),
        }
    }
}

impl EvolutionConfig {
    /// Check that the search can run.
    ///
    /// # Errors
    ///
    /// Returns [`HordeError::InvalidParams`] for a zero population or horde
    /// size, or a mutation rate outside `[0, 1]`.
    pub fn validate(&self) -> HordeResult<()> {
        if self.population_size == 0 {
            return Err(HordeError::InvalidParams("population size must be positive".into()));
        }
        if self.max_horde_size == 0 {
            return Err(HordeError::InvalidParams("max horde size must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(HordeError::InvalidParams(format!(
                "mutation rate {} outside [0, 1]",
                self.mutation_rate
            )));
        }
        Ok(())
    }
}

/// Statistics for a single generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationStats {
    /// Generation number; 0 is the random initial population.
    pub generation: usize,
    /// Best fitness in this generation.
    pub best_fitness: f64,
    /// Mean of the finite fitness values.
    pub mean_fitness: f64,
    /// Individuals with finite fitness.
    pub feasible: usize,
}

/// Overall statistics from an evolution run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvolutionStats {
    /// Statistics per scored generation, including the final one.
    pub generations: Vec<GenerationStats>,
    /// Breeding rounds actually run.
    pub generations_run: usize,
    /// Best fitness achieved.
    pub best_fitness: f64,
}

/// Winner of a search.
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionOutcome {
    /// Highest-fitness genome of the final population.
    pub best: Genome,
    /// Its fitness; negative infinity means no feasible horde was found.
    pub best_fitness: f64,
    /// Run statistics.
    pub stats: EvolutionStats,
}

#[derive(Debug, Clone)]
struct Scored {
    genome: Genome,
    fitness: f64,
}

/// Run the search for the configured number of generations.
///
/// # Errors
///
/// Returns an error if the catalog is empty or the config is invalid.
pub fn evolve<R: Rng>(
    evaluator: &FitnessEvaluator<'_>,
    config: &EvolutionConfig,
    rng: &mut R,
) -> HordeResult<EvolutionOutcome> {
    evolve_with(evaluator, config, rng, |_| ControlFlow::Continue(()))
}

/// Run the search, reporting every scored generation to `observer`.
///
/// Returning [`ControlFlow::Break`] stops before the next breeding round;
/// the best individual scored so far is still returned.
///
/// # Errors
///
/// Returns an error if the catalog is empty or the config is invalid.
pub fn evolve_with<R, F>(
    evaluator: &FitnessEvaluator<'_>,
    config: &EvolutionConfig,
    rng: &mut R,
    mut observer: F,
) -> HordeResult<EvolutionOutcome>
where
    R: Rng,
    F: FnMut(&GenerationStats) -> ControlFlow<()>,
{
    config.validate()?;
    let catalog_len = evaluator.catalog_len();
    if catalog_len == 0 {
        return Err(HordeError::EmptyCatalog);
    }

    let mut population: Vec<Scored> = (0..config.population_size)
        .map(|_| score(evaluator, Genome::random(rng, catalog_len, config.max_horde_size)))
        .collect();

    let mut gen_stats = Vec::new();
    let mut generation = 0usize;
    loop {
        population.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));

        let fitness: Vec<f64> = population.iter().map(|s| s.fitness).collect();
        let summary = SelectionStats::from_fitness(&fitness);
        let stats = GenerationStats {
            generation,
            best_fitness: summary.best_fitness,
            mean_fitness: summary.mean_fitness,
            feasible: summary.feasible,
        };
        debug!(
            "gen {:>4}: best={:.3} mean={:.3} feasible={}/{}",
            generation,
            stats.best_fitness,
            stats.mean_fitness,
            stats.feasible,
            population.len()
        );
        gen_stats.push(stats);

        let stop = observer(&stats).is_break();
        if generation >= config.generations || stop {
            break;
        }

        population = next_generation(&population, &fitness, evaluator, config, rng);
        generation += 1;
    }

    let Some(best) = population.into_iter().next() else {
        return Err(HordeError::InvalidParams("population size must be positive".into()));
    };

    Ok(EvolutionOutcome {
        best_fitness: best.fitness,
        best: best.genome,
        stats: EvolutionStats {
            generations: gen_stats,
            generations_run: generation,
            best_fitness: best.fitness,
        },
    })
}

/// Breed the next generation from a population sorted best first.
fn next_generation<R: Rng>(
    population: &[Scored],
    fitness: &[f64],
    evaluator: &FitnessEvaluator<'_>,
    config: &EvolutionConfig,
    rng: &mut R,
) -> Vec<Scored> {
    let catalog_len = evaluator.catalog_len();
    let elite_count = config.selection.elite_count.min(population.len());

    let mut next = Vec::with_capacity(config.population_size);
    next.extend(select_elite(fitness, elite_count).into_iter().map(|i| population[i].clone()));

    while next.len() < config.population_size {
        let p1 = tournament_select(fitness, config.selection.tournament_size, rng);
        let p2 = tournament_select(fitness, config.selection.tournament_size, rng);

        let mut child = crossover(
            &population[p1].genome,
            &population[p2].genome,
            config.max_horde_size,
            rng,
        );
        mutate(&mut child, config.mutation_rate, catalog_len, rng);
        next.push(score(evaluator, child));
    }

    next
}

fn score(evaluator: &FitnessEvaluator<'_>, genome: Genome) -> Scored {
    let fitness = evaluator.fitness(&genome);
    Scored { genome, fitness }
}
