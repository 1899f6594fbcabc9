//! Genetic search over hordes.
//!
//! Candidate hordes are genomes of archetype ids. Each generation is scored
//! by running the combat simulator, the best are kept, and the rest of the
//! population is bred from tournament winners.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │         Evolution Loop              │
//! ├─────────────────────────────────────┤
//! │  Selection │ Crossover │ Mutation   │
//! ├─────────────────────────────────────┤
//! │         Fitness Evaluation          │
//! ├─────────────────────────────────────┤
//! │         Combat Simulator            │
//! └─────────────────────────────────────┘
//! ```

mod crossover;
mod evolution;
mod fitness;
mod genome;
mod mutation;
mod selection;

pub use crossover::crossover;
pub use evolution::{
    evolve, evolve_with, EvolutionConfig, EvolutionOutcome, EvolutionStats, GenerationStats,
};
pub use fitness::{score, Evaluation, FitnessEvaluator, RATIO_WEIGHT, THROUGHPUT_WEIGHT};
pub use genome::Genome;
pub use mutation::mutate;
pub use selection::{select_elite, tournament_select, SelectionConfig, SelectionStats};
