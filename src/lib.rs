// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Horde: balanced enemy waves for a tower-defense game.
//!
//! Given the towers a player has deployed and a catalog of enemy archetypes,
//! the engine searches for a wave whose projected damage intake lands as
//! close as possible to a target fraction of its total health.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Engine (request → report)         │
//! ├─────────────────────────────────────┤
//! │   Genetic Search (gp)               │
//! ├─────────────────────────────────────┤
//! │   Combat Simulator + Multipliers    │
//! ├─────────────────────────────────────┤
//! │   Map (route interpolation, slots)  │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use horde::{generate_horde, Scenario};
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//!
//! let scenario = Scenario::load(Path::new("scenarios/azteka.json"))?;
//! let mut rng = SmallRng::seed_from_u64(7);
//! let report = generate_horde(&scenario.into_request(), &mut rng)?;
//! println!("{} enemies, diff {:.1}", report.enemies.len(), report.diff);
//! # Ok::<(), horde::HordeError>(())
//! ```

pub mod combat;
pub mod config;
pub mod engine;
pub mod error;
pub mod gp;
pub mod logging;
pub mod map;
pub mod quality;
pub mod report;
pub mod scaling;

pub use config::{HordeParams, HordeRequest, Scenario};
pub use engine::{generate_horde, generate_horde_with, run_with_deadline};
pub use error::{HordeError, HordeResult};
pub use quality::{quality_score, JsonLinesSink, QualityLog, QualitySink};
pub use report::{EnemyHits, HordeReport, SpawnedEnemy};
pub use scaling::Progression;

// Re-export the building blocks callers most often need
pub use combat::{DamageTable, Discipline, EnemyArchetype};
pub use map::{MapLayout, TowerRecord};
