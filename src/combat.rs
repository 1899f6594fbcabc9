//! Combat layer.
//!
//! Projects how a fixed tower layout fares against a horde:
//! - Enemy archetypes and scheduled hordes
//! - Damage multipliers and the flying/splash targeting rule
//! - The simulator with its two timing disciplines

mod horde;
mod multiplier;
mod simulator;

pub use horde::{ArchetypeId, EnemyArchetype, Horde, HordeMember, MemberState};
pub use multiplier::{DamageTable, Matchup, MatchupTable, DEFAULT_MULTIPLIER};
pub use simulator::{Discipline, Simulator, STEP_SECONDS};
