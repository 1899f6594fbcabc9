//! Game progression to target ratio.
//!
//! The fitness target demands that projected tower damage reach
//! `total_health * ratio`. Early rounds use a generous ratio (towers overkill
//! the wave); later rounds and richer players get tighter waves.

// Rounds and gold are small integers; f64 holds them exactly
#![allow(clippy::cast_precision_loss)]

use serde::{Deserialize, Serialize};

/// Ratio used for round 0 with no gold.
pub const BASE_RATIO: f64 = 1.2;
/// Ratio drop per round survived.
pub const ROUND_STEP: f64 = 0.02;
/// Ratio drop per gold coin held.
pub const GOLD_STEP: f64 = 0.000_05;
/// Lowest ratio progression can reach.
pub const MIN_RATIO: f64 = 0.5;
/// Extra tightening applied in hard mode.
pub const HARD_MODE_FACTOR: f64 = 0.9;

/// Progress of the game a horde is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progression {
    /// Rounds completed so far.
    pub round: u32,
    /// Gold currently held.
    pub gold: u32,
    /// Whether the game runs in hard mode.
    #[serde(default)]
    pub hard_mode: bool,
}

impl Progression {
    /// Target damage/health ratio for this point in the game.
    #[must_use]
    pub fn upgrade_ratio(&self) -> f64 {
        let raw = BASE_RATIO - ROUND_STEP * f64::from(self.round) - GOLD_STEP * f64::from(self.gold);
        let ratio = raw.clamp(MIN_RATIO, BASE_RATIO);
        if self.hard_mode {
            ratio * HARD_MODE_FACTOR
        } else {
            ratio
        }
    }
}
