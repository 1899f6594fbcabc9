//! Damage multipliers between enemy archetypes and tower types.
//!
//! Two mechanisms coexist. The numeric table scales damage (a `0` entry
//! means the tower still shoots but does no harm), while the flying/splash
//! rule makes the pair untargetable outright. The rule wins when both
//! apply.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::combat::horde::{ArchetypeId, EnemyArchetype};
use crate::map::TowerZone;

/// Multiplier used for any pair missing from the table.
pub const DEFAULT_MULTIPLIER: f64 = 1.0;

const STANDARD_MULTIPLIERS: &[(&str, &[(&str, f64)])] = &[
    ("devilOrc", &[("stoneCannon", 0.5), ("ironCannon", 0.5), ("inferno", 2.0)]),
    ("oculom", &[("mortar", 0.0)]),
    ("graySkull", &[("mortar", 2.0)]),
    (
        "carrionTropper",
        &[("stoneCannon", 0.5), ("ironCannon", 0.5), ("inferno", 2.0), ("mortar", 0.5)],
    ),
    ("hellBat", &[("mortar", 0.0)]),
    (
        "darkSeer",
        &[("stoneCannon", 0.5), ("ironCannon", 0.5), ("inferno", 0.5), ("mortar", 0.75)],
    ),
];

const STANDARD_FLYING: &[&str] = &["oculom", "hellBat"];
const STANDARD_SPLASH: &[&str] = &["mortar"];

static STANDARD: LazyLock<DamageTable> = LazyLock::new(|| {
    let multipliers: BTreeMap<String, BTreeMap<String, f64>> = STANDARD_MULTIPLIERS
        .iter()
        .map(|(enemy, row)| {
            let row: BTreeMap<String, f64> = row.iter().map(|&(tower, m)| (tower.to_string(), m)).collect();
            ((*enemy).to_string(), row)
        })
        .collect();
    DamageTable {
        multipliers,
        flying: STANDARD_FLYING.iter().map(|s| (*s).to_string()).collect(),
        splash: STANDARD_SPLASH.iter().map(|s| (*s).to_string()).collect(),
    }
});

/// Resistance table keyed by enemy name, then tower name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageTable {
    /// Numeric multipliers.
    #[serde(default)]
    pub multipliers: BTreeMap<String, BTreeMap<String, f64>>,
    /// Archetypes that splash towers cannot target.
    #[serde(default)]
    pub flying: BTreeSet<String>,
    /// Tower types that cannot target flying archetypes.
    #[serde(default)]
    pub splash: BTreeSet<String>,
}

impl Default for DamageTable {
    fn default() -> Self {
        Self::standard().clone()
    }
}

impl DamageTable {
    /// The shipped table, built once per process.
    #[must_use]
    pub fn standard() -> &'static DamageTable {
        &STANDARD
    }

    /// Damage scalar for `enemy` hit by `tower`.
    #[must_use]
    pub fn multiplier(&self, enemy: &str, tower: &str) -> f64 {
        self.multipliers
            .get(enemy)
            .and_then(|row| row.get(tower))
            .copied()
            .unwrap_or(DEFAULT_MULTIPLIER)
    }

    /// Whether `tower` may pick `enemy` as a target at all.
    #[must_use]
    pub fn can_target(&self, enemy: &str, tower: &str) -> bool {
        !(self.flying.contains(enemy) && self.splash.contains(tower))
    }

    /// Resolve the table for one catalog and tower set.
    #[must_use]
    pub fn matchups(&self, catalog: &[EnemyArchetype], towers: &[TowerZone]) -> MatchupTable {
        let cells = catalog
            .iter()
            .flat_map(|enemy| {
                towers.iter().map(move |tower| {
                    if self.can_target(&enemy.name, &tower.name) {
                        Matchup::Damage(tower.damage * self.multiplier(&enemy.name, &tower.name))
                    } else {
                        Matchup::Untargetable
                    }
                })
            })
            .collect();
        MatchupTable {
            towers: towers.len(),
            cells,
        }
    }
}

/// How one tower interacts with one archetype.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Matchup {
    /// The tower never selects this archetype.
    Untargetable,
    /// Damage per shot after the multiplier.
    Damage(f64),
}

/// Dense `[archetype][tower]` matchup grid.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchupTable {
    towers: usize,
    cells: Vec<Matchup>,
}

impl MatchupTable {
    /// Matchup of `archetype` against the tower at index `tower`.
    #[must_use]
    pub fn get(&self, archetype: ArchetypeId, tower: usize) -> Matchup {
        self.cells[archetype.0 * self.towers + tower]
    }
}
