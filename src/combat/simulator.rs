//! Projected tower fire against a scheduled horde.
//!
//! Enemies move along the dense path at constant speed; towers never move.
//! An enemy that has traveled `d` units stands at
//! `path[min(ceil(d), len - 1)]` and leaves the route once `d >= len`.

// Path indices come from rounded-up distances and step counters from time
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

use crate::combat::horde::{EnemyArchetype, Horde, HordeMember, MemberState};
use crate::combat::multiplier::{DamageTable, Matchup, MatchupTable};
use crate::map::{PathPoint, TowerZone};

/// Time increment of the stepwise discipline, in seconds.
pub const STEP_SECONDS: f64 = 0.1;

/// How tower fire is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Discipline {
    /// Every tower fires on a fixed cadence; each shot hits the first
    /// eligible enemy in horde order. Used in normal mode.
    #[default]
    EventScheduled,
    /// Towers poll every [`STEP_SECONDS`] and shoot the eligible enemy
    /// furthest along the route. Used in hard mode.
    Stepwise,
}

impl Discipline {
    /// Discipline for a game's hard-mode flag.
    #[must_use]
    pub fn for_mode(hard_mode: bool) -> Self {
        if hard_mode {
            Self::Stepwise
        } else {
            Self::EventScheduled
        }
    }
}

/// Combat projection over a fixed catalog, tower set and path.
#[derive(Debug, Clone)]
pub struct Simulator<'a> {
    catalog: &'a [EnemyArchetype],
    towers: &'a [TowerZone],
    path: &'a [PathPoint],
    matchups: MatchupTable,
    discipline: Discipline,
}

impl<'a> Simulator<'a> {
    /// Build a simulator, resolving `table` against the catalog and towers.
    #[must_use]
    pub fn new(
        catalog: &'a [EnemyArchetype],
        towers: &'a [TowerZone],
        path: &'a [PathPoint],
        table: &DamageTable,
        discipline: Discipline,
    ) -> Self {
        Self {
            catalog,
            towers,
            path,
            matchups: table.matchups(catalog, towers),
            discipline,
        }
    }

    /// Enemy catalog the horde indexes into.
    #[must_use]
    pub fn catalog(&self) -> &'a [EnemyArchetype] {
        self.catalog
    }

    /// Towers taking part.
    #[must_use]
    pub fn towers(&self) -> &'a [TowerZone] {
        self.towers
    }

    /// Dense route.
    #[must_use]
    pub fn path(&self) -> &'a [PathPoint] {
        self.path
    }

    /// Number of points on the dense path.
    #[must_use]
    pub fn path_len(&self) -> usize {
        self.path.len()
    }

    /// Active discipline.
    #[must_use]
    pub fn discipline(&self) -> Discipline {
        self.discipline
    }

    /// Run one pass over `horde`.
    ///
    /// Returns one fresh [`MemberState`] per member, in horde order. Calling
    /// this twice on the same horde yields identical states.
    #[must_use]
    pub fn simulate(&self, horde: &Horde) -> Vec<MemberState> {
        let mut states: Vec<MemberState> = horde
            .members
            .iter()
            .map(|m| MemberState::fresh(self.catalog[m.archetype.0].health))
            .collect();

        if horde.is_empty() || self.path.is_empty() {
            return states;
        }

        let horizon = horde.horizon(self.catalog, self.path.len());
        match self.discipline {
            Discipline::EventScheduled => self.run_event_scheduled(horde, &mut states, horizon),
            Discipline::Stepwise => self.run_stepwise(horde, &mut states, horizon),
        }
        states
    }

    fn run_event_scheduled(&self, horde: &Horde, states: &mut [MemberState], horizon: f64) {
        // Each firing tower keeps exactly one pending shot in the queue
        let mut queue: BinaryHeap<Shot> = self
            .towers
            .iter()
            .enumerate()
            .filter(|(_, tower)| fires(tower))
            .map(|(tower, _)| Shot { time: 0.0, tower, count: 0 })
            .collect();

        while let Some(shot) = queue.pop() {
            let target = horde
                .members
                .iter()
                .zip(states.iter())
                .position(|(member, state)| self.reach(member, state, shot.tower, shot.time).is_some());

            if let Some(idx) = target {
                self.hit(horde, states, idx, shot.tower);
            }

            let count = shot.count + 1;
            let time = count as f64 * self.towers[shot.tower].fire_rate;
            if time <= horizon {
                queue.push(Shot { time, tower: shot.tower, count });
            }
        }
    }

    fn run_stepwise(&self, horde: &Horde, states: &mut [MemberState], horizon: f64) {
        for (tower_idx, tower) in self.towers.iter().enumerate() {
            if !fires(tower) {
                continue;
            }
            let mut next_fire = 0.0;
            let mut step = 0usize;
            loop {
                let t = step as f64 * STEP_SECONDS;
                if t > horizon {
                    break;
                }
                step += 1;
                if t < next_fire {
                    continue;
                }

                let mut best: Option<(usize, f64)> = None;
                for (idx, (member, state)) in horde.members.iter().zip(states.iter()).enumerate() {
                    if let Some(traveled) = self.reach(member, state, tower_idx, t) {
                        if best.is_none_or(|(_, d)| traveled > d) {
                            best = Some((idx, traveled));
                        }
                    }
                }

                if let Some((idx, _)) = best {
                    self.hit(horde, states, idx, tower_idx);
                    next_fire = t + tower.fire_rate;
                }
            }
        }
    }

    /// Distance traveled by `member` if the tower may shoot it at `t`.
    fn reach(
        &self,
        member: &HordeMember,
        state: &MemberState,
        tower_idx: usize,
        t: f64,
    ) -> Option<f64> {
        if state.is_dead || member.spawn_time > t {
            return None;
        }
        if self.matchups.get(member.archetype, tower_idx) == Matchup::Untargetable {
            return None;
        }

        let speed = self.catalog[member.archetype.0].speed;
        let traveled = ((t - member.spawn_time) * speed).max(0.0);
        let len = self.path.len();
        if traveled >= len as f64 {
            return None;
        }

        let index = (traveled.ceil() as usize).min(len - 1);
        let point = &self.path[index];
        let tower = &self.towers[tower_idx];
        (point.distance_to(tower.x, tower.y) <= tower.range).then_some(traveled)
    }

    fn hit(&self, horde: &Horde, states: &mut [MemberState], idx: usize, tower_idx: usize) {
        let damage = match self.matchups.get(horde.members[idx].archetype, tower_idx) {
            Matchup::Damage(d) => d,
            Matchup::Untargetable => return,
        };
        states[idx].apply_hit(self.towers[tower_idx].position, damage);
    }
}

/// Pending shot of one tower; the queue pops the earliest time first and
/// breaks ties by tower index.
#[derive(Debug, Clone, Copy)]
struct Shot {
    time: f64,
    tower: usize,
    count: usize,
}

impl Ord for Shot {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap
        other
            .time
            .total_cmp(&self.time)
            .then_with(|| other.tower.cmp(&self.tower))
    }
}

impl PartialOrd for Shot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Shot {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Shot {}

fn fires(tower: &TowerZone) -> bool {
    tower.fire_rate.is_finite() && tower.fire_rate > 0.0
}
