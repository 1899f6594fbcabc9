//! Selection operators for horde search.
//!
//! Tournament selection picks parents; elitism carries the best candidates
//! into the next generation untouched.

// Selection uses intentional casts for statistics
#![allow(clippy::cast_precision_loss)]

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Configuration for selection operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Number of individuals competing in each tournament.
    pub tournament_size: usize,
    /// Number of elite individuals preserved unchanged.
    pub elite_count: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            tournament_size: 3,
            elite_count: 1,
        }
    }
}

/// Indices of the top `count` individuals, best first.
///
/// Ties keep their original order.
#[must_use]
pub fn select_elite(fitness: &[f64], count: usize) -> Vec<usize> {
    let mut indexed: Vec<(usize, f64)> = fitness.iter().copied().enumerate().collect();
    indexed.sort_by(|a, b| b.1.total_cmp(&a.1));
    indexed.into_iter().take(count).map(|(i, _)| i).collect()
}

/// Tournament selection: draw `k` individuals uniformly and return the best.
///
/// On ties the earliest draw wins.
pub fn tournament_select<R: Rng>(fitness: &[f64], k: usize, rng: &mut R) -> usize {
    let pop_size = fitness.len();
    if pop_size == 0 {
        return 0;
    }

    let mut best_idx = rng.gen_range(0..pop_size);
    let mut best_fitness = fitness[best_idx];

    for _ in 1..k.max(1) {
        let idx = rng.gen_range(0..pop_size);
        if fitness[idx] > best_fitness {
            best_idx = idx;
            best_fitness = fitness[idx];
        }
    }

    best_idx
}

/// Summary of one generation's fitness values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SelectionStats {
    /// Best fitness in the population.
    pub best_fitness: f64,
    /// Mean over finite fitness values, or negative infinity if none are.
    pub mean_fitness: f64,
    /// Number of individuals with finite fitness.
    pub feasible: usize,
}

impl SelectionStats {
    /// Calculate statistics from fitness values.
    #[must_use]
    pub fn from_fitness(fitness: &[f64]) -> Self {
        let best = fitness.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let finite: Vec<f64> = fitness.iter().copied().filter(|f| f.is_finite()).collect();
        let mean = if finite.is_empty() {
            f64::NEG_INFINITY
        } else {
            finite.iter().sum::<f64>() / finite.len() as f64
        };

        Self {
            best_fitness: best,
            mean_fitness: mean,
            feasible: finite.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_tournament_selection_prefers_fitter() {
        let mut rng = SmallRng::seed_from_u64(42);
        let fitness = vec![-10.0, -5.0, -1.0, f64::NEG_INFINITY, -8.0];

        let mut counts = [0usize; 5];
        for _ in 0..1000 {
            let idx = tournament_select(&fitness, 3, &mut rng);
            counts[idx] += 1;
        }

        let max_idx = counts.iter().enumerate().max_by_key(|(_, c)| *c).unwrap().0;
        assert_eq!(max_idx, 2);
        assert!(counts[3] < counts[2]);
    }

    #[test]
    fn test_tournament_on_all_infeasible() {
        let mut rng = SmallRng::seed_from_u64(3);
        let fitness = vec![f64::NEG_INFINITY; 4];
        for _ in 0..100 {
            assert!(tournament_select(&fitness, 3, &mut rng) < 4);
        }
    }

    #[test]
    fn test_elite_selection() {
        let fitness = vec![-3.0, -0.5, f64::NEG_INFINITY, -0.8, -2.0];
        assert_eq!(select_elite(&fitness, 2), vec![1, 3]);
        assert_eq!(select_elite(&fitness, 10).len(), 5);
    }

    #[test]
    fn test_selection_stats() {
        let stats = SelectionStats::from_fitness(&[1.0, 2.0, f64::NEG_INFINITY, 3.0]);
        assert!((stats.mean_fitness - 2.0).abs() < 0.001);
        assert!((stats.best_fitness - 3.0).abs() < 0.001);
        assert_eq!(stats.feasible, 3);

        let none = SelectionStats::from_fitness(&[f64::NEG_INFINITY]);
        assert_eq!(none.mean_fitness, f64::NEG_INFINITY);
        assert_eq!(none.feasible, 0);
    }
}
