//! Output formatting utilities for CLI.

// Run counts stay far below 2^52
#![allow(clippy::cast_precision_loss)]

use horde::{quality_score, HordeReport};
use serde::Serialize;
use std::fmt::Write;

/// Format a report as human-readable text.
pub(super) fn format_report_text(report: &HordeReport, seed: u64) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Horde (seed: {seed})");
    let _ = writeln!(
        output,
        "  Enemies: {}  Towers: {}  Route: {} points",
        report.enemies.len(),
        report.towers.len(),
        report.path_pixels
    );
    let _ = writeln!(
        output,
        "  Health: {:.1}  Damage: {:.1}  Diff: {:.1}",
        report.total_health, report.total_damage, report.diff
    );
    match report.best_fitness {
        Some(fitness) => {
            let _ = writeln!(output, "  Fitness: {fitness:.3} (quality {})", quality_score(report));
        }
        None => {
            let _ = writeln!(output, "  Fitness: infeasible");
        }
    }
    let _ = writeln!(output, "  Generations: {}\n", report.generations);

    for (enemy, hits) in report.enemies.iter().zip(&report.hit_log) {
        let _ = write!(
            output,
            "  #{:<3} {:<16} t={:>6.1}s hp={:>6.1} speed={:>5.1} hits={:>3}",
            enemy.id,
            enemy.name,
            enemy.spawn_time,
            enemy.health,
            enemy.speed,
            hits.hits.values().sum::<u32>()
        );
        if hits.is_dead {
            output.push_str(" [killed]");
        }
        output.push('\n');
    }

    output
}

/// Aggregated results of a batch, mergeable across threads.
#[derive(Debug, Clone, Default)]
pub(super) struct BatchStats {
    /// Hordes generated.
    pub(super) runs: u64,
    /// Hordes meeting the target ratio.
    pub(super) feasible: u64,
    /// Requests that failed.
    pub(super) errors: u64,
    /// Sum of |diff| over feasible hordes.
    abs_diff_sum: f64,
    /// Sum of horde sizes.
    size_sum: u64,
    /// Sum of quality grades.
    quality_sum: u64,
}

impl BatchStats {
    /// Add one report.
    pub(super) fn add_report(&mut self, report: &HordeReport) {
        self.runs += 1;
        self.size_sum += report.enemies.len() as u64;
        self.quality_sum += u64::from(quality_score(report));
        if report.feasible {
            self.feasible += 1;
            self.abs_diff_sum += report.diff.abs();
        }
    }

    /// Merge another stats object into this one.
    pub(super) fn merge(&mut self, other: &Self) {
        self.runs += other.runs;
        self.feasible += other.feasible;
        self.errors += other.errors;
        self.abs_diff_sum += other.abs_diff_sum;
        self.size_sum += other.size_sum;
        self.quality_sum += other.quality_sum;
    }

    /// Mean |diff| over feasible hordes.
    pub(super) fn mean_abs_diff(&self) -> Option<f64> {
        (self.feasible > 0).then(|| self.abs_diff_sum / self.feasible as f64)
    }

    /// Mean horde size.
    pub(super) fn mean_size(&self) -> f64 {
        if self.runs == 0 {
            0.0
        } else {
            self.size_sum as f64 / self.runs as f64
        }
    }

    /// Mean quality grade.
    pub(super) fn mean_quality(&self) -> f64 {
        if self.runs == 0 {
            0.0
        } else {
            self.quality_sum as f64 / self.runs as f64
        }
    }

    /// JSON view of the stats.
    pub(super) fn summary(&self, base_seed: u64) -> BatchSummary {
        BatchSummary {
            base_seed,
            runs: self.runs,
            feasible: self.feasible,
            errors: self.errors,
            mean_abs_diff: self.mean_abs_diff(),
            mean_horde_size: self.mean_size(),
            mean_quality: self.mean_quality(),
        }
    }
}

/// JSON-serializable batch result.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct BatchSummary {
    base_seed: u64,
    runs: u64,
    feasible: u64,
    errors: u64,
    mean_abs_diff: Option<f64>,
    mean_horde_size: f64,
    mean_quality: f64,
}

/// Format batch stats as human-readable text.
pub(super) fn format_batch_text(stats: &BatchStats, base_seed: u64) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Batch Results (base seed: {base_seed})");
    let _ = writeln!(output, "  Runs: {}  Errors: {}", stats.runs, stats.errors);
    let pct = if stats.runs > 0 {
        stats.feasible as f64 / stats.runs as f64 * 100.0
    } else {
        0.0
    };
    let _ = writeln!(output, "  Feasible: {} ({pct:.1}%)", stats.feasible);
    match stats.mean_abs_diff() {
        Some(diff) => {
            let _ = writeln!(output, "  Mean |diff|: {diff:.2}");
        }
        None => {
            let _ = writeln!(output, "  Mean |diff|: n/a");
        }
    }
    let _ = writeln!(output, "  Mean horde size: {:.2}", stats.mean_size());
    let _ = writeln!(output, "  Mean quality: {:.1}", stats.mean_quality());

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(feasible: bool, diff: f64, size: usize) -> HordeReport {
        HordeReport {
            path_pixels: 0,
            towers: Vec::new(),
            enemies: (0..size)
                .map(|i| horde::SpawnedEnemy {
                    id: i + 1,
                    name: "devilOrc".into(),
                    spawn_time: i as f64 * 1.5,
                    speed: 1.0,
                    health: 10.0,
                })
                .collect(),
            total_health: 100.0,
            total_damage: 100.0 - diff,
            diff,
            best_fitness: feasible.then_some(0.0),
            generations: 1,
            feasible,
            hit_log: Vec::new(),
        }
    }

    #[test]
    fn test_merge_matches_sequential() {
        let reports = [report(true, -4.0, 3), report(false, 50.0, 1), report(true, -2.0, 2)];

        let mut all = BatchStats::default();
        for r in &reports {
            all.add_report(r);
        }

        let mut left = BatchStats::default();
        left.add_report(&reports[0]);
        let mut right = BatchStats::default();
        right.add_report(&reports[1]);
        right.add_report(&reports[2]);
        left.merge(&right);

        assert_eq!(left.runs, 3);
        assert_eq!(left.feasible, 2);
        assert_eq!(left.mean_abs_diff(), all.mean_abs_diff());
        assert!((left.mean_abs_diff().unwrap() - 3.0).abs() < 1e-9);
        assert!((left.mean_size() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_batch() {
        let stats = BatchStats::default();
        assert_eq!(stats.mean_abs_diff(), None);
        assert!(format_batch_text(&stats, 1).contains("n/a"));
    }

    #[test]
    fn test_report_text_lists_enemies() {
        let text = format_report_text(&report(true, 0.0, 2), 7);
        assert!(text.contains("seed: 7"));
        assert!(text.contains("#1"));
        assert!(text.contains("#2"));
    }
}
