//! Horde quality log.
//!
//! Each generated wave can be recorded together with the tower layout it
//! was tuned against and a 0..=100 quality grade, so wave balance can be
//! reviewed across rounds.

// Quality is rounded into 0..=100 before the cast
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::HordeResult;
use crate::map::TowerZone;
use crate::report::{EnemyHits, HordeReport};

/// One quality record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityLog {
    /// Projected hits per enemy.
    pub horde_log: Vec<EnemyHits>,
    /// Towers the wave was tuned against.
    pub tower_positions: Vec<TowerZone>,
    /// Game round.
    pub round: u32,
    /// Grade from 0 (useless) to 100 (exact ratio match).
    pub quality: u8,
}

impl QualityLog {
    /// Grade a report for `round`.
    #[must_use]
    pub fn from_report(report: &HordeReport, round: u32) -> Self {
        Self {
            horde_log: report.hit_log.clone(),
            tower_positions: report.towers.clone(),
            round,
            quality: quality_score(report),
        }
    }
}

/// Grade a report: 100 when the towers exactly meet the target ratio,
/// falling linearly with `|diff| / total_health`. Infeasible waves get 0.
#[must_use]
pub fn quality_score(report: &HordeReport) -> u8 {
    if !report.feasible || report.total_health <= 0.0 {
        return 0;
    }
    let miss = (report.diff.abs() / report.total_health).min(1.0);
    (100.0 * (1.0 - miss)).round().clamp(0.0, 100.0) as u8
}

/// Destination for quality records.
pub trait QualitySink {
    /// Store one record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    fn record(&mut self, log: &QualityLog) -> HordeResult<()>;
}

impl QualitySink for Vec<QualityLog> {
    fn record(&mut self, log: &QualityLog) -> HordeResult<()> {
        self.push(log.clone());
        Ok(())
    }
}

/// Writes one JSON object per line.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Unwrap the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl JsonLinesSink<BufWriter<File>> {
    /// Open `path` for appending, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn append(path: &Path) -> HordeResult<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> QualitySink for JsonLinesSink<W> {
    fn record(&mut self, log: &QualityLog) -> HordeResult<()> {
        serde_json::to_writer(&mut self.writer, log)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
