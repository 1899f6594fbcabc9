//! Horde generation entry points.
//!
//! One request runs the whole pipeline: interpolate the route, project the
//! towers, resolve resistances, search, then re-simulate the winner into a
//! report. Requests share nothing; callers may run many in parallel.

use std::ops::ControlFlow;
use std::thread;
use std::time::{Duration, Instant};

use log::{info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::combat::Simulator;
use crate::config::HordeRequest;
use crate::error::{HordeError, HordeResult};
use crate::gp::{evolve_with, FitnessEvaluator, GenerationStats};
use crate::report::HordeReport;

/// Generate a balanced horde.
///
/// # Errors
///
/// Returns an error for an empty catalog, a route with no points, invalid
/// parameters, or towers and archetypes outside the bounds checked by
/// [`HordeRequest::validate`]. Tower layouts that cannot clear any wave are not
/// errors; the report comes back with `feasible == false`.
pub fn generate_horde<R: Rng>(request: &HordeRequest, rng: &mut R) -> HordeResult<HordeReport> {
    generate_horde_with(request, rng, |_| ControlFlow::Continue(()))
}

/// Generate a horde, reporting each scored generation to `observer`.
///
/// Breaking from the observer ends the search early with the best horde
/// found so far.
///
/// # Errors
///
/// Same as [`generate_horde`].
pub fn generate_horde_with<R, F>(
    request: &HordeRequest,
    rng: &mut R,
    observer: F,
) -> HordeResult<HordeReport>
where
    R: Rng,
    F: FnMut(&GenerationStats) -> ControlFlow<()>,
{
    request.validate()?;
    let params = &request.params;

    let path = request.map.full_path();
    if path.is_empty() {
        return Err(HordeError::EmptyPath);
    }

    let towers = request.map.project_towers(&request.towers);
    if towers.is_empty() {
        warn!(
            "none of {} tower records matched a slot; no wave can be feasible",
            request.towers.len()
        );
    }

    let simulator = Simulator::new(
        &request.catalog,
        &towers,
        &path,
        request.damage_table(),
        params.discipline(),
    );
    let evaluator = FitnessEvaluator::new(simulator, params.spacing_time, params.upgrade_ratio);
    let outcome = evolve_with(&evaluator, &params.evolution_config(), rng, observer)?;
    let report = HordeReport::assemble(&evaluator, &outcome);

    info!(
        "horde of {} after {} generations: health={:.1} damage={:.1} diff={:.1} feasible={}",
        report.enemies.len(),
        report.generations,
        report.total_health,
        report.total_damage,
        report.diff,
        report.feasible
    );
    if !report.feasible {
        warn!("no feasible horde found for {} towers", towers.len());
    }
    Ok(report)
}

/// Generate a horde on a worker thread, stopping the search once `timeout`
/// has elapsed.
///
/// The deadline is checked between generations, so a single slow
/// generation can overrun it. The search is seeded with `seed`.
///
/// # Errors
///
/// Same as [`generate_horde`], plus [`HordeError::WorkerPanicked`].
pub fn run_with_deadline(
    request: HordeRequest,
    seed: u64,
    timeout: Duration,
) -> HordeResult<HordeReport> {
    let handle = thread::spawn(move || {
        let mut rng = SmallRng::seed_from_u64(seed);
        let started = Instant::now();
        generate_horde_with(&request, &mut rng, |stats| {
            if started.elapsed() >= timeout {
                warn!("deadline of {timeout:?} reached at generation {}", stats.generation);
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
    });
    handle.join().map_err(|_| HordeError::WorkerPanicked)?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::EnemyArchetype;
    use crate::config::HordeParams;
    use crate::map::{MapLayout, TowerRecord, TowerSlot, Waypoint};

    fn line_request() -> HordeRequest {
        HordeRequest {
            towers: vec![TowerRecord {
                position: 1,
                name: "stoneCannon".into(),
                damage: 10.0,
                fire_rate: 1.0,
                range: 100.0,
            }],
            catalog: vec![EnemyArchetype::new("devilOrc", 15.0, 10.0)],
            map: MapLayout {
                waypoints: vec![Waypoint::new(0.0, 0.0), Waypoint::new(49.0, 0.0)],
                slots: vec![TowerSlot { position: 1, x: 0.0, y: 0.0 }],
            },
            damage_table: None,
            params: HordeParams {
                max_horde_size: 1,
                population_size: 4,
                generations: 3,
                ..HordeParams::default()
            },
        }
    }

    #[test]
    fn test_generate_single_orc() {
        let mut rng = SmallRng::seed_from_u64(1);
        let report = generate_horde(&line_request(), &mut rng).unwrap();
        assert!(report.feasible);
        assert_eq!(report.enemies.len(), 1);
        assert_eq!(report.generations, 3);
        assert!((report.best_fitness.unwrap() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_catalog() {
        let mut request = line_request();
        request.catalog.clear();
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(matches!(generate_horde(&request, &mut rng), Err(HordeError::EmptyCatalog)));
    }

    #[test]
    fn test_empty_path() {
        let mut request = line_request();
        request.map.waypoints.truncate(1);
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(matches!(generate_horde(&request, &mut rng), Err(HordeError::EmptyPath)));
    }

    #[test]
    fn test_invalid_params() {
        let mut request = line_request();
        request.params.spacing_time = f64::NAN;
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(matches!(
            generate_horde(&request, &mut rng),
            Err(HordeError::InvalidParams(_))
        ));
    }

    #[test]
    fn test_rapid_fire_tower_is_rejected_up_front() {
        let mut request = line_request();
        request.towers[0].fire_rate = 1e-9;
        let mut rng = SmallRng::seed_from_u64(1);
        let started = Instant::now();
        assert!(matches!(
            generate_horde(&request, &mut rng),
            Err(HordeError::InvalidParams(_))
        ));
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_crawling_archetype_is_rejected_up_front() {
        let mut request = line_request();
        request.catalog[0].speed = 1e-9;
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(matches!(
            generate_horde(&request, &mut rng),
            Err(HordeError::InvalidParams(_))
        ));
    }

    #[test]
    fn test_unmatched_towers_are_infeasible_not_errors() {
        let mut request = line_request();
        request.towers[0].position = 99;
        let mut rng = SmallRng::seed_from_u64(1);
        let report = generate_horde(&request, &mut rng).unwrap();
        assert!(report.towers.is_empty());
        assert!(!report.feasible);
        assert_eq!(report.best_fitness, None);
    }

    #[test]
    fn test_observer_stops_search() {
        let mut request = line_request();
        request.params.generations = 100;
        let mut rng = SmallRng::seed_from_u64(2);
        let report = generate_horde_with(&request, &mut rng, |stats| {
            if stats.generation == 1 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .unwrap();
        assert_eq!(report.generations, 1);
    }

    #[test]
    fn test_deadline_cuts_long_search() {
        let mut request = line_request();
        request.params.generations = usize::MAX;
        let report = run_with_deadline(request, 3, Duration::from_millis(20)).unwrap();
        assert!(report.generations < usize::MAX);
        assert!(report.feasible);
    }

    #[test]
    fn test_deadline_run_matches_seeded_run() {
        let request = line_request();
        let mut rng = SmallRng::seed_from_u64(9);
        let direct = generate_horde(&request, &mut rng).unwrap();
        let bounded = run_with_deadline(request, 9, Duration::from_secs(60)).unwrap();
        assert_eq!(direct, bounded);
    }
}
