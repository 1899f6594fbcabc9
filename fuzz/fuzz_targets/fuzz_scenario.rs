#![no_main]

use horde::{generate_horde, Scenario};
use libfuzzer_sys::fuzz_target;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(scenario) = Scenario::from_json(text) else {
        return;
    };
    let mut request = scenario.into_request();

    // Cap the search so each input stays fast
    request.params.population_size = request.params.population_size.min(8);
    request.params.generations = request.params.generations.min(4);
    request.params.max_horde_size = request.params.max_horde_size.min(8);
    request.catalog.truncate(8);
    request.map.waypoints.truncate(8);
    request.map.slots.truncate(8);
    request.towers.truncate(8);

    let mut rng = SmallRng::seed_from_u64(0);
    if let Ok(report) = generate_horde(&request, &mut rng) {
        // Feasibility and fitness must agree
        assert_eq!(report.feasible, report.best_fitness.is_some());
        assert!(!report.enemies.is_empty());
    }
});
