#![no_main]

use arbitrary::Arbitrary;
use horde::combat::{ArchetypeId, Horde, Simulator};
use horde::map::{interpolate, TowerZone, Waypoint};
use horde::{DamageTable, Discipline, EnemyArchetype};
use libfuzzer_sys::fuzz_target;

const NAMES: [&str; 6] = ["devilOrc", "oculom", "graySkull", "carrionTropper", "hellBat", "darkSeer"];
const TOWERS: [&str; 4] = ["stoneCannon", "ironCannon", "inferno", "mortar"];

/// Structured input for combat fuzzing.
#[derive(Arbitrary, Debug)]
struct SimInput {
    /// (name index, health, speed) per archetype.
    catalog: Vec<(u8, u16, u8)>,
    /// (type index, x, range, damage, fire rate in tenths) per tower.
    towers: Vec<(u8, u8, u8, u8, u8)>,
    /// Archetype picks, reduced modulo the catalog.
    genes: Vec<u8>,
    /// Spawn spacing in tenths of a second.
    spacing: u8,
    /// Route length.
    path_len: u8,
    /// Stepwise timing when set.
    hard_mode: bool,
}

fuzz_target!(|input: SimInput| {
    let catalog: Vec<EnemyArchetype> = input
        .catalog
        .iter()
        .take(6)
        .map(|&(n, health, speed)| {
            EnemyArchetype::new(NAMES[usize::from(n) % NAMES.len()], f64::from(health), f64::from(speed.max(1)))
        })
        .collect();
    if catalog.is_empty() {
        return;
    }

    let towers: Vec<TowerZone> = input
        .towers
        .iter()
        .take(4)
        .enumerate()
        .map(|(i, &(t, x, range, damage, rate))| TowerZone {
            position: i as u32 + 1,
            name: TOWERS[usize::from(t) % TOWERS.len()].to_string(),
            x: f64::from(x),
            y: 0.0,
            range: f64::from(range),
            damage: f64::from(damage),
            fire_rate: f64::from(rate) / 10.0,
        })
        .collect();

    let path = interpolate(&[Waypoint::new(0.0, 0.0), Waypoint::new(f64::from(input.path_len), 0.0)], 1.0);
    let ids: Vec<ArchetypeId> = input
        .genes
        .iter()
        .take(12)
        .map(|&g| ArchetypeId(usize::from(g) % catalog.len()))
        .collect();
    let horde = Horde::scheduled(&ids, f64::from(input.spacing) / 10.0);

    let sim = Simulator::new(&catalog, &towers, &path, DamageTable::standard(), Discipline::for_mode(input.hard_mode));
    let states = sim.simulate(&horde);

    assert_eq!(states.len(), horde.len());
    assert_eq!(states, sim.simulate(&horde));
    for (member, state) in horde.members.iter().zip(&states) {
        let health = catalog[member.archetype.0].health;
        assert!(state.health_remaining >= 0.0);
        assert_eq!(state.is_dead, state.health_remaining <= 0.0);
        assert!(state.capped_damage(health) <= health);
    }
});
