use std::collections::BTreeMap;

use proptest::prelude::*;
use scout_core::{Coord, Item, KeyColor, Material, Observation, Occupant};
use scout_world::{AttractivenessMap, BoundedGrid};

fn arb_material() -> impl Strategy<Value = Material> {
    prop_oneof![
        Just(Material::Void),
        Just(Material::Grass),
        Just(Material::Sand),
        Just(Material::Water),
        Just(Material::Rock),
        Just(Material::Teleporter),
        Just(Material::Gate(KeyColor::Green)),
    ]
}

fn arb_item() -> impl Strategy<Value = Option<Item>> {
    prop_oneof![
        Just(None),
        Just(Some(Item::Star)),
        Just(Some(Item::Cookie)),
        Just(Some(Item::LaserCharge)),
        Just(Some(Item::Key(KeyColor::Blue))),
    ]
}

fn arb_occupant() -> impl Strategy<Value = Option<Occupant>> {
    prop_oneof![Just(None), Just(Some(Occupant::Boulder)), Just(Some(Occupant::Robot))]
}

fn arb_observation() -> impl Strategy<Value = Observation> {
    (-12i32..12, -12i32..12, arb_material(), arb_occupant(), arb_item()).prop_map(
        |(x, y, material, occupant, item)| Observation {
            coord: Coord::new(x, y),
            material,
            occupant,
            item,
        },
    )
}

fn arb_batches() -> impl Strategy<Value = Vec<Vec<Observation>>> {
    prop::collection::vec(prop::collection::vec(arb_observation(), 0..12), 1..8)
}

proptest! {
    #[test]
    fn growth_is_lossless(batches in arb_batches()) {
        let mut grid = BoundedGrid::new();
        let mut latest: BTreeMap<Coord, Observation> = BTreeMap::new();

        for batch in &batches {
            grid.absorb(batch);
            for observation in batch {
                let _ = latest.insert(observation.coord, *observation);
            }
        }

        for (coord, observation) in &latest {
            let tile = grid.tile_at(*coord);
            prop_assert_eq!(tile.material(), observation.material);
            prop_assert_eq!(tile.occupant(), observation.occupant);
            prop_assert_eq!(tile.item(), observation.item);
        }
    }

    #[test]
    fn bounds_only_grow(batches in arb_batches()) {
        let mut grid = BoundedGrid::new();

        for batch in &batches {
            let before = grid.bounds();
            grid.absorb(batch);
            let after = grid.bounds();
            prop_assert!(after.contains_bounds(&before));
            for observation in batch {
                prop_assert!(after.contains(observation.coord));
            }
            prop_assert_eq!(grid.area(), after.area());
        }
    }

    #[test]
    fn absorbing_twice_matches_absorbing_once(batch in prop::collection::vec(arb_observation(), 0..24)) {
        let mut once = BoundedGrid::new();
        once.absorb(&batch);

        let mut twice = BoundedGrid::new();
        twice.absorb(&batch);
        twice.absorb(&batch);

        prop_assert_eq!(once.bounds(), twice.bounds());
        prop_assert!(once.tiles().eq(twice.tiles()));
    }

    #[test]
    fn planning_is_deterministic_and_adjacent(
        batch in prop::collection::vec(arb_observation(), 1..40),
        origin_x in -12i32..12,
        origin_y in -12i32..12,
    ) {
        let mut map = AttractivenessMap::new();
        map.absorb(&batch);
        let origin = Coord::new(origin_x, origin_y);
        let capabilities = scout_core::Capabilities::none().with_laser_charge();

        let first = map.plan_next_tile(origin, &capabilities);
        let second = map.plan_next_tile(origin, &capabilities);
        prop_assert_eq!(first, second);

        if let Some(next) = first {
            prop_assert_eq!(next.manhattan_distance(origin), 1);
        }
    }
}
