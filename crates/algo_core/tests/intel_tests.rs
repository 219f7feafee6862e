//! Enemy intelligence tests: scanning, density and frontier queries against
//! boards built from the standard match configuration.

use algo_core::board::{BoardSnapshot, Owner};
use algo_core::catalog::UnitType;
use algo_core::grid::{Arena, Coord};
use algo_core::intel::EnemyInventory;
use algo_core::math::Fixed;
use algo_core::regions::{Region, RegionLibrary, Side};
use algo_test_utils::determinism::strategies::arb_enemy_structures;
use algo_test_utils::fixtures::{enemy_board, fixed_f, standard_catalog, unit};
use algo_test_utils::proptest::prelude::*;

// =============================================================================
// Density
// =============================================================================

#[test]
fn eight_of_ten_cells_saturates_the_region() {
    let catalog = standard_catalog();
    let region = Region::new("row_20", (7..17).map(|x| Coord::new(x, 20)));
    assert_eq!(region.len(), 10);

    let occupied: Vec<(i32, i32)> = (7..15).map(|x| (x, 20)).collect();
    let board = enemy_board(&catalog, 4, UnitType::Turret, &occupied);
    let inventory = EnemyInventory::scan(&board, &Arena::default());

    let report = inventory.density(&region, None);
    assert_eq!(report.total, 8);
    assert_eq!(report.region_size, 10);
    assert_eq!(report.ratio(), Fixed::from_num(8) / Fixed::from_num(10));
    assert!(report.is_saturated(fixed_f(0.7)));
    assert!(!report.is_saturated(fixed_f(0.8)));
}

#[test]
fn density_can_filter_by_type() {
    let catalog = standard_catalog();
    let mut board = enemy_board(&catalog, 1, UnitType::Wall, &[(10, 15), (11, 15)]);
    board.insert(unit(&catalog, UnitType::Turret, Owner::Enemy, Coord::new(12, 15)));
    let inventory = EnemyInventory::scan(&board, &Arena::default());
    let lib = RegionLibrary::default();

    let all = inventory.density(lib.frontier(), None);
    assert_eq!(all.total, 3);
    assert_eq!(all.per_type.get(&UnitType::Wall), Some(&2));

    let turrets = inventory.density(lib.frontier(), Some(UnitType::Turret));
    assert_eq!(turrets.total, 1);
    assert!(!turrets.per_type.contains_key(&UnitType::Wall));
}

#[test]
fn scan_ignores_our_units_and_mobile_units() {
    let catalog = standard_catalog();
    let mut board = BoardSnapshot::new(2);
    board.insert(unit(&catalog, UnitType::Turret, Owner::Me, Coord::new(5, 10)));
    board.insert(unit(&catalog, UnitType::Scout, Owner::Enemy, Coord::new(13, 20)));
    board.insert(unit(&catalog, UnitType::Support, Owner::Enemy, Coord::new(13, 21)));

    let inventory = EnemyInventory::scan(&board, &Arena::default());
    assert_eq!(inventory.total(), 1);
    assert_eq!(inventory.locations(UnitType::Support), &[Coord::new(13, 21)]);
    assert!(inventory.locations(UnitType::Scout).is_empty());
}

#[test]
fn empty_region_reports_zero_ratio() {
    let inventory = EnemyInventory::default();
    let empty = Region::new("nothing", std::iter::empty());
    let report = inventory.density(&empty, None);
    assert_eq!(report.ratio(), Fixed::ZERO);
    assert!(!report.is_saturated(fixed_f(0.7)));
}

// =============================================================================
// Frontier
// =============================================================================

#[test]
fn frontier_picks_the_densest_row() {
    let catalog = standard_catalog();
    let mut cells = Vec::new();
    cells.extend((8..11).map(|x| (x, 15)));
    cells.extend((8..13).map(|x| (x, 16)));
    cells.push((10, 18));
    let mut board = enemy_board(&catalog, 6, UnitType::Turret, &cells);
    // Walls count towards the total but not the dominant row.
    board.insert(unit(&catalog, UnitType::Wall, Owner::Enemy, Coord::new(9, 17)));

    let lib = RegionLibrary::default();
    let inventory = EnemyInventory::scan(&board, lib.arena());
    let report = inventory.frontier_dominant_row(&lib, UnitType::Turret);

    assert_eq!(report.dominant_row, 16);
    assert_eq!(report.dominant_count, 5);
    assert_eq!(report.matching, 9);
    assert_eq!(report.total_units, 10);
}

#[test]
fn frontier_ties_go_to_the_nearest_row() {
    let catalog = standard_catalog();
    let board = enemy_board(
        &catalog,
        6,
        UnitType::Turret,
        &[(9, 17), (10, 17), (9, 15), (10, 15)],
    );
    let lib = RegionLibrary::default();
    let report = EnemyInventory::scan(&board, lib.arena()).frontier_dominant_row(&lib, UnitType::Turret);
    assert_eq!(report.dominant_row, 15);
    assert_eq!(report.dominant_count, 2);
}

#[test]
fn empty_frontier_has_a_default_answer() {
    let lib = RegionLibrary::default();
    let report = EnemyInventory::default().frontier_dominant_row(&lib, UnitType::Turret);
    assert_eq!(report.dominant_row, 14);
    assert_eq!(report.dominant_count, 0);
    assert_eq!(report.total_units, 0);
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Every structure on the opponent half is found exactly once.
    #[test]
    fn scan_total_matches_enemy_half_density(structures in arb_enemy_structures(40)) {
        let catalog = standard_catalog();
        let mut board = BoardSnapshot::new(0);
        for (unit_type, coord) in &structures {
            board.insert(unit(&catalog, *unit_type, Owner::Enemy, *coord));
        }
        let lib = RegionLibrary::default();
        let inventory = EnemyInventory::scan(&board, lib.arena());

        prop_assert_eq!(inventory.total(), structures.len());
        prop_assert_eq!(inventory.density(lib.enemy_half(), None).total, structures.len());
    }

    /// Mirroring the board swaps left and right lane densities.
    #[test]
    fn lane_density_is_mirror_symmetric(structures in arb_enemy_structures(40), depth in 0usize..4) {
        let catalog = standard_catalog();
        let lib = RegionLibrary::default();
        let arena = *lib.arena();
        let mut board = BoardSnapshot::new(0);
        let mut mirrored = BoardSnapshot::new(0);
        for (unit_type, coord) in &structures {
            board.insert(unit(&catalog, *unit_type, Owner::Enemy, *coord));
            mirrored.insert(unit(&catalog, *unit_type, Owner::Enemy, arena.mirror(*coord)));
        }

        let left = lib.edge_lane(Side::Left, depth).unwrap();
        let right = lib.edge_lane(Side::Right, depth).unwrap();
        prop_assert_eq!(left.len(), right.len());

        let original = EnemyInventory::scan(&board, &arena);
        let reflected = EnemyInventory::scan(&mirrored, &arena);
        prop_assert_eq!(
            original.density(left, None).total,
            reflected.density(right, None).total
        );
    }
}
