//! Test fixtures and helpers.
//!
//! A standard match configuration and shortcuts for populating boards.

use algo_core::board::{BoardSnapshot, Owner, PlacedUnit};
use algo_core::catalog::{MatchConfig, UnitCatalog, UnitType};
use algo_core::grid::Coord;
use algo_core::math::Fixed;

/// Unit configuration shaped like the engine's `unitInformation` payload.
pub const STANDARD_CONFIG_JSON: &str = r#"{
    "unitInformation": [
        {"shorthand": "FF", "unitCategory": 0, "cost1": 1, "startHealth": 60},
        {"shorthand": "EF", "unitCategory": 0, "cost1": 4, "startHealth": 30,
         "shieldRange": 3.5, "shieldPerUnit": 3},
        {"shorthand": "DF", "unitCategory": 0, "cost1": 2, "startHealth": 75,
         "attackRange": 2.5, "attackDamageWalker": 5, "attackDamageTower": 0},
        {"shorthand": "PI", "unitCategory": 1, "cost2": 1, "startHealth": 15,
         "attackRange": 3.5, "attackDamageWalker": 2, "attackDamageTower": 2, "speed": 1},
        {"shorthand": "EI", "unitCategory": 1, "cost2": 3, "startHealth": 5,
         "attackRange": 4.5, "attackDamageWalker": 8, "attackDamageTower": 8, "speed": 0.5},
        {"shorthand": "SI", "unitCategory": 1, "cost2": 1, "startHealth": 40,
         "attackRange": 4.5, "attackDamageWalker": 20, "speed": 0.25}
    ]
}"#;

/// Create a fixed-point number from an integer.
#[must_use]
pub fn fixed(n: i32) -> Fixed {
    Fixed::from_num(n)
}

/// Create a fixed-point number from a float (for tests only).
#[must_use]
pub fn fixed_f(n: f64) -> Fixed {
    Fixed::from_num(n)
}

/// The standard configuration, parsed.
///
/// # Panics
///
/// Panics if the embedded JSON is malformed.
#[must_use]
pub fn standard_config() -> MatchConfig {
    MatchConfig::from_json_str(STANDARD_CONFIG_JSON).expect("standard config parses")
}

/// Catalog built from the standard configuration.
///
/// # Panics
///
/// Panics if the embedded JSON is malformed.
#[must_use]
pub fn standard_catalog() -> UnitCatalog {
    UnitCatalog::from_json_str(STANDARD_CONFIG_JSON).expect("standard catalog builds")
}

/// A unit with the catalog's starting health.
#[must_use]
pub fn unit(catalog: &UnitCatalog, unit_type: UnitType, owner: Owner, coord: Coord) -> PlacedUnit {
    let stats = catalog.lookup(unit_type);
    PlacedUnit {
        unit_type,
        owner,
        coord,
        stationary: stats.stationary,
        health: stats.health,
    }
}

/// Board holding one opponent structure per cell.
#[must_use]
pub fn enemy_board(
    catalog: &UnitCatalog,
    turn: u32,
    unit_type: UnitType,
    cells: &[(i32, i32)],
) -> BoardSnapshot {
    let mut board = BoardSnapshot::new(turn);
    for &cell in cells {
        board.insert(unit(catalog, unit_type, Owner::Enemy, cell.into()));
    }
    board
}
