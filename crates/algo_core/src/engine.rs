//! The engine adapter the planner talks through.
//!
//! The game engine owns the board, legality rules, pathfinding and resource
//! accounting. The planner only sees it through [`EngineAdapter`], which keeps
//! the decision core testable without a running match: tests drive the same
//! planning code through an in-memory implementation.
//!
//! # Attempt semantics
//!
//! `attempt_*` calls are advisory. The engine applies what it can and reports
//! how much succeeded; a return of `0`/`false` means the request was
//! unaffordable or blocked and is not an error.

use crate::board::{BoardSnapshot, Owner, PlacedUnit};
use crate::catalog::{Cost, Resource, UnitType};
use crate::grid::{Coord, Edge};
use crate::math::Fixed;

/// One breach reported in an action frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreachEvent {
    /// Cell on the defender's edge that was reached.
    pub coord: Coord,
    /// Owner of the unit that scored.
    pub owner: Owner,
}

/// Everything the planner needs from the game engine during a turn.
pub trait EngineAdapter {
    /// The board at the start of this turn.
    fn snapshot(&self) -> &BoardSnapshot;

    /// Current turn number, starting at 0.
    fn turn_number(&self) -> u32 {
        self.snapshot().turn()
    }

    /// Our remaining health.
    fn my_health(&self) -> Fixed;

    /// Amount of a resource still available this turn.
    fn resource_level(&self, resource: Resource) -> Fixed;

    /// Current deployment cost of a unit type.
    fn type_cost(&self, unit_type: UnitType) -> Cost;

    /// Try to place `count` units of `unit_type` at each of `coords`.
    ///
    /// Returns the number of units actually placed.
    fn attempt_place(&mut self, unit_type: UnitType, coords: &[Coord], count: u32) -> u32;

    /// Flag our stationary units at `coords` for removal.
    ///
    /// Returns true if at least one unit was flagged.
    fn attempt_remove(&mut self, coords: &[Coord]) -> bool;

    /// Upgrade our stationary units at `coords`.
    ///
    /// Returns true if at least one unit was upgraded.
    fn attempt_upgrade(&mut self, coords: &[Coord]) -> bool;

    /// Default path a mobile unit launched at `from` takes towards `to_edge`.
    fn find_path(&self, from: Coord, to_edge: Edge) -> Vec<Coord>;

    /// Stationary units owned by `owner` whose attack range covers `coord`.
    fn attackers_in_range(&self, coord: Coord, owner: Owner) -> Vec<PlacedUnit>;

    /// Cells of one arena edge.
    fn edge_locations(&self, edge: Edge) -> Vec<Coord>;

    /// Send the turn's deployments to the engine.
    fn submit_turn(&mut self);

    /// Whether a unit could currently be afforded.
    fn can_afford(&self, unit_type: UnitType) -> bool {
        let cost = self.type_cost(unit_type);
        self.resource_level(Resource::Cores) >= cost.cores
            && self.resource_level(Resource::Bits) >= cost.bits
    }
}
