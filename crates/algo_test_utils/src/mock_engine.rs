//! In-memory engine adapter.
//!
//! Charges catalog costs, rejects blocked or unaffordable cells and keeps a
//! log of every request so tests can assert on what the planner asked for.
//! Placed structures are written into the snapshot immediately, so later
//! requests in the same turn see them as blocking.

use std::collections::HashMap;

use algo_core::board::{BoardSnapshot, Owner, PlacedUnit};
use algo_core::catalog::{Cost, Resource, UnitCatalog, UnitType};
use algo_core::engine::EngineAdapter;
use algo_core::grid::{Arena, Coord, Edge};
use algo_core::math::Fixed;
use tracing::trace;

use crate::fixtures::unit;

/// One accepted placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Unit type placed.
    pub unit_type: UnitType,
    /// Cell.
    pub coord: Coord,
    /// Units placed at the cell.
    pub count: u32,
}

/// Scriptable stand-in for the game engine.
#[derive(Debug, Clone)]
pub struct MockEngine {
    catalog: UnitCatalog,
    arena: Arena,
    board: BoardSnapshot,
    health: Fixed,
    cores: Fixed,
    bits: Fixed,
    paths: HashMap<Coord, Vec<Coord>>,
    reject_placements: bool,
    placements: Vec<Placement>,
    removals: Vec<Coord>,
    upgrades: Vec<Coord>,
    submitted: u32,
}

impl MockEngine {
    /// Empty board on turn 0 with 30 health and no resources.
    #[must_use]
    pub fn new(catalog: UnitCatalog) -> Self {
        Self {
            catalog,
            arena: Arena::default(),
            board: BoardSnapshot::new(0),
            health: Fixed::from_num(30),
            cores: Fixed::ZERO,
            bits: Fixed::ZERO,
            paths: HashMap::new(),
            reject_placements: false,
            placements: Vec::new(),
            removals: Vec::new(),
            upgrades: Vec::new(),
            submitted: 0,
        }
    }

    /// Replace the board.
    #[must_use]
    pub fn with_board(mut self, board: BoardSnapshot) -> Self {
        self.board = board;
        self
    }

    /// Set both resources.
    #[must_use]
    pub fn with_resources(mut self, cores: i32, bits: i32) -> Self {
        self.set_resources(cores, bits);
        self
    }

    /// Set our health.
    #[must_use]
    pub fn with_health(mut self, health: i32) -> Self {
        self.health = Fixed::from_num(health);
        self
    }

    /// Fix the path returned for a launch cell.
    #[must_use]
    pub fn with_path(mut self, launch: Coord, path: Vec<Coord>) -> Self {
        self.paths.insert(launch, path);
        self
    }

    /// Make every placement fail.
    #[must_use]
    pub fn rejecting_placements(mut self) -> Self {
        self.reject_placements = true;
        self
    }

    /// Set both resources.
    pub fn set_resources(&mut self, cores: i32, bits: i32) {
        self.cores = Fixed::from_num(cores);
        self.bits = Fixed::from_num(bits);
    }

    /// Set our health.
    pub fn set_health(&mut self, health: i32) {
        self.health = Fixed::from_num(health);
    }

    /// Jump to a turn, keeping every structure on the board.
    #[must_use]
    pub fn with_turn(mut self, turn: u32) -> Self {
        self.set_turn(turn);
        self
    }

    /// Jump to a turn, keeping every structure on the board.
    pub fn set_turn(&mut self, turn: u32) {
        let mut board = BoardSnapshot::new(turn);
        for owner in [Owner::Me, Owner::Enemy] {
            for u in self.board.stationary_units(owner) {
                board.insert(*u);
            }
        }
        self.board = board;
    }

    /// Start the next turn: apply removals and clear the turn's logs.
    pub fn next_turn(&mut self) {
        self.set_turn(self.board.turn() + 1);
        for c in self.removals.drain(..) {
            self.board.clear_cell(c);
        }
        self.placements.clear();
        self.upgrades.clear();
    }

    /// Add a unit with catalog health.
    pub fn add_unit(&mut self, unit_type: UnitType, owner: Owner, coord: Coord) {
        self.board.insert(unit(&self.catalog, unit_type, owner, coord));
    }

    /// Knock a structure out, as combat would between turns.
    pub fn destroy(&mut self, coord: Coord) -> bool {
        self.board.clear_cell(coord) > 0
    }

    /// Add one of our structures with the given health.
    pub fn add_worn(&mut self, unit_type: UnitType, coord: Coord, health: i32) {
        let mut u = unit(&self.catalog, unit_type, Owner::Me, coord);
        u.health = Fixed::from_num(health);
        self.board.insert(u);
    }

    /// The board as the planner sees it.
    #[must_use]
    pub const fn board(&self) -> &BoardSnapshot {
        &self.board
    }

    /// Accepted placements this turn, in order.
    #[must_use]
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Units of a type placed at a cell this turn.
    #[must_use]
    pub fn placed_at(&self, unit_type: UnitType, coord: Coord) -> u32 {
        self.placements
            .iter()
            .filter(|p| p.unit_type == unit_type && p.coord == coord)
            .map(|p| p.count)
            .sum()
    }

    /// Units of a type placed anywhere this turn.
    #[must_use]
    pub fn placed_of(&self, unit_type: UnitType) -> u32 {
        self.placements
            .iter()
            .filter(|p| p.unit_type == unit_type)
            .map(|p| p.count)
            .sum()
    }

    /// Cells flagged for removal.
    #[must_use]
    pub fn removals(&self) -> &[Coord] {
        &self.removals
    }

    /// Cells upgraded this turn.
    #[must_use]
    pub fn upgrades(&self) -> &[Coord] {
        &self.upgrades
    }

    /// Number of submitted turns.
    #[must_use]
    pub const fn submitted(&self) -> u32 {
        self.submitted
    }

    fn can_pay(&self, cost: Cost) -> bool {
        self.cores >= cost.cores && self.bits >= cost.bits
    }

    fn pay(&mut self, cost: Cost) {
        self.cores -= cost.cores;
        self.bits -= cost.bits;
    }

    fn place_one_cell(&mut self, unit_type: UnitType, coord: Coord, count: u32) -> u32 {
        if self.reject_placements
            || !self.arena.contains(coord)
            || self.arena.is_enemy_half(coord)
            || self.board.is_blocked(coord)
        {
            trace!(%coord, ?unit_type, "Mock engine refused cell");
            return 0;
        }
        let stats = self.catalog.lookup(unit_type);
        let (cost, stationary) = (stats.cost, stats.stationary);
        let limit = if stationary { 1 } else { count };

        let mut placed = 0;
        while placed < limit && self.can_pay(cost) {
            self.pay(cost);
            placed += 1;
        }
        if placed == 0 {
            return 0;
        }
        if stationary {
            self.add_unit(unit_type, Owner::Me, coord);
        }
        self.placements.push(Placement {
            unit_type,
            coord,
            count: placed,
        });
        placed
    }

    fn fallback_path(&self, from: Coord, to_edge: Edge) -> Vec<Coord> {
        let (dx, dy) = match to_edge {
            Edge::TopRight => (1, 1),
            Edge::TopLeft => (-1, 1),
            Edge::BottomLeft => (-1, -1),
            Edge::BottomRight => (1, -1),
        };
        let mut path = vec![from];
        let mut step = from.offset(dx, dy);
        while self.arena.contains(step) {
            path.push(step);
            step = step.offset(dx, dy);
        }
        path
    }
}

impl EngineAdapter for MockEngine {
    fn snapshot(&self) -> &BoardSnapshot {
        &self.board
    }

    fn my_health(&self) -> Fixed {
        self.health
    }

    fn resource_level(&self, resource: Resource) -> Fixed {
        match resource {
            Resource::Cores => self.cores,
            Resource::Bits => self.bits,
        }
    }

    fn type_cost(&self, unit_type: UnitType) -> Cost {
        self.catalog.lookup(unit_type).cost
    }

    fn attempt_place(&mut self, unit_type: UnitType, coords: &[Coord], count: u32) -> u32 {
        coords
            .iter()
            .map(|&c| self.place_one_cell(unit_type, c, count))
            .sum()
    }

    fn attempt_remove(&mut self, coords: &[Coord]) -> bool {
        let before = self.removals.len();
        for &c in coords {
            let ours = self
                .board
                .stationary_at(c)
                .is_some_and(|u| u.owner == Owner::Me);
            if ours && !self.removals.contains(&c) {
                self.removals.push(c);
            }
        }
        self.removals.len() > before
    }

    fn attempt_upgrade(&mut self, coords: &[Coord]) -> bool {
        let before = self.upgrades.len();
        for &c in coords {
            let cost = match self.board.stationary_at(c) {
                Some(u) if u.owner == Owner::Me => self.catalog.lookup(u.unit_type).cost,
                _ => continue,
            };
            if self.can_pay(cost) && !self.upgrades.contains(&c) {
                self.pay(cost);
                self.upgrades.push(c);
            }
        }
        self.upgrades.len() > before
    }

    fn find_path(&self, from: Coord, to_edge: Edge) -> Vec<Coord> {
        self.paths
            .get(&from)
            .cloned()
            .unwrap_or_else(|| self.fallback_path(from, to_edge))
    }

    fn attackers_in_range(&self, coord: Coord, owner: Owner) -> Vec<PlacedUnit> {
        self.board
            .stationary_units(owner)
            .filter(|u| {
                let stats = self.catalog.lookup(u.unit_type);
                stats.damage_to_mobile > Fixed::ZERO
                    && Fixed::saturating_from_num(u.coord.distance_squared(coord))
                        <= stats.range.saturating_mul(stats.range)
            })
            .copied()
            .collect()
    }

    fn edge_locations(&self, edge: Edge) -> Vec<Coord> {
        self.arena.edge(edge)
    }

    fn submit_turn(&mut self) {
        self.submitted += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::standard_catalog;

    #[test]
    fn test_placement_charges_and_blocks() {
        let mut engine = MockEngine::new(standard_catalog()).with_resources(3, 0);
        let c = Coord::new(3, 10);
        assert_eq!(engine.attempt_place(UnitType::Turret, &[c], 1), 1);
        assert_eq!(engine.resource_level(Resource::Cores), Fixed::ONE);
        assert_eq!(engine.attempt_place(UnitType::Wall, &[c], 1), 0);
        assert!(engine.snapshot().is_blocked(c));
    }

    #[test]
    fn test_mobile_volley_stops_when_broke() {
        let mut engine = MockEngine::new(standard_catalog()).with_resources(0, 5);
        let placed = engine.attempt_place(UnitType::Scout, &[Coord::new(13, 0)], 1000);
        assert_eq!(placed, 5);
        assert_eq!(engine.placed_at(UnitType::Scout, Coord::new(13, 0)), 5);
    }

    #[test]
    fn test_destroyed_structure_frees_its_cell() {
        let mut engine = MockEngine::new(standard_catalog()).with_resources(4, 0);
        let c = Coord::new(3, 10);
        engine.attempt_place(UnitType::Turret, &[c], 1);
        assert_eq!(
            engine.placements(),
            &[Placement {
                unit_type: UnitType::Turret,
                coord: c,
                count: 1,
            }]
        );

        assert!(engine.destroy(c));
        assert!(!engine.destroy(c));
        assert_eq!(engine.attempt_place(UnitType::Turret, &[c], 1), 1);
        assert_eq!(engine.resource_level(Resource::Cores), Fixed::ZERO);
    }

    #[test]
    fn test_enemy_half_is_off_limits() {
        let mut engine = MockEngine::new(standard_catalog()).with_resources(10, 10);
        assert_eq!(engine.attempt_place(UnitType::Wall, &[Coord::new(13, 14)], 1), 0);
    }

    #[test]
    fn test_turret_range_is_inclusive() {
        let mut engine = MockEngine::new(standard_catalog());
        engine.add_unit(UnitType::Turret, Owner::Enemy, Coord::new(10, 16));
        assert_eq!(engine.attackers_in_range(Coord::new(12, 16), Owner::Enemy).len(), 1);
        assert!(engine
            .attackers_in_range(Coord::new(13, 16), Owner::Enemy)
            .is_empty());
    }
}
