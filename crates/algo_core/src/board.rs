//! Read-only board snapshot handed over by the engine adapter each turn.

use std::collections::HashMap;

use crate::catalog::UnitType;
use crate::grid::Coord;
use crate::math::Fixed;

/// Which player a unit or event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Owner {
    /// The agent.
    Me,
    /// The opponent.
    Enemy,
}

/// A unit present on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedUnit {
    /// Unit type.
    pub unit_type: UnitType,
    /// Owner.
    pub owner: Owner,
    /// Cell the unit occupies.
    pub coord: Coord,
    /// Whether the unit is stationary.
    pub stationary: bool,
    /// Current health.
    pub health: Fixed,
}

/// Units on the board at the start of a turn, keyed by cell.
#[derive(Debug, Clone, Default)]
pub struct BoardSnapshot {
    turn: u32,
    cells: HashMap<Coord, Vec<PlacedUnit>>,
}

impl BoardSnapshot {
    /// Create an empty snapshot for a turn.
    #[must_use]
    pub fn new(turn: u32) -> Self {
        Self {
            turn,
            cells: HashMap::new(),
        }
    }

    /// Turn number this snapshot was taken at.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// Add a unit to its cell.
    pub fn insert(&mut self, unit: PlacedUnit) {
        self.cells.entry(unit.coord).or_default().push(unit);
    }

    /// Remove every unit from a cell, returning how many were there.
    pub fn clear_cell(&mut self, coord: Coord) -> usize {
        self.cells.remove(&coord).map_or(0, |units| units.len())
    }

    /// Units at a cell, empty when the cell is free.
    #[must_use]
    pub fn units_at(&self, coord: Coord) -> &[PlacedUnit] {
        self.cells.get(&coord).map_or(&[], Vec::as_slice)
    }

    /// The stationary unit occupying a cell, if any.
    #[must_use]
    pub fn stationary_at(&self, coord: Coord) -> Option<&PlacedUnit> {
        self.units_at(coord).iter().find(|u| u.stationary)
    }

    /// True when a stationary unit blocks the cell.
    #[must_use]
    pub fn is_blocked(&self, coord: Coord) -> bool {
        self.stationary_at(coord).is_some()
    }

    /// Every stationary unit owned by `owner`, in no particular order.
    pub fn stationary_units(&self, owner: Owner) -> impl Iterator<Item = &PlacedUnit> {
        self.cells
            .values()
            .flatten()
            .filter(move |u| u.stationary && u.owner == owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall(owner: Owner, x: i32, y: i32) -> PlacedUnit {
        PlacedUnit {
            unit_type: UnitType::Wall,
            owner,
            coord: Coord::new(x, y),
            stationary: true,
            health: Fixed::from_num(60),
        }
    }

    #[test]
    fn test_blocked_only_by_stationary_units() {
        let mut board = BoardSnapshot::new(3);
        board.insert(wall(Owner::Enemy, 10, 15));
        board.insert(PlacedUnit {
            unit_type: UnitType::Scout,
            owner: Owner::Me,
            coord: Coord::new(4, 9),
            stationary: false,
            health: Fixed::from_num(15),
        });

        assert!(board.is_blocked(Coord::new(10, 15)));
        assert!(!board.is_blocked(Coord::new(4, 9)));
        assert_eq!(board.units_at(Coord::new(4, 9)).len(), 1);
        assert!(board.units_at(Coord::new(0, 13)).is_empty());
        assert_eq!(board.turn(), 3);
    }

    #[test]
    fn test_stationary_units_filter_by_owner() {
        let mut board = BoardSnapshot::new(0);
        board.insert(wall(Owner::Enemy, 10, 15));
        board.insert(wall(Owner::Enemy, 11, 15));
        board.insert(wall(Owner::Me, 11, 12));
        assert_eq!(board.stationary_units(Owner::Enemy).count(), 2);
        assert_eq!(board.clear_cell(Coord::new(11, 12)), 1);
        assert_eq!(board.stationary_units(Owner::Me).count(), 0);
    }
}
