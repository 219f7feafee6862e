//! Enemy intelligence: where the opponent's stationary defenses stand.
//!
//! The inventory is rebuilt from scratch on every scan; nothing carries over
//! from the previous turn.

use std::collections::BTreeMap;

use tracing::debug;

use crate::board::{BoardSnapshot, Owner};
use crate::catalog::UnitType;
use crate::grid::{Arena, Coord};
use crate::math::{exceeds_ratio, ratio, Fixed};
use crate::regions::{Region, RegionLibrary};

/// Locations of the opponent's stationary units, by type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnemyInventory {
    by_type: BTreeMap<UnitType, Vec<Coord>>,
    total: usize,
}

impl EnemyInventory {
    /// Scan the opponent half of a snapshot.
    ///
    /// Cells are visited row by row from the neutral line, so the coordinate
    /// lists are in a stable order for a given board.
    #[must_use]
    pub fn scan(board: &BoardSnapshot, arena: &Arena) -> Self {
        let mut inventory = Self::default();
        for coord in arena.enemy_half() {
            for unit in board.units_at(coord) {
                if unit.owner == Owner::Enemy && unit.stationary {
                    inventory.by_type.entry(unit.unit_type).or_default().push(coord);
                    inventory.total += 1;
                }
            }
        }
        debug!(
            turn = board.turn(),
            total = inventory.total,
            "Scanned enemy defenses"
        );
        inventory
    }

    /// Number of stationary opponent units found.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Locations of one unit type.
    #[must_use]
    pub fn locations(&self, unit_type: UnitType) -> &[Coord] {
        self.by_type.get(&unit_type).map_or(&[], Vec::as_slice)
    }

    /// Unit types seen, with their locations.
    pub fn iter(&self) -> impl Iterator<Item = (UnitType, &[Coord])> {
        self.by_type.iter().map(|(t, locs)| (*t, locs.as_slice()))
    }

    /// Count stationary units inside a region.
    ///
    /// With `unit_type` set only that type is counted. Types never observed do
    /// not appear in [`DensityReport::per_type`].
    #[must_use]
    pub fn density(&self, region: &Region, unit_type: Option<UnitType>) -> DensityReport {
        let per_type: BTreeMap<UnitType, usize> = self
            .iter()
            .filter(|(t, _)| unit_type.map_or(true, |wanted| wanted == *t))
            .map(|(t, locs)| (t, locs.iter().filter(|c| region.contains(**c)).count()))
            .collect();
        let total = per_type.values().sum();
        DensityReport {
            per_type,
            total,
            region_size: region.len(),
        }
    }

    /// Which frontier row holds the most units of `unit_type`.
    ///
    /// Ties go to the lowest row. An empty frontier reports the first frontier
    /// row with a count of zero.
    #[must_use]
    pub fn frontier_dominant_row(
        &self,
        regions: &RegionLibrary,
        unit_type: UnitType,
    ) -> FrontierReport {
        let frontier = regions.frontier();
        let rows = regions.frontier_rows();
        let mut row_counts: BTreeMap<i32, usize> = rows.clone().map(|r| (r, 0)).collect();

        let mut total_units = 0;
        let mut matching = 0;
        for (t, locs) in self.iter() {
            for c in locs.iter().filter(|c| frontier.contains(**c)) {
                total_units += 1;
                if t == unit_type {
                    matching += 1;
                    *row_counts.entry(c.y).or_default() += 1;
                }
            }
        }

        let mut dominant = (*rows.start(), 0);
        for (&row, &count) in &row_counts {
            if count > dominant.1 {
                dominant = (row, count);
            }
        }

        debug!(
            total_units,
            matching,
            row = dominant.0,
            count = dominant.1,
            ?unit_type,
            "Frontier scan"
        );
        FrontierReport {
            total_units,
            matching,
            dominant_row: dominant.0,
            dominant_count: dominant.1,
        }
    }
}

/// Result of a region density query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DensityReport {
    /// Count per observed unit type.
    pub per_type: BTreeMap<UnitType, usize>,
    /// Sum of all counts.
    pub total: usize,
    /// Number of cells in the region.
    pub region_size: usize,
}

impl DensityReport {
    /// Fraction of the region occupied.
    #[must_use]
    pub fn ratio(&self) -> Fixed {
        ratio(self.total, self.region_size)
    }

    /// True when more than `threshold` of the region is occupied.
    #[must_use]
    pub fn is_saturated(&self, threshold: Fixed) -> bool {
        exceeds_ratio(self.total, self.region_size, threshold)
    }
}

/// Result of a frontier dominance query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontierReport {
    /// Stationary units of any type in the frontier.
    pub total_units: usize,
    /// Units of the requested type in the frontier.
    pub matching: usize,
    /// Row with the most units of the requested type.
    pub dominant_row: i32,
    /// Units of the requested type in that row.
    pub dominant_count: usize,
}
