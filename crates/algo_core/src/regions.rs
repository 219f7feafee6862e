//! Named board regions used for density queries.
//!
//! Every region is generated once per match from a closed-form rule on the
//! left side of the board and reflected to produce its right-side twin, so
//! mirrored pairs always hold the same number of cells.
//!
//! - **Edge lanes**: diagonals parallel to the opponent's top-left edge,
//!   `depth` steps in from it.
//! - **Corners**: triangles of side [`RegionLibrary::CORNER_SIDE`] tucked into
//!   the opponent's rear corners.
//! - **Frontier**: the central columns, a quarter of the board in from each
//!   side, across the rows just behind the neutral line.
//! - **Breach zones**: our own edge cells nearest each rear corner.

use std::collections::HashSet;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::grid::{Arena, Coord};

/// Board side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Low columns.
    Left,
    /// High columns.
    Right,
}

impl Side {
    /// Both sides, left first.
    pub const BOTH: [Self; 2] = [Self::Left, Self::Right];
}

/// A named, static set of cells.
#[derive(Debug, Clone)]
pub struct Region {
    name: String,
    cells: Vec<Coord>,
    index: HashSet<Coord>,
}

impl Region {
    /// Create a region; duplicate cells are dropped, first occurrence wins.
    #[must_use]
    pub fn new(name: impl Into<String>, cells: impl IntoIterator<Item = Coord>) -> Self {
        let mut index = HashSet::new();
        let cells: Vec<Coord> = cells.into_iter().filter(|c| index.insert(*c)).collect();
        Self {
            name: name.into(),
            cells,
            index,
        }
    }

    /// Region name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Membership test.
    #[must_use]
    pub fn contains(&self, coord: Coord) -> bool {
        self.index.contains(&coord)
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True for a region without cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells in generation order.
    #[must_use]
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    /// Column reflection of this region under a new name.
    #[must_use]
    pub fn mirrored(&self, arena: &Arena, name: impl Into<String>) -> Self {
        Self::new(name, self.cells.iter().map(|c| arena.mirror(*c)))
    }
}

impl PartialEq for Region {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

/// All regions of one match.
#[derive(Debug, Clone)]
pub struct RegionLibrary {
    arena: Arena,
    left_lanes: Vec<Region>,
    right_lanes: Vec<Region>,
    left_corner: Region,
    right_corner: Region,
    frontier: Region,
    left_breach_zone: Region,
    right_breach_zone: Region,
    enemy_half: Region,
}

impl Default for RegionLibrary {
    fn default() -> Self {
        Self::build(Arena::default().half())
    }
}

impl RegionLibrary {
    /// Number of edge lane depths generated (0 is the edge itself).
    pub const EDGE_DEPTHS: i32 = 4;
    /// Side length of the corner triangles and breach zones.
    pub const CORNER_SIDE: i32 = 5;
    /// Rows covered by the frontier band.
    pub const FRONTIER_DEPTH: i32 = 5;

    /// Generate every region for an arena of the given half-size.
    #[must_use]
    pub fn build(half: i32) -> Self {
        let arena = Arena::new(half);

        let left_lanes: Vec<Region> = (0..Self::EDGE_DEPTHS)
            .map(|depth| {
                Region::new(
                    format!("left_edge_{depth}"),
                    (depth..half).rev().map(|x| Coord::new(x, x + half - depth)),
                )
            })
            .collect();
        let right_lanes = left_lanes
            .iter()
            .enumerate()
            .map(|(depth, lane)| lane.mirrored(&arena, format!("right_edge_{depth}")))
            .collect();

        let side = Self::CORNER_SIDE;
        let left_corner = Region::new(
            "left_corner",
            (0..side)
                .rev()
                .flat_map(|k| (k..side).map(move |x| Coord::new(x, half + k))),
        );
        let right_corner = left_corner.mirrored(&arena, "right_corner");

        let margin = half / 2;
        let frontier = Region::new(
            "frontier",
            (half..half + Self::FRONTIER_DEPTH)
                .flat_map(|y| (margin..2 * half - margin).map(move |x| Coord::new(x, y))),
        );

        let left_breach_zone = Region::new(
            "left_breach_zone",
            (0..side).map(|i| Coord::new(i, half - 1 - i)),
        );
        let right_breach_zone = left_breach_zone.mirrored(&arena, "right_breach_zone");

        let enemy_half = Region::new("enemy_half", arena.enemy_half());

        Self {
            arena,
            left_lanes,
            right_lanes,
            left_corner,
            right_corner,
            frontier,
            left_breach_zone,
            right_breach_zone,
            enemy_half,
        }
    }

    /// Arena geometry the library was built for.
    #[must_use]
    pub const fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Edge lane at `depth` on one side.
    #[must_use]
    pub fn edge_lane(&self, side: Side, depth: usize) -> Option<&Region> {
        match side {
            Side::Left => self.left_lanes.get(depth),
            Side::Right => self.right_lanes.get(depth),
        }
    }

    /// Rear corner triangle on one side.
    #[must_use]
    pub const fn corner(&self, side: Side) -> &Region {
        match side {
            Side::Left => &self.left_corner,
            Side::Right => &self.right_corner,
        }
    }

    /// Our edge cells nearest the rear corner on one side.
    #[must_use]
    pub const fn breach_zone(&self, side: Side) -> &Region {
        match side {
            Side::Left => &self.left_breach_zone,
            Side::Right => &self.right_breach_zone,
        }
    }

    /// The frontier band.
    #[must_use]
    pub const fn frontier(&self) -> &Region {
        &self.frontier
    }

    /// Rows covered by the frontier band, ascending.
    #[must_use]
    pub fn frontier_rows(&self) -> RangeInclusive<i32> {
        let half = self.arena.half();
        half..=half + Self::FRONTIER_DEPTH - 1
    }

    /// The whole opponent half.
    #[must_use]
    pub const fn enemy_half(&self) -> &Region {
        &self.enemy_half
    }

    /// Every region, lanes first.
    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.left_lanes
            .iter()
            .chain(&self.right_lanes)
            .chain([
                &self.left_corner,
                &self.right_corner,
                &self.frontier,
                &self.left_breach_zone,
                &self.right_breach_zone,
                &self.enemy_half,
            ])
    }

    /// Look a region up by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Region> {
        self.iter().find(|r| r.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_lane_shapes() {
        let lib = RegionLibrary::default();
        let lane0 = lib.edge_lane(Side::Left, 0).unwrap();
        assert_eq!(lane0.len(), 14);
        assert_eq!(lane0.cells()[0], Coord::new(13, 27));
        assert!(lane0.contains(Coord::new(0, 14)));

        let lane2 = lib.edge_lane(Side::Left, 2).unwrap();
        assert_eq!(lane2.len(), 12);
        assert!(lane2.contains(Coord::new(13, 25)));
        assert!(lane2.contains(Coord::new(2, 14)));

        let right2 = lib.edge_lane(Side::Right, 2).unwrap();
        assert!(right2.contains(Coord::new(14, 25)));
        assert!(right2.contains(Coord::new(25, 14)));
        assert!(lib.edge_lane(Side::Left, 9).is_none());
    }

    #[test]
    fn test_corner_triangles() {
        let lib = RegionLibrary::default();
        let left = lib.corner(Side::Left);
        assert_eq!(left.len(), 15);
        assert!(left.contains(Coord::new(4, 18)));
        assert!(left.contains(Coord::new(0, 14)));
        assert!(!left.contains(Coord::new(0, 15)));

        let right = lib.corner(Side::Right);
        assert!(right.contains(Coord::new(23, 18)));
        assert!(right.contains(Coord::new(27, 14)));
    }

    #[test]
    fn test_frontier_band() {
        let lib = RegionLibrary::default();
        assert_eq!(lib.frontier().len(), 14 * 5);
        assert!(lib.frontier().contains(Coord::new(7, 14)));
        assert!(lib.frontier().contains(Coord::new(20, 18)));
        assert!(!lib.frontier().contains(Coord::new(21, 14)));
        assert!(!lib.frontier().contains(Coord::new(10, 19)));
        assert_eq!(lib.frontier_rows(), 14..=18);
    }

    #[test]
    fn test_frontier_keeps_a_quarter_margin_on_small_boards() {
        let lib = RegionLibrary::build(10);
        let frontier = lib.frontier();
        assert_eq!(frontier.len(), 10 * 5);
        assert!(frontier.contains(Coord::new(5, 10)));
        assert!(frontier.contains(Coord::new(14, 14)));
        assert!(!frontier.contains(Coord::new(4, 10)));
        assert!(!frontier.contains(Coord::new(15, 10)));
    }

    #[test]
    fn test_breach_zones_are_our_edge() {
        let lib = RegionLibrary::default();
        let left = lib.breach_zone(Side::Left);
        assert_eq!(
            left.cells(),
            &[
                Coord::new(0, 13),
                Coord::new(1, 12),
                Coord::new(2, 11),
                Coord::new(3, 10),
                Coord::new(4, 9)
            ]
        );
        assert!(lib.breach_zone(Side::Right).contains(Coord::new(23, 9)));
    }

    #[test]
    fn test_every_region_is_inside_the_arena() {
        let lib = RegionLibrary::default();
        for region in lib.iter() {
            assert!(!region.is_empty(), "{} is empty", region.name());
            for c in region.cells() {
                assert!(lib.arena().contains(*c), "{} has {c} outside", region.name());
            }
        }
        assert!(lib.get("right_corner").is_some());
        assert!(lib.get("nowhere").is_none());
    }
}
