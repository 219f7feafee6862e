//! Fixed structure layouts on our half of the board.

use crate::grid::{coords, Coord};

/// Stationary units to place, grouped by type, in placement order.
#[derive(Debug, Clone, Copy)]
pub struct Blueprint {
    /// Turret cells.
    pub turrets: &'static [(i32, i32)],
    /// Support cells.
    pub supports: &'static [(i32, i32)],
    /// Wall cells.
    pub walls: &'static [(i32, i32)],
}

impl Blueprint {
    /// Every cell of the blueprint.
    #[must_use]
    pub fn cells(&self) -> Vec<Coord> {
        let mut all = coords(self.turrets);
        all.extend(coords(self.supports));
        all.extend(coords(self.walls));
        all
    }
}

/// Attack lane opened against a frontier row.
#[derive(Debug, Clone, Copy)]
pub struct LaneBlueprint {
    /// Frontier row this lane answers.
    pub row: i32,
    /// Where the attackers are launched.
    pub launch: (i32, i32),
    /// Structures that shape the lane.
    pub structure: Blueprint,
}

/// Scaffold spread across both flanks with a forward turret.
pub const SPREAD: Blueprint = Blueprint {
    turrets: &[(7, 10), (2, 12), (25, 12), (26, 12), (1, 12)],
    supports: &[(2, 11), (25, 11), (3, 10), (24, 10)],
    walls: &[(0, 13), (27, 13), (7, 11), (2, 13), (25, 13)],
};

/// Scaffold concentrated on both rear corners.
pub const FORTRESS: Blueprint = Blueprint {
    turrets: &[
        (0, 13),
        (1, 13),
        (3, 13),
        (24, 13),
        (26, 13),
        (27, 13),
        (2, 12),
        (25, 12),
        (3, 10),
        (24, 10),
    ],
    supports: &[],
    walls: &[(2, 13), (4, 13), (23, 13), (25, 13)],
};

/// Extra cover for the left rear corner.
pub const LEFT_CORNER_GUARD: Blueprint = Blueprint {
    turrets: &[(1, 13), (1, 12), (3, 11), (4, 11), (9, 11), (9, 10), (9, 9)],
    supports: &[(4, 10)],
    walls: &[
        (0, 13),
        (2, 13),
        (2, 12),
        (3, 12),
        (4, 12),
        (9, 12),
        (8, 11),
        (10, 11),
    ],
};

/// Extra cover for the right rear corner.
pub const RIGHT_CORNER_GUARD: Blueprint = Blueprint {
    turrets: &[
        (24, 13),
        (25, 13),
        (24, 12),
        (25, 12),
        (26, 12),
        (23, 11),
        (24, 11),
        (25, 11),
        (23, 10),
        (23, 9),
    ],
    supports: &[],
    walls: &[(23, 13), (26, 13), (23, 12)],
};

/// Last-ditch centre block used while stalling on low health.
pub const EMERGENCY: Blueprint = Blueprint {
    turrets: &[(13, 8), (14, 8)],
    supports: &[],
    walls: &[(12, 9), (15, 9)],
};

/// Probe lanes, one per frontier row they answer.
pub const PROBE_LANES: [LaneBlueprint; 3] = [
    LaneBlueprint {
        row: 14,
        launch: (21, 7),
        structure: Blueprint {
            turrets: &[(12, 11), (16, 11), (20, 10)],
            supports: &[
                (10, 11),
                (11, 11),
                (13, 11),
                (14, 11),
                (15, 11),
                (17, 11),
                (18, 11),
                (19, 11),
                (21, 9),
                (22, 8),
            ],
            walls: &[],
        },
    },
    LaneBlueprint {
        row: 15,
        launch: (21, 7),
        structure: Blueprint {
            turrets: &[(12, 12), (15, 12), (18, 12), (21, 11)],
            supports: &[
                (10, 12),
                (11, 12),
                (13, 12),
                (14, 12),
                (16, 12),
                (17, 12),
                (19, 12),
                (20, 12),
                (21, 10),
                (22, 9),
            ],
            walls: &[],
        },
    },
    LaneBlueprint {
        row: 16,
        launch: (22, 8),
        structure: Blueprint {
            turrets: &[(12, 13), (17, 13), (21, 12)],
            supports: &[
                (10, 13),
                (11, 13),
                (13, 13),
                (14, 13),
                (15, 13),
                (16, 13),
                (18, 13),
                (19, 13),
                (20, 13),
                (22, 11),
                (23, 10),
            ],
            walls: &[],
        },
    },
];

/// The probe lane for a dominant frontier row, if one exists.
#[must_use]
pub fn probe_lane(row: i32) -> Option<&'static LaneBlueprint> {
    PROBE_LANES.iter().find(|lane| lane.row == row)
}

/// Central push: turret/wall pairs, a support spine and two launch points.
pub const PUSH: Blueprint = Blueprint {
    turrets: &[(11, 6), (13, 6), (16, 6), (18, 6)],
    supports: &[
        (11, 5),
        (13, 5),
        (14, 5),
        (15, 5),
        (16, 5),
        (17, 5),
        (18, 5),
        (19, 5),
        (11, 4),
        (10, 3),
        (12, 3),
        (13, 3),
        (14, 3),
        (15, 3),
        (13, 2),
        (14, 2),
    ],
    walls: &[(11, 7), (13, 7), (16, 7), (18, 7)],
};

/// Launch points for the central push.
pub const PUSH_LAUNCHES: [(i32, i32); 2] = [(11, 2), (15, 1)];

/// Short support lane hugging our left edge.
pub const EDGE_LANE: Blueprint = Blueprint {
    turrets: &[(5, 10)],
    supports: &[(6, 10), (5, 9), (7, 8), (6, 7), (7, 7)],
    walls: &[],
};

/// Launch point for the edge attack.
pub const EDGE_LAUNCH: (i32, i32) = (5, 8);

/// Support funnel for the finishing move.
pub const FINISHING_FUNNEL: &[(i32, i32)] = &[
    (7, 7),
    (8, 7),
    (10, 7),
    (11, 7),
    (12, 7),
    (13, 7),
    (14, 7),
    (15, 7),
    (16, 7),
    (7, 6),
    (8, 6),
    (10, 6),
    (11, 6),
    (12, 6),
    (13, 6),
    (14, 6),
    (15, 6),
    (16, 6),
    (17, 6),
    (8, 5),
    (17, 5),
    (18, 5),
    (9, 4),
    (10, 4),
    (11, 4),
    (12, 4),
    (13, 4),
    (14, 4),
    (15, 4),
    (17, 4),
    (18, 4),
    (10, 3),
    (11, 3),
    (12, 3),
    (13, 3),
    (14, 3),
    (15, 3),
    (17, 3),
    (11, 2),
    (12, 2),
    (12, 1),
    (14, 1),
    (15, 1),
];

/// Launch point for the finishing move.
pub const FINISHING_LAUNCH: (i32, i32) = (14, 0);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Arena, Edge};

    fn all_layouts() -> Vec<Vec<Coord>> {
        let mut layouts = vec![
            SPREAD.cells(),
            FORTRESS.cells(),
            LEFT_CORNER_GUARD.cells(),
            RIGHT_CORNER_GUARD.cells(),
            EMERGENCY.cells(),
            PUSH.cells(),
            coords(FINISHING_FUNNEL),
            coords(&PUSH_LAUNCHES),
            coords(&[FINISHING_LAUNCH]),
            EDGE_LANE.cells(),
            coords(&[EDGE_LAUNCH]),
        ];
        for lane in &PROBE_LANES {
            layouts.push(lane.structure.cells());
            layouts.push(coords(&[lane.launch]));
        }
        layouts
    }

    #[test]
    fn test_layouts_stay_on_our_half() {
        let arena = Arena::default();
        for layout in all_layouts() {
            for c in layout {
                assert!(arena.contains(c), "{c} is outside the arena");
                assert!(!arena.is_enemy_half(c), "{c} is on the enemy half");
            }
        }
    }

    #[test]
    fn test_probe_lane_lookup() {
        assert_eq!(probe_lane(16).map(|l| l.launch), Some((22, 8)));
        assert_eq!(probe_lane(14).map(|l| l.launch), Some((21, 7)));
        assert!(probe_lane(17).is_none());
    }

    #[test]
    fn test_lane_launch_is_not_built_over() {
        for lane in &PROBE_LANES {
            let launch = Coord::from(lane.launch);
            assert!(!lane.structure.cells().contains(&launch));
        }
        let edge_launch = Coord::from(EDGE_LAUNCH);
        assert!(!EDGE_LANE.cells().contains(&edge_launch));
        assert!(!SPREAD.cells().contains(&edge_launch));
        assert!(!LEFT_CORNER_GUARD.cells().contains(&edge_launch));
    }

    #[test]
    fn test_edge_launch_is_on_our_left_edge() {
        let arena = Arena::default();
        let edge = arena.edge(Edge::BottomLeft);
        assert!(edge.contains(&Coord::from(EDGE_LAUNCH)));
    }
}
