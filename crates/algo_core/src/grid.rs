//! Board coordinates and the fixed diamond arena.
//!
//! The arena is a square of `2 * half` columns and rows clipped to a diamond.
//! Rows `0..half` belong to us, rows `half..2 * half` to the opponent. The
//! four diagonal borders are the edges units spawn from and score on.

use serde::{Deserialize, Serialize};

/// Half-size of the standard arena (28 x 28).
pub const ARENA_HALF: i32 = 14;

/// A cell on the board, `(column, row)`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Coord {
    /// Column, growing to the right.
    pub x: i32,
    /// Row, growing towards the opponent.
    pub y: i32,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell one row further from our edge.
    #[must_use]
    pub const fn behind(self) -> Self {
        Self::new(self.x, self.y + 1)
    }

    /// Offset by `(dx, dy)`.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Squared euclidean distance.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> i64 {
        let dx = i64::from(self.x - other.x);
        let dy = i64::from(self.y - other.y);
        dx * dx + dy * dy
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

/// Convert a static blueprint into coordinates.
#[must_use]
pub fn coords(points: &[(i32, i32)]) -> Vec<Coord> {
    points.iter().copied().map(Coord::from).collect()
}

/// One of the four diagonal borders of the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    /// Opponent border on the right; our left-side units score here.
    TopRight,
    /// Opponent border on the left; our right-side units score here.
    TopLeft,
    /// Our border on the left.
    BottomLeft,
    /// Our border on the right.
    BottomRight,
}

impl Edge {
    /// The edge a unit launched from `from` walks towards by default.
    ///
    /// Units spawned on the left half head for the top-right edge and vice
    /// versa.
    #[must_use]
    pub const fn target_for(from: Coord, half: i32) -> Self {
        if from.x < half {
            Self::TopRight
        } else {
            Self::TopLeft
        }
    }
}

/// Geometry of the arena used to validate and mirror coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arena {
    half: i32,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(ARENA_HALF)
    }
}

impl Arena {
    /// Create an arena with the given half-size.
    #[must_use]
    pub const fn new(half: i32) -> Self {
        Self { half }
    }

    /// Half-size: rows below this belong to us.
    #[must_use]
    pub const fn half(&self) -> i32 {
        self.half
    }

    /// Largest valid column (and row).
    #[must_use]
    pub const fn max_column(&self) -> i32 {
        2 * self.half - 1
    }

    /// Reflect a coordinate across the vertical centre line.
    #[must_use]
    pub const fn mirror(&self, c: Coord) -> Coord {
        Coord::new(self.max_column() - c.x, c.y)
    }

    /// True for cells on the opponent's half.
    #[must_use]
    pub const fn is_enemy_half(&self, c: Coord) -> bool {
        c.y >= self.half
    }

    /// True when `c` lies inside the diamond.
    #[must_use]
    pub const fn contains(&self, c: Coord) -> bool {
        let h = self.half;
        if c.x < 0 || c.y < 0 || c.x > self.max_column() || c.y > self.max_column() {
            return false;
        }
        if c.y < h {
            // Bottom half widens by one column on each side per row.
            c.x >= h - 1 - c.y && c.x <= h + c.y
        } else {
            let from_top = self.max_column() - c.y;
            c.x >= h - 1 - from_top && c.x <= h + from_top
        }
    }

    /// Every cell of the opponent's half, row-major from the neutral line.
    #[must_use]
    pub fn enemy_half(&self) -> Vec<Coord> {
        (self.half..=self.max_column())
            .flat_map(|y| (0..=self.max_column()).map(move |x| Coord::new(x, y)))
            .filter(|c| self.contains(*c))
            .collect()
    }

    /// Cells of one arena edge, ordered from the outer corner inwards.
    #[must_use]
    pub fn edge(&self, edge: Edge) -> Vec<Coord> {
        let h = self.half;
        let m = self.max_column();
        (0..h)
            .map(|i| match edge {
                Edge::BottomLeft => Coord::new(i, h - 1 - i),
                Edge::BottomRight => Coord::new(m - i, h - 1 - i),
                Edge::TopLeft => Coord::new(i, h + i),
                Edge::TopRight => Coord::new(m - i, h + i),
            })
            .collect()
    }
}
