//! Path risk estimation for choosing a launch point.
//!
//! The engine supplies the default path for each candidate. Every step of the
//! path is charged the mobile-unit damage of each opponent stationary unit in
//! range of it. This ignores reinforcements and assumes the path holds for
//! the turn, so scores are only comparable within one turn.

use std::collections::HashSet;

use crate::board::{BoardSnapshot, Owner};
use crate::catalog::UnitCatalog;
use crate::engine::EngineAdapter;
use crate::grid::{Arena, Coord, Edge};
use crate::math::Fixed;

/// Score of one candidate launch point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskScore {
    /// Launch cell.
    pub launch: Coord,
    /// Edge the path heads for.
    pub target: Edge,
    /// Path reported by the engine.
    pub path: Vec<Coord>,
    /// Accumulated damage exposure.
    pub score: Fixed,
}

/// Scores candidate launch points by expected damage along their path.
#[derive(Debug, Clone, Copy)]
pub struct PathRiskEstimator<'a> {
    catalog: &'a UnitCatalog,
    arena: Arena,
}

impl<'a> PathRiskEstimator<'a> {
    /// Create an estimator.
    #[must_use]
    pub const fn new(catalog: &'a UnitCatalog, arena: Arena) -> Self {
        Self { catalog, arena }
    }

    /// Damage exposure of a single path.
    pub fn path_score<E: EngineAdapter + ?Sized>(&self, engine: &E, path: &[Coord]) -> Fixed {
        path.iter()
            .flat_map(|step| engine.attackers_in_range(*step, Owner::Enemy))
            .filter(|attacker| attacker.stationary)
            .map(|attacker| self.catalog.lookup(attacker.unit_type).damage_to_mobile)
            .fold(Fixed::ZERO, Fixed::saturating_add)
    }

    /// Score every candidate, preserving input order.
    pub fn risk<E: EngineAdapter + ?Sized>(
        &self,
        engine: &E,
        candidates: &[Coord],
    ) -> Vec<RiskScore> {
        candidates
            .iter()
            .map(|&launch| {
                let target = Edge::target_for(launch, self.arena.half());
                let path = engine.find_path(launch, target);
                let score = self.path_score(engine, &path);
                tracing::trace!(%launch, ?target, steps = path.len(), score = %score, "Scored launch");
                RiskScore {
                    launch,
                    target,
                    path,
                    score,
                }
            })
            .collect()
    }

    /// The lowest-risk candidate; the earliest one wins ties.
    pub fn safest<E: EngineAdapter + ?Sized>(
        &self,
        engine: &E,
        candidates: &[Coord],
    ) -> Option<RiskScore> {
        self.risk(engine, candidates)
            .into_iter()
            .reduce(|best, next| if next.score < best.score { next } else { best })
    }
}

/// Drop candidates that a stationary unit currently blocks.
#[must_use]
pub fn launch_candidates(board: &BoardSnapshot, candidates: &[Coord]) -> Vec<Coord> {
    candidates
        .iter()
        .copied()
        .filter(|c| !board.is_blocked(*c))
        .collect()
}

/// Cells bordering a path (8-neighbourhood) that are not on it.
///
/// Only cells inside the arena and on our half are returned, in path order.
#[must_use]
pub fn flank_tiles(path: &[Coord], arena: &Arena) -> Vec<Coord> {
    let on_path: HashSet<Coord> = path.iter().copied().collect();
    let mut seen = HashSet::new();
    let mut flanks = Vec::new();
    for step in path {
        for dx in -1..=1 {
            for dy in -1..=1 {
                let c = step.offset(dx, dy);
                if on_path.contains(&c) || !arena.contains(c) || arena.is_enemy_half(c) {
                    continue;
                }
                if seen.insert(c) {
                    flanks.push(c);
                }
            }
        }
    }
    flanks
}
