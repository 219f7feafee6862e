//! Intents sent to the engine and what became of them.

use tracing::debug;

use crate::catalog::UnitType;
use crate::engine::EngineAdapter;
use crate::grid::Coord;

use super::state::OffensePhase;

/// A single request issued to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Place `count` units at each cell.
    Place {
        /// Unit type.
        unit_type: UnitType,
        /// Target cells.
        coords: Vec<Coord>,
        /// Units per cell.
        count: u32,
    },
    /// Remove our structures at these cells.
    Remove {
        /// Target cells.
        coords: Vec<Coord>,
    },
    /// Upgrade our structures at these cells.
    Upgrade {
        /// Target cells.
        coords: Vec<Coord>,
    },
}

/// Engine response to an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlacementOutcome {
    /// Units placed (always non-zero).
    Placed(u32),
    /// Removal or upgrade accepted.
    Accepted,
    /// Nothing happened: unaffordable, blocked or illegal.
    Rejected,
}

/// An intent with its outcome, in issue order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IntentRecord {
    /// What was asked.
    pub intent: Intent,
    /// What the engine did.
    pub outcome: PlacementOutcome,
}

/// Summary of one planning pass.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TurnReport {
    /// Turn number.
    pub turn: u32,
    /// Offense routine that ran.
    pub phase: OffensePhase,
    /// Intents in the order they were issued.
    pub intents: Vec<IntentRecord>,
    /// Fault that cut planning short, if any.
    pub fault: Option<String>,
}

impl TurnReport {
    /// Units placed this turn.
    #[must_use]
    pub fn placed(&self) -> u32 {
        self.intents
            .iter()
            .map(|r| match r.outcome {
                PlacementOutcome::Placed(n) => n,
                _ => 0,
            })
            .sum()
    }

    /// Intents the engine turned down.
    #[must_use]
    pub fn rejected(&self) -> usize {
        self.intents
            .iter()
            .filter(|r| r.outcome == PlacementOutcome::Rejected)
            .count()
    }

    /// Units of `unit_type` placed this turn.
    #[must_use]
    pub fn placed_of(&self, unit_type: UnitType) -> u32 {
        self.intents
            .iter()
            .map(|r| match (&r.intent, r.outcome) {
                (Intent::Place { unit_type: t, .. }, PlacementOutcome::Placed(n))
                    if *t == unit_type =>
                {
                    n
                }
                _ => 0,
            })
            .sum()
    }
}

/// Issues intents against the engine and keeps the log.
pub struct Deployer<'e, E: EngineAdapter + ?Sized> {
    engine: &'e mut E,
    records: Vec<IntentRecord>,
}

impl<'e, E: EngineAdapter + ?Sized> Deployer<'e, E> {
    /// Wrap an engine for one turn.
    pub fn new(engine: &'e mut E) -> Self {
        Self {
            engine,
            records: Vec::new(),
        }
    }

    /// Read access to the engine.
    pub fn engine(&self) -> &E {
        &*self.engine
    }

    /// Place `count` units of a type at each cell. Returns units placed.
    pub fn place(&mut self, unit_type: UnitType, coords: &[Coord], count: u32) -> u32 {
        if coords.is_empty() || count == 0 {
            return 0;
        }
        let placed = self.engine.attempt_place(unit_type, coords, count);
        let outcome = if placed == 0 {
            debug!(?unit_type, cells = coords.len(), count, "Placement rejected");
            PlacementOutcome::Rejected
        } else {
            PlacementOutcome::Placed(placed)
        };
        self.records.push(IntentRecord {
            intent: Intent::Place {
                unit_type,
                coords: coords.to_vec(),
                count,
            },
            outcome,
        });
        placed
    }

    /// Place one unit at each cell, one intent per cell.
    pub fn place_each(&mut self, unit_type: UnitType, coords: &[Coord]) -> u32 {
        coords
            .iter()
            .map(|c| self.place(unit_type, std::slice::from_ref(c), 1))
            .sum()
    }

    /// Remove our structures at `coords`.
    pub fn remove(&mut self, coords: &[Coord]) -> bool {
        if coords.is_empty() {
            return false;
        }
        let ok = self.engine.attempt_remove(coords);
        self.log(
            Intent::Remove {
                coords: coords.to_vec(),
            },
            ok,
        );
        ok
    }

    /// Upgrade our structures at `coords`.
    pub fn upgrade(&mut self, coords: &[Coord]) -> bool {
        if coords.is_empty() {
            return false;
        }
        let ok = self.engine.attempt_upgrade(coords);
        self.log(
            Intent::Upgrade {
                coords: coords.to_vec(),
            },
            ok,
        );
        ok
    }

    fn log(&mut self, intent: Intent, ok: bool) {
        let outcome = if ok {
            PlacementOutcome::Accepted
        } else {
            debug!(?intent, "Request rejected");
            PlacementOutcome::Rejected
        };
        self.records.push(IntentRecord { intent, outcome });
    }

    /// Finish the turn's log.
    #[must_use]
    pub fn into_records(self) -> Vec<IntentRecord> {
        self.records
    }
}
