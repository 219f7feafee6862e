//! Ledger of the cells where the opponent scored on us.

use tracing::info;

use crate::board::Owner;
use crate::engine::BreachEvent;
use crate::grid::Coord;
use crate::regions::Region;

/// Append-only, chronological list of breach locations for the match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreachLedger {
    entries: Vec<Coord>,
}

impl BreachLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the breaches of one action frame.
    ///
    /// Only events scored by the opponent are kept; our own scores are
    /// ignored. Returns the number of entries appended.
    pub fn record(&mut self, events: &[BreachEvent]) -> usize {
        let before = self.entries.len();
        for event in events.iter().filter(|e| e.owner == Owner::Enemy) {
            info!(coord = %event.coord, "Got scored on");
            self.entries.push(event.coord);
        }
        self.entries.len() - before
    }

    /// Number of breaches so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True before the first breach.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Breaches in the order they happened.
    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.entries.iter().copied()
    }

    /// True if any breach landed inside `region`.
    #[must_use]
    pub fn hit_any(&self, region: &Region) -> bool {
        self.entries.iter().any(|c| region.contains(*c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_enemy_breaches_are_recorded() {
        let mut ledger = BreachLedger::new();
        let appended = ledger.record(&[
            BreachEvent {
                coord: Coord::new(0, 13),
                owner: Owner::Enemy,
            },
            BreachEvent {
                coord: Coord::new(14, 27),
                owner: Owner::Me,
            },
            BreachEvent {
                coord: Coord::new(27, 13),
                owner: Owner::Enemy,
            },
        ]);
        assert_eq!(appended, 2);
        assert_eq!(
            ledger.iter().collect::<Vec<_>>(),
            vec![Coord::new(0, 13), Coord::new(27, 13)]
        );
    }

    #[test]
    fn test_repeated_breaches_are_kept() {
        let mut ledger = BreachLedger::new();
        let event = BreachEvent {
            coord: Coord::new(3, 10),
            owner: Owner::Enemy,
        };
        ledger.record(&[event]);
        ledger.record(&[event, event]);
        assert_eq!(ledger.len(), 3);
        let zone = Region::new("zone", [Coord::new(3, 10)]);
        assert!(ledger.hit_any(&zone));
        assert!(!ledger.hit_any(&Region::new("other", [Coord::new(4, 9)])));
    }
}
