//! Determinism testing utilities.
//!
//! The planner must issue identical intents for identical inputs. Sources of
//! drift it guards against:
//!
//! - **Floating-point thresholds**: decisions compare [`algo_core::math::Fixed`]
//!   values only.
//! - **HashMap iteration order**: the inventory and region cells are kept in
//!   ordered containers; anything hashed is only used for membership.
//! - **Randomness**: none. Choices between equals go to the first candidate.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Result of a determinism test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminismResult {
    /// Whether all runs produced identical results.
    pub is_deterministic: bool,
    /// Hashes from each run.
    pub hashes: Vec<u64>,
    /// Turns planned per run.
    pub turns: u32,
}

impl DeterminismResult {
    /// Assert that every run matched, with a detailed error message.
    ///
    /// # Panics
    ///
    /// Panics if the runs produced different hashes.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic {
            let mut unique = self.hashes.clone();
            unique.sort_unstable();
            unique.dedup();
            panic!(
                "Planning is non-deterministic!\n\
                 Runs: {}\n\
                 Turns: {}\n\
                 Unique hashes: {} (expected 1)",
                self.hashes.len(),
                self.turns,
                unique.len(),
            );
        }
    }
}

/// Run a scenario several times and compare the hash of what each run did.
///
/// `step` plans one turn and returns something hashable describing it; the
/// hashes of all turns are folded into one per run.
pub fn verify_determinism<S, Setup, Step, Out>(
    runs: usize,
    turns: u32,
    setup: Setup,
    step: Step,
) -> DeterminismResult
where
    Setup: Fn() -> S,
    Step: Fn(&mut S) -> Out,
    Out: Hash,
{
    let hashes: Vec<u64> = (0..runs)
        .map(|_| {
            let mut state = setup();
            let mut hasher = DefaultHasher::new();
            for _ in 0..turns {
                step(&mut state).hash(&mut hasher);
            }
            hasher.finish()
        })
        .collect();

    DeterminismResult {
        is_deterministic: hashes.windows(2).all(|w| w[0] == w[1]),
        hashes,
        turns,
    }
}

/// Compute a simple hash for any hashable value.
pub fn compute_hash<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Proptest strategies for board inputs.
pub mod strategies {
    use algo_core::board::Owner;
    use algo_core::catalog::UnitType;
    use algo_core::engine::BreachEvent;
    use algo_core::grid::{Arena, Coord};
    use proptest::prelude::*;

    /// Any cell inside the standard arena.
    pub fn arb_arena_coord() -> impl Strategy<Value = Coord> {
        let arena = Arena::default();
        (0..=arena.max_column(), 0..=arena.max_column())
            .prop_map(|(x, y)| Coord::new(x, y))
            .prop_filter("inside the arena", move |c| arena.contains(*c))
    }

    /// Any cell on the opponent's half.
    pub fn arb_enemy_coord() -> impl Strategy<Value = Coord> {
        let arena = Arena::default();
        arb_arena_coord().prop_filter("opponent half", move |c| arena.is_enemy_half(*c))
    }

    /// A stationary unit type.
    pub fn arb_structure() -> impl Strategy<Value = UnitType> {
        prop_oneof![
            Just(UnitType::Wall),
            Just(UnitType::Support),
            Just(UnitType::Turret),
        ]
    }

    /// Opponent structures on distinct cells.
    pub fn arb_enemy_structures(max: usize) -> impl Strategy<Value = Vec<(UnitType, Coord)>> {
        prop::collection::btree_map(arb_enemy_coord(), arb_structure(), 0..=max)
            .prop_map(|cells| cells.into_iter().map(|(c, t)| (t, c)).collect())
    }

    /// One action frame of breaches, scored by either player.
    pub fn arb_breach_frame(max: usize) -> impl Strategy<Value = Vec<BreachEvent>> {
        let owner = prop_oneof![Just(Owner::Me), Just(Owner::Enemy)];
        prop::collection::vec(
            (arb_arena_coord(), owner).prop_map(|(coord, owner)| BreachEvent { coord, owner }),
            0..=max,
        )
    }
}
