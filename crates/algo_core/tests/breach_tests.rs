//! Breach ledger growth over whole matches of action frames.

use algo_core::board::Owner;
use algo_core::breach::BreachLedger;
use algo_core::engine::BreachEvent;
use algo_core::grid::Coord;
use algo_core::session::AlgoSession;
use algo_core::strategy::StrategyPolicy;
use algo_test_utils::determinism::strategies::arb_breach_frame;
use algo_test_utils::fixtures::standard_config;
use algo_test_utils::proptest::prelude::*;

proptest! {
    /// Every frame appends exactly its opponent scores, in order.
    #[test]
    fn ledger_never_shrinks(frames in prop::collection::vec(arb_breach_frame(6), 0..12)) {
        let mut ledger = BreachLedger::new();
        let mut previous = 0;
        for frame in &frames {
            let appended = ledger.record(frame);
            let scored_on = frame.iter().filter(|e| e.owner == Owner::Enemy).count();
            prop_assert_eq!(appended, scored_on);
            prop_assert!(ledger.len() >= previous);
            prop_assert_eq!(ledger.len(), previous + appended);
            previous = ledger.len();
        }

        let expected: Vec<Coord> = frames
            .iter()
            .flatten()
            .filter(|e| e.owner == Owner::Enemy)
            .map(|e| e.coord)
            .collect();
        prop_assert_eq!(ledger.iter().collect::<Vec<_>>(), expected);
    }

    /// The session ledger grows the same way across action frames.
    #[test]
    fn session_ledger_never_shrinks(frames in prop::collection::vec(arb_breach_frame(4), 1..8)) {
        let mut session =
            AlgoSession::on_game_start(&standard_config(), StrategyPolicy::balanced()).unwrap();
        let mut previous = session.ledger().len();
        for frame in &frames {
            session.on_action_frame(frame);
            prop_assert!(session.ledger().len() >= previous);
            previous = session.ledger().len();
        }
    }
}

#[test]
fn our_own_scores_never_enter_the_ledger() {
    let mut ledger = BreachLedger::new();
    let ours = BreachEvent {
        coord: Coord::new(13, 27),
        owner: Owner::Me,
    };
    assert_eq!(ledger.record(&[ours, ours]), 0);
    assert!(ledger.is_empty());
}
