//! Per-match session wiring the engine callbacks to the planner.

use tracing::{info, info_span};

use crate::breach::BreachLedger;
use crate::catalog::{MatchConfig, UnitCatalog};
use crate::engine::{BreachEvent, EngineAdapter};
use crate::error::Result;
use crate::regions::RegionLibrary;
use crate::strategy::{StrategyMachine, StrategyPolicy, TurnReport};

/// State for one match: unit catalog, breach ledger and strategy machine.
///
/// Built on game start; every later callback mutates it in place.
#[derive(Debug, Clone)]
pub struct AlgoSession {
    catalog: UnitCatalog,
    ledger: BreachLedger,
    machine: StrategyMachine,
}

impl AlgoSession {
    /// Start a match from a parsed configuration.
    ///
    /// # Errors
    ///
    /// Fails when the catalog cannot be built or the policy is invalid.
    pub fn on_game_start(config: &MatchConfig, policy: StrategyPolicy) -> Result<Self> {
        policy.validate()?;
        let catalog = UnitCatalog::from_config(config)?;
        info!(policy = %policy.name, "Configuring strategy");
        Ok(Self {
            catalog,
            ledger: BreachLedger::new(),
            machine: StrategyMachine::new(policy, RegionLibrary::default()),
        })
    }

    /// Start a match from the raw configuration JSON.
    ///
    /// # Errors
    ///
    /// See [`AlgoSession::on_game_start`]; malformed JSON fails too.
    pub fn from_config_json(json: &str, policy: StrategyPolicy) -> Result<Self> {
        Self::on_game_start(&MatchConfig::from_json_str(json)?, policy)
    }

    /// Plan a turn and submit it. The turn is submitted even when planning
    /// faulted part way through.
    pub fn on_turn<E: EngineAdapter + ?Sized>(&mut self, engine: &mut E) -> TurnReport {
        let span = info_span!("turn", turn = engine.turn_number());
        let _guard = span.enter();
        let report = self.machine.plan_turn(engine, &self.catalog, &self.ledger);
        engine.submit_turn();
        report
    }

    /// Record the breaches of one action frame. Returns entries appended.
    pub fn on_action_frame(&mut self, breaches: &[BreachEvent]) -> usize {
        self.ledger.record(breaches)
    }

    /// Unit catalog for this match.
    #[must_use]
    pub const fn catalog(&self) -> &UnitCatalog {
        &self.catalog
    }

    /// Breaches recorded so far.
    #[must_use]
    pub const fn ledger(&self) -> &BreachLedger {
        &self.ledger
    }

    /// The strategy machine.
    #[must_use]
    pub const fn machine(&self) -> &StrategyMachine {
        &self.machine
    }
}
