//! # Algo Core
//!
//! Decision core of a C1 Terminal tower-defense agent.
//!
//! This crate contains **only** planning logic:
//! - No engine IO (the engine sits behind [`engine::EngineAdapter`])
//! - No randomness
//! - No floating-point decisions (thresholds use fixed-point)
//!
//! Given the same board, resources and policy, a turn always plans the same
//! intents, which keeps matches reproducible and tests exact.
//!
//! ## Crate Structure
//!
//! - [`catalog`] - Unit statistics from the match configuration
//! - [`regions`] - Named board regions
//! - [`intel`] - Enemy inventory and density queries
//! - [`breach`] - Breach ledger
//! - [`path_risk`] - Launch point risk scoring
//! - [`strategy`] - Phase state machine and placement blueprints
//! - [`session`] - Per-match callbacks

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod board;
pub mod breach;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod grid;
pub mod intel;
pub mod math;
pub mod path_risk;
pub mod regions;
pub mod session;
pub mod strategy;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::board::{BoardSnapshot, Owner, PlacedUnit};
    pub use crate::breach::BreachLedger;
    pub use crate::catalog::{Cost, MatchConfig, Resource, UnitCatalog, UnitStats, UnitType};
    pub use crate::engine::{BreachEvent, EngineAdapter};
    pub use crate::error::{AlgoError, Result};
    pub use crate::grid::{Arena, Coord, Edge};
    pub use crate::intel::{DensityReport, EnemyInventory, FrontierReport};
    pub use crate::math::Fixed;
    pub use crate::path_risk::{PathRiskEstimator, RiskScore};
    pub use crate::regions::{Region, RegionLibrary, Side};
    pub use crate::session::AlgoSession;
    pub use crate::strategy::{
        OffensePhase, PhaseState, StrategyMachine, StrategyPolicy, TurnReport,
    };
}
