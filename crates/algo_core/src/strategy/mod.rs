//! The strategy state machine.
//!
//! One call to [`StrategyMachine::plan_turn`] per turn. Passes run in
//! priority order so that an engine which truncates a late turn loses the
//! least important intents first:
//!
//! 1. Scan the opponent half and refresh the channel flags.
//! 2. Defense: fixed scaffold, plus corner guards for breached corners or
//!    when cores are plentiful.
//! 3. Phase transitions: arm the finishing move or trip escalation.
//! 4. Reactive: a turret one row behind every recorded breach.
//! 5. Repair: remove worn scaffold units so they get rebuilt.
//! 6. Offense: exactly one of [`OffensePhase`], plus the left edge attack
//!    when the policy has one and the main routine leaves room for it.
//! 7. Luxury: upgrade scaffold turrets.

pub mod blueprints;
mod deploy;
mod policy;
mod state;

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::board::Owner;
use crate::breach::BreachLedger;
use crate::catalog::{Resource, UnitCatalog, UnitType};
use crate::engine::EngineAdapter;
use crate::error::{AlgoError, Result};
use crate::grid::{coords, Coord, Edge};
use crate::intel::EnemyInventory;
use crate::math::Fixed;
use crate::path_risk::{flank_tiles, launch_candidates, PathRiskEstimator};
use crate::regions::{RegionLibrary, Side};

use blueprints::{Blueprint, LaneBlueprint};

pub use deploy::{Deployer, Intent, IntentRecord, PlacementOutcome, TurnReport};
pub use policy::{
    DefenseLayout, EdgePolicy, EscalationPolicy, FinishingPolicy, ProbePolicy, PushPolicy,
    StallPolicy, StrategyPolicy,
};
pub use state::{EscalationPlan, OffensePhase, PhaseState};

/// Side of the opponent's board a target edge lies on.
const fn edge_side(edge: Edge) -> Side {
    match edge {
        Edge::TopLeft | Edge::BottomLeft => Side::Left,
        Edge::TopRight | Edge::BottomRight => Side::Right,
    }
}

/// Place a blueprint group by group: turrets, supports, walls.
fn build<E: EngineAdapter + ?Sized>(deployer: &mut Deployer<'_, E>, blueprint: &Blueprint) -> u32 {
    deployer.place(UnitType::Turret, &coords(blueprint.turrets), 1)
        + deployer.place(UnitType::Support, &coords(blueprint.supports), 1)
        + deployer.place(UnitType::Wall, &coords(blueprint.walls), 1)
}

/// Per-match planner. Owns the phase flags and this turn's enemy inventory.
#[derive(Debug, Clone)]
pub struct StrategyMachine {
    policy: StrategyPolicy,
    regions: RegionLibrary,
    state: PhaseState,
    inventory: EnemyInventory,
}

impl StrategyMachine {
    /// Create a machine with fresh phase state.
    #[must_use]
    pub fn new(policy: StrategyPolicy, regions: RegionLibrary) -> Self {
        Self {
            policy,
            regions,
            state: PhaseState::default(),
            inventory: EnemyInventory::default(),
        }
    }

    /// Active policy.
    #[must_use]
    pub const fn policy(&self) -> &StrategyPolicy {
        &self.policy
    }

    /// Region library.
    #[must_use]
    pub const fn regions(&self) -> &RegionLibrary {
        &self.regions
    }

    /// Phase flags.
    #[must_use]
    pub const fn state(&self) -> &PhaseState {
        &self.state
    }

    /// Inventory from the latest scan.
    #[must_use]
    pub const fn inventory(&self) -> &EnemyInventory {
        &self.inventory
    }

    /// Plan and issue one turn's intents.
    ///
    /// Never fails: a fault stops the remaining passes, is logged and recorded
    /// in [`TurnReport::fault`], and whatever was already issued stands.
    pub fn plan_turn<E: EngineAdapter + ?Sized>(
        &mut self,
        engine: &mut E,
        catalog: &UnitCatalog,
        ledger: &BreachLedger,
    ) -> TurnReport {
        let turn = engine.turn_number();
        self.inventory = EnemyInventory::scan(engine.snapshot(), self.regions.arena());
        self.detect_channels();

        let mut deployer = Deployer::new(engine);
        let mut phase = OffensePhase::Hold;
        let result = self.run_passes(&mut deployer, catalog, ledger, &mut phase);

        self.state.last_phase = Some(phase);

        let fault = result.err().map(|e| {
            warn!(turn, ?phase, "Planning cut short: {e}");
            e.to_string()
        });
        let report = TurnReport {
            turn,
            phase,
            intents: deployer.into_records(),
            fault,
        };
        debug!(
            turn,
            ?phase,
            placed = report.placed(),
            rejected = report.rejected(),
            "Turn planned"
        );
        report
    }

    fn run_passes<E: EngineAdapter + ?Sized>(
        &mut self,
        deployer: &mut Deployer<'_, E>,
        catalog: &UnitCatalog,
        ledger: &BreachLedger,
        phase: &mut OffensePhase,
    ) -> Result<()> {
        self.defense_pass(deployer, ledger);
        self.check_transitions(deployer.engine());
        self.reactive_pass(deployer, ledger);
        self.repair_pass(deployer, catalog);

        let turn = deployer.engine().turn_number();
        let (selected, lane) = self.select_phase(turn);
        *phase = selected;
        self.run_offense(selected, lane, deployer, catalog)?;
        if let Some(edge) = &self.policy.edge {
            if matches!(
                selected,
                OffensePhase::Probe | OffensePhase::Push | OffensePhase::Hold
            ) {
                self.edge_attack(deployer, edge, turn);
            }
        }

        self.luxury_pass(deployer);
        Ok(())
    }

    fn detect_channels(&mut self) {
        for side in Side::BOTH {
            let Some(lane) = self.regions.edge_lane(side, self.policy.channel_depth) else {
                continue;
            };
            let report = self.inventory.density(lane, None);
            let controlled = report.is_saturated(self.policy.saturation_ratio);
            if controlled != self.state.has_channel(side) {
                info!(?side, controlled, ratio = %report.ratio(), "Enemy channel changed");
            }
            match side {
                Side::Left => self.state.channel_left = controlled,
                Side::Right => self.state.channel_right = controlled,
            }
        }
    }

    fn scaffold(&self) -> &'static Blueprint {
        match self.policy.defense_layout {
            DefenseLayout::Spread => &blueprints::SPREAD,
            DefenseLayout::Fortress => &blueprints::FORTRESS,
        }
    }

    fn defense_pass<E: EngineAdapter + ?Sized>(
        &self,
        deployer: &mut Deployer<'_, E>,
        ledger: &BreachLedger,
    ) {
        build(deployer, self.scaffold());

        let luxury = deployer.engine().resource_level(Resource::Cores) >= self.policy.luxury_cores;
        for side in Side::BOTH {
            let breached = ledger.hit_any(self.regions.breach_zone(side));
            if !breached && !luxury {
                continue;
            }
            debug!(?side, breached, luxury, "Guarding corner");
            let guard = match side {
                Side::Left => &blueprints::LEFT_CORNER_GUARD,
                Side::Right => &blueprints::RIGHT_CORNER_GUARD,
            };
            deployer.place_each(UnitType::Turret, &coords(guard.turrets));
            deployer.place_each(UnitType::Wall, &coords(guard.walls));
            deployer.place_each(UnitType::Support, &coords(guard.supports));
        }
    }

    /// Runs right after the defense pass. `cores_last_turn` holds the same
    /// post-defense figure from the previous turn.
    fn check_transitions<E: EngineAdapter + ?Sized>(&mut self, engine: &E) {
        let cores = engine.resource_level(Resource::Cores);
        let last = self.state.cores_last_turn.replace(cores);
        if self.state.finishing_active || self.state.escalation_active {
            return;
        }
        let bits = engine.resource_level(Resource::Bits);
        let turn = engine.turn_number();

        if let Some(finishing) = &self.policy.finishing {
            if turn >= self.policy.stall.turns
                && cores >= finishing.cores_required
                && bits >= finishing.bits_required
            {
                info!(%cores, %bits, "Finishing move armed");
                self.state.activate_finishing();
                return;
            }
        }

        if let Some(escalation) = &self.policy.escalation {
            let drained =
                last.is_some_and(|last| cores < last.saturating_sub(escalation.cores_margin));
            let starved = turn > escalation.floor_after_turn && cores < escalation.cores_floor;
            let wounded = engine.my_health() < escalation.health_floor;
            if drained || starved || wounded {
                info!(
                    %cores,
                    last = ?last.map(|c| c.to_string()),
                    drained,
                    starved,
                    wounded,
                    "Escalation tripped"
                );
                self.state.activate_escalation();
            }
        }
    }

    fn reactive_pass<E: EngineAdapter + ?Sized>(
        &self,
        deployer: &mut Deployer<'_, E>,
        ledger: &BreachLedger,
    ) {
        let mut targets = HashSet::new();
        for breach in ledger.iter() {
            // One row behind keeps our own spawn cell free.
            let target = breach.behind();
            if targets.insert(target) {
                deployer.place(UnitType::Turret, &[target], 1);
            }
        }
    }

    fn repair_pass<E: EngineAdapter + ?Sized>(
        &self,
        deployer: &mut Deployer<'_, E>,
        catalog: &UnitCatalog,
    ) {
        let ratio = self.policy.repair_health_ratio;
        if ratio <= Fixed::ZERO {
            return;
        }
        let snapshot = deployer.engine().snapshot();
        let worn: Vec<Coord> = self
            .scaffold()
            .cells()
            .into_iter()
            .filter(|c| {
                snapshot.stationary_at(*c).is_some_and(|u| {
                    u.owner == Owner::Me
                        && u.health < ratio.saturating_mul(catalog.lookup(u.unit_type).health)
                })
            })
            .collect();
        if !worn.is_empty() {
            debug!(count = worn.len(), "Removing worn scaffold");
            deployer.remove(&worn);
        }
    }

    fn select_phase(&self, turn: u32) -> (OffensePhase, Option<&'static LaneBlueprint>) {
        if turn < self.policy.stall.turns {
            return (OffensePhase::Stall, None);
        }
        if self.state.finishing_active {
            return (OffensePhase::Finish, None);
        }
        if self.state.escalation_active {
            return (OffensePhase::Escalate, None);
        }
        if let Some(lane) = self.policy.probe.as_ref().and_then(|p| self.probe_lane(p)) {
            return (OffensePhase::Probe, Some(lane));
        }
        let phase = if self.policy.push.is_some() && !self.state.probe_committed {
            OffensePhase::Push
        } else if self.policy.probe.is_some() || self.policy.push.is_some() {
            OffensePhase::Hold
        } else {
            // Purely defensive policies keep screening with stall units.
            OffensePhase::Stall
        };
        (phase, None)
    }

    fn probe_lane(&self, probe: &ProbePolicy) -> Option<&'static LaneBlueprint> {
        let report = self
            .inventory
            .frontier_dominant_row(&self.regions, probe.target);
        if report.total_units < probe.min_frontier_units {
            return None;
        }
        if report.dominant_row > probe.deep_row
            && report.total_units < probe.deep_min_frontier_units
        {
            return None;
        }
        blueprints::probe_lane(report.dominant_row)
    }

    fn run_offense<E: EngineAdapter + ?Sized>(
        &mut self,
        phase: OffensePhase,
        lane: Option<&'static LaneBlueprint>,
        deployer: &mut Deployer<'_, E>,
        catalog: &UnitCatalog,
    ) -> Result<()> {
        let turn = deployer.engine().turn_number();
        match phase {
            OffensePhase::Stall => self.stall(deployer),
            OffensePhase::Probe => {
                let (Some(lane), Some(probe)) = (lane, self.policy.probe.as_ref()) else {
                    return Err(AlgoError::InvalidState(
                        "probe selected without a lane".to_string(),
                    ));
                };
                self.probe(deployer, lane, probe, turn);
                self.state.probe_committed = true;
            }
            OffensePhase::Push => {
                if let Some(push) = &self.policy.push {
                    self.push(deployer, push, catalog, turn);
                }
            }
            OffensePhase::Escalate => {
                if self.state.escalation_plan.is_none() {
                    let plan = self.plan_escalation(deployer.engine(), catalog)?;
                    self.state.escalation_plan = Some(plan);
                }
                if self.state.toggle_charge() {
                    self.escalate(deployer);
                } else {
                    debug!("Escalation recharging");
                }
            }
            OffensePhase::Finish => {
                if self.state.toggle_charge() {
                    self.finish(deployer);
                } else {
                    debug!("Finishing move recharging");
                }
            }
            OffensePhase::Hold => {}
        }
        Ok(())
    }

    fn stall<E: EngineAdapter + ?Sized>(&self, deployer: &mut Deployer<'_, E>) {
        let stall = &self.policy.stall;
        let turn = deployer.engine().turn_number();
        let health = deployer.engine().my_health();

        if turn < stall.turns || health < stall.low_health {
            deployer.place_each(stall.unit, &stall.posts);
        }

        if health < stall.emergency_health {
            warn!(%health, "One last line of defence");
            build(deployer, &blueprints::EMERGENCY);
            let engine = deployer.engine();
            let mut edges = engine.edge_locations(Edge::BottomLeft);
            edges.extend(engine.edge_locations(Edge::BottomRight));
            let free = launch_candidates(engine.snapshot(), &edges);
            if let Some(&cell) = free.first() {
                deployer.place(stall.unit, &[cell], 1);
            }
        }
    }

    fn probe<E: EngineAdapter + ?Sized>(
        &self,
        deployer: &mut Deployer<'_, E>,
        lane: &LaneBlueprint,
        probe: &ProbePolicy,
        turn: u32,
    ) {
        deployer.place_each(UnitType::Turret, &coords(lane.structure.turrets));
        deployer.place_each(UnitType::Support, &coords(lane.structure.supports));
        deployer.place_each(UnitType::Wall, &coords(lane.structure.walls));

        let launch = Coord::from(lane.launch);
        if turn > probe.cadence_after {
            if turn % probe.rest_every == 0 {
                debug!(turn, "Probe resting");
                return;
            }
            if turn % probe.wave_every == probe.wave_offset {
                deployer.place(UnitType::Scout, &[launch], probe.wave_size);
            }
        }
        info!(row = lane.row, %launch, "Probing frontier row");
        deployer.place(probe.attacker, &[launch], probe.volley);
    }

    /// Free launch cells, preferring those that avoid an enemy channel.
    fn open_launches<E: EngineAdapter + ?Sized>(&self, engine: &E, candidates: &[Coord]) -> Vec<Coord> {
        let free = launch_candidates(engine.snapshot(), candidates);
        let half = self.regions.arena().half();
        let clear: Vec<Coord> = free
            .iter()
            .copied()
            .filter(|c| !self.state.has_channel(edge_side(Edge::target_for(*c, half))))
            .collect();
        if clear.is_empty() {
            free
        } else {
            clear
        }
    }

    fn push<E: EngineAdapter + ?Sized>(
        &self,
        deployer: &mut Deployer<'_, E>,
        push: &PushPolicy,
        catalog: &UnitCatalog,
        turn: u32,
    ) {
        let plan = &blueprints::PUSH;
        if deployer.engine().resource_level(Resource::Cores) >= push.fortify_cores {
            for (wall, turret) in plan.walls.iter().zip(plan.turrets) {
                deployer.place(UnitType::Wall, &[Coord::from(*wall)], 1);
                deployer.place(UnitType::Turret, &[Coord::from(*turret)], 1);
            }
        }
        deployer.place_each(UnitType::Support, &coords(plan.supports));

        if turn > push.cadence_after && turn % push.fire_every != 0 {
            return;
        }
        let candidates = self.open_launches(deployer.engine(), &coords(&blueprints::PUSH_LAUNCHES));
        let estimator = PathRiskEstimator::new(catalog, *self.regions.arena());
        if let Some(best) = estimator.safest(deployer.engine(), &candidates) {
            info!(launch = %best.launch, score = %best.score, "Central push");
            deployer.place(UnitType::Scout, &[best.launch], push.volley);
        }
    }

    fn plan_escalation<E: EngineAdapter + ?Sized>(
        &self,
        engine: &E,
        catalog: &UnitCatalog,
    ) -> Result<EscalationPlan> {
        let mut edges = engine.edge_locations(Edge::BottomLeft);
        edges.extend(engine.edge_locations(Edge::BottomRight));
        let candidates = self.open_launches(engine, &edges);

        let estimator = PathRiskEstimator::new(catalog, *self.regions.arena());
        let best = estimator.safest(engine, &candidates).ok_or_else(|| {
            AlgoError::InvalidState("no free launch cell for escalation".to_string())
        })?;
        let flank = flank_tiles(&best.path, self.regions.arena());
        info!(
            launch = %best.launch,
            score = %best.score,
            flank = flank.len(),
            "Escalation lane chosen"
        );
        Ok(EscalationPlan {
            launch: best.launch,
            flank,
        })
    }

    fn escalate<E: EngineAdapter + ?Sized>(&self, deployer: &mut Deployer<'_, E>) {
        let (Some(plan), Some(escalation)) =
            (&self.state.escalation_plan, &self.policy.escalation)
        else {
            return;
        };
        deployer.place(UnitType::Support, &plan.flank, 1);
        deployer.place(UnitType::Scout, &[plan.launch], escalation.volley);
    }

    fn finish<E: EngineAdapter + ?Sized>(&self, deployer: &mut Deployer<'_, E>) {
        let Some(finishing) = &self.policy.finishing else {
            return;
        };
        info!("Firing finishing move");
        deployer.place(UnitType::Support, &coords(blueprints::FINISHING_FUNNEL), 1);
        deployer.place(
            UnitType::Scout,
            &[Coord::from(blueprints::FINISHING_LAUNCH)],
            finishing.volley,
        );
    }

    fn edge_attack<E: EngineAdapter + ?Sized>(
        &self,
        deployer: &mut Deployer<'_, E>,
        edge: &EdgePolicy,
        turn: u32,
    ) {
        deployer.place_each(UnitType::Turret, &coords(blueprints::EDGE_LANE.turrets));
        deployer.place_each(UnitType::Support, &coords(blueprints::EDGE_LANE.supports));

        let Some(count) = edge.volley_for(turn) else {
            debug!(turn, "Edge attack resting");
            return;
        };
        let launch = Coord::from(blueprints::EDGE_LAUNCH);
        debug!(%launch, count, "Edge attack");
        deployer.place(UnitType::Scout, &[launch], count);
    }

    fn luxury_pass<E: EngineAdapter + ?Sized>(&self, deployer: &mut Deployer<'_, E>) {
        if deployer.engine().resource_level(Resource::Cores) >= self.policy.luxury_cores {
            deployer.upgrade(&coords(self.scaffold().turrets));
        }
    }
}
