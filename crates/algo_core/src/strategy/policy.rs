//! Tunable strategy policies.
//!
//! Every threshold the state machine consults lives here. Named presets cover
//! the play styles the machine supports; custom policies can be loaded from
//! RON files.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::UnitType;
use crate::error::{AlgoError, Result};
use crate::grid::{Coord, ARENA_HALF};
use crate::math::{decimal_serde, from_decimal, Fixed};

/// Which fixed scaffold the defense pass builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefenseLayout {
    /// Flanks plus a forward turret, with supports.
    Spread,
    /// Heavy turret clusters on both rear corners.
    Fortress,
}

/// A complete strategy configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyPolicy {
    /// Preset name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Scaffold built every turn.
    pub defense_layout: DefenseLayout,
    /// Fraction of an edge lane the opponent must fill to count as a channel.
    #[serde(with = "decimal_serde")]
    pub saturation_ratio: Fixed,
    /// Edge lane depth inspected for channels.
    pub channel_depth: usize,
    /// Cores at which corner guards are built without a breach, and scaffold
    /// turrets get upgraded.
    #[serde(with = "decimal_serde")]
    pub luxury_cores: Fixed,
    /// Own scaffold units below this fraction of max health are removed for
    /// rebuilding. Zero disables repairs.
    #[serde(with = "decimal_serde")]
    pub repair_health_ratio: Fixed,
    /// Stalling behaviour.
    pub stall: StallPolicy,
    /// Frontier probe; `None` disables it.
    pub probe: Option<ProbePolicy>,
    /// Central push used when no probe is running; `None` disables it.
    pub push: Option<PushPolicy>,
    /// Left edge attack run next to the probe or push; `None` disables it.
    #[serde(default)]
    pub edge: Option<EdgePolicy>,
    /// Finishing move; `None` disables it.
    pub finishing: Option<FinishingPolicy>,
    /// Escalation trip-wire; `None` disables it.
    pub escalation: Option<EscalationPolicy>,
}

/// What to do while holding back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StallPolicy {
    /// No attacks before this turn.
    pub turns: u32,
    /// Mobile unit sent out while stalling.
    pub unit: UnitType,
    /// Edge cells the stalling units are launched from.
    pub posts: Vec<Coord>,
    /// Outside the opening window, stall units only go out below this health.
    #[serde(with = "decimal_serde")]
    pub low_health: Fixed,
    /// Below this health the emergency centre block is built.
    #[serde(with = "decimal_serde")]
    pub emergency_health: Fixed,
}

/// Frontier probe thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbePolicy {
    /// Defensive unit type whose frontier rows are examined.
    pub target: UnitType,
    /// Minimum stationary units in the frontier before probing.
    pub min_frontier_units: usize,
    /// Dominant rows beyond this need `deep_min_frontier_units`.
    pub deep_row: i32,
    /// Minimum frontier units when the dominant row is deep.
    pub deep_min_frontier_units: usize,
    /// Attackers launched per probe.
    pub attacker: UnitType,
    /// Attackers per probe volley.
    pub volley: u32,
    /// Cadence rules apply after this turn.
    pub cadence_after: u32,
    /// Skip the volley on turns divisible by this.
    pub rest_every: u32,
    /// Send a scout wave when `turn % wave_every == wave_offset`.
    pub wave_every: u32,
    /// See `wave_every`.
    pub wave_offset: u32,
    /// Scouts per wave.
    pub wave_size: u32,
}

/// Central push settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushPolicy {
    /// Build the push turret/wall pairs only with at least this many cores.
    #[serde(with = "decimal_serde")]
    pub fortify_cores: Fixed,
    /// Scouts per volley.
    pub volley: u32,
    /// After this turn, only fire on turns divisible by `fire_every`.
    pub cadence_after: u32,
    /// See `cadence_after`.
    pub fire_every: u32,
}

/// Scout lane along our left edge.
///
/// Fires every turn up to `cadence_after`, then only on turns divisible by
/// `fire_every`. After `wave_after`, turns divisible by `wave_every` send
/// `wave_size` scouts instead of `volley`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgePolicy {
    /// Scouts per ordinary volley.
    pub volley: u32,
    /// See `fire_every`.
    pub cadence_after: u32,
    /// Late-game firing interval.
    pub fire_every: u32,
    /// See `wave_every`.
    pub wave_after: u32,
    /// Full-wave interval.
    pub wave_every: u32,
    /// Scouts per full wave.
    pub wave_size: u32,
}

impl EdgePolicy {
    /// Scouts to launch on `turn`, or `None` on a resting turn.
    #[must_use]
    pub fn volley_for(&self, turn: u32) -> Option<u32> {
        if turn > self.cadence_after && turn % self.fire_every != 0 {
            return None;
        }
        if turn > self.wave_after && turn % self.wave_every == 0 {
            Some(self.wave_size)
        } else {
            Some(self.volley)
        }
    }
}

impl Default for EdgePolicy {
    fn default() -> Self {
        Self {
            volley: 2,
            cadence_after: 12,
            fire_every: 6,
            wave_after: 5,
            wave_every: 4,
            wave_size: 1000,
        }
    }
}

/// Finishing move trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinishingPolicy {
    /// Cores needed to activate.
    #[serde(with = "decimal_serde")]
    pub cores_required: Fixed,
    /// Bits needed to activate.
    #[serde(with = "decimal_serde")]
    pub bits_required: Fixed,
    /// Scouts per volley.
    pub volley: u32,
}

/// Escalation trip-wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscalationPolicy {
    /// Trips when cores fall more than this below last turn's remainder.
    #[serde(with = "decimal_serde")]
    pub cores_margin: Fixed,
    /// Trips when cores are below this after `floor_after_turn`.
    #[serde(with = "decimal_serde")]
    pub cores_floor: Fixed,
    /// See `cores_floor`.
    pub floor_after_turn: u32,
    /// Trips when our health is below this.
    #[serde(with = "decimal_serde")]
    pub health_floor: Fixed,
    /// Scouts per volley.
    pub volley: u32,
}

impl Default for StrategyPolicy {
    fn default() -> Self {
        Self::balanced()
    }
}

impl StrategyPolicy {
    /// Load a policy from a RON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_ron_str(&contents)
    }

    /// Load a policy from a RON string.
    pub fn from_ron_str(ron: &str) -> Result<Self> {
        let policy: Self = ron::from_str(ron)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Serialize to pretty RON.
    pub fn to_ron_string(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| AlgoError::InvalidPolicy(e.to_string()))
    }

    /// Look up a preset by name, case-insensitively.
    #[must_use]
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "balanced" => Some(Self::balanced()),
            "lane_prober" | "laneprober" => Some(Self::lane_prober()),
            "doomsday" => Some(Self::doomsday()),
            "turtle" => Some(Self::turtle()),
            _ => None,
        }
    }

    /// Names of all presets.
    pub const PRESETS: [&'static str; 4] = ["balanced", "lane_prober", "doomsday", "turtle"];

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`AlgoError::InvalidPolicy`] for ratios outside `0..=1`, zero
    /// cadence divisors, or stall posts on the opponent's half.
    pub fn validate(&self) -> Result<()> {
        let unit = Fixed::ONE;
        if self.saturation_ratio <= Fixed::ZERO || self.saturation_ratio > unit {
            return Err(AlgoError::InvalidPolicy(format!(
                "saturation_ratio must be in (0, 1], got {}",
                self.saturation_ratio
            )));
        }
        if self.repair_health_ratio < Fixed::ZERO || self.repair_health_ratio >= unit {
            return Err(AlgoError::InvalidPolicy(format!(
                "repair_health_ratio must be in [0, 1), got {}",
                self.repair_health_ratio
            )));
        }
        if self.stall.unit.is_structure() {
            return Err(AlgoError::InvalidPolicy(
                "stall unit must be a mobile unit".to_string(),
            ));
        }
        if let Some(post) = self.stall.posts.iter().find(|c| c.y >= ARENA_HALF) {
            return Err(AlgoError::InvalidPolicy(format!(
                "stall post {post} is on the opponent's half"
            )));
        }
        if let Some(probe) = &self.probe {
            if probe.rest_every == 0 || probe.wave_every == 0 {
                return Err(AlgoError::InvalidPolicy(
                    "probe cadence divisors must be non-zero".to_string(),
                ));
            }
            if probe.attacker.is_structure() || !probe.target.is_structure() {
                return Err(AlgoError::InvalidPolicy(
                    "probe must target a structure with a mobile attacker".to_string(),
                ));
            }
        }
        if let Some(push) = &self.push {
            if push.fire_every == 0 {
                return Err(AlgoError::InvalidPolicy(
                    "push fire_every must be non-zero".to_string(),
                ));
            }
        }
        if let Some(edge) = &self.edge {
            if edge.fire_every == 0 || edge.wave_every == 0 {
                return Err(AlgoError::InvalidPolicy(
                    "edge cadence divisors must be non-zero".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Everything enabled: probes and pushes in the mid game, with the
    /// finishing move and escalation as late-game transitions.
    #[must_use]
    pub fn balanced() -> Self {
        Self {
            name: "Balanced".to_string(),
            description: "Probe the frontier, push centrally, finish when rich".to_string(),
            defense_layout: DefenseLayout::Spread,
            saturation_ratio: from_decimal(0.7),
            channel_depth: 2,
            luxury_cores: Fixed::from_num(30),
            repair_health_ratio: from_decimal(0.25),
            stall: StallPolicy::opening(),
            probe: Some(ProbePolicy::default()),
            push: Some(PushPolicy::default()),
            edge: None,
            finishing: Some(FinishingPolicy::default()),
            escalation: Some(EscalationPolicy::default()),
        }
    }

    /// Frontier probing, central pushes and a left edge lane, no late-game
    /// transitions.
    #[must_use]
    pub fn lane_prober() -> Self {
        Self {
            name: "LaneProber".to_string(),
            description: "Open lanes against the enemy's densest frontier row".to_string(),
            edge: Some(EdgePolicy::default()),
            finishing: None,
            escalation: None,
            ..Self::balanced()
        }
    }

    /// Turtle up on the corners and save for one decisive strike; switch to a
    /// safe-lane plan if the economy is being drained.
    #[must_use]
    pub fn doomsday() -> Self {
        Self {
            name: "Doomsday".to_string(),
            description: "Save for the finishing move, fall back to the safest lane".to_string(),
            defense_layout: DefenseLayout::Fortress,
            repair_health_ratio: Fixed::ZERO,
            stall: StallPolicy {
                turns: 0,
                unit: UnitType::Interceptor,
                posts: vec![Coord::new(7, 6), Coord::new(20, 6)],
                low_health: Fixed::from_num(25),
                emergency_health: Fixed::from_num(18),
            },
            probe: None,
            push: None,
            ..Self::balanced()
        }
    }

    /// Defensive play that never attacks first.
    #[must_use]
    pub fn turtle() -> Self {
        Self {
            name: "Turtle".to_string(),
            description: "Fortress scaffold, corner guards, no offense".to_string(),
            defense_layout: DefenseLayout::Fortress,
            luxury_cores: Fixed::from_num(20),
            probe: None,
            push: None,
            finishing: None,
            escalation: None,
            ..Self::balanced()
        }
    }
}

impl StallPolicy {
    /// Interceptor screen for the opening turns.
    #[must_use]
    pub fn opening() -> Self {
        Self {
            turns: 3,
            unit: UnitType::Interceptor,
            posts: vec![Coord::new(22, 8), Coord::new(20, 6)],
            low_health: Fixed::from_num(25),
            emergency_health: Fixed::from_num(18),
        }
    }
}

impl Default for ProbePolicy {
    fn default() -> Self {
        Self {
            target: UnitType::Turret,
            min_frontier_units: 3,
            deep_row: 16,
            deep_min_frontier_units: 5,
            attacker: UnitType::Demolisher,
            volley: 3,
            cadence_after: 5,
            rest_every: 4,
            wave_every: 5,
            wave_offset: 3,
            wave_size: 1000,
        }
    }
}

impl Default for PushPolicy {
    fn default() -> Self {
        Self {
            fortify_cores: Fixed::from_num(20),
            volley: 1000,
            cadence_after: 12,
            fire_every: 4,
        }
    }
}

impl Default for FinishingPolicy {
    fn default() -> Self {
        Self {
            cores_required: Fixed::from_num(47),
            bits_required: Fixed::from_num(15),
            volley: 666,
        }
    }
}

impl Default for EscalationPolicy {
    fn default() -> Self {
        Self {
            cores_margin: Fixed::from_num(3),
            cores_floor: Fixed::from_num(5),
            floor_after_turn: 5,
            health_floor: Fixed::from_num(12),
            volley: 666,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        for name in StrategyPolicy::PRESETS {
            let policy = StrategyPolicy::preset(name).unwrap();
            policy.validate().unwrap();
        }
        assert!(StrategyPolicy::preset("unknown").is_none());
    }

    #[test]
    fn test_preset_toggles() {
        assert!(StrategyPolicy::lane_prober().finishing.is_none());
        assert!(StrategyPolicy::doomsday().probe.is_none());
        assert!(StrategyPolicy::doomsday().finishing.is_some());
        assert_eq!(
            StrategyPolicy::turtle().defense_layout,
            DefenseLayout::Fortress
        );
    }

    #[test]
    fn test_ron_round_trip_keeps_thresholds() {
        let policy = StrategyPolicy::balanced();
        let ron = policy.to_ron_string().unwrap();
        let loaded = StrategyPolicy::from_ron_str(&ron).unwrap();
        assert_eq!(loaded.saturation_ratio, policy.saturation_ratio);
        assert_eq!(loaded.stall.posts, policy.stall.posts);
        assert_eq!(loaded.probe, policy.probe);
    }

    #[test]
    fn test_invalid_ratio_is_rejected() {
        let mut policy = StrategyPolicy::balanced();
        policy.saturation_ratio = Fixed::from_num(2);
        assert!(matches!(
            policy.validate(),
            Err(AlgoError::InvalidPolicy(_))
        ));
    }

    #[test]
    fn test_edge_cadence() {
        let edge = EdgePolicy::default();
        assert_eq!(edge.volley_for(4), Some(2));
        assert_eq!(edge.volley_for(8), Some(1000));
        assert_eq!(edge.volley_for(13), None);
        assert_eq!(edge.volley_for(18), Some(2));
        assert_eq!(edge.volley_for(24), Some(1000));
    }

    #[test]
    fn test_edge_is_optional_in_ron() {
        let ron = StrategyPolicy::balanced().to_ron_string().unwrap();
        let without: String = ron
            .lines()
            .filter(|line| !line.trim_start().starts_with("edge:"))
            .collect::<Vec<_>>()
            .join("\n");
        let loaded = StrategyPolicy::from_ron_str(&without).unwrap();
        assert!(loaded.edge.is_none());

        let mut policy = StrategyPolicy::lane_prober();
        if let Some(edge) = policy.edge.as_mut() {
            edge.fire_every = 0;
        }
        assert!(matches!(
            policy.validate(),
            Err(AlgoError::InvalidPolicy(_))
        ));
    }

    #[test]
    fn test_malformed_ron_is_parse_error() {
        assert!(matches!(
            StrategyPolicy::from_ron_str("StrategyPolicy(name: )"),
            Err(AlgoError::PolicyParse(_))
        ));
    }
}
