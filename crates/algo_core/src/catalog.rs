//! Unit catalog built once from the match configuration.
//!
//! The engine sends a `unitInformation` array at game start. Its first six
//! entries describe, in order: wall, support, turret, scout, demolisher and
//! interceptor. Everything the planner needs to know about a unit type is
//! read from there exactly once and never mutated afterwards.

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{AlgoError, Result};
use crate::math::{from_decimal, Fixed};

/// The two resources a player spends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    /// Slow, persistent resource spent on stationary units.
    Cores,
    /// Fast, replenishing resource spent on mobile units.
    Bits,
}

/// Every unit type the engine knows, in configuration order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum UnitType {
    /// Cheap blocking wall.
    Wall,
    /// Support unit that shields friendly mobile units passing by.
    Support,
    /// Mid-cost turret.
    Turret,
    /// Fast, fragile mobile attacker.
    Scout,
    /// Long-range mobile attacker that targets structures.
    Demolisher,
    /// Mobile unit that hunts enemy mobile units.
    Interceptor,
}

impl UnitType {
    /// All unit types in configuration order.
    pub const ALL: [Self; 6] = [
        Self::Wall,
        Self::Support,
        Self::Turret,
        Self::Scout,
        Self::Demolisher,
        Self::Interceptor,
    ];

    /// Index into the configuration's `unitInformation` array.
    #[must_use]
    pub const fn config_index(self) -> usize {
        match self {
            Self::Wall => 0,
            Self::Support => 1,
            Self::Turret => 2,
            Self::Scout => 3,
            Self::Demolisher => 4,
            Self::Interceptor => 5,
        }
    }

    /// True for the unit types that are placed as structures.
    #[must_use]
    pub const fn is_structure(self) -> bool {
        matches!(self, Self::Wall | Self::Support | Self::Turret)
    }
}

/// Price of one unit in both resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cost {
    /// Cores required.
    pub cores: Fixed,
    /// Bits required.
    pub bits: Fixed,
}

impl Cost {
    /// Amount of one resource.
    #[must_use]
    pub const fn of(&self, resource: Resource) -> Fixed {
        match resource {
            Resource::Cores => self.cores,
            Resource::Bits => self.bits,
        }
    }
}

/// Static statistics for one unit type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitStats {
    /// Unit type these stats describe.
    pub unit_type: UnitType,
    /// Engine shorthand (e.g. `"FF"`).
    pub shorthand: String,
    /// True for walls, supports and turrets.
    pub stationary: bool,
    /// Deployment cost.
    pub cost: Cost,
    /// Damage dealt to stationary units per attack.
    pub damage_to_stationary: Fixed,
    /// Damage dealt to mobile units per attack.
    pub damage_to_mobile: Fixed,
    /// Attack range.
    pub range: Fixed,
    /// Starting health.
    pub health: Fixed,
    /// Shield range (supports only).
    pub shield_range: Fixed,
    /// Shield granted per friendly unit (supports only).
    pub shield_per_unit: Fixed,
    /// Movement speed (mobile units only).
    pub speed: Fixed,
}

/// Raw match configuration payload, as sent by the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Per unit type information, in configuration order.
    #[serde(rename = "unitInformation", default)]
    pub unit_information: Vec<RawUnitInfo>,
}

impl MatchConfig {
    /// Parse the configuration JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// One `unitInformation` entry. Missing numeric stats default to zero;
/// missing identity or cost fields are a [`AlgoError::Config`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUnitInfo {
    /// Engine shorthand.
    pub shorthand: Option<String>,
    /// `0` for stationary, `1` for mobile.
    pub unit_category: Option<u8>,
    /// Cores cost.
    pub cost1: Option<f64>,
    /// Bits cost.
    pub cost2: Option<f64>,
    /// Single-resource cost used by older configurations.
    pub cost: Option<f64>,
    /// Damage to stationary units.
    pub attack_damage_tower: Option<f64>,
    /// Damage to mobile units.
    pub attack_damage_walker: Option<f64>,
    /// Attack range.
    pub attack_range: Option<f64>,
    /// Shield range.
    pub shield_range: Option<f64>,
    /// Shield per unit.
    pub shield_per_unit: Option<f64>,
    /// Starting health.
    pub start_health: Option<f64>,
    /// Movement speed.
    pub speed: Option<f64>,
}

fn decimal(value: Option<f64>) -> Fixed {
    value.map_or(Fixed::ZERO, from_decimal)
}

impl RawUnitInfo {
    fn into_stats(self, unit_type: UnitType) -> Result<UnitStats> {
        let index = unit_type.config_index();
        let missing = |field| AlgoError::Config { index, field };

        let shorthand = self.shorthand.ok_or_else(|| missing("shorthand"))?;
        let stationary = self.unit_category.ok_or_else(|| missing("unitCategory"))? == 0;

        let cost = match (self.cost1, self.cost2, self.cost) {
            (None, None, None) => return Err(missing("cost")),
            (None, None, Some(single)) if stationary => Cost {
                cores: from_decimal(single),
                bits: Fixed::ZERO,
            },
            (None, None, Some(single)) => Cost {
                cores: Fixed::ZERO,
                bits: from_decimal(single),
            },
            (cores, bits, _) => Cost {
                cores: decimal(cores),
                bits: decimal(bits),
            },
        };

        Ok(UnitStats {
            unit_type,
            shorthand,
            stationary,
            cost,
            damage_to_stationary: decimal(self.attack_damage_tower),
            damage_to_mobile: decimal(self.attack_damage_walker),
            range: decimal(self.attack_range),
            health: decimal(self.start_health),
            shield_range: decimal(self.shield_range),
            shield_per_unit: decimal(self.shield_per_unit),
            speed: decimal(self.speed),
        })
    }
}

/// Read-only unit lookup for one match.
#[derive(Debug, Clone)]
pub struct UnitCatalog {
    stats: Vec<UnitStats>,
}

impl UnitCatalog {
    /// Build the catalog from a parsed configuration.
    ///
    /// # Errors
    ///
    /// Fails if fewer than six unit entries are present or any entry lacks
    /// its shorthand, category or cost.
    pub fn from_config(config: &MatchConfig) -> Result<Self> {
        if config.unit_information.len() < UnitType::ALL.len() {
            error!(
                found = config.unit_information.len(),
                "Match config does not describe every unit type"
            );
            return Err(AlgoError::IncompleteCatalog {
                found: config.unit_information.len(),
                expected: UnitType::ALL.len(),
            });
        }

        let stats = UnitType::ALL
            .iter()
            .map(|&unit_type| {
                config.unit_information[unit_type.config_index()]
                    .clone()
                    .into_stats(unit_type)
            })
            .collect::<Result<Vec<_>>>()
            .map_err(|e| {
                error!("Unit catalog rejected: {e}");
                e
            })?;

        for s in &stats {
            debug!(unit = ?s.unit_type, shorthand = %s.shorthand, "Catalogued unit");
        }
        Ok(Self { stats })
    }

    /// Parse the configuration JSON and build the catalog.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_config(&MatchConfig::from_json_str(json)?)
    }

    /// Stats for a unit type.
    #[must_use]
    pub fn lookup(&self, unit_type: UnitType) -> &UnitStats {
        &self.stats[unit_type.config_index()]
    }

    /// Whether a unit type is stationary.
    #[must_use]
    pub fn is_stationary(&self, unit_type: UnitType) -> bool {
        self.lookup(unit_type).stationary
    }

    /// Resolve an engine shorthand.
    pub fn by_shorthand(&self, shorthand: &str) -> Result<UnitType> {
        self.stats
            .iter()
            .find(|s| s.shorthand == shorthand)
            .map(|s| s.unit_type)
            .ok_or_else(|| AlgoError::UnknownUnit(shorthand.to_string()))
    }

    /// All stats, in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = &UnitStats> {
        self.stats.iter()
    }
}
