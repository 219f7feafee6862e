//! Match configuration and strategy policy validation.

use std::path::{Path, PathBuf};

use algo_core::catalog::{MatchConfig, UnitCatalog};
use algo_core::error::AlgoError;
use algo_core::grid::Arena;
use algo_core::session::AlgoSession;
use algo_core::strategy::blueprints::{FORTRESS, SPREAD};
use algo_core::strategy::{DefenseLayout, StrategyPolicy};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors reported by the tools.
#[derive(Debug, Error)]
pub enum ToolError {
    /// A file could not be read or written.
    #[error("{path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The decision core rejected the input.
    #[error(transparent)]
    Core(#[from] AlgoError),

    /// Serializing output failed.
    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] ron::Error),
}

/// Result type for the tools.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Outcome of a successful validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Name of the policy checked.
    pub policy: String,
    /// Unit types in the configuration, when one was given.
    pub units: Option<usize>,
    /// Suspicious settings that are still legal.
    pub warnings: Vec<String>,
}

pub(crate) fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| ToolError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve a preset name or a path to a RON policy file.
pub fn load_policy(name_or_path: &str) -> Result<StrategyPolicy> {
    if let Some(policy) = StrategyPolicy::preset(name_or_path) {
        debug!(preset = %policy.name, "Using built-in preset");
        return Ok(policy);
    }
    let path = Path::new(name_or_path);
    let policy = StrategyPolicy::from_ron_str(&read(path)?)?;
    Ok(policy)
}

/// Parse a match configuration file into a unit catalog.
pub fn load_catalog(path: &Path) -> Result<UnitCatalog> {
    Ok(UnitCatalog::from_json_str(&read(path)?)?)
}

/// Settings that pass validation but will not behave as intended.
#[must_use]
pub fn policy_warnings(policy: &StrategyPolicy) -> Vec<String> {
    let arena = Arena::default();
    let scaffold = match policy.defense_layout {
        DefenseLayout::Spread => SPREAD.cells(),
        DefenseLayout::Fortress => FORTRESS.cells(),
    };

    let mut warnings = Vec::new();
    for post in &policy.stall.posts {
        if !arena.contains(*post) {
            warnings.push(format!("stall post {post} is outside the arena"));
        } else if scaffold.contains(post) {
            warnings.push(format!("stall post {post} is covered by the scaffold"));
        }
    }
    if policy.probe.is_none()
        && policy.push.is_none()
        && policy.edge.is_none()
        && policy.finishing.is_none()
        && policy.escalation.is_none()
    {
        warnings.push("policy never attacks".to_string());
    }
    if let (Some(finishing), Some(escalation)) = (&policy.finishing, &policy.escalation) {
        if finishing.cores_required <= escalation.cores_floor {
            warnings.push(format!(
                "finishing threshold {} is not above the escalation floor {}",
                finishing.cores_required, escalation.cores_floor
            ));
        }
    }
    warnings
}

/// Validate a policy, and optionally a match configuration against it.
///
/// # Errors
///
/// Returns an error if either input fails to load or the session cannot be
/// started from them.
pub fn validate(config: Option<&Path>, policy: &str) -> Result<ValidationReport> {
    let policy = load_policy(policy)?;
    let warnings = policy_warnings(&policy);
    for w in &warnings {
        warn!("{w}");
    }

    let units = match config {
        Some(path) => {
            let config = MatchConfig::from_json_str(&read(path)?)?;
            let session = AlgoSession::on_game_start(&config, policy.clone())?;
            Some(session.catalog().iter().count())
        }
        None => None,
    };

    Ok(ValidationReport {
        policy: policy.name,
        units,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use algo_core::grid::Coord;

    #[test]
    fn test_presets_resolve_by_name() {
        assert_eq!(load_policy("doomsday").unwrap().name, "Doomsday");
        assert_eq!(load_policy("Turtle").unwrap().name, "Turtle");
    }

    #[test]
    fn test_missing_policy_file_is_io_error() {
        let err = load_policy("no/such/policy.ron").unwrap_err();
        assert!(matches!(err, ToolError::Io { .. }));
    }

    #[test]
    fn test_warnings() {
        assert!(policy_warnings(&StrategyPolicy::balanced()).is_empty());
        assert_eq!(
            policy_warnings(&StrategyPolicy::turtle()),
            vec!["policy never attacks".to_string()]
        );

        let mut policy = StrategyPolicy::balanced();
        policy.stall.posts = vec![Coord::new(7, 10), Coord::new(0, 0)];
        let warnings = policy_warnings(&policy);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("scaffold"));
        assert!(warnings[1].contains("outside"));
    }
}
