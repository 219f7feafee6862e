//! Region library and preset dumps.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use algo_core::grid::Coord;
use algo_core::regions::RegionLibrary;
use algo_core::strategy::StrategyPolicy;
use serde::Serialize;
use tracing::info;

use crate::validate::{Result, ToolError};

/// One region, flattened for output.
#[derive(Debug, Clone, Serialize)]
pub struct RegionEntry {
    /// Region name.
    pub name: String,
    /// Cell count.
    pub size: usize,
    /// Cells in generation order.
    pub cells: Vec<Coord>,
}

/// Every region of an arena.
#[derive(Debug, Clone, Serialize)]
pub struct RegionDump {
    /// Arena half-size.
    pub half: i32,
    /// Regions, lanes first.
    pub regions: Vec<RegionEntry>,
}

impl RegionDump {
    /// Build the dump for an arena half-size.
    #[must_use]
    pub fn build(half: i32) -> Self {
        let lib = RegionLibrary::build(half);
        let regions = lib
            .iter()
            .map(|r| RegionEntry {
                name: r.name().to_string(),
                size: r.len(),
                cells: r.cells().to_vec(),
            })
            .collect();
        Self { half, regions }
    }

    /// Pretty RON.
    pub fn to_ron(&self) -> Result<String> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    /// One line per region: name, size and cells.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for r in &self.regions {
            let _ = write!(out, "{:<20} {:>3}:", r.name, r.size);
            for c in &r.cells {
                let _ = write!(out, " {c}");
            }
            out.push('\n');
        }
        out
    }
}

/// Write every built-in preset to `dir` as `<name>.ron`. Returns the files
/// written.
pub fn export_presets(dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).map_err(|source| ToolError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::new();
    for name in StrategyPolicy::PRESETS {
        let Some(policy) = StrategyPolicy::preset(name) else {
            continue;
        };
        let path = dir.join(format!("{name}.ron"));
        std::fs::write(&path, policy.to_ron_string()?).map_err(|source| ToolError::Io {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), "Wrote preset");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dump_lists_every_region() {
        let dump = RegionDump::build(14);
        assert_eq!(dump.regions.len(), RegionLibrary::default().iter().count());
        let frontier = dump.regions.iter().find(|r| r.name == "frontier").unwrap();
        assert_eq!(frontier.size, 70);
    }

    #[test]
    fn test_text_has_one_line_per_region() {
        let dump = RegionDump::build(14);
        let text = dump.to_text();
        assert_eq!(text.lines().count(), dump.regions.len());
        assert!(text.contains("left_breach_zone"));
        assert!(text.contains("[0, 13]"));
    }
}
