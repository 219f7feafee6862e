//! Phase flags carried across turns.

use crate::grid::Coord;
use crate::math::Fixed;
use crate::regions::Side;

/// Offense routine chosen for a turn. Exactly one runs per turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OffensePhase {
    /// Holding back: interceptor screen, emergency blocks on low health.
    Stall,
    /// Lane opened against the opponent's densest frontier row.
    Probe,
    /// Central push from the safer of two launch points.
    Push,
    /// Long-horizon safe-lane plan after the trip-wire fired.
    Escalate,
    /// Finishing move.
    Finish,
    /// Nothing to do this turn.
    Hold,
}

/// Launch cell and support ring chosen when escalation first runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscalationPlan {
    /// Where every escalation volley is launched.
    pub launch: Coord,
    /// Cells bordering the launch path, walled with supports.
    pub flank: Vec<Coord>,
}

/// Strategy flags that persist for the whole match.
///
/// Channel flags are recomputed every turn. `escalation_active` and
/// `finishing_active` are latched: once set they are never cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhaseState {
    /// Opponent has saturated its left edge lane.
    pub channel_left: bool,
    /// Opponent has saturated its right edge lane.
    pub channel_right: bool,
    /// Trip-wire fired; long-horizon mode for the rest of the match.
    pub escalation_active: bool,
    /// Finishing move armed for the rest of the match.
    pub finishing_active: bool,
    /// The last escalation/finishing turn fired; this one recharges.
    pub charging: bool,
    /// A probe lane has been built; the central push stays off.
    pub probe_committed: bool,
    /// Phase chosen on the most recent turn.
    pub last_phase: Option<OffensePhase>,
    /// Cores left after the previous turn's defense pass.
    pub cores_last_turn: Option<Fixed>,
    /// Escalation launch plan, fixed on first use.
    pub escalation_plan: Option<EscalationPlan>,
}

impl PhaseState {
    /// Whether the opponent holds a channel on `side`.
    #[must_use]
    pub const fn has_channel(&self, side: Side) -> bool {
        match side {
            Side::Left => self.channel_left,
            Side::Right => self.channel_right,
        }
    }

    /// True while stalling was the last chosen phase.
    #[must_use]
    pub fn is_stalling(&self) -> bool {
        self.last_phase == Some(OffensePhase::Stall)
    }

    /// Latch escalation on.
    pub fn activate_escalation(&mut self) {
        self.escalation_active = true;
    }

    /// Latch the finishing move on.
    pub fn activate_finishing(&mut self) {
        self.finishing_active = true;
    }

    /// Flip the charging flag; returns true when this turn fires.
    pub fn toggle_charge(&mut self) -> bool {
        let fire = !self.charging;
        self.charging = fire;
        fire
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_charge_alternates() {
        let mut state = PhaseState::default();
        let fired: Vec<bool> = (0..5).map(|_| state.toggle_charge()).collect();
        assert_eq!(fired, vec![true, false, true, false, true]);
    }

    #[test]
    fn test_channel_lookup() {
        let state = PhaseState {
            channel_right: true,
            ..PhaseState::default()
        };
        assert!(state.has_channel(Side::Right));
        assert!(!state.has_channel(Side::Left));
    }
}
