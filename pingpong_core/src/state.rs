//! Serve and rally state machine data.

use serde::{Deserialize, Serialize};

use crate::Side;

/// Which of the two mandatory serve bounces is still outstanding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ServeStage {
    #[default]
    None,
    NeedServerBounce,
    NeedReceiverBounce,
}

/// Coarse phase of a match, derived from the `GameState` flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Positioning,
    ServeInFlight,
    Rally,
    MatchOver,
}

/// Why a point ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointReason {
    OutOfBounds,
    ServeFault,
    WrongSide,
    DoubleBounce,
}

/// What a single `update` call ended with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Point { winner: Side, reason: PointReason },
    Let,
    MatchOver { winner: Side },
}

impl TickOutcome {
    /// True when the tick awarded a point, replayed a serve or ended the match.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TickOutcome::Continue)
    }
}

/// Serve/rally flags owned by the engine
#[derive(Debug, Clone, Default)]
pub struct GameState {
    pub is_playing: bool,
    pub is_serving: bool,
    pub ball_in_play: bool,
    pub last_hit_by: Option<Side>,
    pub rally_count: u32,
    pub serve_count: u32,
    pub ball_touched_table: bool,
    pub last_bounce_side: Option<Side>,
    pub serve_stage: ServeStage,
    pub serve_net_touch: bool,
    pub net_contact: bool, // Ball still overlapping the net from an earlier tick
    pub receiver_bounces: u32, // Bounces on the far side of the last hitter since the hit
    pub winner: Option<Side>,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        if self.winner.is_some() {
            Phase::MatchOver
        } else if !self.is_playing {
            Phase::Idle
        } else if self.is_serving {
            Phase::Positioning
        } else if self.ball_in_play && self.serve_stage != ServeStage::None {
            Phase::ServeInFlight
        } else {
            Phase::Rally
        }
    }

    pub fn in_serve_sequence(&self) -> bool {
        self.serve_stage != ServeStage::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_progression() {
        let mut state = GameState::new();
        assert_eq!(state.phase(), Phase::Idle);

        state.is_playing = true;
        state.is_serving = true;
        state.serve_stage = ServeStage::NeedServerBounce;
        assert_eq!(state.phase(), Phase::Positioning);

        state.is_serving = false;
        state.ball_in_play = true;
        assert_eq!(state.phase(), Phase::ServeInFlight);

        state.serve_stage = ServeStage::None;
        assert_eq!(state.phase(), Phase::Rally);

        state.winner = Some(Side::Player);
        state.is_playing = false;
        assert_eq!(state.phase(), Phase::MatchOver);
    }

    #[test]
    fn test_outcome_is_terminal() {
        assert!(!TickOutcome::Continue.is_terminal());
        assert!(TickOutcome::Let.is_terminal());
        assert!(TickOutcome::Point {
            winner: Side::Opponent,
            reason: PointReason::OutOfBounds
        }
        .is_terminal());
    }
}
