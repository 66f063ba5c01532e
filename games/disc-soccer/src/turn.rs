//! Turn phases. Pure transitions; the caller supplies the settle test.

use crate::side::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// The active side may start an aim.
    #[default]
    Idle,
    /// A flick was released; input is locked until every body stops.
    WaitingForSettle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnState {
    pub side: Side,
    pub phase: Phase,
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnState {
    /// Side A to move, nothing in flight.
    pub fn new() -> Self {
        Self {
            side: Side::A,
            phase: Phase::Idle,
        }
    }

    pub fn is_waiting(&self) -> bool {
        self.phase == Phase::WaitingForSettle
    }

    /// A flick left the active side's disc.
    pub fn released(self) -> Self {
        Self {
            phase: Phase::WaitingForSettle,
            ..self
        }
    }

    /// Hand the turn over once everything has stopped. Unchanged otherwise,
    /// or when no flick is in flight.
    pub fn settled(self, all_stopped: bool) -> Self {
        if self.is_waiting() && all_stopped {
            Self {
                side: self.side.other(),
                phase: Phase::Idle,
            }
        } else {
            self
        }
    }

    /// A goal or a reset command: back to kick-off with side A to move.
    pub fn reset(self) -> Self {
        Self::new()
    }
}
