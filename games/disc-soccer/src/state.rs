//! Match state: whose turn, whether the table is settling, and the score.
//!
//! Held by value in the game and passed by reference to the handlers, so
//! every rule here can be tested without a physics world.

use crate::score::Score;
use crate::side::Side;
use crate::turn::TurnState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchState {
    pub turn: TurnState,
    pub score: Score,
}

impl MatchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_side(&self) -> Side {
        self.turn.side
    }

    /// True only between a flick release and the next full stop.
    pub fn waiting_for_settle(&self) -> bool {
        self.turn.is_waiting()
    }

    pub fn score_a(&self) -> u32 {
        self.score.a
    }

    pub fn score_b(&self) -> u32 {
        self.score.b
    }

    pub fn on_release(&mut self) {
        self.turn = self.turn.released();
    }

    /// Evaluate the settle gate for this tick. Returns true when the turn passed.
    pub fn on_settle_check(&mut self, all_stopped: bool) -> bool {
        let before = self.turn;
        self.turn = self.turn.settled(all_stopped);
        self.turn != before
    }

    /// Credit the scorer and return to kick-off.
    pub fn on_goal(&mut self, scorer: Side) {
        self.score.record(scorer);
        self.turn = self.turn.reset();
    }

    /// New match position. The score is kept.
    pub fn on_reset(&mut self) {
        self.turn = self.turn.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::turn::Phase;

    #[test]
    fn full_cycle_hands_turn_to_b() {
        let mut state = MatchState::new();
        state.on_release();
        assert!(state.waiting_for_settle());
        assert_eq!(state.current_side(), Side::A);

        assert!(!state.on_settle_check(false));
        assert!(state.waiting_for_settle());

        assert!(state.on_settle_check(true));
        assert_eq!(state.current_side(), Side::B);
        assert!(!state.waiting_for_settle());
    }

    #[test]
    fn idle_settle_check_is_a_no_op() {
        let mut state = MatchState::new();
        assert!(!state.on_settle_check(true));
        assert_eq!(state, MatchState::new());
    }

    #[test]
    fn goal_scores_and_forces_kick_off() {
        let mut state = MatchState::new();
        state.on_release();
        state.on_settle_check(true);
        state.on_release();

        state.on_goal(Side::B);

        assert_eq!(state.score_b(), 1);
        assert_eq!(state.score_a(), 0);
        assert_eq!(state.turn.side, Side::A);
        assert_eq!(state.turn.phase, Phase::Idle);
    }

    #[test]
    fn reset_keeps_score() {
        let mut state = MatchState::new();
        state.on_goal(Side::A);
        state.on_goal(Side::A);
        state.on_release();

        state.on_reset();

        assert_eq!(state.score_a(), 2);
        assert!(!state.waiting_for_settle());
        assert_eq!(state.current_side(), Side::A);
    }
}
