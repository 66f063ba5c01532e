use glam::Vec2;

use crate::pitch::Pitch;
use crate::side::Side;

/// How far past the boundary (toward the field) the goal line sits.
pub const GOAL_LINE_OFFSET: f32 = 6.0;

/// Which side scores, if the ball center has crossed a goal line inside the gap.
///
/// Side A attacks the top goal, side B the bottom one. The gap test is strict,
/// so a ball exactly in line with a post does not count.
pub fn detect_goal(pitch: &Pitch, ball: Vec2) -> Option<Side> {
    if !pitch.within_goal_gap(ball.x) {
        return None;
    }
    let top_line = pitch.margin() + GOAL_LINE_OFFSET;
    let bottom_line = pitch.height() - pitch.margin() - GOAL_LINE_OFFSET;
    if ball.y < top_line {
        Some(Side::A)
    } else if ball.y > bottom_line {
        Some(Side::B)
    } else {
        None
    }
}
