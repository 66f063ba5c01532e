//! Aim-and-flick: drag back from an owned disc, release to flick it.

use flick_engine::{EngineContext, EntityId};
use glam::Vec2;

use crate::registry::Registry;
use crate::state::MatchState;

/// Scale `raw` down to length `max` if it is longer; otherwise return it as is.
/// A zero vector stays zero.
pub fn cap_flick(raw: Vec2, max: f32) -> Vec2 {
    let mag = raw.length();
    if mag > max && mag > 0.0 {
        raw * (max / mag)
    } else {
        raw
    }
}

/// Slingshot: the flick points from the cursor back through the disc.
pub fn flick_from_drag(disc_pos: Vec2, cursor: Vec2, max: f32) -> Vec2 {
    cap_flick(disc_pos - cursor, max)
}

/// An open drag on one of the active side's discs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimSession {
    pub disc: EntityId,
    pub cursor: Vec2,
}

/// What the HUD needs to draw the aim line and power bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimPreview {
    pub disc: EntityId,
    pub origin: Vec2,
    pub cursor: Vec2,
    /// Capped flick, units per tick.
    pub flick: Vec2,
    /// `|flick| / max_flick`, in `[0, 1]`.
    pub power: f32,
}

#[derive(Debug, Clone)]
pub struct AimController {
    session: Option<AimSession>,
    max_flick: f32,
}

impl AimController {
    pub fn new(max_flick: f32) -> Self {
        Self {
            session: None,
            max_flick,
        }
    }

    pub fn max_flick(&self) -> f32 {
        self.max_flick
    }

    pub fn session(&self) -> Option<&AimSession> {
        self.session.as_ref()
    }

    /// Try to open a session on the disc under `pos`. Returns whether one opened.
    pub fn pointer_down(
        &mut self,
        ctx: &EngineContext,
        registry: &Registry,
        state: &MatchState,
        pos: Vec2,
    ) -> bool {
        if state.waiting_for_settle() {
            log::debug!("pointer down at {:?} ignored: waiting for settle", pos);
            return false;
        }
        if self.session.is_some() {
            log::debug!("pointer down at {:?} ignored: already aiming", pos);
            return false;
        }
        let Some(id) = registry.find_nearest(ctx, pos) else {
            log::debug!("pointer down at {:?} ignored: nothing there", pos);
            return false;
        };
        let side = state.current_side();
        if registry.is_ball(id) || !registry.belongs_to(id, side) {
            log::debug!("pointer down on {:?} ignored: not a side {} disc", id, side);
            return false;
        }

        self.session = Some(AimSession { disc: id, cursor: pos });
        true
    }

    /// Track the cursor for the preview. No physics effect.
    pub fn pointer_move(&mut self, pos: Vec2) {
        if let Some(session) = &mut self.session {
            session.cursor = pos;
        }
    }

    /// Release: write the flick to the disc, close the session and lock the
    /// table until it settles. Returns the applied flick.
    pub fn pointer_up(
        &mut self,
        ctx: &mut EngineContext,
        registry: &Registry,
        state: &mut MatchState,
        pos: Vec2,
    ) -> Option<Vec2> {
        let Some(mut session) = self.session.take() else {
            log::debug!("pointer up at {:?} ignored: no aim in progress", pos);
            return None;
        };
        session.cursor = pos;

        let Some(disc_pos) = ctx.position(session.disc) else {
            log::warn!("flick target {:?} no longer exists", session.disc);
            return None;
        };
        let flick = flick_from_drag(disc_pos, session.cursor, self.max_flick);
        registry.set_velocity(ctx, session.disc, flick);
        state.on_release();
        log::debug!("side {} flicked {:?} with {:?}", state.current_side(), session.disc, flick);
        Some(flick)
    }

    /// Abandon any open session.
    pub fn cancel(&mut self) {
        self.session = None;
    }

    pub fn preview(&self, ctx: &EngineContext) -> Option<AimPreview> {
        let session = self.session?;
        let origin = ctx.position(session.disc)?;
        let flick = flick_from_drag(origin, session.cursor, self.max_flick);
        Some(AimPreview {
            disc: session.disc,
            origin,
            cursor: session.cursor,
            flick,
            power: (flick.length() / self.max_flick).min(1.0),
        })
    }
}
