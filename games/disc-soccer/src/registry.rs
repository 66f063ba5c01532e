//! Ball and team rosters: the movable bodies of a match, tracked by id.

use flick_engine::{
    BodyDesc, ColliderDesc, ColliderMaterial, EngineContext, Entity, EntityId, Visual,
};
use glam::Vec2;

use crate::config::MatchConfig;
use crate::side::Side;

/// Discs per team.
pub const ROSTER_SIZE: usize = 3;

/// Extra reach around a body when picking it with the pointer.
const PICK_SLACK: f32 = 1.0;

/// A side's discs, ordered left / center / right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Roster {
    pub side: Side,
    pub discs: [EntityId; ROSTER_SIZE],
}

impl Roster {
    pub fn contains(&self, id: EntityId) -> bool {
        self.discs.contains(&id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Ball,
    Disc(Side),
}

impl BodyKind {
    /// `kind` in the host's instance buffer: 0 ball, 1 side A disc, 2 side B disc.
    pub fn instance_kind(self) -> f32 {
        match self {
            BodyKind::Ball => 0.0,
            BodyKind::Disc(side) => 1.0 + side.index() as f32,
        }
    }
}

/// A movable body in registration order.
#[derive(Debug, Clone, Copy)]
struct Tracked {
    id: EntityId,
    kind: BodyKind,
    radius: f32,
    /// Canonical reset position.
    home: Vec2,
}

/// Owns the ids of the ball and both rosters.
///
/// Game code reasons in units per tick; Rapier stores units per second.
/// Velocity reads and writes go through this registry so the conversion
/// happens in one place.
pub struct Registry {
    tracked: Vec<Tracked>,
    ball: Option<EntityId>,
    rosters: [Option<Roster>; 2],
    tick_hz: f32,
    material: ColliderMaterial,
    linear_damping: f32,
}

impl Registry {
    pub fn new(config: &MatchConfig) -> Self {
        Self {
            tracked: Vec::with_capacity(1 + 2 * ROSTER_SIZE),
            ball: None,
            rosters: [None, None],
            tick_hz: config.tick_hz,
            material: ColliderMaterial {
                restitution: config.restitution,
                friction: config.friction,
                density: 1.0,
            },
            linear_damping: config.linear_damping(),
        }
    }

    fn spawn_circle(
        &mut self,
        ctx: &mut EngineContext,
        kind: BodyKind,
        tag: String,
        pos: Vec2,
        radius: f32,
    ) -> EntityId {
        let id = ctx.next_id();
        let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius })
            .with_position(pos)
            .with_linear_damping(self.linear_damping)
            .with_angular_damping(self.linear_damping)
            .with_ccd(true);
        let entity = Entity::new(id)
            .with_tag(tag)
            .with_visual(Visual::new(kind.instance_kind(), radius));
        ctx.spawn_with_body(entity, desc, self.material);
        self.tracked.push(Tracked { id, kind, radius, home: pos });
        id
    }

    /// Spawn the ball at `center`. Its reset position is `center`.
    pub fn create_ball(&mut self, ctx: &mut EngineContext, center: Vec2, radius: f32) -> EntityId {
        let id = self.spawn_circle(ctx, BodyKind::Ball, "ball".to_string(), center, radius);
        self.ball = Some(id);
        id
    }

    /// Spawn a side's three discs on row `base_y`, at x-offsets
    /// `-spacing, 0, +spacing` around `center_x`.
    pub fn create_team(
        &mut self,
        ctx: &mut EngineContext,
        side: Side,
        center_x: f32,
        base_y: f32,
        spacing: f32,
        radius: f32,
    ) -> Roster {
        let offsets = [-spacing, 0.0, spacing];
        let discs = offsets.map(|dx| {
            let pos = Vec2::new(center_x + dx, base_y);
            let tag = format!("disc_{}", side.to_string().to_lowercase());
            self.spawn_circle(ctx, BodyKind::Disc(side), tag, pos, radius)
        });
        let roster = Roster { side, discs };
        self.rosters[side.index()] = Some(roster);
        roster
    }

    pub fn ball(&self) -> Option<EntityId> {
        self.ball
    }

    pub fn is_ball(&self, id: EntityId) -> bool {
        self.ball == Some(id)
    }

    pub fn roster(&self, side: Side) -> Option<&Roster> {
        self.rosters[side.index()].as_ref()
    }

    /// Whether `id` is one of `side`'s discs.
    pub fn belongs_to(&self, id: EntityId, side: Side) -> bool {
        self.roster(side).is_some_and(|r| r.contains(id))
    }

    /// Owning side of a disc; `None` for the ball or unknown ids.
    pub fn side_of(&self, id: EntityId) -> Option<Side> {
        Side::ALL.into_iter().find(|&side| self.belongs_to(id, side))
    }

    /// Kind of a tracked body.
    pub fn kind(&self, id: EntityId) -> Option<BodyKind> {
        self.tracked.iter().find(|t| t.id == id).map(|t| t.kind)
    }

    /// Canonical reset position of a tracked body.
    pub fn home(&self, id: EntityId) -> Option<Vec2> {
        self.tracked.iter().find(|t| t.id == id).map(|t| t.home)
    }

    /// Tracked ids in registration order (ball first when created first).
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.tracked.iter().map(|t| t.id)
    }

    /// Closest circular body whose center is within `radius + 1` of `pos`.
    /// Ties keep the earliest registered body.
    pub fn find_nearest(&self, ctx: &EngineContext, pos: Vec2) -> Option<EntityId> {
        let mut best: Option<(EntityId, f32)> = None;
        for t in &self.tracked {
            let Some(center) = ctx.position(t.id) else {
                continue;
            };
            let dist = center.distance(pos);
            if dist > t.radius + PICK_SLACK {
                continue;
            }
            if best.map_or(true, |(_, d)| dist < d) {
                best = Some((t.id, dist));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Velocity in units per tick.
    pub fn velocity(&self, ctx: &EngineContext, id: EntityId) -> Vec2 {
        ctx.velocity(id) / self.tick_hz
    }

    /// Write a velocity given in units per tick.
    pub fn set_velocity(&self, ctx: &mut EngineContext, id: EntityId, vel: Vec2) {
        ctx.set_velocity(id, vel * self.tick_hz);
    }

    /// Every tracked body is moving slower than `eps` units per tick.
    pub fn all_stopped(&self, ctx: &EngineContext, eps: f32) -> bool {
        self.tracked
            .iter()
            .all(|t| self.velocity(ctx, t.id).length() < eps)
    }

    /// Put every body back on its canonical spot at rest.
    /// Bodies are moved, never recreated.
    pub fn reset_all(&self, ctx: &mut EngineContext) {
        for t in &self.tracked {
            ctx.set_position(t.id, t.home);
            ctx.set_velocity(t.id, Vec2::ZERO);
            ctx.set_angular_velocity(t.id, 0.0);
        }
    }
}
