use glam::Vec2;

use crate::api::types::{EntityId, GameEvent};
#[cfg(feature = "physics")]
use crate::components::entity::Entity;
#[cfg(feature = "physics")]
use crate::core::physics::{BodyDesc, ColliderMaterial, PhysicsBody, PhysicsWorld};
use crate::core::scene::Scene;
use crate::input::queue::InputQueue;

/// Engine settings a game hands to the runner before `init`.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Seconds per fixed tick.
    pub fixed_dt: f32,
    pub world_width: f32,
    pub world_height: f32,
    /// Size hint for the per-frame event buffer read by the host.
    pub max_events: usize,
    /// Size hint for the per-frame body instance buffer.
    pub max_instances: usize,
    /// Zero for top-down tables. Y points down.
    pub gravity: Vec2,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 120.0,
            world_width: 600.0,
            world_height: 900.0,
            max_events: 32,
            max_instances: 32,
            gravity: Vec2::ZERO,
        }
    }
}

/// What a game implements to be driven by the runner.
///
/// One fixed tick runs, in order: `update` (input), the physics step,
/// then `after_step` (rules that must see post-integration state). A frame
/// runs zero or more ticks and then `present` exactly once.
pub trait Game {
    /// Read once, before `init`.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Build the table: static geometry and every movable body.
    fn init(&mut self, ctx: &mut EngineContext);

    /// Pre-step half of the tick: consume input, write velocities/positions.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Post-step half of the tick. Called once after every physics step.
    fn after_step(&mut self, _ctx: &mut EngineContext) {}

    /// End of a frame, also after `init`. Runs even when the frame ran no
    /// tick, so state the host reads every frame belongs here.
    fn present(&self, _ctx: &mut EngineContext) {}
}

/// Scene, physics and the outgoing event buffer, lent to each `Game` hook.
///
/// Lookups of unknown ids are not errors: writes are ignored and reads
/// return `None` or a zero value.
pub struct EngineContext {
    pub scene: Scene,
    /// Events for the host, cleared at the start of every frame.
    pub events: Vec<GameEvent>,
    #[cfg(feature = "physics")]
    pub physics: PhysicsWorld,
    id_counter: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::from_config(&GameConfig::default())
    }

    /// Physics gravity and timestep come from `config`.
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            scene: Scene::new(),
            events: Vec::with_capacity(config.max_events),
            #[cfg(feature = "physics")]
            physics: {
                let mut world = PhysicsWorld::new(config.gravity);
                world.set_dt(config.fixed_dt);
                world
            },
            id_counter: 0,
        }
    }

    /// Fresh id, never reused. The first one is 1.
    pub fn next_id(&mut self) -> EntityId {
        self.id_counter += 1;
        EntityId(self.id_counter)
    }

    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }

    /// Position as of the last physics sync or teleport.
    pub fn position(&self, id: EntityId) -> Option<Vec2> {
        self.scene.get(id).map(|e| e.pos)
    }

    #[cfg(feature = "physics")]
    fn body(&self, id: EntityId) -> Option<PhysicsBody> {
        self.scene.get(id).and_then(|e| e.body)
    }

    #[cfg(feature = "physics")]
    fn body_for_write(&self, id: EntityId, what: &str) -> Option<PhysicsBody> {
        let body = self.body(id);
        if body.is_none() {
            log::debug!("{} on {:?} ignored: no such body", what, id);
        }
        body
    }

    /// Create the body described by `desc` and add `entity` to the scene at
    /// `desc.position`.
    #[cfg(feature = "physics")]
    pub fn spawn_with_body(
        &mut self,
        entity: Entity,
        desc: BodyDesc,
        material: ColliderMaterial,
    ) -> EntityId {
        let id = entity.id;
        let body = self.physics.create_body(id, &desc, material);
        self.scene.spawn(entity.with_pos(desc.position).with_body(body));
        id
    }

    /// Units per second.
    #[cfg(feature = "physics")]
    pub fn set_velocity(&mut self, id: EntityId, vel: Vec2) {
        if let Some(body) = self.body_for_write(id, "set_velocity") {
            self.physics.set_velocity(&body, vel);
        }
    }

    /// Units per second.
    #[cfg(feature = "physics")]
    pub fn velocity(&self, id: EntityId) -> Vec2 {
        self.body(id)
            .map_or(Vec2::ZERO, |body| self.physics.velocity(&body))
    }

    #[cfg(feature = "physics")]
    pub fn set_angular_velocity(&mut self, id: EntityId, angvel: f32) {
        if let Some(body) = self.body_for_write(id, "set_angular_velocity") {
            self.physics.set_angular_velocity(&body, angvel);
        }
    }

    #[cfg(feature = "physics")]
    pub fn angular_velocity(&self, id: EntityId) -> f32 {
        self.body(id)
            .map_or(0.0, |body| self.physics.angular_velocity(&body))
    }

    /// Teleport. The scene copy is updated too, so reads before the next
    /// step already see the new position.
    #[cfg(feature = "physics")]
    pub fn set_position(&mut self, id: EntityId, pos: Vec2) {
        let Some(entity) = self.scene.get_mut(id) else {
            log::debug!("set_position on {:?} ignored: no such entity", id);
            return;
        };
        entity.pos = pos;
        if let Some(body) = entity.body {
            self.physics.set_position(&body, pos);
        }
    }

    /// Advance physics one fixed tick, then copy every body's pose back
    /// into the scene.
    #[cfg(feature = "physics")]
    pub fn step_physics(&mut self) {
        self.physics.step();
        let physics = &self.physics;
        for entity in self.scene.iter_mut() {
            if let Some(body) = entity.body {
                (entity.pos, entity.rotation) = physics.body_position(&body);
            }
        }
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
#[cfg(feature = "physics")]
mod physics_tests {
    use super::*;
    use crate::core::physics::ColliderDesc;

    fn spawn_disc(ctx: &mut EngineContext, pos: Vec2) -> EntityId {
        let id = ctx.next_id();
        let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: 10.0 }).with_position(pos);
        ctx.spawn_with_body(Entity::new(id).with_tag("disc"), desc, ColliderMaterial::default())
    }

    #[test]
    fn spawned_entity_sits_at_its_body() {
        let mut ctx = EngineContext::new();
        let id = spawn_disc(&mut ctx, Vec2::new(100.0, 200.0));

        assert_eq!(ctx.physics.body_count(), 1);
        assert_eq!(ctx.scene.find_all_by_tag("disc").len(), 1);
        assert_eq!(ctx.position(id), Some(Vec2::new(100.0, 200.0)));
        let body = ctx.scene.get(id).and_then(|e| e.body).unwrap();
        assert_eq!(ctx.physics.entity_of(&body), Some(id));
    }

    #[test]
    fn timestep_comes_from_config() {
        let config = GameConfig { fixed_dt: 1.0 / 30.0, ..GameConfig::default() };
        let ctx = EngineContext::from_config(&config);
        assert!((ctx.physics.dt() - 1.0 / 30.0).abs() < 1e-6);
    }

    #[test]
    fn step_syncs_scene_positions() {
        let mut ctx = EngineContext::new();
        let id = spawn_disc(&mut ctx, Vec2::new(100.0, 0.0));
        ctx.set_velocity(id, Vec2::new(0.0, 120.0));

        for _ in 0..12 {
            ctx.step_physics();
        }

        let y = ctx.position(id).unwrap().y;
        assert!((y - 12.0).abs() < 0.1, "y = {}", y);
    }

    #[test]
    fn teleport_is_visible_before_the_next_step() {
        let mut ctx = EngineContext::new();
        let id = spawn_disc(&mut ctx, Vec2::ZERO);
        ctx.set_position(id, Vec2::new(40.0, 50.0));
        assert_eq!(ctx.position(id), Some(Vec2::new(40.0, 50.0)));

        let body = ctx.scene.get(id).and_then(|e| e.body).unwrap();
        assert_eq!(ctx.physics.body_position(&body).0, Vec2::new(40.0, 50.0));
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut ctx = EngineContext::new();
        let ghost = EntityId(99);
        ctx.set_velocity(ghost, Vec2::ONE);
        ctx.set_position(ghost, Vec2::ONE);
        ctx.set_angular_velocity(ghost, 2.0);
        assert_eq!(ctx.physics.body_count(), 0);
        assert_eq!(ctx.velocity(ghost), Vec2::ZERO);
        assert_eq!(ctx.angular_velocity(ghost), 0.0);
        assert_eq!(ctx.position(ghost), None);
    }
}
