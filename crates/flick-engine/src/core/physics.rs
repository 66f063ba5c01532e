//! Rapier2D behind a small API: circles and boxes, velocities, one fixed step.
//!
//! Everything crossing this boundary is glam; nalgebra stays inside.

use glam::Vec2;
use rapier2d::prelude::*;

use crate::api::types::EntityId;

fn to_na(v: Vec2) -> Vector<Real> {
    vector![v.x, v.y]
}

fn from_na(v: &Vector<Real>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

/// Dynamic bodies are integrated by the solver; fixed ones never move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    Dynamic,
    Fixed,
}

/// Collider shape. Tables only need circles and boxes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderDesc {
    Ball { radius: f32 },
    Cuboid { half_width: f32, half_height: f32 },
}

/// Surface response of a collider.
///
/// Restitution combines with `Max`, so a bouncy disc keeps its bounce
/// against a wall with a lower coefficient.
#[derive(Debug, Clone, Copy)]
pub struct ColliderMaterial {
    pub restitution: f32,
    pub friction: f32,
    pub density: f32,
}

impl Default for ColliderMaterial {
    fn default() -> Self {
        Self {
            restitution: 0.3,
            friction: 0.5,
            density: 1.0,
        }
    }
}

/// Description of a body to create.
#[derive(Debug, Clone)]
pub struct BodyDesc {
    pub body_type: BodyType,
    pub collider: ColliderDesc,
    pub position: Vec2,
    /// Initial velocity, units per second.
    pub velocity: Vec2,
    pub ccd: bool,
    /// Continuous damping coefficient; velocity is scaled by
    /// `1 / (1 + dt * linear_damping)` each step.
    pub linear_damping: f32,
    pub angular_damping: f32,
}

impl BodyDesc {
    fn with_type(body_type: BodyType, collider: ColliderDesc) -> Self {
        Self {
            body_type,
            collider,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            ccd: false,
            linear_damping: 0.0,
            angular_damping: 0.0,
        }
    }

    pub fn dynamic(collider: ColliderDesc) -> Self {
        Self::with_type(BodyType::Dynamic, collider)
    }

    pub fn fixed(collider: ColliderDesc) -> Self {
        Self::with_type(BodyType::Fixed, collider)
    }

    pub fn with_position(mut self, pos: Vec2) -> Self {
        self.position = pos;
        self
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.velocity = vel;
        self
    }

    /// Continuous collision detection, for fast discs against thin posts.
    pub fn with_ccd(mut self, enabled: bool) -> Self {
        self.ccd = enabled;
        self
    }

    pub fn with_linear_damping(mut self, damping: f32) -> Self {
        self.linear_damping = damping;
        self
    }

    pub fn with_angular_damping(mut self, damping: f32) -> Self {
        self.angular_damping = damping;
        self
    }

    fn rigid_body(&self, entity_id: EntityId) -> RigidBody {
        let builder = match self.body_type {
            BodyType::Dynamic => RigidBodyBuilder::dynamic(),
            BodyType::Fixed => RigidBodyBuilder::fixed(),
        };
        builder
            .translation(to_na(self.position))
            .linvel(to_na(self.velocity))
            .ccd_enabled(self.ccd)
            .linear_damping(self.linear_damping)
            .angular_damping(self.angular_damping)
            .user_data(entity_id.0 as u128)
            .build()
    }

    fn collider(&self, material: ColliderMaterial) -> Collider {
        let builder = match self.collider {
            ColliderDesc::Ball { radius } => ColliderBuilder::ball(radius),
            ColliderDesc::Cuboid { half_width, half_height } => {
                ColliderBuilder::cuboid(half_width, half_height)
            }
        };
        builder
            .restitution(material.restitution)
            .restitution_combine_rule(CoefficientCombineRule::Max)
            .friction(material.friction)
            .density(material.density)
            .build()
    }
}

/// Rapier handles kept on an [`Entity`](crate::components::entity::Entity).
#[derive(Debug, Clone, Copy)]
pub struct PhysicsBody {
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
}

/// The Rapier sets and pipeline, stepped once per fixed tick.
pub struct PhysicsWorld {
    gravity: Vector<Real>,
    params: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
}

impl PhysicsWorld {
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity: to_na(gravity),
            params: IntegrationParameters::default(),
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
        }
    }

    pub fn set_dt(&mut self, dt: f32) {
        self.params.dt = dt;
    }

    /// Seconds per step.
    pub fn dt(&self) -> f32 {
        self.params.dt
    }

    /// Insert a body with its single collider. The entity id goes in `user_data`.
    pub fn create_body(
        &mut self,
        entity_id: EntityId,
        desc: &BodyDesc,
        material: ColliderMaterial,
    ) -> PhysicsBody {
        let body_handle = self.bodies.insert(desc.rigid_body(entity_id));
        let collider_handle = self.colliders.insert_with_parent(
            desc.collider(material),
            body_handle,
            &mut self.bodies,
        );
        PhysicsBody {
            body_handle,
            collider_handle,
        }
    }

    /// One fixed step: integrate, detect and resolve contacts.
    pub fn step(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
    }

    fn with_body(&mut self, body: &PhysicsBody, f: impl FnOnce(&mut RigidBody)) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            f(rb);
        }
    }

    fn read<T>(&self, body: &PhysicsBody, default: T, f: impl FnOnce(&RigidBody) -> T) -> T {
        self.bodies.get(body.body_handle).map_or(default, f)
    }

    /// Units per second. Wakes the body.
    pub fn set_velocity(&mut self, body: &PhysicsBody, vel: Vec2) {
        self.with_body(body, |rb| rb.set_linvel(to_na(vel), true));
    }

    pub fn velocity(&self, body: &PhysicsBody) -> Vec2 {
        self.read(body, Vec2::ZERO, |rb| from_na(rb.linvel()))
    }

    /// Radians per second.
    pub fn set_angular_velocity(&mut self, body: &PhysicsBody, angvel: f32) {
        self.with_body(body, |rb| rb.set_angvel(angvel, true));
    }

    pub fn angular_velocity(&self, body: &PhysicsBody) -> f32 {
        self.read(body, 0.0, |rb| rb.angvel())
    }

    /// Teleport. Velocity is left as it was.
    pub fn set_position(&mut self, body: &PhysicsBody, pos: Vec2) {
        self.with_body(body, |rb| rb.set_translation(to_na(pos), true));
    }

    /// Position and rotation angle.
    pub fn body_position(&self, body: &PhysicsBody) -> (Vec2, f32) {
        self.read(body, (Vec2::ZERO, 0.0), |rb| {
            (from_na(rb.translation()), rb.rotation().angle())
        })
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Entity owning the body, from `user_data`.
    pub fn entity_of(&self, body: &PhysicsBody) -> Option<EntityId> {
        self.bodies
            .get(body.body_handle)
            .map(|rb| EntityId(rb.user_data as u32))
    }
}
