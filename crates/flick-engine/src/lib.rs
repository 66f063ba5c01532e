pub mod api;
pub mod components;
pub mod core;
pub mod input;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::game::{EngineContext, Game, GameConfig};
pub use api::types::{events_as_floats, instances_as_floats, BodyInstance, EntityId, GameEvent};
pub use components::entity::Entity;
pub use components::visual::Visual;
pub use core::scene::Scene;
pub use core::time::FixedTimestep;
pub use input::queue::{InputEvent, InputQueue};
pub use systems::snapshot::build_instances;

#[cfg(feature = "physics")]
pub use core::physics::{
    BodyDesc, BodyType, ColliderDesc, ColliderMaterial, PhysicsBody, PhysicsWorld,
};
