use glam::Vec2;

use crate::api::types::EntityId;
use crate::components::visual::Visual;
#[cfg(feature = "physics")]
use crate::core::physics::PhysicsBody;

/// A scene entry. With physics, `pos` and `rotation` are copied from the
/// body after every step.
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    /// Free-form label ("wall", "ball", ...), for lookups and debugging.
    pub tag: String,
    pub pos: Vec2,
    /// Radians.
    pub rotation: f32,
    pub visual: Option<Visual>,
    #[cfg(feature = "physics")]
    pub body: Option<PhysicsBody>,
}

impl Entity {
    /// Untagged, at the origin, no body.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            pos: Vec2::ZERO,
            rotation: 0.0,
            visual: None,
            #[cfg(feature = "physics")]
            body: None,
        }
    }

    pub fn with_tag(self, tag: impl Into<String>) -> Self {
        Self { tag: tag.into(), ..self }
    }

    pub fn with_pos(self, pos: Vec2) -> Self {
        Self { pos, ..self }
    }

    pub fn with_visual(self, visual: Visual) -> Self {
        Self { visual: Some(visual), ..self }
    }

    #[cfg(feature = "physics")]
    pub fn with_body(self, body: PhysicsBody) -> Self {
        Self { body: Some(body), ..self }
    }
}
