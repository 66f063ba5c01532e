/// How the host draws an entity: a game-defined kind and a circle radius.
///
/// Entities without one (walls, posts) are left out of the instance buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visual {
    pub kind: f32,
    pub radius: f32,
}

impl Visual {
    pub fn new(kind: f32, radius: f32) -> Self {
        Self { kind, radius }
    }
}
