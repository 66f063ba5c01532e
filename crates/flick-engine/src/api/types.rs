use bytemuck::{Pod, Zeroable};

/// Unique identifier for an entity in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// A game event communicated from Rust to the presentation layer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
/// Laid out as 4 consecutive f32s so the host can read the event buffer directly.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }
}

/// View a slice of events as the flat f32 buffer handed to the host.
pub fn events_as_floats(events: &[GameEvent]) -> &[f32] {
    bytemuck::cast_slice(events)
}

/// One drawable body in the per-frame instance buffer.
/// `id` is the entity id as f32, so events can refer to the same body.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    pub id: f32,
    pub kind: f32,
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub radius: f32,
}

impl BodyInstance {
    pub const FLOATS: usize = 6;
}

pub fn instances_as_floats(instances: &[BodyInstance]) -> &[f32] {
    bytemuck::cast_slice(instances)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_flatten_in_field_order() {
        let events = [
            GameEvent::new(1.0, 2.0, 3.0, 0.0),
            GameEvent::new(2.0, 1.0, 0.0, 0.0),
        ];
        let floats = events_as_floats(&events);
        assert_eq!(floats.len(), 2 * GameEvent::FLOATS);
        assert_eq!(&floats[..4], &[1.0, 2.0, 3.0, 0.0]);
        assert_eq!(floats[4], 2.0);
    }

    #[test]
    fn instance_layout_matches_float_count() {
        assert_eq!(std::mem::size_of::<BodyInstance>(), BodyInstance::FLOATS * 4);
        let instance =
            BodyInstance { id: 7.0, kind: 1.0, x: 10.0, y: 20.0, rotation: 0.5, radius: 24.0 };
        assert_eq!(instances_as_floats(&[instance]), &[7.0, 1.0, 10.0, 20.0, 0.5, 24.0]);
    }
}
