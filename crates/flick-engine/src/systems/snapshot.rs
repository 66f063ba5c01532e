use crate::api::types::BodyInstance;
use crate::components::entity::Entity;

/// Refill `out` with one instance per entity that has a [`Visual`], in
/// scene order.
///
/// [`Visual`]: crate::components::visual::Visual
pub fn build_instances<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    out: &mut Vec<BodyInstance>,
) {
    out.clear();
    out.extend(entities.filter_map(|entity| {
        let visual = entity.visual?;
        Some(BodyInstance {
            id: entity.id.0 as f32,
            kind: visual.kind,
            x: entity.pos.x,
            y: entity.pos.y,
            rotation: entity.rotation,
            radius: visual.radius,
        })
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::components::visual::Visual;
    use glam::Vec2;

    #[test]
    fn only_visible_entities_are_listed() {
        let entities = [
            Entity::new(EntityId(1)).with_tag("wall"),
            Entity::new(EntityId(2))
                .with_pos(Vec2::new(300.0, 450.0))
                .with_visual(Visual::new(0.0, 14.0)),
            Entity::new(EntityId(3))
                .with_pos(Vec2::new(160.0, 632.0))
                .with_visual(Visual::new(1.0, 24.0)),
        ];
        let mut out = vec![BodyInstance::default(); 5];

        build_instances(entities.iter(), &mut out);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].id, 2.0);
        assert_eq!((out[0].x, out[0].y, out[0].radius), (300.0, 450.0, 14.0));
        assert_eq!((out[1].id, out[1].kind), (3.0, 1.0));
    }
}
