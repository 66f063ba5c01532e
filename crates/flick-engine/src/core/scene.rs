use crate::api::types::EntityId;
use crate::components::entity::Entity;

/// Every entity of a match, kept in spawn order.
///
/// A table holds a couple of dozen bodies, so lookups are linear scans.
#[derive(Debug, Default)]
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Entity> {
        self.entities.iter_mut()
    }

    pub fn find_all_by_tag(&self, tag: &str) -> Vec<&Entity> {
        self.iter().filter(|e| e.tag == tag).collect()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn scene_of(ids: impl IntoIterator<Item = u32>) -> Scene {
        let mut scene = Scene::new();
        for id in ids {
            scene.spawn(Entity::new(EntityId(id)));
        }
        scene
    }

    #[test]
    fn lookup_by_id() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(4)).with_pos(Vec2::new(300.0, 450.0)));
        assert_eq!(scene.get(EntityId(4)).map(|e| e.pos), Some(Vec2::new(300.0, 450.0)));
        assert!(scene.get(EntityId(5)).is_none());

        scene.get_mut(EntityId(4)).unwrap().pos = Vec2::ZERO;
        assert_eq!(scene.get(EntityId(4)).unwrap().pos, Vec2::ZERO);
    }

    #[test]
    fn iteration_follows_spawn_order() {
        let mut scene = scene_of([3, 1, 4]);
        let ids: Vec<u32> = scene.iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![3, 1, 4]);
        for entity in scene.iter_mut() {
            entity.rotation = 1.0;
        }
        assert!(scene.iter().all(|e| e.rotation == 1.0));
        assert_eq!(scene.len(), 3);
        assert!(!scene.is_empty());
    }

    #[test]
    fn tags_select_in_spawn_order() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_tag("post"));
        scene.spawn(Entity::new(EntityId(2)).with_tag("ball"));
        scene.spawn(Entity::new(EntityId(3)).with_tag("post"));
        let posts: Vec<EntityId> = scene.find_all_by_tag("post").iter().map(|e| e.id).collect();
        assert_eq!(posts, vec![EntityId(1), EntityId(3)]);
        assert!(scene.find_all_by_tag("wall").is_empty());
    }
}
