//! Static pitch geometry: boundary walls, goal posts and goal mouths.
//!
//! Coordinates are Y-down. The posts at each end run along the goal line and
//! leave a centered gap; behind the gap a shallow goal mouth (back wall plus
//! two side plates) lets the ball cross the line where the goal detector
//! sees it.

use flick_engine::{BodyDesc, ColliderDesc, ColliderMaterial, EngineContext, Entity, EntityId};
use glam::Vec2;

use crate::config::MatchConfig;

/// Thickness of a goal post.
pub const POST_THICKNESS: f32 = 8.0;
/// Distance from the playable boundary to the post center line.
pub const POST_INSET: f32 = 10.0;

/// Axis-aligned rectangle, stored the way Rapier cuboids are described.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Rect {
    /// Rectangle spanning `[min, max]`.
    pub fn from_corners(min: Vec2, max: Vec2) -> Self {
        Self {
            center: (min + max) / 2.0,
            half_extents: (max - min) / 2.0,
        }
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }
}

/// Which part of the pitch a static body belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PitchPart {
    Wall,
    Post,
    GoalMouth,
}

impl PitchPart {
    fn tag(self) -> &'static str {
        match self {
            PitchPart::Wall => "wall",
            PitchPart::Post => "post",
            PitchPart::GoalMouth => "goal_mouth",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pitch {
    width: f32,
    height: f32,
    margin: f32,
    wall_thickness: f32,
    goal_width: f32,
    goal_depth: f32,
}

impl Pitch {
    /// Derive the layout. `goal_width < width - 2 * margin` is a precondition
    /// checked by [`MatchConfig::validate`].
    pub fn new(
        width: f32,
        height: f32,
        margin: f32,
        wall_thickness: f32,
        goal_width: f32,
        goal_depth: f32,
    ) -> Self {
        Self {
            width,
            height,
            margin,
            wall_thickness,
            goal_width,
            goal_depth,
        }
    }

    pub fn from_config(config: &MatchConfig) -> Self {
        Self::new(
            config.width,
            config.height,
            config.margin,
            config.wall_thickness,
            config.goal_width,
            config.goal_depth,
        )
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn goal_width(&self) -> f32 {
        self.goal_width
    }

    pub fn goal_depth(&self) -> f32 {
        self.goal_depth
    }

    /// Kick-off spot.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Left and right x of the goal gap.
    pub fn goal_gap(&self) -> (f32, f32) {
        let half = self.goal_width / 2.0;
        (self.width / 2.0 - half, self.width / 2.0 + half)
    }

    /// Strictly between the goal posts.
    pub fn within_goal_gap(&self, x: f32) -> bool {
        let (left, right) = self.goal_gap();
        left < x && x < right
    }

    /// Playable area `[margin, width - margin] × [margin, height - margin]`.
    pub fn playable(&self) -> Rect {
        Rect::from_corners(
            Vec2::splat(self.margin),
            Vec2::new(self.width - self.margin, self.height - self.margin),
        )
    }

    /// Left, right, top and bottom walls. Side walls face the playable area
    /// directly; the top and bottom walls sit `goal_depth` behind the goal
    /// lines and form the back of the goal mouths.
    pub fn walls(&self) -> [Rect; 4] {
        let t = self.wall_thickness;
        let m = self.margin;
        let (w, h) = (self.width, self.height);
        let top_face = m - self.goal_depth;
        let bottom_face = h - m + self.goal_depth;
        let (outer_left, outer_right) = (m - t, w - m + t);
        [
            Rect::from_corners(
                Vec2::new(outer_left, top_face - t),
                Vec2::new(m, bottom_face + t),
            ),
            Rect::from_corners(
                Vec2::new(w - m, top_face - t),
                Vec2::new(outer_right, bottom_face + t),
            ),
            Rect::from_corners(
                Vec2::new(outer_left, top_face - t),
                Vec2::new(outer_right, top_face),
            ),
            Rect::from_corners(
                Vec2::new(outer_left, bottom_face),
                Vec2::new(outer_right, bottom_face + t),
            ),
        ]
    }

    /// Two posts per end covering the goal line except the gap; each is
    /// `POST_THICKNESS` thick with its center line `POST_INSET` inside the boundary.
    pub fn posts(&self) -> [Rect; 4] {
        let (gap_left, gap_right) = self.goal_gap();
        let half_t = POST_THICKNESS / 2.0;
        let top_y = self.margin + POST_INSET;
        let bottom_y = self.height - self.margin - POST_INSET;
        let left = self.margin;
        let right = self.width - self.margin;
        let post = |x0: f32, x1: f32, y: f32| {
            Rect::from_corners(Vec2::new(x0, y - half_t), Vec2::new(x1, y + half_t))
        };
        [
            post(left, gap_left, top_y),
            post(gap_right, right, top_y),
            post(left, gap_left, bottom_y),
            post(gap_right, right, bottom_y),
        ]
    }

    /// Side plates of the two goal mouths, from the back wall to the posts.
    /// Their inner faces are flush with the gap edges.
    pub fn goal_mouths(&self) -> [Rect; 4] {
        let (gap_left, gap_right) = self.goal_gap();
        let t = POST_THICKNESS;
        let top_back = self.margin - self.goal_depth;
        let top_front = self.margin + POST_INSET + t / 2.0;
        let bottom_front = self.height - self.margin - POST_INSET - t / 2.0;
        let bottom_back = self.height - self.margin + self.goal_depth;
        let plate = |x0: f32, y0: f32, y1: f32| {
            Rect::from_corners(Vec2::new(x0, y0), Vec2::new(x0 + t, y1))
        };
        [
            plate(gap_left - t, top_back, top_front),
            plate(gap_right, top_back, top_front),
            plate(gap_left - t, bottom_front, bottom_back),
            plate(gap_right, bottom_front, bottom_back),
        ]
    }

    /// Every static rectangle with the part it belongs to.
    pub fn static_rects(&self) -> impl Iterator<Item = (PitchPart, Rect)> {
        let walls = self.walls().map(|r| (PitchPart::Wall, r));
        let posts = self.posts().map(|r| (PitchPart::Post, r));
        let mouths = self.goal_mouths().map(|r| (PitchPart::GoalMouth, r));
        walls.into_iter().chain(posts).chain(mouths)
    }

    /// Create the fixed bodies. Called once at match setup.
    pub fn spawn(&self, ctx: &mut EngineContext, material: ColliderMaterial) -> Vec<EntityId> {
        let mut ids = Vec::with_capacity(12);
        for (part, rect) in self.static_rects() {
            let id = ctx.next_id();
            let desc = BodyDesc::fixed(ColliderDesc::Cuboid {
                half_width: rect.half_extents.x,
                half_height: rect.half_extents.y,
            })
            .with_position(rect.center);
            ids.push(ctx.spawn_with_body(Entity::new(id).with_tag(part.tag()), desc, material));
        }
        log::info!("Pitch built: {} static bodies, goal gap {:?}", ids.len(), self.goal_gap());
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pitch() -> Pitch {
        Pitch::new(600.0, 900.0, 48.0, 40.0, 160.0, 36.0)
    }

    fn overlaps(a: &Rect, b: &Rect) -> bool {
        let (amin, amax, bmin, bmax) = (a.min(), a.max(), b.min(), b.max());
        amin.x < bmax.x && bmin.x < amax.x && amin.y < bmax.y && bmin.y < amax.y
    }

    #[test]
    fn side_walls_bound_the_playable_width() {
        let p = pitch();
        let [left, right, _, _] = p.walls();
        assert_eq!(left.max().x, 48.0);
        assert_eq!(right.min().x, 552.0);
        assert_eq!(left.half_extents.x * 2.0, 40.0);
    }

    #[test]
    fn end_walls_sit_behind_the_goal_lines() {
        let p = pitch();
        let [_, _, top, bottom] = p.walls();
        assert_eq!(top.max().y, 48.0 - 36.0);
        assert_eq!(bottom.min().y, 900.0 - 48.0 + 36.0);
    }

    #[test]
    fn goal_gap_is_centered() {
        let p = pitch();
        assert_eq!(p.goal_gap(), (220.0, 380.0));
        assert!(p.within_goal_gap(300.0));
        assert!(!p.within_goal_gap(220.0));
        assert!(!p.within_goal_gap(380.0));
    }

    #[test]
    fn posts_cover_goal_line_except_gap() {
        let p = pitch();
        let posts = p.posts();
        for post in &posts {
            assert_eq!(post.half_extents.y * 2.0, POST_THICKNESS);
        }
        // Top end
        assert_eq!(posts[0].center.y, 58.0);
        assert_eq!(posts[0].min().x, 48.0);
        assert_eq!(posts[0].max().x, 220.0);
        assert_eq!(posts[1].min().x, 380.0);
        assert_eq!(posts[1].max().x, 552.0);
        // Bottom end
        assert_eq!(posts[2].center.y, 842.0);
        assert_eq!(posts[3].center.y, 842.0);
    }

    #[test]
    fn goal_mouth_leaves_the_gap_open() {
        let p = pitch();
        let (gap_left, gap_right) = p.goal_gap();
        let mouths = p.goal_mouths();
        assert_eq!(mouths[0].max().x, gap_left);
        assert_eq!(mouths[1].min().x, gap_right);
        // Nothing static inside the top goal mouth opening.
        let opening = Rect::from_corners(
            Vec2::new(gap_left, 48.0 - 36.0),
            Vec2::new(gap_right, 48.0 + POST_INSET),
        );
        for (part, rect) in p.static_rects() {
            assert!(!overlaps(&rect, &opening), "{:?} {:?} blocks the goal mouth", part, rect);
        }
    }

    #[test]
    fn center_and_playable_area() {
        let p = pitch();
        assert_eq!(p.center(), Vec2::new(300.0, 450.0));
        let play = p.playable();
        assert_eq!(play.min(), Vec2::new(48.0, 48.0));
        assert_eq!(play.max(), Vec2::new(552.0, 852.0));
    }

    #[test]
    fn spawn_creates_twelve_fixed_bodies() {
        let p = pitch();
        let mut ctx = EngineContext::new();
        let ids = p.spawn(&mut ctx, ColliderMaterial::default());
        assert_eq!(ids.len(), 12);
        assert_eq!(ctx.physics.body_count(), 12);
        assert_eq!(ctx.scene.find_all_by_tag("post").len(), 4);
        assert_eq!(ctx.scene.find_all_by_tag("wall").len(), 4);
    }
}
