//! Screen-space layout for the lane grid
//!
//! Maps `(row, lane)` cells to pixel rectangles so a presentation layer can
//! place the player and obstacles, and cross-check hits with an
//! axis-aligned overlap test.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::sim::Obstacle;

/// Axis-aligned rectangle (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self::new(origin, origin + size)
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Strict overlap; rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmplt(self.max).all()
    }

    /// Shrink by `margin` on every side (never inverts)
    pub fn inset(&self, margin: f32) -> Rect {
        let margin = margin.min(self.size().min_element() * 0.5).max(0.0);
        Rect::new(self.min + Vec2::splat(margin), self.max - Vec2::splat(margin))
    }
}

/// Grid of `lane_count` columns by `grid_height` rows over a viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    pub viewport: Vec2,
    pub lane_count: usize,
    pub grid_height: u32,
    pub player_row: u32,
    /// Gap between a sprite and its cell edge (px)
    pub sprite_margin: f32,
}

impl GridLayout {
    pub fn new(config: &GameConfig, width: f32, height: f32) -> Self {
        Self {
            viewport: Vec2::new(width, height),
            lane_count: config.lane_count.max(1),
            grid_height: config.grid_height.max(1),
            player_row: config.player_row,
            sprite_margin: 4.0,
        }
    }

    pub fn cell_size(&self) -> Vec2 {
        Vec2::new(
            self.viewport.x / self.lane_count as f32,
            self.viewport.y / self.grid_height as f32,
        )
    }

    pub fn cell_rect(&self, row: u32, lane: usize) -> Rect {
        let size = self.cell_size();
        let origin = Vec2::new(lane as f32 * size.x, row as f32 * size.y);
        Rect::from_origin_size(origin, size)
    }

    pub fn player_rect(&self, lane: usize) -> Rect {
        self.cell_rect(self.player_row, lane).inset(self.sprite_margin)
    }

    pub fn obstacle_rect(&self, obstacle: &Obstacle) -> Rect {
        self.cell_rect(obstacle.row, obstacle.column)
            .inset(self.sprite_margin)
    }

    /// Lane under a screen x coordinate (clamped to the grid)
    pub fn lane_at(&self, x: f32) -> usize {
        let lane = (x / self.cell_size().x).floor();
        crate::clamp_lane(lane as i64, self.lane_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> GridLayout {
        GridLayout::new(&GameConfig::default(), 300.0, 700.0)
    }

    #[test]
    fn test_cell_rects_tile_viewport() {
        let layout = layout();
        assert_eq!(layout.cell_size(), Vec2::new(100.0, 50.0));
        let r = layout.cell_rect(2, 1);
        assert_eq!(r.min, Vec2::new(100.0, 100.0));
        assert_eq!(r.max, Vec2::new(200.0, 150.0));
        assert_eq!(r.center(), Vec2::new(150.0, 125.0));
    }

    #[test]
    fn test_edge_contact_is_not_overlap() {
        let a = Rect::from_origin_size(Vec2::ZERO, Vec2::splat(10.0));
        let b = Rect::from_origin_size(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        let c = Rect::from_origin_size(Vec2::new(9.0, 9.0), Vec2::splat(10.0));
        assert!(!a.intersects(&b));
        assert!(a.intersects(&c));
        assert!(c.intersects(&a));
    }

    #[test]
    fn test_sprite_overlap_matches_grid_cell() {
        let layout = layout();
        let mut obstacle = Obstacle::new(1, 1);
        obstacle.row = layout.player_row;
        assert!(layout.obstacle_rect(&obstacle).intersects(&layout.player_rect(1)));
        assert!(!layout.obstacle_rect(&obstacle).intersects(&layout.player_rect(0)));

        obstacle.row -= 1;
        assert!(!layout.obstacle_rect(&obstacle).intersects(&layout.player_rect(1)));
    }

    #[test]
    fn test_lane_at_clamps() {
        let layout = layout();
        assert_eq!(layout.lane_at(-20.0), 0);
        assert_eq!(layout.lane_at(150.0), 1);
        assert_eq!(layout.lane_at(299.0), 2);
        assert_eq!(layout.lane_at(1000.0), 2);
    }

    #[test]
    fn test_inset_never_inverts() {
        let r = Rect::from_origin_size(Vec2::ZERO, Vec2::new(4.0, 2.0));
        let inset = r.inset(10.0);
        assert!(inset.min.cmple(inset.max).all());
        assert!(r.contains_point(Vec2::new(1.0, 1.0)));
        assert!(!r.contains_point(Vec2::new(4.0, 1.0)));
    }
}
