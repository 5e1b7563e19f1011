//! Obstacle slice geometry
//!
//! An obstacle group is a column split into equal vertical slices. Each slice
//! is an axis-aligned box in the group's depth plane:
//! - center: (x, y) of the slice midpoint
//! - half_extents: (lane_width / 2, height / segments / 2)

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::box_contains;

/// One vertical slice of an obstacle group
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentBox {
    /// Slice index, 0 = bottom
    pub index: u32,
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl SegmentBox {
    /// Slice `index` of a column `height` tall centered on y = 0
    pub fn slice(index: u32, segments: u32, width: f32, height: f32) -> Self {
        let slice_height = height / segments as f32;
        let y = -height / 2.0 + slice_height / 2.0 + index as f32 * slice_height;
        Self {
            index,
            center: Vec2::new(0.0, y),
            half_extents: Vec2::new(width / 2.0, slice_height / 2.0),
        }
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y - self.half_extents.y
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y + self.half_extents.y
    }

    /// Move the slice horizontally (vertical placement is fixed)
    #[inline]
    pub fn set_x(&mut self, x: f32) {
        self.center.x = x;
    }

    /// Inclusive containment of a point in the (x, y) plane
    #[inline]
    pub fn contains_point(&self, point: Vec2) -> bool {
        box_contains(self.center, self.half_extents, point)
    }
}
