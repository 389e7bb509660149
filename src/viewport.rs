//! Pixel space to grid space conversion, plus the pan offset the drag
//! gesture accumulates.
//!
//! Pixel coordinates follow the window convention (origin top-left, y down),
//! matching what `Window::cursor_position` delivers. The offset is a pure
//! camera translation; stored cell coordinates are never rebased by panning.

use bevy::math::Vec2;
use bevy::prelude::Resource;
use log::warn;

use crate::grid::CellCoord;

/// Cell edge length bounds in pixels.
pub const MIN_SCALE: u32 = 2;
pub const MAX_SCALE: u32 = 30;

#[derive(Clone, Debug, Resource)]
pub struct Viewport {
    offset: Vec2,
    /// Pixels per cell edge. Always within `MIN_SCALE..=MAX_SCALE`, so the
    /// transform can never divide by zero.
    scale: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 20,
        }
    }
}

impl Viewport {
    pub fn new(scale: u32) -> Self {
        let mut v = Self::default();
        v.set_scale(scale);
        v
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Accumulate a raw pixel delta from a drag gesture.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Change the cell edge length, clamping into the supported range.
    pub fn set_scale(&mut self, scale: u32) {
        let clamped = scale.clamp(MIN_SCALE, MAX_SCALE);
        if clamped != scale {
            warn!("cell scale {scale} out of range, clamped to {clamped}");
        }
        self.scale = clamped;
    }

    /// Grid cell containing the given window pixel.
    ///
    /// Floor division, not truncation: pixel -1 at scale 10 lies in cell -1.
    pub fn cell_at(&self, pixel: Vec2) -> CellCoord {
        let local = pixel - self.offset;
        let scale = self.scale as f32;
        CellCoord::new(
            (local.x / scale).floor() as i32,
            (local.y / scale).floor() as i32,
        )
    }

    /// Top-left pixel of a cell, before the pan offset is applied. Adding
    /// `offset()` yields the on-screen position.
    pub fn cell_origin(&self, coord: CellCoord) -> Vec2 {
        Vec2::new(
            coord.x as f32 * self.scale as f32,
            coord.y as f32 * self.scale as f32,
        )
    }
}
