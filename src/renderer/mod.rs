//! Rendering seam
//!
//! The session hands renderers a background pass, a read-only [`RenderFrame`],
//! and an optional pause overlay. The web build draws with Canvas2D.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

use crate::sim::{Camera, RenderFrame};
use crate::starfield::StarField;

/// Something that can draw a frame
pub trait Renderer {
    /// Clear and paint the background. Runs every frame, paused or not.
    fn draw_background(&mut self, stars: &StarField, camera: &Camera);
    /// Draw every entity relative to the frame's camera
    fn draw_frame(&mut self, frame: &RenderFrame<'_>);
    /// Dim the scene while paused
    fn draw_pause_overlay(&mut self);
}

/// Draws nothing (headless runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw_background(&mut self, _stars: &StarField, _camera: &Camera) {}
    fn draw_frame(&mut self, _frame: &RenderFrame<'_>) {}
    fn draw_pause_overlay(&mut self) {}
}
