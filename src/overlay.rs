//! Host-managed overlay texture object.
//!
//! The display host owns a set of named overlay objects composited over the
//! 3D scene. Each object carries a screen rectangle (position + dimensions),
//! a visibility flag, and an RGBA texture the widget paints into. Names must
//! be unique for the lifetime of the process, so creation draws from a
//! process-wide monotonic counter.

use std::sync::atomic::{AtomicUsize, Ordering};

use embedded_graphics::prelude::*;

use crate::canvas::HudCanvas;
use crate::color::Rgba;

static OVERLAY_COUNT: AtomicUsize = AtomicUsize::new(0);

/// A named overlay texture registered with the display host.
pub struct OverlayObject {
    name: String,
    visible: bool,
    dimensions: Size,
    position: Point,
    texture: Vec<u8>,
    texture_size: Size,
}

impl OverlayObject {
    /// Create a hidden overlay with a process-unique name.
    ///
    /// Names follow the pattern `ControlCommandMonitorObject<n>` with `n`
    /// strictly increasing, so two monitor instances (or one instance
    /// re-created after a reset) never collide in the host's registry.
    pub fn new() -> Self {
        let n = OVERLAY_COUNT.fetch_add(1, Ordering::Relaxed);
        Self {
            name: format!("ControlCommandMonitorObject{n}"),
            visible: false,
            dimensions: Size::zero(),
            position: Point::zero(),
            texture: Vec::new(),
            texture_size: Size::zero(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // -------------------------------------------------------------------------
    // Visibility
    // -------------------------------------------------------------------------

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    // -------------------------------------------------------------------------
    // Screen Rectangle
    // -------------------------------------------------------------------------

    /// Set the on-screen size of the composited overlay.
    pub fn set_dimensions(&mut self, dimensions: Size) {
        self.dimensions = dimensions;
    }

    pub fn dimensions(&self) -> Size {
        self.dimensions
    }

    /// Set the top-left screen position of the composited overlay.
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn position(&self) -> Point {
        self.position
    }

    // -------------------------------------------------------------------------
    // Texture
    // -------------------------------------------------------------------------

    /// Ensure the backing texture matches `size`, reallocating only when the
    /// size actually changed. A fresh texture is zeroed (fully transparent).
    pub fn update_texture_size(&mut self, size: Size) {
        if self.texture_size == size {
            return;
        }
        self.texture = vec![0u8; (size.width * size.height * 4) as usize];
        self.texture_size = size;
    }

    pub fn texture_size(&self) -> Size {
        self.texture_size
    }

    /// Borrow the texture as a drawing surface for one frame.
    pub fn buffer(&mut self) -> HudCanvas<'_> {
        HudCanvas::new(&mut self.texture, self.texture_size.width, self.texture_size.height)
    }

    /// Raw RGBA8888 texture bytes, row-major.
    pub fn texture(&self) -> &[u8] {
        &self.texture
    }

    /// Read back a single texel. `None` outside the texture.
    pub fn texel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.texture_size.width || y >= self.texture_size.height {
            return None;
        }
        let idx = ((y * self.texture_size.width + x) * 4) as usize;
        Some(Rgba::new(
            self.texture[idx],
            self.texture[idx + 1],
            self.texture[idx + 2],
            self.texture[idx + 3],
        ))
    }
}

impl Default for OverlayObject {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_unique_and_monotonic() {
        let first = OverlayObject::new();
        let second = OverlayObject::new();

        assert_ne!(first.name(), second.name(), "Names must be process-unique");
        assert!(first.name().starts_with("ControlCommandMonitorObject"));

        let a: usize = first.name()["ControlCommandMonitorObject".len()..].parse().unwrap();
        let b: usize = second.name()["ControlCommandMonitorObject".len()..].parse().unwrap();
        assert!(b > a, "Counter should be strictly increasing");
    }

    #[test]
    fn test_new_overlay_is_hidden() {
        let overlay = OverlayObject::new();

        assert!(!overlay.is_visible(), "Overlays start hidden until first draw");
    }

    #[test]
    fn test_texture_reallocates_on_size_change() {
        let mut overlay = OverlayObject::new();

        overlay.update_texture_size(Size::new(320, 320));
        assert_eq!(overlay.texture().len(), 320 * 320 * 4);

        overlay.update_texture_size(Size::new(16, 8));
        assert_eq!(overlay.texture().len(), 16 * 8 * 4);
        assert!(overlay.texture().iter().all(|&b| b == 0), "Fresh texture should be transparent");
    }

    #[test]
    fn test_texture_update_is_idempotent() {
        let mut overlay = OverlayObject::new();

        overlay.update_texture_size(Size::new(4, 4));
        overlay.buffer().fill(crate::color::CYAN);

        // Same size again: contents must survive
        overlay.update_texture_size(Size::new(4, 4));
        assert_eq!(overlay.texel(0, 0), Some(crate::color::CYAN), "Unchanged size should not clear the texture");
    }

    #[test]
    fn test_screen_rectangle_setters() {
        let mut overlay = OverlayObject::new();

        overlay.set_position(Point::new(25, 40));
        overlay.set_dimensions(Size::new(320, 320));

        assert_eq!(overlay.position(), Point::new(25, 40));
        assert_eq!(overlay.dimensions(), Size::new(320, 320));
    }
}
