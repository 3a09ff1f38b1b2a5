//! 2D painting surface over the overlay's raw RGBA texture.
//!
//! [`HudCanvas`] implements [`DrawTarget`] so the standard
//! `embedded_graphics` primitives (circle, polyline, text) render straight
//! into the overlay texture. Out-of-bounds pixels are clipped silently;
//! drawing can never fail or panic.
//!
//! # Painter Transform
//!
//! The steering indicator is drawn rotated about the wheel center, then the
//! rotation is undone before any further drawing. The canvas therefore
//! carries a minimal painter-style transform: an accumulated rotation (in
//! degrees) and a translation (in texture coordinates, unaffected by the
//! rotation). Geometry is mapped explicitly through [`HudCanvas::map_point`]
//! before being handed to a primitive; the [`DrawTarget`] itself writes raw
//! texture coordinates.
//!
//! Because translation and rotation accumulate additively, undoing a step
//! with its exact negation restores the values to exactly zero (IEEE 754
//! guarantees `x + (-x) == 0` for finite `x`). The draw path asserts
//! [`HudCanvas::transform_is_identity`] before and after each frame's
//! indicator pass, so a missing "undo" is caught in debug builds instead of
//! leaking rotated geometry into later frames.

use core::convert::Infallible;

use embedded_graphics::Pixel;
use embedded_graphics::prelude::*;

use crate::color::Rgba;

/// Drawing surface borrowed from an overlay texture for one frame.
pub struct HudCanvas<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
    rotation_deg: f32,
    translation: (f32, f32),
}

impl<'a> HudCanvas<'a> {
    /// Wrap a raw RGBA8888 buffer of `width * height` texels.
    pub fn new(frame: &'a mut [u8], width: u32, height: u32) -> Self {
        debug_assert_eq!(
            frame.len(),
            (width * height * 4) as usize,
            "texture buffer size must match dimensions"
        );
        Self {
            frame,
            width,
            height,
            rotation_deg: 0.0,
            translation: (0.0, 0.0),
        }
    }

    /// Overwrite every texel, including the alpha byte.
    pub fn fill(&mut self, color: Rgba) {
        for texel in self.frame.chunks_exact_mut(4) {
            texel.copy_from_slice(&[color.r, color.g, color.b, color.a]);
        }
    }

    /// Read back a texel. `None` outside the texture. Intended for the
    /// compositor and for tests; the draw path never reads.
    pub fn pixel(&self, point: Point) -> Option<Rgba> {
        if point.x < 0 || point.y < 0 || point.x as u32 >= self.width || point.y as u32 >= self.height {
            return None;
        }
        let idx = ((point.y as u32 * self.width + point.x as u32) * 4) as usize;
        Some(Rgba::new(
            self.frame[idx],
            self.frame[idx + 1],
            self.frame[idx + 2],
            self.frame[idx + 3],
        ))
    }

    // -------------------------------------------------------------------------
    // Painter Transform
    // -------------------------------------------------------------------------

    /// Shift the drawing origin by `(dx, dy)` texture pixels.
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.translation.0 += dx;
        self.translation.1 += dy;
    }

    /// Accumulate a rotation about the drawing origin.
    ///
    /// Positive angles rotate clockwise on screen (Y grows downward), so the
    /// steering indicator is drawn with the negated steering angle to turn
    /// counter-clockwise for a left-steering command.
    pub fn rotate_deg(&mut self, degrees: f32) {
        self.rotation_deg += degrees;
    }

    /// True when no rotation or translation is in effect.
    pub fn transform_is_identity(&self) -> bool {
        self.rotation_deg == 0.0 && self.translation == (0.0, 0.0)
    }

    /// Map a point through the current transform: rotation about the origin,
    /// then translation.
    pub fn map_point(&self, p: Point) -> Point {
        let theta = self.rotation_deg.to_radians();
        let (sin, cos) = theta.sin_cos();
        let (x, y) = (p.x as f32, p.y as f32);
        let rx = x * cos - y * sin;
        let ry = x * sin + y * cos;
        Point::new(
            (rx + self.translation.0).round() as i32,
            (ry + self.translation.1).round() as i32,
        )
    }
}

impl OriginDimensions for HudCanvas<'_> {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for HudCanvas<'_> {
    type Color = Rgba;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            // Clip instead of erroring; primitives may overhang the texture
            if point.x < 0 || point.y < 0 || point.x as u32 >= self.width || point.y as u32 >= self.height {
                continue;
            }
            let idx = ((point.y as u32 * self.width + point.x as u32) * 4) as usize;
            self.frame[idx..idx + 4].copy_from_slice(&[color.r, color.g, color.b, color.a]);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::primitives::{Line, PrimitiveStyle};

    use super::*;
    use crate::color::{BLACK, CYAN, TRANSPARENT};

    fn buffer(width: u32, height: u32) -> Vec<u8> {
        vec![0u8; (width * height * 4) as usize]
    }

    #[test]
    fn test_fill_writes_alpha_byte() {
        let mut frame = buffer(4, 4);
        let mut canvas = HudCanvas::new(&mut frame, 4, 4);

        canvas.fill(BLACK.with_alpha(128));

        for texel in frame.chunks_exact(4) {
            assert_eq!(texel, [0, 0, 0, 128], "Every texel should carry the fill alpha");
        }
    }

    #[test]
    fn test_draw_clips_out_of_bounds() {
        let mut frame = buffer(4, 4);
        let mut canvas = HudCanvas::new(&mut frame, 4, 4);

        // Line extends well past the 4x4 texture; must not panic
        Line::new(Point::new(-10, 2), Point::new(20, 2))
            .into_styled(PrimitiveStyle::with_stroke(CYAN, 1))
            .draw(&mut canvas)
            .ok();

        assert_eq!(canvas.pixel(Point::new(0, 2)), Some(CYAN));
        assert_eq!(canvas.pixel(Point::new(3, 2)), Some(CYAN));
        assert_eq!(canvas.pixel(Point::new(20, 2)), None, "Out-of-bounds reads return None");
    }

    #[test]
    fn test_fresh_canvas_has_identity_transform() {
        let mut frame = buffer(2, 2);
        let canvas = HudCanvas::new(&mut frame, 2, 2);

        assert!(canvas.transform_is_identity());
        assert_eq!(canvas.map_point(Point::new(7, -3)), Point::new(7, -3));
    }

    #[test]
    fn test_rotation_round_trip_restores_identity() {
        let mut frame = buffer(2, 2);
        let mut canvas = HudCanvas::new(&mut frame, 2, 2);

        // Same sequence the indicator draw uses: translate to the rotation
        // center, rotate, then undo both with exact negations
        let theta = -0.73_f32.to_degrees();
        canvas.translate(80.0, 80.0);
        canvas.rotate_deg(theta);
        assert!(!canvas.transform_is_identity());

        canvas.rotate_deg(-theta);
        canvas.translate(-80.0, -80.0);
        assert!(canvas.transform_is_identity(), "Negated undo must restore exact identity");
    }

    #[test]
    fn test_map_point_rotates_clockwise() {
        let mut frame = buffer(2, 2);
        let mut canvas = HudCanvas::new(&mut frame, 2, 2);

        // +90 degrees with Y-down screen coordinates: (1, 0) lands at (0, 1)
        canvas.rotate_deg(90.0);
        assert_eq!(canvas.map_point(Point::new(1, 0)), Point::new(0, 1));

        // -90 degrees turns counter-clockwise on screen
        canvas.rotate_deg(-180.0);
        assert_eq!(canvas.map_point(Point::new(1, 0)), Point::new(0, -1));
    }

    #[test]
    fn test_map_point_applies_translation_after_rotation() {
        let mut frame = buffer(2, 2);
        let mut canvas = HudCanvas::new(&mut frame, 2, 2);

        canvas.translate(80.0, 80.0);
        canvas.rotate_deg(-90.0);

        // (-20, -5) rotated by -90: (-5, 20); plus center: (75, 100)
        assert_eq!(canvas.map_point(Point::new(-20, -5)), Point::new(75, 100));
    }

    #[test]
    fn test_new_texture_reads_transparent() {
        let mut frame = buffer(2, 2);
        let canvas = HudCanvas::new(&mut frame, 2, 2);

        assert_eq!(canvas.pixel(Point::zero()), Some(TRANSPARENT));
    }
}
