//! RGBA color support for the overlay texture.
//!
//! The host compositor blends the overlay texture over the 3D scene, so the
//! texture carries a real alpha channel. `embedded_graphics` ships RGB color
//! types only; this module adds a straight (non-premultiplied) RGBA8888
//! [`PixelColor`] so the standard primitives and text renderer can draw
//! directly into the overlay buffer.
//!
//! # Alpha Convention
//!
//! The monitor's alpha property is a float in `0.0..=1.0`. Texels store the
//! 8-bit equivalent `round(255 * alpha)`; see [`alpha_to_byte`]. Drawing
//! overwrites texels (source copy) rather than blending, because blending is
//! the compositor's job, not the widget's.

use embedded_graphics::pixelcolor::PixelColor;

/// Straight-alpha RGBA color, 8 bits per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha byte.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

impl PixelColor for Rgba {
    type Raw = ();
}

// =============================================================================
// Named Colors
// =============================================================================

/// Opaque black. The HUD backdrop uses this with the configured alpha.
pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);

/// Opaque cyan. Bezel circle, steering indicator, and speed text.
pub const CYAN: Rgba = Rgba::new(0, 255, 255, 255);

/// Fully transparent. Freshly allocated textures read as this.
pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

// =============================================================================
// Alpha Conversion
// =============================================================================

/// Convert a float opacity in `0.0..=1.0` to an 8-bit alpha byte.
///
/// Out-of-range inputs are clamped before scaling, so a property editor
/// feeding `1.5` or `-0.2` cannot wrap the byte value.
pub fn alpha_to_byte(alpha: f32) -> u8 {
    (255.0 * alpha.clamp(0.0, 1.0)).round() as u8
}
