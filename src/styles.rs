//! Text and stroke styles.
//!
//! Overlay styles draw in [`Rgba`] with the frame's configured alpha, so
//! they are built per frame by the helper functions. The demo window styles
//! draw in `Rgb565` and are plain constants.

use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_10X20};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use profont::PROFONT_14_POINT;

use crate::color::Rgba;

/// Font for the speed readout.
pub const SPEED_FONT: &MonoFont = &PROFONT_14_POINT;

/// Style for the speed readout at the given (already alpha-scaled) color.
pub fn speed_text_style(color: Rgba) -> MonoTextStyle<'static, Rgba> {
    MonoTextStyle::new(SPEED_FONT, color)
}

// =============================================================================
// Demo Window Styles
// =============================================================================

/// Title line at the top of the demo window.
pub const DEMO_TITLE_STYLE: MonoTextStyle<'static, Rgb565> =
    MonoTextStyle::new(&FONT_10X20, Rgb565::WHITE);

/// Status/help line at the bottom of the demo window.
pub const DEMO_STATUS_STYLE: MonoTextStyle<'static, Rgb565> =
    MonoTextStyle::new(&FONT_6X10, Rgb565::CSS_GRAY);
