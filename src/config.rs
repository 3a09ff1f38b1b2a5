//! Fixed overlay layout constants.
//!
//! The HUD uses a fixed 320x320 layout: steering wheel bezel on the left,
//! speed readout to the right of it. Positions are compile-time constants so
//! the per-frame draw path does no layout arithmetic.
//!
//! Only the overlay's screen position and opacity are configurable at
//! runtime (through the host property surface); the layout inside the
//! texture never changes.

use std::time::Duration;

use embedded_graphics::prelude::*;

// =============================================================================
// Overlay Texture Dimensions
// =============================================================================

/// Overlay texture width in pixels.
pub const OVERLAY_WIDTH: u32 = 320;

/// Overlay texture height in pixels.
pub const OVERLAY_HEIGHT: u32 = 320;

// =============================================================================
// Steering Wheel Layout
// =============================================================================

/// Top-left corner of the bezel circle's bounding box.
pub const BEZEL_TOP_LEFT: Point = Point::new(40, 40);

/// Diameter of the bezel circle in pixels.
pub const BEZEL_DIAMETER: u32 = 80;

/// Rotation center of the steering indicator. Also the bezel center.
pub const WHEEL_CENTER: Point = Point::new(80, 80);

/// Indicator quadrilateral, in pixels relative to [`WHEEL_CENTER`].
///
/// A trapezoid pointing up at zero steering angle; listed in drawing order
/// (top-left, top-right, bottom-right, bottom-left).
pub const INDICATOR_QUAD: [Point; 4] = [
    Point::new(-20, -5),
    Point::new(20, -5),
    Point::new(10, 15),
    Point::new(-10, 15),
];

// =============================================================================
// Speed Readout
// =============================================================================

/// Baseline position of the speed text inside the overlay.
pub const SPEED_TEXT_POSITION: Point = Point::new(140, 80);

/// Meters-per-second to kilometers-per-hour conversion factor.
pub const MPS_TO_KMH: f32 = 3.6;

// =============================================================================
// Subscription Configuration
// =============================================================================

/// Queue depth for the command subscription.
///
/// Depth 1 with drop-oldest overflow means only the newest unconsumed
/// command survives; the monitor never falls behind a fast publisher.
pub const COMMAND_QUEUE_DEPTH: usize = 1;

// =============================================================================
// Timing Configuration
// =============================================================================

/// Target frame time of the simulator host (~50 FPS).
pub const FRAME_TIME: Duration = Duration::from_millis(20);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_center_matches_bezel() {
        // The indicator must rotate about the bezel's geometric center
        let half = (BEZEL_DIAMETER / 2) as i32;
        assert_eq!(BEZEL_TOP_LEFT.x + half, WHEEL_CENTER.x, "Bezel center X should equal wheel center");
        assert_eq!(BEZEL_TOP_LEFT.y + half, WHEEL_CENTER.y, "Bezel center Y should equal wheel center");
    }

    #[test]
    fn test_indicator_quad_is_symmetric() {
        // Mirror symmetry about the vertical axis keeps the arrow visually
        // centered at zero steering angle
        assert_eq!(INDICATOR_QUAD[0].x, -INDICATOR_QUAD[1].x);
        assert_eq!(INDICATOR_QUAD[0].y, INDICATOR_QUAD[1].y);
        assert_eq!(INDICATOR_QUAD[2].x, -INDICATOR_QUAD[3].x);
        assert_eq!(INDICATOR_QUAD[2].y, INDICATOR_QUAD[3].y);
    }

    #[test]
    fn test_layout_fits_texture() {
        let bezel_right = BEZEL_TOP_LEFT.x + BEZEL_DIAMETER as i32;
        let bezel_bottom = BEZEL_TOP_LEFT.y + BEZEL_DIAMETER as i32;

        assert!(bezel_right <= OVERLAY_WIDTH as i32, "Bezel should fit horizontally");
        assert!(bezel_bottom <= OVERLAY_HEIGHT as i32, "Bezel should fit vertically");
        assert!(
            SPEED_TEXT_POSITION.x < OVERLAY_WIDTH as i32,
            "Speed text should start inside the texture"
        );
    }

    #[test]
    fn test_unit_conversion_factor() {
        // 1 m/s = 3.6 km/h
        assert!((MPS_TO_KMH - 3.6).abs() < f32::EPSILON);
    }
}
