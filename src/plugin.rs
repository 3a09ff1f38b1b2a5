//! Display plugin lifecycle.
//!
//! The host drives every overlay display through the same lifecycle:
//! initialize once, update every frame, enable/disable as the user toggles
//! the display, and reset when the visualized session restarts.

/// Lifecycle hooks the display host invokes on an overlay display.
pub trait OverlayDisplay {
    /// Called once after construction, before the first frame. Property
    /// values are already loaded; apply them all here.
    fn on_initialize(&mut self);

    /// Called when the visualized session restarts.
    fn reset(&mut self);

    /// Called once per frame with wall-clock and session-clock deltas in
    /// seconds.
    fn update(&mut self, wall_dt: f32, sim_dt: f32);

    /// Called when the user enables the display.
    fn on_enable(&mut self);

    /// Called when the user disables the display.
    fn on_disable(&mut self);
}
