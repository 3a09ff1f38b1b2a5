//! The control command monitor display.
//!
//! Renders the most recent steering/speed command as a HUD overlay: a cyan
//! steering wheel bezel with a quadrilateral indicator rotated by the
//! commanded steering angle, and a speed readout in the configured unit.
//!
//! The monitor redraws the overlay from scratch every frame. If no command
//! has arrived yet (or the topic was just changed) nothing is drawn and the
//! overlay is not even created, so an unconfigured monitor costs nothing.
//!
//! # Threading
//!
//! Commands arrive on the bus delivery thread while drawing happens on the
//! host's render thread. Everything both threads touch lives in one
//! [`Shared`] block behind a single mutex; the subscription callback only
//! ever overwrites `last_command`, so the critical sections are tiny.

use core::fmt::Write as _;

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Polyline, PrimitiveStyle};
use embedded_graphics::text::Text;

use std::sync::{Arc, Mutex, MutexGuard};

use crate::bus::{CommandBus, Subscriber};
use crate::color::{alpha_to_byte, BLACK, CYAN};
use crate::config::{
    BEZEL_DIAMETER, BEZEL_TOP_LEFT, COMMAND_QUEUE_DEPTH, INDICATOR_QUAD, MPS_TO_KMH,
    OVERLAY_HEIGHT, OVERLAY_WIDTH, SPEED_TEXT_POSITION, WHEEL_CENTER,
};
use crate::msg::ControlCommandStamped;
use crate::overlay::OverlayObject;
use crate::plugin::OverlayDisplay;
use crate::properties::{MonitorProperties, SpeedUnit};
use crate::styles::speed_text_style;

/// State shared between the render thread and the bus delivery thread.
#[derive(Default)]
struct Shared {
    left: i32,
    top: i32,
    alpha: f32,
    speed_unit: SpeedUnit,
    last_command: Option<ControlCommandStamped>,
}

/// HUD overlay display for vehicle control commands.
pub struct ControlCommandMonitor {
    pub properties: MonitorProperties,
    bus: Arc<CommandBus>,
    shared: Arc<Mutex<Shared>>,
    subscription: Option<Subscriber>,
    overlay: Option<OverlayObject>,
}

impl ControlCommandMonitor {
    pub fn new(bus: Arc<CommandBus>) -> Self {
        Self {
            properties: MonitorProperties::default(),
            bus,
            shared: Arc::new(Mutex::new(Shared::default())),
            subscription: None,
            overlay: None,
        }
    }

    // -------------------------------------------------------------------------
    // Property Updates
    // -------------------------------------------------------------------------
    //
    // The host calls one of these after the user edits the matching property;
    // each copies the new value into the shared block for the next frame.

    pub fn update_left(&mut self) {
        let left = self.properties.left.get();
        lock_shared(&self.shared).left = left;
    }

    pub fn update_top(&mut self) {
        let top = self.properties.top.get();
        lock_shared(&self.shared).top = top;
    }

    pub fn update_alpha(&mut self) {
        let alpha = self.properties.alpha.get();
        lock_shared(&self.shared).alpha = alpha;
    }

    pub fn update_speed_unit(&mut self) {
        let unit = self.properties.speed_unit.get();
        lock_shared(&self.shared).speed_unit = unit;
    }

    /// Re-subscribe to the configured topic.
    ///
    /// Always tears down the current subscription and forgets the last
    /// command first, so a stale command from the old topic can never be
    /// drawn under the new one. The empty topic and the bare root `"/"`
    /// (the panel's initial placeholder) leave the monitor unsubscribed.
    pub fn update_topic(&mut self) {
        self.subscription = None;
        lock_shared(&self.shared).last_command = None;

        let topic = self.properties.topic.get();
        if topic.is_empty() || topic == "/" {
            return;
        }

        let shared = Arc::clone(&self.shared);
        self.subscription = Some(self.bus.subscribe(&topic, COMMAND_QUEUE_DEPTH, move |msg| {
            lock_shared(&shared).last_command = Some(msg);
        }));
    }

    // -------------------------------------------------------------------------
    // Drawing
    // -------------------------------------------------------------------------

    fn draw_monitor(&mut self) {
        let (last, left, top, alpha, speed_unit) = {
            let shared = lock_shared(&self.shared);
            let Some(last) = shared.last_command else {
                return;
            };
            (last, shared.left, shared.top, shared.alpha, shared.speed_unit)
        };

        // Lazy creation: the overlay only exists once a command has arrived
        let overlay = self.overlay.get_or_insert_with(|| {
            let mut overlay = OverlayObject::new();
            overlay.show();
            overlay
        });
        overlay.set_dimensions(Size::new(OVERLAY_WIDTH, OVERLAY_HEIGHT));
        overlay.set_position(Point::new(left, top));
        overlay.update_texture_size(Size::new(OVERLAY_WIDTH, OVERLAY_HEIGHT));

        let a = alpha_to_byte(alpha);
        let stroke = PrimitiveStyle::with_stroke(CYAN.with_alpha(a), 1);
        let mut canvas = overlay.buffer();

        canvas.fill(BLACK.with_alpha(a));

        Circle::new(BEZEL_TOP_LEFT, BEZEL_DIAMETER)
            .into_styled(stroke)
            .draw(&mut canvas)
            .ok();

        // Indicator: rotate the quad about the wheel center by the steering
        // angle (negated: positive steering turns counter-clockwise on
        // screen), then restore the transform before the text pass
        debug_assert!(canvas.transform_is_identity());
        canvas.translate(WHEEL_CENTER.x as f32, WHEEL_CENTER.y as f32);
        canvas.rotate_deg(-last.cmd.steering_angle.to_degrees());

        let mut outline = [Point::zero(); 5];
        for (corner, mapped) in INDICATOR_QUAD.iter().zip(outline.iter_mut()) {
            *mapped = canvas.map_point(*corner);
        }
        outline[4] = outline[0];

        canvas.rotate_deg(last.cmd.steering_angle.to_degrees());
        canvas.translate(-(WHEEL_CENTER.x as f32), -(WHEEL_CENTER.y as f32));
        debug_assert!(canvas.transform_is_identity());

        Polyline::new(&outline).into_styled(stroke).draw(&mut canvas).ok();

        let text = format_speed(speed_unit, last.cmd.linear_velocity);
        Text::new(&text, SPEED_TEXT_POSITION, speed_text_style(CYAN.with_alpha(a)))
            .draw(&mut canvas)
            .ok();
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn overlay(&self) -> Option<&OverlayObject> {
        self.overlay.as_ref()
    }

    pub fn last_command(&self) -> Option<ControlCommandStamped> {
        lock_shared(&self.shared).last_command
    }

    pub fn subscription_active(&self) -> bool {
        self.subscription.is_some()
    }
}

impl OverlayDisplay for ControlCommandMonitor {
    fn on_initialize(&mut self) {
        self.update_top();
        self.update_left();
        self.update_alpha();
        self.update_speed_unit();
        self.update_topic();
    }

    fn reset(&mut self) {}

    fn update(&mut self, _wall_dt: f32, _sim_dt: f32) {
        self.draw_monitor();
    }

    fn on_enable(&mut self) {
        if let Some(overlay) = &mut self.overlay {
            overlay.show();
        }
    }

    fn on_disable(&mut self) {
        if let Some(overlay) = &mut self.overlay {
            overlay.hide();
        }
    }
}

/// Format the speed readout line for the given unit.
fn format_speed(unit: SpeedUnit, mps: f32) -> heapless::String<32> {
    let mut text = heapless::String::new();
    match unit {
        SpeedUnit::KmPerHour => write!(text, "Speed : {:.1} km/h", mps * MPS_TO_KMH).ok(),
        SpeedUnit::MPerSec => write!(text, "Speed : {:.1} m/s", mps).ok(),
    };
    text
}

fn lock_shared(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    match shared.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
