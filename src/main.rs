//! Interactive simulator for the control command HUD.
//!
//! Runs the monitor against a fake command publisher and composites its
//! overlay texture into an SDL window, standing in for the 3D host.
//!
//! # Controls
//!
//! | Key | Action |
//! |-----|--------|
//! | Arrow keys | Move the overlay |
//! | `[` / `]` | Decrease / increase opacity |
//! | `U` | Toggle speed unit (km/h <-> m/s) |
//! | `T` | Toggle the command topic (configured <-> empty) |
//! | `E` | Enable / disable the display |
//!
//! Key repeat is ignored to prevent toggle spam when holding keys.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use embedded_graphics::Pixel;
use embedded_graphics::pixelcolor::{Rgb565, Rgb888};
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};

use control_cmd_hud::bus::CommandBus;
use control_cmd_hud::config::FRAME_TIME;
use control_cmd_hud::log_buffer::EventLog;
use control_cmd_hud::monitor::ControlCommandMonitor;
use control_cmd_hud::msg::ControlCommand;
use control_cmd_hud::overlay::OverlayObject;
use control_cmd_hud::plugin::OverlayDisplay;
use control_cmd_hud::properties::SpeedUnit;
use control_cmd_hud::styles::{DEMO_STATUS_STYLE, DEMO_TITLE_STYLE};

const SCREEN_WIDTH: u32 = 480;
const SCREEN_HEIGHT: u32 = 400;

/// Topic the fake publisher and the monitor agree on.
const DEMO_TOPIC: &str = "/control/command/control_cmd";

/// Window background; the overlay is alpha-blended over this.
const BACKGROUND: Rgb888 = Rgb888::new(28, 32, 38);

/// How often the fake publisher emits a command.
const PUBLISH_INTERVAL: Duration = Duration::from_millis(10);

fn main() {
    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("Control Command HUD", &output_settings);

    let bus = Arc::new(CommandBus::new());

    // The monitor starts where the host's saved settings would put it
    let mut monitor = ControlCommandMonitor::new(Arc::clone(&bus));
    monitor.properties.left.set(80);
    monitor.properties.top.set(40);
    monitor.properties.alpha.set(0.8);
    monitor.properties.topic.set(DEMO_TOPIC.to_owned());
    monitor.on_initialize();

    // Fake command publisher: sweeps the wheel and speed sinusoidally
    let running = Arc::new(AtomicBool::new(true));
    let publisher = {
        let bus = Arc::clone(&bus);
        let running = Arc::clone(&running);
        thread::spawn(move || {
            let mut t = 0.0f32;
            while running.load(Ordering::Relaxed) {
                bus.publish(DEMO_TOPIC, ControlCommand {
                    steering_angle: fake_signal(t, -0.6, 0.6, 0.5),
                    linear_velocity: fake_signal(t, 0.0, 25.0, 0.2),
                });
                t += 0.01;
                thread::sleep(PUBLISH_INTERVAL);
            }
        })
    };

    let background = Rgb565::from(BACKGROUND);
    let mut enabled = true;
    let mut event_log = EventLog::new();
    event_log.push("HUD started");

    let mut last_frame = Instant::now();

    'main: loop {
        let frame_start = Instant::now();
        let dt = frame_start.duration_since(last_frame).as_secs_f32();
        last_frame = frame_start;

        // ======================================================================
        // Input
        // ======================================================================

        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => break 'main,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    match keycode {
                        Keycode::Left => {
                            monitor.properties.left.set(monitor.properties.left.get() - 10);
                            monitor.update_left();
                        }
                        Keycode::Right => {
                            monitor.properties.left.set(monitor.properties.left.get() + 10);
                            monitor.update_left();
                        }
                        Keycode::Up => {
                            monitor.properties.top.set(monitor.properties.top.get() - 10);
                            monitor.update_top();
                        }
                        Keycode::Down => {
                            monitor.properties.top.set(monitor.properties.top.get() + 10);
                            monitor.update_top();
                        }
                        Keycode::LeftBracket => {
                            let alpha = (monitor.properties.alpha.get() - 0.1).max(0.0);
                            monitor.properties.alpha.set(alpha);
                            monitor.update_alpha();
                        }
                        Keycode::RightBracket => {
                            let alpha = (monitor.properties.alpha.get() + 0.1).min(1.0);
                            monitor.properties.alpha.set(alpha);
                            monitor.update_alpha();
                        }
                        Keycode::U => {
                            let unit = match monitor.properties.speed_unit.get() {
                                SpeedUnit::KmPerHour => SpeedUnit::MPerSec,
                                SpeedUnit::MPerSec => SpeedUnit::KmPerHour,
                            };
                            monitor.properties.speed_unit.set(unit);
                            monitor.update_speed_unit();
                            event_log.push(unit.label());
                        }
                        Keycode::T => {
                            let topic = if monitor.properties.topic.get().is_empty() {
                                event_log.push("Topic: subscribed");
                                DEMO_TOPIC.to_owned()
                            } else {
                                event_log.push("Topic: cleared");
                                String::new()
                            };
                            monitor.properties.topic.set(topic);
                            monitor.update_topic();
                        }
                        Keycode::E => {
                            enabled = !enabled;
                            if enabled {
                                monitor.on_enable();
                                event_log.push("Display: enabled");
                            } else {
                                monitor.on_disable();
                                event_log.push("Display: disabled");
                            }
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        // ======================================================================
        // Render
        // ======================================================================

        display.clear(background).ok();
        Text::new("Control Command HUD", Point::new(10, 22), DEMO_TITLE_STYLE)
            .draw(&mut display)
            .ok();

        // The host only updates enabled displays
        if enabled {
            monitor.update(dt, dt);
        }
        if let Some(overlay) = monitor.overlay() {
            composite_overlay(&mut display, overlay, background);
        }

        for (i, line) in event_log.iter().enumerate() {
            Text::new(
                line,
                Point::new(10, SCREEN_HEIGHT as i32 - 74 + 10 * i as i32),
                DEMO_STATUS_STYLE,
            )
            .draw(&mut display)
            .ok();
        }
        Text::new(
            "arrows: move  [/]: alpha  U: unit  T: topic  E: enable",
            Point::new(10, SCREEN_HEIGHT as i32 - 6),
            DEMO_STATUS_STYLE,
        )
        .draw(&mut display)
        .ok();

        window.update(&display);

        // Sleep to maintain target frame rate (~50 FPS)
        if let Some(remaining) = FRAME_TIME.checked_sub(frame_start.elapsed()) {
            thread::sleep(remaining);
        }
    }

    running.store(false, Ordering::Relaxed);
    publisher.join().ok();
}

/// Alpha-blend the overlay texture over the window background.
///
/// The simulator display has no readback, so blending assumes the overlay
/// region was just cleared to `background` (which the render pass
/// guarantees).
fn composite_overlay(display: &mut SimulatorDisplay<Rgb565>, overlay: &OverlayObject, background: Rgb565) {
    if !overlay.is_visible() {
        return;
    }
    let origin = overlay.position();
    let size = overlay.texture_size();
    let bg = Rgb888::from(background);

    let pixels = (0..size.height).flat_map(|y| (0..size.width).map(move |x| (x, y))).filter_map(|(x, y)| {
        let texel = overlay.texel(x, y)?;
        if texel.a == 0 {
            return None;
        }
        let blended = Rgb888::new(
            blend_channel(texel.r, bg.r(), texel.a),
            blend_channel(texel.g, bg.g(), texel.a),
            blend_channel(texel.b, bg.b(), texel.a),
        );
        Some(Pixel(
            Point::new(origin.x + x as i32, origin.y + y as i32),
            Rgb565::from(blended),
        ))
    });
    display.draw_iter(pixels).ok();
}

fn blend_channel(src: u8, dst: u8, alpha: u8) -> u8 {
    let a = u16::from(alpha);
    ((u16::from(src) * a + u16::from(dst) * (255 - a)) / 255) as u8
}

/// Generate a sinusoidal signal oscillating between min and max values.
///
/// Used to simulate control commands in demo mode.
///
/// # Parameters
/// - `t`: Time parameter (advances each tick)
/// - `min`: Minimum output value
/// - `max`: Maximum output value
/// - `freq`: Oscillation frequency (higher = faster cycles)
fn fake_signal(t: f32, min: f32, max: f32, freq: f32) -> f32 {
    let normalized = (t * freq).sin().mul_add(0.5, 0.5);
    min + normalized * (max - min)
}
