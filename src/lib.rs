// Crate-level lints: Allow common graphics patterns that pedantic lints flag
#![allow(clippy::cast_possible_truncation)] // Intentional f32->i32 casts for pixel math
#![allow(clippy::cast_precision_loss)] // u32/i32->f32 in graphics calculations
#![allow(clippy::cast_sign_loss)] // i32->u32 where we know sign is positive

//! Control command HUD overlay for 3D visualization hosts.
//!
//! Displays the most recent vehicle control command (steering angle and
//! speed) as a 2D overlay composited over the visualized scene:
//!
//! - A circular steering wheel bezel with a quadrilateral indicator rotated
//!   by the commanded steering angle
//! - A speed readout in km/h or m/s, selectable at runtime
//!
//! The monitor is driven through the standard display lifecycle
//! ([`plugin::OverlayDisplay`]) and configured through a small property
//! surface ([`properties::MonitorProperties`]): overlay position, opacity,
//! speed unit, and the command topic to subscribe to.
//!
//! Commands arrive over an in-process topic bus ([`bus::CommandBus`]) with a
//! depth-1 drop-oldest subscription, so the HUD always shows the newest
//! command regardless of publish rate. Rendering happens into a
//! host-managed RGBA texture ([`overlay::OverlayObject`]) through an
//! `embedded_graphics` draw target ([`canvas::HudCanvas`]).

pub mod bus;
pub mod canvas;
pub mod color;
pub mod config;
pub mod log_buffer;
pub mod monitor;
pub mod msg;
pub mod overlay;
pub mod plugin;
pub mod properties;
pub mod styles;
