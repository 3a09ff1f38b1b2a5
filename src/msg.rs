//! Vehicle control command messages delivered over the command bus.
//!
//! These mirror the stamped steering/speed command records published by the
//! vehicle control stack. The monitor trusts the transport's type system and
//! performs no validation of its own: whatever arrives is stored wholesale
//! and drawn on the next frame.

use std::time::Instant;

/// Steering and speed command for the vehicle.
///
/// Units follow the control stack convention:
/// - `steering_angle` in radians, positive turning left
/// - `linear_velocity` in meters per second
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlCommand {
    /// Commanded steering angle in radians.
    pub steering_angle: f32,
    /// Commanded forward speed in meters per second.
    pub linear_velocity: f32,
}

/// A control command together with its receipt timestamp.
///
/// The stamp is applied by the bus at publish time, so subscribers can tell
/// how fresh the most recent command is without trusting publisher clocks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlCommandStamped {
    /// When the bus accepted the message.
    pub stamp: Instant,
    /// The command payload.
    pub cmd: ControlCommand,
}

impl ControlCommandStamped {
    /// Stamp a command with the current time.
    pub fn now(cmd: ControlCommand) -> Self {
        Self { stamp: Instant::now(), cmd }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stamped_preserves_payload() {
        let cmd = ControlCommand {
            steering_angle: 0.25,
            linear_velocity: 13.9,
        };
        let stamped = ControlCommandStamped::now(cmd);

        assert_eq!(stamped.cmd, cmd, "Payload should be stored unchanged");
    }

    #[test]
    fn test_stamps_are_monotonic() {
        let cmd = ControlCommand {
            steering_angle: 0.0,
            linear_velocity: 0.0,
        };
        let first = ControlCommandStamped::now(cmd);
        let second = ControlCommandStamped::now(cmd);

        assert!(second.stamp >= first.stamp, "Later stamp should not precede earlier one");
    }
}
