//! Runtime-editable monitor settings.
//!
//! The display host exposes each property in its settings panel with a label
//! and a tooltip, and calls back into the monitor whenever the user edits a
//! value. [`MonitorProperties`] groups the five settings the monitor offers;
//! [`Property`] pairs each value with its panel metadata.

/// A single editable setting with its panel label and tooltip.
#[derive(Debug)]
pub struct Property<T> {
    label: &'static str,
    description: &'static str,
    value: T,
}

impl<T: Clone> Property<T> {
    pub fn new(label: &'static str, description: &'static str, value: T) -> Self {
        Self { label, description, value }
    }

    pub fn get(&self) -> T {
        self.value.clone()
    }

    pub fn set(&mut self, value: T) {
        self.value = value;
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn description(&self) -> &'static str {
        self.description
    }
}

/// Display unit for the speed readout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SpeedUnit {
    #[default]
    KmPerHour,
    MPerSec,
}

impl SpeedUnit {
    /// The selectable options, in panel order.
    pub const OPTIONS: [SpeedUnit; 2] = [SpeedUnit::KmPerHour, SpeedUnit::MPerSec];

    /// The unit suffix shown in the readout and the settings panel.
    pub fn label(self) -> &'static str {
        match self {
            SpeedUnit::KmPerHour => "km/h",
            SpeedUnit::MPerSec => "m/s",
        }
    }
}

/// The monitor's full property surface.
#[derive(Debug)]
pub struct MonitorProperties {
    pub left: Property<i32>,
    pub top: Property<i32>,
    pub alpha: Property<f32>,
    pub speed_unit: Property<SpeedUnit>,
    pub topic: Property<String>,
}

impl Default for MonitorProperties {
    fn default() -> Self {
        Self {
            left: Property::new("Left position", "Left position of the monitor.", 0),
            top: Property::new("Top position", "Top position of the monitor.", 0),
            alpha: Property::new("Alpha", "alpha of the monitor.", 0.0),
            speed_unit: Property::new("Speed Unit", "Unit of the speed", SpeedUnit::KmPerHour),
            topic: Property::new(
                "Topic",
                "The topic where the control command is published.",
                String::new(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_set_get_round_trip() {
        let mut prop = Property::new("Alpha", "alpha of the monitor.", 0.0_f32);

        prop.set(0.8);

        assert_eq!(prop.get(), 0.8);
        assert_eq!(prop.label(), "Alpha");
    }

    #[test]
    fn test_defaults_match_panel_contract() {
        let props = MonitorProperties::default();

        assert_eq!(props.left.get(), 0);
        assert_eq!(props.top.get(), 0);
        assert_eq!(props.alpha.get(), 0.0, "Monitor starts fully transparent");
        assert_eq!(props.speed_unit.get(), SpeedUnit::KmPerHour);
        assert!(props.topic.get().is_empty(), "No topic configured by default");
    }

    #[test]
    fn test_speed_unit_labels() {
        assert_eq!(SpeedUnit::KmPerHour.label(), "km/h");
        assert_eq!(SpeedUnit::MPerSec.label(), "m/s");
        assert_eq!(SpeedUnit::OPTIONS.len(), 2);
    }
}
