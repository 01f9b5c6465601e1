mod conditioner;
mod hid;
mod state;
mod xbox;

pub use conditioner::AxisConditioner;
pub use hid::HidPad;
pub use xbox::XboxPad;

use serde::Serialize;

/// Capability tag a pad reports at probe time.
///
/// The binding scheme checks this before creating any binding for a port:
/// rows that expect a full layout never bind against a reduced pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PadKind {
    /// Full-featured layout: two sticks, two analog triggers, POV hat,
    /// complete button set.
    Xbox,
    /// Reduced first-person/HID layout: stick plus twist, no analog
    /// triggers, no POV.
    Hid,
}

/// Analog input channels, reported in -1.0..=1.0 (triggers 0.0..=1.0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AxisId {
    LeftStickX,
    LeftStickY,
    RightStickX,
    RightStickY,
    LeftTrigger,
    RightTrigger,
}

impl AxisId {
    pub const ALL: [AxisId; 6] = [
        Self::LeftStickX,
        Self::LeftStickY,
        Self::RightStickX,
        Self::RightStickY,
        Self::LeftTrigger,
        Self::RightTrigger,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Everything readable as a pressed/not-pressed state: face buttons,
/// bumpers, thumb clicks, the four POV directions, and the analog triggers
/// past their pull threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ButtonId {
    A,
    B,
    X,
    Y,
    LeftBumper,
    RightBumper,
    Back,
    Start,
    LeftThumb,
    RightThumb,
    PovUp,
    PovRight,
    PovDown,
    PovLeft,
    LeftTriggerPull,
    RightTriggerPull,
}

impl ButtonId {
    pub const COUNT: usize = 16;

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Response curve applied to an axis before scaling. Squared and cubed
/// keep the sign and flatten the center of the stick for fine control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AxisProfile {
    #[default]
    Linear,
    Squared,
    Cubed,
}

/// One state change delivered from the probe to the pad that owns the port.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PadEvent {
    Axis { axis: AxisId, value: f64 },
    Button { button: ButtonId, pressed: bool },
    Disconnected,
}

/// One physical controller occupying a port.
///
/// Axis reads return the conditioned value (deadband removal, response
/// profile, scale, slew limiting, in that order). Reads of inputs the pad
/// does not carry return neutral values rather than failing; `supports_axis`
/// and `supports_button` exist so the binding pass can tell the difference.
pub trait ControllerDevice {
    fn kind(&self) -> PadKind;

    fn supports_axis(&self, axis: AxisId) -> bool;
    fn supports_button(&self, button: ButtonId) -> bool;

    fn axis(&mut self, axis: AxisId) -> f64;
    fn button(&mut self, button: ButtonId) -> bool;

    fn set_axis_scale(&mut self, axis: AxisId, factor: f64);
    fn set_axis_deadband(&mut self, axis: AxisId, width: f64);
    fn set_axis_profile(&mut self, axis: AxisId, profile: AxisProfile);
    fn set_slew_limit(&mut self, axis: AxisId, rate: f64);
}
