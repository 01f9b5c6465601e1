use crossbeam_channel::Receiver;

use super::state::PadState;
use super::{AxisId, AxisProfile, ButtonId, ControllerDevice, PadEvent, PadKind};

/// Full-featured pad: two sticks, two analog triggers, POV hat, complete
/// button set. Every axis and button identifier is live.
pub struct XboxPad {
    state: PadState,
}

impl XboxPad {
    pub fn new(events: Receiver<PadEvent>) -> Self {
        Self {
            state: PadState::new(events),
        }
    }
}

impl ControllerDevice for XboxPad {
    fn kind(&self) -> PadKind {
        PadKind::Xbox
    }

    fn supports_axis(&self, _axis: AxisId) -> bool {
        true
    }

    fn supports_button(&self, _button: ButtonId) -> bool {
        true
    }

    fn axis(&mut self, axis: AxisId) -> f64 {
        self.state.axis(axis)
    }

    fn button(&mut self, button: ButtonId) -> bool {
        self.state.button(button)
    }

    fn set_axis_scale(&mut self, axis: AxisId, factor: f64) {
        self.state.set_scale(axis, factor);
    }

    fn set_axis_deadband(&mut self, axis: AxisId, width: f64) {
        self.state.set_deadband(axis, width);
    }

    fn set_axis_profile(&mut self, axis: AxisId, profile: AxisProfile) {
        self.state.set_profile(axis, profile);
    }

    fn set_slew_limit(&mut self, axis: AxisId, rate: f64) {
        self.state.set_slew_limit(axis, rate);
    }
}
