use crossbeam_channel::Receiver;

use super::state::PadState;
use super::{AxisId, AxisProfile, ButtonId, ControllerDevice, PadEvent, PadKind};

/// Reduced first-person/HID pad: a stick with twist, no analog triggers, no
/// POV hat, and a trimmed button set. Unsupported inputs read as neutral.
pub struct HidPad {
    state: PadState,
}

impl HidPad {
    pub fn new(events: Receiver<PadEvent>) -> Self {
        Self {
            state: PadState::new(events),
        }
    }
}

impl ControllerDevice for HidPad {
    fn kind(&self) -> PadKind {
        PadKind::Hid
    }

    fn supports_axis(&self, axis: AxisId) -> bool {
        matches!(
            axis,
            AxisId::LeftStickX | AxisId::LeftStickY | AxisId::RightStickX
        )
    }

    fn supports_button(&self, button: ButtonId) -> bool {
        matches!(
            button,
            ButtonId::A
                | ButtonId::B
                | ButtonId::X
                | ButtonId::Y
                | ButtonId::LeftBumper
                | ButtonId::RightBumper
                | ButtonId::Back
                | ButtonId::Start
        )
    }

    fn axis(&mut self, axis: AxisId) -> f64 {
        if !self.supports_axis(axis) {
            return 0.0;
        }
        self.state.axis(axis)
    }

    fn button(&mut self, button: ButtonId) -> bool {
        if !self.supports_button(button) {
            return false;
        }
        self.state.button(button)
    }

    fn set_axis_scale(&mut self, axis: AxisId, factor: f64) {
        if self.supports_axis(axis) {
            self.state.set_scale(axis, factor);
        }
    }

    fn set_axis_deadband(&mut self, axis: AxisId, width: f64) {
        if self.supports_axis(axis) {
            self.state.set_deadband(axis, width);
        }
    }

    fn set_axis_profile(&mut self, axis: AxisId, profile: AxisProfile) {
        if self.supports_axis(axis) {
            self.state.set_profile(axis, profile);
        }
    }

    fn set_slew_limit(&mut self, axis: AxisId, rate: f64) {
        if self.supports_axis(axis) {
            self.state.set_slew_limit(axis, rate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::PadEvent;
    use crossbeam_channel::unbounded;

    #[test]
    fn unsupported_inputs_read_neutral() {
        let (tx, rx) = unbounded();
        let mut pad = HidPad::new(rx);

        // Even if the probe somehow delivers trigger data, the reduced pad
        // does not expose it
        tx.send(PadEvent::Axis { axis: AxisId::RightTrigger, value: 1.0 })
            .unwrap();
        tx.send(PadEvent::Button { button: ButtonId::PovUp, pressed: true })
            .unwrap();

        assert_eq!(pad.axis(AxisId::RightTrigger), 0.0);
        assert!(!pad.button(ButtonId::PovUp));
    }

    #[test]
    fn supported_inputs_pass_through() {
        let (tx, rx) = unbounded();
        let mut pad = HidPad::new(rx);

        tx.send(PadEvent::Axis { axis: AxisId::LeftStickX, value: -0.5 })
            .unwrap();
        tx.send(PadEvent::Button { button: ButtonId::B, pressed: true })
            .unwrap();

        assert_eq!(pad.kind(), PadKind::Hid);
        assert_eq!(pad.axis(AxisId::LeftStickX), -0.5);
        assert!(pad.button(ButtonId::B));
    }
}
