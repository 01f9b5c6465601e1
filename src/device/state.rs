use crossbeam_channel::Receiver;

use super::{AxisConditioner, AxisId, AxisProfile, ButtonId, PadEvent};

/// Analog trigger deflection treated as a button press past this point.
const TRIGGER_PULL_THRESHOLD: f64 = 0.5;

/// Shared plumbing behind both pad variants: cached input state fed by the
/// probe's event channel, plus one conditioner per axis.
///
/// Events are drained with `try_recv` at the top of every read, so a read is
/// never blocking and always sees the latest delivered state.
pub(super) struct PadState {
    events: Receiver<PadEvent>,
    axes: [f64; AxisId::COUNT],
    buttons: [bool; ButtonId::COUNT],
    conditioners: [AxisConditioner; AxisId::COUNT],
}

impl PadState {
    pub(super) fn new(events: Receiver<PadEvent>) -> Self {
        Self {
            events,
            axes: [0.0; AxisId::COUNT],
            buttons: [false; ButtonId::COUNT],
            conditioners: std::array::from_fn(|_| AxisConditioner::default()),
        }
    }

    fn pump(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                PadEvent::Axis { axis, value } => {
                    self.axes[axis.index()] = value.clamp(-1.0, 1.0);
                }
                PadEvent::Button { button, pressed } => {
                    self.buttons[button.index()] = pressed;
                }
                PadEvent::Disconnected => {
                    // Neutralize everything so stale inputs can't keep
                    // driving the robot
                    self.axes = [0.0; AxisId::COUNT];
                    self.buttons = [false; ButtonId::COUNT];
                    log::warn!("controller disconnected, inputs neutralized");
                }
            }
        }
    }

    pub(super) fn axis(&mut self, axis: AxisId) -> f64 {
        self.pump();
        let raw = self.axes[axis.index()];
        self.conditioners[axis.index()].apply(raw)
    }

    pub(super) fn button(&mut self, button: ButtonId) -> bool {
        self.pump();
        match button {
            ButtonId::LeftTriggerPull => {
                self.axes[AxisId::LeftTrigger.index()] > TRIGGER_PULL_THRESHOLD
            }
            ButtonId::RightTriggerPull => {
                self.axes[AxisId::RightTrigger.index()] > TRIGGER_PULL_THRESHOLD
            }
            _ => self.buttons[button.index()],
        }
    }

    pub(super) fn set_scale(&mut self, axis: AxisId, factor: f64) {
        self.conditioners[axis.index()].set_scale(factor);
    }

    pub(super) fn set_deadband(&mut self, axis: AxisId, width: f64) {
        self.conditioners[axis.index()].set_deadband(width);
    }

    pub(super) fn set_profile(&mut self, axis: AxisId, profile: AxisProfile) {
        self.conditioners[axis.index()].set_profile(profile);
    }

    pub(super) fn set_slew_limit(&mut self, axis: AxisId, rate: f64) {
        self.conditioners[axis.index()].set_slew_limit(rate);
    }
}
