use crate::device::{AxisId, ButtonId, PadKind};
use crate::function::ControlFunction;

/// The physical input a scheme row assigns to a function: exactly one axis
/// or one button, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadInput {
    Axis(AxisId),
    Button(ButtonId),
}

/// One row of the binding scheme: bind `function` to `input` on `port`, but
/// only when the pad occupying that port is of the required kind.
#[derive(Debug, Clone, Copy)]
pub struct BindingRule {
    pub port: usize,
    pub function: ControlFunction,
    pub input: PadInput,
    pub requires: PadKind,
}

const fn rule(
    port: usize,
    function: ControlFunction,
    input: PadInput,
    requires: PadKind,
) -> BindingRule {
    BindingRule {
        port,
        function,
        input,
        requires,
    }
}

/// The compiled-in control layout. Port 0 is the driver pad, port 1 the
/// co-driver pad; ports 2-5 are reserved. Every row here expects a
/// full-featured pad; a reduced pad in either seat leaves that seat's
/// functions unbound.
pub const DEFAULT_SCHEME: &[BindingRule] = &[
    // Driver pad: drive axes on the sticks
    rule(0, ControlFunction::DriveForward, PadInput::Axis(AxisId::LeftStickY), PadKind::Xbox),
    rule(0, ControlFunction::DriveStrafe, PadInput::Axis(AxisId::LeftStickX), PadKind::Xbox),
    rule(0, ControlFunction::DriveRotate, PadInput::Axis(AxisId::RightStickX), PadKind::Xbox),
    // Face buttons
    rule(0, ControlFunction::RezeroGyro, PadInput::Button(ButtonId::X), PadKind::Xbox),
    rule(0, ControlFunction::AlignTarget, PadInput::Button(ButtonId::Y), PadKind::Xbox),
    rule(0, ControlFunction::DriveToStation, PadInput::Button(ButtonId::B), PadKind::Xbox),
    rule(0, ControlFunction::QuickTurn, PadInput::Button(ButtonId::A), PadKind::Xbox),
    // Speed presets on the POV hat
    rule(0, ControlFunction::SpeedFull, PadInput::Button(ButtonId::PovUp), PadKind::Xbox),
    rule(0, ControlFunction::SpeedThreeQuarter, PadInput::Button(ButtonId::PovRight), PadKind::Xbox),
    rule(0, ControlFunction::SpeedHalf, PadInput::Button(ButtonId::PovLeft), PadKind::Xbox),
    rule(0, ControlFunction::SpeedQuarter, PadInput::Button(ButtonId::PovDown), PadKind::Xbox),
    // Gearing on the bumpers, turbo/brake on the triggers
    rule(0, ControlFunction::ShiftUp, PadInput::Button(ButtonId::RightBumper), PadKind::Xbox),
    rule(0, ControlFunction::ShiftDown, PadInput::Button(ButtonId::LeftBumper), PadKind::Xbox),
    rule(0, ControlFunction::Turbo, PadInput::Axis(AxisId::RightTrigger), PadKind::Xbox),
    rule(0, ControlFunction::Brake, PadInput::Axis(AxisId::LeftTrigger), PadKind::Xbox),
    // Co-driver pad: shooter spin-up presets and firing
    rule(1, ControlFunction::SpinUpClose, PadInput::Button(ButtonId::A), PadKind::Xbox),
    rule(1, ControlFunction::SpinUpMid, PadInput::Button(ButtonId::B), PadKind::Xbox),
    rule(1, ControlFunction::SpinUpFar, PadInput::Button(ButtonId::X), PadKind::Xbox),
    rule(1, ControlFunction::SpinUpWall, PadInput::Button(ButtonId::Y), PadKind::Xbox),
    rule(1, ControlFunction::Shoot, PadInput::Button(ButtonId::RightBumper), PadKind::Xbox),
    rule(1, ControlFunction::AimTurret, PadInput::Button(ButtonId::LeftBumper), PadKind::Xbox),
];
