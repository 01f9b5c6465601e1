use std::collections::HashMap;

use crossbeam_channel::Sender;
use gilrs::{Axis, Button, EventType, GamepadId, Gilrs, MappingSource};
use thiserror::Error;

use crate::device::{AxisId, ButtonId, ControllerDevice, HidPad, PadEvent, PadKind, XboxPad};
use crate::operator::MAX_PORTS;

/// Answers "what occupies port N?" exactly once, at dispatcher construction.
///
/// Production code uses [`GilrsProbe`]; tests plug in fake topologies.
pub trait PadProbe {
    fn probe(&mut self, port: usize) -> Option<Box<dyn ControllerDevice>>;
}

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to initialize gamepad backend: {0}")]
    Backend(String),
}

/// Probes ports against the gamepads gilrs found at startup and keeps
/// feeding their events to the pads it handed out.
///
/// Gamepads are assigned to ports in enumeration order. The assignment is
/// fixed for the probe's lifetime: pads connected later are logged and
/// ignored, matching the one-shot binding pass they would have missed
/// anyway.
pub struct GilrsProbe {
    gilrs: Gilrs,
    ports: HashMap<GamepadId, usize>,
    kinds: [Option<PadKind>; MAX_PORTS],
    routes: [Option<Sender<PadEvent>>; MAX_PORTS],
}

impl GilrsProbe {
    pub fn new() -> Result<Self, ProbeError> {
        let gilrs = Gilrs::new().map_err(|e| ProbeError::Backend(e.to_string()))?;

        let mut ports = HashMap::new();
        let mut kinds = [None; MAX_PORTS];
        for (port, (id, gamepad)) in gilrs.gamepads().enumerate() {
            if port >= MAX_PORTS {
                log::warn!("ignoring {} beyond the last port", gamepad.name());
                continue;
            }
            let kind = classify(&gamepad);
            log::info!("port {port}: {} ({kind:?})", gamepad.name());
            ports.insert(id, port);
            kinds[port] = Some(kind);
        }

        Ok(Self {
            gilrs,
            ports,
            kinds,
            routes: std::array::from_fn(|_| None),
        })
    }

    /// Drain pending gamepad events and route them to the pads created by
    /// `probe`. Call once per control cycle, before reading functions.
    pub fn pump(&mut self) {
        while let Some(event) = self.gilrs.next_event() {
            let Some(&port) = self.ports.get(&event.id) else {
                if event.event == EventType::Connected {
                    log::info!("controller connected after startup; ports are fixed until restart");
                }
                continue;
            };

            let pad_event = match event.event {
                EventType::AxisChanged(axis, value, _) => map_axis(axis).map(|axis| PadEvent::Axis {
                    axis,
                    value: value as f64,
                }),
                // Analog triggers arrive as button value changes on some
                // platforms; fold them into the trigger axes
                EventType::ButtonChanged(Button::LeftTrigger2, value, _) => Some(PadEvent::Axis {
                    axis: AxisId::LeftTrigger,
                    value: value as f64,
                }),
                EventType::ButtonChanged(Button::RightTrigger2, value, _) => Some(PadEvent::Axis {
                    axis: AxisId::RightTrigger,
                    value: value as f64,
                }),
                EventType::ButtonPressed(button, _) => map_button(button).map(|button| PadEvent::Button {
                    button,
                    pressed: true,
                }),
                EventType::ButtonReleased(button, _) => map_button(button).map(|button| PadEvent::Button {
                    button,
                    pressed: false,
                }),
                EventType::Disconnected => Some(PadEvent::Disconnected),
                _ => None,
            };

            let route_dead = match (&self.routes[port], pad_event) {
                (Some(sender), Some(pad_event)) => sender.send(pad_event).is_err(),
                _ => false,
            };
            if route_dead {
                self.routes[port] = None;
            }
        }
    }
}

impl PadProbe for GilrsProbe {
    fn probe(&mut self, port: usize) -> Option<Box<dyn ControllerDevice>> {
        let kind = self.kinds.get(port).copied().flatten()?;
        let (sender, receiver) = crossbeam_channel::unbounded();
        self.routes[port] = Some(sender);
        match kind {
            PadKind::Xbox => Some(Box::new(XboxPad::new(receiver))),
            PadKind::Hid => Some(Box::new(HidPad::new(receiver))),
        }
    }
}

/// A pad gilrs could map to the standard layout has the full stick, trigger,
/// and POV complement; anything unmapped is treated as a reduced HID stick.
fn classify(gamepad: &gilrs::Gamepad<'_>) -> PadKind {
    match gamepad.mapping_source() {
        MappingSource::SdlMappings | MappingSource::Driver => PadKind::Xbox,
        MappingSource::None => PadKind::Hid,
    }
}

fn map_axis(axis: Axis) -> Option<AxisId> {
    match axis {
        Axis::LeftStickX => Some(AxisId::LeftStickX),
        Axis::LeftStickY => Some(AxisId::LeftStickY),
        Axis::RightStickX => Some(AxisId::RightStickX),
        Axis::RightStickY => Some(AxisId::RightStickY),
        Axis::LeftZ => Some(AxisId::LeftTrigger),
        Axis::RightZ => Some(AxisId::RightTrigger),
        _ => None,
    }
}

fn map_button(button: Button) -> Option<ButtonId> {
    match button {
        Button::South => Some(ButtonId::A),
        Button::East => Some(ButtonId::B),
        Button::West => Some(ButtonId::X),
        Button::North => Some(ButtonId::Y),
        Button::LeftTrigger => Some(ButtonId::LeftBumper),
        Button::RightTrigger => Some(ButtonId::RightBumper),
        Button::Select => Some(ButtonId::Back),
        Button::Start => Some(ButtonId::Start),
        Button::LeftThumb => Some(ButtonId::LeftThumb),
        Button::RightThumb => Some(ButtonId::RightThumb),
        Button::DPadUp => Some(ButtonId::PovUp),
        Button::DPadRight => Some(ButtonId::PovRight),
        Button::DPadDown => Some(ButtonId::PovDown),
        Button::DPadLeft => Some(ButtonId::PovLeft),
        _ => None,
    }
}
