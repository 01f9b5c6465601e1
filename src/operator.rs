use std::fmt;

use serde::Serialize;

use crate::device::{AxisId, AxisProfile, ButtonId, ControllerDevice};
use crate::function::ControlFunction;
use crate::probe::PadProbe;
use crate::scheme::{BindingRule, PadInput, DEFAULT_SCHEME};

/// Number of driver-station ports a controller may occupy.
pub const MAX_PORTS: usize = 6;

/// Why a port produced a diagnostic during the binding pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PortFault {
    /// Nothing plugged into the port.
    NoController,
    /// A controller is present but its kind satisfies none of the port's
    /// scheme rows.
    UnhandledKind,
}

/// One construction-time diagnostic: a port whose hardware did not match
/// what the binding scheme expected. Observational only; the affected
/// functions simply stay unbound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PortDiagnostic {
    pub port: usize,
    pub fault: PortFault,
}

impl fmt::Display for PortDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.fault {
            PortFault::NoController => {
                write!(f, "no controller plugged into port {}", self.port)
            }
            PortFault::UnhandledKind => {
                write!(f, "controller in port {} is not handled by the binding scheme", self.port)
            }
        }
    }
}

/// Resolved binding for one function, for the startup report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FunctionBinding {
    pub function: ControlFunction,
    pub port: Option<usize>,
    pub axis: Option<AxisId>,
    pub button: Option<ButtonId>,
}

/// Three parallel lookup tables keyed by function index. Entries are set
/// once during the binding pass and read-only afterwards.
struct BindingTable {
    port: [Option<usize>; ControlFunction::COUNT],
    axis: [Option<AxisId>; ControlFunction::COUNT],
    button: [Option<ButtonId>; ControlFunction::COUNT],
}

impl BindingTable {
    fn unbound() -> Self {
        Self {
            port: [None; ControlFunction::COUNT],
            axis: [None; ControlFunction::COUNT],
            button: [None; ControlFunction::COUNT],
        }
    }

    fn axis_binding(&self, function: ControlFunction) -> Option<(usize, AxisId)> {
        let i = function.index();
        Some((self.port[i]?, self.axis[i]?))
    }

    fn button_binding(&self, function: ControlFunction) -> Option<(usize, ButtonId)> {
        let i = function.index();
        Some((self.port[i]?, self.button[i]?))
    }

    fn bind(&mut self, port: usize, function: ControlFunction, input: PadInput) -> bool {
        let i = function.index();
        if self.port[i].is_some() {
            return false;
        }
        self.port[i] = Some(port);
        match input {
            PadInput::Axis(axis) => self.axis[i] = Some(axis),
            PadInput::Button(button) => self.button[i] = Some(button),
        }
        true
    }
}

/// Binds logical control functions to whatever pads the probe found, and
/// dispatches reads and conditioning calls to the right pad afterwards.
///
/// Construct one of these during robot startup and hand it to whatever
/// needs driver input; the binding decisions are final for its lifetime.
/// All access is expected to come from the single control-loop thread.
/// Nothing here blocks, and every accessor completes in a table lookup plus
/// at most one pad read.
///
/// Missing or mismatched hardware never fails construction: the affected
/// functions read as neutral (`0.0` / `false`), the conditioning setters
/// become no-ops for them, and the reason is captured in [`diagnostics`]
/// (and logged).
///
/// [`diagnostics`]: OperatorInput::diagnostics
pub struct OperatorInput {
    pads: [Option<Box<dyn ControllerDevice>>; MAX_PORTS],
    bindings: BindingTable,
    diagnostics: Vec<PortDiagnostic>,
}

impl OperatorInput {
    /// Probe all ports and bind the default control layout.
    pub fn new(probe: &mut dyn PadProbe) -> Self {
        Self::with_scheme(probe, DEFAULT_SCHEME)
    }

    /// Probe all ports and bind a specific scheme. Used by tests; robot
    /// code normally wants [`OperatorInput::new`].
    pub fn with_scheme(probe: &mut dyn PadProbe, scheme: &[BindingRule]) -> Self {
        let mut pads: [Option<Box<dyn ControllerDevice>>; MAX_PORTS] =
            std::array::from_fn(|_| None);
        for (port, slot) in pads.iter_mut().enumerate() {
            *slot = probe.probe(port);
        }

        let mut bindings = BindingTable::unbound();
        let mut diagnostics = Vec::new();

        for port in 0..MAX_PORTS {
            let rules = scheme.iter().filter(|r| r.port == port);
            match pads[port].as_ref() {
                None => {
                    diagnostics.push(PortDiagnostic {
                        port,
                        fault: PortFault::NoController,
                    });
                }
                Some(pad) => {
                    let mut saw_rule = false;
                    let mut bound_any = false;
                    for rule in rules {
                        saw_rule = true;
                        if pad.kind() != rule.requires {
                            continue;
                        }
                        let supported = match rule.input {
                            PadInput::Axis(axis) => pad.supports_axis(axis),
                            PadInput::Button(button) => pad.supports_button(button),
                        };
                        if !supported {
                            log::warn!(
                                "scheme assigns {:?} an input port {port}'s pad does not carry",
                                rule.function
                            );
                            continue;
                        }
                        if bindings.bind(port, rule.function, rule.input) {
                            bound_any = true;
                        } else {
                            log::warn!("{:?} already bound, ignoring duplicate row", rule.function);
                        }
                    }
                    if saw_rule && !bound_any {
                        diagnostics.push(PortDiagnostic {
                            port,
                            fault: PortFault::UnhandledKind,
                        });
                    } else if !saw_rule {
                        log::debug!("controller in port {port} has no assigned functions");
                    }
                }
            }
        }

        for diagnostic in &diagnostics {
            log::warn!("{diagnostic}");
        }

        Self {
            pads,
            bindings,
            diagnostics,
        }
    }

    /// Conditioned value of the function's axis, or `0.0` when the function
    /// is not axis-bound or its pad is gone.
    pub fn read_axis(&mut self, function: ControlFunction) -> f64 {
        let Some((port, axis)) = self.bindings.axis_binding(function) else {
            return 0.0;
        };
        match self.pads[port].as_mut() {
            Some(pad) => pad.axis(axis),
            None => 0.0,
        }
    }

    /// Pressed state of the function's button (POV directions, bumpers, and
    /// trigger pulls included), or `false` when the function is not
    /// button-bound or its pad is gone.
    pub fn read_button(&mut self, function: ControlFunction) -> bool {
        let Some((port, button)) = self.bindings.button_binding(function) else {
            return false;
        };
        match self.pads[port].as_mut() {
            Some(pad) => pad.button(button),
            None => false,
        }
    }

    /// Limit the output range of the function's axis. Factors outside
    /// 0.0..=1.0 are clamped to the nearest bound. No-op for functions that
    /// are not axis-bound.
    pub fn set_axis_scale(&mut self, function: ControlFunction, factor: f64) {
        if let Some((pad, axis)) = self.bound_pad(function) {
            pad.set_axis_scale(axis, factor);
        }
    }

    /// Set the deadband width of the function's axis. No-op for functions
    /// that are not axis-bound.
    pub fn set_axis_deadband(&mut self, function: ControlFunction, width: f64) {
        if let Some((pad, axis)) = self.bound_pad(function) {
            pad.set_axis_deadband(axis, width);
        }
    }

    /// Set the response profile of the function's axis. No-op for functions
    /// that are not axis-bound.
    pub fn set_axis_profile(&mut self, function: ControlFunction, profile: AxisProfile) {
        if let Some((pad, axis)) = self.bound_pad(function) {
            pad.set_axis_profile(axis, profile);
        }
    }

    /// Cap how fast the function's conditioned axis value may change, in
    /// units per second. No-op for functions that are not axis-bound.
    pub fn set_slew_limit(&mut self, function: ControlFunction, rate: f64) {
        if let Some((pad, axis)) = self.bound_pad(function) {
            pad.set_slew_limit(axis, rate);
        }
    }

    pub fn is_axis_bound(&self, function: ControlFunction) -> bool {
        self.bindings.axis_binding(function).is_some()
    }

    pub fn is_button_bound(&self, function: ControlFunction) -> bool {
        self.bindings.button_binding(function).is_some()
    }

    /// Whether the function got any binding at all, so callers can tell an
    /// intentionally neutral default from hardware that never showed up.
    pub fn is_bound(&self, function: ControlFunction) -> bool {
        self.is_axis_bound(function) || self.is_button_bound(function)
    }

    /// What the binding pass recorded about missing or mismatched hardware.
    pub fn diagnostics(&self) -> &[PortDiagnostic] {
        &self.diagnostics
    }

    /// The resolved binding of every function, for the startup log.
    pub fn binding_report(&self) -> Vec<FunctionBinding> {
        ControlFunction::ALL
            .iter()
            .map(|&function| {
                let i = function.index();
                FunctionBinding {
                    function,
                    port: self.bindings.port[i],
                    axis: self.bindings.axis[i],
                    button: self.bindings.button[i],
                }
            })
            .collect()
    }

    fn bound_pad(&mut self, function: ControlFunction) -> Option<(&mut dyn ControllerDevice, AxisId)> {
        let (port, axis) = self.bindings.axis_binding(function)?;
        let pad = self.pads[port].as_mut()?;
        Some((pad.as_mut(), axis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::PadKind;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    #[derive(Default)]
    struct FakeInner {
        axes: HashMap<AxisId, f64>,
        buttons: HashMap<ButtonId, bool>,
        scale_calls: Vec<(AxisId, f64)>,
        deadband_calls: Vec<(AxisId, f64)>,
        profile_calls: Vec<(AxisId, AxisProfile)>,
        slew_calls: Vec<(AxisId, f64)>,
    }

    struct FakePad {
        kind: PadKind,
        inner: Rc<RefCell<FakeInner>>,
    }

    impl ControllerDevice for FakePad {
        fn kind(&self) -> PadKind {
            self.kind
        }

        fn supports_axis(&self, axis: AxisId) -> bool {
            match self.kind {
                PadKind::Xbox => true,
                PadKind::Hid => matches!(
                    axis,
                    AxisId::LeftStickX | AxisId::LeftStickY | AxisId::RightStickX
                ),
            }
        }

        fn supports_button(&self, button: ButtonId) -> bool {
            match self.kind {
                PadKind::Xbox => true,
                PadKind::Hid => !matches!(
                    button,
                    ButtonId::PovUp
                        | ButtonId::PovRight
                        | ButtonId::PovDown
                        | ButtonId::PovLeft
                        | ButtonId::LeftTriggerPull
                        | ButtonId::RightTriggerPull
                        | ButtonId::LeftThumb
                        | ButtonId::RightThumb
                ),
            }
        }

        fn axis(&mut self, axis: AxisId) -> f64 {
            self.inner.borrow().axes.get(&axis).copied().unwrap_or(0.0)
        }

        fn button(&mut self, button: ButtonId) -> bool {
            self.inner
                .borrow()
                .buttons
                .get(&button)
                .copied()
                .unwrap_or(false)
        }

        fn set_axis_scale(&mut self, axis: AxisId, factor: f64) {
            self.inner.borrow_mut().scale_calls.push((axis, factor));
        }

        fn set_axis_deadband(&mut self, axis: AxisId, width: f64) {
            self.inner.borrow_mut().deadband_calls.push((axis, width));
        }

        fn set_axis_profile(&mut self, axis: AxisId, profile: AxisProfile) {
            self.inner.borrow_mut().profile_calls.push((axis, profile));
        }

        fn set_slew_limit(&mut self, axis: AxisId, rate: f64) {
            self.inner.borrow_mut().slew_calls.push((axis, rate));
        }
    }

    struct FakeProbe {
        slots: HashMap<usize, (PadKind, Rc<RefCell<FakeInner>>)>,
    }

    impl FakeProbe {
        fn new(slots: &[(usize, PadKind)]) -> Self {
            Self {
                slots: slots
                    .iter()
                    .map(|&(port, kind)| (port, (kind, Rc::new(RefCell::new(FakeInner::default())))))
                    .collect(),
            }
        }

        fn empty() -> Self {
            Self::new(&[])
        }

        fn handle(&self, port: usize) -> Rc<RefCell<FakeInner>> {
            self.slots[&port].1.clone()
        }
    }

    impl PadProbe for FakeProbe {
        fn probe(&mut self, port: usize) -> Option<Box<dyn ControllerDevice>> {
            let (kind, inner) = self.slots.get(&port)?;
            Some(Box::new(FakePad {
                kind: *kind,
                inner: inner.clone(),
            }))
        }
    }

    #[test]
    fn unbound_functions_read_neutral() {
        let mut oi = OperatorInput::new(&mut FakeProbe::empty());
        for f in ControlFunction::ALL {
            assert_eq!(oi.read_axis(f), 0.0);
            assert!(!oi.read_button(f));
            assert!(!oi.is_bound(f));
        }
    }

    #[test]
    fn empty_topology_diagnoses_every_port_once() {
        let oi = OperatorInput::new(&mut FakeProbe::empty());
        assert_eq!(oi.diagnostics().len(), MAX_PORTS);
        for port in 0..MAX_PORTS {
            let for_port: Vec<_> = oi
                .diagnostics()
                .iter()
                .filter(|d| d.port == port)
                .collect();
            assert_eq!(for_port.len(), 1);
            assert_eq!(for_port[0].fault, PortFault::NoController);
        }
    }

    #[test]
    fn driver_pad_binds_the_drive_scheme() {
        let mut probe = FakeProbe::new(&[(0, PadKind::Xbox)]);
        let handle = probe.handle(0);
        let mut oi = OperatorInput::new(&mut probe);

        assert!(oi.is_axis_bound(ControlFunction::DriveForward));
        assert!(oi.is_axis_bound(ControlFunction::DriveRotate));
        assert!(oi.is_button_bound(ControlFunction::RezeroGyro));
        assert!(oi.is_button_bound(ControlFunction::SpeedFull));
        assert!(oi.is_axis_bound(ControlFunction::Turbo));
        // Co-driver functions stay unbound with only port 0 populated
        assert!(!oi.is_bound(ControlFunction::Shoot));

        handle
            .borrow_mut()
            .axes
            .insert(AxisId::LeftStickY, -0.42);
        handle.borrow_mut().buttons.insert(ButtonId::PovUp, true);

        assert_eq!(oi.read_axis(ControlFunction::DriveForward), -0.42);
        assert!(oi.read_button(ControlFunction::SpeedFull));
        assert!(!oi.read_button(ControlFunction::SpeedHalf));
    }

    #[test]
    fn absent_driver_pad_leaves_drive_unbound_with_one_diagnostic() {
        let mut probe = FakeProbe::new(&[(1, PadKind::Xbox)]);
        let oi = OperatorInput::new(&mut probe);

        assert!(!oi.is_bound(ControlFunction::DriveForward));
        assert!(!oi.is_bound(ControlFunction::Brake));
        let port0: Vec<_> = oi.diagnostics().iter().filter(|d| d.port == 0).collect();
        assert_eq!(port0.len(), 1);
        assert_eq!(port0[0].fault, PortFault::NoController);
    }

    #[test]
    fn reduced_pad_in_codriver_seat_leaves_shooter_unbound() {
        let mut probe = FakeProbe::new(&[(0, PadKind::Xbox), (1, PadKind::Hid)]);
        let oi = OperatorInput::new(&mut probe);

        assert!(oi.is_axis_bound(ControlFunction::DriveForward));
        for f in [
            ControlFunction::SpinUpClose,
            ControlFunction::SpinUpMid,
            ControlFunction::SpinUpFar,
            ControlFunction::SpinUpWall,
            ControlFunction::Shoot,
            ControlFunction::AimTurret,
        ] {
            assert!(!oi.is_bound(f), "{f:?} bound against a reduced pad");
        }
        let port1: Vec<_> = oi.diagnostics().iter().filter(|d| d.port == 1).collect();
        assert_eq!(port1.len(), 1);
        assert_eq!(port1[0].fault, PortFault::UnhandledKind);
    }

    #[test]
    fn setters_forward_only_for_axis_bound_functions() {
        let mut probe = FakeProbe::new(&[(0, PadKind::Xbox)]);
        let handle = probe.handle(0);
        let mut oi = OperatorInput::new(&mut probe);

        oi.set_axis_scale(ControlFunction::DriveForward, 0.5);
        oi.set_axis_deadband(ControlFunction::DriveForward, 0.1);
        oi.set_axis_profile(ControlFunction::DriveRotate, AxisProfile::Squared);
        oi.set_slew_limit(ControlFunction::DriveForward, 3.0);

        // Button-bound and unbound functions must not reach the pad
        oi.set_axis_scale(ControlFunction::RezeroGyro, 0.5);
        oi.set_axis_scale(ControlFunction::Shoot, 0.5);

        let inner = handle.borrow();
        assert_eq!(inner.scale_calls, vec![(AxisId::LeftStickY, 0.5)]);
        assert_eq!(inner.deadband_calls, vec![(AxisId::LeftStickY, 0.1)]);
        assert_eq!(
            inner.profile_calls,
            vec![(AxisId::RightStickX, AxisProfile::Squared)]
        );
        assert_eq!(inner.slew_calls, vec![(AxisId::LeftStickY, 3.0)]);
    }

    #[test]
    fn binding_is_deterministic_for_identical_topologies() {
        let report_a =
            OperatorInput::new(&mut FakeProbe::new(&[(0, PadKind::Xbox), (1, PadKind::Hid)]))
                .binding_report();
        let report_b =
            OperatorInput::new(&mut FakeProbe::new(&[(0, PadKind::Xbox), (1, PadKind::Hid)]))
                .binding_report();
        assert_eq!(report_a, report_b);
    }

    #[test]
    fn binding_report_reflects_the_scheme() {
        let mut probe = FakeProbe::new(&[(0, PadKind::Xbox)]);
        let oi = OperatorInput::new(&mut probe);
        let report = oi.binding_report();

        let forward = report
            .iter()
            .find(|b| b.function == ControlFunction::DriveForward)
            .unwrap();
        assert_eq!(forward.port, Some(0));
        assert_eq!(forward.axis, Some(AxisId::LeftStickY));
        assert_eq!(forward.button, None);

        let shoot = report
            .iter()
            .find(|b| b.function == ControlFunction::Shoot)
            .unwrap();
        assert_eq!(shoot.port, None);
    }

    #[test]
    fn no_function_is_both_axis_and_button_bound() {
        let mut probe = FakeProbe::new(&[(0, PadKind::Xbox), (1, PadKind::Xbox)]);
        let oi = OperatorInput::new(&mut probe);
        for binding in oi.binding_report() {
            assert!(
                !(binding.axis.is_some() && binding.button.is_some()),
                "{:?} bound to both an axis and a button",
                binding.function
            );
        }
    }

    #[test]
    fn overdriven_scale_never_exceeds_unit_magnitude() {
        use crate::device::{PadEvent, XboxPad};

        struct OnePadProbe(Option<crossbeam_channel::Receiver<PadEvent>>);

        impl PadProbe for OnePadProbe {
            fn probe(&mut self, port: usize) -> Option<Box<dyn ControllerDevice>> {
                if port == 0 {
                    self.0
                        .take()
                        .map(|rx| Box::new(XboxPad::new(rx)) as Box<dyn ControllerDevice>)
                } else {
                    None
                }
            }
        }

        let (tx, rx) = crossbeam_channel::unbounded();
        let mut oi = OperatorInput::new(&mut OnePadProbe(Some(rx)));

        oi.set_axis_scale(ControlFunction::DriveForward, 1.5);
        tx.send(PadEvent::Axis { axis: AxisId::LeftStickY, value: 1.0 })
            .unwrap();

        let value = oi.read_axis(ControlFunction::DriveForward);
        assert!(value.abs() <= 1.0);
        assert_eq!(value, 1.0);
    }

    #[test]
    fn reduced_pad_in_driver_seat_binds_nothing() {
        let mut probe = FakeProbe::new(&[(0, PadKind::Hid)]);
        let oi = OperatorInput::new(&mut probe);

        // The reduced pad does carry the stick axes, but the scheme requires
        // the full layout for the driver seat
        assert!(!oi.is_bound(ControlFunction::DriveForward));
        let port0: Vec<_> = oi.diagnostics().iter().filter(|d| d.port == 0).collect();
        assert_eq!(port0.len(), 1);
        assert_eq!(port0[0].fault, PortFault::UnhandledKind);
    }
}
