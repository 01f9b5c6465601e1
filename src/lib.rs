//! Bind driver-station gamepads to logical robot control functions.
//!
//! Build an [`OperatorInput`] once at startup; it probes every port, binds
//! the compiled-in control scheme against whatever pads it finds, and from
//! then on dispatches axis/button reads and per-axis conditioning by
//! function name. Missing hardware never fails anything: affected functions
//! read as neutral and the reasons land in the diagnostics.

pub mod device;
pub mod function;
pub mod operator;
pub mod probe;
pub mod scheme;

pub use device::{AxisId, AxisProfile, ButtonId, ControllerDevice, HidPad, PadKind, XboxPad};
pub use function::ControlFunction;
pub use operator::{FunctionBinding, OperatorInput, PortDiagnostic, PortFault, MAX_PORTS};
pub use probe::{GilrsProbe, PadProbe, ProbeError};
pub use scheme::{BindingRule, PadInput, DEFAULT_SCHEME};
