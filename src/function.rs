use serde::Serialize;

/// Logical control functions the rest of the robot code asks for.
///
/// These are stable names for control intents, decoupled from whichever pad,
/// axis, or button happens to carry them this season. The binding scheme in
/// `scheme.rs` decides the physical layout; everything else only ever speaks
/// in terms of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ControlFunction {
    // Driver pad
    DriveForward,
    DriveStrafe,
    DriveRotate,
    RezeroGyro,
    AlignTarget,
    DriveToStation,
    QuickTurn,
    SpeedFull,
    SpeedThreeQuarter,
    SpeedHalf,
    SpeedQuarter,
    ShiftUp,
    ShiftDown,
    Turbo,
    Brake,
    // Co-driver pad
    SpinUpClose,
    SpinUpMid,
    SpinUpFar,
    SpinUpWall,
    Shoot,
    AimTurret,
}

impl ControlFunction {
    /// Every function, in declaration order. The lookup tables in
    /// `operator.rs` are sized and indexed by this list.
    pub const ALL: [ControlFunction; 21] = [
        Self::DriveForward,
        Self::DriveStrafe,
        Self::DriveRotate,
        Self::RezeroGyro,
        Self::AlignTarget,
        Self::DriveToStation,
        Self::QuickTurn,
        Self::SpeedFull,
        Self::SpeedThreeQuarter,
        Self::SpeedHalf,
        Self::SpeedQuarter,
        Self::ShiftUp,
        Self::ShiftDown,
        Self::Turbo,
        Self::Brake,
        Self::SpinUpClose,
        Self::SpinUpMid,
        Self::SpinUpFar,
        Self::SpinUpWall,
        Self::Shoot,
        Self::AimTurret,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_list_matches_indices() {
        assert_eq!(ControlFunction::ALL.len(), ControlFunction::COUNT);
        for (i, f) in ControlFunction::ALL.iter().enumerate() {
            assert_eq!(f.index(), i);
        }
    }
}
