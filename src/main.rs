use std::thread;
use std::time::Duration;

use opdeck::{ControlFunction, GilrsProbe, OperatorInput};

/// Control loop period. Reads happen once per cycle per function.
const CYCLE: Duration = Duration::from_millis(20);

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut probe = GilrsProbe::new()?;
    let mut oi = OperatorInput::new(&mut probe);

    log::info!(
        "binding report:\n{}",
        serde_json::to_string_pretty(&oi.binding_report())?
    );

    let mut cycle: u64 = 0;
    loop {
        probe.pump();

        let forward = oi.read_axis(ControlFunction::DriveForward);
        let strafe = oi.read_axis(ControlFunction::DriveStrafe);
        let rotate = oi.read_axis(ControlFunction::DriveRotate);

        // Once a second is plenty for a readout
        if cycle % 50 == 0 {
            log::info!(
                "drive fwd={forward:+.2} strafe={strafe:+.2} rot={rotate:+.2} shoot={}",
                oi.read_button(ControlFunction::Shoot)
            );
        }

        cycle += 1;
        thread::sleep(CYCLE);
    }
}
