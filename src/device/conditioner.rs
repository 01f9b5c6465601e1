use std::time::Instant;

use super::AxisProfile;

/// Per-axis signal conditioning: deadband removal, response profile, scale,
/// then slew-rate limiting, applied in that order on every read.
#[derive(Debug)]
pub struct AxisConditioner {
    deadband: f64,
    scale: f64,
    profile: AxisProfile,
    slew_limit: Option<f64>,
    last_value: f64,
    last_update: Option<Instant>,
}

impl Default for AxisConditioner {
    fn default() -> Self {
        Self {
            deadband: 0.0,
            scale: 1.0,
            profile: AxisProfile::Linear,
            slew_limit: None,
            last_value: 0.0,
            last_update: None,
        }
    }
}

impl AxisConditioner {
    /// Deadband width around neutral. Inputs inside the band read as zero;
    /// the remaining range is rescaled so full deflection still reads 1.0.
    pub fn set_deadband(&mut self, width: f64) {
        self.deadband = width.clamp(0.0, 0.95);
    }

    /// Scale factor limiting the output range. Values outside 0.0..=1.0 are
    /// clamped to the nearest bound, so a conditioned axis never exceeds
    /// unit magnitude.
    pub fn set_scale(&mut self, factor: f64) {
        self.scale = factor.clamp(0.0, 1.0);
    }

    pub fn set_profile(&mut self, profile: AxisProfile) {
        self.profile = profile;
    }

    /// Maximum change per second in the conditioned value. A rate of zero
    /// or less disables limiting.
    pub fn set_slew_limit(&mut self, rate: f64) {
        self.slew_limit = (rate > 0.0).then_some(rate);
    }

    /// Condition a raw axis value, using the wall-clock time since the last
    /// read for slew limiting.
    pub fn apply(&mut self, raw: f64) -> f64 {
        let now = Instant::now();
        let dt = self
            .last_update
            .map(|t| now.duration_since(t).as_secs_f64())
            .unwrap_or(0.0);
        self.last_update = Some(now);
        self.apply_with_dt(raw, dt)
    }

    /// Same pipeline with an explicit time step, so slew behavior is
    /// deterministic under test.
    pub fn apply_with_dt(&mut self, raw: f64, dt: f64) -> f64 {
        let mut value = self.remove_deadband(raw.clamp(-1.0, 1.0));
        value = match self.profile {
            AxisProfile::Linear => value,
            AxisProfile::Squared => value * value.abs(),
            AxisProfile::Cubed => value * value * value,
        };
        value *= self.scale;

        if let Some(rate) = self.slew_limit {
            let max_step = rate * dt;
            value = value.clamp(self.last_value - max_step, self.last_value + max_step);
        }

        self.last_value = value;
        value
    }

    fn remove_deadband(&self, value: f64) -> f64 {
        if value.abs() < self.deadband {
            0.0
        } else {
            // Rescale the live range so full deflection still hits 1.0
            value.signum() * (value.abs() - self.deadband) / (1.0 - self.deadband)
        }
    }
}
