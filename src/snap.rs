// Snap policy
// Rounds minute offsets to the nearest multiple of the grid step.

/// Round `minutes` to the nearest multiple of `step`, half-up (ties go to the
/// larger multiple). A non-positive step disables snapping.
pub fn snap_minutes(minutes: i64, step: i64) -> i64 {
    if step <= 0 {
        return minutes;
    }
    let quotient = minutes.div_euclid(step);
    let remainder = minutes.rem_euclid(step);
    if 2 * remainder >= step {
        (quotient + 1) * step
    } else {
        quotient * step
    }
}

/// The configured snap step applied to Y-axis minute coordinates at drag
/// start and continuously to the moving edge during a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapPolicy {
    step_minutes: i64,
}

impl SnapPolicy {
    pub fn new(step_minutes: i64) -> Self {
        Self { step_minutes }
    }

    pub fn step(&self) -> i64 {
        self.step_minutes
    }

    pub fn snap(&self, minutes: i64) -> i64 {
        snap_minutes(minutes, self.step_minutes)
    }
}
