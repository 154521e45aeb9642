//! Fixed-timestep frame pacing

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest frame gap fed into the accumulator, in seconds
const MAX_FRAME_DT: f32 = 0.1;

/// Turns display-refresh timestamps into a number of simulation ticks
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    accumulator: f32,
    last_time: Option<f64>,
}

impl FrameClock {
    /// Ticks to run for a frame at `time_ms` (a `requestAnimationFrame`
    /// timestamp). At most [`MAX_SUBSTEPS`]; time the cap couldn't cover is
    /// dropped so a slow device runs slower instead of falling further behind.
    pub fn advance(&mut self, time_ms: f64) -> u32 {
        let dt = match self.last_time {
            Some(last) => ((time_ms - last) / 1000.0) as f32,
            None => SIM_DT,
        };
        self.last_time = Some(time_ms);
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        self.accumulator = self.accumulator.min(SIM_DT);
        substeps
    }

    /// Unsimulated time carried into the next frame
    pub fn backlog(&self) -> f32 {
        self.accumulator
    }
}
