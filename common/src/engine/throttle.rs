use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    NotPlaying,
    BelowRenderFloor,
    BelowFrameInterval,
}

/// Rate limiter turning host timestamps into simulation steps.
///
/// Time that passes while a step is not due is absorbed, never replayed: one
/// `poll` yields at most one step.
#[derive(Clone, Debug)]
pub struct Throttle {
    base_interval: Duration,
    render_floor: Duration,
    last_time: Option<Duration>,
    execution_time: Duration,
}

impl Throttle {
    pub fn new(base_interval: Duration, render_floor: Duration) -> Self {
        Self {
            base_interval,
            render_floor,
            last_time: None,
            execution_time: Duration::ZERO,
        }
    }

    pub fn frame_interval(&self, speed: f64) -> Duration {
        self.base_interval.div_f64(speed)
    }

    pub fn last_time(&self) -> Option<Duration> {
        self.last_time
    }

    pub fn execution_time(&self) -> Duration {
        self.execution_time
    }

    /// Records `now` and returns the elapsed delta when a step is due.
    /// The first poll after `reset` is always due and contributes no delta.
    pub fn poll(&mut self, now: Duration, speed: f64) -> Result<Duration, SkipReason> {
        let Some(last_time) = self.last_time else {
            self.last_time = Some(now);
            return Ok(Duration::ZERO);
        };

        let delta = now.saturating_sub(last_time);
        if delta < self.render_floor {
            return Err(SkipReason::BelowRenderFloor);
        }
        if delta < self.frame_interval(speed) {
            return Err(SkipReason::BelowFrameInterval);
        }

        self.execution_time += delta;
        self.last_time = Some(now);
        Ok(delta)
    }

    pub fn reset(&mut self) {
        self.last_time = None;
        self.execution_time = Duration::ZERO;
    }
}
