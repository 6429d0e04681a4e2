//! Frame driver
//!
//! Decides whether another frame should be delivered. The host owns the
//! actual clock (display refresh, a test loop); the driver only asks it for
//! the next frame through a [`FrameScheduler`] and forgets outstanding
//! requests when stopped.

/// Host hook for "call me again on the next frame"
pub trait FrameScheduler {
    /// Ask for exactly one more frame callback
    fn request_next_frame(&mut self);
    /// Drop any outstanding request
    fn cancel(&mut self);
}

/// Tracks whether frames are wanted and forwards requests to the host
#[derive(Debug)]
pub struct FrameDriver<S: FrameScheduler> {
    scheduler: S,
    active: bool,
    frames: u64,
}

impl<S: FrameScheduler> FrameDriver<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            active: false,
            frames: 0,
        }
    }

    /// Begin (or resume) delivering frames
    pub fn start(&mut self) {
        if !self.active {
            self.active = true;
            self.scheduler.request_next_frame();
        }
    }

    /// Stop delivering frames; a request already in flight is cancelled
    pub fn stop(&mut self) {
        if self.active {
            self.active = false;
            self.scheduler.cancel();
        }
    }

    /// Called at the top of a delivered frame. Returns false for stray
    /// frames that arrive after [`stop`](Self::stop).
    pub fn begin_frame(&mut self) -> bool {
        if self.active {
            self.frames += 1;
        }
        self.active
    }

    /// Called once the frame's work is done
    pub fn end_frame(&mut self, keep_running: bool) {
        if keep_running {
            if self.active {
                self.scheduler.request_next_frame();
            }
        } else {
            self.stop();
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Frames delivered while active, over the driver's lifetime
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

/// Scheduler for headless runs and tests: the host polls
/// [`take_pending`](Self::take_pending) and advances time by a fixed step.
#[derive(Debug, Clone)]
pub struct FixedStepScheduler {
    pending: bool,
    step_ms: f64,
    now_ms: f64,
    requests: u64,
    cancels: u64,
}

impl FixedStepScheduler {
    pub fn new(step_ms: f64) -> Self {
        Self {
            pending: false,
            step_ms,
            now_ms: 0.0,
            requests: 0,
            cancels: 0,
        }
    }

    /// Consume an outstanding request, advancing the clock by one step
    pub fn take_pending(&mut self) -> Option<f64> {
        if !self.pending {
            return None;
        }
        self.pending = false;
        self.now_ms += self.step_ms;
        Some(self.now_ms)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn requests(&self) -> u64 {
        self.requests
    }

    pub fn cancels(&self) -> u64 {
        self.cancels
    }
}

impl Default for FixedStepScheduler {
    fn default() -> Self {
        Self::new(crate::consts::FRAME_MS)
    }
}

impl FrameScheduler for FixedStepScheduler {
    fn request_next_frame(&mut self) {
        self.pending = true;
        self.requests += 1;
    }

    fn cancel(&mut self) {
        self.pending = false;
        self.cancels += 1;
    }
}
