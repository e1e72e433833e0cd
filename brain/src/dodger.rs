use log::trace;
use std::time::Instant;

/// Produces the jump/pitch inputs for a forward dodge on a fixed cooldown.
///
/// Each cycle starts with a jump, a short release, then a second jump with the
/// nose pitched down, after which the inputs stay neutral until `wait` seconds
/// have passed and the cycle restarts.
pub struct Dodger {
    timer: Instant,
    wait: f32,
}

impl Default for Dodger {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WAIT)
    }
}

impl Dodger {
    pub const DEFAULT_WAIT: f32 = 2.2;
    pub const MIN_WAIT: f32 = 1.0;

    const FIRST_JUMP_END: f32 = 0.1;
    const RELEASE_END: f32 = 0.15;
    const SECOND_JUMP_END: f32 = 1.0;

    /// `wait` is the cooldown in seconds. Anything under one second is raised
    /// to one second.
    pub fn new(wait: f32) -> Self {
        Self::starting_at(wait, Instant::now())
    }

    pub fn starting_at(wait: f32, now: Instant) -> Self {
        Self {
            timer: now,
            wait: wait.max(Self::MIN_WAIT),
        }
    }

    pub fn wait(&self) -> f32 {
        self.wait
    }

    /// Returns `(jump, pitch)` for the current moment.
    pub fn attempt_dodging(&mut self) -> (bool, f32) {
        self.attempt_dodging_at(Instant::now())
    }

    pub fn attempt_dodging_at(&mut self, now: Instant) -> (bool, f32) {
        let elapsed = now.saturating_duration_since(self.timer).as_secs_f32();
        let (jump, pitch, reset) = self.schedule(elapsed);
        if reset {
            trace!("dodge cooldown elapsed after {:.2}s", elapsed);
            self.timer = now;
        }
        (jump, pitch)
    }

    /// The branches overlap at their edges; the first match wins.
    fn schedule(&self, elapsed: f32) -> (bool, f32, bool) {
        if elapsed > self.wait {
            (false, 0.0, true)
        } else if elapsed <= Self::FIRST_JUMP_END {
            (true, -1.0, false)
        } else if elapsed <= Self::RELEASE_END {
            (false, -1.0, false)
        } else if elapsed < Self::SECOND_JUMP_END {
            (true, -1.0, false)
        } else {
            (false, 0.0, false)
        }
    }
}
