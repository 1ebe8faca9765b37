use std::time::Instant;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
/// This type is used to represent that we ran out of time, so we returned out of the current
/// search instead of finishing it
///
/// Search functions return it through `Result` so that `?` unwinds every frame between the
/// node that noticed and the caller that can fall back to an earlier answer.
pub struct AbortedEarly;

impl std::fmt::Display for AbortedEarly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "search aborted, the time budget ran out")
    }
}

impl std::error::Error for AbortedEarly {}

/// Polls a remaining-time query and aborts once it drops below a threshold
///
/// The query and the threshold use the same unit. The agents in this crate use milliseconds.
#[derive(Clone, Copy)]
pub struct TimeGuard<'a> {
    time_left: &'a dyn Fn() -> f64,
    threshold: f64,
}

impl<'a> std::fmt::Debug for TimeGuard<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeGuard")
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}

impl<'a> TimeGuard<'a> {
    /// `threshold` must be positive, checked in debug builds only
    pub fn new(time_left: &'a dyn Fn() -> f64, threshold: f64) -> Self {
        debug_assert!(threshold > 0.0, "the timeout threshold must be positive");

        Self {
            time_left,
            threshold,
        }
    }

    /// Called at the start of every node. Fails once the remaining time is below the threshold
    pub fn check(&self) -> Result<(), AbortedEarly> {
        if (self.time_left)() < self.threshold {
            return Err(AbortedEarly);
        }

        Ok(())
    }
}

/// Build a remaining-time query, in milliseconds, that counts down to `deadline`
pub fn time_left_until(deadline: Instant) -> impl Fn() -> f64 {
    move || {
        let now = Instant::now();
        if now >= deadline {
            -((now - deadline).as_secs_f64() * 1000.0)
        } else {
            (deadline - now).as_secs_f64() * 1000.0
        }
    }
}
