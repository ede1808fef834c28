//! Time abstraction traits for platform-agnostic timing.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    /// Saturates to zero if `earlier` is in fact later.
    fn duration_since(&self, earlier: Self) -> Self::Duration;
}

impl TimeDuration for core::time::Duration {
    fn as_millis(&self) -> u64 {
        u64::try_from(core::time::Duration::as_millis(self)).unwrap_or(u64::MAX)
    }

    fn from_millis(millis: u64) -> Self {
        core::time::Duration::from_millis(millis)
    }
}

#[cfg(feature = "std")]
impl TimeInstant for std::time::Instant {
    type Duration = core::time::Duration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        self.saturating_duration_since(earlier)
    }
}

/// Monotonic host clock backed by `std::time::Instant`.
#[cfg(feature = "std")]
#[derive(Debug, Default, Clone, Copy)]
pub struct StdTimeSource;

#[cfg(feature = "std")]
impl TimeSource<std::time::Instant> for StdTimeSource {
    fn now(&self) -> std::time::Instant {
        std::time::Instant::now()
    }
}

/// Fires at most once per period.
///
/// The first call to [`Interval::is_due`] only arms the interval, so periodic
/// work starts one full period after the loop begins.
#[derive(Debug, Clone, Copy)]
pub struct Interval<I: TimeInstant> {
    period: I::Duration,
    last: Option<I>,
}

impl<I: TimeInstant> Interval<I> {
    /// Creates an unarmed interval with the given period.
    pub fn new(period: I::Duration) -> Self {
        Self { period, last: None }
    }

    /// Returns true once the period has elapsed since the last time it fired.
    pub fn is_due(&mut self, now: I) -> bool {
        match self.last {
            None => {
                self.last = Some(now);
                false
            }
            Some(last) if now.duration_since(last).as_millis() >= self.period.as_millis() => {
                self.last = Some(now);
                true
            }
            Some(_) => false,
        }
    }

    /// Returns the configured period.
    pub fn period(&self) -> I::Duration {
        self.period
    }

    /// Forgets the last firing time; the next call re-arms the interval.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
