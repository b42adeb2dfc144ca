//! Delay policy for throttled requests.
//!
//! The delay grows exponentially with the attempt number and is clamped to
//! `[min, max]`. With jitter enabled the delay is drawn uniformly between
//! `min` and the exponential value, which keeps many clients hitting the same
//! shop from retrying in lockstep.

use std::time::Duration;

use rand::Rng;

/// Default minimum delay between retries.
pub const DEFAULT_MIN_DELAY: Duration = Duration::from_millis(100);

/// Default maximum delay between retries.
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(2);

/// Default growth factor per attempt.
pub const DEFAULT_FACTOR: f64 = 2.0;

/// Exponential backoff with optional jitter.
///
/// `Backoff` holds no per-request state; the caller passes the attempt
/// number (0 for the first retry).
///
/// # Example
///
/// ```rust
/// use shopify_rest::clients::Backoff;
/// use std::time::Duration;
///
/// let backoff = Backoff::new(Duration::from_millis(100), Duration::from_secs(2)).jitter(false);
/// assert_eq!(backoff.duration(0), Duration::from_millis(100));
/// assert_eq!(backoff.duration(1), Duration::from_millis(200));
/// assert_eq!(backoff.duration(10), Duration::from_secs(2));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Backoff {
    min: Duration,
    max: Duration,
    factor: f64,
    jitter: bool,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_DELAY,
            max: DEFAULT_MAX_DELAY,
            factor: DEFAULT_FACTOR,
            jitter: true,
        }
    }
}

impl Backoff {
    /// Creates a jittered backoff with the given bounds.
    #[must_use]
    pub fn new(min: Duration, max: Duration) -> Self {
        Self {
            min,
            max,
            ..Self::default()
        }
    }

    /// Enables or disables jitter.
    #[must_use]
    pub const fn jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Sets the growth factor. Values below 1.0 are treated as 1.0.
    #[must_use]
    pub fn factor(mut self, factor: f64) -> Self {
        self.factor = factor.max(1.0);
        self
    }

    /// Returns the minimum delay.
    #[must_use]
    pub const fn min(&self) -> Duration {
        self.min
    }

    /// Returns the maximum delay.
    #[must_use]
    pub const fn max(&self) -> Duration {
        self.max
    }

    /// Returns whether jitter is enabled.
    #[must_use]
    pub const fn has_jitter(&self) -> bool {
        self.jitter
    }

    /// Returns the delay before retry number `attempt` (0-indexed).
    #[must_use]
    pub fn duration(&self, attempt: u32) -> Duration {
        self.duration_with_rng(attempt, &mut rand::thread_rng())
    }

    /// Same as [`duration`](Self::duration) but draws jitter from `rng`.
    pub fn duration_with_rng<R: Rng + ?Sized>(&self, attempt: u32, rng: &mut R) -> Duration {
        let min = self.min.as_secs_f64();
        let max = self.max.as_secs_f64();
        if min >= max {
            return self.max;
        }

        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let mut delay = min * self.factor.powi(exponent);

        if self.jitter && delay > min {
            delay = rng.gen_range(min..delay);
        }

        if !delay.is_finite() || delay > max {
            return self.max;
        }

        Duration::from_secs_f64(delay.max(min))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_defaults_match_pipeline_policy() {
        let backoff = Backoff::default();
        assert_eq!(backoff.min(), Duration::from_millis(100));
        assert_eq!(backoff.max(), Duration::from_secs(2));
        assert!(backoff.has_jitter());
    }

    #[test]
    fn test_delay_doubles_without_jitter() {
        let backoff = Backoff::default().jitter(false);
        assert_eq!(backoff.duration(0), Duration::from_millis(100));
        assert_eq!(backoff.duration(1), Duration::from_millis(200));
        assert_eq!(backoff.duration(2), Duration::from_millis(400));
        assert_eq!(backoff.duration(3), Duration::from_millis(800));
    }

    #[test]
    fn test_delay_is_capped_at_max() {
        let backoff = Backoff::default().jitter(false);
        assert_eq!(backoff.duration(5), Duration::from_secs(2));
        assert_eq!(backoff.duration(64), Duration::from_secs(2));
        assert_eq!(backoff.duration(u32::MAX), Duration::from_secs(2));
    }

    #[test]
    fn test_jittered_delay_stays_within_bounds() {
        let backoff = Backoff::default();
        let mut rng = StdRng::seed_from_u64(7);
        for attempt in 0..20 {
            let delay = backoff.duration_with_rng(attempt, &mut rng);
            assert!(delay >= backoff.min(), "attempt {attempt}: {delay:?}");
            assert!(delay <= backoff.max(), "attempt {attempt}: {delay:?}");
        }
    }

    #[test]
    fn test_seeded_rng_is_deterministic() {
        let backoff = Backoff::default();
        let first: Vec<Duration> = {
            let mut rng = StdRng::seed_from_u64(42);
            (0..5).map(|a| backoff.duration_with_rng(a, &mut rng)).collect()
        };
        let second: Vec<Duration> = {
            let mut rng = StdRng::seed_from_u64(42);
            (0..5).map(|a| backoff.duration_with_rng(a, &mut rng)).collect()
        };
        assert_eq!(first, second);
    }

    #[test]
    fn test_inverted_bounds_return_max() {
        let backoff = Backoff::new(Duration::from_secs(3), Duration::from_secs(1));
        assert_eq!(backoff.duration(0), Duration::from_secs(1));
    }

    #[test]
    fn test_factor_below_one_is_clamped() {
        let backoff = Backoff::default().jitter(false).factor(0.5);
        assert_eq!(backoff.duration(4), Duration::from_millis(100));
    }
}
