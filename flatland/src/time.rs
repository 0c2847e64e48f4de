//! Data types for simulated and real time.

use core::fmt;
use core::time::Duration;
use std::time::Instant;

use manyfmt::Refmt as _;

use crate::util::ConciseDebug;

/// Specifies an amount of time passing in a [`PhysicsWorld`](crate::physics::PhysicsWorld).
///
/// [`Tick`] values are passed along through the `step()` operations that advance time.
/// In an interactive program they are usually produced by a [`FrameClock`], so their
/// length varies from frame to frame.
#[derive(Copy, Clone, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Tick {
    delta_t: Duration,

    /// Whether game time is paused, and `delta_t` should not be considered
    /// as an amount of game time passing. See [`Self::paused()`] for details.
    paused: bool,
}

impl Tick {
    /// A tick of arbitrary length, for testing purposes.
    pub const fn arbitrary() -> Self {
        Self {
            delta_t: Duration::from_millis(16),
            paused: false,
        }
    }

    /// Constructs a non-paused [`Tick`] of the given length.
    #[inline]
    pub const fn from_duration(delta_t: Duration) -> Self {
        Self {
            delta_t,
            paused: false,
        }
    }

    /// Constructs a non-paused [`Tick`] from a duration expressed in fractional seconds.
    ///
    /// Negative, NaN, or overly large values are clamped to the nearest representable
    /// [`Duration`], so this never panics.
    #[inline]
    pub fn from_seconds(dt: f64) -> Self {
        let delta_t = if dt.is_nan() || dt <= 0.0 {
            Duration::ZERO
        } else {
            Duration::try_from_secs_f64(dt).unwrap_or(Duration::MAX)
        };
        Self::from_duration(delta_t)
    }

    /// Returns the amount of time passed, as a [`Duration`].
    #[inline]
    pub const fn delta_t(self) -> Duration {
        self.delta_t
    }

    /// Returns the amount of time passed, as a floating-point number of seconds.
    #[inline]
    pub fn delta_t_f64(self) -> f64 {
        self.delta_t.as_secs_f64()
    }

    /// Set the paused flag. See [`Tick::paused`] for more information.
    #[must_use]
    #[inline]
    pub const fn pause(self) -> Self {
        Self {
            paused: true,
            ..self
        }
    }

    /// Returns the "paused" state of this Tick. If true, then step operations should
    /// not perform any changes that reflect "in-game" time passing: bodies do not
    /// accelerate or move. Overlaps are still resolved, so that edits made while paused
    /// do not leave bodies stuck inside each other.
    #[inline]
    pub const fn paused(&self) -> bool {
        self.paused
    }
}

impl fmt::Debug for Tick {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { delta_t, paused } = *self;
        write!(f, "Tick({}", delta_t.refmt(&ConciseDebug))?;
        if paused {
            write!(f, ", paused")?;
        }
        write!(f, ")")
    }
}

// -------------------------------------------------------------------------------------------------

/// Produces a variable-length [`Tick`] for each rendered frame, from the real time
/// elapsed since the previous frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    last_frame: Instant,
    paused: bool,
}

impl FrameClock {
    /// Creates a clock whose first tick will measure time from `start`.
    #[inline]
    pub fn new(start: Instant) -> Self {
        Self {
            last_frame: start,
            paused: false,
        }
    }

    /// Returns the [`Tick`] covering the time from the previous frame to `now`, and
    /// remembers `now` as the previous frame.
    ///
    /// If `now` is earlier than the previous frame, the tick has zero length.
    #[inline]
    pub fn advance_to(&mut self, now: Instant) -> Tick {
        let delta_t = now.saturating_duration_since(self.last_frame);
        self.last_frame = now.max(self.last_frame);
        let tick = Tick::from_duration(delta_t);
        if self.paused { tick.pause() } else { tick }
    }

    /// Sets whether the ticks produced from now on are paused.
    #[inline]
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Returns the instant of the most recent frame.
    #[inline]
    pub fn last_frame(&self) -> Instant {
        self.last_frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tick_from_seconds() {
        let tick = Tick::from_seconds(0.25);
        assert_eq!(tick.delta_t(), Duration::from_millis(250));
        assert_eq!(tick.delta_t_f64(), 0.25);
        assert!(!tick.paused());
    }

    #[test]
    fn tick_from_bad_seconds() {
        assert_eq!(Tick::from_seconds(-1.0).delta_t(), Duration::ZERO);
        assert_eq!(Tick::from_seconds(f64::NAN).delta_t(), Duration::ZERO);
        assert_eq!(Tick::from_seconds(f64::INFINITY).delta_t(), Duration::MAX);
    }

    #[test]
    fn tick_debug() {
        assert_eq!(
            format!("{:?}", Tick::from_seconds(0.5).pause()),
            "Tick(500.00 ms, paused)"
        );
    }

    #[test]
    fn frame_clock_measures_elapsed_time() {
        let start = Instant::now();
        let mut clock = FrameClock::new(start);

        let tick = clock.advance_to(start + Duration::from_millis(16));
        assert_eq!(tick.delta_t(), Duration::from_millis(16));

        let tick = clock.advance_to(start + Duration::from_millis(50));
        assert_eq!(tick.delta_t(), Duration::from_millis(34));
        assert_eq!(clock.last_frame(), start + Duration::from_millis(50));
    }

    #[test]
    fn frame_clock_backwards_is_zero() {
        let start = Instant::now() + Duration::from_secs(1);
        let mut clock = FrameClock::new(start);
        let tick = clock.advance_to(start - Duration::from_millis(5));
        assert_eq!(tick.delta_t(), Duration::ZERO);
        assert_eq!(clock.last_frame(), start);
    }

    #[test]
    fn frame_clock_paused() {
        let start = Instant::now();
        let mut clock = FrameClock::new(start);
        clock.set_paused(true);
        let tick = clock.advance_to(start + Duration::from_millis(10));
        assert!(tick.paused());
        assert_eq!(tick.delta_t(), Duration::from_millis(10));
    }
}
