// This file is part of ts_ess_controller.
//
// Developed for the energy storage systems operated on-grid and off-grid.
// See the COPYRIGHT file at the top-level directory of this distribution
// for details of code ownership.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Source of the current time. The state handlers only compare the elapsed
/// time between two instants read from the clock.
pub trait Clock {
    /// Get the current instant.
    ///
    /// # Returns
    /// Current instant.
    fn now(&self) -> Instant;

    /// Get the elapsed time since an earlier instant.
    ///
    /// # Arguments
    /// * `earlier` - Earlier instant.
    ///
    /// # Returns
    /// Elapsed time. Zero if the instant is in the future.
    fn elapsed_since(&self, earlier: Instant) -> Duration {
        self.now().saturating_duration_since(earlier)
    }
}

/// Clock of the operating system.
#[derive(Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when asked to. Used for the deterministic timing in
/// the tests and the simulation.
pub struct TimeLeapClock {
    // Current instant.
    _now: Mutex<Instant>,
}

impl TimeLeapClock {
    /// Create a new clock frozen at the current instant.
    ///
    /// # Returns
    /// New clock.
    pub fn new() -> Self {
        Self {
            _now: Mutex::new(Instant::now()),
        }
    }

    /// Move the clock forward.
    ///
    /// # Arguments
    /// * `duration` - Duration to move forward.
    pub fn leap(&self, duration: Duration) {
        if let Ok(mut now) = self._now.lock() {
            *now += duration;
        }
    }

    /// Move the clock forward in seconds.
    ///
    /// # Arguments
    /// * `seconds` - Seconds to move forward.
    pub fn leap_seconds(&self, seconds: u64) {
        self.leap(Duration::from_secs(seconds));
    }
}

impl Clock for TimeLeapClock {
    fn now(&self) -> Instant {
        match self._now.lock() {
            Ok(now) => *now,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock() {
        let clock = SystemClock;

        let earlier = clock.now();
        assert!(clock.now() >= earlier);
    }

    #[test]
    fn test_time_leap_clock() {
        let clock = TimeLeapClock::new();

        let earlier = clock.now();
        assert_eq!(clock.now(), earlier);

        clock.leap_seconds(60);
        assert_eq!(clock.elapsed_since(earlier), Duration::from_secs(60));

        clock.leap(Duration::from_millis(500));
        assert_eq!(clock.elapsed_since(earlier), Duration::from_millis(60500));
    }

    #[test]
    fn test_elapsed_since_future() {
        let clock = TimeLeapClock::new();

        let future = clock.now() + Duration::from_secs(10);
        assert_eq!(clock.elapsed_since(future), Duration::ZERO);
    }
}
