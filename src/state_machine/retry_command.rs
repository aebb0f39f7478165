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

use log::{info, warn};
use std::time::Instant;

use crate::device::DeviceError;
use crate::enums::FaultFlag;
use crate::state_machine::context::Context;

/// Result of one poll of a retried command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RetryResult {
    // The command was issued or the retry period is still running.
    Pending,
    // The maximum attempts were used up and the fault flag is latched.
    GaveUp,
}

/// Bounded retry of a device command. The command is repeated after each
/// retry period until the caller sees the device in the expected state, or
/// the attempts are used up.
#[derive(Default)]
pub struct RetryCommand {
    // Time of the last issued command. None if no command was issued in this
    // state occupancy.
    _last_attempt: Option<Instant>,
    // Number of issued commands in this state occupancy.
    _attempt_counter: u32,
}

impl RetryCommand {
    /// Create a new retry command.
    ///
    /// # Returns
    /// New retry command.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous attempts.
    pub fn reset(&mut self) {
        self._last_attempt = None;
        self._attempt_counter = 0;
    }

    /// Poll the retried command. The caller must check the expected device
    /// state before this.
    ///
    /// # Arguments
    /// * `context` - Context.
    /// * `fault_flag` - Fault flag to latch when the attempts are used up.
    /// * `description` - Description of the command for the log.
    /// * `command` - Command to issue.
    ///
    /// # Returns
    /// Result of the poll.
    pub fn run<F>(
        &mut self,
        context: &mut Context<'_>,
        fault_flag: FaultFlag,
        description: &str,
        command: F,
    ) -> RetryResult
    where
        F: FnOnce(&mut Context<'_>) -> Result<(), DeviceError>,
    {
        if let Some(last_attempt) = self._last_attempt {
            if context.elapsed_since(last_attempt) < context.ess.config.retry_period() {
                return RetryResult::Pending;
            }
        }

        let max_attempts = context.ess.config.retry_command_max_attempts;
        if self._attempt_counter > max_attempts {
            context.ess.set_fault(fault_flag, true);

            return RetryResult::GaveUp;
        }

        info!(
            "{description}: attempt {} of {}.",
            self._attempt_counter.saturating_add(1),
            max_attempts.saturating_add(1)
        );

        // A failed command still uses one attempt.
        if let Err(error) = command(context) {
            warn!("{description} failed: {error}");
        }

        self._last_attempt = Some(context.now());
        self._attempt_counter = self._attempt_counter.saturating_add(1);

        RetryResult::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::ConfigEss;
    use crate::state_machine::test_site::TestSite;

    fn create_test_site() -> TestSite {
        let mut config = ConfigEss::default();
        config.retry_command_seconds = 10;
        config.retry_command_max_attempts = 2;

        TestSite::with_config(config)
    }

    fn count_command(context: &mut Context<'_>) -> Result<(), DeviceError> {
        context.battery.start()
    }

    #[test]
    fn test_run_first_attempt() {
        let mut site = create_test_site();
        let mut retry_command = RetryCommand::new();

        let result = retry_command.run(
            &mut site.context(),
            FaultFlag::MaxBatteryStartAttempts,
            "Start battery",
            count_command,
        );

        assert_eq!(result, RetryResult::Pending);
        assert_eq!(retry_command._attempt_counter, 1);
        assert_eq!(site.battery.device.count_start, 1);
    }

    #[test]
    fn test_run_wait_retry_period() {
        let mut site = create_test_site();
        let mut retry_command = RetryCommand::new();

        for _ in 0..5 {
            retry_command.run(
                &mut site.context(),
                FaultFlag::MaxBatteryStartAttempts,
                "Start battery",
                count_command,
            );
            site.clock.leap_seconds(9);
        }

        // Commands at 0 s, 18 s and 36 s.
        assert_eq!(site.battery.device.count_start, 3);
    }

    #[test]
    fn test_run_give_up() {
        let mut site = create_test_site();
        let mut retry_command = RetryCommand::new();

        let mut results = Vec::new();
        for _ in 0..4 {
            results.push(retry_command.run(
                &mut site.context(),
                FaultFlag::MaxBatteryStartAttempts,
                "Start battery",
                count_command,
            ));
            site.clock.leap_seconds(10);
        }

        assert_eq!(
            results,
            vec![
                RetryResult::Pending,
                RetryResult::Pending,
                RetryResult::Pending,
                RetryResult::GaveUp
            ]
        );
        assert_eq!(site.battery.device.count_start, 3);
        assert!(site.ess.get_fault(FaultFlag::MaxBatteryStartAttempts));
    }

    #[test]
    fn test_run_failed_command_counts() {
        let mut site = create_test_site();
        site.battery.device.is_command_failing = true;

        let mut retry_command = RetryCommand::new();
        let result = retry_command.run(
            &mut site.context(),
            FaultFlag::MaxBatteryStartAttempts,
            "Start battery",
            count_command,
        );

        assert_eq!(result, RetryResult::Pending);
        assert_eq!(retry_command._attempt_counter, 1);
    }

    #[test]
    fn test_reset() {
        let mut site = create_test_site();
        let mut retry_command = RetryCommand::new();

        retry_command.run(
            &mut site.context(),
            FaultFlag::MaxBatteryStartAttempts,
            "Start battery",
            count_command,
        );
        retry_command.reset();

        assert_eq!(retry_command._attempt_counter, 0);

        // No need to wait for the retry period after the reset.
        retry_command.run(
            &mut site.context(),
            FaultFlag::MaxBatteryStartAttempts,
            "Start battery",
            count_command,
        );

        assert_eq!(site.battery.device.count_start, 2);
    }

    #[test]
    fn test_run_unbounded_max_attempts() {
        let mut config = ConfigEss::default();
        config.retry_command_max_attempts = u32::MAX;

        let mut site = TestSite::with_config(config);
        let mut retry_command = RetryCommand::new();

        let result = retry_command.run(
            &mut site.context(),
            FaultFlag::MaxBatteryStartAttempts,
            "Start battery",
            count_command,
        );

        assert_eq!(result, RetryResult::Pending);
        assert_eq!(site.battery.device.count_start, 1);
    }
}
