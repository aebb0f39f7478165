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

use crate::device::DeviceError;
use crate::enums::{FaultFlag, State};
use crate::state_machine::context::Context;
use crate::state_machine::retry_command::{RetryCommand, RetryResult};
use crate::state_machine::state_handler::StateHandler;

/// Start the battery with the site islanded from the grid.
pub struct StartBatteryInOffGridHandler {
    _retry_command: RetryCommand,
}

impl StartBatteryInOffGridHandler {
    pub fn new() -> Self {
        Self {
            _retry_command: RetryCommand::new(),
        }
    }
}

impl StateHandler for StartBatteryInOffGridHandler {
    fn on_entry(&mut self, context: &mut Context<'_>) {
        self._retry_command.reset();
        context
            .ess
            .set_fault(FaultFlag::MaxBatteryStartAttempts, false);
    }

    fn run_and_get_next_state(&mut self, context: &mut Context<'_>) -> Result<State, DeviceError> {
        if context.battery.is_started() {
            return Ok(State::StartBatteryInverterInOffGrid);
        }

        match self._retry_command.run(
            context,
            FaultFlag::MaxBatteryStartAttempts,
            "Start the battery off-grid",
            |context| context.battery.start(),
        ) {
            RetryResult::Pending => Ok(State::StartBatteryInOffGrid),
            RetryResult::GaveUp => Ok(State::Undefined),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::ConfigEss;
    use crate::state_machine::test_site::TestSite;

    #[test]
    fn test_run_and_get_next_state() {
        let mut site = TestSite::new();

        let mut handler = StartBatteryInOffGridHandler::new();
        handler.on_entry(&mut site.context());

        assert_eq!(
            handler.run_and_get_next_state(&mut site.context()),
            Ok(State::StartBatteryInOffGrid)
        );

        site.clock.leap_seconds(5);

        assert_eq!(
            handler.run_and_get_next_state(&mut site.context()),
            Ok(State::StartBatteryInverterInOffGrid)
        );
        assert_eq!(site.battery.device.count_start, 1);
    }

    #[test]
    fn test_run_and_get_next_state_already_started() {
        let mut site = TestSite::new();
        site.battery.device.set_running(true);

        let mut handler = StartBatteryInOffGridHandler::new();
        handler.on_entry(&mut site.context());

        assert_eq!(
            handler.run_and_get_next_state(&mut site.context()),
            Ok(State::StartBatteryInverterInOffGrid)
        );
        assert_eq!(site.battery.device.count_start, 0);
    }

    #[test]
    fn test_run_and_get_next_state_retry() {
        let mut site = TestSite::new();
        site.battery.device.is_responsive = false;

        let mut handler = StartBatteryInOffGridHandler::new();
        handler.on_entry(&mut site.context());

        // Retry after 30 seconds.
        for _ in 0..30 {
            handler.run_and_get_next_state(&mut site.context()).unwrap();
            site.clock.leap_seconds(1);
        }
        assert_eq!(site.battery.device.count_start, 1);

        handler.run_and_get_next_state(&mut site.context()).unwrap();
        assert_eq!(site.battery.device.count_start, 2);

        site.battery.device.is_responsive = true;
        site.battery.device.set_running(true);

        assert_eq!(
            handler.run_and_get_next_state(&mut site.context()),
            Ok(State::StartBatteryInverterInOffGrid)
        );
    }

    #[test]
    fn test_run_and_get_next_state_max_attempts() {
        let mut config = ConfigEss::default();
        config.retry_command_max_attempts = 0;

        let mut site = TestSite::with_config(config);
        site.battery.device.is_responsive = false;

        let mut handler = StartBatteryInOffGridHandler::new();
        handler.on_entry(&mut site.context());

        assert_eq!(
            handler.run_and_get_next_state(&mut site.context()),
            Ok(State::StartBatteryInOffGrid)
        );

        site.clock.leap_seconds(30);

        assert_eq!(
            handler.run_and_get_next_state(&mut site.context()),
            Ok(State::Undefined)
        );
        assert!(site.ess.get_fault(FaultFlag::MaxBatteryStartAttempts));
    }
}
