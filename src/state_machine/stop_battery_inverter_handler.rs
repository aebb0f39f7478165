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

/// Stop the battery inverter. The same behavior serves two states: the
/// normal shutdown continues with the battery, and the shutdown before the
/// handover to the grid goes back to the dispatch.
pub struct StopBatteryInverterHandler {
    _retry_command: RetryCommand,
    // State of this handler.
    _state: State,
    // Next state when the inverter is stopped.
    _next_state: State,
}

impl StopBatteryInverterHandler {
    /// Handler of the normal shutdown.
    pub fn new() -> Self {
        Self {
            _retry_command: RetryCommand::new(),
            _state: State::StopBatteryInverter,
            _next_state: State::StopBattery,
        }
    }

    /// Handler of the shutdown before the handover to the grid.
    pub fn before_switch() -> Self {
        Self {
            _retry_command: RetryCommand::new(),
            _state: State::StopBatteryInverterBeforeSwitch,
            _next_state: State::Undefined,
        }
    }
}

impl StateHandler for StopBatteryInverterHandler {
    fn on_entry(&mut self, context: &mut Context<'_>) {
        self._retry_command.reset();
        context
            .ess
            .set_fault(FaultFlag::MaxBatteryInverterStopAttempts, false);
    }

    fn run_and_get_next_state(&mut self, context: &mut Context<'_>) -> Result<State, DeviceError> {
        if context.inverter.is_stopped() {
            return Ok(self._next_state);
        }

        match self._retry_command.run(
            context,
            FaultFlag::MaxBatteryInverterStopAttempts,
            "Stop the inverter",
            |context| context.inverter.stop(),
        ) {
            RetryResult::Pending => Ok(self._state),
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
        site.set_running();

        let mut handler = StopBatteryInverterHandler::new();
        handler.on_entry(&mut site.context());

        assert_eq!(
            handler.run_and_get_next_state(&mut site.context()),
            Ok(State::StopBatteryInverter)
        );
        assert_eq!(site.inverter.device.count_stop, 1);

        // Inverter needs 1 second to stop.
        site.clock.leap_seconds(1);

        assert_eq!(
            handler.run_and_get_next_state(&mut site.context()),
            Ok(State::StopBattery)
        );
    }

    #[test]
    fn test_run_and_get_next_state_before_switch() {
        let mut site = TestSite::new();
        site.set_running();

        let mut handler = StopBatteryInverterHandler::before_switch();
        handler.on_entry(&mut site.context());

        assert_eq!(
            handler.run_and_get_next_state(&mut site.context()),
            Ok(State::StopBatteryInverterBeforeSwitch)
        );

        site.clock.leap_seconds(1);

        assert_eq!(
            handler.run_and_get_next_state(&mut site.context()),
            Ok(State::Undefined)
        );
    }

    #[test]
    fn test_run_and_get_next_state_already_stopped() {
        let mut site = TestSite::new();

        let mut handler = StopBatteryInverterHandler::new();
        handler.on_entry(&mut site.context());

        assert_eq!(
            handler.run_and_get_next_state(&mut site.context()),
            Ok(State::StopBattery)
        );
        assert_eq!(site.inverter.device.count_stop, 0);
    }

    #[test]
    fn test_run_and_get_next_state_max_attempts() {
        let mut config = ConfigEss::default();
        config.retry_command_seconds = 1;
        config.retry_command_max_attempts = 5;

        let mut site = TestSite::with_config(config);
        site.set_running();
        site.inverter.device.is_responsive = false;

        let mut handler = StopBatteryInverterHandler::before_switch();
        handler.on_entry(&mut site.context());

        for _ in 0..6 {
            assert_eq!(
                handler.run_and_get_next_state(&mut site.context()),
                Ok(State::StopBatteryInverterBeforeSwitch)
            );
            site.clock.leap_seconds(1);
        }

        assert_eq!(
            handler.run_and_get_next_state(&mut site.context()),
            Ok(State::Undefined)
        );
        assert_eq!(site.inverter.device.count_stop, 6);
        assert!(site
            .ess
            .get_fault(FaultFlag::MaxBatteryInverterStopAttempts));
    }
}
