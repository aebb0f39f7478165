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
use crate::enums::{FaultFlag, GridMode, State, TargetGridMode};
use crate::state_machine::context::Context;
use crate::state_machine::retry_command::{RetryCommand, RetryResult};
use crate::state_machine::state_handler::StateHandler;

/// Start the battery inverter in the grid-forming mode.
pub struct StartBatteryInverterInOffGridHandler {
    _retry_command: RetryCommand,
}

impl StartBatteryInverterInOffGridHandler {
    pub fn new() -> Self {
        Self {
            _retry_command: RetryCommand::new(),
        }
    }
}

impl StateHandler for StartBatteryInverterInOffGridHandler {
    fn on_entry(&mut self, context: &mut Context<'_>) {
        self._retry_command.reset();
        context
            .ess
            .set_fault(FaultFlag::MaxBatteryInverterStartAttempts, false);
    }

    fn run_and_get_next_state(&mut self, context: &mut Context<'_>) -> Result<State, DeviceError> {
        if context.inverter.is_started() {
            return Ok(State::StartedInOffGrid);
        }

        match self._retry_command.run(
            context,
            FaultFlag::MaxBatteryInverterStartAttempts,
            "Start the inverter off-grid",
            |context| {
                let frequency = context.ess.config.off_grid_frequency;

                context.inverter.set_target_grid_mode(TargetGridMode::GoOffGrid)?;
                context.inverter.set_target_off_grid_frequency(frequency)?;
                context.ess.set_grid_mode(GridMode::OffGrid);

                context.inverter.start()
            },
        ) {
            RetryResult::Pending => Ok(State::StartBatteryInverterInOffGrid),
            RetryResult::GaveUp => Ok(State::Undefined),
        }
    }
}
