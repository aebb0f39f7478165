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

/// Start the battery inverter in the grid-following mode.
pub struct StartBatteryInverterInOnGridHandler {
    _retry_command: RetryCommand,
}

impl StartBatteryInverterInOnGridHandler {
    pub fn new() -> Self {
        Self {
            _retry_command: RetryCommand::new(),
        }
    }
}

impl StateHandler for StartBatteryInverterInOnGridHandler {
    fn on_entry(&mut self, context: &mut Context<'_>) {
        self._retry_command.reset();
        context
            .ess
            .set_fault(FaultFlag::MaxBatteryInverterStartAttempts, false);
    }

    fn run_and_get_next_state(&mut self, context: &mut Context<'_>) -> Result<State, DeviceError> {
        if context.inverter.is_started() {
            return Ok(State::StartedInOnGrid);
        }

        match self._retry_command.run(
            context,
            FaultFlag::MaxBatteryInverterStartAttempts,
            "Start the inverter on-grid",
            |context| {
                context.inverter.set_target_grid_mode(TargetGridMode::GoOnGrid)?;
                context.ess.set_grid_mode(GridMode::OnGrid);

                context.inverter.start()
            },
        ) {
            RetryResult::Pending => Ok(State::StartBatteryInverterInOnGrid),
            RetryResult::GaveUp => Ok(State::Undefined),
        }
    }
}
