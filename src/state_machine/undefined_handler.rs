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
use crate::enums::{StartStop, State};
use crate::state_machine::context::Context;
use crate::state_machine::state_handler::StateHandler;

/// Dispatch on the start/stop target.
pub struct UndefinedHandler;

impl StateHandler for UndefinedHandler {
    fn run_and_get_next_state(&mut self, context: &mut Context<'_>) -> Result<State, DeviceError> {
        context.ess.set_start_stop_status(StartStop::Undefined);

        let next_state = match context.ess.get_start_stop_target() {
            StartStop::Undefined => State::Undefined,
            StartStop::Start => {
                if context.ess.has_faults() {
                    State::Error
                } else {
                    State::GridSwitch
                }
            }
            StartStop::Stop => State::StopBatteryInverter,
        };

        Ok(next_state)
    }
}
