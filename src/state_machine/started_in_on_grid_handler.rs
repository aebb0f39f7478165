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
use crate::enums::{GridMode, StartStop, State};
use crate::state_machine::context::Context;
use crate::state_machine::state_handler::StateHandler;

/// Running with the grid connected. No device is commanded here.
pub struct StartedInOnGridHandler;

impl StateHandler for StartedInOnGridHandler {
    fn run_and_get_next_state(&mut self, context: &mut Context<'_>) -> Result<State, DeviceError> {
        if !context.can_stay_started() {
            return Ok(State::Undefined);
        }

        context.ess.set_grid_mode(GridMode::OnGrid);
        context.ess.set_start_stop_status(StartStop::Start);

        Ok(State::StartedInOnGrid)
    }
}
