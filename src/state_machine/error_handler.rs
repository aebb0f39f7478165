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
use crate::enums::State;
use crate::state_machine::context::Context;
use crate::state_machine::state_handler::StateHandler;

/// Stop everything and wait for the cool-down time. The fault flags are
/// cleared when the state is left.
pub struct ErrorHandler {
    // Time the state was entered.
    _entry_time: Option<Instant>,
}

impl ErrorHandler {
    pub fn new() -> Self {
        Self { _entry_time: None }
    }
}

impl StateHandler for ErrorHandler {
    fn on_entry(&mut self, context: &mut Context<'_>) {
        self._entry_time = Some(context.now());

        if let Err(error) = context.battery.stop() {
            warn!("Failed to stop the battery in the error state: {error}");
        }
        if let Err(error) = context.inverter.stop() {
            warn!("Failed to stop the inverter in the error state: {error}");
        }
    }

    fn run_and_get_next_state(&mut self, context: &mut Context<'_>) -> Result<State, DeviceError> {
        let entry_time = *self._entry_time.get_or_insert(context.now());

        if context.elapsed_since(entry_time) >= context.ess.config.error_lockout_period() {
            Ok(State::Undefined)
        } else {
            Ok(State::Error)
        }
    }

    fn on_exit(&mut self, context: &mut Context<'_>) {
        info!("Leave the error state and clear the faults.");

        context.ess.clear_faults();
        self._entry_time = None;
    }
}
