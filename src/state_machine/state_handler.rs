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
use crate::enums::State;
use crate::state_machine::context::Context;

/// Behavior of one state. The same handler instance is used for the whole
/// lifetime of the state machine, so it can keep the data of the current
/// state occupancy between the cycles.
pub trait StateHandler {
    /// Called on the first cycle after the state is entered.
    ///
    /// # Arguments
    /// * `context` - Context.
    fn on_entry(&mut self, _context: &mut Context<'_>) {}

    /// Run the state and decide the next one.
    ///
    /// # Arguments
    /// * `context` - Context.
    ///
    /// # Returns
    /// Next state. The state is kept if it equals the current one.
    ///
    /// # Errors
    /// A device command failed.
    fn run_and_get_next_state(&mut self, context: &mut Context<'_>) -> Result<State, DeviceError>;

    /// Called on the cycle the state is left.
    ///
    /// # Arguments
    /// * `context` - Context.
    fn on_exit(&mut self, _context: &mut Context<'_>) {}
}
