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

pub mod context;
pub mod error_handler;
pub mod grid_switch_handler;
pub mod machine;
pub mod retry_command;
pub mod start_battery_in_off_grid_handler;
pub mod start_battery_in_on_grid_handler;
pub mod start_battery_inverter_in_off_grid_handler;
pub mod start_battery_inverter_in_on_grid_handler;
pub mod started_in_off_grid_handler;
pub mod started_in_on_grid_handler;
pub mod state_handler;
pub mod stop_battery_handler;
pub mod stop_battery_inverter_handler;
pub mod stopped_handler;
pub mod undefined_handler;

#[cfg(test)]
pub mod test_site;

pub use context::Context;
pub use machine::StateMachine;
pub use state_handler::StateHandler;
