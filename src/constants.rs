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

// Retry of the start/stop commands
pub const RETRY_COMMAND_SECONDS: u64 = 30;
pub const RETRY_COMMAND_MAX_ATTEMPTS: u32 = 30;

// The grid must be sensed continuously for this time before the off-grid
// operation is handed over to the grid.
pub const HANDOVER_SECONDS: u64 = 60;

// Minimum time between two stop commands to the inverter while handing over
// to the grid.
pub const HANDOVER_STOP_INVERTER_SECONDS: u64 = 60;

// Cool-down time of the error state.
pub const ERROR_LOCKOUT_SECONDS: u64 = 120;

// Target frequency of the inverter in off-grid operation in Hz. It is above
// the nominal frequency so the PV inverters curtail their output.
pub const OFF_GRID_FREQUENCY: f64 = 52.0;

// State of charge in percent.
pub const LOW_SOC_CUTOFF: f64 = 5.0;

pub const DIRECTORY_CONFIG: &str = "config";
pub const FILE_PARAMETERS_ESS: &str = "parameters_ess.yaml";
pub const FILE_PARAMETERS_APP: &str = "parameters_app.yaml";
pub const FILE_PARAMETERS_SIMULATION: &str = "parameters_simulation.yaml";
