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

use std::path::Path;

use crate::utility::{get_config, get_parameter_from_config};

#[derive(Clone, PartialEq, Debug)]
pub struct ConfigSimulation {
    // Time in milliseconds for the battery to start and stop.
    pub time_battery_start: u64,
    pub time_battery_stop: u64,
    // Time in milliseconds for the inverter to start and stop.
    pub time_inverter_start: u64,
    pub time_inverter_stop: u64,
    // Mechanical travel time of the contactors in milliseconds.
    pub time_contactor: u64,
    // Grid is available or not at the beginning of the simulation.
    pub is_grid_available: bool,
    // State of charge in percent.
    pub soc: f64,
    // Battery voltage in volt.
    pub voltage: f64,
    // Maximum allowed discharge current in ampere.
    pub discharge_max_current: f64,
}

impl ConfigSimulation {
    /// Create a new ConfigSimulation object from the file.
    ///
    /// # Arguments
    /// * `filepath` - Path to the simulation parameters file.
    ///
    /// # Returns
    /// A new ConfigSimulation object.
    pub fn new(filepath: &Path) -> Self {
        let config = get_config(filepath);

        Self {
            time_battery_start: get_parameter_from_config(&config, filepath, "time_battery_start"),
            time_battery_stop: get_parameter_from_config(&config, filepath, "time_battery_stop"),
            time_inverter_start: get_parameter_from_config(
                &config,
                filepath,
                "time_inverter_start",
            ),
            time_inverter_stop: get_parameter_from_config(&config, filepath, "time_inverter_stop"),
            time_contactor: get_parameter_from_config(&config, filepath, "time_contactor"),
            is_grid_available: get_parameter_from_config(&config, filepath, "is_grid_available"),
            soc: get_parameter_from_config(&config, filepath, "soc"),
            voltage: get_parameter_from_config(&config, filepath, "voltage"),
            discharge_max_current: get_parameter_from_config(
                &config,
                filepath,
                "discharge_max_current",
            ),
        }
    }
}
