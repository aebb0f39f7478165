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

use serde::Serialize;
use serde_json::Value;

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryEss {
    // Time of the snapshot in milliseconds since the UNIX epoch.
    pub timestamp: u64,
    // State machine state.
    pub state: String,
    // Reported start/stop status.
    pub start_stop: String,
    // Reported grid mode.
    pub grid_mode: String,
    // State of charge in percent.
    pub soc: Option<f64>,
    // Allowed discharge power in watt.
    pub allowed_discharge_power: Option<f64>,
    // Fault flags.
    pub max_battery_start_attempts: bool,
    pub max_battery_stop_attempts: bool,
    pub max_battery_inverter_start_attempts: bool,
    pub max_battery_inverter_stop_attempts: bool,
}

impl TelemetryEss {
    /// Get the message of the telemetry.
    ///
    /// # Arguments
    /// * `digit` - The number of digits after the decimal point.
    ///
    /// # Returns
    /// The message of the telemetry.
    pub fn get_message(&self, digit: i32) -> Value {
        let mut telemetry = self.clone();
        telemetry.soc = telemetry.soc.map(|value| Self::round(value, digit));
        telemetry.allowed_discharge_power = telemetry
            .allowed_discharge_power
            .map(|value| Self::round(value, digit));

        let mut message = serde_json::to_value(&telemetry).unwrap_or(Value::Null);
        if let Value::Object(map) = &mut message {
            map.insert(String::from("id"), Value::from("essStatus"));
        }

        message
    }

    /// Round a value to a specific digit.
    ///
    /// # Arguments
    /// * `value` - The value to be rounded.
    /// * `digit` - The number of digits after the decimal point.
    ///
    /// # Returns
    /// The rounded value.
    fn round(value: f64, digit: i32) -> f64 {
        let normalized = 10.0_f64.powi(digit);
        (value * normalized).round() / normalized
    }
}
