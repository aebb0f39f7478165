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

/// Battery that can be started and stopped.
pub trait Battery {
    /// Start the battery.
    fn start(&mut self) -> Result<(), DeviceError>;

    /// Stop the battery.
    fn stop(&mut self) -> Result<(), DeviceError>;

    /// Is the battery fully started or not.
    fn is_started(&self) -> bool;

    /// Is the battery fully stopped or not.
    fn is_stopped(&self) -> bool;

    /// Get the state of charge in percent. None if unknown.
    fn get_soc(&self) -> Option<f64>;

    /// Get the voltage in volt. None if unknown.
    fn get_voltage(&self) -> Option<f64>;

    /// Get the maximum allowed discharge current in ampere. None if unknown.
    fn get_discharge_max_current(&self) -> Option<f64>;
}
