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
use crate::enums::TargetGridMode;

/// Battery inverter that is able to form an island grid.
pub trait OffGridInverter {
    /// Start the inverter.
    fn start(&mut self) -> Result<(), DeviceError>;

    /// Stop the inverter.
    fn stop(&mut self) -> Result<(), DeviceError>;

    /// Is the inverter fully started or not.
    fn is_started(&self) -> bool;

    /// Is the inverter fully stopped or not.
    fn is_stopped(&self) -> bool;

    /// Set the grid mode the inverter should operate in.
    ///
    /// # Arguments
    /// * `target_grid_mode` - Target grid mode.
    fn set_target_grid_mode(&mut self, target_grid_mode: TargetGridMode)
        -> Result<(), DeviceError>;

    /// Set the frequency of the island grid.
    ///
    /// # Arguments
    /// * `frequency` - Frequency in Hz.
    fn set_target_off_grid_frequency(&mut self, frequency: f64) -> Result<(), DeviceError>;
}
