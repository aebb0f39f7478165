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
use crate::enums::{ContactorState, GridMode};

/// Mechanical switch between the site and the grid. The main contactor
/// connects the site to the grid. The grounding contactor provides the
/// reference ground of the island grid.
pub trait GridSwitch {
    /// Get the sensed position of the main contactor. None if unknown.
    fn get_main_contactor(&self) -> Option<ContactorState>;

    /// Get the sensed position of the grounding contactor. None if unknown.
    fn get_grounding_contactor(&self) -> Option<ContactorState>;

    /// Command the main contactor.
    ///
    /// # Arguments
    /// * `state` - Position to move to.
    fn set_main_contactor(&mut self, state: ContactorState) -> Result<(), DeviceError>;

    /// Command the grounding contactor.
    ///
    /// # Arguments
    /// * `state` - Position to move to.
    fn set_grounding_contactor(&mut self, state: ContactorState) -> Result<(), DeviceError>;

    /// Get the sensed grid mode, i.e. whether the grid is available.
    fn get_grid_mode(&self) -> GridMode;

    /// Are both contactor positions known or not.
    ///
    /// # Returns
    /// True if both contactors report their position. Otherwise, false.
    fn is_contactor_defined(&self) -> bool {
        self.get_main_contactor().is_some() && self.get_grounding_contactor().is_some()
    }

    /// Are the contactors in the given positions or not.
    ///
    /// # Arguments
    /// * `main` - Wanted position of the main contactor.
    /// * `grounding` - Wanted position of the grounding contactor.
    ///
    /// # Returns
    /// True if both contactors are in the wanted positions. Otherwise, false.
    fn is_contactor_pattern(&self, main: ContactorState, grounding: ContactorState) -> bool {
        self.get_main_contactor() == Some(main) && self.get_grounding_contactor() == Some(grounding)
    }
}
