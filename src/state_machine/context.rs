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

use std::time::{Duration, Instant};

use crate::clock::Clock;
use crate::device::{Battery, GridSwitch, OffGridInverter};
use crate::enums::StartStop;
use crate::ess::Ess;

/// Everything a state handler may read or command in one cycle.
pub struct Context<'a> {
    // Energy storage system aggregate.
    pub ess: &'a mut Ess,
    // Devices.
    pub battery: &'a mut dyn Battery,
    pub inverter: &'a mut dyn OffGridInverter,
    pub grid_switch: &'a mut dyn GridSwitch,
    // Clock.
    pub clock: &'a dyn Clock,
}

impl<'a> Context<'a> {
    /// Create a new context.
    ///
    /// # Arguments
    /// * `ess` - Energy storage system aggregate.
    /// * `battery` - Battery.
    /// * `inverter` - Off-grid capable battery inverter.
    /// * `grid_switch` - Grid switch.
    /// * `clock` - Clock.
    ///
    /// # Returns
    /// New context.
    pub fn new(
        ess: &'a mut Ess,
        battery: &'a mut dyn Battery,
        inverter: &'a mut dyn OffGridInverter,
        grid_switch: &'a mut dyn GridSwitch,
        clock: &'a dyn Clock,
    ) -> Self {
        Self {
            ess,
            battery,
            inverter,
            grid_switch,
            clock,
        }
    }

    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    pub fn elapsed_since(&self, earlier: Instant) -> Duration {
        self.clock.elapsed_since(earlier)
    }

    /// The system left the off-grid operation and the inverter must be
    /// stopped before the contactors are switched back to the grid.
    pub fn is_from_off_to_on_grid(&self) -> bool {
        self.ess.is_from_off_to_on_grid()
    }

    pub fn set_from_off_to_on_grid(&mut self, value: bool) {
        self.ess.set_from_off_to_on_grid(value);
    }

    /// Can a started state be kept or not.
    ///
    /// # Returns
    /// True if there is no fault, both the battery and the inverter are
    /// started, and no stop is requested. Otherwise, false.
    pub fn can_stay_started(&self) -> bool {
        !self.ess.has_faults()
            && self.battery.is_started()
            && self.inverter.is_started()
            && (self.ess.get_start_stop_target() != StartStop::Stop)
    }

    /// Is the battery too low to keep the island running or not.
    ///
    /// # Returns
    /// True if no discharge power is allowed and the state of charge is
    /// below the cutoff. Otherwise, false.
    pub fn is_low_soc(&self) -> bool {
        let is_discharge_blocked = self
            .ess
            .get_allowed_discharge_power()
            .is_some_and(|power| power <= 0.0);

        is_discharge_blocked && self.ess.get_soc().is_some_and(|soc| soc < self.low_soc_cutoff())
    }

    /// Is the state of charge known and back at or above the cutoff or not.
    pub fn is_soc_recovered(&self) -> bool {
        self.ess
            .get_soc()
            .is_some_and(|soc| soc >= self.low_soc_cutoff())
    }

    fn low_soc_cutoff(&self) -> f64 {
        self.ess.config.low_soc_cutoff
    }
}
