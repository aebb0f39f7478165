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

use std::sync::Arc;

use crate::clock::TimeLeapClock;
use crate::config::ConfigEss;
use crate::enums::GridMode;
use crate::ess::Ess;
use crate::mock::mock_battery::MockBattery;
use crate::mock::mock_grid_switch::MockGridSwitch;
use crate::mock::mock_inverter::MockInverter;
use crate::state_machine::context::Context;

/// Energy storage system with the mock devices on a time leap clock.
pub struct TestSite {
    pub clock: Arc<TimeLeapClock>,
    pub ess: Ess,
    pub battery: MockBattery,
    pub inverter: MockInverter,
    pub grid_switch: MockGridSwitch,
}

impl TestSite {
    pub fn new() -> Self {
        Self::with_config(ConfigEss::default())
    }

    pub fn with_config(config: ConfigEss) -> Self {
        let clock = Arc::new(TimeLeapClock::new());

        Self {
            ess: Ess::new(config),
            battery: MockBattery::new(clock.clone()),
            inverter: MockInverter::new(clock.clone()),
            grid_switch: MockGridSwitch::new(clock.clone(), GridMode::OnGrid),
            clock,
        }
    }

    pub fn context(&mut self) -> Context<'_> {
        Context::new(
            &mut self.ess,
            &mut self.battery,
            &mut self.inverter,
            &mut self.grid_switch,
            self.clock.as_ref(),
        )
    }

    /// Put the battery and the inverter in the started state directly.
    pub fn set_running(&mut self) {
        self.battery.device.set_running(true);
        self.inverter.device.set_running(true);
    }
}
