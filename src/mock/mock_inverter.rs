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

use crate::clock::Clock;
use crate::device::{DeviceError, OffGridInverter};
use crate::enums::TargetGridMode;
use crate::mock::mock_constants::{PLANT_TIME_INVERTER_START, PLANT_TIME_INVERTER_STOP};
use crate::mock::mock_device::MockDevice;

pub struct MockInverter {
    // Start/stop behavior.
    pub device: MockDevice,
    // Last commanded target grid mode.
    pub target_grid_mode: Option<TargetGridMode>,
    // Last commanded off-grid frequency in Hz.
    pub off_grid_frequency: Option<f64>,
    // Number of the target grid mode commands.
    pub count_target_grid_mode: u32,
}

impl MockInverter {
    /// Create a new stopped mock inverter with the default plant values.
    ///
    /// # Arguments
    /// * `clock` - Clock to measure the settling time.
    ///
    /// # Returns
    /// New mock inverter.
    pub fn new(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self::with_times(clock, PLANT_TIME_INVERTER_START, PLANT_TIME_INVERTER_STOP)
    }

    /// Create a new stopped mock inverter.
    ///
    /// # Arguments
    /// * `clock` - Clock to measure the settling time.
    /// * `time_start` - Time in milliseconds to start.
    /// * `time_stop` - Time in milliseconds to stop.
    ///
    /// # Returns
    /// New mock inverter.
    pub fn with_times(clock: Arc<dyn Clock + Send + Sync>, time_start: u64, time_stop: u64) -> Self {
        Self {
            device: MockDevice::new("inverter", clock, time_start, time_stop),
            target_grid_mode: None,
            off_grid_frequency: None,
            count_target_grid_mode: 0,
        }
    }
}

impl OffGridInverter for MockInverter {
    fn start(&mut self) -> Result<(), DeviceError> {
        self.device.start()
    }

    fn stop(&mut self) -> Result<(), DeviceError> {
        self.device.stop()
    }

    fn is_started(&self) -> bool {
        self.device.is_started()
    }

    fn is_stopped(&self) -> bool {
        self.device.is_stopped()
    }

    fn set_target_grid_mode(
        &mut self,
        target_grid_mode: TargetGridMode,
    ) -> Result<(), DeviceError> {
        self.count_target_grid_mode += 1;
        self.target_grid_mode = Some(target_grid_mode);

        Ok(())
    }

    fn set_target_off_grid_frequency(&mut self, frequency: f64) -> Result<(), DeviceError> {
        self.off_grid_frequency = Some(frequency);

        Ok(())
    }
}
