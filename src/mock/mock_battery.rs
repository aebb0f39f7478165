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
use crate::device::{Battery, DeviceError};
use crate::mock::mock_constants::{
    PLANT_DISCHARGE_MAX_CURRENT, PLANT_SOC, PLANT_TIME_BATTERY_START, PLANT_TIME_BATTERY_STOP,
    PLANT_VOLTAGE,
};
use crate::mock::mock_device::MockDevice;

pub struct MockBattery {
    // Start/stop behavior.
    pub device: MockDevice,
    // State of charge in percent.
    pub soc: Option<f64>,
    // Voltage in volt.
    pub voltage: Option<f64>,
    // Maximum allowed discharge current in ampere.
    pub discharge_max_current: Option<f64>,
}

impl MockBattery {
    /// Create a new stopped mock battery with the default plant values.
    ///
    /// # Arguments
    /// * `clock` - Clock to measure the settling time.
    ///
    /// # Returns
    /// New mock battery.
    pub fn new(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self::with_times(clock, PLANT_TIME_BATTERY_START, PLANT_TIME_BATTERY_STOP)
    }

    /// Create a new stopped mock battery.
    ///
    /// # Arguments
    /// * `clock` - Clock to measure the settling time.
    /// * `time_start` - Time in milliseconds to start.
    /// * `time_stop` - Time in milliseconds to stop.
    ///
    /// # Returns
    /// New mock battery.
    pub fn with_times(clock: Arc<dyn Clock + Send + Sync>, time_start: u64, time_stop: u64) -> Self {
        Self {
            device: MockDevice::new("battery", clock, time_start, time_stop),
            soc: Some(PLANT_SOC),
            voltage: Some(PLANT_VOLTAGE),
            discharge_max_current: Some(PLANT_DISCHARGE_MAX_CURRENT),
        }
    }
}

impl Battery for MockBattery {
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

    fn get_soc(&self) -> Option<f64> {
        self.soc
    }

    fn get_voltage(&self) -> Option<f64> {
        self.voltage
    }

    fn get_discharge_max_current(&self) -> Option<f64> {
        self.discharge_max_current
    }
}
