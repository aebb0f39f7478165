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

use log::debug;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::clock::Clock;
use crate::device::DeviceError;

/// Start/stop behavior shared by the mock battery and the mock inverter. The
/// device reaches the commanded state after a settling time on the clock.
pub struct MockDevice {
    // Name of the device.
    pub name: String,
    // Device reacts to the commands or not. If not, the commands are accepted
    // but the device never reaches the commanded state.
    pub is_responsive: bool,
    // Commands fail or not.
    pub is_command_failing: bool,
    // Number of received start and stop commands.
    pub count_start: u32,
    pub count_stop: u32,
    // Clock to measure the settling time.
    _clock: Arc<dyn Clock + Send + Sync>,
    // Last commanded state.
    _is_running: bool,
    // Time of the last command that changed the state.
    _command_time: Option<Instant>,
    // Settling times.
    _time_start: Duration,
    _time_stop: Duration,
}

impl MockDevice {
    /// Create a new stopped mock device.
    ///
    /// # Arguments
    /// * `name` - Name of the device.
    /// * `clock` - Clock to measure the settling time.
    /// * `time_start` - Time in milliseconds to start.
    /// * `time_stop` - Time in milliseconds to stop.
    ///
    /// # Returns
    /// New mock device.
    pub fn new(
        name: &str,
        clock: Arc<dyn Clock + Send + Sync>,
        time_start: u64,
        time_stop: u64,
    ) -> Self {
        Self {
            name: String::from(name),

            is_responsive: true,
            is_command_failing: false,

            count_start: 0,
            count_stop: 0,

            _clock: clock,

            _is_running: false,
            _command_time: None,

            _time_start: Duration::from_millis(time_start),
            _time_stop: Duration::from_millis(time_stop),
        }
    }

    /// Start the device.
    pub fn start(&mut self) -> Result<(), DeviceError> {
        self.count_start += 1;
        self.command(true)
    }

    /// Stop the device.
    pub fn stop(&mut self) -> Result<(), DeviceError> {
        self.count_stop += 1;
        self.command(false)
    }

    /// Apply the command.
    ///
    /// # Arguments
    /// * `is_running` - Commanded state.
    fn command(&mut self, is_running: bool) -> Result<(), DeviceError> {
        if self.is_command_failing {
            return Err(DeviceError::Communication {
                device: self.name.clone(),
                reason: String::from("no response"),
            });
        }

        if self.is_responsive && (self._is_running != is_running) {
            debug!("Mock {} is commanded to running: {is_running}.", self.name);

            self._is_running = is_running;
            self._command_time = Some(self._clock.now());
        }

        Ok(())
    }

    /// Put the device in the settled state directly.
    ///
    /// # Arguments
    /// * `is_running` - Device is running or not.
    pub fn set_running(&mut self, is_running: bool) {
        self._is_running = is_running;
        self._command_time = None;
    }

    /// Is the last command settled or not.
    ///
    /// # Returns
    /// True if the settling time passed. Otherwise, false.
    fn is_settled(&self) -> bool {
        match self._command_time {
            Some(command_time) => {
                let settling_time = if self._is_running {
                    self._time_start
                } else {
                    self._time_stop
                };

                self._clock.elapsed_since(command_time) >= settling_time
            }
            None => true,
        }
    }

    /// Is the device fully started or not.
    pub fn is_started(&self) -> bool {
        self._is_running && self.is_settled()
    }

    /// Is the device fully stopped or not.
    pub fn is_stopped(&self) -> bool {
        !self._is_running && self.is_settled()
    }
}
