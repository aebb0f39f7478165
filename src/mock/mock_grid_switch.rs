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
use std::time::{Duration, Instant};

use crate::clock::Clock;
use crate::device::{DeviceError, GridSwitch};
use crate::enums::{ContactorState, GridMode};
use crate::mock::mock_constants::PLANT_TIME_CONTACTOR;

/// Contactor that moves to the commanded position after the travel time.
struct MockContactor {
    // Settled position. None if unknown.
    position: Option<ContactorState>,
    // Commanded position and the time of the command.
    command: Option<(ContactorState, Instant)>,
}

impl MockContactor {
    fn new(position: Option<ContactorState>) -> Self {
        Self {
            position,
            command: None,
        }
    }

    fn get(&self, clock: &dyn Clock, time_travel: Duration) -> Option<ContactorState> {
        match self.command {
            Some((state, time)) if clock.elapsed_since(time) >= time_travel => Some(state),
            _ => self.position,
        }
    }
}

pub struct MockGridSwitch {
    // Grid mode sensed by the switch.
    pub grid_mode: GridMode,
    // Contactor commands fail or not.
    pub is_command_failing: bool,
    // Number of the contactor commands.
    pub count_main_contactor: u32,
    pub count_grounding_contactor: u32,
    // Clock to measure the travel time.
    _clock: Arc<dyn Clock + Send + Sync>,
    // Travel time of the contactors.
    _time_travel: Duration,
    _main: MockContactor,
    _grounding: MockContactor,
}

impl MockGridSwitch {
    /// Create a new mock grid switch with the default travel time. The
    /// contactors begin in the on-grid pattern.
    ///
    /// # Arguments
    /// * `clock` - Clock to measure the travel time.
    /// * `grid_mode` - Sensed grid mode.
    ///
    /// # Returns
    /// New mock grid switch.
    pub fn new(clock: Arc<dyn Clock + Send + Sync>, grid_mode: GridMode) -> Self {
        Self::with_time(clock, grid_mode, PLANT_TIME_CONTACTOR)
    }

    /// Create a new mock grid switch. The contactors begin in the on-grid
    /// pattern.
    ///
    /// # Arguments
    /// * `clock` - Clock to measure the travel time.
    /// * `grid_mode` - Sensed grid mode.
    /// * `time_travel` - Travel time of the contactors in milliseconds.
    ///
    /// # Returns
    /// New mock grid switch.
    pub fn with_time(
        clock: Arc<dyn Clock + Send + Sync>,
        grid_mode: GridMode,
        time_travel: u64,
    ) -> Self {
        Self {
            grid_mode,
            is_command_failing: false,
            count_main_contactor: 0,
            count_grounding_contactor: 0,
            _clock: clock,
            _time_travel: Duration::from_millis(time_travel),
            _main: MockContactor::new(Some(ContactorState::Close)),
            _grounding: MockContactor::new(Some(ContactorState::Open)),
        }
    }

    /// Put the contactors in the given positions directly. None means the
    /// position is unknown.
    ///
    /// # Arguments
    /// * `main` - Position of the main contactor.
    /// * `grounding` - Position of the grounding contactor.
    pub fn set_contactors(
        &mut self,
        main: Option<ContactorState>,
        grounding: Option<ContactorState>,
    ) {
        self._main = MockContactor::new(main);
        self._grounding = MockContactor::new(grounding);
    }

    /// Check the command can be applied.
    fn check_command(&self, command: &str) -> Result<(), DeviceError> {
        if self.is_command_failing {
            return Err(DeviceError::CommandRejected {
                device: String::from("grid switch"),
                command: String::from(command),
                reason: String::from("digital output is not writable"),
            });
        }

        Ok(())
    }
}

impl GridSwitch for MockGridSwitch {
    fn get_main_contactor(&self) -> Option<ContactorState> {
        self._main.get(self._clock.as_ref(), self._time_travel)
    }

    fn get_grounding_contactor(&self) -> Option<ContactorState> {
        self._grounding.get(self._clock.as_ref(), self._time_travel)
    }

    fn set_main_contactor(&mut self, state: ContactorState) -> Result<(), DeviceError> {
        self.count_main_contactor += 1;
        self.check_command("set_main_contactor")?;

        let position = self.get_main_contactor();
        self._main = MockContactor {
            position,
            command: Some((state, self._clock.now())),
        };

        Ok(())
    }

    fn set_grounding_contactor(&mut self, state: ContactorState) -> Result<(), DeviceError> {
        self.count_grounding_contactor += 1;
        self.check_command("set_grounding_contactor")?;

        let position = self.get_grounding_contactor();
        self._grounding = MockContactor {
            position,
            command: Some((state, self._clock.now())),
        };

        Ok(())
    }

    fn get_grid_mode(&self) -> GridMode {
        self.grid_mode
    }
}
