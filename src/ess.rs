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

use log::{info, warn};
use strum::IntoEnumIterator;

use crate::config::ConfigEss;
use crate::constants::{RETRY_COMMAND_MAX_ATTEMPTS, RETRY_COMMAND_SECONDS};
use crate::enums::{FaultFlag, GridMode, StartStop, StartStopConfig, State};
use crate::event_queue::EventQueue;
use crate::telemetry::event::Event;
use crate::telemetry::telemetry_ess::TelemetryEss;
use crate::utility::get_system_time_ms;

/// Latched fault flags of the energy storage system.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct EssFaults {
    pub max_battery_start_attempts: bool,
    pub max_battery_stop_attempts: bool,
    pub max_battery_inverter_start_attempts: bool,
    pub max_battery_inverter_stop_attempts: bool,
}

impl EssFaults {
    /// Get the flag.
    ///
    /// # Arguments
    /// * `flag` - Fault flag.
    ///
    /// # Returns
    /// True if the flag is set. Otherwise, false.
    pub fn get(&self, flag: FaultFlag) -> bool {
        match flag {
            FaultFlag::MaxBatteryStartAttempts => self.max_battery_start_attempts,
            FaultFlag::MaxBatteryStopAttempts => self.max_battery_stop_attempts,
            FaultFlag::MaxBatteryInverterStartAttempts => self.max_battery_inverter_start_attempts,
            FaultFlag::MaxBatteryInverterStopAttempts => self.max_battery_inverter_stop_attempts,
        }
    }

    fn get_mut(&mut self, flag: FaultFlag) -> &mut bool {
        match flag {
            FaultFlag::MaxBatteryStartAttempts => &mut self.max_battery_start_attempts,
            FaultFlag::MaxBatteryStopAttempts => &mut self.max_battery_stop_attempts,
            FaultFlag::MaxBatteryInverterStartAttempts => {
                &mut self.max_battery_inverter_start_attempts
            }
            FaultFlag::MaxBatteryInverterStopAttempts => {
                &mut self.max_battery_inverter_stop_attempts
            }
        }
    }

    /// Any flag is set or not.
    pub fn any(&self) -> bool {
        self.max_battery_start_attempts
            || self.max_battery_stop_attempts
            || self.max_battery_inverter_start_attempts
            || self.max_battery_inverter_stop_attempts
    }
}

/// Energy storage system aggregate. It holds the channels that the state
/// handlers read and write: the start/stop target and status, the reported
/// grid mode, the battery values, and the latched fault flags.
pub struct Ess {
    // Configuration.
    pub config: ConfigEss,
    // Events to publish.
    pub event_queue: EventQueue,
    // Start/stop target written by the user.
    _start_stop_target: StartStop,
    // Reported start/stop status.
    _start_stop: StartStop,
    // Reported grid mode.
    _grid_mode: GridMode,
    // Current state of the state machine.
    _state: State,
    // State of charge in percent.
    _soc: Option<f64>,
    // Allowed discharge power in watt.
    _allowed_discharge_power: Option<f64>,
    // Fault flags.
    _faults: EssFaults,
    // The system was off-grid and has to hand over to the grid.
    _from_off_to_on_grid: bool,
    // The off-grid operation was stopped by the low state of charge.
    _is_low_soc_stop: bool,
}

impl Ess {
    pub const RETRY_COMMAND_SECONDS: u64 = RETRY_COMMAND_SECONDS;
    pub const RETRY_COMMAND_MAX_ATTEMPTS: u32 = RETRY_COMMAND_MAX_ATTEMPTS;

    /// Create a new energy storage system.
    ///
    /// # Arguments
    /// * `config` - Configuration.
    ///
    /// # Returns
    /// A new energy storage system.
    pub fn new(config: ConfigEss) -> Self {
        Self {
            config,
            event_queue: EventQueue::new(),
            _start_stop_target: StartStop::Undefined,
            _start_stop: StartStop::Undefined,
            _grid_mode: GridMode::Undefined,
            _state: State::Undefined,
            _soc: None,
            _allowed_discharge_power: None,
            _faults: EssFaults::default(),
            _from_off_to_on_grid: false,
            _is_low_soc_stop: false,
        }
    }

    /// Set the start/stop target. Only used when the start/stop mode is
    /// auto.
    ///
    /// # Arguments
    /// * `target` - Start/stop target.
    pub fn set_start_stop(&mut self, target: StartStop) {
        if self._start_stop_target != target {
            info!("Start/stop target is changed to {:?}.", target);
            self._start_stop_target = target;
        }
    }

    /// Get the effective start/stop target.
    ///
    /// # Returns
    /// The written target in the auto mode, otherwise the configured one.
    pub fn get_start_stop_target(&self) -> StartStop {
        match self.config.start_stop {
            StartStopConfig::Auto => self._start_stop_target,
            StartStopConfig::Start => StartStop::Start,
            StartStopConfig::Stop => StartStop::Stop,
        }
    }

    /// Report the start/stop status.
    ///
    /// # Arguments
    /// * `start_stop` - Start/stop status.
    pub fn set_start_stop_status(&mut self, start_stop: StartStop) {
        if self._start_stop != start_stop {
            self._start_stop = start_stop;
            self.event_queue
                .add_event(Event::get_message_start_stop(start_stop));
        }
    }

    /// Get the reported start/stop status.
    pub fn get_start_stop(&self) -> StartStop {
        self._start_stop
    }

    /// Report the grid mode.
    ///
    /// # Arguments
    /// * `grid_mode` - Grid mode.
    pub fn set_grid_mode(&mut self, grid_mode: GridMode) {
        if self._grid_mode != grid_mode {
            self._grid_mode = grid_mode;
            self.event_queue
                .add_event(Event::get_message_grid_mode(grid_mode));
        }
    }

    /// Get the reported grid mode.
    pub fn get_grid_mode(&self) -> GridMode {
        self._grid_mode
    }

    /// Record the current state of the state machine.
    ///
    /// # Arguments
    /// * `state` - Current state.
    pub fn set_state(&mut self, state: State) {
        if self._state != state {
            self._state = state;
            self.event_queue.add_event(Event::get_message_state(state));
        }
    }

    /// Get the current state of the state machine.
    pub fn get_state(&self) -> State {
        self._state
    }

    pub fn set_soc(&mut self, soc: Option<f64>) {
        self._soc = soc;
    }

    pub fn get_soc(&self) -> Option<f64> {
        self._soc
    }

    pub fn set_allowed_discharge_power(&mut self, power: Option<f64>) {
        self._allowed_discharge_power = power;
    }

    pub fn get_allowed_discharge_power(&self) -> Option<f64> {
        self._allowed_discharge_power
    }

    /// Set or clear a fault flag.
    ///
    /// # Arguments
    /// * `flag` - Fault flag.
    /// * `is_set` - Set or clear.
    pub fn set_fault(&mut self, flag: FaultFlag, is_set: bool) {
        let value = self._faults.get_mut(flag);
        if *value != is_set {
            *value = is_set;

            if is_set {
                warn!("Fault {:?} is set.", flag);
            } else {
                info!("Fault {:?} is cleared.", flag);
            }

            self.event_queue
                .add_event(Event::get_message_fault(flag, is_set));
        }
    }

    /// Get a fault flag.
    pub fn get_fault(&self, flag: FaultFlag) -> bool {
        self._faults.get(flag)
    }

    /// Get all the fault flags.
    pub fn get_faults(&self) -> EssFaults {
        self._faults
    }

    /// Clear all the fault flags.
    pub fn clear_faults(&mut self) {
        for flag in FaultFlag::iter() {
            self.set_fault(flag, false);
        }
    }

    /// Is any fault flag set or not.
    pub fn has_faults(&self) -> bool {
        self._faults.any()
    }

    pub fn is_from_off_to_on_grid(&self) -> bool {
        self._from_off_to_on_grid
    }

    pub fn set_from_off_to_on_grid(&mut self, value: bool) {
        self._from_off_to_on_grid = value;
    }

    /// Was the last stop caused by the low state of charge or not. While
    /// set, the stopped system waits for a new start request or a recovered
    /// state of charge.
    pub fn is_low_soc_stop(&self) -> bool {
        self._is_low_soc_stop
    }

    pub fn set_low_soc_stop(&mut self, value: bool) {
        if self._is_low_soc_stop != value {
            info!("Low state of charge stop is latched: {value}.");
            self._is_low_soc_stop = value;
        }
    }

    /// Get the telemetry snapshot.
    ///
    /// # Returns
    /// Telemetry of the energy storage system.
    pub fn get_telemetry(&self) -> TelemetryEss {
        TelemetryEss {
            timestamp: get_system_time_ms(),
            state: String::from(self._state.as_ref()),
            start_stop: String::from(self._start_stop.as_ref()),
            grid_mode: String::from(self._grid_mode.as_ref()),
            soc: self._soc,
            allowed_discharge_power: self._allowed_discharge_power,
            max_battery_start_attempts: self._faults.max_battery_start_attempts,
            max_battery_stop_attempts: self._faults.max_battery_stop_attempts,
            max_battery_inverter_start_attempts: self._faults.max_battery_inverter_start_attempts,
            max_battery_inverter_stop_attempts: self._faults.max_battery_inverter_stop_attempts,
        }
    }
}
