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

use log::{error, info};
use serde_json::Value;
use std::sync::Arc;

use crate::clock::Clock;
use crate::config::ConfigEss;
use crate::device::{Battery, GridSwitch, OffGridInverter};
use crate::enums::{StartStop, State};
use crate::ess::Ess;
use crate::state_machine::{Context, StateMachine};
use crate::telemetry::telemetry_ess::TelemetryEss;

/// Owner of the devices and the state machine. The surrounding loop calls
/// `run_cycle()` periodically.
pub struct EssController {
    // Energy storage system aggregate.
    pub ess: Ess,
    // State machine.
    _state_machine: StateMachine,
    // Devices.
    _battery: Box<dyn Battery + Send>,
    _inverter: Box<dyn OffGridInverter + Send>,
    _grid_switch: Box<dyn GridSwitch + Send>,
    // Clock.
    _clock: Arc<dyn Clock + Send + Sync>,
}

impl EssController {
    /// Create a new controller.
    ///
    /// # Arguments
    /// * `config` - Configuration of the energy storage system.
    /// * `battery` - Battery.
    /// * `inverter` - Off-grid capable battery inverter.
    /// * `grid_switch` - Grid switch.
    /// * `clock` - Clock.
    ///
    /// # Returns
    /// New controller.
    pub fn new(
        config: ConfigEss,
        battery: Box<dyn Battery + Send>,
        inverter: Box<dyn OffGridInverter + Send>,
        grid_switch: Box<dyn GridSwitch + Send>,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Self {
        info!("Start/stop mode: {}.", config.start_stop.as_ref());

        Self {
            ess: Ess::new(config),
            _state_machine: StateMachine::new(),
            _battery: battery,
            _inverter: inverter,
            _grid_switch: grid_switch,
            _clock: clock,
        }
    }

    /// Set the start/stop target.
    ///
    /// # Arguments
    /// * `target` - Start/stop target.
    pub fn set_start_stop(&mut self, target: StartStop) {
        self.ess.set_start_stop(target);
    }

    /// Copy the battery values into the energy storage system.
    fn update_inputs(&mut self) {
        self.ess.set_soc(self._battery.get_soc());

        let allowed_discharge_power = self
            ._battery
            .get_voltage()
            .zip(self._battery.get_discharge_max_current())
            .map(|(voltage, current)| voltage * current);
        self.ess
            .set_allowed_discharge_power(allowed_discharge_power);
    }

    /// Run one cycle. A failed cycle is logged and the next cycle tries
    /// again from the same state.
    ///
    /// # Returns
    /// State after the cycle.
    pub fn run_cycle(&mut self) -> State {
        self.update_inputs();

        let mut context = Context::new(
            &mut self.ess,
            self._battery.as_mut(),
            self._inverter.as_mut(),
            self._grid_switch.as_mut(),
            self._clock.as_ref(),
        );
        if let Err(error) = self._state_machine.run(&mut context) {
            error!(
                "Cycle failed in the state {}: {error}",
                self._state_machine.get_current_state().as_ref()
            );
        }

        let state = self._state_machine.get_current_state();
        self.ess.set_state(state);

        state
    }

    /// Get the current state.
    pub fn get_state(&self) -> State {
        self._state_machine.get_current_state()
    }

    /// Get the telemetry.
    ///
    /// # Returns
    /// Telemetry of the energy storage system.
    pub fn get_telemetry(&self) -> TelemetryEss {
        self.ess.get_telemetry()
    }

    /// Get the events since the last call.
    ///
    /// # Returns
    /// Events.
    pub fn get_events(&mut self) -> Vec<Value> {
        self.ess.event_queue.get_events_and_clear()
    }
}
