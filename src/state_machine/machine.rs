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

use log::{debug, info};
use strum::IntoEnumIterator;

use crate::device::DeviceError;
use crate::enums::State;
use crate::state_machine::context::Context;
use crate::state_machine::error_handler::ErrorHandler;
use crate::state_machine::grid_switch_handler::GridSwitchHandler;
use crate::state_machine::start_battery_in_off_grid_handler::StartBatteryInOffGridHandler;
use crate::state_machine::start_battery_in_on_grid_handler::StartBatteryInOnGridHandler;
use crate::state_machine::start_battery_inverter_in_off_grid_handler::StartBatteryInverterInOffGridHandler;
use crate::state_machine::start_battery_inverter_in_on_grid_handler::StartBatteryInverterInOnGridHandler;
use crate::state_machine::started_in_off_grid_handler::StartedInOffGridHandler;
use crate::state_machine::started_in_on_grid_handler::StartedInOnGridHandler;
use crate::state_machine::state_handler::StateHandler;
use crate::state_machine::stop_battery_handler::StopBatteryHandler;
use crate::state_machine::stop_battery_inverter_handler::StopBatteryInverterHandler;
use crate::state_machine::stopped_handler::StoppedHandler;
use crate::state_machine::undefined_handler::UndefinedHandler;

/// State machine of the off-grid capable energy storage system. One handler
/// instance per state lives as long as the machine.
pub struct StateMachine {
    // Current state.
    _state: State,
    // State that ran on the last cycle. None before the first cycle.
    _previous_state: Option<State>,
    // Handlers indexed by the state.
    _handlers: Vec<Box<dyn StateHandler + Send>>,
}

impl StateMachine {
    /// Create a new state machine in the undefined state.
    ///
    /// # Returns
    /// New state machine.
    pub fn new() -> Self {
        Self {
            _state: State::Undefined,
            _previous_state: None,
            _handlers: State::iter().map(Self::create_handler).collect(),
        }
    }

    /// Create the handler of the state.
    ///
    /// # Arguments
    /// * `state` - State.
    ///
    /// # Returns
    /// Handler.
    fn create_handler(state: State) -> Box<dyn StateHandler + Send> {
        match state {
            State::Undefined => Box::new(UndefinedHandler),
            State::GridSwitch => Box::new(GridSwitchHandler::new()),
            State::StartBatteryInOnGrid => Box::new(StartBatteryInOnGridHandler::new()),
            State::StartBatteryInverterInOnGrid => {
                Box::new(StartBatteryInverterInOnGridHandler::new())
            }
            State::StartedInOnGrid => Box::new(StartedInOnGridHandler),
            State::StartBatteryInOffGrid => Box::new(StartBatteryInOffGridHandler::new()),
            State::StartBatteryInverterInOffGrid => {
                Box::new(StartBatteryInverterInOffGridHandler::new())
            }
            State::StartedInOffGrid => Box::new(StartedInOffGridHandler::new()),
            State::StopBatteryInverterBeforeSwitch => {
                Box::new(StopBatteryInverterHandler::before_switch())
            }
            State::StopBatteryInverter => Box::new(StopBatteryInverterHandler::new()),
            State::StopBattery => Box::new(StopBatteryHandler::new()),
            State::Stopped => Box::new(StoppedHandler::new()),
            State::Error => Box::new(ErrorHandler::new()),
        }
    }

    /// Get the current state.
    pub fn get_current_state(&self) -> State {
        self._state
    }

    /// Run one cycle of the state machine. The entry hook of the current
    /// state runs first if the state was just entered, and the exit hook
    /// runs if the handler leaves the state.
    ///
    /// # Arguments
    /// * `context` - Context.
    ///
    /// # Returns
    /// State after the cycle.
    ///
    /// # Errors
    /// The handler failed. The state is kept.
    pub fn run(&mut self, context: &mut Context<'_>) -> Result<State, DeviceError> {
        let state = self._state;
        let handler = &mut self._handlers[state as usize];

        if self._previous_state != Some(state) {
            debug!("Enter the state: {}.", state.as_ref());

            handler.on_entry(context);
            self._previous_state = Some(state);
        }

        let next_state = handler.run_and_get_next_state(context)?;
        if next_state != state {
            info!(
                "State transition: {} -> {}.",
                state.as_ref(),
                next_state.as_ref()
            );

            handler.on_exit(context);
            self._state = next_state;
        }

        Ok(next_state)
    }
}
