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

use serde_json::{json, Value};

use crate::enums::{FaultFlag, GridMode, StartStop, State};

pub struct Event;
impl Event {
    /// Get the message of the state machine state.
    ///
    /// # Arguments
    /// * `state` - Current state.
    ///
    /// # Returns
    /// The message of the state machine state.
    pub fn get_message_state(state: State) -> Value {
        json!({
            "id": "stateMachine",
            "state": state as u8,
            "name": state.as_ref(),
        })
    }

    /// Get the message of the reported start/stop status.
    ///
    /// # Arguments
    /// * `start_stop` - Start/stop status.
    ///
    /// # Returns
    /// The message of the start/stop status.
    pub fn get_message_start_stop(start_stop: StartStop) -> Value {
        json!({
            "id": "startStop",
            "status": start_stop as u8,
        })
    }

    /// Get the message of the reported grid mode.
    ///
    /// # Arguments
    /// * `grid_mode` - Grid mode.
    ///
    /// # Returns
    /// The message of the grid mode.
    pub fn get_message_grid_mode(grid_mode: GridMode) -> Value {
        json!({
            "id": "gridMode",
            "mode": grid_mode as u8,
        })
    }

    /// Get the message of the fault flag.
    ///
    /// # Arguments
    /// * `flag` - Fault flag.
    /// * `is_set` - Flag is set or not.
    ///
    /// # Returns
    /// The message of the fault flag.
    pub fn get_message_fault(flag: FaultFlag, is_set: bool) -> Value {
        json!({
            "id": "fault",
            "name": flag.as_ref(),
            "isSet": is_set,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_message_state() {
        assert_eq!(
            Event::get_message_state(State::GridSwitch).to_string(),
            r#"{"id":"stateMachine","name":"GridSwitch","state":1}"#
        );
    }

    #[test]
    fn test_get_message_start_stop() {
        assert_eq!(
            Event::get_message_start_stop(StartStop::Stop).to_string(),
            r#"{"id":"startStop","status":2}"#
        );
    }

    #[test]
    fn test_get_message_grid_mode() {
        assert_eq!(
            Event::get_message_grid_mode(GridMode::OffGrid).to_string(),
            r#"{"id":"gridMode","mode":2}"#
        );
    }

    #[test]
    fn test_get_message_fault() {
        assert_eq!(
            Event::get_message_fault(FaultFlag::MaxBatteryStartAttempts, true).to_string(),
            r#"{"id":"fault","isSet":true,"name":"MaxBatteryStartAttempts"}"#
        );
    }
}
