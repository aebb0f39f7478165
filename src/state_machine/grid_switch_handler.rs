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
use std::time::{Duration, Instant};

use crate::constants::HANDOVER_STOP_INVERTER_SECONDS;
use crate::device::{DeviceError, GridSwitch};
use crate::enums::{ContactorState, GridMode, State, TargetGridMode};
use crate::state_machine::context::Context;
use crate::state_machine::state_handler::StateHandler;

/// Put the contactors in the pattern of the sensed grid mode. The target
/// grid mode of the inverter is always set before any contactor moves.
pub struct GridSwitchHandler {
    // Time of the last stop command to the inverter during the handover to
    // the grid.
    _last_stop_attempt: Option<Instant>,
}

impl GridSwitchHandler {
    pub fn new() -> Self {
        Self {
            _last_stop_attempt: None,
        }
    }

    /// The grid is back after the off-grid operation. The inverter must be
    /// stopped before the contactors are switched back.
    ///
    /// # Arguments
    /// * `context` - Context.
    ///
    /// # Errors
    /// The stop command of the inverter failed.
    fn hand_over_to_grid(&mut self, context: &mut Context<'_>) -> Result<(), DeviceError> {
        if context.inverter.is_stopped() {
            info!("Inverter is stopped. Switch back to the grid.");
            context.set_from_off_to_on_grid(false);

            return Ok(());
        }

        context.ess.set_grid_mode(GridMode::Undefined);

        let is_due = self._last_stop_attempt.map_or(true, |last_stop_attempt| {
            context.elapsed_since(last_stop_attempt)
                >= Duration::from_secs(HANDOVER_STOP_INVERTER_SECONDS)
        });
        if is_due {
            info!("Stop the inverter before switching back to the grid.");

            self._last_stop_attempt = Some(context.now());
            context.inverter.stop()?;
        }

        Ok(())
    }

    /// Command the contactors to the pattern. The contactor to open is
    /// opened first, and the other one is closed only after the first one
    /// shows open. Only the contactor out of position is commanded.
    ///
    /// # Arguments
    /// * `grid_switch` - Grid switch.
    /// * `is_off_grid` - Off-grid pattern (main open, grounding closed) or
    ///   on-grid pattern (main closed, grounding open).
    ///
    /// # Errors
    /// A contactor command failed.
    fn set_contactor_pattern(
        grid_switch: &mut dyn GridSwitch,
        is_off_grid: bool,
    ) -> Result<(), DeviceError> {
        let main = grid_switch.get_main_contactor();
        let grounding = grid_switch.get_grounding_contactor();

        if is_off_grid {
            if main != Some(ContactorState::Open) {
                debug!("Open the main contactor.");
                grid_switch.set_main_contactor(ContactorState::Open)?;
            } else if grounding != Some(ContactorState::Close) {
                debug!("Close the grounding contactor.");
                grid_switch.set_grounding_contactor(ContactorState::Close)?;
            }
        } else if grounding != Some(ContactorState::Open) {
            debug!("Open the grounding contactor.");
            grid_switch.set_grounding_contactor(ContactorState::Open)?;
        } else if main != Some(ContactorState::Close) {
            debug!("Close the main contactor.");
            grid_switch.set_main_contactor(ContactorState::Close)?;
        }

        Ok(())
    }
}

impl StateHandler for GridSwitchHandler {
    fn on_entry(&mut self, _context: &mut Context<'_>) {
        self._last_stop_attempt = None;
    }

    fn run_and_get_next_state(&mut self, context: &mut Context<'_>) -> Result<State, DeviceError> {
        if !context.grid_switch.is_contactor_defined() {
            debug!("Wait for the contactor positions.");
            return Ok(State::GridSwitch);
        }

        match context.grid_switch.get_grid_mode() {
            GridMode::Undefined => {}

            GridMode::OnGrid => {
                if context.is_from_off_to_on_grid() {
                    self.hand_over_to_grid(context)?;
                    return Ok(State::GridSwitch);
                }

                context
                    .inverter
                    .set_target_grid_mode(TargetGridMode::GoOnGrid)?;

                if context
                    .grid_switch
                    .is_contactor_pattern(ContactorState::Close, ContactorState::Open)
                {
                    return Ok(State::StartBatteryInOnGrid);
                }

                Self::set_contactor_pattern(&mut *context.grid_switch, false)?;
            }

            GridMode::OffGrid => {
                context
                    .inverter
                    .set_target_grid_mode(TargetGridMode::GoOffGrid)?;
                context.set_from_off_to_on_grid(true);

                if context
                    .grid_switch
                    .is_contactor_pattern(ContactorState::Open, ContactorState::Close)
                {
                    return Ok(State::StartBatteryInOffGrid);
                }

                Self::set_contactor_pattern(&mut *context.grid_switch, true)?;
            }
        }

        Ok(State::GridSwitch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::state_machine::test_site::TestSite;

    fn run(handler: &mut GridSwitchHandler, site: &mut TestSite) -> State {
        handler.run_and_get_next_state(&mut site.context()).unwrap()
    }

    #[test]
    fn test_run_and_get_next_state_undefined_contactor() {
        let mut site = TestSite::new();
        site.grid_switch
            .set_contactors(Some(ContactorState::Close), None);

        let mut handler = GridSwitchHandler::new();
        handler.on_entry(&mut site.context());

        assert_eq!(run(&mut handler, &mut site), State::GridSwitch);
        assert_eq!(site.inverter.count_target_grid_mode, 0);
    }

    #[test]
    fn test_run_and_get_next_state_undefined_grid_mode() {
        let mut site = TestSite::new();
        site.grid_switch.grid_mode = GridMode::Undefined;

        let mut handler = GridSwitchHandler::new();
        handler.on_entry(&mut site.context());

        assert_eq!(run(&mut handler, &mut site), State::GridSwitch);
        assert_eq!(site.grid_switch.count_main_contactor, 0);
        assert_eq!(site.grid_switch.count_grounding_contactor, 0);
    }

    #[test]
    fn test_run_and_get_next_state_on_grid() {
        let mut site = TestSite::new();

        let mut handler = GridSwitchHandler::new();
        handler.on_entry(&mut site.context());

        assert_eq!(run(&mut handler, &mut site), State::StartBatteryInOnGrid);
        assert_eq!(site.inverter.target_grid_mode, Some(TargetGridMode::GoOnGrid));
        assert_eq!(site.grid_switch.count_main_contactor, 0);
        assert_eq!(site.grid_switch.count_grounding_contactor, 0);
    }

    #[test]
    fn test_run_and_get_next_state_on_grid_switch() {
        let mut site = TestSite::new();
        site.grid_switch
            .set_contactors(Some(ContactorState::Open), Some(ContactorState::Close));

        let mut handler = GridSwitchHandler::new();
        handler.on_entry(&mut site.context());

        // Open the grounding contactor first.
        assert_eq!(run(&mut handler, &mut site), State::GridSwitch);
        assert_eq!(site.inverter.target_grid_mode, Some(TargetGridMode::GoOnGrid));
        assert_eq!(site.grid_switch.count_grounding_contactor, 1);
        assert_eq!(site.grid_switch.count_main_contactor, 0);

        site.clock.leap_seconds(1);

        // Then close the main contactor.
        assert_eq!(run(&mut handler, &mut site), State::GridSwitch);
        assert_eq!(site.grid_switch.count_grounding_contactor, 1);
        assert_eq!(site.grid_switch.count_main_contactor, 1);

        site.clock.leap_seconds(1);

        assert_eq!(run(&mut handler, &mut site), State::StartBatteryInOnGrid);
        assert!(!site.ess.is_from_off_to_on_grid());
    }

    #[test]
    fn test_run_and_get_next_state_off_grid() {
        let mut site = TestSite::new();
        site.grid_switch.grid_mode = GridMode::OffGrid;

        let mut handler = GridSwitchHandler::new();
        handler.on_entry(&mut site.context());

        // Open the main contactor first.
        assert_eq!(run(&mut handler, &mut site), State::GridSwitch);
        assert_eq!(
            site.inverter.target_grid_mode,
            Some(TargetGridMode::GoOffGrid)
        );
        assert_eq!(site.grid_switch.count_main_contactor, 1);
        assert_eq!(site.grid_switch.count_grounding_contactor, 0);

        site.clock.leap_seconds(1);

        assert_eq!(run(&mut handler, &mut site), State::GridSwitch);
        assert_eq!(site.grid_switch.count_grounding_contactor, 1);

        site.clock.leap_seconds(1);

        assert_eq!(run(&mut handler, &mut site), State::StartBatteryInOffGrid);
        assert!(site.ess.is_from_off_to_on_grid());
        assert!(site
            .grid_switch
            .is_contactor_pattern(ContactorState::Open, ContactorState::Close));
    }

    #[test]
    fn test_run_and_get_next_state_target_before_contactor() {
        let mut site = TestSite::new();
        site.grid_switch.grid_mode = GridMode::OffGrid;

        let mut handler = GridSwitchHandler::new();
        handler.on_entry(&mut site.context());

        site.grid_switch.is_command_failing = true;

        // Contactor command fails but the target is already set.
        assert!(handler
            .run_and_get_next_state(&mut site.context())
            .is_err());
        assert_eq!(
            site.inverter.target_grid_mode,
            Some(TargetGridMode::GoOffGrid)
        );
    }

    #[test]
    fn test_run_and_get_next_state_hand_over_to_grid() {
        let mut site = TestSite::new();
        site.inverter.device.set_running(true);
        site.inverter.device.is_responsive = false;
        site.ess.set_from_off_to_on_grid(true);

        let mut handler = GridSwitchHandler::new();
        handler.on_entry(&mut site.context());

        for _ in 0..60 {
            assert_eq!(run(&mut handler, &mut site), State::GridSwitch);
            site.clock.leap_seconds(1);
        }

        assert_eq!(site.inverter.device.count_stop, 1);
        assert_eq!(site.ess.get_grid_mode(), GridMode::Undefined);
        assert_eq!(site.inverter.count_target_grid_mode, 0);

        // Stop the inverter again after 60 seconds.
        site.inverter.device.is_responsive = true;
        assert_eq!(run(&mut handler, &mut site), State::GridSwitch);
        assert_eq!(site.inverter.device.count_stop, 2);

        site.clock.leap_seconds(1);

        // Inverter is stopped and the flag is cleared.
        assert_eq!(run(&mut handler, &mut site), State::GridSwitch);
        assert!(!site.ess.is_from_off_to_on_grid());

        assert_eq!(run(&mut handler, &mut site), State::StartBatteryInOnGrid);
    }
}
