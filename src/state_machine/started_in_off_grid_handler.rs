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
use std::time::Instant;

use crate::device::DeviceError;
use crate::enums::{ContactorState, GridMode, StartStop, State, TargetGridMode};
use crate::state_machine::context::Context;
use crate::state_machine::state_handler::StateHandler;

/// Running in the island mode. The state is left when the grid is back for
/// the handover time, or when the battery is nearly empty.
pub struct StartedInOffGridHandler {
    // Time the grid was first sensed back. None if the grid is not sensed.
    _on_grid_since: Option<Instant>,
}

impl StartedInOffGridHandler {
    pub fn new() -> Self {
        Self {
            _on_grid_since: None,
        }
    }
}

impl StateHandler for StartedInOffGridHandler {
    fn on_entry(&mut self, _context: &mut Context<'_>) {
        self._on_grid_since = None;
    }

    fn run_and_get_next_state(&mut self, context: &mut Context<'_>) -> Result<State, DeviceError> {
        if !context.can_stay_started() {
            return Ok(State::Undefined);
        }

        match context.grid_switch.get_grid_mode() {
            GridMode::OnGrid => {
                let now = context.now();
                let on_grid_since = *self._on_grid_since.get_or_insert(now);

                if context.elapsed_since(on_grid_since) >= context.ess.config.handover_period() {
                    info!("Grid is back. Hand over to the grid.");

                    self._on_grid_since = None;
                    context
                        .inverter
                        .set_target_grid_mode(TargetGridMode::GoOnGrid)?;

                    return Ok(State::StopBatteryInverterBeforeSwitch);
                }

                context.ess.set_grid_mode(GridMode::Undefined);

                return Ok(State::StartedInOffGrid);
            }

            GridMode::OffGrid if context.is_low_soc() => {
                warn!("State of charge is too low. Stop the off-grid operation.");

                self._on_grid_since = None;
                context.ess.set_low_soc_stop(true);
                context
                    .grid_switch
                    .set_main_contactor(ContactorState::Open)?;
                context
                    .grid_switch
                    .set_grounding_contactor(ContactorState::Open)?;

                return Ok(State::StopBatteryInverter);
            }

            _ => {
                self._on_grid_since = None;
            }
        }

        let frequency = context.ess.config.off_grid_frequency;
        context.inverter.set_target_off_grid_frequency(frequency)?;

        context.ess.set_start_stop_status(StartStop::Start);
        context.ess.set_grid_mode(GridMode::OffGrid);

        Ok(State::StartedInOffGrid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::device::GridSwitch;
    use crate::state_machine::test_site::TestSite;

    fn create_test_site() -> TestSite {
        let mut site = TestSite::new();
        site.set_running();
        site.ess.set_start_stop(StartStop::Start);

        site.grid_switch.grid_mode = GridMode::OffGrid;
        site.grid_switch
            .set_contactors(Some(ContactorState::Open), Some(ContactorState::Close));

        site.ess.set_soc(Some(50.0));
        site.ess.set_allowed_discharge_power(Some(70000.0));

        site
    }

    fn create_handler(site: &mut TestSite) -> StartedInOffGridHandler {
        let mut handler = StartedInOffGridHandler::new();
        handler.on_entry(&mut site.context());

        handler
    }

    fn run(handler: &mut StartedInOffGridHandler, site: &mut TestSite) -> State {
        handler.run_and_get_next_state(&mut site.context()).unwrap()
    }

    #[test]
    fn test_run_and_get_next_state() {
        let mut site = create_test_site();
        let mut handler = create_handler(&mut site);

        assert_eq!(run(&mut handler, &mut site), State::StartedInOffGrid);
        assert_relative_eq!(site.inverter.off_grid_frequency.unwrap(), 52.0);
        assert_eq!(site.ess.get_start_stop(), StartStop::Start);
        assert_eq!(site.ess.get_grid_mode(), GridMode::OffGrid);
    }

    #[test]
    fn test_run_and_get_next_state_guard() {
        let mut site = create_test_site();
        let mut handler = create_handler(&mut site);

        site.inverter.device.set_running(false);

        assert_eq!(run(&mut handler, &mut site), State::Undefined);
    }

    #[test]
    fn test_run_and_get_next_state_handover_reset() {
        let mut site = create_test_site();
        let mut handler = create_handler(&mut site);

        site.grid_switch.grid_mode = GridMode::OnGrid;
        for _ in 0..59 {
            assert_eq!(run(&mut handler, &mut site), State::StartedInOffGrid);
            assert_eq!(site.ess.get_grid_mode(), GridMode::Undefined);

            site.clock.leap_seconds(1);
        }

        // Grid is lost again before the handover time.
        site.grid_switch.grid_mode = GridMode::OffGrid;
        assert_eq!(run(&mut handler, &mut site), State::StartedInOffGrid);
        assert_eq!(site.ess.get_grid_mode(), GridMode::OffGrid);

        site.grid_switch.grid_mode = GridMode::OnGrid;
        for _ in 0..59 {
            assert_eq!(run(&mut handler, &mut site), State::StartedInOffGrid);
            site.clock.leap_seconds(1);
        }

        assert_eq!(site.inverter.target_grid_mode, None);
    }

    #[test]
    fn test_run_and_get_next_state_handover() {
        let mut site = create_test_site();
        let mut handler = create_handler(&mut site);

        site.grid_switch.grid_mode = GridMode::OnGrid;

        let mut states = Vec::new();
        for _ in 0..=60 {
            states.push(run(&mut handler, &mut site));
            site.clock.leap_seconds(1);
        }

        let count_handover = states
            .iter()
            .filter(|state| **state == State::StopBatteryInverterBeforeSwitch)
            .count();
        assert_eq!(count_handover, 1);
        assert_eq!(states.last(), Some(&State::StopBatteryInverterBeforeSwitch));
        assert_eq!(site.inverter.target_grid_mode, Some(TargetGridMode::GoOnGrid));
    }

    #[test]
    fn test_run_and_get_next_state_low_soc() {
        let mut site = create_test_site();
        let mut handler = create_handler(&mut site);

        site.ess.set_allowed_discharge_power(Some(0.0));
        site.ess.set_soc(Some(4.0));

        assert_eq!(run(&mut handler, &mut site), State::StopBatteryInverter);
        assert!(site.ess.is_low_soc_stop());
        assert_eq!(site.grid_switch.count_main_contactor, 1);
        assert_eq!(site.grid_switch.count_grounding_contactor, 1);

        site.clock.leap_seconds(1);

        assert_eq!(
            site.grid_switch.get_main_contactor(),
            Some(ContactorState::Open)
        );
        assert_eq!(
            site.grid_switch.get_grounding_contactor(),
            Some(ContactorState::Open)
        );
    }

    #[test]
    fn test_run_and_get_next_state_low_soc_above_cutoff() {
        let mut site = create_test_site();
        let mut handler = create_handler(&mut site);

        site.ess.set_allowed_discharge_power(Some(0.0));
        site.ess.set_soc(Some(6.0));

        assert_eq!(run(&mut handler, &mut site), State::StartedInOffGrid);
        assert!(!site.ess.is_low_soc_stop());
        assert_eq!(site.grid_switch.count_main_contactor, 0);
        assert_eq!(site.grid_switch.count_grounding_contactor, 0);
    }

    #[test]
    fn test_run_and_get_next_state_low_soc_discharge_allowed() {
        let mut site = create_test_site();
        let mut handler = create_handler(&mut site);

        site.ess.set_soc(Some(4.0));

        assert_eq!(run(&mut handler, &mut site), State::StartedInOffGrid);
    }

    #[test]
    fn test_run_and_get_next_state_low_soc_unknown() {
        let mut site = create_test_site();
        let mut handler = create_handler(&mut site);

        site.ess.set_allowed_discharge_power(Some(0.0));
        site.ess.set_soc(None);

        assert_eq!(run(&mut handler, &mut site), State::StartedInOffGrid);
    }
}
