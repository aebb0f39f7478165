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

use log::info;

use crate::device::DeviceError;
use crate::enums::{StartStop, State};
use crate::state_machine::context::Context;
use crate::state_machine::state_handler::StateHandler;

/// The system is stopped and leaves when the start is requested. After a
/// stop by the low state of charge, the start target that is already there
/// does not count: the system waits for a new start request or for the
/// state of charge to recover.
pub struct StoppedHandler {
    // Start/stop target seen on the last cycle.
    _last_target: StartStop,
}

impl StoppedHandler {
    pub fn new() -> Self {
        Self {
            _last_target: StartStop::Undefined,
        }
    }
}

impl StateHandler for StoppedHandler {
    fn on_entry(&mut self, context: &mut Context<'_>) {
        self._last_target = context.ess.get_start_stop_target();
    }

    fn run_and_get_next_state(&mut self, context: &mut Context<'_>) -> Result<State, DeviceError> {
        context.ess.set_start_stop_status(StartStop::Stop);

        let target = context.ess.get_start_stop_target();
        if context.ess.is_low_soc_stop() {
            let is_new_start_request =
                (target == StartStop::Start) && (self._last_target != StartStop::Start);

            if is_new_start_request || context.is_soc_recovered() {
                info!("Release the low state of charge stop.");
                context.ess.set_low_soc_stop(false);
            }
        }
        self._last_target = target;

        if (target == StartStop::Start) && !context.ess.is_low_soc_stop() {
            Ok(State::Undefined)
        } else {
            Ok(State::Stopped)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::ConfigEss;
    use crate::enums::StartStopConfig;
    use crate::state_machine::test_site::TestSite;

    fn run(handler: &mut StoppedHandler, site: &mut TestSite) -> State {
        handler.run_and_get_next_state(&mut site.context()).unwrap()
    }

    fn create_low_soc_site(config: ConfigEss) -> TestSite {
        let mut site = TestSite::with_config(config);
        site.ess.set_soc(Some(3.0));
        site.ess.set_allowed_discharge_power(Some(0.0));
        site.ess.set_low_soc_stop(true);

        site
    }

    #[test]
    fn test_run_and_get_next_state() {
        let mut site = TestSite::new();
        site.ess.set_start_stop(StartStop::Stop);

        let mut handler = StoppedHandler::new();
        handler.on_entry(&mut site.context());

        for _ in 0..3 {
            assert_eq!(run(&mut handler, &mut site), State::Stopped);
        }
        assert_eq!(site.ess.get_start_stop(), StartStop::Stop);

        site.ess.set_start_stop(StartStop::Start);

        assert_eq!(run(&mut handler, &mut site), State::Undefined);
    }

    #[test]
    fn test_run_and_get_next_state_start_requested_while_stopping() {
        let mut site = TestSite::new();
        site.ess.set_start_stop(StartStop::Start);

        let mut handler = StoppedHandler::new();
        handler.on_entry(&mut site.context());

        assert_eq!(run(&mut handler, &mut site), State::Undefined);
    }

    #[test]
    fn test_run_and_get_next_state_low_soc_new_request() {
        let mut site = create_low_soc_site(ConfigEss::default());
        site.ess.set_start_stop(StartStop::Start);

        let mut handler = StoppedHandler::new();
        handler.on_entry(&mut site.context());

        for _ in 0..3 {
            assert_eq!(run(&mut handler, &mut site), State::Stopped);
        }

        // Toggle the target to request the start again.
        site.ess.set_start_stop(StartStop::Stop);
        assert_eq!(run(&mut handler, &mut site), State::Stopped);
        assert!(site.ess.is_low_soc_stop());

        site.ess.set_start_stop(StartStop::Start);
        assert_eq!(run(&mut handler, &mut site), State::Undefined);
        assert!(!site.ess.is_low_soc_stop());
    }

    #[test]
    fn test_run_and_get_next_state_low_soc_recovered() {
        let mut config = ConfigEss::default();
        config.start_stop = StartStopConfig::Start;

        let mut site = create_low_soc_site(config);

        let mut handler = StoppedHandler::new();
        handler.on_entry(&mut site.context());

        assert_eq!(run(&mut handler, &mut site), State::Stopped);

        site.ess.set_soc(Some(5.0));

        assert_eq!(run(&mut handler, &mut site), State::Undefined);
        assert!(!site.ess.is_low_soc_stop());
    }
}
