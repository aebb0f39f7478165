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
use signal_hook::{
    consts::{SIGINT, SIGTERM},
    flag::register,
};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::sleep;
use std::time::Duration;

use crate::clock::{Clock, SystemClock};
use crate::config::ConfigEss;
use crate::constants::{FILE_PARAMETERS_APP, FILE_PARAMETERS_ESS, FILE_PARAMETERS_SIMULATION};
use crate::controller::EssController;
use crate::enums::{GridMode, StartStop, StartStopConfig};
use crate::mock::{
    config_simulation::ConfigSimulation, mock_battery::MockBattery,
    mock_grid_switch::MockGridSwitch, mock_inverter::MockInverter,
};
use crate::utility::get_parameter;

/// Run the application. The devices are simulated, since the hardware
/// drivers live outside of this crate.
///
/// # Arguments
/// * `config_dir` - Directory of the configuration files.
/// * `start_stop` - Start/stop mode to override the configuration file.
/// * `is_grid_available` - Grid availability to override the configuration
/// file.
pub fn run(config_dir: &Path, start_stop: Option<StartStopConfig>, is_grid_available: Option<bool>) {
    info!("Run the ESS control system in simulation mode.");

    // Read the configuration
    let mut config_ess = ConfigEss::new(&config_dir.join(FILE_PARAMETERS_ESS));
    if let Some(start_stop) = start_stop {
        config_ess.start_stop = start_stop;
    }

    let mut config_simulation = ConfigSimulation::new(&config_dir.join(FILE_PARAMETERS_SIMULATION));
    if let Some(is_grid_available) = is_grid_available {
        config_simulation.is_grid_available = is_grid_available;
    }

    let filepath_app = config_dir.join(FILE_PARAMETERS_APP);
    let cycle_time: u64 = get_parameter(&filepath_app, "cycle_time");
    let telemetry_period: u64 = get_parameter(&filepath_app, "telemetry_period");

    // Create the controller
    let is_auto = config_ess.start_stop == StartStopConfig::Auto;
    let mut controller =
        create_simulated_controller(config_ess, &config_simulation, Arc::new(SystemClock));

    // Nobody else writes the target in the simulation.
    if is_auto {
        controller.set_start_stop(StartStop::Start);
    }

    // Register the signals that stop the application
    let stop = Arc::new(AtomicBool::new(false));
    for signal in [SIGTERM, SIGINT].iter() {
        let _ = register(*signal, stop.clone());
    }

    // Run the main loop
    let mut cycle: u64 = 0;
    while !stop.load(Ordering::Relaxed) {
        step(&mut controller, cycle, telemetry_period);

        cycle += 1;
        sleep(Duration::from_millis(cycle_time));
    }

    info!("ESS control system is stopped in the state {}.", controller.get_state().as_ref());
}

/// Create the controller of the simulated devices.
///
/// # Arguments
/// * `config_ess` - Configuration of the energy storage system.
/// * `config_simulation` - Configuration of the simulation.
/// * `clock` - Clock shared by the controller and the simulated devices.
///
/// # Returns
/// Controller.
pub fn create_simulated_controller(
    config_ess: ConfigEss,
    config_simulation: &ConfigSimulation,
    clock: Arc<dyn Clock + Send + Sync>,
) -> EssController {
    let mut battery = MockBattery::with_times(
        clock.clone(),
        config_simulation.time_battery_start,
        config_simulation.time_battery_stop,
    );
    battery.soc = Some(config_simulation.soc);
    battery.voltage = Some(config_simulation.voltage);
    battery.discharge_max_current = Some(config_simulation.discharge_max_current);

    let inverter = MockInverter::with_times(
        clock.clone(),
        config_simulation.time_inverter_start,
        config_simulation.time_inverter_stop,
    );

    let grid_mode = if config_simulation.is_grid_available {
        GridMode::OnGrid
    } else {
        GridMode::OffGrid
    };
    info!("Simulated grid mode: {}.", grid_mode.as_ref());

    let grid_switch =
        MockGridSwitch::with_time(clock.clone(), grid_mode, config_simulation.time_contactor);

    EssController::new(
        config_ess,
        Box::new(battery),
        Box::new(inverter),
        Box::new(grid_switch),
        clock,
    )
}

/// Run one cycle and log the events and telemetry.
///
/// # Arguments
/// * `controller` - Controller.
/// * `cycle` - Index of the cycle.
/// * `telemetry_period` - Number of cycles between two telemetry log lines.
fn step(controller: &mut EssController, cycle: u64, telemetry_period: u64) {
    controller.run_cycle();

    for event in controller.get_events() {
        info!("Event: {event}");
    }

    if (telemetry_period > 0) && (cycle % telemetry_period == 0) {
        info!("Telemetry: {}", controller.get_telemetry().get_message(2));
    }
}
