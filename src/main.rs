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

use clap::{value_parser, Arg, Command};
use log::{info, warn};
use simplelog::{
    format_description, ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, TermLogger,
    TerminalMode, WriteLogger,
};
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

use run_ess_controller::application;
use run_ess_controller::constants::{DIRECTORY_CONFIG, FILE_PARAMETERS_APP};
use run_ess_controller::enums::StartStopConfig;
use run_ess_controller::utility::get_parameter;

fn main() {
    // Parse the command line arguments
    let matches = Command::new("control system")
        .about("Control system of the off-grid capable energy storage system.")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Directory of the configuration files")
                .default_value(DIRECTORY_CONFIG),
        )
        .arg(
            Arg::new("start_stop")
                .short('s')
                .long("start-stop")
                .help("Start/stop mode to override the configuration file")
                .value_parser(["auto", "start", "stop"]),
        )
        .arg(
            Arg::new("grid")
                .short('g')
                .long("grid")
                .help("Simulated grid availability to override the configuration file")
                .value_parser(["on", "off"]),
        )
        .arg(
            Arg::new("level")
                .short('l')
                .long("log-level")
                .help("Log level: 0 (Off), 1 (Error), 2 (Warn), 3 (Info), 4 (Debug), 5 (Trace)")
                .default_value("3")
                .value_parser(value_parser!(u32)),
        )
        .get_matches();

    // Check the configuration directory
    let config_dir = Path::new(
        matches
            .get_one::<String>("config")
            .expect("There should be a configuration directory."),
    );

    // Check the overrides
    let start_stop = matches.get_one::<String>("start_stop").map(|value| {
        StartStopConfig::from_str(value).expect("Start/stop mode should be auto, start or stop.")
    });
    let is_grid_available = matches
        .get_one::<String>("grid")
        .map(|value| value == "on");

    // Check the log filter
    let log_filter = get_log_filter(matches.get_one::<u32>("level"));

    // Initiate the logger
    let log_file: String = get_parameter(&config_dir.join(FILE_PARAMETERS_APP), "log_file");
    initiate_logger(log_filter, &log_file);
    info!("Log level: {log_filter}.");

    // Run the application
    application::run(config_dir, start_stop, is_grid_available);
}

/// Get the log filter.
///
/// # Arguments
/// * `log_level` - Log level.
///
/// # Returns
/// Log filter.
fn get_log_filter(log_level: Option<&u32>) -> LevelFilter {
    match log_level {
        Some(level) => match level {
            0 => LevelFilter::Off,
            1 => LevelFilter::Error,
            2 => LevelFilter::Warn,
            3 => LevelFilter::Info,
            4 => LevelFilter::Debug,
            5 => LevelFilter::Trace,
            _ => LevelFilter::Info,
        },
        None => LevelFilter::Info,
    }
}

/// Initiate the logger.
///
/// # Arguments
/// * `level` - Log level.
/// * `filepath` - Log file path.
fn initiate_logger(level: LevelFilter, filepath: &str) {
    let config = ConfigBuilder::new()
        .set_time_format_custom(format_description!(
            "[year]/[month]/[day] [hour]:[minute]:[second].[subsecond]"
        ))
        .build();

    // Log to the terminal
    let logger_terminal = TermLogger::new(
        level,
        config.clone(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );

    // Log to the file. The terminal logger is kept if the file can not be
    // created.
    match File::create(filepath) {
        Ok(file) => {
            let logger_file = WriteLogger::new(level, config, file);
            let _ = CombinedLogger::init(vec![logger_terminal, logger_file]);
        }
        Err(error) => {
            let _ = CombinedLogger::init(vec![logger_terminal]);
            warn!("Failed to create the log file {filepath}: {error}");
        }
    }
}
