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

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{ERROR_LOCKOUT_SECONDS, HANDOVER_SECONDS, LOW_SOC_CUTOFF, OFF_GRID_FREQUENCY};
use crate::enums::StartStopConfig;
use crate::ess::Ess;
use crate::utility::{get_config, get_parameter_from_config};

#[derive(Clone, PartialEq, Debug)]
pub struct ConfigEss {
    // Minimum time in seconds between two attempts of the same start/stop
    // command.
    pub retry_command_seconds: u64,
    // Number of attempts before a start/stop command is given up.
    pub retry_command_max_attempts: u32,
    // Start/stop mode.
    pub start_stop: StartStopConfig,
    // Time in seconds the grid must be sensed continuously before handing
    // over from off-grid to on-grid.
    pub handover_seconds: u64,
    // Cool-down time in seconds in the error state.
    pub error_lockout_seconds: u64,
    // Target frequency in Hz of the inverter in off-grid operation.
    pub off_grid_frequency: f64,
    // State of charge in percent below which the off-grid operation is
    // stopped when no discharge power is allowed.
    pub low_soc_cutoff: f64,
}

impl Default for ConfigEss {
    fn default() -> Self {
        Self {
            retry_command_seconds: Ess::RETRY_COMMAND_SECONDS,
            retry_command_max_attempts: Ess::RETRY_COMMAND_MAX_ATTEMPTS,
            start_stop: StartStopConfig::Auto,
            handover_seconds: HANDOVER_SECONDS,
            error_lockout_seconds: ERROR_LOCKOUT_SECONDS,
            off_grid_frequency: OFF_GRID_FREQUENCY,
            low_soc_cutoff: LOW_SOC_CUTOFF,
        }
    }
}

impl ConfigEss {
    /// Create a new ConfigEss object from the file.
    ///
    /// # Arguments
    /// * `filepath` - Path to the energy storage system parameters file.
    ///
    /// # Returns
    /// A new ConfigEss object.
    ///
    /// # Panics
    /// If the file or one of the parameters can not be read.
    pub fn new(filepath: &Path) -> Self {
        let config = get_config(filepath);

        let start_stop: String = get_parameter_from_config(&config, filepath, "start_stop");

        Self {
            retry_command_seconds: get_parameter_from_config(
                &config,
                filepath,
                "retry_command_seconds",
            ),
            retry_command_max_attempts: get_parameter_from_config(
                &config,
                filepath,
                "retry_command_max_attempts",
            ),
            start_stop: StartStopConfig::from_str(&start_stop)
                .expect(&format!("{start_stop} should be auto, start or stop")),
            handover_seconds: get_parameter_from_config(&config, filepath, "handover_seconds"),
            error_lockout_seconds: get_parameter_from_config(
                &config,
                filepath,
                "error_lockout_seconds",
            ),
            off_grid_frequency: get_parameter_from_config(&config, filepath, "off_grid_frequency"),
            low_soc_cutoff: get_parameter_from_config(&config, filepath, "low_soc_cutoff"),
        }
    }

    /// Get the retry period of the start/stop commands.
    ///
    /// # Returns
    /// Retry period.
    pub fn retry_period(&self) -> Duration {
        Duration::from_secs(self.retry_command_seconds)
    }

    /// Get the handover debounce time.
    ///
    /// # Returns
    /// Handover debounce time.
    pub fn handover_period(&self) -> Duration {
        Duration::from_secs(self.handover_seconds)
    }

    /// Get the cool-down time of the error state.
    ///
    /// # Returns
    /// Cool-down time.
    pub fn error_lockout_period(&self) -> Duration {
        Duration::from_secs(self.error_lockout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_new() {
        let config = ConfigEss::new(Path::new("config/parameters_ess.yaml"));

        assert_eq!(config, ConfigEss::default());
    }

    #[test]
    fn test_new_start_stop() {
        let mut file = Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "retry_command_seconds: 10\n\
             retry_command_max_attempts: 3\n\
             start_stop: stop\n\
             handover_seconds: 60\n\
             error_lockout_seconds: 120\n\
             off_grid_frequency: 51.5\n\
             low_soc_cutoff: 10"
        )
        .unwrap();

        let config = ConfigEss::new(file.path());

        assert_eq!(config.retry_command_seconds, 10);
        assert_eq!(config.retry_command_max_attempts, 3);
        assert_eq!(config.start_stop, StartStopConfig::Stop);
        assert_eq!(config.off_grid_frequency, 51.5);
        assert_eq!(config.low_soc_cutoff, 10.0);
    }

    #[test]
    #[should_panic(expected = "should be auto, start or stop")]
    fn test_new_panic() {
        let mut file = Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "retry_command_seconds: 10\n\
             retry_command_max_attempts: 3\n\
             start_stop: pause\n\
             handover_seconds: 60\n\
             error_lockout_seconds: 120\n\
             off_grid_frequency: 52\n\
             low_soc_cutoff: 5"
        )
        .unwrap();

        ConfigEss::new(file.path());
    }

    #[test]
    fn test_periods() {
        let config = ConfigEss::default();

        assert_eq!(config.retry_period(), Duration::from_secs(30));
        assert_eq!(config.handover_period(), Duration::from_secs(60));
        assert_eq!(config.error_lockout_period(), Duration::from_secs(120));
    }
}
