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

//! Capability interfaces of the devices sequenced by the state machine. The
//! register-level drivers live outside this crate and implement these traits.
pub mod battery;
pub mod grid_switch;
pub mod inverter;

use thiserror::Error;

pub use battery::Battery;
pub use grid_switch::GridSwitch;
pub use inverter::OffGridInverter;

/// Failure of a device command.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeviceError {
    #[error("communication with the {device} failed: {reason}")]
    Communication { device: String, reason: String },
    #[error("the {device} rejected the command {command}: {reason}")]
    CommandRejected {
        device: String,
        command: String,
        reason: String,
    },
    #[error("the {device} does not support the command {command}")]
    Unsupported { device: String, command: String },
}
