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


//! # ESS Control System
//!
//! This library is the state machine of an energy storage system that runs
//! on-grid and islanded from the grid. It sequences the battery, the battery
//! inverter and the grid switch contactors through the start, stop and
//! grid-transition states.
pub mod application;
pub mod clock;
pub mod config;
pub mod constants;
pub mod controller;
pub mod device;
pub mod enums;
pub mod ess;
pub mod event_queue;
pub mod mock;
pub mod state_machine;
pub mod telemetry;
pub mod utility;
