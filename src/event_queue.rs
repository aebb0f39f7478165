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

use serde_json::Value;

pub struct EventQueue {
    // Events to publish.
    _events: Vec<Value>,
}

impl EventQueue {
    /// Create a new event queue.
    ///
    /// # Returns
    /// A new event queue.
    pub fn new() -> Self {
        Self {
            _events: Vec::new(),
        }
    }

    /// Check if there are events to publish.
    ///
    /// # Returns
    /// True if there are events to publish, false otherwise.
    pub fn has_event(&self) -> bool {
        !self._events.is_empty()
    }

    /// Add an event.
    pub fn add_event(&mut self, event: Value) {
        self._events.push(event);
    }

    /// Get the events to publish and clear the internal events.
    ///
    /// # Returns
    /// Events.
    pub fn get_events_and_clear(&mut self) -> Vec<Value> {
        std::mem::take(&mut self._events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::enums::State;
    use crate::telemetry::event::Event;

    #[test]
    fn test_has_event() {
        let mut event_queue = EventQueue::new();

        assert!(!event_queue.has_event());

        event_queue.add_event(Event::get_message_state(State::Undefined));

        assert!(event_queue.has_event());
    }

    #[test]
    fn test_get_events_and_clear() {
        let mut event_queue = EventQueue::new();

        event_queue.add_event(Event::get_message_state(State::Undefined));
        event_queue.add_event(Event::get_message_state(State::GridSwitch));

        let events = event_queue.get_events_and_clear();

        assert_eq!(events.len(), 2);
        assert_eq!(events[1]["name"], "GridSwitch");
        assert!(!event_queue.has_event());
    }
}
