use strum_macros::{AsRefStr, EnumCount, EnumIter, EnumString, FromRepr, VariantNames};

/// State of the grid-transition state machine.
///
/// The discriminant is the index of the state handler in the dispatch table.
#[derive(
    FromRepr, Debug, PartialEq, Eq, Hash, Clone, Copy, EnumIter, EnumCount, AsRefStr, VariantNames,
)]
#[repr(u8)]
pub enum State {
    Undefined = 0,
    GridSwitch = 1,
    StartBatteryInOnGrid = 2,
    StartBatteryInverterInOnGrid = 3,
    StartedInOnGrid = 4,
    StartBatteryInOffGrid = 5,
    StartBatteryInverterInOffGrid = 6,
    StartedInOffGrid = 7,
    StopBatteryInverterBeforeSwitch = 8,
    StopBatteryInverter = 9,
    StopBattery = 10,
    Stopped = 11,
    Error = 12,
}

/// Start/stop value of a component, used for both the target and the
/// reported status.
#[derive(FromRepr, Debug, PartialEq, Eq, Clone, Copy, AsRefStr)]
#[repr(u8)]
pub enum StartStop {
    Undefined = 0,
    Start = 1,
    Stop = 2,
}

/// Configured start/stop behavior of the energy storage system.
#[derive(Debug, PartialEq, Eq, Clone, Copy, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum StartStopConfig {
    // Follow the start/stop channel.
    Auto,
    Start,
    Stop,
}

/// Grid mode, either sensed at the grid switch or reported by the energy
/// storage system.
#[derive(FromRepr, Debug, PartialEq, Eq, Clone, Copy, AsRefStr)]
#[repr(u8)]
pub enum GridMode {
    Undefined = 0,
    OnGrid = 1,
    OffGrid = 2,
}

/// Grid mode the inverter should operate in.
#[derive(FromRepr, Debug, PartialEq, Eq, Clone, Copy, AsRefStr)]
#[repr(u8)]
pub enum TargetGridMode {
    GoOnGrid = 1,
    GoOffGrid = 2,
}

/// Position of a contactor.
#[derive(FromRepr, Debug, PartialEq, Eq, Clone, Copy, AsRefStr)]
#[repr(u8)]
pub enum ContactorState {
    Open = 0,
    Close = 1,
}

/// Fault flag latched by the energy storage system when a start or stop
/// command was given up.
#[derive(Debug, PartialEq, Eq, Clone, Copy, EnumIter, AsRefStr)]
pub enum FaultFlag {
    MaxBatteryStartAttempts,
    MaxBatteryStopAttempts,
    MaxBatteryInverterStartAttempts,
    MaxBatteryInverterStopAttempts,
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::str::FromStr;
    use strum::{EnumCount, IntoEnumIterator};

    #[test]
    fn test_state_value() {
        assert_eq!(State::COUNT, 13);

        // The discriminants are the indices of the dispatch table.
        State::iter()
            .enumerate()
            .for_each(|(idx, state)| assert_eq!(state as usize, idx));

        assert_eq!(State::from_repr(12).unwrap(), State::Error);
        assert!(State::from_repr(13).is_none());
    }

    #[test]
    fn test_state_name() {
        assert_eq!(State::GridSwitch.as_ref(), "GridSwitch");
        assert_eq!(
            State::StopBatteryInverterBeforeSwitch.as_ref(),
            "StopBatteryInverterBeforeSwitch"
        );
    }

    #[test]
    fn test_start_stop_config() {
        assert_eq!(
            StartStopConfig::from_str("auto").unwrap(),
            StartStopConfig::Auto
        );
        assert_eq!(
            StartStopConfig::from_str("start").unwrap(),
            StartStopConfig::Start
        );
        assert_eq!(
            StartStopConfig::from_str("stop").unwrap(),
            StartStopConfig::Stop
        );

        assert!(StartStopConfig::from_str("wrong").is_err());
    }

    #[test]
    fn test_fault_flag() {
        assert_eq!(FaultFlag::iter().count(), 4);
    }
}
