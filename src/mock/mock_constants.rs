// Battery values in the simulation
pub const PLANT_SOC: f64 = 80.0;
pub const PLANT_VOLTAGE: f64 = 700.0;
pub const PLANT_DISCHARGE_MAX_CURRENT: f64 = 100.0;

// Settling times in milliseconds
pub const PLANT_TIME_BATTERY_START: u64 = 5000;
pub const PLANT_TIME_BATTERY_STOP: u64 = 2000;
pub const PLANT_TIME_INVERTER_START: u64 = 3000;
pub const PLANT_TIME_INVERTER_STOP: u64 = 1000;
pub const PLANT_TIME_CONTACTOR: u64 = 500;
