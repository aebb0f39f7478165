use config::Config;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Trait to parse the configuration value.
pub trait ConfigValue {
    /// Parse the configuration value.
    ///
    /// # Parameters
    /// * `s` - String to parse.
    ///
    /// # Returns
    /// The parsed configuration value.
    fn parse_value(s: &str) -> Self;
}

/// Implement the trait ConfigValue for String.
///
/// # Parameters
/// * `String` - Type of the configuration value.
impl ConfigValue for String {
    fn parse_value(s: &str) -> Self {
        s.to_string()
    }
}

/// Implement the trait ConfigValue for f64.
///
/// # Parameters
/// * `f64` - Type of the configuration value.
impl ConfigValue for f64 {
    fn parse_value(s: &str) -> Self {
        s.parse::<f64>().expect(&format!("{s} should parse as f64"))
    }
}

/// Implement the trait ConfigValue for u32.
///
/// # Parameters
/// * `u32` - Type of the configuration value.
impl ConfigValue for u32 {
    fn parse_value(s: &str) -> Self {
        s.parse::<u32>().expect(&format!("{s} should parse as u32"))
    }
}

/// Implement the trait ConfigValue for u64.
///
/// # Parameters
/// * `u64` - Type of the configuration value.
impl ConfigValue for u64 {
    fn parse_value(s: &str) -> Self {
        s.parse::<u64>().expect(&format!("{s} should parse as u64"))
    }
}

/// Implement the trait ConfigValue for bool.
///
/// # Parameters
/// * `bool` - Type of the configuration value.
impl ConfigValue for bool {
    fn parse_value(s: &str) -> Self {
        s.parse::<bool>()
            .expect(&format!("{s} should parse as bool"))
    }
}

/// Get the configuation from the file.
///
/// # Parameters
/// * `filepath` - Path to the config file.
///
/// # Returns
/// The configuration.
pub fn get_config(filepath: &Path) -> Config {
    let name = filepath
        .to_str()
        .expect(&format!("Should have the file name in the {:?}", filepath));

    Config::builder()
        .add_source(config::File::with_name(name))
        .build()
        .expect(&format!("Should be able to read the {name}"))
}

/// Get the parameter from the file.
///
/// # Parameters
/// * `filepath` - Path to the config file.
/// * `key` - Key to find the parameter in the config file.
///
/// # Returns
/// The parameter.
pub fn get_parameter<T: ConfigValue>(filepath: &Path, key: &str) -> T {
    let config = get_config(filepath);

    get_parameter_from_config(&config, filepath, key)
}

/// Get the parameter from the configuration that was already read.
///
/// # Parameters
/// * `config` - Configuration.
/// * `filepath` - Path to the config file, used in the panic message.
/// * `key` - Key to find the parameter in the config file.
///
/// # Returns
/// The parameter.
pub fn get_parameter_from_config<T: ConfigValue>(config: &Config, filepath: &Path, key: &str) -> T {
    config
        .get_string(key)
        .map(|v| T::parse_value(&v))
        .expect(&format!("Should find the {key} in the {:?}", filepath))
}

/// Get the system time in milliseconds.
///
/// # Returns
/// System time in milliseconds since the UNIX epoch. Return 0 if fail.
pub fn get_system_time_ms() -> u64 {
    let now = SystemTime::now();
    match now.duration_since(UNIX_EPOCH) {
        Ok(duration) => duration.as_millis() as u64,
        Err(_) => 0,
    }
}
