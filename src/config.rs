//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::aprs::station::DEFAULT_SCAN_LINES;
use crate::aprs::window::DEFAULT_WINDOW_SIZE;
use crate::error::{IgateDisplayError, Result};
use crate::serial::{DEFAULT_BAUD_RATE, DEFAULT_DEVICE_PATH};

/// Configuration file used when none is given on the command line
pub const DEFAULT_CONFIG_PATH: &str = "/etc/igate-display/config.toml";

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub serial: SerialConfig,
    #[serde(default)]
    pub direwolf: DirewolfConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Display serial port configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SerialConfig {
    #[serde(default = "default_serial_port")]
    pub port: String,

    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
}

/// Direwolf file locations
#[derive(Debug, Deserialize, Clone)]
pub struct DirewolfConfig {
    #[serde(default = "default_direwolf_config_path")]
    pub config_path: String,

    #[serde(default = "default_direwolf_log_path")]
    pub log_path: String,

    #[serde(default = "default_mycall_scan_lines")]
    pub mycall_scan_lines: usize,

    #[serde(default = "default_window_size")]
    pub window_size: usize,

    #[serde(default = "default_tail_bytes")]
    pub tail_bytes: u64,
}

/// Host status sources
#[derive(Debug, Deserialize, Clone)]
pub struct TelemetryConfig {
    #[serde(default = "default_thermal_path")]
    pub thermal_path: String,

    #[serde(default = "default_disk_path")]
    pub disk_path: String,

    #[serde(default = "default_vpn_interface")]
    pub vpn_interface: String,

    #[serde(default = "default_lan_interfaces")]
    pub lan_interfaces: Vec<String>,

    #[serde(default = "default_service_name")]
    pub service_name: String,
}

/// Poll cadence
#[derive(Debug, Deserialize, Clone)]
pub struct TimingConfig {
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_status_check_interval_ms")]
    pub status_check_interval_ms: u64,
}

/// Log output
#[derive(Debug, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    /// Directory for daily log files; stdout only when unset
    #[serde(default)]
    pub log_dir: Option<String>,
}

// Default value functions
fn default_serial_port() -> String { DEFAULT_DEVICE_PATH.to_string() }
fn default_baud_rate() -> u32 { DEFAULT_BAUD_RATE }

fn default_direwolf_config_path() -> String { "/etc/direwolf/direwolf.conf".to_string() }
fn default_direwolf_log_path() -> String { "/var/log/direwolf/direwolf.log".to_string() }
fn default_mycall_scan_lines() -> usize { DEFAULT_SCAN_LINES }
fn default_window_size() -> usize { DEFAULT_WINDOW_SIZE }
fn default_tail_bytes() -> u64 { 16384 }

fn default_thermal_path() -> String { "/sys/class/thermal/thermal_zone0/temp".to_string() }
fn default_disk_path() -> String { "/".to_string() }
fn default_vpn_interface() -> String { "tun0".to_string() }
fn default_lan_interfaces() -> Vec<String> { vec!["wlan0".to_string(), "eth0".to_string()] }
fn default_service_name() -> String { "aprs-direwolf.service".to_string() }

fn default_poll_interval_ms() -> u64 { 5000 }
fn default_status_check_interval_ms() -> u64 { 10000 }

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: default_serial_port(),
            baud_rate: default_baud_rate(),
        }
    }
}

impl Default for DirewolfConfig {
    fn default() -> Self {
        Self {
            config_path: default_direwolf_config_path(),
            log_path: default_direwolf_log_path(),
            mycall_scan_lines: default_mycall_scan_lines(),
            window_size: default_window_size(),
            tail_bytes: default_tail_bytes(),
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            thermal_path: default_thermal_path(),
            disk_path: default_disk_path(),
            vpn_interface: default_vpn_interface(),
            lan_interfaces: default_lan_interfaces(),
            service_name: default_service_name(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            status_check_interval_ms: default_status_check_interval_ms(),
        }
    }
}

fn invalid(message: impl std::fmt::Display) -> IgateDisplayError {
    IgateDisplayError::Config(toml::de::Error::custom(message))
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// * `Result<Config>` - Loaded and validated configuration
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use igate_display::config::Config;
    ///
    /// let config = Config::load("/etc/igate-display/config.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the configuration named on the command line, or the default file
    ///
    /// An explicit path must exist. The default path is optional; built-in
    /// defaults are used when it is absent.
    pub fn load_or_default(explicit: Option<&str>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::load(DEFAULT_CONFIG_PATH),
            None => Ok(Self::default()),
        }
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    fn validate(&self) -> Result<()> {
        if self.serial.port.is_empty() {
            return Err(invalid("serial port cannot be empty"));
        }

        if ![9600, 19200, 38400, 57600, 115200, 230400, 250000, 256000, 512000, 921600]
            .contains(&self.serial.baud_rate)
        {
            return Err(invalid("baud_rate must be a standard display rate (9600 to 921600)"));
        }

        for (name, value) in [
            ("direwolf config_path", &self.direwolf.config_path),
            ("direwolf log_path", &self.direwolf.log_path),
            ("thermal_path", &self.telemetry.thermal_path),
            ("disk_path", &self.telemetry.disk_path),
            ("vpn_interface", &self.telemetry.vpn_interface),
            ("service_name", &self.telemetry.service_name),
        ] {
            if value.is_empty() {
                return Err(invalid(format!("{} cannot be empty", name)));
            }
        }

        if self.telemetry.lan_interfaces.is_empty()
            || self.telemetry.lan_interfaces.iter().any(|name| name.is_empty())
        {
            return Err(invalid("lan_interfaces must list at least one non-empty interface name"));
        }

        if self.direwolf.mycall_scan_lines == 0 {
            return Err(invalid("mycall_scan_lines must be greater than 0"));
        }

        if self.direwolf.window_size == 0 || self.direwolf.window_size > 4 {
            return Err(invalid("window_size must be between 1 and 4"));
        }

        if self.direwolf.tail_bytes < 256 {
            return Err(invalid("tail_bytes must be at least 256"));
        }

        if self.timing.poll_interval_ms == 0 || self.timing.poll_interval_ms > 600_000 {
            return Err(invalid("poll_interval_ms must be between 1 and 600000"));
        }

        if self.timing.status_check_interval_ms == 0
            || self.timing.status_check_interval_ms > 600_000
        {
            return Err(invalid("status_check_interval_ms must be between 1 and 600000"));
        }

        if let Some(dir) = &self.logging.log_dir {
            if dir.is_empty() {
                return Err(invalid("log_dir cannot be empty when set"));
            }
        }

        Ok(())
    }
}
