//! # iGate Display
//!
//! Show Direwolf APRS station reports and host status on a serial display.
//!
//! Usage: `igate-display [CONFIG]` (defaults to `/etc/igate-display/config.toml`,
//! or built-in defaults when that file does not exist).

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use igate_display::aprs::station::read_mycall;
use igate_display::config::{Config, LoggingConfig};
use igate_display::driver::{Driver, DriverSettings};
use igate_display::serial::DisplaySerial;
use igate_display::telemetry::SystemTelemetry;

/// File name prefix for daily log files
const LOG_FILE_PREFIX: &str = "igate-display.log";

/// Main entry point for iGate Display
///
/// # Control Flow
///
/// 1. **Startup**
///    - Load configuration and set up logging
///    - Open the display serial port (fatal on failure)
///    - Read MYCALL from the Direwolf configuration (fatal when missing)
///    - Announce the callsign on the display
///
/// 2. **Poll Loop**
///    - Every poll interval: send the recent report window and host status
///    - Every status interval: send the Direwolf service state
///    - Handle Ctrl+C for a clean exit
///
/// # Errors
///
/// Returns error if:
/// - The configuration file is invalid (or named but missing)
/// - The display serial port cannot be opened
/// - MYCALL cannot be found in the Direwolf configuration
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config_arg = std::env::args().nth(1);
    let config =
        Config::load_or_default(config_arg.as_deref()).context("Failed to load configuration")?;

    let _log_guard = init_logging(&config.logging);

    info!("iGate Display v{} starting...", env!("CARGO_PKG_VERSION"));

    let display =
        DisplaySerial::open_with_paths(&[config.serial.port.as_str()], config.serial.baud_rate)
            .context("Failed to open display serial port")?;
    let device_path = display.device_path();
    info!("Display serial port opened at: {}", device_path);

    let direwolf_conf = Path::new(&config.direwolf.config_path);
    let mycall = match read_mycall(direwolf_conf, config.direwolf.mycall_scan_lines).await {
        Ok(call) => call,
        Err(e) => {
            error!("Could not read MYCALL from {}: {}", config.direwolf.config_path, e);
            return Err(e).context("Local station callsign is required");
        }
    };
    info!("Local station: {}", mycall);

    let telemetry = SystemTelemetry::new(&config.telemetry);
    let mut driver = Driver::new(display, telemetry, mycall, DriverSettings::from_config(&config));

    driver.announce().await;
    driver.run().await;

    Ok(())
}

/// Console logging, plus daily log files when a log directory is configured
///
/// The returned guard flushes the file writer when dropped.
fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().with_writer(writer).with_ansi(false)), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_prefix() {
        assert_eq!(LOG_FILE_PREFIX, "igate-display.log");
    }

    #[test]
    fn test_default_config_is_usable_without_file() {
        let config = Config::default();
        let settings = DriverSettings::from_config(&config);
        assert_eq!(settings.log_path, Path::new("/var/log/direwolf/direwolf.log"));
        assert_eq!(config.serial.port, "/dev/serial0");
    }
}
