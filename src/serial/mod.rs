//! # Serial Communication Module
//!
//! Handles the serial link to the display.
//!
//! This module handles:
//! - Opening the display UART (8N1, no flow control)
//! - Writing framed field commands
//! - Abstracting the port behind [`DisplayPort`] for tests

pub mod port_trait;

use crate::display::fields::FieldUpdate;
use crate::display::protocol::encode_text_command;
use crate::error::{IgateDisplayError, Result};
use port_trait::{DisplayPort, SerialDisplayPort};
use tokio_serial::SerialPortBuilderExt;
use tracing::{debug, info, warn};

/// Default display baud rate
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Default display device (Raspberry Pi primary UART)
pub const DEFAULT_DEVICE_PATH: &str = "/dev/serial0";

/// Display serial link
///
/// Owns the port for the lifetime of the process.
pub struct DisplaySerial<P: DisplayPort = SerialDisplayPort> {
    /// Serial port handle
    port: P,
    /// Device path (e.g., /dev/serial0)
    device_path: String,
}

impl<P: DisplayPort> std::fmt::Debug for DisplaySerial<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisplaySerial")
            .field("device_path", &self.device_path)
            .finish_non_exhaustive()
    }
}

impl DisplaySerial<SerialDisplayPort> {
    /// Open the display on the first path that works
    ///
    /// # Arguments
    ///
    /// * `paths` - Device paths to try in order (e.g., &["/dev/serial0"])
    /// * `baud_rate` - Line speed
    ///
    /// # Returns
    ///
    /// * `Result<DisplaySerial>` - Connected serial port or error
    ///
    /// # Errors
    ///
    /// Returns `SerialPortNotFound` if none of the paths can be opened
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use igate_display::serial::DisplaySerial;
    ///
    /// fn main() -> anyhow::Result<()> {
    ///     let serial = DisplaySerial::open_with_paths(&["/dev/serial0"], 115_200)?;
    ///     Ok(())
    /// }
    /// ```
    pub fn open_with_paths(paths: &[&str], baud_rate: u32) -> Result<Self> {
        for path in paths {
            debug!("Trying to open serial port: {}", path);

            match Self::open_port(path, baud_rate) {
                Ok(port) => {
                    info!("Opened display at {} ({} baud)", path, baud_rate);
                    return Ok(Self {
                        port: SerialDisplayPort::new(port),
                        device_path: path.to_string(),
                    });
                }
                Err(e) => {
                    warn!("Failed to open {}: {}", path, e);
                    continue;
                }
            }
        }

        Err(IgateDisplayError::SerialPortNotFound(paths.join(", ")))
    }

    /// Open a specific serial port with display settings
    fn open_port(path: &str, baud_rate: u32) -> Result<tokio_serial::SerialStream> {
        let port = tokio_serial::new(path, baud_rate)
            .data_bits(tokio_serial::DataBits::Eight)
            .parity(tokio_serial::Parity::None)
            .stop_bits(tokio_serial::StopBits::One)
            .flow_control(tokio_serial::FlowControl::None)
            .open_native_async()
            .map_err(|e| IgateDisplayError::Serial(format!("Failed to open {}: {}", path, e)))?;

        Ok(port)
    }
}

impl<P: DisplayPort> DisplaySerial<P> {
    /// Wrap an already opened port
    pub fn from_port(port: P, device_path: impl Into<String>) -> Self {
        Self {
            port,
            device_path: device_path.into(),
        }
    }

    /// Send one field update to the display
    ///
    /// # Arguments
    ///
    /// * `update` - Field and text to show
    ///
    /// # Returns
    ///
    /// * `Result<()>` - Success or error
    pub async fn send_field(&mut self, update: &FieldUpdate) -> Result<()> {
        let frame = encode_text_command(update.field, &update.value);

        self.port.write_frame(&frame).await.map_err(|e| {
            IgateDisplayError::Serial(format!("Failed to send {}: {}", update.field, e))
        })?;

        debug!("{}=\"{}\"", update.field, update.value);
        Ok(())
    }

    /// Send a batch of updates, logging failures instead of stopping
    ///
    /// # Returns
    ///
    /// * `usize` - Number of updates written successfully
    pub async fn send_all(&mut self, updates: &[FieldUpdate]) -> usize {
        let mut sent = 0;
        for update in updates {
            match self.send_field(update).await {
                Ok(()) => sent += 1,
                Err(e) => warn!("{}", e),
            }
        }
        sent
    }

    /// Get the device path of the opened serial port
    pub fn device_path(&self) -> &str {
        &self.device_path
    }
}
