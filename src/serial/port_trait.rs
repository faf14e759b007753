//! Display port seam: the driver hands over whole command frames, the port
//! puts them on the wire

use async_trait::async_trait;
use bytes::Bytes;
use std::io;

/// Sink for encoded display command frames
#[async_trait]
pub trait DisplayPort: Send {
    /// Write one complete frame and wait until it has left the output buffer
    ///
    /// A frame is either fully handed to the device or the call fails; the
    /// display never sees half a command followed by the next one.
    async fn write_frame(&mut self, frame: &Bytes) -> io::Result<()>;
}

/// UART-backed display port
pub struct SerialDisplayPort {
    port: tokio_serial::SerialStream,
}

impl SerialDisplayPort {
    /// Wrap an opened serial stream
    pub fn new(port: tokio_serial::SerialStream) -> Self {
        Self { port }
    }
}

#[async_trait]
impl DisplayPort for SerialDisplayPort {
    async fn write_frame(&mut self, frame: &Bytes) -> io::Result<()> {
        use tokio::io::AsyncWriteExt;
        self.port.write_all(frame).await?;
        self.port.flush().await
    }
}
