mod frame;
pub use frame::{CommandFrame, FrameError, FrameParseError, ETX, STX};

use std::{
    io::{Read, Write},
    time::Duration,
};

pub type ComResult<T> = Result<T, CommunicationError>;

/// One invocation does exactly one send and one bounded read; the handle is
/// dropped (and the port closed) afterwards, whatever the read yielded.
pub trait CommunicationHandle: Read + Write {
    fn set_timeout(&mut self, timeout: Duration) -> ComResult<()>;

    fn send_frame(&mut self, frame: &CommandFrame) -> ComResult<()> {
        let bytes = Vec::from(frame);
        log::debug!("Sending frame {:02x?}", bytes);
        self.write_all(&bytes)?;
        self.flush()?;
        Ok(())
    }

    /// Reads whatever the module sends back, up to `limit` bytes. A read that
    /// times out with nothing available is a normal outcome and returns an
    /// empty buffer, not an error.
    fn read_response(&mut self, limit: usize) -> ComResult<Vec<u8>> {
        let mut buffer = vec![0; limit];
        match self.read(&mut buffer) {
            Ok(received) => {
                buffer.truncate(received);
                Ok(buffer)
            }
            Err(e)
                if matches!(
                    e.kind(),
                    std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
                ) =>
            {
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl CommunicationHandle for Box<dyn serialport::SerialPort> {
    fn set_timeout(&mut self, timeout: Duration) -> ComResult<()> {
        serialport::SerialPort::set_timeout(self.as_mut(), timeout)?;
        Ok(())
    }
}

/// Opens `port` at `baud`, 8N1. The read timeout is applied afterwards via
/// [`CommunicationHandle::set_timeout`].
pub fn open_serial_port(
    port: &str,
    baud: u32,
) -> Result<Box<dyn serialport::SerialPort>, serialport::Error> {
    serialport::new(port, baud).open()
}

#[derive(Debug, thiserror::Error)]
pub enum CommunicationError {
    /// The serial peripheral itself failed, e.g. while changing the timeout.
    #[error("serial interface error: {0}")]
    Interface(#[from] serialport::Error),
    /// Sending or receiving failed below the protocol. Not recoverable.
    #[error("i/o error: {0}")]
    Io(std::io::Error),
    /// A write did not complete within the port timeout.
    #[error("write timed out")]
    TimedOut,
}

impl From<std::io::Error> for CommunicationError {
    fn from(value: std::io::Error) -> Self {
        match value.kind() {
            std::io::ErrorKind::TimedOut => CommunicationError::TimedOut,
            _ => CommunicationError::Io(value),
        }
    }
}
