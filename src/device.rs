pub mod rtu;

use thiserror::Error;
use tokio_modbus::{Address, ExceptionCode};

/// Failed single-register read.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("timed out waiting for the device")]
    Timeout,

    #[error("transport failure")]
    Transport(#[from] tokio_modbus::Error),

    #[error("device responded with `{0}`")]
    Exception(#[from] ExceptionCode),

    #[error("empty response")]
    Empty,
}

/// Field device which exposes signed 16-bit holding registers.
pub trait RegisterReader {
    /// Read exactly one register.
    async fn read_register(&mut self, address: Address) -> Result<i16, ReadError>;
}

/// Outcome of one register fetch within a read cycle.
#[must_use]
pub struct RawReading {
    pub address: Address,
    pub value: Result<i16, ReadError>,
}

impl RawReading {
    /// Failed reads count as zero.
    pub fn value_or_zero(&self) -> i16 {
        self.value.as_ref().copied().unwrap_or_default()
    }
}

/// Reinterpret the register word as a signed integer.
#[expect(clippy::cast_possible_wrap)]
pub const fn decode_word(word: u16) -> i16 {
    word as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_positive() {
        assert_eq!(decode_word(0x0064), 100);
    }

    #[test]
    fn decode_negative() {
        assert_eq!(decode_word(0xFFCE), -50);
        assert_eq!(decode_word(0x8000), i16::MIN);
    }

    #[test]
    fn failed_reading_is_zero() {
        let reading = RawReading { address: 169, value: Err(ReadError::Timeout) };
        assert_eq!(reading.value_or_zero(), 0);
    }

    #[test]
    fn successful_reading() {
        let reading = RawReading { address: 169, value: Ok(-42) };
        assert_eq!(reading.value_or_zero(), -42);
    }
}
