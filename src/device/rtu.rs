//! Modbus RTU over a serial port.

use std::time::Duration;

use tokio::time::timeout;
use tokio_modbus::{
    Address,
    Slave,
    client::{Context as ModbusContext, Reader, rtu},
};
use tokio_serial::SerialStream;

use crate::{
    cli::DeviceArgs,
    device::{ReadError, RegisterReader, decode_word},
    prelude::*,
};

#[must_use]
pub struct Client {
    context: ModbusContext,
    read_timeout: Duration,
}

impl Client {
    /// Open the serial port and attach to the configured unit.
    ///
    /// The port settings, including the timeout, are fixed for the lifetime of the client.
    #[instrument(skip_all, fields(path = %args.path, baud_rate = args.baud_rate, unit_id = args.unit_id))]
    pub fn connect(args: &DeviceArgs) -> Result<Self> {
        info!("connecting…");
        let read_timeout = args.timeout();
        let builder = tokio_serial::new(&args.path, args.baud_rate)
            .parity(args.parity.into())
            .stop_bits(args.stop_bits.into())
            .data_bits(args.data_bits.into())
            .timeout(read_timeout);
        let stream = SerialStream::open(&builder)
            .with_context(|| format!("failed to open `{}`", args.path))?;
        let context = rtu::attach_slave(stream, Slave(args.unit_id));
        info!("connected");
        Ok(Self { context, read_timeout })
    }
}

impl RegisterReader for Client {
    #[instrument(skip_all, level = "debug", fields(address = address))]
    async fn read_register(&mut self, address: Address) -> Result<i16, ReadError> {
        let words = timeout(self.read_timeout, self.context.read_holding_registers(address, 1))
            .await
            .map_err(|_| ReadError::Timeout)???;
        let word = words.first().copied().ok_or(ReadError::Empty)?;
        let value = decode_word(word);
        debug!(value, "read");
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[tokio::test]
    async fn connect_missing_port() -> Result {
        let args =
            DeviceArgs::try_parse_from(["test", "--serial-port", "/dev/nonexistent-tty-5f3a"])?;
        let Err(error) = Client::connect(&args) else {
            bail!("connected to a missing port");
        };
        assert_eq!(error.to_string(), "failed to open `/dev/nonexistent-tty-5f3a`");
        Ok(())
    }
}
