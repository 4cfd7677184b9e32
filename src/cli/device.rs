use std::time::Duration;

use clap::{Parser, ValueEnum};

#[derive(Parser)]
pub struct DeviceArgs {
    /// Serial port of the inverter.
    #[clap(long = "serial-port", env = "SERIAL_PORT", default_value = "/dev/ttyUSB0")]
    pub path: String,

    #[clap(long, env = "BAUD_RATE", default_value = "9600")]
    pub baud_rate: u32,

    #[clap(long, env = "PARITY", default_value = "none")]
    pub parity: Parity,

    #[clap(long, env = "STOP_BITS", default_value = "one")]
    pub stop_bits: StopBits,

    #[clap(long, env = "DATA_BITS", default_value = "8")]
    pub data_bits: DataBits,

    /// Modbus unit (slave) ID.
    #[clap(long, env = "UNIT_ID", default_value = "1")]
    pub unit_id: u8,

    /// Maximum time to wait for a register response.
    #[clap(id = "device_timeout", long = "device-timeout", env = "DEVICE_TIMEOUT", default_value = "10s")]
    timeout: humantime::Duration,
}

impl DeviceArgs {
    pub fn timeout(&self) -> Duration {
        self.timeout.into()
    }
}

#[derive(Copy, Clone, ValueEnum)]
pub enum Parity {
    None,
    Odd,
    Even,
}

impl From<Parity> for tokio_serial::Parity {
    fn from(parity: Parity) -> Self {
        match parity {
            Parity::None => Self::None,
            Parity::Odd => Self::Odd,
            Parity::Even => Self::Even,
        }
    }
}

#[derive(Copy, Clone, ValueEnum)]
pub enum StopBits {
    One,
    Two,
}

impl From<StopBits> for tokio_serial::StopBits {
    fn from(stop_bits: StopBits) -> Self {
        match stop_bits {
            StopBits::One => Self::One,
            StopBits::Two => Self::Two,
        }
    }
}

#[derive(Copy, Clone, ValueEnum)]
pub enum DataBits {
    #[value(name = "5")]
    Five,

    #[value(name = "6")]
    Six,

    #[value(name = "7")]
    Seven,

    #[value(name = "8")]
    Eight,
}

impl From<DataBits> for tokio_serial::DataBits {
    fn from(data_bits: DataBits) -> Self {
        match data_bits {
            DataBits::Five => Self::Five,
            DataBits::Six => Self::Six,
            DataBits::Seven => Self::Seven,
            DataBits::Eight => Self::Eight,
        }
    }
}
