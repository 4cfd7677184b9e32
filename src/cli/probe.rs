use std::time::Duration;

use clap::Parser;

#[derive(Parser)]
pub struct ProbeArgs {
    /// Command printing the CPU temperature as `temp=<number>'C`.
    #[clap(long = "temperature-command", env = "TEMPERATURE_COMMAND", default_value = "vcgencmd")]
    pub program: String,

    #[clap(
        long = "temperature-args",
        env = "TEMPERATURE_ARGS",
        value_delimiter = ',',
        default_value = "measure_temp"
    )]
    pub args: Vec<String>,

    /// Kill the command when it takes longer.
    #[clap(id = "temperature_timeout", long = "temperature-timeout", env = "TEMPERATURE_TIMEOUT", default_value = "5s")]
    timeout: humantime::Duration,
}

impl ProbeArgs {
    pub fn timeout(&self) -> Duration {
        self.timeout.into()
    }
}
