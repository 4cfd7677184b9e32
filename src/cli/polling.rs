use std::time::Duration;

use clap::Parser;

#[derive(Parser)]
pub struct PollingArgs {
    /// Pause between the ticks.
    #[clap(long = "polling-interval", env = "POLLING_INTERVAL", default_value = "1s")]
    interval: humantime::Duration,

    /// Log the published samples every N-th tick.
    #[clap(
        long,
        env = "LOG_EVERY",
        default_value = "5",
        value_parser = clap::value_parser!(u8).range(1..=100),
    )]
    pub log_every: u8,

    /// Integrate the daily energy totals every N-th tick.
    ///
    /// The tick counter wraps at 100, so periods which do not divide 100
    /// also fire on the wrap.
    #[clap(
        long,
        env = "INTEGRATION_PERIOD",
        default_value = "99",
        value_parser = clap::value_parser!(u8).range(1..=100),
    )]
    pub integration_period: u8,
}

impl PollingArgs {
    pub fn interval(&self) -> Duration {
        self.interval.into()
    }
}
