use std::{num::NonZeroU32, time::Duration};

use clap::Parser;
use reqwest::Url;

use crate::store::DeliveryPolicy;

#[derive(Parser)]
pub struct StoreArgs {
    /// Base URL of the store.
    #[clap(long = "influxdb-url", env = "INFLUXDB_URL", default_value = "http://localhost:8086")]
    pub url: Url,

    #[clap(long = "influxdb-database", env = "INFLUXDB_DATABASE", default_value = "solar")]
    pub database: String,

    /// Delay between the readiness checks and between the write retries.
    #[clap(long = "store-retry-delay", env = "STORE_RETRY_DELAY", default_value = "1s")]
    retry_delay: humantime::Duration,

    #[clap(long, env = "DELIVERY_POLICY", value_enum, default_value_t)]
    pub delivery_policy: DeliveryPolicy,

    /// Total write attempts per sample under the `retry` policy.
    #[clap(long, env = "WRITE_ATTEMPTS", default_value = "3")]
    pub write_attempts: NonZeroU32,
}

impl StoreArgs {
    pub fn retry_delay(&self) -> Duration {
        self.retry_delay.into()
    }
}
