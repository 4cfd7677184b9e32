//! Time-series store: InfluxDB 1.x HTTP API.

mod influx;
mod publisher;
mod query;

#[cfg(test)]
pub use self::publisher::tests::FakeStore;
pub use self::{
    influx::Client,
    publisher::{DeliveryPolicy, Publisher},
};
use crate::{
    energy::{DailySeries, DayWindow},
    prelude::*,
};

pub trait Store {
    /// Check whether the store accepts requests.
    async fn is_ready(&self) -> bool;

    /// Ingest a single line-protocol line.
    async fn write_line(&self, line: &str) -> Result;

    /// Fetch the metric values within the window, empty time buckets filled with zeros.
    async fn query_series(&self, metric: &str, window: &DayWindow) -> Result<DailySeries>;
}
