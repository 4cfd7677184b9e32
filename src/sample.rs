use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use chrono::{DateTime, Utc};

use crate::{
    catalog::MetricSpec,
    device::{RawReading, RegisterReader},
    prelude::*,
};

/// Wall-clock time in nanoseconds since the Unix epoch.
#[must_use]
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    derive_more::Display,
    derive_more::FromStr,
)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self::from(Utc::now())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    /// Saturates for the dates beyond year 2262.
    fn from(datetime: DateTime<Utc>) -> Self {
        Self(datetime.timestamp_nanos_opt().unwrap_or(i64::MAX))
    }
}

/// Single data point in the store.
#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    pub metric: String,
    pub value: f64,
    pub timestamp: Timestamp,
}

impl Sample {
    pub fn new(metric: impl Into<String>, value: f64, timestamp: Timestamp) -> Self {
        Self { metric: metric.into(), value, timestamp }
    }
}

/// Line protocol: `<metric> value=<value> <timestamp>`.
impl Display for Sample {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} value={} {}", self.metric, self.value, self.timestamp)
    }
}

impl FromStr for Sample {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let metric = parts.next().context("missing measurement")?;
        let value = parts
            .next()
            .context("missing field set")?
            .strip_prefix("value=")
            .context("the only field must be `value`")?
            .parse()
            .context("invalid value")?;
        let timestamp =
            parts.next().context("missing timestamp")?.parse().context("invalid timestamp")?;
        ensure!(parts.next().is_none(), "trailing data in `{line}`");
        Ok(Self::new(metric, value, timestamp))
    }
}

/// Read all the metric registers and convert their sum into the physical units.
///
/// Failed registers contribute zero and do not prevent reading the rest.
#[instrument(skip_all, level = "debug", fields(metric = metric.name))]
pub async fn build_sample<R: RegisterReader>(reader: &mut R, metric: &MetricSpec) -> Sample {
    let mut total = 0_i32;
    for &address in metric.registers {
        let reading = RawReading { address, value: reader.read_register(address).await };
        if let Err(error) = &reading.value {
            warn!(
                metric = metric.name,
                address = reading.address,
                "failed to read the register, counting as zero: {error:#}",
            );
        }
        total += i32::from(reading.value_or_zero());
    }
    Sample::new(metric.name, f64::from(total) * metric.factor, Timestamp::now())
}
