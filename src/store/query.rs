use serde::Deserialize;

use crate::{
    energy::{DailySeries, DayWindow, Point},
    quantity::power::Watts,
};

/// Build the `InfluxQL` statement selecting the metric values within the window.
pub fn build_query(metric: &str, window: &DayWindow) -> String {
    const FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
    format!(
        r#"SELECT value FROM "{metric}" WHERE time >= '{}' AND time <= '{}' fill(0)"#,
        window.start.format(FORMAT),
        window.end.format(FORMAT),
    )
}

/// Response of `/query` with `epoch=ms`.
#[derive(Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    results: Vec<StatementResult>,
}

impl QueryResponse {
    /// Extract the values of the first series of the first statement.
    ///
    /// Missing values are filled with zeros.
    pub fn into_series(self) -> Option<DailySeries> {
        let series = self.results.into_iter().next()?.series.into_iter().next()?;
        Some(
            series
                .values
                .into_iter()
                .map(|(timestamp_millis, value)| Point {
                    timestamp_millis,
                    power: Watts(value.unwrap_or_default()),
                })
                .collect(),
        )
    }
}

#[derive(Deserialize)]
struct StatementResult {
    #[serde(default)]
    series: Vec<Series>,
}

#[derive(Deserialize)]
struct Series {
    values: Vec<(i64, Option<f64>)>,
}
