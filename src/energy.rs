//! Daily energy totals integrated from the instantaneous power samples.

mod window;

use std::iter::once;

use chrono::TimeDelta;

pub use self::window::DayWindow;
use crate::{
    prelude::*,
    quantity::{energy::WattHours, power::Watts},
    store::Store,
};

/// Power reading as returned by the store.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Point {
    pub timestamp_millis: i64,
    pub power: Watts,
}

/// Power readings of one metric within a day window, ordered by time.
#[must_use]
#[derive(Clone, Debug, Default)]
pub struct DailySeries(Vec<Point>);

impl DailySeries {
    /// Duration attributed to the last reading, there is nothing to measure the gap against.
    const TAIL_DURATION: TimeDelta = TimeDelta::milliseconds(1000);

    pub fn n_points(&self) -> usize {
        self.0.len()
    }

    /// Sum up the energy, splitting it by the power sign.
    ///
    /// Each reading holds its power until the next reading: this is the left rectangle rule,
    /// not a trapezoid one, so swings between the readings are not smoothed out.
    pub fn integrate(&self) -> EnergyTotals {
        let next_timestamps =
            self.0.iter().skip(1).map(|point| Some(point.timestamp_millis)).chain(once(None));
        let mut totals = EnergyTotals::default();
        for (point, next_timestamp) in self.0.iter().zip(next_timestamps) {
            let duration = next_timestamp.map_or(Self::TAIL_DURATION, |next_timestamp| {
                TimeDelta::milliseconds(next_timestamp - point.timestamp_millis)
            });
            let energy = point.power * duration;
            if point.power < Watts::zero() {
                totals.push += -energy;
            } else {
                totals.draw += energy;
            }
        }
        totals
    }
}

impl FromIterator<Point> for DailySeries {
    fn from_iter<T: IntoIterator<Item = Point>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Energy drawn and pushed back, both non-negative.
#[must_use]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct EnergyTotals {
    pub draw: WattHours,
    pub push: WattHours,
}

/// Query the metric series and integrate it.
///
/// A failing query is treated as no data.
#[instrument(skip_all, fields(metric = metric, start = %window.start))]
pub async fn compute_daily_energy<S: Store>(
    store: &S,
    metric: &str,
    window: &DayWindow,
) -> EnergyTotals {
    let series = store.query_series(metric, window).await.unwrap_or_else(|error| {
        error!("failed to query the series, assuming no data: {error:#}");
        DailySeries::default()
    });
    let totals = series.integrate();
    info!(n_points = series.n_points(), draw = ?totals.draw, push = ?totals.push, "integrated");
    totals
}
