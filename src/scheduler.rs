//! Polling loop: register samples every tick, daily energy totals every few ticks.

mod context;

use std::time::Duration;

use bon::Builder;
use chrono::Utc;
use tokio::time::sleep;

pub use self::context::SchedulerContext;
use crate::{
    catalog::{CATALOG, DAILY_ENERGY_METRICS, MetricSpec},
    device::RegisterReader,
    energy::{DayWindow, compute_daily_energy},
    prelude::*,
    probe::TemperatureProbe,
    sample::{Sample, Timestamp, build_sample},
    store::{Publisher, Store},
};

/// Block until the store reports it is ready, checking with the fixed delay.
#[instrument(skip_all)]
pub async fn wait_for_store<S: Store>(store: &S, retry_delay: Duration) {
    while !store.is_ready().await {
        info!(?retry_delay, "the store is not up yet, sleeping…");
        sleep(retry_delay).await;
    }
    info!("the store is ready");
}

#[derive(Builder)]
pub struct Scheduler<R, S> {
    reader: R,
    publisher: Publisher<S>,
    probe: TemperatureProbe,

    #[builder(default = CATALOG)]
    catalog: &'static [MetricSpec],

    /// Pause after each tick.
    #[builder(into)]
    interval: Duration,

    log_every: u8,
    integration_period: u8,
}

impl<R: RegisterReader, S: Store> Scheduler<R, S> {
    /// Poll until the process gets terminated.
    pub async fn run(mut self) -> Result {
        info!(n_metrics = self.catalog.len(), interval = ?self.interval, "polling…");
        let mut context = SchedulerContext::default();
        loop {
            self.tick(&mut context).await;
            sleep(self.interval).await;
        }
    }

    async fn tick(&mut self, context: &mut SchedulerContext) {
        let tick = context.counter.advance();

        for metric in self.catalog {
            let sample = build_sample(&mut self.reader, metric).await;
            self.publisher.publish(&sample).await;
            if tick.is_multiple_of(self.log_every) {
                info!(tick, "{sample}");
            }
            context.last_timestamp = Some(sample.timestamp);
        }

        if tick.is_multiple_of(self.integration_period) {
            self.publish_daily_energy(context.last_timestamp.unwrap_or_else(Timestamp::now)).await;
        }

        self.publish_temperature().await;
    }

    /// Integrate the power metrics since 07:00 and publish the totals.
    #[instrument(skip_all)]
    async fn publish_daily_energy(&self, timestamp: Timestamp) {
        let window = DayWindow::containing(Utc::now());
        info!(start = %window.start, end = %window.end, "integrating the daily energy…");
        for metric in DAILY_ENERGY_METRICS {
            let totals = compute_daily_energy(self.publisher.store(), metric.source, &window).await;
            self.publisher.publish(&Sample::new(metric.draw, totals.draw.0, timestamp)).await;
            if let Some(push) = metric.push {
                self.publisher.publish(&Sample::new(push, totals.push.0, timestamp)).await;
            }
        }
    }

    async fn publish_temperature(&self) {
        match self.probe.measure().await {
            Ok(temperature) => {
                let sample = Sample::new("cpu_temp", temperature, Timestamp::now());
                self.publisher.publish(&sample).await;
            }
            Err(error) => {
                error!("failed to measure the CPU temperature: {:#}", Error::from(error));
            }
        }
    }
}
