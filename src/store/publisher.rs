use std::{num::NonZeroU32, time::Duration};

use bon::Builder;
use clap::ValueEnum;
use tokio::time::sleep;

use crate::{prelude::*, sample::Sample, store::Store};

/// What to do with a sample the store did not accept.
///
/// Either way, the sample is eventually dropped: the polling loop never stalls on the store.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum DeliveryPolicy {
    /// Log and drop right away.
    #[default]
    BestEffort,

    /// Retry a limited number of times before dropping.
    Retry,
}

#[derive(Builder)]
pub struct Publisher<S> {
    store: S,

    #[builder(default)]
    policy: DeliveryPolicy,

    /// Total number of write attempts under [`DeliveryPolicy::Retry`].
    #[builder(default = NonZeroU32::MIN)]
    max_attempts: NonZeroU32,

    #[builder(default)]
    retry_delay: Duration,
}

impl<S: Store> Publisher<S> {
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Write the sample to the store, returning whether it got there.
    #[instrument(skip_all, level = "debug", fields(metric = %sample.metric))]
    pub async fn publish(&self, sample: &Sample) -> bool {
        let line = sample.to_string();
        let max_attempts = match self.policy {
            DeliveryPolicy::BestEffort => 1,
            DeliveryPolicy::Retry => self.max_attempts.get(),
        };
        for attempt in 1..=max_attempts {
            match self.store.write_line(&line).await {
                Ok(()) => return true,
                Err(error) if attempt < max_attempts => {
                    warn!(attempt, "failed to write the sample, retrying: {error:#}");
                    sleep(self.retry_delay).await;
                }
                Err(error) => {
                    error!(attempt, "dropping the sample: {error:#}");
                }
            }
        }
        false
    }
}

#[cfg(test)]
pub mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;
    use crate::{
        energy::{DailySeries, DayWindow, Point},
        quantity::power::Watts,
        sample::Timestamp,
    };

    /// In-memory store which rejects the first `n_failures` writes.
    #[derive(Default)]
    pub struct FakeStore {
        pub lines: RefCell<Vec<String>>,
        pub n_failures: Cell<usize>,
        pub n_attempts: Cell<usize>,
        pub series: Vec<(i64, f64)>,
        pub n_pings_until_ready: Cell<usize>,
    }

    impl Store for FakeStore {
        async fn is_ready(&self) -> bool {
            let n_pings = self.n_pings_until_ready.get();
            self.n_pings_until_ready.set(n_pings.saturating_sub(1));
            n_pings == 0
        }

        async fn write_line(&self, line: &str) -> Result {
            self.n_attempts.set(self.n_attempts.get() + 1);
            let n_failures = self.n_failures.get();
            if n_failures != 0 {
                self.n_failures.set(n_failures - 1);
                bail!("connection refused");
            }
            self.lines.borrow_mut().push(line.to_owned());
            Ok(())
        }

        async fn query_series(&self, metric: &str, _window: &DayWindow) -> Result<DailySeries> {
            ensure!(metric != "broken", "no such series");
            Ok(self
                .series
                .iter()
                .map(|&(timestamp_millis, watts)| Point { timestamp_millis, power: Watts(watts) })
                .collect())
        }
    }

    fn sample() -> Sample {
        Sample::new("grid", -120.0, Timestamp(1))
    }

    #[tokio::test]
    async fn best_effort_ok() {
        let publisher = Publisher::builder().store(FakeStore::default()).build();
        assert!(publisher.publish(&sample()).await);
        assert_eq!(*publisher.store().lines.borrow(), ["grid value=-120 1"]);
    }

    #[tokio::test]
    async fn best_effort_drops_after_one_attempt() {
        let store = FakeStore { n_failures: Cell::new(1), ..FakeStore::default() };
        let publisher = Publisher::builder()
            .store(store)
            .max_attempts(NonZeroU32::new(3).unwrap())
            .build();
        assert!(!publisher.publish(&sample()).await);
        assert_eq!(publisher.store().n_attempts.get(), 1);
        assert!(publisher.store().lines.borrow().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn retry_succeeds() {
        let store = FakeStore { n_failures: Cell::new(2), ..FakeStore::default() };
        let publisher = Publisher::builder()
            .store(store)
            .policy(DeliveryPolicy::Retry)
            .max_attempts(NonZeroU32::new(3).unwrap())
            .retry_delay(Duration::from_secs(1))
            .build();
        assert!(publisher.publish(&sample()).await);
        assert_eq!(publisher.store().n_attempts.get(), 3);
        assert_eq!(publisher.store().lines.borrow().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn retry_is_bounded() {
        let store = FakeStore { n_failures: Cell::new(usize::MAX), ..FakeStore::default() };
        let publisher = Publisher::builder()
            .store(store)
            .policy(DeliveryPolicy::Retry)
            .max_attempts(NonZeroU32::new(2).unwrap())
            .build();
        assert!(!publisher.publish(&sample()).await);
        assert_eq!(publisher.store().n_attempts.get(), 2);
    }
}
