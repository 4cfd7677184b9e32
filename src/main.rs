mod catalog;
mod cli;
mod device;
mod energy;
mod prelude;
mod probe;
mod quantity;
mod sample;
mod scheduler;
mod store;

use clap::{Parser, crate_version};

use crate::{
    cli::Args,
    device::rtu,
    prelude::*,
    probe::TemperatureProbe,
    scheduler::{Scheduler, wait_for_store},
    store::Publisher,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();

    let store = store::Client::new(&args.store.url, &args.store.database)?;
    wait_for_store(&store, args.store.retry_delay()).await;

    // Unlike the store, the device gets no second chance.
    let device = rtu::Client::connect(&args.device).context("failed to connect to the device")?;

    let probe_timeout = args.probe.timeout();
    let probe = TemperatureProbe::new(args.probe.program, args.probe.args, probe_timeout);
    let publisher = Publisher::builder()
        .store(store)
        .policy(args.store.delivery_policy)
        .max_attempts(args.store.write_attempts)
        .retry_delay(args.store.retry_delay())
        .build();
    Scheduler::builder()
        .reader(device)
        .publisher(publisher)
        .probe(probe)
        .interval(args.polling.interval())
        .log_every(args.polling.log_every)
        .integration_period(args.polling.integration_period)
        .build()
        .run()
        .await
}
