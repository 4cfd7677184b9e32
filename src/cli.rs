mod device;
mod polling;
mod probe;
mod store;

use clap::Parser;

pub use self::{device::DeviceArgs, polling::PollingArgs, probe::ProbeArgs, store::StoreArgs};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[clap(flatten)]
    pub device: DeviceArgs,

    #[clap(flatten)]
    pub store: StoreArgs,

    #[clap(flatten)]
    pub polling: PollingArgs,

    #[clap(flatten)]
    pub probe: ProbeArgs,
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use clap::CommandFactory;

    use super::*;
    use crate::{prelude::*, store::DeliveryPolicy};

    #[test]
    fn command_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults() -> Result {
        let args = Args::try_parse_from(["solar-stats"])?;
        assert_eq!(args.device.path, "/dev/ttyUSB0");
        assert_eq!(args.device.baud_rate, 9600);
        assert_eq!(args.device.unit_id, 1);
        assert_eq!(args.store.url.as_str(), "http://localhost:8086/");
        assert_eq!(args.store.database, "solar");
        assert_eq!(args.store.delivery_policy, DeliveryPolicy::BestEffort);
        assert_eq!(args.polling.log_every, 5);
        assert_eq!(args.polling.integration_period, 99);
        assert_eq!(args.probe.program, "vcgencmd");
        assert_eq!(args.probe.args, ["measure_temp"]);
        assert_eq!(args.probe.timeout(), Duration::from_secs(5));
        Ok(())
    }

    #[test]
    fn integration_period_is_bounded() {
        assert!(Args::try_parse_from(["solar-stats", "--integration-period", "101"]).is_err());
        assert!(Args::try_parse_from(["solar-stats", "--integration-period", "0"]).is_err());
        assert!(Args::try_parse_from(["solar-stats", "--integration-period", "1"]).is_ok());
    }
}
