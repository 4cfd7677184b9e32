//! Inverter registers polled on every tick.

use tokio_modbus::Address;

/// Named metric backed by one or more holding registers.
///
/// Values of multiple registers are summed, not concatenated into a wider integer.
#[must_use]
#[derive(Debug)]
pub struct MetricSpec {
    pub name: &'static str,
    pub registers: &'static [Address],

    /// Multiplier from the raw register units into the physical units.
    pub factor: f64,
}

impl MetricSpec {
    const fn new(name: &'static str, registers: &'static [Address], factor: f64) -> Self {
        Self { name, registers, factor }
    }
}

pub static CATALOG: &[MetricSpec] = &[
    MetricSpec::new("battery_amps", &[191], 0.01),
    MetricSpec::new("battery_load", &[190], 1.0),
    MetricSpec::new("battery_soc_percent", &[184], 1.0),
    MetricSpec::new("daily_solar_power", &[108], 100.0),
    MetricSpec::new("grid", &[169], 1.0),
    MetricSpec::new("load", &[178], 1.0),
    MetricSpec::new("pv", &[186, 187], 1.0),
    MetricSpec::new("pv1", &[186], 1.0),
    MetricSpec::new("pv2", &[187], 1.0),
    MetricSpec::new("grid_frequency", &[79], 1.0),
    MetricSpec::new("dc_dc_transformer_temperature", &[90], 10.0),
    MetricSpec::new("faults", &[103, 104, 105, 106], 1.0),
    MetricSpec::new("dc_voltage_1", &[109], 0.1),
    MetricSpec::new("dc_current_1", &[110], 0.1),
    MetricSpec::new("dc_voltage_2", &[111], 0.1),
    MetricSpec::new("dc_current_2", &[112], 0.1),
    MetricSpec::new("grid_side_voltage_l1-n", &[150], 0.1),
    MetricSpec::new("grid_side_voltage_l2-n", &[151], 0.1),
    MetricSpec::new("grid_side_voltage_l1-l2", &[152], 0.1),
    MetricSpec::new("voltage_at_middle_side_of_relay_l1-l2", &[153], 0.1),
    MetricSpec::new("inverter_output_voltage_l1-n", &[154], 0.1),
    MetricSpec::new("inverter_output_voltage_l2-n", &[155], 0.1),
    MetricSpec::new("inverter_output_voltage_l1-l2", &[156], 0.1),
    MetricSpec::new("grid_side_current_l1", &[160], 0.01),
];

/// Power metric which gets integrated into the daily energy totals.
#[must_use]
#[derive(Debug)]
pub struct DailyEnergyMetric {
    /// Instantaneous power metric to integrate.
    pub source: &'static str,

    /// Published total of positive power.
    pub draw: &'static str,

    /// Published total of negative power, if anyone is interested.
    pub push: Option<&'static str>,
}

pub static DAILY_ENERGY_METRICS: &[DailyEnergyMetric] = &[
    DailyEnergyMetric { source: "grid", draw: "grid_draw_wh", push: Some("grid_push_wh") },
    DailyEnergyMetric {
        source: "battery_load",
        draw: "battery_draw_wh",
        push: Some("battery_charge_wh"),
    },
    DailyEnergyMetric { source: "load", draw: "load_draw_wh", push: None },
];

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    fn find(name: &str) -> Option<&'static MetricSpec> {
        CATALOG.iter().find(|metric| metric.name == name)
    }

    #[test]
    fn names_are_unique() {
        assert!(CATALOG.iter().map(|metric| metric.name).all_unique());
    }

    #[test]
    fn every_metric_has_registers() {
        assert!(CATALOG.iter().all(|metric| !metric.registers.is_empty()));
    }

    #[test]
    fn names_are_valid_measurements() {
        for metric in CATALOG {
            assert!(
                !metric.name.contains([' ', ',', '=']),
                "`{}` needs escaping in the line protocol",
                metric.name,
            );
        }
    }

    #[test]
    fn pv_is_sum_of_both_strings() {
        let pv = find("pv").unwrap();
        assert_eq!(pv.registers, &[186, 187]);
        assert_eq!(find("pv1").unwrap().registers, &[186]);
        assert_eq!(find("pv2").unwrap().registers, &[187]);
    }

    #[test]
    fn daily_energy_sources_are_polled() {
        for metric in DAILY_ENERGY_METRICS {
            assert!(find(metric.source).is_some(), "`{}` is not polled", metric.source);
        }
    }

    #[test]
    fn unknown_metric() {
        assert!(find("nope").is_none());
    }
}
