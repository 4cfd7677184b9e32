use std::ops::Mul;

use chrono::TimeDelta;

use crate::quantity::energy::WattHours;

quantity!(Watts, "W");

impl Mul<TimeDelta> for Watts {
    type Output = WattHours;

    /// Energy over the duration, counted in whole milliseconds.
    fn mul(self, duration: TimeDelta) -> Self::Output {
        #[expect(clippy::cast_precision_loss)]
        let watt_milliseconds = self.0 * duration.num_milliseconds() as f64;
        WattHours(watt_milliseconds / 1000.0 / 3600.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn one_hour_of_one_kilowatt() {
        let energy = Watts(1000.0) * TimeDelta::hours(1);
        assert_abs_diff_eq!(energy.0, 1000.0);
    }

    #[test]
    fn negative_power_gives_negative_energy() {
        let energy = Watts(-50.0) * TimeDelta::seconds(1);
        assert_abs_diff_eq!(energy.0, -50.0 / 3600.0);
    }
}
