//! Host CPU temperature, scraped from the `vcgencmd measure_temp` output.

use std::{io, num::ParseFloatError, process::ExitStatus, sync::LazyLock, time::Duration};

use regex::Regex;
use thiserror::Error;
use tokio::{process::Command, time::timeout};

use crate::prelude::*;

static OUTPUT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^temp=(.*?)'C$").expect("the pattern must be valid"));

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to run `{0}`")]
    Spawn(String, #[source] io::Error),

    #[error("the command did not finish within {0:?}")]
    Timeout(Duration),

    #[error("the command exited with {0}")]
    Status(ExitStatus),

    #[error("unexpected output `{0}`")]
    Output(String),

    #[error("invalid temperature `{0}`")]
    Temperature(String, #[source] ParseFloatError),
}

#[must_use]
pub struct TemperatureProbe {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl TemperatureProbe {
    pub const fn new(program: String, args: Vec<String>, timeout: Duration) -> Self {
        Self { program, args, timeout }
    }

    /// Run the command and parse the temperature in degrees Celsius.
    ///
    /// The command gets killed when it does not finish in time.
    #[instrument(skip_all, level = "debug", fields(program = %self.program))]
    pub async fn measure(&self) -> Result<f64, ProbeError> {
        let mut command = Command::new(&self.program);
        command.args(&self.args).kill_on_drop(true);
        let output = timeout(self.timeout, command.output())
            .await
            .map_err(|_| ProbeError::Timeout(self.timeout))?
            .map_err(|error| ProbeError::Spawn(self.program.clone(), error))?;
        if !output.status.success() {
            return Err(ProbeError::Status(output.status));
        }
        parse_temperature(&String::from_utf8_lossy(&output.stdout))
    }
}

pub fn parse_temperature(output: &str) -> Result<f64, ProbeError> {
    let output = output.trim_end();
    let temperature = OUTPUT_PATTERN
        .captures(output)
        .and_then(|captures| captures.get(1))
        .ok_or_else(|| ProbeError::Output(output.to_owned()))?
        .as_str();
    temperature.parse().map_err(|error| ProbeError::Temperature(temperature.to_owned(), error))
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn parse_ok() -> Result {
        assert_abs_diff_eq!(parse_temperature("temp=48.3'C\n")?, 48.3);
        Ok(())
    }

    #[test]
    fn parse_unexpected_output() {
        let result = parse_temperature("VCHI initialization failed");
        assert!(matches!(result, Err(ProbeError::Output(_))));
    }

    #[test]
    fn parse_invalid_number() {
        assert!(matches!(parse_temperature("temp=hot'C"), Err(ProbeError::Temperature(..))));
    }

    #[tokio::test]
    async fn missing_command() {
        let probe = TemperatureProbe::new(
            "definitely-not-a-command-5f3a".to_owned(),
            vec![],
            Duration::from_secs(1),
        );
        assert!(matches!(probe.measure().await, Err(ProbeError::Spawn(..))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn hanging_command_times_out() {
        let probe = TemperatureProbe::new(
            "sleep".to_owned(),
            vec!["30".to_owned()],
            Duration::from_millis(100),
        );
        let result = tokio::time::timeout(Duration::from_secs(5), probe.measure()).await;
        assert!(matches!(result, Ok(Err(ProbeError::Timeout(_)))));
    }
}
