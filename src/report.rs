//! The machine readable line the host listens for once auto reporting is on.
//!
//! ```text
//! A,<mean temperature>,<mean humidity>,<valid reads>
//! ```
//!
//! A mean with no valid sensor behind it is sent as `Err`.

use crate::error::{DHTError, Result};
use core::fmt;
use core::str::FromStr;

const PREFIX: &str = "A,";
const NO_VALUE: &str = "Err";

#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct AutoReport {
    pub temperature: Option<f32>,
    pub humidity: Option<f32>,
    pub valid_reads: usize,
}

struct Field(Option<f32>);

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{:.2}", value),
            None => f.write_str(NO_VALUE),
        }
    }
}

impl fmt::Display for AutoReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{},{},{}",
            PREFIX,
            Field(self.temperature),
            Field(self.humidity),
            self.valid_reads
        )
    }
}

fn parse_field(field: &str) -> Result<Option<f32>> {
    if field == NO_VALUE {
        return Ok(None);
    }
    match field.parse::<f32>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(DHTError::MalformedReportError),
    }
}

impl FromStr for AutoReport {
    type Err = DHTError;

    fn from_str(line: &str) -> Result<Self> {
        let body = line
            .trim()
            .strip_prefix(PREFIX)
            .ok_or(DHTError::MalformedReportError)?;

        let fields: Vec<&str> = body.split(',').map(str::trim).collect();
        let [temperature, humidity, valid_reads] = fields[..] else {
            return Err(DHTError::MalformedReportError);
        };

        Ok(Self {
            temperature: parse_field(temperature)?,
            humidity: parse_field(humidity)?,
            valid_reads: valid_reads
                .parse()
                .map_err(|_| DHTError::MalformedReportError)?,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[test]
    fn formats_line() {
        let report = AutoReport {
            temperature: Some(21.5),
            humidity: None,
            valid_reads: 0,
        };
        assert_eq!(report.to_string(), "A,21.50,Err,0");
    }

    #[test]
    fn parses_host_line() {
        let report: AutoReport = "A,23.10,41.70,3\r\n".parse().unwrap();
        assert_eq!(report.valid_reads, 3);
        assert!((report.temperature.unwrap() - 23.1).abs() < 1e-4);
        assert!((report.humidity.unwrap() - 41.7).abs() < 1e-4);
    }

    #[test]
    fn parses_errors() {
        assert_eq!(
            "A,Err,Err,0".parse::<AutoReport>(),
            Ok(AutoReport::default())
        );
    }

    #[rstest]
    #[case("")]
    #[case("Humidity: 40.00%, AVG: 40.00%, ")]
    #[case("A,21.00,40.00")]
    #[case("A,21.00,40.00,1,2")]
    #[case("A,warm,40.00,1")]
    #[case("A,21.00,40.00,-1")]
    #[case("B,21.00,40.00,1")]
    fn rejects_malformed(#[case] line: &str) {
        assert_eq!(
            line.parse::<AutoReport>(),
            Err(DHTError::MalformedReportError)
        );
    }
}
