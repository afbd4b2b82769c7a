use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pay period unit for income inputs and displayed results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Year,
    Month,
    Day,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown frequency '{0}', expected year, month or day")]
pub struct ParseFrequencyError(String);

impl FromStr for Frequency {
    type Err = ParseFrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "year" => Ok(Self::Year),
            "month" => Ok(Self::Month),
            "day" => Ok(Self::Day),
            _ => Err(ParseFrequencyError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_known_units() {
        assert_eq!("year".parse(), Ok(Frequency::Year));
        assert_eq!("month".parse(), Ok(Frequency::Month));
        assert_eq!("day".parse(), Ok(Frequency::Day));
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Month".parse(), Ok(Frequency::Month));
        assert_eq!("YEAR".parse(), Ok(Frequency::Year));
    }

    #[test]
    fn parse_rejects_unknown_unit() {
        let result: Result<Frequency, _> = "week".parse();

        assert_eq!(result, Err(ParseFrequencyError("week".to_string())));
    }

    #[test]
    fn as_str_round_trips() {
        for frequency in [Frequency::Year, Frequency::Month, Frequency::Day] {
            assert_eq!(frequency.as_str().parse(), Ok(frequency));
        }
    }
}
