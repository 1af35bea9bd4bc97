use std::num::ParseIntError;

use serde::{Deserialize, Serialize};

use crate::{CarCount, SignalId};

/// One traffic-count observation: how many cars passed `signal_id` at `timestamp`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SignalRecord {
    pub timestamp: String,
    pub signal_id: SignalId,
    pub car_count: CarCount,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("missing {0} field")]
    MissingField(&'static str),
    #[error("unexpected trailing token `{0}`")]
    UnexpectedToken(String),
    #[error("invalid {field} `{value}`: {source}")]
    InvalidInteger {
        field: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

impl SignalRecord {
    pub fn new(timestamp: impl Into<String>, signal_id: SignalId, car_count: CarCount) -> Self {
        Self {
            timestamp: timestamp.into(),
            signal_id,
            car_count,
        }
    }

    /// Parses `<timestamp> <signal_id> <car_count>`; exactly three tokens.
    pub fn parse_line(line: &str) -> Result<Self, LineError> {
        let mut tokens = line.split_whitespace();
        let timestamp = tokens.next().ok_or(LineError::MissingField("timestamp"))?;
        let signal_id = parse_int(tokens.next(), "signal_id")?;
        let car_count = parse_int(tokens.next(), "car_count")?;
        if let Some(extra) = tokens.next() {
            return Err(LineError::UnexpectedToken(extra.to_string()));
        }
        Ok(Self::new(timestamp, signal_id, car_count))
    }
}

fn parse_int(token: Option<&str>, field: &'static str) -> Result<i64, LineError> {
    let token = token.ok_or(LineError::MissingField(field))?;
    token.parse().map_err(|source| LineError::InvalidInteger {
        field,
        value: token.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_three_tokens() {
        let record = SignalRecord::parse_line("07:00:00 12 40").unwrap();
        assert_eq!(record, SignalRecord::new("07:00:00", 12, 40));
    }

    #[test]
    fn tolerates_mixed_whitespace() {
        let record = SignalRecord::parse_line("  08:00:00\t3   -1 ").unwrap();
        assert_eq!(record, SignalRecord::new("08:00:00", 3, -1));
    }

    #[test]
    fn rejects_blank_line() {
        assert_eq!(
            SignalRecord::parse_line("   "),
            Err(LineError::MissingField("timestamp"))
        );
    }

    #[test]
    fn rejects_missing_count() {
        assert_eq!(
            SignalRecord::parse_line("07:00:00 4"),
            Err(LineError::MissingField("car_count"))
        );
    }

    #[test]
    fn rejects_extra_tokens() {
        assert_eq!(
            SignalRecord::parse_line("07:00:00 4 5 6"),
            Err(LineError::UnexpectedToken("6".into()))
        );
    }

    #[test]
    fn rejects_non_integer_signal() {
        let err = SignalRecord::parse_line("07:00:00 north 5").unwrap_err();
        assert!(matches!(
            err,
            LineError::InvalidInteger { field: "signal_id", ref value, .. } if value == "north"
        ));
    }
}
