//! Contract parameter building
//!
//! Converts an evaluation's human-readable duration and settlement time into
//! the integers the market contract takes. Output feeds an irreversible
//! on-chain call, so anything questionable is rejected.

use crate::error::{PipelineError, Result};
use crate::evaluator::EvaluationRecord;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::str::FromStr;

const SECONDS_PER_HOUR: i64 = 3600;

/// Numeric market-creation parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractParams {
    /// Trading window length in seconds
    pub trading_duration_seconds: u64,
    /// Settlement instant as seconds since the Unix epoch
    pub settlement_unix_timestamp: i64,
}

impl ContractParams {
    /// Build parameters for an evaluation, relative to the run's start time
    pub fn build(evaluation: &EvaluationRecord, now: DateTime<Utc>) -> Result<Self> {
        let hours = decimal_hours(&evaluation.trading_duration_hours)?;
        let trading_duration_seconds = duration_seconds(hours)?;
        let settlement = parse_settlement(&evaluation.settlement_timestamp)?;

        if settlement <= now {
            return Err(PipelineError::InvalidSettlementTime {
                value: evaluation.settlement_timestamp.clone(),
                reason: format!("not after run start {}", now.to_rfc3339()),
            });
        }

        Ok(Self {
            trading_duration_seconds,
            settlement_unix_timestamp: settlement.timestamp(),
        })
    }
}

/// Exact decimal value of a JSON hours figure
///
/// Numbers a `Decimal` cannot hold (e.g. `1e30`) are an invalid duration.
pub fn decimal_hours(hours: &Number) -> Result<Decimal> {
    let text = hours.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| PipelineError::InvalidDuration { hours: text })
}

/// Hours to whole seconds, rounded to the nearest second
pub fn duration_seconds(hours: Decimal) -> Result<u64> {
    let invalid = || PipelineError::InvalidDuration {
        hours: hours.to_string(),
    };

    if hours <= Decimal::ZERO {
        return Err(invalid());
    }

    let seconds = hours
        .checked_mul(Decimal::from(SECONDS_PER_HOUR))
        .ok_or_else(invalid)?
        .round()
        .to_u64()
        .ok_or_else(invalid)?;

    if seconds == 0 {
        return Err(invalid());
    }
    Ok(seconds)
}

/// Offset-carrying layouts beyond strict RFC 3339 (`+0000`, space separator,
/// no seconds)
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M%z",
];

/// Layouts without an offset, read as UTC
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 settlement time
///
/// Accepts RFC 3339, offsets with or without a colon, `T` or space between
/// date and time, optional seconds, a date-time without offset (taken as
/// UTC), or a bare date (midnight UTC).
pub fn parse_settlement(value: &str) -> Result<DateTime<Utc>> {
    let trimmed = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(trimmed, fmt).ok())
    {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = trimmed
        .strip_suffix(['Z', 'z'])
        .unwrap_or(trimmed);
    if let Some(dt) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(naive, fmt).ok())
    {
        return Ok(dt.and_utc());
    }
    if let Some(midnight) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc());
    }

    Err(PipelineError::InvalidSettlementTime {
        value: value.to_string(),
        reason: "not an ISO-8601 timestamp".to_string(),
    })
}
