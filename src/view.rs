//! The CDC view: one row in, at most one `(key, 1)` emission out.

use crate::errors::BenchError;
use crate::row::{Row, is_truthy, member, type_name};
use chrono::{DateTime, Datelike, Utc};
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};

/// Source reported for rows without a `contentType`.
pub const DEFAULT_SOURCE: &str = "tagging";

/// Largest absolute time value, in milliseconds from the epoch, a timestamp may carry.
const MAX_TIME_MS: f64 = 8.64e15;

/// Signature shared by all views the driver can run.
pub type ViewFn = fn(&Row) -> Result<Option<Emission>, BenchError>;

/// Composite key of one emission. Serializes as a five element JSON array.
#[derive(Debug, Clone, PartialEq)]
pub struct EmitKey {
    pub timestamp: String,
    pub sequence: Number,
    pub update_type: Value,
    pub object_type: Value,
    pub source: Value,
}

impl Serialize for EmitKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.timestamp, &self.sequence, &self.update_type, &self.object_type, &self.source)
            .serialize(serializer)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Emission {
    pub key: EmitKey,
    pub value: i64,
}

/// Maps a change-data-capture row to its view entry.
///
/// Rows without a truthy `mcc_cdc` are skipped, including scalar and array rows. A
/// `null` row has no fields to read and fails. The sequence is used as-is: anything
/// other than a JSON number is an error, nothing is coerced.
///
/// # Errors
/// `FieldAccess` for a `null` row or when `mcc_cdc.sequence` is missing or not a number,
/// `InvalidTime` when the sequence does not denote a representable instant.
pub fn view_map(row: &Row) -> Result<Option<Emission>, BenchError> {
    if row.is_null() {
        return Err(BenchError::FieldAccess { field: "row", found: "null".to_string() });
    }
    let Some(cdc) = row.truthy("mcc_cdc") else {
        return Ok(None);
    };
    let source = match row.truthy("contentType") {
        Some(ct) => member(ct, "source").cloned().unwrap_or(Value::Null),
        None => Value::String(DEFAULT_SOURCE.to_string()),
    };
    let sequence = match member(cdc, "sequence") {
        Some(Value::Number(n)) => n,
        other => {
            return Err(BenchError::FieldAccess {
                field: "mcc_cdc.sequence",
                found: type_name(other).to_string(),
            });
        }
    };
    let timestamp = iso8601_from_epoch_seconds(sequence.as_f64().unwrap_or(f64::NAN))?;
    let key = EmitKey {
        timestamp,
        sequence: sequence.clone(),
        update_type: member(cdc, "update_type").cloned().unwrap_or(Value::Null),
        object_type: member(cdc, "object_type").cloned().unwrap_or(Value::Null),
        source,
    };
    Ok(Some(Emission { key, value: 1 }))
}

/// Formats epoch seconds as `YYYY-MM-DDTHH:MM:SS.sssZ` at millisecond precision.
///
/// Sub-millisecond fractions are truncated toward zero. Years outside 0..=9999 use the
/// expanded `+YYYYYY` / `-YYYYYY` form.
///
/// # Errors
/// `InvalidTime` when the instant is not finite or out of range.
pub fn iso8601_from_epoch_seconds(seconds: f64) -> Result<String, BenchError> {
    let millis = seconds * 1000.0;
    if !millis.is_finite() || millis.abs() > MAX_TIME_MS {
        return Err(BenchError::InvalidTime(seconds));
    }
    #[allow(clippy::cast_possible_truncation)]
    let dt = DateTime::<Utc>::from_timestamp_millis(millis.trunc() as i64)
        .ok_or(BenchError::InvalidTime(seconds))?;
    let rest = dt.format("%m-%dT%H:%M:%S%.3fZ");
    let year = dt.year();
    Ok(if (0..=9999).contains(&year) {
        format!("{year:04}-{rest}")
    } else {
        let sign = if year < 0 { '-' } else { '+' };
        format!("{sign}{:06}-{rest}", year.unsigned_abs())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_start() {
        assert_eq!(iso8601_from_epoch_seconds(0.0).unwrap(), "1970-01-01T00:00:00.000Z");
    }

    #[test]
    fn fractional_seconds_keep_milliseconds() {
        assert_eq!(iso8601_from_epoch_seconds(1.2345).unwrap(), "1970-01-01T00:00:01.234Z");
        assert_eq!(iso8601_from_epoch_seconds(-0.001).unwrap(), "1969-12-31T23:59:59.999Z");
    }

    #[test]
    fn expanded_years() {
        assert_eq!(
            iso8601_from_epoch_seconds(253_402_300_800.0).unwrap(),
            "+010000-01-01T00:00:00.000Z"
        );
        assert_eq!(
            iso8601_from_epoch_seconds(-62_198_755_200.0).unwrap(),
            "-000001-01-01T00:00:00.000Z"
        );
    }

    #[test]
    fn out_of_range() {
        assert!(matches!(iso8601_from_epoch_seconds(9e12), Err(BenchError::InvalidTime(_))));
        assert!(iso8601_from_epoch_seconds(f64::INFINITY).is_err());
    }
}
