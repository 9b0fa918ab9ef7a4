use chrono::NaiveDateTime;
use thiserror::Error;

/// The date/time portion of a bracketed access log token did not match the
/// expected `DD/Mon/YYYY:HH:MM:SS` layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed timestamp: {0:?}")]
pub struct MalformedTimestamp(pub String);

/// Wall-clock layout of the bracketed segment, offset already split off.
const WALL_CLOCK_FORMAT: &str = "%d/%b/%Y:%H:%M:%S";

/// Normalize a bracketed timestamp token (`19/Apr/2023:13:55:36 +0000`)
/// into a zone-less instant.
///
/// The `±HHMM` offset suffix is discarded, not applied: comparisons are done
/// on the wall-clock fields exactly as printed in the log.
pub fn normalize(token: &str) -> Result<NaiveDateTime, MalformedTimestamp> {
    let wall_clock = token
        .split(' ')
        .next()
        .ok_or_else(|| MalformedTimestamp(token.to_string()))?;

    NaiveDateTime::parse_from_str(wall_clock, WALL_CLOCK_FORMAT)
        .map_err(|_| MalformedTimestamp(token.to_string()))
}
