pub mod record;
pub mod timestamp;

use fancy_regex::{Captures, Regex};
use record::LogRecord;
use std::sync::LazyLock;
use thiserror::Error;
use timestamp::MalformedTimestamp;

// Extended (combined) format:
// 192.168.1.1 - - [19/Apr/2023:13:55:36 +0000] "GET /index.html HTTP/1.1" 200 2326 "http://example.com" "Mozilla/5.0 ..."
static EXTENDED_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(\d+\.\d+\.\d+\.\d+) - - \[([^\]]+)\] "([A-Z]+) (.*?) HTTP/\d\.\d" (\d+) (\d+) "(.*?)" "(.*?)""#,
    )
    .expect("extended access log pattern")
});

// Basic (common) format:
// 192.168.1.1 - - [19/Apr/2023:13:55:36 +0000] "GET /index.html HTTP/1.1" 200 2326
static BASIC_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(\d+\.\d+\.\d+\.\d+) - - \[([^\]]+)\] "([A-Z]+) (.*?) HTTP/\d\.\d" (\d+) (\d+)"#,
    )
    .expect("basic access log pattern")
});

/// Recognized access log grammars, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    /// Combined format with trailing referer and user-agent fields.
    Extended,
    /// Common format without referer/user-agent.
    Basic,
}

/// Why a line was rejected instead of yielding a [`LogRecord`].
///
/// Rejection is an expected, frequent outcome on real logs, not an
/// exceptional one; callers count and report these, then keep going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("line matches no known access log grammar")]
    UnrecognizedFormat,
    #[error(transparent)]
    MalformedTimestamp(#[from] MalformedTimestamp),
    #[error("status code is not an integer: {0:?}")]
    BadStatusCode(String),
    #[error("response size is not an integer: {0:?}")]
    BadResponseSize(String),
}

/// Match a line against the known grammars.
///
/// The basic grammar is a structural prefix of the extended one and would
/// greedily "succeed" on a combined line while discarding the trailing
/// referer/user-agent fields, so the extended pattern must be tried first.
/// This order is fixed.
fn recognize(line: &str) -> Option<(Grammar, Captures<'_>)> {
    if let Some(caps) = EXTENDED_PATTERN.captures(line).ok().flatten() {
        return Some((Grammar::Extended, caps));
    }
    BASIC_PATTERN
        .captures(line)
        .ok()
        .flatten()
        .map(|caps| (Grammar::Basic, caps))
}

fn group<'a>(caps: &'a Captures<'_>, idx: usize) -> &'a str {
    caps.get(idx).map_or("", |m| m.as_str())
}

/// The `-` placeholder means "absent", not the literal string `"-"`.
fn optional_field(token: &str) -> Option<String> {
    if token == "-" {
        None
    } else {
        Some(token.to_string())
    }
}

/// Parse one raw line (trailing terminators already stripped) into a
/// structured record.
///
/// Never panics on malformed input: anything that does not match a grammar,
/// carries a malformed timestamp, or has non-integer status/size fields is
/// rejected as a whole; no record with defaulted fields is ever built.
pub fn parse_line(line: &str) -> Result<LogRecord, RejectReason> {
    let (grammar, caps) = recognize(line).ok_or(RejectReason::UnrecognizedFormat)?;

    let timestamp = timestamp::normalize(group(&caps, 2))?;

    let status_token = group(&caps, 5);
    let status = status_token
        .parse::<u16>()
        .map_err(|_| RejectReason::BadStatusCode(status_token.to_string()))?;

    let size_token = group(&caps, 6);
    let response_size = size_token
        .parse::<u64>()
        .map_err(|_| RejectReason::BadResponseSize(size_token.to_string()))?;

    let (referer, user_agent) = match grammar {
        Grammar::Extended => (
            optional_field(group(&caps, 7)),
            optional_field(group(&caps, 8)),
        ),
        Grammar::Basic => (None, None),
    };

    Ok(LogRecord {
        timestamp,
        client_addr: group(&caps, 1).to_string(),
        method: group(&caps, 3).to_string(),
        path: group(&caps, 4).to_string(),
        status,
        response_size,
        referer,
        user_agent,
        raw: line.to_string(),
    })
}
