use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

/// One successfully parsed access log line.
///
/// Immutable once constructed: every analysis pass (filtering, aggregation,
/// detection) observes the same snapshot. A record is only built when the
/// timestamp normalized and both numeric fields parsed; there is no partially
/// valid state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    /// Wall-clock instant as printed in the log, offset token discarded.
    pub timestamp: NaiveDateTime,
    /// Client address in dotted-quad text form, not range-validated.
    pub client_addr: String,
    /// Uppercase HTTP verb token. Open vocabulary.
    pub method: String,
    /// Raw request target, query component included, unescaped.
    pub path: String,
    /// HTTP status code, not range-enforced at parse time.
    pub status: u16,
    /// Response body size in bytes.
    pub response_size: u64,
    /// `None` when the source token was the `-` placeholder.
    pub referer: Option<String>,
    /// `None` when the source token was the `-` placeholder.
    pub user_agent: Option<String>,
    /// Original source text, kept for diagnostics and evidence display.
    #[serde(skip)]
    pub raw: String,
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} - {} {} - {} - {} bytes",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.client_addr,
            self.method,
            self.path,
            self.status,
            self.response_size
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> LogRecord {
        LogRecord {
            timestamp: NaiveDate::from_ymd_opt(2023, 4, 19)
                .unwrap()
                .and_hms_opt(13, 55, 36)
                .unwrap(),
            client_addr: "192.168.1.1".to_string(),
            method: "GET".to_string(),
            path: "/index.html".to_string(),
            status: 200,
            response_size: 2326,
            referer: None,
            user_agent: Some("Mozilla/5.0".to_string()),
            raw: r#"192.168.1.1 - - [19/Apr/2023:13:55:36 +0000] "GET /index.html HTTP/1.1" 200 2326"#.to_string(),
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(
            sample().to_string(),
            "2023-04-19 13:55:36 - 192.168.1.1 - GET /index.html - 200 - 2326 bytes"
        );
    }

    #[test]
    fn test_serialize_omits_raw() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["client_addr"], "192.168.1.1");
        assert_eq!(json["status"], 200);
        assert_eq!(json["referer"], serde_json::Value::Null);
        assert_eq!(json["user_agent"], "Mozilla/5.0");
        assert!(json.get("raw").is_none());
    }
}
