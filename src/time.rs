use chrono::{SecondsFormat, Utc};

/// Current UTC time as RFC 3339 with millisecond precision and a `Z`
/// suffix, the format used for audit log timestamps.
pub fn utc_now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
