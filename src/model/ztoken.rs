use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};

use crate::client::util::time::WIB;

/// Snapshot of the daily ZToken reset state as computed by the backend.
///
/// All values are authoritative; the client only displays them and reacts to
/// `reset_needed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResetStatus {
    #[serde(deserialize_with = "deserialize_wib_datetime")]
    pub current_wib_time: DateTime<FixedOffset>,
    pub current_wib_date: NaiveDate,
    #[serde(default)]
    pub last_reset_date: Option<NaiveDate>,
    #[serde(deserialize_with = "deserialize_wib_datetime")]
    pub next_reset_time: DateTime<FixedOffset>,
    /// Number of profiles whose ZToken balance is below the reset threshold
    pub profiles_below_threshold: i64,
    pub reset_needed: bool,
    pub hours_until_reset: f64,
}

/// Result of a daily or manual ZToken reset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResetResult {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profiles_affected: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_profiles_checked: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wib_time: Option<String>,
}

impl ResetResult {
    /// Builds the failed result reported when the reset call itself could not complete
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            profiles_affected: None,
            total_profiles_checked: None,
            reset_date: None,
            wib_time: None,
        }
    }
}

/// Accepts an RFC 3339 timestamp or a naive wall-clock timestamp, the latter read as WIB.
///
/// Timestamps converted with `AT TIME ZONE` on the backend lose their offset, e.g.
/// `2024-01-15T18:05:00.123456`.
fn deserialize_wib_datetime<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_wib_datetime(&raw).map_err(serde::de::Error::custom)
}

fn parse_wib_datetime(raw: &str) -> Result<DateTime<FixedOffset>, String> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Ok(datetime);
    }

    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .map_err(|e| format!("invalid WIB timestamp {:?}: {}", raw, e))?;

    WIB.from_local_datetime(&naive)
        .single()
        .ok_or_else(|| format!("ambiguous WIB timestamp {:?}", raw))
}
