//! The persisted response and its storage wire format.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::activity::ActivityType;
use crate::error::DateAskResult;

/// The user's answer, created on acceptance and augmented on confirmation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseRecord {
    pub accepted: bool,
    pub chosen_date: Option<NaiveDate>,
    pub activity: ActivityType,
    /// None only for hydrated records written without a decision time.
    pub decided_at: Option<DateTime<Utc>>,
    pub confirmed_at: Option<DateTime<Utc>>,
    /// Older records carry a bare `confirmed` flag instead of `confirmedAt`.
    legacy_confirmed: bool,
}

impl ResponseRecord {
    /// A fresh record for an acceptance made at `now`.
    pub fn accepted_at(now: DateTime<Utc>) -> Self {
        ResponseRecord {
            accepted: true,
            chosen_date: None,
            activity: ActivityType::default(),
            decided_at: Some(now),
            confirmed_at: None,
            legacy_confirmed: false,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed_at.is_some() || self.legacy_confirmed
    }

    /// Stamp the confirmation time. Returns false, leaving the record
    /// untouched, when no date is chosen or it is already confirmed.
    pub fn confirm(&mut self, now: DateTime<Utc>) -> bool {
        if self.chosen_date.is_none() || self.is_confirmed() {
            return false;
        }
        self.confirmed_at = Some(now);
        true
    }

    pub fn to_json(&self) -> DateAskResult<String> {
        Ok(serde_json::to_string(&StoredResponse::from(self))?)
    }

    pub fn from_json(json: &str) -> DateAskResult<Self> {
        let stored: StoredResponse = serde_json::from_str(json)?;
        Ok(stored.into())
    }
}

/// Shape of the `date-ask-response` slot:
/// `{ yes, time?, date?, type?, confirmedAt? }`.
///
/// A field holding the wrong JSON type reads as absent rather than
/// rejecting the whole record.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredResponse {
    #[serde(default, deserialize_with = "lenient_flag")]
    yes: bool,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    time: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    date: Option<String>,
    #[serde(
        default,
        rename = "type",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    kind: Option<String>,
    #[serde(
        default,
        rename = "confirmedAt",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    confirmed_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_flag", skip_serializing)]
    confirmed: bool,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient(deserializer)?.unwrap_or(false))
}

impl From<&ResponseRecord> for StoredResponse {
    fn from(record: &ResponseRecord) -> Self {
        StoredResponse {
            yes: record.accepted,
            time: record.decided_at.map(format_instant),
            date: record.chosen_date.map(format_date),
            kind: record
                .chosen_date
                .map(|_| record.activity.label().to_string()),
            confirmed_at: record.confirmed_at.map(format_instant),
            confirmed: false,
        }
    }
}

impl From<StoredResponse> for ResponseRecord {
    fn from(stored: StoredResponse) -> Self {
        let activity = match stored.kind.as_deref() {
            Some(label) => label.parse().unwrap_or_else(|e| {
                debug!("{e}, falling back to {}", ActivityType::default());
                ActivityType::default()
            }),
            None => ActivityType::default(),
        };

        ResponseRecord {
            accepted: stored.yes,
            chosen_date: stored.date.as_deref().and_then(parse_date),
            activity,
            decided_at: stored.time.as_deref().and_then(parse_instant),
            confirmed_at: stored.confirmed_at.as_deref().and_then(parse_instant),
            legacy_confirmed: stored.confirmed,
        }
    }
}

fn format_instant(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Calendar dates are stored as midnight UTC timestamps.
fn format_date(date: NaiveDate) -> String {
    format!("{}T00:00:00.000Z", date.format("%Y-%m-%d"))
}

fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| debug!("Ignoring unreadable timestamp '{s}': {e}"))
        .ok()
}

/// Only the leading YYYY-MM-DD matters; any time part is ignored.
fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_and_remainder(s, "%Y-%m-%d")
        .map(|(date, _)| date)
        .map_err(|e| debug!("Ignoring unreadable date '{s}': {e}"))
        .ok()
}
