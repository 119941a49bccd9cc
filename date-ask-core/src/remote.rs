//! Best-effort forwarding of responses to a remote document store.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::activity::ActivityType;
use crate::record::ResponseRecord;

/// Name recorded when no responder is configured.
pub const ANONYMOUS: &str = "anonymous";

/// Document appended to the remote collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemoteRecord {
    pub name: String,
    pub date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub kind: ActivityType,
    pub timestamp: DateTime<Utc>,
}

impl RemoteRecord {
    pub fn new(name: &str, record: &ResponseRecord, timestamp: DateTime<Utc>) -> Self {
        RemoteRecord {
            name: name.to_string(),
            date: record.chosen_date,
            kind: record.activity,
            timestamp,
        }
    }
}

/// Somewhere responses can be sent without waiting for the outcome.
///
/// Implementations must return promptly and handle their own failures;
/// the caller never learns whether the write landed.
pub trait RemoteSink: Send + Sync {
    fn submit(&self, record: RemoteRecord);
}
