//! Appends confirmed responses to a Firestore collection over its REST API.

use anyhow::{Context, Result};
use date_ask_core::config::RemoteConfig;
use date_ask_core::error::{DateAskError, DateAskResult};
use date_ask_core::remote::{RemoteRecord, RemoteSink};
use reqwest::Url;
use serde_json::{Value, json};
use tracing::{debug, warn};

const FIRESTORE_API: &str = "https://firestore.googleapis.com/v1";

pub struct FirestoreSink {
    client: reqwest::Client,
    url: Url,
}

impl FirestoreSink {
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        Ok(FirestoreSink {
            client: reqwest::Client::new(),
            url: collection_url(config)?,
        })
    }
}

impl RemoteSink for FirestoreSink {
    /// Spawns the write and returns. Failures are logged, never retried.
    fn submit(&self, record: RemoteRecord) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("No async runtime, dropping remote copy of the response");
            return;
        };

        let client = self.client.clone();
        let url = self.url.clone();

        runtime.spawn(async move {
            match add_document(&client, url, &record).await {
                Ok(()) => debug!("Response saved remotely"),
                Err(e) => warn!("Error saving response: {e}"),
            }
        });
    }
}

async fn add_document(
    client: &reqwest::Client,
    url: Url,
    record: &RemoteRecord,
) -> DateAskResult<()> {
    let response = client
        .post(url)
        .json(&document(record))
        .send()
        .await
        .map_err(|e| DateAskError::Remote(format!("Failed to reach Firestore: {e}")))?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(DateAskError::Remote(format!(
            "Firestore rejected the document ({}): {}",
            status, error_text
        )));
    }

    Ok(())
}

/// `.../projects/{project}/databases/(default)/documents/{collection}?key=...`
fn collection_url(config: &RemoteConfig) -> Result<Url> {
    let mut url = Url::parse(FIRESTORE_API).context("Invalid Firestore endpoint")?;

    url.path_segments_mut()
        .map_err(|_| anyhow::anyhow!("Firestore endpoint cannot take a path"))?
        .extend([
            "projects",
            config.project_id.as_str(),
            "databases",
            "(default)",
            "documents",
            config.collection.as_str(),
        ]);
    url.query_pairs_mut().append_pair("key", &config.api_key);

    Ok(url)
}

/// Firestore's typed-field encoding of `{ name, date, type, timestamp }`.
fn document(record: &RemoteRecord) -> Value {
    let date = match record.date {
        Some(date) => json!({ "timestampValue": format!("{}T00:00:00Z", date.format("%Y-%m-%d")) }),
        None => json!({ "nullValue": null }),
    };

    json!({
        "fields": {
            "name": { "stringValue": record.name },
            "date": date,
            "type": { "stringValue": record.kind.label() },
            "timestamp": { "timestampValue": record.timestamp.to_rfc3339() },
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use date_ask_core::ActivityType;

    fn remote_config() -> RemoteConfig {
        RemoteConfig {
            project_id: "date-ask-app".to_string(),
            api_key: "abc 123".to_string(),
            collection: "responses".to_string(),
        }
    }

    #[test]
    fn builds_collection_url() {
        let url = collection_url(&remote_config()).unwrap();
        assert_eq!(
            url.as_str(),
            "https://firestore.googleapis.com/v1/projects/date-ask-app/databases/(default)/documents/responses?key=abc+123"
        );
    }

    #[test]
    fn encodes_fields() {
        let record = RemoteRecord {
            name: "Sam".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 15),
            kind: ActivityType::StreetFoodCrawl,
            timestamp: Utc.with_ymd_and_hms(2024, 6, 3, 12, 0, 35).unwrap(),
        };

        let doc = document(&record);

        assert_eq!(doc["fields"]["name"]["stringValue"], "Sam");
        assert_eq!(doc["fields"]["date"]["timestampValue"], "2024-06-15T00:00:00Z");
        assert_eq!(doc["fields"]["type"]["stringValue"], "Street food crawl");
        assert_eq!(
            doc["fields"]["timestamp"]["timestampValue"],
            "2024-06-03T12:00:35+00:00"
        );
    }

    #[test]
    fn missing_date_is_null() {
        let record = RemoteRecord {
            name: "Sam".to_string(),
            date: None,
            kind: ActivityType::Coffee,
            timestamp: Utc::now(),
        };
        assert!(document(&record)["fields"]["date"]["nullValue"].is_null());
    }

    /// Nothing listens on the discard port locally.
    fn unreachable_sink() -> FirestoreSink {
        FirestoreSink {
            client: reqwest::Client::new(),
            url: Url::parse("http://127.0.0.1:9/v1/documents/responses").unwrap(),
        }
    }

    fn sample() -> RemoteRecord {
        RemoteRecord {
            name: "Sam".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 15),
            kind: ActivityType::Dinner,
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn unreachable_store_is_a_remote_error() {
        let sink = unreachable_sink();
        let result = add_document(&sink.client, sink.url.clone(), &sample()).await;
        assert!(matches!(result, Err(DateAskError::Remote(_))));
    }

    #[tokio::test]
    async fn submit_returns_before_the_write_fails() {
        let sink = unreachable_sink();

        let started = std::time::Instant::now();
        sink.submit(sample());
        assert!(started.elapsed() < std::time::Duration::from_millis(100));

        // Let the detached write run into the refused connection.
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;
    }

    #[test]
    fn submit_without_runtime_does_not_panic() {
        let sink = FirestoreSink::new(&remote_config()).unwrap();
        sink.submit(RemoteRecord {
            name: "Sam".to_string(),
            date: None,
            kind: ActivityType::Coffee,
            timestamp: Utc::now(),
        });
    }
}
