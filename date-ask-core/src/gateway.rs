//! Where responses go once the controller produces them.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::DateAskResult;
use crate::record::ResponseRecord;
use crate::remote::{ANONYMOUS, RemoteRecord, RemoteSink};
use crate::store::{KeyValueStore, ResponseSlot};

/// Local slot (authoritative) plus an optional remote sink (best effort).
pub struct PersistenceGateway {
    slot: ResponseSlot,
    sink: Option<Arc<dyn RemoteSink>>,
    responder: String,
}

impl PersistenceGateway {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        PersistenceGateway {
            slot: ResponseSlot::new(store),
            sink: None,
            responder: ANONYMOUS.to_string(),
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn RemoteSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn with_responder(mut self, name: impl Into<String>) -> Self {
        self.responder = name.into();
        self
    }

    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    /// Overwrite the slot with `record`.
    pub fn save(&self, record: &ResponseRecord) -> DateAskResult<()> {
        self.slot.write(record)?;
        debug!(confirmed = record.is_confirmed(), "Saved response");
        Ok(())
    }

    /// Hand `record` to the remote sink, if any, and move on.
    pub fn forward(&self, record: &ResponseRecord, now: DateTime<Utc>) {
        let Some(sink) = &self.sink else {
            return;
        };
        sink.submit(RemoteRecord::new(&self.responder, record, now));
    }

    /// The stored response, if there is an accepted one.
    ///
    /// Anything unreadable counts as no response at all.
    pub fn hydrate(&self) -> Option<ResponseRecord> {
        match self.slot.read() {
            Ok(Some(record)) if record.accepted => Some(record),
            Ok(Some(_)) => {
                debug!("Stored response was not an acceptance, ignoring");
                None
            }
            Ok(None) => None,
            Err(e) => {
                debug!("Ignoring stored response: {e}");
                None
            }
        }
    }

    /// The stored response as-is, for display.
    pub fn load(&self) -> DateAskResult<Option<ResponseRecord>> {
        self.slot.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, RESPONSE_KEY};
    use std::sync::Mutex;

    #[test]
    fn hydrate_ignores_missing_slot() {
        let gateway = PersistenceGateway::new(MemoryStore::new());
        assert!(gateway.hydrate().is_none());
    }

    #[test]
    fn hydrate_ignores_corrupt_slot() {
        let gateway = PersistenceGateway::new(MemoryStore::with(RESPONSE_KEY, "not json"));
        assert!(gateway.hydrate().is_none());
    }

    /// Collects everything a subscriber writes.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn corrupt_slot_is_silent_at_warn_level() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(move || writer.clone())
            .finish();
        let gateway = PersistenceGateway::new(MemoryStore::with(
            RESPONSE_KEY,
            r#"{"yes":true,"time":12"#,
        ));

        let hydrated = tracing::subscriber::with_default(subscriber, || gateway.hydrate());

        assert!(hydrated.is_none());
        assert!(captured.0.lock().unwrap().is_empty());
    }

    #[test]
    fn hydrate_ignores_non_acceptance() {
        let gateway = PersistenceGateway::new(MemoryStore::with(RESPONSE_KEY, r#"{"yes":false}"#));
        assert!(gateway.hydrate().is_none());
    }

    #[test]
    fn hydrate_returns_acceptance() {
        let gateway = PersistenceGateway::new(MemoryStore::with(
            RESPONSE_KEY,
            r#"{"yes":true,"time":"2024-06-03T18:30:00.000Z"}"#,
        ));
        let record = gateway.hydrate().unwrap();
        assert!(record.accepted);
        assert!(!record.is_confirmed());
    }

    #[test]
    fn hydrate_tolerates_mistyped_fields() {
        let gateway = PersistenceGateway::new(MemoryStore::with(
            RESPONSE_KEY,
            r#"{"yes":true,"time":12,"date":0,"confirmed":"yes"}"#,
        ));
        let record = gateway.hydrate().unwrap();
        assert!(record.chosen_date.is_none());
        assert!(!record.is_confirmed());
    }

    #[test]
    fn forward_without_sink_is_silent() {
        let gateway = PersistenceGateway::new(MemoryStore::new());
        gateway.forward(&ResponseRecord::accepted_at(Utc::now()), Utc::now());
        assert!(!gateway.has_sink());
    }
}
