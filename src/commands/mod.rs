pub mod ask;
pub mod config;
pub mod status;

use std::sync::Arc;

use anyhow::{Context, Result};
use date_ask_core::config::DateAskConfig;
use date_ask_core::gateway::PersistenceGateway;
use date_ask_core::remote::ANONYMOUS;
use date_ask_core::store::FileStore;

use crate::firestore::FirestoreSink;

/// Build the gateway the config describes: the local slot, plus Firestore
/// when a `[remote]` section is present.
pub fn open_gateway(config: &DateAskConfig) -> Result<PersistenceGateway> {
    let store = FileStore::new(config.data_path());
    let responder = config.responder.as_deref().unwrap_or(ANONYMOUS);
    let gateway = PersistenceGateway::new(store).with_responder(responder);

    match &config.remote {
        Some(remote) => {
            let sink = FirestoreSink::new(remote).context("Failed to set up remote store")?;
            Ok(gateway.with_sink(Arc::new(sink)))
        }
        None => Ok(gateway),
    }
}
