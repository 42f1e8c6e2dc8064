//! Persistence contracts for the virtual desktop: versioned state envelopes,
//! an object-safe async store trait, and time helpers.
//!
//! The store trait is async behind boxed futures so browser-backed and native
//! implementations share a single contract; an in-memory adapter ships here
//! for tests.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod time;

use std::{cell::RefCell, collections::BTreeMap, future::Future, pin::Pin, rc::Rc};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

pub use time::{next_monotonic_timestamp_ms, unix_time_ms_now};

/// Version for [`AppStateEnvelope`] metadata serialization.
pub const APP_STATE_ENVELOPE_VERSION: u32 = 1;
/// Namespace used by the virtual file-system snapshot.
pub const FILESYSTEM_STATE_NAMESPACE: &str = "system.filesystem";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Versioned envelope for persisted state payloads.
pub struct AppStateEnvelope {
    /// Envelope schema version.
    pub envelope_version: u32,
    /// Namespace identifying the owning subsystem.
    pub namespace: String,
    /// Owner-defined schema version for the payload.
    pub schema_version: u32,
    /// Last update time in unix milliseconds.
    pub updated_at_unix_ms: u64,
    /// Serialized payload.
    pub payload: Value,
}

/// Object-safe boxed future used by [`AppStateStore`] async methods.
pub type AppStateStoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Storage service for loading, saving, and clearing state envelopes by
/// namespace.
pub trait AppStateStore {
    /// Loads a persisted envelope by namespace.
    fn load_envelope<'a>(
        &'a self,
        namespace: &'a str,
    ) -> AppStateStoreFuture<'a, Result<Option<AppStateEnvelope>, String>>;

    /// Saves a full envelope, replacing any prior one in its namespace.
    fn save_envelope<'a>(
        &'a self,
        envelope: &'a AppStateEnvelope,
    ) -> AppStateStoreFuture<'a, Result<(), String>>;

    /// Removes persisted state for a namespace, so the next load starts
    /// fresh.
    fn delete<'a>(&'a self, namespace: &'a str) -> AppStateStoreFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Default)]
/// In-memory store keyed by namespace.
pub struct MemoryAppStateStore {
    envelopes: Rc<RefCell<BTreeMap<String, AppStateEnvelope>>>,
}

impl MemoryAppStateStore {
    /// Number of namespaces currently held.
    pub fn len(&self) -> usize {
        self.envelopes.borrow().len()
    }

    /// Whether the store holds no envelopes.
    pub fn is_empty(&self) -> bool {
        self.envelopes.borrow().is_empty()
    }
}

impl AppStateStore for MemoryAppStateStore {
    fn load_envelope<'a>(
        &'a self,
        namespace: &'a str,
    ) -> AppStateStoreFuture<'a, Result<Option<AppStateEnvelope>, String>> {
        Box::pin(async move { Ok(self.envelopes.borrow().get(namespace).cloned()) })
    }

    fn save_envelope<'a>(
        &'a self,
        envelope: &'a AppStateEnvelope,
    ) -> AppStateStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.envelopes
                .borrow_mut()
                .insert(envelope.namespace.clone(), envelope.clone());
            Ok(())
        })
    }

    fn delete<'a>(&'a self, namespace: &'a str) -> AppStateStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.envelopes.borrow_mut().remove(namespace);
            Ok(())
        })
    }
}

/// Builds a versioned [`AppStateEnvelope`] from a serializable payload,
/// stamped with a monotonic timestamp.
///
/// # Errors
///
/// Returns an error when `payload` cannot be converted to JSON.
pub fn build_envelope<T: Serialize>(
    namespace: &str,
    schema_version: u32,
    payload: &T,
) -> Result<AppStateEnvelope, String> {
    let payload = serde_json::to_value(payload).map_err(|e| e.to_string())?;
    Ok(AppStateEnvelope {
        envelope_version: APP_STATE_ENVELOPE_VERSION,
        namespace: namespace.to_string(),
        schema_version,
        updated_at_unix_ms: next_monotonic_timestamp_ms(),
        payload,
    })
}

/// Deserializes an envelope payload into a target type.
///
/// # Errors
///
/// Returns an error when deserialization fails.
pub fn decode_envelope_payload<T: DeserializeOwned>(
    envelope: &AppStateEnvelope,
) -> Result<T, String> {
    serde_json::from_value(envelope.payload.clone()).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    use super::*;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct SnapshotStub {
        nodes: Vec<String>,
    }

    fn stub(names: &[&str]) -> SnapshotStub {
        SnapshotStub {
            nodes: names.iter().map(|n| n.to_string()).collect(),
        }
    }

    #[test]
    fn build_envelope_stamps_version_namespace_and_time() {
        let first = build_envelope(FILESYSTEM_STATE_NAMESPACE, 2, &stub(&["root"]))
            .expect("build first");
        let second = build_envelope(FILESYSTEM_STATE_NAMESPACE, 2, &stub(&["root"]))
            .expect("build second");

        assert_eq!(first.envelope_version, APP_STATE_ENVELOPE_VERSION);
        assert_eq!(first.namespace, FILESYSTEM_STATE_NAMESPACE);
        assert_eq!(first.schema_version, 2);
        assert_eq!(first.payload, json!({"nodes": ["root"]}));
        assert!(second.updated_at_unix_ms > first.updated_at_unix_ms);
    }

    #[test]
    fn envelope_json_field_names_are_stable() {
        let envelope = build_envelope("system.filesystem", 1, &stub(&[])).expect("build");
        let value = serde_json::to_value(&envelope).expect("serialize");
        for field in [
            "envelope_version",
            "namespace",
            "schema_version",
            "updated_at_unix_ms",
            "payload",
        ] {
            assert!(value.get(field).is_some(), "missing field {field}");
        }
    }

    #[test]
    fn payload_round_trips_through_decode() {
        let envelope =
            build_envelope(FILESYSTEM_STATE_NAMESPACE, 1, &stub(&["root", "desktop"]))
                .expect("build");
        let decoded: SnapshotStub = decode_envelope_payload(&envelope).expect("decode");
        assert_eq!(decoded, stub(&["root", "desktop"]));
    }

    #[test]
    fn decode_rejects_a_mismatched_payload_shape() {
        let mut envelope = build_envelope(FILESYSTEM_STATE_NAMESPACE, 1, &stub(&[]))
            .expect("build");
        envelope.payload = json!({"nodes": 7});
        decode_envelope_payload::<SnapshotStub>(&envelope).expect_err("shape mismatch");
    }

    #[test]
    fn save_replaces_the_namespace_envelope_in_place() {
        let store = MemoryAppStateStore::default();
        let store_obj: &dyn AppStateStore = &store;

        let stale = build_envelope(FILESYSTEM_STATE_NAMESPACE, 1, &stub(&["root"]))
            .expect("build stale");
        let fresh = build_envelope(FILESYSTEM_STATE_NAMESPACE, 1, &stub(&["root", "new"]))
            .expect("build fresh");

        block_on(store_obj.save_envelope(&stale)).expect("save stale");
        block_on(store_obj.save_envelope(&fresh)).expect("save fresh");
        assert_eq!(store.len(), 1);

        let loaded = block_on(store_obj.load_envelope(FILESYSTEM_STATE_NAMESPACE))
            .expect("load")
            .expect("present");
        assert_eq!(loaded, fresh);
    }

    #[test]
    fn delete_clears_only_the_named_namespace() {
        let store = MemoryAppStateStore::default();
        let store_obj: &dyn AppStateStore = &store;

        let fs_envelope = build_envelope(FILESYSTEM_STATE_NAMESPACE, 1, &stub(&["root"]))
            .expect("build fs");
        let other = build_envelope("system.desktop", 1, &stub(&[])).expect("build other");
        block_on(store_obj.save_envelope(&fs_envelope)).expect("save fs");
        block_on(store_obj.save_envelope(&other)).expect("save other");

        block_on(store_obj.delete(FILESYSTEM_STATE_NAMESPACE)).expect("delete");
        assert_eq!(
            block_on(store_obj.load_envelope(FILESYSTEM_STATE_NAMESPACE)).expect("load"),
            None
        );
        assert!(block_on(store_obj.load_envelope("system.desktop"))
            .expect("load")
            .is_some());

        // Deleting an absent namespace is not an error.
        block_on(store_obj.delete("system.missing")).expect("delete missing");
        assert_eq!(store.len(), 1);
    }
}
