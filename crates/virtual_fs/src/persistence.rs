//! Snapshot persistence for the file-system tree.
//!
//! The whole node list is serialized under one namespace after every
//! mutation; hydration falls back to the seed tree instead of surfacing
//! storage or decode failures to the user.

use serde::{Deserialize, Serialize};
use tracing::warn;

use platform_store::{
    build_envelope, decode_envelope_payload, AppStateStore, FILESYSTEM_STATE_NAMESPACE,
};

use crate::node::{FileNode, NodeId};
use crate::store::FileSystemStore;

/// Schema version of [`FsSnapshot`].
pub const FS_SNAPSHOT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Persisted form of the file-system tree.
pub struct FsSnapshot {
    pub schema_version: u32,
    pub nodes: Vec<FileNode>,
}

/// Captures the store's full node list.
pub fn snapshot(store: &FileSystemStore) -> FsSnapshot {
    FsSnapshot {
        schema_version: FS_SNAPSHOT_SCHEMA_VERSION,
        nodes: store.nodes().to_vec(),
    }
}

/// Persists the full tree under [`FILESYSTEM_STATE_NAMESPACE`].
///
/// The owning host calls this after every mutating store operation.
///
/// # Errors
///
/// Returns an error when serialization or the storage bridge fails.
pub async fn persist_nodes(
    storage: &dyn AppStateStore,
    store: &FileSystemStore,
) -> Result<(), String> {
    let envelope = build_envelope(
        FILESYSTEM_STATE_NAMESPACE,
        FS_SNAPSHOT_SCHEMA_VERSION,
        &snapshot(store),
    )?;
    storage.save_envelope(&envelope).await
}

/// Hydrates the tree from storage, or seeds a fresh one.
///
/// A missing envelope, decode failure, schema mismatch, or a snapshot with no
/// root node all reset to the seed tree; none of them is a user-facing error.
pub async fn load_nodes(storage: &dyn AppStateStore) -> FileSystemStore {
    let envelope = match storage.load_envelope(FILESYSTEM_STATE_NAMESPACE).await {
        Ok(Some(envelope)) => envelope,
        Ok(None) => return FileSystemStore::seeded(),
        Err(err) => {
            warn!("file-system snapshot load failed, reseeding: {err}");
            return FileSystemStore::seeded();
        }
    };

    if envelope.schema_version != FS_SNAPSHOT_SCHEMA_VERSION {
        warn!(
            "file-system snapshot schema {} is unsupported, reseeding",
            envelope.schema_version
        );
        return FileSystemStore::seeded();
    }

    match decode_envelope_payload::<FsSnapshot>(&envelope) {
        Ok(snapshot) => {
            let store = FileSystemStore::from_nodes(snapshot.nodes);
            if store.contains(&NodeId::root()) {
                store
            } else {
                warn!("file-system snapshot has no root node, reseeding");
                FileSystemStore::seeded()
            }
        }
        Err(err) => {
            warn!("file-system snapshot decode failed, reseeding: {err}");
            FileSystemStore::seeded()
        }
    }
}

/// Clears the persisted snapshot and returns a freshly seeded store.
///
/// Backs the "reset to factory state" flow; with the envelope gone, the next
/// [`load_nodes`] also starts from the seed tree.
///
/// # Errors
///
/// Returns an error when the storage bridge fails to delete.
pub async fn reset_nodes(storage: &dyn AppStateStore) -> Result<FileSystemStore, String> {
    storage.delete(FILESYSTEM_STATE_NAMESPACE).await?;
    Ok(FileSystemStore::seeded())
}
