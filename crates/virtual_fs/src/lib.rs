//! Virtual hierarchical file system for the desktop core.
//!
//! A flat list of nodes linked by parent pointers, with soft delete staged
//! through the reserved recycle-bin folder, advisory unique-name generation,
//! host-drop import classification, and whole-tree snapshot persistence.

pub mod import;
pub mod node;
pub mod persistence;
pub mod store;

pub use import::{
    detect_node_kind, encode_data_uri, import_entries, ImportData, ImportEntry, ImportReport,
};
pub use node::{seed_nodes, FileNode, IconPosition, NodeId, NodeKind};
pub use persistence::{
    load_nodes, persist_nodes, reset_nodes, snapshot, FsSnapshot, FS_SNAPSHOT_SCHEMA_VERSION,
};
pub use store::{format_size, FileSystemStore, FsError, NodePatch};
