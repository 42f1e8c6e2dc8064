//! File classification and recursive import of host-dropped entries.
//!
//! The host side (file picker, drag-and-drop) is external; it hands the core
//! a tree of already-read entries and the import driver turns them into
//! `create` calls, one folder node per directory.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::warn;

use crate::node::{NodeId, NodeKind};
use crate::store::FileSystemStore;

const IMAGE_EXTENSIONS: [&str; 8] = ["png", "jpg", "jpeg", "gif", "webp", "svg", "bmp", "ico"];
const AUDIO_EXTENSIONS: [&str; 5] = ["mp3", "wav", "ogg", "m4a", "flac"];
const VIDEO_EXTENSIONS: [&str; 5] = ["mp4", "webm", "mkv", "mov", "avi"];
const TEXT_EXTENSIONS: [&str; 23] = [
    "txt", "md", "js", "ts", "tsx", "jsx", "css", "html", "json", "xml", "py", "c", "cpp", "h",
    "java", "sql", "log", "csv", "env", "yml", "yaml", "ini", "conf",
];

/// Classifies a file by MIME type first, then by extension.
///
/// Unrecognized files come back as [`NodeKind::Unknown`] and are imported as
/// opaque binary payloads.
pub fn detect_node_kind(name: &str, mime: Option<&str>) -> NodeKind {
    let mime = mime.unwrap_or_default();
    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    if mime.starts_with("image/") || IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        return NodeKind::Image;
    }
    if mime.starts_with("audio/") || AUDIO_EXTENSIONS.contains(&extension.as_str()) {
        return NodeKind::Audio;
    }
    if mime.starts_with("video/") || VIDEO_EXTENSIONS.contains(&extension.as_str()) {
        return NodeKind::Video;
    }
    if mime.starts_with("text/") || TEXT_EXTENSIONS.contains(&extension.as_str()) {
        return NodeKind::Text;
    }
    NodeKind::Unknown
}

/// Encodes binary bytes as a self-describing base64 data URI.
pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

#[derive(Debug, Clone, PartialEq)]
/// Payload of a dropped file, already read by the host.
pub enum ImportData {
    Text(String),
    Binary(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq)]
/// One dropped entry; directories carry their children, preserving the
/// relative nesting of the source tree.
pub enum ImportEntry {
    File {
        name: String,
        mime: Option<String>,
        data: ImportData,
    },
    Directory {
        name: String,
        entries: Vec<ImportEntry>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Outcome of an import pass.
pub struct ImportReport {
    /// Nodes created in the store.
    pub created: usize,
    /// Entries skipped because their `create` call failed.
    pub failed: usize,
}

/// Imports a tree of dropped entries under `parent_id`.
///
/// Each failing entry is logged and skipped; it never aborts its siblings.
/// There is no rollback — nodes created before a failure stay in the store.
pub fn import_entries(
    store: &mut FileSystemStore,
    parent_id: &NodeId,
    entries: &[ImportEntry],
) -> ImportReport {
    let mut report = ImportReport::default();
    for entry in entries {
        import_entry(store, parent_id, entry, &mut report);
    }
    report
}

fn import_entry(
    store: &mut FileSystemStore,
    parent_id: &NodeId,
    entry: &ImportEntry,
    report: &mut ImportReport,
) {
    match entry {
        ImportEntry::File { name, mime, data } => {
            let kind = detect_node_kind(name, mime.as_deref());
            let content = match data {
                ImportData::Text(text) => text.clone(),
                ImportData::Binary(bytes) => {
                    encode_data_uri(mime.as_deref().unwrap_or("application/octet-stream"), bytes)
                }
            };
            match store.create(parent_id, name, kind, Some(content)) {
                Ok(_) => report.created += 1,
                Err(err) => {
                    warn!("import of {name:?} failed: {err}");
                    report.failed += 1;
                }
            }
        }
        ImportEntry::Directory { name, entries } => {
            match store.create(parent_id, name, NodeKind::Folder, None) {
                Ok(folder_id) => {
                    report.created += 1;
                    for child in entries {
                        import_entry(store, &folder_id, child, report);
                    }
                }
                Err(err) => {
                    warn!("import of directory {name:?} failed: {err}");
                    report.failed += 1;
                }
            }
        }
    }
}
