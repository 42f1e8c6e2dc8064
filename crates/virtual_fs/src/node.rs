//! File-system node model and first-run seed data.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// Allocates a process-unique node id.
    ///
    /// Ids derive from the monotonic millisecond clock, so they are strictly
    /// increasing within a process and can never collide with the reserved
    /// folder ids below.
    pub fn generate() -> Self {
        Self(format!("n{:x}", platform_store::next_monotonic_timestamp_ms()))
    }

    pub fn root() -> Self {
        Self("root".to_string())
    }

    pub fn desktop() -> Self {
        Self("desktop".to_string())
    }

    pub fn documents() -> Self {
        Self("documents".to_string())
    }

    pub fn downloads() -> Self {
        Self("downloads".to_string())
    }

    pub fn pictures() -> Self {
        Self("pictures".to_string())
    }

    pub fn codes() -> Self {
        Self("codes".to_string())
    }

    pub fn recycle_bin() -> Self {
        Self("recycle-bin".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Discriminates how a node's `content` is interpreted and which app opens it.
pub enum NodeKind {
    Folder,
    Text,
    Image,
    Audio,
    Video,
    App,
    Unknown,
}

impl NodeKind {
    /// Returns `true` for the only kind that may have children.
    pub fn is_folder(self) -> bool {
        matches!(self, Self::Folder)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Desktop icon pixel coordinate, meaningful only for desktop children.
pub struct IconPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileNode {
    pub id: NodeId,
    /// Containing folder; `None` only for the root.
    pub parent_id: Option<NodeId>,
    pub name: String,
    pub kind: NodeKind,
    /// UTF-8 text for [`NodeKind::Text`], a base64 data URI for binary kinds,
    /// absent for folders.
    pub content: Option<String>,
    pub created_at: u64,
    pub modified_at: u64,
    pub position: Option<IconPosition>,
}

fn seed_folder(id: NodeId, parent: Option<NodeId>, name: &str, now: u64) -> FileNode {
    FileNode {
        id,
        parent_id: parent,
        name: name.to_string(),
        kind: NodeKind::Folder,
        content: None,
        created_at: now,
        modified_at: now,
        position: None,
    }
}

fn seed_text(id: &str, parent: NodeId, name: &str, content: &str, now: u64) -> FileNode {
    FileNode {
        id: NodeId::from(id),
        parent_id: Some(parent),
        name: name.to_string(),
        kind: NodeKind::Text,
        content: Some(content.to_string()),
        created_at: now,
        modified_at: now,
        position: None,
    }
}

/// First-run node set: the reserved folders plus a few example files.
pub fn seed_nodes() -> Vec<FileNode> {
    let now = platform_store::unix_time_ms_now();
    vec![
        seed_folder(NodeId::root(), None, "root", now),
        seed_folder(NodeId::desktop(), Some(NodeId::root()), "Desktop", now),
        seed_folder(NodeId::documents(), Some(NodeId::root()), "Documents", now),
        seed_folder(NodeId::downloads(), Some(NodeId::root()), "Downloads", now),
        seed_folder(NodeId::pictures(), Some(NodeId::root()), "Pictures", now),
        seed_folder(NodeId::codes(), Some(NodeId::root()), "Codes", now),
        seed_folder(NodeId::recycle_bin(), Some(NodeId::root()), "Recycle Bin", now),
        seed_text(
            "welcome",
            NodeId::desktop(),
            "Read Me.txt",
            "Welcome!\n\nDouble-click a file to open it, drag icons to rearrange them,\nand drop files anywhere on the desktop to import them.",
            now,
        ),
        seed_text(
            "project",
            NodeId::documents(),
            "Project Plans.txt",
            "# Q4 Goals\n1. Ship the desktop core\n2. Add more bundled apps\n3. Polish the file manager",
            now,
        ),
        seed_text(
            "web-demo",
            NodeId::codes(),
            "index.html",
            "<!DOCTYPE html>\n<html>\n<body>\n  <h1>Browser Preview</h1>\n  <p>This page is served from the virtual file system.</p>\n</body>\n</html>",
            now,
        ),
        seed_text(
            "script",
            NodeId::codes(),
            "hello.js",
            "function greet(name) {\n  return `Hello ${name}!`;\n}\n\nconsole.log(greet(\"World\"));",
            now,
        ),
        seed_text(
            "pyscript",
            NodeId::codes(),
            "calc.py",
            "def add(a, b):\n    return a + b\n\nprint(f\"5 + 10 = {add(5, 10)}\")",
            now,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique_and_distinct_from_reserved() {
        let a = NodeId::generate();
        let b = NodeId::generate();
        assert_ne!(a, b);
        for reserved in [
            NodeId::root(),
            NodeId::desktop(),
            NodeId::documents(),
            NodeId::downloads(),
            NodeId::pictures(),
            NodeId::codes(),
            NodeId::recycle_bin(),
        ] {
            assert_ne!(a, reserved);
        }
    }

    #[test]
    fn node_kind_serde_values_are_kebab_case() {
        assert_eq!(
            serde_json::to_string(&NodeKind::Folder).expect("serialize"),
            "\"folder\""
        );
        assert_eq!(
            serde_json::to_string(&NodeKind::Unknown).expect("serialize"),
            "\"unknown\""
        );
        let kind: NodeKind = serde_json::from_str("\"text\"").expect("deserialize");
        assert_eq!(kind, NodeKind::Text);
    }

    #[test]
    fn seed_contains_reserved_folders_and_examples() {
        let nodes = seed_nodes();
        assert!(nodes.iter().any(|n| n.id == NodeId::root() && n.parent_id.is_none()));
        assert!(nodes
            .iter()
            .any(|n| n.id == NodeId::recycle_bin() && n.kind == NodeKind::Folder));
        assert!(nodes
            .iter()
            .any(|n| n.parent_id == Some(NodeId::desktop()) && n.kind == NodeKind::Text));
    }
}
