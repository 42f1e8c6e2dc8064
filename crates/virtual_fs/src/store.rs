//! Mutable file-system tree: create/update/query plus the two-step
//! trash/purge delete.

use std::collections::HashSet;

use thiserror::Error;

use crate::node::{seed_nodes, FileNode, IconPosition, NodeId, NodeKind};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors surfaced by [`FileSystemStore`] operations.
pub enum FsError {
    /// The target node id was not found in the store.
    #[error("node not found")]
    NodeNotFound,
    /// The requested parent id was not found in the store.
    #[error("parent not found")]
    ParentNotFound,
    /// Reparenting would place a node under its own subtree.
    #[error("reparenting would create a cycle")]
    CycleDetected,
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Partial update applied by [`FileSystemStore::update`]; absent fields are
/// left untouched.
pub struct NodePatch {
    pub name: Option<String>,
    pub parent_id: Option<NodeId>,
    pub content: Option<String>,
    pub position: Option<IconPosition>,
}

#[derive(Debug, Clone, PartialEq)]
/// Flat node list filtered by parent pointer; children and paths are resolved
/// by scanning, which is fine at desktop scale.
pub struct FileSystemStore {
    nodes: Vec<FileNode>,
}

impl FileSystemStore {
    /// Builds a store containing the first-run seed tree.
    pub fn seeded() -> Self {
        Self {
            nodes: seed_nodes(),
        }
    }

    /// Builds a store from an already-hydrated node list.
    pub fn from_nodes(nodes: Vec<FileNode>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[FileNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &NodeId) -> Option<&FileNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Inserts a new node under `parent_id` and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::ParentNotFound`] when the parent does not exist.
    pub fn create(
        &mut self,
        parent_id: &NodeId,
        name: &str,
        kind: NodeKind,
        content: Option<String>,
    ) -> Result<NodeId, FsError> {
        if !self.contains(parent_id) {
            return Err(FsError::ParentNotFound);
        }
        let id = NodeId::generate();
        let now = platform_store::next_monotonic_timestamp_ms();
        self.nodes.push(FileNode {
            id: id.clone(),
            parent_id: Some(parent_id.clone()),
            name: name.to_string(),
            kind,
            content,
            created_at: now,
            modified_at: now,
            position: None,
        });
        Ok(id)
    }

    /// Merges `patch` into the node and refreshes `modified_at`.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::NodeNotFound`] for an unknown id and
    /// [`FsError::CycleDetected`] when a parent change would place the node
    /// under its own subtree.
    pub fn update(&mut self, id: &NodeId, patch: NodePatch) -> Result<(), FsError> {
        if let Some(new_parent) = &patch.parent_id {
            if self.would_create_cycle(id, new_parent) {
                return Err(FsError::CycleDetected);
            }
        }
        let now = platform_store::next_monotonic_timestamp_ms();
        let node = self.node_mut(id)?;
        if let Some(name) = patch.name {
            node.name = name;
        }
        if let Some(parent_id) = patch.parent_id {
            node.parent_id = Some(parent_id);
        }
        if let Some(content) = patch.content {
            node.content = Some(content);
        }
        if let Some(position) = patch.position {
            node.position = Some(position);
        }
        node.modified_at = now;
        Ok(())
    }

    /// Replaces the node's content payload.
    pub fn update_content(&mut self, id: &NodeId, content: &str) -> Result<(), FsError> {
        self.update(
            id,
            NodePatch {
                content: Some(content.to_string()),
                ..NodePatch::default()
            },
        )
    }

    /// Moves the node (subtree included, since children follow the parent
    /// pointer) into the recycle bin.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::CycleDetected`] when the node is the recycle bin
    /// itself or one of its ancestors; reparenting either would break every
    /// node's chain back to the root.
    pub fn trash(&mut self, id: &NodeId) -> Result<(), FsError> {
        if !self.contains(id) {
            return Err(FsError::NodeNotFound);
        }
        if self.would_create_cycle(id, &NodeId::recycle_bin()) {
            return Err(FsError::CycleDetected);
        }
        let now = platform_store::next_monotonic_timestamp_ms();
        let node = self.node_mut(id)?;
        node.parent_id = Some(NodeId::recycle_bin());
        node.modified_at = now;
        Ok(())
    }

    /// Permanently removes the node and every transitive descendant.
    ///
    /// The descendant set is collected before anything is removed, so a
    /// folder's children never become dangling orphans mid-delete.
    pub fn purge(&mut self, id: &NodeId) -> Result<(), FsError> {
        if !self.contains(id) {
            return Err(FsError::NodeNotFound);
        }
        let doomed: HashSet<NodeId> = self.collect_subtree(id).into_iter().collect();
        self.nodes.retain(|n| !doomed.contains(&n.id));
        Ok(())
    }

    /// Dispatching delete: a node already inside the recycle bin is purged,
    /// anything else is trashed.
    pub fn delete(&mut self, id: &NodeId) -> Result<(), FsError> {
        let node = self.node(id).ok_or(FsError::NodeNotFound)?;
        if node.parent_id == Some(NodeId::recycle_bin()) {
            self.purge(id)
        } else {
            self.trash(id)
        }
    }

    /// Children of `parent_id` in insertion order.
    pub fn children(&self, parent_id: &NodeId) -> Vec<&FileNode> {
        self.nodes
            .iter()
            .filter(|n| n.parent_id.as_ref() == Some(parent_id))
            .collect()
    }

    /// Walks parent links and returns the chain from the root down to `id`.
    ///
    /// A broken parent link ends the walk silently; a cycle introduced by a
    /// bug is detected via the visited set instead of looping forever.
    pub fn path_to(&self, id: &NodeId) -> Vec<&FileNode> {
        let mut path = Vec::new();
        let mut visited = HashSet::new();
        let mut current = self.node(id);
        while let Some(node) = current {
            if !visited.insert(node.id.clone()) {
                break;
            }
            path.push(node);
            current = match &node.parent_id {
                Some(parent) => self.node(parent),
                None => None,
            };
        }
        path.reverse();
        path
    }

    /// Appends `" (n)"` with increasing n until no sibling carries the name.
    pub fn find_unique_name(&self, parent_id: &NodeId, base_name: &str) -> String {
        let siblings = self.children(parent_id);
        let mut name = base_name.to_string();
        let mut counter = 1;
        while siblings.iter().any(|s| s.name == name) {
            name = format!("{base_name} ({counter})");
            counter += 1;
        }
        name
    }

    fn node_mut(&mut self, id: &NodeId) -> Result<&mut FileNode, FsError> {
        self.nodes
            .iter_mut()
            .find(|n| &n.id == id)
            .ok_or(FsError::NodeNotFound)
    }

    /// `id` plus every transitive descendant, breadth-first.
    fn collect_subtree(&self, id: &NodeId) -> Vec<NodeId> {
        let mut collected = vec![id.clone()];
        let mut cursor = 0;
        while cursor < collected.len() {
            let parent = collected[cursor].clone();
            for child in self.children(&parent) {
                if !collected.contains(&child.id) {
                    collected.push(child.id.clone());
                }
            }
            cursor += 1;
        }
        collected
    }

    fn would_create_cycle(&self, id: &NodeId, new_parent: &NodeId) -> bool {
        if id == new_parent {
            return true;
        }
        self.collect_subtree(id).contains(new_parent)
    }
}

impl Default for FileSystemStore {
    fn default() -> Self {
        Self::seeded()
    }
}

/// Formats a byte count as a short human-readable size.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let exponent = (bytes as f64).log(1024.0).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{} {}", rounded as u64, UNITS[exponent])
    } else {
        format!("{rounded} {}", UNITS[exponent])
    }
}
