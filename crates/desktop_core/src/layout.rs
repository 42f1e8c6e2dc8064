//! Desktop icon grid: cell mapping, collision checks, and free-slot search
//! over the desktop folder's children.

use virtual_fs::{FileSystemStore, FsError, IconPosition, NodeId, NodePatch};

/// Grid cells reserved for fixed system shortcuts ("This PC", "Recycle Bin",
/// "Canvas"); ordinary files are never placed into them.
pub const SYSTEM_SLOTS: [(i32, i32); 3] = [(0, 0), (0, 1), (0, 2)];

/// Last row of the auto-placement sweep before it advances a column.
const SWEEP_ROW_LIMIT: i32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Fixed-size icon grid anchored at an origin offset.
pub struct DesktopGrid {
    pub cell_w: i32,
    pub cell_h: i32,
    pub origin_x: i32,
    pub origin_y: i32,
    /// Bound for the expanding free-slot search.
    pub max_search_radius: i32,
}

impl Default for DesktopGrid {
    fn default() -> Self {
        Self {
            cell_w: 100,
            cell_h: 110,
            origin_x: 20,
            origin_y: 20,
            max_search_radius: 10,
        }
    }
}

impl DesktopGrid {
    /// Maps a pixel position to its nearest `(col, row)` cell.
    pub fn cell_at(&self, position: IconPosition) -> (i32, i32) {
        let col = ((position.x - self.origin_x) as f64 / self.cell_w as f64).round() as i32;
        let row = ((position.y - self.origin_y) as f64 / self.cell_h as f64).round() as i32;
        (col, row)
    }

    /// Pixel position of a cell's top-left corner.
    pub fn pixel_at(&self, col: i32, row: i32) -> IconPosition {
        IconPosition {
            x: self.origin_x + col * self.cell_w,
            y: self.origin_y + row * self.cell_h,
        }
    }

    /// Whether a cell holds a system shortcut or a positioned desktop node
    /// other than `excluding`.
    pub fn is_occupied(
        &self,
        store: &FileSystemStore,
        col: i32,
        row: i32,
        excluding: Option<&NodeId>,
    ) -> bool {
        if SYSTEM_SLOTS.contains(&(col, row)) {
            return true;
        }
        store.children(&NodeId::desktop()).iter().any(|node| {
            if Some(&node.id) == excluding {
                return false;
            }
            match node.position {
                Some(position) => self.cell_at(position) == (col, row),
                None => false,
            }
        })
    }

    /// Expanding-square search outward from the cell nearest `preferred`.
    ///
    /// Each ring is scanned in row-major order; if nothing frees up within
    /// the radius bound the preferred pixel comes back unchanged, accepting
    /// overlap rather than failing.
    pub fn nearest_free_slot(
        &self,
        store: &FileSystemStore,
        preferred: IconPosition,
        excluding: Option<&NodeId>,
    ) -> IconPosition {
        let (col, row) = self.cell_at(preferred);
        let col = col.max(0);
        let row = row.max(0);

        for radius in 0..=self.max_search_radius {
            for r in (row - radius)..=(row + radius) {
                for c in (col - radius)..=(col + radius) {
                    if r < 0 || c < 0 {
                        continue;
                    }
                    if !self.is_occupied(store, c, r, excluding) {
                        return self.pixel_at(c, r);
                    }
                }
            }
        }
        preferred
    }

    /// Assigns a position to every desktop child that lacks one, sweeping
    /// rows within a column starting one column right of the system icons.
    ///
    /// Returns the number of nodes placed.
    pub fn assign_missing_positions(&self, store: &mut FileSystemStore) -> Result<usize, FsError> {
        let unplaced: Vec<NodeId> = store
            .children(&NodeId::desktop())
            .iter()
            .filter(|n| n.position.is_none())
            .map(|n| n.id.clone())
            .collect();

        let mut claimed: Vec<(i32, i32)> = Vec::new();
        for id in &unplaced {
            let mut col = 1;
            let mut row = 0;
            while claimed.contains(&(col, row)) || self.is_occupied(store, col, row, None) {
                row += 1;
                if row > SWEEP_ROW_LIMIT {
                    row = 0;
                    col += 1;
                }
            }
            claimed.push((col, row));
            store.update(
                id,
                NodePatch {
                    position: Some(self.pixel_at(col, row)),
                    ..NodePatch::default()
                },
            )?;
        }
        Ok(unplaced.len())
    }

    /// Commits an icon drop: snaps the raw drop pixel to the nearest free
    /// cell (the dragged node does not block itself) and writes the position
    /// back through the store.
    pub fn commit_icon_drop(
        &self,
        store: &mut FileSystemStore,
        id: &NodeId,
        drop: IconPosition,
    ) -> Result<IconPosition, FsError> {
        let snapped = self.nearest_free_slot(store, drop, Some(id));
        store.update(
            id,
            NodePatch {
                position: Some(snapped),
                ..NodePatch::default()
            },
        )?;
        Ok(snapped)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;
    use virtual_fs::NodeKind;

    use super::*;

    fn desktop_file(store: &mut FileSystemStore, name: &str) -> NodeId {
        store
            .create(&NodeId::desktop(), name, NodeKind::Text, None)
            .expect("create desktop file")
    }

    fn occupied_cells(grid: &DesktopGrid, store: &FileSystemStore) -> Vec<(i32, i32)> {
        store
            .children(&NodeId::desktop())
            .iter()
            .filter_map(|n| n.position.map(|p| grid.cell_at(p)))
            .collect()
    }

    #[test]
    fn cell_mapping_rounds_to_nearest_cell() {
        let grid = DesktopGrid::default();
        assert_eq!(grid.cell_at(IconPosition { x: 20, y: 20 }), (0, 0));
        assert_eq!(grid.cell_at(IconPosition { x: 160, y: 70 }), (1, 0));
        assert_eq!(grid.cell_at(IconPosition { x: 215, y: 190 }), (2, 2));
        assert_eq!(grid.pixel_at(1, 2), IconPosition { x: 120, y: 240 });
    }

    #[test]
    fn system_slots_are_always_occupied() {
        let grid = DesktopGrid::default();
        let store = FileSystemStore::seeded();
        for (col, row) in SYSTEM_SLOTS {
            assert!(grid.is_occupied(&store, col, row, None));
        }
        assert!(!grid.is_occupied(&store, 5, 5, None));
    }

    #[test]
    fn nearest_free_slot_returns_preferred_cell_when_free() {
        let grid = DesktopGrid::default();
        let store = FileSystemStore::seeded();
        let slot = grid.nearest_free_slot(&store, IconPosition { x: 340, y: 140 }, None);
        assert_eq!(slot, grid.pixel_at(3, 1));
    }

    #[test]
    fn nearest_free_slot_skips_system_column_and_occupied_cells() {
        let grid = DesktopGrid::default();
        let mut store = FileSystemStore::seeded();
        let blocker = desktop_file(&mut store, "blocker.txt");
        store
            .update(
                &blocker,
                NodePatch {
                    position: Some(grid.pixel_at(1, 0)),
                    ..NodePatch::default()
                },
            )
            .expect("place blocker");

        // Preferred cell (0,0) is a system slot, (1,0) holds the blocker.
        let slot = grid.nearest_free_slot(&store, grid.pixel_at(0, 0), None);
        let cell = grid.cell_at(slot);
        assert!(!SYSTEM_SLOTS.contains(&cell));
        assert_ne!(cell, (1, 0));
        assert!(!grid.is_occupied(&store, cell.0, cell.1, None));
    }

    #[test]
    fn exhausted_search_falls_back_to_preferred_pixel() {
        let grid = DesktopGrid {
            max_search_radius: 0,
            ..DesktopGrid::default()
        };
        let mut store = FileSystemStore::seeded();
        let blocker = desktop_file(&mut store, "blocker.txt");
        store
            .update(
                &blocker,
                NodePatch {
                    position: Some(grid.pixel_at(2, 2)),
                    ..NodePatch::default()
                },
            )
            .expect("place blocker");

        let preferred = IconPosition { x: 223, y: 247 };
        assert_eq!(grid.cell_at(preferred), (2, 2));
        let slot = grid.nearest_free_slot(&store, preferred, None);
        assert_eq!(slot, preferred);
    }

    #[test]
    fn auto_placement_sweeps_rows_starting_right_of_system_icons() {
        let grid = DesktopGrid::default();
        let mut store = FileSystemStore::seeded();
        // The seeded desktop already has one unplaced file; add two more.
        desktop_file(&mut store, "a.txt");
        desktop_file(&mut store, "b.txt");

        let placed = grid.assign_missing_positions(&mut store).expect("assign");
        assert_eq!(placed, 3);

        let cells = occupied_cells(&grid, &store);
        assert_eq!(cells, vec![(1, 0), (1, 1), (1, 2)]);
    }

    #[test]
    fn auto_placement_wraps_to_next_column_after_row_limit() {
        let grid = DesktopGrid::default();
        let mut store = FileSystemStore::seeded();
        for i in 0..9 {
            desktop_file(&mut store, &format!("file-{i}.txt"));
        }

        // Seed file plus nine new ones: rows 0-6 of column 1, then column 2.
        grid.assign_missing_positions(&mut store).expect("assign");
        let cells = occupied_cells(&grid, &store);
        assert!(cells.contains(&(1, 6)));
        assert!(cells.contains(&(2, 0)));
        assert!(cells.contains(&(2, 2)));
    }

    #[test]
    fn no_two_desktop_nodes_share_a_cell_after_layout_settles() {
        let grid = DesktopGrid::default();
        let mut store = FileSystemStore::seeded();
        let mut ids = Vec::new();
        for i in 0..8 {
            ids.push(desktop_file(&mut store, &format!("file-{i}.txt")));
        }
        grid.assign_missing_positions(&mut store).expect("assign");

        // Drop a few icons onto already-occupied cells.
        for id in ids.iter().take(4) {
            grid.commit_icon_drop(&mut store, id, grid.pixel_at(1, 0))
                .expect("drop");
        }

        let cells = occupied_cells(&grid, &store);
        let unique: HashSet<(i32, i32)> = cells.iter().copied().collect();
        assert_eq!(unique.len(), cells.len());
        for cell in &cells {
            assert!(!SYSTEM_SLOTS.contains(cell));
        }
    }

    #[test]
    fn dropping_an_icon_near_its_own_cell_keeps_the_cell() {
        let grid = DesktopGrid::default();
        let mut store = FileSystemStore::seeded();
        let id = desktop_file(&mut store, "solo.txt");
        grid.assign_missing_positions(&mut store).expect("assign");
        // Second desktop node occupies (1,1) so the drop target is contested
        // only by the dragged icon itself.
        let seeded = store
            .children(&NodeId::desktop())
            .iter()
            .find(|n| n.id != id)
            .expect("seed file")
            .id
            .clone();
        let before = store.node(&seeded).expect("node").position.expect("placed");

        let landed = grid
            .commit_icon_drop(&mut store, &seeded, IconPosition { x: before.x + 9, y: before.y - 7 })
            .expect("drop");
        assert_eq!(landed, before);
    }
}
