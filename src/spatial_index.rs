//! Spatial Index Module
//!
//! Provides R-tree based spatial indexing for hit testing on the canvas.
//! Point queries and rectangle queries run in O(log n + k).

use crate::item::{Item, ItemId};
use crate::types::{Point, Rect};
use rstar::{AABB, RTree, RTreeObject};
use std::collections::HashMap;

/// Hit-testing capability consumed by the canvas.
///
/// Implementations return candidate ids whose bounding box contains the point
/// or overlaps the rectangle. The order of the result is unspecified.
pub trait HitTest {
    fn items_at_point(&self, point: Point) -> Vec<ItemId>;
    fn items_in_rect(&self, rect: &Rect) -> Vec<ItemId>;
}

/// A spatial entry representing a canvas item's bounding box.
#[derive(Debug, Clone, Copy)]
pub struct SpatialEntry {
    pub item_id: ItemId,
    pub bounds: Rect,
}

impl SpatialEntry {
    pub fn new(item_id: ItemId, bounds: Rect) -> Self {
        Self { item_id, bounds }
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.bounds.min_x, self.bounds.min_y],
            [self.bounds.max_x, self.bounds.max_y],
        )
    }
}

impl PartialEq for SpatialEntry {
    fn eq(&self, other: &Self) -> bool {
        self.item_id == other.item_id
    }
}

/// Spatial index for canvas items using an R-tree.
#[derive(Default)]
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
    entries: HashMap<ItemId, SpatialEntry>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index over the authoritative bounds of `items`.
    pub fn from_items<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a Item>,
    {
        let mut index = Self::new();
        index.rebuild(items);
        index
    }

    /// Insert or replace the entry for `item_id`.
    pub fn insert(&mut self, item_id: ItemId, bounds: Rect) {
        if let Some(old_entry) = self.entries.remove(&item_id) {
            self.tree.remove(&old_entry);
        }

        let entry = SpatialEntry::new(item_id, bounds);
        self.tree.insert(entry);
        self.entries.insert(item_id, entry);
    }

    pub fn remove(&mut self, item_id: ItemId) -> bool {
        if let Some(entry) = self.entries.remove(&item_id) {
            self.tree.remove(&entry);
            true
        } else {
            false
        }
    }

    pub fn bounds_of(&self, item_id: ItemId) -> Option<Rect> {
        self.entries.get(&item_id).map(|e| e.bounds)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn rebuild<'a, I>(&mut self, items: I)
    where
        I: IntoIterator<Item = &'a Item>,
    {
        let entries: Vec<SpatialEntry> = items
            .into_iter()
            .map(|item| SpatialEntry::new(item.id(), item.bounds()))
            .collect();

        self.entries = entries.iter().map(|e| (e.item_id, *e)).collect();
        self.tree = RTree::bulk_load(entries);
    }

    pub fn clear(&mut self) {
        self.tree = RTree::new();
        self.entries.clear();
    }
}

impl HitTest for SpatialIndex {
    fn items_at_point(&self, point: Point) -> Vec<ItemId> {
        let envelope = AABB::from_point([point.x, point.y]);

        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| entry.bounds.contains(point))
            .map(|entry| entry.item_id)
            .collect()
    }

    fn items_in_rect(&self, rect: &Rect) -> Vec<ItemId> {
        let envelope = AABB::from_corners([rect.min_x, rect.min_y], [rect.max_x, rect.max_y]);

        // rstar reports touching envelopes too; callers decide the tie-break.
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|entry| entry.item_id)
            .collect()
    }
}
