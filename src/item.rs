//! Canvas items and the ordered collection that owns them.
//!
//! Items are created by collaborators and handed to the canvas. The interaction
//! engine only ever mutates their position, selection flag and the transient
//! `pending_translation` accumulator used by deferred drags.

use crate::types::{Point, Rect, Size, Vector};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Stable identity of an item within one [`ItemCollection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u64);

/// Independent per-axis scale factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemScale {
    pub x: f64,
    pub y: f64,
}

impl Default for ItemScale {
    fn default() -> Self {
        Self { x: 1.0, y: 1.0 }
    }
}

/// A positioned, sized, rotatable rectangle participating in selection and drag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Assigned when the item is added to a collection
    #[serde(default = "unassigned_id")]
    id: ItemId,
    left: f64,
    top: f64,
    #[serde(deserialize_with = "non_negative")]
    width: f64,
    #[serde(deserialize_with = "non_negative")]
    height: f64,
    #[serde(default)]
    scale: ItemScale,
    #[serde(default)]
    angle: f64,
    #[serde(default)]
    is_selected: bool,
    #[serde(default = "enabled")]
    is_selectable: bool,
    #[serde(default = "enabled")]
    is_draggable: bool,
    #[serde(default = "enabled")]
    allow_scale_change_to_update_position: bool,
    /// Offset accumulated by a deferred drag, not yet committed
    #[serde(skip)]
    pending_translation: Vector,
}

fn unassigned_id() -> ItemId {
    ItemId(0)
}

fn enabled() -> bool {
    true
}

/// Sizes read from scripts and files are clamped like [`Item::new`] clamps them.
fn non_negative<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    f64::deserialize(deserializer).map(|value| value.max(0.0))
}

impl Item {
    /// Create a selectable, draggable item. Negative sizes are clamped to zero.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            id: unassigned_id(),
            left,
            top,
            width: width.max(0.0),
            height: height.max(0.0),
            scale: ItemScale::default(),
            angle: 0.0,
            is_selected: false,
            is_selectable: true,
            is_draggable: true,
            allow_scale_change_to_update_position: true,
            pending_translation: Vector::ZERO,
        }
    }

    pub fn with_draggable(mut self, draggable: bool) -> Self {
        self.is_draggable = draggable;
        self
    }

    pub fn with_selectable(mut self, selectable: bool) -> Self {
        self.is_selectable = selectable;
        self
    }

    pub fn with_selected(mut self, selected: bool) -> Self {
        self.is_selected = selected;
        self
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Pin the position when item scale changes are applied.
    pub fn with_pinned_position(mut self) -> Self {
        self.allow_scale_change_to_update_position = false;
        self
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    /// Authoritative top-left position.
    pub fn position(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Position as currently displayed: authoritative position plus any
    /// uncommitted deferred drag offset.
    pub fn visual_position(&self) -> Point {
        self.position() + self.pending_translation
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn scale(&self) -> ItemScale {
        self.scale
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn is_selected(&self) -> bool {
        self.is_selected
    }

    pub fn is_selectable(&self) -> bool {
        self.is_selectable
    }

    pub fn is_draggable(&self) -> bool {
        self.is_draggable
    }

    pub fn allow_scale_change_to_update_position(&self) -> bool {
        self.allow_scale_change_to_update_position
    }

    pub fn pending_translation(&self) -> Vector {
        self.pending_translation
    }

    /// Bounding box from the authoritative position; unaffected by pending translation.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position(), self.size())
    }

    /// Bounding box at the visual position.
    pub fn visual_bounds(&self) -> Rect {
        Rect::from_origin_size(self.visual_position(), self.size())
    }

    pub fn set_size(&mut self, size: Size) {
        self.width = size.width.max(0.0);
        self.height = size.height.max(0.0);
    }

    /// Place and size the item in one step, e.g. from `DrawingEnded` bounds.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.left = bounds.min_x;
        self.top = bounds.min_y;
        self.set_size(bounds.size());
    }

    pub fn set_angle(&mut self, angle: f64) {
        self.angle = angle;
    }

    pub fn set_draggable(&mut self, draggable: bool) {
        self.is_draggable = draggable;
    }

    pub fn set_selectable(&mut self, selectable: bool) {
        self.is_selectable = selectable;
    }

    pub fn set_allow_scale_change_to_update_position(&mut self, allow: bool) {
        self.allow_scale_change_to_update_position = allow;
    }

    pub(crate) fn set_position(&mut self, position: Point) {
        self.left = position.x;
        self.top = position.y;
    }

    pub(crate) fn set_scale(&mut self, scale: ItemScale) {
        self.scale = scale;
    }

    /// Returns true if the flag changed.
    pub(crate) fn set_selected(&mut self, selected: bool) -> bool {
        let changed = self.is_selected != selected;
        self.is_selected = selected;
        changed
    }

    pub(crate) fn translate(&mut self, offset: Vector) {
        self.left += offset.x;
        self.top += offset.y;
    }

    pub(crate) fn accumulate(&mut self, offset: Vector) {
        self.pending_translation += offset;
    }

    /// Fold the pending translation into the authoritative position.
    pub(crate) fn commit_pending(&mut self) {
        let pending = std::mem::take(&mut self.pending_translation);
        self.translate(pending);
    }

    pub(crate) fn discard_pending(&mut self) {
        self.pending_translation = Vector::ZERO;
    }
}

/// Ordered item storage. Insertion order is the z-order and the order in
/// which selection is enumerated.
#[derive(Debug, Default, Clone)]
pub struct ItemCollection {
    items: Vec<Item>,
    index: HashMap<ItemId, usize>,
    next_id: u64,
}

impl ItemCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item on top of the z-order and return its assigned id.
    pub fn add(&mut self, mut item: Item) -> ItemId {
        self.next_id += 1;
        let id = ItemId(self.next_id);
        item.id = id;
        self.index.insert(id, self.items.len());
        self.items.push(item);
        id
    }

    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        let pos = self.index.remove(&id)?;
        let item = self.items.remove(pos);
        for (i, it) in self.items.iter().enumerate().skip(pos) {
            self.index.insert(it.id, i);
        }
        Some(item)
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.index.get(&id).map(|&i| &self.items[i])
    }

    pub(crate) fn get_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        match self.index.get(&id) {
            Some(&i) => Some(&mut self.items[i]),
            None => None,
        }
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Item> {
        self.items.iter_mut()
    }

    /// Selected items in insertion order, derived from each item's flag.
    pub fn selected(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|item| item.is_selected)
    }

    pub fn selected_ids(&self) -> Vec<ItemId> {
        self.selected().map(|item| item.id).collect()
    }

    /// Union of all authoritative item bounds.
    pub fn bounds(&self) -> Option<Rect> {
        self.items
            .iter()
            .map(Item::bounds)
            .reduce(|acc, r| acc.union(&r))
    }
}
