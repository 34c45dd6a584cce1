//! Rectangle selection strategies.
//!
//! A selection gesture grows a rectangle from its start point to the current
//! pointer. With real-time feedback the selection flags follow the rectangle
//! on every move; with deferred feedback they are written once on release.
//! Both paths evaluate the same function of (pre-gesture selection, final
//! rectangle), so identical inputs give identical results.
//!
//! An item intersects the rectangle only when their overlap has positive
//! area; touching edges or corners do not count.

use crate::item::{ItemCollection, ItemId};
use crate::spatial_index::HitTest;
use crate::types::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// How the rectangle combines with the selection that existed before the gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// Keep the previous selection and add intersecting items
    #[default]
    Append,
    /// Select exactly the intersecting items
    Replace,
    /// Deselect intersecting items
    Remove,
    /// Toggle intersecting items
    Invert,
}

impl SelectionMode {
    fn resolve(self, was_selected: bool, intersects: bool) -> bool {
        match self {
            SelectionMode::Append => was_selected || intersects,
            SelectionMode::Replace => intersects,
            SelectionMode::Remove => was_selected && !intersects,
            SelectionMode::Invert => was_selected != intersects,
        }
    }
}

/// When selection flags are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionFeedback {
    RealTime,
    Deferred,
}

/// State of one rectangle selection gesture.
#[derive(Debug, Clone)]
pub struct SelectionStrategy {
    start: Point,
    end: Point,
    mode: SelectionMode,
    feedback: SelectionFeedback,
    /// Selection captured when the gesture began
    initial: HashSet<ItemId>,
}

impl SelectionStrategy {
    /// Begin a gesture at `start` (logical coordinates).
    pub fn begin(
        start: Point,
        mode: SelectionMode,
        feedback: SelectionFeedback,
        items: &ItemCollection,
    ) -> Self {
        Self {
            start,
            end: start,
            mode,
            feedback,
            initial: items.selected_ids().into_iter().collect(),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn feedback(&self) -> SelectionFeedback {
        self.feedback
    }

    /// Current selection rectangle in logical coordinates.
    pub fn rect(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    /// Dispatch a pointer move to the configured feedback model. Returns the
    /// ids whose flag changed.
    pub fn on_pointer_move(
        &mut self,
        position: Point,
        items: &mut ItemCollection,
        hit: &impl HitTest,
    ) -> Vec<ItemId> {
        match self.feedback {
            SelectionFeedback::RealTime => self.on_pointer_move_real_time(position, items, hit),
            SelectionFeedback::Deferred => {
                self.on_pointer_move_deferred(position);
                Vec::new()
            }
        }
    }

    /// Dispatch a pointer release to the configured feedback model.
    pub fn on_pointer_up(
        &mut self,
        position: Point,
        items: &mut ItemCollection,
        hit: &impl HitTest,
    ) -> Vec<ItemId> {
        match self.feedback {
            SelectionFeedback::RealTime => self.on_pointer_up_real_time(position, items, hit),
            SelectionFeedback::Deferred => self.on_pointer_up_deferred(position, items, hit),
        }
    }

    pub fn on_pointer_move_real_time(
        &mut self,
        position: Point,
        items: &mut ItemCollection,
        hit: &impl HitTest,
    ) -> Vec<ItemId> {
        self.end = position;
        self.apply(items, hit)
    }

    /// Only the rectangle moves; item flags are untouched until release.
    pub fn on_pointer_move_deferred(&mut self, position: Point) {
        self.end = position;
    }

    pub fn on_pointer_up_real_time(
        &mut self,
        position: Point,
        items: &mut ItemCollection,
        hit: &impl HitTest,
    ) -> Vec<ItemId> {
        if self.end == position {
            return Vec::new();
        }
        self.end = position;
        self.apply(items, hit)
    }

    pub fn on_pointer_up_deferred(
        &mut self,
        position: Point,
        items: &mut ItemCollection,
        hit: &impl HitTest,
    ) -> Vec<ItemId> {
        self.end = position;
        self.apply(items, hit)
    }

    /// Put every flag back to its pre-gesture value.
    pub fn restore(&self, items: &mut ItemCollection) -> Vec<ItemId> {
        items
            .iter_mut()
            .filter_map(|item| {
                let was = self.initial.contains(&item.id());
                item.set_selected(was).then_some(item.id())
            })
            .collect()
    }

    fn apply(&self, items: &mut ItemCollection, hit: &impl HitTest) -> Vec<ItemId> {
        let rect = self.rect();
        let intersecting: HashSet<ItemId> = if rect.is_empty() {
            HashSet::new()
        } else {
            hit.items_in_rect(&rect)
                .into_iter()
                .filter(|&id| items.get(id).is_some_and(|item| item.bounds().overlaps(&rect)))
                .collect()
        };

        let changed: Vec<ItemId> = items
            .iter_mut()
            .filter(|item| item.is_selectable())
            .filter_map(|item| {
                let id = item.id();
                let selected = self
                    .mode
                    .resolve(self.initial.contains(&id), intersecting.contains(&id));
                item.set_selected(selected).then_some(id)
            })
            .collect();

        if !changed.is_empty() {
            debug!(changed = changed.len(), ?rect, mode = ?self.mode, "selection updated");
        }
        changed
    }
}
