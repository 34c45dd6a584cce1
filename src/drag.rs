//! Drag strategies - how a pointer delta moves one item or a group.
//!
//! Two axes compose orthogonally:
//! - cardinality: [`DragStrategy::Single`] moves the item under the pointer,
//!   [`DragStrategy::Multiple`] moves a snapshot of the selection;
//! - update model: [`UpdateModel::RealTime`] writes positions on every sample,
//!   [`UpdateModel::Deferred`] accumulates into each item's pending translation
//!   and commits once on release.
//!
//! The strategy is built at drag-start from the current settings and owns its
//! working set until the gesture ends.
//!
//! ## Performance Notes
//!
//! Pointer moves arrive 60+ times per second. The deferred model only touches
//! the pending accumulator per sample, so derived data (extent, spatial
//! index) is refreshed once at commit instead of on every move.

use crate::item::{Item, ItemCollection, ItemId};
use crate::settings::CanvasSettings;
use crate::types::{Point, Rect, Size, Vector};
use std::collections::HashSet;
use tracing::trace;

/// How drag deltas reach item positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateModel {
    /// Authoritative position changes on every pointer sample
    RealTime,
    /// Offset accumulates in `pending_translation` until completion
    Deferred,
}

impl UpdateModel {
    pub fn from_settings(settings: &CanvasSettings) -> Self {
        if settings.real_time_dragging_enabled {
            UpdateModel::RealTime
        } else {
            UpdateModel::Deferred
        }
    }
}

/// Result of offering a delta to a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaOutcome {
    Applied,
    /// The boundary policy refused the step; nothing moved
    Rejected,
}

/// Limits a drag step must respect. A step that breaks any limit for any
/// item in the working set is rejected as a whole.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundaryPolicy {
    /// Items may not move below `-negative_limit` on either axis
    pub negative_limit: Option<f64>,
    /// The extent may not shrink below this size
    pub min_extent: Option<Size>,
    pub extent_margin: f64,
}

impl BoundaryPolicy {
    pub fn from_settings(settings: &CanvasSettings) -> Self {
        Self {
            negative_limit: settings.negative_limit,
            min_extent: settings.min_extent,
            extent_margin: settings.extent_margin,
        }
    }

    /// Check whether moving `moving` by `offset` keeps every limit.
    ///
    /// Positions are taken as displayed (base plus pending translation) so the
    /// check behaves the same under both update models.
    pub fn permits(&self, items: &ItemCollection, moving: &[ItemId], offset: Vector) -> bool {
        if let Some(limit) = self.negative_limit {
            let breaches = moving.iter().filter_map(|&id| items.get(id)).any(|item| {
                let next = item.visual_position() + offset;
                (offset.x < 0.0 && next.x < -limit) || (offset.y < 0.0 && next.y < -limit)
            });
            if breaches {
                return false;
            }
        }

        if let Some(min) = self.min_extent {
            let moving: HashSet<ItemId> = moving.iter().copied().collect();
            let current = visual_extent(items, |_| Vector::ZERO);
            let next = visual_extent(items, |item| {
                if moving.contains(&item.id()) {
                    offset
                } else {
                    Vector::ZERO
                }
            });
            if let (Some(current), Some(next)) = (current, next) {
                let current = current.inflate(self.extent_margin);
                let next = next.inflate(self.extent_margin);
                let shrinks_w = next.width() < min.width && next.width() < current.width();
                let shrinks_h = next.height() < min.height && next.height() < current.height();
                if shrinks_w || shrinks_h {
                    return false;
                }
            }
        }

        true
    }

    /// Snap one coordinate to the grid. A value that respects the negative
    /// limit never snaps past it; it rounds up to the next grid line instead.
    pub fn snap(&self, value: f64, spacing: f64) -> f64 {
        let snapped = snap_to_grid(value, spacing);
        match self.negative_limit {
            Some(limit) if snapped < -limit && value >= -limit => {
                (value / spacing).ceil() * spacing
            }
            _ => snapped,
        }
    }
}

fn visual_extent(items: &ItemCollection, offset_of: impl Fn(&Item) -> Vector) -> Option<Rect> {
    items
        .iter()
        .map(|item| item.visual_bounds().translate(offset_of(item)))
        .reduce(|acc, r| acc.union(&r))
}

/// Round `value` to the nearest multiple of `spacing` (halves away from zero).
pub fn snap_to_grid(value: f64, spacing: f64) -> f64 {
    (value / spacing).round() * spacing
}

/// Moves exactly one item: the one under the pointer.
#[derive(Debug)]
pub struct SingleDrag {
    item: ItemId,
    model: UpdateModel,
}

/// Moves the selection captured at drag-start.
#[derive(Debug)]
pub struct MultipleDrag {
    working_set: Vec<ItemId>,
    model: UpdateModel,
}

#[derive(Debug)]
pub enum DragStrategy {
    Single(SingleDrag),
    Multiple(MultipleDrag),
}

impl DragStrategy {
    pub fn single(item: ItemId, model: UpdateModel) -> Self {
        DragStrategy::Single(SingleDrag { item, model })
    }

    pub fn multiple(model: UpdateModel) -> Self {
        DragStrategy::Multiple(MultipleDrag {
            working_set: Vec::new(),
            model,
        })
    }

    pub fn model(&self) -> UpdateModel {
        match self {
            DragStrategy::Single(s) => s.model,
            DragStrategy::Multiple(m) => m.model,
        }
    }

    /// Items this strategy moves.
    pub fn working_set(&self) -> &[ItemId] {
        match self {
            DragStrategy::Single(s) => std::slice::from_ref(&s.item),
            DragStrategy::Multiple(m) => &m.working_set,
        }
    }

    /// Prepare the working set. For multiple drags this snapshots the
    /// selected, draggable items; later selection changes do not affect it.
    pub fn start(&mut self, items: &ItemCollection) {
        if let DragStrategy::Multiple(m) = self {
            m.working_set.clear();
            m.working_set.extend(
                items
                    .selected()
                    .filter(|item| item.is_draggable())
                    .map(Item::id),
            );
        }
        trace!(count = self.working_set().len(), model = ?self.model(), "drag strategy started");
    }

    /// Offer one pointer delta (logical units) to every item in the working set.
    pub fn apply_delta(
        &mut self,
        items: &mut ItemCollection,
        policy: &BoundaryPolicy,
        offset: Vector,
    ) -> DeltaOutcome {
        let model = self.model();
        let ids = self.working_set();

        if !policy.permits(items, ids, offset) {
            trace!(?offset, "drag step rejected by boundary policy");
            return DeltaOutcome::Rejected;
        }

        for &id in ids {
            let Some(item) = items.get_mut(id) else { continue };
            match model {
                UpdateModel::RealTime => item.translate(offset),
                UpdateModel::Deferred => item.accumulate(offset),
            }
        }
        DeltaOutcome::Applied
    }

    /// Commit pending offsets, snap to the grid when `snap` is given and
    /// release the working set. Returns the ids that were moved.
    pub fn complete(
        &mut self,
        items: &mut ItemCollection,
        policy: &BoundaryPolicy,
        snap: Option<f64>,
    ) -> Vec<ItemId> {
        let ids = self.take_working_set();
        for &id in &ids {
            let Some(item) = items.get_mut(id) else { continue };
            item.commit_pending();
            if let Some(spacing) = snap {
                let pos = item.position();
                item.set_position(Point::new(
                    policy.snap(pos.x, spacing),
                    policy.snap(pos.y, spacing),
                ));
            }
        }
        ids
    }

    /// Abort the drag. Deferred offsets are discarded; real-time moves that
    /// were already applied stay where they are.
    pub fn cancel(&mut self, items: &mut ItemCollection) -> Vec<ItemId> {
        let ids = self.take_working_set();
        for &id in &ids {
            if let Some(item) = items.get_mut(id) {
                item.discard_pending();
            }
        }
        ids
    }

    fn take_working_set(&mut self) -> Vec<ItemId> {
        match self {
            DragStrategy::Single(s) => vec![s.item],
            DragStrategy::Multiple(m) => std::mem::take(&mut m.working_set),
        }
    }
}
