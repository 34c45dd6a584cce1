//! Canvas controller.
//!
//! Owns the item collection, the viewport, one state stack per item and the
//! gesture currently holding the pointer. Hosts feed it pointer, keyboard and
//! timer input in viewport pixels, strictly in temporal order; each event is
//! routed to an item's state stack (drag, draw), the selection strategy or the
//! viewport, and every resulting transition is reported through the injected
//! [`EventSink`].
//!
//! ## Gestures
//!
//! ```text
//! primary down on draggable item    -> push Dragging on that item
//! primary down on other item        -> click selection only
//! primary down on empty canvas      -> rectangle selection
//! middle down                       -> viewport pan
//! begin_drawing(item)               -> push Drawing on that item
//! ```
//!
//! Derived data (spatial index, extent) follows authoritative positions: it is
//! refreshed on add/remove/update, after every real-time drag step and once at
//! drag completion.

use crate::auto_pan::{AutoPan, Timer, TimerId};
use crate::constants::NUDGE_STEP;
use crate::drag::{BoundaryPolicy, DeltaOutcome, DragStrategy, UpdateModel};
use crate::error::SettingsResult;
use crate::events::{CanvasEvent, EventSink};
use crate::input::{
    DragContext, DrawContext, ItemState, Key, Modifiers, PointerButton, StateKind,
    StateNotification, StateStack,
};
use crate::item::{Item, ItemCollection, ItemId, ItemScale};
use crate::selection::{SelectionFeedback, SelectionMode, SelectionStrategy};
use crate::settings::CanvasSettings;
use crate::spatial_index::{HitTest, SpatialIndex};
use crate::types::{Point, Size, Vector};
use crate::viewport::{Viewport, compute_extent};
use crate::{profile_function, profile_scope};
use std::collections::HashMap;
use tracing::{debug, trace, warn};

/// The gesture currently owning pointer input.
#[derive(Debug)]
enum Gesture {
    Idle,
    /// An item's state stack handles input (drag or draw)
    Item(ItemId),
    Selecting(SelectionStrategy),
    /// Middle-button pan; last pointer position in viewport pixels
    Panning { last: Point },
}

pub struct Canvas {
    items: ItemCollection,
    index: SpatialIndex,
    states: HashMap<ItemId, StateStack>,
    viewport: Viewport,
    settings: CanvasSettings,
    gesture: Gesture,
    auto_pan: AutoPan,
    timer: Box<dyn Timer>,
    sink: Box<dyn EventSink>,
    /// Last pointer position in viewport pixels
    last_pointer: Option<Point>,
}

impl Canvas {
    /// Create an empty canvas. Fails only if `settings` do not validate.
    pub fn new(
        settings: CanvasSettings,
        timer: impl Timer + 'static,
        sink: impl EventSink + 'static,
    ) -> SettingsResult<Self> {
        settings.validate()?;
        Ok(Self {
            items: ItemCollection::new(),
            index: SpatialIndex::new(),
            states: HashMap::new(),
            viewport: Viewport::new(&settings),
            settings,
            gesture: Gesture::Idle,
            auto_pan: AutoPan::new(),
            timer: Box::new(timer),
            sink: Box::new(sink),
            last_pointer: None,
        })
    }

    // ------------------------------------------------------------------
    // Items
    // ------------------------------------------------------------------

    pub fn items(&self) -> &ItemCollection {
        &self.items
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn selected_ids(&self) -> Vec<ItemId> {
        self.items.selected_ids()
    }

    /// Current top-of-stack state of an item.
    pub fn state_of(&self, id: ItemId) -> Option<StateKind> {
        self.states.get(&id).map(|stack| stack.current().kind())
    }

    pub fn add_item(&mut self, item: Item) -> ItemId {
        let selected = item.is_selected();
        let id = self.items.add(item);
        self.states.insert(id, StateStack::new());
        self.refresh_items(&[id]);
        debug!(?id, "item added");
        if selected {
            self.emit_selection(&[id]);
        }
        id
    }

    /// Remove an item. A gesture that involves the item is aborted first.
    pub fn remove_item(&mut self, id: ItemId) -> Option<Item> {
        if self.gesture_involves(id) {
            self.abort_gesture();
        }
        let item = self.items.remove(id)?;
        self.states.remove(&id);
        self.index.remove(id);
        self.refresh_extent();
        debug!(?id, "item removed");
        if item.is_selected() {
            self.emit_selection(&[id]);
        }
        Some(item)
    }

    /// Apply a collaborator change (size, flags, drawn bounds) to an item.
    pub fn update_item(&mut self, id: ItemId, update: impl FnOnce(&mut Item)) -> bool {
        let Some(item) = self.items.get_mut(id) else {
            return false;
        };
        update(item);
        self.refresh_items(&[id]);
        true
    }

    /// Multiply every item's scale by `factor`. Items that allow it also move
    /// away from (or towards) `origin` by the same factor.
    pub fn scale_items(&mut self, factor: f64, origin: Point) -> bool {
        if !(factor.is_finite() && factor > 0.0) {
            return false;
        }
        for item in self.items.iter_mut() {
            let scale = item.scale();
            item.set_scale(ItemScale {
                x: scale.x * factor,
                y: scale.y * factor,
            });
            if item.allow_scale_change_to_update_position() {
                item.set_position(origin + (item.position() - origin) * factor);
            }
        }
        self.index.rebuild(self.items.iter());
        self.refresh_extent();
        debug!(factor, "items scaled");
        true
    }

    /// Topmost item under a viewport pixel.
    pub fn hit_test(&self, position: Point) -> Option<ItemId> {
        self.topmost_at(self.viewport.to_logical(position))
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Set one item's selection flag. Unselectable items cannot be selected.
    /// An in-progress multiple drag keeps the working set it started with.
    pub fn set_selected(&mut self, id: ItemId, selected: bool) -> bool {
        let changed = match self.items.get_mut(id) {
            Some(item) if item.is_selectable() || !selected => item.set_selected(selected),
            _ => false,
        };
        if changed {
            self.emit_selection(&[id]);
        }
        changed
    }

    pub fn select_all(&mut self) -> bool {
        if !self.settings.can_select_multiple_items {
            return false;
        }
        let changed: Vec<ItemId> = self
            .items
            .iter_mut()
            .filter(|item| item.is_selectable())
            .filter_map(|item| item.set_selected(true).then_some(item.id()))
            .collect();
        self.emit_selection(&changed)
    }

    pub fn unselect_all(&mut self) -> bool {
        let changed: Vec<ItemId> = self
            .items
            .iter_mut()
            .filter_map(|item| item.set_selected(false).then_some(item.id()))
            .collect();
        self.emit_selection(&changed)
    }

    // ------------------------------------------------------------------
    // Settings & viewport
    // ------------------------------------------------------------------

    pub fn settings(&self) -> &CanvasSettings {
        &self.settings
    }

    /// Replace the configuration. An in-progress drag keeps the strategy it
    /// started with; the next gesture picks up the new settings. Invalid
    /// settings are rejected and the previous ones stay in effect.
    pub fn set_settings(&mut self, settings: CanvasSettings) -> SettingsResult<()> {
        settings
            .validate()
            .inspect_err(|err| warn!(%err, "settings rejected"))?;

        let before = (self.viewport.location(), self.viewport.scale());
        self.viewport.apply_settings(&settings);
        self.settings = settings;
        self.refresh_extent();
        if self.settings.disable_auto_panning {
            self.auto_pan.stop(self.timer.as_mut());
        }
        self.notify_viewport(before != (self.viewport.location(), self.viewport.scale()));
        Ok(())
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn to_logical(&self, position: Point) -> Point {
        self.viewport.to_logical(position)
    }

    pub fn to_viewport(&self, logical: Point) -> Point {
        self.viewport.to_viewport(logical)
    }

    /// Host reports the viewport size in pixels.
    pub fn resize(&mut self, view_size: Size) {
        self.viewport.resize(view_size);
    }

    /// Pan by a logical delta.
    pub fn pan(&mut self, delta: Vector) -> bool {
        let changed = self.viewport.pan(delta);
        self.notify_viewport(changed)
    }

    /// Zoom by `factor` around a viewport pixel.
    pub fn zoom(&mut self, factor: f64, pivot: Point) -> bool {
        let changed = self.viewport.zoom(factor, pivot);
        self.notify_viewport(changed)
    }

    pub fn zoom_in(&mut self, pivot: Point) -> bool {
        let changed = self.viewport.zoom_in(pivot);
        self.notify_viewport(changed)
    }

    pub fn zoom_out(&mut self, pivot: Point) -> bool {
        let changed = self.viewport.zoom_out(pivot);
        self.notify_viewport(changed)
    }

    pub fn reset_location(&mut self) -> bool {
        let changed = self.viewport.reset_location();
        self.notify_viewport(changed)
    }

    pub fn reset_zoom(&mut self) -> bool {
        let changed = self.viewport.reset_zoom();
        self.notify_viewport(changed)
    }

    /// Zoom and centre so the whole extent is visible.
    pub fn fit_to_screen(&mut self) -> bool {
        let extent = self.viewport.extent();
        let changed = self.viewport.fit(extent);
        self.notify_viewport(changed)
    }

    pub fn bring_into_view(&mut self, logical: Point) -> bool {
        let changed = self.viewport.bring_into_view(logical);
        self.notify_viewport(changed)
    }

    pub fn is_auto_panning(&self) -> bool {
        self.auto_pan.is_active()
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.gesture, Gesture::Idle)
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    pub fn pointer_down(&mut self, position: Point, button: PointerButton, modifiers: Modifiers) {
        profile_function!();
        if !self.is_idle() {
            trace!(?button, "pointer down ignored during active gesture");
            return;
        }
        self.last_pointer = Some(position);
        let logical = self.viewport.to_logical(position);

        match button {
            PointerButton::Middle => {
                debug!("panning started");
                self.gesture = Gesture::Panning { last: position };
            }
            PointerButton::Secondary => {}
            PointerButton::Primary => match self.topmost_at(logical) {
                Some(id) => self.press_item(id, logical),
                None => self.begin_selection(logical, modifiers),
            },
        }
    }

    pub fn pointer_move(&mut self, position: Point) {
        profile_function!();
        self.last_pointer = Some(position);
        self.dispatch_move(position);
        self.update_auto_pan(position);
    }

    pub fn pointer_up(&mut self, position: Point) {
        profile_function!();
        self.last_pointer = Some(position);
        self.dispatch_move(position);
        // Stop before any completion event so no pan follows it.
        self.auto_pan.stop(self.timer.as_mut());

        let logical = self.viewport.to_logical(position);
        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Idle => {}
            Gesture::Item(id) => {
                self.pop_state(id, logical, false);
                if self.states.get(&id).is_some_and(|stack| !stack.is_resting()) {
                    self.gesture = Gesture::Item(id);
                }
            }
            Gesture::Selecting(mut selection) => {
                let changed = selection.on_pointer_up(logical, &mut self.items, &self.index);
                debug!(rect = ?selection.rect(), "selection finished");
                self.emit_selection(&changed);
            }
            Gesture::Panning { .. } => debug!("panning finished"),
        }
    }

    /// Returns true when the key was handled.
    pub fn key_down(&mut self, key: Key, modifiers: Modifiers) -> bool {
        let center = self.view_center();
        match key {
            Key::Escape => self.abort_gesture(),
            Key::Character(c) if modifiers.control => match c.to_ascii_lowercase() {
                'a' => self.select_all(),
                '=' | '+' => self.zoom_in(center),
                '-' => self.zoom_out(center),
                '0' => self.reset_zoom(),
                _ => false,
            },
            Key::Character(_) => false,
            Key::ArrowLeft => self.nudge(Vector::new(-1.0, 0.0)),
            Key::ArrowRight => self.nudge(Vector::new(1.0, 0.0)),
            Key::ArrowUp => self.nudge(Vector::new(0.0, -1.0)),
            Key::ArrowDown => self.nudge(Vector::new(0.0, 1.0)),
        }
    }

    /// Forward a fired timer. Ticks from a cancelled auto-pan are ignored.
    pub fn timer_tick(&mut self, id: TimerId) {
        if !self.auto_pan.owns(id) {
            trace!(?id, "stale timer tick ignored");
            return;
        }
        let Some(pointer) = self.last_pointer else {
            return;
        };
        profile_scope!("auto_pan_tick");

        let delta = self.auto_pan.direction() * (self.settings.auto_pan_speed / self.viewport.scale());
        if self.viewport.pan(delta) {
            trace!(?delta, "auto-pan tick");
            self.emit_viewport();
            // The logical point under the pointer moved with the viewport.
            self.dispatch_move(pointer);
        }
    }

    /// Put an item into the Drawing state anchored at a viewport pixel.
    pub fn begin_drawing(&mut self, id: ItemId, position: Point) -> bool {
        if !self.is_idle() || !self.items.contains(id) {
            return false;
        }
        self.last_pointer = Some(position);
        let anchor = self.viewport.to_logical(position);
        self.push_state(id, ItemState::Drawing(DrawContext::new(anchor)));
        self.gesture = Gesture::Item(id);
        true
    }

    /// Cancel whatever gesture is active.
    ///
    /// Deferred drags revert to where they started, real-time drags stay at
    /// their last applied position. A rectangle selection restores the
    /// selection from before the gesture.
    pub fn abort_gesture(&mut self) -> bool {
        self.auto_pan.stop(self.timer.as_mut());
        let position = self
            .last_pointer
            .map_or(Point::ZERO, |p| self.viewport.to_logical(p));

        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Idle => false,
            Gesture::Item(id) => {
                while self.states.get(&id).is_some_and(|stack| !stack.is_resting()) {
                    self.pop_state(id, position, true);
                }
                debug!(?id, "gesture aborted");
                true
            }
            Gesture::Selecting(selection) => {
                let changed = selection.restore(&mut self.items);
                debug!("selection aborted");
                self.emit_selection(&changed);
                true
            }
            Gesture::Panning { .. } => true,
        }
    }

    // ------------------------------------------------------------------
    // State stack
    // ------------------------------------------------------------------

    fn push_state(&mut self, id: ItemId, state: ItemState) {
        let Some(stack) = self.states.get_mut(&id) else {
            return;
        };
        let note = stack.push(state);
        debug!(?id, ?note, depth = stack.depth(), "state pushed");
        if let StateNotification::Enter(StateKind::Dragging) = note {
            self.enter_dragging(id);
        }
    }

    fn pop_state(&mut self, id: ItemId, position: Point, canceled: bool) {
        let Some(stack) = self.states.get_mut(&id) else {
            return;
        };
        let Some((state, [exit, re_enter])) = stack.pop() else {
            return;
        };
        debug!(?id, ?exit, ?re_enter, canceled, "state popped");

        self.exit_state(id, state, position, canceled);
        if re_enter != StateNotification::ReEnter(StateKind::Default) {
            self.re_enter_state(id, position);
        }
    }

    fn enter_dragging(&mut self, id: ItemId) {
        if !matches!(
            self.states.get(&id).map(StateStack::current),
            Some(ItemState::Dragging(_))
        ) {
            return;
        }
        let changed = self.select_for_press(id);
        self.emit_selection(&changed);

        let model = UpdateModel::from_settings(&self.settings);
        let grouped = self.settings.can_select_multiple_items
            && self.items.get(id).is_some_and(Item::is_selected);
        let mut strategy = if grouped {
            DragStrategy::multiple(model)
        } else {
            DragStrategy::single(id, model)
        };
        strategy.start(&self.items);
        let count = strategy.working_set().len();

        let Some(ItemState::Dragging(ctx)) = self.states.get_mut(&id).map(StateStack::current_mut)
        else {
            return;
        };
        ctx.strategy = Some(strategy);
        let position = ctx.initial;
        debug!(?id, count, ?model, "drag started");
        self.sink.emit(CanvasEvent::DragStarted { item: id, position });
    }

    fn exit_state(&mut self, id: ItemId, state: ItemState, position: Point, canceled: bool) {
        match state {
            ItemState::Default => {}
            ItemState::Dragging(ctx) => {
                let Some(mut strategy) = ctx.strategy else {
                    return;
                };
                let moved = if canceled {
                    strategy.cancel(&mut self.items)
                } else {
                    let policy = BoundaryPolicy::from_settings(&self.settings);
                    strategy.complete(&mut self.items, &policy, self.settings.snap_spacing())
                };
                self.refresh_items(&moved);
                let position = if canceled { ctx.last } else { position };
                debug!(?id, moved = moved.len(), canceled, "drag completed");
                self.sink.emit(CanvasEvent::DragCompleted {
                    item: id,
                    position,
                    canceled,
                });
            }
            ItemState::Drawing(ctx) => {
                if canceled {
                    debug!(?id, "drawing aborted");
                    return;
                }
                let bounds = ctx.bounds();
                debug!(?id, ?bounds, "drawing ended");
                self.sink.emit(CanvasEvent::DrawingEnded {
                    item: id,
                    position,
                    bounds,
                });
            }
        }
    }

    /// A suspended state resumes from the current pointer position.
    fn re_enter_state(&mut self, id: ItemId, position: Point) {
        match self.states.get_mut(&id).map(StateStack::current_mut) {
            Some(ItemState::Dragging(ctx)) => ctx.last = position,
            Some(ItemState::Drawing(ctx)) => ctx.current = position,
            _ => {}
        }
    }

    // ------------------------------------------------------------------
    // Gesture internals
    // ------------------------------------------------------------------

    fn press_item(&mut self, id: ItemId, logical: Point) {
        let Some(item) = self.items.get(id) else {
            return;
        };
        if item.is_draggable() {
            self.push_state(id, ItemState::Dragging(DragContext::new(logical)));
            self.gesture = Gesture::Item(id);
        } else if item.is_selectable() {
            let changed = self.select_for_press(id);
            self.emit_selection(&changed);
        }
    }

    /// Selection update for a press on an item: the item joins the selection
    /// when multi-select is on and becomes the only selected item otherwise.
    fn select_for_press(&mut self, id: ItemId) -> Vec<ItemId> {
        if !self.items.get(id).is_some_and(Item::is_selectable) {
            return Vec::new();
        }
        if self.settings.can_select_multiple_items {
            return match self.items.get_mut(id) {
                Some(item) if !item.is_selected() => {
                    item.set_selected(true);
                    vec![id]
                }
                _ => Vec::new(),
            };
        }
        self.items
            .iter_mut()
            .filter_map(|item| {
                let selected = item.id() == id;
                item.set_selected(selected).then_some(item.id())
            })
            .collect()
    }

    fn begin_selection(&mut self, logical: Point, modifiers: Modifiers) {
        if !self.settings.can_select_multiple_items {
            self.unselect_all();
            return;
        }
        let mode = self.selection_mode(modifiers);
        let feedback = if self.settings.real_time_selection_enabled {
            SelectionFeedback::RealTime
        } else {
            SelectionFeedback::Deferred
        };
        debug!(?mode, ?feedback, "selection started");
        self.gesture =
            Gesture::Selecting(SelectionStrategy::begin(logical, mode, feedback, &self.items));
    }

    fn selection_mode(&self, modifiers: Modifiers) -> SelectionMode {
        if modifiers.alt {
            SelectionMode::Remove
        } else if modifiers.control {
            SelectionMode::Invert
        } else if modifiers.shift {
            SelectionMode::Append
        } else {
            self.settings.default_selection_mode
        }
    }

    fn dispatch_move(&mut self, position: Point) {
        let logical = self.viewport.to_logical(position);
        match &mut self.gesture {
            Gesture::Idle => {}
            Gesture::Item(id) => {
                let id = *id;
                self.item_pointer_move(id, logical);
            }
            Gesture::Selecting(selection) => {
                let changed = selection.on_pointer_move(logical, &mut self.items, &self.index);
                self.emit_selection(&changed);
            }
            Gesture::Panning { last } => {
                let pixels = position - *last;
                *last = position;
                // Content follows the pointer, so the viewport moves the other way.
                let changed = self.viewport.pan(pixels * (-1.0 / self.viewport.scale()));
                self.notify_viewport(changed);
            }
        }
    }

    fn item_pointer_move(&mut self, id: ItemId, logical: Point) {
        let Some(stack) = self.states.get_mut(&id) else {
            return;
        };
        match stack.current_mut() {
            ItemState::Default => {}
            ItemState::Drawing(ctx) => ctx.current = logical,
            ItemState::Dragging(ctx) => {
                let offset = logical - ctx.last;
                if offset.is_zero() {
                    return;
                }
                ctx.last = logical;
                let Some(strategy) = ctx.strategy.as_mut() else {
                    return;
                };

                let policy = BoundaryPolicy::from_settings(&self.settings);
                let outcome = strategy.apply_delta(&mut self.items, &policy, offset);
                let moved = (outcome == DeltaOutcome::Applied
                    && strategy.model() == UpdateModel::RealTime)
                    .then(|| strategy.working_set().to_vec());

                trace!(?id, ?offset, ?outcome, "drag delta");
                self.sink.emit(CanvasEvent::DragDelta { item: id, offset });
                if let Some(ids) = moved {
                    self.refresh_items(&ids);
                }
            }
        }
    }

    fn update_auto_pan(&mut self, position: Point) {
        let eligible = match self.gesture {
            Gesture::Item(_) | Gesture::Selecting(_) => !self.settings.disable_auto_panning,
            Gesture::Idle | Gesture::Panning { .. } => false,
        };
        let direction = if eligible {
            AutoPan::edge_direction(
                position,
                self.viewport.view_size(),
                self.settings.auto_pan_edge_margin,
            )
        } else {
            Vector::ZERO
        };
        self.auto_pan.update(
            direction,
            self.settings.auto_pan_interval(),
            self.timer.as_mut(),
        );
    }

    /// Move the selection one step with the boundary policy applied.
    fn nudge(&mut self, direction: Vector) -> bool {
        if !self.is_idle() {
            return false;
        }
        let snap = self.settings.snap_spacing();
        let step = snap.unwrap_or(NUDGE_STEP);

        let mut strategy = DragStrategy::multiple(UpdateModel::RealTime);
        strategy.start(&self.items);
        if strategy.working_set().is_empty() {
            return false;
        }
        let policy = BoundaryPolicy::from_settings(&self.settings);
        if strategy.apply_delta(&mut self.items, &policy, direction * step) == DeltaOutcome::Rejected
        {
            debug!(?direction, step, "nudge rejected by boundary policy");
            return false;
        }
        let moved = strategy.complete(&mut self.items, &policy, snap);
        self.refresh_items(&moved);
        debug!(?direction, step, "selection nudged");
        true
    }

    fn gesture_involves(&self, id: ItemId) -> bool {
        let Gesture::Item(active) = self.gesture else {
            return false;
        };
        if active == id {
            return true;
        }
        self.states
            .get(&active)
            .is_some_and(|stack| match stack.current() {
                ItemState::Dragging(ctx) => ctx
                    .strategy
                    .as_ref()
                    .is_some_and(|strategy| strategy.working_set().contains(&id)),
                _ => false,
            })
    }

    fn topmost_at(&self, logical: Point) -> Option<ItemId> {
        let hits = self.index.items_at_point(logical);
        self.items
            .iter()
            .map(Item::id)
            .filter(|id| hits.contains(id))
            .last()
    }

    fn view_center(&self) -> Point {
        let size = self.viewport.view_size();
        Point::new(size.width / 2.0, size.height / 2.0)
    }

    // ------------------------------------------------------------------
    // Derived data & events
    // ------------------------------------------------------------------

    fn refresh_items(&mut self, ids: &[ItemId]) {
        profile_scope!("refresh_items");
        for &id in ids {
            if let Some(item) = self.items.get(id) {
                self.index.insert(id, item.bounds());
            }
        }
        debug_assert_eq!(
            self.index.len(),
            self.items.len(),
            "spatial index out of sync with items"
        );
        self.refresh_extent();
    }

    fn refresh_extent(&mut self) {
        let extent = compute_extent(&self.items, self.settings.extent_margin);
        self.viewport.set_extent(extent);
    }

    /// Emit `SelectionChanged` if anything changed. Returns whether it did.
    fn emit_selection(&mut self, changed: &[ItemId]) -> bool {
        if changed.is_empty() {
            return false;
        }
        let selected = self.items.selected_ids();
        trace!(count = selected.len(), "selection changed");
        self.sink.emit(CanvasEvent::SelectionChanged { selected });
        true
    }

    fn notify_viewport(&mut self, changed: bool) -> bool {
        if changed {
            self.emit_viewport();
        }
        changed
    }

    fn emit_viewport(&mut self) {
        self.sink.emit(CanvasEvent::ViewportChanged {
            location: self.viewport.location(),
            scale: self.viewport.scale(),
        });
    }
}

impl Drop for Canvas {
    fn drop(&mut self) {
        self.auto_pan.stop(self.timer.as_mut());
    }
}
