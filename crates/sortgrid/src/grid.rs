use std::rc::Rc;

use thiserror::Error;
use web_time::Duration;

use crate::animation::{AnimationSpec, Easing};
use crate::drag::{self, DragPhase, DragSession, Phase};
use crate::geometry::{GridLayout, Size, Vec2};
use crate::reconcile;
use crate::registry::{ItemSpec, OrderRegistry};
use crate::scheduler::{MotionSink, TweenScheduler};

#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    #[error("column count must be positive (got {0})")]
    InvalidColumns(usize),
    #[error("item height must be finite and positive (got {0})")]
    InvalidItemHeight(f32),
}

/// Engine configuration. `columns` is validated at construction; everything
/// else has sensible touch-UI defaults.
#[derive(Clone, Debug)]
pub struct GridConfig {
    pub columns: usize,
    /// Fixed per-item height; defaults to a square cell.
    pub item_height: Option<f32>,
    pub long_press_delay: Duration,
    /// Scale applied to the grabbed item while a session is live.
    pub lift_scale: f32,
    pub reorder_anim: AnimationSpec,
    pub settle_anim: AnimationSpec,
    pub lift_anim: AnimationSpec,
}

impl GridConfig {
    pub fn new(columns: usize) -> Result<Self, GridError> {
        if columns == 0 {
            return Err(GridError::InvalidColumns(columns));
        }
        Ok(Self {
            columns,
            item_height: None,
            long_press_delay: Duration::from_millis(500),
            lift_scale: 1.1,
            reorder_anim: AnimationSpec::default(),
            settle_anim: AnimationSpec::tween(Duration::from_millis(300), Easing::EaseOut),
            lift_anim: AnimationSpec::fast(),
        })
    }

    pub fn item_height(mut self, height: f32) -> Result<Self, GridError> {
        if !height.is_finite() || height <= 0.0 {
            return Err(GridError::InvalidItemHeight(height));
        }
        self.item_height = Some(height);
        Ok(self)
    }

    pub fn long_press_delay(mut self, delay: Duration) -> Self {
        self.long_press_delay = delay;
        self
    }

    pub fn lift_scale(mut self, scale: f32) -> Self {
        self.lift_scale = scale;
        self
    }

    pub fn reorder_anim(mut self, spec: AnimationSpec) -> Self {
        self.reorder_anim = spec;
        self
    }

    pub fn settle_anim(mut self, spec: AnimationSpec) -> Self {
        self.settle_anim = spec;
        self
    }
}

/// Host notifications, all optional.
#[derive(Clone, Default)]
pub struct GridCallbacks {
    pub on_item_press: Option<Rc<dyn Fn(&str)>>,
    pub on_drag_start: Option<Rc<dyn Fn(&str)>>,
    /// Fired on every live reorder during a drag, with the full
    /// order-projected key list.
    pub on_reset_sort: Option<Rc<dyn Fn(&[String])>>,
    /// Fired once on release, carrying the committed order.
    pub on_drag_release: Option<Rc<dyn Fn(&[String])>>,
}

impl GridCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_item_press(mut self, f: impl Fn(&str) + 'static) -> Self {
        self.on_item_press = Some(Rc::new(f));
        self
    }

    pub fn on_drag_start(mut self, f: impl Fn(&str) + 'static) -> Self {
        self.on_drag_start = Some(Rc::new(f));
        self
    }

    pub fn on_reset_sort(mut self, f: impl Fn(&[String]) + 'static) -> Self {
        self.on_reset_sort = Some(Rc::new(f));
        self
    }

    pub fn on_drag_release(mut self, f: impl Fn(&[String]) + 'static) -> Self {
        self.on_drag_release = Some(Rc::new(f));
        self
    }
}

/// One cell's worth of draw state for the host.
#[derive(Clone, Debug)]
pub struct RenderItem {
    pub key: String,
    pub order: usize,
    pub offset: Vec2,
    pub scale: f32,
    pub active: bool,
    pub disabled_drag: bool,
    pub disabled_resorted: bool,
}

/// The drag-to-reorder grid engine.
///
/// Owns the order registry and the drag state machine; every registry write
/// funnels through here, on one thread, one event at a time. Animations are
/// dispatched to the [`MotionSink`] and advanced by [`SortGrid::tick`].
pub struct SortGrid<S: MotionSink = TweenScheduler> {
    config: GridConfig,
    callbacks: GridCallbacks,
    layout: Option<GridLayout>,
    registry: OrderRegistry,
    sink: S,
    phase: DragPhase,
    /// Items supplied before the first layout measurement.
    pending: Option<Vec<ItemSpec>>,
}

impl SortGrid<TweenScheduler> {
    pub fn new(config: GridConfig) -> Self {
        Self::with_sink(config, TweenScheduler::new())
    }
}

impl<S: MotionSink> SortGrid<S> {
    pub fn with_sink(config: GridConfig, sink: S) -> Self {
        Self {
            config,
            callbacks: GridCallbacks::default(),
            layout: None,
            registry: OrderRegistry::new(),
            sink,
            phase: DragPhase::Idle,
            pending: None,
        }
    }

    pub fn set_callbacks(&mut self, callbacks: GridCallbacks) {
        self.callbacks = callbacks;
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn layout(&self) -> Option<GridLayout> {
        self.layout
    }

    pub fn phase(&self) -> Phase {
        self.phase.kind()
    }

    pub fn order_of(&self, key: &str) -> Option<usize> {
        self.registry.order_of(key)
    }

    /// Current committed order, lowest order first.
    pub fn committed_order(&self) -> Vec<String> {
        self.registry.ordered_keys()
    }

    /// Layout measurement, re-delivered on resize. Re-anchors every tracked
    /// item at its resolved position; a live drag session is force-cancelled
    /// first since its coordinate frame no longer holds.
    pub fn set_layout(&mut self, container: Size) {
        let layout = GridLayout::new(self.config.columns, container, self.config.item_height);
        if layout == self.layout {
            return;
        }
        if !matches!(self.phase, DragPhase::Idle) {
            log::warn!("grid: layout changed mid-drag, cancelling session");
            self.force_cancel();
        }
        self.layout = layout;
        if let Some(layout) = self.layout {
            let slots = self.registry.ordered_slots();
            for slot in slots {
                if let Some(entry) = self.registry.entry(slot) {
                    self.sink.snap_to(slot, layout.position_for_order(entry.order));
                }
            }
            if let Some(items) = self.pending.take() {
                let diff = reconcile::diff(&self.registry, &items);
                self.apply_diff(diff);
            }
        }
    }

    /// Reconcile a fresh external list. Outside a drag the list is the
    /// single source of truth for order. A list that actually changed while
    /// a session is live force-cancels the drag first (no release callback
    /// fires); re-renders with an unchanged list leave the session alone.
    pub fn set_items(&mut self, items: &[ItemSpec]) {
        if self.layout.is_none() {
            self.pending = Some(items.to_vec());
            return;
        }
        let diff = reconcile::diff(&self.registry, items);
        if diff.is_empty() {
            return;
        }
        if !matches!(self.phase, DragPhase::Idle) {
            log::warn!("grid: external list changed mid-drag, cancelling session");
            self.force_cancel();
        }
        self.apply_diff(diff);
    }

    /// Long-press arming. Eligible only from `Idle` on an item that exists
    /// and is not `disabled_drag`; anything else is a logged no-op.
    pub fn press(&mut self, key: &str) {
        if !matches!(self.phase, DragPhase::Idle) {
            log::debug!("grid: press ignored, session already live");
            return;
        }
        let Some(slot) = self.registry.slot_of(key) else {
            log::debug!("grid: press on unknown key '{key}'");
            return;
        };
        let Some(entry) = self.registry.entry(slot) else {
            return;
        };
        if entry.disabled_drag {
            log::debug!("grid: press on drag-disabled item '{key}'");
            return;
        }
        self.sink
            .scale_to(slot, self.config.lift_scale, self.config.lift_anim);
        self.phase = DragPhase::Armed { slot };
    }

    /// Simple tap on an item.
    pub fn tap(&self, key: &str) {
        if self.registry.slot_of(key).is_none() {
            return;
        }
        if let Some(cb) = self.callbacks.on_item_press.clone() {
            cb(key);
        }
    }

    /// The underlying gesture went active. Captures the coordinate frame
    /// (the item's resolved origin and the current pointer translation).
    pub fn drag_activate(&mut self, translation: Vec2) {
        let DragPhase::Armed { slot } = self.phase else {
            log::debug!("grid: drag_activate outside Armed is a no-op");
            return;
        };
        let Some(layout) = self.layout else {
            return;
        };
        let Some(entry) = self.registry.entry(slot) else {
            self.phase = DragPhase::Idle;
            return;
        };
        let key = entry.key.clone();
        self.phase = DragPhase::Dragging(DragSession {
            slot,
            grab_origin: layout.position_for_order(entry.order),
            grab_translation: translation,
        });
        if let Some(cb) = self.callbacks.on_drag_start.clone() {
            cb(&key);
        }
    }

    /// Per-frame move. Tracks the pointer, finds the nearest swap target,
    /// and live-reorders the registry when one appears.
    pub fn drag_move(&mut self, translation: Vec2) {
        let DragPhase::Dragging(session) = self.phase else {
            log::debug!("grid: move with no active drag");
            return;
        };
        let Some(layout) = self.layout else {
            return;
        };
        let delta = translation - session.grab_translation;
        let raw = session.grab_origin + delta;
        let drag_pos = Vec2::new(layout.clamp_x(raw.x), raw.y);
        self.sink.snap_to(session.slot, drag_pos);

        let Some(old_order) = self.registry.entry(session.slot).map(|e| e.order) else {
            return;
        };
        let Some(target) = drag::find_swap_target(&self.registry, &layout, session.slot, drag_pos)
        else {
            return;
        };
        if target == old_order {
            return;
        }

        for (slot, new_order) in drag::plan_shift(&self.registry, old_order, target) {
            self.registry.reorder(slot, new_order);
            self.sink
                .animate_to(slot, layout.position_for_order(new_order), self.config.reorder_anim);
        }
        self.registry.reorder(session.slot, target);
        self.registry.assert_contiguous();

        if let Some(cb) = self.callbacks.on_reset_sort.clone() {
            cb(&self.registry.ordered_keys());
        }
    }

    /// Gesture release. From `Dragging` this commits the order and starts
    /// the settle animation; from `Armed` the item just settles back down.
    pub fn drag_release(&mut self) {
        match self.phase {
            DragPhase::Dragging(session) => {
                let keys = self.registry.ordered_keys();
                if let Some(cb) = self.callbacks.on_drag_release.clone() {
                    cb(&keys);
                }
                if let (Some(layout), Some(entry)) =
                    (self.layout, self.registry.entry(session.slot))
                {
                    self.sink.animate_to(
                        session.slot,
                        layout.position_for_order(entry.order),
                        self.config.settle_anim,
                    );
                }
                self.sink.scale_to(session.slot, 1.0, self.config.lift_anim);
                self.phase = DragPhase::Settling { slot: session.slot };
            }
            DragPhase::Armed { slot } => {
                self.sink.scale_to(slot, 1.0, self.config.lift_anim);
                self.phase = DragPhase::Settling { slot };
            }
            _ => {
                log::debug!("grid: release with no active item");
            }
        }
    }

    /// Forced reset straight to `Idle`: the active item snaps into its slot,
    /// no callbacks fire.
    pub fn cancel(&mut self) {
        self.force_cancel();
    }

    /// Advance animations one frame; completes `Settling → Idle` when the
    /// active item has come to rest. Returns true while anything still moves.
    pub fn tick(&mut self) -> bool {
        let moving = self.sink.tick();
        if let DragPhase::Settling { slot } = self.phase {
            if self.sink.is_settled(slot) {
                self.phase = DragPhase::Idle;
            }
        }
        moving
    }

    /// Item under `p`, hit-testing against current (possibly mid-animation)
    /// offsets.
    pub fn hit_test(&self, p: Vec2) -> Option<String> {
        let layout = self.layout?;
        for slot in self.registry.ordered_slots() {
            let entry = self.registry.entry(slot)?;
            let origin = self
                .sink
                .position(slot)
                .unwrap_or_else(|| layout.position_for_order(entry.order));
            if layout.cell_rect(origin).contains(p) {
                return Some(entry.key.clone());
            }
        }
        None
    }

    /// Draw state for every tracked item, lowest order first.
    pub fn render_snapshot(&self) -> Vec<RenderItem> {
        let active = self.phase.active_slot();
        self.registry
            .ordered_slots()
            .into_iter()
            .filter_map(|slot| {
                let entry = self.registry.entry(slot)?;
                let offset = self.sink.position(slot).or_else(|| {
                    self.layout.map(|l| l.position_for_order(entry.order))
                })?;
                Some(RenderItem {
                    key: entry.key.clone(),
                    order: entry.order,
                    offset,
                    scale: self.sink.scale(slot),
                    active: active == Some(slot),
                    disabled_drag: entry.disabled_drag,
                    disabled_resorted: entry.disabled_resorted,
                })
            })
            .collect()
    }

    fn force_cancel(&mut self) {
        if let Some(slot) = self.phase.active_slot() {
            if let (Some(layout), Some(entry)) = (self.layout, self.registry.entry(slot)) {
                self.sink.snap_to(slot, layout.position_for_order(entry.order));
            }
            self.sink.scale_to(
                slot,
                1.0,
                AnimationSpec::tween(Duration::ZERO, Easing::Linear),
            );
        }
        self.phase = DragPhase::Idle;
    }

    fn apply_diff(&mut self, diff: reconcile::ListDiff) {
        if diff.is_empty() {
            return;
        }
        let Some(layout) = self.layout else {
            return;
        };

        for key in &diff.removals {
            if let Some((slot, _)) = self.registry.remove(key) {
                self.sink.remove(slot);
            }
        }
        for (spec, index) in &diff.inserts {
            if let Some(slot) = self.registry.insert(spec, *index) {
                self.sink.snap_to(slot, layout.position_for_order(*index));
            }
        }
        for (slot, index) in &diff.moves {
            self.registry.reorder(*slot, *index);
            self.sink
                .animate_to(*slot, layout.position_for_order(*index), self.config.reorder_anim);
        }
        for (slot, disabled_drag, disabled_resorted) in &diff.flag_updates {
            self.registry.set_flags(*slot, *disabled_drag, *disabled_resorted);
        }
        self.registry.assert_contiguous();
    }
}
