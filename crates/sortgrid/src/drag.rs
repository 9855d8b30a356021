use smallvec::SmallVec;

use crate::geometry::{GridLayout, Vec2};
use crate::registry::{ItemSlot, OrderRegistry};

/// Drag reconciliation phases.
///
/// `Idle → Armed (long-press) → Dragging → Settling → Idle`, plus a forced
/// cancel edge back to `Idle` from any live phase.
#[derive(Clone, Copy, Debug)]
pub(crate) enum DragPhase {
    Idle,
    /// Long-pressed, lifted, not yet moved. No position math has happened.
    Armed { slot: ItemSlot },
    Dragging(DragSession),
    /// Released; the item is animating back into its slot.
    Settling { slot: ItemSlot },
}

/// Ephemeral state for the one active drag.
///
/// `grab_origin` and `grab_translation` pin the coordinate frame at the
/// moment the gesture activated: the drag position is always
/// `grab_origin + (translation - grab_translation)`, regardless of how the
/// item's order changes mid-drag.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DragSession {
    pub slot: ItemSlot,
    pub grab_origin: Vec2,
    pub grab_translation: Vec2,
}

/// Public view of the current phase, for hosts and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Armed,
    Dragging,
    Settling,
}

impl DragPhase {
    pub(crate) fn kind(&self) -> Phase {
        match self {
            DragPhase::Idle => Phase::Idle,
            DragPhase::Armed { .. } => Phase::Armed,
            DragPhase::Dragging(_) => Phase::Dragging,
            DragPhase::Settling { .. } => Phase::Settling,
        }
    }

    pub(crate) fn active_slot(&self) -> Option<ItemSlot> {
        match self {
            DragPhase::Idle => None,
            DragPhase::Armed { slot } => Some(*slot),
            DragPhase::Dragging(session) => Some(session.slot),
            DragPhase::Settling { slot } => Some(*slot),
        }
    }
}

/// Nearest-neighbor swap target for the active item at `drag_pos`.
///
/// Baseline is the distance to the active item's own slot origin; a
/// candidate wins only if it is strictly nearer than both the running best
/// and one cell width. Scan runs in ascending order, so among equally near
/// candidates the first encountered (lowest order) sticks.
pub(crate) fn find_swap_target(
    registry: &OrderRegistry,
    layout: &GridLayout,
    active: ItemSlot,
    drag_pos: Vec2,
) -> Option<usize> {
    let active_order = registry.entry(active)?.order;
    let mut best = drag_pos.distance(layout.position_for_order(active_order));
    let threshold = layout.cell().width;
    let mut target = None;

    for slot in registry.ordered_slots() {
        if slot == active {
            continue;
        }
        let entry = registry.entry(slot)?;
        if entry.disabled_resorted {
            continue;
        }
        let d = drag_pos.distance(layout.position_for_order(entry.order));
        if d < best && d < threshold {
            best = d;
            target = Some(entry.order);
        }
    }
    target
}

/// Moves for every item displaced when the active item leaves `old_order`
/// for `target`. The active item itself is not in the result; its order
/// simply becomes `target`.
///
/// Items flagged `disabled_resorted` are fixed obstacles: the walk skips
/// them without renumbering, accumulating the skipped span so the next
/// shiftable item jumps over it in one move.
pub(crate) fn plan_shift(
    registry: &OrderRegistry,
    old_order: usize,
    target: usize,
) -> SmallVec<[(ItemSlot, usize); 8]> {
    let mut moves = SmallVec::new();
    if target == old_order {
        return moves;
    }
    let mut skipped = 0usize;

    if target > old_order {
        // Forward drag: everything between moves back one slot.
        for order in old_order + 1..=target {
            let Some(slot) = registry.slot_at_order(order) else {
                continue;
            };
            let Some(entry) = registry.entry(slot) else {
                continue;
            };
            if entry.disabled_resorted {
                skipped += 1;
            } else {
                moves.push((slot, order - skipped - 1));
                skipped = 0;
            }
        }
    } else {
        // Backward drag: everything between moves forward one slot.
        for order in (target..old_order).rev() {
            let Some(slot) = registry.slot_at_order(order) else {
                continue;
            };
            let Some(entry) = registry.entry(slot) else {
                continue;
            };
            if entry.disabled_resorted {
                skipped += 1;
            } else {
                moves.push((slot, order + skipped + 1));
                skipped = 0;
            }
        }
    }
    moves
}
