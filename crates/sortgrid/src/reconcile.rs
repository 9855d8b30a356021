use smallvec::SmallVec;

use crate::registry::{ItemSlot, ItemSpec, OrderRegistry};

/// What a fresh external list means for the registry. Computed without
/// mutating anything so the apply step (and its animation dispatch) stays
/// separate from the decision.
#[derive(Default)]
pub(crate) struct ListDiff {
    /// New keys, paired with their list index (= their order).
    pub inserts: Vec<(ItemSpec, usize)>,
    /// Known keys whose order changed; target order is the list index.
    pub moves: SmallVec<[(ItemSlot, usize); 8]>,
    /// Known keys whose opt-out flags changed.
    pub flag_updates: Vec<(ItemSlot, bool, bool)>,
    /// Previously tracked keys absent from the new list.
    pub removals: Vec<String>,
}

impl ListDiff {
    pub fn is_empty(&self) -> bool {
        self.inserts.is_empty()
            && self.moves.is_empty()
            && self.flag_updates.is_empty()
            && self.removals.is_empty()
    }
}

/// Diff the external list (the source of truth for existence and order
/// outside a drag) against the registry. Idempotent: diffing an already
/// reconciled list yields an empty diff.
pub(crate) fn diff(registry: &OrderRegistry, items: &[ItemSpec]) -> ListDiff {
    let mut out = ListDiff::default();

    for (index, spec) in items.iter().enumerate() {
        match registry.slot_of(&spec.key) {
            Some(slot) => {
                let Some(entry) = registry.entry(slot) else {
                    continue;
                };
                if entry.order != index {
                    out.moves.push((slot, index));
                }
                if entry.disabled_drag != spec.disabled_drag
                    || entry.disabled_resorted != spec.disabled_resorted
                {
                    out.flag_updates
                        .push((slot, spec.disabled_drag, spec.disabled_resorted));
                }
            }
            None => out.inserts.push((spec.clone(), index)),
        }
    }

    for (_, entry) in registry.iter() {
        if !items.iter().any(|spec| spec.key == entry.key) {
            out.removals.push(entry.key.clone());
        }
    }

    out
}
