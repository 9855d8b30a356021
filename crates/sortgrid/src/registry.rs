use std::collections::HashMap;

use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Generational handle for a tracked item's registry record.
    pub struct ItemSlot;
}

/// Host-supplied description of one grid item. Payload stays with the host;
/// the engine only tracks identity and the two opt-out flags.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemSpec {
    pub key: String,
    pub disabled_drag: bool,
    pub disabled_resorted: bool,
}

impl ItemSpec {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            disabled_drag: false,
            disabled_resorted: false,
        }
    }

    /// The item cannot be grabbed.
    pub fn no_drag(mut self) -> Self {
        self.disabled_drag = true;
        self
    }

    /// The item is never displaced by other items' drags.
    pub fn no_resort(mut self) -> Self {
        self.disabled_resorted = true;
        self
    }
}

#[derive(Clone, Debug)]
pub struct OrderEntry {
    pub key: String,
    pub order: usize,
    pub disabled_drag: bool,
    pub disabled_resorted: bool,
}

/// Authoritative key → order table.
///
/// Orders of all live entries form a contiguous permutation of
/// `[0, len)`. `reorder` does not enforce that per call — the drag machine
/// and the diff pass apply compensating moves as a batch and the invariant
/// holds again once the batch completes (checked in debug builds).
#[derive(Default)]
pub struct OrderRegistry {
    entries: SlotMap<ItemSlot, OrderEntry>,
    by_key: HashMap<String, ItemSlot>,
}

impl OrderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add a new entry. Duplicate keys are a logged no-op.
    pub fn insert(&mut self, spec: &ItemSpec, order: usize) -> Option<ItemSlot> {
        if self.by_key.contains_key(&spec.key) {
            log::warn!("registry: insert ignored, key '{}' already tracked", spec.key);
            return None;
        }
        let slot = self.entries.insert(OrderEntry {
            key: spec.key.clone(),
            order,
            disabled_drag: spec.disabled_drag,
            disabled_resorted: spec.disabled_resorted,
        });
        self.by_key.insert(spec.key.clone(), slot);
        Some(slot)
    }

    /// Delete an entry. Compacting the remaining orders is the caller's job,
    /// via explicit `reorder` calls.
    pub fn remove(&mut self, key: &str) -> Option<(ItemSlot, OrderEntry)> {
        let slot = self.by_key.remove(key)?;
        let entry = self.entries.remove(slot)?;
        Some((slot, entry))
    }

    pub fn reorder(&mut self, slot: ItemSlot, new_order: usize) {
        if let Some(entry) = self.entries.get_mut(slot) {
            entry.order = new_order;
        }
    }

    pub fn set_flags(&mut self, slot: ItemSlot, disabled_drag: bool, disabled_resorted: bool) {
        if let Some(entry) = self.entries.get_mut(slot) {
            entry.disabled_drag = disabled_drag;
            entry.disabled_resorted = disabled_resorted;
        }
    }

    pub fn slot_of(&self, key: &str) -> Option<ItemSlot> {
        self.by_key.get(key).copied()
    }

    pub fn entry(&self, slot: ItemSlot) -> Option<&OrderEntry> {
        self.entries.get(slot)
    }

    pub fn order_of(&self, key: &str) -> Option<usize> {
        self.slot_of(key).and_then(|s| self.entries.get(s)).map(|e| e.order)
    }

    /// Slot currently holding `order`. Transiently `None` mid-batch; that
    /// state never crosses the engine facade.
    pub fn slot_at_order(&self, order: usize) -> Option<ItemSlot> {
        self.entries
            .iter()
            .find(|(_, e)| e.order == order)
            .map(|(slot, _)| slot)
    }

    pub fn key_at_order(&self, order: usize) -> Option<&str> {
        self.slot_at_order(order)
            .and_then(|s| self.entries.get(s))
            .map(|e| e.key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemSlot, &OrderEntry)> {
        self.entries.iter()
    }

    /// All slots sorted by order.
    pub fn ordered_slots(&self) -> Vec<ItemSlot> {
        let mut slots: Vec<_> = self.entries.iter().map(|(s, e)| (e.order, s)).collect();
        slots.sort_by_key(|(order, _)| *order);
        slots.into_iter().map(|(_, s)| s).collect()
    }

    /// Current order projected onto keys, lowest order first.
    pub fn ordered_keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = self
            .entries
            .values()
            .map(|e| (e.order, e.key.clone()))
            .collect();
        keys.sort_by_key(|(order, _)| *order);
        keys.into_iter().map(|(_, k)| k).collect()
    }

    /// Debug check: orders are exactly `{0, .., len-1}`.
    pub fn assert_contiguous(&self) {
        if cfg!(debug_assertions) {
            let mut orders: Vec<_> = self.entries.values().map(|e| e.order).collect();
            orders.sort_unstable();
            debug_assert!(
                orders.iter().copied().eq(0..self.entries.len()),
                "registry orders not a contiguous permutation: {orders:?}"
            );
        }
    }
}
