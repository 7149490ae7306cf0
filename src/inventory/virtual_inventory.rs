use std::fmt;

use super::hooks::{InventoryHooks, NoHooks};
use crate::gui::{BindingId, GuiId};
use crate::interaction::InteractionEvent;
use crate::item::ItemStack;

/// Key of a virtual inventory inside an [`InventoryStore`](super::InventoryStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InventoryId(pub u64);

/// A Gui showing this inventory through one of its bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observer {
    pub gui: GuiId,
    pub binding: BindingId,
}

/// Fixed-size store of item stacks, independent of any grid.
pub struct VirtualInventory {
    items: Vec<Option<ItemStack>>,
    observers: Vec<Observer>,
    hooks: Box<dyn InventoryHooks>,
}

impl VirtualInventory {
    pub fn new(size: usize) -> Self {
        Self::with_hooks(size, NoHooks)
    }

    pub fn with_hooks(size: usize, hooks: impl InventoryHooks + 'static) -> Self {
        Self {
            items: vec![None; size],
            observers: Vec::new(),
            hooks: Box::new(hooks),
        }
    }

    /// Seeds the inventory from existing contents; the size is the length of `items`.
    pub fn from_items(items: Vec<Option<ItemStack>>) -> Self {
        let mut inventory = Self::new(items.len());
        for (slot, item) in items.into_iter().enumerate() {
            inventory.store(slot, item);
        }
        inventory
    }

    pub fn size(&self) -> usize {
        self.items.len()
    }

    /// Copy of the stack at `slot`; `None` for empty or out-of-range slots.
    pub fn get_item(&self, slot: usize) -> Option<ItemStack> {
        self.items.get(slot).cloned().flatten()
    }

    pub fn items(&self) -> impl Iterator<Item = Option<&ItemStack>> + '_ {
        self.items.iter().map(Option::as_ref)
    }

    /// Writes `slot` without notifying observers. Returns false for out-of-range slots.
    pub(crate) fn store(&mut self, slot: usize, item: Option<ItemStack>) -> bool {
        let Some(target) = self.items.get_mut(slot) else {
            return false;
        };
        *target = ItemStack::normalized(item);
        true
    }

    pub fn register_gui(&mut self, gui: GuiId, binding: BindingId) {
        self.observers.push(Observer { gui, binding });
    }

    /// Removes every registration of `gui`, whatever binding it used.
    pub fn unregister_gui(&mut self, gui: GuiId) {
        self.observers.retain(|observer| observer.gui != gui);
    }

    pub fn observers(&self) -> &[Observer] {
        &self.observers
    }

    pub fn contains_slots(&self, event: &InteractionEvent) -> bool {
        event
            .slot_changes
            .iter()
            .all(|change| change.virtual_slot < self.size())
    }

    pub(crate) fn pre_update(&mut self, event: &InteractionEvent) {
        self.hooks.on_pre_update(event);
    }

    pub(crate) fn post_update(&mut self, event: &InteractionEvent) {
        self.hooks.on_post_update(event);
    }
}

impl fmt::Debug for VirtualInventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualInventory")
            .field("items", &self.items)
            .field("observers", &self.observers)
            .finish_non_exhaustive()
    }
}
