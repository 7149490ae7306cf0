use crate::gui::BindingId;
use crate::inventory::{InventoryId, InventoryStore};
use crate::item::ItemStack;

/// Mirrors one slot of a virtual inventory.
///
/// The slot index moves when the owning binding scrolls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualSlotItem {
    inventory: InventoryId,
    binding: BindingId,
    slot: usize,
}

impl VirtualSlotItem {
    pub fn new(inventory: InventoryId, binding: BindingId, slot: usize) -> Self {
        Self {
            inventory,
            binding,
            slot,
        }
    }

    pub fn inventory(&self) -> InventoryId {
        self.inventory
    }

    pub fn binding(&self) -> BindingId {
        self.binding
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    pub(crate) fn set_slot(&mut self, slot: usize) {
        self.slot = slot;
    }

    pub fn display_item(&self, inventories: &InventoryStore) -> Option<ItemStack> {
        inventories.get(self.inventory)?.get_item(self.slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::VirtualInventory;

    #[test]
    fn shows_the_mirrored_slot() {
        let mut store = InventoryStore::new();
        let id = store.insert(VirtualInventory::from_items(vec![
            None,
            Some(ItemStack::new("gold", 4)),
        ]));
        let mut item = VirtualSlotItem::new(id, BindingId(0), 0);

        assert_eq!(item.display_item(&store), None);

        item.set_slot(1);
        assert_eq!(item.display_item(&store).unwrap().count, 4);
    }

    #[test]
    fn missing_inventory_shows_nothing() {
        let store = InventoryStore::new();
        let item = VirtualSlotItem::new(InventoryId(7), BindingId(0), 0);

        assert_eq!(item.display_item(&store), None);
    }
}
