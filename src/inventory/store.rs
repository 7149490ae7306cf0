use std::collections::HashMap;

use super::virtual_inventory::{InventoryId, VirtualInventory};

/// Owns every virtual inventory; they outlive the Guis that show them.
#[derive(Debug, Default)]
pub struct InventoryStore {
    inventories: HashMap<InventoryId, VirtualInventory>,
    next_id: u64,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, inventory: VirtualInventory) -> InventoryId {
        let id = InventoryId(self.next_id);
        self.next_id += 1;
        self.inventories.insert(id, inventory);
        id
    }

    pub fn remove(&mut self, id: InventoryId) -> Option<VirtualInventory> {
        self.inventories.remove(&id)
    }

    pub fn get(&self, id: InventoryId) -> Option<&VirtualInventory> {
        self.inventories.get(&id)
    }

    pub fn get_mut(&mut self, id: InventoryId) -> Option<&mut VirtualInventory> {
        self.inventories.get_mut(&id)
    }

    pub fn contains(&self, id: InventoryId) -> bool {
        self.inventories.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.inventories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inventories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_never_reused() {
        let mut store = InventoryStore::new();
        let first = store.insert(VirtualInventory::new(1));
        store.remove(first);
        let second = store.insert(VirtualInventory::new(1));

        assert_ne!(first, second);
        assert!(!store.contains(first));
        assert_eq!(store.len(), 1);
    }
}
