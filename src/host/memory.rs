use super::{Host, SlotContainer, ViewerId};
use crate::item::ItemStack;

/// Container backed by a plain vector of slots.
#[derive(Debug, Clone, Default)]
pub struct MemoryContainer {
    pub title: Option<String>,
    slots: Vec<Option<ItemStack>>,
    viewers: Vec<ViewerId>,
}

impl MemoryContainer {
    pub fn new(title: Option<&str>, size: usize) -> Self {
        Self {
            title: title.map(str::to_owned),
            slots: vec![None; size],
            viewers: Vec::new(),
        }
    }
}

impl SlotContainer for MemoryContainer {
    fn size(&self) -> usize {
        self.slots.len()
    }

    fn item(&self, slot: usize) -> Option<ItemStack> {
        self.slots.get(slot).cloned().flatten()
    }

    fn set_item(&mut self, slot: usize, item: Option<ItemStack>) {
        if let Some(target) = self.slots.get_mut(slot) {
            *target = ItemStack::normalized(item);
        }
    }

    fn open(&mut self, viewer: ViewerId) {
        if !self.viewers.contains(&viewer) {
            self.viewers.push(viewer);
        }
    }

    fn close(&mut self, viewer: ViewerId) {
        self.viewers.retain(|v| *v != viewer);
    }

    fn viewers(&self) -> Vec<ViewerId> {
        self.viewers.clone()
    }
}

/// Host that keeps everything in memory. Used headless and in tests.
#[derive(Debug, Default)]
pub struct MemoryHost {
    /// Every command dispatched so far, in order.
    pub dispatched: Vec<(ViewerId, String)>,
    pub containers_created: usize,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Host for MemoryHost {
    fn create_container(&mut self, title: Option<&str>, rows: usize) -> Box<dyn SlotContainer> {
        self.containers_created += 1;
        Box::new(MemoryContainer::new(title, rows * 9))
    }

    fn dispatch_command(&mut self, viewer: ViewerId, command: &str) {
        self.dispatched.push((viewer, command.to_owned()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_container_normalizes_empty_items() {
        let mut container = MemoryContainer::new(None, 9);
        container.set_item(0, Some(ItemStack::new("dirt", 0)));

        assert_eq!(container.item(0), None);
    }

    #[test]
    fn memory_container_ignores_out_of_range_slots() {
        let mut container = MemoryContainer::new(None, 9);
        container.set_item(9, Some(ItemStack::new("dirt", 1)));

        assert_eq!(container.item(9), None);
        assert_eq!(container.size(), 9);
    }

    #[test]
    fn memory_container_tracks_viewers_once() {
        let mut container = MemoryContainer::new(Some("Chest"), 27);
        container.open(ViewerId(1));
        container.open(ViewerId(1));
        assert_eq!(container.viewers(), vec![ViewerId(1)]);

        container.close(ViewerId(1));
        assert!(container.viewers().is_empty());
    }

    #[test]
    fn memory_host_records_commands() {
        let mut host = MemoryHost::new();
        let container = host.create_container(Some("Shop"), 3);
        host.dispatch_command(ViewerId(7), "warp spawn");

        assert_eq!(container.size(), 27);
        assert_eq!(host.dispatched, vec![(ViewerId(7), "warp spawn".to_owned())]);
    }
}
