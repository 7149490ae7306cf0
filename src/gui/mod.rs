//! Grid compositions of item providers.

pub mod builder;
pub mod error;

use std::collections::BTreeMap;

use crate::host::{SlotContainer, ViewerId};
use crate::interaction::{CellMap, VirtualCell};
use crate::inventory::{InventoryId, InventoryStore};
use crate::item::ItemStack;
use crate::provider::ItemProvider;
use crate::scheduler::TaskHandle;

pub use builder::{Direction, GuiBuilder};
pub use error::GuiBuildError;

/// Cells per row of every Gui.
pub const ROW_WIDTH: usize = 9;
/// Tallest Gui a host container can show.
pub const MAX_ROWS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GuiId(pub u64);

/// Per-Gui id of one virtual inventory binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingId(pub u32);

/// Cells showing one virtual inventory, in virtual slot order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryBinding {
    pub inventory: InventoryId,
    pub cells: Vec<usize>,
}

pub struct Gui {
    id: GuiId,
    viewer: ViewerId,
    title: Option<String>,
    rows: usize,
    cells: Vec<Option<ItemProvider>>,
    bindings: BTreeMap<BindingId, InventoryBinding>,
    container: Box<dyn SlotContainer>,
    allow_close: bool,
}

impl Gui {
    pub(crate) fn new(
        id: GuiId,
        layout: builder::CompiledGui,
        container: Box<dyn SlotContainer>,
    ) -> Self {
        Self {
            id,
            viewer: layout.viewer,
            title: layout.title,
            rows: layout.rows,
            cells: layout.cells,
            bindings: layout.bindings,
            container,
            allow_close: layout.allow_close,
        }
    }

    pub fn id(&self) -> GuiId {
        self.id
    }

    pub fn viewer(&self) -> ViewerId {
        self.viewer
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn allow_close(&self) -> bool {
        self.allow_close
    }

    pub fn container(&self) -> &dyn SlotContainer {
        self.container.as_ref()
    }

    pub fn provider(&self, index: usize) -> Option<&ItemProvider> {
        self.cells.get(index)?.as_ref()
    }

    pub(crate) fn provider_mut(&mut self, index: usize) -> Option<&mut ItemProvider> {
        self.cells.get_mut(index)?.as_mut()
    }

    pub fn bindings(&self) -> impl Iterator<Item = (BindingId, &InventoryBinding)> + '_ {
        self.bindings.iter().map(|(id, binding)| (*id, binding))
    }

    pub fn binding(&self, binding: BindingId) -> Option<&InventoryBinding> {
        self.bindings.get(&binding)
    }

    /// Distinct inventories this Gui shows.
    pub fn inventories(&self) -> Vec<InventoryId> {
        let mut seen: Vec<InventoryId> = Vec::new();
        for binding in self.bindings.values() {
            if !seen.contains(&binding.inventory) {
                seen.push(binding.inventory);
            }
        }
        seen
    }

    pub(crate) fn open(&mut self) {
        self.container.open(self.viewer);
    }

    pub(crate) fn close_container(&mut self) {
        self.container.close(self.viewer);
    }

    pub(crate) fn container_mut(&mut self) -> &mut dyn SlotContainer {
        self.container.as_mut()
    }

    /// What the provider at `index` shows right now; `None` when no provider is bound.
    pub fn display_item(&self, index: usize, inventories: &InventoryStore) -> Option<Option<ItemStack>> {
        let provider = self.provider(index)?;
        Some(self.display_of(provider, inventories))
    }

    fn display_of(&self, provider: &ItemProvider, inventories: &InventoryStore) -> Option<ItemStack> {
        match provider {
            ItemProvider::Simple(item) => item.display_item(),
            ItemProvider::Command(item) => item.display_item(),
            ItemProvider::Cycle(item) => item.display_item(),
            ItemProvider::AutoCycle(item) => item.display_item(),
            ItemProvider::Async(item) => match item.resolved() {
                Some(resolved) => self.display_of(resolved, inventories),
                None => item.placeholder().cloned(),
            },
            ItemProvider::Scroll(item) => {
                item.display_item(self.can_scroll(item.binding(), item.delta(), inventories))
            }
            ItemProvider::VirtualSlot(item) => item.display_item(inventories),
            ItemProvider::Custom(item) => item.display_item(),
        }
    }

    /// Rewrites every cell that has a provider; cells without one keep their contents.
    pub fn refresh_all(&mut self, inventories: &InventoryStore) {
        for index in 0..self.cells.len() {
            self.refresh_index(index, inventories);
        }
    }

    pub fn refresh_index(&mut self, index: usize, inventories: &InventoryStore) {
        if let Some(item) = self.display_item(index, inventories) {
            self.container.set_item(index, item);
        }
    }

    pub fn refresh_binding(&mut self, binding: BindingId, inventories: &InventoryStore) {
        let Some(cells) = self.bindings.get(&binding).map(|b| b.cells.clone()) else {
            return;
        };
        for index in cells {
            self.refresh_index(index, inventories);
        }
    }

    /// Refreshes the cells of `binding` currently showing virtual slot `slot`.
    pub fn refresh_virtual_slot(&mut self, binding: BindingId, slot: usize, inventories: &InventoryStore) {
        let Some(cells) = self.bindings.get(&binding).map(|b| b.cells.clone()) else {
            return;
        };
        for index in cells {
            let shows_slot = self
                .provider(index)
                .and_then(ItemProvider::as_virtual_slot)
                .is_some_and(|item| item.slot() == slot);
            if shows_slot {
                self.refresh_index(index, inventories);
            }
        }
    }

    fn slots_of(&self, binding: BindingId) -> Vec<usize> {
        let Some(binding) = self.bindings.get(&binding) else {
            return Vec::new();
        };
        binding
            .cells
            .iter()
            .filter_map(|&index| self.provider(index)?.as_virtual_slot())
            .map(|item| item.slot())
            .collect()
    }

    /// First and last virtual slot shown through `binding`.
    pub fn scroll_window(&self, binding: BindingId) -> Option<(usize, usize)> {
        let slots = self.slots_of(binding);
        Some((*slots.first()?, *slots.last()?))
    }

    pub fn can_scroll(&self, binding: BindingId, delta: i32, inventories: &InventoryStore) -> bool {
        let Some((first, last)) = self.scroll_window(binding) else {
            return false;
        };
        let Some(size) = self.binding_inventory_size(binding, inventories) else {
            return false;
        };
        if delta > 0 {
            last + 1 < size
        } else if delta < 0 {
            first > 0
        } else {
            false
        }
    }

    fn binding_inventory_size(&self, binding: BindingId, inventories: &InventoryStore) -> Option<usize> {
        let inventory = self.bindings.get(&binding)?.inventory;
        Some(inventories.get(inventory)?.size())
    }

    /// Slides the window of `binding` by `delta`, clamped at both ends of the
    /// inventory. Returns whether anything moved.
    pub fn handle_inventory_scroll(
        &mut self,
        binding: BindingId,
        delta: i32,
        inventories: &InventoryStore,
    ) -> bool {
        if !self.can_scroll(binding, delta, inventories) {
            return false;
        }
        let (Some((first, last)), Some(size)) = (
            self.scroll_window(binding),
            self.binding_inventory_size(binding, inventories),
        ) else {
            return false;
        };

        let delta = i64::from(delta);
        let shift = if delta > 0 {
            delta.min((size - 1 - last) as i64)
        } else {
            delta.max(-(first as i64))
        };

        let cells = self.bindings.get(&binding).map(|b| b.cells.clone()).unwrap_or_default();
        for &index in &cells {
            if let Some(ItemProvider::VirtualSlot(item)) = self.provider_mut(index) {
                let slot = (item.slot() as i64 + shift).max(0) as usize;
                item.set_slot(slot);
            }
        }

        self.refresh_binding(binding, inventories);
        self.refresh_scroll_controls(binding, inventories);
        true
    }

    fn refresh_scroll_controls(&mut self, binding: BindingId, inventories: &InventoryStore) {
        let controls: Vec<usize> = self
            .cells
            .iter()
            .enumerate()
            .filter(|(_, provider)| {
                matches!(provider, Some(ItemProvider::Scroll(item)) if item.binding() == binding)
            })
            .map(|(index, _)| index)
            .collect();
        for index in controls {
            self.refresh_index(index, inventories);
        }
    }

    /// Indices of async cells still waiting on their future.
    pub(crate) fn pending_async_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, provider)| matches!(provider, Some(ItemProvider::Async(item)) if item.is_pending()))
            .map(|(index, _)| index)
            .collect()
    }

    /// Tears every provider down and returns the timers the scheduler must drop.
    pub(crate) fn destroy_providers(&mut self) -> Vec<TaskHandle> {
        let mut timers = Vec::new();
        for provider in self.cells.iter_mut().flatten() {
            destroy(provider, &mut timers);
        }
        timers
    }

    pub fn cells<'a>(&'a self, inventories: &'a InventoryStore) -> GuiCells<'a> {
        GuiCells {
            gui: self,
            inventories,
        }
    }
}

fn destroy(provider: &mut ItemProvider, timers: &mut Vec<TaskHandle>) {
    match provider {
        ItemProvider::AutoCycle(item) => timers.extend(item.take_timer()),
        ItemProvider::Async(item) => {
            item.abandon();
            if let Some(resolved) = item.resolved_mut() {
                destroy(resolved, timers);
            }
        }
        ItemProvider::Custom(item) => item.destroy(),
        _ => {}
    }
}

/// A Gui's grid as seen by the interaction translator.
pub struct GuiCells<'a> {
    gui: &'a Gui,
    inventories: &'a InventoryStore,
}

impl CellMap for GuiCells<'_> {
    fn grid_size(&self) -> usize {
        self.gui.size()
    }

    fn virtual_cell(&self, physical: usize) -> Option<VirtualCell> {
        let item = self.gui.provider(physical)?.as_virtual_slot()?;
        let stored = self
            .inventories
            .get(item.inventory())
            .and_then(|inventory| inventory.get_item(item.slot()));
        Some(VirtualCell {
            inventory: item.inventory(),
            virtual_slot: item.slot(),
            item: stored,
        })
    }

    fn physical_item(&self, physical: usize) -> Option<ItemStack> {
        self.gui.container.item(physical)
    }
}
