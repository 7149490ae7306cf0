//! Turns a raw click or drag into cursor and per-slot predictions.
//!
//! Nothing here mutates state. The predictions are a forward simulation of
//! the host's stack arithmetic; the host stays authoritative and the deferred
//! commit re-reads the settled container instead of trusting `new_item`.

use super::event::SlotChange;
use super::raw::{InventoryAction, RawClick, RawDrag};
use crate::inventory::InventoryId;
use crate::item::ItemStack;

/// A grid cell backed by a virtual inventory slot.
#[derive(Debug, Clone, PartialEq)]
pub struct VirtualCell {
    pub inventory: InventoryId,
    pub virtual_slot: usize,
    /// What the virtual inventory currently stores for that slot.
    pub item: Option<ItemStack>,
}

/// Read-only view of a Gui's grid.
pub trait CellMap {
    /// Number of physical cells the Gui owns. Raw slots past it belong to the viewer.
    fn grid_size(&self) -> usize;

    fn virtual_cell(&self, physical: usize) -> Option<VirtualCell>;

    fn physical_item(&self, physical: usize) -> Option<ItemStack>;
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Translation {
    pub cancelled: bool,
    pub new_cursor: Option<ItemStack>,
    pub slot_changes: Vec<SlotChange>,
    /// Grid cells the interaction writes to that no virtual inventory backs.
    pub unmapped_cells: Vec<usize>,
}

struct Pending<'m, M: CellMap + ?Sized> {
    cells: &'m M,
    out: Translation,
}

impl<'m, M: CellMap + ?Sized> Pending<'m, M> {
    fn new(cells: &'m M, cursor: Option<ItemStack>) -> Self {
        Self {
            cells,
            out: Translation {
                new_cursor: cursor,
                ..Translation::default()
            },
        }
    }

    fn cursor(&mut self, cursor: Option<ItemStack>) {
        self.out.new_cursor = ItemStack::normalized(cursor);
    }

    fn set(&mut self, physical: usize, new_item: Option<ItemStack>) {
        if physical >= self.cells.grid_size() {
            return;
        }
        match self.cells.virtual_cell(physical) {
            Some(cell) => self.out.slot_changes.push(SlotChange {
                physical_slot: physical,
                virtual_slot: cell.virtual_slot,
                old_item: cell.item,
                new_item: ItemStack::normalized(new_item),
                inventory: cell.inventory,
            }),
            None => self.out.unmapped_cells.push(physical),
        }
    }

    /// Shift-click from the viewer's storage: top up similar stacks, then the first empty cell.
    fn spread_into_grid(&mut self, moving: &ItemStack) {
        let grid = self.cells.grid_size();
        let mut remaining = u32::from(moving.count);

        for physical in 0..grid {
            if remaining == 0 {
                break;
            }
            if let Some(existing) = self.cells.physical_item(physical)
                && existing.is_similar(moving)
                && !existing.is_full()
            {
                let room = u32::from(existing.max_stack - existing.count);
                let moved = room.min(remaining);
                remaining -= moved;
                self.set(physical, resized(&existing, u32::from(existing.count) + moved));
            }
        }

        if remaining > 0
            && let Some(empty) = (0..grid).find(|&i| self.cells.physical_item(i).is_none())
        {
            self.set(empty, resized(moving, remaining));
        }
    }

    fn finish(self) -> Translation {
        self.out
    }
}

fn resized(item: &ItemStack, count: u32) -> Option<ItemStack> {
    if count == 0 {
        return None;
    }
    Some(item.with_count(count.min(u32::from(u16::MAX)) as u16))
}

fn cancelled(click_cursor: &Option<ItemStack>) -> Translation {
    Translation {
        cancelled: true,
        new_cursor: click_cursor.clone(),
        ..Translation::default()
    }
}

pub fn translate_click<M: CellMap + ?Sized>(click: &RawClick, cells: &M) -> Translation {
    use InventoryAction::*;

    let mut pending = Pending::new(cells, click.cursor.clone());
    let cursor = click.cursor.as_ref();
    let current = click.current.as_ref();

    match click.action {
        CloneStack => {
            pending.cursor(current.map(|item| item.with_count(item.max_stack)));
        }
        DropAllCursor => pending.cursor(None),
        DropOneCursor => {
            pending.cursor(cursor.and_then(|held| resized(held, u32::from(held.count).saturating_sub(1))));
        }
        DropAllSlot => {
            let Some(slot) = click.slot else {
                return cancelled(&click.cursor);
            };
            pending.set(slot, None);
        }
        DropOneSlot => {
            let (Some(slot), Some(item)) = (click.slot, current) else {
                return cancelled(&click.cursor);
            };
            pending.set(slot, resized(item, u32::from(item.count).saturating_sub(1)));
        }
        PickupAll => {
            let Some(slot) = click.slot else {
                return cancelled(&click.cursor);
            };
            pending.cursor(click.current.clone());
            pending.set(slot, None);
        }
        PickupHalf => {
            let (Some(slot), Some(item)) = (click.slot, current) else {
                return cancelled(&click.cursor);
            };
            let taken = u32::from(item.count) / 2;
            pending.cursor(resized(item, taken));
            pending.set(slot, resized(item, u32::from(item.count) - taken));
        }
        PickupSome => {
            let (Some(slot), Some(held), Some(item)) = (click.slot, cursor, current) else {
                return cancelled(&click.cursor);
            };
            if !held.is_similar(item) {
                return cancelled(&click.cursor);
            }
            let combined = u32::from(held.count) + u32::from(item.count);
            let picked = combined.min(u32::from(item.max_stack));
            pending.cursor(resized(item, picked));
            pending.set(slot, resized(item, combined - picked));
        }
        PickupOne => {
            let (Some(slot), Some(item)) = (click.slot, current) else {
                return cancelled(&click.cursor);
            };
            let new_cursor = match cursor {
                None => resized(item, 1),
                Some(held) if held.is_similar(item) => resized(held, u32::from(held.count) + 1),
                Some(_) => return cancelled(&click.cursor),
            };
            pending.cursor(new_cursor);
            pending.set(slot, resized(item, u32::from(item.count).saturating_sub(1)));
        }
        SwapWithCursor => {
            let Some(slot) = click.slot else {
                return cancelled(&click.cursor);
            };
            pending.cursor(click.current.clone());
            pending.set(slot, click.cursor.clone());
        }
        PlaceAll => {
            let (Some(slot), Some(held)) = (click.slot, cursor) else {
                return cancelled(&click.cursor);
            };
            let placed = match current {
                None => Some(held.clone()),
                Some(item) if item.is_similar(held) => {
                    resized(item, u32::from(item.count) + u32::from(held.count))
                }
                Some(_) => return cancelled(&click.cursor),
            };
            pending.cursor(None);
            pending.set(slot, placed);
        }
        PlaceSome => {
            let (Some(slot), Some(held), Some(item)) = (click.slot, cursor, current) else {
                return cancelled(&click.cursor);
            };
            if !held.is_similar(item) {
                return cancelled(&click.cursor);
            }
            let combined = u32::from(held.count) + u32::from(item.count);
            let placed = combined.min(u32::from(item.max_stack));
            pending.cursor(resized(held, combined - placed));
            pending.set(slot, resized(item, placed));
        }
        PlaceOne => {
            let (Some(slot), Some(held)) = (click.slot, cursor) else {
                return cancelled(&click.cursor);
            };
            let placed = match current {
                None => resized(held, 1),
                Some(item) if item.is_similar(held) => resized(item, u32::from(item.count) + 1),
                Some(_) => return cancelled(&click.cursor),
            };
            pending.cursor(resized(held, u32::from(held.count).saturating_sub(1)));
            pending.set(slot, placed);
        }
        HotbarSwap => {
            let Some(slot) = click.slot else {
                return cancelled(&click.cursor);
            };
            if click.hotbar_button.is_some() {
                pending.set(slot, click.hotbar_item.clone());
            }
        }
        MoveToOtherInventory => {
            let Some(slot) = click.slot else {
                return cancelled(&click.cursor);
            };
            if slot < cells.grid_size() {
                pending.set(slot, None);
            } else if let Some(moving) = current {
                pending.spread_into_grid(moving);
            }
        }
        Nothing | CollectToCursor | Drag | Unknown => return cancelled(&click.cursor),
    }

    pending.finish()
}

pub fn translate_drag<M: CellMap + ?Sized>(drag: &RawDrag, cells: &M) -> Translation {
    let mut pending = Pending::new(cells, drag.new_cursor.clone());
    for (slot, item) in &drag.new_items {
        pending.set(*slot, item.clone());
    }
    pending.finish()
}
