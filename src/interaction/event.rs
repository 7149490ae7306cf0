use super::raw::{CancelToken, ClickType, InventoryAction};
use super::translate::Translation;
use crate::gui::GuiId;
use crate::host::ViewerId;
use crate::inventory::InventoryId;
use crate::item::ItemStack;

/// Predicted effect of one interaction on one virtual slot.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotChange {
    pub physical_slot: usize,
    pub virtual_slot: usize,
    pub old_item: Option<ItemStack>,
    pub new_item: Option<ItemStack>,
    pub inventory: InventoryId,
}

impl SlotChange {
    pub fn is_add(&self) -> bool {
        self.old_item.is_none() && self.new_item.is_some()
    }

    pub fn is_remove(&self) -> bool {
        self.old_item.is_some() && self.new_item.is_none()
    }

    pub fn is_update(&self) -> bool {
        match (&self.old_item, &self.new_item) {
            (Some(old), Some(new)) => old.is_similar(new),
            _ => false,
        }
    }

    pub fn is_swap(&self) -> bool {
        match (&self.old_item, &self.new_item) {
            (Some(old), Some(new)) => !old.is_similar(new),
            _ => false,
        }
    }
}

/// A raw interaction normalised against one Gui's layout.
#[derive(Debug, Clone)]
pub struct InteractionEvent {
    pub gui: GuiId,
    pub viewer: ViewerId,
    pub action: InventoryAction,
    pub click: ClickType,
    pub old_cursor: Option<ItemStack>,
    pub new_cursor: Option<ItemStack>,
    pub slot_changes: Vec<SlotChange>,
    cancel: CancelToken,
}

impl InteractionEvent {
    /// Event carrying the cursor and slot changes of `translation`, with a fresh
    /// cancellation flag that starts out as `translation.cancelled`.
    pub fn new(
        gui: GuiId,
        viewer: ViewerId,
        action: InventoryAction,
        click: ClickType,
        old_cursor: Option<ItemStack>,
        translation: Translation,
    ) -> Self {
        let cancel = CancelToken::new();
        cancel.set_cancelled(translation.cancelled);
        Self {
            gui,
            viewer,
            action,
            click,
            old_cursor,
            new_cursor: translation.new_cursor,
            slot_changes: translation.slot_changes,
            cancel,
        }
    }

    /// Shares `cancel` with whoever handed it out, usually the host's raw event.
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Copy of this event restricted to the changes of one inventory.
    /// The copy shares the cancellation flag.
    pub fn for_inventory(&self, inventory: InventoryId) -> Self {
        Self {
            slot_changes: self
                .slot_changes
                .iter()
                .filter(|change| change.inventory == inventory)
                .cloned()
                .collect(),
            ..self.clone()
        }
    }

    /// Distinct inventories touched, in order of first appearance.
    pub fn inventories(&self) -> Vec<InventoryId> {
        let mut seen = Vec::new();
        for change in &self.slot_changes {
            if !seen.contains(&change.inventory) {
                seen.push(change.inventory);
            }
        }
        seen
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn set_cancelled(&self, cancelled: bool) {
        self.cancel.set_cancelled(cancelled);
    }

    pub fn is_shift_click(&self) -> bool {
        self.click.is_shift_click()
    }

    pub fn is_left_click(&self) -> bool {
        self.click.is_left_click()
    }

    pub fn is_right_click(&self) -> bool {
        self.click.is_right_click()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(old: Option<ItemStack>, new: Option<ItemStack>) -> SlotChange {
        SlotChange {
            physical_slot: 0,
            virtual_slot: 0,
            old_item: old,
            new_item: new,
            inventory: InventoryId(0),
        }
    }

    #[test]
    fn slot_change_classification() {
        let dirt = ItemStack::new("dirt", 4);
        let stone = ItemStack::new("stone", 4);

        assert!(change(None, Some(dirt.clone())).is_add());
        assert!(change(Some(dirt.clone()), None).is_remove());
        assert!(change(Some(dirt.clone()), Some(dirt.with_count(9))).is_update());
        assert!(change(Some(dirt.clone()), Some(stone.clone())).is_swap());

        let noop = change(None, None);
        assert!(!noop.is_add() && !noop.is_remove() && !noop.is_update() && !noop.is_swap());
    }

    #[test]
    fn for_inventory_filters_changes_and_shares_cancellation() {
        let mut a = change(None, Some(ItemStack::new("dirt", 1)));
        a.inventory = InventoryId(1);
        let mut b = a.clone();
        b.inventory = InventoryId(2);

        let event = InteractionEvent::new(
            GuiId(0),
            ViewerId(0),
            InventoryAction::PlaceSome,
            ClickType::Left,
            None,
            Translation {
                slot_changes: vec![a, b],
                ..Translation::default()
            },
        );
        assert_eq!(event.inventories(), vec![InventoryId(1), InventoryId(2)]);

        let only_first = event.for_inventory(InventoryId(1));
        assert_eq!(only_first.slot_changes.len(), 1);

        only_first.set_cancelled(true);
        assert!(event.is_cancelled());
    }

    #[test]
    fn event_takes_cursor_changes_and_cancellation_from_the_translation() {
        let translation = Translation {
            cancelled: true,
            new_cursor: Some(ItemStack::new("dirt", 2)),
            slot_changes: vec![change(None, Some(ItemStack::new("dirt", 1)))],
            unmapped_cells: vec![4],
        };

        let event = InteractionEvent::new(
            GuiId(0),
            ViewerId(0),
            InventoryAction::PlaceOne,
            ClickType::Right,
            Some(ItemStack::new("dirt", 3)),
            translation,
        );
        assert!(event.is_cancelled());
        assert_eq!(event.new_cursor, Some(ItemStack::new("dirt", 2)));
        assert_eq!(event.slot_changes.len(), 1);

        let shared = CancelToken::new();
        let event = event.with_cancel_token(shared.clone());
        assert!(!event.is_cancelled());
        shared.cancel();
        assert!(event.is_cancelled());
    }
}
