//! Routing raw host interactions to providers and virtual inventories.

use bevy::prelude::*;

use super::GuiRuntime;
use crate::gui::GuiId;
use crate::host::{Host, ViewerId};
use crate::interaction::{
    CancelToken, ClickType, InteractionEvent, InventoryAction, RawClick, RawDrag, SlotChange,
    Translation, translate_click, translate_drag,
};
use crate::item::ItemStack;
use crate::provider::{ItemProvider, ProviderAction};

/// What the host should do with a raw interaction it reported.
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub gui: GuiId,
    /// Set once the host must not apply its default mutation. Stays live until
    /// the deferred commit runs.
    pub cancel: CancelToken,
    /// Changes forwarded to virtual inventories.
    pub slot_changes: Vec<SlotChange>,
    /// Cursor the host will leave behind when it applies the interaction.
    pub new_cursor: Option<ItemStack>,
}

impl DispatchOutcome {
    fn new(gui: GuiId, cursor: Option<ItemStack>) -> Self {
        Self {
            gui,
            cancel: CancelToken::new(),
            slot_changes: Vec::new(),
            new_cursor: cursor,
        }
    }

    fn rejected(self) -> Self {
        self.cancel.cancel();
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl<H: Host> GuiRuntime<H> {
    /// Handles a click by `viewer` in the Gui they have open.
    /// Returns `None` when no Gui listens for that viewer.
    pub fn dispatch_click(&mut self, viewer: ViewerId, click: &RawClick) -> Option<DispatchOutcome> {
        let gui = self.gui_for(viewer)?;
        Some(self.on_click(gui, viewer, click))
    }

    /// Handles a drag by `viewer` in the Gui they have open.
    pub fn dispatch_drag(&mut self, viewer: ViewerId, drag: &RawDrag) -> Option<DispatchOutcome> {
        let gui = self.gui_for(viewer)?;
        Some(self.on_drag(gui, viewer, drag))
    }

    /// The host closed `viewer`'s container. Closes the Gui when it allows it.
    pub fn dispatch_closed(&mut self, viewer: ViewerId) -> bool {
        let Some(id) = self.gui_for(viewer) else {
            return false;
        };
        if !self.guis.get(&id).is_some_and(|gui| gui.allow_close()) {
            debug!("Gui {:?} ignored a close from {:?}", id, viewer);
            return false;
        }
        self.close_gui(id)
    }

    fn on_click(&mut self, id: GuiId, viewer: ViewerId, click: &RawClick) -> DispatchOutcome {
        let outcome = DispatchOutcome::new(id, click.cursor.clone());
        let Some(gui) = self.guis.get(&id) else {
            return outcome;
        };
        let Some(slot) = click.slot else {
            return outcome;
        };

        if slot >= gui.size() {
            if click.action == InventoryAction::MoveToOtherInventory {
                return self.on_shift_in(id, viewer, click, outcome);
            }
            return outcome;
        }

        match gui.provider(slot) {
            None => outcome,
            Some(ItemProvider::VirtualSlot(item)) => {
                let inventory = item.inventory();
                let translation = translate_click(click, &gui.cells(&self.inventories));
                if self.settings.log_interactions {
                    debug!("Gui {:?} slot {} {:?}: {:?}", id, slot, click.action, translation);
                }
                if translation.cancelled {
                    return outcome.rejected();
                }
                let mut outcome = outcome;
                let event = build_event(id, viewer, click.action, click.click, click.cursor.clone(), translation, &outcome);
                let event = event.for_inventory(inventory);
                outcome.new_cursor = event.new_cursor.clone();
                outcome.slot_changes = event.slot_changes.clone();
                self.handle_click(inventory, event);
                outcome
            }
            Some(provider) => {
                if self.settings.log_interactions {
                    debug!("Gui {:?} slot {} clicked a {} provider", id, slot, provider.kind());
                }
                let outcome = outcome.rejected();
                let action = self
                    .guis
                    .get_mut(&id)
                    .and_then(|gui| gui.provider_mut(slot))
                    .and_then(|provider| provider.on_click(click));
                if let Some(action) = action {
                    self.apply_provider_action(id, viewer, action);
                }
                self.refresh_index(id, slot);
                outcome
            }
        }
    }

    /// Shift-click from the viewer's own storage into the grid.
    fn on_shift_in(
        &mut self,
        id: GuiId,
        viewer: ViewerId,
        click: &RawClick,
        mut outcome: DispatchOutcome,
    ) -> DispatchOutcome {
        let Some(gui) = self.guis.get(&id) else {
            return outcome;
        };
        let translation = translate_click(click, &gui.cells(&self.inventories));
        if translation.cancelled || !translation.unmapped_cells.is_empty() {
            debug!("Rejected shift-click into gui {:?}: lands outside virtual slots", id);
            return outcome.rejected();
        }

        let event = build_event(id, viewer, click.action, click.click, click.cursor.clone(), translation, &outcome);
        outcome.slot_changes = event.slot_changes.clone();
        for inventory in event.inventories() {
            self.handle_click(inventory, event.for_inventory(inventory));
        }
        outcome
    }

    fn on_drag(&mut self, id: GuiId, viewer: ViewerId, drag: &RawDrag) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::new(id, drag.new_cursor.clone());
        let Some(gui) = self.guis.get(&id) else {
            return outcome;
        };

        let touches_plain_cell = drag
            .new_items
            .keys()
            .filter(|slot| **slot < gui.size())
            .any(|slot| gui.provider(*slot).and_then(ItemProvider::as_virtual_slot).is_none());
        if touches_plain_cell {
            debug!("Rejected drag in gui {:?}: touches a cell without a virtual slot", id);
            return outcome.rejected();
        }

        let translation = translate_drag(drag, &gui.cells(&self.inventories));
        let event = build_event(
            id,
            viewer,
            InventoryAction::Drag,
            ClickType::Unknown,
            drag.old_cursor.clone(),
            translation,
            &outcome,
        );
        match event.inventories().as_slice() {
            [inventory] => {
                let inventory = *inventory;
                outcome.slot_changes = event.slot_changes.clone();
                self.handle_click(inventory, event);
            }
            [] => {}
            many => {
                debug!(
                    "Ignored drag in gui {:?} spanning {} virtual inventories",
                    id,
                    many.len()
                );
            }
        }
        outcome
    }

    fn apply_provider_action(&mut self, id: GuiId, viewer: ViewerId, action: ProviderAction) {
        match action {
            ProviderAction::DispatchCommand(command) => {
                debug!("Viewer {:?} runs '{}'", viewer, command);
                self.host.dispatch_command(viewer, &command);
            }
            ProviderAction::Scroll { binding, delta } => {
                self.handle_inventory_scroll(id, binding, delta);
            }
        }
    }
}

fn build_event(
    gui: GuiId,
    viewer: ViewerId,
    action: InventoryAction,
    click: ClickType,
    old_cursor: Option<ItemStack>,
    translation: Translation,
    outcome: &DispatchOutcome,
) -> InteractionEvent {
    InteractionEvent::new(gui, viewer, action, click, old_cursor, translation)
        .with_cancel_token(outcome.cancel.clone())
}
