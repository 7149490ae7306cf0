//! The virtual inventory side of an interaction: veto, defer, commit.

use std::collections::hash_map::Entry;

use bevy::prelude::*;

use super::{Deferred, GuiRuntime};
use crate::host::Host;
use crate::interaction::InteractionEvent;
use crate::inventory::InventoryId;

impl<H: Host> GuiRuntime<H> {
    /// Validates `event` against `inventory`, runs the pre-update hook and
    /// schedules the commit.
    ///
    /// `event` must only carry changes of `inventory`.
    pub(crate) fn handle_click(&mut self, inventory: InventoryId, event: InteractionEvent) {
        let Some(target) = self.inventories.get_mut(inventory) else {
            event.set_cancelled(true);
            return;
        };

        if !target.contains_slots(&event) {
            debug!(
                "Rejected interaction on {:?}: virtual slot out of range",
                inventory
            );
            event.set_cancelled(true);
            return;
        }

        target.pre_update(&event);
        if event.is_cancelled() {
            debug!("Interaction on {:?} vetoed by its hooks", inventory);
            target.post_update(&event);
            return;
        }

        let delay = self.settings.commit_delay_ticks;
        *self.pending_commits.entry(event.viewer).or_default() += 1;
        self.scheduler
            .run_later(delay, Deferred::Commit { inventory, event });
    }

    /// Copies what the host left in each touched cell into the inventory.
    ///
    /// The host's settled contents win over the predicted `new_item`. Every
    /// touched cell is then redrawn from the provider it holds now.
    pub(crate) fn commit(&mut self, inventory: InventoryId, event: InteractionEvent) {
        if let Entry::Occupied(mut pending) = self.pending_commits.entry(event.viewer) {
            *pending.get_mut() -= 1;
            if *pending.get() == 0 {
                pending.remove();
            }
        }

        if !event.is_cancelled()
            && let Some(gui) = self.guis.get(&event.gui)
        {
            let settled: Vec<_> = event
                .slot_changes
                .iter()
                .map(|change| {
                    (
                        change.virtual_slot,
                        gui.container().item(change.physical_slot),
                    )
                })
                .collect();
            for (slot, item) in settled {
                self.set_item(inventory, slot, item);
            }
            if let Some(gui) = self.guis.get_mut(&event.gui) {
                for change in &event.slot_changes {
                    gui.refresh_index(change.physical_slot, &self.inventories);
                }
            }
            if self.settings.log_interactions {
                debug!(
                    "Committed {} slot(s) of {:?} from gui {:?}",
                    event.slot_changes.len(),
                    inventory,
                    event.gui
                );
            }
        }

        if let Some(target) = self.inventories.get_mut(inventory) {
            target.post_update(&event);
        }
    }
}
