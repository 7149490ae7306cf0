use std::collections::HashSet;

use crate::interaction::InteractionEvent;

/// Extension points around a virtual inventory's commit.
///
/// `on_pre_update` runs synchronously while the raw interaction is being
/// dispatched and may cancel it with [`InteractionEvent::set_cancelled`].
/// `on_post_update` runs once the deferred commit finished, or right away
/// when the interaction was cancelled before it could be scheduled.
pub trait InventoryHooks: Send + Sync {
    fn on_pre_update(&mut self, _event: &InteractionEvent) {}

    fn on_post_update(&mut self, _event: &InteractionEvent) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoHooks;

impl InventoryHooks for NoHooks {}

/// Only lets listed item ids into the inventory. Removals are always allowed.
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    allowed: HashSet<String>,
}

impl AllowList {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn allows(&self, item_id: &str) -> bool {
        self.allowed.contains(item_id)
    }
}

impl InventoryHooks for AllowList {
    fn on_pre_update(&mut self, event: &InteractionEvent) {
        let rejected = event
            .slot_changes
            .iter()
            .filter_map(|change| change.new_item.as_ref())
            .any(|item| !self.allows(&item.item_id));
        if rejected {
            event.set_cancelled(true);
        }
    }
}
