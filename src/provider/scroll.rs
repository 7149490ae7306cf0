use super::ProviderAction;
use crate::gui::BindingId;
use crate::item::ItemStack;

/// Slides the window of a scrolling inventory binding when clicked.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollItem {
    item: ItemStack,
    disabled_item: Option<ItemStack>,
    binding: BindingId,
    delta: i32,
}

impl ScrollItem {
    pub fn new(item: ItemStack, binding: BindingId, delta: i32) -> Self {
        Self {
            item,
            disabled_item: None,
            binding,
            delta,
        }
    }

    /// Item shown once the window can no longer move in this direction.
    pub fn with_disabled_item(mut self, item: ItemStack) -> Self {
        self.disabled_item = Some(item);
        self
    }

    pub fn binding(&self) -> BindingId {
        self.binding
    }

    pub fn delta(&self) -> i32 {
        self.delta
    }

    pub fn display_item(&self, can_scroll: bool) -> Option<ItemStack> {
        match (&self.disabled_item, can_scroll) {
            (Some(disabled), false) => Some(disabled.clone()),
            _ => Some(self.item.clone()),
        }
    }

    pub(super) fn on_click(&self) -> ProviderAction {
        ProviderAction::Scroll {
            binding: self.binding,
            delta: self.delta,
        }
    }
}
