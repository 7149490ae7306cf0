use super::ProviderAction;
use crate::item::ItemStack;

/// Shows a fixed item and ignores clicks.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleItem {
    item: ItemStack,
}

impl SimpleItem {
    pub fn new(item: ItemStack) -> Self {
        Self { item }
    }

    pub fn display_item(&self) -> Option<ItemStack> {
        Some(self.item.clone())
    }
}

/// Shows a fixed item and runs a command for the viewer when clicked.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandItem {
    item: ItemStack,
    command: String,
}

impl CommandItem {
    pub fn new(item: ItemStack, command: impl Into<String>) -> Self {
        Self {
            item,
            command: command.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn display_item(&self) -> Option<ItemStack> {
        Some(self.item.clone())
    }

    pub(super) fn on_click(&self) -> ProviderAction {
        ProviderAction::DispatchCommand(self.command.clone())
    }
}
