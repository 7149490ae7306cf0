//! Content sources for Gui cells.

pub mod async_item;
pub mod cycle;
pub mod scroll;
pub mod simple;
pub mod virtual_slot;

use std::fmt;

use crate::gui::BindingId;
use crate::interaction::RawClick;
use crate::inventory::InventoryId;
use crate::item::ItemStack;

pub use async_item::{AsyncItem, AsyncPoll, ProviderError, ProviderFuture};
pub use cycle::{AutoCycleItem, CycleItem};
pub use scroll::ScrollItem;
pub use simple::{CommandItem, SimpleItem};
pub use virtual_slot::VirtualSlotItem;

/// Something a provider's click asks its Gui to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderAction {
    DispatchCommand(String),
    Scroll { binding: BindingId, delta: i32 },
}

/// Provider kinds defined outside this crate.
pub trait CustomItem: Send + Sync {
    fn display_item(&self) -> Option<ItemStack>;

    fn on_click(&mut self, _click: &RawClick) -> Option<ProviderAction> {
        None
    }

    fn destroy(&mut self) {}
}

/// Content of one Gui cell.
pub enum ItemProvider {
    Simple(SimpleItem),
    Command(CommandItem),
    Cycle(CycleItem),
    AutoCycle(AutoCycleItem),
    Async(AsyncItem),
    Scroll(ScrollItem),
    VirtualSlot(VirtualSlotItem),
    Custom(Box<dyn CustomItem>),
}

impl ItemProvider {
    pub fn simple(item: ItemStack) -> Self {
        Self::Simple(SimpleItem::new(item))
    }

    pub fn command(item: ItemStack, command: impl Into<String>) -> Self {
        Self::Command(CommandItem::new(item, command))
    }

    pub fn cycle(items: Vec<ItemStack>) -> Self {
        Self::Cycle(CycleItem::new(items))
    }

    pub fn auto_cycle(items: Vec<ItemStack>, period_ticks: u64) -> Self {
        Self::AutoCycle(AutoCycleItem::new(items, period_ticks))
    }

    pub fn scroll(item: ItemStack, binding: BindingId, delta: i32) -> Self {
        Self::Scroll(ScrollItem::new(item, binding, delta))
    }

    pub fn custom(item: impl CustomItem + 'static) -> Self {
        Self::Custom(Box::new(item))
    }

    /// Cell backed by `slot` of `inventory`. The Gui builder creates these.
    pub(crate) fn virtual_slot(inventory: InventoryId, binding: BindingId, slot: usize) -> Self {
        Self::VirtualSlot(VirtualSlotItem::new(inventory, binding, slot))
    }

    pub fn as_virtual_slot(&self) -> Option<&VirtualSlotItem> {
        match self {
            Self::VirtualSlot(item) => Some(item),
            _ => None,
        }
    }

    /// Fresh copy for another cell, if this kind can be shared between cells.
    ///
    /// Async and custom providers own state that cannot be duplicated.
    pub fn try_clone(&self) -> Option<Self> {
        match self {
            Self::Simple(item) => Some(Self::Simple(item.clone())),
            Self::Command(item) => Some(Self::Command(item.clone())),
            Self::Cycle(item) => Some(Self::Cycle(item.clone())),
            Self::AutoCycle(item) => Some(Self::AutoCycle(item.unscheduled())),
            Self::Scroll(item) => Some(Self::Scroll(item.clone())),
            Self::VirtualSlot(item) => Some(Self::VirtualSlot(item.clone())),
            Self::Async(_) | Self::Custom(_) => None,
        }
    }

    /// Handles a click on this cell.
    pub fn on_click(&mut self, click: &RawClick) -> Option<ProviderAction> {
        match self {
            Self::Command(item) => Some(item.on_click()),
            Self::Cycle(item) => {
                item.advance();
                None
            }
            Self::Scroll(item) => Some(item.on_click()),
            Self::Async(item) => item.resolved_mut()?.on_click(click),
            Self::Custom(item) => item.on_click(click),
            Self::Simple(_) | Self::AutoCycle(_) | Self::VirtualSlot(_) => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Simple(_) => "simple",
            Self::Command(_) => "command",
            Self::Cycle(_) => "cycle",
            Self::AutoCycle(_) => "auto_cycle",
            Self::Async(_) => "async",
            Self::Scroll(_) => "scroll",
            Self::VirtualSlot(_) => "virtual_slot",
            Self::Custom(_) => "custom",
        }
    }
}

impl fmt::Debug for ItemProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple(item) => f.debug_tuple("Simple").field(item).finish(),
            Self::Command(item) => f.debug_tuple("Command").field(item).finish(),
            Self::Cycle(item) => f.debug_tuple("Cycle").field(item).finish(),
            Self::AutoCycle(item) => f.debug_tuple("AutoCycle").field(item).finish(),
            Self::Async(item) => f.debug_tuple("Async").field(item).finish(),
            Self::Scroll(item) => f.debug_tuple("Scroll").field(item).finish(),
            Self::VirtualSlot(item) => f.debug_tuple("VirtualSlot").field(item).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<ItemStack> for ItemProvider {
    fn from(item: ItemStack) -> Self {
        Self::simple(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::InventoryAction;

    struct Counter(u16);

    impl CustomItem for Counter {
        fn display_item(&self) -> Option<ItemStack> {
            Some(ItemStack::new("paper", self.0))
        }

        fn on_click(&mut self, _click: &RawClick) -> Option<ProviderAction> {
            self.0 += 1;
            None
        }
    }

    fn left_click() -> RawClick {
        RawClick::new(InventoryAction::PickupAll, 0)
    }

    #[test]
    fn command_click_asks_for_dispatch() {
        let mut provider = ItemProvider::command(ItemStack::new("compass", 1), "spawn");

        assert_eq!(
            provider.on_click(&left_click()),
            Some(ProviderAction::DispatchCommand("spawn".into()))
        );
    }

    #[test]
    fn scroll_click_asks_for_scroll() {
        let mut provider = ItemProvider::scroll(ItemStack::new("arrow", 1), BindingId(2), -1);

        assert_eq!(
            provider.on_click(&left_click()),
            Some(ProviderAction::Scroll {
                binding: BindingId(2),
                delta: -1
            })
        );
    }

    #[test]
    fn custom_providers_see_clicks() {
        let mut provider = ItemProvider::custom(Counter(1));
        provider.on_click(&left_click());

        let ItemProvider::Custom(custom) = &provider else {
            panic!("expected a custom provider");
        };
        assert_eq!(custom.display_item().unwrap().count, 2);
    }

    #[test]
    fn only_stateless_kinds_can_be_cloned() {
        assert!(ItemProvider::simple(ItemStack::new("pane", 1)).try_clone().is_some());
        assert!(ItemProvider::auto_cycle(vec![], 5).try_clone().is_some());
        assert!(ItemProvider::custom(Counter(0)).try_clone().is_none());
    }
}
