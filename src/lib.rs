//! Windowed grid containers backed by virtual inventories.
//!
//! A [`Gui`](gui::Gui) lays item providers out on a grid of up to six rows of
//! nine cells. Cells bound to a [`VirtualInventory`](inventory::VirtualInventory)
//! mirror its slots; clicks and drags on them are translated into per-slot
//! changes and committed one tick later, once the host has settled the
//! container. Everything lives in a [`GuiRuntime`](runtime::GuiRuntime), which
//! [`ContainerGuiPlugin`](runtime::ContainerGuiPlugin) drives from a bevy app.

pub mod config;
pub mod gui;
pub mod host;
pub mod interaction;
pub mod inventory;
pub mod item;
pub mod provider;
pub mod runtime;
pub mod scheduler;
pub mod sets;

#[cfg(test)]
mod test_helpers;

pub mod prelude {
    pub use crate::config::{GuiLayout, GuiSettings, LayoutError};
    pub use crate::gui::{BindingId, Direction, Gui, GuiBuildError, GuiBuilder, GuiId};
    pub use crate::host::{Host, MemoryContainer, MemoryHost, SlotContainer, ViewerId};
    pub use crate::interaction::{
        CancelToken, ClickType, InteractionEvent, InventoryAction, RawClick, RawDrag, SlotChange,
    };
    pub use crate::inventory::{AllowList, InventoryHooks, InventoryId, VirtualInventory};
    pub use crate::item::ItemStack;
    pub use crate::provider::{CustomItem, ItemProvider, ProviderAction, ProviderError};
    pub use crate::runtime::{
        ContainerClick, ContainerClosed, ContainerDrag, ContainerGuiPlugin, DispatchOutcome,
        GuiRuntime, InteractionDisposition,
    };
    pub use crate::sets::GuiSet;
}
