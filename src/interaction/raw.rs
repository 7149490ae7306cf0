use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::item::ItemStack;

/// What the host decided a click does. Host-defined protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InventoryAction {
    Nothing,
    CloneStack,
    DropAllSlot,
    DropOneSlot,
    PickupAll,
    PickupHalf,
    PickupSome,
    PickupOne,
    DropAllCursor,
    DropOneCursor,
    SwapWithCursor,
    PlaceAll,
    PlaceSome,
    PlaceOne,
    HotbarSwap,
    MoveToOtherInventory,
    CollectToCursor,
    /// Set on events built from a drag; hosts never report it for clicks.
    Drag,
    /// Anything the host reports that this crate has no mapping for.
    Unknown,
}

/// Physical gesture behind a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClickType {
    #[default]
    Left,
    ShiftLeft,
    Right,
    ShiftRight,
    Middle,
    NumberKey,
    DoubleClick,
    Drop,
    ControlDrop,
    Creative,
    SwapOffhand,
    Unknown,
}

impl ClickType {
    pub fn is_left_click(&self) -> bool {
        matches!(
            self,
            Self::Left | Self::ShiftLeft | Self::DoubleClick | Self::Creative
        )
    }

    pub fn is_right_click(&self) -> bool {
        matches!(self, Self::Right | Self::ShiftRight)
    }

    pub fn is_shift_click(&self) -> bool {
        matches!(self, Self::ShiftLeft | Self::ShiftRight)
    }
}

/// One click as reported by the host, before the host applies it.
#[derive(Debug, Clone, PartialEq)]
pub struct RawClick {
    pub action: InventoryAction,
    pub click: ClickType,
    /// Raw slot: the Gui's container first, the viewer's own storage after it.
    /// `None` for clicks outside any slot.
    pub slot: Option<usize>,
    pub cursor: Option<ItemStack>,
    pub current: Option<ItemStack>,
    pub hotbar_button: Option<usize>,
    pub hotbar_item: Option<ItemStack>,
}

impl RawClick {
    pub fn new(action: InventoryAction, slot: usize) -> Self {
        Self {
            action,
            click: ClickType::Left,
            slot: Some(slot),
            cursor: None,
            current: None,
            hotbar_button: None,
            hotbar_item: None,
        }
    }

    pub fn with_click(mut self, click: ClickType) -> Self {
        self.click = click;
        self
    }

    pub fn with_cursor(mut self, cursor: Option<ItemStack>) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn with_current(mut self, current: Option<ItemStack>) -> Self {
        self.current = current;
        self
    }

    pub fn with_hotbar(mut self, button: usize, item: Option<ItemStack>) -> Self {
        self.hotbar_button = Some(button);
        self.hotbar_item = item;
        self
    }
}

/// One drag as reported by the host.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawDrag {
    /// Raw slot -> item the slot will hold once the host applies the drag.
    pub new_items: BTreeMap<usize, Option<ItemStack>>,
    pub old_cursor: Option<ItemStack>,
    pub new_cursor: Option<ItemStack>,
}

/// Shared "cancelled" flag of one raw interaction.
///
/// The host keeps one clone to decide whether to apply its default mutation;
/// the deferred commit keeps another and skips itself once the flag is set.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn set_cancelled(&self, cancelled: bool) {
        self.0.store(cancelled, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
