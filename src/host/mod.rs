//! The boundary between Guis and the application hosting them.
//!
//! The host owns the native container objects shown to viewers and knows how
//! to run commands on a viewer's behalf. Everything else in this crate only
//! talks to the host through these traits.

pub mod memory;

use crate::item::ItemStack;

pub use memory::{MemoryContainer, MemoryHost};

/// The single user a Gui is shown to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewerId(pub u64);

/// A native container indexable by physical slot.
pub trait SlotContainer: Send + Sync {
    fn size(&self) -> usize;

    /// Item at `slot`, `None` for empty or out-of-range slots.
    fn item(&self, slot: usize) -> Option<ItemStack>;

    /// Replaces the item at `slot`. Out-of-range slots are ignored.
    fn set_item(&mut self, slot: usize, item: Option<ItemStack>);

    fn open(&mut self, viewer: ViewerId);

    fn close(&mut self, viewer: ViewerId);

    fn viewers(&self) -> Vec<ViewerId>;
}

/// Services the host provides to Guis.
pub trait Host: Send + Sync + 'static {
    /// Creates the physical container for a Gui of `rows` rows of 9 cells.
    fn create_container(&mut self, title: Option<&str>, rows: usize) -> Box<dyn SlotContainer>;

    /// Runs `command` as if `viewer` had typed it.
    fn dispatch_command(&mut self, viewer: ViewerId, command: &str);
}
