use thiserror::Error;

use super::{BindingId, MAX_ROWS, ROW_WIDTH};
use crate::inventory::InventoryId;

/// Invalid Gui configuration, reported when the builder compiles.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GuiBuildError {
    #[error("a viewer must be set before the gui is built")]
    MissingViewer,
    #[error("gui has {0} rows, at most {MAX_ROWS} are allowed")]
    TooManyRows(usize),
    #[error("row {row} is {width} cells wide, at most {ROW_WIDTH} are allowed")]
    RowTooWide { row: usize, width: usize },
    #[error("the space character marks empty cells and cannot be bound")]
    SpaceBinding,
    #[error("character '{0}' is already bound")]
    DuplicateBinding(char),
    #[error("character '{0}' is bound to both an item provider and a virtual inventory")]
    ConflictingBinding(char),
    #[error("inventory binding id {0:?} is used twice")]
    DuplicateBindingId(BindingId),
    #[error("virtual inventory {0:?} does not exist")]
    UnknownInventory(InventoryId),
    #[error("provider bound to '{0}' appears in several cells but cannot be shared")]
    ProviderReused(char),
}
