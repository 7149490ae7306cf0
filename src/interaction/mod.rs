pub mod event;
pub mod raw;
pub mod translate;

pub use event::*;
pub use raw::*;
pub use translate::{CellMap, Translation, VirtualCell, translate_click, translate_drag};
