use bevy::prelude::*;

/// Per-tick ordering of Gui work.
///
/// Configured as a chain: Dispatch → HostApply → Commit. The host applies its
/// own container mutations in `HostApply`, so deferred commits in `Commit`
/// always read settled cells.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GuiSet {
    Dispatch,
    HostApply,
    Commit,
}
