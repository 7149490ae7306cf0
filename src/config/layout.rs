use std::collections::BTreeMap;

use bevy::prelude::*;
use bevy::reflect::TypePath;
use serde::Deserialize;

use super::LayoutError;
use crate::item::ItemStack;

fn default_allow_close() -> bool {
    true
}

/// Static part of a Gui described in RON: rows and item bindings.
///
/// Loaded as an asset from `*.gui.ron` files once [`ContainerGuiPlugin`]
/// runs alongside bevy's `AssetPlugin`, or parsed inline with [`GuiLayout::from_ron`].
///
/// [`ContainerGuiPlugin`]: crate::runtime::ContainerGuiPlugin
///
/// ```ron
/// (
///     title: Some("Shop"),
///     structure: ["# # # # # # # # #", "# . . . . . . . #"],
///     items: { '#': (item_id: "glass_pane") },
/// )
/// ```
#[derive(Asset, TypePath, Debug, Clone, PartialEq, Deserialize)]
pub struct GuiLayout {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub structure: Vec<String>,
    #[serde(default)]
    pub items: BTreeMap<char, ItemStack>,
    #[serde(default = "default_allow_close")]
    pub allow_close: bool,
}

impl GuiLayout {
    pub fn from_ron(source: &str) -> Result<Self, LayoutError> {
        super::from_ron_str(source)
    }

    /// Applies `max_stack` to every item the layout names.
    pub fn with_max_stack(mut self, max_stack: u16) -> Self {
        for item in self.items.values_mut() {
            item.max_stack = max_stack;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOP: &str = r##"(
        title: Some("Shop"),
        structure: ["# # #", "# . #"],
        items: {
            '#': (item_id: "glass_pane"),
            'g': (item_id: "gold", count: 5, meta: {"name": "Coin"}),
        },
    )"##;

    #[test]
    fn parses_items_with_defaults() {
        let layout = GuiLayout::from_ron(SHOP).unwrap();

        assert_eq!(layout.title.as_deref(), Some("Shop"));
        assert_eq!(layout.structure.len(), 2);
        assert!(layout.allow_close);

        let pane = &layout.items[&'#'];
        assert_eq!(pane.count, 1);
        assert_eq!(pane.max_stack, 64);

        let gold = &layout.items[&'g'];
        assert_eq!(gold.count, 5);
        assert_eq!(gold.meta["name"], "Coin");
    }

    #[test]
    fn with_max_stack_rewrites_every_item() {
        let layout = GuiLayout::from_ron(SHOP).unwrap().with_max_stack(16);

        assert!(layout.items.values().all(|item| item.max_stack == 16));
    }
}
