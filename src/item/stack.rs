use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Item id the host uses for "nothing in this slot".
pub const AIR: &str = "air";

fn default_max_stack() -> u16 {
    64
}

fn default_count() -> u16 {
    1
}

/// A stack of one kind of item.
///
/// Two stacks are "similar" when they share the item id and metadata; count and
/// max stack size do not take part in similarity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemStack {
    pub item_id: String,
    #[serde(default = "default_count")]
    pub count: u16,
    #[serde(default = "default_max_stack")]
    pub max_stack: u16,
    #[serde(default)]
    pub meta: BTreeMap<String, String>,
}

impl ItemStack {
    pub fn new(item_id: impl Into<String>, count: u16) -> Self {
        Self {
            item_id: item_id.into(),
            count,
            max_stack: default_max_stack(),
            meta: BTreeMap::new(),
        }
    }

    pub fn with_max_stack(mut self, max_stack: u16) -> Self {
        self.max_stack = max_stack;
        self
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// Copy of this stack carrying `count` items.
    pub fn with_count(&self, count: u16) -> Self {
        Self {
            count,
            ..self.clone()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0 || self.item_id.is_empty() || self.item_id == AIR
    }

    pub fn is_full(&self) -> bool {
        self.count >= self.max_stack
    }

    pub fn is_similar(&self, other: &ItemStack) -> bool {
        self.item_id == other.item_id && self.meta == other.meta
    }

    /// Drops empty stacks, so a slot never holds a zero-count or air item.
    pub fn normalized(item: Option<ItemStack>) -> Option<ItemStack> {
        item.filter(|stack| !stack.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn similarity_ignores_count() {
        let a = ItemStack::new("dirt", 3);
        let b = ItemStack::new("dirt", 40);

        assert!(a.is_similar(&b));
        assert!(!a.is_similar(&ItemStack::new("stone", 3)));
    }

    #[test]
    fn similarity_respects_meta() {
        let plain = ItemStack::new("sword", 1);
        let named = ItemStack::new("sword", 1).with_meta("name", "Excalibur");

        assert!(!plain.is_similar(&named));
        assert!(named.is_similar(&named.with_count(2)));
    }

    #[test]
    fn zero_count_and_air_are_empty() {
        assert!(ItemStack::new("dirt", 0).is_empty());
        assert!(ItemStack::new(AIR, 5).is_empty());
        assert!(!ItemStack::new("dirt", 1).is_empty());
    }

    #[test]
    fn normalized_drops_empty_stacks() {
        assert_eq!(ItemStack::normalized(Some(ItemStack::new("dirt", 0))), None);
        assert_eq!(
            ItemStack::normalized(Some(ItemStack::new("dirt", 2))),
            Some(ItemStack::new("dirt", 2))
        );
    }

    #[test]
    fn ron_defaults_fill_in_count_and_max_stack() {
        let stack: ItemStack = ron::from_str(r#"(item_id: "torch")"#).unwrap();

        assert_eq!(stack.count, 1);
        assert_eq!(stack.max_stack, 64);
        assert!(stack.meta.is_empty());
    }
}
