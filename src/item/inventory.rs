use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ItemId(String);

crate::impl_string_newtype!(ItemId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stack {
    pub count: u32,
    pub equipped: bool,
}

/// What the player carries, captured once per frame by the host.
#[derive(Debug, Clone, Default)]
pub struct InventorySnapshot {
    stacks: HashMap<ItemId, Stack>,
}

impl InventorySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, id: impl Into<String>, count: u32, equipped: bool) -> Self {
        self.insert(ItemId::new(id), Stack { count, equipped });
        self
    }

    pub fn insert(&mut self, id: ItemId, stack: Stack) {
        self.stacks.insert(id, stack);
    }

    pub fn count(&self, id: &str) -> u32 {
        self.stacks.get(id).map_or(0, |s| s.count)
    }

    pub fn is_equipped(&self, id: &str) -> bool {
        self.stacks.get(id).is_some_and(|s| s.equipped)
    }
}
