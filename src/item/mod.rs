pub mod inventory;
pub mod inventory_item;

pub use inventory::{InventorySnapshot, ItemId, Stack};
pub use inventory_item::{InventoryItem, InventoryItemFactory, ItemKind, ItemSpec};

use crate::gui::canvas::{Canvas, DrawArgs, DrawError};
use crate::gui::geometry::Point;
use std::sync::Arc;

/// A selectable unit living in a wheel entry.
pub trait WheelItem: Send + Sync {
    fn draw_slot(
        &self,
        center: Point,
        hovered: bool,
        inv: &InventorySnapshot,
        canvas: &mut dyn Canvas,
        args: DrawArgs,
    ) -> Result<(), DrawError>;

    fn draw_highlight(
        &self,
        center: Point,
        inv: &InventorySnapshot,
        canvas: &mut dyn Canvas,
        args: DrawArgs,
    ) -> Result<(), DrawError>;

    fn activate_primary(&self);
    fn activate_secondary(&self);
    fn activate_special(&self);

    fn is_active(&self, inv: &InventorySnapshot) -> bool;
    fn is_available(&self, inv: &InventorySnapshot) -> bool;

    fn serialize(&self) -> serde_json::Value;
}

pub type ItemHandle = Arc<dyn WheelItem>;

/// Builds items either from persisted data or from whatever the host menu has hovered.
/// Both return `None` when nothing sensible can be built.
pub trait ItemFactory: Send + Sync {
    fn make_from_json(&self, data: &serde_json::Value) -> Option<ItemHandle>;
    fn make_from_hovered(&self) -> Option<ItemHandle>;
}
