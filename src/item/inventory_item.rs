use super::{InventorySnapshot, ItemFactory, ItemHandle, ItemId, WheelItem};
use crate::events::{ActivationKind, ItemAction};
use crate::gui::canvas::{Canvas, DrawArgs, DrawError, TextLabel};
use crate::gui::geometry::Point;
use crate::gui::theme::HexColor;
use async_channel::Sender;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::sync::Arc;
use strum::{Display as StrumDisplay, EnumString};

const SLOT_TEXT_SIZE: f64 = 16.0;
const HIGHLIGHT_NAME_SIZE: f64 = 28.0;
const HIGHLIGHT_KIND_SIZE: f64 = 16.0;
const HIGHLIGHT_KIND_OFFSET_Y: f64 = -32.0;
const UNAVAILABLE_ALPHA: f64 = 0.4;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Weapon,
    Armor,
    Spell,
    Shout,
    Potion,
    Misc,
}

impl ItemKind {
    /// Spells and shouts are known, not carried.
    pub fn is_carried(&self) -> bool {
        !matches!(self, Self::Spell | Self::Shout)
    }
}

/// Persisted shape of an [`InventoryItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSpec {
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub id: ItemId,
    pub name: String,
}

impl ItemSpec {
    pub fn new(kind: ItemKind, id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind,
            id: ItemId::new(id),
            name: name.into(),
        }
    }
}

pub struct InventoryItem {
    spec: ItemSpec,
    actions: Sender<ItemAction>,
}

impl InventoryItem {
    pub fn new(spec: ItemSpec, actions: Sender<ItemAction>) -> Self {
        Self { spec, actions }
    }

    fn send(&self, kind: ActivationKind) {
        let action = ItemAction {
            id: self.spec.id.clone(),
            kind,
        };
        if let Err(e) = self.actions.try_send(action) {
            log::warn!("Dropped {} activation of '{}': {}", kind, self.spec.name, e);
        }
    }

    fn label(&self, inv: &InventorySnapshot) -> String {
        match inv.count(&self.spec.id) {
            n if self.spec.kind.is_carried() && n > 1 => format!("{} ({})", self.spec.name, n),
            _ => self.spec.name.clone(),
        }
    }
}

impl WheelItem for InventoryItem {
    fn draw_slot(
        &self,
        center: Point,
        _hovered: bool,
        inv: &InventorySnapshot,
        canvas: &mut dyn Canvas,
        args: DrawArgs,
    ) -> Result<(), DrawError> {
        let white = HexColor::rgba(1.0, 1.0, 1.0, 1.0);
        let color = if self.is_available(inv) {
            white
        } else {
            white.with_alpha_scaled(UNAVAILABLE_ALPHA)
        };
        canvas.draw_text(
            &TextLabel {
                origin: center,
                text: self.label(inv),
                color,
                size: SLOT_TEXT_SIZE,
            },
            args,
        )
    }

    fn draw_highlight(
        &self,
        center: Point,
        inv: &InventorySnapshot,
        canvas: &mut dyn Canvas,
        args: DrawArgs,
    ) -> Result<(), DrawError> {
        canvas.draw_text(
            &TextLabel {
                origin: center,
                text: self.label(inv),
                color: HexColor::rgba(1.0, 1.0, 1.0, 1.0),
                size: HIGHLIGHT_NAME_SIZE,
            },
            args,
        )?;
        canvas.draw_text(
            &TextLabel {
                origin: center.offset(0.0, HIGHLIGHT_KIND_OFFSET_Y),
                text: self.spec.kind.to_string(),
                color: HexColor::rgba(0.8, 0.8, 0.8, 0.8),
                size: HIGHLIGHT_KIND_SIZE,
            },
            args,
        )
    }

    fn activate_primary(&self) {
        self.send(ActivationKind::Primary);
    }

    fn activate_secondary(&self) {
        self.send(ActivationKind::Secondary);
    }

    fn activate_special(&self) {
        self.send(ActivationKind::Special);
    }

    fn is_active(&self, inv: &InventorySnapshot) -> bool {
        inv.is_equipped(&self.spec.id)
    }

    fn is_available(&self, inv: &InventorySnapshot) -> bool {
        !self.spec.kind.is_carried() || inv.count(&self.spec.id) > 0
    }

    fn serialize(&self) -> serde_json::Value {
        serde_json::to_value(&self.spec).unwrap_or_default()
    }
}

pub struct InventoryItemFactory {
    actions: Sender<ItemAction>,
    hovered: Mutex<Option<ItemSpec>>,
}

impl InventoryItemFactory {
    pub fn new(actions: Sender<ItemAction>) -> Self {
        Self {
            actions,
            hovered: Mutex::new(None),
        }
    }

    /// Called by the host whenever its inventory/magic menu selection changes.
    pub fn set_hovered(&self, spec: Option<ItemSpec>) {
        *self.hovered.lock() = spec;
    }

    fn build(&self, spec: ItemSpec) -> ItemHandle {
        Arc::new(InventoryItem::new(spec, self.actions.clone()))
    }
}

impl ItemFactory for InventoryItemFactory {
    fn make_from_json(&self, data: &serde_json::Value) -> Option<ItemHandle> {
        match ItemSpec::deserialize(data) {
            Ok(spec) => Some(self.build(spec)),
            Err(e) => {
                log::warn!("Skipping unreadable item {}: {}", data, e);
                None
            }
        }
    }

    fn make_from_hovered(&self) -> Option<ItemHandle> {
        let spec = self.hovered.lock().clone()?;
        Some(self.build(spec))
    }
}
