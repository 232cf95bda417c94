use crate::item::ItemId;
use strum::Display as StrumDisplay;

/// Input-thread vocabulary understood by [`crate::gui::entry::Entry::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryEvent {
    Next,
    Prev,
    Primary,
    Secondary,
    Special,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum ActivationKind {
    Primary,
    Secondary,
    Special,
}

/// Emitted by items when activated; the host decides what equip/use/cast means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemAction {
    pub id: ItemId,
    pub kind: ActivationKind,
}
