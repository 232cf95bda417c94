use crate::config::Config;
use crate::events::EntryEvent;
use crate::gui::anim::{Easing, Interpolator};
use crate::item::{InventorySnapshot, ItemFactory, ItemHandle, WheelItem};
use crate::sys::sound::{LogSound, SoundPlayer};
use parking_lot::{MappedRwLockReadGuard, Mutex, RwLock, RwLockReadGuard};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

/// Collaborators an entry needs but does not own.
#[derive(Clone)]
pub struct EntryContext {
    pub config: Arc<Config>,
    pub factory: Arc<dyn ItemFactory>,
    pub sound: Arc<dyn SoundPlayer>,
}

impl EntryContext {
    pub fn new(config: Arc<Config>, factory: Arc<dyn ItemFactory>) -> Self {
        Self {
            config,
            factory,
            sound: Arc::new(LogSound),
        }
    }

    #[must_use]
    pub fn with_sound(mut self, sound: Arc<dyn SoundPlayer>) -> Self {
        self.sound = sound;
        self
    }
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("malformed entry: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persisted cursor for one that points at no item.
const NO_SELECTION: i64 = -1;

#[derive(Debug, Deserialize)]
struct PersistedEntry {
    selecteditem: i64,
    items: Vec<serde_json::Value>,
}

/// The list and its cursor. Always locked together so that removal and cursor
/// adjustment are a single step for readers.
#[derive(Default)]
pub(super) struct Slots {
    pub(super) items: Vec<ItemHandle>,
    pub(super) selected: usize,
}

impl Slots {
    /// `None` when empty or when the cursor is out of range.
    pub(super) fn current(&self) -> Option<&ItemHandle> {
        self.items.get(self.selected)
    }
}

pub(super) struct Animation {
    pub(super) radius_inc: Interpolator,
    pub(super) radius_bounce: Interpolator,
    pub(super) inner_angle_inc: Interpolator,
    pub(super) outer_angle_inc: Interpolator,
    pub(super) prev_hovered: bool,
}

impl Animation {
    fn new(easing: Easing) -> Self {
        Self {
            radius_inc: Interpolator::new(easing),
            radius_bounce: Interpolator::new(easing),
            inner_angle_inc: Interpolator::new(easing),
            outer_angle_inc: Interpolator::new(easing),
            prev_hovered: false,
        }
    }
}

/// One slot of the wheel: an ordered list of items with a cursor, plus the highlight
/// animation state.
///
/// Shared between a render thread (draws, queries) and an input thread (activation,
/// cycling, editing). Lock order is `slots` then `anim`; `anim` is never held while
/// waiting on `slots`.
pub struct Entry {
    pub(super) slots: RwLock<Slots>,
    pub(super) anim: Mutex<Animation>,
    pub(super) ctx: EntryContext,
}

impl Entry {
    pub fn new(ctx: EntryContext) -> Self {
        let easing = ctx.config.animation.easing;
        Self {
            slots: RwLock::new(Slots::default()),
            anim: Mutex::new(Animation::new(easing)),
            ctx,
        }
    }

    pub fn config(&self) -> &Config {
        &self.ctx.config
    }

    pub fn is_active(&self, inv: &InventorySnapshot) -> bool {
        let slots = self.slots.read();
        slots.current().is_some_and(|item| item.is_active(inv))
    }

    pub fn is_available(&self, inv: &InventorySnapshot) -> bool {
        let slots = self.slots.read();
        slots.current().is_some_and(|item| item.is_available(inv))
    }

    /// Normal mode activates the selected item. Edit mode inserts the item the host
    /// menu has hovered at the cursor, pushing the previously selected item forward.
    pub fn activate_primary(&self, edit_mode: bool) {
        let mut slots = self.slots.write();

        if !edit_mode {
            let Some(item) = slots.current() else {
                return;
            };
            self.bounce();
            item.activate_primary();
            return;
        }

        let Some(item) = self.ctx.factory.make_from_hovered() else {
            return;
        };
        let at = slots.selected.min(slots.items.len());
        slots.items.insert(at, item);
        slots.selected = at;
        log::debug!("inserted item at {} ({} total)", at, slots.items.len());
    }

    /// Normal mode activates the selected item. Edit mode removes it and moves the
    /// cursor to the item before it.
    pub fn activate_secondary(&self, edit_mode: bool) {
        let mut slots = self.slots.write();

        if slots.current().is_none() {
            return;
        }
        if !edit_mode {
            if let Some(item) = slots.current() {
                item.activate_secondary();
            }
            self.bounce();
            return;
        }

        let at = slots.selected;
        slots.items.remove(at);
        slots.selected = at.saturating_sub(1);
        log::debug!("removed item at {} ({} left)", at, slots.items.len());
    }

    pub fn activate_special(&self, edit_mode: bool) {
        let slots = self.slots.write();
        if edit_mode {
            return;
        }
        if let Some(item) = slots.current() {
            item.activate_special();
        }
    }

    pub fn next_item(&self) {
        let mut slots = self.slots.write();
        let len = slots.items.len();

        slots.selected = slots
            .selected
            .checked_add(1)
            .filter(|&i| i < len)
            .unwrap_or(0);
        self.play_switch_sound(len);
    }

    pub fn prev_item(&self) {
        let mut slots = self.slots.write();
        let len = slots.items.len();

        slots.selected = match slots.selected.checked_sub(1) {
            Some(i) if i < len => i,
            _ => len.saturating_sub(1),
        };
        self.play_switch_sound(len);
    }

    pub fn apply(&self, event: EntryEvent, edit_mode: bool) {
        match event {
            EntryEvent::Next => self.next_item(),
            EntryEvent::Prev => self.prev_item(),
            EntryEvent::Primary => self.activate_primary(edit_mode),
            EntryEvent::Secondary => self.activate_secondary(edit_mode),
            EntryEvent::Special => self.activate_special(edit_mode),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slots.read().items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slots.read().items.len()
    }

    /// Borrow of the live list. Writers block until the guard is dropped.
    pub fn items(&self) -> MappedRwLockReadGuard<'_, [ItemHandle]> {
        RwLockReadGuard::map(self.slots.read(), |s| s.items.as_slice())
    }

    pub fn selected_item(&self) -> usize {
        self.slots.read().selected
    }

    /// Unchecked; the cursor may end up out of range, which every reader tolerates.
    pub fn set_selected_item(&self, index: usize) {
        self.slots.write().selected = index;
    }

    pub fn push_item(&self, item: ItemHandle) {
        self.slots.write().items.push(item);
    }

    /// Drops every highlight animation to rest immediately.
    pub fn reset_animation(&self) {
        let mut anim = self.anim.lock();
        anim.inner_angle_inc.force_value(0.0);
        anim.outer_angle_inc.force_value(0.0);
        anim.radius_inc.force_value(0.0);
        anim.radius_bounce.force_value(0.0);
    }

    pub fn serialize(&self) -> serde_json::Value {
        let slots = self.slots.read();
        let items: Vec<_> = slots.items.iter().map(|item| item.serialize()).collect();
        json!({
            "selecteditem": i64::try_from(slots.selected).unwrap_or(NO_SELECTION),
            "items": items,
        })
    }

    /// Rebuilds an entry from [`Entry::serialize`] output. Items the factory cannot
    /// rebuild are skipped; the cursor is restored as persisted, even if that leaves
    /// it past the end of the shorter list.
    pub fn deserialize(
        value: &serde_json::Value,
        ctx: EntryContext,
    ) -> Result<Self, PersistError> {
        let persisted = PersistedEntry::deserialize(value)?;
        let entry = Self::new(ctx);
        // negative means "nothing selected"; keep it out of range rather than failing
        entry.set_selected_item(usize::try_from(persisted.selecteditem).unwrap_or(usize::MAX));

        for data in &persisted.items {
            match entry.ctx.factory.make_from_json(data) {
                Some(item) => entry.push_item(item),
                None => log::warn!("dropped persisted item {}", data),
            }
        }
        Ok(entry)
    }

    fn bounce(&self) {
        let animation = &self.ctx.config.animation;
        self.anim
            .lock()
            .radius_bounce
            .interpolate_to(animation.bounce_offset, animation.bounce_time);
    }

    fn play_switch_sound(&self, len: usize) {
        if len > 1 {
            self.ctx.sound.play(&self.ctx.config.sound.item_switch);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use std::sync::atomic::Ordering;
    use std::thread;

    #[test]
    fn test_empty_entry_degrades_silently() {
        let f = fixture(&[]);
        let inv = InventorySnapshot::new();

        assert!(f.entry.is_empty());
        assert_eq!(f.entry.selected_item(), 0);
        assert!(!f.entry.is_active(&inv));
        assert!(!f.entry.is_available(&inv));

        f.entry.activate_primary(false);
        f.entry.activate_secondary(false);
        f.entry.activate_secondary(true);
        f.entry.activate_special(false);
        f.entry.next_item();
        f.entry.prev_item();

        assert!(f.entry.is_empty());
        assert_eq!(f.entry.selected_item(), 0);
        assert_eq!(f.sound_count(), 0);
    }

    #[test]
    fn test_next_item_cycles_back_to_start() {
        let f = fixture(&["a", "b", "c", "d"]);
        f.entry.set_selected_item(2);

        for _ in 0..4 {
            f.entry.next_item();
        }
        assert_eq!(f.entry.selected_item(), 2);
        assert_eq!(f.sound_count(), 4);
    }

    #[test]
    fn test_prev_and_next_are_inverse() {
        let f = fixture(&["a", "b", "c"]);

        for start in 0..3 {
            f.entry.set_selected_item(start);
            f.entry.prev_item();
            f.entry.next_item();
            assert_eq!(f.entry.selected_item(), start);

            f.entry.next_item();
            f.entry.prev_item();
            assert_eq!(f.entry.selected_item(), start);
        }
    }

    #[test]
    fn test_prev_wraps_to_last() {
        let f = fixture(&["a", "b", "c"]);
        f.entry.prev_item();
        assert_eq!(f.entry.selected_item(), 2);
    }

    #[test]
    fn test_single_item_cycling_is_silent() {
        let f = fixture(&["only"]);

        f.entry.next_item();
        assert_eq!(f.entry.selected_item(), 0);
        f.entry.prev_item();
        assert_eq!(f.entry.selected_item(), 0);
        assert_eq!(f.sound_count(), 0);
    }

    #[test]
    fn test_switch_sound_uses_configured_id() {
        let f = fixture(&["a", "b"]);
        f.entry.next_item();
        assert_eq!(
            f.sound.played.lock().as_slice(),
            &[f.entry.config().sound.item_switch.clone()]
        );
    }

    #[test]
    fn test_edit_insert_into_empty_entry() {
        let f = fixture(&[]);
        *f.factory.hovered.lock() = Some("new".to_string());

        f.entry.activate_primary(true);

        assert_eq!(f.names(), vec!["new"]);
        assert_eq!(f.entry.selected_item(), 0);
    }

    #[test]
    fn test_edit_insert_goes_before_selected() {
        let f = fixture(&["a", "b", "c"]);
        f.entry.set_selected_item(1);
        *f.factory.hovered.lock() = Some("x".to_string());

        f.entry.activate_primary(true);

        assert_eq!(f.names(), vec!["a", "x", "b", "c"]);
        assert_eq!(f.entry.selected_item(), 1);
        assert_eq!(f.items[1].primary.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_edit_insert_without_hovered_item_is_noop() {
        let f = fixture(&["a"]);
        f.entry.activate_primary(true);
        assert_eq!(f.names(), vec!["a"]);
    }

    #[test]
    fn test_edit_insert_with_stale_cursor_appends() {
        let f = fixture(&["a", "b"]);
        f.entry.set_selected_item(7);
        *f.factory.hovered.lock() = Some("x".to_string());

        f.entry.activate_primary(true);

        assert_eq!(f.names(), vec!["a", "b", "x"]);
        assert_eq!(f.entry.selected_item(), 2);
    }

    #[test]
    fn test_edit_remove_moves_cursor_back() {
        let f = fixture(&["a", "b", "c"]);
        f.entry.set_selected_item(2);

        f.entry.activate_secondary(true);
        assert_eq!(f.names(), vec!["a", "b"]);
        assert_eq!(f.entry.selected_item(), 1);

        f.entry.set_selected_item(0);
        f.entry.activate_secondary(true);
        assert_eq!(f.names(), vec!["b"]);
        assert_eq!(f.entry.selected_item(), 0);

        f.entry.activate_secondary(true);
        assert!(f.entry.is_empty());
        assert_eq!(f.entry.selected_item(), 0);
        assert_eq!(f.items[2].secondary.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_edit_remove_keeps_cursor_in_range() {
        for start in 0..5 {
            let f = fixture(&["a", "b", "c", "d", "e"]);
            f.entry.set_selected_item(start);

            while !f.entry.is_empty() {
                let before = f.entry.len();
                f.entry.activate_secondary(true);
                let after = f.entry.len();
                assert_eq!(after, before - 1);
                if after > 0 {
                    assert!(f.entry.selected_item() < after);
                } else {
                    assert_eq!(f.entry.selected_item(), 0);
                }
            }
        }
    }

    #[test]
    fn test_edit_remove_with_stale_cursor_is_noop() {
        let f = fixture(&["a", "b"]);
        f.entry.set_selected_item(5);
        f.entry.activate_secondary(true);
        assert_eq!(f.entry.len(), 2);
    }

    #[test]
    fn test_normal_activation_delegates_and_bounces() {
        let f = fixture(&["a", "b"]);
        f.entry.set_selected_item(1);

        f.entry.activate_primary(false);
        f.entry.activate_secondary(false);
        f.entry.activate_special(false);

        assert_eq!(f.items[1].primary.load(Ordering::SeqCst), 1);
        assert_eq!(f.items[1].secondary.load(Ordering::SeqCst), 1);
        assert_eq!(f.items[1].special.load(Ordering::SeqCst), 1);
        assert_eq!(f.items[0].primary.load(Ordering::SeqCst), 0);
        assert_eq!(f.entry.len(), 2);

        let bounce = f.entry.config().animation.bounce_offset;
        assert_eq!(f.entry.anim.lock().radius_bounce.target(), bounce);
    }

    #[test]
    fn test_special_is_ignored_in_edit_mode() {
        let f = fixture(&["a"]);
        f.entry.activate_special(true);
        assert_eq!(f.items[0].special.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_apply_dispatches_events() {
        let f = fixture(&["a", "b"]);

        f.entry.apply(EntryEvent::Next, false);
        assert_eq!(f.entry.selected_item(), 1);
        f.entry.apply(EntryEvent::Primary, false);
        assert_eq!(f.items[1].primary.load(Ordering::SeqCst), 1);
        f.entry.apply(EntryEvent::Prev, false);
        assert_eq!(f.entry.selected_item(), 0);
        f.entry.apply(EntryEvent::Secondary, true);
        assert_eq!(f.names(), vec!["b"]);
        f.entry.apply(EntryEvent::Special, false);
        assert_eq!(f.items[1].special.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_is_active_follows_selected_item() {
        let f = fixture(&["a", "b"]);
        let inv = InventorySnapshot::new().with("b", 1, true);

        assert!(!f.entry.is_active(&inv));
        assert!(!f.entry.is_available(&inv));
        f.entry.next_item();
        assert!(f.entry.is_active(&inv));
        assert!(f.entry.is_available(&inv));
    }

    #[test]
    fn test_serialize_round_trip() {
        let f = fixture(&["a", "b", "c"]);
        f.entry.set_selected_item(2);

        let value = f.entry.serialize();
        assert_eq!(
            value,
            json!({
                "selecteditem": 2,
                "items": [{ "name": "a" }, { "name": "b" }, { "name": "c" }],
            })
        );

        let (ctx, _, _) = context_with(Config::default());
        let restored = Entry::deserialize(&value, ctx).unwrap();
        assert_eq!(restored.len(), 3);
        assert_eq!(restored.selected_item(), 2);
        assert_eq!(restored.serialize(), value);
    }

    #[test]
    fn test_deserialize_skips_broken_items_and_keeps_cursor() {
        let value = json!({
            "selecteditem": 2,
            "items": [{ "name": "a" }, { "name": "broken" }, { "name": "c" }],
        });
        let (ctx, _, _) = context_with(Config::default());
        let restored = Entry::deserialize(&value, ctx).unwrap();

        assert_eq!(restored.len(), 2);
        assert_eq!(restored.selected_item(), 2);

        let inv = InventorySnapshot::new().with("a", 1, true).with("c", 1, true);
        assert!(!restored.is_active(&inv));
        assert!(!restored.is_available(&inv));

        restored.next_item();
        assert_eq!(restored.selected_item(), 0);
    }

    #[test]
    fn test_prev_from_stale_cursor_clamps_to_last() {
        let f = fixture(&["a", "b"]);
        f.entry.set_selected_item(9);
        f.entry.prev_item();
        assert_eq!(f.entry.selected_item(), 1);
    }

    #[test]
    fn test_deserialize_rejects_malformed_entry() {
        let (ctx, _, _) = context_with(Config::default());
        assert!(Entry::deserialize(&json!({ "items": [] }), ctx.clone()).is_err());
        assert!(Entry::deserialize(&json!({ "selecteditem": "1", "items": [] }), ctx).is_err());
    }

    #[test]
    fn test_negative_cursor_loads_as_no_selection() {
        let value = json!({
            "selecteditem": -3,
            "items": [{ "name": "a" }, { "name": "b" }],
        });
        let (ctx, _, _) = context_with(Config::default());
        let restored = Entry::deserialize(&value, ctx).unwrap();

        assert_eq!(restored.len(), 2);
        let inv = InventorySnapshot::new().with("a", 1, true).with("b", 1, true);
        assert!(!restored.is_active(&inv));
        assert!(!restored.is_available(&inv));
        assert_eq!(restored.serialize()["selecteditem"], -1);

        restored.next_item();
        assert_eq!(restored.selected_item(), 0);
    }

    #[test]
    fn test_reset_animation_forces_zero() {
        let f = fixture(&["a"]);
        f.entry.activate_primary(false);
        f.entry.reset_animation();

        let anim = f.entry.anim.lock();
        for interp in [
            &anim.radius_inc,
            &anim.radius_bounce,
            &anim.inner_angle_inc,
            &anim.outer_angle_inc,
        ] {
            assert_eq!(interp.value(), 0.0);
        }
    }

    #[test]
    fn test_items_guard_exposes_live_list() {
        let f = fixture(&["a", "b"]);
        {
            let items = f.entry.items();
            assert_eq!(items.len(), 2);
        }
        f.entry.push_item(TestItem::handle("c"));
        assert_eq!(f.entry.items().len(), 3);
    }

    #[test]
    fn test_concurrent_removal_and_reads_never_tear() {
        let names: Vec<String> = (0..200).map(|i| format!("item{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let f = fixture(&refs);
        f.entry.set_selected_item(100);
        let entry = &f.entry;

        thread::scope(|s| {
            s.spawn(|| {
                for _ in 0..200 {
                    entry.activate_secondary(true);
                }
            });
            s.spawn(|| {
                loop {
                    {
                        let slots = entry.slots.read();
                        let len = slots.items.len();
                        assert!(slots.selected < len || (len == 0 && slots.selected == 0));
                    }
                    if entry.is_empty() {
                        assert_eq!(entry.len(), 0);
                        break;
                    }
                }
            });
            s.spawn(|| {
                let inv = InventorySnapshot::new();
                while !entry.is_empty() {
                    let _ = entry.is_active(&inv);
                    let _ = entry.serialize();
                }
            });
        });

        assert!(entry.is_empty());
    }
}
