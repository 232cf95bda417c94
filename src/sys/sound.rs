use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct SoundId(String);

crate::impl_string_newtype!(SoundId);

/// Fire-and-forget audio sink. Implementations must not block the caller.
pub trait SoundPlayer: Send + Sync {
    fn play(&self, sound: &SoundId);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LogSound;

impl SoundPlayer for LogSound {
    fn play(&self, sound: &SoundId) {
        log::debug!("play sound {}", sound.as_str());
    }
}
