pub mod anim;
pub mod canvas;
pub mod entry;
pub mod geometry;
pub mod theme;

pub use canvas::{Canvas, DrawArgs, DrawError};
pub use geometry::{AngleRange, EntryGeometry, Point};
