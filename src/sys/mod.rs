pub mod sound;
