pub mod config;
pub mod events;
pub mod gui;
pub mod item;
pub mod macros;
pub mod sys;
