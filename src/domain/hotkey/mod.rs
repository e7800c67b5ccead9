//! Hotkey combination value objects.

pub mod combo;

pub use combo::{KeyCombo, Modifier};
