//! Hotkey registry adapters.

pub mod dispatcher;

pub use dispatcher::CommandHotkeys;
