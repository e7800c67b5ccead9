//! Notification adapters.

pub mod notify_rust;

pub use notify_rust::{NotifyRustNotifier, NullNotifier};
