//! Screen capture adapters.

pub mod clipboard;
pub mod grim;

pub use clipboard::ClipboardCapture;
pub use grim::GrimCapture;
