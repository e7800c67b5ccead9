//! Capture value objects: triggers, image data, persisted metadata.

pub mod image;
pub mod metadata;
pub mod trigger;

pub use image::{ImageData, ImageInfo, ImageMimeType};
pub use metadata::CaptureMetadata;
pub use trigger::CaptureTrigger;
