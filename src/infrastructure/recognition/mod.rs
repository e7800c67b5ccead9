//! Text recognition adapters.

pub mod tesseract;

pub use tesseract::TesseractRecognizer;
