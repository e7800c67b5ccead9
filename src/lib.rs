//! PlanSnap - capture screen regions into structured plans
//!
//! This crate captures a screen region, runs OCR over it, sends the
//! recognized text to a remote extraction service, and hands the
//! resulting plan records to a presentation sink.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Value objects, the pipeline state machine, and errors
//! - **Application**: The capture pipeline orchestrator and port traits
//! - **Infrastructure**: Adapter implementations (grim, slurp,
//!   tesseract, the extraction API, notifications, filesystem storage)
//! - **CLI**: Argument parsing, presenter, daemon runner, and IPC

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
