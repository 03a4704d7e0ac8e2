//! Core contracts and helpers for schemadump.
//!
//! This crate defines the table report model, the error taxonomy, the raw
//! value normalizer, and the text renderer shared by the introspection
//! adapter and the CLI.

pub mod error;
pub mod redaction;
pub mod render;
pub mod report;
pub mod value;

pub use error::{Error, Result};
pub use redaction::redact_connection_string;
pub use render::render_document;
pub use report::{Column, ForeignKey, IndexDescriptor, KeyRole, TableReport};
pub use value::{normalize, normalize_required, RawValue};
