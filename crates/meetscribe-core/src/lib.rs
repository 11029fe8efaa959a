//! meetscribe-core - meeting transcript core library
//!
//! Data model, transcript/diarization alignment, and artifact export.

pub mod exporter;
pub mod merger;
pub mod types;

pub use exporter::{ExportError, Exporter};
pub use merger::{align, format_timestamp, render_transcript, MergeError};
pub use types::*;
