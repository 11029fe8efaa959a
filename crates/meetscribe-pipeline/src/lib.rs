//! meetscribe-pipeline - engine contracts and recording pipeline
//!
//! Defines the provider traits that speech-to-text, diarization, and
//! summarization engines implement, and the pipeline that wires providers
//! into the aligner and artifact exporters.

pub mod error;
pub mod pipeline;
pub mod prompts;
pub mod provider;
pub mod replay;
pub mod text;

pub use error::PipelineError;
pub use pipeline::{summarize_transcript, Pipeline, PipelineOptions, PipelineOutput};
pub use provider::{DiarizationProvider, SpeechProvider, SummaryProvider};
pub use replay::{ReplayDiarization, ReplayTranscript};

// Re-export types from meetscribe-core
pub use meetscribe_core::{DiarizationResult, MergedTurn, TranscriptResult};
