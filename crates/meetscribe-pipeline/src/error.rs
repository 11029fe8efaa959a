//! Pipeline error types

use thiserror::Error;

use meetscribe_core::{ExportError, MergeError};

/// Pipeline-related errors
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Speech-to-text engine failed
    #[error("Transcription failed: {0}")]
    Transcription(String),

    /// Diarization engine failed
    #[error("Diarization failed: {0}")]
    Diarization(String),

    /// Summarization engine failed
    #[error("Summarization failed: {0}")]
    Summarization(String),

    /// Transcript text was empty
    #[error("Transcript text is empty")]
    EmptyTranscript,

    /// Alignment failed
    #[error(transparent)]
    Merge(#[from] MergeError),

    /// Artifact export failed
    #[error(transparent)]
    Export(#[from] ExportError),
}
