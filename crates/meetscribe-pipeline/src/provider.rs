//! Engine provider contracts
//!
//! Real engines (Whisper-style speech models, pyannote-style diarization,
//! hosted LLMs) live behind these traits; the pipeline only depends on the
//! data shapes they produce.

use std::path::Path;

use meetscribe_core::{DiarizationResult, TranscriptResult};

use crate::error::PipelineError;

/// Speech-to-text engine contract
#[trait_variant::make(SpeechProvider: Send)]
pub trait LocalSpeechProvider {
    /// Transcribe an audio file into ordered speech segments plus the
    /// overall transcript text.
    async fn transcribe(&self, audio_path: &Path) -> Result<TranscriptResult, PipelineError>;

    /// Get provider name
    fn name(&self) -> &'static str;
}

/// Speaker diarization engine contract
#[trait_variant::make(DiarizationProvider: Send)]
pub trait LocalDiarizationProvider {
    /// Partition an audio file into speaker-attributed spans.
    async fn diarize(&self, audio_path: &Path) -> Result<DiarizationResult, PipelineError>;

    /// Get provider name
    fn name(&self) -> &'static str;
}

/// Summarization engine contract
#[trait_variant::make(SummaryProvider: Send)]
pub trait LocalSummaryProvider {
    /// Produce a completion for the given system role and prompt.
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, PipelineError>;

    /// Get provider name
    fn name(&self) -> &'static str;
}
