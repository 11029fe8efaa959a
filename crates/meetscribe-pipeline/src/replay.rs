//! Replay providers that feed the pipeline from captured engine output
//!
//! Useful for re-running the merge and summary stages without re-running
//! the engines: point a replay provider at the JSON artifact a previous run
//! captured and it will serve that result for any audio path.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use meetscribe_core::{DiarizationResult, SpeakerSegment, TranscriptResult};

use crate::error::PipelineError;
use crate::provider::{DiarizationProvider, SpeechProvider};

/// Speech provider replaying a captured transcription artifact
///
/// The artifact is the speech engine's JSON result: an object carrying at
/// least `segments` and `text`. Unknown fields are ignored.
pub struct ReplayTranscript {
    artifact_path: PathBuf,
}

impl ReplayTranscript {
    /// Create a provider serving the given artifact
    pub fn new<P: Into<PathBuf>>(artifact_path: P) -> Self {
        Self {
            artifact_path: artifact_path.into(),
        }
    }
}

impl SpeechProvider for ReplayTranscript {
    async fn transcribe(&self, audio_path: &Path) -> Result<TranscriptResult, PipelineError> {
        debug!(
            "replaying transcription of {} from {}",
            audio_path.display(),
            self.artifact_path.display()
        );

        let raw = fs::read_to_string(&self.artifact_path).await.map_err(|e| {
            PipelineError::Transcription(format!(
                "failed to read transcript artifact {}: {}",
                self.artifact_path.display(),
                e
            ))
        })?;

        serde_json::from_str(&raw).map_err(|e| {
            PipelineError::Transcription(format!(
                "invalid transcript artifact {}: {}",
                self.artifact_path.display(),
                e
            ))
        })
    }

    fn name(&self) -> &'static str {
        "replay-transcript"
    }
}

/// Diarization provider replaying a captured speaker-span artifact
///
/// The artifact is a JSON array of `{start, end, speaker}` spans.
pub struct ReplayDiarization {
    artifact_path: PathBuf,
}

impl ReplayDiarization {
    /// Create a provider serving the given artifact
    pub fn new<P: Into<PathBuf>>(artifact_path: P) -> Self {
        Self {
            artifact_path: artifact_path.into(),
        }
    }
}

impl DiarizationProvider for ReplayDiarization {
    async fn diarize(&self, audio_path: &Path) -> Result<DiarizationResult, PipelineError> {
        debug!(
            "replaying diarization of {} from {}",
            audio_path.display(),
            self.artifact_path.display()
        );

        let raw = fs::read_to_string(&self.artifact_path).await.map_err(|e| {
            PipelineError::Diarization(format!(
                "failed to read diarization artifact {}: {}",
                self.artifact_path.display(),
                e
            ))
        })?;

        let segments: Vec<SpeakerSegment> = serde_json::from_str(&raw).map_err(|e| {
            PipelineError::Diarization(format!(
                "invalid diarization artifact {}: {}",
                self.artifact_path.display(),
                e
            ))
        })?;

        Ok(DiarizationResult { segments })
    }

    fn name(&self) -> &'static str {
        "replay-diarization"
    }
}
