//! Recording pipeline: transcribe, diarize, align, persist
//!
//! The [`Pipeline`] struct is the explicit engine registry: providers are
//! constructed once at process start and the pipeline is handed by
//! reference wherever a recording needs processing, so engines load once
//! and are reused across runs.

use std::path::{Path, PathBuf};

use tracing::{info, warn};
use uuid::Uuid;

use meetscribe_core::{
    align, render_transcript, DiarizationResult, ExportError, Exporter, MergedTurn,
    TranscriptResult,
};

use crate::error::PipelineError;
use crate::prompts;
use crate::provider::{DiarizationProvider, SpeechProvider, SummaryProvider};

/// Artifact destinations for a pipeline run. Unset paths are skipped.
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    /// Raw transcript text from the speech engine
    pub transcript_text_path: Option<PathBuf>,
    /// Speech engine result as JSON
    pub transcript_json_path: Option<PathBuf>,
    /// Speaker timeline listing
    pub timeline_path: Option<PathBuf>,
    /// Speaker-attributed transcript
    pub merged_path: Option<PathBuf>,
    /// Merged turns as a JSON report
    pub turns_json_path: Option<PathBuf>,
}

/// Output of a pipeline run
///
/// `export_error` is set when persisting an artifact failed; the in-memory
/// results are complete either way.
#[derive(Debug)]
pub struct PipelineOutput {
    /// Identifier for this run, also present in the logs
    pub run_id: Uuid,
    /// Speech engine output
    pub transcript: TranscriptResult,
    /// Diarization engine output
    pub diarization: DiarizationResult,
    /// Merged speaker turns
    pub turns: Vec<MergedTurn>,
    /// Canonical rendered transcript
    pub text: String,
    /// First artifact write failure, if any
    pub export_error: Option<ExportError>,
}

/// Engine set for the recording pipeline
pub struct Pipeline<S, D> {
    speech: S,
    diarization: D,
}

impl<S: SpeechProvider, D: DiarizationProvider> Pipeline<S, D> {
    /// Create a pipeline over the given engines
    pub fn new(speech: S, diarization: D) -> Self {
        Self { speech, diarization }
    }

    /// Run the full pipeline over one recording.
    ///
    /// Transcription and diarization run concurrently; their results are
    /// aligned, rendered, and persisted per `options`. Export failures do
    /// not fail the run: the first one is carried in
    /// [`PipelineOutput::export_error`].
    pub async fn run(
        &self,
        audio_path: &Path,
        options: &PipelineOptions,
    ) -> Result<PipelineOutput, PipelineError> {
        let run_id = Uuid::new_v4();
        info!(
            %run_id,
            audio = %audio_path.display(),
            speech = self.speech.name(),
            diarization = self.diarization.name(),
            "starting pipeline run"
        );

        let (transcript, diarization) = tokio::try_join!(
            self.speech.transcribe(audio_path),
            self.diarization.diarize(audio_path),
        )?;

        info!(
            %run_id,
            segments = transcript.segments.len(),
            speakers = diarization.num_speakers(),
            "engines finished, aligning"
        );

        let turns = align(&transcript.segments, &diarization.segments)?;
        let text = render_transcript(&turns);

        let export_error = persist_artifacts(&transcript, &diarization, &turns, &text, options);
        if let Some(err) = &export_error {
            warn!(%run_id, "artifact export failed: {}", err);
        }

        info!(%run_id, turns = turns.len(), "pipeline run complete");

        Ok(PipelineOutput {
            run_id,
            transcript,
            diarization,
            turns,
            text,
            export_error,
        })
    }
}

/// Write the requested artifacts, returning the first failure without
/// skipping the remaining writes.
fn persist_artifacts(
    transcript: &TranscriptResult,
    diarization: &DiarizationResult,
    turns: &[MergedTurn],
    text: &str,
    options: &PipelineOptions,
) -> Option<ExportError> {
    let mut first_error: Option<ExportError> = None;
    let mut record = |result: Result<(), ExportError>| {
        if let Err(err) = result {
            if first_error.is_none() {
                first_error = Some(err);
            }
        }
    };

    if let Some(path) = &options.transcript_text_path {
        record(Exporter::write_text(transcript.text.trim(), path));
    }
    if let Some(path) = &options.transcript_json_path {
        record(Exporter::write_transcript_json(transcript, path));
    }
    if let Some(path) = &options.timeline_path {
        record(Exporter::write_speaker_timeline(diarization, path));
    }
    if let Some(path) = &options.merged_path {
        record(Exporter::write_text(text, path));
    }
    if let Some(path) = &options.turns_json_path {
        record(Exporter::write_turns_json(turns, path, true));
    }

    first_error
}

/// Generate a meeting summary for a rendered transcript.
///
/// The transcript must contain non-whitespace text. The provider's response
/// is trimmed and optionally persisted; a failed write surfaces as an
/// export error after the summary has been produced.
pub async fn summarize_transcript<P: SummaryProvider>(
    provider: &P,
    transcript_text: &str,
    save_path: Option<&Path>,
) -> Result<String, PipelineError> {
    if transcript_text.trim().is_empty() {
        return Err(PipelineError::EmptyTranscript);
    }

    info!(provider = provider.name(), "requesting meeting summary");

    let prompt = prompts::build_summary_prompt(transcript_text);
    let summary = provider
        .complete(prompts::SUMMARY_SYSTEM_ROLE, &prompt)
        .await?
        .trim()
        .to_string();

    if let Some(path) = save_path {
        Exporter::write_text(&summary, path)?;
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use meetscribe_core::{SpeakerSegment, SpeechSegment};

    struct StubSpeech;

    impl SpeechProvider for StubSpeech {
        async fn transcribe(&self, _audio_path: &Path) -> Result<TranscriptResult, PipelineError> {
            Ok(TranscriptResult {
                segments: vec![
                    SpeechSegment { start: 0.0, end: 2.0, text: " Hello everyone.".to_string() },
                    SpeechSegment { start: 2.0, end: 4.0, text: " Let's begin.".to_string() },
                    SpeechSegment { start: 4.0, end: 6.0, text: " Thanks for joining.".to_string() },
                ],
                text: " Hello everyone. Let's begin. Thanks for joining. ".to_string(),
                language: Some("en".to_string()),
            })
        }

        fn name(&self) -> &'static str {
            "stub-speech"
        }
    }

    struct StubDiarization;

    impl DiarizationProvider for StubDiarization {
        async fn diarize(&self, _audio_path: &Path) -> Result<DiarizationResult, PipelineError> {
            Ok(DiarizationResult {
                segments: vec![
                    SpeakerSegment { start: 0.0, end: 4.0, speaker: "SPEAKER_00".to_string() },
                    SpeakerSegment { start: 4.0, end: 6.0, speaker: "SPEAKER_01".to_string() },
                ],
            })
        }

        fn name(&self) -> &'static str {
            "stub-diarization"
        }
    }

    struct FailingDiarization;

    impl DiarizationProvider for FailingDiarization {
        async fn diarize(&self, _audio_path: &Path) -> Result<DiarizationResult, PipelineError> {
            Err(PipelineError::Diarization("engine exploded".to_string()))
        }

        fn name(&self) -> &'static str {
            "failing-diarization"
        }
    }

    struct StubSummarizer;

    impl SummaryProvider for StubSummarizer {
        async fn complete(&self, system: &str, prompt: &str) -> Result<String, PipelineError> {
            assert!(system.contains("meeting summaries"));
            assert!(prompt.contains("Action items"));
            Ok("  **Overview**: a short meeting.  ".to_string())
        }

        fn name(&self) -> &'static str {
            "stub-summarizer"
        }
    }

    #[tokio::test]
    async fn test_run_produces_turns_and_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let options = PipelineOptions {
            transcript_text_path: Some(dir.path().join("text").join("transcript.txt")),
            transcript_json_path: Some(dir.path().join("json").join("transcript.json")),
            timeline_path: Some(dir.path().join("diarization.txt")),
            merged_path: Some(dir.path().join("final").join("speaker_transcript.txt")),
            turns_json_path: Some(dir.path().join("turns.json")),
        };

        let pipeline = Pipeline::new(StubSpeech, StubDiarization);
        let output = pipeline
            .run(Path::new("meeting.wav"), &options)
            .await
            .unwrap();

        assert!(output.export_error.is_none());
        assert_eq!(output.turns.len(), 2);
        assert_eq!(output.turns[0].speaker.as_deref(), Some("SPEAKER_00"));
        assert_eq!(output.turns[0].text, "Hello everyone. Let's begin.");
        assert_eq!(
            output.text,
            "[00:00–00:04] SPEAKER_00: Hello everyone. Let's begin.\n\
             [00:04–00:06] SPEAKER_01: Thanks for joining."
        );

        let merged = std::fs::read_to_string(dir.path().join("final").join("speaker_transcript.txt")).unwrap();
        assert_eq!(merged, output.text);

        let raw_text = std::fs::read_to_string(dir.path().join("text").join("transcript.txt")).unwrap();
        assert_eq!(raw_text, "Hello everyone. Let's begin. Thanks for joining.");

        assert!(dir.path().join("json").join("transcript.json").exists());
        assert!(dir.path().join("diarization.txt").exists());
        assert!(dir.path().join("turns.json").exists());
    }

    #[tokio::test]
    async fn test_run_without_artifact_paths_writes_nothing() {
        let pipeline = Pipeline::new(StubSpeech, StubDiarization);
        let output = pipeline
            .run(Path::new("meeting.wav"), &PipelineOptions::default())
            .await
            .unwrap();

        assert!(output.export_error.is_none());
        assert!(!output.text.is_empty());
    }

    #[tokio::test]
    async fn test_engine_failure_propagates() {
        let pipeline = Pipeline::new(StubSpeech, FailingDiarization);
        let result = pipeline
            .run(Path::new("meeting.wav"), &PipelineOptions::default())
            .await;

        assert!(matches!(result, Err(PipelineError::Diarization(_))));
    }

    #[tokio::test]
    async fn test_export_failure_keeps_computed_output() {
        let dir = tempfile::tempdir().unwrap();

        // A regular file where a directory is needed makes the write fail.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "in the way").unwrap();

        let options = PipelineOptions {
            merged_path: Some(blocker.join("nested").join("out.txt")),
            ..Default::default()
        };

        let pipeline = Pipeline::new(StubSpeech, StubDiarization);
        let output = pipeline
            .run(Path::new("meeting.wav"), &options)
            .await
            .unwrap();

        assert!(matches!(output.export_error, Some(ExportError::Io(_))));
        assert_eq!(output.turns.len(), 2);
        assert!(!output.text.is_empty());
    }

    #[tokio::test]
    async fn test_summarize_transcript_trims_response() {
        let summary = summarize_transcript(&StubSummarizer, "[00:00–00:04] A: hello", None)
            .await
            .unwrap();
        assert_eq!(summary, "**Overview**: a short meeting.");
    }

    #[tokio::test]
    async fn test_summarize_transcript_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summaries").join("meeting_summary.txt");

        let summary = summarize_transcript(&StubSummarizer, "[00:00–00:04] A: hello", Some(&path))
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), summary);
    }

    #[tokio::test]
    async fn test_summarize_rejects_empty_transcript() {
        let result = summarize_transcript(&StubSummarizer, "   \n  ", None).await;
        assert!(matches!(result, Err(PipelineError::EmptyTranscript)));
    }
}
