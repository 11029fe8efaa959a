//! Artifact export
//!
//! Writes are kept separate from computation so a failed write can never
//! discard an already-computed result.

use std::fs;
use std::path::Path;

use chrono::Local;
use serde::Serialize;
use thiserror::Error;

use crate::types::{DiarizationResult, MergedTurn, TranscriptResult};

/// Export errors, distinct from alignment errors
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Transcript artifact writer
pub struct Exporter;

impl Exporter {
    /// Write text as a UTF-8 file, creating parent directories and
    /// overwriting any existing file. Content is written exactly as given,
    /// with no trailing newline appended.
    pub fn write_text<P: AsRef<Path>>(text: &str, output_path: P) -> Result<(), ExportError> {
        let output_path = output_path.as_ref();

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(output_path, text)?;
        Ok(())
    }

    /// Write the speaker timeline listing produced by diarization.
    pub fn write_speaker_timeline<P: AsRef<Path>>(
        result: &DiarizationResult,
        output_path: P,
    ) -> Result<(), ExportError> {
        Self::write_text(&result.render_timeline(), output_path)
    }

    /// Write a transcription result as pretty-printed JSON.
    pub fn write_transcript_json<P: AsRef<Path>>(
        result: &TranscriptResult,
        output_path: P,
    ) -> Result<(), ExportError> {
        let output_path = output_path.as_ref();

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(result)?;
        fs::write(output_path, json)?;
        Ok(())
    }

    /// Write merged turns as a JSON report.
    pub fn write_turns_json<P: AsRef<Path>>(
        turns: &[MergedTurn],
        output_path: P,
        pretty: bool,
    ) -> Result<(), ExportError> {
        let output_path = output_path.as_ref();

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let report = JsonTranscript::from_turns(turns);

        let json = if pretty {
            serde_json::to_string_pretty(&report)?
        } else {
            serde_json::to_string(&report)?
        };

        fs::write(output_path, json)?;
        Ok(())
    }
}

/// JSON report structure
#[derive(Serialize)]
struct JsonTranscript {
    version: String,
    generated_at: String,
    turn_count: usize,
    speaker_count: usize,
    duration: f64,
    turns: Vec<JsonTurn>,
}

#[derive(Serialize)]
struct JsonTurn {
    start: f64,
    end: f64,
    speaker: String,
    text: String,
}

impl JsonTranscript {
    fn from_turns(turns: &[MergedTurn]) -> Self {
        let duration = turns.iter().map(|t| t.end).fold(0.0f64, |a, b| a.max(b));

        let mut speakers: Vec<&str> = turns.iter().map(|t| t.speaker_label()).collect();
        speakers.sort_unstable();
        speakers.dedup();

        Self {
            version: "1.0".to_string(),
            generated_at: Local::now().to_rfc3339(),
            turn_count: turns.len(),
            speaker_count: speakers.len(),
            duration,
            turns: turns
                .iter()
                .map(|t| JsonTurn {
                    start: t.start,
                    end: t.end,
                    speaker: t.speaker_label().to_string(),
                    text: t.text.clone(),
                })
                .collect(),
        }
    }
}
