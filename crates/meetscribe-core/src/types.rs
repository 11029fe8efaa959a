//! Shared types for transcription and diarization results

use serde::{Deserialize, Serialize};

use crate::merger::MergeError;

/// Label rendered for speech with no diarization coverage
pub const UNKNOWN_SPEAKER: &str = "UNKNOWN";

/// One utterance chunk produced by a speech-to-text engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechSegment {
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    /// Utterance text (may carry surrounding whitespace)
    pub text: String,
}

impl SpeechSegment {
    /// Get the duration of this segment
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// One contiguous span attributed to a single speaker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeakerSegment {
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    /// Opaque speaker label (e.g. "SPEAKER_00")
    pub speaker: String,
}

impl SpeakerSegment {
    /// Get the duration of this segment
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// A speech segment with an assigned speaker
///
/// Intermediate form between speaker assignment and run merging. `speaker`
/// stays `None` until a diarization span overlaps the segment or the
/// back-fill pass resolves it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributedSegment {
    pub start: f64,
    pub end: f64,
    pub speaker: Option<String>,
    pub text: String,
}

/// Consecutive same-speaker segments collapsed into one block of speech
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergedTurn {
    /// Start of the first member segment
    pub start: f64,
    /// End of the last member segment
    pub end: f64,
    /// Speaker label; `None` renders as [`UNKNOWN_SPEAKER`]
    pub speaker: Option<String>,
    /// Member texts joined with single spaces, in encounter order
    pub text: String,
}

impl MergedTurn {
    /// Label shown in the rendered transcript
    pub fn speaker_label(&self) -> &str {
        self.speaker.as_deref().unwrap_or(UNKNOWN_SPEAKER)
    }
}

/// Transcription result from a speech-to-text engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptResult {
    /// Ordered speech segments
    pub segments: Vec<SpeechSegment>,
    /// Full transcript text
    pub text: String,
    /// Language code
    pub language: Option<String>,
}

/// Diarization result from a speaker diarization engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiarizationResult {
    /// Ordered speaker spans; spans of different speakers may overlap
    pub segments: Vec<SpeakerSegment>,
}

impl DiarizationResult {
    /// Number of distinct speaker labels
    pub fn num_speakers(&self) -> usize {
        let mut speakers: Vec<&str> = self.segments.iter().map(|s| s.speaker.as_str()).collect();
        speakers.sort_unstable();
        speakers.dedup();
        speakers.len()
    }

    /// Render the speaker timeline listing, one span per line:
    /// `"{start}s - {end}s | Speaker {label}"`
    pub fn render_timeline(&self) -> String {
        self.segments
            .iter()
            .map(|seg| format!("{}s - {}s | Speaker {}", seg.start, seg.end, seg.speaker))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Parse speech segments out of raw engine JSON.
///
/// Guards against a caller handing over the flat transcript string (or any
/// other shape) instead of the segment list: anything that is not an array
/// of `{start, end, text}` records fails with
/// [`MergeError::MalformedSegments`]. Unknown fields on the records are
/// ignored.
pub fn speech_segments_from_json(value: serde_json::Value) -> Result<Vec<SpeechSegment>, MergeError> {
    serde_json::from_value(value).map_err(|e| MergeError::MalformedSegments(e.to_string()))
}

/// Parse speaker spans out of raw engine JSON.
///
/// Same shape guard as [`speech_segments_from_json`], for arrays of
/// `{start, end, speaker}` records.
pub fn speaker_segments_from_json(value: serde_json::Value) -> Result<Vec<SpeakerSegment>, MergeError> {
    serde_json::from_value(value).map_err(|e| MergeError::MalformedSegments(e.to_string()))
}
