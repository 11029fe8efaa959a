//! Merge speaker diarization results with a transcript
//!
//! Assigns a speaker to every speech segment by interval overlap, resolves
//! unknown assignments by carrying the last known speaker forward, collapses
//! consecutive same-speaker segments into turns, and renders the result as
//! the canonical display transcript.

use thiserror::Error;
use tracing::debug;

use crate::types::{AttributedSegment, MergedTurn, SpeakerSegment, SpeechSegment};

/// Alignment errors
#[derive(Error, Debug)]
pub enum MergeError {
    /// Speech segment sequence has zero elements
    #[error("Speech segment list is empty")]
    EmptySegments,

    /// Input was not a sequence of segment records
    #[error("Expected a list of segment records, not plain text: {0}")]
    MalformedSegments(String),
}

/// Align transcript segments with diarization output.
///
/// Input sequences are assumed ordered by start time; they are never
/// re-sorted. An empty `diarization` list is not an error: every segment
/// resolves to the unknown speaker and the result collapses into a single
/// turn.
pub fn align(
    speech: &[SpeechSegment],
    diarization: &[SpeakerSegment],
) -> Result<Vec<MergedTurn>, MergeError> {
    if speech.is_empty() {
        return Err(MergeError::EmptySegments);
    }

    // Step 1: assign a speaker to each speech segment
    let mut attributed: Vec<AttributedSegment> = speech
        .iter()
        .map(|w| AttributedSegment {
            start: w.start,
            end: w.end,
            speaker: find_speaker(w.start, w.end, diarization),
            text: w.text.trim().to_string(),
        })
        .collect();

    // Step 2: resolve unknown speakers
    fill_unknown_speakers(&mut attributed);

    // Step 3: merge consecutive same-speaker segments
    let turns = merge_consecutive_segments(attributed);

    debug!(
        "aligned {} speech segments against {} speaker spans into {} turns",
        speech.len(),
        diarization.len(),
        turns.len()
    );

    Ok(turns)
}

/// Find the speaker whose span overlaps the given interval.
///
/// The first overlapping span in list order wins, even when a later span
/// overlaps more. Overlap is strict: touching endpoints do not count.
fn find_speaker(start: f64, end: f64, diarization: &[SpeakerSegment]) -> Option<String> {
    diarization
        .iter()
        .find(|seg| start.max(seg.start) < end.min(seg.end))
        .map(|seg| seg.speaker.clone())
}

/// Rewrite unknown segments to the most recent known speaker.
///
/// Leading unknowns before any identified speaker stay unknown.
fn fill_unknown_speakers(segments: &mut [AttributedSegment]) {
    let mut last_speaker: Option<String> = None;

    for seg in segments {
        match &seg.speaker {
            Some(speaker) => last_speaker = Some(speaker.clone()),
            None => seg.speaker = last_speaker.clone(),
        }
    }
}

/// Collapse adjacent segments sharing a speaker into single turns.
///
/// Adjacency only: same-speaker runs separated by another speaker stay
/// separate turns.
fn merge_consecutive_segments(segments: Vec<AttributedSegment>) -> Vec<MergedTurn> {
    let mut merged: Vec<MergedTurn> = Vec::new();

    for seg in segments {
        match merged.last_mut() {
            Some(last) if last.speaker == seg.speaker => {
                last.end = seg.end;
                last.text.push(' ');
                last.text.push_str(&seg.text);
            }
            _ => merged.push(MergedTurn {
                start: seg.start,
                end: seg.end,
                speaker: seg.speaker,
                text: seg.text,
            }),
        }
    }

    merged
}

/// Format float seconds as zero-padded `mm:ss`.
///
/// Fractional seconds are truncated, never rounded. Minutes are not capped
/// at 59: a timestamp past 59:59 keeps counting minutes.
pub fn format_timestamp(seconds: f64) -> String {
    let total = seconds as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Render merged turns as the canonical display transcript.
///
/// One line per turn, `"[mm:ss–mm:ss] <speaker>: <text>"`, joined with a
/// single newline and no trailing newline.
pub fn render_transcript(turns: &[MergedTurn]) -> String {
    turns
        .iter()
        .map(|turn| {
            format!(
                "[{}–{}] {}: {}",
                format_timestamp(turn.start),
                format_timestamp(turn.end),
                turn.speaker_label(),
                turn.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
