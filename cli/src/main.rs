//! Meetscribe command-line interface
//!
//! Thin surface over meetscribe-core and meetscribe-pipeline for working
//! with captured engine artifacts.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use meetscribe_core::{
    align, render_transcript, speaker_segments_from_json, speech_segments_from_json, Exporter,
};
use meetscribe_pipeline::{Pipeline, PipelineOptions, ReplayDiarization, ReplayTranscript};

#[derive(Parser)]
#[command(name = "meetscribe", about = "Speaker-attributed meeting transcripts", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Merge captured engine artifacts into a speaker-attributed transcript
    Merge {
        /// Speech engine output: either the full JSON result or a bare
        /// segment array
        #[arg(long)]
        transcript: PathBuf,

        /// Diarization output: a JSON array of speaker spans
        #[arg(long)]
        diarization: PathBuf,

        /// Write the merged transcript here
        #[arg(long)]
        out: Option<PathBuf>,

        /// Write the merged turns as a JSON report here
        #[arg(long)]
        json_out: Option<PathBuf>,
    },

    /// Re-run the full pipeline from captured engine artifacts
    Replay {
        /// The recording the artifacts were captured from
        #[arg(long)]
        audio: PathBuf,

        /// Captured speech engine result (JSON)
        #[arg(long)]
        transcript: PathBuf,

        /// Captured diarization spans (JSON array)
        #[arg(long)]
        diarization: PathBuf,

        /// Directory for the standard artifact set
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Merge {
            transcript,
            diarization,
            out,
            json_out,
        } => merge(transcript, diarization, out, json_out),
        Command::Replay {
            audio,
            transcript,
            diarization,
            out_dir,
        } => replay(audio, transcript, diarization, out_dir).await,
    }
}

fn merge(
    transcript: PathBuf,
    diarization: PathBuf,
    out: Option<PathBuf>,
    json_out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let speech_value = read_json(&transcript)?;
    let speech = speech_segments_from_json(segment_payload(speech_value))
        .with_context(|| format!("loading speech segments from {}", transcript.display()))?;

    let speaker_value = read_json(&diarization)?;
    let spans = speaker_segments_from_json(segment_payload(speaker_value))
        .with_context(|| format!("loading speaker spans from {}", diarization.display()))?;

    let turns = align(&speech, &spans)?;
    let text = render_transcript(&turns);

    println!("{}", text);

    if let Some(path) = out {
        Exporter::write_text(&text, &path)
            .with_context(|| format!("writing transcript to {}", path.display()))?;
        info!("wrote merged transcript to {}", path.display());
    }

    if let Some(path) = json_out {
        Exporter::write_turns_json(&turns, &path, true)
            .with_context(|| format!("writing turn report to {}", path.display()))?;
        info!("wrote turn report to {}", path.display());
    }

    Ok(())
}

async fn replay(
    audio: PathBuf,
    transcript: PathBuf,
    diarization: PathBuf,
    out_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let options = match &out_dir {
        Some(dir) => PipelineOptions {
            transcript_text_path: Some(dir.join("transcript.txt")),
            transcript_json_path: Some(dir.join("transcript.json")),
            timeline_path: Some(dir.join("diarization.txt")),
            merged_path: Some(dir.join("speaker_transcript.txt")),
            turns_json_path: Some(dir.join("turns.json")),
        },
        None => PipelineOptions::default(),
    };

    let pipeline = Pipeline::new(
        ReplayTranscript::new(&transcript),
        ReplayDiarization::new(&diarization),
    );

    let output = pipeline.run(&audio, &options).await?;

    println!("{}", output.text);

    // The computed result is already printed; a failed artifact write still
    // fails the command.
    if let Some(err) = output.export_error {
        anyhow::bail!("run {} completed but artifact export failed: {}", output.run_id, err);
    }

    Ok(())
}

fn read_json(path: &PathBuf) -> anyhow::Result<serde_json::Value> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

/// Accept either a full engine result object or a bare segment array: an
/// object's `segments` field is the payload, anything else passes through
/// to the shape guard untouched.
fn segment_payload(value: serde_json::Value) -> serde_json::Value {
    match value.get("segments") {
        Some(segments) => segments.clone(),
        None => value,
    }
}
