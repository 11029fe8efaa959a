//! Prompt templates for meeting summarization

/// System role sent alongside the summary prompt
pub const SUMMARY_SYSTEM_ROLE: &str = "You generate professional meeting summaries.";

/// Build the meeting summary prompt for a rendered transcript
pub fn build_summary_prompt(transcript: &str) -> String {
    format!(
        r#"You are an AI meeting assistant.

Summarize the following meeting transcript clearly and professionally.

Provide:
1. Meeting overview (1-2 lines)
2. Key discussion points (bullet points)
3. Decisions or instructions
4. Action items (if any)

Transcript:
{transcript}"#,
        transcript = transcript,
    )
}
