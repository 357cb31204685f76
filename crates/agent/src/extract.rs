//! Side-channel field extraction.
//!
//! Each info-gathering turn asks the oracle, outside the visible
//! conversation, to re-read the transcript and emit the candidate fields
//! as JSON. The reply is parsed permissively (the oracle may wrap the
//! object in prose) and merged additively into the record. Every failure
//! mode here is swallowed: extraction is best-effort and must never
//! disturb the conversation.

use scout_core::{CandidateField, CandidateRecord, Transcript, Turn};
use serde_json::Value;
use tracing::{debug, warn};

use crate::oracle::Oracle;

const EXTRACTION_INSTRUCTION: &str = "\
Extract the following information about the candidate from the conversation, if available:
- Full Name
- Email Address
- Phone Number
- Years of Experience
- Desired Position(s)
- Current Location
- Tech Stack (languages, frameworks, databases, tools)

Respond with a JSON object using exactly these keys:
full_name, email, phone, experience, desired_position, location, tech_stack

Use null for any field that cannot be determined from the conversation. If a piece of \
information was provided earlier in the conversation, include it rather than setting \
it to null. Reply with the JSON object and nothing else.";

/// Merges any candidate fields found in `latest_user_text` (read in the
/// context of the whole transcript) into `record`. The session transcript
/// is never touched; the extraction exchange is invisible to the user.
pub async fn extract_and_merge(
    oracle: &dyn Oracle,
    transcript: &Transcript,
    latest_user_text: &str,
    record: &mut CandidateRecord,
) {
    let mut context = transcript.render();
    if !context.is_empty() {
        context.push('\n');
    }
    context.push_str("User: ");
    context.push_str(latest_user_text);

    let turns = [Turn::user(format!("Here is the conversation:\n{context}"))];
    let reply = match oracle.complete(EXTRACTION_INSTRUCTION, &turns).await {
        Ok(reply) => reply,
        Err(error) => {
            warn!(event_name = "extract.oracle_failed", error = %error, "extraction call failed; record unchanged");
            return;
        }
    };

    let Some(object_text) = find_json_object(&reply) else {
        warn!(event_name = "extract.no_json_object", "no JSON object in extraction reply; record unchanged");
        return;
    };

    let parsed: Value = match serde_json::from_str(object_text) {
        Ok(parsed) => parsed,
        Err(error) => {
            warn!(event_name = "extract.malformed_json", error = %error, "extraction reply did not parse; record unchanged");
            return;
        }
    };

    let updated = merge_fields(record, &parsed);
    debug!(
        event_name = "extract.merged",
        updated_fields = updated,
        known_fields = record.len(),
        "extraction merge complete"
    );
}

/// Locates the first top-level brace-delimited substring: from the first
/// `{` through the last `}`. Greedy on purpose so objects with nested
/// braces survive; oracle output carries no format guarantee, so this is
/// recovery, not parsing.
pub fn find_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

/// Writes every recognized, non-null, non-empty field into the record.
/// Returns how many fields were written. Unknown keys are ignored; null
/// and empty values leave existing entries alone.
fn merge_fields(record: &mut CandidateRecord, parsed: &Value) -> usize {
    let Some(object) = parsed.as_object() else {
        return 0;
    };

    let mut updated = 0;
    for field in CandidateField::ALL {
        let Some(value) = object.get(field.key()) else {
            continue;
        };
        if let Some(text) = coerce_to_text(value) {
            record.set(field, text);
            updated += 1;
        }
    }
    updated
}

/// The oracle is loose with types: experience may come back as a number,
/// tech_stack as an array. Scalars stringify; scalar arrays join with
/// ", "; null, empty, and nested objects yield nothing.
fn coerce_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Object(_) => None,
        Value::String(text) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(coerce_to_text).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
    }
}
