use super::FallbackReason;
use serde_json::Value;

const FENCE: &str = "```";
const JSON_FENCE: &str = "```json";

/// Isolate the body of a fenced code block, if the text has one.
///
/// Prefers the last ```` ```json ```` fence, otherwise the first plain
/// fence; the body runs to the next fence or the end of the text.
pub fn extract_fenced(text: &str) -> &str {
    let trimmed = text.trim();
    let body = if let Some(start) = trimmed.rfind(JSON_FENCE) {
        &trimmed[start + JSON_FENCE.len()..]
    } else if let Some(start) = trimmed.find(FENCE) {
        &trimmed[start + FENCE.len()..]
    } else {
        return trimmed;
    };
    match body.find(FENCE) {
        Some(end) => body[..end].trim(),
        None => body.trim(),
    }
}

/// Slice from the first `{` to the last `}` inclusive.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

/// Strip conversational wrapping from an oracle reply and parse the JSON
/// object inside it. The slice always starts at `{`, so a successful parse
/// is an object.
pub fn parse_oracle_object(raw: &str) -> Result<Value, FallbackReason> {
    let body = extract_fenced(raw);
    let json = extract_json_object(body).ok_or(FallbackReason::NoJsonObject)?;
    serde_json::from_str(json).map_err(|e| FallbackReason::InvalidJson(e.to_string()))
}
