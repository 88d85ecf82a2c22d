// src/normalize.rs

//! Turns whatever the backend sent back into a single display string.
//!
//! The backend has no fixed reply shape, so success bodies go through an
//! ordered list of matchers; the first one that yields text wins and the
//! whole payload is serialized when none do.

use crate::constants::EMPTY_REPLY_MESSAGE;
use serde_json::Value;

type Matcher = fn(&Value) -> Option<String>;

const REPLY_MATCHERS: &[Matcher] = &[
    response_field,
    message_field,
    text_field,
    history_field,
    last_turn_text,
];

/// Extracts the bot reply from a parsed success body.
pub fn extract_reply(payload: &Value) -> String {
    REPLY_MATCHERS
        .iter()
        .find_map(|matcher| matcher(payload))
        .unwrap_or_else(|| payload.to_string())
}

/// Extracts the bot reply from a raw success body. Bodies that are not JSON
/// are shown as they arrived; an empty body gets a fixed notice.
pub fn reply_from_body(body: &str) -> String {
    if body.trim().is_empty() {
        return EMPTY_REPLY_MESSAGE.to_string();
    }
    match serde_json::from_str::<Value>(body) {
        Ok(payload) => extract_reply(&payload),
        Err(_) => body.to_string(),
    }
}

/// Describes a non-success response. A JSON body contributes its `error` or
/// `details` field (or its serialization); anything else falls back to the
/// status line.
pub fn describe_failure(status: u16, reason: &str, body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(payload) => string_field(&payload, "error")
            .or_else(|| string_field(&payload, "details"))
            .unwrap_or_else(|| payload.to_string()),
        Err(_) => format!("{} {}", status, reason).trim_end().to_string(),
    }
}

fn response_field(payload: &Value) -> Option<String> {
    string_field(payload, "response")
}

fn message_field(payload: &Value) -> Option<String> {
    string_field(payload, "message")
}

fn text_field(payload: &Value) -> Option<String> {
    string_field(payload, "text")
}

fn history_field(payload: &Value) -> Option<String> {
    payload.get("history").and_then(last_turn_text)
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Last turn of a sequence, first part carrying text. Parts may sit on the
/// turn itself or under `content`, as agent run events nest them.
fn last_turn_text(turns: &Value) -> Option<String> {
    let turn = turns.as_array()?.last()?;
    let parts = turn
        .get("parts")
        .or_else(|| turn.get("content").and_then(|c| c.get("parts")))?
        .as_array()?;
    parts.iter().find_map(|part| string_field(part, "text"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_each_reply_shape_yields_text() {
        let shapes = [
            json!({"response": "A"}),
            json!({"message": "A"}),
            json!({"text": "A"}),
            json!({"history": [
                {"role": "user", "parts": [{"text": "question"}]},
                {"role": "model", "parts": [{"text": "A"}]}
            ]}),
        ];
        for shape in &shapes {
            assert_eq!(extract_reply(shape), "A", "shape {}", shape);
        }
    }

    #[test]
    fn test_priority_order() {
        let payload = json!({"text": "third", "message": "second", "response": "first"});
        assert_eq!(extract_reply(&payload), "first");

        let payload = json!({"response": "", "text": "fallthrough"});
        assert_eq!(extract_reply(&payload), "fallthrough");
    }

    #[test]
    fn test_history_skips_parts_without_text() {
        let payload = json!({"history": [
            {"parts": [{"function_call": {"name": "lookup"}}, {"text": "A"}, {"text": "B"}]}
        ]});
        assert_eq!(extract_reply(&payload), "A");
    }

    #[test]
    fn test_agent_event_list() {
        let payload = json!([
            {"content": {"role": "model", "parts": [{"text": "thinking"}]}},
            {"content": {"role": "model", "parts": [{"text": "A"}]}}
        ]);
        assert_eq!(extract_reply(&payload), "A");
    }

    #[test]
    fn test_unrecognized_shape_is_serialized() {
        let payload = json!({"status": "ok", "data": [1, 2]});
        assert_eq!(extract_reply(&payload), payload.to_string());

        let payload = json!({"history": []});
        assert_eq!(extract_reply(&payload), r#"{"history":[]}"#);
    }

    #[test]
    fn test_non_json_body_is_shown_raw() {
        assert_eq!(reply_from_body("plain words"), "plain words");
    }

    #[test]
    fn test_empty_body_gets_notice() {
        assert_eq!(reply_from_body(""), EMPTY_REPLY_MESSAGE);
        assert_eq!(reply_from_body(" \n"), EMPTY_REPLY_MESSAGE);
    }

    #[test]
    fn test_failure_prefers_error_then_details() {
        assert_eq!(
            describe_failure(500, "Internal Server Error", r#"{"error": "quota exceeded"}"#),
            "quota exceeded"
        );
        assert_eq!(
            describe_failure(502, "Bad Gateway", r#"{"details": "upstream down"}"#),
            "upstream down"
        );
        assert_eq!(
            describe_failure(400, "Bad Request", r#"{"code": 7}"#),
            r#"{"code":7}"#
        );
    }

    #[test]
    fn test_failure_without_json_uses_status_line() {
        assert_eq!(
            describe_failure(503, "Service Unavailable", "<html>down</html>"),
            "503 Service Unavailable"
        );
        assert_eq!(describe_failure(599, "", ""), "599");
    }
}
