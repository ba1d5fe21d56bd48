// src/message.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<Value>,
}

impl ChatRequest {
    /// Text to relay, or `None` when the message is absent or falsy
    /// (`null`, `false`, `0`, `""`). Other non-strings are sent as their JSON text.
    pub fn text(&self) -> Option<String> {
        match self.message.as_ref()? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) if n.as_f64().is_some_and(|f| f == 0.0) => None,
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
    pub model: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(message: Value) -> ChatRequest {
        serde_json::from_value(json!({ "message": message })).unwrap()
    }

    #[test]
    fn falsy_messages_have_no_text() {
        for value in [json!(null), json!(false), json!(0), json!(0.0), json!(-0.0), json!("")] {
            assert_eq!(request(value.clone()).text(), None, "value: {}", value);
        }
        let missing: ChatRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.text(), None);
    }

    #[test]
    fn truthy_messages_become_text() {
        assert_eq!(request(json!("  ")).text().as_deref(), Some("  "));
        assert_eq!(request(json!("hello")).text().as_deref(), Some("hello"));
        assert_eq!(request(json!(42)).text().as_deref(), Some("42"));
        assert_eq!(request(json!(true)).text().as_deref(), Some("true"));
        assert_eq!(request(json!([])).text().as_deref(), Some("[]"));
    }
}
