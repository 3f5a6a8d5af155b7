use serde::{ Serialize, Deserialize };
use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub timestamp: i64,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn model(content: impl Into<String>) -> Self {
        Self::new(Role::Model, content)
    }
}

#[derive(Deserialize, Debug)]
pub struct ChatRequest {
    pub message: String,
}

/// Reply after classification. Serializes as `{"type": ..., "data": ...}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ClassifiedReply {
    Text(String),
    Itinerary(Value),
}

impl ClassifiedReply {
    pub fn kind(&self) -> &'static str {
        match self {
            ClassifiedReply::Text(_) => "text",
            ClassifiedReply::Itinerary(_) => "itinerary",
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn itinerary_serializes_with_type_and_data() {
        let reply = ClassifiedReply::Itinerary(json!({ "title": "Trip", "days": [] }));
        let value = serde_json::to_value(&reply).unwrap();
        assert_eq!(value, json!({ "type": "itinerary", "data": { "title": "Trip", "days": [] } }));
    }

    #[test]
    fn text_serializes_with_type_and_data() {
        let reply = ClassifiedReply::Text("What dates are you traveling?".into());
        let value = serde_json::to_value(&reply).unwrap();
        assert_eq!(value, json!({ "type": "text", "data": "What dates are you traveling?" }));
    }

    #[test]
    fn roles_are_lowercase_on_the_wire() {
        let msg = ChatMessage::model("hello");
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["role"], "model");
        assert_eq!(Role::User.as_str(), "user");
    }
}
