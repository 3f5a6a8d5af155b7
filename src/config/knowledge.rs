use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use log::{ info, warn };

/// Destination data loaded at startup. Held in server state only; nothing in
/// the request path reads it yet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KnowledgeBase {
    data: Option<Value>,
}

impl KnowledgeBase {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        match &self.data {
            None | Some(Value::Null) => true,
            Some(Value::Object(map)) => map.is_empty(),
            Some(Value::Array(items)) => items.is_empty(),
            Some(_) => false,
        }
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }
}

/// Never fails: a missing or unreadable file leaves the knowledge set empty.
pub fn load_knowledge<P: AsRef<Path>>(path: P) -> KnowledgeBase {
    let path = path.as_ref();
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("{} not found. AI will use general knowledge.", path.display());
            return KnowledgeBase::empty();
        }
        Err(e) => {
            warn!("Failed to read knowledge file '{}': {}. AI will use general knowledge.", path.display(), e);
            return KnowledgeBase::empty();
        }
    };

    match serde_json::from_str::<Value>(&content) {
        Ok(data) => {
            info!("Loaded knowledge file '{}'", path.display());
            KnowledgeBase { data: Some(data) }
        }
        Err(e) => {
            warn!("Failed to parse knowledge file '{}': {}. AI will use general knowledge.", path.display(), e);
            KnowledgeBase::empty()
        }
    }
}
