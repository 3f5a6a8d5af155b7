use serde::Deserialize;
use std::error::Error;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use log::info;

pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "You are 'Sabah-bot,' a friendly and expert travel planner for Sabah, Malaysia.
Your goal is to create a detailed, exciting, and practical day-by-day itinerary.
Always ask clarifying questions one at a time until you have enough info.
When you generate the final itinerary, format it *only* as a JSON object as requested.
If you are just chatting or asking a question, just respond as plain text.";

#[derive(Debug)]
pub enum PromptError {
    EmptyInstruction(String),
    IoError(std::io::Error),
    JsonError(serde_json::Error),
}

impl fmt::Display for PromptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptError::EmptyInstruction(path) =>
                write!(f, "Prompts file '{}' has an empty system_instruction", path),
            PromptError::IoError(e) => write!(f, "Prompt file IO error: {}", e),
            PromptError::JsonError(e) => write!(f, "Prompt JSON parsing error: {}", e),
        }
    }
}

impl Error for PromptError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PromptError::IoError(e) => Some(e),
            PromptError::JsonError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PromptError {
    fn from(err: std::io::Error) -> Self {
        PromptError::IoError(err)
    }
}

impl From<serde_json::Error> for PromptError {
    fn from(err: serde_json::Error) -> Self {
        PromptError::JsonError(err)
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PromptConfig {
    pub system_instruction: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self { system_instruction: DEFAULT_SYSTEM_INSTRUCTION.to_string() }
    }
}

/// Loads the persona from `path`. A missing file falls back to the built-in
/// Sabah travel-planner persona; a present but broken file is an error.
pub fn load_prompts<P: AsRef<Path>>(path: P) -> Result<PromptConfig, PromptError> {
    let path = path.as_ref();
    let file_content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("Prompts file '{}' not found, using built-in persona", path.display());
            return Ok(PromptConfig::default());
        }
        Err(e) => return Err(e.into()),
    };

    let config: PromptConfig = serde_json::from_str(&file_content)?;
    if config.system_instruction.trim().is_empty() {
        return Err(PromptError::EmptyInstruction(path.display().to_string()));
    }
    info!("Loaded persona from '{}'", path.display());
    Ok(config)
}
