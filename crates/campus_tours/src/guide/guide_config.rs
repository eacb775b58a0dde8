use tracing::warn;

const API_KEY_ENV_VAR: &str = "OPENROUTER_API_KEY";
const MODEL_ENV_VAR: &str = "CAMPUS_GUIDE_MODEL";

pub const DEFAULT_MODEL: &str = "openai/gpt-oss-120b:exacto";

pub const DEFAULT_INSTRUCTIONS: &str = "You are an enthusiastic Georgia Tech campus tour guide. \
Answer questions about buildings, landmarks, traditions, and campus logistics. \
Whenever possible, reference the provided landmark list to give accurate details. \
Keep responses concise but friendly, and invite follow-up questions.\n\n\
TOUR CREATION:\n\
You have a create_tour tool to save custom tours for users. When a user asks for a tour:\n\
1. First, describe the tour you would create (name, stops, why you chose them)\n\
2. Ask if they would like you to save it\n\
3. Only call create_tour after they confirm\n\
Use location IDs from the landmark list when calling the tool.";

/// Settings of the chat model driving the guide.
#[derive(Debug, Clone)]
pub struct GuideConfig {
    pub model: String,
    pub api_key: Option<String>,
    pub instructions: String,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            instructions: DEFAULT_INSTRUCTIONS.to_string(),
        }
    }
}

impl GuideConfig {
    pub fn from_env() -> Self {
        let api_key = std::env::var(API_KEY_ENV_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty());

        if api_key.is_none() {
            warn!("{API_KEY_ENV_VAR} is not set, the guide chat is unavailable");
        }

        Self {
            model: std::env::var(MODEL_ENV_VAR).unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            api_key,
            ..Default::default()
        }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}
