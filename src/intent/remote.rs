//! OpenAI-compatible chat-completions oracle.
//!
//! One client serves both classification and component selection. It never
//! decides anything on its own: replies go through [`parse_intent_reply`] and
//! [`parse_selection_reply`], and the callers keep their deterministic fallbacks.

use super::{IntentOracle, IntentRecord, parse_intent_reply, parse_selection_reply};
use crate::config::OracleConfig;
use crate::error::ClassificationError;
use crate::registry::ComponentTable;
use crate::selector::SelectionOracle;
use serde::Deserialize;
use serde_json::json;

const CLASSIFY_PROMPT: &str = "You classify requests for a visual flow builder. \
Reply with a JSON object with the keys \"primary_use_case\" (one of basic_chat, \
document_qa, agent_tools, rag_system), \"capabilities\" (array of short labels) \
and \"complexity\" (simple, medium or complex). Reply with JSON only.";

const SELECT_PROMPT: &str = "You choose components for a visual flow builder. \
Start with an input component and end with an output component, include a \
language model, and only use names from the provided list. Reply with a JSON \
array of component names in execution order. Reply with JSON only.";

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone)]
pub struct RemoteOracle {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl RemoteOracle {
    /// Builds a client from config. The API key is read from `api_key_env`.
    pub fn from_config(config: &OracleConfig) -> Result<Self, ClassificationError> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            ClassificationError::Disabled(format!(
                "environment variable {} is not set",
                config.api_key_env
            ))
        })?;
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClassificationError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key,
        })
    }

    fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f32,
    ) -> Result<String, ClassificationError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "model": &self.model,
                "messages": [
                    {"role": "system", "content": system_prompt},
                    {"role": "user", "content": user_prompt}
                ],
                "temperature": temperature,
            }))
            .send()
            .map_err(|e| ClassificationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ClassificationError::Transport(format!(
                "endpoint answered {}: {}",
                status, body
            )));
        }

        let reply: ChatResponse = response
            .json()
            .map_err(|e| ClassificationError::InvalidResponse(e.to_string()))?;
        reply
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ClassificationError::InvalidResponse("no choices".to_string()))
    }
}

impl IntentOracle for RemoteOracle {
    fn name(&self) -> &str {
        &self.model
    }

    fn classify(&self, text: &str) -> Result<IntentRecord, ClassificationError> {
        let content = self.complete(
            CLASSIFY_PROMPT,
            &format!("Classify this flow request:\n\"{}\"", text),
            0.3,
        )?;
        parse_intent_reply(&content)
    }
}

impl SelectionOracle for RemoteOracle {
    fn name(&self) -> &str {
        &self.model
    }

    fn select(
        &self,
        description: &str,
        intent: &IntentRecord,
        table: &ComponentTable,
    ) -> Result<Vec<String>, ClassificationError> {
        let available: Vec<_> = table
            .iter()
            .map(|r| {
                json!({
                    "name": r.name,
                    "category": r.category.as_str(),
                    "description": r.description,
                    "inputs": r.inputs.iter().map(|s| &s.name).collect::<Vec<_>>(),
                    "outputs": r.outputs.iter().map(|s| &s.name).collect::<Vec<_>>(),
                })
            })
            .collect();
        let user_prompt = format!(
            "Request: \"{}\"\nIntent: {}\nAvailable components: {}",
            description,
            json!(intent),
            json!(available)
        );
        let content = self.complete(SELECT_PROMPT, &user_prompt, 0.2)?;
        parse_selection_reply(&content)
    }
}
