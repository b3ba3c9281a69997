//! Section summarization through an OpenAI-compatible chat endpoint.
//!
//! Entirely optional: the client works without a summarizer configured, and
//! calling [`SummaryOperations::summarize`] without one is a configuration
//! error rather than a panic. The request and response types model only the
//! slice of the chat-completions wire format this crate uses.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::EdgarClient;
use crate::error::{FilingError, Result};
use crate::traits::SummaryOperations;

const SYSTEM_PROMPT: &str = "You are a financial analyst. Summarize the \
following excerpt from an SEC filing in plain language. Lead with the most \
material facts, keep figures exact, and do not speculate beyond the text.";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[async_trait]
impl SummaryOperations for EdgarClient {
    /// Summarizes filing text through the configured chat endpoint.
    ///
    /// # Errors
    ///
    /// * `FilingError::Config` when no summarizer is configured
    /// * `FilingError::NoDataFound` when the endpoint returns no choices
    async fn summarize(&self, text: &str) -> Result<String> {
        let Some(config) = &self.summarizer else {
            return Err(FilingError::Config(
                "no summarizer configured; set one via ClientConfig::with_summarizer".to_string(),
            ));
        };

        let request = ChatRequest {
            model: &config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: text,
                },
            ],
        };

        let body = self
            .post_json(&config.endpoint, &request, Some(config.api_key.as_str()))
            .await?;
        let response: ChatResponse = serde_json::from_str(&body)?;

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| FilingError::NoDataFound("summarizer returned no choices".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_to_the_chat_wire_format() {
        let request = ChatRequest {
            model: "gpt-4o-mini",
            messages: vec![
                ChatMessage { role: "system", content: "be brief" },
                ChatMessage { role: "user", content: "Item 2. MD&A" },
            ],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "Item 2. MD&A");
    }

    #[test]
    fn response_parses_the_first_choice() {
        let json = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "Revenue rose 4%."}}
            ]
        }"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.choices[0].message.content, "Revenue rose 4%.");
    }

    #[test]
    fn empty_choices_deserialize_cleanly() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(response.choices.is_empty());
    }
}
