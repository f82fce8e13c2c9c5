use crate::ai::prompt_template::PromptTemplate;
use crate::ai::response::ResponseParser;
use crate::ai::CommandGenerator;
use crate::error::{Result, ShaiError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 생성 호출 타임아웃. 초과 시 실패로 처리됩니다.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    error: Option<ApiError>,
}

/// OpenAI 호환 chat completions 클라이언트
pub struct AiClient {
    url: String,
    api_key: String,
    model: String,
    http: reqwest::Client,
}

impl AiClient {
    pub fn new(url: &str, api_key: &str, model: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ShaiError::Generation(e.to_string()))?;

        Ok(Self {
            url: url.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            http,
        })
    }

    fn build_request(&self, query: &str, shell: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: PromptTemplate::system_prompt(shell),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: query.to_string(),
                },
            ],
        }
    }
}

#[async_trait]
impl CommandGenerator for AiClient {
    async fn generate(&self, query: &str, shell: &str) -> Result<Vec<String>> {
        let request = self.build_request(query, shell);

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ShaiError::Generation(format!("failed to send request: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ShaiError::Generation(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(ShaiError::Generation(format!(
                "API error (status {}): {}",
                status.as_u16(),
                body
            )));
        }

        let chat_response: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| ShaiError::Generation(format!("failed to parse response: {}", e)))?;

        if let Some(error) = chat_response.error {
            return Err(ShaiError::Generation(format!("API error: {}", error.message)));
        }

        let choice = chat_response
            .choices
            .first()
            .ok_or_else(|| ShaiError::Generation("no response from AI".to_string()))?;

        ResponseParser::parse(&choice.message.content)
    }
}
