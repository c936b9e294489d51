//! Streaming HTTP client for the Ollama generate API.

use std::time::Duration;

use futures::StreamExt;
use serde::{Deserialize, Serialize};

/// Guide generation can take minutes on consumer hardware.
const GENERATE_TIMEOUT: Duration = Duration::from_secs(300);

/// Connection checks should fail fast.
const TAGS_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum OllamaError {
    #[error("Ollama request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Ollama returned an empty response")]
    EmptyResponse,
}

/// Sampling options tuned for long-form travel writing.
#[derive(Debug, Clone, Serialize)]
struct GenerateOptions {
    temperature: f64,
    num_predict: u32,
    top_p: f64,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            num_predict: 4000,
            top_p: 0.9,
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

/// One NDJSON line of a streaming generate response.
#[derive(Debug, Deserialize)]
struct GenerateChunk {
    #[serde(default)]
    response: String,
    #[serde(default)]
    done: bool,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
    name: String,
}

/// Client bound to one Ollama instance and one model.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    base_url: String,
    model: String,
    http: reqwest::Client,
}

impl OllamaClient {
    pub fn new(base_url: &str, model: &str) -> Result<Self, OllamaError> {
        let http = reqwest::Client::builder()
            .timeout(GENERATE_TIMEOUT)
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            http,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Names of the models the instance has pulled.
    pub async fn list_models(&self) -> Result<Vec<String>, OllamaError> {
        let tags: TagsResponse = self
            .http
            .get(format!("{}/api/tags", self.base_url))
            .timeout(TAGS_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    /// Verify the instance is reachable. A missing model is only a warning:
    /// Ollama can still serve a model that `/api/tags` does not list yet.
    pub async fn check_connection(&self) -> Result<(), OllamaError> {
        let models = self.list_models().await?;
        if models.iter().any(|name| name.contains(&self.model)) {
            tracing::info!(model = %self.model, "Connected to Ollama");
        } else {
            tracing::warn!(
                model = %self.model,
                available = ?models,
                "Model not listed by Ollama, continuing anyway",
            );
        }
        Ok(())
    }

    /// Run one generation and return the accumulated text.
    ///
    /// The response streams as NDJSON; chunks are concatenated until the
    /// `done` marker. Lines that fail to parse are skipped, matching how
    /// Ollama occasionally interleaves keep-alive noise.
    pub async fn generate(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
    ) -> Result<String, OllamaError> {
        let prompt = match system_prompt {
            Some(system) => format!("{system}\n\n{prompt}"),
            None => prompt.to_string(),
        };

        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: true,
            options: GenerateOptions::default(),
        };

        let response = self
            .http
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let mut stream = response.bytes_stream();
        let mut buf: Vec<u8> = Vec::new();
        let mut text = String::new();

        'outer: while let Some(chunk) = stream.next().await {
            buf.extend_from_slice(&chunk?);
            while let Some(pos) = buf.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = buf.drain(..=pos).collect();
                match serde_json::from_slice::<GenerateChunk>(&line) {
                    Ok(parsed) => {
                        text.push_str(&parsed.response);
                        if parsed.done {
                            break 'outer;
                        }
                    }
                    Err(_) => continue,
                }
            }
        }
        // A final chunk without a trailing newline still counts.
        if !buf.is_empty() {
            if let Ok(parsed) = serde_json::from_slice::<GenerateChunk>(&buf) {
                text.push_str(&parsed.response);
            }
        }

        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(OllamaError::EmptyResponse);
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_loses_trailing_slash() {
        let client = OllamaClient::new("http://localhost:11434/", "llama3.1").unwrap();
        assert_eq!(client.base_url, "http://localhost:11434");
    }

    #[test]
    fn chunks_tolerate_missing_fields() {
        let chunk: GenerateChunk = serde_json::from_str(r#"{"response":"hello"}"#).unwrap();
        assert_eq!(chunk.response, "hello");
        assert!(!chunk.done);

        let done: GenerateChunk =
            serde_json::from_str(r#"{"done":true,"total_duration":12}"#).unwrap();
        assert!(done.done);
        assert!(done.response.is_empty());
    }

    #[test]
    fn default_options_match_generation_profile() {
        let options = GenerateOptions::default();
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["temperature"], 0.7);
        assert_eq!(json["num_predict"], 4000);
        assert_eq!(json["top_p"], 0.9);
    }
}
