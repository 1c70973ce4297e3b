use super::audio_generation_gateway::AudioGenerationGateway;
use crate::domain::audio::{GenerationRequestItem, GenerationResultItem};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const GENERATE_AUDIO_PATH: &str = "/api/audio/generate";

#[derive(Debug, Serialize)]
struct GenerateAudioRequest<'a> {
    options: &'a [GenerationRequestItem],
}

#[derive(Debug, Deserialize)]
struct GenerateAudioResponse {
    #[serde(default)]
    options: Vec<GenerationResultItem>,
}

/// Media service implementation of the audio generation gateway
pub struct HttpAudioGenerationGateway {
    client: Client,
    base_url: String,
}

impl HttpAudioGenerationGateway {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, String> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| format!("failed to build HTTP client: {}", e))?;
        let base_url: String = base_url.into();

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn generate_url(&self) -> String {
        format!("{}{}", self.base_url, GENERATE_AUDIO_PATH)
    }
}

#[async_trait]
impl AudioGenerationGateway for HttpAudioGenerationGateway {
    async fn generate(
        &self,
        items: &[GenerationRequestItem],
    ) -> Result<Vec<GenerationResultItem>, String> {
        tracing::info!(
            url = %self.generate_url(),
            item_count = items.len(),
            "Calling media service to generate audio"
        );

        let response = self
            .client
            .post(self.generate_url())
            .json(&GenerateAudioRequest { options: items })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    "request timed out".to_string()
                } else if e.is_connect() {
                    format!("connection failed: {}", e)
                } else {
                    format!("request failed: {}", e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status.as_u16(),
                body = %body,
                "Media service rejected audio generation"
            );
            return Err(format!("media service returned {}: {}", status.as_u16(), body));
        }

        let body: GenerateAudioResponse = response
            .json()
            .await
            .map_err(|e| format!("invalid response body: {}", e))?;

        tracing::info!(
            requested = items.len(),
            returned = body.options.len(),
            "Media service generated audio"
        );

        Ok(body.options)
    }
}
