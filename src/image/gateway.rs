use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::config::{Config, API_KEY_VAR};
use crate::error::{ConfigError, GatewayError};

/// An image plus the instruction describing how to change it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    pub image: Vec<u8>,
    pub mime_type: String,
    pub instruction: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditResult {
    pub image: Vec<u8>,
    pub mime_type: Option<String>,
}

impl EditResult {
    /// File name for sending the image on, PNG when the type is unknown.
    pub fn file_name(&self) -> String {
        let extension = match self.mime_type.as_deref() {
            Some("image/jpeg") | Some("image/jpg") => "jpg",
            Some("image/webp") => "webp",
            Some("image/gif") => "gif",
            _ => "png",
        };
        format!("edited.{}", extension)
    }
}

// Wire types for the `generateContent` call.

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: [RequestContent<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 2],
}

#[derive(Serialize)]
#[serde(untagged)]
enum RequestPart<'a> {
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: RequestInlineData<'a>,
    },
    Text {
        text: &'a str,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestInlineData<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: [&'static str; 1],
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    inline_data: Option<ResponseInlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseInlineData {
    mime_type: Option<String>,
    data: String,
}

/// Single-attempt client for the external generative image service.
#[derive(Clone)]
pub struct ImageEditGateway {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
    api_base: String,
}

impl ImageEditGateway {
    pub fn new(config: &Config) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            api_base: config.api_base.clone(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Sends the image and instruction in one request and returns the first
    /// image found in the first candidate. No retries.
    pub async fn edit_image(&self, request: &EditRequest) -> Result<EditResult, GatewayError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ConfigError::MissingVar(API_KEY_VAR))?;

        let b64 = base64::engine::general_purpose::STANDARD;
        let body = GenerateContentRequest {
            contents: [RequestContent {
                parts: [
                    RequestPart::Inline {
                        inline_data: RequestInlineData {
                            mime_type: &request.mime_type,
                            data: b64.encode(&request.image),
                        },
                    },
                    RequestPart::Text {
                        text: &request.instruction,
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_modalities: ["IMAGE"],
            },
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base, self.model
        );
        log::debug!(
            "Requesting image edit ({} bytes, {}) from {}",
            request.image.len(),
            request.mime_type,
            self.model
        );

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let response: GenerateContentResponse = response.json().await?;
        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or(GatewayError::NoCandidate)?;

        let inline = candidate
            .content
            .into_iter()
            .flat_map(|content| content.parts)
            .find_map(|part| part.inline_data)
            .ok_or(GatewayError::NoImage)?;

        let image = b64.decode(inline.data.as_bytes())?;
        if image.is_empty() {
            return Err(GatewayError::NoImage);
        }
        log::debug!("Image service returned {} bytes", image.len());

        Ok(EditResult {
            image,
            mime_type: inline.mime_type,
        })
    }
}
