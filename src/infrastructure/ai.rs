//! Gemini-backed text generation for seller tooling.
//!
//! Every helper here returns an explicit `Result`; the caller decides which
//! fallback copy to show when the network or the model lets it down. The
//! fallback constants live next to the client so the two halves stay in sync.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::Category;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Shown when a product description could not be generated.
pub const FALLBACK_DESCRIPTION: &str = "Fresh produce directly from the farm.";
/// Shown when a farmer bio could not be generated.
pub const FALLBACK_BIO: &str =
    "A passionate local farmer bringing fresh, honest produce straight from the field to your table.";
/// Used when a price suggestion could not be generated, in rupees.
pub const FALLBACK_PRICE: u64 = 100;

/// Marketing tips shown when the model call fails.
pub fn fallback_tips() -> Vec<MarketingTip> {
    vec![MarketingTip {
        tip: "Quality Check".to_string(),
        description: "Always ensure your harvest is clean and well-packaged.".to_string(),
    }]
}

#[derive(Debug, Error)]
pub enum AiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API returned status {status}: {message}")]
    Api { status: u16, message: String },
    #[error("model returned no text")]
    EmptyResponse,
    #[error("could not parse model output: {0}")]
    Unparseable(String),
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateContentResponse {
    /// First non-empty text part, trimmed.
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .map(|p| p.text.trim().to_string())
            .find(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MarketingTip {
    pub tip: String,
    pub description: String,
}

/// Blocking client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    http: reqwest::blocking::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            api_key,
            model,
        }
    }

    /// Generates a marketplace listing description for a product.
    pub fn product_description(
        &self,
        name: &str,
        category: Category,
        keywords: &str,
    ) -> Result<String, AiError> {
        let prompt = format!(
            "You are an expert digital marketer for an agricultural marketplace named \
             KissanKart. Write a compelling, SEO-friendly product description for: {}. \
             Category: {}. Additional keywords: {}. The description should highlight \
             freshness, direct farm-to-table benefits, and quality. Keep it under 150 words.",
            name, category, keywords
        );
        self.generate(&prompt)
    }

    /// Generates a first-person profile bio for a newly registered farmer.
    pub fn farmer_bio(&self, name: &str, location: &str, crops: &str) -> Result<String, AiError> {
        let prompt = format!(
            "Write a short, warm first-person bio for a farmer profile on an agricultural \
             marketplace named KissanKart. Farmer name: {}. Location: {}. Main crops: {}. \
             Mention their connection to the land and commitment to quality. Keep it under \
             60 words.",
            name, location, crops
        );
        self.generate(&prompt)
    }

    /// Suggests a wholesale base price in whole rupees for a product.
    pub fn price_suggestion(&self, product_name: &str) -> Result<u64, AiError> {
        let prompt = format!(
            "Suggest a fair wholesale base price in Pakistani Rupees for 1 unit of {} sold \
             directly by a farmer on a marketplace. Answer with a single whole number only, \
             no currency symbol, no explanation.",
            product_name
        );
        let text = self.generate(&prompt)?;
        parse_price(&text)
    }

    /// Fetches three marketing tips for selling the given category online.
    pub fn marketing_tips(&self, category: Category) -> Result<Vec<MarketingTip>, AiError> {
        let prompt = format!(
            "Give 3 quick digital marketing tips for a farmer selling {} online. Focus on \
             how to take better photos, how to price fairly, and how to build trust with \
             customers.",
            category
        );
        let text = self.generate_json(&prompt)?;
        parse_tips(&text)
    }

    fn generate(&self, prompt: &str) -> Result<String, AiError> {
        self.request(prompt, None)
    }

    fn generate_json(&self, prompt: &str) -> Result<String, AiError> {
        self.request(
            prompt,
            Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
            }),
        )
    }

    fn request(
        &self,
        prompt: &str,
        generation_config: Option<GenerationConfig>,
    ) -> Result<String, AiError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            GEMINI_BASE_URL, self.model, self.api_key
        );
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config,
        };

        debug!(model = %self.model, "sending generateContent request");
        let response = self.http.post(&url).json(&body).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(AiError::Api {
                status: status.as_u16(),
                message: response.text().unwrap_or_default(),
            });
        }

        let payload: GenerateContentResponse = response.json()?;
        payload.first_text().ok_or(AiError::EmptyResponse)
    }
}

/// Extracts a whole-rupee price from model output, tolerating currency
/// symbols, separators and stray words around the number.
fn parse_price(text: &str) -> Result<u64, AiError> {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Err(AiError::Unparseable(text.to_string()));
    }
    digits
        .parse()
        .map_err(|_| AiError::Unparseable(text.to_string()))
}

fn parse_tips(text: &str) -> Result<Vec<MarketingTip>, AiError> {
    serde_json::from_str(text.trim()).map_err(|_| AiError::Unparseable(text.to_string()))
}
