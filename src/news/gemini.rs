use crate::models::Article;
use crate::news::traits::NewsSource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const PROMPT: &str = "Generate a list of 4 real estate news articles relevant to the \
Massachusetts market, relevant to the current market and within the last 30 days.";

/// Connection settings for the Gemini API
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    pub model: String,
    /// API root, without trailing slash
    pub base_url: String,
}

/// News generated by Gemini with a structured JSON response
pub struct GeminiNews {
    client: Client,
    settings: GeminiSettings,
}

impl GeminiNews {
    pub fn new(settings: GeminiSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, settings })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model
        )
    }
}

#[async_trait]
impl NewsSource for GeminiNews {
    async fn fetch(&self) -> Result<Vec<Article>> {
        let url = self.endpoint();
        debug!("Requesting news from {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.settings.api_key)
            .json(&request_body())
            .send()
            .await
            .context("Failed to reach Gemini API")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Gemini returned status {}: {}", status, body);
            anyhow::bail!("Gemini API returned {}", status);
        }

        let response: GenerateContentResponse = response
            .json()
            .await
            .context("Failed to decode Gemini response")?;

        let articles = parse_articles(response)?;
        info!("Generated {} news articles", articles.len());
        Ok(articles)
    }

    fn source_name(&self) -> &'static str {
        "Gemini"
    }
}

/// generateContent request with the article array schema
fn request_body() -> Value {
    json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": PROMPT }]
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": article_schema()
        }
    })
}

fn article_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "title": { "type": "STRING", "description": "The headline of the news article." },
                "summary": { "type": "STRING", "description": "A one-paragraph summary of the article." },
                "date": { "type": "STRING", "description": "The publication date in 'Month Day, Year' format." },
                "imageUrl": { "type": "STRING", "description": "A URL for a relevant stock photo." }
            },
            "required": ["title", "summary", "date", "imageUrl"]
        }
    })
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

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

fn parse_articles(response: GenerateContentResponse) -> Result<Vec<Article>> {
    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().find_map(|p| p.text))
        .filter(|t| !t.trim().is_empty())
        .context("No response text from Gemini API")?;

    serde_json::from_str(&text).context("Gemini response text is not a list of articles")
}
