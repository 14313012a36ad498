use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::TranslationProvider;
use crate::error::{Result, TranslocalError};
use crate::paths::StringMap;

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Clone, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Clone, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
struct Candidate {
    content: Content,
}

/// Translation backend using the Google Generative Language API
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_endpoint(api_key, DEFAULT_ENDPOINT.to_string())
    }

    /// Create a provider against a custom endpoint (used by tests)
    pub fn with_endpoint(api_key: String, endpoint: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .expect("HTTP client creation should not fail");

        Self {
            client,
            api_key,
            model: DEFAULT_MODEL.to_string(),
            endpoint,
        }
    }

    fn build_prompt(strings: &StringMap, source_locale: &str, target_locale: &str) -> Result<String> {
        let payload = serde_json::to_string_pretty(strings)?;

        Ok(format!(
            "Translate the following JSON strings from {} to {}.\n\
             Only translate the string values, keep the keys exactly the same.\n\
             Return the result as a valid JSON object with the same structure.\n\
             \n\
             {}",
            source_locale, target_locale, payload
        ))
    }

    /// Parse the model output into a string table.
    ///
    /// Models occasionally wrap the object in prose or code fences, so a
    /// failed direct parse retries on the outermost brace-delimited slice.
    fn parse_translations(raw: &str) -> Result<StringMap> {
        let trimmed = raw.trim();

        if let Ok(translations) = serde_json::from_str::<StringMap>(trimmed) {
            return Ok(translations);
        }

        if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
            if start < end {
                if let Ok(translations) = serde_json::from_str::<StringMap>(&trimmed[start..=end]) {
                    return Ok(translations);
                }
            }
        }

        Err(TranslocalError::Provider(
            "Failed to parse translation response".to_string(),
        ))
    }

    /// Ensure every requested key is present; missing or empty translations
    /// fall back to the source string.
    fn backfill_missing(strings: &StringMap, mut translations: StringMap) -> StringMap {
        for (key, source_value) in strings {
            let missing = translations.get(key).is_none_or(|text| text.is_empty());
            if missing {
                translations.insert(key.clone(), source_value.clone());
            }
        }
        translations
    }
}

#[async_trait]
impl TranslationProvider for GeminiProvider {
    async fn translate_strings(
        &self,
        strings: &StringMap,
        source_locale: &str,
        target_locale: &str,
    ) -> Result<StringMap> {
        if strings.is_empty() {
            return Ok(StringMap::new());
        }

        let prompt = Self::build_prompt(strings, source_locale, target_locale)?;
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.endpoint, self.model, self.api_key
        );

        debug!(
            "Requesting translation of {} strings ({} -> {})",
            strings.len(),
            source_locale,
            target_locale
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| TranslocalError::Provider(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(TranslocalError::Provider(format!(
                "Gemini API error {}: {}",
                status, error_text
            )));
        }

        let generated: GenerateResponse = response
            .json()
            .await
            .map_err(|e| TranslocalError::Provider(format!("Failed to parse response: {}", e)))?;

        let raw = generated
            .candidates
            .first()
            .and_then(|candidate| candidate.content.parts.first())
            .map(|part| part.text.clone())
            .ok_or_else(|| TranslocalError::Provider("Empty translation response".to_string()))?;

        let translations = Self::parse_translations(&raw)?;
        Ok(Self::backfill_missing(strings, translations))
    }
}
