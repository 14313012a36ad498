// Pluggable translation backends
//
// Translation runs through a narrow capability boundary: one operation that
// maps a string table plus two locale codes to a translated string table.
// Backends are selected through a factory so new providers only touch this
// module:
// 1. Implement TranslationProvider for your backend
// 2. Add a ProviderKind variant and its name to ProviderKind::parse
// 3. Update the factory to create your implementation

pub mod gemini;

use async_trait::async_trait;

use crate::error::{Result, TranslocalError};
use crate::paths::StringMap;

/// Main trait for translation operations
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Translate a path-keyed string table from the source to the target locale.
    ///
    /// Implementations must return every requested key (falling back to the
    /// source string for anything the backend omitted) and must not invoke
    /// the remote service for an empty input table.
    async fn translate_strings(
        &self,
        strings: &StringMap,
        source_locale: &str,
        target_locale: &str,
    ) -> Result<StringMap>;
}

/// Supported translation backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
}

impl ProviderKind {
    pub fn parse(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            _ => Err(TranslocalError::Config(format!(
                "Unsupported provider '{}'. Valid providers: gemini",
                name
            ))),
        }
    }
}

/// Factory for creating provider instances
pub struct ProviderFactory;

impl ProviderFactory {
    pub fn create_provider(kind: ProviderKind, api_key: String) -> Box<dyn TranslationProvider> {
        match kind {
            ProviderKind::Gemini => Box::new(gemini::GeminiProvider::new(api_key)),
        }
    }
}
