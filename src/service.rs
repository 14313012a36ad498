use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::files::{expand_template, read_json_file, write_json_file};
use crate::paths::{StringMap, extract_strings, replace_strings, resolve_locale_path};
use crate::provider::TranslationProvider;

/// Maximum number of entries sent to the provider in one request
pub const CHUNK_SIZE: usize = 300;

/// Outcome of a translation run.
///
/// Per-locale failures are counted here instead of failing the run; a
/// partially successful run is the intended behavior, not a degraded one.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TranslateSummary {
    pub files_written: usize,
    pub locales_failed: usize,
}

pub struct TranslationService {
    config: Config,
    provider: Box<dyn TranslationProvider>,
}

impl TranslationService {
    pub fn new(config: Config, provider: Box<dyn TranslationProvider>) -> Self {
        Self { config, provider }
    }

    /// Run the translation pipeline for every include template and target locale.
    ///
    /// Configuration and source-file errors abort the run; provider and write
    /// errors are contained to the locale they occurred in.
    pub async fn translate(&self) -> Result<TranslateSummary> {
        let source_locale = &self.config.locale.source;
        let target_locales = &self.config.locale.targets;
        let mut summary = TranslateSummary::default();

        info!(
            "Starting translation from {} to {}",
            source_locale,
            target_locales.join(", ")
        );

        for template in &self.config.files.json.include {
            let source_pattern = resolve_locale_path(template, source_locale);
            let matching_files = expand_template(&source_pattern)?;

            if matching_files.is_empty() {
                warn!("No files found matching {}", source_pattern);
                continue;
            }

            for source_file in &matching_files {
                info!("Processing source file: {}", source_file.display());

                let source_data = read_json_file(source_file).await?;
                let strings = extract_strings(&source_data, "");

                info!("Found {} strings to translate", strings.len());

                for target_locale in target_locales {
                    // Self-translation is a no-op: no provider call, no output
                    if target_locale == source_locale {
                        info!("Skipping translation to self ({})", target_locale);
                        continue;
                    }

                    info!("Translating to {}...", target_locale);
                    let target_path = resolve_locale_path(template, target_locale);

                    match self
                        .translate_locale(&source_data, &strings, source_locale, target_locale, &target_path)
                        .await
                    {
                        Ok(()) => {
                            summary.files_written += 1;
                            info!("Translations written to {}", target_path);
                        }
                        Err(e) => {
                            summary.locales_failed += 1;
                            warn!(
                                "Error translating {} to {}: {}",
                                source_file.display(),
                                target_locale,
                                e
                            );
                        }
                    }
                }
            }
        }

        info!(
            "Translation process completed: {} files written, {} locales failed",
            summary.files_written, summary.locales_failed
        );

        Ok(summary)
    }

    async fn translate_locale(
        &self,
        source_data: &Value,
        strings: &StringMap,
        source_locale: &str,
        target_locale: &str,
        target_path: &str,
    ) -> Result<()> {
        let translated = self
            .translate_chunked(strings, source_locale, target_locale)
            .await?;

        let translated_data = replace_strings(source_data, &translated, "");
        write_json_file(target_path, &translated_data).await
    }

    /// Translate a string table in ordered chunks of at most [`CHUNK_SIZE`]
    /// entries, merging the results into one accumulator.
    ///
    /// Chunks are sent sequentially so request volume stays bounded and log
    /// output follows document order.
    async fn translate_chunked(
        &self,
        strings: &StringMap,
        source_locale: &str,
        target_locale: &str,
    ) -> Result<StringMap> {
        let chunks = partition_chunks(strings, CHUNK_SIZE);
        let mut accumulated = StringMap::new();

        let progress = if chunks.len() > 1 {
            let pb = ProgressBar::new(chunks.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} chunks")
                    .unwrap()
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        for (index, chunk) in chunks.iter().enumerate() {
            debug!(
                "Translating chunk {}/{} ({} strings)",
                index + 1,
                chunks.len(),
                chunk.len()
            );

            let translated = self
                .provider
                .translate_strings(chunk, source_locale, target_locale)
                .await?;

            // Chunks partition a disjoint key set; earlier entries win on overlap
            for (key, value) in translated {
                accumulated.entry(key).or_insert(value);
            }

            if let Some(pb) = &progress {
                pb.inc(1);
            }
        }

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        info!("Successfully translated {} strings", accumulated.len());
        Ok(accumulated)
    }
}

/// Split a string table into ordered chunks of at most `size` entries,
/// preserving key order across chunk boundaries
fn partition_chunks(strings: &StringMap, size: usize) -> Vec<StringMap> {
    let mut chunks = Vec::new();
    let mut current = StringMap::new();

    for (key, value) in strings {
        if current.len() == size {
            chunks.push(std::mem::take(&mut current));
        }
        current.insert(key.clone(), value.clone());
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FilesConfig, JsonFilesConfig, LocaleConfig};
    use crate::error::TranslocalError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};
    use tempfile::{TempDir, tempdir};

    #[derive(Debug, Clone)]
    struct CallRecord {
        target: String,
        keys: Vec<String>,
    }

    /// Provider double that prefixes values with the target locale and
    /// records every call it receives
    struct FakeProvider {
        calls: Arc<Mutex<Vec<CallRecord>>>,
        fail_targets: HashSet<String>,
        omit_keys: HashSet<String>,
    }

    impl FakeProvider {
        fn new() -> (Self, Arc<Mutex<Vec<CallRecord>>>) {
            let calls = Arc::new(Mutex::new(Vec::new()));
            let provider = Self {
                calls: calls.clone(),
                fail_targets: HashSet::new(),
                omit_keys: HashSet::new(),
            };
            (provider, calls)
        }

        fn failing_for(mut self, targets: &[&str]) -> Self {
            self.fail_targets = targets.iter().map(|t| t.to_string()).collect();
            self
        }

        fn omitting(mut self, keys: &[&str]) -> Self {
            self.omit_keys = keys.iter().map(|k| k.to_string()).collect();
            self
        }
    }

    #[async_trait]
    impl TranslationProvider for FakeProvider {
        async fn translate_strings(
            &self,
            strings: &StringMap,
            _source_locale: &str,
            target_locale: &str,
        ) -> Result<StringMap> {
            self.calls.lock().unwrap().push(CallRecord {
                target: target_locale.to_string(),
                keys: strings.keys().cloned().collect(),
            });

            if self.fail_targets.contains(target_locale) {
                return Err(TranslocalError::Provider("simulated failure".to_string()));
            }

            Ok(strings
                .iter()
                .filter(|(key, _)| !self.omit_keys.contains(key.as_str()))
                .map(|(key, value)| (key.clone(), format!("{}:{}", target_locale, value)))
                .collect())
        }
    }

    fn test_config(dir: &TempDir, targets: &[&str]) -> Config {
        Config {
            project_id: None,
            locale: LocaleConfig {
                source: "en".to_string(),
                targets: targets.iter().map(|t| t.to_string()).collect(),
            },
            files: FilesConfig {
                json: JsonFilesConfig {
                    include: vec![format!("{}/messages/[locale].json", dir.path().display())],
                },
            },
        }
    }

    async fn write_source(dir: &TempDir, doc: &Value) {
        let path = dir.path().join("messages/en.json");
        write_json_file(&path, doc).await.unwrap();
    }

    async fn read_target(dir: &TempDir, locale: &str) -> Value {
        read_json_file(dir.path().join(format!("messages/{}.json", locale)))
            .await
            .unwrap()
    }

    fn target_exists(dir: &TempDir, locale: &str) -> bool {
        dir.path().join(format!("messages/{}.json", locale)).exists()
    }

    #[tokio::test]
    async fn test_translate_writes_isomorphic_target() {
        let dir = tempdir().unwrap();
        write_source(&dir, &json!({ "greeting": "Hello", "items": ["One", "Two"] })).await;

        let (provider, _calls) = FakeProvider::new();
        let service = TranslationService::new(test_config(&dir, &["es"]), Box::new(provider));

        let summary = service.translate().await.unwrap();

        assert_eq!(summary.files_written, 1);
        assert_eq!(summary.locales_failed, 0);
        assert_eq!(
            read_target(&dir, "es").await,
            json!({ "greeting": "es:Hello", "items": ["es:One", "es:Two"] })
        );
    }

    #[tokio::test]
    async fn test_self_locale_is_skipped_without_provider_call() {
        let dir = tempdir().unwrap();
        write_source(&dir, &json!({ "greeting": "Hello" })).await;

        let (provider, calls) = FakeProvider::new();
        let service = TranslationService::new(test_config(&dir, &["en", "es"]), Box::new(provider));

        let summary = service.translate().await.unwrap();

        // The source file is untouched
        assert_eq!(read_target(&dir, "en").await, json!({ "greeting": "Hello" }));

        let recorded = calls.lock().unwrap();
        assert!(recorded.iter().all(|call| call.target != "en"));
        assert_eq!(recorded.len(), 1);
        assert_eq!(summary.files_written, 1);
    }

    #[tokio::test]
    async fn test_chunks_partition_keys_in_order() {
        let dir = tempdir().unwrap();

        let mut map = serde_json::Map::new();
        for i in 0..650 {
            map.insert(format!("k{:03}", i), json!(format!("v{}", i)));
        }
        write_source(&dir, &Value::Object(map)).await;

        let (provider, calls) = FakeProvider::new();
        let service = TranslationService::new(test_config(&dir, &["es"]), Box::new(provider));

        service.translate().await.unwrap();

        let recorded = calls.lock().unwrap();
        let sizes: Vec<usize> = recorded.iter().map(|call| call.keys.len()).collect();
        assert_eq!(sizes, vec![300, 300, 50]);

        // Disjoint chunks whose concatenation is the full key sequence in order
        let all_keys: Vec<String> = recorded.iter().flat_map(|call| call.keys.clone()).collect();
        let expected: Vec<String> = (0..650).map(|i| format!("k{:03}", i)).collect();
        assert_eq!(all_keys, expected);

        let unique: HashSet<&String> = all_keys.iter().collect();
        assert_eq!(unique.len(), all_keys.len());
    }

    #[tokio::test]
    async fn test_failed_locale_does_not_abort_others() {
        let dir = tempdir().unwrap();
        write_source(&dir, &json!({ "greeting": "Hello" })).await;

        let (provider, _calls) = FakeProvider::new();
        let provider = provider.failing_for(&["fr"]);
        let service =
            TranslationService::new(test_config(&dir, &["es", "fr", "de"]), Box::new(provider));

        let summary = service.translate().await.unwrap();

        assert_eq!(summary.files_written, 2);
        assert_eq!(summary.locales_failed, 1);
        assert!(target_exists(&dir, "es"));
        assert!(!target_exists(&dir, "fr"));
        assert!(target_exists(&dir, "de"));
        assert_eq!(read_target(&dir, "de").await, json!({ "greeting": "de:Hello" }));
    }

    #[tokio::test]
    async fn test_document_without_strings_still_produces_target() {
        let dir = tempdir().unwrap();
        write_source(&dir, &json!({ "count": 42, "flags": [true, false] })).await;

        let (provider, calls) = FakeProvider::new();
        let service = TranslationService::new(test_config(&dir, &["es"]), Box::new(provider));

        let summary = service.translate().await.unwrap();

        assert!(calls.lock().unwrap().is_empty());
        assert_eq!(summary.files_written, 1);
        assert_eq!(
            read_target(&dir, "es").await,
            json!({ "count": 42, "flags": [true, false] })
        );
    }

    #[tokio::test]
    async fn test_omitted_translations_keep_source_strings() {
        let dir = tempdir().unwrap();
        write_source(&dir, &json!({ "greeting": "Hello", "items": ["One", "Two"] })).await;

        let (provider, _calls) = FakeProvider::new();
        let provider = provider.omitting(&["items[0]", "items[1]"]);
        let service = TranslationService::new(test_config(&dir, &["es"]), Box::new(provider));

        service.translate().await.unwrap();

        assert_eq!(
            read_target(&dir, "es").await,
            json!({ "greeting": "es:Hello", "items": ["One", "Two"] })
        );
    }

    #[tokio::test]
    async fn test_template_without_matches_is_skipped() {
        let dir = tempdir().unwrap();
        write_source(&dir, &json!({ "greeting": "Hello" })).await;

        let mut config = test_config(&dir, &["es"]);
        config.files.json.include.insert(
            0,
            format!("{}/absent/[locale].json", dir.path().display()),
        );

        let (provider, _calls) = FakeProvider::new();
        let service = TranslationService::new(config, Box::new(provider));

        let summary = service.translate().await.unwrap();

        // The empty template warns and the real one still runs
        assert_eq!(summary.files_written, 1);
        assert!(target_exists(&dir, "es"));
    }

    #[tokio::test]
    async fn test_unparseable_source_file_is_fatal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("messages/en.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();

        let (provider, _calls) = FakeProvider::new();
        let service = TranslationService::new(test_config(&dir, &["es"]), Box::new(provider));

        let result = service.translate().await;
        assert!(matches!(result, Err(TranslocalError::Read(_))));
    }

    #[test]
    fn test_partition_chunks_exact_multiple() {
        let strings: StringMap = (0..600)
            .map(|i| (format!("k{}", i), format!("v{}", i)))
            .collect();

        let chunks = partition_chunks(&strings, 300);
        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|chunk| chunk.len() == 300));
    }

    #[test]
    fn test_partition_chunks_empty_input() {
        assert!(partition_chunks(&StringMap::new(), 300).is_empty());
    }
}
