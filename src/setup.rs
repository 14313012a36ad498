use std::io::{self, BufRead, Write as _};
use std::path::{Path, PathBuf};

use tracing::info;
use uuid::Uuid;

use crate::config::{CONFIG_FILE, Config, FilesConfig, JsonFilesConfig, LocaleConfig};
use crate::error::{Result, TranslocalError};
use crate::paths::resolve_locale_path;

const DEFAULT_INCLUDE: &str = "messages/[locale].json";

/// Interactive `translocal init` flow: prompts for locales and the file
/// pattern, then scaffolds the project in the working directory
pub struct SetupWizard {
    project_dir: PathBuf,
}

impl SetupWizard {
    pub fn new() -> Result<Self> {
        Ok(Self {
            project_dir: std::env::current_dir()?,
        })
    }

    pub fn with_project_dir<P: AsRef<Path>>(project_dir: P) -> Self {
        Self {
            project_dir: project_dir.as_ref().to_path_buf(),
        }
    }

    /// Prompt for project settings and scaffold the configuration and source file
    pub fn run(&self) -> Result<Config> {
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();

        let source = prompt(&mut lines, "Source locale (e.g., en): ")?;
        if source.is_empty() {
            return Err(TranslocalError::Config("Source locale is required".to_string()));
        }

        let targets_input = prompt(&mut lines, "Target locales (comma-separated, e.g., es,fr,de): ")?;
        if targets_input.is_empty() {
            return Err(TranslocalError::Config(
                "At least one target locale is required".to_string(),
            ));
        }
        let targets = targets_input
            .split(',')
            .map(|locale| locale.trim().to_string())
            .filter(|locale| !locale.is_empty())
            .collect::<Vec<_>>();

        let include_input = prompt(
            &mut lines,
            &format!("File path pattern (default: {}): ", DEFAULT_INCLUDE),
        )?;
        let include = if include_input.is_empty() {
            DEFAULT_INCLUDE.to_string()
        } else {
            include_input
        };

        let config = Config {
            project_id: Some(generate_project_id()),
            locale: LocaleConfig { source, targets },
            files: FilesConfig {
                json: JsonFilesConfig {
                    include: vec![include],
                },
            },
        };

        self.scaffold(&config)?;
        Ok(config)
    }

    /// Write the configuration file and create the source locale file if missing
    pub fn scaffold(&self, config: &Config) -> Result<()> {
        config.validate()?;

        let config_path = self.project_dir.join(CONFIG_FILE);
        config.save_to_file(&config_path)?;
        info!("Created configuration file: {}", config_path.display());

        for template in &config.files.json.include {
            let source_path = self
                .project_dir
                .join(resolve_locale_path(template, &config.locale.source));

            if let Some(parent) = source_path.parent() {
                if !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                    info!("Created directory: {}", parent.display());
                }
            }

            if !source_path.exists() {
                std::fs::write(&source_path, "{}")?;
                info!("Created source file: {}", source_path.display());
            }
        }

        Ok(())
    }
}

fn generate_project_id() -> String {
    format!("prj_{}", Uuid::new_v4().simple())
}

fn prompt<B: BufRead>(lines: &mut io::Lines<B>, question: &str) -> Result<String> {
    print!("{}", question);
    io::stdout().flush()?;

    let answer = lines
        .next()
        .transpose()?
        .unwrap_or_default()
        .trim()
        .to_string();

    Ok(answer)
}
