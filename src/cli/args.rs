use crate::analyzer::llm_client::{LlmConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::error::RentGuardError;
use crate::localization::LocaleDetector;
use crate::models::OutputLanguage;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rentguard")]
#[command(about = "Rental contract risk analysis powered by Kimi")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output to stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Enable debug output including request lifecycle
    #[arg(short = 'd', long, global = true)]
    pub debug: bool,

    /// Output language for reports (english, chinese).
    /// If not specified, automatically detects from system locale
    #[arg(long = "output-lang", global = true)]
    pub output_lang: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze photographs or PDFs of a rental contract
    Analyze(AnalyzeArgs),

    /// Manage the locally stored Kimi API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },

    /// Print the renting guide, optionally a single section
    Guide {
        /// Section id: contract, inspection, questions, deposit
        section: Option<String>,
    },
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum KeyAction {
    /// Store an API key
    Set { key: String },
    /// Show the stored API key (masked)
    Show,
    /// Delete the stored API key
    Clear,
}

#[derive(clap::Args, Debug)]
pub struct AnalyzeArgs {
    /// Contract pages: JPG/PNG images or PDF documents (at most 5)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Kimi API key; overrides KIMI_API_KEY and the stored key
    #[arg(short = 'k', long = "api-key")]
    pub api_key: Option<String>,

    /// Model used for the analysis
    #[arg(short = 'm', long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Base URL of the Kimi API
    #[arg(long = "base-url", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Per-request timeout in seconds (10-600); no timeout when omitted
    #[arg(short = 't', long, value_parser = validate_timeout)]
    pub timeout: Option<u64>,

    /// Report format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    pub fn parse_args() -> Result<Self, RentGuardError> {
        let cli = Self::try_parse().map_err(|e| RentGuardError::InvalidArguments(e.to_string()))?;

        cli.validate()?;

        Ok(cli)
    }

    pub fn validate(&self) -> Result<(), RentGuardError> {
        self.get_output_language()?;

        if let Command::Key {
            action: KeyAction::Set { key },
        } = &self.command
        {
            if key.trim().is_empty() {
                return Err(RentGuardError::InvalidArguments(
                    "API key must not be empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose || self.debug
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn should_use_color(&self) -> bool {
        std::env::var("NO_COLOR").is_err()
    }

    pub fn get_output_language(&self) -> Result<OutputLanguage, RentGuardError> {
        // Priority 1: Environment variable override
        if let Ok(env_lang) = std::env::var("RENTGUARD_OUTPUT_LANGUAGE") {
            return OutputLanguage::from_str(&env_lang);
        }

        // Priority 2: CLI option
        if let Some(ref lang) = self.output_lang {
            return OutputLanguage::from_str(lang);
        }

        // Priority 3: System locale detection
        Ok(LocaleDetector::detect_system_locale())
    }
}

impl AnalyzeArgs {
    /// Effective client configuration. Environment variables override flags.
    pub fn llm_config(&self) -> LlmConfig {
        let base_url = env_override("RENTGUARD_BASE_URL").unwrap_or_else(|| self.base_url.clone());
        let model = env_override("RENTGUARD_MODEL").unwrap_or_else(|| self.model.clone());

        LlmConfig::default()
            .with_base_url(base_url)
            .with_model(model)
            .with_timeout(self.timeout)
    }
}

fn env_override(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn validate_timeout(s: &str) -> Result<u64, String> {
    let timeout: u64 = s.parse().map_err(|_| "Timeout must be a number")?;

    if (10..=600).contains(&timeout) {
        Ok(timeout)
    } else {
        Err("Timeout must be between 10 and 600 seconds".to_string())
    }
}
