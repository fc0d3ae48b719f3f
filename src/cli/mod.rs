pub mod args;
pub mod reporter;

pub use args::Cli;
pub use reporter::ReportFormatter;

use crate::analyzer::AnalysisOrchestrator;
use crate::credential::{self, CredentialStore};
use crate::error::RentGuardError;
use crate::guide;
use crate::localization::{LocaleDetector, LocalizedStrings};
use crate::models::{contract_file, AnalysisResult};
use args::{AnalyzeArgs, Command, KeyAction};

pub const EXIT_OK: i32 = 0;
pub const EXIT_GENERAL: i32 = 1;
pub const EXIT_USAGE: i32 = 2;
pub const EXIT_VALIDATION: i32 = 3;
pub const EXIT_REMOTE: i32 = 4;

pub struct CliHandler {
    cli: Cli,
    store: Option<CredentialStore>,
}

impl CliHandler {
    pub fn new(cli: Cli) -> Self {
        Self { cli, store: None }
    }

    /// Uses `store` instead of the one located through the environment.
    pub fn with_credential_store(mut self, store: CredentialStore) -> Self {
        self.store = Some(store);
        self
    }

    pub async fn run(&self) -> Result<i32, RentGuardError> {
        tracing::debug!(locale = %LocaleDetector::get_system_locale_info(), "detected locale");

        match &self.cli.command {
            Command::Analyze(args) => self.analyze(args).await,
            Command::Key { action } => self.manage_key(action),
            Command::Guide { section } => self.print_guide(section.as_deref()),
        }
    }

    fn credential_store(&self) -> Result<CredentialStore, RentGuardError> {
        match &self.store {
            Some(store) => Ok(store.clone()),
            None => CredentialStore::from_env(),
        }
    }

    fn localized_strings(&self) -> Result<LocalizedStrings, RentGuardError> {
        Ok(LocalizedStrings::new(self.cli.get_output_language()?))
    }

    async fn analyze(&self, args: &AnalyzeArgs) -> Result<i32, RentGuardError> {
        let store = self.credential_store()?;
        let credential = match credential::resolve_credential(args.api_key.as_deref(), &store)? {
            Some(credential) => credential,
            None => {
                eprintln!("❌ {}", self.localized_strings()?.get_message("key_missing"));
                return Ok(EXIT_USAGE);
            }
        };

        let files = match contract_file::load_batch(args.files.as_slice()) {
            Ok(files) => files,
            Err(e) => return self.render_failure(args, &e, args.files.len()),
        };

        tracing::info!(
            files = files.len(),
            model = %args.llm_config().model_name,
            "starting contract analysis"
        );

        let mut orchestrator = AnalysisOrchestrator::new(args.llm_config());
        match orchestrator.analyze_contract(&files, &credential).await {
            Ok(result) => {
                tracing::info!(risk_level = result.risk_level.as_str(), "analysis complete");
                self.print_result(args, &result)?;
                Ok(EXIT_OK)
            }
            Err(e) => {
                let count = AnalysisOrchestrator::validate_files(&files).len();
                self.render_failure(args, &e, count)
            }
        }
    }

    /// Prints the degraded result that stands in for a failed analysis.
    fn render_failure(
        &self,
        args: &AnalyzeArgs,
        error: &RentGuardError,
        file_count: usize,
    ) -> Result<i32, RentGuardError> {
        tracing::warn!(error = %error, "analysis failed");
        eprintln!("❌ {}", error);

        let result = AnalysisResult::failure(&error.to_string(), file_count);
        self.print_result(args, &result)?;

        Ok(if error.is_local() {
            EXIT_VALIDATION
        } else {
            EXIT_REMOTE
        })
    }

    fn print_result(&self, args: &AnalyzeArgs, result: &AnalysisResult) -> Result<(), RentGuardError> {
        let formatter = ReportFormatter::new(
            self.cli.get_output_language()?,
            self.cli.should_use_color(),
            self.cli.is_verbose(),
        );
        println!("{}", formatter.render(result, args.format)?);
        Ok(())
    }

    fn manage_key(&self, action: &KeyAction) -> Result<i32, RentGuardError> {
        let store = self.credential_store()?;
        let strings = self.localized_strings()?;

        match action {
            KeyAction::Set { key } => {
                store.save(key)?;
                println!("✅ {}", strings.get_message("key_saved"));
            }
            KeyAction::Show => match store.load()? {
                Some(key) => println!("{}", credential::mask(&key)),
                None => {
                    eprintln!("{}", strings.get_message("key_missing"));
                    return Ok(EXIT_GENERAL);
                }
            },
            KeyAction::Clear => {
                store.clear()?;
                println!("✅ {}", strings.get_message("key_cleared"));
            }
        }

        Ok(EXIT_OK)
    }

    fn print_guide(&self, section: Option<&str>) -> Result<i32, RentGuardError> {
        match section {
            None => println!("{}", guide::render_all()),
            Some(id) => match guide::find_section(id) {
                Some(section) => println!("{}", guide::render_section(section)),
                None => {
                    let known: Vec<_> = guide::GUIDE_SECTIONS.iter().map(|s| s.id).collect();
                    return Err(RentGuardError::InvalidArguments(format!(
                        "unknown guide section '{}' (expected one of: {})",
                        id,
                        known.join(", ")
                    )));
                }
            },
        }
        Ok(EXIT_OK)
    }
}
