use crate::analyzer::llm_client::{KimiClient, LlmConfig};
use crate::analyzer::transport::{HttpTransport, KimiTransport};
use crate::error::RentGuardError;
use crate::models::{AnalysisResult, ContractFile};
use chrono::Utc;
use std::sync::Arc;

/// Builds the transport for a credential.
pub type TransportFactory =
    Arc<dyn Fn(&str, &LlmConfig) -> Result<Arc<dyn KimiTransport>, RentGuardError> + Send + Sync>;

/// Entry point for the presentation layer. Owns at most one client, bound to
/// the credential it was last used with.
pub struct AnalysisOrchestrator {
    config: LlmConfig,
    transport_factory: TransportFactory,
    client: Option<KimiClient>,
    clients_built: usize,
}

impl AnalysisOrchestrator {
    pub fn new(config: LlmConfig) -> Self {
        let factory: TransportFactory = Arc::new(
            |credential: &str, config: &LlmConfig| -> Result<Arc<dyn KimiTransport>, RentGuardError> {
                let transport = HttpTransport::new(&config.base_url, credential, config.timeout())?;
                Ok(Arc::new(transport))
            },
        );
        Self::with_transport_factory(config, factory)
    }

    pub fn with_transport_factory(config: LlmConfig, transport_factory: TransportFactory) -> Self {
        Self {
            config,
            transport_factory,
            client: None,
            clients_built: 0,
        }
    }

    /// Returns the client for `credential`, rebuilding it only when the
    /// credential differs from the one the current client was built with.
    pub fn client_for(&mut self, credential: &str) -> Result<&KimiClient, RentGuardError> {
        let reusable = matches!(&self.client, Some(client) if client.credential() == credential);

        if !reusable {
            tracing::debug!("building Kimi client for new credential");
            let transport = (self.transport_factory)(credential, &self.config)?;
            self.client = Some(KimiClient::with_transport(
                credential,
                self.config.clone(),
                transport,
            ));
            self.clients_built += 1;
        }

        self.client
            .as_ref()
            .ok_or_else(|| RentGuardError::remote("client initialization failed"))
    }

    /// Number of clients constructed so far.
    pub fn clients_built(&self) -> usize {
        self.clients_built
    }

    /// Keeps only images and PDFs.
    pub fn validate_files(files: &[ContractFile]) -> Vec<ContractFile> {
        files
            .iter()
            .filter(|file| file.is_analyzable())
            .cloned()
            .collect()
    }

    pub async fn analyze_contract(
        &mut self,
        files: &[ContractFile],
        credential: &str,
    ) -> Result<AnalysisResult, RentGuardError> {
        if credential.trim().is_empty() {
            return Err(RentGuardError::MissingCredential);
        }

        let client = self.client_for(credential)?;

        let valid_files = Self::validate_files(files);
        if valid_files.is_empty() {
            return Err(RentGuardError::NoValidFiles);
        }

        if valid_files.len() < files.len() {
            tracing::info!(
                skipped = files.len() - valid_files.len(),
                "skipping files that are neither images nor PDFs"
            );
        }

        let result = client
            .analyze(&valid_files)
            .await
            .map_err(RentGuardError::with_default_message)?;

        let mut result = result.normalized();
        result.file_count = valid_files.len();
        result.analysis_date = Utc::now();

        Ok(result)
    }
}
