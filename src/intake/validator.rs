use super::candidate::CandidateFile;
use crate::config::DropVaultConfig;
use crate::error::ValidationError;
use crate::notify::Notifier;

/// Size and type gate for incoming files. Never touches the catalog.
#[derive(Debug, Clone)]
pub struct IntakeValidator {
    max_file_size: u64,
    allowed_media_types: Vec<String>,
}

impl IntakeValidator {
    pub fn new(max_file_size: u64, allowed_media_types: Vec<String>) -> Self {
        Self {
            max_file_size,
            allowed_media_types: allowed_media_types
                .into_iter()
                .map(|t| t.to_lowercase())
                .collect(),
        }
    }

    pub fn from_config(config: &DropVaultConfig) -> Self {
        Self::new(
            config.max_file_size_bytes,
            config.allowed_media_types.clone(),
        )
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    pub fn check(&self, file: &CandidateFile) -> Result<(), ValidationError> {
        if file.size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                name: file.name.clone(),
                size: file.size,
                max: self.max_file_size,
            });
        }

        let normalized = file.media_type.to_lowercase();
        if !self.allowed_media_types.iter().any(|t| *t == normalized) {
            return Err(ValidationError::UnsupportedType {
                name: file.name.clone(),
                media_type: file.media_type.clone(),
            });
        }

        Ok(())
    }

    /// Keeps the files that pass, in their original order. Each rejection
    /// raises its own error notification.
    pub fn validate(
        &self,
        batch: Vec<CandidateFile>,
        notifier: &dyn Notifier,
    ) -> Vec<CandidateFile> {
        let total = batch.len();
        let accepted: Vec<CandidateFile> = batch
            .into_iter()
            .filter(|file| match self.check(file) {
                Ok(()) => true,
                Err(e) => {
                    tracing::debug!(name = %file.name, reason = %e, "Rejected file at intake");
                    notifier.error(e.to_string());
                    false
                }
            })
            .collect();

        tracing::info!(total, accepted = accepted.len(), "Validated intake batch");
        accepted
    }
}

impl Default for IntakeValidator {
    fn default() -> Self {
        Self::from_config(&DropVaultConfig::default())
    }
}
