use playlist::validate::validate_file;

use super::CommandExecutor;
use crate::{
    error::{AppError, Result},
    output::{self, ValidationSummary},
};

impl CommandExecutor {
    /// Lint every playlist. Fails when any playlist has errors.
    pub fn validate(&self) -> Result<()> {
        output::heading("🔍 Validating playlists...");
        let store = self.open_store()?;

        let reports: Vec<_> = store.files().iter().map(validate_file).collect();

        output::section("Validation Results:\n");
        for report in &reports {
            output::print_validation_report(report);
        }

        let summary = ValidationSummary::from_reports(&reports);
        output::print_validation_summary(&summary);

        if summary.has_errors() {
            output::failure("\n❌ Validation failed!");
            return Err(AppError::ValidationFailed {
                errors: summary.errors,
            });
        }

        output::success("\n✅ All playlists are valid!");
        Ok(())
    }
}
