//! CLI error types.

use hap_export::ExportError;
use hap_project::ProjectError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Project(#[from] ProjectError),

    #[error("{0}")]
    Export(#[from] ExportError),

    #[error("{0}")]
    Validation(String),
}
