//! `hap preview` command implementation.

use std::path::PathBuf;

use clap::Args;
use hap_export::Exporter;

use crate::commands::open_project;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the preview command.
#[derive(Args)]
pub(crate) struct PreviewArgs {
    /// Project file (.json) or single markdown file.
    project: PathBuf,

    /// Document title shown in the preview.
    #[arg(short, long)]
    title: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl PreviewArgs {
    /// Execute the preview command.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let state = open_project(&self.project)?;

        let title = self.title.as_deref().unwrap_or("Preview");
        let path = Exporter::new().preview(&state.snapshot(), title)?;

        output.info(&format!("Preview written to: {}", path.display()));
        output.success("Opened in default browser");
        Ok(())
    }
}
