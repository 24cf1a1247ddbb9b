//! `hap export` command implementation.

use std::path::PathBuf;

use clap::Args;
use hap_compose::Compositor;
use hap_export::{ExportOutcome, Exporter};

use crate::commands::open_project;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the export command.
#[derive(Args)]
pub(crate) struct ExportArgs {
    /// Project file (.json) or single markdown file.
    project: PathBuf,

    /// Destination path for the HTML document.
    #[arg(short, long)]
    out: PathBuf,

    /// Document title shown in the exported viewer.
    #[arg(short, long)]
    title: Option<String>,

    /// Custom skeleton template file (defaults to the bundled skeleton).
    #[arg(long)]
    template: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ExportArgs {
    /// Execute the export command.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let state = open_project(&self.project)?;

        let compositor = match self.template {
            Some(path) => Compositor::with_template_file(path),
            None => Compositor::new(),
        };
        let exporter = Exporter::with_compositor(compositor);

        let title = self.title.as_deref().unwrap_or_default();
        let outcome = exporter.export_html(&state.snapshot(), title, Some(&self.out))?;

        match outcome {
            ExportOutcome::Written(path) => {
                output.success(&format!("HTML exported to: {}", path.display()));
            }
            ExportOutcome::Cancelled => {
                output.warning("Export cancelled");
            }
        }
        Ok(())
    }
}
