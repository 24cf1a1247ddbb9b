//! `hap pdf` command implementation.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use hap_export::{ExportOutcome, Exporter};
use hap_pdf::{PageSize, PdfOptions};

use crate::commands::open_project;
use crate::error::CliError;
use crate::output::Output;

/// Page size choices for PDF export.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum PageSizeArg {
    A4,
    Letter,
}

impl From<PageSizeArg> for PageSize {
    fn from(value: PageSizeArg) -> Self {
        match value {
            PageSizeArg::A4 => Self::A4,
            PageSizeArg::Letter => Self::Letter,
        }
    }
}

/// Arguments for the pdf command.
#[derive(Args)]
pub(crate) struct PdfArgs {
    /// Project file (.json) or single markdown file.
    project: PathBuf,

    /// Destination path for the PDF.
    #[arg(short, long)]
    out: PathBuf,

    /// Section index to snapshot (the section the preview would display).
    #[arg(short, long, default_value_t = 0)]
    section: usize,

    /// Page size.
    #[arg(long, value_enum, default_value_t = PageSizeArg::A4)]
    page_size: PageSizeArg,

    /// Render on white instead of the preview's dark background.
    #[arg(long)]
    no_background: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl PdfArgs {
    /// Execute the pdf command.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let state = open_project(&self.project)?;

        let snapshot = state.snapshot();
        let section = snapshot.get(self.section).ok_or_else(|| {
            CliError::Validation(format!(
                "section index {} out of range (project has {} sections)",
                self.section,
                snapshot.len()
            ))
        })?;

        // Page-snapshot semantics: render the section the way the live
        // preview displays it and paginate that.
        let preview_html = hap_renderer::render(&section.content);

        let options = PdfOptions {
            page_size: self.page_size.into(),
            background: !self.no_background,
            ..PdfOptions::default()
        };
        let outcome = Exporter::new().export_pdf(&preview_html, &options, Some(&self.out))?;

        match outcome {
            ExportOutcome::Written(path) => {
                output.success(&format!("PDF exported to: {}", path.display()));
            }
            ExportOutcome::Cancelled => {
                output.warning("Export cancelled");
            }
        }
        Ok(())
    }
}
