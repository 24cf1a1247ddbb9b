//! Export driver for hap.
//!
//! Orchestrates the pipeline: take a snapshot of sections, render each to
//! HTML, compose the standalone document, and persist the bytes — or, for
//! preview, write them to a fresh uniquely-named temporary file and ask the
//! platform to open it in the default browser. PDF export is the degenerate
//! third variant: a paginated snapshot of the live preview's displayed HTML.
//!
//! Every operation is short-lived and atomic from the caller's perspective:
//! either it completes and reports the written path, or it fails or is
//! cancelled before any partial file exists at the destination. Concurrent
//! exports to distinct destinations are safe without locking because
//! composition is a pure function of its inputs.

mod driver;
mod launch;

pub use driver::{ExportError, ExportOutcome, Exporter};
pub use launch::{BrowserLauncher, SystemLauncher};
