//! PDF snapshot rendering for the hap export pipeline.
//!
//! PDF export has page-snapshot semantics, not document-composition
//! semantics: it takes whatever HTML the live preview is currently
//! displaying and produces paginated output for a fixed page size with
//! background graphics included. It does not reconstruct navigation, the
//! sidebar, or the section model.
//!
//! The renderer extracts text blocks from the displayed HTML, wraps and
//! paginates them, and writes a PDF using Type1 base fonts (Helvetica,
//! Helvetica-Bold, Courier) with WinAnsi encoding. The full byte stream is
//! constructed in memory; callers persist it only once it exists completely.

mod text;
mod writer;

pub use writer::{PageSize, PdfError, PdfOptions, render_snapshot};
