//! PDF document assembly with lopdf.

use std::io::Cursor;

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, dictionary};

use crate::text::{Block, BlockKind, extract_blocks, wrap_text};

/// Fixed page sizes available for snapshot export, in PDF points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PageSize {
    /// 210mm x 297mm.
    #[default]
    A4,
    /// 8.5in x 11in.
    Letter,
}

impl PageSize {
    /// Page width and height in points.
    #[must_use]
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            Self::A4 => (595.0, 842.0),
            Self::Letter => (612.0, 792.0),
        }
    }
}

/// Snapshot rendering options.
#[derive(Clone, Debug)]
pub struct PdfOptions {
    /// Page size; A4 by default.
    pub page_size: PageSize,
    /// Margin on all four edges, in points.
    pub margin: f32,
    /// Paint the preview's dark background on every page. When off, pages
    /// stay white with dark text.
    pub background: bool,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            margin: 54.0,
            background: true,
        }
    }
}

/// Error returned when PDF generation fails.
#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    /// Content stream or document serialization failed.
    #[error("failed to encode PDF: {0}")]
    Encode(#[from] lopdf::Error),
    /// Document byte stream could not be written to the in-memory buffer.
    #[error("failed to write PDF bytes: {0}")]
    Io(#[from] std::io::Error),
}

/// Typography for one block kind: font resource, size, leading.
struct TextStyle {
    font: &'static str,
    size: f32,
    leading: f32,
    indent: f32,
    bullet: bool,
}

fn style_for(kind: BlockKind) -> TextStyle {
    match kind {
        BlockKind::Heading(1) => style("F2", 20.0, 0.0, false),
        BlockKind::Heading(2) => style("F2", 16.0, 0.0, false),
        BlockKind::Heading(_) => style("F2", 13.0, 0.0, false),
        BlockKind::Paragraph => style("F1", 11.0, 0.0, false),
        BlockKind::ListItem => style("F1", 11.0, 14.0, true),
        BlockKind::Code => style("F3", 9.5, 0.0, false),
    }
}

fn style(font: &'static str, size: f32, indent: f32, bullet: bool) -> TextStyle {
    TextStyle {
        font,
        size,
        leading: size * 1.35,
        indent,
        bullet,
    }
}

/// Average glyph width as a fraction of the font size, per font resource.
/// Helvetica body text averages about half an em; Courier is fixed-pitch.
fn avg_glyph_width(font: &str) -> f32 {
    if font == "F3" { 0.6 } else { 0.5 }
}

/// A positioned line ready for content-stream emission.
struct Line {
    text: String,
    x: f32,
    y: f32,
    font: &'static str,
    size: f32,
}

/// Render the live preview's displayed HTML as paginated PDF bytes.
///
/// The returned buffer is the complete document; nothing is written to disk
/// here. Rendering is deterministic for identical input.
pub fn render_snapshot(html: &str, options: &PdfOptions) -> Result<Vec<u8>, PdfError> {
    let (width, height) = options.page_size.dimensions();
    let text_width = width - 2.0 * options.margin;

    let blocks = extract_blocks(html);
    let pages = paginate(&blocks, options, height, text_width);
    tracing::debug!(blocks = blocks.len(), pages = pages.len(), "paginated snapshot");

    build_document(&pages, options, width, height)
}

/// Flow blocks into pages of positioned lines.
fn paginate(blocks: &[Block], options: &PdfOptions, height: f32, text_width: f32) -> Vec<Vec<Line>> {
    let mut pages: Vec<Vec<Line>> = Vec::new();
    let mut page: Vec<Line> = Vec::new();
    let mut y = height - options.margin;

    for block in blocks {
        let style = style_for(block.kind);
        let max_chars = (text_width - style.indent) / (style.size * avg_glyph_width(style.font));
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let max_chars = max_chars.max(1.0) as usize;

        for (line_no, wrapped) in wrap_text(&block.text, max_chars).into_iter().enumerate() {
            if y - style.leading < options.margin {
                pages.push(std::mem::take(&mut page));
                y = height - options.margin;
            }
            y -= style.leading;
            let text = if style.bullet && line_no == 0 {
                format!("\u{2022} {wrapped}")
            } else {
                wrapped
            };
            page.push(Line {
                text,
                x: options.margin + style.indent,
                y,
                font: style.font,
                size: style.size,
            });
        }
        // Gap between blocks.
        y -= style.leading * 0.5;
    }
    if !page.is_empty() || pages.is_empty() {
        pages.push(page);
    }
    pages
}

fn build_document(
    pages: &[Vec<Line>],
    options: &PdfOptions,
    width: f32,
    height: f32,
) -> Result<Vec<u8>, PdfError> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let font_regular = doc.add_object(dictionary! {
        "Type" => "Font", "Subtype" => "Type1",
        "BaseFont" => "Helvetica", "Encoding" => "WinAnsiEncoding",
    });
    let font_bold = doc.add_object(dictionary! {
        "Type" => "Font", "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold", "Encoding" => "WinAnsiEncoding",
    });
    let font_mono = doc.add_object(dictionary! {
        "Type" => "Font", "Subtype" => "Type1",
        "BaseFont" => "Courier", "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_regular,
            "F2" => font_bold,
            "F3" => font_mono,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for lines in pages {
        let content = Content {
            operations: page_operations(lines, options, width, height),
        };
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0f32.into(), 0f32.into(), width.into(), height.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    #[allow(clippy::cast_possible_wrap)]
    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut Cursor::new(&mut bytes))?;
    Ok(bytes)
}

fn page_operations(lines: &[Line], options: &PdfOptions, width: f32, height: f32) -> Vec<Operation> {
    let mut ops = Vec::new();

    // Background graphics are part of the snapshot contract.
    if options.background {
        ops.push(Operation::new(
            "rg",
            vec![0.118f32.into(), 0.118f32.into(), 0.118f32.into()],
        ));
        ops.push(Operation::new(
            "re",
            vec![0f32.into(), 0f32.into(), width.into(), height.into()],
        ));
        ops.push(Operation::new("f", vec![]));
    }

    ops.push(Operation::new("BT", vec![]));
    let (r, g, b): (f32, f32, f32) = if options.background {
        (0.83, 0.83, 0.83)
    } else {
        (0.1, 0.1, 0.1)
    };
    ops.push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));

    let mut last_x = 0.0f32;
    let mut last_y = 0.0f32;
    let mut last_font = "";
    let mut last_size = 0.0f32;
    for line in lines {
        if line.font != last_font || (line.size - last_size).abs() > f32::EPSILON {
            ops.push(Operation::new("Tf", vec![line.font.into(), line.size.into()]));
            last_font = line.font;
            last_size = line.size;
        }
        ops.push(Operation::new(
            "Td",
            vec![(line.x - last_x).into(), (line.y - last_y).into()],
        ));
        last_x = line.x;
        last_y = line.y;
        ops.push(Operation::new(
            "Tj",
            vec![Object::string_literal(encode_winansi(&line.text))],
        ));
    }
    ops.push(Operation::new("ET", vec![]));
    ops
}

/// Encode text for a WinAnsi (CP1252) base font. Unmappable characters
/// degrade to `?` rather than failing the export.
fn encode_winansi(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len());
    for c in text.chars() {
        let b = match c {
            '\u{20}'..='\u{7e}' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u8,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2026}' => 0x85,
            '\u{20ac}' => 0x80,
            _ => b'?',
        };
        bytes.push(b);
    }
    bytes
}
