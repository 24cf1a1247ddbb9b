//! Text block extraction from preview HTML.
//!
//! The snapshot renderer does not lay out HTML; it recovers the text flow
//! of the preview as a sequence of typed blocks and leaves typography to
//! the page writer.

/// Visual role of an extracted block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BlockKind {
    /// Heading with level 1-6.
    Heading(u8),
    /// Body paragraph.
    Paragraph,
    /// List item (rendered with a bullet and indent).
    ListItem,
    /// Preformatted code; internal newlines are preserved.
    Code,
}

/// One block of text recovered from the preview.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Block {
    pub(crate) kind: BlockKind,
    pub(crate) text: String,
}

/// Extract text blocks from an HTML fragment in display order.
///
/// Tags select the block kind; everything else is whitespace-normalized
/// text. Unknown tags are transparent. `<script>` and `<style>` contents
/// are dropped.
pub(crate) fn extract_blocks(html: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut current = String::new();
    let mut kind = BlockKind::Paragraph;
    let mut in_pre = false;
    let mut skip_depth = 0usize;

    let bytes = html.as_bytes();
    let mut pos = 0;
    while pos < bytes.len() {
        if bytes[pos] == b'<' {
            let Some(close) = html[pos..].find('>') else {
                // Truncated tag; treat the rest as text.
                if skip_depth == 0 {
                    push_text(&mut current, &html[pos..], in_pre);
                }
                break;
            };
            let tag = &html[pos + 1..pos + close];
            pos += close + 1;

            let (name, closing) = tag_name(tag);
            match name.as_str() {
                "script" | "style" => {
                    if closing {
                        skip_depth = skip_depth.saturating_sub(1);
                    } else {
                        skip_depth += 1;
                    }
                }
                "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                    flush(&mut blocks, &mut current, kind);
                    kind = if closing {
                        BlockKind::Paragraph
                    } else {
                        BlockKind::Heading(name.as_bytes()[1] - b'0')
                    };
                }
                "p" | "blockquote" | "dt" | "dd" => {
                    flush(&mut blocks, &mut current, kind);
                    kind = BlockKind::Paragraph;
                }
                "li" => {
                    flush(&mut blocks, &mut current, kind);
                    kind = if closing { BlockKind::Paragraph } else { BlockKind::ListItem };
                }
                "pre" => {
                    flush(&mut blocks, &mut current, kind);
                    in_pre = !closing;
                    kind = if closing { BlockKind::Paragraph } else { BlockKind::Code };
                }
                "br" => current.push('\n'),
                "tr" => flush(&mut blocks, &mut current, kind),
                "td" | "th" => {
                    if closing && !current.is_empty() && !current.ends_with(' ') {
                        current.push(' ');
                    }
                }
                _ => {}
            }
        } else {
            let next = html[pos..].find('<').map_or(bytes.len(), |i| pos + i);
            if skip_depth == 0 {
                push_text(&mut current, &html[pos..next], in_pre);
            }
            pos = next;
            continue;
        }
    }
    flush(&mut blocks, &mut current, kind);
    blocks
}

fn tag_name(tag: &str) -> (String, bool) {
    let tag = tag.trim();
    let closing = tag.starts_with('/');
    let tag = tag.trim_start_matches('/');
    let name: String = tag
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();
    (name, closing)
}

fn push_text(current: &mut String, raw: &str, in_pre: bool) {
    let decoded = decode_entities(raw);
    if in_pre {
        current.push_str(&decoded);
        return;
    }
    // Collapse runs of whitespace the way the browser displays them.
    for piece in decoded.split_whitespace() {
        if !current.is_empty() && !current.ends_with('\n') {
            current.push(' ');
        }
        current.push_str(piece);
    }
}

fn flush(blocks: &mut Vec<Block>, current: &mut String, kind: BlockKind) {
    let text = std::mem::take(current);
    let trimmed = if kind == BlockKind::Code {
        text.trim_matches('\n').to_owned()
    } else {
        text.trim().to_owned()
    };
    if !trimmed.is_empty() {
        blocks.push(Block { kind, text: trimmed });
    }
}

/// Decode the entities the pipeline's own renderer emits, plus numeric
/// character references.
fn decode_entities(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('&') {
        result.push_str(&rest[..start]);
        rest = &rest[start..];
        // Entity names are short; anything further away than a few bytes is
        // a bare ampersand.
        let end = match rest.find(';') {
            Some(end) if end <= 12 => end,
            _ => {
                result.push('&');
                rest = &rest[1..];
                continue;
            }
        };
        let entity = &rest[1..end];
        let replacement = match entity {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            "nbsp" => Some(' '),
            _ => entity
                .strip_prefix('#')
                .and_then(|num| {
                    num.strip_prefix('x')
                        .or_else(|| num.strip_prefix('X'))
                        .map_or_else(|| num.parse::<u32>().ok(), |hex| u32::from_str_radix(hex, 16).ok())
                })
                .and_then(char::from_u32),
        };
        if let Some(c) = replacement {
            result.push(c);
            rest = &rest[end + 1..];
        } else {
            result.push('&');
            rest = &rest[1..];
        }
    }
    result.push_str(rest);
    result
}

/// Greedy word wrap to at most `max_chars` per line.
///
/// Words longer than the limit are hard-split rather than overflowing the
/// text area.
pub(crate) fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    for raw_line in text.split('\n') {
        let mut line = String::new();
        for word in raw_line.split_whitespace() {
            let mut word = word;
            loop {
                let needed = if line.is_empty() { word.chars().count() } else { line.chars().count() + 1 + word.chars().count() };
                if needed <= max_chars {
                    if !line.is_empty() {
                        line.push(' ');
                    }
                    line.push_str(word);
                    break;
                }
                if line.is_empty() {
                    let split_at = word
                        .char_indices()
                        .nth(max_chars)
                        .map_or(word.len(), |(i, _)| i);
                    lines.push(word[..split_at].to_owned());
                    word = &word[split_at..];
                    if word.is_empty() {
                        break;
                    }
                } else {
                    lines.push(std::mem::take(&mut line));
                }
            }
        }
        lines.push(line);
    }
    // Inner empty lines are kept (blank code lines); a trailing artifact of
    // the split is not.
    while lines.last().is_some_and(String::is_empty) && lines.len() > 1 {
        lines.pop();
    }
    lines
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_extract_heading_and_paragraph() {
        let blocks = extract_blocks("<h1>Title</h1><p>Body text.</p>");
        assert_eq!(
            blocks,
            vec![
                Block { kind: BlockKind::Heading(1), text: "Title".to_owned() },
                Block { kind: BlockKind::Paragraph, text: "Body text.".to_owned() },
            ]
        );
    }

    #[test]
    fn test_extract_list_items() {
        let blocks = extract_blocks("<ul><li>One</li><li>Two</li></ul>");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].kind, BlockKind::ListItem);
        assert_eq!(blocks[1].text, "Two");
    }

    #[test]
    fn test_pre_preserves_newlines() {
        let blocks = extract_blocks("<pre><code>line one\nline two</code></pre>");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::Code);
        assert_eq!(blocks[0].text, "line one\nline two");
    }

    #[test]
    fn test_inline_markup_is_transparent() {
        let blocks = extract_blocks("<p>some <strong>bold</strong> and <em>italic</em></p>");
        assert_eq!(blocks[0].text, "some bold and italic");
    }

    #[test]
    fn test_entities_decoded() {
        let blocks = extract_blocks("<p>a &lt; b &amp; c &#8594; d</p>");
        assert_eq!(blocks[0].text, "a < b & c \u{2192} d");
    }

    #[test]
    fn test_script_content_dropped() {
        let blocks = extract_blocks("<p>keep</p><script>var x = 1;</script>");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "keep");
    }

    #[test]
    fn test_whitespace_collapsed() {
        let blocks = extract_blocks("<p>a\n   b\t\tc</p>");
        assert_eq!(blocks[0].text, "a b c");
    }

    #[test]
    fn test_wrap_basic() {
        let lines = wrap_text("one two three four", 9);
        assert_eq!(lines, vec!["one two", "three", "four"]);
    }

    #[test]
    fn test_wrap_long_word_split() {
        let lines = wrap_text("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_preserves_code_lines() {
        let lines = wrap_text("fn main() {\n\n}", 40);
        assert_eq!(lines, vec!["fn main() {", "", "}"]);
    }
}
