//! Event-driven HTML renderer over pulldown-cmark.

use std::fmt::Write;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

/// Render one markdown string to an HTML fragment.
///
/// Empty input yields the empty string. Malformed markdown (unclosed fences,
/// unmatched emphasis) renders best-effort; this function never fails.
#[must_use]
pub fn render(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM;
    let parser = Parser::new_ext(markdown, options);

    let mut renderer = Renderer::new();
    for event in parser {
        renderer.process_event(event);
    }
    renderer.output
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Accumulating renderer state for one markdown document.
struct Renderer {
    output: String,
    /// Fence language and buffered content of the open code block, if any.
    code: Option<(Option<String>, String)>,
    /// Buffered alt text of the open image, if any.
    image_alt: Option<String>,
    /// Source URL and title of the open image.
    pending_image: Option<(String, String)>,
    in_table_head: bool,
    /// Heading levels opened but not yet closed, innermost last.
    open_headings: Vec<u8>,
}

impl Renderer {
    fn new() -> Self {
        Self {
            output: String::with_capacity(1024),
            code: None,
            image_alt: None,
            pending_image: None,
            in_table_head: false,
            open_headings: Vec::new(),
        }
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => {
                write!(self.output, "<code>{}</code>", escape_html(&code)).unwrap();
            }
            Event::Html(html) | Event::InlineHtml(html) => self.output.push_str(&html),
            Event::SoftBreak => {
                if let Some((_, buf)) = self.code.as_mut() {
                    buf.push('\n');
                } else {
                    self.output.push('\n');
                }
            }
            Event::HardBreak => self.output.push_str("<br>"),
            Event::Rule => self.output.push_str("<hr>"),
            Event::TaskListMarker(checked) => {
                self.output.push_str(if checked {
                    r#"<input type="checkbox" checked disabled>"#
                } else {
                    r#"<input type="checkbox" disabled>"#
                });
            }
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Not supported
            }
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.output.push_str("<p>"),
            Tag::Heading { level, .. } => {
                // Plain tags, no id attribute: in-page addressing belongs to
                // the exported document's navigation runtime.
                let level = heading_level_to_num(level);
                self.open_headings.push(level);
                write!(self.output, "<h{level}>").unwrap();
            }
            Tag::BlockQuote(_) => self.output.push_str("<blockquote>"),
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(ref info) if !info.is_empty() => info
                        .split_whitespace()
                        .next()
                        .map(std::borrow::ToOwned::to_owned),
                    _ => None,
                };
                self.code = Some((lang, String::new()));
            }
            Tag::List(start) => match start {
                Some(1) => self.output.push_str("<ol>"),
                Some(n) => write!(self.output, r#"<ol start="{n}">"#).unwrap(),
                None => self.output.push_str("<ul>"),
            },
            Tag::Item => self.output.push_str("<li>"),
            Tag::Table(_) => self.output.push_str("<table>"),
            Tag::TableHead => {
                self.in_table_head = true;
                self.output.push_str("<thead><tr>");
            }
            Tag::TableRow => self.output.push_str("<tr>"),
            Tag::TableCell => {
                self.output
                    .push_str(if self.in_table_head { "<th>" } else { "<td>" });
            }
            Tag::Emphasis => self.output.push_str("<em>"),
            Tag::Strong => self.output.push_str("<strong>"),
            Tag::Strikethrough => self.output.push_str("<s>"),
            Tag::Link { dest_url, .. } => {
                write!(self.output, r#"<a href="{}">"#, escape_html(&dest_url)).unwrap();
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                self.image_alt = Some(String::new());
                self.pending_image = Some((dest_url.to_string(), title.to_string()));
            }
            Tag::DefinitionList => self.output.push_str("<dl>"),
            Tag::DefinitionListTitle => self.output.push_str("<dt>"),
            Tag::DefinitionListDefinition => self.output.push_str("<dd>"),
            Tag::Superscript => self.output.push_str("<sup>"),
            Tag::Subscript => self.output.push_str("<sub>"),
            Tag::FootnoteDefinition(_) | Tag::HtmlBlock | Tag::MetadataBlock(_) => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.output.push_str("</p>"),
            TagEnd::Heading(_) => {
                if let Some(level) = self.open_headings.pop() {
                    write!(self.output, "</h{level}>").unwrap();
                }
            }
            TagEnd::BlockQuote(_) => self.output.push_str("</blockquote>"),
            TagEnd::CodeBlock => {
                if let Some((lang, content)) = self.code.take() {
                    match lang {
                        Some(lang) => write!(
                            self.output,
                            r#"<pre><code class="language-{}">{}</code></pre>"#,
                            escape_html(&lang),
                            escape_html(&content)
                        )
                        .unwrap(),
                        None => write!(
                            self.output,
                            "<pre><code>{}</code></pre>",
                            escape_html(&content)
                        )
                        .unwrap(),
                    }
                }
            }
            TagEnd::List(ordered) => {
                self.output
                    .push_str(if ordered { "</ol>" } else { "</ul>" });
            }
            TagEnd::Item => self.output.push_str("</li>"),
            TagEnd::Table => self.output.push_str("</tbody></table>"),
            TagEnd::TableHead => {
                self.in_table_head = false;
                self.output.push_str("</tr></thead><tbody>");
            }
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                self.output
                    .push_str(if self.in_table_head { "</th>" } else { "</td>" });
            }
            TagEnd::Emphasis => self.output.push_str("</em>"),
            TagEnd::Strong => self.output.push_str("</strong>"),
            TagEnd::Strikethrough => self.output.push_str("</s>"),
            TagEnd::Link => self.output.push_str("</a>"),
            TagEnd::Image => {
                let alt = self.image_alt.take().unwrap_or_default();
                if let Some((src, title)) = self.pending_image.take() {
                    if title.is_empty() {
                        write!(
                            self.output,
                            r#"<img src="{}" alt="{}">"#,
                            escape_html(&src),
                            escape_html(&alt)
                        )
                        .unwrap();
                    } else {
                        write!(
                            self.output,
                            r#"<img src="{}" title="{}" alt="{}">"#,
                            escape_html(&src),
                            escape_html(&title),
                            escape_html(&alt)
                        )
                        .unwrap();
                    }
                }
            }
            TagEnd::DefinitionList => self.output.push_str("</dl>"),
            TagEnd::DefinitionListTitle => self.output.push_str("</dt>"),
            TagEnd::DefinitionListDefinition => self.output.push_str("</dd>"),
            TagEnd::Superscript => self.output.push_str("</sup>"),
            TagEnd::Subscript => self.output.push_str("</sub>"),
            TagEnd::FootnoteDefinition | TagEnd::HtmlBlock | TagEnd::MetadataBlock(_) => {}
        }
    }

    fn text(&mut self, text: &str) {
        if let Some((_, buf)) = self.code.as_mut() {
            buf.push_str(text);
        } else if let Some(alt) = self.image_alt.as_mut() {
            alt.push_str(text);
        } else {
            self.output.push_str(&escape_html(text));
        }
    }
}

fn heading_level_to_num(level: pulldown_cmark::HeadingLevel) -> u8 {
    use pulldown_cmark::HeadingLevel;
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_basic_paragraph() {
        assert_eq!(render("Hello, world!"), "<p>Hello, world!</p>");
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert_eq!(render(""), "");
    }

    #[test]
    fn test_heading_without_id() {
        assert_eq!(render("## Section Title"), "<h2>Section Title</h2>");
    }

    #[test]
    fn test_code_block_with_language() {
        let html = render("```rust\nfn main() {}\n```");
        assert!(html.contains(r#"class="language-rust""#));
        assert!(html.contains("fn main() {}"));
    }

    #[test]
    fn test_code_block_escapes_html() {
        let html = render("```\n<script>alert(1)</script>\n```");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_unclosed_fence_degrades_gracefully() {
        let html = render("```rust\nfn main() {");
        assert!(html.contains("fn main() {"));
    }

    #[test]
    fn test_unmatched_emphasis_degrades_gracefully() {
        let html = render("some *emphasis that never closes");
        assert!(html.contains("emphasis that never closes"));
    }

    #[test]
    fn test_emphasis_and_strong() {
        let html = render("*italic* and **bold**");
        assert!(html.contains("<em>italic</em>"));
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_strikethrough() {
        assert!(render("~~deleted~~").contains("<s>deleted</s>"));
    }

    #[test]
    fn test_lists() {
        let html = render("- Item 1\n- Item 2");
        assert!(html.contains("<ul>"));
        assert!(html.contains("<li>Item 1</li>"));

        let html = render("1. First\n2. Second");
        assert!(html.contains("<ol>"));
        assert!(html.contains("</ol>"));
    }

    #[test]
    fn test_task_list() {
        let html = render("- [ ] Unchecked\n- [x] Checked");
        assert!(html.contains(r#"<input type="checkbox" disabled>"#));
        assert!(html.contains(r#"<input type="checkbox" checked disabled>"#));
    }

    #[test]
    fn test_table() {
        let html = render("| A | B |\n|---|---|\n| 1 | 2 |");
        assert!(html.contains("<table>"));
        assert!(html.contains("<th>A</th>"));
        assert!(html.contains("<td>1</td>"));
        assert!(html.contains("</tbody></table>"));
    }

    #[test]
    fn test_link() {
        let html = render("[Link Text](http://example.com)");
        assert_eq!(html, r#"<p><a href="http://example.com">Link Text</a></p>"#);
    }

    #[test]
    fn test_image_with_title() {
        let html = render(r#"![alt text](image.png "Image Title")"#);
        assert_eq!(
            html,
            r#"<p><img src="image.png" title="Image Title" alt="alt text"></p>"#
        );
    }

    #[test]
    fn test_blockquote() {
        let html = render("> Blockquote goes here");
        assert!(html.contains("<blockquote>"));
        assert!(html.contains("</blockquote>"));
    }

    #[test]
    fn test_inline_code() {
        assert!(render("`inline code`").contains("<code>inline code</code>"));
    }

    #[test]
    fn test_text_escaped() {
        let html = render("a < b & c > d");
        assert!(html.contains("a &lt; b &amp; c &gt; d"));
    }

    #[test]
    fn test_deterministic() {
        let source = "# Title\n\nSome *text* with a [link](x.md).\n\n```\ncode\n```";
        assert_eq!(render(source), render(source));
    }

    #[test]
    fn test_hard_break_and_rule() {
        assert!(render("line one  \nline two").contains("<br>"));
        assert!(render("---").contains("<hr>"));
    }
}
