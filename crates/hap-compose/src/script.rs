//! Inline script block assembly.
//!
//! The exported document carries its section data and navigation runtime in
//! a single inline `<script>` element. Everything serialized into it must be
//! safe to embed: a `</script` byte sequence inside author content would
//! terminate the element early and break the whole document.

use hap_sections::RenderedSection;

/// The navigation runtime shipped inside every exported document.
const RUNTIME_JS: &str = include_str!("../assets/runtime.js");

/// Build the full script block: section data, document title, runtime.
pub(crate) fn script_block(
    sections: &[RenderedSection],
    doc_title: &str,
) -> Result<String, serde_json::Error> {
    let sections_json = embed_json(&serde_json::to_string(sections)?);
    let title_json = embed_json(&serde_json::to_string(doc_title)?);
    Ok(format!(
        "const sections = {sections_json};\nconst docTitle = {title_json};\n\n{RUNTIME_JS}"
    ))
}

/// Re-escape a JSON document for embedding inside a `<script>` element.
///
/// serde_json only ever emits `<`, `>`, and `&` inside string literals, so a
/// global replacement with `\uXXXX` escapes is exact: the decoded values are
/// unchanged and the embedded text can no longer contain `</script` or
/// `<!--` sequences.
fn embed_json(json: &str) -> String {
    json.replace('&', "\\u0026")
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_embed_json_strips_angle_brackets() {
        let sections = vec![RenderedSection::new(
            "Evil",
            "<p>before</p><script>alert(1)</script>",
        )];
        let block = script_block(&sections, "T").unwrap();
        // The serialized data lines must not contain a closing-tag byte
        // sequence; serde_json keeps each literal on one line.
        for data_line in block.lines().take(2) {
            assert!(!data_line.contains("</"), "unsafe data line: {data_line}");
        }
        assert!(block.contains("\\u003c/script\\u003e"));
    }

    #[test]
    fn test_embed_json_round_trips() {
        let input = r#"["</script><!--&"]"#;
        let escaped = embed_json(input);
        let decoded: Vec<String> = serde_json::from_str(&escaped).unwrap();
        assert_eq!(decoded, vec!["</script><!--&".to_owned()]);
    }

    #[test]
    fn test_script_block_carries_data_and_runtime() {
        let sections = vec![RenderedSection::new("A", "<p>a</p>")];
        let block = script_block(&sections, "Manual").unwrap();
        assert!(block.starts_with("const sections = ["));
        assert!(block.contains("const docTitle = \"Manual\";"));
        assert!(block.contains("function loadSection"));
    }
}
