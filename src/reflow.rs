use crate::consts::LINE_BREAK;

const PARAGRAPH_SEPARATOR: &str = "\n\n";
const LINE_SEPARATOR: &str = "\n";

/// Wraps every paragraph of raw `wdiff` output in `<p>` tags.
///
/// Paragraphs are separated by blank lines; runs of blank lines never produce
/// empty paragraphs. Unless `fold_breaks` is set, the line breaks inside a
/// paragraph are kept visible with `<br />` tags.
///
/// `<ins>` and `<del>` markers are treated as plain text: only newlines are
/// ever looked at. Running this on its own output is not a no-op.
///
/// ## Example
///
/// ```not_rust
/// "a\nb\n\n\n\nc" -> "<p>a<br />\nb</p>\n<p>c</p>"
/// ```
#[must_use]
pub fn wrap_paragraphs(content: &str, fold_breaks: bool) -> String {
    let content = normalize_line_endings(content);

    content
        .split(PARAGRAPH_SEPARATOR)
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
        .map(|paragraph| build_paragraph(paragraph, fold_breaks))
        .collect::<Vec<_>>()
        .join(LINE_SEPARATOR)
}

/// Wraps a single paragraph in `<p>` tags, dropping blank lines and, unless
/// `fold_breaks` is set, ending every line but the last with `<br />`.
#[must_use]
pub fn build_paragraph(content: &str, fold_breaks: bool) -> String {
    let lines = content
        .split(LINE_SEPARATOR)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>();

    let separator = if fold_breaks {
        LINE_SEPARATOR.to_owned()
    } else {
        format!("{LINE_BREAK}{LINE_SEPARATOR}")
    };

    format!("<p>{}</p>", lines.join(separator.as_str()))
}

/// `wdiff` passes `\r\n` through from its inputs, and a stray `\r` would stop
/// blank lines from being recognised as paragraph separators.
fn normalize_line_endings(content: &str) -> String { content.replace("\r\n", LINE_SEPARATOR) }
