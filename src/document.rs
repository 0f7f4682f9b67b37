use std::path::Path;

use log::debug;

use crate::{
    consts::{DEFAULT_CSS, DEFAULT_JS, DEFAULT_TEMPLATE},
    context::{ContextKey, RenderingContext},
    errors::ContextError,
    reflow::wrap_paragraphs,
    template::Template,
};

/// Keys the caller may pass through to the document. The file names and the
/// content are always filled in here.
const PASSTHROUGH_KEYS: [ContextKey; 4] = [
    ContextKey::Css,
    ContextKey::Js,
    ContextKey::Version,
    ContextKey::Timestamp,
];

/// Wraps raw `wdiff` output into a full HTML document.
///
/// The paragraphs are built with [`wrap_paragraphs`], the file names are shown
/// without their directories, and CSS and JavaScript fall back to the
/// built-in defaults when `context` doesn't provide them. The template comes
/// from `context` as well, if present.
pub fn wrap_document(
    original: &Path,
    changed: &Path,
    content: &str,
    fold_breaks: bool,
    context: &RenderingContext,
) -> Result<String, ContextError> {
    let template = document_template(context)?;
    let document_context = build_document_context(
        original,
        changed,
        wrap_paragraphs(content, fold_breaks),
        context,
    );

    template.render(&document_context)
}

/// Parses the template that [`wrap_document`] would use and makes sure it can
/// be rendered with `context`, so that mistakes surface before running
/// `wdiff`.
pub fn check_document_context(context: &RenderingContext) -> Result<(), ContextError> {
    let template = document_template(context)?;
    template.check(&|key| is_provided(key, context))
}

fn document_template(context: &RenderingContext) -> Result<Template, ContextError> {
    match context.get(ContextKey::Template) {
        Some(text) => {
            debug!("Using custom template");
            Template::parse(text)
        }
        None => Template::parse(DEFAULT_TEMPLATE),
    }
}

fn build_document_context(
    original: &Path,
    changed: &Path,
    content: String,
    context: &RenderingContext,
) -> RenderingContext {
    let mut document_context = RenderingContext::new()
        .with(ContextKey::OrgFile, display_name(original))
        .with(ContextKey::NewFile, display_name(changed))
        .with(ContextKey::Content, content)
        .with(ContextKey::Css, DEFAULT_CSS)
        .with(ContextKey::Js, DEFAULT_JS);

    for key in PASSTHROUGH_KEYS {
        if let Some(value) = context.get(key) {
            document_context.set(key, value);
        }
    }

    document_context
}

fn is_provided(key: ContextKey, context: &RenderingContext) -> bool {
    match key {
        ContextKey::OrgFile
        | ContextKey::NewFile
        | ContextKey::Content
        | ContextKey::Css
        | ContextKey::Js => true,
        ContextKey::Version | ContextKey::Timestamp => context.contains(key),
        ContextKey::Template => false,
    }
}

/// The file name without its directories, or the whole path if it has no
/// file name (e.g. `..`).
fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const DIFF: &str = "Hello <del>world</del><ins>there</ins>\nsecond line\n\n\nlast";

    #[test]
    fn test_file_names_without_directories() {
        let document = wrap_document(
            Path::new("a/rev1.txt"),
            Path::new("b/rev2.txt"),
            DIFF,
            false,
            &RenderingContext::new(),
        )
        .unwrap();

        assert!(document.contains("rev1.txt"));
        assert!(document.contains("rev2.txt"));
        assert!(!document.contains("a/rev1.txt"));
        assert!(!document.contains("b/rev2.txt"));
    }

    #[test]
    fn test_default_document() {
        let document = wrap_document(
            Path::new("/tmp/old/notes.md"),
            Path::new("notes.md"),
            DIFF,
            false,
            &RenderingContext::new(),
        )
        .unwrap();

        assert!(document.starts_with("<!DOCTYPE html>"));
        assert!(document.contains(DEFAULT_CSS));
        assert!(document.contains(DEFAULT_JS));
        assert!(document.contains(
            "<p>Hello <del>world</del><ins>there</ins><br />\nsecond line</p>\n<p>last</p>"
        ));
        assert!(!document.contains("Version:"));
        assert!(!document.contains("Generated:"));
        assert!(!document.contains("{{"));
    }

    #[test]
    fn test_custom_context() {
        let context = RenderingContext::from_pairs([
            ("template", "{{org_file}}|{{new_file}}|{{css}}|{{js}}|{{version}}|{{timestamp}}\n{{content}}"),
            ("css", "p {}"),
            ("js", "void 0;"),
            ("version", "1.0"),
            ("timestamp", "2024-05-01 12:00"),
        ])
        .unwrap();

        let document =
            wrap_document(Path::new("x/a.txt"), Path::new("y/b.txt"), DIFF, true, &context)
                .unwrap();

        assert_eq!(
            document,
            "a.txt|b.txt|p {}|void 0;|1.0|2024-05-01 12:00\n\
             <p>Hello <del>world</del><ins>there</ins>\nsecond line</p>\n<p>last</p>"
        );
    }

    #[test]
    fn test_default_template_shows_version_and_timestamp() {
        let context = RenderingContext::new()
            .with(ContextKey::Version, "r42")
            .with(ContextKey::Timestamp, "2024-05-01");

        let document =
            wrap_document(Path::new("a"), Path::new("b"), "text", false, &context).unwrap();

        assert!(document.contains(r#"<p class="version">Version: r42</p>"#));
        assert!(document.contains(r#"<p class="timestamp">Generated: 2024-05-01</p>"#));
    }

    #[test]
    fn test_template_needing_missing_value() {
        let context = RenderingContext::new().with(ContextKey::Template, "{{content}} {{version}}");

        assert_eq!(
            check_document_context(&context),
            Err(ContextError::MissingValue(ContextKey::Version))
        );
        assert_eq!(
            wrap_document(Path::new("a"), Path::new("b"), "text", false, &context),
            Err(ContextError::MissingValue(ContextKey::Version))
        );
        assert_eq!(
            check_document_context(&context.with(ContextKey::Version, "2")),
            Ok(())
        );
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(Path::new("a/b/c.txt")), "c.txt");
        assert_eq!(display_name(Path::new("c.txt")), "c.txt");
        assert_eq!(display_name(Path::new("..")), "..");
    }
}
