mod consts;
mod context;
mod document;
mod errors;
mod reflow;
mod template;
mod wdiff;

pub use consts::{DEFAULT_CSS, DEFAULT_JS, DEFAULT_TEMPLATE, WDIFF_PROGRAM};
pub use context::{ContextKey, RenderingContext};
pub use document::{check_document_context, wrap_document};
pub use errors::{ContextError, Error, Result};
use log::debug;
pub use reflow::{build_paragraph, wrap_paragraphs};
pub use template::Template;
pub use wdiff::{DiffEngine, DiffRequest, Wdiff, ensure_engine_available, run_diff};

/// What [`wdiff_html`] produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Output {
    /// Just the `<p>` blocks.
    #[default]
    Fragment,
    /// A complete HTML document built from the template in the context.
    Document,
}

/// Diffs the two files of `request` with `engine` and turns the result into
/// HTML.
///
/// For [`Output::Document`] the context is validated against the template
/// before `engine` runs, so a bad template never costs a diff. Either the
/// complete HTML is returned or nothing is.
pub fn wdiff_html(
    engine: &dyn DiffEngine,
    request: &DiffRequest,
    output: Output,
    context: &RenderingContext,
) -> Result<String> {
    if output == Output::Document {
        check_document_context(context)?;
    }

    let diff = engine.diff(request)?;
    debug!("Diff has {} bytes", diff.len());

    Ok(match output {
        Output::Fragment => wrap_paragraphs(&diff, request.fold_breaks()),
        Output::Document => wrap_document(
            request.original(),
            request.changed(),
            &diff,
            request.fold_breaks(),
            context,
        )?,
    })
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use pretty_assertions::assert_eq;

    use super::*;

    struct CannedEngine {
        diff: &'static str,
        calls: Cell<usize>,
    }

    impl CannedEngine {
        fn new(diff: &'static str) -> Self {
            Self {
                diff,
                calls: Cell::new(0),
            }
        }
    }

    impl DiffEngine for CannedEngine {
        fn diff(&self, _request: &DiffRequest) -> Result<String> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.diff.to_owned())
        }
    }

    #[test]
    fn test_fragment() {
        let engine = CannedEngine::new("one\ntwo\n\nthree\n");

        assert_eq!(
            wdiff_html(
                &engine,
                &DiffRequest::new("a.txt", "b.txt", false),
                Output::Fragment,
                &RenderingContext::new(),
            )
            .unwrap(),
            "<p>one<br />\ntwo</p>\n<p>three</p>"
        );
        assert_eq!(engine.calls.get(), 1);
    }

    #[test]
    fn test_document() {
        let engine = CannedEngine::new("<del>old</del><ins>new</ins>\n");
        let context = RenderingContext::new().with(
            ContextKey::Template,
            "{{org_file}} vs {{new_file}}: {{content}}",
        );

        assert_eq!(
            wdiff_html(
                &engine,
                &DiffRequest::new("docs/a.txt", "docs/b.txt", true),
                Output::Document,
                &context,
            )
            .unwrap(),
            "a.txt vs b.txt: <p><del>old</del><ins>new</ins></p>"
        );
    }

    #[test]
    fn test_bad_template_fails_before_diffing() {
        let engine = CannedEngine::new("text");
        let context = RenderingContext::new().with(ContextKey::Template, "{{timestamp}}");

        let result = wdiff_html(
            &engine,
            &DiffRequest::new("a.txt", "b.txt", false),
            Output::Document,
            &context,
        );

        assert!(matches!(
            result,
            Err(Error::Context(ContextError::MissingValue(ContextKey::Timestamp)))
        ));
        assert_eq!(engine.calls.get(), 0);
    }

    #[test]
    fn test_template_is_ignored_for_fragments() {
        let engine = CannedEngine::new("text");
        let context = RenderingContext::new().with(ContextKey::Template, "{{timestamp}}");

        assert_eq!(
            wdiff_html(
                &engine,
                &DiffRequest::new("a.txt", "b.txt", false),
                Output::Fragment,
                &context,
            )
            .unwrap(),
            "<p>text</p>"
        );
    }
}
