use thiserror::Error;

use crate::context::ContextKey;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong while turning two files into HTML.
#[derive(Error, Debug)]
pub enum Error {
    /// The word-diff executable isn't on the search path.
    #[error("the `{program}` command can't be found")]
    EngineNotFound { program: String },

    /// The word-diff executable ran (or tried to) but didn't succeed.
    #[error("`{program}` failed{}", failure_details(.code, .stderr))]
    EngineExecution {
        program: String,
        /// `None` when the process couldn't be started or was killed by a
        /// signal
        code: Option<i32>,
        /// Whatever the process wrote to stderr, trimmed
        stderr: String,
    },

    #[error(transparent)]
    Context(#[from] ContextError),
}

impl Error {
    /// Process exit status the `wdiffhtml` binary reports for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Context(_) => 1,
            Self::EngineNotFound { .. } => 2,
            Self::EngineExecution { .. } => 3,
        }
    }
}

fn failure_details(code: &Option<i32>, stderr: &str) -> String {
    let mut details = code
        .map(|code| format!(" with exit status {code}"))
        .unwrap_or_default();
    if !stderr.is_empty() {
        details.push_str(": ");
        details.push_str(stderr);
    }
    details
}

/// Mismatch between a rendering context and the template it is rendered into.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    #[error("unknown context key `{0}`")]
    UnknownKey(String),

    #[error("the template needs a value for `{0}` but none was given")]
    MissingValue(ContextKey),

    #[error("malformed template at byte {position}: {reason}")]
    MalformedTemplate { position: usize, reason: String },
}
