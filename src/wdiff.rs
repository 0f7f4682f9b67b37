use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use log::{debug, warn};

use crate::{
    consts::{WDIFF_LINEBREAK_OPTIONS, WDIFF_OUTPUT_OPTIONS, WDIFF_PROGRAM, WDIFF_SUCCESS_CODES},
    errors::{Error, Result},
};

/// The two files to compare and how line breaks should be treated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffRequest {
    original: PathBuf,
    changed: PathBuf,
    fold_breaks: bool,
}

impl DiffRequest {
    #[must_use]
    pub fn new(original: impl Into<PathBuf>, changed: impl Into<PathBuf>, fold_breaks: bool) -> Self {
        Self {
            original: original.into(),
            changed: changed.into(),
            fold_breaks,
        }
    }

    #[must_use]
    pub fn original(&self) -> &Path { &self.original }

    #[must_use]
    pub fn changed(&self) -> &Path { &self.changed }

    /// Whether `<ins>` and `<del>` may span line breaks, which are then
    /// treated as soft wrapping.
    #[must_use]
    pub fn fold_breaks(&self) -> bool { self.fold_breaks }
}

/// Something that produces `<ins>`/`<del>` marked word diffs.
pub trait DiffEngine {
    fn diff(&self, request: &DiffRequest) -> Result<String>;
}

/// Runs the `wdiff` executable.
#[derive(Debug, Clone)]
pub struct Wdiff {
    program: String,
    search_path: Option<OsString>,
}

impl Default for Wdiff {
    fn default() -> Self {
        Self {
            program: WDIFF_PROGRAM.to_owned(),
            search_path: None,
        }
    }
}

impl Wdiff {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Look the executable up in these directories (in `PATH` syntax) instead
    /// of the process' `PATH`.
    #[must_use]
    pub fn with_search_path(mut self, search_path: impl Into<OsString>) -> Self {
        self.search_path = Some(search_path.into());
        self
    }

    #[must_use]
    pub fn program(&self) -> &str { &self.program }

    /// Locates the executable, failing with [`Error::EngineNotFound`] if it
    /// isn't installed. Nothing is cached, every call searches again.
    pub fn ensure_available(&self) -> Result<PathBuf> {
        let found = match &self.search_path {
            Some(search_path) => which::which_in(&self.program, Some(search_path), "."),
            None => which::which(&self.program),
        };

        found.map_err(|error| {
            debug!("Looking up `{}` failed: {error}", self.program);
            Error::EngineNotFound {
                program: self.program.clone(),
            }
        })
    }
}

impl DiffEngine for Wdiff {
    fn diff(&self, request: &DiffRequest) -> Result<String> {
        let executable = self.ensure_available()?;
        let arguments = wdiff_arguments(request);
        debug!("Running {} {arguments:?}", executable.display());

        let output = Command::new(&executable)
            .args(&arguments)
            .stdin(Stdio::null())
            .output()
            .map_err(|error| Error::EngineExecution {
                program: self.program.clone(),
                code: None,
                stderr: error.to_string(),
            })?;

        let code = output.status.code();
        if !code.is_some_and(|code| WDIFF_SUCCESS_CODES.contains(&code)) {
            return Err(Error::EngineExecution {
                program: self.program.clone(),
                code,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }

        Ok(String::from_utf8(output.stdout).unwrap_or_else(|error| {
            warn!(
                "`{}` produced invalid UTF-8, replacing the offending bytes",
                self.program
            );
            String::from_utf8_lossy(error.as_bytes()).into_owned()
        }))
    }
}

/// Checks that `wdiff` can be found on `PATH`.
pub fn ensure_engine_available() -> Result<PathBuf> { Wdiff::default().ensure_available() }

/// Runs `wdiff` from `PATH` on the request's files and returns its output.
pub fn run_diff(request: &DiffRequest) -> Result<String> { Wdiff::default().diff(request) }

/// The command line after the program name: HTML markers, no markers across
/// line breaks unless they are folded, then the two files.
fn wdiff_arguments(request: &DiffRequest) -> Vec<OsString> {
    let mut arguments: Vec<OsString> = WDIFF_OUTPUT_OPTIONS.iter().map(OsString::from).collect();
    if !request.fold_breaks {
        arguments.extend(WDIFF_LINEBREAK_OPTIONS.iter().map(OsString::from));
    }
    arguments.push(request.original.clone().into_os_string());
    arguments.push(request.changed.clone().into_os_string());
    arguments
}
