use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser};
use clap_verbosity_flag::{Verbosity, WarnLevel};

use crate::cli::color_when::ColorWhen;

/// Create HTML from the word diff of two text files
///
/// The diff itself is computed by GNU `wdiff`, which has to be installed.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Original file
    #[arg(value_name = "ORG_FILE")]
    pub org_file: PathBuf,

    /// Changed file
    #[arg(value_name = "NEW_FILE")]
    pub new_file: PathBuf,

    #[command(flatten)]
    pub wrapper: WrapperArgs,

    #[command(flatten)]
    pub context: ContextArgs,

    #[command(flatten)]
    pub files: FileArgs,

    /// Read defaults from this YAML file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub verbose: Verbosity<WarnLevel>,

    #[arg(
        long,
        value_name = "WHEN",
        default_value_t = ColorWhen::Auto,
        default_missing_value = "always",
        num_args = 0..=1,
        value_enum
    )]
    pub color: ColorWhen,
}

#[derive(ClapArgs, Debug)]
#[command(next_help_heading = "Wrapper")]
pub struct WrapperArgs {
    /// Wrap the diff into a full HTML document
    #[arg(short, long)]
    pub wrap_with_html: bool,

    /// Fold line breaks instead of keeping them with `<br />`
    #[arg(short, long)]
    pub fold_breaks: bool,
}

#[derive(ClapArgs, Debug)]
#[command(next_help_heading = "Context")]
pub struct ContextArgs {
    /// Add a revision version to the output
    #[arg(short = 'r', long, value_name = "STRING")]
    pub doc_version: Option<String>,

    /// Add the current date to the output (UTC)
    #[arg(short, long, conflicts_with = "timestamp")]
    pub datestamp: bool,

    /// Add the current date and time to the output (UTC)
    #[arg(short = 'D', long)]
    pub timestamp: bool,
}

#[derive(ClapArgs, Debug)]
#[command(next_help_heading = "Files")]
pub struct FileArgs {
    /// Load the document template from this file
    #[arg(short, long, value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// Load CSS from this file
    #[arg(short, long, value_name = "FILE")]
    pub css: Option<PathBuf>,

    /// Load JavaScript from this file
    #[arg(short, long, value_name = "FILE")]
    pub js: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_command_is_well_formed() { Args::command().debug_assert(); }

    #[test]
    fn test_parse_all_flags() {
        let args = Args::try_parse_from([
            "wdiffhtml",
            "-wf",
            "-r",
            "1.2",
            "-D",
            "--template",
            "page.html",
            "-c",
            "style.css",
            "old/a.txt",
            "new/a.txt",
        ])
        .unwrap();

        assert_eq!(args.org_file, PathBuf::from("old/a.txt"));
        assert_eq!(args.new_file, PathBuf::from("new/a.txt"));
        assert!(args.wrapper.wrap_with_html);
        assert!(args.wrapper.fold_breaks);
        assert_eq!(args.context.doc_version.as_deref(), Some("1.2"));
        assert!(args.context.timestamp);
        assert!(!args.context.datestamp);
        assert_eq!(args.files.template, Some(PathBuf::from("page.html")));
        assert_eq!(args.files.css, Some(PathBuf::from("style.css")));
        assert_eq!(args.files.js, None);
        assert_eq!(args.color, ColorWhen::Auto);
    }

    #[test]
    fn test_datestamp_conflicts_with_timestamp() {
        assert!(Args::try_parse_from(["wdiffhtml", "-d", "-D", "a", "b"]).is_err());
    }

    #[test]
    fn test_both_files_are_required() {
        assert!(Args::try_parse_from(["wdiffhtml", "a"]).is_err());
    }
}
