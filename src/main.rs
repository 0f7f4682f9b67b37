mod cli;
mod config;

use std::{fs, path::Path, process::ExitCode};

use anyhow::{Context as _, Result};
use chrono::Utc;
use clap::Parser;
use cli::args::{Args, ContextArgs};
use config::Config;
use log::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use wdiff_html::{ContextKey, DiffRequest, Error, Output, RenderingContext, wdiff_html};

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(error) = init_logging(&args) {
        eprintln!("ERROR: {error:#}.");
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(html) => {
            println!("{html}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            debug!("{error:?}");
            eprintln!("ERROR: {error:#}.");
            ExitCode::from(exit_code(&error))
        }
    }
}

fn init_logging(args: &Args) -> Result<()> {
    let level = args.verbose.log_level_filter().to_string().to_lowercase();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!(
                "{}={level},wdiff_html={level}",
                env!("CARGO_CRATE_NAME")
            )
            .into()
        }))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(args.color.enabled(&std::io::stderr())),
        )
        .try_init()
        .context("Failed to initialise tracing")
}

fn run(args: &Args) -> Result<String> {
    let config = Config::load_or_default(args.config.as_deref())?;
    let context = rendering_context(args, &config)?;
    let request = DiffRequest::new(
        &args.org_file,
        &args.new_file,
        args.wrapper.fold_breaks,
    );
    let output = if args.wrapper.wrap_with_html {
        Output::Document
    } else {
        Output::Fragment
    };

    Ok(wdiff_html(&config.wdiff.engine(), &request, output, &context)?)
}

/// Gathers the optional document values from the command line, falling back
/// to the configuration for files.
fn rendering_context(args: &Args, config: &Config) -> Result<RenderingContext> {
    let mut context = RenderingContext::new();

    if let Some(version) = &args.context.doc_version {
        context.set(ContextKey::Version, version);
    }
    if let Some(timestamp) = timestamp(&args.context) {
        context.set(ContextKey::Timestamp, timestamp);
    }

    let files = [
        (ContextKey::Template, &args.files.template, &config.template),
        (ContextKey::Css, &args.files.css, &config.css),
        (ContextKey::Js, &args.files.js, &config.js),
    ];
    for (key, from_args, from_config) in files {
        if let Some(path) = from_args.as_ref().or(from_config.as_ref()) {
            context.set(key, read_context_file(key, path)?);
        }
    }

    Ok(context)
}

fn timestamp(args: &ContextArgs) -> Option<String> {
    let format = if args.timestamp {
        "%Y-%m-%d %H:%M"
    } else if args.datestamp {
        "%Y-%m-%d"
    } else {
        return None;
    };

    Some(Utc::now().format(format).to_string())
}

fn read_context_file(key: ContextKey, path: &Path) -> Result<String> {
    debug!("Reading {key} from '{}'", path.display());
    fs::read_to_string(path).with_context(|| format!("Cannot read {key} from {}", path.display()))
}

/// 1 for anything that isn't a `wdiff` problem, like unreadable files.
fn exit_code(error: &anyhow::Error) -> u8 {
    error.downcast_ref::<Error>().map_or(1, Error::exit_code)
}
