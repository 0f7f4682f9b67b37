use std::io::IsTerminal;

use clap::ValueEnum;

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum ColorWhen {
    Always,
    Auto,
    Never,
}

impl ColorWhen {
    /// Whether log lines written to `stream` should be colored. `NO_COLOR`
    /// only matters in `auto` mode.
    pub fn enabled(self, stream: &impl IsTerminal) -> bool {
        match self {
            ColorWhen::Always => true,
            ColorWhen::Auto => std::env::var_os("NO_COLOR").is_none() && stream.is_terminal(),
            ColorWhen::Never => false,
        }
    }
}

impl std::fmt::Display for ColorWhen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ColorWhen::Always => "always",
            ColorWhen::Auto => "auto",
            ColorWhen::Never => "never",
        })
    }
}
