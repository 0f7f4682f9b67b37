use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context as _, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use wdiff_html::{WDIFF_PROGRAM, Wdiff};

/// Defaults for the command line, read from a YAML file. Command line flags
/// take precedence.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub wdiff: WdiffConfig,

    #[serde(default)]
    pub template: Option<PathBuf>,

    #[serde(default)]
    pub css: Option<PathBuf>,

    #[serde(default)]
    pub js: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct WdiffConfig {
    #[serde(default = "default_program")]
    pub program: String,

    /// Directories to look for `program` in, instead of `PATH`
    #[serde(default)]
    pub search_path: Option<String>,
}

fn default_program() -> String {
    debug!("Using default wdiff program: {WDIFF_PROGRAM}");
    WDIFF_PROGRAM.to_owned()
}

impl Default for WdiffConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            search_path: None,
        }
    }
}

impl WdiffConfig {
    pub fn engine(&self) -> Wdiff {
        let engine = Wdiff::new().with_program(&self.program);
        match &self.search_path {
            Some(search_path) => engine.with_search_path(search_path),
            None => engine,
        }
    }
}

impl Config {
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                info!("Loading configuration from '{}'", path.display());
                Self::load_from_file(path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Relative file paths in the configuration are relative to the
    /// configuration file itself.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).with_context(|| {
            format!("Cannot load configuration from disk from {}", path.display())
        })?;

        let config: Self =
            serde_yaml::from_str(&contents).context("Failed to parse configuration")?;

        Ok(config.relative_to(path.parent().unwrap_or(Path::new(""))))
    }

    fn relative_to(self, base: &Path) -> Self {
        let resolve = |file: Option<PathBuf>| file.map(|file| base.join(file));

        Self {
            wdiff: self.wdiff,
            template: resolve(self.template),
            css: resolve(self.css),
            js: resolve(self.js),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.wdiff.program, "wdiff");
    }

    #[test]
    fn test_load_from_file() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("wdiffhtml.yml");
        fs::write(
            &path,
            "wdiff:\n  program: wdiff-2\n  search_path: /opt/bin\ncss: style.css\njs: /abs/app.js\n",
        )
        .unwrap();

        let config = Config::load_from_file(&path).unwrap();

        assert_eq!(
            config,
            Config {
                wdiff: WdiffConfig {
                    program: "wdiff-2".to_owned(),
                    search_path: Some("/opt/bin".to_owned()),
                },
                template: None,
                css: Some(directory.path().join("style.css")),
                js: Some(PathBuf::from("/abs/app.js")),
            }
        );
        assert_eq!(config.wdiff.engine().program(), "wdiff-2");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let directory = tempfile::tempdir().unwrap();

        assert!(Config::load_or_default(Some(&directory.path().join("missing.yml"))).is_err());
        assert_eq!(Config::load_or_default(None).unwrap(), Config::default());
    }
}
