use std::{collections::BTreeMap, fmt::Display, str::FromStr};

use crate::errors::ContextError;

/// The names a template may refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContextKey {
    OrgFile,
    NewFile,
    Content,
    Css,
    Js,
    Version,
    Timestamp,
    Template,
}

impl ContextKey {
    pub const ALL: [ContextKey; 8] = [
        ContextKey::OrgFile,
        ContextKey::NewFile,
        ContextKey::Content,
        ContextKey::Css,
        ContextKey::Js,
        ContextKey::Version,
        ContextKey::Timestamp,
        ContextKey::Template,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ContextKey::OrgFile => "org_file",
            ContextKey::NewFile => "new_file",
            ContextKey::Content => "content",
            ContextKey::Css => "css",
            ContextKey::Js => "js",
            ContextKey::Version => "version",
            ContextKey::Timestamp => "timestamp",
            ContextKey::Template => "template",
        }
    }

    /// Whether the key can appear as a placeholder. The template text is
    /// never substituted into itself.
    #[must_use]
    pub const fn is_substitutable(self) -> bool { !matches!(self, ContextKey::Template) }
}

impl FromStr for ContextKey {
    type Err = ContextError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        ContextKey::ALL
            .into_iter()
            .find(|key| key.name() == name)
            .ok_or_else(|| ContextError::UnknownKey(name.to_owned()))
    }
}

impl Display for ContextKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.name()) }
}

/// Values substituted into a template. Keys that were never set are absent
/// rather than empty so that templates can fall back to their own defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderingContext {
    values: BTreeMap<ContextKey, String>,
}

impl RenderingContext {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Set a value by its key name, rejecting names outside the recognised
    /// set.
    pub fn insert(&mut self, name: &str, value: impl Into<String>) -> Result<(), ContextError> {
        let key = name.parse()?;
        self.set(key, value);
        Ok(())
    }

    pub fn set(&mut self, key: ContextKey, value: impl Into<String>) {
        self.values.insert(key, value.into());
    }

    #[must_use]
    pub fn with(mut self, key: ContextKey, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    #[must_use]
    pub fn get(&self, key: ContextKey) -> Option<&str> { self.values.get(&key).map(String::as_str) }

    #[must_use]
    pub fn contains(&self, key: ContextKey) -> bool { self.values.contains_key(&key) }

    pub fn keys(&self) -> impl Iterator<Item = ContextKey> + '_ { self.values.keys().copied() }

    /// Build a context from `(name, value)` pairs, failing on the first
    /// unrecognised name.
    pub fn from_pairs<'a, I, V>(pairs: I) -> Result<Self, ContextError>
    where
        I: IntoIterator<Item = (&'a str, V)>,
        V: Into<String>,
    {
        let mut context = Self::new();
        for (name, value) in pairs {
            context.insert(name, value)?;
        }
        Ok(context)
    }
}
