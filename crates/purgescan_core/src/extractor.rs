use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;
use std::{fmt, sync::Arc};

use crate::constants::DEFAULT_TOKEN_PATTERN;

static DEFAULT_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(DEFAULT_TOKEN_PATTERN).expect("Invalid DEFAULT_TOKEN_RE regex"));

/// Maps raw file text to the candidate tokens it uses.
///
/// Implementations must be pure: the same input always yields the same
/// tokens, in the same order. No match is an empty list, never an error.
pub trait Extractor: Send + Sync {
    fn extract(&self, content: &str) -> Vec<String>;
}

/// The built-in extractor, matching runs of `[A-Za-z0-9_:/-]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultExtractor;

impl Extractor for DefaultExtractor {
    fn extract(&self, content: &str) -> Vec<String> {
        find_all(&DEFAULT_TOKEN_RE, content)
    }
}

type ExtractFn = dyn Fn(&str) -> Vec<String> + Send + Sync;

/// A user supplied extraction rule.
///
/// Empty strings are never tokens: a pattern that can match the empty string
/// contributes only its non-empty matches.
#[derive(Clone)]
pub enum CustomExtractor {
    /// Every non-empty match of the regex, in order
    Pattern(Regex),
    Function(Arc<ExtractFn>),
}

impl CustomExtractor {
    pub fn from_pattern(pattern: &str) -> Result<Self, regex::Error> {
        Ok(CustomExtractor::Pattern(Regex::new(pattern)?))
    }

    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&str) -> Vec<String> + Send + Sync + 'static,
    {
        CustomExtractor::Function(Arc::new(f))
    }
}

impl fmt::Debug for CustomExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomExtractor::Pattern(re) => f.debug_tuple("Pattern").field(&re.as_str()).finish(),
            CustomExtractor::Function(_) => f.write_str("Function(..)"),
        }
    }
}

impl Extractor for CustomExtractor {
    fn extract(&self, content: &str) -> Vec<String> {
        match self {
            CustomExtractor::Pattern(re) => find_all(re, content),
            CustomExtractor::Function(f) => (**f)(content),
        }
    }
}

#[derive(Debug, Clone)]
pub enum ExtractorKind {
    Default(DefaultExtractor),
    Custom(CustomExtractor),
}

impl Default for ExtractorKind {
    fn default() -> Self {
        ExtractorKind::Default(DefaultExtractor)
    }
}

impl From<CustomExtractor> for ExtractorKind {
    fn from(custom: CustomExtractor) -> Self {
        ExtractorKind::Custom(custom)
    }
}

impl Extractor for ExtractorKind {
    fn extract(&self, content: &str) -> Vec<String> {
        match self {
            ExtractorKind::Default(d) => d.extract(content),
            ExtractorKind::Custom(c) => c.extract(content),
        }
    }
}

fn find_all(re: &Regex, content: &str) -> Vec<String> {
    let tokens: Vec<String> = re
        .find_iter(content)
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    trace!("Pattern '{}' produced {} tokens", re.as_str(), tokens.len());
    tokens
}
