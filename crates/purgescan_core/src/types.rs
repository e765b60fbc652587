use serde::Serialize;
use std::{collections::HashSet, path::PathBuf};

/// Deduplicated tokens in order of first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl TokenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the token was not present yet.
    pub fn insert(&mut self, token: String) -> bool {
        if self.seen.contains(&token) {
            return false;
        }
        self.seen.insert(token.clone());
        self.order.push(token);
        true
    }

    pub fn extend<I: IntoIterator<Item = String>>(&mut self, tokens: I) {
        for t in tokens {
            self.insert(t);
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.seen.contains(token)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.order
    }
}

impl Serialize for TokenSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.order.serialize(serializer)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReadFailure {
    pub path: PathBuf,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionReport {
    pub tokens: TokenSet,
    /// Files whose content was read and passed to an extractor
    pub files_scanned: usize,
    pub failures: Vec<FileReadFailure>,
}
