use log::{debug, trace, warn};
use serde::Deserialize;
use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use crate::{
    constants::{DEFAULT_CONFIG_FILE, DEFAULT_EXTRACTOR_NAME},
    error::{ScanError, ScanResult},
    extractor::{CustomExtractor, ExtractorKind},
};

const INLINE_SOURCE: &str = "<inline>";

/// Extractor override for files with the given extensions.
#[derive(Debug, Clone)]
pub struct ExtensionExtractor {
    /// Extensions without the leading dot, e.g. `elm`
    pub extensions: Vec<String>,
    pub extractor: ExtractorKind,
}

/// A validated purge configuration. Read-only once constructed.
#[derive(Debug, Clone)]
pub struct Config {
    content: Vec<String>,
    default_extractor: ExtractorKind,
    extractors: Vec<ExtensionExtractor>,
    skipped_content_globs: Vec<String>,
}

impl Config {
    /// Build a config from content globs, using the built-in extractor.
    pub fn new(content: Vec<String>) -> ScanResult<Self> {
        validate_content(Path::new(INLINE_SOURCE), &content)?;
        Ok(Config {
            content,
            default_extractor: ExtractorKind::default(),
            extractors: Vec::new(),
            skipped_content_globs: Vec::new(),
        })
    }

    pub fn with_default_extractor(mut self, extractor: impl Into<ExtractorKind>) -> Self {
        self.default_extractor = extractor.into();
        self
    }

    pub fn with_extension_extractor(
        mut self,
        extensions: &[&str],
        extractor: impl Into<ExtractorKind>,
    ) -> Self {
        self.extractors.push(ExtensionExtractor {
            extensions: extensions.iter().map(|e| normalize_extension(e)).collect(),
            extractor: extractor.into(),
        });
        self
    }

    pub fn with_skipped_content_globs(mut self, globs: Vec<String>) -> Self {
        self.skipped_content_globs = globs;
        self
    }

    pub fn content(&self) -> &[String] {
        &self.content
    }

    pub fn default_extractor(&self) -> &ExtractorKind {
        &self.default_extractor
    }

    pub fn extractors(&self) -> &[ExtensionExtractor] {
        &self.extractors
    }

    pub fn skipped_content_globs(&self) -> &[String] {
        &self.skipped_content_globs
    }

    /// The extractor to apply to `path`: the first extension override that
    /// lists the file's extension, else the default extractor.
    pub fn extractor_for(&self, path: &Path) -> &ExtractorKind {
        if let Some(ext) = path.extension().and_then(|e| e.to_str())
            && let Some(over) =
                self.extractors.iter().find(|x| x.extensions.iter().any(|e| e == ext))
        {
            trace!("Using extension extractor for '{}': {}", ext, path.display());
            return &over.extractor;
        }
        &self.default_extractor
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    content: Vec<String>,
    #[serde(default)]
    default_extractor: Option<RawExtractor>,
    #[serde(default)]
    extractors: Vec<RawExtensionExtractor>,
    #[serde(default)]
    skipped_content_globs: Vec<String>,
    #[serde(flatten)]
    unknown: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawExtractor {
    Named(String),
    Pattern { pattern: String },
}

#[derive(Debug, Deserialize)]
struct RawExtensionExtractor {
    extensions: Vec<String>,
    extractor: RawExtractor,
}

/// Path of the config to load: the explicit one if given, else the default
/// file name inside `root`.
pub fn find_config(explicit: Option<&Path>, root: &Path) -> PathBuf {
    match explicit {
        Some(p) => {
            debug!("Using explicit config path: {:?}", p);
            p.to_path_buf()
        }
        None => {
            let p = root.join(DEFAULT_CONFIG_FILE);
            debug!("No config path provided, looking for {:?}", p);
            p
        }
    }
}

pub fn load_config(path: &Path) -> ScanResult<Config> {
    debug!("Loading config from {}", path.display());
    let text = fs::read_to_string(path).map_err(|e| {
        let message = match e.kind() {
            io::ErrorKind::NotFound => "no such file".to_string(),
            _ => e.to_string(),
        };
        ScanError::ConfigNotFound { path: path.to_path_buf(), message }
    })?;
    parse_config(&text, path)
}

/// Parse and validate config JSON. `path` is only used for error messages.
pub fn parse_config(text: &str, path: &Path) -> ScanResult<Config> {
    let raw: RawConfig =
        serde_json::from_str(text).map_err(|e| ScanError::parse(path, e.to_string()))?;

    for key in raw.unknown.keys() {
        warn!("Ignoring unrecognized config option '{}' in {}", key, path.display());
    }

    validate_content(path, &raw.content)?;
    validate_globs(path, "skippedContentGlobs", &raw.skipped_content_globs)?;

    let default_extractor = match raw.default_extractor {
        Some(r) => build_extractor(path, r)?,
        None => {
            debug!("No defaultExtractor configured, using built-in extractor");
            ExtractorKind::default()
        }
    };

    let mut extractors = Vec::with_capacity(raw.extractors.len());
    for (idx, entry) in raw.extractors.into_iter().enumerate() {
        if entry.extensions.is_empty() {
            return Err(ScanError::parse(path, format!("extractors[{}] has no extensions", idx)));
        }
        extractors.push(ExtensionExtractor {
            extensions: entry.extensions.iter().map(|e| normalize_extension(e)).collect(),
            extractor: build_extractor(path, entry.extractor)?,
        });
    }

    debug!(
        "Loaded config: {} content globs, {} extension extractors, {} skipped globs",
        raw.content.len(),
        extractors.len(),
        raw.skipped_content_globs.len()
    );

    Ok(Config {
        content: raw.content,
        default_extractor,
        extractors,
        skipped_content_globs: raw.skipped_content_globs,
    })
}

fn validate_content(path: &Path, content: &[String]) -> ScanResult<()> {
    if content.is_empty() {
        return Err(ScanError::parse(path, "`content` must list at least one glob"));
    }
    validate_globs(path, "content", content)
}

fn validate_globs(path: &Path, field: &str, globs: &[String]) -> ScanResult<()> {
    if let Some(idx) = globs.iter().position(|g| g.trim().is_empty()) {
        return Err(ScanError::parse(path, format!("`{}[{}]` is an empty pattern", field, idx)));
    }
    Ok(())
}

fn build_extractor(path: &Path, raw: RawExtractor) -> ScanResult<ExtractorKind> {
    match raw {
        RawExtractor::Named(name) if name == DEFAULT_EXTRACTOR_NAME => Ok(ExtractorKind::default()),
        RawExtractor::Named(name) => {
            Err(ScanError::parse(path, format!("unknown extractor '{}'", name)))
        }
        RawExtractor::Pattern { pattern } => {
            if pattern.is_empty() {
                return Err(ScanError::parse(path, "extractor pattern is empty"));
            }
            trace!("Compiling extractor pattern: {}", pattern);
            let custom = CustomExtractor::from_pattern(&pattern).map_err(|e| {
                ScanError::parse(path, format!("invalid extractor pattern '{}': {}", pattern, e))
            })?;
            Ok(custom.into())
        }
    }
}

fn normalize_extension(ext: &str) -> String {
    ext.trim_start_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::Extractor;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, path: &str, content: &str) -> PathBuf {
        let file_path = dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    fn parse(text: &str) -> ScanResult<Config> {
        parse_config(text, Path::new(DEFAULT_CONFIG_FILE))
    }

    #[test]
    fn test_load_config_minimal() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_test_file(
            temp_dir.path(),
            DEFAULT_CONFIG_FILE,
            r#"{ "content": ["./src/index.html", "./src/**/*.elm"] }"#,
        );

        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.content(), &["./src/index.html", "./src/**/*.elm"]);
        assert!(matches!(cfg.default_extractor(), ExtractorKind::Default(_)));
        assert!(cfg.extractors().is_empty());
        assert!(cfg.skipped_content_globs().is_empty());
    }

    #[test]
    fn test_find_config_default_location() {
        let root = Path::new("/project");
        assert_eq!(find_config(None, root), PathBuf::from("/project/purgecss.config.json"));
        assert_eq!(
            find_config(Some(Path::new("custom.json")), root),
            PathBuf::from("custom.json")
        );
    }

    #[test]
    fn test_load_config_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_CONFIG_FILE);
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ScanError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_empty_content_is_parse_error() {
        let err = parse(r#"{ "content": [] }"#).unwrap_err();
        assert!(matches!(err, ScanError::ConfigParse { .. }));
    }

    #[test]
    fn test_missing_content_is_parse_error() {
        let err = parse(r#"{ "defaultExtractor": "default" }"#).unwrap_err();
        assert!(matches!(err, ScanError::ConfigParse { .. }));
    }

    #[test]
    fn test_non_string_content_is_parse_error() {
        let err = parse(r#"{ "content": ["a.html", 3] }"#).unwrap_err();
        assert!(matches!(err, ScanError::ConfigParse { .. }));
    }

    #[test]
    fn test_blank_glob_is_parse_error() {
        let err = parse(r#"{ "content": ["a.html", "  "] }"#).unwrap_err();
        match err {
            ScanError::ConfigParse { message, .. } => assert!(message.contains("content[1]")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = parse(r#"{ "content": ["a.html" "#).unwrap_err();
        assert!(matches!(err, ScanError::ConfigParse { .. }));
    }

    #[test]
    fn test_named_default_extractor() {
        let cfg = parse(r#"{ "content": ["*.html"], "defaultExtractor": "default" }"#).unwrap();
        assert!(matches!(cfg.default_extractor(), ExtractorKind::Default(_)));
    }

    #[test]
    fn test_unknown_named_extractor() {
        let err = parse(r#"{ "content": ["*.html"], "defaultExtractor": "tailwind" }"#).unwrap_err();
        match err {
            ScanError::ConfigParse { message, .. } => assert!(message.contains("tailwind")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_pattern_extractor() {
        let cfg = parse(
            r#"{ "content": ["*.html"], "defaultExtractor": { "pattern": "[a-z]+-[a-z]+" } }"#,
        )
        .unwrap();
        assert!(matches!(cfg.default_extractor(), ExtractorKind::Custom(_)));
        assert_eq!(cfg.default_extractor().extract("btn-primary x"), vec!["btn-primary"]);
    }

    #[test]
    fn test_invalid_pattern_extractor() {
        let err =
            parse(r#"{ "content": ["*.html"], "defaultExtractor": { "pattern": "(" } }"#).unwrap_err();
        assert!(matches!(err, ScanError::ConfigParse { .. }));

        let err =
            parse(r#"{ "content": ["*.html"], "defaultExtractor": { "pattern": "" } }"#).unwrap_err();
        assert!(matches!(err, ScanError::ConfigParse { .. }));
    }

    #[test]
    fn test_extension_extractors() {
        let cfg = parse(
            r#"{
  "content": ["src/**/*"],
  "extractors": [
    { "extensions": [".elm", "elmx"], "extractor": { "pattern": "[a-z]+" } },
    { "extensions": ["elm"], "extractor": "default" }
  ]
}"#,
        )
        .unwrap();

        assert_eq!(cfg.extractors().len(), 2);
        assert_eq!(cfg.extractors()[0].extensions, vec!["elm", "elmx"]);

        // First matching entry wins
        let ex = cfg.extractor_for(Path::new("src/Main.elm"));
        assert!(matches!(ex, ExtractorKind::Custom(_)));
        assert_eq!(ex.extract("nav-bar"), vec!["nav", "bar"]);

        let ex = cfg.extractor_for(Path::new("src/index.html"));
        assert!(matches!(ex, ExtractorKind::Default(_)));

        let ex = cfg.extractor_for(Path::new("src/Makefile"));
        assert!(matches!(ex, ExtractorKind::Default(_)));
    }

    #[test]
    fn test_extension_extractor_without_extensions() {
        let err = parse(
            r#"{ "content": ["*"], "extractors": [{ "extensions": [], "extractor": "default" }] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ScanError::ConfigParse { .. }));
    }

    #[test]
    fn test_skipped_content_globs() {
        let cfg =
            parse(r#"{ "content": ["**/*.html"], "skippedContentGlobs": ["vendor/**"] }"#).unwrap();
        assert_eq!(cfg.skipped_content_globs(), &["vendor/**"]);
    }

    #[test]
    fn test_unknown_options_are_tolerated() {
        let cfg = parse(r#"{ "content": ["*.html"], "css": ["main.css"], "safelist": [] }"#);
        assert!(cfg.is_ok());
    }

    #[test]
    fn test_programmatic_config() {
        assert!(matches!(Config::new(vec![]), Err(ScanError::ConfigParse { .. })));

        let cfg = Config::new(vec!["src/**/*.elm".to_string()])
            .unwrap()
            .with_default_extractor(CustomExtractor::from_fn(|s| vec![s.to_uppercase()]))
            .with_extension_extractor(&[".html"], ExtractorKind::default());

        assert_eq!(cfg.extractor_for(Path::new("a.elm")).extract("x"), vec!["X"]);
        assert_eq!(cfg.extractor_for(Path::new("a.html")).extract("x y"), vec!["x", "y"]);
    }
}
