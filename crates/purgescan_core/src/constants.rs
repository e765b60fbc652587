//! Shared constants for config lookup, glob handling and token extraction.

/// File name looked up in the working directory when no config path is given
pub const DEFAULT_CONFIG_FILE: &str = "purgecss.config.json";

/// Built-in token pattern: letters, digits, hyphen, underscore, colon and slash.
///
/// The hyphen sits last in the class so it is always a literal.
pub const DEFAULT_TOKEN_PATTERN: &str = r"[A-Za-z0-9_:/-]+";

/// Name accepted for `defaultExtractor` to select the built-in extractor explicitly
pub const DEFAULT_EXTRACTOR_NAME: &str = "default";

/// Characters that turn a path segment into a glob segment
pub const GLOB_META_CHARS: &[char] = &['*', '?', '[', ']', '{', '}'];
