use globset::{Glob, GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use log::{debug, trace, warn};
use path_clean::clean;
use std::{
    collections::HashSet,
    path::{Component, Path, PathBuf},
};

use crate::{
    constants::GLOB_META_CHARS,
    error::{ScanError, ScanResult},
};

/// A content pattern split into the directory to walk and the matcher to
/// apply to each file found there.
#[derive(Debug)]
struct ContentPattern {
    raw: String,
    base: PathBuf,
    matcher: Option<GlobMatcher>,
    absolute: bool,
}

/// Expand `patterns` against `root` into an ordered, deduplicated file list.
///
/// Files are grouped by the first pattern that matched them; within one
/// pattern they are sorted by path. Patterns matching nothing contribute
/// nothing. Files matched by any of `skip` are dropped.
pub fn resolve_content(
    root: &Path,
    patterns: &[String],
    skip: &[String],
) -> ScanResult<Vec<PathBuf>> {
    debug!("Resolving {} content patterns from root: {}", patterns.len(), root.display());

    let root = clean(root);
    let compiled = patterns.iter().map(|p| compile(p)).collect::<ScanResult<Vec<_>>>()?;
    let skip_set = build_skip_set(skip)?;

    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut files: Vec<PathBuf> = Vec::new();

    for pattern in &compiled {
        let matched = match_pattern(&root, pattern);
        if matched.is_empty() {
            debug!("Pattern '{}' matched no files", pattern.raw);
            continue;
        }
        trace!("Pattern '{}' matched {} files", pattern.raw, matched.len());

        for path in matched {
            if let Some(set) = &skip_set
                && is_skipped(set, &root, &path)
            {
                trace!("Skipping content file: {}", path.display());
                continue;
            }
            if seen.insert(path.clone()) {
                files.push(path);
            }
        }
    }

    debug!("Resolved {} content files", files.len());
    Ok(files)
}

fn compile(raw: &str) -> ScanResult<ContentPattern> {
    let normalized = normalize_pattern(raw);
    let absolute = Path::new(&normalized).is_absolute();
    let (base, has_glob) = split_base(&normalized);

    let matcher = if has_glob {
        Some(build_glob(raw, &normalized)?.compile_matcher())
    } else {
        None
    };

    trace!("Compiled pattern '{}' -> base {:?}, glob: {}", raw, base, has_glob);
    Ok(ContentPattern { raw: raw.to_string(), base, matcher, absolute })
}

fn build_skip_set(skip: &[String]) -> ScanResult<Option<GlobSet>> {
    if skip.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for raw in skip {
        builder.add(build_glob(raw, &normalize_pattern(raw))?);
    }
    builder.build().map(Some).map_err(|e| glob_error(&skip.join(", "), e))
}

/// Content and skip globs share one dialect: `*` stays within a segment and
/// `\` escapes the next character.
fn build_glob(raw: &str, normalized: &str) -> ScanResult<Glob> {
    GlobBuilder::new(normalized)
        .literal_separator(true)
        .backslash_escape(true)
        .build()
        .map_err(|e| glob_error(raw, e))
}

/// Skip globs are written relative to the root; files outside it are
/// tested by absolute path.
fn is_skipped(set: &GlobSet, root: &Path, path: &Path) -> bool {
    if let Ok(rel) = path.strip_prefix(root)
        && set.is_match(to_key(rel))
    {
        return true;
    }
    set.is_match(to_key(path))
}

fn glob_error(pattern: &str, e: globset::Error) -> ScanError {
    ScanError::GlobSyntax { pattern: pattern.to_string(), message: e.kind().to_string() }
}

/// Strip leading `./` segments and collapse `..` where possible, keeping `/`
/// as the separator so the result can be fed to globset.
fn normalize_pattern(raw: &str) -> String {
    let cleaned = clean(raw.trim());
    let cleaned = to_key(&cleaned);
    cleaned.trim_start_matches("./").to_string()
}

/// Longest leading run of literal path segments, and whether any glob
/// segment follows it.
fn split_base(pattern: &str) -> (PathBuf, bool) {
    let mut base = PathBuf::new();
    for component in Path::new(pattern).components() {
        match component {
            Component::Normal(seg) if seg.to_string_lossy().contains(GLOB_META_CHARS) => {
                return (base, true);
            }
            other => base.push(other.as_os_str()),
        }
    }
    (base, false)
}

fn match_pattern(root: &Path, pattern: &ContentPattern) -> Vec<PathBuf> {
    // Cleaned so `../proj/src` from inside `proj` names the same files as `src`
    let walk_base = if pattern.absolute {
        clean(&pattern.base)
    } else if pattern.base.as_os_str().is_empty() {
        root.to_path_buf()
    } else {
        clean(root.join(&pattern.base))
    };

    let Some(matcher) = &pattern.matcher else {
        // Literal path
        return if walk_base.is_file() { vec![walk_base] } else { Vec::new() };
    };

    if !walk_base.is_dir() {
        trace!("Base directory does not exist: {}", walk_base.display());
        return Vec::new();
    }

    let walker = WalkBuilder::new(&walk_base).standard_filters(false).follow_links(true).build();

    let mut matched = Vec::new();
    for res in walker {
        let dent = match res {
            Ok(d) => d,
            Err(e) => {
                warn!("Error walking {}: {}", walk_base.display(), e);
                continue;
            }
        };
        if !dent.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let p = dent.path();
        let Ok(under_base) = p.strip_prefix(&walk_base) else {
            continue;
        };
        // Matched in the pattern's own terms, so a `..` prefix still lines up
        let key = to_key(&pattern.base.join(under_base));
        if matcher.is_match(&key) {
            trace!("Matched '{}': {}", pattern.raw, p.display());
            matched.push(p.to_path_buf());
        }
    }
    matched.sort();
    matched
}

/// Glob matching always uses `/` separators. Off Windows a backslash is a
/// glob escape, not a separator, and is left alone.
fn to_key(path: &Path) -> String {
    let key = path.to_string_lossy();
    if cfg!(windows) { key.replace('\\', "/") } else { key.into_owned() }
}
