//! Ignore rules for app uploads.
//!
//! Patterns follow the `.cfignore` conventions: a pattern without a
//! leading `/` matches at any depth, a leading `/` anchors it to the app
//! root, `!` re-includes a path, and the last matching pattern wins.

use std::path::Path;

use glob::{MatchOptions, Pattern};
use tracing::debug;

use crate::{AppFilesError, IGNORE_FILE_NAME};

/// Patterns applied before any user-supplied rule.
pub const DEFAULT_IGNORE_FILES: &[&str] = &[
    ".cfignore",
    "/manifest.yml",
    ".gitignore",
    ".git",
    ".hg",
    ".svn",
    "_darcs",
    ".DS_Store",
];

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Where ignore rules come from.
///
/// Passed explicitly to the walker; rules are never held in globals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreConfig {
    /// Built-in exclusions, applied first.
    pub defaults: Vec<String>,
    /// Extra patterns from configuration, applied after the defaults.
    pub extra: Vec<String>,
    /// Ignore file looked up at the app root. Empty disables the lookup.
    pub ignore_file: String,
}

impl Default for IgnoreConfig {
    fn default() -> Self {
        Self {
            defaults: DEFAULT_IGNORE_FILES.iter().map(|p| (*p).to_string()).collect(),
            extra: Vec::new(),
            ignore_file: IGNORE_FILE_NAME.to_string(),
        }
    }
}

impl IgnoreConfig {
    /// Appends extra patterns after the defaults.
    pub fn with_extra<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Builds the effective rules for an app rooted at `root`.
    ///
    /// Order is defaults, then `extra`, then the lines of the ignore file
    /// if one exists at the root.
    pub fn rules_for(&self, root: &Path) -> Result<CfIgnore, AppFilesError> {
        let text = if self.ignore_file.is_empty() {
            String::new()
        } else {
            let path = root.join(&self.ignore_file);
            match std::fs::read_to_string(&path) {
                Ok(text) => {
                    debug!(path = %path.display(), "loaded ignore file");
                    text
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
                Err(e) => return Err(e.into()),
            }
        };

        let rules = CfIgnore::new(
            self.defaults
                .iter()
                .chain(self.extra.iter())
                .map(String::as_str)
                .chain(text.lines()),
        )?;
        debug!(root = %root.display(), patterns = rules.len(), "ignore rules built");
        Ok(rules)
    }
}

#[derive(Debug, Clone)]
struct IgnorePattern {
    exclude: bool,
    anchored: bool,
    glob: Pattern,
}

/// A compiled, ordered set of ignore patterns.
#[derive(Debug, Clone, Default)]
pub struct CfIgnore {
    patterns: Vec<IgnorePattern>,
}

impl CfIgnore {
    /// Compiles ignore lines in order.
    ///
    /// Blank lines and `#` comments are skipped.
    pub fn new<'a, I>(lines: I) -> Result<Self, AppFilesError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut patterns = Vec::new();

        for line in lines {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (exclude, raw) = match line.strip_prefix('!') {
                Some(rest) => (false, rest),
                None => (true, line),
            };

            let cleaned = clean_pattern(raw);
            if cleaned == "." {
                continue;
            }
            let anchored = cleaned.starts_with('/');

            for glob in globs_for_pattern(&cleaned) {
                let compiled = Pattern::new(&glob).map_err(|source| AppFilesError::Pattern {
                    pattern: raw.to_string(),
                    source,
                })?;
                patterns.push(IgnorePattern {
                    exclude,
                    anchored,
                    glob: compiled,
                });
            }
        }

        Ok(Self { patterns })
    }

    /// Reports whether an app-relative path is excluded.
    pub fn file_should_be_ignored(&self, path: &str) -> bool {
        let relative = path.trim_start_matches('/');
        let rooted = format!("/{relative}");

        let mut ignored = false;
        for pattern in &self.patterns {
            let candidate = if pattern.anchored {
                rooted.as_str()
            } else {
                relative
            };
            if pattern.glob.matches_with(candidate, MATCH_OPTIONS) {
                ignored = pattern.exclude;
            }
        }
        ignored
    }

    pub(crate) fn len(&self) -> usize {
        self.patterns.len()
    }
}

/// Lexically cleans a pattern: collapses `//`, drops `.` segments,
/// resolves `..` where possible and strips trailing slashes.
fn clean_pattern(pattern: &str) -> String {
    let anchored = pattern.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for part in pattern.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                if matches!(parts.last(), Some(last) if *last != "..") {
                    parts.pop();
                } else if !anchored {
                    parts.push(part);
                }
            }
            _ => parts.push(part),
        }
    }

    let joined = parts.join("/");
    match (anchored, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

fn join(base: &str, rest: &str) -> String {
    if base == "/" {
        format!("/{rest}")
    } else {
        format!("{base}/{rest}")
    }
}

/// Expands one cleaned pattern into the globs that implement it.
fn globs_for_pattern(pattern: &str) -> Vec<String> {
    let mut globs = vec![
        pattern.to_string(),
        join(pattern, "*"),
        join(pattern, "**/*"),
    ];
    if !pattern.starts_with('/') {
        globs.push(format!("**/{pattern}"));
        globs.push(format!("**/{pattern}/*"));
        globs.push(format!("**/{pattern}/**/*"));
    }
    globs
}
