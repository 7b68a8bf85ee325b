//! `.config` input model.
//!
//! A `.config` file is read line by line. Lines whose trimmed text starts
//! with `CONFIG_` are key/value declarations; everything else (comments,
//! `# CONFIG_X is not set`, blank lines) is opaque and carried through by
//! the generators as they see fit.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{KconfError, Result};
use crate::verbose::{vprintln, wprintln};

/// Prefix that marks a declaration line.
pub const DECLARATION_PREFIX: &str = "CONFIG_";

/// A `CONFIG_<name>=<value>` line split on its first `=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Declaration<'a> {
    /// Everything before the first `=`, including the `CONFIG_` prefix.
    pub key: &'a str,
    /// Everything after the first `=`, quotes untouched.
    pub raw_value: &'a str,
}

impl<'a> Declaration<'a> {
    /// The value with one leading and one trailing `"` removed.
    ///
    /// Each side is stripped independently, so `"abc` yields `abc` and
    /// `""x""` yields `"x"`.
    pub fn unquoted_value(&self) -> &'a str {
        let value = self.raw_value.strip_prefix('"').unwrap_or(self.raw_value);
        value.strip_suffix('"').unwrap_or(value)
    }

    /// The key without its `CONFIG_` prefix.
    pub fn bare_key(&self) -> &'a str {
        self.key
            .strip_prefix(DECLARATION_PREFIX)
            .unwrap_or(self.key)
    }
}

/// One classified input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLine<'a> {
    Declaration(Declaration<'a>),
    /// The line exactly as read, surrounding whitespace included.
    Opaque(&'a str),
}

impl<'a> ConfigLine<'a> {
    /// Classify `text`, which is line `line` (1-based) of `path`.
    pub fn parse(text: &'a str, path: &Path, line: usize) -> Result<Self> {
        let trimmed = text.trim();
        if !trimmed.starts_with(DECLARATION_PREFIX) {
            return Ok(Self::Opaque(text));
        }
        let (key, raw_value) = trimmed.split_once('=').ok_or_else(|| {
            KconfError::MalformedDeclaration {
                path: path.to_path_buf(),
                line,
                text: trimmed.to_string(),
            }
        })?;
        Ok(Self::Declaration(Declaration { key, raw_value }))
    }
}

/// A fully read input file.
#[derive(Debug)]
pub struct ConfigFile {
    pub path: PathBuf,
    contents: String,
}

impl ConfigFile {
    /// Read a whole file into memory. The handle is closed before returning.
    pub fn read(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).map_err(|e| KconfError::io("read", path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            contents,
        })
    }

    #[cfg(test)]
    pub fn from_text(path: &str, contents: &str) -> Self {
        Self {
            path: PathBuf::from(path),
            contents: contents.to_string(),
        }
    }

    /// Raw lines without their terminators.
    pub fn lines(&self) -> std::str::Lines<'_> {
        self.contents.lines()
    }

    /// Classified lines in file order; stops at the first malformed declaration.
    pub fn parse(&self) -> Result<Vec<ConfigLine<'_>>> {
        self.lines()
            .enumerate()
            .map(|(idx, text)| ConfigLine::parse(text, &self.path, idx + 1))
            .collect()
    }
}

/// Split a `-c` argument on whitespace and keep the candidates that exist.
///
/// Each missing candidate gets a warning. An empty result is
/// [`KconfError::NoInput`], raised before anything is read or written.
pub fn resolve_inputs(candidates: &str) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for candidate in candidates.split_whitespace() {
        let path = Path::new(candidate);
        if path.exists() {
            found.push(path.to_path_buf());
        } else {
            wprintln!("can't find file: {candidate}");
        }
    }

    if found.is_empty() {
        return Err(KconfError::NoInput {
            candidates: candidates.to_string(),
        });
    }
    Ok(found)
}

/// Read every input in order.
pub fn read_inputs(paths: &[PathBuf]) -> Result<Vec<ConfigFile>> {
    paths
        .iter()
        .map(|path| -> Result<ConfigFile> {
            let file = ConfigFile::read(path)?;
            vprintln!("  read {} ({} lines)", path.display(), file.lines().count());
            Ok(file)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> ConfigLine<'_> {
        ConfigLine::parse(text, Path::new("test.config"), 1).unwrap()
    }

    #[test]
    fn declaration_splits_on_first_equals() {
        let ConfigLine::Declaration(decl) = parse("CONFIG_CMDLINE=\"a=b\"") else {
            panic!("expected declaration");
        };
        assert_eq!(decl.key, "CONFIG_CMDLINE");
        assert_eq!(decl.raw_value, "\"a=b\"");
        assert_eq!(decl.unquoted_value(), "a=b");
        assert_eq!(decl.bare_key(), "CMDLINE");
    }

    #[test]
    fn declaration_is_recognised_after_trimming() {
        let ConfigLine::Declaration(decl) = parse("   CONFIG_X=1  ") else {
            panic!("expected declaration");
        };
        assert_eq!(decl.key, "CONFIG_X");
        assert_eq!(decl.raw_value, "1");
    }

    #[test]
    fn prefix_match_is_case_sensitive() {
        assert_eq!(parse("config_x=1"), ConfigLine::Opaque("config_x=1"));
        assert_eq!(
            parse("# CONFIG_FOO is not set"),
            ConfigLine::Opaque("# CONFIG_FOO is not set")
        );
    }

    #[test]
    fn opaque_line_keeps_whitespace() {
        assert_eq!(parse("  #  spaced   out "), ConfigLine::Opaque("  #  spaced   out "));
        assert_eq!(parse(""), ConfigLine::Opaque(""));
    }

    #[test]
    fn quotes_are_stripped_per_side() {
        fn decl(raw: &str) -> Declaration<'_> {
            Declaration {
                key: "CONFIG_X",
                raw_value: raw,
            }
        }
        assert_eq!(decl("\"hello\"").unquoted_value(), "hello");
        assert_eq!(decl("\"abc").unquoted_value(), "abc");
        assert_eq!(decl("abc\"").unquoted_value(), "abc");
        assert_eq!(decl("\"\"x\"\"").unquoted_value(), "\"x\"");
        assert_eq!(decl("\"").unquoted_value(), "");
        assert_eq!(decl("0x1000").unquoted_value(), "0x1000");
    }

    #[test]
    fn missing_separator_is_malformed() {
        let err = ConfigLine::parse("CONFIG_BROKEN", Path::new("b.config"), 4).unwrap_err();
        match err {
            KconfError::MalformedDeclaration { path, line, text } => {
                assert_eq!(path, PathBuf::from("b.config"));
                assert_eq!(line, 4);
                assert_eq!(text, "CONFIG_BROKEN");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn file_parse_reports_line_number() {
        let file = ConfigFile::from_text("a.config", "# header\nCONFIG_A=y\nCONFIG_B\n");
        let err = file.parse().unwrap_err();
        assert!(matches!(err, KconfError::MalformedDeclaration { line: 3, .. }));
    }

    #[test]
    fn resolve_inputs_skips_missing_candidates() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("present.config");
        fs::write(&present, "CONFIG_A=y\n").unwrap();
        let missing = dir.path().join("missing.config");

        let arg = format!("{}  {}", missing.display(), present.display());
        let found = resolve_inputs(&arg).unwrap();
        assert_eq!(found, vec![present]);
    }

    #[test]
    fn resolve_inputs_with_nothing_present_fails() {
        let err = resolve_inputs("nope-1.config nope-2.config").unwrap_err();
        assert!(matches!(err, KconfError::NoInput { .. }));

        let err = resolve_inputs("   ").unwrap_err();
        assert!(matches!(err, KconfError::NoInput { .. }));
    }

    #[test]
    fn read_inputs_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.config");
        let b = dir.path().join("b.config");
        fs::write(&a, "CONFIG_X=1\n").unwrap();
        fs::write(&b, "CONFIG_Y=\"2\"\n").unwrap();

        let files = read_inputs(&[b.clone(), a.clone()]).unwrap();
        assert_eq!(files[0].path, b);
        assert_eq!(files[1].path, a);
    }

    #[test]
    fn unreadable_input_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory exists but cannot be read as a file.
        let err = ConfigFile::read(dir.path()).unwrap_err();
        assert!(matches!(err, KconfError::Io { action: "read", .. }));
    }
}
