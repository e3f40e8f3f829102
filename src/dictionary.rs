//! Word list loading: the vocabulary the grid search checks candidates against.
//!
//! The dictionary can be built from a file, from any buffered reader, or from an in-memory
//! string (the latter is what WebAssembly/browser builds use, since direct file I/O
//! isn't allowed there).
//!
//! The parsing logic:
//! - One word per line, no escaping.
//! - Surrounding whitespace (including a trailing `\r`) is trimmed; blank lines are skipped.
//! - Every word is stored in ASCII uppercase, so lookups only need to uppercase the candidate.
//!
//! The resulting [`WordDictionary`] is never mutated after construction, so a single instance
//! can be shared by any number of concurrent searches.

use std::collections::HashSet;
use std::io::{self, BufRead};

use crate::errors::format_error_with_code_and_help;

/// Failure to obtain the raw word list.
///
/// - D001: `NotFound` (Dictionary file does not exist)
/// - D002: `ReadFailure` (Dictionary source could not be read)
#[derive(Debug, thiserror::Error)]
pub enum DictionaryLoadError {
    #[error("dictionary not found: '{path}'")]
    NotFound { path: String },

    #[error("failed to read dictionary from {context}: {source}")]
    ReadFailure {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl DictionaryLoadError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            DictionaryLoadError::NotFound { .. } => "D001",
            DictionaryLoadError::ReadFailure { .. } => "D002",
        }
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            DictionaryLoadError::NotFound { .. } => "Dictionary file does not exist",
            DictionaryLoadError::ReadFailure { .. } => "Dictionary source could not be read",
        }
    }

    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            DictionaryLoadError::NotFound { .. } => "The dictionary path does not point at an existing file. Nothing can be searched without a word list.",
            DictionaryLoadError::ReadFailure { .. } => "The dictionary exists but reading it failed (permissions, invalid UTF-8, or an I/O error while streaming lines).",
        }
    }

    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            DictionaryLoadError::NotFound { .. } => Some("Pass an existing word list with --dictionary <PATH> (one word per line)"),
            DictionaryLoadError::ReadFailure { .. } => Some("Make sure the file is readable plain UTF-8 text with one word per line"),
        }
    }

    /// See [`crate::errors::GridInputError::display_detailed`].
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// An immutable, case-insensitive set of valid words.
#[derive(Debug, Clone, Default)]
pub struct WordDictionary {
    /// Uppercased words. Example: `{"ACT", "CAT", "CATS"}`
    words: HashSet<String>,
}

impl WordDictionary {
    /// Build a dictionary from a sequence of lines, one word per line.
    ///
    /// Each line is trimmed and stored in ASCII uppercase; blank lines are ignored.
    pub fn from_lines<I, S>(lines: I) -> WordDictionary
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = lines
            .into_iter()
            .filter_map(|raw_line| {
                let line = raw_line.as_ref().trim();
                if line.is_empty() {
                    None
                } else {
                    Some(line.to_ascii_uppercase())
                }
            })
            .collect();

        WordDictionary { words }
    }

    /// Parse a raw word list from an in-memory string.
    ///
    /// This is **WASM-safe** because it doesn't touch the filesystem.
    #[must_use]
    pub fn parse_from_str(contents: &str) -> WordDictionary {
        Self::from_lines(contents.lines())
    }

    /// Build a dictionary from an already-opened reader.
    ///
    /// # Errors
    ///
    /// Returns [`DictionaryLoadError::ReadFailure`] if any line cannot be read.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<WordDictionary, DictionaryLoadError> {
        let lines = reader
            .lines()
            .collect::<io::Result<Vec<String>>>()
            .map_err(|source| DictionaryLoadError::ReadFailure {
                context: "reader".to_string(),
                source,
            })?;

        Ok(Self::from_lines(lines))
    }

    /// Read and parse a word list file. Not available on wasm32, which has no filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`DictionaryLoadError::NotFound`] if nothing exists at `path`, and
    /// [`DictionaryLoadError::ReadFailure`] for any other I/O failure.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<WordDictionary, DictionaryLoadError> {
        let path_ref = path.as_ref();

        let data = std::fs::read_to_string(path_ref).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                DictionaryLoadError::NotFound { path: path_ref.display().to_string() }
            } else {
                DictionaryLoadError::ReadFailure {
                    context: format!("'{}'", path_ref.display()),
                    source: e,
                }
            }
        })?;

        let dictionary = Self::parse_from_str(&data);
        log::debug!("Loaded {} words from '{}'", dictionary.len(), path_ref.display());
        Ok(dictionary)
    }

    /// Returns true iff the uppercased form of `candidate` is in the dictionary.
    #[must_use]
    pub fn contains(&self, candidate: &str) -> bool {
        if candidate.bytes().any(|b| b.is_ascii_lowercase()) {
            self.words.contains(&candidate.to_ascii_uppercase())
        } else {
            self.words.contains(candidate)
        }
    }

    /// Number of distinct words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate over the (uppercased) words in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}
