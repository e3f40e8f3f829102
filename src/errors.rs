//! Error types for turning raw user text into a grid, with error codes and helpful messages.
//!
//! # Error Codes
//!
//! Each error variant has a unique code (E001-E006) for documentation lookup:
//!
//! - E001: `MissingCells` (Fewer cells than the grid needs)
//! - E002: `TooManyCells` (More cells than the grid holds)
//! - E003: `InvalidCell` (A cell is not exactly one character)
//! - E004: `InvalidDimensions` (Width or height is zero, or width × height overflows)
//! - E005: `RegexError` (Grid text could not be tokenized)
//! - E006: `RaggedRows` (Rows of different lengths)
//!
//! These are raised by [`Grid::parse`](crate::grid::Grid::parse) and [`Grid::new`](crate::grid::Grid::new) before the search ever runs.
//! The search itself only raises [`SearchError`](crate::solver::SearchError).
//!
//! # Examples
//!
//! ```
//! use wordbrain::errors::GridInputError;
//! use wordbrain::grid::Grid;
//!
//! match Grid::parse("c a t", 2, 2) {
//!     Err(e) => {
//!         println!("Error: {}", e);
//!         println!("Code: {}", e.code());
//!         if let Some(help) = e.help() {
//!             println!("Help: {}", help);
//!         }
//!         assert!(matches!(e, GridInputError::MissingCells { .. }));
//!     }
//!     Ok(_) => unreachable!(),
//! }
//! ```

/// Incomplete or malformed grid input.
#[derive(Debug, thiserror::Error)]
pub enum GridInputError {
    #[error("Grid needs {expected} cells but only {found} were given")]
    MissingCells { expected: usize, found: usize },

    #[error("Grid holds {expected} cells but {found} were given")]
    TooManyCells { expected: usize, found: usize },

    #[error("Cell {index} is \"{token}\" (each cell must be exactly one character)")]
    InvalidCell { index: usize, token: String },

    #[error("Invalid grid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Grid tokenizer failed: {0}")]
    RegexError(#[from] fancy_regex::Error),

    #[error("Row {row} has {found} cells but the first row has {expected}")]
    RaggedRows { row: usize, expected: usize, found: usize },
}

impl GridInputError {
    /// Stable `E0xx` code, shown to users and listed in the error reference.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            GridInputError::MissingCells { .. } => "E001",
            GridInputError::TooManyCells { .. } => "E002",
            GridInputError::InvalidCell { .. } => "E003",
            GridInputError::InvalidDimensions { .. } => "E004",
            GridInputError::RegexError(_) => "E005",
            GridInputError::RaggedRows { .. } => "E006",
        }
    }

    /// One-line summary of the variant, independent of its fields.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            GridInputError::MissingCells { .. } => "Fewer cells than the grid needs",
            GridInputError::TooManyCells { .. } => "More cells than the grid holds",
            GridInputError::InvalidCell { .. } => "A cell is not exactly one character",
            GridInputError::InvalidDimensions { .. } => "Width or height is zero, or the grid is too large",
            GridInputError::RegexError(_) => "Grid text could not be tokenized",
            GridInputError::RaggedRows { .. } => "Rows of different lengths",
        }
    }

    /// Longer explanation used by the generated error reference.
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            GridInputError::MissingCells { .. } => "The grid text is split on runs of non-word characters (spaces, commas, newlines, ...). The number of pieces must equal width × height; here some cells were left empty.",
            GridInputError::TooManyCells { .. } => "The grid text contains more pieces than width × height. Either the dimensions are too small or extra letters were typed.",
            GridInputError::InvalidCell { .. } => "Each piece of the grid text becomes one cell, and every cell must hold exactly one letter. Two letters typed without a separator end up in the same cell.",
            GridInputError::InvalidDimensions { .. } => "A grid must have at least one row and one column, and width × height must fit in memory.",
            GridInputError::RegexError(_) => "The regex engine gave up while splitting the grid text into cells. This is an internal error.",
            GridInputError::RaggedRows { .. } => "Only rectangular grids are supported: every row must hold as many cells as the first one.",
        }
    }

    /// What the user can change to get past this error, if anything.
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            GridInputError::MissingCells { .. } => Some("Provide one letter per cell, row by row (e.g., 'c a t s' for a 2x2 grid)"),
            GridInputError::TooManyCells { .. } => Some("Check the width and height, or remove the extra letters"),
            GridInputError::InvalidCell { .. } => Some("Separate letters with spaces or commas (e.g., 'c a' rather than 'ca')"),
            GridInputError::InvalidDimensions { .. } => Some("Width and height must both be at least 1"),
            GridInputError::RegexError(_) => None,
            GridInputError::RaggedRows { .. } => Some("Pad or trim the rows so they all have the same length"),
        }
    }

    /// `message (code)`, followed by the help text on its own line when there is one.
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Shared `display_detailed` layout for every coded error enum in the crate.
pub(crate) fn format_error_with_code_and_help(base_msg: &str, code: &str, help: Option<&str>) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_variants() -> Vec<GridInputError> {
        vec![
            GridInputError::MissingCells { expected: 9, found: 8 },
            GridInputError::TooManyCells { expected: 4, found: 5 },
            GridInputError::InvalidCell { index: 2, token: "ab".to_string() },
            GridInputError::InvalidDimensions { width: 0, height: 3 },
            GridInputError::RaggedRows { row: 1, expected: 3, found: 2 },
        ]
    }

    #[test]
    fn test_error_codes_and_help() {
        let err = GridInputError::MissingCells { expected: 9, found: 8 };
        assert_eq!(err.code(), "E001");
        assert!(err.help().is_some());
        let detailed = err.display_detailed();
        assert!(detailed.contains("E001"));
        assert!(detailed.contains('9') && detailed.contains('8'));
    }

    #[test]
    fn test_all_error_codes_are_unique() {
        let mut codes = std::collections::HashSet::new();
        for err in all_variants() {
            let code = err.code();
            assert!(codes.insert(code), "Duplicate error code found: {code}");
        }
        assert_eq!(codes.len(), 5);
    }

    #[test]
    fn test_error_code_format() {
        for err in all_variants() {
            let code = err.code();
            assert_eq!(code.len(), 4, "Error code '{code}' should be 4 characters (E0XX)");
            assert!(code.starts_with("E0"), "Error code '{code}' should start with 'E0'");
            assert!(code[1..].parse::<u16>().is_ok(), "Error code '{code}' should end with a number");
        }
    }

    #[test]
    fn test_help_differs_from_message() {
        for err in all_variants() {
            let help = err.help().expect("every grid input error carries help text");
            assert!(help.len() > 10, "Help text for {err:?} should be substantial");
            assert_ne!(help, err.to_string());
        }
    }

    #[test]
    fn test_invalid_cell_message_names_token() {
        let err = GridInputError::InvalidCell { index: 4, token: "qu".to_string() };
        assert!(err.to_string().contains("\"qu\""));
        assert!(err.display_detailed().ends_with("(e.g., 'c a' rather than 'ca')"));
    }
}
