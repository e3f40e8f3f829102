//! Prints the Markdown error-code reference.
//!
//! Every entry is built by calling the accessors on a sample value of each variant of
//! `SearchError`, `GridInputError` and `DictionaryLoadError`, so the reference cannot drift
//! from the code.
//!
//! Run with:
//! ```bash
//! cargo run --bin generate_error_docs > docs/ERROR_CODES.md
//! ```

use std::io;

use wordbrain::dictionary::DictionaryLoadError;
use wordbrain::errors::GridInputError;
use wordbrain::solver::SearchError;

/// One Markdown section per error value. Works for any of the coded error enums.
macro_rules! generate_error_docs {
    ($errors:expr) => {
        for error in $errors {
            let code = error.code();
            let description = error.description();
            let details = error.details();
            let help = error.help();

            println!("### {}: {}\n", code, description);
            println!("**Details:** {}\n", details);

            if let Some(help_text) = help {
                println!("**How to fix:**");
                println!("```");
                println!("{}", help_text);
                println!("```\n");
            }

            println!("**Example error message:**");
            println!("```");
            println!("{}", error);
            println!("```\n");

            println!("**Detailed format:**");
            println!("```");
            println!("{}", error.display_detailed());
            println!("```\n");

            println!("---\n");
        }
    };
}

/// Helper to create all `SearchError` variants for documentation
fn all_search_error_variants() -> Vec<SearchError> {
    vec![
        SearchError::ZeroWordLength,
        SearchError::EmptyGrid { width: 0, height: 4 },
        SearchError::RowCountMismatch { height: 4, rows: 3 },
        SearchError::RowWidthMismatch { row: 2, width: 4, found: 5 },
    ]
}

/// Helper to create all `GridInputError` variants for documentation
fn all_grid_input_error_variants() -> Vec<GridInputError> {
    vec![
        GridInputError::MissingCells { expected: 16, found: 15 },
        GridInputError::TooManyCells { expected: 16, found: 17 },
        GridInputError::InvalidCell { index: 3, token: "qu".to_string() },
        GridInputError::InvalidDimensions { width: 0, height: 4 },
        // RegexError--create by compiling an invalid regex
        GridInputError::RegexError(
            fancy_regex::Regex::new("(?P<invalid").expect_err("pattern is deliberately malformed"),
        ),
        GridInputError::RaggedRows { row: 2, expected: 4, found: 3 },
    ]
}

/// Helper to create all `DictionaryLoadError` variants for documentation
fn all_dictionary_error_variants() -> Vec<DictionaryLoadError> {
    vec![
        DictionaryLoadError::NotFound { path: "data/dictionary.txt".to_string() },
        DictionaryLoadError::ReadFailure {
            context: "'data/dictionary.txt'".to_string(),
            source: io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8"),
        },
    ]
}

fn main() {
    println!("# Error Code Reference\n");
    println!("_Generated by `generate_error_docs`; edit the error enums instead of this file._\n");

    println!("## Table of Contents\n");
    println!("- [Search Errors (S001–S004)](#search-errors)");
    println!("- [Grid Input Errors (E001–E006)](#grid-input-errors)");
    println!("- [Dictionary Errors (D001–D002)](#dictionary-errors)\n");

    println!("## Search Errors\n");
    println!("Invalid arguments rejected by the search before any path is explored.\n");
    generate_error_docs!(all_search_error_variants());

    println!("## Grid Input Errors\n");
    println!("Problems with the typed grid text, reported before the search runs.\n");
    generate_error_docs!(all_grid_input_error_variants());

    println!("## Dictionary Errors\n");
    println!("Failures while loading the word list. These are fatal at startup.\n");
    generate_error_docs!(all_dictionary_error_variants());
}
