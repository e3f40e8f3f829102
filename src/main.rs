use std::process::ExitCode;
use clap::Parser;
use std::time::Instant;

use wordbrain::dictionary::{DictionaryLoadError, WordDictionary};
use wordbrain::errors::GridInputError;
use wordbrain::grid::{self, Grid};
use wordbrain::solver::{GridSearchEngine, SearchError, SearchOptions, SearchStrategy};

/// Find every dictionary word traced through adjacent cells of a letter grid
#[derive(Parser, Debug)]
#[command(
    author,
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"),
    about,
    long_about = None
)]
struct Cli {
    /// The grid letters, row by row, separated by spaces, commas or newlines (e.g., "c a t s")
    grid: String,

    /// Length of the words to look for
    #[arg(short = 'l', long)]
    word_length: usize,

    /// Number of columns (inferred for square grids when width and height are both omitted)
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Number of rows (inferred for square grids when width and height are both omitted)
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Path to the dictionary file (one word per line)
    #[arg(
        short,
        long,
        default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/data/dictionary.txt")
    )]
    dictionary: String,

    /// Skip paths whose letters cannot start any dictionary word
    #[arg(long)]
    prune: bool,

    /// Explore starting cells in parallel
    #[arg(long)]
    parallel: bool,
}

/// Entry point of the wordbrain CLI.
///
/// Delegates to [`try_main`], catching any errors and printing them
/// in a user-friendly way before exiting with code 1.
fn main() -> ExitCode {
    wordbrain::log::init_logger(wordbrain::log::debug_requested());

    if let Err(e) = try_main() {
        eprintln!("Error: {}", detailed_message(e.as_ref()));
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Prefer the coded, detailed format for our own error types.
fn detailed_message(e: &(dyn std::error::Error + 'static)) -> String {
    if let Some(search_err) = e.downcast_ref::<SearchError>() {
        search_err.display_detailed()
    } else if let Some(grid_err) = e.downcast_ref::<GridInputError>() {
        grid_err.display_detailed()
    } else if let Some(dict_err) = e.downcast_ref::<DictionaryLoadError>() {
        dict_err.display_detailed()
    } else {
        e.to_string()
    }
}

/// Core application logic for the wordbrain CLI.
///
/// Steps:
/// 1. Parse CLI arguments with Clap.
/// 2. Parse the grid text into a grid of the requested (or inferred) size.
/// 3. Load the dictionary from disk.
/// 4. Search and print each word on stdout, alphabetically.
/// 5. Print diagnostics (counts, timings) on stderr.
fn try_main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // 1. Build the grid before touching the dictionary so typos fail fast
    let (width, height) = resolve_dimensions(&cli.grid, cli.width, cli.height)?;
    let grid = Grid::parse(&cli.grid, width, height)?;
    log::debug!("Grid:\n{grid}");

    // 2. Load the dictionary
    let t_load = Instant::now();
    let dictionary = WordDictionary::load_from_path(&cli.dictionary)?;
    let load_secs = t_load.elapsed().as_secs_f64();

    // 3. Search
    let options = SearchOptions {
        strategy: if cli.prune { SearchStrategy::PrefixPruned } else { SearchStrategy::Exhaustive },
        parallel: cli.parallel,
    };
    let engine = GridSearchEngine::new(&dictionary);
    let report = engine.search_with_options(&grid, cli.word_length, &options)?;

    // 4. Print each word on stdout
    let num_words = report.words.len();
    for word in report.words.into_sorted_vec() {
        println!("{word}");
    }

    // 5. Diagnostics to stderr
    eprintln!(
        "Loaded {} words in {:.3}s; searched {}x{} grid in {:.3}s ({} candidates, {} {}).",
        dictionary.len(),
        load_secs,
        grid.width(),
        grid.height(),
        report.stats.elapsed.as_secs_f64(),
        report.stats.candidates_tested,
        num_words,
        if num_words == 1 { "word" } else { "words" }
    );

    Ok(())
}

/// Use the given dimensions, or infer a square grid from the number of cells.
fn resolve_dimensions(
    grid_text: &str,
    width: Option<usize>,
    height: Option<usize>,
) -> Result<(usize, usize), Box<dyn std::error::Error>> {
    match (width, height) {
        (Some(w), Some(h)) => Ok((w, h)),
        (None, None) => {
            let count = grid::count_cells(grid_text)?;
            let side = (1..=count).find(|side| side * side >= count).unwrap_or(0);
            if side * side == count && side > 0 {
                Ok((side, side))
            } else {
                Err(format!("cannot infer a square grid from {count} cells; pass --width and --height").into())
            }
        }
        (Some(w), None) => Err(format!("--width {w} given without --height").into()),
        (None, Some(h)) => Err(format!("--height {h} given without --width").into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_explicit_dimensions() {
        assert_eq!(resolve_dimensions("a b c", Some(3), Some(1)).unwrap(), (3, 1));
    }

    #[test]
    fn test_resolve_square_dimensions() {
        assert_eq!(resolve_dimensions("c a t s", None, None).unwrap(), (2, 2));
        assert_eq!(resolve_dimensions("a,b,c\nd,e,f\ng,h,i", None, None).unwrap(), (3, 3));
        assert_eq!(resolve_dimensions("x", None, None).unwrap(), (1, 1));
    }

    #[test]
    fn test_resolve_rejects_non_square() {
        assert!(resolve_dimensions("a b c", None, None).is_err());
        assert!(resolve_dimensions("", None, None).is_err());
        assert!(resolve_dimensions("a b c d", Some(2), None).is_err());
    }

    #[test]
    fn test_detailed_message_uses_error_codes() {
        let err: Box<dyn std::error::Error> = Box::new(SearchError::ZeroWordLength);
        assert!(detailed_message(err.as_ref()).contains("S001"));

        let err: Box<dyn std::error::Error> = Box::new(GridInputError::MissingCells { expected: 4, found: 3 });
        assert!(detailed_message(err.as_ref()).contains("E001"));
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["wordbrain", "c a t s", "-l", "3", "--prune"]).unwrap();
        assert_eq!(cli.word_length, 3);
        assert!(cli.prune);
        assert!(!cli.parallel);
        assert!(cli.width.is_none());
    }
}
