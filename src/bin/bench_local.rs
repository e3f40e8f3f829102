//! Local timing runner for the search strategies (median of repeated runs, no Criterion).
//!
//! PURPOSE
//! -------
//! - Fast, ad-hoc timing for a handful of grids on *your* machine.
//! - Loads the dictionary once, then runs each case several times per strategy and reports the median.
//! - Compares the exhaustive search against the prefix-pruned and parallel variants.
//!
//! HOW TO RUN
//! ----------
//! - Optimized build:                `cargo run --bin bench_local --release`
//! - Multiple repeats:               `cargo run --bin bench_local --release -- -r 5`
//! - Print a few words:              `cargo run --bin bench_local --release -- -p 5`
//! - See all flags:                  `cargo run --bin bench_local -- --help`
//!
//! NOTES
//! -----
//! - This is *not* Criterion. It's quick and convenient, not statistically rigorous.
//! - Cases live in `get_cases()` below.
//! - One warm-up run per case is done (not included in timing).
//! - We report the *median* over repeats (more robust than mean for small _N_).

use clap::Parser;
use std::hint::black_box;
use std::time::Instant;
use wordbrain::dictionary::WordDictionary;
use wordbrain::grid::Grid;
use wordbrain::solver::{GridSearchEngine, SearchOptions, SearchStrategy};

/// Simple local benchmark runner: load the dictionary once, time several grids.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the dictionary file (one word per line)
    #[arg(
        short,
        long,
        default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/data/dictionary.txt")
    )]
    dictionary: String,

    /// Number of repeats per case (use >1 to reduce noise; median is reported)
    #[arg(short = 'r', long = "repeats", default_value_t = 1)]
    num_repeats: usize,

    /// Print up to this many words per case (0 = print none)
    #[arg(short = 'p', long = "print", default_value_t = 0)]
    print_limit: usize,
}

/// A benchmark case: grid text, its dimensions, and the word length to search for.
#[derive(Clone)]
struct Case {
    grid: &'static str,
    width: usize,
    height: usize,
    word_length: usize,
}

/// Edit/add new cases here. Larger grids and longer words grow the search exponentially.
fn get_cases() -> Vec<Case> {
    vec![
        Case { grid: "S T A R E L I N D O G E P A C T", width: 4, height: 4, word_length: 4 },
        Case { grid: "S T A R E L I N D O G E P A C T", width: 4, height: 4, word_length: 6 },
        Case { grid: "C O N E S T A R L I G H T M O D E P A C", width: 5, height: 4, word_length: 5 },
        Case { grid: "T A L E S R A I N G O A D C O G L I N T P A C T S", width: 5, height: 5, word_length: 6 },
    ]
}

fn strategies() -> Vec<(&'static str, SearchOptions)> {
    vec![
        ("exhaustive", SearchOptions { strategy: SearchStrategy::Exhaustive, parallel: false }),
        ("pruned", SearchOptions { strategy: SearchStrategy::PrefixPruned, parallel: false }),
        ("exhaustive+par", SearchOptions { strategy: SearchStrategy::Exhaustive, parallel: true }),
        ("pruned+par", SearchOptions { strategy: SearchStrategy::PrefixPruned, parallel: true }),
    ]
}

/// Small helper: robust central tendency for small samples.
fn median(mut xs: Vec<f64>) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.sort_by(f64::total_cmp);
    let n = xs.len();
    if n % 2 == 1 {
        xs[n / 2]
    } else {
        0.5 * (xs[n / 2 - 1] + xs[n / 2])
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// One row in the benchmark summary: (case label, strategy, median seconds, number of words).
    type SummaryRow = (String, &'static str, f64, usize);

    let cli = Cli::parse();

    // Load the dictionary once. This I/O is *not* included in per-case timing.
    eprintln!("Loading dictionary from: {}", cli.dictionary);
    let t_load = Instant::now();
    let dictionary = WordDictionary::load_from_path(&cli.dictionary)?;
    eprintln!("Loaded {} words in {:.3}s", dictionary.len(), t_load.elapsed().as_secs_f64());

    let engine = GridSearchEngine::new(&dictionary);
    // build the trie outside the timed region
    let _ = engine.prefix_trie();

    let mut summary: Vec<SummaryRow> = Vec::new();

    for (idx, case) in get_cases().iter().enumerate() {
        let label = format!("{}x{} len {}", case.width, case.height, case.word_length);
        eprintln!("\n[{:02}] {label}", idx + 1);

        let grid = match Grid::parse(case.grid, case.width, case.height) {
            Ok(grid) => grid,
            Err(e) => {
                eprintln!("  ✗ Bad grid: {}", e.display_detailed());
                continue;
            }
        };

        for (name, options) in strategies() {
            // One *warm-up* execution per strategy; its timing is ignored.
            if let Err(e) = engine.search_with_options(&grid, case.word_length, &options) {
                eprintln!("  ✗ Warm-up failed: {}", e.display_detailed());
                continue;
            }

            let mut times = Vec::with_capacity(cli.num_repeats);
            let mut last_words: Vec<String> = Vec::new();

            for _ in 0..cli.num_repeats {
                let t_search = Instant::now();
                let report = engine.search_with_options(black_box(&grid), case.word_length, &options)?;
                times.push(t_search.elapsed().as_secs_f64());

                last_words = black_box(report.words).into_sorted_vec();
            }

            let med = median(times);
            eprintln!("  {name:<15} median {med:.4}s over {} run(s); {} words", cli.num_repeats, last_words.len());

            for word in last_words.iter().take(cli.print_limit) {
                println!("{word}");
            }

            summary.push((label.clone(), name, med, last_words.len()));
        }
    }

    eprintln!("\n==== Summary ====");
    eprintln!("{:<16} | {:<15} | {:>10} | {:>7}", "case", "strategy", "median (s)", "# words");
    eprintln!("{:-<16}-+-{:-<15}-+-{:-<10}-+-{:-<7}", "", "", "", "");
    for (label, name, med, num_words) in &summary {
        eprintln!("{label:<16} | {name:<15} | {med:>10.4} | {num_words:>7}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median() {
        assert_eq!(median(vec![]), 0.0);
        assert_eq!(median(vec![3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(vec![4.0, 1.0, 2.0, 3.0]), 2.5);
    }

    #[test]
    fn test_cases_parse() {
        for case in get_cases() {
            assert!(Grid::parse(case.grid, case.width, case.height).is_ok(), "bad case grid: {}", case.grid);
        }
    }
}
