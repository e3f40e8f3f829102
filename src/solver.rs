//! The grid search: find every dictionary word spelled by a simple 8-connected path.
//!
//! # Error Handling
//!
//! The search uses [`SearchError`] with four variants, all of them invalid arguments:
//!
//! - S001: `ZeroWordLength` (Requested word length is zero)
//! - S002: `EmptyGrid` (Grid has no rows or no columns)
//! - S003: `RowCountMismatch` (Number of rows differs from the declared height)
//! - S004: `RowWidthMismatch` (A row's length differs from the declared width)
//!
//! Each error has a `code()`, optional `help()`, and `display_detailed()` method.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```
//! use wordbrain::dictionary::WordDictionary;
//! use wordbrain::solver;
//!
//! let dictionary = WordDictionary::from_lines(["CAT", "CATS", "ACT"]);
//! let rows = vec![vec!['C', 'A'], vec!['T', 'S']];
//!
//! let words = solver::search(&rows, 2, 2, 3, &dictionary)?;
//! assert_eq!(words.into_sorted_vec(), vec!["ACT", "CAT"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Choosing a Strategy
//!
//! ```
//! use wordbrain::dictionary::WordDictionary;
//! use wordbrain::grid::Grid;
//! use wordbrain::solver::{GridSearchEngine, SearchOptions, SearchStrategy};
//!
//! let dictionary = WordDictionary::from_lines(["CAT", "CATS", "ACT"]);
//! let grid = Grid::parse("c a t s", 2, 2)?;
//! let engine = GridSearchEngine::new(&dictionary);
//!
//! let options = SearchOptions { strategy: SearchStrategy::PrefixPruned, ..SearchOptions::default() };
//! let report = engine.search_with_options(&grid, 4, &options)?;
//! assert!(report.words.contains("cats"));
//! println!("tested {} candidates", report.stats.candidates_tested);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::dictionary::WordDictionary;
use crate::errors::{format_error_with_code_and_help, GridInputError};
use crate::grid::{Grid, Position};
use crate::trie::{NodeId, PrefixTrie};
use instant::Instant;
use log::debug;
use once_cell::sync::OnceCell;
use std::collections::HashSet;
use std::time::Duration;

/// Invalid arguments handed to the search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("word length must be at least 1")]
    ZeroWordLength,

    #[error("grid must have at least one row and one column (got {width}x{height})")]
    EmptyGrid { width: usize, height: usize },

    #[error("grid has {rows} rows but height is {height}")]
    RowCountMismatch { height: usize, rows: usize },

    #[error("row {row} has {found} cells but width is {width}")]
    RowWidthMismatch { row: usize, width: usize, found: usize },
}

impl SearchError {
    /// `S0xx` code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            SearchError::ZeroWordLength => "S001",
            SearchError::EmptyGrid { .. } => "S002",
            SearchError::RowCountMismatch { .. } => "S003",
            SearchError::RowWidthMismatch { .. } => "S004",
        }
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            SearchError::ZeroWordLength => "Requested word length is zero",
            SearchError::EmptyGrid { .. } => "Grid has no rows or no columns",
            SearchError::RowCountMismatch { .. } => "Number of rows differs from the declared height",
            SearchError::RowWidthMismatch { .. } => "A row's length differs from the declared width",
        }
    }

    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            SearchError::ZeroWordLength => "Every word is traced through at least one cell, so a word length of zero can never match anything.",
            SearchError::EmptyGrid { .. } => "The search needs at least one cell to start a path from.",
            SearchError::RowCountMismatch { .. } => "The grid rows handed to the search do not agree with the height they were declared with.",
            SearchError::RowWidthMismatch { .. } => "Every row of the grid must hold exactly `width` cells; non-rectangular grids are not supported.",
        }
    }

    /// Hint for the caller; every search error has one.
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            SearchError::ZeroWordLength => Some("Ask for a positive word length (e.g., '-l 4')"),
            SearchError::EmptyGrid { .. } => Some("Width and height must both be at least 1"),
            SearchError::RowCountMismatch { .. } | SearchError::RowWidthMismatch { .. } => {
                Some("Check that the declared width and height match the grid you are passing")
            }
        }
    }

    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Distinct words found by one search, as spelled by the grid cells (case preserved).
///
/// Iteration order is unspecified; use [`ResultSet::into_sorted_vec`] or
/// [`ResultSet::to_listing`] for stable output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    words: HashSet<String>,
}

impl ResultSet {
    /// Returns true if the word was not already present.
    pub(crate) fn insert(&mut self, word: &str) -> bool {
        if self.words.contains(word) {
            false
        } else {
            self.words.insert(word.to_string())
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn merge(&mut self, other: ResultSet) {
        self.words.extend(other.words);
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// The words, alphabetically.
    #[must_use]
    pub fn into_sorted_vec(self) -> Vec<String> {
        let mut words: Vec<String> = self.words.into_iter().collect();
        words.sort();
        words
    }

    /// Newline-separated, alphabetically sorted listing.
    #[must_use]
    pub fn to_listing(&self) -> String {
        let mut words: Vec<&str> = self.iter().collect();
        words.sort_unstable();
        words.join("\n")
    }
}

impl IntoIterator for ResultSet {
    type Item = String;
    type IntoIter = std::collections::hash_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.into_iter()
    }
}

/// How paths are pruned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchStrategy {
    /// Enumerate every simple path of the requested length; only the visited set prunes.
    #[default]
    Exhaustive,

    /// Abandon a path as soon as its letters are not the prefix of any dictionary word.
    /// Finds exactly the same words as `Exhaustive`.
    PrefixPruned,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub strategy: SearchStrategy,
    /// Explore starting cells on the rayon thread pool (ignored on wasm32).
    pub parallel: bool,
}

/// Counters collected while searching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Starting cells whose subtree was explored.
    pub start_cells: usize,
    /// Complete candidate strings looked up in the dictionary.
    pub candidates_tested: u64,
    /// Dictionary hits, counting the same word once per path.
    pub matches: u64,
    /// Partial paths abandoned by prefix pruning (always 0 for `Exhaustive`).
    pub pruned: u64,
    pub elapsed: Duration,
}

impl SearchStats {
    #[cfg(not(target_arch = "wasm32"))]
    fn absorb(&mut self, other: &SearchStats) {
        self.start_cells += other.start_cells;
        self.candidates_tested += other.candidates_tested;
        self.matches += other.matches;
        self.pruned += other.pruned;
    }
}

/// A complete search result.
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub words: ResultSet,
    pub stats: SearchStats,
}

/// Cells already used by the current path.
///
/// Acquired on entering a cell and released on backtracking out of it, so after any subtree
/// is explored the set is exactly what it was before.
#[derive(Debug, Clone)]
struct VisitedSet {
    cells: Vec<bool>,
}

impl VisitedSet {
    fn new(len: usize) -> Self {
        Self { cells: vec![false; len] }
    }

    fn is_visited(&self, index: usize) -> bool {
        self.cells[index]
    }

    fn acquire(&mut self, index: usize) {
        debug_assert!(!self.cells[index], "cell {index} acquired twice on one path");
        self.cells[index] = true;
    }

    fn release(&mut self, index: usize) {
        debug_assert!(self.cells[index], "cell {index} released but never acquired");
        self.cells[index] = false;
    }

    fn none_visited(&self) -> bool {
        self.cells.iter().all(|&v| !v)
    }
}

/// Scratch state for one in-flight search: allocated once, restored after every path.
struct Walk<'a> {
    grid: &'a Grid,
    dictionary: &'a WordDictionary,
    trie: Option<&'a PrefixTrie>,
    word_length: usize,
    visited: VisitedSet,
    path: Vec<char>,
    candidate: String,
    words: ResultSet,
    stats: SearchStats,
}

impl<'a> Walk<'a> {
    fn new(grid: &'a Grid, dictionary: &'a WordDictionary, trie: Option<&'a PrefixTrie>, word_length: usize) -> Self {
        // a simple path never holds more characters than the grid has cells
        let depth = word_length.min(grid.len());
        Self {
            grid,
            dictionary,
            trie,
            word_length,
            visited: VisitedSet::new(grid.len()),
            path: Vec::with_capacity(depth),
            candidate: String::with_capacity(depth),
            words: ResultSet::default(),
            stats: SearchStats::default(),
        }
    }

    /// Explore every path that begins at `start`.
    fn start_at(&mut self, start: Position) {
        debug_assert!(self.visited.none_visited() && self.path.is_empty());
        self.stats.start_cells += 1;

        let node = match self.trie {
            Some(trie) => match trie.step(trie.root(), self.grid.cells[self.grid.index(start)]) {
                Some(node) => Some(node),
                None => {
                    self.stats.pruned += 1;
                    return;
                }
            },
            None => None,
        };

        self.explore(start, node);
    }

    /// Enter `pos`, extend the path through every free neighbour, then leave `pos`.
    ///
    /// `node` is the trie node for the path including `pos` (prefix-pruned strategy only).
    fn explore(&mut self, pos: Position, node: Option<NodeId>) {
        let grid = self.grid;
        let index = grid.index(pos);

        self.visited.acquire(index);
        self.path.push(grid.cells[index]);

        if self.path.len() == self.word_length {
            self.test_candidate();
        } else {
            for next in grid.neighbors(pos) {
                let next_index = grid.index(next);
                if self.visited.is_visited(next_index) {
                    continue;
                }

                let next_node = match (self.trie, node) {
                    (Some(trie), Some(node)) => match trie.step(node, grid.cells[next_index]) {
                        Some(next_node) => Some(next_node),
                        None => {
                            self.stats.pruned += 1;
                            continue;
                        }
                    },
                    _ => None,
                };

                self.explore(next, next_node);
            }
        }

        self.path.pop();
        self.visited.release(index);
    }

    fn test_candidate(&mut self) {
        debug_assert_eq!(self.path.len(), self.word_length);

        self.candidate.clear();
        self.candidate.extend(self.path.iter());
        self.stats.candidates_tested += 1;

        if self.dictionary.contains(&self.candidate) {
            self.stats.matches += 1;
            self.words.insert(&self.candidate);
        }
    }

    fn finish(self) -> (ResultSet, SearchStats) {
        debug_assert!(self.visited.none_visited() && self.path.is_empty());
        (self.words, self.stats)
    }
}

/// Searches grids against one dictionary.
///
/// The prefix trie needed by [`SearchStrategy::PrefixPruned`] is built on first use and
/// reused by every later search on the same engine.
pub struct GridSearchEngine<'d> {
    dictionary: &'d WordDictionary,
    trie: OnceCell<PrefixTrie>,
}

impl<'d> GridSearchEngine<'d> {
    #[must_use]
    pub fn new(dictionary: &'d WordDictionary) -> Self {
        Self { dictionary, trie: OnceCell::new() }
    }

    #[must_use]
    pub fn dictionary(&self) -> &'d WordDictionary {
        self.dictionary
    }

    /// The prefix index over this engine's dictionary, built on first call.
    pub fn prefix_trie(&self) -> &PrefixTrie {
        self.trie.get_or_init(|| PrefixTrie::from_dictionary(self.dictionary))
    }

    /// Exhaustive search with default options.
    ///
    /// # Errors
    ///
    /// [`SearchError::ZeroWordLength`] if `word_length` is 0.
    pub fn search(&self, grid: &Grid, word_length: usize) -> Result<ResultSet, SearchError> {
        self.search_with_options(grid, word_length, &SearchOptions::default())
            .map(|report| report.words)
    }

    /// Search `grid` for every `word_length`-letter dictionary word.
    ///
    /// Either the full result is returned or an error; never a partial result.
    ///
    /// # Errors
    ///
    /// [`SearchError::ZeroWordLength`] if `word_length` is 0.
    pub fn search_with_options(
        &self,
        grid: &Grid,
        word_length: usize,
        options: &SearchOptions,
    ) -> Result<SearchReport, SearchError> {
        if word_length == 0 {
            return Err(SearchError::ZeroWordLength);
        }
        if grid.width() == 0 || grid.height() == 0 {
            return Err(SearchError::EmptyGrid { width: grid.width(), height: grid.height() });
        }

        if word_length > grid.len() {
            debug!("No {word_length}-letter path fits in a grid of {} cells", grid.len());
            return Ok(SearchReport { words: ResultSet::default(), stats: SearchStats::default() });
        }

        debug!(
            "Searching {}x{} grid for {word_length}-letter words ({:?}, parallel={})",
            grid.width(),
            grid.height(),
            options.strategy,
            options.parallel
        );

        let start = Instant::now();
        let trie = match options.strategy {
            SearchStrategy::Exhaustive => None,
            SearchStrategy::PrefixPruned => Some(self.prefix_trie()),
        };

        let (words, mut stats) = if options.parallel {
            self.run_parallel(grid, trie, word_length)
        } else {
            self.run_sequential(grid, trie, word_length)
        };
        stats.elapsed = start.elapsed();

        debug!(
            "Found {} distinct words from {} candidates ({} matches, {} pruned) in {:.3}s",
            words.len(),
            stats.candidates_tested,
            stats.matches,
            stats.pruned,
            stats.elapsed.as_secs_f64()
        );

        Ok(SearchReport { words, stats })
    }

    fn run_sequential(&self, grid: &Grid, trie: Option<&PrefixTrie>, word_length: usize) -> (ResultSet, SearchStats) {
        let mut walk = Walk::new(grid, self.dictionary, trie, word_length);
        for start in grid.positions() {
            walk.start_at(start);
        }
        walk.finish()
    }

    /// One independent walk per starting cell, merged at the end.
    #[cfg(not(target_arch = "wasm32"))]
    fn run_parallel(&self, grid: &Grid, trie: Option<&PrefixTrie>, word_length: usize) -> (ResultSet, SearchStats) {
        use rayon::prelude::*;

        let starts: Vec<Position> = grid.positions().collect();
        starts
            .into_par_iter()
            .map(|start| {
                let mut walk = Walk::new(grid, self.dictionary, trie, word_length);
                walk.start_at(start);
                walk.finish()
            })
            .reduce(
                || (ResultSet::default(), SearchStats::default()),
                |(mut words, mut stats), (other_words, other_stats)| {
                    words.merge(other_words);
                    stats.absorb(&other_stats);
                    (words, stats)
                },
            )
    }

    #[cfg(target_arch = "wasm32")]
    fn run_parallel(&self, grid: &Grid, trie: Option<&PrefixTrie>, word_length: usize) -> (ResultSet, SearchStats) {
        log::warn!("Parallel search is unavailable on wasm32; searching sequentially");
        self.run_sequential(grid, trie, word_length)
    }
}

/// Search a grid given as rows, checking the rows against the declared `width` and `height`.
///
/// # Errors
///
/// Any [`SearchError`]: zero word length, an empty grid, or rows that disagree with the
/// declared dimensions.
pub fn search(
    rows: &[Vec<char>],
    width: usize,
    height: usize,
    word_length: usize,
    dictionary: &WordDictionary,
) -> Result<ResultSet, SearchError> {
    if word_length == 0 {
        return Err(SearchError::ZeroWordLength);
    }
    let grid = grid_from_rows(rows, width, height)?;
    GridSearchEngine::new(dictionary).search(&grid, word_length)
}

/// Exhaustive search of an already-built grid.
///
/// # Errors
///
/// [`SearchError::ZeroWordLength`] if `word_length` is 0.
pub fn search_grid(grid: &Grid, word_length: usize, dictionary: &WordDictionary) -> Result<ResultSet, SearchError> {
    GridSearchEngine::new(dictionary).search(grid, word_length)
}

fn grid_from_rows(rows: &[Vec<char>], width: usize, height: usize) -> Result<Grid, SearchError> {
    if width == 0 || height == 0 {
        return Err(SearchError::EmptyGrid { width, height });
    }
    if rows.len() != height {
        return Err(SearchError::RowCountMismatch { height, rows: rows.len() });
    }
    if let Some((row, found)) = rows.iter().map(Vec::len).enumerate().find(|&(_, len)| len != width) {
        return Err(SearchError::RowWidthMismatch { row, width, found });
    }

    Grid::new(rows.to_vec()).map_err(|e| match e {
        GridInputError::RaggedRows { row, expected, found } => {
            SearchError::RowWidthMismatch { row, width: expected, found }
        }
        _ => SearchError::EmptyGrid { width, height },
    })
}
