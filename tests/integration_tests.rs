//! Integration tests for the wordbrain grid search.
//!
//! These tests run the whole pipeline (dictionary loading, grid parsing, searching) and check
//! the results against an independent brute-force path finder.

use std::collections::HashSet;

use wordbrain::dictionary::{DictionaryLoadError, WordDictionary};
use wordbrain::errors::GridInputError;
use wordbrain::grid::Grid;
use wordbrain::solver::{self, GridSearchEngine, ResultSet, SearchError, SearchOptions, SearchStrategy};

const FIXTURE_DICTIONARY: &str = "tests/fixtures/dictionary.txt";

/// S T A R
/// E L I N
/// D O G E
/// P A C T
const FOUR_BY_FOUR: &str = "S T A R\nE L I N\nD O G E\nP A C T";

fn load_fixture_dictionary() -> WordDictionary {
    WordDictionary::load_from_path(FIXTURE_DICTIONARY).expect("Failed to read fixture dictionary")
}

fn four_by_four() -> Grid {
    Grid::parse(FOUR_BY_FOUR, 4, 4).expect("fixture grid must parse")
}

fn as_set(words: ResultSet) -> HashSet<String> {
    words.into_iter().collect()
}

/// Independent check: can `word` be traced through distinct, 8-adjacent cells of `grid`?
fn has_path(grid: &Grid, word: &str) -> bool {
    let target: Vec<char> = word.chars().collect();
    let rows = grid.rows();
    let mut used = vec![vec![false; grid.width()]; grid.height()];

    fn dfs(rows: &[Vec<char>], used: &mut [Vec<bool>], target: &[char], r: i64, c: i64) -> bool {
        if r < 0 || c < 0 || r as usize >= rows.len() || c as usize >= rows[0].len() {
            return false;
        }
        let (ru, cu) = (r as usize, c as usize);
        if used[ru][cu] || rows[ru][cu] != target[0] {
            return false;
        }
        if target.len() == 1 {
            return true;
        }
        used[ru][cu] = true;
        let mut found = false;
        'outer: for dr in -1..=1 {
            for dc in -1..=1 {
                if (dr != 0 || dc != 0) && dfs(rows, used, &target[1..], r + dr, c + dc) {
                    found = true;
                    break 'outer;
                }
            }
        }
        used[ru][cu] = false;
        found
    }

    (0..grid.height()).any(|r| (0..grid.width()).any(|c| dfs(&rows, &mut used, &target, r as i64, c as i64)))
}

#[cfg(test)]
mod known_words {
    use super::*;

    #[test]
    fn test_spec_scenario_three_letters() {
        let dictionary = WordDictionary::from_lines(["CAT", "CATS", "ACT"]);
        let rows = vec![vec!['C', 'A'], vec!['T', 'S']];

        let words = as_set(solver::search(&rows, 2, 2, 3, &dictionary).unwrap());

        // C(0,0)→A(0,1)→T(1,0) is a valid path; so is A(0,1)→C(0,0)→T(1,0)
        assert!(words.contains("CAT"));
        assert!(words.contains("ACT"));
        assert!(!words.contains("CATS"));
        assert_eq!(words.len(), 2);
    }

    #[test]
    fn test_spec_scenario_four_letters() {
        let dictionary = WordDictionary::from_lines(["CATS"]);
        let rows = vec![vec!['C', 'A'], vec!['T', 'S']];

        let words = solver::search(&rows, 2, 2, 4, &dictionary).unwrap();
        assert_eq!(words.into_sorted_vec(), vec!["CATS"]);
    }

    #[test]
    fn test_four_letter_words_in_fixture_grid() {
        let dictionary = load_fixture_dictionary();
        let words = as_set(solver::search_grid(&four_by_four(), 4, &dictionary).unwrap());

        for expected in ["STAR", "TALE", "PACT", "RAIN", "GOAD"] {
            assert!(words.contains(expected), "expected to find {expected}");
        }
        // TOAD needs an O next to a T; DOGS has no S near the G
        for missing in ["TOAD", "DOGS"] {
            assert!(!words.contains(missing), "{missing} should not be traceable");
        }
    }

    #[test]
    fn test_three_letter_words_in_fixture_grid() {
        let dictionary = load_fixture_dictionary();
        let words = as_set(solver::search_grid(&four_by_four(), 3, &dictionary).unwrap());

        for expected in ["DOG", "COG", "LOG", "TIN"] {
            assert!(words.contains(expected), "expected to find {expected}");
        }
    }

    #[test]
    fn test_five_letter_word_not_traceable() {
        let dictionary = load_fixture_dictionary();
        let words = solver::search_grid(&four_by_four(), 5, &dictionary).unwrap();

        // STARE: no E touches the R
        assert!(!words.contains("STARE"));
    }

    #[test]
    fn test_lowercase_grid_keeps_its_case() {
        let dictionary = load_fixture_dictionary();
        let grid = Grid::parse(&FOUR_BY_FOUR.to_lowercase(), 4, 4).unwrap();
        let words = as_set(solver::search_grid(&grid, 3, &dictionary).unwrap());

        assert!(words.contains("dog"));
        assert!(!words.contains("DOG"));
    }
}

#[cfg(test)]
mod properties {
    use super::*;

    #[test]
    fn test_every_result_has_requested_length_and_a_path() {
        let dictionary = load_fixture_dictionary();
        let grid = four_by_four();

        for word_length in 1..=6 {
            let words = solver::search_grid(&grid, word_length, &dictionary).unwrap();
            for word in words.iter() {
                assert_eq!(word.chars().count(), word_length, "{word} has the wrong length");
                assert!(has_path(&grid, word), "{word} has no simple path");
                assert!(dictionary.contains(word), "{word} is not in the dictionary");
            }
        }
    }

    #[test]
    fn test_results_are_complete() {
        // every traceable dictionary word of the right length must be reported
        let dictionary = load_fixture_dictionary();
        let grid = four_by_four();

        for word_length in 1..=6 {
            let expected: HashSet<String> = dictionary
                .iter()
                .filter(|w| w.chars().count() == word_length && has_path(&grid, w))
                .map(str::to_string)
                .collect();
            let found = as_set(solver::search_grid(&grid, word_length, &dictionary).unwrap());

            assert_eq!(found, expected, "word length {word_length}");
        }
    }

    #[test]
    fn test_search_is_idempotent() {
        let dictionary = load_fixture_dictionary();
        let grid = four_by_four();

        let first = solver::search_grid(&grid, 4, &dictionary).unwrap();
        let second = solver::search_grid(&grid, 4, &dictionary).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_duplicate_spellings_reported_once() {
        // every cell is E, so "EE" is traceable along many paths
        let dictionary = WordDictionary::from_lines(["EE", "EEE"]);
        let grid = Grid::parse("e e e e e e e e e", 3, 3).unwrap();

        let report = GridSearchEngine::new(&dictionary)
            .search_with_options(&grid, 2, &SearchOptions::default())
            .unwrap();

        assert_eq!(report.words.into_sorted_vec(), vec!["ee"]);
        assert!(report.stats.matches > 1);
    }

    #[test]
    fn test_single_cell_boundary() {
        let dictionary = WordDictionary::from_lines(["Q", "QQ"]);
        let grid = Grid::parse("q", 1, 1).unwrap();

        assert_eq!(solver::search_grid(&grid, 1, &dictionary).unwrap().into_sorted_vec(), vec!["q"]);
        for word_length in 2..=4 {
            assert!(solver::search_grid(&grid, word_length, &dictionary).unwrap().is_empty());
        }
    }

    #[test]
    fn test_all_strategies_agree() {
        let dictionary = load_fixture_dictionary();
        let grid = four_by_four();
        let engine = GridSearchEngine::new(&dictionary);

        for word_length in 1..=6 {
            let baseline = engine.search(&grid, word_length).unwrap();
            for strategy in [SearchStrategy::Exhaustive, SearchStrategy::PrefixPruned] {
                for parallel in [false, true] {
                    let report = engine
                        .search_with_options(&grid, word_length, &SearchOptions { strategy, parallel })
                        .unwrap();
                    assert_eq!(
                        report.words, baseline,
                        "{strategy:?} (parallel={parallel}) disagrees at length {word_length}"
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod error_handling {
    use super::*;

    #[test]
    fn test_zero_word_length() {
        let dictionary = load_fixture_dictionary();

        let err = solver::search_grid(&four_by_four(), 0, &dictionary).unwrap_err();
        assert_eq!(err, SearchError::ZeroWordLength);
        assert!(err.display_detailed().contains("S001"));
    }

    #[test]
    fn test_rows_disagree_with_dimensions() {
        let dictionary = load_fixture_dictionary();
        let rows = four_by_four().rows();

        assert!(matches!(
            solver::search(&rows, 4, 5, 3, &dictionary),
            Err(SearchError::RowCountMismatch { height: 5, rows: 4 })
        ));
        assert!(matches!(
            solver::search(&rows, 3, 4, 3, &dictionary),
            Err(SearchError::RowWidthMismatch { row: 0, width: 3, found: 4 })
        ));
    }

    #[test]
    fn test_incomplete_grid_input() {
        assert!(matches!(
            Grid::parse("S T A R E L I N", 4, 4),
            Err(GridInputError::MissingCells { expected: 16, found: 8 })
        ));
        assert!(matches!(
            Grid::parse("ST A R", 2, 2),
            Err(GridInputError::InvalidCell { index: 0, .. })
        ));
    }

    #[test]
    fn test_oversized_inputs_fail_cleanly() {
        let dictionary = load_fixture_dictionary();

        assert!(solver::search_grid(&four_by_four(), usize::MAX, &dictionary).unwrap().is_empty());
        assert!(matches!(
            Grid::parse("S", usize::MAX, 2),
            Err(GridInputError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Grid::new(vec![vec!['S', 'T'], vec!['A']]),
            Err(GridInputError::RaggedRows { row: 1, expected: 2, found: 1 })
        ));
    }

    #[test]
    fn test_missing_dictionary() {
        let err = WordDictionary::load_from_path("tests/fixtures/no_such_dictionary.txt").unwrap_err();
        assert!(matches!(err, DictionaryLoadError::NotFound { .. }));
    }
}
