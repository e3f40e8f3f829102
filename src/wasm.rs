//! Browser bindings. Everything here is compiled for `wasm32` only.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::dictionary::WordDictionary;
use crate::errors::GridInputError;
use crate::grid::Grid;
use crate::solver::{GridSearchEngine, SearchError, SearchOptions, SearchStrategy};

/// A coded failure as the JS side sees it.
#[derive(Serialize)]
struct WasmError {
    /// "S001", "E003", "WASM001", ...
    code: String,
    message: String,
    description: String,
    details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    help: Option<String>,
}

impl WasmError {
    /// A failure of the binding layer itself, not of the user's input.
    fn internal(code: &str, what: &str, cause: impl std::fmt::Display) -> Self {
        WasmError {
            code: code.to_string(),
            message: format!("{what}: {cause}"),
            description: format!("Could not hand the {what} to JavaScript"),
            details: format!("Converting the {what} into a JavaScript value failed."),
            help: Some("This is a bug in wordbrain; please report it.".to_string()),
        }
    }
}

/// `From<E> for WasmError` for every error enum with the coded accessor set.
macro_rules! impl_from_coded {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for WasmError {
                fn from(e: $ty) -> Self {
                    WasmError {
                        code: e.code().to_string(),
                        message: e.to_string(),
                        description: e.description().to_string(),
                        details: e.details().to_string(),
                        help: e.help().map(str::to_string),
                    }
                }
            }
        )+
    };
}

impl_from_coded!(SearchError, GridInputError);

impl From<WasmError> for JsValue {
    fn from(e: WasmError) -> Self {
        let mut text = format!("[{}] {}", e.code, e.message);
        for extra in [Some(e.details), e.help].into_iter().flatten().filter(|s| !s.is_empty()) {
            text.push_str("\n\n");
            text.push_str(&extra);
        }
        js_sys::Error::new(&text).into()
    }
}

/// Touch every static regex so a broken pattern panics during `initialize`, not mid-search.
///
/// New `LazyLock<Regex>` statics belong in this list.
fn validate_internal_regexes() {
    let _ = &*crate::grid::CELL_TOKEN_RE;
    log::debug!("static regexes compiled");
}

/// Call once from JS after the module has loaded.
#[wasm_bindgen]
pub fn initialize(debug_enabled: bool) {
    console_error_panic_hook::set_once();
    crate::log::init_logger(debug_enabled);
    validate_internal_regexes();
    log::info!("wordbrain wasm ready");
}

#[derive(Serialize)]
struct JsStats {
    start_cells: usize,
    candidates_tested: u64,
    matches: u64,
    pruned: u64,
    elapsed_ms: f64,
}

#[derive(Serialize)]
struct JsReport {
    /// Alphabetical
    words: Vec<String>,
    stats: JsStats,
}

/// JS entry: (grid_text: string, width: number, height: number, word_length: number,
/// dictionary: string[], prune: boolean) returns `{ words: string[], stats }`.
#[wasm_bindgen]
pub fn search_grid_wasm(
    grid_text: &str,
    width: usize,
    height: usize,
    word_length: usize,
    dictionary: JsValue,
    prune: bool,
) -> Result<JsValue, JsValue> {
    let words: Vec<String> = serde_wasm_bindgen::from_value(dictionary).map_err(|e| WasmError {
        code: "WASM001".to_string(),
        message: format!("dictionary must be string[]: {e}"),
        description: "Dictionary is not a list of words".to_string(),
        details: "The dictionary argument has to be a JavaScript array of strings.".to_string(),
        help: Some("Pass the value returned by parse_dictionary(), e.g. ['CAT', 'ACT']".to_string()),
    })?;
    let dictionary = WordDictionary::from_lines(&words);
    let grid = Grid::parse(grid_text, width, height).map_err(WasmError::from)?;

    let strategy = if prune { SearchStrategy::PrefixPruned } else { SearchStrategy::Exhaustive };
    let report = GridSearchEngine::new(&dictionary)
        .search_with_options(&grid, word_length, &SearchOptions { strategy, parallel: false })
        .map_err(WasmError::from)?;

    let js_report = JsReport {
        stats: JsStats {
            start_cells: report.stats.start_cells,
            candidates_tested: report.stats.candidates_tested,
            matches: report.stats.matches,
            pruned: report.stats.pruned,
            elapsed_ms: report.stats.elapsed.as_secs_f64() * 1000.0,
        },
        words: report.words.into_sorted_vec(),
    };

    serde_wasm_bindgen::to_value(&js_report).map_err(|e| WasmError::internal("WASM002", "search result", e).into())
}

/// The words of a newline-separated list, upper-cased and sorted, as a `string[]`.
///
/// # Errors
/// A JS `Error` (WASM003) if the list cannot be converted.
#[wasm_bindgen]
pub fn parse_dictionary(text: &str) -> Result<JsValue, JsValue> {
    let dictionary = WordDictionary::parse_from_str(text);
    let mut words: Vec<&str> = dictionary.iter().collect();
    words.sort_unstable();

    serde_wasm_bindgen::to_value(&words).map_err(|e| WasmError::internal("WASM003", "dictionary", e).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_regexes_compile() {
        validate_internal_regexes();
    }

    #[test]
    fn test_coded_errors_keep_their_code() {
        let err = WasmError::from(SearchError::ZeroWordLength);
        assert_eq!(err.code, "S001");
        assert!(err.help.is_some());

        let err = WasmError::from(GridInputError::MissingCells { expected: 4, found: 1 });
        assert_eq!(err.code, "E001");
    }

    #[test]
    fn test_internal_error_shape() {
        let err = WasmError::internal("WASM002", "search result", "boom");
        assert_eq!(err.code, "WASM002");
        assert_eq!(err.message, "search result: boom");
    }
}
