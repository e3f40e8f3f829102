//! The letter grid: cells, positions, bounds and 8-directional adjacency.

use std::fmt;
use std::sync::LazyLock;

use fancy_regex::Regex;

use crate::errors::GridInputError;

/// Neighbour offsets `(d_row, d_col)` in the order the search visits them.
///
/// The order only affects traversal, never the set of words found.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// One cell's worth of input text: a run of ASCII word characters.
///
/// Splitting on `\W+` and dropping empty pieces yields exactly these runs.
/// If you add a new `LazyLock<Regex>`, list it in `wasm::validate_internal_regexes` too!
pub(crate) static CELL_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9_]+").expect("cell token regex must compile"));

/// A `(row, col)` pair, 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    #[must_use]
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// True if `other` is one of the 8 cells touching `self`.
    #[must_use]
    pub fn is_adjacent(&self, other: &Position) -> bool {
        self != other && self.row.abs_diff(other.row) <= 1 && self.col.abs_diff(other.col) <= 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A `height` × `width` array of single characters, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) cells: Vec<char>,
}

impl Grid {
    /// Build a grid from its rows, top to bottom.
    ///
    /// # Errors
    ///
    /// [`GridInputError::InvalidDimensions`] if there are no rows or the first row is empty;
    /// [`GridInputError::RaggedRows`] if any row is not as long as the first.
    pub fn new(rows: Vec<Vec<char>>) -> Result<Grid, GridInputError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(GridInputError::InvalidDimensions { width, height });
        }
        if let Some((row, found)) = rows.iter().map(Vec::len).enumerate().find(|&(_, len)| len != width) {
            return Err(GridInputError::RaggedRows { row, expected: width, found });
        }

        Ok(Grid { width, height, cells: rows.into_iter().flatten().collect() })
    }

    /// Build a grid from row-major cells.
    ///
    /// # Errors
    ///
    /// [`GridInputError::InvalidDimensions`] if either dimension is zero or their product overflows;
    /// [`GridInputError::MissingCells`] / [`GridInputError::TooManyCells`] if `cells`
    /// does not hold exactly `width * height` characters.
    pub fn from_cells(width: usize, height: usize, cells: Vec<char>) -> Result<Grid, GridInputError> {
        let expected = match width.checked_mul(height) {
            Some(n) if n > 0 => n,
            _ => return Err(GridInputError::InvalidDimensions { width, height }),
        };
        let found = cells.len();
        if found < expected {
            return Err(GridInputError::MissingCells { expected, found });
        }
        if found > expected {
            return Err(GridInputError::TooManyCells { expected, found });
        }

        Ok(Grid { width, height, cells })
    }

    /// Parse user-typed grid text, row by row.
    ///
    /// The text is split on runs of non-word characters (so `"c a\nt s"`, `"c,a,t,s"` and
    /// `"c a t s"` are all the same 2x2 grid). Every piece must be a single character.
    ///
    /// # Errors
    ///
    /// Any [`GridInputError`]; see [`Grid::from_cells`] for the counting rules and
    /// [`GridInputError::InvalidCell`] for pieces longer than one character.
    pub fn parse(text: &str, width: usize, height: usize) -> Result<Grid, GridInputError> {
        let tokens = tokenize(text)?;

        let mut cells = Vec::with_capacity(tokens.len());
        for (index, token) in tokens.iter().enumerate() {
            let mut chars = token.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => cells.push(c),
                _ => {
                    return Err(GridInputError::InvalidCell { index, token: (*token).to_string() });
                }
            }
        }

        Self::from_cells(width, height, cells)
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false for a constructed grid; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width
    }

    /// The character at `pos`, or `None` when `pos` is outside the grid.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<char> {
        if self.in_bounds(pos.row, pos.col) {
            Some(self.cells[self.index(pos)])
        } else {
            None
        }
    }

    /// Row-major offset of `pos`. Callers guarantee `pos` is in bounds.
    pub(crate) fn index(&self, pos: Position) -> usize {
        debug_assert!(self.in_bounds(pos.row, pos.col), "position {pos} outside {}x{} grid", self.width, self.height);
        pos.row * self.width + pos.col
    }

    /// Every position, in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |row| (0..self.width).map(move |col| Position { row, col }))
    }

    /// In-bounds neighbours of `pos`, in [`NEIGHBOR_OFFSETS`] order.
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        NEIGHBOR_OFFSETS.iter().filter_map(move |&(d_row, d_col)| {
            let row = pos.row.checked_add_signed(d_row)?;
            let col = pos.col.checked_add_signed(d_col)?;
            self.in_bounds(row, col).then_some(Position { row, col })
        })
    }

    /// The rows as vectors, top to bottom.
    #[must_use]
    pub fn rows(&self) -> Vec<Vec<char>> {
        self.cells.chunks(self.width).map(<[char]>::to_vec).collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.chunks(self.width).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let line = row.iter().map(char::to_string).collect::<Vec<_>>().join(" ");
            write!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Number of cells `text` would fill, using the same splitting rule as [`Grid::parse`].
///
/// # Errors
///
/// [`GridInputError::RegexError`] if the tokenizer fails.
pub fn count_cells(text: &str) -> Result<usize, GridInputError> {
    tokenize(text).map(|tokens| tokens.len())
}

/// Split grid text on runs of non-word characters, dropping empty pieces.
fn tokenize(text: &str) -> Result<Vec<&str>, GridInputError> {
    CELL_TOKEN_RE
        .find_iter(text)
        .map(|m| m.map(|m| m.as_str()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(GridInputError::from)
}
