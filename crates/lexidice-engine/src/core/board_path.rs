use super::board::Board;

/// A `(row, column)` position on a board.
pub type Cell = (usize, usize);

impl Board {
    /// Finds a chain of adjacent dice spelling `word`.
    ///
    /// Each die is used at most once and consecutive dice must touch
    /// horizontally, vertically or diagonally. A multi-letter face such as
    /// `"Qu"` consumes all of its letters at once. Matching is
    /// case-insensitive.
    ///
    /// Returns the cells in spelling order, or `None` if the word cannot be
    /// traced.
    ///
    /// # Example
    ///
    /// ```
    /// use lexidice_engine::{Board, Die};
    ///
    /// let letters = "CATSQUEXXXXXXXXX";
    /// let dice = letters
    ///     .chars()
    ///     .map(|c| {
    ///         let face = if c == 'Q' { "Qu".to_owned() } else { c.to_string() };
    ///         Die::new(vec![face], 0).unwrap()
    ///     })
    ///     .collect();
    /// let board = Board::new(dice).unwrap();
    ///
    /// assert_eq!(board.trace_word("cat"), Some(vec![(0, 0), (0, 1), (0, 2)]));
    /// assert!(board.trace_word("tack").is_none());
    /// ```
    #[must_use]
    pub fn trace_word(&self, word: &str) -> Option<Vec<Cell>> {
        let word = word.trim().to_uppercase();
        if word.is_empty() {
            return None;
        }
        let n = self.dimension();
        let mut visited = vec![false; self.dice().len()];
        let mut path = Vec::with_capacity(word.len());
        for row in 0..n {
            for column in 0..n {
                if self.extend_path(&word, (row, column), &mut visited, &mut path) {
                    return Some(path);
                }
            }
        }
        None
    }

    /// Returns `true` if [`Self::trace_word`] finds a path.
    #[must_use]
    pub fn contains_word(&self, word: &str) -> bool {
        self.trace_word(word).is_some()
    }

    fn extend_path(
        &self,
        rest: &str,
        cell: Cell,
        visited: &mut [bool],
        path: &mut Vec<Cell>,
    ) -> bool {
        let n = self.dimension();
        let index = cell.0 * n + cell.1;
        if visited[index] {
            return false;
        }
        let face = self.dice()[index].value().to_uppercase();
        if face.is_empty() {
            return false;
        }
        let Some(rest) = rest.strip_prefix(face.as_str()) else {
            return false;
        };

        visited[index] = true;
        path.push(cell);
        if rest.is_empty() {
            return true;
        }
        for neighbor in neighbors(cell, n) {
            if self.extend_path(rest, neighbor, visited, path) {
                return true;
            }
        }
        path.pop();
        visited[index] = false;
        false
    }
}

fn neighbors((row, column): Cell, n: usize) -> impl Iterator<Item = Cell> {
    const OFFSETS: [(isize, isize); 8] = [
        (-1, -1),
        (-1, 0),
        (-1, 1),
        (0, -1),
        (0, 1),
        (1, -1),
        (1, 0),
        (1, 1),
    ];
    OFFSETS.into_iter().filter_map(move |(dr, dc)| {
        let r = row.checked_add_signed(dr)?;
        let c = column.checked_add_signed(dc)?;
        (r < n && c < n).then_some((r, c))
    })
}
