use std::fmt;

use serde::{Deserialize, Serialize};

use super::die::Die;
use crate::BoardError;

/// Supported board dimensions.
///
/// Serialized as the catalog label (`"4x4"`, `"5x5"`, `"6x6"`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum BoardSize {
    #[default]
    #[serde(rename = "4x4")]
    Four,
    #[serde(rename = "5x5")]
    Five,
    #[serde(rename = "6x6")]
    Six,
}

impl BoardSize {
    pub const ALL: [Self; 3] = [Self::Four, Self::Five, Self::Six];

    /// Number of rows (and columns).
    #[must_use]
    pub const fn dimension(self) -> usize {
        match self {
            Self::Four => 4,
            Self::Five => 5,
            Self::Six => 6,
        }
    }

    #[must_use]
    pub const fn die_count(self) -> usize {
        self.dimension() * self.dimension()
    }

    #[must_use]
    pub const fn from_die_count(count: usize) -> Option<Self> {
        match count {
            16 => Some(Self::Four),
            25 => Some(Self::Five),
            36 => Some(Self::Six),
            _ => None,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Four => "4x4",
            Self::Five => "5x5",
            Self::Six => "6x6",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.label() == label)
    }
}

impl fmt::Display for BoardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for BoardSize {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(size) = Self::from_label(s) {
            return Ok(size);
        }
        // Bare dimensions ("4", "5", "6") are accepted as well.
        s.parse::<usize>()
            .ok()
            .and_then(|n| Self::from_die_count(n.saturating_mul(n)))
            .ok_or_else(|| BoardError::UnknownSize {
                label: s.to_owned(),
            })
    }
}

/// Portable form of a single die: its faces and the rolled value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieRecord {
    pub faces: Vec<String>,
    pub value: String,
}

impl From<&Die> for DieRecord {
    fn from(die: &Die) -> Self {
        Self {
            faces: die.faces().to_vec(),
            value: die.value().to_owned(),
        }
    }
}

/// Square grid of rolled dice, stored row-major.
///
/// A board is immutable once built. Rotations return a new board.
///
/// # Example
///
/// ```
/// use lexidice_engine::{Board, Die};
///
/// let dice = (0..16)
///     .map(|i| Die::new(vec![format!("{}", (b'A' + i) as char)], 0).unwrap())
///     .collect();
/// let board = Board::new(dice).unwrap();
///
/// assert_eq!(board.die(1, 2).unwrap().value(), "G");
/// assert!(board.die(4, 0).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<DieRecord>", try_from = "Vec<DieRecord>")]
pub struct Board {
    size: BoardSize,
    dice: Vec<Die>,
}

impl Board {
    /// Builds a board from row-major dice.
    ///
    /// The dimension is derived from the die count.
    pub fn new(dice: Vec<Die>) -> Result<Self, BoardError> {
        let size = BoardSize::from_die_count(dice.len())
            .ok_or(BoardError::UnsupportedDieCount { count: dice.len() })?;
        Ok(Self { size, dice })
    }

    #[must_use]
    pub fn size(&self) -> BoardSize {
        self.size
    }

    #[must_use]
    pub fn dimension(&self) -> usize {
        self.size.dimension()
    }

    #[must_use]
    pub fn dice(&self) -> &[Die] {
        &self.dice
    }

    /// Returns the die at `row * N + column`, or `None` when out of range.
    #[must_use]
    pub fn die(&self, row: usize, column: usize) -> Option<&Die> {
        let n = self.dimension();
        if row >= n || column >= n {
            return None;
        }
        self.dice.get(row * n + column)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Die]> {
        self.dice.chunks(self.dimension())
    }

    #[must_use]
    pub fn vowel_count(&self) -> usize {
        self.dice.iter().filter(|d| d.is_vowel()).count()
    }

    /// Returns this board turned a quarter turn clockwise.
    #[must_use]
    pub fn rotated_clockwise(&self) -> Self {
        let n = self.dimension();
        let dice = (0..n)
            .flat_map(|row| (0..n).map(move |column| (n - 1 - column) * n + row))
            .map(|index| self.dice[index].clone())
            .collect();
        Self {
            size: self.size,
            dice,
        }
    }

    /// Returns this board turned `quarter_turns` quarter turns clockwise.
    #[must_use]
    pub fn rotated(&self, quarter_turns: usize) -> Self {
        (0..quarter_turns % 4).fold(self.clone(), |board, _| board.rotated_clockwise())
    }

    pub fn to_records(&self) -> Vec<DieRecord> {
        self.dice.iter().map(DieRecord::from).collect()
    }
}

impl From<Board> for Vec<DieRecord> {
    fn from(board: Board) -> Self {
        board.to_records()
    }
}

impl TryFrom<Vec<DieRecord>> for Board {
    type Error = BoardError;

    fn try_from(records: Vec<DieRecord>) -> Result<Self, Self::Error> {
        let dice = records
            .into_iter()
            .map(|record| Die::with_value(record.faces, &record.value))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(dice)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let line = row
                .iter()
                .map(|die| format!("{:<2}", die.value()))
                .collect::<Vec<_>>()
                .join(" ");
            f.write_str(line.trim_end())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lettered_board(size: BoardSize) -> Board {
        let dice = (0..size.die_count())
            .map(|i| {
                let letter = char::from(b'A' + u8::try_from(i % 26).unwrap());
                Die::new(vec![letter.to_string(), "Z".into()], 0).unwrap()
            })
            .collect();
        Board::new(dice).unwrap()
    }

    #[test]
    fn test_size_from_die_count() {
        assert_eq!(BoardSize::from_die_count(16), Some(BoardSize::Four));
        assert_eq!(BoardSize::from_die_count(25), Some(BoardSize::Five));
        assert_eq!(BoardSize::from_die_count(36), Some(BoardSize::Six));
        assert_eq!(BoardSize::from_die_count(9), None);
        assert_eq!(BoardSize::from_die_count(0), None);
    }

    #[test]
    fn test_size_parse() {
        assert_eq!("5x5".parse::<BoardSize>().unwrap(), BoardSize::Five);
        assert_eq!("6".parse::<BoardSize>().unwrap(), BoardSize::Six);
        assert!("3x3".parse::<BoardSize>().is_err());
    }

    #[test]
    fn test_rejects_unsupported_count() {
        let dice = vec![Die::new(vec!["A".into()], 0).unwrap(); 10];
        assert_eq!(
            Board::new(dice),
            Err(BoardError::UnsupportedDieCount { count: 10 })
        );
    }

    #[test]
    fn test_addressing_matches_flat_index() {
        for size in BoardSize::ALL {
            let board = lettered_board(size);
            let n = size.dimension();
            for row in 0..n {
                for column in 0..n {
                    assert_eq!(board.die(row, column), Some(&board.dice()[row * n + column]));
                }
            }
            assert!(board.die(n, 0).is_none());
            assert!(board.die(0, n).is_none());
            assert!(board.die(usize::MAX, usize::MAX).is_none());
        }
    }

    #[test]
    fn test_rotation() {
        let board = lettered_board(BoardSize::Four);
        let rotated = board.rotated_clockwise();
        // Bottom-left corner moves to top-left.
        assert_eq!(rotated.die(0, 0), board.die(3, 0));
        assert_eq!(rotated.die(0, 3), board.die(0, 0));
        assert_eq!(board.rotated(4), board);
        assert_eq!(board.rotated(2), rotated.rotated_clockwise());
    }

    #[test]
    fn test_display() {
        let board = lettered_board(BoardSize::Four);
        let text = board.to_string();
        assert_eq!(text.lines().count(), 4);
        assert_eq!(text.lines().next().unwrap(), "A  B  C  D");
    }

    #[test]
    fn test_json_format() {
        let board = lettered_board(BoardSize::Four);
        let value = serde_json::to_value(&board).unwrap();
        assert_eq!(value[0]["faces"], serde_json::json!(["A", "Z"]));
        assert_eq!(value[0]["value"], "A");
        assert_eq!(value.as_array().unwrap().len(), 16);

        let restored: Board = serde_json::from_value(value).unwrap();
        assert_eq!(restored, board);
    }

    #[test]
    fn test_deserialize_unknown_value_defaults_to_first_face() {
        let mut records = lettered_board(BoardSize::Four).to_records();
        records[3].value = "?".into();
        records[5].value = "Z".into();
        let board = Board::try_from(records).unwrap();
        assert_eq!(board.dice()[3].selected(), 0);
        assert_eq!(board.dice()[5].selected(), 1);
    }

    #[test]
    fn test_deserialize_rejects_bad_count() {
        let json = r#"[{"faces": ["A"], "value": "A"}]"#;
        assert!(serde_json::from_str::<Board>(json).is_err());
    }
}
