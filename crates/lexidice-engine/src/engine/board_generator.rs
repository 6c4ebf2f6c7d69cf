use crate::{
    BoardError, DieError, GenerateError,
    core::{
        board::{Board, BoardSize},
        catalog::FaceSet,
        die::Die,
    },
};

use super::random::RandomSource;

/// Builds playable boards from a die-face catalog.
///
/// Each attempt shuffles the catalog's dice over the board cells
/// (Fisher–Yates), rolls every die, and keeps the result only when at least
/// `min_vowels` dice show a vowel. Attempts are bounded by
/// [`Self::max_attempts`] so that a catalog which can never satisfy the
/// constraint fails instead of looping forever.
///
/// # Example
///
/// ```
/// use lexidice_engine::{BoardGenerator, BoardSize, DiceCatalog, DiceRng};
///
/// let catalog = DiceCatalog::builtin().unwrap();
/// let face_sets = catalog.face_sets(BoardSize::Five).unwrap();
/// let generator = BoardGenerator::default();
///
/// let a = generator.generate(face_sets, &mut DiceRng::from_u64(7), 4).unwrap();
/// let b = generator.generate(face_sets, &mut DiceRng::from_u64(7), 4).unwrap();
/// assert_eq!(a, b);
/// assert!(a.vowel_count() >= 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGenerator {
    max_attempts: usize,
}

impl Default for BoardGenerator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ATTEMPTS)
    }
}

impl BoardGenerator {
    pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;

    /// Creates a generator giving up after `max_attempts` rolls (at least one).
    #[must_use]
    pub fn new(max_attempts: usize) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    #[must_use]
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Rolls a board whose vowel count is at least `min_vowels`.
    ///
    /// The catalog must contain 16, 25 or 36 face sets.
    pub fn generate<R>(
        &self,
        catalog: &[FaceSet],
        random: &mut R,
        min_vowels: usize,
    ) -> Result<Board, GenerateError>
    where
        R: RandomSource + ?Sized,
    {
        if !catalog.is_empty() && BoardSize::from_die_count(catalog.len()).is_none() {
            return Err(BoardError::UnsupportedDieCount {
                count: catalog.len(),
            }
            .into());
        }
        let dice = self.generate_dice(catalog, random, min_vowels)?;
        Ok(Board::new(dice)?)
    }

    /// Like [`Self::generate`], but returns the rolled dice without
    /// arranging them into a [`Board`], so any catalog size is accepted.
    pub fn generate_dice<R>(
        &self,
        catalog: &[FaceSet],
        random: &mut R,
        min_vowels: usize,
    ) -> Result<Vec<Die>, GenerateError>
    where
        R: RandomSource + ?Sized,
    {
        if catalog.is_empty() {
            return Err(GenerateError::EmptyCatalog);
        }

        for attempt in 1..=self.max_attempts {
            let dice = roll_once(catalog, random)?;
            let vowels = dice.iter().filter(|d| d.is_vowel()).count();
            if vowels >= min_vowels {
                tracing::debug!(attempt, vowels, min_vowels, "rolled playable board");
                return Ok(dice);
            }
            tracing::trace!(attempt, vowels, min_vowels, "rerolling board with too few vowels");
        }

        tracing::warn!(
            attempts = self.max_attempts,
            min_vowels,
            "giving up on board generation"
        );
        Err(GenerateError::BoardUnplayable {
            attempts: self.max_attempts,
            min_vowels,
        })
    }
}

fn roll_once<R>(catalog: &[FaceSet], random: &mut R) -> Result<Vec<Die>, GenerateError>
where
    R: RandomSource + ?Sized,
{
    let mut order: Vec<usize> = (0..catalog.len()).collect();
    for i in (1..order.len()).rev() {
        let j = random.next_int(i + 1)?;
        order.swap(i, j);
    }

    order
        .into_iter()
        .map(|index| -> Result<Die, GenerateError> {
            let faces = catalog[index].clone();
            if faces.is_empty() {
                return Err(DieError::NoFaces.into());
            }
            let selected = random.next_int(faces.len())?;
            Ok(Die::new(faces, selected)?)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::{DiceCatalog, DiceRng, InvalidBoundError};

    use super::*;

    fn face_sets(sets: &[&[&str]]) -> Vec<FaceSet> {
        sets.iter()
            .map(|faces| faces.iter().map(|f| (*f).to_owned()).collect())
            .collect()
    }

    /// Replays a fixed list of draws, then yields zeros.
    struct ScriptedRandom(std::vec::IntoIter<usize>);

    impl RandomSource for ScriptedRandom {
        fn next_int(&mut self, bound_exclusive: usize) -> Result<usize, InvalidBoundError> {
            let value = self.0.next().unwrap_or(0);
            assert!(value < bound_exclusive, "{value} >= {bound_exclusive}");
            Ok(value)
        }
    }

    #[test]
    fn test_deterministic_for_seed() {
        let catalog = DiceCatalog::builtin().unwrap();
        let generator = BoardGenerator::default();
        for size in BoardSize::ALL {
            let face_sets = catalog.face_sets(size).unwrap();
            for seed in 0..20 {
                let a = generator
                    .generate(face_sets, &mut DiceRng::from_u64(seed), 2)
                    .unwrap();
                let b = generator
                    .generate(face_sets, &mut DiceRng::from_u64(seed), 2)
                    .unwrap();
                assert_eq!(a, b);
                assert_eq!(a.to_string(), b.to_string());
                assert_eq!(a.size(), size);
            }
        }
    }

    #[test]
    fn test_meets_min_vowels() {
        let catalog = DiceCatalog::builtin().unwrap();
        let face_sets = catalog.face_sets(BoardSize::Four).unwrap();
        let generator = BoardGenerator::default();
        let mut rng = DiceRng::from_u64(3);
        for _ in 0..100 {
            let board = generator.generate(face_sets, &mut rng, 5).unwrap();
            assert!(board.vowel_count() >= 5, "{board}");
        }
    }

    #[test]
    fn test_every_catalog_die_used_once() {
        let catalog = DiceCatalog::builtin().unwrap();
        let face_sets = catalog.face_sets(BoardSize::Six).unwrap();
        let board = BoardGenerator::default()
            .generate(face_sets, &mut DiceRng::from_u64(11), 0)
            .unwrap();
        let mut used: Vec<_> = board.dice().iter().map(|d| d.faces().to_vec()).collect();
        let mut expected = face_sets.to_vec();
        used.sort();
        expected.sort();
        assert_eq!(used, expected);
    }

    #[test]
    fn test_single_cell_catalog_is_reproducible() {
        let catalog = face_sets(&[&["A", "B", "C", "D", "E", "F"]]);
        let generator = BoardGenerator::default();
        let a = generator
            .generate_dice(&catalog, &mut DiceRng::from_u64(42), 0)
            .unwrap();
        let b = generator
            .generate_dice(&catalog, &mut DiceRng::from_u64(42), 0)
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn test_shuffle_and_roll_follow_draws() {
        let catalog = face_sets(&[&["A", "B"], &["C", "D"], &["E", "F"]]);
        // Shuffle: i=2 swaps with 0, i=1 swaps with 1 -> order [2, 1, 0].
        // Rolls: faces 1, 0, 1.
        let mut random = ScriptedRandom(vec![0, 1, 1, 0, 1].into_iter());
        let dice = BoardGenerator::default()
            .generate_dice(&catalog, &mut random, 0)
            .unwrap();
        let values: Vec<_> = dice.iter().map(Die::value).collect();
        assert_eq!(values, ["F", "C", "B"]);
    }

    #[test]
    fn test_gives_up_on_impossible_catalog() {
        let catalog = vec![vec!["X".to_owned(), "Z".to_owned()]; 16];
        let generator = BoardGenerator::new(25);
        let err = generator
            .generate(&catalog, &mut DiceRng::from_u64(1), 1)
            .unwrap_err();
        assert_eq!(
            err,
            GenerateError::BoardUnplayable {
                attempts: 25,
                min_vowels: 1
            }
        );
    }

    #[test]
    fn test_rejects_unsupported_catalog_size() {
        let catalog = vec![vec!["A".to_owned()]; 10];
        let err = BoardGenerator::default()
            .generate(&catalog, &mut DiceRng::from_u64(1), 0)
            .unwrap_err();
        assert_eq!(
            err,
            GenerateError::Board(BoardError::UnsupportedDieCount { count: 10 })
        );
    }

    #[test]
    fn test_rejects_empty_catalog_and_faces() {
        let generator = BoardGenerator::default();
        assert_eq!(
            generator.generate(&[], &mut DiceRng::from_u64(1), 0),
            Err(GenerateError::EmptyCatalog)
        );
        let catalog = face_sets(&[&["A"], &[]]);
        assert_eq!(
            generator.generate_dice(&catalog, &mut DiceRng::from_u64(1), 0),
            Err(GenerateError::Board(BoardError::Die(DieError::NoFaces)))
        );
    }

    #[test]
    fn test_max_attempts_at_least_one() {
        assert_eq!(BoardGenerator::new(0).max_attempts(), 1);
    }
}
