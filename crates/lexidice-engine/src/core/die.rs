use std::fmt;

use crate::DieError;

/// Faces that count toward a board's vowel total.
const VOWELS: [&str; 6] = ["A", "E", "I", "O", "U", "Y"];

/// A single letter die with a fixed set of faces and one rolled face.
///
/// Faces are strings rather than characters so that multi-letter faces
/// such as `"Qu"` or `"Th"` can be represented directly.
///
/// # Example
///
/// ```
/// use lexidice_engine::Die;
///
/// let die = Die::new(vec!["A".into(), "B".into(), "C".into()], 2).unwrap();
/// assert_eq!(die.value(), "C");
/// assert!(!die.is_vowel());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Die {
    faces: Vec<String>,
    selected: usize,
}

impl Die {
    /// Creates a die showing `faces[selected]`.
    pub fn new(faces: Vec<String>, selected: usize) -> Result<Self, DieError> {
        if faces.is_empty() {
            return Err(DieError::NoFaces);
        }
        if selected >= faces.len() {
            return Err(DieError::FaceOutOfRange {
                index: selected,
                len: faces.len(),
            });
        }
        Ok(Self { faces, selected })
    }

    /// Creates a die showing the face equal to `value`.
    ///
    /// Falls back to the first face when `value` is not one of `faces`,
    /// which is how boards saved with a stale face list are recovered.
    pub fn with_value(faces: Vec<String>, value: &str) -> Result<Self, DieError> {
        let selected = faces.iter().position(|f| f == value).unwrap_or_else(|| {
            tracing::warn!(value, ?faces, "rolled value not found among faces, using first face");
            0
        });
        Self::new(faces, selected)
    }

    #[must_use]
    pub fn faces(&self) -> &[String] {
        &self.faces
    }

    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Returns the rolled face.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.faces[self.selected]
    }

    #[must_use]
    pub fn is_vowel(&self) -> bool {
        let value = self.value();
        VOWELS.iter().any(|v| v.eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faces(s: &[&str]) -> Vec<String> {
        s.iter().map(|f| (*f).to_owned()).collect()
    }

    #[test]
    fn test_rejects_empty_faces() {
        assert_eq!(Die::new(vec![], 0), Err(DieError::NoFaces));
    }

    #[test]
    fn test_rejects_out_of_range_selection() {
        assert_eq!(
            Die::new(faces(&["A", "B"]), 2),
            Err(DieError::FaceOutOfRange { index: 2, len: 2 })
        );
    }

    #[test]
    fn test_with_value_finds_face() {
        let die = Die::with_value(faces(&["A", "Qu", "E"]), "Qu").unwrap();
        assert_eq!(die.selected(), 1);
        assert_eq!(die.value(), "Qu");
    }

    #[test]
    fn test_with_value_falls_back_to_first_face() {
        let die = Die::with_value(faces(&["X", "Y", "Z"]), "Q").unwrap();
        assert_eq!(die.selected(), 0);
        assert_eq!(die.value(), "X");
    }

    #[test]
    fn test_vowels() {
        for v in ["A", "e", "I", "o", "U", "Y"] {
            assert!(Die::new(faces(&[v]), 0).unwrap().is_vowel(), "{v}");
        }
        for c in ["B", "Qu", "Th", "An"] {
            assert!(!Die::new(faces(&[c]), 0).unwrap().is_vowel(), "{c}");
        }
    }
}
