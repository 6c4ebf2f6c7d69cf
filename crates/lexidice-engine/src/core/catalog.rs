use std::{collections::BTreeMap, fs, path::Path};

use serde::{Deserialize, Serialize};

use super::board::BoardSize;
use crate::DataLoadError;

/// The faces of one die in a catalog.
pub type FaceSet = Vec<String>;

static BUILTIN_CATALOG: &str = include_str!("../../data/dice.json");

/// Die-face catalog keyed by board size.
///
/// The resource is a JSON object mapping a size label (`"4x4"`) to an
/// array with one face array per cell:
///
/// ```json
/// { "4x4": [["A", "A", "E", "E", "G", "N"], ...] }
/// ```
///
/// Sizes may be omitted, but every listed size must provide exactly
/// `N * N` non-empty face sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiceCatalog {
    sizes: BTreeMap<BoardSize, Vec<FaceSet>>,
}

impl DiceCatalog {
    const KIND: &'static str = "dice catalog";

    /// Parses the catalog embedded in the crate (classic 4x4, 5x5 and 6x6 dice).
    pub fn builtin() -> Result<Self, DataLoadError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn from_json(json: &str) -> Result<Self, DataLoadError> {
        let catalog: Self = serde_json::from_str(json).map_err(|source| DataLoadError::Json {
            kind: Self::KIND,
            source,
        })?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load<P>(path: P) -> Result<Self, DataLoadError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| DataLoadError::Io {
            path: path.to_owned(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), sizes = catalog.sizes.len(), "loaded dice catalog");
        Ok(catalog)
    }

    /// Loads `path`, falling back to the built-in catalog if the file is
    /// missing or malformed.
    pub fn load_or_builtin<P>(path: P) -> Result<Self, DataLoadError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(catalog) => Ok(catalog),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "using built-in dice catalog");
                Self::builtin()
            }
        }
    }

    /// Returns the per-cell face sets for `size`, if the catalog has them.
    #[must_use]
    pub fn face_sets(&self, size: BoardSize) -> Option<&[FaceSet]> {
        self.sizes.get(&size).map(Vec::as_slice)
    }

    pub fn sizes(&self) -> impl Iterator<Item = BoardSize> + '_ {
        self.sizes.keys().copied()
    }

    fn validate(&self) -> Result<(), DataLoadError> {
        for (size, face_sets) in &self.sizes {
            if face_sets.len() != size.die_count() {
                return Err(DataLoadError::Invalid {
                    kind: Self::KIND,
                    reason: format!(
                        "{size} needs {} dice, found {}",
                        size.die_count(),
                        face_sets.len()
                    ),
                });
            }
            if let Some(cell) = face_sets.iter().position(Vec::is_empty) {
                return Err(DataLoadError::Invalid {
                    kind: Self::KIND,
                    reason: format!("{size} die #{cell} has no faces"),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_all_sizes() {
        let catalog = DiceCatalog::builtin().unwrap();
        for size in BoardSize::ALL {
            let face_sets = catalog.face_sets(size).unwrap();
            assert_eq!(face_sets.len(), size.die_count());
            assert!(face_sets.iter().all(|faces| faces.len() == 6));
        }
    }

    #[test]
    fn test_partial_catalog() {
        let json = format!(r#"{{"4x4": {}}}"#, serde_json::json!(vec![vec!["A", "B"]; 16]));
        let catalog = DiceCatalog::from_json(&json).unwrap();
        assert!(catalog.face_sets(BoardSize::Four).is_some());
        assert!(catalog.face_sets(BoardSize::Five).is_none());
        assert_eq!(catalog.sizes().collect::<Vec<_>>(), vec![BoardSize::Four]);
    }

    #[test]
    fn test_rejects_wrong_die_count() {
        let json = r#"{"4x4": [["A"], ["B"]]}"#;
        let err = DiceCatalog::from_json(json).unwrap_err();
        assert!(matches!(err, DataLoadError::Invalid { .. }), "{err}");
        assert!(err.to_string().contains("needs 16 dice"));
    }

    #[test]
    fn test_rejects_empty_face_set() {
        let mut sets = vec![vec!["A"]; 16];
        sets[3] = vec![];
        let json = format!(r#"{{"4x4": {}}}"#, serde_json::json!(sets));
        let err = DiceCatalog::from_json(&json).unwrap_err();
        assert!(err.to_string().contains("die #3 has no faces"), "{err}");
    }

    #[test]
    fn test_rejects_unknown_size_label() {
        let json = r#"{"3x3": []}"#;
        assert!(matches!(
            DiceCatalog::from_json(json),
            Err(DataLoadError::Json { .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = DiceCatalog::load("/nonexistent/lexidice/dice.json").unwrap_err();
        assert!(matches!(err, DataLoadError::Io { .. }));
    }

    #[test]
    fn test_load_or_builtin_falls_back() {
        let builtin = DiceCatalog::builtin().unwrap();
        let missing = DiceCatalog::load_or_builtin("/nonexistent/lexidice/dice.json").unwrap();
        assert_eq!(missing, builtin);

        let file_name = format!("lexidice-bad-dice-{}.json", std::process::id());
        let path = std::env::temp_dir().join(file_name);
        fs::write(&path, r#"{"4x4": [["A"]]}"#).unwrap();
        let malformed = DiceCatalog::load_or_builtin(&path);
        fs::remove_file(&path).unwrap();
        assert_eq!(malformed.unwrap(), builtin);
    }
}
