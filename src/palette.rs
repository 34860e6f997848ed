//! Block palettes: the built-in concrete/terracotta table and custom lists.

use crate::{McPixelateError, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

// Average texture colors. Order matters: earlier entries win distance ties.
const BUILTIN_BLOCKS: [(&str, [u8; 3]); 31] = [
    ("white_conc", [207, 213, 214]),
    ("orange_conc", [224, 97, 0]),
    ("magenta_conc", [169, 48, 159]),
    ("lightblue_conc", [35, 137, 198]),
    ("yellow_conc", [240, 175, 21]),
    ("lime_conc", [94, 168, 24]),
    ("pink_conc", [213, 101, 142]),
    ("gray_conc", [54, 57, 61]),
    ("lightgray_conc", [125, 125, 115]),
    ("cyan_conc", [21, 119, 136]),
    ("purple_conc", [100, 31, 156]),
    ("blue_conc", [44, 46, 143]),
    ("brown_conc", [96, 59, 31]),
    ("green_conc", [73, 91, 36]),
    ("red_conc", [142, 32, 32]),
    ("black_conc", [8, 10, 15]),
    ("white_terr", [209, 178, 161]),
    ("orange_terr", [161, 83, 37]),
    ("magenta_terr", [149, 88, 108]),
    ("lightblue_terr", [113, 108, 137]),
    ("yellow_terr", [186, 133, 35]),
    ("lime_terr", [103, 117, 52]),
    ("pink_terr", [161, 78, 78]),
    ("gray_terr", [57, 42, 35]),
    ("lightgray_terr", [135, 106, 97]),
    ("cyan_terr", [86, 91, 91]),
    ("purple_terr", [118, 70, 86]),
    ("blue_terr", [74, 59, 91]),
    ("brown_terr", [77, 51, 35]),
    ("green_terr", [76, 83, 42]),
    ("red_terr", [143, 61, 46]),
];

static BUILTIN: Lazy<Palette> = Lazy::new(|| Palette {
    entries: BUILTIN_BLOCKS
        .iter()
        .map(|&(name, rgb)| PaletteEntry::new(name, rgb))
        .collect(),
});

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub name: String,
    pub rgb: [u8; 3],
}

impl PaletteEntry {
    pub fn new(name: impl Into<String>, rgb: [u8; 3]) -> Self {
        Self { name: name.into(), rgb }
    }
}

/// Block material family, identified by the name suffix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum BlockFamily {
    Concrete,
    Terracotta,
}

impl BlockFamily {
    pub fn suffix(self) -> &'static str {
        match self {
            BlockFamily::Concrete => "_conc",
            BlockFamily::Terracotta => "_terr",
        }
    }

    pub fn contains(self, name: &str) -> bool {
        name.ends_with(self.suffix())
    }
}

/// Ordered, non-empty set of uniquely named colors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Validate and wrap entries, keeping their order.
    pub fn new(entries: Vec<PaletteEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(McPixelateError::EmptyPalette);
        }
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.name.as_str()) {
                return Err(McPixelateError::DuplicateBlock(entry.name.clone()));
            }
        }
        Ok(Self { entries })
    }

    /// The embedded concrete + terracotta table.
    pub fn builtin() -> &'static Palette {
        &BUILTIN
    }

    /// Load a JSON list of `{"name": .., "rgb": [r, g, b]}` objects.
    pub fn from_json(path: impl AsRef<Path>) -> Result<Self> {
        let entries: Vec<PaletteEntry> =
            serde_json::from_str(&std::fs::read_to_string(path)?)?;
        Self::new(entries)
    }

    /// Keep only one block family.
    pub fn only(&self, family: BlockFamily) -> Result<Self> {
        self.filter(|entry| family.contains(&entry.name))
    }

    pub fn filter(&self, predicate: impl Fn(&PaletteEntry) -> bool) -> Result<Self> {
        let entries = self.entries.iter().filter(|e| predicate(e)).cloned().collect();
        Self::new(entries)
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PaletteEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a PaletteEntry;
    type IntoIter = std::slice::Iter<'a, PaletteEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_order_and_size() {
        let palette = Palette::builtin();
        assert_eq!(palette.len(), 31);
        assert_eq!(palette.entries()[0].name, "white_conc");
        assert_eq!(palette.entries()[15].name, "black_conc");
        assert_eq!(palette.entries()[30].name, "red_terr");
        assert!(!palette.iter().any(|e| e.name == "black_terr"));
    }

    #[test]
    fn test_builtin_has_unique_colors() {
        let colors: HashSet<[u8; 3]> = Palette::builtin().iter().map(|e| e.rgb).collect();
        assert_eq!(colors.len(), 31);
    }

    #[test]
    fn test_family_filter() {
        let concrete = Palette::builtin().only(BlockFamily::Concrete).unwrap();
        assert_eq!(concrete.len(), 16);
        assert!(concrete.iter().all(|e| e.name.ends_with("_conc")));

        let terracotta = Palette::builtin().only(BlockFamily::Terracotta).unwrap();
        assert_eq!(terracotta.len(), 15);
        assert_eq!(terracotta.entries()[0].name, "white_terr");
    }

    #[test]
    fn test_rejects_empty_and_duplicates() {
        assert!(matches!(Palette::new(vec![]), Err(McPixelateError::EmptyPalette)));

        let dup = vec![
            PaletteEntry::new("white", [255, 255, 255]),
            PaletteEntry::new("white", [0, 0, 0]),
        ];
        match Palette::new(dup) {
            Err(McPixelateError::DuplicateBlock(name)) => assert_eq!(name, "white"),
            other => panic!("unexpected result: {other:?}"),
        }

        let none = Palette::builtin().filter(|_| false);
        assert!(matches!(none, Err(McPixelateError::EmptyPalette)));
    }

    #[test]
    fn test_from_json_keeps_file_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"name": "black", "rgb": [0, 0, 0]}}, {{"name": "white", "rgb": [255, 255, 255]}}]"#
        )
        .unwrap();

        let palette = Palette::from_json(file.path()).unwrap();
        let names: Vec<&str> = palette.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["black", "white"]);
        assert_eq!(palette.entries()[1].rgb, [255, 255, 255]);
    }

    #[test]
    fn test_from_json_bad_input() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            Palette::from_json(file.path()),
            Err(McPixelateError::Json(_))
        ));
    }
}
