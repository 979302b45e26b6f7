//! Immutable character lookup table.

use std::collections::BTreeMap;

/// A story character's profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    /// Short backstory.
    pub backstory: String,
    /// The character's superpower.
    pub superpower: String,
}

impl Character {
    /// Create a character profile.
    pub fn new(backstory: impl Into<String>, superpower: impl Into<String>) -> Self {
        Self {
            backstory: backstory.into(),
            superpower: superpower.into(),
        }
    }
}

/// Name → character table, built once at startup and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct CharacterTable {
    characters: BTreeMap<String, Character>,
}

impl CharacterTable {
    /// Build a table from `(name, character)` pairs. Later duplicates win.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Character)>,
        S: Into<String>,
    {
        Self {
            characters: entries
                .into_iter()
                .map(|(name, character)| (name.into(), character))
                .collect(),
        }
    }

    /// The cast shipped with the server.
    pub fn builtin() -> Self {
        Self::new([
            (
                "Jack",
                Character::new(
                    "Jack is a former spy who now lives as a covert hero.",
                    "Invisibility and telepathy",
                ),
            ),
            (
                "Ram",
                Character::new(
                    "Ram is an ancient warrior reborn in the modern world to fight for peace.",
                    "Invincible body and immense strength",
                ),
            ),
            (
                "Robert",
                Character::new(
                    "Robert is a scientist who became part machine after a lab accident.",
                    "Power fused with advanced technology",
                ),
            ),
        ])
    }

    /// Character names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.characters.keys().map(String::as_str).collect()
    }

    /// Look up a character by exact name.
    pub fn get(&self, name: &str) -> Option<&Character> {
        self.characters.get(name)
    }

    /// Backstory for `name`, if known.
    pub fn backstory(&self, name: &str) -> Option<&str> {
        self.get(name).map(|c| c.backstory.as_str())
    }

    /// Superpower for `name`, if known.
    pub fn superpower(&self, name: &str) -> Option<&str> {
        self.get(name).map(|c| c.superpower.as_str())
    }

    /// Number of characters.
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    /// Whether the table has no characters.
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}
