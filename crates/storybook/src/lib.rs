//! Storybook — character lookup and markdown story storage.
//!
//! The library behind the storybook MCP server's tools. It knows nothing
//! about the protocol: callers get plain Rust values and [`StoryError`]s.

pub mod characters;
pub mod error;
pub mod library;

pub use characters::{Character, CharacterTable};
pub use error::{StoryError, StoryResult};
pub use library::{render_story, sanitize_filename, StoryLibrary, STORY_EXTENSION};
