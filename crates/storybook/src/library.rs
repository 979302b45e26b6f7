//! Markdown story storage rooted at a single directory.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::{StoryError, StoryResult};

/// File extension given to every saved story.
pub const STORY_EXTENSION: &str = "md";

/// Maximum number of `_`-separated words kept from a title.
const MAX_FILENAME_WORDS: usize = 4;

/// Maximum length of the filename stem, in characters.
const MAX_FILENAME_CHARS: usize = 30;

/// `strftime` pattern for the "Date Created" line, e.g. `March 07, 2025`.
const DATE_FORMAT: &str = "%B %d, %Y";

/// Derive a story filename from its title.
///
/// The title is lower-cased, each whitespace run becomes `_`, only the
/// first four words are kept, the stem is cut to 30 characters and the
/// `.md` extension is appended.
pub fn sanitize_filename(title: &str) -> String {
    let mut collapsed = String::with_capacity(title.len());
    let mut in_whitespace = false;
    for ch in title.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                collapsed.push('_');
            }
            in_whitespace = true;
        } else {
            collapsed.extend(ch.to_lowercase());
            in_whitespace = false;
        }
    }

    let mut words: Vec<&str> = collapsed.split('_').collect();
    // Trailing separators do not count as words.
    while words.len() > 1 && words.last() == Some(&"") {
        words.pop();
    }

    let stem = if words.len() > MAX_FILENAME_WORDS {
        words[..MAX_FILENAME_WORDS].join("_")
    } else {
        collapsed.clone()
    };
    let stem: String = stem.chars().take(MAX_FILENAME_CHARS).collect();

    format!("{stem}.{STORY_EXTENSION}")
}

/// Render the markdown body written for a story.
pub fn render_story(title: &str, date_created: &str, content: &str) -> String {
    format!("# {title}\n\n**Date Created:** {date_created}\n\n{content}")
}

/// A directory of markdown stories.
#[derive(Debug, Clone)]
pub struct StoryLibrary {
    root: PathBuf,
}

impl StoryLibrary {
    /// Open (creating if needed) the story directory at `root`.
    pub fn open(root: impl AsRef<Path>) -> StoryResult<Self> {
        let root = root.as_ref();
        fs::create_dir_all(root).map_err(|e| StoryError::io(root, e))?;
        let root = root.canonicalize().map_err(|e| StoryError::io(root, e))?;
        log::debug!("Story library opened at {}", root.display());
        Ok(Self { root })
    }

    /// Absolute path of the library directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Save a story under a filename derived from `title`.
    ///
    /// Returns the absolute path of the written file. An existing story
    /// with the same derived filename is overwritten.
    pub fn save(&self, title: &str, content: &str) -> StoryResult<PathBuf> {
        if title.trim().is_empty() {
            return Err(StoryError::EmptyTitle);
        }

        let filename = sanitize_filename(title);
        let path = self.resolve(&filename)?;
        let date_created = Local::now().format(DATE_FORMAT).to_string();

        fs::write(&path, render_story(title, &date_created, content))
            .map_err(|e| StoryError::io(&path, e))?;

        log::info!("Saved story '{title}' to {}", path.display());
        Ok(path)
    }

    /// Read a story by filename.
    ///
    /// `filename` is either a bare name or a path directly inside the
    /// library directory (as returned by [`StoryLibrary::save`]).
    pub fn read(&self, filename: &str) -> StoryResult<String> {
        let path = self.resolve(filename)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoryError::NotFound(filename.to_string()))
            }
            Err(e) => Err(StoryError::io(path, e)),
        }
    }

    /// Sorted names of every story file in the library.
    pub fn list(&self) -> StoryResult<Vec<String>> {
        let entries = fs::read_dir(&self.root).map_err(|e| StoryError::io(&self.root, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoryError::io(&self.root, e))?;
            let path = entry.path();
            let is_story = path.is_file()
                && path.extension().and_then(|ext| ext.to_str()) == Some(STORY_EXTENSION);
            if is_story {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    names.push(name.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }

    fn resolve(&self, filename: &str) -> StoryResult<PathBuf> {
        let invalid = || StoryError::InvalidFilename(filename.to_string());
        let path = Path::new(filename);
        let name = path.file_name().ok_or_else(invalid)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && parent != self.root {
                return Err(invalid());
            }
        }

        Ok(self.root.join(name))
    }
}
