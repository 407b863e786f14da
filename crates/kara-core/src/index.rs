//! Directory indexer — builds the per-category file indexes at startup.
//!
//! The library root contains one subdirectory per category, each populated
//! with symlinks or real files. Every category is walked once, depth-first
//! in lexical order, and the result is immutable for the rest of the
//! process lifetime. Files added later are invisible until restart.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use unicode_width::UnicodeWidthStr;

use crate::error::KaraError;

/// A classification axis of the pre-organized library tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    ArtistFirst,
    ArtistLast,
    Decade,
    Genre,
    Mood,
    Title,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::ArtistFirst,
        Category::ArtistLast,
        Category::Decade,
        Category::Genre,
        Category::Mood,
        Category::Title,
    ];

    /// Subdirectory name under the library root.
    pub fn dir_name(self) -> &'static str {
        match self {
            Category::ArtistFirst => "by-artist-first",
            Category::ArtistLast => "by-artist-last",
            Category::Decade => "by-decade",
            Category::Genre => "by-genre",
            Category::Mood => "by-mood",
            Category::Title => "by-title",
        }
    }

    /// Grouped categories are organized by a meaningful label (genre name,
    /// decade, mood) rather than a single-letter initial; the label is shown
    /// next to each title when browsing.
    pub fn is_grouped(self) -> bool {
        matches!(self, Category::Decade | Category::Genre | Category::Mood)
    }
}

/// One indexed file: the directory that contains it, the raw file name,
/// and (for grouped categories) the grouping subdirectory it sits under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub dir: PathBuf,
    pub file_name: String,
    pub group: Option<String>,
}

impl IndexEntry {
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    /// File name without its extension — the name shown to the user and
    /// recorded in the session history.
    pub fn display_name(&self) -> String {
        Path::new(&self.file_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file_name.clone())
    }
}

/// The ordered index of a single category.
#[derive(Debug, Clone, Default)]
pub struct CategoryIndex {
    pub entries: Vec<IndexEntry>,
    /// Maximum display width of any group label (0 for flat categories).
    /// Used to align the "label: title" column when browsing.
    pub group_width: usize,
}

/// All category indexes, built once from the library root.
#[derive(Debug)]
pub struct Library {
    root: PathBuf,
    indexes: HashMap<Category, CategoryIndex>,
}

impl Library {
    /// Walk every category subdirectory. A missing category directory is
    /// fatal: the tree is an external contract and a partial index would
    /// silently hide files.
    pub fn build(root: &Path) -> Result<Self, KaraError> {
        let mut indexes = HashMap::new();
        for category in Category::ALL {
            let dir = root.join(category.dir_name());
            if !dir.is_dir() {
                return Err(KaraError::MissingCategoryDir(dir));
            }

            let mut entries = Vec::new();
            walk(&dir, None, category.is_grouped(), &mut entries)?;

            let group_width = entries
                .iter()
                .filter_map(|e| e.group.as_deref())
                .map(UnicodeWidthStr::width)
                .max()
                .unwrap_or(0);

            indexes.insert(
                category,
                CategoryIndex {
                    entries,
                    group_width,
                },
            );
        }
        Ok(Self {
            root: root.to_path_buf(),
            indexes,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn category(&self, category: Category) -> &CategoryIndex {
        // Every category is inserted in build(); the map is total.
        &self.indexes[&category]
    }

    /// The by-title index — the universal search space and the pool for
    /// random picks.
    pub fn titles(&self) -> &CategoryIndex {
        self.category(Category::Title)
    }

    /// Uniformly random entry from the by-title index.
    pub fn random_title(&self) -> Option<&IndexEntry> {
        self.titles().entries.choose(&mut rand::thread_rng())
    }
}

/// Depth-first walk in lexical order. Directory and file names sort
/// together in one sequence; names starting with a dot are skipped.
fn walk(
    dir: &Path,
    group: Option<&str>,
    grouped: bool,
    out: &mut Vec<IndexEntry>,
) -> Result<(), KaraError> {
    let read = std::fs::read_dir(dir).map_err(|source| KaraError::Walk {
        dir: dir.to_path_buf(),
        source,
    })?;

    let mut names: Vec<String> = read
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| !name.starts_with('.'))
        .collect();
    names.sort();

    for name in names {
        let path = dir.join(&name);
        if path.is_dir() {
            // The first level of subdirectory under a grouped category is
            // the group label; deeper levels inherit it.
            let next_group = if grouped && group.is_none() {
                Some(name.as_str())
            } else {
                group
            };
            walk(&path, next_group, grouped, out)?;
        } else {
            out.push(IndexEntry {
                dir: dir.to_path_buf(),
                file_name: name,
                group: group.map(str::to_owned),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::write(path, b"").unwrap();
    }

    /// Minimal valid library tree with a few files per category.
    fn fixture() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        for category in Category::ALL {
            fs::create_dir_all(root.join(category.dir_name())).unwrap();
        }

        let title = root.join("by-title");
        fs::create_dir_all(title.join("T")).unwrap();
        touch(&title.join("T").join("T - Artist.mp4"));
        fs::create_dir_all(title.join("A")).unwrap();
        touch(&title.join("A").join("Always - Somebody.mp4"));
        touch(&title.join("A").join(".hidden.mp4"));

        let genre = root.join("by-genre");
        fs::create_dir_all(genre.join("rock")).unwrap();
        touch(&genre.join("rock").join("T - Artist.mp4"));
        fs::create_dir_all(genre.join("singer-songwriter")).unwrap();
        touch(&genre.join("singer-songwriter").join("Always - Somebody.mp4"));

        tmp
    }

    #[test]
    fn entries_exist_and_dotfiles_excluded() {
        let tmp = fixture();
        let library = Library::build(tmp.path()).unwrap();

        let titles = library.titles();
        assert_eq!(titles.entries.len(), 2);
        for entry in &titles.entries {
            assert!(entry.path().is_file());
            assert!(!entry.file_name.starts_with('.'));
        }
    }

    #[test]
    fn lexical_order() {
        let tmp = fixture();
        let library = Library::build(tmp.path()).unwrap();
        let names: Vec<&str> = library
            .titles()
            .entries
            .iter()
            .map(|e| e.file_name.as_str())
            .collect();
        assert_eq!(names, vec!["Always - Somebody.mp4", "T - Artist.mp4"]);
    }

    #[test]
    fn rebuild_is_idempotent() {
        let tmp = fixture();
        let first = Library::build(tmp.path()).unwrap();
        let second = Library::build(tmp.path()).unwrap();
        for category in Category::ALL {
            assert_eq!(
                first.category(category).entries,
                second.category(category).entries
            );
        }
    }

    #[test]
    fn missing_category_dir_is_fatal() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("by-title")).unwrap();
        let err = Library::build(tmp.path()).unwrap_err();
        assert!(matches!(err, KaraError::MissingCategoryDir(_)));
    }

    #[test]
    fn grouped_categories_carry_labels_and_width() {
        let tmp = fixture();
        let library = Library::build(tmp.path()).unwrap();

        let genre = library.category(Category::Genre);
        let groups: Vec<&str> = genre
            .entries
            .iter()
            .map(|e| e.group.as_deref().unwrap())
            .collect();
        assert_eq!(groups, vec!["rock", "singer-songwriter"]);
        assert_eq!(genre.group_width, "singer-songwriter".len());

        // Single-letter initial dirs are not group labels.
        let titles = library.titles();
        assert!(titles.entries.iter().all(|e| e.group.is_none()));
        assert_eq!(titles.group_width, 0);
    }

    #[test]
    fn display_name_strips_extension() {
        let entry = IndexEntry {
            dir: PathBuf::from("/x"),
            file_name: "T - Artist.mp4".to_string(),
            group: None,
        };
        assert_eq!(entry.display_name(), "T - Artist");
    }

    #[test]
    fn random_title_comes_from_index() {
        let tmp = fixture();
        let library = Library::build(tmp.path()).unwrap();
        let picked = library.random_title().unwrap();
        assert!(library.titles().entries.contains(picked));
    }
}
