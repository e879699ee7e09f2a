use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use spdlog::debug;
use walkdir::{DirEntry, WalkDir};

use crate::error::IndexError;
use crate::post::{normalize_relative_path, Post};

/// Where the wiki pages come from.
/// Paths are relative to the source root and use forward slashes.
pub trait ContentSource {
    fn list_markdown_files(&self) -> io::Result<Vec<String>>;

    /// Text of the file, or None if it cannot be read or is not valid UTF-8
    fn read_text(&self, relative_path: &str) -> Option<String>;
}

/// Markdown extension check, case-insensitive (`page.MD` counts)
pub fn is_markdown_file(file_name: &str) -> bool {
    let bytes = file_name.as_bytes();
    bytes.len() > 3 && bytes[bytes.len() - 3..].eq_ignore_ascii_case(b".md")
}

pub struct DirSource {
    pub root_dir: PathBuf,
    pub skip_hidden: bool,
}

impl DirSource {
    pub fn open(root_dir: &Path, skip_hidden: bool) -> Result<DirSource, IndexError> {
        if !root_dir.is_dir() {
            return Err(IndexError::MissingRoot(root_dir.to_path_buf()));
        }

        Ok(DirSource {
            root_dir: root_dir.to_path_buf(),
            skip_hidden,
        })
    }

    fn is_hidden_dir(entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry.file_name().to_str().map_or(false, |name| name.starts_with('.'))
    }
}

impl ContentSource for DirSource {
    fn list_markdown_files(&self) -> io::Result<Vec<String>> {
        let skip_hidden = self.skip_hidden;
        let walker = WalkDir::new(&self.root_dir)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !(skip_hidden && Self::is_hidden_dir(entry)));

        let mut files = vec![];
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(e.into()),
                Err(e) => {
                    debug!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            // Symlinked files are fine, symlinked directories are not walked
            let is_file = entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file());
            if !is_file {
                continue;
            }
            let Some(file_name) = entry.file_name().to_str() else {
                debug!("Skipping non UTF-8 file name: {}", entry.path().display());
                continue;
            };
            if !is_markdown_file(file_name) {
                continue;
            }

            match normalize_relative_path(&self.root_dir, entry.path()) {
                Some(relative_path) => files.push(relative_path),
                None => debug!("Skipping file with non UTF-8 path: {}", entry.path().display()),
            }
        }

        Ok(files)
    }

    fn read_text(&self, relative_path: &str) -> Option<String> {
        let path = self.root_dir.join(relative_path);
        let raw = match fs::read(&path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!("Could not read {}: {}", path.display(), e);
                return None;
            }
        };

        match String::from_utf8(raw) {
            Ok(text) => Some(text),
            Err(_) => {
                debug!("Not valid UTF-8, ignoring: {}", path.display());
                None
            }
        }
    }
}

/// In-memory source, keyed by relative path
#[derive(Default)]
pub struct MemorySource {
    pub files: BTreeMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> MemorySource {
        Default::default()
    }

    pub fn with_file(mut self, relative_path: &str, content: impl Into<Vec<u8>>) -> MemorySource {
        self.files.insert(relative_path.to_string(), content.into());
        self
    }
}

impl ContentSource for MemorySource {
    fn list_markdown_files(&self) -> io::Result<Vec<String>> {
        let files = self.files.keys()
            .filter(|path| {
                let file_name = path.rsplit('/').next().unwrap_or("");
                is_markdown_file(file_name)
            })
            .cloned()
            .collect();
        Ok(files)
    }

    fn read_text(&self, relative_path: &str) -> Option<String> {
        let raw = self.files.get(relative_path)?;
        String::from_utf8(raw.clone()).ok()
    }
}

/// Newest first; same day ordered by path, descending
pub fn sort_posts(posts: &mut [Post]) {
    posts.sort_by(|a, b| {
        b.date.cmp(&a.date)
            .then_with(|| b.relative_path.cmp(&a.relative_path))
    });
}

pub fn collect<S: ContentSource + ?Sized>(source: &S) -> io::Result<Vec<Post>> {
    let mut posts = vec![];

    for relative_path in source.list_markdown_files()? {
        let Some(content) = source.read_text(&relative_path) else {
            continue;
        };
        match Post::from_string(&content, &relative_path) {
            Some(post) => {
                debug!("Post found: {}", post);
                posts.push(post);
            }
            None => debug!("Not a post: {}", relative_path),
        }
    }

    sort_posts(&mut posts);
    Ok(posts)
}

pub fn collect_posts(root_dir: &Path, skip_hidden: bool) -> Result<Vec<Post>, IndexError> {
    let source = DirSource::open(root_dir, skip_hidden)?;
    collect(&source).map_err(|e| IndexError::io(root_dir, e))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tempfile::TempDir;

    use crate::test_data::{NOT_A_POST, POST_DATA, POST_WITH_BLANKS};

    use super::*;

    fn dates(posts: &[Post]) -> Vec<String> {
        posts.iter().map(|p| p.date.format("%Y-%m-%d").to_string()).collect()
    }

    fn write(root: &Path, relative_path: &str, content: &[u8]) {
        let path = root.join(relative_path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_is_markdown_file() {
        assert!(is_markdown_file("a.md"));
        assert!(is_markdown_file("README.MD"));
        assert!(is_markdown_file("notes.Md"));
        assert!(!is_markdown_file(".md"));
        assert!(!is_markdown_file("a.markdown"));
        assert!(!is_markdown_file("a.md.bak"));
        assert!(!is_markdown_file("émd"));
    }

    #[test]
    fn test_sorting() {
        let source = MemorySource::new()
            .with_file("b/first.md", "# First\n**2024-01-01**\n")
            .with_file("a.md", "# Summer\n**2024-06-01**\n")
            .with_file("z/old.md", "# Eve\n**2023-12-31**\n");

        let posts = collect(&source).unwrap();
        assert_eq!(dates(&posts), ["2024-06-01", "2024-01-01", "2023-12-31"]);
    }

    #[test]
    fn test_same_date_ordered_by_path_desc() {
        let source = MemorySource::new()
            .with_file("alpha.md", "# A\n**2022-05-05**")
            .with_file("zeta.md", "# Z\n**2022-05-05**")
            .with_file("mid/README.md", "# M\n**2022-05-05**");

        let posts = collect(&source).unwrap();
        let paths: Vec<_> = posts.iter().map(|p| p.relative_path.as_str()).collect();
        assert_eq!(paths, ["zeta.md", "mid/README.md", "alpha.md"]);
    }

    #[test]
    fn test_non_posts_are_skipped() {
        let source = MemorySource::new()
            .with_file("post.md", POST_DATA)
            .with_file("places.md", NOT_A_POST)
            .with_file("notes.txt", POST_DATA)
            .with_file("binary.md", vec![b'#', b' ', 0xff, 0xfe, b'\n'])
            .with_file("blanks.MD", POST_WITH_BLANKS);

        let posts = collect(&source).unwrap();
        let paths: Vec<_> = posts.iter().map(|p| p.relative_path.as_str()).collect();
        assert_eq!(paths, ["post.md", "blanks.MD"]);
    }

    #[test]
    fn test_empty_source() {
        let posts = collect(&MemorySource::new()).unwrap();
        assert!(posts.is_empty());
    }

    #[test]
    fn test_missing_root() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("wiki");
        match collect_posts(&missing, true) {
            Err(IndexError::MissingRoot(root)) => assert_eq!(root, missing),
            other => panic!("unexpected result: {:?}", other),
        }

        // a file is not a root either
        write(tmp.path(), "file.md", b"x");
        assert!(matches!(collect_posts(&tmp.path().join("file.md"), true), Err(IndexError::MissingRoot(_))));
    }

    #[test]
    fn test_dir_source() -> io::Result<()> {
        let tmp = TempDir::new()?;
        let root = tmp.path();
        write(root, "README.md", b"# Home\n**2021-03-04**\n");
        write(root, "self/travel.md", POST_DATA.as_bytes());
        write(root, "self/places/README.md", NOT_A_POST.as_bytes());
        write(root, "self/latin1.md", b"# Caf\xe9\n**2024-01-01**\n");
        write(root, ".git/notes.md", b"# Hidden\n**2024-01-01**\n");
        write(root, "image.png", b"\x89PNG");

        let source = DirSource::open(root, true).unwrap();
        let files = source.list_markdown_files()?;
        assert_eq!(files, ["README.md", "self/latin1.md", "self/places/README.md", "self/travel.md"]);

        let posts = collect(&source)?;
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].relative_path, "self/travel.md");
        assert_eq!(posts[1].relative_path, "README.md");
        assert_eq!(posts[1].date, NaiveDate::from_ymd_opt(2021, 3, 4).unwrap());

        let source = DirSource::open(root, false).unwrap();
        let posts = collect(&source)?;
        assert_eq!(posts.len(), 3);
        assert_eq!(posts[1].relative_path, ".git/notes.md");

        Ok(())
    }

    #[test]
    fn test_dot_directories_scanned_by_default() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), ".drafts/p.md", b"# T\n**2024-01-01**\n");

        let skip_hidden = crate::config::Paths::default().skip_hidden;
        let posts = collect_posts(tmp.path(), skip_hidden).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].relative_path, ".drafts/p.md");
    }

    #[test]
    fn test_empty_dir() {
        let tmp = TempDir::new().unwrap();
        let posts = collect_posts(tmp.path(), true).unwrap();
        assert!(posts.is_empty());
    }
}
