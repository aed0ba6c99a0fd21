use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::core::error::BrowseError;
use crate::core::image_format::ImageFormat;

/// Ordered, immutable list of files to page through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileList(Vec<PathBuf>);

impl FileList {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self(paths)
    }

    pub fn as_slice(&self) -> &[PathBuf] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.0.iter()
    }
}

/// How a directory is turned into a [`FileList`].
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Wildcard matched against each file name. `None` matches everything.
    pub pattern: Option<String>,
    /// Keep only files with a recognised image extension.
    pub filter_to_images: bool,
    /// Shuffle the sorted listing with this seed.
    pub shuffle_seed: Option<u64>,
}

/// Compiled `--glob_str` pattern.
///
/// Like shell globbing, a leading `*` or `?` does not match a leading dot:
/// hidden files are only listed when the pattern itself starts with `.`.
struct NameFilter {
    matcher: GlobMatcher,
    match_hidden: bool,
}

impl NameFilter {
    fn new(pattern: &str) -> Result<Self, BrowseError> {
        let matcher = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map(|glob| glob.compile_matcher())
            .map_err(|source| BrowseError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(Self {
            matcher,
            match_hidden: pattern.starts_with('.'),
        })
    }

    fn is_match(&self, name: &OsStr) -> bool {
        if !self.match_hidden && name.as_encoded_bytes().starts_with(b".") {
            return false;
        }
        self.matcher.is_match(name)
    }
}

pub struct FileManager;

impl FileManager {
    /// List the files at `path`.
    ///
    /// A single file yields a one-element list; the pattern is ignored for it.
    /// A directory yields its regular files in sorted order, filtered by the
    /// pattern and optionally by extension, then shuffled if a seed is set.
    pub fn list(path: &Path, options: &ListOptions) -> Result<FileList, BrowseError> {
        let metadata = fs::metadata(path).map_err(|e| BrowseError::io(path, e))?;

        if metadata.is_file() {
            if let Some(pattern) = &options.pattern {
                tracing::warn!(
                    pattern = %pattern,
                    path = %path.display(),
                    "glob pattern ignored for a single file"
                );
            }
            return Ok(FileList::new(vec![path.to_path_buf()]));
        }

        let filter = options.pattern.as_deref().map(NameFilter::new).transpose()?;

        let mut paths = Self::scan_directory(path, filter.as_ref(), options.filter_to_images)?;

        if let Some(seed) = options.shuffle_seed {
            Self::shuffle(&mut paths, seed);
        }

        tracing::info!(
            path = %path.display(),
            count = paths.len(),
            "listed files"
        );
        Ok(FileList::new(paths))
    }

    fn scan_directory(
        dir: &Path,
        filter: Option<&NameFilter>,
        filter_to_images: bool,
    ) -> Result<Vec<PathBuf>, BrowseError> {
        let mut paths: Vec<PathBuf> = fs::read_dir(dir)
            .map_err(|e| BrowseError::io(dir, e))?
            .filter_map(|entry| entry.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file())
            .filter(|p| match filter {
                Some(f) => p.file_name().is_some_and(|name| f.is_match(name)),
                None => true,
            })
            .filter(|p| !filter_to_images || ImageFormat::is_supported(p))
            .collect();

        paths.sort();
        Ok(paths)
    }

    /// Permute `paths` reproducibly: the same seed gives the same order.
    pub fn shuffle(paths: &mut [PathBuf], seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        paths.shuffle(&mut rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn dir_with(names: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in names {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        dir
    }

    fn names(list: &FileList) -> Vec<String> {
        list.iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_filter_to_images() {
        let dir = dir_with(&["a.dcm", "b.png", "c.txt", "d.jpg"]);
        let options = ListOptions {
            filter_to_images: true,
            ..Default::default()
        };

        let list = FileManager::list(dir.path(), &options).unwrap();
        assert_eq!(names(&list), vec!["a.dcm", "b.png", "d.jpg"]);
    }

    #[test]
    fn test_unfiltered_keeps_everything() {
        let dir = dir_with(&["a.dcm", "c.txt"]);
        let list = FileManager::list(dir.path(), &ListOptions::default()).unwrap();
        assert_eq!(names(&list), vec!["a.dcm", "c.txt"]);
    }

    #[test]
    fn test_pattern_matches_file_names() {
        let dir = dir_with(&["p1_AP.dcm", "p2_PA.dcm", "p3_LAT.dcm", "p4_AP.png"]);
        let options = ListOptions {
            pattern: Some("*_[AP][AP].dcm".to_string()),
            ..Default::default()
        };

        let list = FileManager::list(dir.path(), &options).unwrap();
        assert_eq!(names(&list), vec!["p1_AP.dcm", "p2_PA.dcm"]);
    }

    #[test]
    fn test_pattern_skips_hidden_files() {
        let dir = dir_with(&[".hidden_AP.dcm", "p1_AP.dcm", ".DS_Store"]);
        let with = |pattern: &str| ListOptions {
            pattern: Some(pattern.to_string()),
            ..Default::default()
        };

        let list = FileManager::list(dir.path(), &with("*_AP.dcm")).unwrap();
        assert_eq!(names(&list), vec!["p1_AP.dcm"]);

        let list = FileManager::list(dir.path(), &with("*")).unwrap();
        assert_eq!(names(&list), vec!["p1_AP.dcm"]);

        let list = FileManager::list(dir.path(), &with(".*")).unwrap();
        assert_eq!(names(&list), vec![".DS_Store", ".hidden_AP.dcm"]);
    }

    #[test]
    fn test_no_pattern_keeps_hidden_files() {
        let dir = dir_with(&[".hidden.png", "a.png"]);
        let list = FileManager::list(dir.path(), &ListOptions::default()).unwrap();
        assert_eq!(names(&list), vec![".hidden.png", "a.png"]);
    }

    #[test]
    fn test_subdirectories_are_skipped() {
        let dir = dir_with(&["a.png"]);
        fs::create_dir(dir.path().join("nested.png")).unwrap();

        let list = FileManager::list(dir.path(), &ListOptions::default()).unwrap();
        assert_eq!(names(&list), vec!["a.png"]);
    }

    #[test]
    fn test_single_file_ignores_pattern() {
        let dir = dir_with(&["only.txt"]);
        let file = dir.path().join("only.txt");
        let options = ListOptions {
            pattern: Some("*.dcm".to_string()),
            filter_to_images: true,
            shuffle_seed: Some(3),
        };

        let list = FileManager::list(&file, &options).unwrap();
        assert_eq!(list.as_slice(), &[file]);
    }

    #[test]
    fn test_missing_path_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = FileManager::list(&dir.path().join("missing"), &ListOptions::default())
            .unwrap_err();
        assert!(matches!(err, BrowseError::NotFound { .. }));
    }

    #[test]
    fn test_invalid_pattern() {
        let dir = dir_with(&["a.png"]);
        let options = ListOptions {
            pattern: Some("[unclosed".to_string()),
            ..Default::default()
        };
        let err = FileManager::list(dir.path(), &options).unwrap_err();
        assert!(matches!(err, BrowseError::InvalidPattern { .. }));
    }

    #[test]
    fn test_shuffle_is_seeded_permutation() {
        let files: Vec<String> = (0..20).map(|i| format!("img{i:02}.png")).collect();
        let refs: Vec<&str> = files.iter().map(String::as_str).collect();
        let dir = dir_with(&refs);

        let sorted = FileManager::list(dir.path(), &ListOptions::default()).unwrap();
        let options = ListOptions {
            shuffle_seed: Some(11),
            ..Default::default()
        };
        let first = FileManager::list(dir.path(), &options).unwrap();
        let second = FileManager::list(dir.path(), &options).unwrap();

        assert_eq!(first, second);
        assert_ne!(first, sorted);

        let mut restored = first.as_slice().to_vec();
        restored.sort();
        assert_eq!(restored, sorted.as_slice());
    }
}
