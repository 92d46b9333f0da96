//! Input discovery
//!
//! Expands file and directory arguments into a flat list of absolute paths to
//! supported audio files. A file given directly with an unsupported
//! extension is warned about; unsupported files met while walking a
//! directory are skipped silently.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::audio::is_supported;
use crate::error::Result;

/// Discovery result: the files found and the warnings emitted on the way.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    pub files: Vec<PathBuf>,
    pub warnings: Vec<String>,
}

/// Walks `inputs` in order. Warnings are printed to stdout as they occur.
///
/// The same file reachable through two inputs is listed twice unless
/// `dedupe` is set, in which case only its first occurrence is kept. Files
/// are compared by their canonical path.
pub fn discover<P: AsRef<Path>>(inputs: &[P], dedupe: bool) -> Result<Discovery> {
    let mut discovery = Discovery::default();

    for input in inputs {
        let path = input.as_ref();

        if path.is_file() {
            if is_supported(path) {
                discovery.files.push(std::path::absolute(path)?);
            } else {
                discovery.warn(format!("Warning: {} is not a supported audio format", path.display()));
            }
        } else if path.is_dir() {
            let root = std::path::absolute(path)?;
            for entry in WalkDir::new(&root) {
                let entry = entry?;
                // Follows symlinks, unlike `entry.file_type()`.
                if entry.path().is_file() && is_supported(entry.path()) {
                    discovery.files.push(entry.into_path());
                }
            }
        } else {
            discovery.warn(format!("Warning: {} does not exist", path.display()));
        }
    }

    if dedupe {
        let before = discovery.files.len();
        let mut seen = HashSet::new();
        discovery.files.retain(|p| {
            let key = std::fs::canonicalize(p).unwrap_or_else(|_| p.clone());
            seen.insert(key)
        });
        let dropped = before - discovery.files.len();
        if dropped > 0 {
            log::debug!("Dropped {} duplicate input file(s)", dropped);
        }
    }

    Ok(discovery)
}

impl Discovery {
    fn warn(&mut self, message: String) {
        println!("{}", message);
        self.warnings.push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, b"x").unwrap();
    }

    fn names(files: &[PathBuf]) -> Vec<String> {
        let mut names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_recursive_directory() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(&root.join("a.wav"));
        touch(&root.join("notes.txt"));
        touch(&root.join("sub/b.MP3"));
        touch(&root.join("sub/cover.jpg"));
        touch(&root.join("sub/deeper/still/c.aif"));
        touch(&root.join("sub/deeper/d.aiff"));
        touch(&root.join("sub/deeper/e.flac"));

        let discovery = discover(&[root], false).unwrap();
        assert_eq!(names(&discovery.files), vec!["a.wav", "b.MP3", "c.aif", "d.aiff"]);
        assert!(discovery.files.iter().all(|p| p.is_absolute()));
        assert!(discovery.warnings.is_empty());
    }

    #[test]
    fn test_direct_files_and_warnings() {
        let dir = TempDir::new().unwrap();
        let wav = dir.path().join("keep.wav");
        let txt = dir.path().join("skip.txt");
        touch(&wav);
        touch(&txt);
        let missing = dir.path().join("ghost.wav");

        let discovery = discover(&[wav.clone(), txt, missing], false).unwrap();
        assert_eq!(discovery.files, vec![std::path::absolute(&wav).unwrap()]);
        assert_eq!(discovery.warnings.len(), 2);
        assert!(discovery.warnings[0].contains("not a supported audio format"));
        assert!(discovery.warnings[1].contains("does not exist"));
    }

    #[test]
    fn test_overlapping_inputs() {
        let dir = TempDir::new().unwrap();
        let wav = dir.path().join("twice.wav");
        touch(&wav);
        let inputs = vec![dir.path().to_path_buf(), wav];

        assert_eq!(discover(inputs.as_slice(), false).unwrap().files.len(), 2);
        assert_eq!(discover(inputs.as_slice(), true).unwrap().files.len(), 1);
    }

    #[test]
    fn test_dedupe_resolves_parent_components() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("d");
        let wav = sub.join("a.wav");
        touch(&wav);
        let roundabout = sub.join("..").join("d").join("a.wav");

        let inputs = vec![wav, roundabout];
        assert_eq!(discover(inputs.as_slice(), false).unwrap().files.len(), 2);
        assert_eq!(discover(inputs.as_slice(), true).unwrap().files.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_file_in_directory() {
        let dir = TempDir::new().unwrap();
        let real = dir.path().join("real.wav");
        touch(&real);
        let walked = dir.path().join("walked");
        std::fs::create_dir(&walked).unwrap();
        std::os::unix::fs::symlink(&real, walked.join("link.wav")).unwrap();

        let discovery = discover(&[walked.as_path()], false).unwrap();
        assert_eq!(names(&discovery.files), vec!["link.wav"]);
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("readme.md"));
        let discovery = discover(&[dir.path()], false).unwrap();
        assert!(discovery.files.is_empty());
    }
}
