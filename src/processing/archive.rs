//! ZIP packaging of converted files

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{MonoError, Result};

#[derive(Debug, Clone)]
pub struct ArchiveSummary {
    pub archive_path: PathBuf,
    /// Entry names in archive order.
    pub entries: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Archiver {
    /// Deflate level, `None` for the zip crate's default.
    compression_level: Option<i64>,
}

impl Archiver {
    pub fn new(compression_level: Option<i64>) -> Self {
        Self { compression_level }
    }

    /// Reporting wrapper around [`Archiver::write_archive`]; never returns an error.
    pub fn archive<P: AsRef<Path>>(&self, paths: &[P], archive_path: &Path) -> bool {
        println!("\nCreating ZIP archive: {}", archive_path.display());
        match self.write_archive(paths, archive_path) {
            Ok(summary) => {
                for entry in &summary.entries {
                    println!("  ✓ Added: {}", entry);
                }
                println!("✓ ZIP archive created");
                true
            }
            Err(e) => {
                println!("✗ Failed to create ZIP archive: {}", e);
                false
            }
        }
    }

    /// Writes every path under its base file name. When several paths share
    /// a base name the entry stays at the first position and holds the last
    /// file's content.
    pub fn write_archive<P: AsRef<Path>>(&self, paths: &[P], archive_path: &Path) -> Result<ArchiveSummary> {
        let entries = flatten_entries(paths)?;

        let file = File::create(archive_path)
            .map_err(|e| MonoError::archive(format!("Cannot create {}: {}", archive_path.display(), e)))?;
        let mut zip = ZipWriter::new(BufWriter::new(file));
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(self.compression_level);

        for (name, source) in &entries {
            zip.start_file(name.as_str(), options)?;
            let mut input = File::open(source)
                .map_err(|e| MonoError::archive(format!("Cannot read {}: {}", source.display(), e)))?;
            std::io::copy(&mut input, &mut zip)?;
        }

        let mut writer = zip.finish()?;
        writer.flush()?;

        Ok(ArchiveSummary {
            archive_path: archive_path.to_path_buf(),
            entries: entries.into_iter().map(|(name, _)| name).collect(),
        })
    }
}

fn flatten_entries<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<(String, PathBuf)>> {
    let mut entries: Vec<(String, PathBuf)> = Vec::with_capacity(paths.len());

    for path in paths {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| MonoError::archive(format!("{} has no file name", path.display())))?;

        match entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => {
                log::warn!("Archive entry {} is replaced by {}", name, path.display());
                entry.1 = path.to_path_buf();
            }
            None => entries.push((name, path.to_path_buf())),
        }
    }

    Ok(entries)
}

/// Best-effort removal; failures are ignored.
pub fn cleanup<P: AsRef<Path>>(paths: &[P]) {
    for path in paths {
        let _ = std::fs::remove_file(path);
    }
}

/// Removes `dir` only if it is empty. Failures are ignored.
pub fn cleanup_dir(dir: &Path) {
    let _ = std::fs::remove_dir(dir);
}
