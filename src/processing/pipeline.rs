//! Batch conversion pipeline

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::audio::{output_path_for, AudioConverter};
use crate::error::{MonoError, Result};
use crate::processing::discovery::discover;
use crate::processing::progress::ProgressBar;

/// Outcome of converting one discovered file.
#[derive(Debug, Clone)]
pub enum ConversionResult {
    Success { input: PathBuf, output: PathBuf },
    Failure { input: PathBuf, cause: MonoError },
}

/// Where converted files went and which inputs failed, both in processing order.
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    pub converted: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
    pub results: Vec<ConversionResult>,
    /// `None` when nothing was discovered and no directory was touched.
    pub output_dir: Option<PathBuf>,
    /// Whether `output_dir` was created as a fresh temporary directory.
    pub temporary_dir: bool,
    pub elapsed: Duration,
}

impl BatchResult {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct BatchPipeline {
    output_dir: Option<PathBuf>,
    dedupe: bool,
}

impl BatchPipeline {
    pub fn new(output_dir: Option<PathBuf>, dedupe: bool) -> Self {
        Self { output_dir, dedupe }
    }

    pub fn run<P: AsRef<Path>>(&self, inputs: &[P]) -> Result<BatchResult> {
        let files = discover(inputs, self.dedupe)?.files;

        if files.is_empty() {
            println!("No supported audio files found!");
            return Ok(BatchResult::default());
        }

        println!("\nAudio files found: {}", files.len());
        for file in &files {
            log::debug!("  - {}", display_name(file));
        }

        let (output_dir, temporary_dir) = self.resolve_output_dir()?;
        log::debug!("Output directory: {}", output_dir.display());

        println!("\nStarting conversion...");
        let progress = ProgressBar::new(files.len());
        let mut batch = BatchResult {
            output_dir: Some(output_dir.clone()),
            temporary_dir,
            ..Default::default()
        };

        for (i, input) in files.into_iter().enumerate() {
            progress.update(i, &display_name(&input));

            let output = output_path_for(&input, &output_dir);
            log::debug!("Converting: {}", display_name(&input));

            match AudioConverter::convert(&input, &output) {
                Ok(summary) => {
                    log::debug!(
                        "  ✓ {} ({} ch, {} Hz, {:.2}s)",
                        display_name(&summary.output_path),
                        summary.input_channels,
                        summary.sample_rate,
                        summary.processing_time.as_secs_f64()
                    );
                    batch.converted.push(output.clone());
                    batch.results.push(ConversionResult::Success { input, output });
                }
                Err(cause) => {
                    log::debug!("  ✗ Conversion failed: {}", cause);
                    batch.failed.push(input.clone());
                    batch.results.push(ConversionResult::Failure { input, cause });
                }
            }
        }

        batch.elapsed = progress.finish();
        Ok(batch)
    }

    fn resolve_output_dir(&self) -> Result<(PathBuf, bool)> {
        match &self.output_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir).map_err(|e| {
                    MonoError::io(format!("Cannot create output directory {}: {}", dir.display(), e))
                })?;
                Ok((dir.clone(), false))
            }
            None => {
                let dir = tempfile::Builder::new()
                    .prefix("mono_converted_")
                    .tempdir()?
                    .keep();
                Ok((dir, true))
            }
        }
    }
}

pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
