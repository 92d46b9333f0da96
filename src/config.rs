//! Configuration management for batch conversion

use crate::error::{MonoError, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_ARCHIVE: &str = "mono_converted.zip";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub verbose: bool,
    pub archive: ArchiveConfig,
    pub conversion: ConversionConfig,
    #[serde(skip)]
    pub input_paths: Vec<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    pub path: PathBuf,
    pub keep_temp: bool,
    pub compression_level: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    pub output_dir: Option<PathBuf>,
    pub dedupe: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbose: false,
            archive: ArchiveConfig::default(),
            conversion: ConversionConfig::default(),
            input_paths: Vec::new(),
        }
    }
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_ARCHIVE),
            keep_temp: false,
            compression_level: None,
        }
    }
}

impl Config {
    /// Get archive path (convenience method)
    pub fn archive_path(&self) -> &Path {
        &self.archive.path
    }

    pub fn keep_temp(&self) -> bool {
        self.archive.keep_temp
    }

    pub fn output_dir(&self) -> Option<&PathBuf> {
        self.conversion.output_dir.as_ref()
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}

#[derive(Debug, Clone, Parser)]
#[command(
    name = "stereo2mono",
    about = "Converts audio files from stereo to mono and packs them into a ZIP archive",
    version,
    after_help = "Examples:\n  stereo2mono file1.wav file2.mp3\n  stereo2mono /path/to/audio/folder/\n  stereo2mono *.wav -o converted.zip"
)]
pub struct Args {
    #[arg(value_name = "INPUT", required = true, help = "Audio files or folders containing audio files")]
    pub inputs: Vec<PathBuf>,

    #[arg(short = 'o', long = "output", help = "Output ZIP file [default: mono_converted.zip]")]
    pub output: Option<PathBuf>,

    #[arg(long = "keep-temp", help = "Keep converted files after the ZIP is created")]
    pub keep_temp: bool,

    #[arg(short = 'v', long = "verbose", help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(short = 'd', long = "output-dir", help = "Directory for converted files (default: new temp directory)")]
    pub output_dir: Option<PathBuf>,

    #[arg(long = "dedupe", help = "Convert a file only once even if several inputs reach it")]
    pub dedupe: bool,

    #[arg(short = 'c', long = "config", help = "Config file path (TOML format)")]
    pub config_file: Option<PathBuf>,
}

impl Config {
    /// Create config from command line arguments and config file
    pub fn from_args_and_config(args: Args) -> Result<Self> {
        let mut config = if let Some(config_path) = &args.config_file {
            Self::from_file(config_path)?
        } else {
            Self::default()
        };

        // Command line arguments override config file settings
        config.input_paths = args.inputs;
        if let Some(output) = args.output {
            config.archive.path = output;
        }
        if let Some(output_dir) = args.output_dir {
            config.conversion.output_dir = Some(output_dir);
        }
        config.archive.keep_temp |= args.keep_temp;
        config.conversion.dedupe |= args.dedupe;
        config.verbose |= args.verbose;

        config.validate()?;

        Ok(config)
    }

    /// Load config from TOML config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| MonoError::config(format!("Failed to read config file: {}", e)))?;

        Ok(toml::from_str(&content)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.input_paths.is_empty() {
            return Err(MonoError::config("At least one input path is required"));
        }

        if self.archive.path.as_os_str().is_empty() {
            return Err(MonoError::config("Archive path cannot be empty"));
        }
        if self.archive.path.is_dir() {
            return Err(MonoError::config(format!(
                "Archive path {} is a directory", self.archive.path.display()
            )));
        }

        if let Some(level) = self.archive.compression_level {
            if !(0..=9).contains(&level) {
                return Err(MonoError::config("Compression level must be in range 0..=9"));
            }
        }

        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;

        std::fs::write(path, content)
            .map_err(|e| MonoError::config(format!("Failed to write config file: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["stereo2mono"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.archive_path(), Path::new("mono_converted.zip"));
        assert!(!config.keep_temp());
        assert!(!config.verbose());
        assert!(config.output_dir().is_none());
        assert!(!config.conversion.dedupe);
    }

    #[test]
    fn test_args_parsing() {
        let a = args(&["a.wav", "dir", "-o", "x.zip", "--keep-temp", "-v"]);
        assert_eq!(a.inputs, vec![PathBuf::from("a.wav"), PathBuf::from("dir")]);
        assert_eq!(a.output, Some(PathBuf::from("x.zip")));
        assert!(a.keep_temp);
        assert!(a.verbose);

        assert!(Args::try_parse_from(["stereo2mono"]).is_err());
    }

    #[test]
    fn test_from_args() {
        let config = Config::from_args_and_config(args(&["song.mp3", "--dedupe"])).unwrap();
        assert_eq!(config.input_paths, vec![PathBuf::from("song.mp3")]);
        assert_eq!(config.archive_path(), Path::new(DEFAULT_ARCHIVE));
        assert!(config.conversion.dedupe);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_err());

        config.input_paths = vec![PathBuf::from("a.wav")];
        assert!(config.validate().is_ok());

        config.archive.compression_level = Some(12);
        assert!(config.validate().is_err());
        config.archive.compression_level = Some(6);
        assert!(config.validate().is_ok());

        config.archive.path = PathBuf::new();
        assert!(config.validate().is_err());

        let dir = TempDir::new().unwrap();
        config.archive.path = dir.path().to_path_buf();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_file_operations() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.archive.keep_temp = true;
        config.archive.compression_level = Some(3);
        config.conversion.output_dir = Some(PathBuf::from("converted"));

        config.save_to_file(&config_path).unwrap();
        let loaded = Config::from_file(&config_path).unwrap();
        assert!(loaded.keep_temp());
        assert_eq!(loaded.archive.compression_level, Some(3));
        assert_eq!(loaded.output_dir(), Some(&PathBuf::from("converted")));
    }

    #[test]
    fn test_cli_overrides_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[archive]\npath = \"from_file.zip\"\nkeep_temp = true\n").unwrap();

        let path = config_path.to_string_lossy().into_owned();
        let config = Config::from_args_and_config(args(&["a.wav", "-c", path.as_str()])).unwrap();
        assert_eq!(config.archive_path(), Path::new("from_file.zip"));
        assert!(config.keep_temp());

        let config = Config::from_args_and_config(args(&["a.wav", "-c", path.as_str(), "-o", "cli.zip"])).unwrap();
        assert_eq!(config.archive_path(), Path::new("cli.zip"));
    }

    #[test]
    fn test_bad_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("bad.toml");
        std::fs::write(&config_path, "archive = 5").unwrap();
        assert!(matches!(Config::from_file(&config_path), Err(MonoError::Config { .. })));
    }
}
