//! Error Types

use std::path::PathBuf;
use thiserror::Error;

/// Main error type
#[derive(Debug, Clone, Error)]
pub enum MonoError {
    #[error("Audio error: {message}")]
    Audio { message: String },
    #[error("Unsupported format: {message}")]
    UnsupportedFormat { message: String },
    #[error("Path '{}' does not exist", path.display())]
    InputNotFound { path: PathBuf },
    #[error("Config error: {message}")]
    Config { message: String },
    #[error("IO error: {message}")]
    Io { message: String },
    #[error("Archive error: {message}")]
    Archive { message: String },
}

impl MonoError {
    pub fn audio<S: Into<String>>(msg: S) -> Self { Self::Audio { message: msg.into() } }
    pub fn unsupported<S: Into<String>>(msg: S) -> Self { Self::UnsupportedFormat { message: msg.into() } }
    pub fn not_found<P: Into<PathBuf>>(path: P) -> Self { Self::InputNotFound { path: path.into() } }
    pub fn config<S: Into<String>>(msg: S) -> Self { Self::Config { message: msg.into() } }
    pub fn io<S: Into<String>>(msg: S) -> Self { Self::Io { message: msg.into() } }
    pub fn archive<S: Into<String>>(msg: S) -> Self { Self::Archive { message: msg.into() } }
}

pub type Result<T> = std::result::Result<T, MonoError>;

impl From<std::io::Error> for MonoError {
    fn from(err: std::io::Error) -> Self { Self::io(err.to_string()) }
}

impl From<symphonia::core::errors::Error> for MonoError {
    fn from(err: symphonia::core::errors::Error) -> Self { Self::audio(format!("Decode: {}", err)) }
}

impl From<hound::Error> for MonoError {
    fn from(err: hound::Error) -> Self { Self::audio(format!("WAV: {}", err)) }
}

impl From<zip::result::ZipError> for MonoError {
    fn from(err: zip::result::ZipError) -> Self { Self::archive(err.to_string()) }
}

impl From<walkdir::Error> for MonoError {
    fn from(err: walkdir::Error) -> Self { Self::io(format!("Directory traversal: {}", err)) }
}

impl From<toml::de::Error> for MonoError {
    fn from(err: toml::de::Error) -> Self { Self::config(format!("Failed to parse config file: {}", err)) }
}

impl From<toml::ser::Error> for MonoError {
    fn from(err: toml::ser::Error) -> Self { Self::config(format!("Failed to serialize config: {}", err)) }
}
