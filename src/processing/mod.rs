//! Batch Processing
//!
//! Discovery, the sequential conversion loop, progress display and archiving.

pub mod archive;
pub mod discovery;
pub mod pipeline;
pub mod progress;

pub use archive::{Archiver, ArchiveSummary, cleanup, cleanup_dir};
pub use discovery::{Discovery, discover};
pub use pipeline::{BatchPipeline, BatchResult, ConversionResult, display_name};
pub use progress::ProgressBar;
