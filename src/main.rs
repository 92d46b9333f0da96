//! stereo2mono - Batch Stereo to Mono Converter

use std::path::Path;
use std::process;

use anyhow::Context;
use clap::Parser;
use stereo2mono::processing::{cleanup, cleanup_dir, display_name, Archiver, BatchPipeline};
use stereo2mono::{init_logging, Args, Config, MonoError};

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn run(args: Args) -> anyhow::Result<i32> {
    let config = Config::from_args_and_config(args).context("invalid configuration")?;

    if config.verbose() {
        println!("{}", stereo2mono::get_library_info());
        println!();
    }

    for path in &config.input_paths {
        if !path.exists() {
            println!("Error: {}!", MonoError::not_found(path));
            return Ok(1);
        }
    }

    println!("=== Stereo to Mono Converter ===");
    println!(
        "Input paths: {}",
        config.input_paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ")
    );
    println!("Output ZIP: {}", config.archive_path().display());

    let pipeline = BatchPipeline::new(config.output_dir().cloned(), config.conversion.dedupe);
    let batch = pipeline.run(&config.input_paths).context("conversion failed")?;

    if batch.converted.is_empty() {
        println!("\n✗ No files could be converted!");
        if !batch.failed.is_empty() {
            println!("Errors:");
            for failed in &batch.failed {
                println!("  - {}", failed.display());
            }
        }
        return Ok(1);
    }

    let archiver = Archiver::new(config.archive.compression_level);
    if !archiver.archive(&batch.converted, config.archive_path()) {
        println!("\n✗ Failed to create the ZIP archive!");
        return Ok(1);
    }

    println!("\n✓ Completed successfully!");
    println!("ZIP archive: {}", absolute_display(config.archive_path()));
    println!("Converted files: {}", batch.converted.len());
    if !batch.failed.is_empty() {
        println!("Failed files: {}", batch.failed.len());
        for failed in &batch.failed {
            println!("  - {}", display_name(failed));
        }
    }

    if !config.keep_temp() {
        cleanup(&batch.converted);
        if batch.temporary_dir {
            if let Some(dir) = &batch.output_dir {
                cleanup_dir(dir);
            }
        }
        println!("Temporary files deleted.");
    }

    Ok(0)
}

fn absolute_display(path: &Path) -> String {
    std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}
