// src/main.rs

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use pagecraft::{
    default_props_for, AppError, Command, CommandLineInput, ElementType, InputSource, LogObserver,
    NormalizationPipeline, PipelineConfig,
};
use std::fs;

/// Sets up logging configuration.
///
/// Console output goes to stderr so that normalized documents can be piped
/// from stdout.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("pagecraft.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Prints the default props of one element type as JSON.
fn show_defaults(tag: &str) -> Result<(), AppError> {
    match ElementType::parse(tag) {
        Ok(element_type) if !element_type.is_known() => {
            log::warn!("Unknown element type '{}'; it has no default props", tag)
        }
        Ok(_) => {}
        Err(err) => log::warn!("{}", err),
    }
    let defaults = serde_json::to_string_pretty(&default_props_for(tag))
        .context("failed to render default props")?;
    println!("{}", defaults);
    Ok(())
}

/// Executes read → normalize → deliver for one page document.
fn execute_pipeline(config: &PipelineConfig, source: InputSource) -> Result<(), AppError> {
    let pipeline = NormalizationPipeline::new(config, source, LogObserver)?;
    let summary = pipeline.run()?;

    log::info!("{}", summary);
    if config.report {
        eprintln!("{}", summary);
        for (tag, count) in &summary.measurement.by_type {
            eprintln!("  {:<16} {}", tag, count);
        }
    }
    if !summary.is_lossless() {
        log::warn!(
            "{} entries and {} nested children were dropped",
            summary.dropped.len(),
            summary.dropped_children.len()
        );
    }
    if let Some(path) = &config.output_file {
        eprintln!("✓ Normalized document saved to {}", path.display());
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = PipelineConfig::resolve(cli)?;

    match config.command.clone() {
        Command::ShowDefaults(tag) => show_defaults(&tag)?,
        Command::Normalize(source) => execute_pipeline(&config, source)?,
    }

    Ok(())
}
