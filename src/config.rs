// src/config.rs
use crate::constants::{DEFAULT_ELEMENT_TAG, GENERATED_ID_PREFIX, MAX_TREE_DEPTH};
use crate::error::AppError;
use crate::types::{ElementType, IdGenerator, IdStrategy, ValidationError};
use clap::Parser;
use std::path::PathBuf;

/// Environment variable consulted when `--default-type` is not given.
pub const DEFAULT_TYPE_ENV: &str = "PAGECRAFT_DEFAULT_TYPE";

/// Deepest tree the normalizer may be configured to descend into.
const DEPTH_CEILING: usize = 1024;

/// Parsed and validated command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Page document to normalize (JSON file path, or "-" for stdin)
    pub input: Option<String>,

    /// Output file for the normalized document (defaults to stdout)
    #[arg(short, long)]
    pub output_file: Option<String>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Normalize children recursively instead of passing them through
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Element type assigned to elements without one (defaults to "paragraph")
    #[arg(long)]
    pub default_type: Option<String>,

    /// Prefix for generated element ids
    #[arg(long, default_value = GENERATED_ID_PREFIX)]
    pub id_prefix: String,

    /// Generate UUID-based ids instead of timestamp/sequence ids
    #[arg(long, default_value_t = false)]
    pub uuid_ids: bool,

    /// Maximum recursion depth for --recursive
    #[arg(long, default_value_t = MAX_TREE_DEPTH)]
    pub max_depth: usize,

    /// Print a normalization summary to stderr
    #[arg(long, default_value_t = false)]
    pub report: bool,

    /// Emit compact JSON instead of pretty-printed JSON
    #[arg(long, default_value_t = false)]
    pub compact: bool,

    /// Print the default properties for an element type and exit
    #[arg(long, value_name = "TYPE")]
    pub defaults_for: Option<String>,
}

/// Settings for an [`ElementNormalizer`](crate::ElementNormalizer).
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizerConfig {
    /// Type given to elements whose `type` is missing or empty.
    pub default_type: ElementType,
    pub id_prefix: String,
    pub id_strategy: IdStrategy,
    /// How many levels of children tree normalization descends into.
    pub max_depth: usize,
}

impl NormalizerConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_depth > DEPTH_CEILING {
            return Err(ValidationError::OutOfBounds {
                value: self.max_depth,
                min: 0,
                max: DEPTH_CEILING,
            });
        }
        Ok(())
    }

    pub fn id_generator(&self) -> Result<IdGenerator, ValidationError> {
        IdGenerator::new(self.id_prefix.clone(), self.id_strategy)
    }
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            default_type: ElementType::default(),
            id_prefix: GENERATED_ID_PREFIX.to_string(),
            id_strategy: IdStrategy::Sequential,
            max_depth: MAX_TREE_DEPTH,
        }
    }
}

/// Where the page document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Normalize a page document.
    Normalize(InputSource),
    /// Print the default props of one element type.
    ShowDefaults(String),
}

/// Resolved pipeline configuration, validated and ready to drive every stage.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub command: Command,
    pub normalizer: NormalizerConfig,
    pub recursive: bool,
    pub output_file: Option<PathBuf>,
    pub verbose: bool,
    pub report: bool,
    pub compact: bool,
}

impl PipelineConfig {
    /// Resolves a complete pipeline configuration from CLI input and environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let env_default = std::env::var(DEFAULT_TYPE_ENV).ok();
        Self::resolve_with_env(cli, env_default)
    }

    /// Same as [`Self::resolve`], with the environment lookup supplied by the caller.
    pub fn resolve_with_env(
        cli: CommandLineInput,
        env_default_type: Option<String>,
    ) -> Result<Self, AppError> {
        let command = match (cli.defaults_for, cli.input) {
            (Some(tag), _) => Command::ShowDefaults(tag),
            (None, Some(input)) if input == "-" => Command::Normalize(InputSource::Stdin),
            (None, Some(input)) => Command::Normalize(InputSource::File(PathBuf::from(input))),
            (None, None) => {
                return Err(AppError::MissingConfiguration(
                    "an input document (or --defaults-for TYPE) is required".to_string(),
                ))
            }
        };

        let default_tag = cli
            .default_type
            .or(env_default_type)
            .unwrap_or_else(|| DEFAULT_ELEMENT_TAG.to_string());

        let normalizer = NormalizerConfig {
            default_type: ElementType::parse(&default_tag)?,
            id_prefix: cli.id_prefix,
            id_strategy: if cli.uuid_ids {
                IdStrategy::Uuid
            } else {
                IdStrategy::Sequential
            },
            max_depth: cli.max_depth,
        };
        normalizer.validate()?;
        normalizer.id_generator()?;

        Ok(PipelineConfig {
            command,
            normalizer,
            recursive: cli.recursive,
            output_file: cli.output_file.map(PathBuf::from),
            verbose: cli.verbose,
            report: cli.report,
            compact: cli.compact,
        })
    }
}
