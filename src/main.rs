// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error};

use xdocai::Controller;
use xdocai::app_config::{Config, LogLevel};

/// CLI wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

/// xdocai - AI-powered IntelliSense documentation translator
///
/// Translates .NET IntelliSense XML documentation files into one or more
/// target languages using an OpenAI-compatible chat completion service.
#[derive(Parser, Debug)]
#[command(name = "xdocai")]
#[command(version = "0.1.0")]
#[command(about = "AI-powered translator for .NET IntelliSense XML documentation")]
#[command(long_about = "xdocai reads an IntelliSense XML documentation file, splits its member
documentation into size-bounded chunks, translates every chunk into every
requested language concurrently, and writes one translated documentation file
per language under the output directory.

EXAMPLES:
    xdocai -s Sample.Library.xml -l fr,ja -t $TOKEN
    xdocai -s Sample.Library.xml -l zh-CN --source-document-language en -t $TOKEN
    xdocai -s doc.xml -l es -o ./translated --model-id gpt-4.1-mini -t $TOKEN
    xdocai -c conf.json

CONFIGURATION:
    Options can also be supplied through a JSON config file via --config-path.
    Command line options override values from the file. The token can be
    supplied through the XDOCAI_TOKEN environment variable.")]
struct CommandLineOptions {
    /// Path to the source IntelliSense XML documentation file
    #[arg(short = 's', long)]
    source_document_path: Option<String>,

    /// Output directory; one subdirectory is created per target language
    #[arg(short = 'o', long)]
    output_directory_path: Option<String>,

    /// Language of the source document (e.g. 'en')
    #[arg(long)]
    source_document_language: Option<String>,

    /// Comma-separated target languages (e.g. 'fr,ja,zh-CN')
    #[arg(short = 'l', long)]
    output_file_languages: Option<String>,

    /// Authentication token for the chat endpoint
    #[arg(short = 't', long, env = "XDOCAI_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Chat completions endpoint base URL
    #[arg(long)]
    chat_endpoint_url: Option<String>,

    /// Model ID to use for translation
    #[arg(short = 'm', long)]
    model_id: Option<String>,

    /// Maximum chunk size in bytes for one translation request
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Maximum number of concurrent translation requests
    #[arg(long)]
    max_concurrent_requests: Option<usize>,

    /// Configuration file path
    #[arg(short = 'c', long)]
    config_path: Option<String>,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Build the effective configuration: config file first, CLI overrides second
fn build_config(options: &CommandLineOptions) -> Result<Config> {
    let mut config = match &options.config_path {
        Some(config_path) => {
            if !Path::new(config_path).exists() {
                anyhow::bail!("Config file not found: {}", config_path);
            }
            Config::from_file(config_path)
                .with_context(|| format!("Failed to load config file: {}", config_path))?
        }
        None => Config::default(),
    };

    if let Some(path) = &options.source_document_path {
        config.source_document_path = path.clone();
    }
    if let Some(path) = &options.output_directory_path {
        config.output_directory_path = path.clone();
    }
    if let Some(language) = &options.source_document_language {
        config.source_document_language = Some(language.clone());
    }
    if let Some(languages) = &options.output_file_languages {
        config.output_file_languages = languages.clone();
    }
    if let Some(token) = &options.token {
        config.token = token.clone();
    }
    if let Some(url) = &options.chat_endpoint_url {
        config.chat_endpoint_url = url.clone();
    }
    if let Some(model) = &options.model_id {
        config.model_id = model.clone();
    }
    if let Some(chunk_size) = options.chunk_size {
        config.chunk_size = chunk_size;
    }
    if let Some(max_concurrent) = options.max_concurrent_requests {
        config.max_concurrent_requests = max_concurrent;
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let options = CommandLineOptions::parse();
    let config = build_config(&options)?;
    log::set_max_level(config.log_level.into());

    let controller = Controller::with_config(config);
    if let Err(e) = controller.run().await {
        error!("{}", e);
        std::process::exit(1);
    }

    Ok(())
}
