use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::file_utils::FileManager;
use crate::language_utils::{Locale, parse_locale_list};
use crate::providers::chat;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and dumping configuration settings. Values come from an
/// optional JSON file, overridden by CLI arguments and environment variables.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Path to the source IntelliSense document
    #[serde(default)]
    pub source_document_path: String,

    /// Directory receiving one subdirectory per target locale
    #[serde(default = "default_output_directory")]
    pub output_directory_path: String,

    /// Locale of the source document, when known
    #[serde(default)]
    pub source_document_language: Option<String>,

    /// Comma-separated target locales, e.g. "fr,ja,zh-CN"
    #[serde(default)]
    pub output_file_languages: String,

    /// Maximum chunk size in bytes for one translation request
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Maximum number of concurrent translation requests
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,

    /// Authentication token for the chat endpoint
    #[serde(default)]
    pub token: String,

    /// Chat endpoint base URL
    #[serde(default = "default_chat_endpoint_url")]
    pub chat_endpoint_url: String,

    /// Model ID to use
    #[serde(default = "default_model_id")]
    pub model_id: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_output_directory() -> String {
    ".".to_string()
}

fn default_chunk_size() -> usize {
    4000
}

fn default_max_concurrent_requests() -> usize {
    5
}

fn default_chat_endpoint_url() -> String {
    chat::DEFAULT_ENDPOINT.to_string()
}

fn default_model_id() -> String {
    chat::DEFAULT_MODEL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_document_path: String::new(),
            output_directory_path: default_output_directory(),
            source_document_language: None,
            output_file_languages: String::new(),
            chunk_size: default_chunk_size(),
            max_concurrent_requests: default_max_concurrent_requests(),
            token: String::new(),
            chat_endpoint_url: default_chat_endpoint_url(),
            model_id: default_model_id(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = FileManager::read_to_string(&path)?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))
    }

    /// Validate the configuration for consistency and required values.
    ///
    /// Every violation is fatal and reported before any work starts, naming
    /// the offending parameter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source_document_path.trim().is_empty() {
            return Err(ConfigError::MissingParameter("source-document-path"));
        }
        if self.output_file_languages.trim().is_empty() {
            return Err(ConfigError::MissingParameter("output-file-languages"));
        }
        // Every locale must resolve; target_locales reports the first bad one
        let locales = self.target_locales()?;
        if locales.is_empty() {
            return Err(ConfigError::MissingParameter("output-file-languages"));
        }
        if let Some(source) = &self.source_document_language {
            Locale::parse(source)?;
        }
        if self.chunk_size == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "chunk-size",
                reason: "must be a positive integer".to_string(),
            });
        }
        if self.max_concurrent_requests == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "max-concurrent-requests",
                reason: "must be a positive integer".to_string(),
            });
        }
        if self.token.is_empty() {
            return Err(ConfigError::MissingParameter("token"));
        }
        Ok(())
    }

    /// Parsed target locales, in the order they were supplied
    pub fn target_locales(&self) -> Result<Vec<Locale>, ConfigError> {
        parse_locale_list(&self.output_file_languages)
    }

    /// Parsed source locale, when one is configured
    pub fn source_locale(&self) -> Result<Option<Locale>, ConfigError> {
        self.source_document_language
            .as_deref()
            .filter(|code| !code.trim().is_empty())
            .map(Locale::parse)
            .transpose()
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Token is masked down to its last five characters
        let token_display = if self.token.len() > 10 {
            format!(
                "{}{}",
                "*".repeat(self.token.len() - 5),
                &self.token[self.token.len() - 5..]
            )
        } else {
            "*".repeat(self.token.len())
        };
        write!(
            f,
            "source_document_path: {}, output_directory_path: {}, source_document_language: {}, \
             output_file_languages: {}, chunk_size: {}, max_concurrent_requests: {}, \
             token: {}, chat_endpoint_url: {}, model_id: {}",
            self.source_document_path,
            self.output_directory_path,
            self.source_document_language.as_deref().unwrap_or("(not set)"),
            self.output_file_languages,
            self.chunk_size,
            self.max_concurrent_requests,
            token_display,
            self.chat_endpoint_url,
            self.model_id,
        )
    }
}
