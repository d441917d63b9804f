/*!
 * # xdocai - AI-powered IntelliSense documentation translator
 *
 * A Rust library for translating .NET IntelliSense XML documentation files
 * using AI chat completion services.
 *
 * ## Features
 *
 * - Read and validate IntelliSense documentation files
 * - Pack member documentation into size-bounded chunks
 * - Translate chunks into multiple target languages concurrently,
 *   under a global concurrency cap
 * - Reassemble translated chunks into one output document per language,
 *   preserving member order
 * - ISO 639 language code support with region subtags (e.g. `zh-CN`)
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `intellisense`: IntelliSense document reading, writing and validation
 * - `translation`: AI-powered translation pipeline:
 *   - `translation::chunking`: Size-bounded chunk packing
 *   - `translation::dispatch`: Bounded concurrent job dispatch
 *   - `translation::response`: Payload extraction from chat responses
 *   - `translation::assembler`: Per-locale output document assembly
 *   - `translation::core`: Core translation service
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `providers`: Chat completion API client
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod intellisense;
pub mod language_utils;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use errors::{AppError, ConfigError, DocumentError, ProviderError, TranslationError};
pub use intellisense::{DocumentAccessor, DocumentManager, IntelliSenseDocument};
pub use language_utils::{Locale, parse_locale_list};
pub use translation::{ChunkDispatcher, DispatchOutcome, DispatchProbe, TranslationService};
