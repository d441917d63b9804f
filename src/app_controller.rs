use std::path::{Path, PathBuf};
use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};

use crate::app_config::Config;
use crate::errors::{AppError, ConfigError, TranslationError};
use crate::intellisense::DocumentManager;
use crate::language_utils::Locale;
use crate::translation::{ChunkDispatcher, TranslationService, assembler};

// @module: Application controller for document translation

/// Main application controller driving the translation workflow
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Run the main workflow: read the source document, translate every
    /// chunk into every target locale, and write one output document per
    /// locale under the output directory.
    pub async fn run(&self) -> Result<(), AppError> {
        let start_time = std::time::Instant::now();

        self.config.validate()?;
        info!("Configuration: {}", self.config);

        let target_locales = self.config.target_locales()?;
        let source_locale = self.config.source_locale()?;

        // Read and validate the source document
        let accessor = DocumentManager::read(&self.config.source_document_path)?;
        info!(
            "Assembly {} with {} members",
            accessor.assembly_name(),
            accessor.member_count()
        );

        let chunks: Vec<String> = accessor.chunked(self.config.chunk_size).collect();
        info!(
            "Packed {} members into {} chunks of up to {} bytes",
            accessor.member_count(),
            chunks.len(),
            self.config.chunk_size
        );

        // One empty output shell per locale, created before any job runs
        let mut documents =
            assembler::create_output_documents(accessor.assembly_name(), &target_locales);

        let service = Arc::new(TranslationService::new(&self.config));
        let dispatcher = ChunkDispatcher::new(self.config.max_concurrent_requests);

        // Progress bar over all (chunk, locale) jobs
        let total_jobs = (chunks.len() * target_locales.len()) as u64;
        let progress_bar = ProgressBar::new(total_jobs);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} jobs ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));

        info!(
            "Starting translation with model {} at {}",
            self.config.model_id, self.config.chat_endpoint_url
        );

        let translate = {
            let service = Arc::clone(&service);
            move |chunk: String, source: Option<Locale>, target: Locale| {
                let service = Arc::clone(&service);
                async move {
                    service
                        .translate_chunk(&chunk, source.as_ref(), &target)
                        .await
                        .map_err(anyhow::Error::from)
                }
            }
        };

        let pb = progress_bar.clone();
        let outcome = dispatcher
            .dispatch_with_progress(
                &chunks,
                source_locale.as_ref(),
                &target_locales,
                translate,
                move |completed, _total| {
                    pb.set_position(completed as u64);
                },
            )
            .await?;
        progress_bar.finish_and_clear();

        if outcome.has_failures() {
            warn!(
                "{} of {} jobs failed: {}",
                outcome.failures.len(),
                total_jobs,
                outcome.failure_summary()
            );
        }

        // Merge ordered fragments into the shells; a bad locale never blocks
        // the others
        let assembly_failures = assembler::finalize_documents(&mut documents, &outcome.fragments);

        // Locales with a failed job have incomplete fragment lists; writing
        // them would silently drop members
        let mut skipped = outcome.failed_locales();
        for failure in &assembly_failures {
            error!("Failed to assemble {} output: {}", failure.locale, failure.error);
            skipped.insert(failure.locale.clone());
        }

        let file_name = Path::new(&self.config.source_document_path)
            .file_name()
            .ok_or_else(|| ConfigError::InvalidParameter {
                name: "source-document-path",
                reason: "path has no file name".to_string(),
            })?;

        let mut written_paths = Vec::new();
        for locale in &target_locales {
            if skipped.contains(locale) {
                warn!("Skipping {} output, translation incomplete", locale);
                continue;
            }
            let Some(document) = documents.get(locale) else {
                continue;
            };
            let output_path = PathBuf::from(&self.config.output_directory_path)
                .join(locale.code())
                .join(file_name);
            DocumentManager::write(&output_path, document)?;
            written_paths.push(output_path.display().to_string());
        }

        let duration = start_time.elapsed();
        info!(
            "Translated {} documents in {:.1}s: [{}]",
            written_paths.len(),
            duration.as_secs_f64(),
            written_paths.join(", ")
        );

        if outcome.has_failures() || !assembly_failures.is_empty() {
            let mut summary = outcome.failure_summary();
            for failure in &assembly_failures {
                if !summary.is_empty() {
                    summary.push_str("; ");
                }
                summary.push_str(&format!("{}: {}", failure.locale, failure.error));
            }
            return Err(AppError::Translation(TranslationError::JobsFailed(summary)));
        }

        Ok(())
    }
}
