/*!
 * Bounded dispatch of translation jobs.
 *
 * One job is issued per (chunk, target locale) pair. All jobs are submitted
 * up front and run concurrently, but a counting semaphore admits at most
 * `max_concurrent_requests` into the actual translation call at any instant.
 * Jobs are tagged with their chunk index at submission; results are re-sorted
 * by that tag, so per-locale ordering never depends on completion order.
 */

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::stream::{self, StreamExt};
use log::{debug, error};
use tokio::sync::Semaphore;

use crate::errors::TranslationError;
use crate::language_utils::Locale;

use super::response;

/// Test-observability hook called around each admitted translation call.
///
/// Production code never installs one; tests use it to observe the peak
/// number of in-flight calls without relying on timing.
pub trait DispatchProbe: Send + Sync {
    /// A job passed the admission gate and is about to call the translator
    fn job_started(&self);
    /// The translation call returned, successfully or not
    fn job_finished(&self);
}

/// Extracted translation result for one (chunk, locale) job
#[derive(Debug, Clone, PartialEq)]
pub struct TranslatedFragment {
    /// Index of the source chunk, in chunk production order
    pub chunk_index: usize,
    /// Extracted XML payload
    pub xml: String,
}

/// A job whose translation call failed
#[derive(Debug)]
pub struct JobFailure {
    /// Index of the source chunk
    pub chunk_index: usize,
    /// Target locale of the failed job
    pub locale: Locale,
    /// Failure description
    pub error: String,
}

/// Everything dispatch produced: per-locale ordered fragments plus the jobs
/// that failed. Failures never discard sibling results.
#[derive(Debug)]
pub struct DispatchOutcome {
    /// Fragments per target locale, ordered by chunk index
    pub fragments: HashMap<Locale, Vec<TranslatedFragment>>,
    /// Jobs that failed, in submission order
    pub failures: Vec<JobFailure>,
}

impl DispatchOutcome {
    /// Whether any job failed
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Locales with at least one failed job; their fragment lists are
    /// incomplete and must not be assembled into output documents
    pub fn failed_locales(&self) -> HashSet<Locale> {
        self.failures.iter().map(|f| f.locale.clone()).collect()
    }

    /// One-line summary of all failures
    pub fn failure_summary(&self) -> String {
        self.failures
            .iter()
            .map(|f| format!("chunk {} ({}): {}", f.chunk_index + 1, f.locale, f.error))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Dispatcher fanning translation jobs out under a global concurrency cap
pub struct ChunkDispatcher {
    /// Maximum number of concurrent translation calls
    max_concurrent_requests: usize,
    /// Optional test-observability probe
    probe: Option<Arc<dyn DispatchProbe>>,
}

impl ChunkDispatcher {
    /// Create a dispatcher with the given concurrency cap.
    ///
    /// The cap must be positive; `Config::validate` rejects anything else
    /// before a dispatcher is ever built.
    pub fn new(max_concurrent_requests: usize) -> Self {
        Self {
            max_concurrent_requests,
            probe: None,
        }
    }

    /// Install a probe called on job start/end
    pub fn with_probe(mut self, probe: Arc<dyn DispatchProbe>) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Dispatch all (chunk, locale) jobs and wait for every one to finish.
    pub async fn dispatch<F, Fut>(
        &self,
        chunks: &[String],
        source_locale: Option<&Locale>,
        target_locales: &[Locale],
        translate: F,
    ) -> Result<DispatchOutcome, TranslationError>
    where
        F: Fn(String, Option<Locale>, Locale) -> Fut + Clone,
        Fut: Future<Output = anyhow::Result<String>>,
    {
        self.dispatch_with_progress(chunks, source_locale, target_locales, translate, |_, _| {})
            .await
    }

    /// Dispatch with a `(completed, total)` progress callback invoked as each
    /// job finishes.
    pub async fn dispatch_with_progress<F, Fut, P>(
        &self,
        chunks: &[String],
        source_locale: Option<&Locale>,
        target_locales: &[Locale],
        translate: F,
        progress: P,
    ) -> Result<DispatchOutcome, TranslationError>
    where
        F: Fn(String, Option<Locale>, Locale) -> Fut + Clone,
        Fut: Future<Output = anyhow::Result<String>>,
        P: Fn(usize, usize) + Clone,
    {
        // Caller contract violation, rejected before any job is created
        if target_locales.is_empty() {
            return Err(TranslationError::EmptyTargetLanguages);
        }

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_requests));
        let total_jobs = chunks.len() * target_locales.len();
        let completed = Arc::new(AtomicUsize::new(0));
        debug!(
            "Dispatching {} jobs ({} chunks x {} locales), up to {} in flight",
            total_jobs,
            chunks.len(),
            target_locales.len(),
            self.max_concurrent_requests
        );

        // Fixed submission order: chunk-major, locale-minor
        let jobs: Vec<(usize, String, Locale)> = chunks
            .iter()
            .enumerate()
            .flat_map(|(chunk_index, chunk)| {
                target_locales
                    .iter()
                    .map(move |locale| (chunk_index, chunk.clone(), locale.clone()))
            })
            .collect();

        let results = stream::iter(jobs.into_iter().enumerate())
            .map(|(job_index, (chunk_index, chunk, locale))| {
                let translate = translate.clone();
                let semaphore = semaphore.clone();
                let probe = self.probe.clone();
                let completed = completed.clone();
                let progress = progress.clone();
                let source = source_locale.cloned();

                async move {
                    // Admission gate: the permit is held for exactly the
                    // duration of the translation call and released on every
                    // exit path when it drops
                    let result = match semaphore.acquire().await {
                        Ok(_permit) => {
                            if let Some(probe) = &probe {
                                probe.job_started();
                            }
                            let result = translate(chunk, source, locale.clone()).await;
                            if let Some(probe) = &probe {
                                probe.job_finished();
                            }
                            result
                        }
                        Err(e) => Err(anyhow::anyhow!("Failed to acquire admission gate: {}", e)),
                    };

                    let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                    progress(done, total_jobs);
                    (job_index, chunk_index, locale, result)
                }
            })
            .buffer_unordered(self.max_concurrent_requests)
            .collect::<Vec<_>>()
            .await;

        // Restore submission order so grouping below is deterministic no
        // matter how the jobs interleaved
        let mut sorted_results = results;
        sorted_results.sort_by_key(|(job_index, ..)| *job_index);

        let mut fragments: HashMap<Locale, Vec<TranslatedFragment>> = target_locales
            .iter()
            .map(|locale| (locale.clone(), Vec::new()))
            .collect();
        let mut failures = Vec::new();

        for (_, chunk_index, locale, result) in sorted_results {
            match result {
                Ok(raw) => {
                    let xml = response::extract_payload(&raw);
                    fragments
                        .entry(locale)
                        .or_default()
                        .push(TranslatedFragment { chunk_index, xml });
                }
                Err(e) => {
                    error!("Chunk {} ({}) failed: {}", chunk_index + 1, locale, e);
                    failures.push(JobFailure {
                        chunk_index,
                        locale,
                        error: e.to_string(),
                    });
                }
            }
        }

        Ok(DispatchOutcome {
            fragments,
            failures,
        })
    }
}
