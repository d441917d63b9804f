/*!
 * Tests for bounded translation dispatch
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::Result;
use futures::future::BoxFuture;
use xdocai::errors::TranslationError;
use xdocai::language_utils::Locale;
use xdocai::translation::ChunkDispatcher;

use crate::common::mock_providers::RecordingProbe;

fn locale(code: &str) -> Locale {
    Locale::parse(code).unwrap()
}

fn chunks(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|t| t.to_string()).collect()
}

/// Echo translator tagging each chunk with its target locale
fn echo_translator()
-> impl Fn(String, Option<Locale>, Locale) -> BoxFuture<'static, Result<String>> + Clone {
    |chunk: String, _source: Option<Locale>, target: Locale| -> BoxFuture<'static, Result<String>> {
        Box::pin(async move { anyhow::Ok(format!("{}|{}", chunk, target)) })
    }
}

#[tokio::test]
async fn test_dispatch_withTwoChunksTwoLocales_shouldGroupFragmentsPerLocale() {
    let dispatcher = ChunkDispatcher::new(5);
    let targets = vec![locale("fr"), locale("es")];

    let outcome = dispatcher
        .dispatch(&chunks(&["c0", "c1"]), None, &targets, echo_translator())
        .await
        .unwrap();

    assert!(!outcome.has_failures());
    assert_eq!(outcome.fragments.len(), 2);
    let fr = &outcome.fragments[&locale("fr")];
    assert_eq!(fr.len(), 2);
    assert_eq!(fr[0].xml, "c0|fr");
    assert_eq!(fr[1].xml, "c1|fr");
    let es = &outcome.fragments[&locale("es")];
    assert_eq!(es.len(), 2);
    assert_eq!(es[0].xml, "c0|es");
    assert_eq!(es[1].xml, "c1|es");
}

#[tokio::test]
async fn test_dispatch_withEmptyTargetLocales_shouldRejectBeforeAnyCall() {
    let dispatcher = ChunkDispatcher::new(5);
    let calls = Arc::new(AtomicUsize::new(0));

    let translate = {
        let calls = Arc::clone(&calls);
        move |_chunk: String, _source: Option<Locale>, _target: Locale| {
            let calls = Arc::clone(&calls);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                anyhow::Ok(String::new())
            }
        }
    };

    let result = dispatcher
        .dispatch(&chunks(&["c0", "c1"]), None, &[], translate)
        .await;

    assert!(matches!(
        result,
        Err(TranslationError::EmptyTargetLanguages)
    ));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_dispatch_withConcurrencyCap_shouldNeverExceedCap() {
    let probe = RecordingProbe::new();
    let dispatcher = ChunkDispatcher::new(2).with_probe(probe.clone());
    let targets = vec![locale("fr"), locale("es")];

    let translate = |chunk: String, _source: Option<Locale>, target: Locale| async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        anyhow::Ok(format!("{}|{}", chunk, target))
    };

    let outcome = dispatcher
        .dispatch(&chunks(&["c0", "c1", "c2", "c3"]), None, &targets, translate)
        .await
        .unwrap();

    assert!(!outcome.has_failures());
    assert!(probe.peak() >= 1);
    assert!(
        probe.peak() <= 2,
        "observed {} concurrent calls with a cap of 2",
        probe.peak()
    );
}

#[tokio::test]
async fn test_dispatch_withOutOfOrderCompletion_shouldPreserveSubmissionOrder() {
    let dispatcher = ChunkDispatcher::new(8);
    let targets = vec![locale("fr")];

    // Later chunks finish first
    let translate = |chunk: String, _source: Option<Locale>, target: Locale| async move {
        let index: u64 = chunk.trim_start_matches('c').parse().unwrap();
        tokio::time::sleep(Duration::from_millis((4 - index) * 20)).await;
        anyhow::Ok(format!("{}|{}", chunk, target))
    };

    let outcome = dispatcher
        .dispatch(&chunks(&["c0", "c1", "c2", "c3"]), None, &targets, translate)
        .await
        .unwrap();

    let fr = &outcome.fragments[&locale("fr")];
    let order: Vec<_> = fr.iter().map(|f| f.chunk_index).collect();
    assert_eq!(order, vec![0, 1, 2, 3]);
    assert_eq!(fr[0].xml, "c0|fr");
    assert_eq!(fr[3].xml, "c3|fr");
}

#[tokio::test]
async fn test_dispatch_withOneFailingJob_shouldIsolateFailureToItsLocale() {
    let dispatcher = ChunkDispatcher::new(5);
    let targets = vec![locale("fr"), locale("es")];

    let translate = |chunk: String, _source: Option<Locale>, target: Locale| async move {
        if chunk == "c1" && target.code() == "fr" {
            anyhow::bail!("simulated provider outage");
        }
        anyhow::Ok(format!("{}|{}", chunk, target))
    };

    let outcome = dispatcher
        .dispatch(&chunks(&["c0", "c1", "c2"]), None, &targets, translate)
        .await
        .unwrap();

    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].chunk_index, 1);
    assert!(outcome.failure_summary().contains("simulated provider outage"));

    let failed = outcome.failed_locales();
    assert!(failed.contains(&locale("fr")));
    assert!(!failed.contains(&locale("es")));

    // The sibling locale still has every fragment, in order
    let es = &outcome.fragments[&locale("es")];
    assert_eq!(es.len(), 3);
    assert_eq!(es[2].xml, "c2|es");
}

#[tokio::test]
async fn test_dispatch_withFencedResponse_shouldExtractPayload() {
    let dispatcher = ChunkDispatcher::new(5);
    let targets = vec![locale("fr")];

    let translate = |_chunk: String, _source: Option<Locale>, _target: Locale| async move {
        anyhow::Ok("```xml\n<member name=\"T:A\"/>\n```".to_string())
    };

    let outcome = dispatcher
        .dispatch(&chunks(&["c0"]), None, &targets, translate)
        .await
        .unwrap();

    assert_eq!(
        outcome.fragments[&locale("fr")][0].xml,
        "<member name=\"T:A\"/>"
    );
}

#[tokio::test]
async fn test_dispatch_withProgressCallback_shouldReportEveryJob() {
    let dispatcher = ChunkDispatcher::new(3);
    let targets = vec![locale("fr"), locale("es")];
    let last_reported = Arc::new(AtomicUsize::new(0));
    let reports = Arc::new(AtomicUsize::new(0));

    let progress = {
        let last_reported = Arc::clone(&last_reported);
        let reports = Arc::clone(&reports);
        move |completed: usize, total: usize| {
            assert_eq!(total, 6);
            last_reported.fetch_max(completed, Ordering::SeqCst);
            reports.fetch_add(1, Ordering::SeqCst);
        }
    };

    dispatcher
        .dispatch_with_progress(
            &chunks(&["c0", "c1", "c2"]),
            None,
            &targets,
            echo_translator(),
            progress,
        )
        .await
        .unwrap();

    assert_eq!(reports.load(Ordering::SeqCst), 6);
    assert_eq!(last_reported.load(Ordering::SeqCst), 6);
}
