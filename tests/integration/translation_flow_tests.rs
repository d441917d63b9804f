/*!
 * End-to-end tests for the document translation pipeline: read, chunk,
 * dispatch, assemble and write, with the chat provider mocked out.
 */

use anyhow::Result;
use xdocai::intellisense::DocumentManager;
use xdocai::language_utils::Locale;
use xdocai::translation::{ChunkDispatcher, assembler};

use crate::common;

fn locale(code: &str) -> Locale {
    Locale::parse(code).unwrap()
}

/// Pretend-translator: returns member XML unchanged, wrapped in a code fence
/// the way chat models tend to answer
fn fenced_echo(
    chunk: String,
    _source: Option<Locale>,
    _target: Locale,
) -> futures::future::BoxFuture<'static, Result<String>> {
    Box::pin(async move { anyhow::Ok(format!("```xml\n{}\n```", chunk)) })
}

#[tokio::test]
async fn test_translation_flow_withMockTranslator_shouldWriteOneDocumentPerLocale() -> Result<()> {
    let temp = common::create_temp_dir()?;
    let source_path = common::create_test_document(temp.path(), "Sample.Library.xml")?;

    let accessor = DocumentManager::read(&source_path)?;
    assert_eq!(accessor.assembly_name(), "Sample.Library");
    assert_eq!(accessor.member_count(), 3);

    // Small chunk size so the document actually splits
    let chunks: Vec<String> = accessor.chunked(200).collect();
    assert!(chunks.len() > 1, "expected the document to split into chunks");

    let targets = vec![locale("fr"), locale("ja")];
    let mut documents = assembler::create_output_documents(accessor.assembly_name(), &targets);

    let dispatcher = ChunkDispatcher::new(2);
    let outcome = dispatcher
        .dispatch(&chunks, Some(&locale("en")), &targets, fenced_echo)
        .await?;
    assert!(!outcome.has_failures());

    let failures = assembler::finalize_documents(&mut documents, &outcome.fragments);
    assert!(failures.is_empty());

    let output_dir = temp.path().join("translated");
    for target in &targets {
        let output_path = output_dir.join(target.code()).join("Sample.Library.xml");
        DocumentManager::write(&output_path, &documents[target])?;

        // Each output must round-trip as a valid IntelliSense document with
        // every member, in source order
        let translated = DocumentManager::read(&output_path)?;
        assert_eq!(translated.assembly_name(), "Sample.Library");
        assert_eq!(translated.member_count(), 3);
        assert!(translated.members()[0].contains("T:Sample.Library.Calculator"));
        assert!(translated.members()[1].contains("Adds two integers."));
        assert!(translated.members()[2].contains("M:Sample.Library.Calculator.Reset"));
    }
    Ok(())
}

#[tokio::test]
async fn test_translation_flow_withFailingLocale_shouldStillAssembleOthers() -> Result<()> {
    let temp = common::create_temp_dir()?;
    let source_path = common::create_test_document(temp.path(), "Sample.Library.xml")?;
    let accessor = DocumentManager::read(&source_path)?;
    let chunks: Vec<String> = accessor.chunked(200).collect();

    let targets = vec![locale("fr"), locale("ja")];
    let mut documents = assembler::create_output_documents(accessor.assembly_name(), &targets);

    let translate = |chunk: String, _source: Option<Locale>, target: Locale| async move {
        if target.code() == "ja" {
            anyhow::bail!("simulated provider outage");
        }
        anyhow::Ok(chunk)
    };

    let dispatcher = ChunkDispatcher::new(2);
    let outcome = dispatcher.dispatch(&chunks, None, &targets, translate).await?;
    assert!(outcome.has_failures());
    assert!(outcome.failed_locales().contains(&locale("ja")));

    assembler::finalize_documents(&mut documents, &outcome.fragments);

    // The healthy locale is complete and usable
    let fr = &documents[&locale("fr")];
    assert_eq!(fr.members().len(), 3);
    assert_eq!(fr.members()[0].name, "T:Sample.Library.Calculator");
    Ok(())
}

#[tokio::test]
async fn test_translation_flow_withMalformedTranslation_shouldReportOffendingLocale() -> Result<()> {
    let temp = common::create_temp_dir()?;
    let source_path = common::create_test_document(temp.path(), "Sample.Library.xml")?;
    let accessor = DocumentManager::read(&source_path)?;
    let chunks: Vec<String> = accessor.chunked(10_000).collect();

    let targets = vec![locale("fr")];
    let mut documents = assembler::create_output_documents(accessor.assembly_name(), &targets);

    // The model answered with broken XML
    let translate = |_chunk: String, _source: Option<Locale>, _target: Locale| async move {
        anyhow::Ok(r#"<member name="T:A"><summary>oops</member>"#.to_string())
    };

    let dispatcher = ChunkDispatcher::new(2);
    let outcome = dispatcher.dispatch(&chunks, None, &targets, translate).await?;
    assert!(!outcome.has_failures());

    let failures = assembler::finalize_documents(&mut documents, &outcome.fragments);
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].locale, locale("fr"));
    // The error carries the offending text for diagnosis
    assert!(failures[0].error.to_string().contains("oops"));
    Ok(())
}
