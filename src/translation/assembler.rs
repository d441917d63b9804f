/*!
 * Assembly of translated fragments into output documents.
 *
 * Step one happens before dispatch: one empty document shell per target
 * locale, carrying only the assembly name. Step two happens after dispatch:
 * each locale's ordered fragments are concatenated and parsed into the
 * shell's member list. A parse failure for one locale never touches the
 * others.
 */

use std::collections::HashMap;

use crate::errors::DocumentError;
use crate::intellisense::IntelliSenseDocument;
use crate::language_utils::Locale;

use super::dispatch::TranslatedFragment;

/// An output document whose concatenated fragments failed to parse
#[derive(Debug)]
pub struct AssemblyFailure {
    /// Affected locale
    pub locale: Locale,
    /// The parse error, carrying the offending text
    pub error: DocumentError,
}

/// Create one empty output document shell per target locale
pub fn create_output_documents(
    assembly_name: &str,
    target_locales: &[Locale],
) -> HashMap<Locale, IntelliSenseDocument> {
    target_locales
        .iter()
        .map(|locale| (locale.clone(), IntelliSenseDocument::new(assembly_name)))
        .collect()
}

/// Fill each shell from its locale's ordered fragments.
///
/// A locale without fragments gets an empty member list. Returns the locales
/// whose content failed to parse; their shells are left empty and the
/// remaining documents are unaffected.
pub fn finalize_documents(
    documents: &mut HashMap<Locale, IntelliSenseDocument>,
    fragments: &HashMap<Locale, Vec<TranslatedFragment>>,
) -> Vec<AssemblyFailure> {
    let mut failures = Vec::new();

    for (locale, document) in documents.iter_mut() {
        let xml = fragments
            .get(locale)
            .map(|parts| {
                parts
                    .iter()
                    .map(|fragment| fragment.xml.as_str())
                    .collect::<String>()
            })
            .unwrap_or_default();

        if let Err(error) = document.set_members_inner_xml(&xml) {
            failures.push(AssemblyFailure {
                locale: locale.clone(),
                error,
            });
        }
    }

    failures
}
