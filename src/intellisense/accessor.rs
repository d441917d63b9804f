/*!
 * Read-only accessor over a source IntelliSense document.
 *
 * Member fragments are re-serialized through a quick-xml event echo, which
 * keeps attribute text, entity escapes and whitespace exactly as they appear
 * in the source file. That matters downstream: chunk size accounting measures
 * the same bytes that end up on the wire.
 */

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::Event;

use crate::errors::DocumentError;
use crate::translation::chunking::MemberChunks;

use super::{ASSEMBLY_ELEMENT, DOC_ELEMENT, MEMBERS_ELEMENT, MEMBER_ELEMENT, NAME_ELEMENT};

/// Read-only view over a parsed IntelliSense document
#[derive(Debug, Clone)]
pub struct DocumentAccessor {
    /// Assembly name from `doc/assembly/name`
    assembly_name: String,
    /// Ordered member fragments, serialized byte-for-byte
    members: Vec<String>,
}

impl DocumentAccessor {
    /// Parse an IntelliSense document from its XML text.
    ///
    /// `origin` names the source in error messages (usually the file path).
    /// The container shape is validated here: the root must be `doc` and it
    /// must carry `assembly/name` and a `members` element. A `members` element
    /// with no `member` children is valid (empty document).
    pub fn parse(source: &str, origin: &str) -> Result<Self, DocumentError> {
        let invalid = |reason: String| DocumentError::InvalidDocument {
            path: origin.to_string(),
            reason,
        };

        let mut reader = Reader::from_str(source);
        let mut assembly_name: Option<String> = None;
        let mut seen_doc_root = false;
        let mut seen_members_element = false;
        let mut members = Vec::new();
        // Element name stack, used to locate doc/assembly/name text
        let mut path: Vec<Vec<u8>> = Vec::new();

        loop {
            let event = reader.read_event().map_err(|e| invalid(e.to_string()))?;
            match event {
                Event::Start(e) => {
                    let name = e.name().as_ref().to_vec();
                    if path.is_empty() {
                        if name != DOC_ELEMENT {
                            return Err(invalid(format!(
                                "unexpected root element <{}>, expected <doc>",
                                String::from_utf8_lossy(&name)
                            )));
                        }
                        seen_doc_root = true;
                    }
                    if name == MEMBERS_ELEMENT {
                        seen_members_element = true;
                    }
                    if name == MEMBER_ELEMENT {
                        // Capture the whole element, including its own tags,
                        // without touching the path stack: the echo consumes
                        // every event up to the matching end tag.
                        let mut writer = Writer::new(Vec::new());
                        writer
                            .write_event(Event::Start(e))
                            .map_err(|e| invalid(e.to_string()))?;
                        copy_element_content(&mut reader, &mut writer)
                            .map_err(|reason| invalid(reason))?;
                        let fragment = String::from_utf8(writer.into_inner())
                            .map_err(|e| invalid(e.to_string()))?;
                        members.push(fragment);
                    } else {
                        path.push(name);
                    }
                }
                Event::Empty(e) => {
                    let name = e.name().as_ref().to_vec();
                    if path.is_empty() && name != DOC_ELEMENT {
                        return Err(invalid(format!(
                            "unexpected root element <{}>, expected <doc>",
                            String::from_utf8_lossy(&name)
                        )));
                    }
                    if name == MEMBERS_ELEMENT {
                        seen_members_element = true;
                    }
                    if name == MEMBER_ELEMENT {
                        let mut writer = Writer::new(Vec::new());
                        writer
                            .write_event(Event::Empty(e))
                            .map_err(|e| invalid(e.to_string()))?;
                        let fragment = String::from_utf8(writer.into_inner())
                            .map_err(|e| invalid(e.to_string()))?;
                        members.push(fragment);
                    }
                }
                Event::End(_) => {
                    path.pop();
                }
                Event::Text(t) => {
                    if path_is(&path, &[DOC_ELEMENT, ASSEMBLY_ELEMENT, NAME_ELEMENT]) {
                        let text = t.unescape().map_err(|e| invalid(e.to_string()))?;
                        assembly_name
                            .get_or_insert_with(String::new)
                            .push_str(&text);
                    }
                }
                Event::Eof => break,
                // Declarations, comments, CDATA and processing instructions
                // outside member elements carry nothing we need
                _ => {}
            }
        }

        if !seen_doc_root {
            return Err(invalid("missing <doc> root element".to_string()));
        }
        if !seen_members_element {
            return Err(invalid("missing <members> element".to_string()));
        }
        let assembly_name = assembly_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| invalid("missing assembly name element".to_string()))?;

        Ok(Self {
            assembly_name,
            members,
        })
    }

    /// Assembly name of the documented assembly
    pub fn assembly_name(&self) -> &str {
        &self.assembly_name
    }

    /// Number of member elements in the document
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Ordered member fragments
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Lazily pack the member fragments into size-bounded chunks
    pub fn chunked(&self, chunk_size: usize) -> MemberChunks<'_> {
        MemberChunks::new(&self.members, chunk_size)
    }
}

/// Echo every event up to (not including) the end tag matching the already
/// written start tag. Fails on premature end of input.
fn copy_element_content(
    reader: &mut Reader<&[u8]>,
    writer: &mut Writer<Vec<u8>>,
) -> Result<(), String> {
    let mut depth = 1usize;
    loop {
        let event = reader.read_event().map_err(|e| e.to_string())?;
        match event {
            Event::Start(_) => {
                depth += 1;
                writer.write_event(event).map_err(|e| e.to_string())?;
            }
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    writer.write_event(event).map_err(|e| e.to_string())?;
                    return Ok(());
                }
                writer.write_event(event).map_err(|e| e.to_string())?;
            }
            Event::Eof => return Err("unexpected end of document".to_string()),
            _ => {
                writer.write_event(event).map_err(|e| e.to_string())?;
            }
        }
    }
}

fn path_is(path: &[Vec<u8>], expected: &[&[u8]]) -> bool {
    path.len() == expected.len()
        && path
            .iter()
            .zip(expected.iter())
            .all(|(a, b)| a.as_slice() == *b)
}
