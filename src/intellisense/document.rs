/*!
 * Output document model.
 *
 * One `IntelliSenseDocument` is created per target locale as an empty shell
 * carrying only the assembly name; its member list is filled exactly once,
 * after dispatch completes, from the concatenated translated fragments.
 */

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::errors::DocumentError;

use super::MEMBER_ELEMENT;

/// One documented member in an output document
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    /// Value of the `name` attribute, e.g. "M:Sample.Widget.Run(System.Int32)"
    pub name: String,
    /// Raw inner XML of the member element
    pub inner_xml: String,
}

/// An IntelliSense documentation file being assembled for one target locale
#[derive(Debug, Clone)]
pub struct IntelliSenseDocument {
    /// Assembly name, copied from the source document
    assembly_name: String,
    /// Documented members, empty until finalized
    members: Vec<Member>,
}

impl IntelliSenseDocument {
    /// Create an empty document shell for the given assembly
    pub fn new(assembly_name: impl Into<String>) -> Self {
        Self {
            assembly_name: assembly_name.into(),
            members: Vec::new(),
        }
    }

    /// Assembly name of the documented assembly
    pub fn assembly_name(&self) -> &str {
        &self.assembly_name
    }

    /// Documented members
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Replace the member list by parsing concatenated `<member>` fragments.
    ///
    /// Empty (or whitespace-only) input yields an empty member list, which is
    /// valid. Non-empty input that is not well-formed XML is a data error
    /// carrying the offending text. Setting the same input twice yields the
    /// same members; the previous list is always replaced wholesale.
    pub fn set_members_inner_xml(&mut self, xml: &str) -> Result<(), DocumentError> {
        if xml.trim().is_empty() {
            self.members.clear();
            return Ok(());
        }

        let malformed = |reason: String| DocumentError::MalformedContent {
            reason,
            content: xml.to_string(),
        };

        // Fragments have no single root, so parse under a synthetic one
        let wrapped = format!("<root>{}</root>", xml);
        let mut reader = Reader::from_str(&wrapped);
        let mut members = Vec::new();

        loop {
            let event = reader.read_event().map_err(|e| malformed(e.to_string()))?;
            match event {
                Event::Start(e) if e.name().as_ref() == b"root" => {}
                Event::End(e) if e.name().as_ref() == b"root" => break,
                Event::Start(e) => {
                    let name = member_name(&e).map_err(&malformed)?;
                    let mut writer = Writer::new(Vec::new());
                    copy_inner_content(&mut reader, &mut writer).map_err(&malformed)?;
                    let inner_xml =
                        String::from_utf8(writer.into_inner()).map_err(|e| malformed(e.to_string()))?;
                    members.push(Member { name, inner_xml });
                }
                Event::Empty(e) => {
                    let name = member_name(&e).map_err(&malformed)?;
                    members.push(Member {
                        name,
                        inner_xml: String::new(),
                    });
                }
                // Stray text or comments between member elements are dropped,
                // mirroring how an XML DOM load only keeps element children
                Event::Text(_) | Event::Comment(_) | Event::CData(_) => {}
                Event::Eof => break,
                _ => {}
            }
        }

        self.members = members;
        Ok(())
    }

    /// Serialize the document with an XML declaration and 4-space indentation
    pub fn to_xml_string(&self) -> Result<String, DocumentError> {
        let serialize = || -> Result<Vec<u8>, quick_xml::Error> {
            let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);
            writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
            writer.write_event(Event::Start(BytesStart::new("doc")))?;
            writer.write_event(Event::Start(BytesStart::new("assembly")))?;
            writer.write_event(Event::Start(BytesStart::new("name")))?;
            writer.write_event(Event::Text(BytesText::new(&self.assembly_name)))?;
            writer.write_event(Event::End(BytesEnd::new("name")))?;
            writer.write_event(Event::End(BytesEnd::new("assembly")))?;
            writer.write_event(Event::Start(BytesStart::new("members")))?;
            for member in &self.members {
                let mut start = BytesStart::new("member");
                start.push_attribute(("name", member.name.as_str()));
                if member.inner_xml.is_empty() {
                    writer.write_event(Event::Empty(start))?;
                } else {
                    writer.write_event(Event::Start(start))?;
                    // Already-valid XML, injected without re-escaping
                    writer.write_event(Event::Text(BytesText::from_escaped(
                        member.inner_xml.as_str(),
                    )))?;
                    writer.write_event(Event::End(BytesEnd::new("member")))?;
                }
            }
            writer.write_event(Event::End(BytesEnd::new("members")))?;
            writer.write_event(Event::End(BytesEnd::new("doc")))?;
            Ok(writer.into_inner())
        };

        let bytes = serialize().map_err(|e| DocumentError::Write {
            path: String::new(),
            reason: e.to_string(),
        })?;
        String::from_utf8(bytes).map_err(|e| DocumentError::Write {
            path: String::new(),
            reason: e.to_string(),
        })
    }
}

/// Extract the `name` attribute of a member element; absent attributes come
/// back empty rather than failing, unexpected element names do fail.
fn member_name(start: &BytesStart<'_>) -> Result<String, String> {
    if start.name().as_ref() != MEMBER_ELEMENT {
        return Err(format!(
            "unexpected element <{}>, expected <member>",
            String::from_utf8_lossy(start.name().as_ref())
        ));
    }
    match start.try_get_attribute("name") {
        Ok(Some(attr)) => attr
            .unescape_value()
            .map(|v| v.into_owned())
            .map_err(|e| e.to_string()),
        Ok(None) => Ok(String::new()),
        Err(e) => Err(e.to_string()),
    }
}

/// Echo events up to the end tag matching the current element, excluding the
/// surrounding tags themselves
fn copy_inner_content(
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
                    return Ok(());
                }
                writer.write_event(event).map_err(|e| e.to_string())?;
            }
            Event::Eof => return Err("unexpected end of content".to_string()),
            _ => {
                writer.write_event(event).map_err(|e| e.to_string())?;
            }
        }
    }
}
