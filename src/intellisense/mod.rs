/*!
 * IntelliSense XML documentation file handling.
 *
 * An IntelliSense file is the `<doc>` XML document that ships next to a .NET
 * assembly: an `<assembly><name>` header followed by a `<members>` list where
 * every `<member>` element documents one type, method, property or field.
 *
 * The module is split the same way the data flows:
 * - `accessor`: read-only view over a source document, yielding each member
 *   element as an exact string fragment
 * - `document`: the mutable output document shell built per target locale
 * - `manager`: reading and writing documents on disk
 */

pub mod accessor;
pub mod document;
pub mod manager;

pub use accessor::DocumentAccessor;
pub use document::{IntelliSenseDocument, Member};
pub use manager::DocumentManager;

/// `doc` element name
pub(crate) const DOC_ELEMENT: &[u8] = b"doc";
/// `assembly` element name
pub(crate) const ASSEMBLY_ELEMENT: &[u8] = b"assembly";
/// `name` element name
pub(crate) const NAME_ELEMENT: &[u8] = b"name";
/// `members` element name
pub(crate) const MEMBERS_ELEMENT: &[u8] = b"members";
/// `member` element name
pub(crate) const MEMBER_ELEMENT: &[u8] = b"member";
