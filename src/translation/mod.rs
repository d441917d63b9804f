/*!
 * AI-powered translation of IntelliSense documentation.
 *
 * The pipeline runs in four stages:
 * - `chunking`: pack ordered member fragments into size-bounded chunks
 * - `dispatch`: fan out one job per (chunk, target locale) under a global
 *   concurrency cap
 * - `response`: extract the XML payload from free-form chat responses
 * - `assembler`: merge ordered per-chunk payloads into one output document
 *   per locale
 *
 * `core` holds the service that turns a single chunk into a chat request.
 */

pub mod assembler;
pub mod chunking;
pub mod core;
pub mod dispatch;
pub mod response;

pub use chunking::{MemberChunks, chunk_members};
pub use core::TranslationService;
pub use dispatch::{ChunkDispatcher, DispatchOutcome, DispatchProbe, TranslatedFragment};
