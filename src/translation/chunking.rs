/*!
 * Chunk packing for translation requests.
 *
 * Member fragments are opaque and atomic: a chunk is an in-order concatenation
 * of whole fragments whose byte length stays within the configured bound. The
 * one exception is a fragment that is itself larger than the bound, which is
 * emitted alone rather than split.
 */

/// Lazy iterator packing ordered member fragments into size-bounded chunks.
///
/// Restartable by constructing it again over the same fragments. Guarantees:
/// every fragment lands in exactly one chunk, chunks preserve fragment order,
/// and concatenating all chunks reproduces the concatenation of all fragments.
pub struct MemberChunks<'a> {
    fragments: std::slice::Iter<'a, String>,
    chunk_size: usize,
    accumulator: String,
    /// Oversized fragment to emit right after a flushed accumulator
    pending: Option<&'a str>,
}

impl<'a> MemberChunks<'a> {
    /// Pack `fragments` into chunks of at most `chunk_size` bytes.
    ///
    /// A non-positive `chunk_size` is a configuration error and is rejected by
    /// `Config::validate` before any packing happens.
    pub fn new(fragments: &'a [String], chunk_size: usize) -> Self {
        Self {
            fragments: fragments.iter(),
            chunk_size,
            accumulator: String::new(),
            pending: None,
        }
    }
}

impl Iterator for MemberChunks<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if let Some(oversized) = self.pending.take() {
            return Some(oversized.to_string());
        }

        for fragment in self.fragments.by_ref() {
            // Flush first, so an oversized fragment never jumps ahead of
            // content that arrived before it
            if !self.accumulator.is_empty()
                && self.accumulator.len() + fragment.len() > self.chunk_size
            {
                let completed = std::mem::take(&mut self.accumulator);
                if fragment.len() > self.chunk_size {
                    self.pending = Some(fragment.as_str());
                } else {
                    self.accumulator.push_str(fragment);
                }
                return Some(completed);
            }

            if fragment.len() > self.chunk_size {
                // Oversized passthrough: its own standalone chunk
                return Some(fragment.clone());
            }

            self.accumulator.push_str(fragment);
        }

        if self.accumulator.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.accumulator))
        }
    }
}

/// Pack ordered member fragments into size-bounded chunks
pub fn chunk_members(fragments: &[String], chunk_size: usize) -> MemberChunks<'_> {
    MemberChunks::new(fragments, chunk_size)
}
