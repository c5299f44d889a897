//! Recursive text chunking with separator priority and content overlap.
//!
//! Splitting tries coarser separators first (paragraph, line, word) and
//! falls back to a raw character cut only for runs with no better boundary,
//! so chunks end on the most meaningful boundary available within the size
//! budget. Adjacent chunks share a configured amount of trailing content so
//! retrieval keeps context across chunk boundaries.

/// Default chunk size in bytes, tuned for the embedding provider's input
/// limits.
pub const DEFAULT_CHUNK_SIZE: usize = 500;
/// Default overlap between adjacent chunks.
pub const DEFAULT_CHUNK_OVERLAP: usize = 100;

/// Separator priority: paragraph break, line break, word break. A raw
/// character cut is the final fallback for runs none of these can split.
const SEPARATORS: [&str; 3] = ["\n\n", "\n", " "];

/// A chunk of source text. `text` is the verbatim slice `start..end` of the
/// input, so neighboring chunks overlap by literal shared content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub text: String,
    pub index: usize,
    pub start: usize,
    pub end: usize,
}

/// Recursive splitter that respects document structure.
#[derive(Debug, Clone)]
pub struct TextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TextSplitter {
    /// Overlap is clamped below the chunk size; a chunk must always be able
    /// to make progress past its carried prefix.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            chunk_size,
            chunk_overlap: chunk_overlap.min(chunk_size - 1),
        }
    }

    /// Split `text` into ordered chunks. Empty input yields no chunks; this
    /// is the signal that ingestion has nothing to index.
    pub fn split(&self, text: &str) -> Vec<Chunk> {
        if text.is_empty() {
            return Vec::new();
        }

        let mut pieces = Vec::new();
        self.collect_pieces(text, 0, 0, &mut pieces);
        self.merge_pieces(text, &pieces)
    }

    /// Decompose `text` into contiguous pieces no longer than `chunk_size`,
    /// splitting at the coarsest separator that makes progress.
    fn collect_pieces<'t>(
        &self,
        text: &'t str,
        base: usize,
        depth: usize,
        out: &mut Vec<(usize, &'t str)>,
    ) {
        if text.len() <= self.chunk_size {
            if !text.is_empty() {
                out.push((base, text));
            }
            return;
        }

        if depth >= SEPARATORS.len() {
            self.char_cut(text, base, out);
            return;
        }

        let mut offset = base;
        for part in text.split_inclusive(SEPARATORS[depth]) {
            self.collect_pieces(part, offset, depth + 1, out);
            offset += part.len();
        }
    }

    /// Raw character cut for a run no separator can split. Pieces are sized
    /// to `chunk_size - chunk_overlap` so the merge pass can still carry
    /// overlap between the resulting chunks.
    fn char_cut<'t>(&self, text: &'t str, base: usize, out: &mut Vec<(usize, &'t str)>) {
        let step = self.chunk_size - self.chunk_overlap;
        let mut start = 0;
        for (i, c) in text.char_indices() {
            if i > start && i - start + c.len_utf8() > step {
                out.push((base + start, &text[start..i]));
                start = i;
            }
        }
        if start < text.len() {
            out.push((base + start, &text[start..]));
        }
    }

    /// Greedily pack pieces into chunks up to `chunk_size`. When a chunk is
    /// emitted, trailing content up to `chunk_overlap` is carried into the
    /// next chunk: whole trailing pieces when they fit the overlap budget,
    /// otherwise a suffix of the emitted chunk.
    fn merge_pieces(&self, source: &str, pieces: &[(usize, &str)]) -> Vec<Chunk> {
        let mut chunks: Vec<Chunk> = Vec::new();
        let mut cur: Vec<(usize, usize)> = Vec::new(); // (start, len) spans into source
        let mut cur_len = 0usize;

        for &(off, piece) in pieces {
            if cur_len + piece.len() > self.chunk_size && !cur.is_empty() {
                let start = cur[0].0;
                let end = off;
                chunks.push(Chunk {
                    text: source[start..end].to_string(),
                    index: chunks.len(),
                    start,
                    end,
                });

                // Carry whole trailing pieces that fit the overlap budget.
                let mut carry = Vec::new();
                let mut carry_len = 0usize;
                for &(o, l) in cur.iter().rev() {
                    if carry_len + l > self.chunk_overlap {
                        break;
                    }
                    carry.insert(0, (o, l));
                    carry_len += l;
                }

                // No piece fit: carry a raw suffix of the emitted chunk,
                // leaving room for the incoming piece.
                if carry.is_empty() && self.chunk_overlap > 0 {
                    let budget = self
                        .chunk_overlap
                        .min(self.chunk_size.saturating_sub(piece.len()));
                    if budget > 0 {
                        let mut carry_start = end - budget;
                        while !source.is_char_boundary(carry_start) {
                            carry_start += 1;
                        }
                        if carry_start < end {
                            carry.push((carry_start, end - carry_start));
                            carry_len = end - carry_start;
                        }
                    }
                }

                // The incoming piece must always fit next to the carry.
                while carry_len + piece.len() > self.chunk_size {
                    let (_, l) = carry.remove(0);
                    carry_len -= l;
                }

                cur = carry;
                cur_len = carry_len;
            }

            cur.push((off, piece.len()));
            cur_len += piece.len();
        }

        if !cur.is_empty() {
            let start = cur[0].0;
            let (last_off, last_len) = cur[cur.len() - 1];
            let end = last_off + last_len;
            chunks.push(Chunk {
                text: source[start..end].to_string(),
                index: chunks.len(),
                start,
                end,
            });
        }

        chunks
    }
}

impl Default for TextSplitter {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE, DEFAULT_CHUNK_OVERLAP)
    }
}
