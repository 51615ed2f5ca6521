//! Character-offset partitioning for size-limited backends

/// Split `text` into contiguous segments of at most `max_chars` characters.
///
/// Boundaries are plain character offsets; words may be split. Concatenating
/// the segments yields `text` exactly. Empty input yields no segments. A
/// `max_chars` of zero is treated as one.
pub fn split_chunks(text: &str, max_chars: usize) -> Vec<&str> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::with_capacity(text.len() / max_chars + 1);
    let mut start = 0;
    let mut count = 0;

    for (offset, _) in text.char_indices() {
        if count == max_chars {
            chunks.push(&text[start..offset]);
            start = offset;
            count = 0;
        }
        count += 1;
    }

    if start < text.len() {
        chunks.push(&text[start..]);
    }

    chunks
}
