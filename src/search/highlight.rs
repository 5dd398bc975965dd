//! Match highlighting over the `source/name` display string.

/// Computes highlight spans for `query` inside `text`.
///
/// Matching is case-insensitive. A contiguous occurrence of the whole query is
/// preferred; otherwise each query character is matched greedily at its earliest
/// position after the previous match, and matching stops at the first character
/// that cannot be found (the matched prefix is still reported).
///
/// Spans are half-open `(start, end)` ranges of *character* indices, coalesced so
/// adjacent matched characters form a single span.
///
/// ```
/// use zacman::search::highlight_spans;
///
/// assert_eq!(highlight_spans("extra/firefox", "fox"), vec![(10, 13)]);
/// assert_eq!(highlight_spans("core/vim", "cvm"), vec![(0, 1), (5, 6), (7, 8)]);
/// ```
#[must_use]
pub fn highlight_spans(text: &str, query: &str) -> Vec<(usize, usize)> {
    if query.is_empty() {
        return vec![];
    }

    let haystack = fold(text);
    let needle = fold(query);

    let indices: Vec<usize> = find_contiguous(&haystack, &needle).map_or_else(
        || greedy_subsequence(&haystack, &needle),
        |start| (start..start + needle.len()).collect(),
    );

    coalesce(&indices)
}

/// Lowercases per character so indices stay aligned with the input text.
fn fold(s: &str) -> Vec<char> {
    s.chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect()
}

fn find_contiguous(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn greedy_subsequence(haystack: &[char], needle: &[char]) -> Vec<usize> {
    let mut indices = Vec::with_capacity(needle.len());
    let mut pos = 0;

    for &wanted in needle {
        match haystack[pos..].iter().position(|&c| c == wanted) {
            Some(offset) => {
                indices.push(pos + offset);
                pos += offset + 1;
            }
            None => break,
        }
    }

    indices
}

/// Collapses sorted indices into runs of consecutive positions.
fn coalesce(indices: &[usize]) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut run: Option<(usize, usize)> = None;

    for &idx in indices {
        run = match run {
            Some((start, end)) if idx == end => Some((start, idx + 1)),
            Some(done) => {
                ranges.push(done);
                Some((idx, idx + 1))
            }
            None => Some((idx, idx + 1)),
        };
    }

    if let Some(done) = run {
        ranges.push(done);
    }

    ranges
}
