//! Case-insensitive literal substring matching, shared by the global filter
//! and the cell highlighter.

use std::ops::Range;

/// A slice of a cell value, marked if it matched the search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub range: Range<usize>,
    pub matched: bool,
}

// Byte length of the prefix of `haystack` that equals `needle` ignoring case.
fn match_len(haystack: &str, needle: &str) -> Option<usize> {
    let mut hay = haystack.char_indices();
    for n in needle.chars() {
        let (_, h) = hay.next()?;
        if !h.to_lowercase().eq(n.to_lowercase()) {
            return None;
        }
    }
    Some(hay.next().map(|(idx, _)| idx).unwrap_or(haystack.len()))
}

fn find_from(haystack: &str, needle: &str, from: usize) -> Option<Range<usize>> {
    haystack[from..]
        .char_indices()
        .find_map(|(idx, _)| match_len(&haystack[from + idx..], needle).map(|len| (idx, len)))
        .map(|(idx, len)| from + idx..from + idx + len)
}

pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || find_from(haystack, needle, 0).is_some()
}

/// Splits `value` into alternating unmatched and matched fragments.
/// Matches are found left to right and never overlap. An empty term yields
/// the whole value as a single unmatched fragment.
pub fn split_matches(value: &str, term: &str) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    if value.is_empty() {
        return fragments;
    }
    if term.is_empty() {
        fragments.push(Fragment {
            range: 0..value.len(),
            matched: false,
        });
        return fragments;
    }

    let mut pos = 0;
    while pos < value.len() {
        match find_from(value, term, pos) {
            Some(hit) => {
                if hit.start > pos {
                    fragments.push(Fragment {
                        range: pos..hit.start,
                        matched: false,
                    });
                }
                pos = hit.end;
                fragments.push(Fragment {
                    range: hit,
                    matched: true,
                });
            }
            None => {
                fragments.push(Fragment {
                    range: pos..value.len(),
                    matched: false,
                });
                break;
            }
        }
    }
    fragments
}
