//! Edit-distance and common-substring measures over chars.

/// Edit distance where a substitution costs 2 (one deletion plus one insertion)
#[must_use]
pub fn indel_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return a.len() + b.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut cur = vec![0usize; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        cur[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitute = prev[j] + if ca == cb { 0 } else { 2 };
            cur[j + 1] = substitute.min(prev[j + 1] + 1).min(cur[j] + 1);
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[b.len()]
}

/// Normalized similarity `1 - indel_distance / (len_a + len_b)`; 1.0 for two empty strings
#[must_use]
pub fn levenshtein_ratio(a: &str, b: &str) -> f64 {
    let total = a.chars().count() + b.chars().count();
    if total == 0 {
        return 1.0;
    }
    1.0 - indel_distance(a, b) as f64 / total as f64
}

/// A contiguous run shared by two strings, in char offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LongestMatch {
    pub a_start: usize,
    pub b_start: usize,
    pub size: usize,
}

/// Longest common contiguous substring.
///
/// Among equally long matches the one starting earliest in `a`, then in
/// `b`, wins.
#[must_use]
pub fn longest_common_substring(a: &str, b: &str) -> LongestMatch {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut best = LongestMatch::default();
    if a.is_empty() || b.is_empty() {
        return best;
    }

    // run[j + 1] = length of the common run ending at a[i], b[j]
    let mut prev = vec![0usize; b.len() + 1];
    let mut cur = vec![0usize; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        for (j, cb) in b.iter().enumerate() {
            cur[j + 1] = if ca == cb { prev[j] + 1 } else { 0 };
            if cur[j + 1] > best.size {
                best = LongestMatch {
                    a_start: i + 1 - cur[j + 1],
                    b_start: j + 1 - cur[j + 1],
                    size: cur[j + 1],
                };
            }
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    best
}
