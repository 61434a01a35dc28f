//! Ratcliff/Obershelp sequence similarity over Unicode scalar values.

/// Similarity ratio of `a` and `b` in `[0, 1]`.
///
/// `2·M / (|a| + |b|)`, where `M` counts the characters in matching blocks
/// found by taking the longest common substring (earliest in `a`, then
/// earliest in `b`) and recursing on both sides of it. Comparison is
/// case-sensitive; two empty strings score `1.0`.
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    #[allow(clippy::cast_precision_loss)]
    let ratio = (2 * matching_characters(&a, &b)) as f64 / total as f64;
    ratio
}

fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((a_lo, a_hi, b_lo, b_hi)) = pending.pop() {
        let (i, j, size) = longest_match(a, b, a_lo, a_hi, b_lo, b_hi);
        if size == 0 {
            continue;
        }
        matched += size;
        if a_lo < i && b_lo < j {
            pending.push((a_lo, i, b_lo, j));
        }
        if i + size < a_hi && j + size < b_hi {
            pending.push((i + size, a_hi, j + size, b_hi));
        }
    }

    matched
}

/// Longest common block of `a[a_lo..a_hi]` and `b[b_lo..b_hi]` as
/// `(start_in_a, start_in_b, size)`. Ties resolve to the earliest start in
/// `a`, then in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    a_lo: usize,
    a_hi: usize,
    b_lo: usize,
    b_hi: usize,
) -> (usize, usize, usize) {
    let mut best = (a_lo, b_lo, 0);
    // row[j + 1] is the length of the common run ending at a[i], b[j].
    let mut previous = vec![0usize; b.len() + 1];
    let mut current = vec![0usize; b.len() + 1];

    for i in a_lo..a_hi {
        for j in b_lo..b_hi {
            current[j + 1] = if a[i] == b[j] { previous[j] + 1 } else { 0 };
            let run = current[j + 1];
            if run > best.2 {
                best = (i + 1 - run, j + 1 - run, run);
            }
        }
        std::mem::swap(&mut previous, &mut current);
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn identical_strings_score_one() {
        assert_close(similarity("hessental", "hessental"), 1.0);
        assert_close(similarity("", ""), 1.0);
    }

    #[test]
    fn disjoint_strings_score_zero() {
        assert_close(similarity("abc", "xyz"), 0.0);
        assert_close(similarity("abc", ""), 0.0);
    }

    #[test]
    fn missing_space_costs_little() {
        assert_close(similarity("testlocation", "test location"), 24.0 / 25.0);
    }

    #[test]
    fn dropped_letter_costs_little() {
        assert_close(similarity("test lcation", "test location"), 24.0 / 25.0);
    }

    #[test]
    fn swapped_words_keep_the_longer_block() {
        assert_close(similarity("location test", "test location"), 16.0 / 26.0);
    }

    #[test]
    fn matches_known_ratios() {
        assert_close(similarity("abcd", "bcde"), 0.75);
        assert_close(similarity("qabxcd", "abycdf"), 2.0 * 4.0 / 12.0);
    }

    #[test]
    fn argument_order_changes_tie_breaks() {
        assert_close(similarity("diet", "tide"), 0.5);
        assert_close(similarity("tide", "diet"), 0.25);
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_close(similarity("süd", "sud"), 2.0 * 2.0 / 6.0);
    }

    #[test]
    fn is_case_sensitive() {
        assert!(similarity("Hessental", "hessental") < 1.0);
    }
}
