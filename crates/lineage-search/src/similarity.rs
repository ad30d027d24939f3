//! Edit-distance string similarity.
//!
//! The score is the indel ratio: with `indel` the number of single-character
//! insertions and deletions that turn `a` into `b`,
//!
//! ```text
//! ratio(a, b) = round(100 * (len_a + len_b - indel) / (len_a + len_b))
//! ```
//!
//! Lengths count Unicode scalar values, not bytes. Two empty strings score
//! 100.

/// Length of the longest common subsequence, two-row dynamic programming.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Insertions plus deletions needed to turn `a` into `b`.
fn indel(a: &[char], b: &[char]) -> usize {
    a.len() + b.len() - 2 * lcs_len(a, b)
}

/// Similarity score in `0..=100`.
#[must_use]
pub fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 100;
    }
    let matched = total - indel(&a, &b);
    // 100 * matched / total, rounded half up
    let score = (200 * matched + total) / (2 * total);
    u8::try_from(score).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indel_distance(a: &str, b: &str) -> usize {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        indel(&a, &b)
    }

    #[test]
    fn identical_strings() {
        assert_eq!(ratio("Lars", "Lars"), 100);
        assert_eq!(indel_distance("Lars", "Lars"), 0);
    }

    #[test]
    fn empty_strings() {
        assert_eq!(ratio("", ""), 100);
        assert_eq!(ratio("", "abc"), 0);
        assert_eq!(indel_distance("", "abc"), 3);
    }

    #[test]
    fn suffix_added() {
        // lcs 4, total 10 -> 80
        assert_eq!(ratio("Lars", "Lars J"), 80);
        assert_eq!(indel_distance("Lars", "Lars J"), 2);
    }

    #[test]
    fn substitution_costs_two_indels() {
        assert_eq!(indel_distance("Anne", "Anna"), 2);
        assert_eq!(ratio("Anne", "Anna"), 75);
    }

    #[test]
    fn rounds_half_up() {
        // lcs 1 of "ab"/"a": 2*1/3 -> 66.67 -> 67
        assert_eq!(ratio("ab", "a"), 67);
        // 200 * 1 / 8 = 25.0 exactly
        assert_eq!(ratio("abcd", "axyz"), 25);
    }

    #[test]
    fn disjoint_strings() {
        assert_eq!(ratio("abc", "xyz"), 0);
    }

    #[test]
    fn counts_chars_not_bytes() {
        // Each 'ø' is two bytes but one char.
        assert_eq!(ratio("Søren", "Soren"), 80);
        assert_eq!(indel_distance("Søren", "Soren"), 2);
    }

    #[test]
    fn symmetric() {
        for (a, b) in [("Anne", "Pande"), ("Lars", "Lars J"), ("x", "")] {
            assert_eq!(ratio(a, b), ratio(b, a));
        }
    }

    #[test]
    fn case_sensitive() {
        assert_eq!(ratio("LARS", "lars"), 0);
    }
}
