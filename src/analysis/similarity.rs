/// Scores how closely two names resemble each other.
///
/// Scores are normalized to `0.0..=1.0`, where `1.0` means identical. The job
/// matcher only relies on this ordering, so the heuristic can be replaced
/// without touching the selection policy.
pub trait Similarity {
    fn score(&self, a: &str, b: &str) -> f64;
}

/// Ratcliff/Obershelp similarity: `2 * M / T`, where `M` is the number of
/// characters in matching blocks and `T` the combined length of both strings.
///
/// Matching blocks are found by taking the longest common substring and
/// recursing into the unmatched text on either side of it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceRatio;

impl Similarity for SequenceRatio {
    fn score(&self, a: &str, b: &str) -> f64 {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();

        let total = a.len() + b.len();
        if total == 0 {
            return 1.0;
        }

        #[allow(clippy::cast_precision_loss)]
        let ratio = 2.0 * matching_characters(&a, &b) as f64 / total as f64;
        ratio
    }
}

fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = longest_match(a, b, alo, ahi, blo, bhi);
        if size == 0 {
            continue;
        }

        matched += size;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            pending.push((i + size, ahi, j + size, bhi));
        }
    }

    matched
}

/// Longest common substring of `a[alo..ahi]` and `b[blo..bhi]`, returned as
/// `(start_in_a, start_in_b, length)`. Ties go to the earliest block in `a`,
/// then in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let mut best = (alo, blo, 0);
    // previous[k]: length of the common run ending at a[i - 1] and b[blo + k - 1]
    let mut previous = vec![0usize; bhi - blo + 1];

    for i in alo..ahi {
        let mut current = vec![0usize; bhi - blo + 1];
        for j in blo..bhi {
            if a[i] != b[j] {
                continue;
            }
            let k = previous[j - blo] + 1;
            current[j - blo + 1] = k;
            if k > best.2 {
                best = (i + 1 - k, j + 1 - k, k);
            }
        }
        previous = current;
    }

    best
}
