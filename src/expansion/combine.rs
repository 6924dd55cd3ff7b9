//! Pairwise-concatenation cartesian product.

/// Combines two ordered sequences into their pairwise concatenations.
///
/// Result index `k = i + j * seq_a.len()` holds `seq_a[i] + seq_b[j]`:
/// the first sequence's index varies fastest. This ordering is
/// load-bearing for output compatibility and must not change. An empty
/// `seq_b` collapses the whole product to nothing even when `seq_a` is
/// non-empty; there is no continuation to attach.
pub fn combine(seq_a: &[String], seq_b: &[String]) -> Vec<String> {
    let mut result = Vec::with_capacity(seq_a.len() * seq_b.len());
    for suffix in seq_b {
        for prefix in seq_a {
            result.push(format!("{prefix}{suffix}"));
        }
    }
    result
}
