use crate::core::types::MatchMode;

/// Length of the longest prefix of `fragment` that matches `target` within the
/// mode's mismatch budget.
///
/// Both slices are compared position by position from the start; the result never
/// exceeds the shorter of the two.
#[must_use]
pub fn extension_length(target: &[u8], fragment: &[u8], mode: MatchMode) -> usize {
    let budget = mode.mismatch_budget();
    let mut mismatches = 0;

    for (i, (a, b)) in target.iter().zip(fragment).enumerate() {
        if a != b {
            mismatches += 1;
            if mismatches > budget {
                return i;
            }
        }
    }

    target.len().min(fragment.len())
}
