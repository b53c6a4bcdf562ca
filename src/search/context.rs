//! Context-window grouping for content-mode search output.

/// Merges per-match context windows into maximal contiguous line-index runs.
///
/// Each match index `m` contributes the window
/// `[m - before, m + after]` clamped to `[0, total_lines - 1]`. Walking the
/// windows of matches in ascending order, an index already placed is skipped
/// and an index that is not adjacent to the open run (gap of two or more)
/// closes it and starts the next. The result is the union of all windows as
/// merged ranges: groups are contiguous, ascending, and separated from each
/// other by at least one unshown line. Adjacency alone merges, so matches on
/// consecutive lines with zero context still form one group.
pub(crate) fn group_context(
    total_lines: usize,
    match_indices: &[usize],
    before: usize,
    after: usize,
) -> Vec<Vec<usize>> {
    let mut groups: Vec<Vec<usize>> = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut next_unshown = 0usize;

    for &m in match_indices {
        let start = m.saturating_sub(before);
        let end = (m.saturating_add(after).saturating_add(1)).min(total_lines);
        for idx in start..end {
            // Windows arrive in ascending match order, so everything below
            // the high-water mark has been placed already.
            if idx < next_unshown {
                continue;
            }
            if let Some(&last) = current.last() {
                if idx > last + 1 {
                    groups.push(std::mem::take(&mut current));
                }
            }
            current.push(idx);
            next_unshown = idx + 1;
        }
    }
    if !current.is_empty() {
        groups.push(current);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_matches_no_groups() {
        assert!(group_context(10, &[], 2, 2).is_empty());
    }

    #[test]
    fn empty_file_yields_no_groups() {
        assert!(group_context(0, &[0], 5, 5).is_empty());
    }

    #[test]
    fn single_match_without_context_is_its_own_group() {
        assert_eq!(group_context(5, &[2], 0, 0), vec![vec![2]]);
    }

    #[test]
    fn windows_are_clamped_to_file_bounds() {
        assert_eq!(group_context(3, &[0], 4, 4), vec![vec![0, 1, 2]]);
        assert_eq!(group_context(3, &[2], 0, 9), vec![vec![2]]);
    }

    #[test]
    fn overlapping_windows_merge_into_one_group() {
        // matches at 0 and 2 with one line of context: [0,1] and [1,3] overlap
        assert_eq!(group_context(4, &[0, 2], 1, 1), vec![vec![0, 1, 2, 3]]);
    }

    #[test]
    fn adjacent_windows_merge_even_with_zero_context() {
        // consecutive matched lines, no context: adjacency alone merges
        assert_eq!(group_context(5, &[1, 2], 0, 0), vec![vec![1, 2]]);
    }

    #[test]
    fn a_gap_of_one_line_separates_groups() {
        assert_eq!(group_context(10, &[0, 5], 1, 1), vec![
            vec![0, 1],
            vec![4, 5, 6]
        ]);
    }

    #[test]
    fn groups_are_pairwise_non_adjacent() {
        // windows touching end-to-end (last of one is next_start - 1) merge
        assert_eq!(group_context(10, &[1, 4], 1, 1), vec![vec![
            0, 1, 2, 3, 4, 5
        ]]);
    }

    #[test]
    fn union_equals_all_clamped_windows() {
        let total = 50;
        let matches = [0, 3, 9, 10, 30, 49];
        let (before, after) = (2, 3);
        let groups = group_context(total, &matches, before, after);

        let mut expected: Vec<usize> = Vec::new();
        for &m in &matches {
            for idx in m.saturating_sub(before)..(m + after + 1).min(total) {
                if !expected.contains(&idx) {
                    expected.push(idx);
                }
            }
        }
        expected.sort_unstable();

        let flattened: Vec<usize> = groups.iter().flatten().copied().collect();
        assert_eq!(flattened, expected);

        for pair in groups.windows(2) {
            let last = *pair[0].last().unwrap();
            let first = *pair[1].first().unwrap();
            assert!(first > last + 1, "groups must be separated by a gap");
        }
    }

    #[test]
    fn asymmetric_context_sizes() {
        assert_eq!(group_context(10, &[5], 2, 0), vec![vec![3, 4, 5]]);
        assert_eq!(group_context(10, &[5], 0, 2), vec![vec![5, 6, 7]]);
    }
}
