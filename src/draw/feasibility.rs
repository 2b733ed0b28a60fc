//! Upfront feasibility check for a constrained draw.
//!
//! A valid assignment is a perfect matching in the bipartite graph where
//! giver `i` may be matched to recipient `j` unless `i == j` or the pair is
//! excluded. Kuhn's augmenting-path search decides whether one exists in
//! `O(n * e)`, which is instant for group sizes this tool is used with.

/// Returns `true` if a perfect matching exists over `n` givers and `n`
/// recipients where `allowed(giver, recipient)` lists the usable edges.
pub fn has_perfect_matching(n: usize, allowed: impl Fn(usize, usize) -> bool) -> bool {
    let edges: Vec<Vec<usize>> =
        (0..n).map(|giver| (0..n).filter(|&recipient| allowed(giver, recipient)).collect()).collect();

    // owner[recipient] = giver currently matched to that recipient
    let mut owner: Vec<Option<usize>> = vec![None; n];

    for giver in 0..n {
        let mut visited = vec![false; n];
        if !augment(giver, &edges, &mut owner, &mut visited) {
            return false;
        }
    }
    true
}

fn augment(
    giver: usize,
    edges: &[Vec<usize>],
    owner: &mut [Option<usize>],
    visited: &mut [bool],
) -> bool {
    for &recipient in &edges[giver] {
        if visited[recipient] {
            continue;
        }
        visited[recipient] = true;
        let free = match owner[recipient] {
            None => true,
            Some(other) => augment(other, edges, owner, visited),
        };
        if free {
            owner[recipient] = Some(giver);
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derangement_edges(giver: usize, recipient: usize) -> bool {
        giver != recipient
    }

    #[test]
    fn single_node_has_no_derangement() {
        assert!(!has_perfect_matching(1, derangement_edges));
    }

    #[test]
    fn pair_and_larger_groups_are_feasible() {
        for n in 2..8 {
            assert!(has_perfect_matching(n, derangement_edges), "n = {n}");
        }
    }

    #[test]
    fn empty_graph_is_trivially_matched() {
        assert!(has_perfect_matching(0, |_, _| false));
    }

    #[test]
    fn isolated_giver_blocks_matching() {
        // giver 0 may only give to itself
        assert!(!has_perfect_matching(3, |g, r| g != r && g != 0));
    }

    #[test]
    fn needs_augmenting_path() {
        // 0 -> {1, 2}, 1 -> {0}, 2 -> {1}: the greedy 0->1 must be undone
        let allowed = |g: usize, r: usize| matches!((g, r), (0, 1 | 2) | (1, 0) | (2, 1));
        assert!(has_perfect_matching(3, allowed));
    }

    #[test]
    fn two_givers_competing_for_one_recipient() {
        // 0 and 1 can only give to 2
        let allowed = |g: usize, r: usize| matches!((g, r), (0 | 1, 2) | (2, 0 | 1));
        assert!(!has_perfect_matching(3, allowed));
    }
}
