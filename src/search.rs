//! Longest simple directed cycle within one SCC.
//!
//! Bounded backtracking DFS over the SCC's induced subgraph.  Exponential in
//! the worst case (the problem is NP-hard); tractable here because the
//! (claim, status) partition keeps surviving SCCs small in practice.  A
//! node-expansion ceiling keeps adversarial groups from hanging the run.
//!
//! Rotational-symmetry pruning: each DFS root explores only vertices with a
//! strictly greater local id.  Every simple cycle has a unique minimum-id
//! vertex, so each cycle is discovered exactly once, rooted there.

use rustc_hash::FxHashMap;

use crate::graph::GroupGraph;
use crate::types::MAX_EXPANSIONS;

/// Ceiling on DFS node expansions per SCC.  0 disables the ceiling.
#[derive(Clone, Copy, Debug)]
pub struct SearchLimits {
    pub max_expansions: u64,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_expansions: MAX_EXPANSIONS,
        }
    }
}

/// Result of searching one SCC.
///
/// `length` is always witnessed by an actual cycle (0 = none proven).  When
/// `truncated` is set the ceiling was hit and longer cycles may exist; the
/// SCC size is then the only known upper bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    pub length: usize,
    pub truncated: bool,
}

/// Length of the longest simple directed cycle inside `scc`, a set of
/// vertex ids of `graph` (as produced by [`crate::scc::cycle_seeds`]).
pub fn longest_cycle(graph: &GroupGraph, scc: &[usize], limits: &SearchLimits) -> SearchOutcome {
    let m = scc.len();

    // Renumber the SCC 0..m-1 and restrict adjacency to members.  Local ids
    // double as the symmetry-breaking order.
    let mut local: FxHashMap<usize, usize> = FxHashMap::default();
    for (i, &v) in scc.iter().enumerate() {
        local.insert(v, i);
    }
    let local_adj: Vec<Vec<usize>> = scc
        .iter()
        .map(|&v| {
            graph.adj[v]
                .iter()
                .filter_map(|w| local.get(w).copied())
                .collect()
        })
        .collect();

    let mut best = 0usize;
    let mut expansions = 0u64;
    let mut on_path = vec![false; m];
    // DFS stack: (vertex, next_successor_index)
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in 0..m {
        // Only root and ids above it participate, so no cycle rooted here
        // can exceed m - root edges.  Roots ascend, so the first failure of
        // this bound ends the whole search.
        if m - root <= best {
            break;
        }

        on_path[root] = true;
        let mut path_len = 1usize;
        stack.push((root, 0));

        while !stack.is_empty() {
            let (v, ni) = *stack.last().unwrap();
            let mut next_ni = ni;
            let mut advanced = false;

            while next_ni < local_adj[v].len() {
                let w = local_adj[v][next_ni];
                next_ni += 1;
                if w == root {
                    // Path closes at the root: path_len vertices, path_len edges.
                    if path_len > best {
                        best = path_len;
                    }
                    continue;
                }
                if w < root || on_path[w] {
                    continue;
                }
                expansions += 1;
                if limits.max_expansions > 0 && expansions > limits.max_expansions {
                    return SearchOutcome {
                        length: best,
                        truncated: true,
                    };
                }
                stack.last_mut().unwrap().1 = next_ni;
                on_path[w] = true;
                path_len += 1;
                stack.push((w, 0));
                advanced = true;
                break;
            }

            if !advanced {
                stack.pop();
                on_path[v] = false;
                path_len -= 1;
            }
        }

        if best == m {
            break; // Hamiltonian cycle found; nothing longer exists.
        }
    }

    SearchOutcome {
        length: best,
        truncated: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GroupGraph;
    use crate::scc::cycle_seeds;

    fn graph(pairs: &[(&str, &str)]) -> GroupGraph {
        let edges: Vec<(String, String)> = pairs
            .iter()
            .map(|(s, d)| (s.to_string(), d.to_string()))
            .collect();
        GroupGraph::from_edges(&edges)
    }

    fn search_all(g: &GroupGraph, limits: &SearchLimits) -> SearchOutcome {
        let mut out = SearchOutcome {
            length: 0,
            truncated: false,
        };
        for seed in cycle_seeds(g) {
            let r = longest_cycle(g, &seed, limits);
            out.length = out.length.max(r.length);
            out.truncated |= r.truncated;
        }
        out
    }

    #[test]
    fn test_self_loop_is_length_one() {
        let g = graph(&[("A", "A")]);
        let out = search_all(&g, &SearchLimits::default());
        assert_eq!(out.length, 1);
        assert!(!out.truncated);
    }

    #[test]
    fn test_mutual_pair_is_length_two() {
        let g = graph(&[("A", "B"), ("B", "A")]);
        assert_eq!(search_all(&g, &SearchLimits::default()).length, 2);
    }

    #[test]
    fn test_triangle() {
        let g = graph(&[("A", "B"), ("B", "C"), ("C", "A")]);
        assert_eq!(search_all(&g, &SearchLimits::default()).length, 3);
    }

    #[test]
    fn test_dense_clique_is_hamiltonian() {
        // All 12 directed edges among 4 vertices; the answer is 4.
        let names = ["A", "B", "C", "D"];
        let mut pairs = Vec::new();
        for s in names {
            for d in names {
                if s != d {
                    pairs.push((s, d));
                }
            }
        }
        let g = graph(&pairs);
        assert_eq!(search_all(&g, &SearchLimits::default()).length, 4);
    }

    #[test]
    fn test_two_triangles_sharing_a_vertex() {
        // The shared vertex is a cut vertex: no simple cycle exceeds 3.
        let g = graph(&[
            ("X", "A"),
            ("A", "B"),
            ("B", "X"),
            ("X", "C"),
            ("C", "D"),
            ("D", "X"),
        ]);
        assert_eq!(search_all(&g, &SearchLimits::default()).length, 3);
    }

    #[test]
    fn test_short_and_long_cycle_in_one_scc() {
        // a->b->a plus a->b->c->d->a: longest is 4.
        let g = graph(&[
            ("a", "b"),
            ("b", "a"),
            ("b", "c"),
            ("c", "d"),
            ("d", "a"),
        ]);
        assert_eq!(search_all(&g, &SearchLimits::default()).length, 4);
    }

    #[test]
    fn test_self_loop_inside_larger_scc() {
        let g = graph(&[("A", "A"), ("A", "B"), ("B", "A")]);
        assert_eq!(search_all(&g, &SearchLimits::default()).length, 2);
    }

    #[test]
    fn test_expansion_ceiling_truncates() {
        // K8 has 8! rooted paths to enumerate; a ceiling of 10 cannot finish.
        let names = ["a", "b", "c", "d", "e", "f", "g", "h"];
        let mut pairs = Vec::new();
        for s in names {
            for d in names {
                if s != d {
                    pairs.push((s, d));
                }
            }
        }
        let g = graph(&pairs);
        let out = search_all(&g, &SearchLimits { max_expansions: 10 });
        assert!(out.truncated);
        assert!(out.length <= 8);
    }

    #[test]
    fn test_zero_ceiling_means_unlimited() {
        let g = graph(&[("A", "B"), ("B", "C"), ("C", "A")]);
        let out = search_all(&g, &SearchLimits { max_expansions: 0 });
        assert_eq!(out.length, 3);
        assert!(!out.truncated);
    }
}
