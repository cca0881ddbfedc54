//! Strongly connected components via iterative Tarjan.
//!
//! R.E. Tarjan, "Depth-first search and linear graph algorithms,"
//! SIAM J. Comput., 1(2):146-160, June 1972.
//!
//! The traversal uses an explicit work stack of (vertex, successor position)
//! frames; group graphs can contain chains long enough to exhaust the native
//! call stack, so recursion is never relied on.

use crate::graph::GroupGraph;

/// Partition the vertices of `adj` into SCCs.
///
/// Returned in reverse topological order (sinks first); callers that need
/// source-first order reverse the result.
pub fn strongly_connected(adj: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let n = adj.len();
    let mut index_counter = 0usize;
    let mut index = vec![usize::MAX; n]; // MAX = unvisited
    let mut lowlink = vec![0usize; n];
    let mut on_stack = vec![false; n];
    let mut tarjan_stack: Vec<usize> = Vec::new();
    let mut sccs: Vec<Vec<usize>> = Vec::new();
    // DFS call stack: (vertex, next_successor_index)
    let mut call_stack: Vec<(usize, usize)> = Vec::new();

    for start in 0..n {
        if index[start] != usize::MAX {
            continue;
        }

        index[start] = index_counter;
        lowlink[start] = index_counter;
        index_counter += 1;
        on_stack[start] = true;
        tarjan_stack.push(start);
        call_stack.push((start, 0));

        while let Some(&(v, ni)) = call_stack.last() {
            if ni < adj[v].len() {
                let w = adj[v][ni];
                call_stack.last_mut().unwrap().1 += 1;
                if index[w] == usize::MAX {
                    // Tree edge: descend into w
                    index[w] = index_counter;
                    lowlink[w] = index_counter;
                    index_counter += 1;
                    on_stack[w] = true;
                    tarjan_stack.push(w);
                    call_stack.push((w, 0));
                } else if on_stack[w] {
                    // Back-edge into current SCC
                    if index[w] < lowlink[v] {
                        lowlink[v] = index[w];
                    }
                }
            } else {
                call_stack.pop();
                if let Some(&(parent, _)) = call_stack.last() {
                    if lowlink[v] < lowlink[parent] {
                        lowlink[parent] = lowlink[v];
                    }
                }
                if lowlink[v] == index[v] {
                    let mut scc = Vec::new();
                    loop {
                        let w = tarjan_stack.pop().unwrap();
                        on_stack[w] = false;
                        scc.push(w);
                        if w == v {
                            break;
                        }
                    }
                    sccs.push(scc);
                }
            }
        }
    }

    sccs
}

/// SCCs that can host a cycle: two or more vertices, or a single vertex with
/// a self-loop (a length-1 candidate).  Every other singleton is discarded.
pub fn cycle_seeds(graph: &GroupGraph) -> Vec<Vec<usize>> {
    strongly_connected(&graph.adj)
        .into_iter()
        .filter(|scc| scc.len() >= 2 || graph.self_loop[scc[0]])
        .collect()
}
