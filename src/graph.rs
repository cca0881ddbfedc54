//! Compact directed graph for one group.
//!
//! Vertex ids are dense integers assigned in first-seen order, adjacency is
//! flat successor vectors (sorted, deduplicated), so dropping a group is a
//! single deallocation and traversal stays cache-friendly.  Self-loops are
//! kept in the adjacency and additionally flagged per vertex.

use rustc_hash::FxHashMap;

/// One group's simple directed graph.
#[derive(Clone, Debug, Default)]
pub struct GroupGraph {
    /// Vertex id -> system name, in first-seen order.
    pub names: Vec<String>,
    /// Deduplicated successor ids per vertex.
    pub adj: Vec<Vec<usize>>,
    /// True for vertices with an edge to themselves.
    pub self_loop: Vec<bool>,
}

fn intern(
    index: &mut FxHashMap<String, usize>,
    names: &mut Vec<String>,
    adj: &mut Vec<Vec<usize>>,
    self_loop: &mut Vec<bool>,
    name: &str,
) -> usize {
    if let Some(&id) = index.get(name) {
        return id;
    }
    let id = names.len();
    index.insert(name.to_string(), id);
    names.push(name.to_string());
    adj.push(Vec::new());
    self_loop.push(false);
    id
}

impl GroupGraph {
    /// Collapse a group's edge list into a simple graph: parallel edges
    /// removed, self-loops retained and flagged.
    pub fn from_edges(edges: &[(String, String)]) -> GroupGraph {
        let mut index: FxHashMap<String, usize> = FxHashMap::default();
        let mut names = Vec::new();
        let mut adj: Vec<Vec<usize>> = Vec::new();
        let mut self_loop = Vec::new();

        for (src, dst) in edges {
            let s = intern(&mut index, &mut names, &mut adj, &mut self_loop, src);
            let d = intern(&mut index, &mut names, &mut adj, &mut self_loop, dst);
            adj[s].push(d);
            if s == d {
                self_loop[s] = true;
            }
        }
        for succ in &mut adj {
            succ.sort_unstable();
            succ.dedup();
        }
        GroupGraph {
            names,
            adj,
            self_loop,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.names.len()
    }
}
