//! Dinic's blocking-flow max-flow algorithm (spec §4.2).
//!
//! Phases:
//! 1. BFS builds a level graph from `s`, following edges with residual
//!    capacity `> ε`.
//! 2. While `t` is reachable, repeatedly push a blocking flow through the
//!    level graph: DFS from `s` to `t` along strictly level-increasing
//!    edges, advancing a per-vertex cursor that never rewinds within a
//!    phase (the Even-Itai dead-end pruning).
//!
//! The DFS is iterative rather than recursive: spec §5 warns that "the
//! recursive DFS may consume stack proportional to the longest augmenting
//! path" and permits "an iterative reformulation with an explicit work
//! stack."

use std::collections::VecDeque;

use crate::graph::FlowGraph;
use crate::EPS;

/// Compute a maximum flow from `s` to `t` on `graph`, mutating its
/// residual capacities in place. Returns the total flow pushed.
pub fn max_flow(graph: &mut FlowGraph, s: usize, t: usize) -> f64 {
    let mut total = 0.0;
    loop {
        let level = bfs_levels(graph, s);
        if level[t] < 0 {
            break;
        }
        let mut cursor = vec![0usize; graph.len()];
        loop {
            let pushed = blocking_dfs_step(graph, s, t, &level, &mut cursor);
            if pushed <= EPS {
                break;
            }
            total += pushed;
        }
    }
    total
}

/// BFS from `s` over edges with residual `> ε`. `level[v] < 0` means
/// unreachable.
fn bfs_levels(graph: &FlowGraph, s: usize) -> Vec<i64> {
    let mut level = vec![-1i64; graph.len()];
    level[s] = 0;
    let mut queue = VecDeque::new();
    queue.push_back(s);
    while let Some(u) = queue.pop_front() {
        for edge in graph.edges(u) {
            if FlowGraph::has_residual(edge) && level[edge.to] < 0 {
                level[edge.to] = level[u] + 1;
                queue.push_back(edge.to);
            }
        }
    }
    level
}

/// One frame of the iterative augmenting-path search: the vertex we're
/// standing at, and the bottleneck capacity accumulated getting there.
struct Frame {
    vertex: usize,
    /// Index into this vertex's adjacency list of the edge we descended
    /// through to reach the *next* frame (None for the start frame).
    via_edge: Option<usize>,
    bottleneck: f64,
}

/// Find one augmenting path from `s` to `t` restricted to the level graph
/// and push the bottleneck flow along it. Returns the amount pushed, or 0
/// if no augmenting path remains in this phase.
fn blocking_dfs_step(
    graph: &mut FlowGraph,
    s: usize,
    t: usize,
    level: &[i64],
    cursor: &mut [usize],
) -> f64 {
    let mut stack = vec![Frame {
        vertex: s,
        via_edge: None,
        bottleneck: f64::INFINITY,
    }];

    while let Some(top) = stack.last_mut() {
        let u = top.vertex;
        if u == t {
            let bottleneck = top.bottleneck;
            augment_path(graph, &stack, bottleneck);
            return bottleneck;
        }

        let num_edges = graph.edges(u).len();
        let mut advanced = false;
        while cursor[u] < num_edges {
            let idx = cursor[u];
            let edge = graph.edges(u)[idx];
            if FlowGraph::has_residual(&edge) && level[edge.to] == level[u] + 1 {
                let next_bottleneck = top.bottleneck.min(edge.cap);
                stack.push(Frame {
                    vertex: edge.to,
                    via_edge: Some(idx),
                    bottleneck: next_bottleneck,
                });
                advanced = true;
                break;
            }
            cursor[u] += 1;
        }
        if !advanced {
            // Dead end: this vertex contributes no more augmenting paths
            // in the current phase. Pop it and let the parent advance its
            // own cursor past the edge that led here.
            stack.pop();
            if let Some(parent) = stack.last() {
                cursor[parent.vertex] += 1;
            }
        }
    }
    0.0
}

/// Replay the discovered path (recorded as `via_edge` on each frame after
/// the first) and push `amount` of flow along each edge.
fn augment_path(graph: &mut FlowGraph, stack: &[Frame], amount: f64) {
    for window in stack.windows(2) {
        let u = window[0].vertex;
        let idx = window[1]
            .via_edge
            .expect("every frame past the first was reached via an edge");
        graph.push_flow(u, idx, amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::FlowGraph;

    #[test]
    fn single_path_saturates_bottleneck() {
        let mut g = FlowGraph::new(3);
        g.add_edge(0, 1, 5.0);
        g.add_edge(1, 2, 3.0);
        let flow = max_flow(&mut g, 0, 2);
        assert!((flow - 3.0).abs() < EPS);
    }

    #[test]
    fn parallel_paths_sum() {
        let mut g = FlowGraph::new(4);
        g.add_edge(0, 1, 10.0);
        g.add_edge(0, 2, 10.0);
        g.add_edge(1, 3, 10.0);
        g.add_edge(2, 3, 10.0);
        let flow = max_flow(&mut g, 0, 3);
        assert!((flow - 20.0).abs() < EPS);
    }

    #[test]
    fn disconnected_graph_has_zero_flow() {
        let mut g = FlowGraph::new(4);
        g.add_edge(0, 1, 10.0);
        g.add_edge(2, 3, 10.0);
        let flow = max_flow(&mut g, 0, 3);
        assert_eq!(flow, 0.0);
    }

    #[test]
    fn classic_textbook_network() {
        // Wikipedia's canonical Dinic example: max flow is 10+10 = ... use
        // a well known instance with max flow 23.
        let mut g = FlowGraph::new(6);
        g.add_edge(0, 1, 16.0);
        g.add_edge(0, 2, 13.0);
        g.add_edge(1, 2, 10.0);
        g.add_edge(2, 1, 4.0);
        g.add_edge(1, 3, 12.0);
        g.add_edge(3, 2, 9.0);
        g.add_edge(2, 4, 14.0);
        g.add_edge(4, 3, 7.0);
        g.add_edge(3, 5, 20.0);
        g.add_edge(4, 5, 4.0);
        let flow = max_flow(&mut g, 0, 5);
        assert!((flow - 23.0).abs() < EPS);
    }

    #[test]
    fn capacities_spanning_many_orders_of_magnitude() {
        let mut g = FlowGraph::new(3);
        g.add_edge(0, 1, 1e12);
        g.add_edge(1, 2, 1e-3);
        let flow = max_flow(&mut g, 0, 2);
        assert!((flow - 1e-3).abs() < 1e-9);
    }
}
