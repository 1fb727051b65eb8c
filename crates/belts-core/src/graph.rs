//! The residual flow graph: a parallel-array adjacency layout where each
//! vertex owns a contiguous `Vec` of edge records, and every edge knows the
//! index of its reverse twin in the head vertex's own adjacency list.
//!
//! Spec §9: "use a parallel-array adjacency layout... This gives O(1)
//! reverse lookup without heap indirection and is the canonical efficient
//! layout."

use crate::EPS;

/// One directed residual edge.
#[derive(Debug, Clone, Copy)]
pub struct EdgeRecord {
    /// The vertex this edge points to.
    pub to: usize,
    /// Remaining capacity. Mutated in place as flow is pushed.
    pub cap: f64,
    /// Index of this edge's reverse twin within `to`'s adjacency list.
    pub rev: usize,
}

/// A stable handle to one forward residual edge, used by the reconstructor
/// to query "remaining capacity of this original edge" after the solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeRef {
    pub(crate) from: usize,
    pub(crate) idx: usize,
}

/// The residual graph itself: `adj[v]` is vertex `v`'s outgoing edge list.
///
/// Allocation is one-shot: the vertex count is fixed at construction and
/// edges are only ever added during the build phase, never removed (spec
/// §5: "The engine never inserts or removes edges after construction --
/// only mutates capacity values and cursor positions.").
#[derive(Debug, Clone)]
pub struct FlowGraph {
    adj: Vec<Vec<EdgeRecord>>,
}

impl FlowGraph {
    /// Create a graph with `n` vertices and no edges.
    pub fn new(n: usize) -> Self {
        Self {
            adj: vec![Vec::new(); n],
        }
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.adj.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adj.is_empty()
    }

    /// Add a forward edge `u -> v` with capacity `cap`, plus its reverse
    /// twin with capacity 0. Returns a stable handle to the forward edge.
    pub fn add_edge(&mut self, u: usize, v: usize, cap: f64) -> EdgeRef {
        let fwd_idx = self.adj[u].len();
        let rev_idx = self.adj[v].len();
        self.adj[u].push(EdgeRecord {
            to: v,
            cap,
            rev: rev_idx,
        });
        // A self-loop (u == v) would need the reverse index recomputed
        // after the forward push; the solver never constructs one, so the
        // two pushes above are safe as written.
        self.adj[v].push(EdgeRecord {
            to: u,
            cap: 0.0,
            rev: fwd_idx,
        });
        EdgeRef {
            from: u,
            idx: fwd_idx,
        }
    }

    /// Outgoing edges of `u`.
    pub fn edges(&self, u: usize) -> &[EdgeRecord] {
        &self.adj[u]
    }

    /// Mutable outgoing edges of `u`.
    pub fn edges_mut(&mut self, u: usize) -> &mut [EdgeRecord] {
        &mut self.adj[u]
    }

    /// Remaining capacity of the edge a handle refers to.
    pub fn residual(&self, r: EdgeRef) -> f64 {
        self.adj[r.from][r.idx].cap
    }

    /// Push `amount` of flow along the edge at `(u, idx)`: decrement its
    /// residual capacity and increment its reverse twin's.
    pub fn push_flow(&mut self, u: usize, idx: usize, amount: f64) {
        let (to, rev) = {
            let e = &mut self.adj[u][idx];
            e.cap -= amount;
            (e.to, e.rev)
        };
        self.adj[to][rev].cap += amount;
        debug_assert!(
            self.adj[u][idx].cap > -1e-6,
            "residual capacity went negative beyond tolerance"
        );
    }

    /// Whether an edge still has usable residual capacity, within [`EPS`].
    pub fn has_residual(edge: &EdgeRecord) -> bool {
        edge.cap > EPS
    }
}
