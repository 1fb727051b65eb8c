//! Belts -- a feasible-flow solver for factory-belt networks.
//!
//! Given a directed graph with per-edge lower/upper bounds, per-node
//! throughput caps, multiple weighted sources, and a single sink, this
//! crate either returns a maximum source-to-sink flow that respects every
//! bound, or a certificate of infeasibility: a source-side cut plus a set
//! of "tight" witnesses that explain which bound made the problem
//! unsatisfiable.
//!
//! # Pipeline
//!
//! 1. [`builder`] lowers the user's problem to a standard max-flow
//!    instance: node splitting for node caps, the classic lower-bound
//!    reduction, and a super-source/super-sink pair.
//! 2. [`dinic`] runs Dinic's blocking-flow algorithm on the resulting
//!    residual graph in [`graph::FlowGraph`].
//! 3. [`reconstruct`] reads flows back off the residual graph and adds the
//!    lower bounds back in.
//! 4. [`diagnostics`] runs only when the feasibility flow falls short of
//!    the required demand, producing the cut and tightness certificate.
//!
//! [`solve::solve`] is the single entry point that runs all four stages.

pub mod builder;
pub mod diagnostics;
pub mod dinic;
pub mod error;
pub mod graph;
pub mod model;
pub mod reconstruct;
pub mod solve;

pub use error::BeltsError;
pub use model::{BeltsInput, BeltsOutput};
pub use solve::solve;

/// Tolerance used throughout the solver for "is this residual capacity
/// positive" and "are these two flow totals equal" comparisons.
///
/// Spec: "A tolerance ε ≈ 10⁻⁹ is used for 'positive residual' comparisons
/// and for feasibility equality tests."
pub const EPS: f64 = 1e-9;

/// Finite stand-in for "+∞" on an edge with no declared upper bound.
///
/// Large enough to exceed any physically meaningful flow in these
/// problems, small enough to stay well clear of `f64` overflow when summed
/// across a graph.
pub const INFINITE_CAPACITY: f64 = 1e18;
