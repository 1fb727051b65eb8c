//! Error types for the Belts solver.

/// Errors that can occur while building or solving a Belts instance.
///
/// Schema-level problems (a malformed document, a missing sink) are
/// process failures rather than part of the structured output: spec §7
/// classifies them as "Schema errors... propagate as process failure;
/// they are not modeled as structured output." Bound inconsistencies
/// (`hi < lo`) and true infeasibility, on the other hand, are expected
/// outcomes and are reported via [`crate::model::BeltsOutput::Infeasible`],
/// not through this error type.
#[derive(Debug, thiserror::Error)]
pub enum BeltsError {
    /// The input document has no `sink` field.
    #[error("input has no sink node")]
    MissingSink,
    /// An edge references a node not present in `nodes`.
    #[error("edge {from:?} -> {to:?} references an unknown node")]
    UnknownNode { from: String, to: String },
}
