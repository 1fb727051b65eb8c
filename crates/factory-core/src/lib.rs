//! Factory -- a steady-state production planner for recipe/machine graphs.
//!
//! Given a set of machine classes, recipes consuming and producing items,
//! per-machine speed/productivity modules, and a target item rate, this
//! crate computes either a minimal-machine production plan that hits the
//! target, or -- when the target is unreachable -- the maximum feasible
//! target rate along with a hint naming which raw supplies or machine caps
//! are the bottleneck.
//!
//! # Pipeline
//!
//! 1. [`translate`] derives each recipe's effective crafting rate and
//!    productivity multiplier from its machine class and module profile,
//!    and enumerates the item universe.
//! 2. [`lp`] lowers the translated model to a linear program and submits it
//!    to a continuous LP solver, either at a fixed target rate (the primary
//!    pass) or with the target itself free (the diagnostic pass).
//! 3. [`solve::solve`] runs the primary pass and, on infeasibility, the
//!    diagnostic pass, extracting the bottleneck hint from whichever
//!    constraints bind at the diagnostic optimum.

pub mod lp;
pub mod model;
pub mod solve;
pub mod translate;

pub use model::{FactoryInput, FactoryOutput};
pub use solve::solve;
