//! Phases of the collections stage.
//!
//! ## Overview
//!
//! A configured stage runs four phases:
//! 1. Normalization - Turn raw options into canonical specs (once, at construction)
//! 2. Membership - Decide which collections each document belongs to
//! 3. Finalization - Sort, filter, limit and link each collection
//! 4. Publishing - Write collections into the global metadata
//!
//! Phases 2-4 run on every build pass through [`orchestrator::execute`].
//! Each phase depends only on the previous phases and the foundation modules.

pub mod finalize;
pub mod membership;
pub mod normalize;
pub mod orchestrator;
pub mod publish;

pub use finalize as phase3;
pub use membership as phase2;
pub use normalize as phase1;
pub use publish as phase4;
