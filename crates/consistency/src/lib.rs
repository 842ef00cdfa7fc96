//! # Screenplay Consistency
//!
//! Reconciles the model's cross-references against the set of entities
//! that actually exist, materializing a gap placeholder for every
//! referenced-but-missing identifier.
//!
//! Dangling references are legal data everywhere else in the core; this
//! crate is the one place that notices them, lazily, when a snapshot is
//! assembled.

mod gaps;

pub use gaps::compute_gaps;
