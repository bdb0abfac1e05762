//! Graph Reduction Module
//!
//! Trims a coexpression network down to an edge budget without ever dropping an edge that
//! involves a query gene.
//!
//! ## Algorithm
//! 1. **Partition**: Edges touching a query gene (by found gene or counterpart) are kept
//!    unconditionally; all others are candidates for trimming.
//! 2. **Override**: If the query edges alone fill the budget, or trimming is disabled for a
//!    query-genes-only search, no candidate is considered.
//! 3. **Threshold**: Candidates are grouped by support count and taken highest first, one
//!    whole tie group at a time, for as long as the budget allows.
//!
//! The reduction is pure and deterministic, so callers may recompute instead of caching.

pub mod engine;
