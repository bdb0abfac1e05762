//! Coexpression Data Model
//!
//! Typed records shared by the remote boundary, the reduction engine and the tier catalog.
//!
//! ## Overview
//! - **`GeneCoexpressionResult`**: One edge of the coexpression network as returned by the server.
//! - **`CoexpressionQueryCommand`**: The immutable search request issued by a caller.
//! - **`GraphTier`**: A trimmed, size-bounded view of the graph derived from one result set.
//!
//! Result lists are created once per completed query and never mutated afterwards.

pub mod types;
