//! Coexpression Graph Service Library
//!
//! This library crate holds the coexpression search pipeline used by the binary (`main.rs`).
//! A search runs against a remote coexpression server in two dependent phases, and the
//! resulting network is reduced to bounded-size tiers that can be rendered interactively.
//!
//! ## Architecture Modules
//! The pipeline is built from four subsystems, leaves first:
//!
//! - **`model`**: The typed records exchanged with the remote server (coexpression results,
//!   query commands) and the derived graph tiers.
//! - **`reduction`**: The pure trimming algorithm. Partitions edges into query and non-query
//!   edges and raises the support threshold for non-query edges until an edge budget fits.
//! - **`tiers`**: Eagerly derives and memoizes the `small`, `medium` and `large` tiers for one
//!   raw result set, plus the user-facing trim notices.
//! - **`search`**: The two-phase orchestrator (grid search, then graph search), the remote
//!   backend boundary, and the HTTP handlers that expose searches and tiers.

pub mod model;
pub mod reduction;
pub mod search;
pub mod tiers;
