//! Graph Tier Module
//!
//! Derives the three standard graph sizes for one raw result set and serves them without
//! recomputation.
//!
//! ## Lifecycle
//! A result set moves through `Empty -> Loaded -> Tiered`. Tiers are computed eagerly as soon
//! as both search phases have resolved, and a new search resets the state to `Empty`.
//!
//! ## Submodules
//! - **`catalog`**: `TierCatalog` (memoized tiers, trim notices, size menu) and `CatalogState`.

pub mod catalog;

#[cfg(test)]
mod tests;
