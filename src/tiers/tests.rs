//! Tier Module Tests
//!
//! Validates tier derivation, the reduced/notice logic and the state transitions.
//!
//! ## Test Scopes
//! - **Derivation**: Budgets per size, containment between tiers, query-edge preservation.
//! - **Notices**: `tier_is_reduced`, `trim_notice` and menu labels.
//! - **State**: `Empty -> Loaded -> Tiered` transitions.

#[cfg(test)]
mod tests {
    use crate::model::types::{GeneCoexpressionResult, GraphSize};
    use crate::reduction::engine::{reduce, ReductionParams};
    use crate::tiers::catalog::{CatalogState, RawResultSet, TierCatalog};
    use std::collections::BTreeSet;
    use std::sync::Arc;

    fn edge(found: u64, support: u32) -> GeneCoexpressionResult {
        GeneCoexpressionResult {
            found_gene_id: found,
            found_gene_symbol: format!("G{}", found),
            query_gene_id: None,
            supporting_experiment_ids: BTreeSet::new(),
            positive_support_count: support,
            negative_support_count: 0,
        }
    }

    fn params(trim_enabled: bool) -> ReductionParams {
        ReductionParams {
            query_gene_ids: [1, 2].into_iter().collect(),
            base_stringency: 2,
            trim_enabled,
        }
    }

    /// Two query edges plus twelve others with support 2..=13.
    fn graph_edges() -> Vec<GeneCoexpressionResult> {
        let mut edges = vec![edge(1, 20), edge(2, 20)];
        edges.extend((0..12).map(|i| edge(10 + i, 2 + i as u32)));
        edges
    }

    fn edge_ids(catalog: &TierCatalog, size: GraphSize) -> BTreeSet<u64> {
        catalog
            .tier(size)
            .edges
            .iter()
            .map(|e| e.found_gene_id)
            .collect()
    }

    // ============================================================
    // DERIVATION TESTS
    // ============================================================

    #[test]
    fn test_budgets_follow_server_cap() {
        let catalog = TierCatalog::compute(&graph_edges(), &params(true), 12);

        assert_eq!(catalog.tier(GraphSize::Small).edge_count_budget, 6);
        assert_eq!(catalog.tier(GraphSize::Medium).edge_count_budget, 9);
        assert_eq!(catalog.tier(GraphSize::Large).edge_count_budget, 12);
        assert_eq!(catalog.server_max_edges(), 12);
        assert_eq!(catalog.raw_edge_count(), 14);
    }

    #[test]
    fn test_tiers_are_nested() {
        let catalog = TierCatalog::compute(&graph_edges(), &params(true), 12);

        let small = edge_ids(&catalog, GraphSize::Small);
        let medium = edge_ids(&catalog, GraphSize::Medium);
        let large = edge_ids(&catalog, GraphSize::Large);

        assert!(small.is_subset(&medium));
        assert!(medium.is_subset(&large));
        assert_eq!(small.len(), 6);
        assert_eq!(medium.len(), 9);
        assert_eq!(large.len(), 12);
    }

    #[test]
    fn test_query_edges_in_every_tier() {
        let catalog = TierCatalog::compute(&graph_edges(), &params(true), 4);

        for size in GraphSize::ALL {
            let ids = edge_ids(&catalog, size);
            assert!(ids.contains(&1) && ids.contains(&2), "{} lost a query edge", size);
        }
    }

    #[test]
    fn test_memoized_tier_matches_independent_reduction() {
        let edges = graph_edges();
        let p = params(true);
        let catalog = TierCatalog::compute(&edges, &p, 12);

        for size in GraphSize::ALL {
            let recomputed = reduce(&edges, &p, size.edge_budget(12)).into_tier(size);
            assert_eq!(catalog.tier(size), &recomputed);
        }
    }

    // ============================================================
    // NOTICE TESTS
    // ============================================================

    #[test]
    fn test_reduced_flags_and_notices() {
        let catalog = TierCatalog::compute(&graph_edges(), &params(true), 12);

        assert!(catalog.tier_is_reduced(GraphSize::Small));
        assert!(catalog.tier_is_reduced(GraphSize::Medium));
        assert!(catalog.tier_is_reduced(GraphSize::Large));

        // Small keeps the top 4 others: supports 13, 12, 11, 10
        assert_eq!(
            catalog.trim_notice(GraphSize::Small).as_deref(),
            Some("Edges not involving query genes have been trimmed at stringency: 10")
        );
    }

    #[test]
    fn test_no_notice_when_everything_fits() {
        let catalog = TierCatalog::compute(&graph_edges(), &params(true), 100);

        for size in GraphSize::ALL {
            assert!(!catalog.tier_is_reduced(size));
            assert!(catalog.trim_notice(size).is_none());
        }
    }

    #[test]
    fn test_query_genes_only_never_trims() {
        let catalog = TierCatalog::compute(&graph_edges(), &params(false), 4);

        for size in GraphSize::ALL {
            assert_eq!(catalog.tier(size).edge_count(), 14);
            assert!(!catalog.tier_is_reduced(size));
        }
    }

    #[test]
    fn test_menu_entries() {
        let catalog = TierCatalog::compute(&graph_edges(), &params(true), 12);
        let entries = catalog.menu_entries();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].size, GraphSize::Small);
        assert_eq!(entries[0].label, "10 (6 edges)");
        assert!(entries[0].selectable);
        assert_eq!(entries[2].size, GraphSize::Large);
        assert_eq!(entries[2].edge_count, 12);
    }

    #[test]
    fn test_menu_entries_without_trimming() {
        let catalog = TierCatalog::compute(&graph_edges(), &params(true), 100);
        let entries = catalog.menu_entries();

        assert_eq!(entries[2].label, "No Trimming (14 edges)");
        assert!(entries[2].selectable);
        assert!(!entries[0].selectable);
        assert!(!entries[1].selectable);
    }

    // ============================================================
    // STATE TESTS
    // ============================================================

    #[test]
    fn test_state_transitions() {
        let state = CatalogState::default();
        assert_eq!(state.name(), "empty");
        assert!(state.tiers().is_none());

        let state = CatalogState::Loaded(Arc::new(RawResultSet {
            grid_results: vec![],
            graph_results: graph_edges(),
        }));
        assert_eq!(state.name(), "loaded");
        assert!(state.tiers().is_none());

        let state = CatalogState::Tiered(Arc::new(TierCatalog::compute(
            &graph_edges(),
            &params(true),
            12,
        )));
        assert_eq!(state.name(), "tiered");
        let tiers = state.tiers().expect("tiers computed");
        assert_eq!(tiers.raw_edge_count(), 14);
    }
}
