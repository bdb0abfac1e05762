use crate::model::types::{GeneCoexpressionResult, GraphSize, GraphTier};
use crate::reduction::engine::{reduce, ReductionParams};
use serde::Serialize;
use std::sync::Arc;

/// Status text shown when the selected tier has been trimmed.
pub const TRIM_NOTICE_PREFIX: &str = "Edges not involving query genes have been trimmed at stringency: ";

/// The three tiers derived from one graph-phase result set.
#[derive(Debug, Clone)]
pub struct TierCatalog {
    raw_edge_count: usize,
    server_max_edges: usize,
    small: GraphTier,
    medium: GraphTier,
    large: GraphTier,
}

/// One entry of the graph size menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierMenuEntry {
    pub size: GraphSize,
    pub label: String,
    pub edge_count: usize,
    /// Smaller sizes are only offered when they actually differ from the next larger one.
    pub selectable: bool,
}

impl TierCatalog {
    /// Computes every tier for `graph_results`.
    ///
    /// Each tier is reduced independently from the raw edges; containment between tiers
    /// follows from the reduction itself.
    pub fn compute(
        graph_results: &[GeneCoexpressionResult],
        params: &ReductionParams,
        server_max_edges: usize,
    ) -> Self {
        let tier = |size: GraphSize| {
            reduce(graph_results, params, size.edge_budget(server_max_edges)).into_tier(size)
        };

        let catalog = Self {
            raw_edge_count: graph_results.len(),
            server_max_edges,
            small: tier(GraphSize::Small),
            medium: tier(GraphSize::Medium),
            large: tier(GraphSize::Large),
        };

        tracing::info!(
            "Computed graph tiers from {} edges: small={} (t={}), medium={} (t={}), large={} (t={})",
            catalog.raw_edge_count,
            catalog.small.edge_count(),
            catalog.small.effective_trim_stringency,
            catalog.medium.edge_count(),
            catalog.medium.effective_trim_stringency,
            catalog.large.edge_count(),
            catalog.large.effective_trim_stringency,
        );

        catalog
    }

    pub fn tier(&self, size: GraphSize) -> &GraphTier {
        match size {
            GraphSize::Small => &self.small,
            GraphSize::Medium => &self.medium,
            GraphSize::Large => &self.large,
        }
    }

    pub fn raw_edge_count(&self) -> usize {
        self.raw_edge_count
    }

    pub fn server_max_edges(&self) -> usize {
        self.server_max_edges
    }

    /// Whether `size` holds fewer edges than the next larger tier (or, for `Large`, than the
    /// raw graph result).
    pub fn tier_is_reduced(&self, size: GraphSize) -> bool {
        let reference = match size.larger() {
            Some(larger) => self.tier(larger).edge_count(),
            None => self.raw_edge_count,
        };
        self.tier(size).edge_count() < reference
    }

    /// The trim status message for `size`, or `None` when nothing was trimmed.
    pub fn trim_notice(&self, size: GraphSize) -> Option<String> {
        if !self.tier_is_reduced(size) {
            return None;
        }
        Some(format!(
            "{}{}",
            TRIM_NOTICE_PREFIX,
            self.tier(size).effective_trim_stringency
        ))
    }

    /// Labels for the graph size menu, smallest first.
    pub fn menu_entries(&self) -> Vec<TierMenuEntry> {
        GraphSize::ALL
            .iter()
            .map(|&size| {
                let tier = self.tier(size);
                let reduced = self.tier_is_reduced(size);
                let label = if reduced {
                    format!(
                        "{} ({} edges)",
                        tier.effective_trim_stringency,
                        tier.edge_count()
                    )
                } else {
                    format!("No Trimming ({} edges)", tier.edge_count())
                };

                TierMenuEntry {
                    size,
                    label,
                    edge_count: tier.edge_count(),
                    selectable: size == GraphSize::Large || reduced,
                }
            })
            .collect()
    }
}

/// Raw results of a fully resolved two-phase search, before tiering.
#[derive(Debug, Clone)]
pub struct RawResultSet {
    pub grid_results: Vec<GeneCoexpressionResult>,
    pub graph_results: Vec<GeneCoexpressionResult>,
}

/// Per-result-set state held by the orchestrator.
#[derive(Debug, Clone, Default)]
pub enum CatalogState {
    #[default]
    Empty,
    Loaded(Arc<RawResultSet>),
    Tiered(Arc<TierCatalog>),
}

impl CatalogState {
    pub fn name(&self) -> &'static str {
        match self {
            CatalogState::Empty => "empty",
            CatalogState::Loaded(_) => "loaded",
            CatalogState::Tiered(_) => "tiered",
        }
    }

    pub fn tiers(&self) -> Option<Arc<TierCatalog>> {
        match self {
            CatalogState::Tiered(catalog) => Some(catalog.clone()),
            _ => None,
        }
    }
}
