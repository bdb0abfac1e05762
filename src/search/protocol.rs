//! HTTP Protocol Definitions
//!
//! Endpoints and Data Transfer Objects (DTOs) for the service API and the remote
//! coexpression server.

use crate::model::types::{GeneCoexpressionResult, GraphSize, GraphTier};
use crate::tiers::catalog::TierCatalog;
use serde::{Deserialize, Serialize};

/// Search endpoint on the remote coexpression server.
pub const ENDPOINT_BACKEND_SEARCH: &str = "/coexpression/search";

pub const ENDPOINT_SEARCH: &str = "/coexpression/search";
pub const ENDPOINT_GRAPH: &str = "/coexpression/graph/:size";

/// Summary of one tier, returned with every completed search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierSummary {
    pub size: GraphSize,
    pub edge_count: usize,
    pub edge_count_budget: usize,
    pub effective_trim_stringency: u32,
    pub reduced: bool,
    pub menu_label: String,
    pub selectable: bool,
}

impl TierSummary {
    pub fn all(catalog: &TierCatalog) -> Vec<TierSummary> {
        catalog
            .menu_entries()
            .into_iter()
            .map(|entry| {
                let tier = catalog.tier(entry.size);
                TierSummary {
                    size: entry.size,
                    edge_count: entry.edge_count,
                    edge_count_budget: tier.edge_count_budget,
                    effective_trim_stringency: tier.effective_trim_stringency,
                    reduced: catalog.tier_is_reduced(entry.size),
                    menu_label: entry.label,
                    selectable: entry.selectable,
                }
            })
            .collect()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub sequence: u64,
    pub grid_results: Vec<GeneCoexpressionResult>,
    pub graph_edge_count: usize,
    pub tiers: Vec<TierSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GraphResponse {
    pub tier: GraphTier,
    pub reduced: bool,
    pub notice: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
