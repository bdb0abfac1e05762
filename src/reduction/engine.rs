use crate::model::types::{
    CoexpressionQueryCommand, GeneCoexpressionResult, GeneId, GraphSize, GraphTier,
};
use std::collections::BTreeSet;

/// Inputs of a reduction that stay fixed across every budget for one result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReductionParams {
    pub query_gene_ids: BTreeSet<GeneId>,
    /// Stringency the search was run at; the floor of every trim threshold.
    pub base_stringency: u32,
    /// False for query-genes-only searches, where every edge already involves a query gene.
    pub trim_enabled: bool,
}

impl ReductionParams {
    pub fn for_command(command: &CoexpressionQueryCommand) -> Self {
        Self {
            query_gene_ids: command.query_gene_set(),
            base_stringency: command.stringency,
            trim_enabled: !command.query_genes_only,
        }
    }
}

/// Output of [`reduce`], not yet bound to a size label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReducedGraph {
    pub edges: Vec<GeneCoexpressionResult>,
    pub effective_trim_stringency: u32,
    pub edge_count_budget: usize,
}

impl ReducedGraph {
    pub fn into_tier(self, size_label: GraphSize) -> GraphTier {
        GraphTier {
            size_label,
            edges: self.edges,
            effective_trim_stringency: self.effective_trim_stringency,
            edge_count_budget: self.edge_count_budget,
        }
    }
}

/// Splits `edges` into (query edges, other edges), preserving input order in both.
pub fn partition_edges<'a>(
    edges: &'a [GeneCoexpressionResult],
    query_gene_ids: &BTreeSet<GeneId>,
) -> (Vec<&'a GeneCoexpressionResult>, Vec<&'a GeneCoexpressionResult>) {
    edges.iter().partition(|edge| edge.involves_any(query_gene_ids))
}

/// Reduces `edges` to at most `budget` edges where possible.
///
/// Query edges are always retained, so the result exceeds `budget` when they alone do.
/// Retained edges keep their input order.
pub fn reduce(
    edges: &[GeneCoexpressionResult],
    params: &ReductionParams,
    budget: usize,
) -> ReducedGraph {
    if !params.trim_enabled {
        return ReducedGraph {
            edges: edges.to_vec(),
            effective_trim_stringency: params.base_stringency,
            edge_count_budget: budget,
        };
    }

    let (query_edges, other_edges) = partition_edges(edges, &params.query_gene_ids);

    if query_edges.len() >= budget {
        return ReducedGraph {
            edges: query_edges.into_iter().cloned().collect(),
            effective_trim_stringency: params.base_stringency,
            edge_count_budget: budget,
        };
    }

    let supports: Vec<u32> = other_edges.iter().map(|e| e.support_count()).collect();
    let threshold = select_trim_threshold(
        supports,
        params.base_stringency,
        budget - query_edges.len(),
    );

    let retained = edges
        .iter()
        .filter(|edge| {
            edge.involves_any(&params.query_gene_ids)
                || u64::from(edge.support_count()) >= threshold
        })
        .cloned()
        .collect();

    ReducedGraph {
        edges: retained,
        // Only reachable above u32::MAX when every non-query edge is excluded
        effective_trim_stringency: u32::try_from(threshold).unwrap_or(u32::MAX),
        edge_count_budget: budget,
    }
}

/// Picks the support threshold for non-query edges given `room` free slots in the budget.
///
/// Returns `base_stringency` when every candidate at or above it fits. Otherwise returns the
/// support value of the lowest tie group that still fits, or one above the highest support
/// present when not even the top group fits. Tie groups are never split.
///
/// The result is a `u64` so that "one above the highest support" stays above every `u32`
/// support, including `u32::MAX`.
pub fn select_trim_threshold(mut supports: Vec<u32>, base_stringency: u32, room: usize) -> u64 {
    supports.retain(|s| *s >= base_stringency);
    if supports.len() <= room {
        return u64::from(base_stringency);
    }

    supports.sort_unstable_by(|a, b| b.cmp(a));

    // supports is non-empty here since len > room >= 0
    let mut threshold = u64::from(supports[0]) + 1;
    let mut taken = 0;
    while taken < supports.len() {
        let value = supports[taken];
        let group_end = supports[taken..]
            .iter()
            .position(|s| *s != value)
            .map_or(supports.len(), |offset| taken + offset);

        if group_end > room {
            break;
        }
        threshold = u64::from(value);
        taken = group_end;
    }

    threshold
}
