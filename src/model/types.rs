use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Numeric identifier of a gene on the remote server.
pub type GeneId = u64;

/// Numeric identifier of an expression experiment (dataset).
pub type ExperimentId = u64;

/// One row of a raw coexpression search result.
///
/// Each row is an edge between a found gene and, when the server reports it, the query-side
/// gene it was found for. `found_gene_id` is unique within the result set of a single query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneCoexpressionResult {
    pub found_gene_id: GeneId,
    pub found_gene_symbol: String,
    /// Counterpart gene of the edge, if known.
    #[serde(default)]
    pub query_gene_id: Option<GeneId>,
    /// Datasets providing evidence for the link.
    pub supporting_experiment_ids: BTreeSet<ExperimentId>,
    pub positive_support_count: u32,
    pub negative_support_count: u32,
}

impl GeneCoexpressionResult {
    /// Total support used for ranking and trimming (positive + negative).
    pub fn support_count(&self) -> u32 {
        self.positive_support_count
            .saturating_add(self.negative_support_count)
    }

    /// Returns true if either endpoint of the edge is one of `query_gene_ids`.
    pub fn involves_any(&self, query_gene_ids: &BTreeSet<GeneId>) -> bool {
        query_gene_ids.contains(&self.found_gene_id)
            || self
                .query_gene_id
                .is_some_and(|id| query_gene_ids.contains(&id))
    }
}

/// A coexpression search request.
///
/// Immutable once issued; the orchestrator derives the graph-phase command from it
/// instead of modifying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoexpressionQueryCommand {
    /// Genes the user searched for, in the order they were entered.
    pub query_gene_ids: Vec<GeneId>,
    /// Minimum number of supporting datasets for an edge to be returned by the server.
    pub stringency: u32,
    /// Datasets defining the search scope.
    pub scope_experiment_ids: BTreeSet<ExperimentId>,
    /// Restrict results to links among the query genes.
    #[serde(default)]
    pub query_genes_only: bool,
}

impl CoexpressionQueryCommand {
    pub fn query_gene_set(&self) -> BTreeSet<GeneId> {
        self.query_gene_ids.iter().copied().collect()
    }

    /// Checks the command before anything is sent to the server.
    pub fn validate(&self, min_stringency: u32) -> Result<()> {
        if self.query_genes_only && self.query_gene_ids.len() < 2 {
            bail!("You must select more than one query gene to use 'search among query genes only'");
        }
        if self.query_gene_ids.is_empty() {
            bail!(
                "We couldn't figure out which gene you want to query. Please use the search functionality to find genes."
            );
        }
        if self.query_gene_set().len() != self.query_gene_ids.len() {
            bail!("Query genes must not be repeated");
        }
        if self.stringency < min_stringency {
            bail!("Minimum stringency is {}", min_stringency);
        }
        if self.scope_experiment_ids.is_empty() {
            bail!("There are no datasets that match your search terms");
        }
        Ok(())
    }

    /// The command used for the graph phase: same scope and stringency, restricted to
    /// links involving the query genes.
    ///
    /// Returns `None` for a single-gene query, which cannot form a query-genes-only graph.
    pub fn graph_phase_command(&self) -> Option<CoexpressionQueryCommand> {
        if self.query_gene_ids.len() < 2 {
            return None;
        }
        Some(CoexpressionQueryCommand {
            query_genes_only: true,
            ..self.clone()
        })
    }
}

/// Size label of a graph tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphSize {
    Small,
    Medium,
    Large,
}

impl GraphSize {
    /// All sizes, smallest first.
    pub const ALL: [GraphSize; 3] = [GraphSize::Small, GraphSize::Medium, GraphSize::Large];

    /// Edge budget of this size for a server that caps results at `server_max_edges`.
    pub fn edge_budget(self, server_max_edges: usize) -> usize {
        match self {
            GraphSize::Small => server_max_edges / 2,
            GraphSize::Medium => server_max_edges * 3 / 4,
            GraphSize::Large => server_max_edges,
        }
    }

    /// The next larger size, if any.
    pub fn larger(self) -> Option<GraphSize> {
        match self {
            GraphSize::Small => Some(GraphSize::Medium),
            GraphSize::Medium => Some(GraphSize::Large),
            GraphSize::Large => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GraphSize::Small => "small",
            GraphSize::Medium => "medium",
            GraphSize::Large => "large",
        }
    }
}

impl fmt::Display for GraphSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GraphSize {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "small" => Ok(GraphSize::Small),
            "medium" => Ok(GraphSize::Medium),
            "large" => Ok(GraphSize::Large),
            other => bail!("Unknown graph size: {}", other),
        }
    }
}

/// A trimmed view of the coexpression graph.
///
/// Every edge touching a query gene is present regardless of `edge_count_budget`, so the
/// realized edge count may exceed the budget when query edges alone do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphTier {
    pub size_label: GraphSize,
    pub edges: Vec<GeneCoexpressionResult>,
    /// Minimum support required of non-query edges retained in this tier.
    pub effective_trim_stringency: u32,
    pub edge_count_budget: usize,
}

impl GraphTier {
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
