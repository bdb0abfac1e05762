use crate::model::types::CoexpressionQueryCommand;
use crate::tiers::catalog::{RawResultSet, TierCatalog};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Per-phase timeout of a remote search call.
pub const DEFAULT_PHASE_TIMEOUT: Duration = Duration::from_millis(420_000);
/// Hard cap on edges the server returns for a graph search.
pub const DEFAULT_SERVER_MAX_EDGES: usize = 1000;
pub const DEFAULT_MIN_STRINGENCY: u32 = 2;

/// Runtime configuration of the search pipeline.
#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub phase_timeout: Duration,
    pub server_max_edges: usize,
    pub min_stringency: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            phase_timeout: DEFAULT_PHASE_TIMEOUT,
            server_max_edges: DEFAULT_SERVER_MAX_EDGES,
            min_stringency: DEFAULT_MIN_STRINGENCY,
        }
    }
}

/// The two remote calls of a search, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// Full query over the requested scope, shown as a result grid.
    Grid,
    /// Subgraph restricted to links involving the query genes.
    Graph,
}

impl fmt::Display for SearchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchPhase::Grid => f.write_str("grid"),
            SearchPhase::Graph => f.write_str("graph"),
        }
    }
}

/// Everything produced by one completed search.
#[derive(Debug, Clone)]
pub struct SearchResults {
    /// Sequence number of the invocation that produced these results.
    pub sequence: u64,
    pub command: CoexpressionQueryCommand,
    pub raw: Arc<RawResultSet>,
    pub tiers: Arc<TierCatalog>,
}

/// Result of a single `execute` call.
#[derive(Debug)]
pub enum SearchOutcome {
    Completed(Arc<SearchResults>),
    /// A phase failed, timed out, or the command was rejected before any remote call.
    Failed(anyhow::Error),
    /// A newer search was started before this one finished; nothing was delivered.
    Superseded,
}

/// Events broadcast to subscribers. Superseded searches emit nothing.
#[derive(Debug, Clone)]
pub enum SearchEvent {
    Completed(Arc<SearchResults>),
    Failed { sequence: u64, message: String },
}
