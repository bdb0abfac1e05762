//! Two-Phase Search Orchestrator
//!
//! Runs a coexpression search as two dependent remote calls and delivers exactly one
//! completion or error event per search.
//!
//! ## Lifecycle
//! 1. **Grid phase**: The command is sent as issued.
//! 2. **Graph phase**: Started only after the grid phase resolved, with a derived command
//!    restricted to the query genes. Skipped for single-gene queries (empty graph result).
//! 3. **Tiering**: Once both phases resolved, tiers are computed and stored.
//!
//! Every `execute` call takes the next sequence number. A call whose number is no longer the
//! latest when it resumes is superseded: its results and errors are dropped silently.

use super::backend::CoexpressionBackend;
use super::types::*;
use crate::model::types::{CoexpressionQueryCommand, GeneCoexpressionResult};
use crate::reduction::engine::ReductionParams;
use crate::tiers::catalog::{CatalogState, RawResultSet, TierCatalog};

use anyhow::Result;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

const EVENT_CHANNEL_CAPACITY: usize = 64;

pub struct SearchOrchestrator {
    backend: Arc<dyn CoexpressionBackend>,
    settings: SearchSettings,
    /// Last issued sequence number. Only ever incremented.
    sequence: AtomicU64,
    state: RwLock<CatalogState>,
    events: broadcast::Sender<SearchEvent>,
}

impl SearchOrchestrator {
    pub fn new(backend: Arc<dyn CoexpressionBackend>, settings: SearchSettings) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self {
            backend,
            settings,
            sequence: AtomicU64::new(0),
            state: RwLock::new(CatalogState::Empty),
            events,
        })
    }

    /// Receives one event per non-superseded search.
    pub fn subscribe(&self) -> broadcast::Receiver<SearchEvent> {
        self.events.subscribe()
    }

    pub fn current_sequence(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }

    /// Name of the current result-set state (`empty`, `loaded` or `tiered`).
    pub async fn state(&self) -> &'static str {
        self.state.read().await.name()
    }

    /// Tiers of the most recent completed search, if any.
    pub async fn latest_tiers(&self) -> Option<Arc<TierCatalog>> {
        self.state.read().await.tiers()
    }

    fn is_latest(&self, sequence: u64) -> bool {
        self.sequence.load(Ordering::SeqCst) == sequence
    }

    /// Runs a full search. Supersedes any search still in flight.
    pub async fn execute(&self, command: CoexpressionQueryCommand) -> SearchOutcome {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!(
            "Search #{} started: {} query genes, stringency {}, {} datasets",
            sequence,
            command.query_gene_ids.len(),
            command.stringency,
            command.scope_experiment_ids.len()
        );

        {
            let mut state = self.state.write().await;
            if self.is_latest(sequence) {
                *state = CatalogState::Empty;
            }
        }

        if let Err(e) = command.validate(self.settings.min_stringency) {
            tracing::warn!("Search #{} rejected: {}", sequence, e);
            return self.fail(sequence, e).await;
        }

        let grid_results = match self.run_phase(SearchPhase::Grid, &command).await {
            Ok(results) => results,
            Err(e) => return self.fail(sequence, e).await,
        };

        if !self.is_latest(sequence) {
            tracing::info!("Search #{} superseded after grid phase", sequence);
            return SearchOutcome::Superseded;
        }

        let graph_results = match command.graph_phase_command() {
            Some(graph_command) => match self.run_phase(SearchPhase::Graph, &graph_command).await {
                Ok(results) => results,
                Err(e) => return self.fail(sequence, e).await,
            },
            None => {
                tracing::debug!(
                    "Search #{} has a single query gene; skipping graph phase",
                    sequence
                );
                Vec::new()
            }
        };

        self.complete(sequence, command, grid_results, graph_results)
            .await
    }

    /// Issues one remote call under the phase timeout.
    async fn run_phase(
        &self,
        phase: SearchPhase,
        command: &CoexpressionQueryCommand,
    ) -> Result<Vec<GeneCoexpressionResult>> {
        let timeout = self.settings.phase_timeout;
        tracing::debug!("Starting {} phase", phase);

        match tokio::time::timeout(timeout, self.backend.search(command)).await {
            Ok(Ok(results)) => {
                tracing::info!("{} phase returned {} results", phase, results.len());
                Ok(results)
            }
            Ok(Err(e)) => Err(e.context(format!("{} search failed", phase))),
            Err(_) => Err(anyhow::anyhow!(
                "{} search timed out after {} ms",
                phase,
                timeout.as_millis()
            )),
        }
    }

    async fn complete(
        &self,
        sequence: u64,
        command: CoexpressionQueryCommand,
        grid_results: Vec<GeneCoexpressionResult>,
        graph_results: Vec<GeneCoexpressionResult>,
    ) -> SearchOutcome {
        let mut state = self.state.write().await;
        if !self.is_latest(sequence) {
            tracing::info!("Search #{} superseded; dropping results", sequence);
            return SearchOutcome::Superseded;
        }

        let raw = Arc::new(RawResultSet {
            grid_results,
            graph_results,
        });
        *state = CatalogState::Loaded(raw.clone());

        let params = ReductionParams::for_command(&command);
        let tiers = Arc::new(TierCatalog::compute(
            &raw.graph_results,
            &params,
            self.settings.server_max_edges,
        ));
        *state = CatalogState::Tiered(tiers.clone());

        let results = Arc::new(SearchResults {
            sequence,
            command,
            raw,
            tiers,
        });

        tracing::info!(
            "Search #{} completed: {} grid results, {} graph edges",
            sequence,
            results.raw.grid_results.len(),
            results.raw.graph_results.len()
        );

        let _ = self.events.send(SearchEvent::Completed(results.clone()));
        SearchOutcome::Completed(results)
    }

    async fn fail(&self, sequence: u64, error: anyhow::Error) -> SearchOutcome {
        let _state = self.state.write().await;
        if !self.is_latest(sequence) {
            tracing::info!("Search #{} superseded; dropping error: {:#}", sequence, error);
            return SearchOutcome::Superseded;
        }

        tracing::error!("Search #{} failed: {:#}", sequence, error);
        let _ = self.events.send(SearchEvent::Failed {
            sequence,
            message: format!("{:#}", error),
        });
        SearchOutcome::Failed(error)
    }
}
