//! Remote Search Boundary
//!
//! The orchestrator talks to the coexpression server only through `CoexpressionBackend`.
//! Implementations return a boxed future so the trait stays object safe and backends can be
//! swapped at runtime (HTTP in production, closures in tests).

use super::protocol::ENDPOINT_BACKEND_SEARCH;
use crate::model::types::{CoexpressionQueryCommand, GeneCoexpressionResult};

use anyhow::{Context, Result};
use std::future::Future;
use std::pin::Pin;

/// Future returned by a backend search call.
pub type BackendFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Vec<GeneCoexpressionResult>>> + Send + 'a>>;

/// An asynchronous coexpression search against the remote server.
///
/// Timeouts are imposed by the caller; implementations need not enforce their own.
pub trait CoexpressionBackend: Send + Sync {
    fn search<'a>(&'a self, command: &'a CoexpressionQueryCommand) -> BackendFuture<'a>;
}

/// Backend that POSTs the command as JSON and expects a JSON array of results.
pub struct HttpCoexpressionBackend {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpCoexpressionBackend {
    pub fn new(base_url: &str) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn post_search(
        &self,
        command: &CoexpressionQueryCommand,
    ) -> Result<Vec<GeneCoexpressionResult>> {
        let url = format!("{}{}", self.base_url, ENDPOINT_BACKEND_SEARCH);

        tracing::debug!(
            "POST {} ({} query genes, stringency {}, query_genes_only={})",
            url,
            command.query_gene_ids.len(),
            command.stringency,
            command.query_genes_only
        );

        let response = self
            .http_client
            .post(url.clone())
            .json(command)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Server returned {}: {}", status, body);
        }

        response
            .json::<Vec<GeneCoexpressionResult>>()
            .await
            .context("Invalid coexpression results from server")
    }
}

impl CoexpressionBackend for HttpCoexpressionBackend {
    fn search<'a>(&'a self, command: &'a CoexpressionQueryCommand) -> BackendFuture<'a> {
        Box::pin(self.post_search(command))
    }
}

/// Adapts an async closure into a backend.
pub struct FnBackend<F> {
    handler: F,
}

impl<F> FnBackend<F> {
    pub fn new(handler: F) -> Self {
        Self { handler }
    }
}

impl<F, Fut> CoexpressionBackend for FnBackend<F>
where
    F: Fn(CoexpressionQueryCommand) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<GeneCoexpressionResult>>> + Send + 'static,
{
    fn search<'a>(&'a self, command: &'a CoexpressionQueryCommand) -> BackendFuture<'a> {
        Box::pin((self.handler)(command.clone()))
    }
}
