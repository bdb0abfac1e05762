//! Coexpression Search Module
//!
//! Coordinates the remote coexpression search and exposes its results over HTTP.
//!
//! ## Overview
//! A search runs two dependent remote calls: a broad "grid" query over the requested scope,
//! then a "graph" query restricted to links involving the query genes. Only when both have
//! resolved are the graph tiers computed. Starting a new search supersedes the previous one.
//!
//! ## Submodules
//! - **`orchestrator`**: Phase sequencing, timeouts, supersession and event delivery.
//! - **`backend`**: The remote search boundary (`CoexpressionBackend`) and its HTTP client.
//! - **`handlers`**: HTTP request handlers for the Axum web server.
//! - **`protocol`**: Endpoints and DTOs for the service API and the remote server.
//! - **`types`**: Settings, phases, outcomes and events.

pub mod backend;
pub mod handlers;
pub mod orchestrator;
pub mod protocol;
pub mod types;
