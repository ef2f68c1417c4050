//! Application layer
//!
//! The generic statistics pipeline: fetching pages concurrently, merging
//! partial records, coercing them into datasets and reconciling standings
//! with team statistics. [`StatsService`] is the entry point callers use.

pub mod coerce;
pub mod merge;
pub mod orchestrator;
pub mod pipeline;
pub mod query_service;
pub mod reconcile;

pub use coerce::{Finalizer, coerce, coerce_value, fill_nullable};
pub use merge::EntityMerger;
pub use orchestrator::FetchOrchestrator;
pub use pipeline::{QueryPipeline, assemble, page_requests};
pub use query_service::StatsService;
pub use reconcile::{ConferenceMap, Reconciler, append_conference};
