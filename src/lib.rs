//! Airtime: brain-dump analysis service.
//!
//! Turns free-form "brain dump" text into a structured plan: urgency and
//! priority scores, organized notes, next steps and suggested calendar
//! events.
//!
//! # Architecture
//!
//! - **analysis**: prompt template, tolerant reply parser, fallback result
//! - **llm**: the `CompletionProvider` trait and its OpenRouter client
//! - **service**: one request end to end, never failing outward
//! - **server**: axum routes `GET /api/ping` and `POST /api/brain-dump`
//! - **config**: TOML configuration and API-key resolution

pub mod analysis;
pub mod config;
pub mod error;
pub mod llm;
pub mod server;
pub mod service;

pub use analysis::{AnalysisResult, CalendarEvent};
pub use config::ServiceConfig;
pub use error::{AirtimeError, Result};
pub use server::AnalysisServer;
pub use service::BrainDumpService;
