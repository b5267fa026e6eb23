#![forbid(unsafe_code)]
//! kgeval-core library.
//!
//! Data model for LLM-extracted knowledge graphs, evaluation configuration,
//! error codes, and the referee capability consumed by the semantic-quality
//! dimension.
//!
//! # Conventions
//!
//! - **Errors**: Use [`error::KgError`] for loader failures and
//!   `anyhow::Result` for file-level helpers.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`).

pub mod config;
pub mod error;
pub mod model;
pub mod referee;

pub use config::EvalConfig;
pub use error::{ErrorCode, KgError};
pub use model::{Entity, KnowledgeGraph, Relationship, SourceText};
pub use referee::{Referee, Verdict};
