//! Infrastructure layer providing external service integrations.
//!
//! This module contains implementations for external concerns: on-disk
//! persistence, environment configuration, the Gemini text-generation
//! client, and CSV export.

pub mod ai;
pub mod config;
pub mod export;
pub mod persistence;

pub use ai::*;
pub use config::*;
pub use export::*;
pub use persistence::*;
