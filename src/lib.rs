//! KissanKart - Farmer-to-Consumer Marketplace
//!
//! A terminal client for a farmer-to-consumer marketplace: browse local
//! harvests, manage a cart, and run a seller dashboard with Gemini-assisted
//! listing copy. All state lives in local JSON stores.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use application::*;
pub use domain::*;
