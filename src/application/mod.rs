//! Application layer managing state and business workflows.
//!
//! This module coordinates between the domain layer and presentation layer:
//! the persistent stores, the form buffers, and the central [`App`] state
//! machine the terminal UI renders.

pub mod forms;
pub mod state;
pub mod stores;

pub use forms::*;
pub use state::*;
pub use stores::*;
