pub mod errors;
pub mod models;
pub mod seed;
pub mod services;

pub use errors::*;
pub use models::*;
pub use seed::*;
pub use services::*;
