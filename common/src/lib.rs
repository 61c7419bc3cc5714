pub mod config;
pub mod engine;
pub mod high_score;
pub mod identifiers;
pub mod logger;

pub use identifiers::ComponentId;
