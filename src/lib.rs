pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod models;
pub mod orchestrator;
pub mod params;
pub mod reporting;
pub mod sanitize;
pub mod verdict;
pub mod view;

// Re-export commonly used items
pub use config::*;
pub use engine::*;
pub use error::*;
pub use format::*;
pub use models::*;
pub use orchestrator::*;
pub use params::*;
pub use reporting::*;
pub use sanitize::*;
pub use verdict::*;
pub use view::*;
