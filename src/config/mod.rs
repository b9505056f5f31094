//! Configuration module for the Leitner trainer
//!
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::LeitnerPaths;
pub use settings::Settings;
