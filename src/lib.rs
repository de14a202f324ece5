pub mod config;
pub mod env;
pub mod git;
pub mod interrupt;
pub mod path;
pub mod prompt;
pub mod provider;
pub mod shell_exec;
pub mod styling;

// Re-export the types most embedders need
pub use provider::{RepoStatus, StatusProvider};
