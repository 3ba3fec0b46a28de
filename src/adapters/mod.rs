//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod backend;

pub use backend::{
    BackendAiJudge, BackendClient, BackendReactionRepository, BackendSubmissionRepository,
};
