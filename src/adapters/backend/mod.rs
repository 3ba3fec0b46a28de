//! Hosted backend adapters
//!
//! The host application's backend exposes a generic record store and an AI
//! generation API over HTTP. `BackendClient` is the low-level client; the
//! repository and judge types implement the domain ports on top of it.

pub mod ai_judge;
pub mod client;
pub mod reaction_repo;
pub mod submission_repo;

pub use ai_judge::BackendAiJudge;
pub use client::BackendClient;
pub use reaction_repo::BackendReactionRepository;
pub use submission_repo::BackendSubmissionRepository;
