//! Core domain logic for the memo priority backend.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::memo::{Memo, MemoId};
pub use model::priority::{InvalidPriority, Priority};
pub use repo::memo_repo::{
    MemoRepository, PrioritySortOrder, RepoError, RepoResult, SqliteMemoRepository,
};
pub use service::memo_service::{
    BulkPriorityUpdateRequest, MemoService, MemoServiceError, PriorityStatistics, ServiceResult,
    BULK_UPDATE_MAX_IDS,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
