//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the storage port the memo service depends on.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repositories perform exact-match lookups and persistence only; input
//!   validation belongs to the service layer.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod memo_repo;
