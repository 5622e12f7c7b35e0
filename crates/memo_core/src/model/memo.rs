//! Memo domain model.
//!
//! # Responsibility
//! - Define the persisted memo record shared by service and storage layers.
//! - Provide draft constructors for not-yet-persisted memos.
//!
//! # Invariants
//! - `id` is `Some` if and only if the memo has been persisted.
//! - `created_at` is set once by storage and never changes afterward.
//! - `updated_at` is refreshed by storage on every mutation.

use crate::model::priority::Priority;
use serde::{Deserialize, Serialize};

/// Storage-assigned memo identifier. Always positive once assigned.
pub type MemoId = i64;

/// Persisted memo record.
///
/// Field length rules (title 1-255 trimmed chars, content up to 10000 chars)
/// are enforced by the service layer, not by this struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memo {
    /// `None` for drafts; assigned by storage on first insert.
    #[serde(default)]
    pub id: Option<MemoId>,
    /// Required short label.
    pub title: String,
    /// Optional body text.
    #[serde(default)]
    pub content: Option<String>,
    /// Defaults to `Priority::None` when unset.
    #[serde(default)]
    pub priority: Priority,
    /// Creation time in epoch milliseconds. Zero until persisted.
    #[serde(default)]
    pub created_at: i64,
    /// Last mutation time in epoch milliseconds. Zero until persisted.
    #[serde(default)]
    pub updated_at: i64,
}

impl Memo {
    /// Creates an unsaved draft with default priority.
    pub fn new(title: impl Into<String>, content: Option<String>) -> Self {
        Self::with_priority(title, content, Priority::None)
    }

    /// Creates an unsaved draft with an explicit priority.
    pub fn with_priority(
        title: impl Into<String>,
        content: Option<String>,
        priority: Priority,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            content,
            priority,
            created_at: 0,
            updated_at: 0,
        }
    }

    /// Returns whether this memo has been persisted.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}
