//! Memo use-case service.
//!
//! # Responsibility
//! - Sole holder of memo business rules: input validation, query
//!   composition, bulk-update orchestration and priority statistics.
//! - Delegate exact-match lookups, existence checks and persistence to the
//!   repository port.
//!
//! # Invariants
//! - Every validation failure is raised before storage is touched.
//! - Failures are typed errors, never silent null/empty substitutions.
//! - Bulk priority update confirms existence of every id before any write.

use crate::model::memo::{Memo, MemoId};
use crate::model::priority::Priority;
use crate::repo::memo_repo::{MemoRepository, PrioritySortOrder, RepoError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Maximum number of memo ids accepted by one bulk priority update.
pub const BULK_UPDATE_MAX_IDS: usize = 100;

const TITLE_MAX_CHARS: usize = 255;
const CONTENT_MAX_CHARS: usize = 10_000;

pub type ServiceResult<T> = Result<T, MemoServiceError>;

/// Service error for memo use-cases.
#[derive(Debug)]
pub enum MemoServiceError {
    /// Target memo does not exist.
    NotFound(MemoId),
    /// Input violated a business rule; carries optional field context for
    /// precise external mapping.
    Validation {
        message: String,
        field: Option<&'static str>,
        rejected_value: Option<String>,
    },
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl MemoServiceError {
    fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
            rejected_value: None,
        }
    }

    fn validation_field(
        message: impl Into<String>,
        field: &'static str,
        rejected_value: Option<String>,
    ) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field),
            rejected_value,
        }
    }
}

impl Display for MemoServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "memo not found: {id}"),
            Self::Validation { message, .. } => f.write_str(message),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for MemoServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for MemoServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Command object for applying one priority to many memos.
///
/// `priority: None` models an absent payload value and is rejected by the
/// service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkPriorityUpdateRequest {
    pub memo_ids: Vec<MemoId>,
    pub priority: Option<Priority>,
}

/// Derived priority aggregate over all memos. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityStatistics {
    /// Count per priority value; always carries all four entries.
    pub priority_counts: BTreeMap<Priority, u64>,
    pub total_memos: u64,
    /// Priority with the highest non-zero count; ties go to the higher
    /// priority. `Priority::None` when no memos exist.
    pub most_common_priority: Priority,
}

/// Use-case service holding every memo business rule.
pub struct MemoService<R: MemoRepository> {
    repo: R,
}

impl<R: MemoRepository> MemoService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all memos in storage natural order. Empty storage yields an
    /// empty vec, never an error.
    pub fn list(&self) -> ServiceResult<Vec<Memo>> {
        Ok(self.repo.list()?)
    }

    /// Gets one memo by id.
    pub fn get_by_id(&self, id: MemoId) -> ServiceResult<Memo> {
        validate_memo_id(id)?;
        self.repo.get(id)?.ok_or(MemoServiceError::NotFound(id))
    }

    /// Creates a new memo.
    ///
    /// # Contract
    /// - Title must be non-blank after trimming and at most 255 characters.
    /// - Content, when present, is capped at 10000 characters.
    /// - Any caller-supplied id is cleared so an existing row can never be
    ///   spoofed into an overwrite.
    pub fn create(&self, memo: &Memo) -> ServiceResult<Memo> {
        validate_memo_fields(memo)?;

        let mut draft = memo.clone();
        draft.id = None;
        Ok(self.repo.insert(&draft)?)
    }

    /// Updates an existing memo by id.
    ///
    /// Overwrites title, content and priority; id and `created_at` are
    /// preserved, `updated_at` is refreshed by storage.
    pub fn update(&self, id: MemoId, memo: &Memo) -> ServiceResult<Memo> {
        validate_memo_id(id)?;
        validate_memo_fields(memo)?;

        let mut existing = self.get_by_id(id)?;
        existing.title = memo.title.clone();
        existing.content = memo.content.clone();
        existing.priority = memo.priority;

        Ok(self.repo.update(&existing)?)
    }

    /// Deletes one memo by id. Deleting a missing id is an error, not a
    /// no-op.
    pub fn delete(&self, id: MemoId) -> ServiceResult<()> {
        validate_memo_id(id)?;

        if !self.repo.exists(id)? {
            return Err(MemoServiceError::NotFound(id));
        }

        Ok(self.repo.delete(id)?)
    }

    /// Returns whether a memo with the given id exists.
    pub fn exists(&self, id: MemoId) -> ServiceResult<bool> {
        validate_memo_id(id)?;
        Ok(self.repo.exists(id)?)
    }

    /// Lists memos filtered by priority.
    ///
    /// # Contract
    /// - An empty slice behaves as `list()`.
    /// - Absent entries (`None`) and duplicates are dropped.
    /// - A slice with only absent entries fails validation.
    /// - Results are ordered priority-descending, newest first within equal
    ///   priority.
    pub fn filter_by_priority(&self, priorities: &[Option<Priority>]) -> ServiceResult<Vec<Memo>> {
        if priorities.is_empty() {
            return self.list();
        }

        let mut valid: Vec<Priority> = Vec::new();
        for priority in priorities.iter().flatten() {
            if !valid.contains(priority) {
                valid.push(*priority);
            }
        }

        if valid.is_empty() {
            return Err(MemoServiceError::validation(
                "at least one valid priority must be specified",
            ));
        }

        Ok(self.repo.list_by_priorities(&valid)?)
    }

    /// Lists memos sorted by priority.
    ///
    /// # Contract
    /// - `None` or blank order behaves as `list()`.
    /// - Recognized orders are `priority_desc` and `priority_asc`,
    ///   case-insensitive.
    /// - Anything else fails validation with field `sort` and the rejected
    ///   value attached.
    pub fn sort_by_priority(&self, order: Option<&str>) -> ServiceResult<Vec<Memo>> {
        let order = match order {
            Some(value) if !value.trim().is_empty() => value,
            _ => return self.list(),
        };

        let direction = match order.to_ascii_lowercase().as_str() {
            "priority_desc" => PrioritySortOrder::Descending,
            "priority_asc" => PrioritySortOrder::Ascending,
            _ => {
                return Err(MemoServiceError::validation_field(
                    format!("invalid sort order `{order}`; expected priority_desc|priority_asc"),
                    "sort",
                    Some(order.to_string()),
                ));
            }
        };

        Ok(self.repo.list_sorted_by_priority(direction)?)
    }

    /// Sets the priority of one memo.
    ///
    /// `priority: None` models an absent payload value and fails validation.
    pub fn update_priority(&self, id: MemoId, priority: Option<Priority>) -> ServiceResult<Memo> {
        validate_memo_id(id)?;
        let priority = priority.ok_or_else(|| {
            MemoServiceError::validation_field("priority cannot be empty", "priority", None)
        })?;

        let mut existing = self.get_by_id(id)?;
        existing.priority = priority;

        Ok(self.repo.update(&existing)?)
    }

    /// Applies one priority to up to 100 memos in a single transaction.
    ///
    /// # Contract
    /// - Fails validation for an empty id list, more than 100 ids, or an
    ///   absent priority.
    /// - Every id is shape-validated and confirmed to exist before any
    ///   write; the first missing id fails with `NotFound` and no memo is
    ///   updated.
    /// - Returns the updated memos ordered by id.
    pub fn bulk_update_priority(
        &mut self,
        request: &BulkPriorityUpdateRequest,
    ) -> ServiceResult<Vec<Memo>> {
        if request.memo_ids.is_empty() {
            return Err(MemoServiceError::validation("memo ids cannot be empty"));
        }
        if request.memo_ids.len() > BULK_UPDATE_MAX_IDS {
            return Err(MemoServiceError::validation(
                "cannot update more than 100 memos at once",
            ));
        }
        let priority = request.priority.ok_or_else(|| {
            MemoServiceError::validation_field("priority cannot be empty", "priority", None)
        })?;

        // Fail fast on the first invalid or missing id; no write may have
        // happened yet.
        for id in &request.memo_ids {
            validate_memo_id(*id)?;
            if !self.repo.exists(*id)? {
                return Err(MemoServiceError::NotFound(*id));
            }
        }

        Ok(self.repo.set_priority_bulk(&request.memo_ids, priority)?)
    }

    /// Computes priority counts, total memo count and the most common
    /// priority.
    ///
    /// The scan visits priorities highest-first and keeps the first strict
    /// maximum, so equal counts resolve to the higher priority. With no
    /// memos at all, the most common priority defaults to `Priority::None`.
    pub fn priority_statistics(&self) -> ServiceResult<PriorityStatistics> {
        let mut priority_counts = BTreeMap::new();
        let mut most_common = Priority::None;
        let mut highest_count = 0u64;

        for priority in Priority::ALL {
            let count = self.repo.count_by_priority(priority)?;
            priority_counts.insert(priority, count);
            if count > 0 && count > highest_count {
                highest_count = count;
                most_common = priority;
            }
        }

        let total_memos = self.repo.count_all()?;

        Ok(PriorityStatistics {
            priority_counts,
            total_memos,
            most_common_priority: most_common,
        })
    }
}

fn validate_memo_id(id: MemoId) -> ServiceResult<()> {
    if id <= 0 {
        return Err(MemoServiceError::validation_field(
            "memo id must be a positive number",
            "id",
            Some(id.to_string()),
        ));
    }
    Ok(())
}

fn validate_memo_fields(memo: &Memo) -> ServiceResult<()> {
    validate_title(&memo.title)?;
    validate_content(memo.content.as_deref())
}

fn validate_title(title: &str) -> ServiceResult<()> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(MemoServiceError::validation_field(
            "memo title cannot be empty",
            "title",
            Some(title.to_string()),
        ));
    }
    if trimmed.chars().count() > TITLE_MAX_CHARS {
        return Err(MemoServiceError::validation_field(
            "memo title cannot exceed 255 characters",
            "title",
            Some(title.to_string()),
        ));
    }
    Ok(())
}

fn validate_content(content: Option<&str>) -> ServiceResult<()> {
    if let Some(text) = content {
        if text.chars().count() > CONTENT_MAX_CHARS {
            return Err(MemoServiceError::validation_field(
                "memo content cannot exceed 10000 characters",
                "content",
                Some(format!("{} characters", text.chars().count())),
            ));
        }
    }
    Ok(())
}
