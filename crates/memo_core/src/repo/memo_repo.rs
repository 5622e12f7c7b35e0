//! Memo repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD and priority-query APIs over `memos` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths stamp `updated_at` inside SQL; callers never supply it.
//! - Read paths reject invalid persisted state instead of masking it.
//! - `set_priority_bulk` applies all rows in one transaction or none.

use crate::db::DbError;
use crate::model::memo::{Memo, MemoId};
use crate::model::priority::Priority;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

const MEMO_SELECT_SQL: &str = "SELECT
    id,
    title,
    content,
    priority,
    created_at,
    updated_at
FROM memos";

// Rank mapping for ORDER BY clauses; mirrors Priority::rank().
const PRIORITY_RANK_CASE: &str = "CASE priority
    WHEN 'HIGH' THEN 3
    WHEN 'MEDIUM' THEN 2
    WHEN 'LOW' THEN 1
    ELSE 0
END";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for memo persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(MemoId),
    InvalidData(String),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "memo not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted memo data: {message}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Direction for priority-ordered listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrioritySortOrder {
    /// Highest priority first.
    Descending,
    /// Lowest priority first.
    Ascending,
}

/// Repository interface for memo persistence and priority queries.
///
/// Implementations are trusted to do exact-match lookups, existence checks
/// and persistence; they perform no input validation.
pub trait MemoRepository {
    /// Inserts a draft and returns the persisted row with id and timestamps.
    fn insert(&self, memo: &Memo) -> RepoResult<Memo>;
    /// Overwrites title/content/priority by `memo.id` and refreshes
    /// `updated_at`; returns the persisted row.
    fn update(&self, memo: &Memo) -> RepoResult<Memo>;
    /// Gets one memo by id.
    fn get(&self, id: MemoId) -> RepoResult<Option<Memo>>;
    /// Lists all memos in storage natural (insertion) order.
    fn list(&self) -> RepoResult<Vec<Memo>>;
    /// Hard-deletes one memo by id.
    fn delete(&self, id: MemoId) -> RepoResult<()>;
    /// Returns whether a memo with the given id exists.
    fn exists(&self, id: MemoId) -> RepoResult<bool>;
    /// Lists memos whose priority is in `priorities`, highest priority
    /// first, newest first within equal priority.
    fn list_by_priorities(&self, priorities: &[Priority]) -> RepoResult<Vec<Memo>>;
    /// Lists all memos ordered by priority rank, newest first within equal
    /// priority.
    fn list_sorted_by_priority(&self, order: PrioritySortOrder) -> RepoResult<Vec<Memo>>;
    /// Counts memos with the given priority.
    fn count_by_priority(&self, priority: Priority) -> RepoResult<u64>;
    /// Counts all memos.
    fn count_all(&self) -> RepoResult<u64>;
    /// Sets `priority` on every memo in `ids` within one transaction and
    /// returns the updated rows ordered by id.
    fn set_priority_bulk(&mut self, ids: &[MemoId], priority: Priority) -> RepoResult<Vec<Memo>>;
}

/// SQLite-backed memo repository.
pub struct SqliteMemoRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteMemoRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl MemoRepository for SqliteMemoRepository<'_> {
    fn insert(&self, memo: &Memo) -> RepoResult<Memo> {
        self.conn.execute(
            "INSERT INTO memos (title, content, priority, created_at, updated_at)
             VALUES (
                ?1,
                ?2,
                ?3,
                (strftime('%s', 'now') * 1000),
                (strftime('%s', 'now') * 1000)
             );",
            params![
                memo.title.as_str(),
                memo.content.as_deref(),
                memo.priority.as_str(),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        self.get(id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("inserted memo {id} not found in read-back"))
        })
    }

    fn update(&self, memo: &Memo) -> RepoResult<Memo> {
        let id = memo
            .id
            .ok_or_else(|| RepoError::InvalidData("cannot update a memo without id".to_string()))?;

        let changed = self.conn.execute(
            "UPDATE memos
             SET
                title = ?1,
                content = ?2,
                priority = ?3,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?4;",
            params![
                memo.title.as_str(),
                memo.content.as_deref(),
                memo.priority.as_str(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        self.get(id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("updated memo {id} not found in read-back"))
        })
    }

    fn get(&self, id: MemoId) -> RepoResult<Option<Memo>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MEMO_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_memo_row(row)?));
        }

        Ok(None)
    }

    fn list(&self) -> RepoResult<Vec<Memo>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MEMO_SELECT_SQL} ORDER BY id ASC;"))?;
        let memos = collect_memos(stmt.query([])?);
        memos
    }

    fn delete(&self, id: MemoId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM memos WHERE id = ?1;", params![id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn exists(&self, id: MemoId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM memos WHERE id = ?1);",
            params![id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn list_by_priorities(&self, priorities: &[Priority]) -> RepoResult<Vec<Memo>> {
        if priorities.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = sql_placeholders(priorities.len());
        let sql = format!(
            "{MEMO_SELECT_SQL}
             WHERE priority IN ({placeholders})
             ORDER BY {PRIORITY_RANK_CASE} DESC, created_at DESC, id DESC;"
        );
        let bind_values: Vec<Value> = priorities
            .iter()
            .map(|priority| Value::Text(priority.as_str().to_string()))
            .collect();

        let mut stmt = self.conn.prepare(&sql)?;
        let memos = collect_memos(stmt.query(params_from_iter(bind_values))?);
        memos
    }

    fn list_sorted_by_priority(&self, order: PrioritySortOrder) -> RepoResult<Vec<Memo>> {
        let direction = match order {
            PrioritySortOrder::Descending => "DESC",
            PrioritySortOrder::Ascending => "ASC",
        };
        let sql = format!(
            "{MEMO_SELECT_SQL}
             ORDER BY {PRIORITY_RANK_CASE} {direction}, created_at DESC, id DESC;"
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let memos = collect_memos(stmt.query([])?);
        memos
    }

    fn count_by_priority(&self, priority: Priority) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM memos WHERE priority = ?1;",
            params![priority.as_str()],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn count_all(&self) -> RepoResult<u64> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM memos;", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn set_priority_bulk(&mut self, ids: &[MemoId], priority: Priority) -> RepoResult<Vec<Memo>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = sql_placeholders(ids.len());
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        {
            let update_sql = format!(
                "UPDATE memos
                 SET
                    priority = ?1,
                    updated_at = (strftime('%s', 'now') * 1000)
                 WHERE id IN ({placeholders});"
            );
            let mut bind_values: Vec<Value> = Vec::with_capacity(ids.len() + 1);
            bind_values.push(Value::Text(priority.as_str().to_string()));
            bind_values.extend(ids.iter().map(|id| Value::Integer(*id)));
            tx.execute(&update_sql, params_from_iter(bind_values))?;
        }

        let updated = {
            let select_sql = format!(
                "{MEMO_SELECT_SQL}
                 WHERE id IN ({placeholders})
                 ORDER BY id ASC;"
            );
            let bind_values: Vec<Value> = ids.iter().map(|id| Value::Integer(*id)).collect();
            let mut stmt = tx.prepare(&select_sql)?;
            let memos = collect_memos(stmt.query(params_from_iter(bind_values))?)?;
            memos
        };

        tx.commit()?;
        Ok(updated)
    }
}

fn collect_memos(mut rows: rusqlite::Rows<'_>) -> RepoResult<Vec<Memo>> {
    let mut memos = Vec::new();
    while let Some(row) = rows.next()? {
        memos.push(parse_memo_row(row)?);
    }
    Ok(memos)
}

fn parse_memo_row(row: &Row<'_>) -> RepoResult<Memo> {
    let priority_text: String = row.get("priority")?;
    let priority = priority_text.parse::<Priority>().map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid priority value `{priority_text}` in memos.priority"
        ))
    })?;

    Ok(Memo {
        id: Some(row.get("id")?),
        title: row.get("title")?,
        content: row.get("content")?,
        priority,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn sql_placeholders(count: usize) -> String {
    let mut placeholders = String::new();
    for index in 0..count {
        if index > 0 {
            placeholders.push_str(", ");
        }
        placeholders.push('?');
    }
    placeholders
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    if !table_exists(conn, "memos")? {
        return Err(RepoError::MissingRequiredTable("memos"));
    }

    for column in [
        "id",
        "title",
        "content",
        "priority",
        "created_at",
        "updated_at",
    ] {
        if !table_has_column(conn, "memos", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "memos",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
