//! Storage adapter over the embedded redb database
//!
//! This module owns every persisted URL mapping. All reads and writes go
//! through [`UrlStore`]; nothing else in the application touches the
//! database handle.

use redb::{Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition};
use thiserror::Error;

use crate::model::UrlMapping;

/// Main table: short id -> original URL.
///
/// Example:
/// - Key: 1
/// - Value: "https://example.com/some/long/path"
pub const TABLE_BY_ID: TableDefinition<u64, &str> = TableDefinition::new("urls_by_id_v1");

/// Dedup index: original URL -> short id.
///
/// The key is the exact string the client submitted. No normalization is
/// applied, so "http://x.com" and "http://x.com/" are distinct entries.
pub const TABLE_BY_URL: TableDefinition<&str, u64> = TableDefinition::new("urls_by_original_v1");

/// Metadata table holding the id sequence counter.
pub const TABLE_META: TableDefinition<&str, u64> = TableDefinition::new("meta_v1");

/// Key under which the next unassigned short id is stored in [`TABLE_META`].
const KEY_NEXT_ID: &str = "next_id";

/// Errors raised by storage operations.
///
/// A failure while opening the database is fatal at startup; every other
/// variant surfaces to the service layer as a per-request error and never
/// crashes the process.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open database: {0}")]
    Open(#[from] redb::DatabaseError),

    #[error("database transaction failed: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("database table access failed: {0}")]
    Table(#[from] redb::TableError),

    #[error("database operation failed: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("database commit failed: {0}")]
    Commit(#[from] redb::CommitError),
}

/// Durable store of URL mappings.
///
/// Holds the process-wide database handle, opened once at startup. The
/// handle is safe to share across concurrent requests: redb serializes
/// write transactions and read transactions see a consistent snapshot.
pub struct UrlStore {
    db: Database,
}

impl UrlStore {
    /// Opens (or creates) the database file and all tables.
    ///
    /// Called once at startup; any error here means the service must not
    /// begin accepting requests.
    pub fn open(db_path: &str) -> Result<Self, StoreError> {
        let db = Database::create(db_path)?;

        // Create the tables up front so later read transactions never hit
        // a missing-table error on an empty store.
        let write_txn = db.begin_write()?;
        {
            write_txn.open_table(TABLE_BY_ID)?;
            write_txn.open_table(TABLE_BY_URL)?;
            write_txn.open_table(TABLE_META)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }

    /// Exact-match lookup by the original URL string.
    pub fn find_by_original_url(&self, url: &str) -> Result<Option<UrlMapping>, StoreError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(TABLE_BY_URL)?;

        Ok(table.get(url)?.map(|guard| UrlMapping {
            original_url: url.to_string(),
            short_id: guard.value(),
        }))
    }

    /// Exact-match lookup by the integer identifier.
    pub fn find_by_short_id(&self, id: u64) -> Result<Option<UrlMapping>, StoreError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(TABLE_BY_ID)?;

        Ok(table.get(id)?.map(|guard| UrlMapping {
            original_url: guard.value().to_string(),
            short_id: id,
        }))
    }

    /// Total number of persisted mappings.
    pub fn count(&self) -> Result<u64, StoreError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(TABLE_BY_ID)?;
        Ok(table.len()?)
    }

    /// Persists a mapping for `original_url`, assigning the next sequential
    /// identifier.
    ///
    /// Id assignment and the dedup check both happen inside a single write
    /// transaction. redb allows only one write transaction at a time, so
    /// two concurrent inserts of different URLs can never be handed the
    /// same id, and two concurrent inserts of the same URL converge on one
    /// record. Because mappings are never deleted, the assigned ids stay
    /// dense: 1, 2, 3, ...
    pub fn insert(&self, original_url: &str) -> Result<UrlMapping, StoreError> {
        let write_txn = self.db.begin_write()?;

        let mapping = {
            let mut by_url = write_txn.open_table(TABLE_BY_URL)?;

            // Re-check the dedup index under the write lock. The service
            // does a read-side check first, but that check can race with
            // another writer; this one cannot.
            let existing = by_url.get(original_url)?.map(|guard| guard.value());

            match existing {
                Some(id) => UrlMapping {
                    original_url: original_url.to_string(),
                    short_id: id,
                },
                None => {
                    let mut meta = write_txn.open_table(TABLE_META)?;
                    let id = meta.get(KEY_NEXT_ID)?.map(|g| g.value()).unwrap_or(1);
                    meta.insert(KEY_NEXT_ID, id + 1)?;

                    by_url.insert(original_url, id)?;

                    let mut by_id = write_txn.open_table(TABLE_BY_ID)?;
                    by_id.insert(id, original_url)?;

                    UrlMapping {
                        original_url: original_url.to_string(),
                        short_id: id,
                    }
                }
            }
        };

        write_txn.commit()?;
        Ok(mapping)
    }
}
