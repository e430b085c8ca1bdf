//! SQLite-based storage for transactions.

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::DatabaseError;
use crate::finance::{Transaction, TransactionKind};

use super::{data_dir, DB_FILE};

fn row_to_transaction(row: &rusqlite::Row) -> Result<Transaction, rusqlite::Error> {
    let date_str: String = row.get(1)?;
    let kind_str: String = row.get(2)?;
    Ok(Transaction {
        id: row.get(0)?,
        date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").unwrap_or_default(),
        kind: TransactionKind::parse(&kind_str).unwrap_or(TransactionKind::Expense),
        amount: row.get(3)?,
        category: row.get(4)?,
        description: row.get(5)?,
    })
}

/// SQLite database for income and expense transactions.
pub struct FinanceDb {
    conn: Connection,
}

impl FinanceDb {
    /// Open the database at `~/.config/habbitly/habbitly.db`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, DatabaseError> {
        let path = data_dir()?.join(DB_FILE);
        Self::open_at(&path)
    }

    /// Open the database at an explicit path (tests, exports).
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self, DatabaseError> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS transactions (
                    id          TEXT PRIMARY KEY,
                    date        TEXT NOT NULL,
                    kind        TEXT NOT NULL,
                    amount      INTEGER NOT NULL,
                    category    TEXT NOT NULL,
                    description TEXT NOT NULL DEFAULT ''
                );

                CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))
    }

    pub fn create_transaction(&self, tx: &Transaction) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT INTO transactions (id, date, kind, amount, category, description)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                tx.id,
                tx.date.format("%Y-%m-%d").to_string(),
                tx.kind.as_str(),
                tx.amount,
                tx.category,
                tx.description,
            ],
        )?;
        Ok(())
    }

    /// All transactions, newest day first.
    pub fn list_transactions(&self) -> Result<Vec<Transaction>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, date, kind, amount, category, description
             FROM transactions ORDER BY date DESC, id ASC",
        )?;
        let txs = stmt
            .query_map([], row_to_transaction)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(txs)
    }

    pub fn get_transaction(&self, id: &str) -> Result<Option<Transaction>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, date, kind, amount, category, description
             FROM transactions WHERE id = ?1",
        )?;
        Ok(stmt.query_row(params![id], row_to_transaction).optional()?)
    }

    pub fn update_transaction(&self, tx: &Transaction) -> Result<(), DatabaseError> {
        self.conn.execute(
            "UPDATE transactions
             SET date = ?2, kind = ?3, amount = ?4, category = ?5, description = ?6
             WHERE id = ?1",
            params![
                tx.id,
                tx.date.format("%Y-%m-%d").to_string(),
                tx.kind.as_str(),
                tx.amount,
                tx.category,
                tx.description,
            ],
        )?;
        Ok(())
    }

    /// Returns true when the transaction existed.
    pub fn delete_transaction(&self, id: &str) -> Result<bool, DatabaseError> {
        let deleted = self
            .conn
            .execute("DELETE FROM transactions WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }
}
