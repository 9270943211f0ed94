//! Business (tenant) operations

use rusqlite::params;

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::Business;

impl Database {
    /// Create a business, returning its id
    pub fn create_business(&self, name: &str) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute("INSERT INTO businesses (name) VALUES (?1)", params![name])?;
        Ok(conn.last_insert_rowid())
    }

    /// Look up a business by id
    pub fn get_business(&self, id: i64) -> Result<Option<Business>> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT id, name, created_at FROM businesses WHERE id = ?1")?;

        let mut rows = stmt.query_map(params![id], |row| {
            Ok(Business {
                id: row.get(0)?,
                name: row.get(1)?,
                created_at: parse_datetime(&row.get::<_, String>(2)?),
            })
        })?;

        rows.next().transpose().map_err(Into::into)
    }

    /// List all businesses, oldest first
    pub fn list_businesses(&self) -> Result<Vec<Business>> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT id, name, created_at FROM businesses ORDER BY id")?;

        let businesses = stmt
            .query_map([], |row| {
                Ok(Business {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    created_at: parse_datetime(&row.get::<_, String>(2)?),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(businesses)
    }
}
