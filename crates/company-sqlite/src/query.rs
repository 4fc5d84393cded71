use crate::models::company_from_row;
use crate::schema::{SELECT_COMPANY, TABLE};
use crate::{Db, Result};
use atlas_core::{Company, CompanyId};
use rusqlite::{Connection, OptionalExtension};

impl Db {
    pub fn table_exists(&self, name: &str) -> Result<bool> {
        table_exists(&self.conn, name)
    }

    /// Column names of the companies table, in declaration order.
    pub fn columns(&self) -> Result<Vec<String>> {
        table_columns(&self.conn, TABLE)
    }

    /// Every company ordered by name (SQLite binary collation).
    pub fn list_all(&self) -> Result<Vec<Company>> {
        let sql = format!("{SELECT_COMPANY} ORDER BY name");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], company_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn get(&self, id: CompanyId) -> Result<Option<Company>> {
        let sql = format!("{SELECT_COMPANY} WHERE id=?");
        let company = self
            .conn
            .query_row(&sql, [id.0], company_from_row)
            .optional()?;
        Ok(company)
    }

    pub fn count(&self) -> Result<i64> {
        Ok(self.conn.query_row("SELECT COUNT(1) FROM companies", [], |r| r.get(0))?)
    }
}

pub(crate) fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let cnt: i64 = conn.query_row(
        "SELECT COUNT(1) FROM sqlite_master WHERE type='table' AND name=?",
        [name],
        |r| r.get(0),
    )?;
    Ok(cnt > 0)
}

pub(crate) fn table_columns(conn: &Connection, table: &str) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table})"))?;
    let names = stmt.query_map([], |r| r.get::<_, String>(1))?;
    Ok(names.collect::<rusqlite::Result<Vec<_>>>()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use atlas_core::CompanyDraft;

    #[test]
    fn list_is_sorted_by_name() {
        let db = Db::open_in_memory().unwrap();
        for name in ["Sener", "Airbus", "GMV", "alter"] {
            db.insert(&CompanyDraft::new(name, 40.0, -3.0)).unwrap();
        }
        let names: Vec<String> = db.list_all().unwrap().into_iter().map(|c| c.name).collect();
        // Binary collation sorts upper case before lower case.
        assert_eq!(names, ["Airbus", "GMV", "Sener", "alter"]);
    }

    #[test]
    fn missing_id_is_none() {
        let db = Db::open_in_memory().unwrap();
        assert!(db.get(CompanyId(42)).unwrap().is_none());
        assert!(db.table_exists("companies").unwrap());
        assert!(!db.table_exists("runs").unwrap());
    }
}
