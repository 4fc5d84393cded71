use atlas_core::{Company, CompanyId};
use rusqlite::Row;
use serde::Serialize;

/// Maps a row selected with [`crate::schema::SELECT_COMPANY`].
pub(crate) fn company_from_row(row: &Row<'_>) -> rusqlite::Result<Company> {
    Ok(Company {
        id: CompanyId(row.get(0)?),
        name: row.get(1)?,
        sector: row.get(2)?,
        province: row.get(3)?,
        region: row.get(4)?,
        latitude: row.get(5)?,
        longitude: row.get(6)?,
        employee_link: row.get(7)?,
    })
}

/// Summary printed by `atlas init`.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaInfo {
    pub version: i64,
    pub columns: Vec<String>,
    pub rows: i64,
}

impl crate::Db {
    pub fn schema_info(&self) -> crate::Result<SchemaInfo> {
        Ok(SchemaInfo {
            version: self.schema_version()?,
            columns: self.columns()?,
            rows: self.count()?,
        })
    }
}
