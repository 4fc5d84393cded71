use crate::{Db, Error, Result};
use atlas_core::{CompanyDraft, CompanyId};
use rusqlite::params;
use tracing::debug;

impl Db {
    pub fn insert(&self, draft: &CompanyDraft) -> Result<CompanyId> {
        draft.validate()?;
        self.conn
            .execute(
                "INSERT INTO companies(name,sector,province,region,latitude,longitude,employee_link) VALUES (?,?,?,?,?,?,?)",
                params![
                    draft.name,
                    draft.sector,
                    draft.province,
                    draft.region,
                    draft.latitude,
                    draft.longitude,
                    draft.employee_link
                ],
            )
            .map_err(Error::from_write)?;
        let id = CompanyId(self.conn.last_insert_rowid());
        debug!(%id, name = %draft.name, "inserted company");
        Ok(id)
    }

    /// Overwrites every field of `id`. Fails with `NotFound` when no row has
    /// that id, leaving the table untouched.
    pub fn update(&self, id: CompanyId, draft: &CompanyDraft) -> Result<()> {
        draft.validate()?;
        let changed = self
            .conn
            .execute(
                "UPDATE companies SET name=?, sector=?, province=?, region=?, latitude=?, longitude=?, employee_link=? WHERE id=?",
                params![
                    draft.name,
                    draft.sector,
                    draft.province,
                    draft.region,
                    draft.latitude,
                    draft.longitude,
                    draft.employee_link,
                    id.0
                ],
            )
            .map_err(Error::from_write)?;
        if changed == 0 {
            return Err(Error::not_found(id));
        }
        debug!(%id, "updated company");
        Ok(())
    }

    /// Removes `id`. Deleting an id that does not exist is not an error;
    /// the return value says whether a row was removed.
    pub fn delete(&self, id: CompanyId) -> Result<bool> {
        let changed = self.conn.execute("DELETE FROM companies WHERE id=?", [id.0])?;
        debug!(%id, removed = changed > 0, "delete company");
        Ok(changed > 0)
    }
}
