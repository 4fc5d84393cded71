use atlas_core::CompanyId;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Company(#[from] atlas_core::Error),
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Company(atlas_core::Error::NotFound(_)))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Company(atlas_core::Error::Validation(_)))
    }

    pub(crate) fn not_found(id: CompanyId) -> Self {
        Error::Company(atlas_core::Error::NotFound(id))
    }

    /// Maps NOT NULL / CHECK failures to a validation error; everything else
    /// stays a storage error.
    pub(crate) fn from_write(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(e, msg)
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                let detail = msg.unwrap_or_else(|| "constraint violated".to_string());
                Error::Company(atlas_core::Error::Validation(detail))
            }
            other => Error::Sqlite(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
