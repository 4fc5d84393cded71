use crate::CompanyId;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Missing required field or a coordinate that is not a number.
    #[error("invalid company: {0}")]
    Validation(String),
    #[error("company {0} not found")]
    NotFound(CompanyId),
    /// Geodata could not be fetched or parsed.
    #[error("resource unavailable: {0}")]
    ResourceUnavailable(String),
}

pub type Result<T> = std::result::Result<T, Error>;
