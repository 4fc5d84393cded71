//! Core types shared by the company store, the map engine and the CLI.

mod error;
pub mod link;
pub mod provinces;
mod sector;

pub use error::{Error, Result};
pub use sector::Sector;

use serde::{Deserialize, Serialize};

pub const fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Row id of a company. Assigned by the store on insert and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(pub i64);

impl From<i64> for CompanyId {
    fn from(id: i64) -> Self {
        CompanyId(id)
    }
}

impl std::fmt::Display for CompanyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// A persisted company row.
///
/// Coordinates are optional because rows carried over from older table
/// layouts may not have them; such rows are listed but never plotted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub sector: Option<String>,
    pub province: Option<String>,
    pub region: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub employee_link: Option<String>,
}

impl Company {
    /// `(lon, lat)` when both coordinates are present and finite.
    pub fn coordinate(&self) -> Option<(f64, f64)> {
        match (self.longitude, self.latitude) {
            (Some(lon), Some(lat)) if lon.is_finite() && lat.is_finite() => Some((lon, lat)),
            _ => None,
        }
    }

    /// The editable fields of this row, if it has a full coordinate pair.
    pub fn to_draft(&self) -> Option<CompanyDraft> {
        let (longitude, latitude) = self.coordinate()?;
        Some(CompanyDraft {
            name: self.name.clone(),
            sector: self.sector.clone(),
            province: self.province.clone(),
            region: self.region.clone(),
            latitude,
            longitude,
            employee_link: self.employee_link.clone(),
        })
    }
}

/// Payload for insert and update: every field of a company except its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyDraft {
    pub name: String,
    pub sector: Option<String>,
    pub province: Option<String>,
    pub region: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub employee_link: Option<String>,
}

impl CompanyDraft {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        CompanyDraft {
            name: name.into(),
            sector: None,
            province: None,
            region: None,
            latitude,
            longitude,
            employee_link: None,
        }
    }

    /// Checks the fields the table cannot hold: a blank name or a
    /// coordinate that is not a finite number.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation("company name is required".into()));
        }
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return Err(Error::Validation(
                "latitude and longitude must be decimal numbers, e.g. 40.4168".into(),
            ));
        }
        Ok(())
    }

    /// Sets `region` from the province reference table when the caller left
    /// it blank. Coordinates are never touched.
    pub fn prefill_region(&mut self) {
        let blank = self.region.as_deref().map_or(true, |r| r.trim().is_empty());
        if !blank {
            return;
        }
        self.region = self
            .province
            .as_deref()
            .and_then(provinces::region_for)
            .map(str::to_string);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_set() {
        assert!(!version().is_empty());
    }

    #[test]
    fn blank_name_is_rejected() {
        let draft = CompanyDraft::new("   ", 40.4, -3.7);
        assert!(matches!(draft.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn non_finite_coordinate_is_rejected() {
        let draft = CompanyDraft::new("Indra", f64::NAN, -3.7);
        assert!(matches!(draft.validate(), Err(Error::Validation(_))));
        let draft = CompanyDraft::new("Indra", 40.4, f64::INFINITY);
        assert!(matches!(draft.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn region_prefill_uses_table_and_keeps_user_value() {
        let mut draft = CompanyDraft::new("GMV", 40.45, -3.68);
        draft.province = Some("Madrid".into());
        draft.prefill_region();
        assert_eq!(draft.region.as_deref(), Some("Madrid"));
        assert_eq!((draft.latitude, draft.longitude), (40.45, -3.68));

        let mut draft = CompanyDraft::new("Sener", 43.3, -2.9);
        draft.province = Some("Bizkaia".into());
        draft.region = Some("Euskadi".into());
        draft.prefill_region();
        assert_eq!(draft.region.as_deref(), Some("Euskadi"));

        let mut draft = CompanyDraft::new("Taller", 28.0, -15.0);
        draft.province = Some("Otra".into());
        draft.prefill_region();
        assert_eq!(draft.region, None);
    }

    #[test]
    fn coordinate_requires_both_values() {
        let mut company = Company {
            id: CompanyId(1),
            name: "Hisdesat".into(),
            sector: None,
            province: None,
            region: None,
            latitude: Some(40.4),
            longitude: None,
            employee_link: None,
        };
        assert_eq!(company.coordinate(), None);
        assert!(company.to_draft().is_none());
        company.longitude = Some(-3.7);
        assert_eq!(company.coordinate(), Some((-3.7, 40.4)));
    }
}
