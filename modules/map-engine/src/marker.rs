use atlas_core::{Company, CompanyId, Sector};
use serde::Serialize;

/// A plottable company: one point per row with a full coordinate pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub id: CompanyId,
    pub name: String,
    pub lon: f64,
    pub lat: f64,
    pub color: &'static str,
}

impl Marker {
    pub fn from_company(company: &Company) -> Option<Marker> {
        let (lon, lat) = company.coordinate()?;
        Some(Marker {
            id: company.id,
            name: company.name.clone(),
            lon,
            lat,
            color: Sector::color_for(company.sector.as_deref()),
        })
    }

    pub fn distance_sq(&self, x: f64, y: f64) -> f64 {
        (self.lon - x).powi(2) + (self.lat - y).powi(2)
    }
}
