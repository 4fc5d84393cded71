use crate::{Bounds, Geodata, Marker};
use atlas_core::{Company, CompanyId};
use serde::Serialize;
use tracing::debug;

/// Whole-country view, also the placeholder frame when no geometry loaded.
pub const COUNTRY_BOUNDS: Bounds = Bounds::new(-9.5, 35.8, 4.5, 44.0);

/// Squared distance (map units) under which a click selects a marker.
///
/// The radius is fixed in world units and does not follow the zoom level,
/// so on a zoomed-in province the tolerance covers many more pixels than on
/// the country view.
pub const DEFAULT_PICK_RADIUS_SQ: f64 = 0.05;

pub const ZOOM_PADDING_FRACTION: f64 = 0.15;
pub const ZOOM_PADDING_FLOOR: f64 = 0.2;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "province", rename_all = "snake_case")]
pub enum ZoomState {
    #[default]
    Overview,
    ZoomedTo(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ClickOutcome {
    /// Click landed on a visible marker; zoom unchanged.
    Selected { id: CompanyId },
    ZoomedTo { province: String },
    /// Second click on the zoomed province, double click, or reset.
    Overview,
    /// Off-screen, or outside every polygon and away from every marker.
    Ignored,
}

/// Owns the zoom state and the markers derived from the store.
///
/// Built once per map session; geometry is optional so the map still plots
/// markers on the country frame when polygons could not be loaded.
#[derive(Debug, Clone)]
pub struct MapEngine {
    geodata: Option<Geodata>,
    markers: Vec<Marker>,
    zoom: ZoomState,
    pick_radius_sq: f64,
}

impl MapEngine {
    pub fn new(geodata: Option<Geodata>) -> Self {
        MapEngine {
            geodata,
            markers: Vec::new(),
            zoom: ZoomState::Overview,
            pick_radius_sq: DEFAULT_PICK_RADIUS_SQ,
        }
    }

    pub fn with_pick_radius_sq(mut self, radius_sq: f64) -> Self {
        self.pick_radius_sq = radius_sq;
        self
    }

    pub fn has_geometry(&self) -> bool {
        self.geodata.is_some()
    }

    pub fn geodata(&self) -> Option<&Geodata> {
        self.geodata.as_ref()
    }

    pub fn zoom(&self) -> &ZoomState {
        &self.zoom
    }

    /// Replaces the marker set. Rows without coordinates are dropped.
    pub fn set_companies(&mut self, companies: &[Company]) {
        self.markers = companies.iter().filter_map(Marker::from_company).collect();
    }

    /// Points outside the visible rectangle are off-screen and ignored.
    pub fn click(&mut self, x: f64, y: f64) -> ClickOutcome {
        if !self.visible_bounds().contains(x, y) {
            debug!(x, y, "click outside visible bounds");
            return ClickOutcome::Ignored;
        }
        if let Some(marker) = self.nearest_visible(x, y) {
            debug!(id = %marker.id, x, y, "marker hit");
            return ClickOutcome::Selected { id: marker.id };
        }

        let Some(province) = self.geodata.as_ref().and_then(|g| g.province_at(x, y)) else {
            return ClickOutcome::Ignored;
        };
        let province = province.to_string();
        if self.zoom == ZoomState::ZoomedTo(province.clone()) {
            self.reset()
        } else {
            debug!(%province, "zoom to province");
            self.zoom = ZoomState::ZoomedTo(province.clone());
            ClickOutcome::ZoomedTo { province }
        }
    }

    /// Always returns to the country view, wherever the click landed.
    pub fn double_click(&mut self, _x: f64, _y: f64) -> ClickOutcome {
        self.reset()
    }

    pub fn reset(&mut self) -> ClickOutcome {
        self.zoom = ZoomState::Overview;
        ClickOutcome::Overview
    }

    /// Currently displayed rectangle. A zoomed province without geometry
    /// falls back to the country frame.
    pub fn visible_bounds(&self) -> Bounds {
        match &self.zoom {
            ZoomState::Overview => COUNTRY_BOUNDS,
            ZoomState::ZoomedTo(province) => self
                .geodata
                .as_ref()
                .and_then(|g| g.bounds_of(province))
                .map(|b| b.padded(ZOOM_PADDING_FRACTION, ZOOM_PADDING_FLOOR))
                .unwrap_or(COUNTRY_BOUNDS),
        }
    }

    /// Markers inside the visible rectangle; only these can be clicked.
    pub fn visible_markers(&self) -> Vec<&Marker> {
        let bounds = self.visible_bounds();
        self.markers
            .iter()
            .filter(|m| bounds.contains(m.lon, m.lat))
            .collect()
    }

    pub fn title(&self) -> String {
        match &self.zoom {
            ZoomState::Overview => "Mapa de Espana - Provincias".to_string(),
            ZoomState::ZoomedTo(p) => format!("Provincia: {p}"),
        }
    }

    fn nearest_visible(&self, x: f64, y: f64) -> Option<&Marker> {
        self.visible_markers()
            .into_iter()
            .map(|m| (m.distance_sq(x, y), m))
            .filter(|(d, _)| *d < self.pick_radius_sq)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, m)| m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProvinceShape;
    use geo::{LineString, MultiPolygon, Polygon};

    fn square(name: &str, x0: f64, y0: f64, x1: f64, y1: f64) -> ProvinceShape {
        let ring = LineString::from(vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1), (x0, y0)]);
        ProvinceShape {
            name: name.to_string(),
            geometry: MultiPolygon::new(vec![Polygon::new(ring, vec![])]),
        }
    }

    fn geodata() -> Geodata {
        Geodata::new(vec![
            square("Madrid", -4.5, 39.9, -3.0, 41.2),
            square("Toledo", -5.4, 39.3, -4.5, 39.9),
            square("Barcelona", 1.4, 41.2, 2.8, 42.3),
        ])
    }

    fn company(id: i64, name: &str, lon: f64, lat: f64) -> Company {
        Company {
            id: CompanyId(id),
            name: name.to_string(),
            sector: Some("Tecnologia".into()),
            province: None,
            region: None,
            latitude: Some(lat),
            longitude: Some(lon),
            employee_link: None,
        }
    }

    #[test]
    fn click_toggles_province_zoom() {
        let mut engine = MapEngine::new(Some(geodata()));
        assert_eq!(
            engine.click(-3.5, 40.0),
            ClickOutcome::ZoomedTo { province: "Madrid".into() }
        );
        assert_eq!(engine.zoom(), &ZoomState::ZoomedTo("Madrid".into()));
        assert_eq!(engine.title(), "Provincia: Madrid");

        assert_eq!(engine.click(-3.2, 41.0), ClickOutcome::Overview);
        assert_eq!(engine.zoom(), &ZoomState::Overview);
    }

    #[test]
    fn click_on_other_province_switches_zoom() {
        let mut engine = MapEngine::new(Some(geodata()));
        engine.click(-3.5, 40.0);
        // Toledo's corner shows inside Madrid's padded frame.
        assert_eq!(
            engine.click(-4.6, 39.8),
            ClickOutcome::ZoomedTo { province: "Toledo".into() }
        );
    }

    #[test]
    fn double_click_and_reset_return_to_overview() {
        let mut engine = MapEngine::new(Some(geodata()));
        engine.click(2.0, 41.8);
        assert_eq!(engine.double_click(-40.0, 0.0), ClickOutcome::Overview);
        assert_eq!(engine.zoom(), &ZoomState::Overview);

        engine.click(2.0, 41.8);
        engine.reset();
        assert_eq!(engine.zoom(), &ZoomState::Overview);
    }

    #[test]
    fn click_outside_everything_is_ignored() {
        let mut engine = MapEngine::new(Some(geodata()));
        engine.click(-3.5, 40.0);
        assert_eq!(engine.click(-8.0, 37.0), ClickOutcome::Ignored);
        assert_eq!(engine.zoom(), &ZoomState::ZoomedTo("Madrid".into()));
    }

    #[test]
    fn off_screen_click_does_not_switch_province() {
        let mut engine = MapEngine::new(Some(geodata()));
        engine.click(2.0, 41.8);
        assert_eq!(engine.zoom(), &ZoomState::ZoomedTo("Barcelona".into()));
        // Inside Madrid's polygon, but outside Barcelona's padded frame.
        assert_eq!(engine.click(-3.5, 40.0), ClickOutcome::Ignored);
        assert_eq!(engine.zoom(), &ZoomState::ZoomedTo("Barcelona".into()));
        // Outside the country frame entirely.
        engine.reset();
        assert_eq!(engine.click(-40.0, 0.0), ClickOutcome::Ignored);
    }

    #[test]
    fn nearest_marker_wins_and_keeps_zoom() {
        let mut engine = MapEngine::new(Some(geodata()));
        engine.set_companies(&[
            company(1, "Indra", -3.70, 40.42),
            company(2, "GMV", -3.60, 40.45),
        ]);
        assert_eq!(engine.click(-3.62, 40.44), ClickOutcome::Selected { id: CompanyId(2) });
        assert_eq!(engine.zoom(), &ZoomState::Overview);
    }

    #[test]
    fn marker_radius_is_exclusive() {
        let mut engine = MapEngine::new(None).with_pick_radius_sq(0.01);
        engine.set_companies(&[company(1, "Indra", 0.0, 40.0)]);
        assert_eq!(engine.click(0.1, 40.0), ClickOutcome::Ignored);
        assert_eq!(engine.click(0.05, 40.0), ClickOutcome::Selected { id: CompanyId(1) });
    }

    #[test]
    fn zoom_hides_markers_outside_padded_province() {
        let mut engine = MapEngine::new(Some(geodata()));
        engine.set_companies(&[
            company(1, "Indra", -3.70, 40.42),
            company(2, "Sener", 2.10, 41.40),
        ]);
        assert_eq!(engine.visible_markers().len(), 2);

        engine.click(-3.1, 39.95);
        let expected = Bounds::new(-4.5, 39.9, -3.0, 41.2).padded(0.15, 0.2);
        assert_eq!(engine.visible_bounds(), expected);
        let ids: Vec<CompanyId> = engine.visible_markers().iter().map(|m| m.id).collect();
        assert_eq!(ids, [CompanyId(1)]);

        // Sener and Barcelona are off-screen while zoomed into Madrid.
        assert_eq!(engine.click(2.10, 41.40), ClickOutcome::Ignored);
        assert_eq!(engine.zoom(), &ZoomState::ZoomedTo("Madrid".into()));

        engine.reset();
        assert_eq!(engine.visible_markers().len(), 2);
    }

    #[test]
    fn rows_without_coordinates_are_not_plotted() {
        let mut engine = MapEngine::new(None);
        let mut legacy = company(3, "Legacy", 0.0, 0.0);
        legacy.latitude = None;
        engine.set_companies(&[legacy, company(4, "Aernnova", -2.67, 42.85)]);
        let names: Vec<&str> = engine.visible_markers().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Aernnova"]);
    }

    #[test]
    fn without_geometry_only_markers_respond() {
        let mut engine = MapEngine::new(None);
        assert!(!engine.has_geometry());
        engine.set_companies(&[company(1, "Indra", -3.70, 40.42)]);
        assert_eq!(engine.click(-3.0, 40.0), ClickOutcome::Ignored);
        assert_eq!(engine.click(-3.70, 40.42), ClickOutcome::Selected { id: CompanyId(1) });
        assert_eq!(engine.visible_bounds(), COUNTRY_BOUNDS);
    }
}
