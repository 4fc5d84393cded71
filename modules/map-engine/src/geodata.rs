//! Province polygons loaded from a GeoJSON feature collection.
//!
//! The collection is read once at startup and never mutated afterwards.
//! Each feature contributes one `(name, multipolygon)` pair; a province may
//! span several features (islands, exclaves), in which case its bounds are
//! the union of all of them.

use crate::Bounds;
use atlas_core::{Error, Result};
use geo::{BoundingRect, Contains, Coord, LineString, MultiPolygon, Point, Polygon};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{info, warn};

/// Property holding the province name in GADM level-2 exports.
pub const DEFAULT_NAME_PROPERTY: &str = "NAME_2";

#[derive(Debug, Clone)]
pub struct ProvinceShape {
    pub name: String,
    pub geometry: MultiPolygon<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct Geodata {
    shapes: Vec<ProvinceShape>,
}

impl Geodata {
    pub fn new(shapes: Vec<ProvinceShape>) -> Self {
        Geodata { shapes }
    }

    pub fn shapes(&self) -> &[ProvinceShape] {
        &self.shapes
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Distinct province names in file order.
    pub fn province_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for shape in &self.shapes {
            if !names.contains(&shape.name.as_str()) {
                names.push(&shape.name);
            }
        }
        names
    }

    /// First province whose polygon contains the point. Linear scan in file
    /// order; polygons are not expected to overlap.
    pub fn province_at(&self, x: f64, y: f64) -> Option<&str> {
        let pt = Point::new(x, y);
        self.shapes
            .iter()
            .find(|s| s.geometry.contains(&pt))
            .map(|s| s.name.as_str())
    }

    /// Enclosing rectangle of every shape named `name`.
    pub fn bounds_of(&self, name: &str) -> Option<Bounds> {
        self.shapes
            .iter()
            .filter(|s| s.name == name)
            .filter_map(|s| s.geometry.bounding_rect())
            .map(Bounds::from)
            .reduce(|a, b| a.union(&b))
    }

    /// Reads a GeoJSON FeatureCollection. Features without a usable polygon
    /// or without the name property are skipped.
    pub fn from_geojson_reader(reader: impl std::io::Read, name_property: &str) -> Result<Self> {
        let root: FeatureCollection = serde_json::from_reader(reader)
            .map_err(|e| Error::ResourceUnavailable(format!("invalid geojson: {e}")))?;

        let mut shapes = Vec::with_capacity(root.features.len());
        let mut skipped = 0usize;
        for feature in root.features {
            let name = feature
                .properties
                .as_ref()
                .and_then(|p| p.get(name_property))
                .and_then(|v| v.as_str())
                .map(str::to_string);
            let geometry = feature.geometry.and_then(Geometry::into_multi_polygon);
            match (name, geometry) {
                (Some(name), Some(geometry)) => shapes.push(ProvinceShape { name, geometry }),
                _ => skipped += 1,
            }
        }
        if shapes.is_empty() {
            return Err(Error::ResourceUnavailable(format!(
                "no polygon features with a '{name_property}' property"
            )));
        }
        if skipped > 0 {
            warn!(skipped, "ignored features without a name or polygon");
        }
        Ok(Geodata { shapes })
    }

    pub fn load(path: &Path, name_property: &str) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            Error::ResourceUnavailable(format!("cannot open {}: {e}", path.display()))
        })?;
        let geodata = Self::from_geojson_reader(BufReader::new(file), name_property)?;
        info!(path = %path.display(), features = geodata.shapes.len(), "loaded province geometry");
        Ok(geodata)
    }
}

/// Loads geometry if a path is configured, logging and returning `None` on
/// any failure so the map can run without polygons.
pub fn load_or_degrade(path: Option<&Path>, name_property: &str) -> Option<Geodata> {
    let path = match path {
        Some(p) => p,
        None => {
            warn!("no geodata configured; map runs without province polygons");
            return None;
        }
    };
    match Geodata::load(path, name_property) {
        Ok(g) => Some(g),
        Err(e) => {
            warn!(error = %e, "map runs without province polygons");
            None
        }
    }
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Option<Geometry>,
    properties: Option<serde_json::Map<String, serde_json::Value>>,
}

type Ring = Vec<Vec<f64>>;

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Polygon { coordinates: Vec<Ring> },
    MultiPolygon { coordinates: Vec<Vec<Ring>> },
    #[serde(other)]
    Unsupported,
}

impl Geometry {
    fn into_multi_polygon(self) -> Option<MultiPolygon<f64>> {
        let polygons: Vec<Polygon<f64>> = match self {
            Geometry::Polygon { coordinates } => polygon(coordinates).into_iter().collect(),
            Geometry::MultiPolygon { coordinates } => {
                coordinates.into_iter().filter_map(polygon).collect()
            }
            Geometry::Unsupported => Vec::new(),
        };
        if polygons.is_empty() {
            None
        } else {
            Some(MultiPolygon::new(polygons))
        }
    }
}

// First ring is the exterior, the rest are holes. Positions may carry an
// altitude; only lon/lat are kept.
fn polygon(rings: Vec<Ring>) -> Option<Polygon<f64>> {
    let mut rings = rings.into_iter().map(|ring| {
        LineString::from(
            ring.into_iter()
                .filter(|pos| pos.len() >= 2)
                .map(|pos| Coord { x: pos[0], y: pos[1] })
                .collect::<Vec<_>>(),
        )
    });
    let exterior = rings.next()?;
    if exterior.0.len() < 3 {
        return None;
    }
    Some(Polygon::new(exterior, rings.collect()))
}
