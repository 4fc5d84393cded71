use geo::Rect;
use serde::Serialize;

/// Axis-aligned rectangle in map units (lon/lat degrees).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Bounds { min_x, min_y, max_x, max_y }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Inclusive on every edge.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.min_x <= x && x <= self.max_x && self.min_y <= y && y <= self.max_y
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Grows each axis on both sides by `fraction` of its extent, but never
    /// by less than `floor`.
    pub fn padded(&self, fraction: f64, floor: f64) -> Bounds {
        let mx = (self.width() * fraction).max(floor);
        let my = (self.height() * fraction).max(floor);
        Bounds {
            min_x: self.min_x - mx,
            min_y: self.min_y - my,
            max_x: self.max_x + mx,
            max_y: self.max_y + my,
        }
    }
}

impl From<Rect<f64>> for Bounds {
    fn from(r: Rect<f64>) -> Self {
        Bounds::new(r.min().x, r.min().y, r.max().x, r.max().y)
    }
}
