//! Map interaction: province geometry, marker hit-testing and zoom state.

mod bounds;
mod engine;
pub mod geodata;
mod marker;

pub use bounds::Bounds;
pub use engine::{
    ClickOutcome, MapEngine, ZoomState, COUNTRY_BOUNDS, DEFAULT_PICK_RADIUS_SQ,
    ZOOM_PADDING_FLOOR, ZOOM_PADDING_FRACTION,
};
pub use geodata::{Geodata, ProvinceShape};
pub use marker::Marker;
