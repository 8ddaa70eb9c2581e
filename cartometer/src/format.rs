//! Text formatting of measurement results.
//!
//! The rounding rules here are the ones users of mapping applications expect
//! from measurement readouts: distances with 2 decimals of a kilometer, areas
//! with 4 decimals of a square kilometer plus hectares, perimeters with
//! 3 decimals, coordinates with 4 decimals of a degree.

use cartometer_geo::GeoPoint;

/// Label of a measured path length. The input is in meters.
pub fn distance_label(meters: f64) -> String {
    format!("Distance: {:.2} km", meters / 1000.0)
}

/// Label of a measured polygon. Area is in square meters, perimeter in meters.
pub fn area_label(area_m2: f64, perimeter_m: f64) -> String {
    format!(
        "Area: {:.4} km² ({:.2} ha)\nPerimeter: {:.3} km",
        area_m2 / 1_000_000.0,
        area_m2 / 10_000.0,
        perimeter_m / 1000.0
    )
}

/// Coordinate readout of the pointer position, e.g. for a status bar.
pub fn coordinate_label(point: &impl GeoPoint<Num = f64>) -> String {
    format!("Lat: {:.4}, Lon: {:.4}", point.lat(), point.lon())
}
