//! Measurement functions over sequences of geographic points.
//!
//! All functions here model the Earth as a sphere of radius [`EARTH_RADIUS`]
//! and are intended for interactive measurements of small to regional
//! extents. The polygon area uses a spherical-excess shoelace approximation
//! whose error grows with the extent of the ring; it is not a replacement
//! for geodesic-exact algorithms. None of the functions special-case rings
//! that cross the antimeridian or contain a pole.

use crate::point::GeoPoint;

/// Mean Earth radius in meters.
///
/// The same value common web map widgets use for point-to-point distances,
/// so on-screen measurements agree with the widget's own readouts.
pub const EARTH_RADIUS: f64 = 6_371_000.0;

/// Great-circle distance between two points in meters, computed with the
/// haversine formula.
pub fn distance(a: &impl GeoPoint<Num = f64>, b: &impl GeoPoint<Num = f64>) -> f64 {
    let d_lat = (b.lat() - a.lat()).to_radians();
    let d_lon = (b.lon() - a.lon()).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat_rad().cos() * b.lat_rad().cos() * (d_lon / 2.0).sin().powi(2);
    let central_angle = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS * central_angle
}

/// Cumulative length of the path through the given points in meters.
///
/// Returns `0.0` for fewer than 2 points.
pub fn path_length<P: GeoPoint<Num = f64>>(points: &[P]) -> f64 {
    points
        .windows(2)
        .map(|pair| distance(&pair[0], &pair[1]))
        .sum()
}

/// Area of the polygon ring through the given points in square meters.
///
/// The ring is closed implicitly from the last point back to the first. The
/// value is computed with a spherical-excess shoelace approximation and does
/// not depend on the winding direction. Returns `0.0` for fewer than
/// 3 points.
pub fn ring_area<P: GeoPoint<Num = f64>>(points: &[P]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let mut sum = 0.0;
    for i in 0..points.len() {
        let p1 = &points[i];
        let p2 = &points[(i + 1) % points.len()];
        sum += (p2.lon_rad() - p1.lon_rad()) * (2.0 + p1.lat_rad().sin() + p2.lat_rad().sin());
    }

    (sum * EARTH_RADIUS * EARTH_RADIUS / 2.0).abs()
}

/// Perimeter of the polygon ring through the given points in meters,
/// including the closing edge from the last point back to the first.
pub fn ring_perimeter<P: GeoPoint<Num = f64>>(points: &[P]) -> f64 {
    let mut length = 0.0;
    for i in 0..points.len() {
        length += distance(&points[i], &points[(i + 1) % points.len()]);
    }

    length
}
