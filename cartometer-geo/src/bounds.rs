use serde::{Deserialize, Serialize};

use crate::point::{GeoPoint, GeoPoint2d, NewGeoPoint};

/// Bounding rectangle in geographic coordinates.
///
/// Note that the rectangle is axis-aligned in latitude/longitude space and
/// does not handle rings crossing the antimeridian.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoRect {
    lat_min: f64,
    lat_max: f64,
    lon_min: f64,
    lon_max: f64,
}

impl GeoRect {
    /// Creates a new rectangle from the given bounds (in degrees).
    pub fn new(lat_min: f64, lon_min: f64, lat_max: f64, lon_max: f64) -> Self {
        Self {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        }
    }

    /// Smallest rectangle containing all the given points, or `None` for an
    /// empty iterator.
    pub fn from_points<'a, P: GeoPoint<Num = f64> + 'a>(
        mut points: impl Iterator<Item = &'a P>,
    ) -> Option<Self> {
        let first = points.next()?;
        let mut lat_min = first.lat();
        let mut lat_max = first.lat();
        let mut lon_min = first.lon();
        let mut lon_max = first.lon();

        for p in points {
            if lat_min > p.lat() {
                lat_min = p.lat();
            }
            if lat_max < p.lat() {
                lat_max = p.lat();
            }
            if lon_min > p.lon() {
                lon_min = p.lon();
            }
            if lon_max < p.lon() {
                lon_max = p.lon();
            }
        }

        Some(Self {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        })
    }

    /// Southern bound in degrees.
    pub fn lat_min(&self) -> f64 {
        self.lat_min
    }

    /// Northern bound in degrees.
    pub fn lat_max(&self) -> f64 {
        self.lat_max
    }

    /// Western bound in degrees.
    pub fn lon_min(&self) -> f64 {
        self.lon_min
    }

    /// Eastern bound in degrees.
    pub fn lon_max(&self) -> f64 {
        self.lon_max
    }

    /// Arithmetic center of the rectangle.
    pub fn center(&self) -> GeoPoint2d {
        GeoPoint2d::latlon(
            (self.lat_min + self.lat_max) / 2.0,
            (self.lon_min + self.lon_max) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::latlon;

    #[test]
    fn from_points_covers_all_input() {
        let points = [
            latlon!(19.0, -99.0),
            latlon!(19.01, -98.99),
            latlon!(18.99, -99.02),
        ];
        let rect = GeoRect::from_points(points.iter()).unwrap();
        assert_eq!(rect.lat_min(), 18.99);
        assert_eq!(rect.lat_max(), 19.01);
        assert_eq!(rect.lon_min(), -99.02);
        assert_eq!(rect.lon_max(), -98.99);
    }

    #[test]
    fn from_points_of_empty_input() {
        let points: Vec<GeoPoint2d> = vec![];
        assert!(GeoRect::from_points(points.iter()).is_none());
    }

    #[test]
    fn center_is_bounds_midpoint() {
        let rect = GeoRect::new(19.0, -99.0, 19.01, -98.99);
        let center = rect.center();
        assert_relative_eq!(center.lat(), 19.005);
        assert_relative_eq!(center.lon(), -98.995);
    }
}
