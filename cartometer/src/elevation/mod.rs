//! The elevation profile collaborator boundary.
//!
//! When the profile tool completes a pick, the
//! [`MeasureController`](crate::control::MeasureController) hands the two
//! picked points to an [`ElevationProfileProvider`] and forgets about them.
//! Everything that happens next - sampling the track, looking elevations up,
//! drawing the chart - is the provider's business.
//!
//! This module contains the boundary trait, the profile value types, and the
//! pure track sampling the reference provider implementation in
//! [`open_elevation`] builds on.

use cartometer_geo::{geodesy, GeoPoint, GeoPoint2d, NewGeoPoint};
use maybe_sync::{MaybeSend, MaybeSync};
use serde::{Deserialize, Serialize};

use crate::error::CartometerError;

#[cfg(not(target_arch = "wasm32"))]
pub mod open_elevation;

/// Number of intervals a profile track is split into by default.
pub const DEFAULT_INTERVALS: usize = 100;

/// Receives the endpoints of a completed elevation profile pick.
pub trait ElevationProfileProvider: MaybeSend + MaybeSync {
    /// Requests an elevation profile along the straight track from `start` to `end`.
    ///
    /// The call must not block: acquiring the elevations is expected to happen
    /// asynchronously, with the result delivered through whatever channel the
    /// provider and the host application agreed on. An error here means the
    /// request could not even be dispatched.
    fn request_profile(&self, start: GeoPoint2d, end: GeoPoint2d) -> Result<(), CartometerError>;
}

/// A position along a profile track.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackPosition {
    /// Geographic position of the sample.
    pub position: GeoPoint2d,
    /// Distance from the start of the track in meters.
    pub distance: f64,
}

/// One sample of a completed elevation profile.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSample {
    /// Geographic position of the sample.
    pub position: GeoPoint2d,
    /// Distance from the start of the track in meters.
    pub distance: f64,
    /// Elevation above sea level in meters.
    pub elevation: f64,
}

/// Elevation profile along a track, ready to be charted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElevationProfile {
    samples: Vec<ProfileSample>,
}

impl ElevationProfile {
    /// Creates a profile from the given samples. The samples are expected to
    /// be ordered by their distance from the track start.
    pub fn new(samples: Vec<ProfileSample>) -> Self {
        Self { samples }
    }

    /// Samples of the profile in track order.
    pub fn samples(&self) -> &[ProfileSample] {
        &self.samples
    }

    /// Total length of the track in meters.
    pub fn total_distance(&self) -> f64 {
        self.samples.last().map(|s| s.distance).unwrap_or(0.0)
    }

    /// Minimum and maximum elevation of the profile, e.g. for scaling a
    /// chart's vertical axis. `None` for an empty profile.
    pub fn elevation_bounds(&self) -> Option<(f64, f64)> {
        let mut samples = self.samples.iter();
        let first = samples.next()?;
        let mut min = first.elevation;
        let mut max = first.elevation;

        for sample in samples {
            if sample.elevation < min {
                min = sample.elevation;
            }
            if sample.elevation > max {
                max = sample.elevation;
            }
        }

        Some((min, max))
    }
}

/// Splits the straight track from `start` to `end` into `intervals` equal
/// parts, returning the `intervals + 1` interpolated positions together with
/// their distances from the track start.
///
/// Positions are interpolated linearly in latitude/longitude space and the
/// distance axis grows linearly to the great-circle length of the whole
/// track, which is accurate enough for the regional tracks the profile tool
/// is used on.
pub fn sample_track(start: GeoPoint2d, end: GeoPoint2d, intervals: usize) -> Vec<TrackPosition> {
    let total_distance = geodesy::distance(&start, &end);

    (0..=intervals)
        .map(|i| {
            let fraction = i as f64 / intervals.max(1) as f64;
            let lat = start.lat() + (end.lat() - start.lat()) * fraction;
            let lon = start.lon() + (end.lon() - start.lon()) * fraction;

            TrackPosition {
                position: GeoPoint2d::latlon(lat, lon),
                distance: total_distance * fraction,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use cartometer_geo::latlon;

    use super::*;

    #[test]
    fn sample_track_produces_intervals_plus_1_positions() {
        let samples = sample_track(latlon!(19.0, -99.0), latlon!(19.1, -99.1), 100);
        assert_eq!(samples.len(), 101);
    }

    #[test]
    fn sample_track_interpolates_linearly() {
        let start = latlon!(19.0, -99.0);
        let end = latlon!(19.1, -99.2);
        let samples = sample_track(start, end, 4);

        assert_eq!(samples[0].position, start);
        assert_eq!(samples[4].position, end);
        assert_relative_eq!(samples[2].position.lat(), 19.05);
        assert_relative_eq!(samples[2].position.lon(), -99.1);
    }

    #[test]
    fn sample_track_distance_axis_grows_to_track_length() {
        let start = latlon!(19.0, -99.0);
        let end = latlon!(19.1, -99.1);
        let total = geodesy::distance(&start, &end);

        let samples = sample_track(start, end, 10);
        assert_eq!(samples[0].distance, 0.0);
        assert_relative_eq!(samples[10].distance, total);
        assert_relative_eq!(samples[5].distance, total / 2.0);
    }

    #[test]
    fn sample_track_of_zero_intervals() {
        let samples = sample_track(latlon!(19.0, -99.0), latlon!(19.1, -99.1), 0);
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].distance, 0.0);
    }

    #[test]
    fn elevation_bounds_of_profile() {
        let profile = ElevationProfile::new(vec![
            ProfileSample {
                position: latlon!(19.0, -99.0),
                distance: 0.0,
                elevation: 2240.0,
            },
            ProfileSample {
                position: latlon!(19.05, -99.0),
                distance: 5000.0,
                elevation: 2210.0,
            },
            ProfileSample {
                position: latlon!(19.1, -99.0),
                distance: 10000.0,
                elevation: 2350.0,
            },
        ]);

        assert_eq!(profile.elevation_bounds(), Some((2210.0, 2350.0)));
        assert_eq!(profile.total_distance(), 10000.0);
    }

    #[test]
    fn elevation_bounds_of_empty_profile() {
        let profile = ElevationProfile::new(vec![]);
        assert_eq!(profile.elevation_bounds(), None);
        assert_eq!(profile.total_distance(), 0.0);
    }
}
