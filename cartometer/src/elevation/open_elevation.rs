//! Elevation profile acquisition against an open-elevation style HTTP API.

use std::sync::Arc;

use async_trait::async_trait;
use cartometer_geo::{GeoPoint, GeoPoint2d};
use log::warn;
use maybe_sync::{MaybeSend, MaybeSync};
use serde::Deserialize;

use super::{
    sample_track, ElevationProfile, ElevationProfileProvider, ProfileSample, DEFAULT_INTERVALS,
};
use crate::error::CartometerError;

const DEFAULT_API_URL: &str = "https://api.open-elevation.com/api/v1";

/// Point elevation lookup.
#[async_trait]
pub trait ElevationApi: MaybeSend + MaybeSync {
    /// Returns the elevation above sea level at the given point, in meters.
    async fn elevation(&self, point: &GeoPoint2d) -> Result<f64, CartometerError>;
}

/// [`ElevationApi`] implementation backed by the public Open-Elevation API
/// (or any service speaking the same `lookup?locations=lat,lon` protocol).
#[derive(Debug, Clone)]
pub struct OpenElevationApi {
    http_client: reqwest::Client,
    api_url: String,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    results: Vec<LookupResult>,
}

#[derive(Debug, Deserialize)]
struct LookupResult {
    elevation: f64,
}

impl OpenElevationApi {
    /// Creates a client for the public Open-Elevation endpoint.
    pub fn new() -> Result<Self, CartometerError> {
        Self::with_url(DEFAULT_API_URL)
    }

    /// Creates a client for a custom endpoint speaking the Open-Elevation
    /// protocol.
    pub fn with_url(api_url: impl Into<String>) -> Result<Self, CartometerError> {
        let http_client = reqwest::Client::builder()
            .user_agent("cartometer/0.1")
            .build()
            .map_err(|error| CartometerError::Generic(format!("{error}")))?;

        Ok(Self {
            http_client,
            api_url: api_url.into(),
        })
    }

    fn parse_elevation(body: &str) -> Result<f64, CartometerError> {
        let response: LookupResponse = serde_json::from_str(body)?;
        response
            .results
            .first()
            .map(|result| result.elevation)
            .ok_or(CartometerError::NotFound)
    }
}

#[async_trait]
impl ElevationApi for OpenElevationApi {
    async fn elevation(&self, point: &GeoPoint2d) -> Result<f64, CartometerError> {
        let url = format!(
            "{}/lookup?locations={},{}",
            self.api_url,
            point.lat(),
            point.lon()
        );

        let response = self.http_client.get(&url).send().await?;
        if !response.status().is_success() {
            warn!("Failed to load {url}: {}", response.status());
            return Err(CartometerError::IO);
        }

        Self::parse_elevation(&response.text().await?)
    }
}

/// [`ElevationProfileProvider`] that assembles a profile by querying an
/// [`ElevationApi`] for every track sample and hands the result to a host
/// callback.
///
/// A failed per-sample lookup does not fail the profile: the sample gets
/// elevation `0.0` and a warning is logged. Requests are spawned onto the
/// ambient tokio runtime, so [`request_profile`](ElevationProfileProvider::request_profile)
/// must be called from within one.
pub struct ElevationProfileService<A: ElevationApi + 'static> {
    api: Arc<A>,
    intervals: usize,
    on_profile: Arc<dyn Fn(ElevationProfile) + Send + Sync>,
}

impl<A: ElevationApi + 'static> ElevationProfileService<A> {
    /// Creates a service sampling [`DEFAULT_INTERVALS`] intervals per track.
    ///
    /// The callback is invoked with the assembled profile, from the
    /// background task that acquired it.
    pub fn new(api: A, on_profile: impl Fn(ElevationProfile) + Send + Sync + 'static) -> Self {
        Self {
            api: Arc::new(api),
            intervals: DEFAULT_INTERVALS,
            on_profile: Arc::new(on_profile),
        }
    }

    /// Sets the number of intervals a track is split into.
    pub fn with_intervals(mut self, intervals: usize) -> Self {
        self.intervals = intervals;
        self
    }
}

impl<A: ElevationApi + 'static> ElevationProfileProvider for ElevationProfileService<A> {
    fn request_profile(&self, start: GeoPoint2d, end: GeoPoint2d) -> Result<(), CartometerError> {
        let api = self.api.clone();
        let on_profile = self.on_profile.clone();
        let intervals = self.intervals;

        tokio::spawn(async move {
            let profile = build_profile(&*api, start, end, intervals).await;
            on_profile(profile);
        });

        Ok(())
    }
}

async fn build_profile(
    api: &impl ElevationApi,
    start: GeoPoint2d,
    end: GeoPoint2d,
    intervals: usize,
) -> ElevationProfile {
    let mut samples = Vec::with_capacity(intervals + 1);
    for track_position in sample_track(start, end, intervals) {
        let elevation = match api.elevation(&track_position.position).await {
            Ok(elevation) => elevation,
            Err(error) => {
                warn!(
                    "Failed to look up elevation at {}, {}: {error}",
                    track_position.position.lat(),
                    track_position.position.lon()
                );
                0.0
            }
        };

        samples.push(ProfileSample {
            position: track_position.position,
            distance: track_position.distance,
            elevation,
        });
    }

    ElevationProfile::new(samples)
}
