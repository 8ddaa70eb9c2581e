//! Geographic point types and the measurement math used by the
//! [`cartometer`](https://crates.io/crates/cartometer) toolkit.
//!
//! The crate is built around the [`GeoPoint`] trait so that measurement
//! functions accept any point type the host application already has, as long
//! as it can report latitude and longitude in degrees. A simple owned
//! implementation is provided by [`GeoPoint2d`] and the [`latlon!`] macro.
//!
//! The [`geodesy`] module contains the actual measurement functions:
//! great-circle distance and path length, polygon ring area and perimeter.
//! All of them treat the Earth as a sphere of mean radius
//! [`geodesy::EARTH_RADIUS`], which keeps the results consistent with the
//! point-to-point distances reported by common web map widgets.

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

mod bounds;
pub mod geodesy;
mod point;

pub use bounds::GeoRect;
pub use point::{GeoPoint, GeoPoint2d, NewGeoPoint};
