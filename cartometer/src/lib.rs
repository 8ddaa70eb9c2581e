//! Cartometer is an embeddable measurement toolkit for interactive map applications. It provides
//! the three classic on-map analysis tools - distance along a clicked path, area and perimeter of
//! a clicked polygon, and an elevation profile between two picked points - without assuming
//! anything about how the map itself is rendered.
//!
//! # Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use cartometer::control::{MeasureController, MeasureTool};
//! use cartometer::layer::AnnotationStore;
//! use cartometer_geo::latlon;
//! use parking_lot::RwLock;
//!
//! // The store is shared: the controller draws into it, the host renders it.
//! let annotations = Arc::new(RwLock::new(AnnotationStore::new()));
//!
//! let mut controller = MeasureController::new(annotations.clone());
//! controller.toggle(MeasureTool::Distance);
//!
//! // Forward clicks from the map widget; the return value says whether the
//! // click was consumed by the measurement session.
//! controller.primary_click(latlon!(19.4326, -99.1332));
//! controller.primary_click(latlon!(19.4284, -99.1277));
//!
//! // The store now contains two markers, the measured polyline and a popup
//! // with the cumulative distance; draw them on top of the map.
//! for (_id, graphic) in annotations.read().iter() {
//!     println!("{graphic:?}");
//! }
//! ```
//!
//! # Main components
//!
//! * [`MeasureController`](control::MeasureController) owns the single active tool and its
//!   accumulated points, and turns clicks into measurement graphics. At most one tool is active
//!   at a time; activating one deactivates the others.
//! * [`AnnotationLayer`](layer::AnnotationLayer) is the drawing surface the controller issues its
//!   commands to. [`AnnotationStore`](layer::AnnotationStore) is the in-memory implementation a
//!   host iterates on every frame; anything else that can draw markers, lines, polygons and
//!   popups works too.
//! * The geometry itself - haversine distances, the spherical-excess ring area, perimeters -
//!   lives in the [`cartometer_geo`] crate and is usable on its own.
//!
//! User input can be forwarded to the controller directly, as above, or through an
//! [`EventProcessor`](control::EventProcessor) that synthesizes clicks and drags from raw
//! press/release/move events and routes them through a handler chain, reporting back whether an
//! event was handled so the host can suppress the platform context menu.
//!
//! Completed elevation profile picks are handed to an
//! [`ElevationProfileProvider`](elevation::ElevationProfileProvider). On native targets the
//! [`open_elevation`](elevation::open_elevation) module has a ready-made provider that samples
//! the track and queries an Open-Elevation style HTTP API in a background task.

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

pub mod control;
pub mod elevation;
pub mod error;
pub mod format;
pub mod layer;
pub mod ui;

pub use cartometer_geo;

pub use crate::error::CartometerError;
pub use crate::layer::style::Color;
