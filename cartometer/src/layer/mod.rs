//! The annotation overlay that measurement tools draw onto.
//!
//! The [`MeasureController`](crate::control::MeasureController) does not draw
//! anything itself. Instead it issues commands to an [`AnnotationLayer`]: add
//! a marker here, replace this polyline, show this popup, remove that graphic.
//! How the graphics end up on the screen is up to the host application.
//!
//! [`AnnotationStore`] is an in-memory implementation of the contract that
//! keeps the graphics in insertion order so the host can iterate them on every
//! frame. Wrap it into `Arc<RwLock<_>>` to share it between the controller and
//! the renderer.

use std::sync::Arc;

use cartometer_geo::GeoPoint2d;
use maybe_sync::{MaybeSend, MaybeSync};
use parking_lot::RwLock;

mod annotation;
pub mod style;

pub use annotation::{AnnotationStore, Graphic};

use style::{LinePaint, MarkerPaint, PolygonPaint};

/// Handle of a graphic added to an [`AnnotationLayer`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphicId(pub(crate) u64);

/// A drawing surface for transient measurement graphics.
///
/// All graphics added through this trait are owned by the measurement
/// subsystem and are independent from whatever data layers the host displays.
/// The controller may remove or replace any graphic it has added at any time,
/// so implementations must not assume graphics are long-lived.
pub trait AnnotationLayer: MaybeSend + MaybeSync {
    /// Adds a circular marker at the given position.
    fn add_marker(&mut self, position: GeoPoint2d, paint: MarkerPaint) -> GraphicId;

    /// Adds a polyline through the given positions in order.
    fn add_polyline(&mut self, points: &[GeoPoint2d], paint: LinePaint) -> GraphicId;

    /// Adds a polygon through the given positions in order.
    ///
    /// The ring is closed implicitly from the last position back to the first.
    fn add_polygon(&mut self, points: &[GeoPoint2d], paint: PolygonPaint) -> GraphicId;

    /// Shows a text popup anchored at the given position.
    fn show_popup(&mut self, anchor: GeoPoint2d, text: String) -> GraphicId;

    /// Removes the graphic with the given id. Does nothing if the id is not
    /// present in the layer.
    fn remove(&mut self, id: GraphicId);

    /// Removes all graphics from the layer.
    fn clear(&mut self);
}

impl<T: AnnotationLayer + 'static> AnnotationLayer for Arc<RwLock<T>> {
    fn add_marker(&mut self, position: GeoPoint2d, paint: MarkerPaint) -> GraphicId {
        self.write().add_marker(position, paint)
    }

    fn add_polyline(&mut self, points: &[GeoPoint2d], paint: LinePaint) -> GraphicId {
        self.write().add_polyline(points, paint)
    }

    fn add_polygon(&mut self, points: &[GeoPoint2d], paint: PolygonPaint) -> GraphicId {
        self.write().add_polygon(points, paint)
    }

    fn show_popup(&mut self, anchor: GeoPoint2d, text: String) -> GraphicId {
        self.write().show_popup(anchor, text)
    }

    fn remove(&mut self, id: GraphicId) {
        self.write().remove(id)
    }

    fn clear(&mut self) {
        self.write().clear()
    }
}
