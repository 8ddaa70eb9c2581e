use cartometer_geo::GeoPoint2d;

use super::style::{LinePaint, MarkerPaint, PolygonPaint};
use super::{AnnotationLayer, GraphicId};

/// A single graphic stored in an [`AnnotationStore`].
#[derive(Debug, Clone, PartialEq)]
pub enum Graphic {
    /// Circular point marker.
    Marker {
        /// Position of the marker center.
        position: GeoPoint2d,
        /// Style of the marker.
        paint: MarkerPaint,
    },
    /// Open polyline.
    Polyline {
        /// Vertices of the line in drawing order.
        points: Vec<GeoPoint2d>,
        /// Style of the line.
        paint: LinePaint,
    },
    /// Closed polygon. The ring is closed implicitly from the last vertex
    /// back to the first.
    Polygon {
        /// Vertices of the ring in drawing order.
        points: Vec<GeoPoint2d>,
        /// Style of the polygon.
        paint: PolygonPaint,
    },
    /// Text popup.
    Popup {
        /// Position the popup points at.
        anchor: GeoPoint2d,
        /// Text contents of the popup.
        text: String,
    },
}

/// In-memory [`AnnotationLayer`] implementation.
///
/// Stores graphics in the order they were added, which is also the order the
/// host should draw them in.
#[derive(Debug, Default)]
pub struct AnnotationStore {
    graphics: Vec<(GraphicId, Graphic)>,
    next_id: u64,
}

impl AnnotationStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterates over the stored graphics in drawing order.
    pub fn iter(&self) -> impl Iterator<Item = (GraphicId, &Graphic)> {
        self.graphics.iter().map(|(id, graphic)| (*id, graphic))
    }

    /// Returns the graphic with the given id, if it is still in the store.
    pub fn get(&self, id: GraphicId) -> Option<&Graphic> {
        self.graphics
            .iter()
            .find(|(graphic_id, _)| *graphic_id == id)
            .map(|(_, graphic)| graphic)
    }

    /// Number of graphics in the store.
    pub fn len(&self) -> usize {
        self.graphics.len()
    }

    /// Returns true if the store contains no graphics.
    pub fn is_empty(&self) -> bool {
        self.graphics.is_empty()
    }

    fn add(&mut self, graphic: Graphic) -> GraphicId {
        let id = GraphicId(self.next_id);
        self.next_id += 1;
        self.graphics.push((id, graphic));

        id
    }
}

impl AnnotationLayer for AnnotationStore {
    fn add_marker(&mut self, position: GeoPoint2d, paint: MarkerPaint) -> GraphicId {
        self.add(Graphic::Marker { position, paint })
    }

    fn add_polyline(&mut self, points: &[GeoPoint2d], paint: LinePaint) -> GraphicId {
        self.add(Graphic::Polyline {
            points: points.to_vec(),
            paint,
        })
    }

    fn add_polygon(&mut self, points: &[GeoPoint2d], paint: PolygonPaint) -> GraphicId {
        self.add(Graphic::Polygon {
            points: points.to_vec(),
            paint,
        })
    }

    fn show_popup(&mut self, anchor: GeoPoint2d, text: String) -> GraphicId {
        self.add(Graphic::Popup { anchor, text })
    }

    fn remove(&mut self, id: GraphicId) {
        self.graphics.retain(|(graphic_id, _)| *graphic_id != id);
    }

    fn clear(&mut self) {
        self.graphics.clear();
    }
}
