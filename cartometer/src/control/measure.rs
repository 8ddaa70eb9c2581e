use cartometer_geo::{geodesy, GeoPoint2d, GeoRect};

use crate::control::{EventPropagation, MouseButton, UserEvent, UserEventHandler};
use crate::elevation::ElevationProfileProvider;
use crate::format;
use crate::layer::style::{Color, LinePaint, MarkerPaint, PolygonPaint};
use crate::layer::{AnnotationLayer, GraphicId};
use crate::ui::{CursorIcon, DummyMapUi, MapUi};

const TOOL_COUNT: usize = 3;

/// A measurement tool the user can activate.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MeasureTool {
    /// Cumulative distance along a clicked path.
    Distance,
    /// Elevation profile between two clicked points.
    Profile,
    /// Area and perimeter of a clicked polygon.
    Area,
}

impl MeasureTool {
    fn index(self) -> usize {
        match self {
            MeasureTool::Distance => 0,
            MeasureTool::Profile => 1,
            MeasureTool::Area => 2,
        }
    }
}

/// The active interaction mode with its accumulated session.
#[derive(Debug, Clone, PartialEq)]
enum Mode {
    Idle,
    Distance { points: Vec<GeoPoint2d> },
    Profile { start: Option<GeoPoint2d> },
    Area { points: Vec<GeoPoint2d> },
}

impl Mode {
    fn new_session(tool: MeasureTool) -> Self {
        match tool {
            MeasureTool::Distance => Mode::Distance { points: vec![] },
            MeasureTool::Profile => Mode::Profile { start: None },
            MeasureTool::Area => Mode::Area { points: vec![] },
        }
    }

    fn tool(&self) -> Option<MeasureTool> {
        match self {
            Mode::Idle => None,
            Mode::Distance { .. } => Some(MeasureTool::Distance),
            Mode::Profile { .. } => Some(MeasureTool::Profile),
            Mode::Area { .. } => Some(MeasureTool::Area),
        }
    }
}

/// Configuration of a [`MeasureController`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MeasureOptions {
    measure_line: LinePaint,
    measure_marker: MarkerPaint,
    profile_line: LinePaint,
    profile_marker: MarkerPaint,
    area_outline: LinePaint,
    area_polygon: PolygonPaint,
}

const MEASURE_STROKE: Color = Color::from_hex("#8A2035");
const PROFILE_STROKE: Color = Color::from_hex("#B99056");

impl Default for MeasureOptions {
    fn default() -> Self {
        Self {
            measure_line: LinePaint {
                color: MEASURE_STROKE.with_alpha(178),
                width: 3.0,
            },
            measure_marker: MarkerPaint {
                radius: 5.0,
                color: MEASURE_STROKE,
                fill_color: Color::WHITE,
                width: 2.0,
            },
            profile_line: LinePaint {
                color: PROFILE_STROKE.with_alpha(178),
                width: 3.0,
            },
            profile_marker: MarkerPaint {
                radius: 5.0,
                color: PROFILE_STROKE,
                fill_color: Color::WHITE,
                width: 2.0,
            },
            area_outline: LinePaint {
                color: MEASURE_STROKE.with_alpha(204),
                width: 3.0,
            },
            area_polygon: PolygonPaint {
                color: MEASURE_STROKE.with_alpha(204),
                fill_color: PROFILE_STROKE.with_alpha(64),
                width: 3.0,
            },
        }
    }
}

impl MeasureOptions {
    /// Style of the distance measurement polyline.
    pub fn measure_line(&self) -> LinePaint {
        self.measure_line
    }

    /// Sets style of the distance measurement polyline.
    pub fn with_measure_line(mut self, paint: LinePaint) -> Self {
        self.measure_line = paint;
        self
    }

    /// Style of the vertex markers of the distance and area tools.
    pub fn measure_marker(&self) -> MarkerPaint {
        self.measure_marker
    }

    /// Sets style of the vertex markers of the distance and area tools.
    pub fn with_measure_marker(mut self, paint: MarkerPaint) -> Self {
        self.measure_marker = paint;
        self
    }

    /// Style of the elevation profile track line.
    pub fn profile_line(&self) -> LinePaint {
        self.profile_line
    }

    /// Sets style of the elevation profile track line.
    pub fn with_profile_line(mut self, paint: LinePaint) -> Self {
        self.profile_line = paint;
        self
    }

    /// Style of the elevation profile endpoint markers.
    pub fn profile_marker(&self) -> MarkerPaint {
        self.profile_marker
    }

    /// Sets style of the elevation profile endpoint markers.
    pub fn with_profile_marker(mut self, paint: MarkerPaint) -> Self {
        self.profile_marker = paint;
        self
    }

    /// Style of an area ring outline before it is closed.
    pub fn area_outline(&self) -> LinePaint {
        self.area_outline
    }

    /// Sets style of an area ring outline before it is closed.
    pub fn with_area_outline(mut self, paint: LinePaint) -> Self {
        self.area_outline = paint;
        self
    }

    /// Style of a closed area polygon.
    pub fn area_polygon(&self) -> PolygonPaint {
        self.area_polygon
    }

    /// Sets style of a closed area polygon.
    pub fn with_area_polygon(mut self, paint: PolygonPaint) -> Self {
        self.area_polygon = paint;
        self
    }
}

/// Single authority over which measurement tool is active and what it has accumulated.
///
/// The controller owns the interaction [mode](MeasureTool) of the map. At most one tool is active
/// at any time: activating a tool deactivates the other two and clears their in-progress state.
/// While a tool is active, the controller accumulates clicked points, recomputes the measurement
/// and redraws the transient graphics through its [`AnnotationLayer`], and tells the host
/// [`MapUi`] to show a crosshair cursor and suspend click handling of data layers.
///
/// A finished drawing (a distance line with at least two points, a dispatched profile pick, a
/// closed area polygon) stays visible after its tool is deactivated. It is removed when its tool
/// is activated again, or by [`clear_all`](MeasureController::clear_all).
///
/// The controller is driven either by an [`EventProcessor`](super::EventProcessor) through the
/// [`UserEventHandler`] implementation (left click adds a point, right click closes an area), or
/// directly through [`primary_click`](MeasureController::primary_click) and
/// [`secondary_click`](MeasureController::secondary_click).
pub struct MeasureController {
    options: MeasureOptions,
    mode: Mode,
    annotations: Box<dyn AnnotationLayer>,
    ui: Box<dyn MapUi>,
    elevation: Option<Box<dyn ElevationProfileProvider>>,

    session_graphics: Vec<GraphicId>,
    session_line: Option<GraphicId>,
    session_popup: Option<GraphicId>,
    committed: [Vec<GraphicId>; TOOL_COUNT],
}

impl MeasureController {
    /// Creates a new controller drawing to the given annotation layer.
    pub fn new(annotations: impl AnnotationLayer + 'static) -> Self {
        Self {
            options: MeasureOptions::default(),
            mode: Mode::Idle,
            annotations: Box::new(annotations),
            ui: Box::new(DummyMapUi),
            elevation: None,
            session_graphics: vec![],
            session_line: None,
            session_popup: None,
            committed: Default::default(),
        }
    }

    /// Sets the host user interface to report state changes to.
    pub fn with_ui(mut self, ui: impl MapUi + 'static) -> Self {
        self.ui = Box::new(ui);
        self
    }

    /// Sets the collaborator the elevation profile requests are dispatched to.
    ///
    /// Without a provider the profile tool still draws its track, but completed picks go nowhere.
    pub fn with_elevation_provider(
        mut self,
        provider: impl ElevationProfileProvider + 'static,
    ) -> Self {
        self.elevation = Some(Box::new(provider));
        self
    }

    /// Sets the configuration of the controller.
    pub fn with_options(mut self, options: MeasureOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the current configuration of the controller.
    pub fn options(&self) -> MeasureOptions {
        self.options
    }

    /// The currently active tool, or `None` when idle.
    pub fn active_tool(&self) -> Option<MeasureTool> {
        self.mode.tool()
    }

    /// Activates the given tool, or deactivates it if it is already active.
    ///
    /// Activating a tool deactivates whichever other tool was active, removes the previous
    /// finished drawing of the activated tool, and starts a fresh session.
    pub fn toggle(&mut self, tool: MeasureTool) {
        let was_active = self.mode.tool();
        if was_active.is_some() {
            self.deactivate();
        }

        if was_active != Some(tool) {
            self.activate(tool);
        }
    }

    /// Deactivates the active tool and removes every graphic the controller has ever drawn,
    /// finished drawings included.
    pub fn clear_all(&mut self) {
        self.mode = Mode::Idle;
        self.session_graphics.clear();
        self.session_line = None;
        self.session_popup = None;
        for list in &mut self.committed {
            list.clear();
        }
        self.annotations.clear();
        self.restore_ui();
    }

    /// Handles a primary (left) click at the given map position.
    ///
    /// Returns [`EventPropagation::Propagate`] when no tool is active, so the host's own click
    /// handling (feature popups and the like) sees the event. When a tool is active the click is
    /// consumed.
    pub fn primary_click(&mut self, point: GeoPoint2d) -> EventPropagation {
        match &mut self.mode {
            Mode::Idle => EventPropagation::Propagate,
            Mode::Distance { points } => {
                points.push(point);
                let session = points.clone();
                self.draw_distance_session(&session);

                EventPropagation::Consume
            }
            Mode::Profile { start } => {
                match start.take() {
                    None => {
                        *start = Some(point);
                        self.draw_profile_start(point);
                    }
                    Some(first) => self.complete_profile_pick(first, point),
                }

                EventPropagation::Consume
            }
            Mode::Area { points } => {
                points.push(point);
                let session = points.clone();
                self.draw_area_session(&session);

                EventPropagation::Consume
            }
        }
    }

    /// Handles a secondary (right) click at the given map position.
    ///
    /// Only meaningful while the area tool is active with at least 3 accumulated points: closes
    /// the ring into a polygon, shows the area and perimeter popup at the center of the polygon's
    /// bounding box and deactivates the tool, leaving the polygon visible. In any other state the
    /// event propagates, so the host shows its normal context menu.
    pub fn secondary_click(&mut self, _point: GeoPoint2d) -> EventPropagation {
        match &mut self.mode {
            Mode::Area { points } if points.len() >= 3 => {
                let ring = std::mem::take(points);
                self.finalize_area(&ring);

                EventPropagation::Consume
            }
            _ => EventPropagation::Propagate,
        }
    }

    fn activate(&mut self, tool: MeasureTool) {
        for id in std::mem::take(&mut self.committed[tool.index()]) {
            self.annotations.remove(id);
        }

        self.mode = Mode::new_session(tool);
        self.ui.set_cursor(CursorIcon::Crosshair);
        self.ui.set_layers_interactive(false);
        self.ui.set_active_tool(Some(tool));
        self.ui.request_redraw();
    }

    fn deactivate(&mut self) {
        let finished = match &self.mode {
            Mode::Idle => false,
            Mode::Distance { points } => points.len() >= 2,
            // Dispatched picks were committed on the second click; only a lone
            // start marker can be pending here.
            Mode::Profile { start } => start.is_none(),
            // An open ring is never finished: closing it deactivates the tool
            // by itself.
            Mode::Area { .. } => false,
        };
        let tool = self.mode.tool();
        self.mode = Mode::Idle;

        let transient: Vec<_> = self
            .session_graphics
            .drain(..)
            .chain(self.session_line.take())
            .chain(self.session_popup.take())
            .collect();

        match tool {
            Some(tool) if finished => self.committed[tool.index()].extend(transient),
            _ => {
                for id in transient {
                    self.annotations.remove(id);
                }
            }
        }

        self.restore_ui();
    }

    fn restore_ui(&mut self) {
        self.ui.set_cursor(CursorIcon::Default);
        self.ui.set_layers_interactive(true);
        self.ui.set_active_tool(None);
        self.ui.request_redraw();
    }

    fn draw_distance_session(&mut self, points: &[GeoPoint2d]) {
        let Some(last) = points.last() else { return };

        let marker = self.annotations.add_marker(*last, self.options.measure_marker);
        self.session_graphics.push(marker);

        if points.len() >= 2 {
            if let Some(line) = self.session_line.take() {
                self.annotations.remove(line);
            }
            if let Some(popup) = self.session_popup.take() {
                self.annotations.remove(popup);
            }

            self.session_line = Some(self.annotations.add_polyline(points, self.options.measure_line));

            let label = format::distance_label(geodesy::path_length(points));
            self.session_popup = Some(self.annotations.show_popup(*last, label));
        }

        self.ui.request_redraw();
    }

    fn draw_profile_start(&mut self, point: GeoPoint2d) {
        let marker = self.annotations.add_marker(point, self.options.profile_marker);
        self.session_graphics.push(marker);
        self.ui.request_redraw();
    }

    fn complete_profile_pick(&mut self, start: GeoPoint2d, end: GeoPoint2d) {
        let line = self
            .annotations
            .add_polyline(&[start, end], self.options.profile_line);
        let marker = self.annotations.add_marker(end, self.options.profile_marker);

        // The pick is finished the moment it is dispatched, so its graphics
        // survive deactivation of the tool.
        let committed = &mut self.committed[MeasureTool::Profile.index()];
        committed.extend(self.session_graphics.drain(..));
        committed.push(line);
        committed.push(marker);

        match &self.elevation {
            Some(provider) => {
                if let Err(error) = provider.request_profile(start, end) {
                    log::warn!("Failed to request elevation profile: {error}");
                }
            }
            None => log::debug!("Elevation profile pick completed but no provider is configured"),
        }

        self.ui.request_redraw();
    }

    fn draw_area_session(&mut self, points: &[GeoPoint2d]) {
        let Some(last) = points.last() else { return };

        let marker = self.annotations.add_marker(*last, self.options.measure_marker);
        self.session_graphics.push(marker);

        if points.len() >= 2 {
            if let Some(line) = self.session_line.take() {
                self.annotations.remove(line);
            }

            self.session_line = Some(self.annotations.add_polyline(points, self.options.area_outline));
        }

        self.ui.request_redraw();
    }

    fn finalize_area(&mut self, ring: &[GeoPoint2d]) {
        let Some(bounds) = GeoRect::from_points(ring.iter()) else {
            return;
        };

        if let Some(line) = self.session_line.take() {
            self.annotations.remove(line);
        }

        let polygon = self.annotations.add_polygon(ring, self.options.area_polygon);

        let label = format::area_label(geodesy::ring_area(ring), geodesy::ring_perimeter(ring));
        let popup = self.annotations.show_popup(bounds.center(), label);

        let committed = &mut self.committed[MeasureTool::Area.index()];
        committed.extend(self.session_graphics.drain(..));
        committed.push(polygon);
        committed.push(popup);

        self.mode = Mode::Idle;
        self.restore_ui();
    }
}

impl UserEventHandler for MeasureController {
    fn handle(&mut self, event: &UserEvent) -> EventPropagation {
        match event {
            UserEvent::Click(MouseButton::Left, mouse_event) => {
                self.primary_click(mouse_event.map_pointer_position)
            }
            UserEvent::Click(MouseButton::Right, mouse_event) => {
                self.secondary_click(mouse_event.map_pointer_position)
            }
            _ => EventPropagation::Propagate,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use approx::assert_relative_eq;
    use assert_matches::assert_matches;
    use cartometer_geo::{latlon, GeoPoint};
    use parking_lot::RwLock;

    use super::*;
    use crate::error::CartometerError;
    use crate::layer::{AnnotationStore, Graphic};

    type SharedStore = Arc<RwLock<AnnotationStore>>;

    fn controller() -> (MeasureController, SharedStore) {
        let store: SharedStore = Arc::new(RwLock::new(AnnotationStore::new()));
        (MeasureController::new(store.clone()), store)
    }

    impl ElevationProfileProvider for Arc<Mutex<Vec<(GeoPoint2d, GeoPoint2d)>>> {
        fn request_profile(
            &self,
            start: GeoPoint2d,
            end: GeoPoint2d,
        ) -> Result<(), CartometerError> {
            self.lock().expect("lock is not poisoned").push((start, end));
            Ok(())
        }
    }

    fn count_of(store: &SharedStore, predicate: fn(&Graphic) -> bool) -> usize {
        store
            .read()
            .iter()
            .filter(|(_, graphic)| predicate(graphic))
            .count()
    }

    fn markers(store: &SharedStore) -> usize {
        count_of(store, |g| matches!(g, Graphic::Marker { .. }))
    }

    fn polylines(store: &SharedStore) -> usize {
        count_of(store, |g| matches!(g, Graphic::Polyline { .. }))
    }

    fn polygons(store: &SharedStore) -> usize {
        count_of(store, |g| matches!(g, Graphic::Polygon { .. }))
    }

    fn popup_text(store: &SharedStore) -> Option<String> {
        store.read().iter().find_map(|(_, graphic)| match graphic {
            Graphic::Popup { text, .. } => Some(text.clone()),
            _ => None,
        })
    }

    #[test]
    fn at_most_one_tool_is_active() {
        let (mut controller, _store) = controller();

        controller.toggle(MeasureTool::Distance);
        assert_eq!(controller.active_tool(), Some(MeasureTool::Distance));

        controller.toggle(MeasureTool::Area);
        assert_eq!(controller.active_tool(), Some(MeasureTool::Area));

        controller.toggle(MeasureTool::Profile);
        assert_eq!(controller.active_tool(), Some(MeasureTool::Profile));

        controller.toggle(MeasureTool::Profile);
        assert_eq!(controller.active_tool(), None);
    }

    #[test]
    fn switching_tools_clears_the_unfinished_session() {
        let (mut controller, store) = controller();

        controller.toggle(MeasureTool::Distance);
        controller.primary_click(latlon!(19.0, -99.0));
        assert_eq!(markers(&store), 1);

        // A single point is not a finished drawing, so activating another
        // tool removes it.
        controller.toggle(MeasureTool::Area);
        assert_eq!(markers(&store), 0);

        // The area session starts fresh despite the distance clicks before.
        controller.primary_click(latlon!(19.0, -99.0));
        assert_eq!(markers(&store), 1);
        assert_eq!(polylines(&store), 0);
    }

    #[test]
    fn clicks_are_ignored_when_idle() {
        let (mut controller, store) = controller();

        assert_matches!(
            controller.primary_click(latlon!(19.0, -99.0)),
            EventPropagation::Propagate
        );
        assert_matches!(
            controller.secondary_click(latlon!(19.0, -99.0)),
            EventPropagation::Propagate
        );
        assert!(store.read().is_empty());
    }

    #[test]
    fn distance_session_draws_line_and_updating_popup() {
        let (mut controller, store) = controller();
        controller.toggle(MeasureTool::Distance);

        assert_matches!(
            controller.primary_click(latlon!(19.0, -99.0)),
            EventPropagation::Consume
        );
        assert_eq!(markers(&store), 1);
        assert_eq!(polylines(&store), 0);
        assert_eq!(popup_text(&store), None);

        controller.primary_click(latlon!(19.0, -98.99));
        assert_eq!(markers(&store), 2);
        assert_eq!(polylines(&store), 1);
        assert_eq!(popup_text(&store), Some("Distance: 1.05 km".into()));

        // The polyline and popup are replaced, not stacked.
        controller.primary_click(latlon!(19.0, -98.98));
        assert_eq!(markers(&store), 3);
        assert_eq!(polylines(&store), 1);
        assert_eq!(popup_text(&store), Some("Distance: 2.10 km".into()));
    }

    #[test]
    fn distance_popup_matches_path_length() {
        let (mut controller, store) = controller();
        controller.toggle(MeasureTool::Distance);

        let points = [latlon!(19.0, -99.0), latlon!(19.0, -98.99)];
        for point in points {
            controller.primary_click(point);
        }

        let length = geodesy::path_length(&points);
        assert_relative_eq!(length, 1051.4, max_relative = 1e-3);
        assert_eq!(popup_text(&store), Some(format::distance_label(length)));
    }

    #[test]
    fn finished_distance_drawing_survives_tool_switch() {
        let (mut controller, store) = controller();
        controller.toggle(MeasureTool::Distance);
        controller.primary_click(latlon!(19.0, -99.0));
        controller.primary_click(latlon!(19.0, -98.99));

        controller.toggle(MeasureTool::Area);
        assert_eq!(polylines(&store), 1);
        assert_eq!(markers(&store), 2);

        // Re-entering the distance tool removes its previous drawing.
        controller.toggle(MeasureTool::Distance);
        assert_eq!(polylines(&store), 0);
        assert_eq!(markers(&store), 0);
    }

    #[test]
    fn profile_pick_dispatches_and_resets() {
        let requests: Arc<Mutex<Vec<(GeoPoint2d, GeoPoint2d)>>> = Arc::default();

        let store: SharedStore = Arc::new(RwLock::new(AnnotationStore::new()));
        let mut controller =
            MeasureController::new(store.clone()).with_elevation_provider(requests.clone());

        controller.toggle(MeasureTool::Profile);

        let start = latlon!(19.0, -99.0);
        let end = latlon!(19.1, -99.1);

        controller.primary_click(start);
        assert!(requests.lock().expect("lock is not poisoned").is_empty());
        assert_eq!(markers(&store), 1);

        controller.primary_click(end);
        assert_eq!(
            *requests.lock().expect("lock is not poisoned"),
            vec![(start, end)]
        );
        assert_eq!(markers(&store), 2);
        assert_eq!(polylines(&store), 1);

        // The tool stays active and the next click starts a new pick.
        assert_eq!(controller.active_tool(), Some(MeasureTool::Profile));
        controller.primary_click(latlon!(19.2, -99.2));
        assert_eq!(requests.lock().expect("lock is not poisoned").len(), 1);
        assert_eq!(markers(&store), 3);
    }

    #[test]
    fn lone_profile_start_is_cleared_on_deactivation() {
        let (mut controller, store) = controller();
        controller.toggle(MeasureTool::Profile);
        controller.primary_click(latlon!(19.0, -99.0));

        controller.toggle(MeasureTool::Profile);
        assert!(store.read().is_empty());
    }

    #[test]
    fn dispatched_profile_track_survives_deactivation() {
        let (mut controller, store) = controller();
        controller.toggle(MeasureTool::Profile);
        controller.primary_click(latlon!(19.0, -99.0));
        controller.primary_click(latlon!(19.1, -99.1));

        controller.toggle(MeasureTool::Profile);
        assert_eq!(markers(&store), 2);
        assert_eq!(polylines(&store), 1);

        // But activating the tool once more starts from a clean slate.
        controller.toggle(MeasureTool::Profile);
        assert!(store.read().is_empty());
    }

    #[test]
    fn open_area_ring_has_no_popup() {
        let (mut controller, store) = controller();
        controller.toggle(MeasureTool::Area);

        controller.primary_click(latlon!(19.0, -99.0));
        controller.primary_click(latlon!(19.0, -98.99));
        controller.primary_click(latlon!(19.01, -98.99));

        assert_eq!(markers(&store), 3);
        assert_eq!(polylines(&store), 1);
        assert_eq!(polygons(&store), 0);
        assert_eq!(popup_text(&store), None);
    }

    #[test]
    fn closing_an_area_needs_3_points() {
        let (mut controller, store) = controller();
        controller.toggle(MeasureTool::Area);
        controller.primary_click(latlon!(19.0, -99.0));
        controller.primary_click(latlon!(19.0, -98.99));

        assert_matches!(
            controller.secondary_click(latlon!(19.0, -98.99)),
            EventPropagation::Propagate
        );
        assert_eq!(controller.active_tool(), Some(MeasureTool::Area));
        assert_eq!(polygons(&store), 0);
        assert_eq!(popup_text(&store), None);
    }

    #[test]
    fn closing_an_area_draws_polygon_and_deactivates() {
        let (mut controller, store) = controller();
        controller.toggle(MeasureTool::Area);

        let ring = [
            latlon!(19.0, -99.0),
            latlon!(19.0, -98.99),
            latlon!(19.01, -98.99),
            latlon!(19.01, -99.0),
        ];
        for point in ring {
            controller.primary_click(point);
        }

        assert_matches!(
            controller.secondary_click(latlon!(19.01, -99.0)),
            EventPropagation::Consume
        );

        assert_eq!(controller.active_tool(), None);
        assert_eq!(polylines(&store), 0);
        assert_eq!(polygons(&store), 1);
        assert_eq!(
            popup_text(&store),
            Some(format::area_label(
                geodesy::ring_area(&ring),
                geodesy::ring_perimeter(&ring)
            ))
        );

        // The finished polygon stays visible after the tool is deactivated.
        controller.toggle(MeasureTool::Distance);
        assert_eq!(polygons(&store), 1);
    }

    #[test]
    fn area_popup_is_anchored_at_bounds_center() {
        let (mut controller, store) = controller();
        controller.toggle(MeasureTool::Area);

        let ring = [
            latlon!(19.0, -99.0),
            latlon!(19.0, -98.99),
            latlon!(19.01, -98.99),
            latlon!(19.01, -99.0),
        ];
        for point in ring {
            controller.primary_click(point);
        }
        controller.secondary_click(latlon!(19.01, -99.0));

        let anchor = store
            .read()
            .iter()
            .find_map(|(_, graphic)| match graphic {
                Graphic::Popup { anchor, .. } => Some(*anchor),
                _ => None,
            })
            .expect("area popup was created");
        assert_relative_eq!(anchor.lat(), 19.005);
        assert_relative_eq!(anchor.lon(), -98.995);
    }

    #[test]
    fn clear_all_removes_everything_and_resets() {
        let (mut controller, store) = controller();

        controller.toggle(MeasureTool::Distance);
        controller.primary_click(latlon!(19.0, -99.0));
        controller.primary_click(latlon!(19.0, -98.99));
        controller.toggle(MeasureTool::Area);
        controller.primary_click(latlon!(19.0, -99.0));

        controller.clear_all();

        assert_eq!(controller.active_tool(), None);
        assert!(store.read().is_empty());

        // Re-entering a mode starts from an empty session.
        controller.toggle(MeasureTool::Distance);
        controller.primary_click(latlon!(19.0, -99.0));
        assert_eq!(markers(&store), 1);
        assert_eq!(polylines(&store), 0);
    }

    #[test]
    fn left_clicks_from_event_handler_feed_the_session() {
        use nalgebra::Point2;

        use crate::control::{MouseButtonsState, MouseEvent};

        let (mut controller, store) = controller();
        controller.toggle(MeasureTool::Distance);

        let event = UserEvent::Click(
            MouseButton::Left,
            MouseEvent {
                screen_pointer_position: Point2::new(10.0, 10.0),
                map_pointer_position: latlon!(19.0, -99.0),
                buttons: MouseButtonsState::default(),
            },
        );
        assert_matches!(controller.handle(&event), EventPropagation::Consume);
        assert_eq!(markers(&store), 1);
    }
}
