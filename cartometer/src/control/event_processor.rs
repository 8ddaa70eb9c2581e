use cartometer_geo::GeoPoint2d;
use nalgebra::{Point2, Vector2};
use web_time::SystemTime;

use crate::control::{
    EventPropagation, MouseButtonsState, MouseEvent, RawUserEvent, UserEvent, UserEventHandler,
};

const DRAG_THRESHOLD: f64 = 3.0;
const CLICK_TIMEOUT: std::time::Duration = std::time::Duration::from_millis(200);

/// Converts [`RawUserEvent`]s into [`UserEvent`]s and feeds them to the registered handlers.
///
/// The processor keeps track of the mouse buttons state and the last known pointer position, and
/// synthesizes higher-level events from the raw stream: a press/release pair within a short
/// timeout becomes a [`UserEvent::Click`]; moving the pointer with a button pressed past a small
/// pixel threshold becomes a drag. A release that ends a drag produces only
/// [`UserEvent::DragEnded`], never a click, so panning the map can not add measurement points.
///
/// Drag events are delivered only to the handler that consumed the corresponding
/// [`UserEvent::DragStarted`].
pub struct EventProcessor {
    handlers: Vec<Box<dyn UserEventHandler>>,
    pointer_position: Point2<f64>,
    pointer_pressed_position: Point2<f64>,
    map_pointer_position: GeoPoint2d,

    buttons_state: MouseButtonsState,

    last_pressed_time: SystemTime,

    drag_started: bool,
    drag_target: Option<usize>,
}

impl Default for EventProcessor {
    fn default() -> Self {
        Self {
            handlers: vec![],
            pointer_position: Point2::origin(),
            pointer_pressed_position: Point2::origin(),
            map_pointer_position: GeoPoint2d::default(),
            buttons_state: Default::default(),
            last_pressed_time: SystemTime::UNIX_EPOCH,
            drag_started: false,
            drag_target: None,
        }
    }
}

impl EventProcessor {
    /// Creates a new processor with no handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a handler to the end of the handler list. Events are offered to handlers in the order
    /// they were added.
    pub fn add_handler(&mut self, handler: impl UserEventHandler + 'static) {
        self.handlers.push(Box::new(handler));
    }

    /// Processes the raw event and returns true if any produced [`UserEvent`] was handled
    /// (not propagated past all handlers).
    ///
    /// The host should suppress the default platform reaction to the input (such as showing the
    /// context menu on right click) when this method returns true.
    pub fn handle(&mut self, event: RawUserEvent) -> bool {
        let mut handled = false;

        for user_event in self.process(event) {
            let mut drag_start_target = None;

            let drag_delta = self.pointer_position - self.pointer_pressed_position;
            let mouse_event = self.get_mouse_event();

            for (index, handler) in self.handlers.iter_mut().enumerate() {
                if matches!(user_event, UserEvent::Drag(..) | UserEvent::DragEnded(..)) {
                    if let Some(target) = &self.drag_target {
                        if index != *target {
                            continue;
                        }
                    } else {
                        continue;
                    }
                }

                match handler.handle(&user_event) {
                    EventPropagation::Propagate => {}
                    EventPropagation::Stop => {
                        handled = true;
                        break;
                    }
                    EventPropagation::Consume => {
                        handled = true;

                        if let UserEvent::DragStarted(button, _) = &user_event {
                            drag_start_target = Some(index);

                            handler.handle(&UserEvent::Drag(
                                *button,
                                drag_delta,
                                mouse_event.clone(),
                            ));
                        }

                        break;
                    }
                }
            }

            if drag_start_target.is_some() {
                self.drag_target = drag_start_target;
            }

            // Cleared only after routing so the ending drag still reaches its
            // owner handler.
            if matches!(user_event, UserEvent::DragEnded(..)) {
                self.drag_target = None;
            }
        }

        handled
    }

    fn process(&mut self, event: RawUserEvent) -> Vec<UserEvent> {
        let now = SystemTime::now();
        match event {
            RawUserEvent::ButtonPressed(button) => {
                self.buttons_state.set_pressed(button);
                self.last_pressed_time = now;
                self.pointer_pressed_position = self.pointer_position;
                self.drag_started = false;

                vec![UserEvent::ButtonPressed(button, self.get_mouse_event())]
            }
            RawUserEvent::ButtonReleased(button) => {
                self.buttons_state.set_released(button);
                let mut events = vec![UserEvent::ButtonReleased(button, self.get_mouse_event())];

                // A release that ends a drag must not click, even if no
                // handler took ownership of the drag.
                if self.drag_target.is_some() {
                    events.push(UserEvent::DragEnded(button, self.get_mouse_event()));
                } else if !self.drag_started
                    && (now.duration_since(self.last_pressed_time)).unwrap_or_default()
                        < CLICK_TIMEOUT
                {
                    events.push(UserEvent::Click(button, self.get_mouse_event()));
                }

                events
            }
            RawUserEvent::PointerMoved(position, map_position) => {
                let prev_position = self.pointer_position;
                self.pointer_position = position;
                self.map_pointer_position = map_position;

                let mut events = vec![UserEvent::PointerMoved(self.get_mouse_event())];
                if let Some(button) = self.buttons_state.single_pressed() {
                    if !self.drag_started
                        && taxicab_distance(position, self.pointer_pressed_position)
                            > DRAG_THRESHOLD
                    {
                        self.drag_started = true;
                        events.push(UserEvent::DragStarted(
                            button,
                            self.get_mouse_event_pos(self.pointer_pressed_position),
                        ));
                    }

                    if self.drag_target.is_some() {
                        events.push(UserEvent::Drag(
                            button,
                            position - prev_position,
                            self.get_mouse_event(),
                        ));
                    }
                }

                events
            }
        }
    }

    fn get_mouse_event(&self) -> MouseEvent {
        self.get_mouse_event_pos(self.pointer_position)
    }

    fn get_mouse_event_pos(&self, screen_pointer_position: Point2<f64>) -> MouseEvent {
        MouseEvent {
            screen_pointer_position,
            map_pointer_position: self.map_pointer_position,
            buttons: self.buttons_state,
        }
    }
}

fn taxicab_distance(a: Point2<f64>, b: Point2<f64>) -> f64 {
    let delta: Vector2<f64> = a - b;
    delta.x.abs() + delta.y.abs()
}
