//! This module contains traits and structs that provide interactivity of the measurement tools.
//!
//! User interaction handling is done in several steps:
//! 1. The host map widget converts its native pointer event into a common [`RawUserEvent`] enum,
//!    attaching the geographic coordinate under the pointer. How screen pixels map to geographic
//!    coordinates is the widget's knowledge, so the conversion happens on that side of the boundary.
//! 2. `RawUserEvent` is given to the [`EventProcessor`], that converts it into a [`UserEvent`].
//!    `EventProcessor` keeps track of input state (which mouse buttons are pressed), synthesizes
//!    clicks and drags, and reports back whether the event was handled so the host can suppress
//!    default platform behavior such as the context menu.
//! 3. `EventProcessor` has a list of [`UserEventHandler`]s, which change the state of the
//!    application based on the events. The [`MeasureController`] is such a handler.

use cartometer_geo::GeoPoint2d;
use maybe_sync::{MaybeSend, MaybeSync};
use nalgebra::{Point2, Vector2};

mod event_processor;
mod measure;

pub use event_processor::EventProcessor;
pub use measure::{MeasureController, MeasureOptions, MeasureTool};

/// User input handler.
pub trait UserEventHandler {
    /// Handle the event.
    fn handle(&mut self, event: &UserEvent) -> EventPropagation;
}

impl<T: for<'a> FnMut(&'a UserEvent) -> EventPropagation> UserEventHandler for T
where
    T: MaybeSync + MaybeSend,
{
    fn handle(&mut self, event: &UserEvent) -> EventPropagation {
        self(event)
    }
}

/// Raw user interaction event. This type is an intermediate step between the host widget's native
/// event and an event that will be processed by the application. It does not provide any state
/// information, as not all supported platforms give this information together with the event.
/// Instead, the input state information is stored in the [`EventProcessor`] struct, which can
/// combine `RawUserEvent` with the state to produce [`UserEvent`] which is then given to the
/// application.
#[derive(Debug, Clone)]
pub enum RawUserEvent {
    /// A mouse button was pressed.
    ButtonPressed(MouseButton),
    /// A mouse button was released.
    ButtonReleased(MouseButton),
    /// Mouse pointer was moved. Carries the position both in screen pixels from the top-left
    /// corner of the map widget and as the geographic coordinate under the pointer.
    PointerMoved(Point2<f64>, GeoPoint2d),
}

/// User interaction event. This is the main type that the application would use through
/// [`UserEventHandler`]s.
#[derive(Debug, Clone)]
pub enum UserEvent {
    /// A mouse button was pressed.
    ButtonPressed(MouseButton, MouseEvent),
    /// A mouse button was released.
    ButtonReleased(MouseButton, MouseEvent),
    /// A mouse button was clicked. This event is fired right after the [`UserEvent::ButtonReleased`]
    /// event if the release was shortly after the press event and no drag took place in between.
    Click(MouseButton, MouseEvent),
    /// Mouse pointer moved.
    PointerMoved(MouseEvent),

    /// Drag started (user pressed a mouse button and moves the pointer around without releasing
    /// the button).
    DragStarted(MouseButton, MouseEvent),

    /// Mouse pointer moved after drag started was consumed. The vector is the pointer movement in
    /// screen pixels since the previous drag event.
    Drag(MouseButton, Vector2<f64>, MouseEvent),

    /// Mouse button was released while dragging.
    DragEnded(MouseButton, MouseEvent),
}

/// Value returned by an [`UserEventHandler`] to indicate the status of the event.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EventPropagation {
    /// Event should be propagated to the next handler.
    Propagate,
    /// Event should not be propagated to the next handler.
    Stop,
    /// Event should not be propagated to the next handler, and the current event handler should be
    /// considered the owner of the event. This is used, for example, to indicate, that the handler
    /// wants to take ownership of the [`UserEvent::DragStarted`], so that all consequent drag
    /// events are only processed by this handler.
    Consume,
}

/// Mouse button enum.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MouseButton {
    /// Left mouse button - the primary click of the measurement tools.
    Left,
    /// Middle mouse button.
    Middle,
    /// Right mouse button - the secondary click that closes an area polygon.
    Right,
    /// Any other mouse button.
    Other,
}

/// State of the mouse at the moment of the event.
#[derive(Debug, Clone)]
pub struct MouseEvent {
    /// Pointer position on the screen in pixels from the top-left corner of the map widget.
    pub screen_pointer_position: Point2<f64>,
    /// Geographic coordinate under the pointer, as reported by the host map widget.
    pub map_pointer_position: GeoPoint2d,
    /// State of the mouse buttons.
    pub buttons: MouseButtonsState,
}

/// State of a mouse button.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MouseButtonState {
    /// Button is pressed.
    Pressed,
    /// Button is not pressed.
    Released,
}

/// State of all mouse buttons.
#[derive(Debug, Copy, Clone)]
pub struct MouseButtonsState {
    /// State of the left mouse button.
    pub left: MouseButtonState,
    /// State of the middle mouse button.
    pub middle: MouseButtonState,
    /// State of the right mouse button.
    pub right: MouseButtonState,
}

impl MouseButtonsState {
    pub(crate) fn set_pressed(&mut self, button: MouseButton) {
        self.set_state(button, MouseButtonState::Pressed);
    }

    pub(crate) fn set_released(&mut self, button: MouseButton) {
        self.set_state(button, MouseButtonState::Released);
    }

    fn set_state(&mut self, button: MouseButton, state: MouseButtonState) {
        match button {
            MouseButton::Left => self.left = state,
            MouseButton::Middle => self.middle = state,
            MouseButton::Right => self.right = state,
            MouseButton::Other => {}
        }
    }

    fn single_pressed(&self) -> Option<MouseButton> {
        let mut button = None;
        if self.left == MouseButtonState::Pressed && button.replace(MouseButton::Left).is_some() {
            return None;
        }
        if self.middle == MouseButtonState::Pressed && button.replace(MouseButton::Middle).is_some()
        {
            return None;
        }
        if self.right == MouseButtonState::Pressed && button.replace(MouseButton::Right).is_some() {
            return None;
        }

        button
    }
}

impl Default for MouseButtonsState {
    fn default() -> Self {
        Self {
            left: MouseButtonState::Released,
            middle: MouseButtonState::Released,
            right: MouseButtonState::Released,
        }
    }
}
