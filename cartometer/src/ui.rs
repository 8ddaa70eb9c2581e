//! Signals the measurement subsystem sends to the surrounding user interface.

use maybe_sync::{MaybeSend, MaybeSync};

use crate::control::MeasureTool;

/// Shape of the mouse cursor over the map.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum CursorIcon {
    /// The platform default cursor.
    #[default]
    Default,
    /// Crosshair cursor indicating that clicks add measurement points.
    Crosshair,
}

/// Host user interface the measurement subsystem reports its state changes to.
///
/// The controller calls these methods on every mode transition. A host
/// application would typically change the cursor over the map widget, disable
/// click handling of its data layers while a tool is active (so feature popups
/// do not swallow measurement clicks) and highlight the toolbar button of the
/// active tool.
pub trait MapUi: MaybeSend + MaybeSync {
    /// Sets the shape of the cursor over the map.
    fn set_cursor(&self, icon: CursorIcon);

    /// Enables or disables click handling of the data layers displayed on the
    /// map.
    fn set_layers_interactive(&self, interactive: bool);

    /// Reports which measurement tool is active, if any. At most one tool is
    /// active at a time.
    fn set_active_tool(&self, tool: Option<MeasureTool>);

    /// Requests the map to be redrawn.
    fn request_redraw(&self);
}

/// A [`MapUi`] that ignores all signals.
#[derive(Debug, Default, Copy, Clone)]
pub struct DummyMapUi;

impl MapUi for DummyMapUi {
    fn set_cursor(&self, _icon: CursorIcon) {}

    fn set_layers_interactive(&self, _interactive: bool) {}

    fn set_active_tool(&self, _tool: Option<MeasureTool>) {}

    fn request_redraw(&self) {}
}
