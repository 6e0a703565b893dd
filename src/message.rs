//! Input events for a [`Session`](crate::session::Session).
//!
//! All pointer, keyboard and button events are represented as messages in
//! the Elm architecture style and dispatched through `Session::update`.
//! Positions are in canvas (screen) pixels; the session normalizes them.

use crate::geometry::{Point, Size};
use crate::model::RegionId;

/// Authoring or quizzing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Draw, name and edit regions.
    #[default]
    Setup,
    /// Be quizzed on region names.
    Study,
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Setup => "Setup",
            Mode::Study => "Study",
        }
    }
}

/// Top-level message grouping events by concern.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Pointer events on the canvas
    Pointer(PointerMessage),
    /// Zoom, pan and canvas size
    View(ViewMessage),
    /// In-progress polygon
    Drawing(DrawingMessage),
    /// Edits to committed regions
    Region(RegionMessage),
    /// Quiz control
    Quiz(QuizMessage),
    /// Switch between setup and study
    SetMode(Mode),
}

/// Pointer input in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerMessage {
    /// Single click: add a vertex (setup) or guess (study)
    Click(Point),
    /// Wheel scroll over the canvas; negative `delta_y` zooms in
    Wheel { at: Point, delta_y: f64 },
    /// Pan drag started
    DragStart(Point),
    /// Pan drag moved
    DragMove(Point),
    /// Pan drag ended
    DragEnd,
}

/// View manipulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewMessage {
    /// Zoom in one step around the canvas center
    ZoomIn,
    /// Zoom out one step around the canvas center
    ZoomOut,
    /// Back to fit-to-canvas
    Reset,
    /// Canvas resized
    Resize(Size),
}

/// In-progress polygon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawingMessage {
    /// Finish the polygon; `None` or a blank name picks a default
    Commit(Option<String>),
    /// Discard the vertices collected so far
    Cancel,
}

/// Edits to committed regions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionMessage {
    Rename(RegionId, String),
    Delete(RegionId),
    /// Remove every region and the in-progress polygon
    ClearAll,
}

/// Quiz control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizMessage {
    /// Start a new round now
    Restart,
}

impl From<PointerMessage> for Message {
    fn from(msg: PointerMessage) -> Self {
        Message::Pointer(msg)
    }
}

impl From<ViewMessage> for Message {
    fn from(msg: ViewMessage) -> Self {
        Message::View(msg)
    }
}

impl From<DrawingMessage> for Message {
    fn from(msg: DrawingMessage) -> Self {
        Message::Drawing(msg)
    }
}

impl From<RegionMessage> for Message {
    fn from(msg: RegionMessage) -> Self {
        Message::Region(msg)
    }
}

impl From<QuizMessage> for Message {
    fn from(msg: QuizMessage) -> Self {
        Message::Quiz(msg)
    }
}
