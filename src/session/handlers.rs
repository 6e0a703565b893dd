//! Message handlers, one per message group.
//!
//! Keeps `Session::update` a plain dispatch.

use crate::geometry::Point;
use crate::message::{DrawingMessage, Mode, PointerMessage, QuizMessage, RegionMessage, ViewMessage};
use crate::session::{Feedback, Session};

impl Session {
    /// Screen point to normalized image coordinates, if an image is shown.
    fn normalize(&self, screen: Point) -> Option<Point> {
        let image = self.image?;
        self.viewport
            .screen_to_normalized(screen, self.canvas, image)
    }

    fn zoom_at(&mut self, factor: f64, anchor: Point) -> Feedback {
        let zoomed = self.viewport.zoom_toward_point(factor, anchor);
        // Clamped at a limit
        if zoomed.scale() == self.viewport.scale() {
            return Feedback::None;
        }
        self.viewport = zoomed;
        self.view_changed = true;
        log::debug!("🔍 Zoom: {:.2}x", self.viewport.scale());
        Feedback::Redraw
    }

    fn canvas_center(&self) -> Point {
        Point::new(self.canvas.width / 2.0, self.canvas.height / 2.0)
    }

    /// Begin a quiz round and report it.
    fn restart_round(&mut self) -> Feedback {
        self.quiz.start_round(&mut self.store);
        let (_, total) = self.quiz.progress();
        Feedback::RoundStarted { total }
    }

    pub(super) fn handle_pointer(&mut self, msg: PointerMessage) -> Feedback {
        match msg {
            PointerMessage::Click(screen) => {
                let Some(point) = self.normalize(screen) else {
                    return Feedback::None;
                };
                match self.mode {
                    Mode::Setup => {
                        self.drawing.add_point(point);
                        self.view_changed = true;
                        log::debug!("✏️ Vertex {} at ({:.3}, {:.3})", self.drawing.len(), point.x, point.y);
                        Feedback::VertexAdded {
                            count: self.drawing.len(),
                        }
                    }
                    Mode::Study => {
                        let Some(id) = self.store.hit_test(&point).map(|r| r.id.clone()) else {
                            return Feedback::None;
                        };
                        Feedback::Guess(self.quiz.submit_guess(&mut self.store, &id))
                    }
                }
            }
            PointerMessage::Wheel { at, delta_y } => {
                if delta_y < 0.0 {
                    self.zoom_at(self.settings.zoom_step, at)
                } else if delta_y > 0.0 {
                    self.zoom_at(1.0 / self.settings.zoom_step, at)
                } else {
                    Feedback::None
                }
            }
            PointerMessage::DragStart(at) => {
                self.drag_last = Some(at);
                Feedback::None
            }
            PointerMessage::DragMove(at) => {
                let Some(last) = self.drag_last else {
                    return Feedback::None;
                };
                self.drag_last = Some(at);
                let (dx, dy) = (at.x - last.x, at.y - last.y);
                if dx == 0.0 && dy == 0.0 {
                    return Feedback::None;
                }
                self.viewport = self.viewport.pan_by(dx, dy);
                self.view_changed = true;
                Feedback::Redraw
            }
            PointerMessage::DragEnd => {
                self.drag_last = None;
                Feedback::None
            }
        }
    }

    pub(super) fn handle_view(&mut self, msg: ViewMessage) -> Feedback {
        match msg {
            ViewMessage::ZoomIn => self.zoom_at(self.settings.zoom_step, self.canvas_center()),
            ViewMessage::ZoomOut => {
                self.zoom_at(1.0 / self.settings.zoom_step, self.canvas_center())
            }
            ViewMessage::Reset => {
                self.viewport = self.viewport.reset();
                self.view_changed = true;
                log::debug!("🔄 View reset");
                Feedback::Redraw
            }
            ViewMessage::Resize(size) => {
                if size == self.canvas {
                    return Feedback::None;
                }
                self.canvas = size;
                self.view_changed = true;
                Feedback::Redraw
            }
        }
    }

    pub(super) fn handle_drawing(&mut self, msg: DrawingMessage) -> Feedback {
        match msg {
            DrawingMessage::Commit(name) => {
                if self.mode != Mode::Setup {
                    return Feedback::None;
                }
                let name = name
                    .map(|n| n.trim().to_string())
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| format!("Region {}", self.store.len() + 1));
                match self.drawing.commit(name, &mut self.store) {
                    Ok(id) => Feedback::RegionCommitted(id),
                    Err(e) => {
                        log::debug!("Commit rejected: {}", e);
                        Feedback::CommitRejected(e)
                    }
                }
            }
            DrawingMessage::Cancel => {
                if self.drawing.is_empty() {
                    return Feedback::None;
                }
                self.drawing.cancel();
                self.view_changed = true;
                Feedback::Redraw
            }
        }
    }

    pub(super) fn handle_region(&mut self, msg: RegionMessage) -> Feedback {
        match msg {
            RegionMessage::Rename(id, name) => {
                if self.store.rename_region(&id, name) {
                    Feedback::Redraw
                } else {
                    Feedback::None
                }
            }
            RegionMessage::Delete(id) => {
                let Some(removed) = self.store.delete_region(&id) else {
                    return Feedback::None;
                };
                log::debug!("🗑️ Deleted region {:?}", removed.name);
                if self.mode == Mode::Study {
                    return self.restart_round();
                }
                Feedback::Redraw
            }
            RegionMessage::ClearAll => {
                self.drawing.cancel();
                self.store.clear_all();
                log::debug!("🗑️ Cleared all regions");
                if self.mode == Mode::Study {
                    return self.restart_round();
                }
                self.view_changed = true;
                Feedback::Redraw
            }
        }
    }

    pub(super) fn handle_quiz(&mut self, msg: QuizMessage) -> Feedback {
        match msg {
            QuizMessage::Restart => {
                if self.mode != Mode::Study {
                    return Feedback::None;
                }
                self.restart_round()
            }
        }
    }

    pub(super) fn set_mode(&mut self, mode: Mode) -> Feedback {
        if mode == self.mode {
            return Feedback::None;
        }
        log::debug!("🔄 Switching to {} mode", mode.name());
        self.mode = mode;
        self.drag_last = None;
        self.view_changed = true;

        match mode {
            Mode::Study => {
                self.restart_round();
            }
            Mode::Setup => {
                self.quiz.stop();
                self.store.clear_all_overrides();
            }
        }
        Feedback::ModeChanged(mode)
    }
}
