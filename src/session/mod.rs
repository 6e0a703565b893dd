//! The session: everything one open map needs, in one place.
//!
//! A [`Session`] owns the viewport, the region store, the in-progress
//! drawing and the quiz, plus the current [`Mode`]. Front-ends feed it
//! [`Message`]s and ask it to render; storage is passed in per call.

mod handlers;

use std::time::Duration;

use web_time::Instant;

use crate::constants::{quiz, zoom};
use crate::format::{FormatError, RegionDocument};
use crate::geometry::{Point, Size};
use crate::message::{Message, Mode};
use crate::model::{DrawingError, DrawingSession, RegionId};
use crate::quiz::{GuessOutcome, QuizEngine, QuizPhase};
use crate::render::{Frame, RenderTarget, draw_frame};
use crate::storage::{ImageProvider, RegionRepository, StorageError};
use crate::store::RegionStore;
use crate::viewport::Viewport;

/// Tunables a session is created with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSettings {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Zoom factor per wheel notch or zoom button press.
    pub zoom_step: f64,
    /// Start a new round automatically after one completes.
    pub auto_restart: bool,
    pub restart_delay: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            min_scale: zoom::MIN,
            max_scale: zoom::MAX,
            zoom_step: zoom::STEP,
            auto_restart: true,
            restart_delay: quiz::RESTART_DELAY,
        }
    }
}

/// What an update did, for the front-end to reflect.
#[derive(Debug, Clone, PartialEq)]
pub enum Feedback {
    /// Event ignored
    None,
    /// State changed; redraw
    Redraw,
    /// Vertex appended to the in-progress polygon
    VertexAdded { count: usize },
    /// Polygon committed as a new region
    RegionCommitted(RegionId),
    /// Polygon not committed
    CommitRejected(DrawingError),
    /// A study-mode click was scored
    Guess(GuessOutcome),
    /// A new quiz round began with `total` targets
    RoundStarted { total: usize },
    /// Mode switched
    ModeChanged(Mode),
}

impl Feedback {
    /// Short status line for the study panel, if this feedback has one.
    pub fn status_text(&self) -> Option<String> {
        match self {
            Feedback::Guess(GuessOutcome::Correct { .. }) => Some("Correct".to_string()),
            Feedback::Guess(GuessOutcome::Incorrect { name }) => Some(name.clone()),
            Feedback::Guess(GuessOutcome::RoundComplete { .. }) => {
                Some("All regions completed".to_string())
            }
            Feedback::CommitRejected(err) => Some(err.to_string()),
            _ => None,
        }
    }
}

/// Outcome of [`Session::load_map`].
///
/// Loading never fails outright: a missing image or unreadable region
/// file degrades to no image or an empty region set, noted here.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub map_id: String,
    pub image: Option<Size>,
    pub regions: usize,
    /// Human-readable reasons for any degradation.
    pub warnings: Vec<String>,
}

impl LoadReport {
    pub fn is_degraded(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// State for one open map.
#[derive(Debug, Clone)]
pub struct Session {
    settings: SessionSettings,
    mode: Mode,
    map_id: Option<String>,
    /// Intrinsic size of the decoded map image.
    image: Option<Size>,
    canvas: Size,
    viewport: Viewport,
    store: RegionStore,
    drawing: DrawingSession,
    quiz: QuizEngine,
    /// Last pointer position of an active pan drag.
    drag_last: Option<Point>,
    /// View changed since the last render.
    view_changed: bool,
}

impl Session {
    pub fn new(settings: SessionSettings) -> Self {
        Self::from_parts(settings, RegionStore::new(), QuizEngine::new())
    }

    /// Create a session whose ids, colors and quiz order are reproducible.
    pub fn with_seed(settings: SessionSettings, seed: u64) -> Self {
        Self::from_parts(
            settings,
            RegionStore::with_seed(seed),
            QuizEngine::with_seed(seed.wrapping_add(1)),
        )
    }

    fn from_parts(settings: SessionSettings, store: RegionStore, quiz: QuizEngine) -> Self {
        Self {
            settings,
            mode: Mode::Setup,
            map_id: None,
            image: None,
            canvas: Size::default(),
            viewport: Viewport::with_limits(settings.min_scale, settings.max_scale),
            store,
            drawing: DrawingSession::new(),
            quiz: quiz
                .with_auto_restart(settings.auto_restart)
                .with_restart_delay(settings.restart_delay),
            drag_last: None,
            view_changed: true,
        }
    }

    // Accessors

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn map_id(&self) -> Option<&str> {
        self.map_id.as_deref()
    }

    pub fn image_size(&self) -> Option<Size> {
        self.image
    }

    pub fn canvas(&self) -> Size {
        self.canvas
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn store(&self) -> &RegionStore {
        &self.store
    }

    pub fn drawing(&self) -> &DrawingSession {
        &self.drawing
    }

    pub fn quiz(&self) -> &QuizEngine {
        &self.quiz
    }

    /// Whether anything visible changed since the last [`Session::render`].
    pub fn needs_redraw(&self) -> bool {
        self.view_changed || self.store.is_dirty()
    }

    /// Text for the study prompt: the target's name, or "Done!" once the
    /// round is over. `None` outside study mode.
    pub fn prompt_text(&self) -> Option<String> {
        if self.mode != Mode::Study {
            return None;
        }
        match self.quiz.phase() {
            QuizPhase::InRound => self
                .quiz
                .current_target(&self.store)
                .map(|r| r.name.clone()),
            QuizPhase::RoundComplete => Some("Done!".to_string()),
            QuizPhase::Idle => None,
        }
    }

    /// Apply one input event.
    pub fn update(&mut self, message: Message) -> Feedback {
        match message {
            Message::Pointer(msg) => self.handle_pointer(msg),
            Message::View(msg) => self.handle_view(msg),
            Message::Drawing(msg) => self.handle_drawing(msg),
            Message::Region(msg) => self.handle_region(msg),
            Message::Quiz(msg) => self.handle_quiz(msg),
            Message::SetMode(mode) => self.set_mode(mode),
        }
    }

    /// Fire a due quiz restart. Returns true if a new round started.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.mode != Mode::Study {
            return false;
        }
        self.quiz.tick(&mut self.store, now)
    }

    /// Draw the current state onto `target`.
    pub fn render(&mut self, target: &mut dyn RenderTarget) {
        let frame = Frame {
            canvas: self.canvas,
            image: self.image,
            viewport: &self.viewport,
            regions: &self.store,
            draft: (self.mode == Mode::Setup).then_some(&self.drawing),
        };
        draw_frame(target, &frame);
        self.store.clear_dirty();
        self.view_changed = false;
    }

    /// Record the decoded image size, e.g. once a browser image finishes loading.
    pub fn set_image_size(&mut self, image: Option<Size>) {
        self.image = image.filter(|s| !s.is_empty());
        self.view_changed = true;
    }

    /// Switch to another map.
    ///
    /// Resets the view, drops the in-progress polygon and any pending quiz
    /// restart, then loads the image size and regions. In study mode a new
    /// round starts over the loaded regions.
    pub fn load_map(
        &mut self,
        map_id: &str,
        images: &dyn ImageProvider,
        regions: &dyn RegionRepository,
    ) -> LoadReport {
        log::info!("🗺️ Loading map {}", map_id);
        let mut warnings = Vec::new();

        self.quiz.cancel_restart();
        self.drawing.cancel();
        self.drag_last = None;
        self.viewport = self.viewport.reset();
        self.map_id = Some(map_id.to_string());

        let image = match images.image_size(map_id) {
            Ok(size) if !size.is_empty() => Some(size),
            Ok(_) => {
                warnings.push(format!("image for {map_id} is empty"));
                None
            }
            Err(e) => {
                warnings.push(format!("image unavailable: {e}"));
                None
            }
        };
        self.set_image_size(image);

        let loaded = match regions.load_regions(map_id) {
            Ok(document) => document.into_regions(),
            Err(e) => {
                warnings.push(format!("regions unavailable: {e}"));
                Vec::new()
            }
        };
        let count = self.store.replace_all(loaded);

        for warning in &warnings {
            log::warn!("Map {}: {}", map_id, warning);
        }

        if self.mode == Mode::Study {
            self.quiz.start_round(&mut self.store);
        }

        LoadReport {
            map_id: map_id.to_string(),
            image: self.image,
            regions: count,
            warnings,
        }
    }

    /// Persist the current regions for the loaded map.
    pub fn save(&self, repository: &mut dyn RegionRepository) -> Result<(), StorageError> {
        let map_id = self.map_id.as_deref().ok_or(StorageError::NoMapLoaded)?;
        let document = RegionDocument::from_regions(self.store.regions());
        repository.save_regions(map_id, &document)?;
        log::info!("💾 Saved {} regions for {}", document.len(), map_id);
        Ok(())
    }

    /// Current regions as a pretty-printed region document.
    pub fn export_json(&self) -> Result<String, FormatError> {
        RegionDocument::from_regions(self.store.regions()).to_json()
    }

    /// Replace the regions with those in `json`.
    ///
    /// On a parse or validation error nothing changes. Returns the number
    /// of regions loaded.
    pub fn import_json(&mut self, json: &str) -> Result<usize, FormatError> {
        let document = RegionDocument::from_json(json)?;
        document.validate()?;
        let count = self.store.replace_all(document.into_regions());
        log::info!("Imported {} regions", count);
        if self.mode == Mode::Study {
            self.quiz.start_round(&mut self.store);
        }
        Ok(count)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionSettings::default())
    }
}
