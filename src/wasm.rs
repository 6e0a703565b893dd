//! Browser front-end glue.
//!
//! [`CanvasTarget`] paints frames onto a 2D canvas. [`WebSession`] wraps a
//! [`Session`] for JavaScript: the page forwards DOM events and calls
//! `render` when `needs_redraw` says so. Region documents live in an
//! in-memory library; the page moves them in and out as JSON.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};
use web_time::Instant;

use crate::config::AppConfig;
use crate::constants::style;
use crate::geometry::{Point, Rect, Size};
use crate::message::{
    DrawingMessage, Message, Mode, PointerMessage, QuizMessage, RegionMessage, ViewMessage,
};
use crate::model::RegionId;
use crate::render::{PathStyle, RenderTarget};
use crate::session::Session;
use crate::storage::MemoryLibrary;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let config = AppConfig::load_from_local_storage().unwrap_or_default();
    if let Err(e) = console_log::init_with_level(
        config
            .preferences
            .log_level
            .to_level_filter()
            .to_level()
            .unwrap_or(log::Level::Error),
    ) {
        web_sys::console::log_1(&format!("Logger already initialized: {}", e).into());
    }
    web_sys::console::log_1(&"winestudy WASM starting...".into());
}

/// Renders onto a browser 2D canvas.
pub struct CanvasTarget {
    ctx: CanvasRenderingContext2d,
    image: Option<HtmlImageElement>,
}

impl CanvasTarget {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx, image: None }
    }

    /// Image drawn by `draw_image`.
    pub fn set_image(&mut self, image: Option<HtmlImageElement>) {
        self.image = image;
    }

    fn trace_path(&self, points: &[Point], closed: bool) {
        self.ctx.begin_path();
        for (i, p) in points.iter().enumerate() {
            if i == 0 {
                self.ctx.move_to(p.x, p.y);
            } else {
                self.ctx.line_to(p.x, p.y);
            }
        }
        if closed {
            self.ctx.close_path();
        }
    }
}

impl RenderTarget for CanvasTarget {
    fn clear(&mut self, canvas: Size) {
        self.ctx.clear_rect(0.0, 0.0, canvas.width, canvas.height);
    }

    fn draw_image(&mut self, rect: Rect) {
        let Some(image) = &self.image else {
            return;
        };
        if let Err(e) = self
            .ctx
            .draw_image_with_html_image_element_and_dw_and_dh(
                image,
                rect.x,
                rect.y,
                rect.width,
                rect.height,
            )
        {
            log::warn!("Failed to draw map image: {:?}", e);
        }
    }

    fn draw_polygon(&mut self, points: &[Point], closed: bool, path: &PathStyle<'_>) {
        if points.is_empty() {
            return;
        }
        self.ctx.save();
        self.trace_path(points, closed);

        if path.dashed {
            let dash = js_sys::Array::of2(
                &style::DASH_PATTERN[0].into(),
                &style::DASH_PATTERN[1].into(),
            );
            if let Err(e) = self.ctx.set_line_dash(&dash) {
                log::debug!("Line dash unsupported: {:?}", e);
            }
        }
        self.ctx.set_line_width(path.line_width);
        if let Some(fill) = path.fill {
            self.ctx.set_fill_style_str(fill);
            self.ctx.fill();
        }
        self.ctx.set_stroke_style_str(path.stroke);
        self.ctx.stroke();
        self.ctx.restore();
    }

    fn place_label(&mut self, at: Point, text: &str) {
        self.ctx.save();
        self.ctx.set_font(style::LABEL_FONT);
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        self.ctx.set_fill_style_str(style::LABEL_COLOR);
        if let Err(e) = self.ctx.fill_text(text, at.x, at.y) {
            log::warn!("Failed to draw label: {:?}", e);
        }
        self.ctx.restore();
    }
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// A session bound to a canvas element.
#[wasm_bindgen]
pub struct WebSession {
    session: Session,
    target: CanvasTarget,
    canvas: HtmlCanvasElement,
    library: MemoryLibrary,
    config: AppConfig,
}

#[wasm_bindgen]
impl WebSession {
    /// Attach to the canvas with DOM id `canvas_id`.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<WebSession, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| js_error("No document available"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| js_error(format!("No element with id {canvas_id:?}")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| js_error(format!("Element {canvas_id:?} is not a canvas")))?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| js_error("2D canvas context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| js_error("Unexpected canvas context type"))?;

        let config = AppConfig::load_from_local_storage().unwrap_or_default();
        let mut web = WebSession {
            session: Session::new(config.session_settings()),
            target: CanvasTarget::new(ctx),
            canvas,
            library: MemoryLibrary::new(),
            config,
        };
        web.resize();
        Ok(web)
    }

    /// Persist the configuration this session was created with, so the
    /// page's settings survive a reload.
    pub fn save_config(&self) -> Result<(), JsValue> {
        self.config.save_to_local_storage().map_err(js_error)
    }

    /// Pick up the canvas element's current pixel size.
    pub fn resize(&mut self) {
        let size = Size::new(f64::from(self.canvas.width()), f64::from(self.canvas.height()));
        self.session.update(ViewMessage::Resize(size).into());
    }

    /// Show a decoded map image, with its regions from `regions_json` if given.
    ///
    /// Returns the load warnings joined by newlines (empty when clean).
    pub fn load_map(
        &mut self,
        map_id: &str,
        image: HtmlImageElement,
        regions_json: Option<String>,
    ) -> String {
        let size = Size::new(
            f64::from(image.natural_width()),
            f64::from(image.natural_height()),
        );
        self.library.add_map(map_id, size);
        if let Some(json) = regions_json {
            self.library.insert_raw(map_id, json);
        }
        self.target.set_image(Some(image));
        let report = self.session.load_map(map_id, &self.library, &self.library);
        report.warnings.join("\n")
    }

    /// Replace the regions with a region document.
    pub fn import_json(&mut self, json: &str) -> Result<usize, JsValue> {
        self.session.import_json(json).map_err(js_error)
    }

    /// Current regions as a region document.
    pub fn export_json(&self) -> Result<String, JsValue> {
        self.session.export_json().map_err(js_error)
    }

    /// Click at canvas pixel coordinates. Returns the status text, if any.
    pub fn click(&mut self, x: f64, y: f64) -> Option<String> {
        self.session
            .update(PointerMessage::Click(Point::new(x, y)).into())
            .status_text()
    }

    pub fn wheel(&mut self, x: f64, y: f64, delta_y: f64) {
        self.session.update(
            PointerMessage::Wheel {
                at: Point::new(x, y),
                delta_y,
            }
            .into(),
        );
    }

    pub fn drag_start(&mut self, x: f64, y: f64) {
        self.session
            .update(PointerMessage::DragStart(Point::new(x, y)).into());
    }

    pub fn drag_move(&mut self, x: f64, y: f64) {
        self.session
            .update(PointerMessage::DragMove(Point::new(x, y)).into());
    }

    pub fn drag_end(&mut self) {
        self.session.update(PointerMessage::DragEnd.into());
    }

    pub fn zoom_in(&mut self) {
        self.session.update(ViewMessage::ZoomIn.into());
    }

    pub fn zoom_out(&mut self) {
        self.session.update(ViewMessage::ZoomOut.into());
    }

    pub fn reset_view(&mut self) {
        self.session.update(ViewMessage::Reset.into());
    }

    /// Finish the polygon. Returns an error message if it was rejected.
    pub fn commit(&mut self, name: Option<String>) -> Option<String> {
        self.session
            .update(DrawingMessage::Commit(name).into())
            .status_text()
    }

    pub fn cancel_drawing(&mut self) {
        self.session.update(DrawingMessage::Cancel.into());
    }

    pub fn rename_region(&mut self, id: &str, name: String) {
        self.session
            .update(RegionMessage::Rename(RegionId::from(id), name).into());
    }

    pub fn delete_region(&mut self, id: &str) {
        self.session
            .update(RegionMessage::Delete(RegionId::from(id)).into());
    }

    pub fn clear_all(&mut self) {
        self.session.update(RegionMessage::ClearAll.into());
    }

    /// Switch between setup (`false`) and study (`true`).
    pub fn set_study_mode(&mut self, study: bool) {
        let mode = if study { Mode::Study } else { Mode::Setup };
        self.session.update(Message::SetMode(mode));
    }

    pub fn restart_round(&mut self) {
        self.session.update(QuizMessage::Restart.into());
    }

    /// Prompt for the study panel.
    pub fn prompt(&self) -> Option<String> {
        self.session.prompt_text()
    }

    /// Call periodically (e.g. from `requestAnimationFrame`). Returns true
    /// when a new quiz round started.
    pub fn tick(&mut self) -> bool {
        self.session.tick(Instant::now())
    }

    pub fn needs_redraw(&self) -> bool {
        self.session.needs_redraw()
    }

    pub fn render(&mut self) {
        self.session.render(&mut self.target);
    }
}
