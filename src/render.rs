//! Frame rendering behind a capability trait.
//!
//! [`draw_frame`] turns the current state into draw calls on any
//! [`RenderTarget`]. It knows nothing about canvases or windows; adapters
//! implement the trait per environment (see [`DrawList`] for a recording
//! target, and the browser canvas target in the wasm build).

use crate::constants::style;
use crate::geometry::{Point, Rect, Size};
use crate::model::DrawingSession;
use crate::store::RegionStore;
use crate::viewport::Viewport;

/// Stroke and fill for one path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathStyle<'a> {
    /// Fill color token; `None` leaves the interior unpainted.
    pub fill: Option<&'a str>,
    pub stroke: &'a str,
    pub line_width: f64,
    pub dashed: bool,
}

/// Drawing capabilities the renderer needs from a presentation layer.
///
/// All coordinates are in screen space.
pub trait RenderTarget {
    /// Wipe the surface.
    fn clear(&mut self, canvas: Size);

    /// Draw the map image stretched into `rect`.
    fn draw_image(&mut self, rect: Rect);

    /// Draw a path through `points`, closing it back to the start if `closed`.
    fn draw_polygon(&mut self, points: &[Point], closed: bool, style: &PathStyle<'_>);

    /// Put a text label centered on `at`.
    fn place_label(&mut self, at: Point, text: &str);
}

/// Everything a frame is drawn from.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub canvas: Size,
    /// Intrinsic size of the decoded map image; `None` if not (yet) decoded.
    pub image: Option<Size>,
    pub viewport: &'a Viewport,
    pub regions: &'a RegionStore,
    /// In-progress polygon, drawn only in setup mode.
    pub draft: Option<&'a DrawingSession>,
}

/// Draw one frame.
///
/// The image rectangle is recomputed here every time. Without a decoded
/// image (or with an empty canvas) only the clear is issued.
pub fn draw_frame(target: &mut dyn RenderTarget, frame: &Frame<'_>) {
    target.clear(frame.canvas);

    let Some(image) = frame.image else {
        return;
    };
    let Some(rect) = frame.viewport.image_rect(frame.canvas, image) else {
        return;
    };

    target.draw_image(rect);

    for region in frame.regions.regions().iter().filter(|r| r.is_polygon()) {
        let screen: Vec<Point> = region.points.iter().map(|p| rect.to_screen(*p)).collect();
        let stroke = region
            .stroke_override
            .as_deref()
            .or_else(|| Some(region.color.as_str()).filter(|c| !c.is_empty()))
            .unwrap_or(style::DEFAULT_STROKE);
        let path = PathStyle {
            fill: Some(region.fill_override.as_deref().unwrap_or(style::DEFAULT_FILL)),
            stroke,
            line_width: style::LINE_WIDTH,
            dashed: false,
        };
        target.draw_polygon(&screen, true, &path);

        let label = region.label_anchor().filter(|_| region.show_name);
        if let Some(anchor) = label {
            target.place_label(rect.to_screen(anchor), &region.name);
        }
    }

    if let Some(draft) = frame.draft.filter(|d| !d.is_empty()) {
        let screen: Vec<Point> = draft.points().iter().map(|p| rect.to_screen(*p)).collect();
        let path = PathStyle {
            fill: None,
            stroke: style::DRAFT_STROKE,
            line_width: style::LINE_WIDTH,
            dashed: true,
        };
        target.draw_polygon(&screen, false, &path);
    }
}

/// A recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Size),
    Image(Rect),
    Polygon {
        points: Vec<Point>,
        closed: bool,
        fill: Option<String>,
        stroke: String,
        dashed: bool,
    },
    Label {
        at: Point,
        text: String,
    },
}

/// A render target that records draw calls instead of painting.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded polygons (committed and in-progress).
    pub fn polygons(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Polygon { .. }))
    }

    /// Text of every recorded label, in draw order.
    pub fn labels(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Label { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl RenderTarget for DrawList {
    fn clear(&mut self, canvas: Size) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(canvas));
    }

    fn draw_image(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::Image(rect));
    }

    fn draw_polygon(&mut self, points: &[Point], closed: bool, style: &PathStyle<'_>) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            closed,
            fill: style.fill.map(str::to_owned),
            stroke: style.stroke.to_owned(),
            dashed: style.dashed,
        });
    }

    fn place_label(&mut self, at: Point, text: &str) {
        self.commands.push(DrawCommand::Label {
            at,
            text: text.to_owned(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RegionId;

    const CANVAS: Size = Size {
        width: 400.0,
        height: 200.0,
    };
    const IMAGE: Size = Size {
        width: 800.0,
        height: 400.0,
    };

    fn triangle() -> Vec<Point> {
        vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0)]
    }

    fn render(store: &RegionStore, draft: Option<&DrawingSession>, viewport: &Viewport) -> DrawList {
        let mut list = DrawList::new();
        let frame = Frame {
            canvas: CANVAS,
            image: Some(IMAGE),
            viewport,
            regions: store,
            draft,
        };
        draw_frame(&mut list, &frame);
        list
    }

    #[test]
    fn test_no_image_draws_nothing() {
        let store = RegionStore::with_seed(0);
        let viewport = Viewport::new();
        let mut list = DrawList::new();
        let frame = Frame {
            canvas: CANVAS,
            image: None,
            viewport: &viewport,
            regions: &store,
            draft: None,
        };
        draw_frame(&mut list, &frame);
        assert_eq!(list.commands, vec![DrawCommand::Clear(CANVAS)]);
    }

    #[test]
    fn test_regions_follow_the_viewport() {
        let mut store = RegionStore::with_seed(0);
        store.add_region("T", triangle());
        let viewport = Viewport::new().zoom_toward_point(2.0, Point::ORIGIN).pan_by(10.0, 5.0);

        let list = render(&store, None, &viewport);
        let rect = viewport.image_rect(CANVAS, IMAGE).unwrap();

        assert_eq!(list.commands[1], DrawCommand::Image(rect));
        match &list.commands[2] {
            DrawCommand::Polygon { points, closed, dashed, fill, .. } => {
                assert!(*closed);
                assert!(!*dashed);
                assert_eq!(fill.as_deref(), Some(style::DEFAULT_FILL));
                assert_eq!(points[0], Point::new(10.0, 5.0));
                assert_eq!(points[1], Point::new(10.0 + 800.0, 5.0));
            }
            other => panic!("Expected polygon, got {:?}", other),
        }
    }

    #[test]
    fn test_override_colors_and_labels() {
        let mut store = RegionStore::with_seed(0);
        let shown = store.add_region("Shown", triangle()).id.clone();
        store.add_region("Hidden", triangle());
        store.set_override(&shown, Some("F"), Some("S"), true);

        let list = render(&store, None, &Viewport::new());
        let strokes: Vec<_> = list
            .polygons()
            .map(|c| match c {
                DrawCommand::Polygon { stroke, .. } => stroke.clone(),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(strokes[0], "S");
        assert!(strokes[1].starts_with("hsl("));
        assert_eq!(list.labels(), vec!["Shown"]);
    }

    #[test]
    fn test_labels_follow_the_viewport() {
        let mut store = RegionStore::with_seed(0);
        let pinned = store.add_region("Pinned", triangle()).id.clone();
        let centered = store.add_region("Centered", triangle()).id.clone();
        if let Some(region) = store.get_mut(&pinned) {
            region.label_pos = Some(Point::new(0.25, 0.5));
        }
        store.set_override(&pinned, None, None, true);
        store.set_override(&centered, None, None, true);

        let viewport = Viewport::new().zoom_toward_point(2.0, Point::ORIGIN).pan_by(10.0, 5.0);
        let list = render(&store, None, &viewport);
        let rect = viewport.image_rect(CANVAS, IMAGE).unwrap();

        let labels: Vec<(Point, &str)> = list
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Label { at, text } => Some((*at, text.as_str())),
                _ => None,
            })
            .collect();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0], (rect.to_screen(Point::new(0.25, 0.5)), "Pinned"));
        assert_eq!(labels[0].0, Point::new(210.0, 205.0));

        let centroid = crate::geometry::centroid(&triangle()).unwrap();
        assert_eq!(labels[1], (rect.to_screen(centroid), "Centered"));
    }

    #[test]
    fn test_draft_is_open_and_dashed() {
        let store = RegionStore::with_seed(0);
        let mut draft = DrawingSession::new();
        draft.add_point(Point::new(0.1, 0.1));
        draft.add_point(Point::new(0.5, 0.5));

        let list = render(&store, Some(&draft), &Viewport::new());
        match list.polygons().last() {
            Some(DrawCommand::Polygon { closed, dashed, fill, points, .. }) => {
                assert!(!*closed);
                assert!(*dashed);
                assert!(fill.is_none());
                assert_eq!(points.len(), 2);
            }
            other => panic!("Expected draft path, got {:?}", other),
        }
    }

    #[test]
    fn test_short_regions_are_not_drawn() {
        let mut store = RegionStore::with_seed(0);
        store.replace_all(vec![crate::model::Region::new(
            RegionId::from("short"),
            "Short",
            "red",
            vec![Point::new(0.0, 0.0)],
        )]);
        let list = render(&store, None, &Viewport::new());
        assert_eq!(list.polygons().count(), 0);
    }
}
