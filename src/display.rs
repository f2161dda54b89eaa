//! The display session: document lifecycle, frame stepping, pointer
//! routing, and edit-mode overlays.
//!
//! One session owns one visible surface, its mirrored hit canvas, the data
//! binding engine, and the current widget tree. The host drives it with a
//! frame loop: feed pointer events as they arrive, call [`Display::step`]
//! once per frame. Drawing only happens on frames where something actually
//! changed; everything else is a cheap dirty-flag check.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{info, warn};

use crate::document::DocNode;
use crate::event::{Cursor, PointerEvent, PointerKind};
use crate::hit::HitCanvas;
use crate::property::Color;
use crate::pv::PvEngine;
use crate::render::surface::{FillStyle, Surface, TextAlign, TextBaseline};
use crate::render::RasterSurface;
use crate::scripting::{NoopRunner, ScriptRunner};
use crate::widget::{Dispatch, DisplayRequest, DrawContext, Widget};
use crate::widgets::WidgetRegistry;

use crate::geometry::Bounds;
use crate::property::Font;

/// Grid dot spacing in edit mode.
const GRID_SPACING: f64 = 25.0;
/// Ruler tick period; labels sit on the major ticks.
const RULER_MAJOR: f64 = 100.0;

// ---------------------------------------------------------------------------
// Document loading
// ---------------------------------------------------------------------------

/// A document fetch/parse failure at the provider boundary.
#[derive(Debug, thiserror::Error)]
#[error("failed to load display {path}: {reason}")]
pub struct ResourceError {
    pub path: String,
    pub reason: String,
}

/// Resolves display paths to parsed documents. Installed by the host to
/// make `OpenDisplay` replace-mode actions work.
pub trait DisplayProvider {
    fn load(&mut self, path: &str) -> Result<DocNode, ResourceError>;
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

/// A running operator display.
pub struct Display {
    surface: Box<dyn Surface>,
    hit: HitCanvas,
    pvs: PvEngine,
    registry: WidgetRegistry,
    scripts: Box<dyn ScriptRunner>,
    provider: Option<Box<dyn DisplayProvider>>,
    instance: Option<Widget>,

    repaint_requested: bool,
    edit_mode: bool,
    show_grid: bool,
    show_outline: bool,
    show_ruler: bool,
    selection: Vec<String>,
    /// Region currently held down, as `(wuid, role)`.
    pressed: Option<(String, String)>,
    /// Host requests the session cannot satisfy itself.
    pending: Vec<DisplayRequest>,

    wakeup_tx: UnboundedSender<()>,
    wakeup_rx: UnboundedReceiver<()>,
}

impl Display {
    /// Create a session drawing into the given surface.
    pub fn new(surface: Box<dyn Surface>) -> Self {
        let hit = HitCanvas::new(surface.width(), surface.height());
        let (wakeup_tx, wakeup_rx) = mpsc::unbounded_channel();
        Self {
            surface,
            hit,
            pvs: PvEngine::new(),
            registry: WidgetRegistry::default(),
            scripts: Box::new(NoopRunner),
            provider: None,
            instance: None,
            repaint_requested: false,
            edit_mode: false,
            show_grid: false,
            show_outline: false,
            show_ruler: false,
            selection: Vec::new(),
            pressed: None,
            pending: Vec::new(),
            wakeup_tx,
            wakeup_rx,
        }
    }

    /// A session with an in-memory raster surface (headless hosts, tests).
    pub fn headless(width: u32, height: u32) -> Self {
        Self::new(Box::new(RasterSurface::new(width, height)))
    }

    // -- collaborators

    pub fn set_script_runner(&mut self, runner: Box<dyn ScriptRunner>) {
        self.scripts = runner;
    }

    pub fn set_provider(&mut self, provider: Box<dyn DisplayProvider>) {
        self.provider = Some(provider);
    }

    pub fn pvs(&self) -> &PvEngine {
        &self.pvs
    }

    pub fn pvs_mut(&mut self) -> &mut PvEngine {
        &mut self.pvs
    }

    pub fn registry_mut(&mut self) -> &mut WidgetRegistry {
        &mut self.registry
    }

    /// A sender that schedules a repaint from another task. Used by hosts
    /// when an async resource (a font, say) finishes loading after widgets
    /// already measured text without it.
    pub fn wakeup_sender(&self) -> UnboundedSender<()> {
        self.wakeup_tx.clone()
    }

    // -- document lifecycle

    /// Replace the current document.
    ///
    /// Tears down every data subscription of the old tree before the new
    /// tree is built, so an in-flight update for the old document can no
    /// longer reach a record. Selection and press state are dropped with
    /// the old tree.
    pub fn set_document(&mut self, node: &DocNode) {
        self.pvs.reset();
        let root = Widget::from_node(node, &self.registry);

        let mut names = Vec::new();
        root.visit(&mut |w| {
            if let Some(name) = w.core.pv_name() {
                names.push(name.to_owned());
            }
        });
        for name in &names {
            self.pvs.subscribe(name);
        }
        info!(widgets = count_widgets(&root), pvs = names.len(), "document loaded");

        self.instance = Some(root);
        self.selection.clear();
        self.pressed = None;
        self.repaint_requested = true;
    }

    /// The current widget tree root.
    pub fn root(&self) -> Option<&Widget> {
        self.instance.as_ref()
    }

    pub fn find_widget(&self, wuid: &str) -> Option<&Widget> {
        self.instance.as_ref().and_then(|root| root.find(wuid))
    }

    // -- repaint scheduling

    /// Mark the screen stale. Cheap and idempotent; the actual draw happens
    /// in the next [`step`](Self::step).
    pub fn request_repaint(&mut self) {
        self.repaint_requested = true;
    }

    /// Whether a repaint is pending.
    pub fn repaint_requested(&self) -> bool {
        self.repaint_requested
    }

    /// Advance one frame. Drains pending data updates and wakeups, resizes
    /// to the host dimensions when they changed, and redraws if anything
    /// left the screen stale. Returns whether a draw happened.
    pub fn step(&mut self, host_width: u32, host_height: u32) -> bool {
        if self.pvs.drain_updates() {
            self.repaint_requested = true;
        }
        while self.wakeup_rx.try_recv().is_ok() {
            self.repaint_requested = true;
        }
        if self.surface.width() != host_width || self.surface.height() != host_height {
            // Resizing resets surface contents, so it is deferred until the
            // size really changed.
            self.surface.resize(host_width, host_height);
            self.hit.resize(host_width, host_height);
            self.repaint_requested = true;
        }

        if !self.repaint_requested {
            return false;
        }
        self.draw_screen();
        self.repaint_requested = false;
        true
    }

    // -- pointer routing

    /// Feed one pointer event. Returns the cursor hint for the host.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Cursor {
        let region = self.hit.resolve(event.x, event.y).cloned();
        let cursor = region.as_ref().map(|r| r.cursor).unwrap_or_default();

        match event.kind {
            PointerKind::Move => {}
            PointerKind::Click => {
                if self.edit_mode {
                    self.select_at(region.as_ref().map(|r| r.wuid.clone()));
                } else if let Some(r) = region.filter(|r| r.click) {
                    self.deliver(&r.wuid, &r.role, crate::event::RegionEvent::Click);
                }
            }
            PointerKind::Down => {
                if !self.edit_mode {
                    if let Some(r) = region.filter(|r| r.press) {
                        self.pressed = Some((r.wuid.clone(), r.role.clone()));
                        self.deliver(&r.wuid, &r.role, crate::event::RegionEvent::Press);
                    }
                }
            }
            PointerKind::Up => {
                if let Some((wuid, role)) = self.pressed.take() {
                    self.deliver(&wuid, &role, crate::event::RegionEvent::Release);
                }
            }
        }
        cursor
    }

    fn select_at(&mut self, wuid: Option<String>) {
        self.selection = wuid.into_iter().collect();
        self.repaint_requested = true;
    }

    fn deliver(&mut self, wuid: &str, role: &str, event: crate::event::RegionEvent) {
        let Some(instance) = self.instance.as_mut() else {
            return;
        };
        let mut dispatch = Dispatch::new(&mut self.pvs, self.scripts.as_mut());
        instance.interact(wuid, role, event, &mut dispatch);
        if dispatch.repaint_requested() {
            self.repaint_requested = true;
        }
        let requests = dispatch.take_requests();
        for request in requests {
            self.process_request(request);
        }
    }

    fn process_request(&mut self, request: DisplayRequest) {
        match request {
            DisplayRequest::OpenDisplay { path } => {
                let Some(mut provider) = self.provider.take() else {
                    self.pending.push(DisplayRequest::OpenDisplay { path });
                    return;
                };
                match provider.load(&path) {
                    Ok(node) => self.set_document(&node),
                    Err(e) => warn!(%e, "display replacement failed"),
                }
                self.provider = Some(provider);
            }
            other => self.pending.push(other),
        }
    }

    /// Consume requests the host must handle (new windows, external
    /// scripts, navigation without a provider).
    pub fn take_requests(&mut self) -> Vec<DisplayRequest> {
        std::mem::take(&mut self.pending)
    }

    // -- edit-mode state

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn set_edit_mode(&mut self, on: bool) {
        self.edit_mode = on;
        self.repaint_requested = true;
    }

    pub fn set_show_grid(&mut self, on: bool) {
        self.show_grid = on;
        self.repaint_requested = true;
    }

    pub fn set_show_outline(&mut self, on: bool) {
        self.show_outline = on;
        self.repaint_requested = true;
    }

    pub fn set_show_ruler(&mut self, on: bool) {
        self.show_ruler = on;
        self.repaint_requested = true;
    }

    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    pub fn set_selection(&mut self, selection: Vec<String>) {
        self.selection = selection;
        self.repaint_requested = true;
    }

    pub fn clear_selection(&mut self) {
        self.set_selection(Vec::new());
    }

    // -- drawing

    /// Full draw pass, in fixed order: background, grid, ruler, outline,
    /// widget tree, selection decorations.
    fn draw_screen(&mut self) {
        self.hit.clear();
        let g = self.surface.as_mut();
        g.clear();

        let width = g.width() as f64;
        let height = g.height() as f64;
        let (background, foreground) = match &self.instance {
            Some(root) => (root.core.background_color(), root.core.foreground_color()),
            None => (Color::WHITE, Color::BLACK),
        };
        g.set_global_alpha(1.0);
        g.set_fill_style(FillStyle::Solid(background));
        g.fill_rect(Bounds::new(0.0, 0.0, width, height));

        if self.show_grid && self.instance.is_some() {
            g.set_fill_style(FillStyle::Solid(foreground));
            let mut y = GRID_SPACING;
            while y < height - GRID_SPACING {
                let mut x = GRID_SPACING;
                while x < width - GRID_SPACING {
                    g.fill_rect(Bounds::new(x, y, 1.0, 1.0));
                    x += GRID_SPACING;
                }
                y += GRID_SPACING;
            }
        }

        if self.show_ruler {
            draw_ruler(g, width, height);
        }

        if self.show_outline {
            if let Some(root) = &self.instance {
                let preferred = root.core.holder_bounds();
                g.set_line_width(1.0);
                g.set_line_dash(&[10.0, 5.0]);
                g.set_stroke_style(Color::BLACK);
                g.stroke_rect(Bounds::new(
                    -0.5,
                    -0.5,
                    preferred.width + 1.0,
                    preferred.height + 1.0,
                ));
                g.set_line_dash(&[]);
            }
        }

        if let Some(root) = &self.instance {
            root.draw(&mut DrawContext { g: &mut *g, hit: &mut self.hit, pvs: &self.pvs });
        }

        // Selection decorations on top of everything.
        for wuid in &self.selection {
            if let Some(widget) = self.instance.as_ref().and_then(|root| root.find(wuid)) {
                widget.core.draw_selection(g);
            }
        }
    }
}

fn count_widgets(root: &Widget) -> usize {
    let mut count = 0;
    root.visit(&mut |_| count += 1);
    count
}

/// Tick marks along the bottom and right edges, labeled every major tick.
fn draw_ruler(g: &mut dyn Surface, width: f64, height: f64) {
    g.set_line_width(1.0);
    g.set_stroke_style(Color::GRAY);
    g.set_fill_style(FillStyle::Solid(Color::GRAY));
    g.set_font(&Font::new("Arial", 12.0));

    g.set_text_align(TextAlign::Center);
    g.set_text_baseline(TextBaseline::Bottom);
    let mut x = RULER_MAJOR;
    while x <= width {
        g.begin_path();
        for (offset, size) in [(75.0, 4.0), (50.0, 6.0), (25.0, 4.0), (0.0, 8.0)] {
            g.move_to(x - offset + 0.5, height);
            g.line_to(x - offset + 0.5, height - size);
        }
        g.stroke();
        g.fill_text(&format!("{x}"), x, height - 8.0);
        x += RULER_MAJOR;
    }

    g.set_text_align(TextAlign::End);
    g.set_text_baseline(TextBaseline::Middle);
    let mut y = RULER_MAJOR;
    while y <= height {
        g.begin_path();
        for (offset, size) in [(75.0, 4.0), (50.0, 6.0), (25.0, 4.0), (0.0, 8.0)] {
            g.move_to(width, y - offset + 0.5);
            g.line_to(width - size, y - offset + 0.5);
        }
        g.stroke();
        g.fill_text(&format!("{y}"), width - 8.0, y);
        y += RULER_MAJOR;
    }
}

// ===========================================================================
// Tests
// ===========================================================================
