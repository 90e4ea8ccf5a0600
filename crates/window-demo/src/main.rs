// File: crates/window-demo/src/main.rs
// Summary: Windowed dashboard shell; renders dash-core figures to a window via RGBA blit (CPU) using winit + softbuffer.

use dash_core::{pages, render_text_panel, Figure, ListingsTable, Page, RenderOptions, Selection};
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use winit::event::{ElementState, Event, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

/// Which multi-select the keyboard currently edits.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Widget {
    Countries,
    PropertyTypes,
    RoomTypes,
}

impl Widget {
    fn label(self) -> &'static str {
        match self {
            Widget::Countries => "country",
            Widget::PropertyTypes => "property_type",
            Widget::RoomTypes => "room_type",
        }
    }
}

/// Session-scoped state: the immutable table, the live selection, and the
/// navigation cursor. One interaction mutates it, then figures are rebuilt
/// in full before the next interaction is handled.
struct Session {
    table: ListingsTable,
    selection: Selection,
    pages: Vec<Box<dyn Page>>,
    page_idx: usize,
    fig_idx: usize,
    figures: Vec<Figure>,
    widget: Widget,
    highlight: usize,
    last_error: Option<String>,
}

impl Session {
    fn new(table: ListingsTable) -> Self {
        let selection = Selection::from_table(&table);
        let mut s = Self {
            table,
            selection,
            pages: pages(),
            page_idx: 0,
            fig_idx: 0,
            figures: Vec::new(),
            widget: Widget::Countries,
            highlight: 0,
            last_error: None,
        };
        s.rebuild();
        s
    }

    /// Recompute every figure of the current page from scratch. A query
    /// error becomes a status message and leaves the previous figures up.
    fn rebuild(&mut self) {
        match self.pages[self.page_idx].build(&self.table, &self.selection) {
            Ok(figures) => {
                self.figures = figures;
                self.last_error = None;
            }
            Err(e) => self.last_error = Some(e.to_string()),
        }
        if self.fig_idx >= self.figures.len() {
            self.fig_idx = 0;
        }
    }

    fn widget_values(&self) -> Vec<String> {
        match self.widget {
            Widget::Countries => self.table.countries(),
            Widget::PropertyTypes => self.table.property_types(),
            Widget::RoomTypes => self.table.room_types(),
        }
    }

    fn highlighted_value(&self) -> Option<String> {
        self.widget_values().get(self.highlight).cloned()
    }

    fn toggle_highlighted(&mut self) {
        if let Some(value) = self.highlighted_value() {
            match self.widget {
                Widget::Countries => self.selection.toggle_country(&value),
                Widget::PropertyTypes => self.selection.toggle_property_type(&value),
                Widget::RoomTypes => self.selection.toggle_room_type(&value),
            }
            self.rebuild();
        }
    }

    /// 5% of the observed price span, the keyboard slider step.
    fn price_step(&self) -> f64 {
        let (lo, hi) = self.selection.price_bounds();
        ((hi - lo) * 0.05).max(1.0)
    }

    fn status_line(&self) -> String {
        let page = self.pages[self.page_idx].title();
        let fig = if self.figures.is_empty() {
            "-".to_string()
        } else {
            format!("{}/{}", self.fig_idx + 1, self.figures.len())
        };
        let cursor = self
            .highlighted_value()
            .unwrap_or_else(|| "-".to_string());
        let mut line = format!(
            "{page} [{fig}]  {}  edit {}:{cursor}",
            self.selection.summary(),
            self.widget.label()
        );
        if let Some(err) = &self.last_error {
            line.push_str("  !! ");
            line.push_str(err);
        }
        line
    }
}

fn main() {
    // Arg: CSV path
    let raw = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "airbnb_listings.csv".to_string());
    let path = PathBuf::from(&raw);

    let table = load_listings_csv(&path);
    if table.is_empty() {
        eprintln!("no listings loaded from {}", path.display());
        return;
    }
    let mut session = Session::new(table);

    // Window + softbuffer setup
    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("Stayscope — Dashboard Demo")
        .with_inner_size(winit::dpi::LogicalSize::new(1024.0, 640.0))
        .build(&event_loop)
        .expect("build window");

    let context = unsafe { softbuffer::Context::new(&window) }.expect("softbuffer context");
    let mut surface = unsafe { softbuffer::Surface::new(&context, &window) }.expect("softbuffer surface");

    let mut size = window.inner_size();

    let control_flow = ControlFlow::Wait;
    event_loop.run(move |event, _, cf| {
        *cf = control_flow;
        match event {
            Event::WindowEvent { event, window_id: _ } => match event {
                WindowEvent::CloseRequested => {
                    *cf = ControlFlow::Exit;
                }
                WindowEvent::Resized(new_size) => {
                    size = new_size;
                }
                WindowEvent::KeyboardInput { input, .. } => {
                    if input.state != ElementState::Pressed {
                        return;
                    }
                    let Some(key) = input.virtual_keycode else { return };
                    handle_key(key, &mut session, cf);
                }
                _ => {}
            },
            Event::MainEventsCleared => {
                window.request_redraw();
            }
            Event::RedrawRequested(_) => draw(&mut surface, size, &session),
            _ => {}
        }
    });
}

/// Render the active figure (or the page intro) and blit it to the window.
fn draw(surface: &mut softbuffer::Surface, size: winit::dpi::PhysicalSize<u32>, session: &Session) {
    let w = size.width.max(1);
    let h = size.height.max(1);
    surface.resize(NonZeroU32::new(w).unwrap(), NonZeroU32::new(h).unwrap()).ok();

    let mut opts = RenderOptions::default();
    opts.width = w as i32;
    opts.height = h as i32;
    opts.status_line = Some(session.status_line());

    let page = &session.pages[session.page_idx];
    let rendered = match session.figures.get(session.fig_idx) {
        Some(figure) => figure.render_to_rgba8(&opts),
        None => render_text_panel(page.title(), page.intro(), &opts),
    };
    let (rgba, _, _, _) = match rendered {
        Ok(r) => r,
        Err(e) => {
            eprintln!("render error: {e:?}");
            return;
        }
    };

    // Convert RGBA to the u32 layout softbuffer expects.
    let mut frame = surface.buffer_mut().expect("frame");
    let max_px = frame.len().min(rgba.len() / 4);
    for (i, px) in rgba.chunks_exact(4).take(max_px).enumerate() {
        let r = px[0] as u32;
        let g = px[1] as u32;
        let b = px[2] as u32;
        let a = px[3] as u32;
        frame[i] = (a << 24) | (r << 16) | (g << 8) | b;
    }
    if let Err(e) = frame.present() {
        eprintln!("present error: {e:?}");
    }
}

fn handle_key(key: VirtualKeyCode, session: &mut Session, cf: &mut ControlFlow) {
    match key {
        VirtualKeyCode::Escape => *cf = ControlFlow::Exit,
        // Page and figure navigation
        VirtualKeyCode::Tab => {
            session.page_idx = (session.page_idx + 1) % session.pages.len();
            session.fig_idx = 0;
            session.rebuild();
        }
        VirtualKeyCode::Down => {
            if !session.figures.is_empty() {
                session.fig_idx = (session.fig_idx + 1) % session.figures.len();
            }
        }
        VirtualKeyCode::Up => {
            if !session.figures.is_empty() {
                session.fig_idx = (session.fig_idx + session.figures.len() - 1) % session.figures.len();
            }
        }
        // Price range slider: Left/Right move the upper bound, comma/period
        // the lower bound, in 5% steps of the observed span.
        VirtualKeyCode::Left => {
            let step = session.price_step();
            session.selection.nudge_max(-step);
            session.rebuild();
        }
        VirtualKeyCode::Right => {
            let step = session.price_step();
            session.selection.nudge_max(step);
            session.rebuild();
        }
        VirtualKeyCode::Comma => {
            let step = session.price_step();
            session.selection.nudge_min(-step);
            session.rebuild();
        }
        VirtualKeyCode::Period => {
            let step = session.price_step();
            session.selection.nudge_min(step);
            session.rebuild();
        }
        // Multi-select editing
        VirtualKeyCode::C => {
            session.widget = Widget::Countries;
            session.highlight = 0;
        }
        VirtualKeyCode::P => {
            session.widget = Widget::PropertyTypes;
            session.highlight = 0;
        }
        VirtualKeyCode::R => {
            session.widget = Widget::RoomTypes;
            session.highlight = 0;
        }
        VirtualKeyCode::LBracket => {
            let n = session.widget_values().len();
            if n > 0 {
                session.highlight = (session.highlight + n - 1) % n;
            }
        }
        VirtualKeyCode::RBracket => {
            let n = session.widget_values().len();
            if n > 0 {
                session.highlight = (session.highlight + 1) % n;
            }
        }
        VirtualKeyCode::Space => session.toggle_highlighted(),
        VirtualKeyCode::Back => {
            session.selection.reset(&session.table);
            session.rebuild();
        }
        _ => {}
    }
}

/// Compact listings loader; the headless demo has the forgiving variant.
fn load_listings_csv(path: &Path) -> ListingsTable {
    use dash_core::Listing;

    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_path(path).expect("open csv");
    let headers = rdr.headers().expect("headers").iter().map(|h| h.trim().to_lowercase()).collect::<Vec<_>>();
    let idx = |name: &str| -> usize {
        headers.iter().position(|h| h == name).unwrap_or_else(|| panic!("missing column '{name}'"))
    };
    let opt_idx = |name: &str| headers.iter().position(|h| h == name);

    let i_country = idx("country");
    let i_prop = idx("property_type");
    let i_room = idx("room_type");
    let i_price = idx("price");
    let i_host = opt_idx("host_name");
    let i_name = opt_idx("name");
    let i_avail = opt_idx("availability_365");
    let i_review = opt_idx("review_scores");

    let mut rows = Vec::new();
    for rec in rdr.records() {
        let rec = rec.expect("record");
        let get = |i: usize| rec.get(i).map(str::trim).unwrap_or("");
        let get_opt = |i: Option<usize>| i.and_then(|ix| rec.get(ix)).map(str::trim).unwrap_or("");
        let Ok(price) = get(i_price).trim_start_matches('$').replace(',', "").parse::<f64>() else {
            continue;
        };
        let avail = get_opt(i_avail).parse::<u16>().unwrap_or(0).min(365);
        let review = match get_opt(i_review) {
            "" => None,
            s => s.parse::<f64>().ok(),
        };
        if let Ok(listing) = Listing::try_new(
            get(i_country),
            get(i_prop),
            get(i_room),
            get_opt(i_host),
            get_opt(i_name),
            price,
            avail,
            review,
        ) {
            rows.push(listing);
        }
    }
    ListingsTable::new(rows)
}
