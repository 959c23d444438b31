use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{
    CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement, HtmlElement, MouseEvent,
    TouchEvent,
};
use yew::prelude::*;

use crate::config::GameConfig;
use crate::model::Cell;
use crate::session::{GameAction, GameSession};
use crate::state::{Geometry, GeometryProvider, GestureResolver, PointerId};
use crate::util::clog;

#[derive(Properties, PartialEq, Clone)]
pub struct BoardViewProps {
    pub session: UseReducerHandle<GameSession>,
}

/// The board canvas as the gesture resolver sees it: measured live, in client
/// coordinates.
pub struct CanvasGeometry {
    canvas: HtmlCanvasElement,
    rows: usize,
    cols: usize,
    gap: f64,
    pad: f64,
}

impl CanvasGeometry {
    pub fn new(canvas: HtmlCanvasElement, config: &GameConfig) -> Self {
        Self {
            canvas,
            rows: config.rows,
            cols: config.cols,
            gap: config.cell_gap,
            pad: config.board_padding,
        }
    }

    // Same layout in canvas pixels, for drawing.
    fn local(&self) -> Option<Geometry> {
        Geometry::fit(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.rows,
            self.cols,
            self.gap,
            self.pad,
        )
    }
}

impl GeometryProvider for CanvasGeometry {
    fn geometry(&self) -> Option<Geometry> {
        if !self.canvas.is_connected() {
            return None;
        }
        let rect = self.canvas.get_bounding_client_rect();
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return None;
        }
        // The bounding rect includes the CSS border; cells start inside it.
        let left = rect.left() + self.canvas.client_left() as f64;
        let top = rect.top() + self.canvas.client_top() as f64;
        Some(self.local()?.translated(left, top))
    }
}

// Event listeners bound to the board; removed again on drop.
#[derive(Default)]
struct Listeners {
    bound: Vec<(EventTarget, &'static str, Closure<dyn FnMut(Event)>)>,
}

impl Listeners {
    fn on(&mut self, target: &EventTarget, name: &'static str, f: impl FnMut(Event) + 'static) {
        let cb = Closure::wrap(Box::new(f) as Box<dyn FnMut(Event)>);
        if target
            .add_event_listener_with_callback(name, cb.as_ref().unchecked_ref())
            .is_err()
        {
            clog(&format!("board: failed to listen for {name}"));
            return;
        }
        self.bound.push((target.clone(), name, cb));
    }
}

impl Drop for Listeners {
    fn drop(&mut self) {
        for (target, name, cb) in &self.bound {
            let _ = target.remove_event_listener_with_callback(name, cb.as_ref().unchecked_ref());
        }
    }
}

/// Sizes the canvas to the largest cells that fit under the top bar.
fn fit_canvas(canvas: &HtmlCanvasElement, config: &GameConfig) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let nav_height: f64 = window
        .document()
        .and_then(|d| d.get_element_by_id("top-bar"))
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .map(|el| el.client_height() as f64)
        .unwrap_or(0.0);
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(480.0)
        - 24.0;
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(640.0)
        - nav_height
        - 24.0;
    let (rows, cols) = (config.rows as f64, config.cols as f64);
    let (gap, pad) = (config.cell_gap, config.board_padding);
    let cell = ((width - 2.0 * pad - gap * (cols - 1.0)) / cols)
        .min((height - 2.0 * pad - gap * (rows - 1.0)) / rows)
        .clamp(8.0, 64.0);
    canvas.set_width((2.0 * pad + cols * cell + (cols - 1.0) * gap).ceil() as u32);
    canvas.set_height((2.0 * pad + rows * cell + (rows - 1.0) * gap).ceil() as u32);
}

fn draw(layout: &CanvasGeometry, session: &GameSession, gesture: &GestureResolver) {
    let canvas = &layout.canvas;
    if !canvas.is_connected() {
        return;
    }
    let Some(ctx) = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
    else {
        return;
    };
    let w = canvas.width() as f64;
    let h = canvas.height() as f64;
    ctx.set_fill_style_str("#0e1116");
    ctx.fill_rect(0.0, 0.0, w, h);
    let Some(geom) = layout.local() else {
        return;
    };
    let size = geom.cell_size;
    let inset = (size * 0.06).max(1.0);
    let dragged = gesture.session().copied();
    for r in 0..geom.rows {
        for c in 0..geom.cols {
            let cell = Cell::new(r, c);
            let (x, y) = geom.cell_origin(cell);
            ctx.set_fill_style_str("#161b22");
            ctx.fill_rect(x, y, size, size);
            // The dragged tile is drawn last, on top of its neighbours.
            if dragged.is_some_and(|d| d.origin == cell) {
                continue;
            }
            if let Some(color) = session.board.get(cell) {
                ctx.set_fill_style_str(session.palette.css(color));
                ctx.fill_rect(x + inset, y + inset, size - 2.0 * inset, size - 2.0 * inset);
            }
            if session.highlighted.contains(&cell) {
                ctx.set_fill_style_str("rgba(255,255,255,0.35)");
                ctx.fill_rect(x, y, size, size);
            }
        }
    }
    if let Some(d) = dragged {
        if let Some(color) = session.board.get(d.origin) {
            let (x, y) = geom.cell_origin(d.origin);
            let (x, y) = (x + d.offset_x, y + d.offset_y);
            ctx.set_fill_style_str(session.palette.css(color));
            ctx.fill_rect(x, y, size, size);
            ctx.set_stroke_style_str("#f0f6fc");
            ctx.set_line_width(2.0);
            ctx.stroke_rect(x, y, size, size);
        }
    }
}

#[function_component(BoardView)]
pub fn board_view(props: &BoardViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let session_ref = use_mut_ref(|| props.session.clone());
    let gesture = use_mut_ref(|| GestureResolver::new(props.session.config.drag_clamp));
    let draw_ref = use_mut_ref(|| None::<Rc<dyn Fn()>>);

    // Effect: track the latest session and redraw
    {
        let session_ref = session_ref.clone();
        let current_handle = props.session.clone();
        let draw_ref = draw_ref.clone();
        let version = (props.session.game_id, props.session.version);
        use_effect_with(version, move |_| {
            *session_ref.borrow_mut() = current_handle;
            if let Some(f) = &*draw_ref.borrow() {
                f();
            }
            || ()
        });
    }
    // Main mount effect (sizing, drawing, input)
    {
        let canvas_ref = canvas_ref.clone();
        let session_ref = session_ref.clone();
        let gesture = gesture.clone();
        let draw_ref = draw_ref.clone();
        let config = props.session.config.clone();
        use_effect_with((), move |_| {
            let mut listeners = Listeners::default();
            if let (Some(window), Some(canvas)) =
                (web_sys::window(), canvas_ref.cast::<HtmlCanvasElement>())
            {
                fit_canvas(&canvas, &config);
                let layout = Rc::new(CanvasGeometry::new(canvas.clone(), &config));
                let redraw: Rc<dyn Fn()> = {
                    let layout = layout.clone();
                    let session_ref = session_ref.clone();
                    let gesture = gesture.clone();
                    Rc::new(move || {
                        let handle = session_ref.borrow();
                        draw(&layout, &handle, &gesture.borrow());
                    })
                };
                *draw_ref.borrow_mut() = Some(redraw.clone());
                redraw();

                let press_start: Rc<dyn Fn(PointerId, f64, f64) -> bool> = {
                    let layout = layout.clone();
                    let session_ref = session_ref.clone();
                    let gesture = gesture.clone();
                    let redraw = redraw.clone();
                    Rc::new(move |pointer: PointerId, x: f64, y: f64| {
                        // Input waits until the cascade has settled.
                        if session_ref.borrow().is_busy() {
                            return false;
                        }
                        let started = gesture
                            .borrow_mut()
                            .on_press_start(&*layout, pointer, x, y)
                            .is_some();
                        if started {
                            redraw();
                        }
                        started
                    })
                };
                let press_move: Rc<dyn Fn(PointerId, f64, f64) -> bool> = {
                    let layout = layout.clone();
                    let gesture = gesture.clone();
                    let redraw = redraw.clone();
                    Rc::new(move |pointer: PointerId, x: f64, y: f64| {
                        let moved = gesture
                            .borrow_mut()
                            .on_press_move(&*layout, pointer, x, y)
                            .is_some();
                        if moved {
                            redraw();
                        }
                        moved
                    })
                };
                let press_end: Rc<dyn Fn(PointerId, f64, f64) -> bool> = {
                    let layout = layout.clone();
                    let session_ref = session_ref.clone();
                    let gesture = gesture.clone();
                    let redraw = redraw.clone();
                    Rc::new(move |pointer: PointerId, x: f64, y: f64| {
                        if !gesture.borrow().owned_by(pointer) {
                            return false;
                        }
                        let proposal = gesture.borrow_mut().on_press_end(&*layout, pointer, x, y);
                        if let Some(p) = proposal {
                            let handle = session_ref.borrow().clone();
                            handle.dispatch(GameAction::Swap(p));
                        }
                        redraw();
                        true
                    })
                };

                // Mouse
                {
                    let press_start = press_start.clone();
                    listeners.on(&canvas, "mousedown", move |e| {
                        let e = e.unchecked_into::<MouseEvent>();
                        if e.button() == 0 && press_start(PointerId::Mouse, e.client_x() as f64, e.client_y() as f64) {
                            e.prevent_default();
                        }
                    });
                }
                {
                    let press_move = press_move.clone();
                    listeners.on(&window, "mousemove", move |e| {
                        let e = e.unchecked_into::<MouseEvent>();
                        press_move(PointerId::Mouse, e.client_x() as f64, e.client_y() as f64);
                    });
                }
                {
                    let press_end = press_end.clone();
                    listeners.on(&window, "mouseup", move |e| {
                        let e = e.unchecked_into::<MouseEvent>();
                        press_end(PointerId::Mouse, e.client_x() as f64, e.client_y() as f64);
                    });
                }
                // Touch
                listeners.on(&canvas, "touchstart", move |e| {
                    let e = e.unchecked_into::<TouchEvent>();
                    if e.touches().length() != 1 {
                        return;
                    }
                    if let Some(t0) = e.touches().item(0) {
                        let id = PointerId::Touch(t0.identifier());
                        if press_start(id, t0.client_x() as f64, t0.client_y() as f64) {
                            e.prevent_default();
                        }
                    }
                });
                // Only the touch that started the drag moves or releases it.
                listeners.on(&canvas, "touchmove", move |e| {
                    let e = e.unchecked_into::<TouchEvent>();
                    let changed = e.changed_touches();
                    for i in 0..changed.length() {
                        let Some(t) = changed.item(i) else { continue };
                        let id = PointerId::Touch(t.identifier());
                        if press_move(id, t.client_x() as f64, t.client_y() as f64) {
                            e.prevent_default();
                        }
                    }
                });
                listeners.on(&canvas, "touchend", move |e| {
                    let e = e.unchecked_into::<TouchEvent>();
                    let changed = e.changed_touches();
                    for i in 0..changed.length() {
                        let Some(t) = changed.item(i) else { continue };
                        let id = PointerId::Touch(t.identifier());
                        if press_end(id, t.client_x() as f64, t.client_y() as f64) {
                            e.prevent_default();
                        }
                    }
                });
                {
                    let gesture = gesture.clone();
                    let redraw = redraw.clone();
                    listeners.on(&canvas, "touchcancel", move |e| {
                        let e = e.unchecked_into::<TouchEvent>();
                        let changed = e.changed_touches();
                        let ours = (0..changed.length())
                            .filter_map(|i| changed.item(i))
                            .any(|t| gesture.borrow().owned_by(PointerId::Touch(t.identifier())));
                        if ours {
                            gesture.borrow_mut().cancel();
                            redraw();
                        }
                    });
                }
                // Resize
                {
                    let canvas = canvas.clone();
                    let config = config.clone();
                    listeners.on(&window, "resize", move |_e| {
                        fit_canvas(&canvas, &config);
                        redraw();
                    });
                }
            } else {
                clog("board: canvas not mounted");
            }
            move || {
                *draw_ref.borrow_mut() = None;
                drop(listeners);
            }
        });
    }

    html! {
        <canvas
            ref={canvas_ref}
            style="display:block; margin:12px auto; touch-action:none; border:1px solid #30363d; border-radius:8px;"
        />
    }
}
