//! Browser host: attaches the engine to `<canvas id="webgl">`.
//!
//! The page's real `scroll`, `mousemove` and `resize` events feed the
//! engine, `requestAnimationFrame` drives the loop, and a small DOM panel
//! in the top-right corner edits the material color. Key `H` hides the
//! panel. A configured `material.gradient_map` is fetched as a URL
//! relative to the page.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, HtmlCanvasElement, HtmlElement, HtmlInputElement, KeyboardEvent,
    MouseEvent,
};
use web_time::Instant;

use crate::options::{MaterialOptions, Options};
use crate::panel::{DebugPanel, PanelAction};
use crate::renderer::GradientMap;
use crate::{InputEvent, SceneEngine};

/// Entry point called by the wasm-bindgen glue when the module loads.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
    }
    wasm_bindgen_futures::spawn_local(async {
        if let Err(e) = run(Options::default()).await {
            log::error!("scrollscene failed to start: {e:?}");
        }
    });
}

/// Build the engine on the page canvas and start the frame loop.
///
/// # Errors
///
/// Returns a `JsValue` describing the failure if the canvas is missing or
/// the engine cannot be created.
pub async fn run(options: Options) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no global window")?;
    let document = window.document().ok_or("no document")?;
    let canvas: HtmlCanvasElement = document
        .get_element_by_id("webgl")
        .ok_or("canvas#webgl not found")?
        .dyn_into()?;

    let (width, height, dpr) = window_size(&window)?;
    let panel_state = DebugPanel::new(&options.panel);
    let initial_color = options.material.color.to_hex();
    let gradient = fetch_gradient(&window, &options.material).await?;
    let engine = SceneEngine::with_gradient(
        wgpu::SurfaceTarget::Canvas(canvas.clone()),
        (width, height),
        dpr,
        options,
        &gradient,
    )
    .await
    .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let engine = Rc::new(RefCell::new(engine));
    engine.borrow_mut().handle_input(InputEvent::Scrolled {
        scroll_y: window.scroll_y()? as f32,
    });
    log::info!("scrollscene running at {width}x{height} (dpr {dpr})");

    let panel = Rc::new(RefCell::new(DomPanel::build(
        &document,
        panel_state,
        &initial_color,
    )?));

    install_listeners(&window, &engine, &panel)?;
    start_frame_loop(&window, engine, panel)
}

/// The configured gradient ramp. The page has no file system, so a
/// `gradient_map` path is fetched over HTTP.
async fn fetch_gradient(
    window: &web_sys::Window,
    material: &MaterialOptions,
) -> Result<GradientMap, JsValue> {
    let Some(path) = &material.gradient_map else {
        return Ok(GradientMap::stepped(material.gradient_steps));
    };
    let url = path.to_string_lossy();
    let response: web_sys::Response =
        JsFuture::from(window.fetch_with_str(&url)).await?.dyn_into()?;
    if !response.ok() {
        return Err(JsValue::from_str(&format!(
            "{url}: HTTP {}",
            response.status()
        )));
    }
    let buffer = JsFuture::from(response.array_buffer()?).await?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    let map = GradientMap::from_image_bytes(&bytes)
        .map_err(|e| JsValue::from_str(&format!("{url}: {e}")))?;
    log::info!("gradient map {url} fetched ({} tones)", map.texels().len());
    Ok(map)
}

// ── Event wiring ─────────────────────────────────────────────────────────

fn window_size(window: &web_sys::Window) -> Result<(f32, f32, f32), JsValue> {
    let width = window.inner_width()?.as_f64().unwrap_or(1.0);
    let height = window.inner_height()?.as_f64().unwrap_or(1.0);
    Ok((width as f32, height as f32, window.device_pixel_ratio() as f32))
}

/// Attach a handler to `target` for the lifetime of the page.
fn listen<E, F>(
    target: &web_sys::EventTarget,
    event: &str,
    handler: F,
) -> Result<(), JsValue>
where
    E: wasm_bindgen::convert::FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    target.add_event_listener_with_callback(
        event,
        closure.as_ref().unchecked_ref(),
    )?;
    closure.forget();
    Ok(())
}

fn install_listeners(
    window: &web_sys::Window,
    engine: &Rc<RefCell<SceneEngine>>,
    panel: &Rc<RefCell<DomPanel>>,
) -> Result<(), JsValue> {
    {
        let engine = Rc::clone(engine);
        let win = window.clone();
        listen(window, "resize", move |_: web_sys::Event| {
            if let Ok((width, height, scale_factor)) = window_size(&win) {
                engine.borrow_mut().handle_input(InputEvent::Resized {
                    width,
                    height,
                    scale_factor,
                });
            }
        })?;
    }
    {
        let engine = Rc::clone(engine);
        let win = window.clone();
        listen(window, "scroll", move |_: web_sys::Event| {
            if let Ok(scroll_y) = win.scroll_y() {
                engine.borrow_mut().handle_input(InputEvent::Scrolled {
                    scroll_y: scroll_y as f32,
                });
            }
        })?;
    }
    {
        let engine = Rc::clone(engine);
        listen(window, "mousemove", move |e: MouseEvent| {
            engine.borrow_mut().handle_input(InputEvent::CursorMoved {
                x: e.client_x() as f32,
                y: e.client_y() as f32,
            });
        })?;
    }
    {
        let engine = Rc::clone(engine);
        let panel = Rc::clone(panel);
        listen(window, "keydown", move |e: KeyboardEvent| {
            if e.repeat() {
                return;
            }
            let action = engine.borrow().handle_key_press(&e.code());
            if let Some(action) = action {
                panel.borrow_mut().apply(&action);
            }
        })?;
    }
    {
        let engine = Rc::clone(engine);
        let input = panel.borrow().input.clone();
        listen(&panel.borrow().input, "input", move |_: web_sys::Event| {
            let action = PanelAction::SetOption {
                path: "material".into(),
                field: "color".into(),
                value: serde_json::Value::String(input.value()),
            };
            let _ = engine.borrow_mut().apply_panel_action(&action);
        })?;
    }
    {
        let panel_ref = Rc::clone(panel);
        listen(&panel.borrow().title, "click", move |_: MouseEvent| {
            panel_ref.borrow_mut().apply(&PanelAction::ToggleFold);
        })?;
    }
    Ok(())
}

/// Interval between FPS readout updates.
const STATS_INTERVAL: Duration = Duration::from_millis(250);

/// Run `render` on every animation frame until the page unloads.
fn start_frame_loop(
    window: &web_sys::Window,
    engine: Rc<RefCell<SceneEngine>>,
    panel: Rc<RefCell<DomPanel>>,
) -> Result<(), JsValue> {
    // The closure reschedules itself, so it holds a handle to its own slot.
    let slot: Rc<RefCell<Option<Closure<dyn FnMut()>>>> =
        Rc::new(RefCell::new(None));
    let next = Rc::clone(&slot);
    let win = window.clone();
    let mut last_stats = Instant::now();

    *slot.borrow_mut() = Some(Closure::new(move || {
        {
            let mut engine = engine.borrow_mut();
            match engine.render() {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                    engine.context.reconfigure();
                }
                Err(e) => log::error!("render error: {e:?}"),
            }
            let now = Instant::now();
            if now.duration_since(last_stats) >= STATS_INTERVAL {
                panel.borrow().show_fps(engine.fps());
                last_stats = now;
            }
        }
        if let Some(callback) = next.borrow().as_ref() {
            if let Err(e) =
                win.request_animation_frame(callback.as_ref().unchecked_ref())
            {
                log::error!("requestAnimationFrame failed: {e:?}");
            }
        }
    }));

    if let Some(callback) = slot.borrow().as_ref() {
        let _ = window.request_animation_frame(callback.as_ref().unchecked_ref())?;
    }
    Ok(())
}

// ── DOM panel ────────────────────────────────────────────────────────────

/// The in-page debug panel: a title bar with an FPS readout that folds a
/// single color input.
struct DomPanel {
    root: HtmlElement,
    title: HtmlElement,
    fps: HtmlElement,
    body: HtmlElement,
    input: HtmlInputElement,
    state: DebugPanel,
}

impl DomPanel {
    fn build(
        document: &Document,
        state: DebugPanel,
        color: &str,
    ) -> Result<Self, JsValue> {
        let root: HtmlElement = document.create_element("div")?.dyn_into()?;
        root.set_id("scrollscene-panel");
        root.style().set_css_text(
            "position:fixed;top:0;right:15px;width:245px;z-index:1000;\
             font:11px sans-serif;color:#eee;background:#1a1a1a;",
        );

        let title: HtmlElement = document.create_element("div")?.dyn_into()?;
        title.set_inner_text("Controls");
        title.style().set_css_text(
            "display:flex;justify-content:space-between;padding:6px 8px;\
             cursor:pointer;",
        );
        let fps: HtmlElement = document.create_element("span")?.dyn_into()?;
        fps.style().set_css_text("color:#888;");
        let _ = title.append_child(&fps)?;

        let body: HtmlElement = document.create_element("div")?.dyn_into()?;
        body.style().set_css_text(
            "display:flex;align-items:center;gap:8px;padding:6px 8px;",
        );
        let label: HtmlElement = document.create_element("span")?.dyn_into()?;
        label.set_inner_text("materialColor");
        let input: HtmlInputElement =
            document.create_element("input")?.dyn_into()?;
        input.set_type("color");
        input.set_value(color);

        let _ = body.append_child(&label)?;
        let _ = body.append_child(&input)?;
        let _ = root.append_child(&title)?;
        let _ = root.append_child(&body)?;
        let _ = document
            .body()
            .ok_or("no document body")?
            .append_child(&root)?;

        let panel = Self {
            root,
            title,
            fps,
            body,
            input,
            state,
        };
        panel.sync();
        Ok(panel)
    }

    fn apply(&mut self, action: &PanelAction) {
        if self.state.apply(action) {
            log::debug!("panel action: {action:?}");
            self.sync();
        }
    }

    fn show_fps(&self, fps: f32) {
        self.fps.set_inner_text(&format!("{fps:.0} fps"));
    }

    fn sync(&self) {
        let root_display = if self.state.is_visible() { "block" } else { "none" };
        let body_display = if self.state.is_folded() { "none" } else { "flex" };
        let _ = self.root.style().set_property("display", root_display);
        let _ = self.body.style().set_property("display", body_display);
    }
}
