//! Wry webview child of the winit window.
//!
//! Creates a [`wry::WebView`] in the top-right corner of the window, loads
//! the scrollscene-ui WASM bundle via a custom `scrollscene://` protocol,
//! and bridges IPC between the Dioxus panel and the native engine.

use std::borrow::Cow;
use std::sync::mpsc;

use rust_embed::RustEmbed;
use wry::http::{header::CONTENT_TYPE, Response};
use wry::{dpi, Rect, WebView, WebViewBuilder};

use crate::options::Options;
use crate::panel::{self, DebugPanel, PanelAction};

/// Embedded scrollscene-ui dist output (built by `trunk build`).
#[derive(RustEmbed)]
#[folder = "crates/scrollscene-ui/dist/"]
struct UiAssets;

/// Width of the panel in logical pixels.
pub const PANEL_WIDTH: u32 = 245;
/// Height of the panel when expanded, in logical pixels.
pub const PANEL_HEIGHT: u32 = 120;
/// Height of the folded title bar, in logical pixels.
pub const FOLDED_HEIGHT: u32 = 28;

/// Create the wry webview as a child of the given window.
///
/// Returns `(webview, action_rx)`. The receiver yields [`PanelAction`]s
/// from the WASM app.
///
/// # Errors
///
/// Returns [`wry::Error`] if the platform webview cannot be created.
pub fn create_webview<W: wry::raw_window_handle::HasWindowHandle>(
    window: &W,
    bounds: Rect,
) -> Result<(WebView, mpsc::Receiver<PanelAction>), wry::Error> {
    let (tx, rx) = mpsc::channel();

    let webview = WebViewBuilder::new()
        .with_bounds(bounds)
        .with_transparent(true)
        .with_custom_protocol("scrollscene".into(), |_id, request| {
            let path = request.uri().path();
            // Default to index.html for the root path.
            let path = if path == "/" { "index.html" } else { &path[1..] };

            match UiAssets::get(path) {
                Some(asset) => {
                    let mime = mime_guess::from_path(path)
                        .first_or_octet_stream()
                        .to_string();
                    Response::builder()
                        .header(CONTENT_TYPE, mime)
                        .body(Cow::from(asset.data.to_vec()))
                        .unwrap_or_else(|_| {
                            Response::new(Cow::from(Vec::new()))
                        })
                }
                None => Response::builder()
                    .status(404)
                    .body(Cow::from(Vec::new()))
                    .unwrap_or_else(|_| {
                        Response::new(Cow::from(Vec::new()))
                    }),
            }
        })
        .with_url("scrollscene://localhost/")
        .with_initialization_script(BRIDGE_JS)
        .with_ipc_handler(move |req| {
            if let Some(action) = panel::parse_message(req.body()) {
                let _ = tx.send(action);
            }
        })
        .build_as_child(window)?;

    Ok((webview, rx))
}

/// Compute the panel [`Rect`] for the window's current physical size.
///
/// A hidden panel is parked just past the right edge of the window.
#[must_use]
pub fn panel_bounds(
    window_width: u32,
    window_height: u32,
    scale_factor: f64,
    state: &DebugPanel,
) -> Rect {
    let scale = |logical: u32| (f64::from(logical) * scale_factor).round() as u32;
    let width = scale(PANEL_WIDTH).min(window_width);
    let height = if state.is_folded() {
        scale(FOLDED_HEIGHT)
    } else {
        scale(PANEL_HEIGHT)
    }
    .min(window_height);

    let x = if state.is_visible() {
        window_width.saturating_sub(width)
    } else {
        window_width
    };
    Rect {
        position: dpi::Position::Physical(dpi::PhysicalPosition::new(
            x as i32, 0,
        )),
        size: dpi::Size::Physical(dpi::PhysicalSize::new(width, height)),
    }
}

/// Push the Options JSON schema to the webview (call once after creation).
pub fn push_schema(webview: &WebView, options: &Options) {
    let json =
        serde_json::to_string(&Options::json_schema()).unwrap_or_default();
    eval_with_json(webview, "__scrollscene_push_schema", &json);
    push_options(webview, options);
}

/// Push the current Options state to the webview.
pub fn push_options(webview: &WebView, options: &Options) {
    let json = serde_json::to_string(options).unwrap_or_default();
    eval_with_json(webview, "__scrollscene_push_options", &json);
}

/// Push the frame rate readout to the webview.
pub fn push_stats(webview: &WebView, fps: f32) {
    let json = serde_json::json!({ "fps": fps }).to_string();
    eval_with_json(webview, "__scrollscene_push_stats", &json);
}

/// Push the folded / visible state to the webview.
pub fn push_panel_state(webview: &WebView, state: &DebugPanel) {
    let json = serde_json::json!({
        "folded": state.is_folded(),
        "visible": state.is_visible(),
    })
    .to_string();
    eval_with_json(webview, "__scrollscene_push_panel", &json);
}

// ── Internals ────────────────────────────────────────────────────────────

fn eval_with_json(webview: &WebView, function: &str, json: &str) {
    let escaped = json.replace('\\', "\\\\").replace('\'', "\\'");
    if let Err(e) =
        webview.evaluate_script(&format!("window.{function}('{escaped}')"))
    {
        log::warn!("{function} failed: {e}");
    }
}

/// JavaScript injected before page load. Defines the bridge functions that
/// the native side calls, and dispatches `CustomEvent`s to the WASM app.
///
/// Calls that arrive before the WASM app has registered listeners are
/// buffered. When a listener attaches it replays any pending data.
const BRIDGE_JS: &str = r#"
(function() {
    var pending = {};

    function dispatch(name, json) {
        window.dispatchEvent(new CustomEvent(name, { detail: json }));
    }

    function bridge(fnName, eventName) {
        window[fnName] = function(json) {
            pending[eventName] = json;
            dispatch(eventName, json);
        };
    }

    bridge('__scrollscene_push_schema', 'scrollscene-schema');
    bridge('__scrollscene_push_options', 'scrollscene-options');
    bridge('__scrollscene_push_stats', 'scrollscene-stats');
    bridge('__scrollscene_push_panel', 'scrollscene-panel');

    // When the WASM app adds a listener, replay buffered data.
    var origAdd = EventTarget.prototype.addEventListener;
    EventTarget.prototype.addEventListener = function(type, fn, opts) {
        origAdd.call(this, type, fn, opts);
        if (this === window && pending[type]) {
            dispatch(type, pending[type]);
        }
    };
})();
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::PanelOptions;

    fn physical(rect: &Rect) -> (i32, i32, u32, u32) {
        let dpi::Position::Physical(pos) = rect.position else {
            panic!("expected physical position");
        };
        let dpi::Size::Physical(size) = rect.size else {
            panic!("expected physical size");
        };
        (pos.x, pos.y, size.width, size.height)
    }

    #[test]
    fn folded_panel_sits_top_right() {
        let state = DebugPanel::new(&PanelOptions::default());
        let rect = panel_bounds(1000, 800, 1.0, &state);
        assert_eq!(physical(&rect), (755, 0, 245, 28));
    }

    #[test]
    fn expanded_panel_scales_with_dpi() {
        let mut state = DebugPanel::new(&PanelOptions::default());
        let _ = state.apply(&PanelAction::ToggleFold);
        let rect = panel_bounds(2000, 1600, 2.0, &state);
        assert_eq!(physical(&rect), (1510, 0, 490, 240));
    }

    #[test]
    fn hidden_panel_is_parked_off_screen() {
        let mut state = DebugPanel::new(&PanelOptions::default());
        let _ = state.apply(&PanelAction::TogglePanel);
        let rect = panel_bounds(1000, 800, 1.0, &state);
        assert_eq!(physical(&rect).0, 1000);
    }
}
