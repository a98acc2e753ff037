//! IPC bridge between the wry webview (native) and the Dioxus WASM app.
//!
//! **Inbound** (native → WASM): the native side calls
//! `window.__scrollscene_push_*(json)`, which dispatch `CustomEvent`s that
//! we listen to here.
//!
//! **Outbound** (WASM → native): we call `window.ipc.postMessage(json)` to
//! send panel actions back to the engine.

use dioxus::signals::{Signal, Writable};
use serde_json::Value;
use wasm_bindgen::prelude::*;

// ── Inbound listeners ────────────────────────────────────────────────────

/// Parse each `event` payload as JSON into `sig`. Call once at app startup.
pub fn listen_json(event: &str, mut sig: Signal<Option<Value>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let on_event = Closure::<dyn FnMut(web_sys::CustomEvent)>::new(
        move |evt: web_sys::CustomEvent| {
            if let Some(json_str) = evt.detail().as_string() {
                if let Ok(val) = serde_json::from_str::<Value>(&json_str) {
                    sig.set(Some(val));
                }
            }
        },
    );
    if window
        .add_event_listener_with_callback(
            event,
            on_event.as_ref().unchecked_ref(),
        )
        .is_ok()
    {
        on_event.forget();
    }
}

// ── Outbound actions ─────────────────────────────────────────────────────

/// Send a `toggle_fold` action to the native engine.
pub fn send_toggle_fold() {
    let msg = serde_json::json!({ "action": "toggle_fold" });
    post_message(&msg.to_string());
}

/// Send a `set_option` action to the native engine.
pub fn send_set_option(path: &str, field: &str, value: &Value) {
    let msg = serde_json::json!({
        "action": "set_option",
        "path": path,
        "field": field,
        "value": value,
    });
    post_message(&msg.to_string());
}

/// Call `window.ipc.postMessage(json)` to send a message to the native
/// wry IPC handler.
fn post_message(json: &str) {
    let js = format!(
        "window.ipc.postMessage('{}')",
        json.replace('\\', "\\\\").replace('\'', "\\'")
    );
    let _ = js_sys::eval(&js);
}
