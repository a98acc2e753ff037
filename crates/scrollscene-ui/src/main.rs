//! Dioxus web app for the scrollscene debug panel.
//!
//! Compiled to WASM and loaded into a wry webview by the native viewer.
//! Communicates with the engine via a JSON IPC bridge.

mod bridge;
mod schema_ui;

use dioxus::prelude::*;
use serde_json::Value;

fn main() {
    launch(app);
}

fn app() -> Element {
    let schema: Signal<Option<Value>> = use_signal(|| None);
    let options: Signal<Option<Value>> = use_signal(|| None);
    let stats: Signal<Option<Value>> = use_signal(|| None);
    let panel: Signal<Option<Value>> = use_signal(|| None);

    // Register IPC listeners once on mount.
    let _ = use_effect(move || {
        bridge::listen_json("scrollscene-schema", schema);
        bridge::listen_json("scrollscene-options", options);
        bridge::listen_json("scrollscene-stats", stats);
        bridge::listen_json("scrollscene-panel", panel);
    });

    let schema_val = schema.read();
    let options_val = options.read();
    let folded = panel
        .read()
        .as_ref()
        .and_then(|p| p.get("folded"))
        .and_then(Value::as_bool)
        .unwrap_or(true);

    match (&*schema_val, &*options_val) {
        (Some(s), Some(o)) => rsx! {
            schema_ui::SchemaPanel {
                schema: s.clone(),
                options: o.clone(),
                stats_sig: stats,
                folded: folded,
            }
        },
        _ => rsx! {
            div {
                style: "padding: 6px 8px; color: #888;",
                "Waiting for engine..."
            }
        },
    }
}
