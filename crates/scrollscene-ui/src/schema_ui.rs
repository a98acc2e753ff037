//! Schema-driven panel.
//!
//! Walks the JSON Schema produced by `schemars` and renders one control
//! per exposed option. When a user changes a value, the bridge sends a
//! `set_option` IPC message to the native engine.

use dioxus::prelude::*;
use serde_json::Value;

use crate::bridge;

/// Convert a `snake_case` string to `Title Case`.
fn display_name(s: &str) -> String {
    s.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(c) => {
                    let upper: String = c.to_uppercase().collect();
                    format!("{upper}{}", chars.as_str())
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Leaf component that reads the stats signal. Only this component
/// re-renders when FPS updates, leaving the rest of the panel untouched.
#[component]
fn FpsLabel(stats_sig: Signal<Option<Value>>) -> Element {
    let stats = stats_sig.read();
    let fps_text = stats
        .as_ref()
        .and_then(|s| s.get("fps"))
        .and_then(Value::as_f64)
        .map_or_else(|| "--".to_owned(), |f| format!("{f:.0}"));

    rsx! {
        div { class: "field-row",
            label { class: "field-label", "FPS" }
            span { class: "fps-value", "{fps_text}" }
        }
    }
}

/// Top-level component: a title bar that folds the option controls.
#[allow(unused_qualifications)] // false positive from rsx! event-handler expansion
#[component]
pub fn SchemaPanel(
    schema: Value,
    options: Value,
    stats_sig: Signal<Option<Value>>,
    folded: bool,
) -> Element {
    let Some(props) = schema.pointer("/properties").and_then(Value::as_object)
    else {
        return rsx! { p { "No schema loaded" } };
    };

    rsx! {
        div { class: "panel",
            div {
                class: "section-header",
                onclick: move |_| bridge::send_toggle_fold(),
                if folded { "▸ Open Controls" } else { "▾ Close Controls" }
            }
            if !folded {
                div { class: "section-body",
                    FpsLabel { stats_sig: stats_sig }
                    for (section_key, section_schema) in props.iter() {
                        {render_section(
                            section_key,
                            resolve_ref(section_schema, &schema),
                            options.get(section_key),
                        )}
                    }
                }
            }
        }
    }
}

/// Render the controls of one top-level Options field.
fn render_section(
    key: &str,
    schema: &Value,
    current: Option<&Value>,
) -> Element {
    let properties = schema.pointer("/properties").and_then(Value::as_object);

    rsx! {
        if let Some(props) = properties {
            for (field_key, field_schema) in props.iter() {
                {render_field(
                    key,
                    field_key,
                    field_schema,
                    current.and_then(|c| c.get(field_key)),
                )}
            }
        }
    }
}

/// Resolve a `$ref` pointer (e.g. `"#/$defs/MaterialOptions"`) against the
/// root schema. Returns the input schema unchanged if there is no `$ref`.
fn resolve_ref<'a>(schema: &'a Value, root: &'a Value) -> &'a Value {
    if let Some(ref_str) = schema.get("$ref").and_then(Value::as_str) {
        // Convert "#/$defs/Foo" to "/$defs/Foo" for JSON pointer lookup.
        let pointer = ref_str.strip_prefix('#').unwrap_or(ref_str);
        root.pointer(pointer).unwrap_or(schema)
    } else {
        schema
    }
}

/// Render a single field control based on its schema type and format.
#[allow(unused_qualifications)] // false positive from rsx! event-handler expansion
fn render_field(
    section: &str,
    field: &str,
    schema: &Value,
    current: Option<&Value>,
) -> Element {
    let label = schema
        .get("title")
        .and_then(Value::as_str)
        .map_or_else(|| display_name(field), String::from);
    let field_type = schema.get("type").and_then(Value::as_str);
    let format = schema.get("format").and_then(Value::as_str);
    let current_str = current.and_then(Value::as_str).unwrap_or("").to_owned();
    let input_type = match (field_type, format) {
        (Some("string"), Some("color")) => "color",
        (Some("string"), _) => "text",
        _ => {
            return rsx! {
                div { class: "field-row",
                    label { class: "field-label", "{label}" }
                    span { "(unsupported type)" }
                }
            };
        }
    };

    let section = section.to_owned();
    let field = field.to_owned();

    rsx! {
        div { class: "field-row",
            label { class: "field-label", "{label}" }
            input {
                r#type: input_type,
                value: "{current_str}",
                oninput: move |evt: Event<FormData>| {
                    let val = Value::String(evt.value());
                    bridge::send_set_option(&section, &field, &val);
                },
            }
        }
    }
}
