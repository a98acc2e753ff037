//! Debug panel state and its action protocol.
//!
//! The panel front ends (the native webview and the web DOM panel) send
//! small JSON messages. They are parsed here into [`PanelAction`]s so
//! every host applies them the same way:
//!
//! ```json
//! {"action":"set_option","path":"material","field":"color","value":"#ff8800"}
//! {"action":"toggle_panel"}
//! {"action":"toggle_fold"}
//! ```

use crate::options::PanelOptions;

/// Actions sent from a panel front end to the host.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelAction {
    /// Set a single option field: `options[path][field] = value`.
    SetOption {
        /// Top-level section key (e.g. `"material"`).
        path: String,
        /// Field key within the section (e.g. `"color"`).
        field: String,
        /// New JSON value.
        value: serde_json::Value,
    },
    /// Show or hide the whole panel.
    TogglePanel,
    /// Collapse or expand the panel's folder.
    ToggleFold,
}

/// Parse an IPC message into a [`PanelAction`].
#[must_use]
pub fn parse_action(msg: &serde_json::Value) -> Option<PanelAction> {
    let action = msg.get("action")?.as_str()?;
    match action {
        "set_option" => {
            let path = msg.get("path")?.as_str()?.to_owned();
            let field = msg.get("field")?.as_str()?.to_owned();
            let value = msg.get("value")?.clone();
            Some(PanelAction::SetOption { path, field, value })
        }
        "toggle_panel" => Some(PanelAction::TogglePanel),
        "toggle_fold" => Some(PanelAction::ToggleFold),
        _ => None,
    }
}

/// Parse a raw IPC message body. Malformed input yields `None`.
#[must_use]
pub fn parse_message(body: &str) -> Option<PanelAction> {
    let action = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|msg| parse_action(&msg));
    if action.is_none() {
        log::debug!("ignoring panel message: {body}");
    }
    action
}

/// Presentation state of the debug panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebugPanel {
    folded: bool,
    hidden: bool,
}

impl DebugPanel {
    /// Initial state from options (folded by default).
    #[must_use]
    pub fn new(options: &PanelOptions) -> Self {
        Self {
            folded: options.start_folded,
            hidden: options.start_hidden,
        }
    }

    /// Apply the presentation part of an action. Returns `true` when the
    /// panel layout changed.
    pub fn apply(&mut self, action: &PanelAction) -> bool {
        match action {
            PanelAction::TogglePanel => {
                self.hidden = !self.hidden;
                true
            }
            PanelAction::ToggleFold => {
                self.folded = !self.folded;
                true
            }
            PanelAction::SetOption { .. } => false,
        }
    }

    /// Whether the folder is collapsed.
    #[must_use]
    pub fn is_folded(&self) -> bool {
        self.folded
    }

    /// Whether the panel is shown at all.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        !self.hidden
    }
}
