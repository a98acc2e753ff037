//! GUI panel controller: owns the wry webview and its state.
//!
//! The viewer holds a single `PanelController` field instead of a handful
//! of `#[cfg(feature = "gui")]` fields.

use std::sync::mpsc;
use std::time::{Duration, Instant};

use winit::window::Window;

use super::webview;
use crate::options::PanelOptions;
use crate::panel::{DebugPanel, PanelAction};
use crate::SceneEngine;

/// Owns the webview panel and all associated state.
pub(crate) struct PanelController {
    webview: Option<wry::WebView>,
    action_rx: Option<mpsc::Receiver<PanelAction>>,
    last_stats_push: Instant,
    state: DebugPanel,
}

impl PanelController {
    /// Interval between FPS pushes.
    const STATS_INTERVAL: Duration = Duration::from_millis(250);

    /// Create a controller in the configured initial state, without a
    /// webview yet.
    pub(crate) fn new(options: &PanelOptions) -> Self {
        Self {
            webview: None,
            action_rx: None,
            last_stats_push: Instant::now(),
            state: DebugPanel::new(options),
        }
    }

    /// Create the wry webview and push the initial schema to it. A failure
    /// is logged and the viewer continues without a panel.
    pub(crate) fn init_webview(&mut self, window: &Window, engine: &SceneEngine) {
        #[cfg(target_os = "linux")]
        if let Err(e) = gtk::init() {
            log::error!("Failed to initialize GTK: {e}");
            return;
        }

        let inner = window.inner_size();
        let bounds = webview::panel_bounds(
            inner.width,
            inner.height,
            window.scale_factor(),
            &self.state,
        );
        match webview::create_webview(window, bounds) {
            Ok((wv, rx)) => {
                webview::push_schema(&wv, engine.options());
                webview::push_panel_state(&wv, &self.state);
                self.webview = Some(wv);
                self.action_rx = Some(rx);
            }
            Err(e) => {
                log::error!("Failed to create webview: {e}");
            }
        }
    }

    /// Apply one panel action: option edits go to the engine, fold and
    /// visibility toggles move the webview.
    pub(crate) fn apply(
        &mut self,
        action: &PanelAction,
        engine: &mut SceneEngine,
        window: &Window,
    ) {
        log::debug!("panel action: {action:?}");
        if engine.apply_panel_action(action) {
            if let Some(ref wv) = self.webview {
                webview::push_options(wv, engine.options());
            }
        }
        if self.state.apply(action) {
            if let Some(ref wv) = self.webview {
                webview::push_panel_state(wv, &self.state);
            }
            self.apply_layout(window);
        }
    }

    /// Position the webview according to the current fold and visibility
    /// state.
    pub(crate) fn apply_layout(&self, window: &Window) {
        let Some(ref wv) = self.webview else {
            return;
        };
        let inner = window.inner_size();
        let bounds = webview::panel_bounds(
            inner.width,
            inner.height,
            window.scale_factor(),
            &self.state,
        );
        if let Err(e) = wv.set_bounds(bounds) {
            log::warn!("Failed to move panel: {e}");
        }
    }

    /// Drain IPC actions from the webview and apply them.
    pub(crate) fn drain_and_apply(
        &mut self,
        engine: &mut SceneEngine,
        window: &Window,
    ) {
        #[cfg(target_os = "linux")]
        while gtk::events_pending() {
            let _ = gtk::main_iteration_do(false);
        }

        let Some(ref rx) = self.action_rx else {
            return;
        };
        let actions: Vec<PanelAction> = rx.try_iter().collect();
        for action in &actions {
            self.apply(action, engine, window);
        }
    }

    /// Push the FPS readout to the webview at ~4 Hz.
    pub(crate) fn push_stats_if_due(&mut self, now: Instant, engine: &SceneEngine) {
        let Some(ref wv) = self.webview else {
            return;
        };
        if now.duration_since(self.last_stats_push) >= Self::STATS_INTERVAL {
            webview::push_stats(wv, engine.fps());
            self.last_stats_push = now;
        }
    }
}
