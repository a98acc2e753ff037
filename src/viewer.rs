//! Standalone scene window backed by winit.
//!
//! A native window has no document to scroll, so the mouse wheel drives
//! the engine's virtual page. When the `gui` feature is enabled, a wry
//! webview debug panel is created in the top-right corner.
//!
//! ```no_run
//! # use scrollscene::Viewer;
//! Viewer::builder()
//!     .with_title("Landing")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::LogicalPosition,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::{
    error::SceneError, input::ScrollDelta, options::Options, InputEvent,
    SceneEngine,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    /// Create a builder with defaults (title "scrollscene", default
    /// options).
    fn new() -> Self {
        Self {
            options: None,
            title: "scrollscene".into(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that displays the scroll scene.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Viewer`] if the event loop cannot be created
    /// or exits with an error.
    pub fn run(self) -> Result<(), SceneError> {
        let event_loop =
            EventLoop::new().map_err(|e| SceneError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            options: Some(self.options),
            title: self.title,
            #[cfg(feature = "gui")]
            panel: None,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| SceneError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<SceneEngine>,
    options: Option<Options>,
    title: String,
    #[cfg(feature = "gui")]
    panel: Option<crate::gui::panel::PanelController>,
}

/// Logical size and pixel ratio of a window.
fn logical_size(window: &Window) -> (f32, f32, f32) {
    let scale = window.scale_factor();
    let size = window.inner_size().to_logical::<f32>(scale);
    (size.width, size.height, scale as f32)
}

impl ViewerApp {
    /// Route a panel action to the GUI panel, if there is one.
    fn dispatch_panel_action(&mut self, action: &crate::panel::PanelAction) {
        #[cfg(feature = "gui")]
        if let (Some(panel), Some(engine), Some(window)) =
            (&mut self.panel, &mut self.engine, &self.window)
        {
            panel.apply(action, engine, window);
            return;
        }
        if let Some(engine) = &mut self.engine {
            let _ = engine.apply_panel_action(action);
        }
    }

    fn redraw(&mut self) {
        let (Some(window), Some(engine)) = (&self.window, &mut self.engine)
        else {
            return;
        };

        #[cfg(feature = "gui")]
        if let Some(panel) = &mut self.panel {
            panel.drain_and_apply(engine, window);
        }

        match engine.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                engine.context.reconfigure();
            }
            Err(e) => {
                log::error!("render error: {e:?}");
            }
        }

        #[cfg(feature = "gui")]
        if let Some(panel) = &mut self.panel {
            panel.push_stats_if_due(std::time::Instant::now(), engine);
        }

        window.request_redraw();
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            let logical_w = (f64::from(mon_size.width) / scale * 0.75) as u32;
            let logical_h = (f64::from(mon_size.height) / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_transparent(true)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes()
                .with_title(&self.title)
                .with_transparent(true)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let options = self.options.take().unwrap_or_default();
        let (width, height, scale) = logical_size(&window);
        #[cfg(feature = "gui")]
        let panel_options = options.panel.clone();

        let engine = match pollster::block_on(SceneEngine::new(
            window.clone(),
            (width, height),
            scale,
            options,
        )) {
            Ok(e) => e,
            Err(e) => {
                log::error!("Failed to initialize engine: {e}");
                event_loop.exit();
                return;
            }
        };

        #[cfg(feature = "gui")]
        {
            let mut panel =
                crate::gui::panel::PanelController::new(&panel_options);
            panel.init_webview(&window, &engine);
            self.panel = Some(panel);
        }

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        // Guard: both window and engine must be initialised.
        let (Some(window), Some(engine)) = (&self.window, &mut self.engine)
        else {
            return;
        };
        let scale = window.scale_factor();

        match event {
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                let (width, height, scale) = logical_size(window);
                engine.handle_input(InputEvent::Resized {
                    width,
                    height,
                    scale_factor: scale,
                });
                #[cfg(feature = "gui")]
                if let Some(panel) = &self.panel {
                    panel.apply_layout(window);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(),

            WindowEvent::CursorMoved { position, .. } => {
                let logical: LogicalPosition<f32> = position.to_logical(scale);
                engine.handle_input(InputEvent::CursorMoved {
                    x: logical.x,
                    y: logical.y,
                });
            }

            WindowEvent::MouseWheel { delta, .. } => {
                engine.handle_input(InputEvent::Wheel {
                    delta: ScrollDelta::from_winit(delta, scale),
                });
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let key_str = format!("{code:?}");
                if let Some(action) = engine.handle_key_press(&key_str) {
                    self.dispatch_panel_action(&action);
                }
            }

            _ => (),
        }
    }
}
