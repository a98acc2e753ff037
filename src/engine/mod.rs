//! The scene engine: GPU resources plus the per-frame loop.

/// Host-independent per-frame update step.
pub mod frame;

use web_time::Instant;

use self::frame::FrameStep;
use crate::animation::SectionAnimator;
use crate::camera::controller::CameraController;
use crate::error::SceneError;
use crate::gpu::lighting::Lighting;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::gpu::texture::DepthTarget;
use crate::input::{InputEvent, InputState, InputTracker};
use crate::options::Options;
use crate::panel::PanelAction;
use crate::params::ParameterStore;
use crate::renderer::{GradientMap, ParticleRenderer, ToonRenderer};
use crate::scene::Scene;
use crate::util::clock::{Clock, FpsMeter};
use crate::util::color::Color;
use crate::viewport::Viewport;

/// Renders the scroll scene and runs its update loop.
///
/// # Frame loop
///
/// Call [`render`](Self::render) once per display refresh. Forward host
/// input with [`handle_input`](Self::handle_input) and window size changes
/// with [`resize`](Self::resize).
///
/// # Parameters
///
/// The material color lives in a [`ParameterStore`]; change it through
/// [`set_material_color`](Self::set_material_color) or a panel action so
/// both materials follow.
pub struct SceneEngine {
    /// Core wgpu device, queue, and surface.
    pub context: RenderContext,
    _shader_composer: ShaderComposer,

    camera_controller: CameraController,
    lighting: Lighting,
    toon: ToonRenderer,
    particles: ParticleRenderer,
    depth: DepthTarget,

    scene: Scene,
    params: ParameterStore,
    tracker: InputTracker,
    animator: SectionAnimator,
    frame_step: FrameStep,
    viewport: Viewport,
    clock: Clock,
    fps: FpsMeter,
    options: Options,
}

impl SceneEngine {
    /// Create the engine for a window of `size` logical pixels.
    ///
    /// `scale_factor` is the device pixel ratio. The surface is sized in
    /// physical pixels with the ratio capped by the viewport options.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError`] if GPU initialization fails, a shader fails
    /// to compose, or a configured gradient map cannot be loaded.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (f32, f32),
        scale_factor: f32,
        options: Options,
    ) -> Result<Self, SceneError> {
        let gradient = GradientMap::from_options(&options.material)?;
        Self::with_gradient(window, size, scale_factor, options, &gradient)
            .await
    }

    /// Create the engine with an already loaded gradient ramp, for hosts
    /// that fetch `material.gradient_map` themselves.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError`] if GPU initialization fails or a shader
    /// fails to compose.
    pub async fn with_gradient(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (f32, f32),
        scale_factor: f32,
        options: Options,
        gradient: &GradientMap,
    ) -> Result<Self, SceneError> {
        let viewport =
            Viewport::new(size.0, size.1, scale_factor, &options.viewport);
        let context =
            RenderContext::new(window, viewport.physical_size()).await?;
        log::info!(
            "surface {:?} {}x{} (pixel ratio {})",
            context.format(),
            context.config.width,
            context.config.height,
            viewport.pixel_ratio()
        );

        let params = ParameterStore::new(options.material.color);
        let mut scene = Scene::build(&options, params.material_color());
        scene.rig.set_aspect(viewport.aspect());

        let mut shader_composer = ShaderComposer::new()?;
        let camera_controller = CameraController::new(&context, &scene.rig);
        let lighting = Lighting::new(&context, &scene.light);
        let toon = ToonRenderer::new(
            &context,
            &mut shader_composer,
            &camera_controller.layout,
            &lighting.layout,
            &scene,
            gradient,
        )?;
        let particles = ParticleRenderer::new(
            &context,
            &mut shader_composer,
            &camera_controller.layout,
            &scene,
        )?;
        let depth = DepthTarget::new(&context);

        let tracker = InputTracker::new(
            viewport.width(),
            viewport.height(),
            scene.section_count(),
        );
        let animator =
            SectionAnimator::new(scene.section_count(), &options.motion);

        Ok(Self {
            context,
            _shader_composer: shader_composer,
            camera_controller,
            lighting,
            toon,
            particles,
            depth,
            scene,
            params,
            tracker,
            animator,
            frame_step: FrameStep::new(&options.motion),
            viewport,
            clock: Clock::new(),
            fps: FpsMeter::new(),
            options,
        })
    }

    /// Handle a window resize in logical pixels.
    ///
    /// Zero-sized resizes (minimized windows) are ignored.
    pub fn resize(&mut self, width: f32, height: f32, scale_factor: f32) {
        if !self.viewport.resize(width, height, scale_factor) {
            return;
        }
        let (physical_width, physical_height) = self.viewport.physical_size();
        self.context.resize(physical_width, physical_height);
        self.scene.rig.set_aspect(self.viewport.aspect());
        self.tracker.resize(width, height);
        if !self.depth.matches(&self.context) {
            self.depth = DepthTarget::new(&self.context);
        }
        log::info!(
            "resized to {width}x{height} ({physical_width}x{physical_height} \
             physical)"
        );
    }

    /// Feed one host input event. A newly reached section starts its
    /// trigger rotation.
    pub fn handle_input(&mut self, event: InputEvent) {
        if let InputEvent::Resized {
            width,
            height,
            scale_factor,
        } = event
        {
            self.resize(width, height, scale_factor);
            return;
        }
        if let Some(section) = self.tracker.handle_event(event) {
            self.animator.trigger(section, Instant::now());
        }
    }

    /// Look up the panel action bound to a physical key code.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<PanelAction> {
        self.tracker.handle_key_press(key)
    }

    /// Set the material color and propagate it to both materials.
    pub fn set_material_color(&mut self, color: Color) {
        let changed = self
            .params
            .set_material_color(color, &mut self.scene.material_observers());
        self.options.material.color = color;
        if changed {
            log::debug!("material color set to {}", color.to_hex());
        }
    }

    /// Apply the option-editing part of a panel action. Returns `true`
    /// when an option changed.
    pub fn apply_panel_action(&mut self, action: &PanelAction) -> bool {
        let PanelAction::SetOption { path, field, value } = action else {
            return false;
        };
        let Some(updated) =
            self.options.with_field(path, field, value.clone())
        else {
            log::debug!("rejected option edit {path}.{field} = {value}");
            return false;
        };
        if updated.material.color != self.params.material_color() {
            self.set_material_color(updated.material.color);
        }
        let changed = updated != self.options;
        self.options = updated;
        changed
    }

    /// Advance the scene one frame and draw it.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the next swapchain texture cannot
    /// be acquired. The host decides whether to reconfigure.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let time = self.frame_step.run(
            &mut self.clock,
            Instant::now(),
            self.tracker.state(),
            self.viewport.height(),
            &mut self.scene,
            &mut self.animator,
        );
        self.fps.record(time.delta);

        self.camera_controller
            .update_gpu(&self.context.queue, &self.scene.rig);
        self.lighting.update_gpu(&self.context, &self.scene.light);
        self.toon.prepare(&self.context, &self.scene);
        self.particles.prepare(&self.context, &self.scene);

        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.context.create_encoder();
        {
            let mut rp = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene render pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(
                    wgpu::RenderPassDepthStencilAttachment {
                        view: &self.depth.view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    },
                ),
                ..Default::default()
            });

            self.toon.draw(
                &mut rp,
                &self.camera_controller.bind_group,
                &self.lighting.bind_group,
            );
            self.particles
                .draw(&mut rp, &self.camera_controller.bind_group);
        }
        self.context.submit(encoder);
        frame.present();
        Ok(())
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.fps.fps()
    }

    /// Current options, including panel edits.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The scene being rendered.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Latest cursor and scroll state.
    #[must_use]
    pub fn input(&self) -> &InputState {
        self.tracker.state()
    }

    /// Scroll offset of the native virtual page, for hosts without a
    /// document scroll.
    #[must_use]
    pub fn virtual_scroll(&self) -> f32 {
        self.tracker.virtual_scroll()
    }
}
