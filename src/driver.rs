//! Application event loop: window lifecycle, animation and frame pacing.
//!
//! [`run`] owns a scene for the lifetime of the window and drives it through
//! the same steps every frame:
//! 1. Ask the animator for updates based on the total elapsed time
//! 2. Apply orbit controls to the camera, if enabled
//! 3. Propagate world transforms through the scene graph
//! 4. Render, recovering from lost/outdated surfaces with a resize
//!
//! Animators receive the elapsed time since startup rather than a frame
//! delta, so driving them twice with the same timestamp leaves the scene
//! unchanged and the loop has no hidden per-frame accumulation.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use instant::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    window::Window,
};

use crate::{controls::OrbitControls, renderer::Renderer, scene::Scene, viewport::Viewport};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Per-frame scene updates, driven by total elapsed time.
///
/// Implementations should compute node transforms as a pure function of
/// `elapsed`; the driver may call `update` more than once with the same
/// timestamp (for example right after a resize).
pub trait Animate {
    fn update(&mut self, scene: &mut Scene, elapsed: Duration);
}

/// Bookkeeping for the animation clock.
#[derive(Debug, Default)]
pub struct AnimationState {
    last_elapsed: Option<Duration>,
}

impl AnimationState {
    pub fn record(&mut self, elapsed: Duration) {
        self.last_elapsed = Some(elapsed);
    }

    /// The timestamp most recently handed to the animator.
    pub fn last_elapsed(&self) -> Option<Duration> {
        self.last_elapsed
    }
}

/// A cloneable token that requests loop shutdown from anywhere.
///
/// Once stopped the driver exits at the next frame boundary instead of
/// scheduling another redraw; a token is never reset.
#[derive(Clone, Debug, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Window and behavior settings for [`run`].
#[derive(Clone, Debug)]
pub struct DriverConfig {
    pub title: String,
    pub size: (u32, u32),
    pub orbit_controls: bool,
    pub stop: StopSignal,
}

impl DriverConfig {
    pub fn titled(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Self::default()
        }
    }

    pub fn with_orbit_controls(mut self) -> Self {
        self.orbit_controls = true;
        self
    }

    pub fn with_stop_signal(mut self, stop: StopSignal) -> Self {
        self.stop = stop;
        self
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            title: "vignette".to_string(),
            size: (800, 600),
            orbit_controls: false,
            stop: StopSignal::new(),
        }
    }
}

/// GPU-side state, created asynchronously once the window exists.
struct RunState {
    viewport: Viewport,
    renderer: Renderer,
}

enum DriverEvent {
    #[allow(dead_code)]
    Initialized(RunState),
}

struct App {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    // only read on wasm, where viewport init completes on a spawned future
    #[allow(dead_code)]
    proxy: winit::event_loop::EventLoopProxy<DriverEvent>,
    config: DriverConfig,
    scene: Scene,
    animator: Option<Box<dyn Animate>>,
    controls: Option<OrbitControls>,
    animation: AnimationState,
    start: Instant,
    state: Option<RunState>,
}

impl App {
    fn new(
        event_loop: &EventLoop<DriverEvent>,
        scene: Scene,
        animator: Option<Box<dyn Animate>>,
        config: DriverConfig,
        #[cfg(not(target_arch = "wasm32"))] async_runtime: tokio::runtime::Runtime,
    ) -> Self {
        let proxy = event_loop.create_proxy();
        let controls = config
            .orbit_controls
            .then(|| OrbitControls::new(&scene.camera));
        Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime,
            proxy,
            config,
            scene,
            animator,
            controls,
            animation: AnimationState::default(),
            start: Instant::now(),
            state: None,
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(state) = &mut self.state else {
            return;
        };
        if self.config.stop.is_stopped() {
            event_loop.exit();
            return;
        }

        let elapsed = self.start.elapsed();
        if let Some(animator) = &mut self.animator {
            animator.update(&mut self.scene, elapsed);
        }
        self.animation.record(elapsed);

        if let Some(controls) = &self.controls {
            controls.update_camera(&mut self.scene.camera);
        }
        self.scene.update_world_transforms();

        match state.renderer.render(&state.viewport, &self.scene) {
            Ok(()) => state.viewport.window().request_redraw(),
            // Reconfigure the surface if it's lost or outdated
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = state.viewport.window().inner_size();
                state.viewport.resize(size.width, size.height);
                state.viewport.window().request_redraw();
            }
            Err(e) => {
                log::error!("unable to render: {}", e);
            }
        }
    }
}

impl ApplicationHandler<DriverEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes().with_title(&self.config.title);

        #[cfg(not(target_arch = "wasm32"))]
        {
            let (width, height) = self.config.size;
            window_attributes = window_attributes
                .with_inner_size(winit::dpi::LogicalSize::new(width, height));
        }

        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;
            use winit::platform::web::WindowAttributesExtWebSys;

            const CANVAS_ID: &str = "canvas";

            let window = wgpu::web_sys::window().unwrap_throw();
            let document = window.document().unwrap_throw();
            // a missing mount target is a configuration error; fail loudly
            // instead of rendering into nothing
            let canvas = match document.get_element_by_id(CANVAS_ID) {
                Some(canvas) => canvas,
                None => panic!("no canvas element with id '{}' found in the page", CANVAS_ID),
            };
            let html_canvas_element = canvas.unchecked_into();
            window_attributes = window_attributes.with_canvas(Some(html_canvas_element));
        }

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => panic!("failed to create the application window: {}", e),
        };

        #[cfg(not(target_arch = "wasm32"))]
        {
            let viewport = match self.async_runtime.block_on(Viewport::new(window)) {
                Ok(viewport) => viewport,
                Err(e) => panic!("failed to initialize the viewport: {}", e),
            };
            let renderer = Renderer::new(&viewport, &self.scene);
            let mut state = RunState { viewport, renderer };

            let size = state.viewport.window().inner_size();
            state.viewport.resize(size.width, size.height);
            self.scene.camera.resize(size.width, size.height);
            state.viewport.window().request_redraw();
            self.state = Some(state);
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            let scene = self.scene.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let viewport = match Viewport::new(window).await {
                    Ok(viewport) => viewport,
                    Err(e) => panic!("failed to initialize the viewport: {}", e),
                };
                let renderer = Renderer::new(&viewport, &scene);
                assert!(
                    proxy
                        .send_event(DriverEvent::Initialized(RunState { viewport, renderer }))
                        .is_ok()
                );
            });
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: DriverEvent) {
        match event {
            DriverEvent::Initialized(mut state) => {
                // Trigger a resize and redraw now that we are initialized
                let size = state.viewport.window().inner_size();
                state.viewport.resize(size.width, size.height);
                self.scene.camera.resize(size.width, size.height);
                state.viewport.window().request_redraw();
                self.state = Some(state);
            }
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let Some(controls) = &mut self.controls {
            controls.handle_device_event(&event);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        if let Some(controls) = &mut self.controls {
            controls.handle_window_event(&event);
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(state) = &mut self.state {
                    state.viewport.resize(size.width, size.height);
                }
                self.scene.camera.resize(size.width, size.height);
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

/// Open a window and drive `scene` until it is closed or `config.stop` fires.
pub fn run(
    scene: Scene,
    animator: Option<Box<dyn Animate>>,
    config: DriverConfig,
) -> anyhow::Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        }
    }

    #[cfg(target_arch = "wasm32")]
    {
        console_log::init_with_level(log::Level::Info).unwrap_throw();
    }

    let event_loop: EventLoop<DriverEvent> = EventLoop::with_user_event().build()?;

    #[cfg(not(target_arch = "wasm32"))]
    let async_runtime = tokio::runtime::Runtime::new()?;

    let mut app = App::new(
        &event_loop,
        scene,
        animator,
        config,
        #[cfg(not(target_arch = "wasm32"))]
        async_runtime,
    );

    event_loop.run_app(&mut app)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_signal_is_sticky_and_shared() {
        let signal = StopSignal::new();
        let other = signal.clone();
        assert!(!other.is_stopped());
        signal.stop();
        assert!(other.is_stopped());
    }

    #[test]
    fn animation_state_tracks_the_latest_timestamp() {
        let mut state = AnimationState::default();
        assert_eq!(state.last_elapsed(), None);
        state.record(Duration::from_millis(16));
        state.record(Duration::from_millis(32));
        assert_eq!(state.last_elapsed(), Some(Duration::from_millis(32)));
    }
}
